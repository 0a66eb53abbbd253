use glam::IVec2;

pub fn hash4(a: u32, b: u32, c: u32, d: u32) -> u32 {
    let mut x = a.wrapping_mul(0x9E37_79B9) ^ b.rotate_left(13) ^ c.rotate_left(7) ^ d;
    x ^= x >> 16;
    x = x.wrapping_mul(0x85EB_CA6B);
    x ^= x >> 13;
    x = x.wrapping_mul(0xC2B2_AE35);
    x ^ (x >> 16)
}

/// Maps a hash into `[0, 1)`.
pub fn hash_to_unit_float(v: u32) -> f32 {
    ((v as f64) / (u32::MAX as f64 + 1.0)) as f32
}

/// Order-independent chunk random: the value depends only on the stream, the
/// chunk coordinate and the draw index, never on how many draws came before.
pub fn chunk_random(coord: IVec2, stream: u32, index: u32) -> f32 {
    hash_to_unit_float(hash4(stream, coord.x as u32, coord.y as u32, index))
}

/// Sequential view over one `chunk_random` stream.
pub struct ChunkRandom {
    coord: IVec2,
    stream: u32,
    index: u32,
}

impl ChunkRandom {
    pub fn new(coord: IVec2, stream: u32) -> Self {
        Self {
            coord,
            stream,
            index: 0,
        }
    }

    pub fn next(&mut self) -> f32 {
        let value = chunk_random(self.coord, self.stream, self.index);
        self.index = self.index.wrapping_add(1);
        value
    }

    /// `(next() - 0.5) * spread`.
    pub fn offset(&mut self, spread: f32) -> f32 {
        (self.next() - 0.5) * spread
    }
}
