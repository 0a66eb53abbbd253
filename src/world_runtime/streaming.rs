use std::collections::HashSet;
use std::sync::Arc;

use glam::{IVec2, Vec3};

use crate::world_core::chunk::{ChunkData, CHUNK_SIZE};
use crate::world_core::chunk_generator::ChunkGenerator;
use crate::world_core::layout::WorldLayout;

// ---------------------------------------------------------------------------
// ChunkLoader: platform-specific chunk generation
// ---------------------------------------------------------------------------

trait ChunkLoader {
    fn new_loader(layout: Arc<WorldLayout>, threads: usize) -> anyhow::Result<Self>
    where
        Self: Sized;
    fn dispatch(&mut self, coord: IVec2);
    fn poll(&mut self) -> Vec<ChunkData>;
    fn wait(&mut self) -> Vec<ChunkData>;
    fn pending_count(&self) -> usize;
    fn cancel_outside(&mut self, required: &HashSet<IVec2>);
}

// ---------------------------------------------------------------------------
// Native: threaded chunk generation via rayon
// ---------------------------------------------------------------------------

#[cfg(not(target_arch = "wasm32"))]
mod threaded {
    use super::*;
    use std::sync::mpsc::{self, Receiver, Sender};

    use rayon::{ThreadPool, ThreadPoolBuilder};

    pub struct ThreadedLoader {
        pool: ThreadPool,
        sender: Sender<ChunkData>,
        receiver: Receiver<ChunkData>,
        pending: HashSet<IVec2>,
        layout: Arc<WorldLayout>,
    }

    impl ThreadedLoader {
        /// Keeps a finished chunk only if it is still wanted.
        fn accept(&mut self, chunk: ChunkData, completed: &mut Vec<ChunkData>) {
            if self.pending.remove(&chunk.coord()) {
                completed.push(chunk);
            }
        }
    }

    impl ChunkLoader for ThreadedLoader {
        fn new_loader(layout: Arc<WorldLayout>, threads: usize) -> anyhow::Result<Self> {
            let pool = ThreadPoolBuilder::new()
                .num_threads(threads.max(1))
                .thread_name(|i| format!("chunk-gen-{i}"))
                .build()?;
            let (sender, receiver) = mpsc::channel();
            Ok(Self {
                pool,
                sender,
                receiver,
                pending: HashSet::new(),
                layout,
            })
        }

        fn dispatch(&mut self, coord: IVec2) {
            if !self.pending.insert(coord) {
                return;
            }
            let tx = self.sender.clone();
            let layout = Arc::clone(&self.layout);
            self.pool.spawn(move || {
                let chunk = ChunkGenerator::new(layout).generate_chunk(coord);
                let _ = tx.send(chunk);
            });
        }

        fn poll(&mut self) -> Vec<ChunkData> {
            let mut completed = Vec::new();
            while let Ok(chunk) = self.receiver.try_recv() {
                self.accept(chunk, &mut completed);
            }
            completed
        }

        fn wait(&mut self) -> Vec<ChunkData> {
            let mut completed = Vec::with_capacity(self.pending.len());
            while !self.pending.is_empty() {
                // The loader holds a sender, so this only fails if a worker panicked.
                let Ok(chunk) = self.receiver.recv() else {
                    break;
                };
                self.accept(chunk, &mut completed);
            }
            completed
        }

        fn pending_count(&self) -> usize {
            self.pending.len()
        }

        fn cancel_outside(&mut self, required: &HashSet<IVec2>) {
            self.pending.retain(|coord| required.contains(coord));
        }
    }
}

// ---------------------------------------------------------------------------
// Wasm: synchronous chunk generation, throttled per poll
// ---------------------------------------------------------------------------

#[cfg(target_arch = "wasm32")]
mod sync {
    use super::*;

    const CHUNKS_PER_POLL: usize = 2;

    pub struct SyncLoader {
        queue: Vec<IVec2>,
        generator: ChunkGenerator,
    }

    impl SyncLoader {
        fn generate(&mut self, count: usize) -> Vec<ChunkData> {
            let coords: Vec<IVec2> = self.queue.drain(..count).collect();
            coords
                .into_iter()
                .map(|coord| self.generator.generate_chunk(coord))
                .collect()
        }
    }

    impl ChunkLoader for SyncLoader {
        fn new_loader(layout: Arc<WorldLayout>, _threads: usize) -> anyhow::Result<Self> {
            Ok(Self {
                queue: Vec::new(),
                generator: ChunkGenerator::new(layout),
            })
        }

        fn dispatch(&mut self, coord: IVec2) {
            if !self.queue.contains(&coord) {
                self.queue.push(coord);
            }
        }

        fn poll(&mut self) -> Vec<ChunkData> {
            let count = self.queue.len().min(CHUNKS_PER_POLL);
            self.generate(count)
        }

        fn wait(&mut self) -> Vec<ChunkData> {
            let count = self.queue.len();
            self.generate(count)
        }

        fn pending_count(&self) -> usize {
            self.queue.len()
        }

        fn cancel_outside(&mut self, required: &HashSet<IVec2>) {
            self.queue.retain(|coord| required.contains(coord));
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
type PlatformLoader = threaded::ThreadedLoader;
#[cfg(target_arch = "wasm32")]
type PlatformLoader = sync::SyncLoader;

// ---------------------------------------------------------------------------
// ChunkPrewarmer
// ---------------------------------------------------------------------------

/// Generates chunks off the caller's thread. Results come back in completion
/// order; each chunk depends only on its coordinate and the layout.
pub struct ChunkPrewarmer {
    loader: PlatformLoader,
}

impl ChunkPrewarmer {
    pub fn new(layout: Arc<WorldLayout>, threads: usize) -> anyhow::Result<Self> {
        Ok(Self {
            loader: PlatformLoader::new_loader(layout, threads)?,
        })
    }

    /// Queues a chunk. Already-pending coordinates are ignored.
    pub fn dispatch(&mut self, coord: IVec2) {
        self.loader.dispatch(coord);
    }

    /// Chunks finished since the last call, without blocking.
    pub fn poll(&mut self) -> Vec<ChunkData> {
        self.loader.poll()
    }

    /// Blocks until every pending chunk is done.
    pub fn wait(&mut self) -> Vec<ChunkData> {
        self.loader.wait()
    }

    pub fn pending_count(&self) -> usize {
        self.loader.pending_count()
    }

    /// Drops pending work outside `required`. Chunks already being generated
    /// are discarded when they finish.
    pub fn cancel_outside(&mut self, required: &HashSet<IVec2>) {
        self.loader.cancel_outside(required);
    }
}

pub fn world_to_chunk(position: Vec3) -> IVec2 {
    IVec2::new(
        (position.x / CHUNK_SIZE).floor() as i32,
        (position.z / CHUNK_SIZE).floor() as i32,
    )
}

pub fn required_coords(center: IVec2, radius: i32) -> HashSet<IVec2> {
    let radius = radius.max(0);
    let width = radius * 2 + 1;
    let mut required = HashSet::with_capacity((width * width) as usize);

    for z in -radius..=radius {
        for x in -radius..=radius {
            required.insert(IVec2::new(center.x + x, center.y + z));
        }
    }

    required
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world_core::config::WorldLayoutConfig;
    use crate::world_core::layout::generate_world_layout;

    fn small_layout() -> Arc<WorldLayout> {
        Arc::new(generate_world_layout(&WorldLayoutConfig {
            seed: 9,
            world_radius: 20,
            ..WorldLayoutConfig::default()
        }))
    }

    #[test]
    fn world_to_chunk_floors_negative_positions() {
        assert_eq!(world_to_chunk(Vec3::new(0.0, 0.0, 0.0)), IVec2::ZERO);
        assert_eq!(world_to_chunk(Vec3::new(99.9, 5.0, 150.0)), IVec2::new(0, 1));
        assert_eq!(world_to_chunk(Vec3::new(-0.1, 0.0, -100.0)), IVec2::new(-1, -1));
    }

    #[test]
    fn required_coords_cover_the_square() {
        let coords = required_coords(IVec2::new(3, -2), 1);
        assert_eq!(coords.len(), 9);
        assert!(coords.contains(&IVec2::new(2, -3)));
        assert!(coords.contains(&IVec2::new(4, -1)));
        assert_eq!(required_coords(IVec2::ZERO, 0).len(), 1);
        assert_eq!(required_coords(IVec2::ZERO, -3).len(), 1);
    }

    #[test]
    fn prewarmed_chunks_match_direct_generation() {
        let layout = small_layout();
        let mut prewarmer = ChunkPrewarmer::new(Arc::clone(&layout), 3).unwrap();
        let required = required_coords(IVec2::new(1, 1), 2);
        for &coord in &required {
            prewarmer.dispatch(coord);
        }
        let chunks = prewarmer.wait();
        assert_eq!(chunks.len(), required.len());
        assert_eq!(prewarmer.pending_count(), 0);

        let generator = ChunkGenerator::new(layout);
        for chunk in chunks {
            assert_eq!(chunk, generator.generate_chunk(chunk.coord()));
        }
    }

    #[test]
    fn cancelled_chunks_are_not_returned() {
        let layout = small_layout();
        let mut prewarmer = ChunkPrewarmer::new(layout, 2).unwrap();
        prewarmer.dispatch(IVec2::new(0, 0));
        prewarmer.dispatch(IVec2::new(5, 5));
        prewarmer.dispatch(IVec2::new(5, 5));
        assert_eq!(prewarmer.pending_count(), 2);

        let keep: HashSet<IVec2> = [IVec2::ZERO].into_iter().collect();
        prewarmer.cancel_outside(&keep);
        let chunks = prewarmer.wait();
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].coord(), IVec2::ZERO);
    }
}
