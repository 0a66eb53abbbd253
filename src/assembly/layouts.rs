use std::f32::consts::TAU;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::world_core::random::SeededRandom;

const SCATTER_ATTEMPTS_PER_STRUCTURE: usize = 50;
const SCATTER_RING_SIZE: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LayoutPattern {
    Scattered,
    Circular,
    Linear,
    Grid,
    Defensive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RotationPolicy {
    Random,
    FacingCenter,
    FacingWater,
    Aligned,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Spacing {
    pub min: f32,
    pub max: f32,
}

impl Spacing {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    pub fn average(&self) -> f32 {
        (self.min + self.max) / 2.0
    }
}

/// Local (center-relative) positions for `count` structures.
pub fn layout_positions(
    pattern: LayoutPattern,
    random: &mut SeededRandom,
    count: usize,
    spacing: Spacing,
    center_buffer: f32,
) -> Vec<Vec3> {
    if count == 0 {
        return Vec::new();
    }
    match pattern {
        LayoutPattern::Scattered => scattered(random, count, spacing, center_buffer),
        LayoutPattern::Circular => circular(random, count, spacing, center_buffer),
        LayoutPattern::Linear => linear(random, count, spacing),
        LayoutPattern::Grid => grid(random, count, spacing, center_buffer),
        LayoutPattern::Defensive => defensive(random, count, spacing, center_buffer),
    }
}

/// Rejection-sampled rings that widen every four placements. May return fewer
/// than `count` when the attempt budget runs out.
fn scattered(random: &mut SeededRandom, count: usize, spacing: Spacing, center_buffer: f32) -> Vec<Vec3> {
    let mut positions: Vec<Vec3> = Vec::with_capacity(count);
    for _ in 0..count * SCATTER_ATTEMPTS_PER_STRUCTURE {
        if positions.len() >= count {
            break;
        }
        let ring = (positions.len() / SCATTER_RING_SIZE + 1) as f32;
        let angle = random.range_f32(0.0, TAU);
        let distance = center_buffer + ring * random.range_f32(spacing.min, spacing.max);
        let candidate = Vec3::new(angle.cos() * distance, 0.0, angle.sin() * distance);

        if positions.iter().all(|p| p.distance(candidate) >= spacing.min) {
            positions.push(candidate);
        }
    }
    positions
}

fn circular(random: &mut SeededRandom, count: usize, spacing: Spacing, center_buffer: f32) -> Vec<Vec3> {
    let radius = center_buffer.max(count as f32 * spacing.average() / TAU);
    (0..count)
        .map(|i| {
            let angle = i as f32 / count as f32 * TAU + random.range_f32(-0.1, 0.1);
            let distance = radius + random.range_f32(-1.0, 1.0);
            Vec3::new(angle.cos() * distance, 0.0, angle.sin() * distance)
        })
        .collect()
}

/// A waterfront line along X, centred on the origin.
fn linear(random: &mut SeededRandom, count: usize, spacing: Spacing) -> Vec<Vec3> {
    let mut positions = Vec::with_capacity(count);
    let mut x = 0.0f32;
    for _ in 0..count {
        let z = random.range_f32(-1.0, 1.0);
        positions.push(Vec3::new(x, 0.0, z));
        x += random.range_f32(spacing.min, spacing.max);
    }
    let shift = x / 2.0;
    for p in &mut positions {
        p.x -= shift;
    }
    positions
}

/// Square grid with the cells inside the center buffer left empty. The grid
/// grows until enough cells sit outside the buffer.
fn grid(random: &mut SeededRandom, count: usize, spacing: Spacing, center_buffer: f32) -> Vec<Vec3> {
    let step = spacing.average();
    let cell = |index: usize, side: usize| (index as f32 - (side as f32 - 1.0) / 2.0) * step;
    let outside = |x: f32, z: f32| !(x.abs() < center_buffer && z.abs() < center_buffer);

    let mut side = (count as f32).sqrt().ceil() as usize;
    loop {
        let free = (0..side * side)
            .filter(|i| outside(cell(i % side, side), cell(i / side, side)))
            .count();
        // A zero step never leaves the buffer; give up and place what fits.
        if free >= count || side > count * 2 {
            break;
        }
        side += 1;
    }

    let mut positions = Vec::with_capacity(count);
    for row in 0..side {
        for col in 0..side {
            if positions.len() >= count {
                return positions;
            }
            let (x, z) = (cell(col, side), cell(row, side));
            if !outside(x, z) {
                continue;
            }
            positions.push(Vec3::new(
                x + random.range_f32(-0.5, 0.5),
                0.0,
                z + random.range_f32(-0.5, 0.5),
            ));
        }
    }
    positions
}

/// One slot at the center for the command structure, the rest on a ring
/// outside the buffer.
fn defensive(random: &mut SeededRandom, count: usize, spacing: Spacing, center_buffer: f32) -> Vec<Vec3> {
    let mut positions = vec![Vec3::ZERO];
    let perimeter = count - 1;
    let radius = center_buffer + spacing.min;
    for i in 0..perimeter {
        let angle = i as f32 / perimeter as f32 * TAU;
        let distance = radius + random.range_f32(0.0, spacing.max - spacing.min);
        positions.push(Vec3::new(angle.cos() * distance, 0.0, angle.sin() * distance));
    }
    positions
}

/// Yaw for a structure at `local` (relative to the settlement center).
pub fn rotation_for(local: Vec3, policy: RotationPolicy, random: &mut SeededRandom) -> f32 {
    match policy {
        RotationPolicy::FacingCenter => (-local.x).atan2(-local.z),
        // Water lies on +Z of a linear layout.
        RotationPolicy::FacingWater => 0.0,
        RotationPolicy::Aligned => 0.0,
        RotationPolicy::Random => random.range_f32(0.0, TAU),
    }
}
