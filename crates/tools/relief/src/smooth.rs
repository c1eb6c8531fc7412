//! Top-surface filters
//!
//! Filters run on the already generated TOP layer and must return the same
//! number of vertices in the same order. Only heights move; the x/y footprint
//! stays on the grid so side walls still line up with the bottom layer.

use crate::config::{ReliefConfig, SmoothingConfig};
use glam::Vec3;

/// Post-process over the TOP vertex layer of an R x C grid
pub trait SurfaceFilter {
    fn apply(&self, top: &[Vec3], rows: usize, cols: usize) -> Vec<Vec3>;
}

/// Leaves the layer untouched
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

impl SurfaceFilter for Identity {
    fn apply(&self, top: &[Vec3], _rows: usize, _cols: usize) -> Vec<Vec3> {
        top.to_vec()
    }
}

/// Laplacian height smoothing over the 4-neighbourhood
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Laplacian {
    pub iterations: u32,
    pub lambda: f32,
}

impl From<SmoothingConfig> for Laplacian {
    fn from(config: SmoothingConfig) -> Self {
        Self {
            iterations: config.iterations,
            lambda: config.lambda,
        }
    }
}

impl SurfaceFilter for Laplacian {
    fn apply(&self, top: &[Vec3], rows: usize, cols: usize) -> Vec<Vec3> {
        let mut current = top.to_vec();
        if current.len() != rows * cols {
            return current;
        }
        let mut next = current.clone();

        for _ in 0..self.iterations {
            for row in 0..rows {
                for col in 0..cols {
                    let i = row * cols + col;
                    let mut sum = 0.0;
                    let mut count = 0u32;
                    if row > 0 {
                        sum += current[i - cols].z;
                        count += 1;
                    }
                    if row + 1 < rows {
                        sum += current[i + cols].z;
                        count += 1;
                    }
                    if col > 0 {
                        sum += current[i - 1].z;
                        count += 1;
                    }
                    if col + 1 < cols {
                        sum += current[i + 1].z;
                        count += 1;
                    }
                    let z = current[i].z;
                    next[i].z = if count == 0 {
                        z
                    } else {
                        z + self.lambda * (sum / count as f32 - z)
                    };
                }
            }
            std::mem::swap(&mut current, &mut next);
        }

        current
    }
}

/// Filter selected by the configuration's `smoothing` section
pub fn filter_from_config(config: &ReliefConfig) -> Box<dyn SurfaceFilter> {
    match config.smoothing {
        Some(smoothing) => Box::new(Laplacian::from(smoothing)),
        None => Box::new(Identity),
    }
}
