//! Heightmap sampling
//!
//! A [`Grid`] is a row-major block of 8-bit intensity samples. Rows run along
//! the image's vertical axis and columns along its horizontal axis, so a
//! `W x H` image becomes an `H x W` grid.
//!
//! Decoding image containers is left to the `image` crate; this module only
//! reads already-decoded grayscale rasters.

use crate::error::{ReliefError, Result};
use image::{DynamicImage, GrayImage, ImageBuffer};

/// Smallest dimension that yields at least one tessellable cell
pub const MIN_DIMENSION: usize = 2;

/// Gaussian sigma matching a 5x5 kernel with automatic sigma
pub const DEFAULT_BLUR_SIGMA: f32 = 1.1;

/// R x C grid of intensity samples
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    samples: Vec<u8>,
}

impl Grid {
    /// Build a grid from row-major samples.
    ///
    /// Zero-sized grids are rejected here. Single-row or single-column grids
    /// are accepted and rejected later by tessellation with
    /// [`ReliefError::DegenerateGrid`].
    pub fn new(rows: usize, cols: usize, samples: Vec<u8>) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(ReliefError::EmptyImage { rows, cols });
        }
        let expected = rows * cols;
        if samples.len() != expected {
            return Err(ReliefError::GridSizeMismatch {
                expected,
                found: samples.len(),
            });
        }
        Ok(Self {
            rows,
            cols,
            samples,
        })
    }

    /// Build a grid from nested rows, all of equal length
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> Result<Self> {
        let cols = rows.first().map_or(0, |r| r.as_ref().len());
        let mut samples = Vec::with_capacity(rows.len() * cols);
        for (row, values) in rows.iter().enumerate() {
            let values = values.as_ref();
            if values.len() != cols {
                return Err(ReliefError::RaggedGrid {
                    row,
                    expected: cols,
                    found: values.len(),
                });
            }
            samples.extend_from_slice(values);
        }
        Self::new(rows.len(), cols, samples)
    }

    /// Grid where every sample has the same intensity
    pub fn filled(rows: usize, cols: usize, intensity: u8) -> Result<Self> {
        Self::new(rows, cols, vec![intensity; rows * cols])
    }

    /// Sample a decoded grayscale image.
    ///
    /// Fails with [`ReliefError::EmptyImage`] when either dimension is below
    /// two, since such an image has no cell to tessellate.
    pub fn from_luma(image: &GrayImage) -> Result<Self> {
        let rows = image.height() as usize;
        let cols = image.width() as usize;
        if rows < MIN_DIMENSION || cols < MIN_DIMENSION {
            return Err(ReliefError::EmptyImage { rows, cols });
        }
        Self::new(rows, cols, image.as_raw().clone())
    }

    /// Convert any decoded image to luma and sample it
    pub fn from_image(image: &DynamicImage) -> Result<Self> {
        Self::from_luma(&image.to_luma8())
    }

    /// Gaussian-blurred copy with identical dimensions
    pub fn blurred(&self, sigma: f32) -> Result<Self> {
        if !sigma.is_finite() || sigma <= 0.0 {
            return Err(ReliefError::InvalidConfig(format!(
                "blur sigma must be finite and > 0 (got {})",
                sigma
            )));
        }
        let blurred = image::imageops::blur(&self.to_luma(), sigma);
        Self::new(self.rows, self.cols, blurred.into_raw())
    }

    /// Grayscale image view of this grid
    pub fn to_luma(&self) -> GrayImage {
        ImageBuffer::from_fn(self.cols as u32, self.rows as u32, |x, y| {
            image::Luma([self.get(y as usize, x as usize)])
        })
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of samples (R * C)
    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always false for a constructed grid; present for API symmetry
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Whether the grid has at least one 2x2 cell
    pub fn is_tessellable(&self) -> bool {
        self.rows >= MIN_DIMENSION && self.cols >= MIN_DIMENSION
    }

    /// Sample at (row, col). Panics when out of bounds, like slice indexing.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> u8 {
        self.samples[row * self.cols + col]
    }

    /// Row-major sample slice
    pub fn samples(&self) -> &[u8] {
        &self.samples
    }

    /// Iterate `(row, col, intensity)` in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, u8)> + '_ {
        let cols = self.cols;
        self.samples
            .iter()
            .enumerate()
            .map(move |(i, &v)| (i / cols, i % cols, v))
    }
}
