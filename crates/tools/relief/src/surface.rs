//! Surface vertex generation
//!
//! Each grid cell yields one TOP vertex `(row, col, height)` and one BOTTOM
//! vertex `(row, col, 0)`. Both lists are row-major and index-aligned with the
//! grid, which is what [`VertexIndexer`](crate::index::VertexIndexer) relies on.

use crate::error::{ReliefError, Result};
use crate::grid::Grid;
use crate::height::HeightMapping;
use crate::smooth::SurfaceFilter;
use glam::Vec3;

/// TOP and BOTTOM vertex layers for one grid
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceVertices {
    pub rows: usize,
    pub cols: usize,
    pub top: Vec<Vec3>,
    pub bottom: Vec<Vec3>,
}

impl SurfaceVertices {
    /// Map every grid sample through `mapping`
    pub fn generate(grid: &Grid, mapping: &dyn HeightMapping) -> Self {
        let mut top = Vec::with_capacity(grid.len());
        let mut bottom = Vec::with_capacity(grid.len());

        for (row, col, intensity) in grid.iter() {
            let (x, y) = (row as f32, col as f32);
            top.push(Vec3::new(x, y, mapping.height(intensity)));
            bottom.push(Vec3::new(x, y, 0.0));
        }

        Self {
            rows: grid.rows(),
            cols: grid.cols(),
            top,
            bottom,
        }
    }

    /// Replace the TOP layer with a filtered copy.
    ///
    /// The filter must keep the vertex count; a changed count is reported as
    /// [`ReliefError::LayoutMismatch`].
    pub fn filter_top(mut self, filter: &dyn SurfaceFilter) -> Result<Self> {
        let filtered = filter.apply(&self.top, self.rows, self.cols);
        if filtered.len() != self.top.len() {
            return Err(ReliefError::LayoutMismatch {
                what: "filtered top vertices",
                expected: self.top.len(),
                found: filtered.len(),
            });
        }
        self.top = filtered;
        Ok(self)
    }

    /// Concatenate into a single TOP-then-BOTTOM vertex list
    pub fn into_vertices(self) -> Vec<Vec3> {
        let mut vertices = self.top;
        vertices.extend(self.bottom);
        vertices
    }
}
