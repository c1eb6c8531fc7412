//! Face tessellation for a closed relief block
//!
//! Grid coordinates map to x = row, y = col, so looking down from +z the
//! quad corners of cell (i, j) are laid out as
//!
//! ```text
//!  y
//!  ^
//!  v1 (i, j+1) ---- v3 (i+1, j+1)
//!  |                 |
//!  v0 (i, j)   ---- v2 (i+1, j)   -> x
//! ```
//!
//! Counter-clockwise in this view is `v0 -> v2 -> v1`, which gives the TOP
//! layer +z normals. The BOTTOM layer uses the reverse winding for -z.
//!
//! The perimeter is walked counter-clockwise as well, which is the direction
//! TOP boundary edges run in. Each wall quad reuses that edge in the opposite
//! direction and the matching BOTTOM edge in the opposite direction to the
//! bottom faces, so every edge ends up shared by exactly two faces.

use crate::config::WallMode;
use crate::error::{ReliefError, Result};
use crate::grid::MIN_DIMENSION;
use crate::index::{Layer, VertexIndexer};
use std::ops::Range;

/// Triangle as three vertex indices, counter-clockwise seen from outside
pub type Face = [u32; 3];

/// Face counts per surface group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FaceCounts {
    pub top: usize,
    pub bottom: usize,
    pub walls: usize,
}

impl FaceCounts {
    /// Counts a conversion of an R x C grid will produce
    pub fn expected(rows: usize, cols: usize, wall_mode: WallMode) -> Self {
        let cells = rows.saturating_sub(1) * cols.saturating_sub(1);
        let wall_edges = match wall_mode {
            WallMode::Perimeter => 2 * rows.saturating_sub(1) + 2 * cols.saturating_sub(1),
            WallMode::InteriorTransitions => {
                rows * cols.saturating_sub(1) + rows.saturating_sub(1) * cols
            }
        };
        Self {
            top: 2 * cells,
            bottom: 2 * cells,
            walls: 2 * wall_edges,
        }
    }

    pub fn total(&self) -> usize {
        self.top + self.bottom + self.walls
    }
}

/// Face list grouped TOP, then BOTTOM, then walls
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tessellation {
    pub faces: Vec<Face>,
    pub counts: FaceCounts,
}

impl Tessellation {
    pub fn top_range(&self) -> Range<usize> {
        0..self.counts.top
    }

    pub fn bottom_range(&self) -> Range<usize> {
        let start = self.counts.top;
        start..start + self.counts.bottom
    }

    pub fn wall_range(&self) -> Range<usize> {
        let start = self.counts.top + self.counts.bottom;
        start..start + self.counts.walls
    }
}

/// Build all faces for an R x C relief block
pub fn tessellate(rows: usize, cols: usize, wall_mode: WallMode) -> Result<Tessellation> {
    if rows < MIN_DIMENSION || cols < MIN_DIMENSION {
        return Err(ReliefError::DegenerateGrid { rows, cols });
    }

    let indexer = VertexIndexer::new(rows, cols);
    let expected = FaceCounts::expected(rows, cols, wall_mode);
    let mut faces = Vec::with_capacity(expected.total());

    surface_faces(&indexer, Layer::Top, &mut faces);
    surface_faces(&indexer, Layer::Bottom, &mut faces);
    perimeter_walls(&indexer, &mut faces);
    if wall_mode == WallMode::InteriorTransitions {
        interior_walls(&indexer, &mut faces);
    }

    check_faces(&faces, indexer.vertex_count())?;

    let counts = FaceCounts {
        top: expected.top,
        bottom: expected.bottom,
        walls: faces.len() - expected.top - expected.bottom,
    };
    debug_assert_eq!(counts, expected);

    Ok(Tessellation { faces, counts })
}

/// Fail fast on any face outside `[0, vertex_count)` or repeating an index
pub fn check_faces(faces: &[Face], vertex_count: usize) -> Result<()> {
    let limit = vertex_count as u32;
    for (i, face) in faces.iter().enumerate() {
        if let Some(&index) = face.iter().find(|&&index| index >= limit) {
            return Err(ReliefError::IndexOutOfRange {
                face: i,
                index,
                limit,
            });
        }
        if face[0] == face[1] || face[1] == face[2] || face[0] == face[2] {
            return Err(ReliefError::DegenerateFace { face: i });
        }
    }
    Ok(())
}

fn surface_faces(indexer: &VertexIndexer, layer: Layer, faces: &mut Vec<Face>) {
    for i in 0..indexer.rows() - 1 {
        for j in 0..indexer.cols() - 1 {
            let v0 = indexer.index(layer, i, j);
            let v1 = indexer.index(layer, i, j + 1);
            let v2 = indexer.index(layer, i + 1, j);
            let v3 = indexer.index(layer, i + 1, j + 1);

            match layer {
                Layer::Top => {
                    faces.push([v0, v2, v1]);
                    faces.push([v1, v2, v3]);
                }
                Layer::Bottom => {
                    faces.push([v0, v1, v2]);
                    faces.push([v2, v1, v3]);
                }
            }
        }
    }
}

/// Wall quad under the TOP boundary edge `a -> b`
fn wall(indexer: &VertexIndexer, a: (usize, usize), b: (usize, usize), faces: &mut Vec<Face>) {
    let top_a = indexer.index(Layer::Top, a.0, a.1);
    let top_b = indexer.index(Layer::Top, b.0, b.1);
    let bottom_a = indexer.index(Layer::Bottom, a.0, a.1);
    let bottom_b = indexer.index(Layer::Bottom, b.0, b.1);

    faces.push([top_b, top_a, bottom_a]);
    faces.push([top_b, bottom_a, bottom_b]);
}

fn perimeter_walls(indexer: &VertexIndexer, faces: &mut Vec<Face>) {
    let last_row = indexer.rows() - 1;
    let last_col = indexer.cols() - 1;

    for r in 0..last_row {
        wall(indexer, (r, 0), (r + 1, 0), faces);
    }
    for c in 0..last_col {
        wall(indexer, (last_row, c), (last_row, c + 1), faces);
    }
    for r in (0..last_row).rev() {
        wall(indexer, (r + 1, last_col), (r, last_col), faces);
    }
    for c in (0..last_col).rev() {
        wall(indexer, (0, c + 1), (0, c), faces);
    }
}

// Legacy output: a wall on every interior grid edge as well. These walls sit
// inside the solid and leave the mesh non-manifold.
fn interior_walls(indexer: &VertexIndexer, faces: &mut Vec<Face>) {
    let rows = indexer.rows();
    let cols = indexer.cols();

    for r in 1..rows - 1 {
        for c in 0..cols - 1 {
            wall(indexer, (r, c), (r, c + 1), faces);
        }
    }
    for r in 0..rows - 1 {
        for c in 1..cols - 1 {
            wall(indexer, (r, c), (r + 1, c), faces);
        }
    }
}
