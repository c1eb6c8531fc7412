//! Vertex index mapping
//!
//! `(layer, row, col)` maps to a flat index: TOP occupies `[0, R*C)` and
//! BOTTOM occupies `[R*C, 2*R*C)`, both row-major. Tessellation computes
//! neighbours arithmetically through this mapping only.

/// Which surface a vertex belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layer {
    Top,
    Bottom,
}

/// Index mapping for an R x C grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexIndexer {
    rows: usize,
    cols: usize,
}

impl VertexIndexer {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Vertices per layer (R * C)
    #[inline]
    pub fn layer_len(&self) -> usize {
        self.rows * self.cols
    }

    /// Total vertex count across both layers
    #[inline]
    pub fn vertex_count(&self) -> usize {
        2 * self.layer_len()
    }

    #[inline]
    pub fn layer_offset(&self, layer: Layer) -> usize {
        match layer {
            Layer::Top => 0,
            Layer::Bottom => self.layer_len(),
        }
    }

    #[inline]
    pub fn index(&self, layer: Layer, row: usize, col: usize) -> u32 {
        debug_assert!(row < self.rows && col < self.cols);
        (self.layer_offset(layer) + row * self.cols + col) as u32
    }

    /// Inverse of [`index`](Self::index)
    pub fn locate(&self, index: u32) -> Option<(Layer, usize, usize)> {
        let index = index as usize;
        if index >= self.vertex_count() {
            return None;
        }
        let (layer, local) = if index < self.layer_len() {
            (Layer::Top, index)
        } else {
            (Layer::Bottom, index - self.layer_len())
        };
        Some((layer, local / self.cols, local % self.cols))
    }
}
