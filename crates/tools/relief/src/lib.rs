//! Relief - grayscale image to 3D-printable relief mesh
//!
//! Turns a 2D grid of 8-bit intensity samples into a watertight triangle mesh:
//! a height-mapped top surface, a flat bottom at z = 0, and side walls joining
//! the two along the grid perimeter. The mesh is written as Wavefront OBJ.
//!
//! ## Architecture
//!
//! ```text
//! Decoded image (image crate)
//!     ↓ grid::Grid::from_image()
//! Grid (R x C intensities, optional Gaussian pre-blur)
//!     ↓ surface::SurfaceVertices::generate() with a height::HeightMapping
//! TOP + BOTTOM vertex layers (optional smooth::SurfaceFilter on TOP)
//!     ↓ tessellate::tessellate()
//! Faces: top, bottom, walls
//!     ↓ export::write_obj()
//! v / f lines, 1-based indices
//! ```
//!
//! ## Height Modes
//!
//! - **Binary threshold**: samples below 128 are raised to `extrusion_height`
//!   (default 20.0), everything else stays flat. Produces a stamp.
//! - **Continuous**: `z = intensity * scale_factor` (default 0.2), optionally
//!   using `255 - intensity` instead.
//!
//! ## Quick Start
//!
//! ```no_run
//! use relief::{image_to_obj, ReliefConfig};
//! use std::path::Path;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let image = image::open("logo.png")?;
//!     let config = ReliefConfig::binary(20.0);
//!
//!     let mesh = image_to_obj(&image, &config, Path::new("logo.obj"))?;
//!     println!("Wrote {} faces", mesh.face_count());
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod convert;
pub mod error;
pub mod export;
pub mod grid;
pub mod height;
pub mod index;
pub mod mesh;
pub mod smooth;
pub mod surface;
pub mod tessellate;

// Re-export main types for convenience
pub use config::{HeightMode, ReliefConfig, SmoothingConfig, WallMode};
pub use convert::{heightmap_to_mesh, image_to_mesh, image_to_obj};
pub use error::{ReliefError, Result};
pub use export::{save_obj, to_obj_string, write_obj};
pub use grid::Grid;
pub use height::{BinaryThreshold, Continuous, HeightMapping, HeightPolicy};
pub use index::{Layer, VertexIndexer};
pub use mesh::{Bounds, EdgeReport, MeshStats, ReliefMesh};
pub use smooth::{Identity, Laplacian, SurfaceFilter};
pub use surface::SurfaceVertices;
pub use tessellate::{tessellate, Face, FaceCounts, Tessellation};
