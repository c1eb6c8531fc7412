//! Heightmap to relief mesh pipeline
//!
//! ```text
//! Grid ─(blur)─> SurfaceVertices ─(filter)─> Tessellation ─> ReliefMesh ─> OBJ
//! ```
//!
//! Every stage consumes the previous stage's output and nothing is shared
//! between calls, so independent conversions can run on separate threads.

use crate::config::{ReliefConfig, WallMode};
use crate::error::{ReliefError, Result};
use crate::export::save_obj;
use crate::grid::Grid;
use crate::height::HeightPolicy;
use crate::mesh::ReliefMesh;
use crate::smooth::filter_from_config;
use crate::surface::SurfaceVertices;
use crate::tessellate::tessellate;
use image::DynamicImage;
use std::path::Path;

/// Convert a sampled grid into a closed relief mesh
pub fn heightmap_to_mesh(grid: &Grid, config: &ReliefConfig) -> Result<ReliefMesh> {
    config.validate()?;

    // Reject before allocating any vertex or face buffers
    if !grid.is_tessellable() {
        return Err(ReliefError::DegenerateGrid {
            rows: grid.rows(),
            cols: grid.cols(),
        });
    }

    if config.wall_mode == WallMode::InteriorTransitions {
        tracing::warn!("Interior-transition walls selected; output will not be watertight");
    }

    let blurred;
    let grid = match config.blur_sigma {
        Some(sigma) => {
            blurred = grid.blurred(sigma)?;
            &blurred
        }
        None => grid,
    };

    let policy = HeightPolicy::from_config(config);
    let surface = SurfaceVertices::generate(grid, &policy)
        .filter_top(filter_from_config(config).as_ref())?;
    tracing::debug!(
        "Generated {} surface vertices for {}x{} grid",
        surface.top.len() + surface.bottom.len(),
        grid.rows(),
        grid.cols()
    );

    let tessellation = tessellate(grid.rows(), grid.cols(), config.wall_mode)?;
    tracing::debug!(
        "Tessellated {} faces (top {}, bottom {}, walls {})",
        tessellation.faces.len(),
        tessellation.counts.top,
        tessellation.counts.bottom,
        tessellation.counts.walls
    );

    let mesh = ReliefMesh {
        rows: grid.rows(),
        cols: grid.cols(),
        vertices: surface.into_vertices(),
        faces: tessellation.faces,
        counts: tessellation.counts,
        normals: None,
    };
    let mesh = if config.emit_normals {
        mesh.with_normals()
    } else {
        mesh
    };
    mesh.validate()?;

    Ok(mesh)
}

/// Sample a decoded image and convert it
pub fn image_to_mesh(image: &DynamicImage, config: &ReliefConfig) -> Result<ReliefMesh> {
    let grid = Grid::from_image(image)?;
    heightmap_to_mesh(&grid, config)
}

/// Sample, convert, and write an OBJ file in one call
pub fn image_to_obj(
    image: &DynamicImage,
    config: &ReliefConfig,
    output: &Path,
) -> Result<ReliefMesh> {
    let mesh = image_to_mesh(image, config)?;
    save_obj(&mesh, output)?;
    tracing::info!(
        "Saved relief mesh {} ({} vertices, {} faces)",
        output.display(),
        mesh.vertex_count(),
        mesh.face_count()
    );
    Ok(mesh)
}
