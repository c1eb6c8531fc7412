//! Wavefront OBJ export
//!
//! Output has one `v x y z` line per vertex, optionally one `vn` line per
//! vertex, then one `f i j k` line per face. Face indices are 1-based here and
//! nowhere else in the crate.
//!
//! Floats use Rust's shortest round-trip formatting, so parsing a written file
//! reproduces every coordinate bit for bit.

use crate::error::Result;
use crate::mesh::ReliefMesh;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Serialize `mesh` to any writer
pub fn write_obj<W: Write>(mesh: &ReliefMesh, mut writer: W) -> Result<()> {
    for v in &mesh.vertices {
        writeln!(writer, "v {} {} {}", v.x, v.y, v.z)?;
    }
    if let Some(normals) = &mesh.normals {
        for n in normals {
            writeln!(writer, "vn {} {} {}", n.x, n.y, n.z)?;
        }
    }
    for [a, b, c] in &mesh.faces {
        writeln!(writer, "f {} {} {}", a + 1, b + 1, c + 1)?;
    }
    writer.flush()?;
    Ok(())
}

/// Serialize `mesh` to an in-memory string
pub fn to_obj_string(mesh: &ReliefMesh) -> Result<String> {
    let mut buffer = Vec::new();
    write_obj(mesh, &mut buffer)?;
    // Only ASCII digits, signs, dots and letters are ever written
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

/// Write `mesh` to `path`, replacing any existing file.
///
/// Not atomic: a failure partway leaves a truncated file behind.
pub fn save_obj(mesh: &ReliefMesh, path: &Path) -> Result<()> {
    let file = File::create(path)?;
    write_obj(mesh, BufWriter::new(file))?;
    tracing::debug!("Wrote {} ({} faces)", path.display(), mesh.face_count());
    Ok(())
}
