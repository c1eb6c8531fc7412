//! Relief mesh container and audits

use crate::error::{ReliefError, Result};
use crate::tessellate::{check_faces, Face, FaceCounts};
use glam::Vec3;
use std::collections::HashMap;

/// Closed relief mesh: TOP vertices, then BOTTOM vertices, then faces
#[derive(Debug, Clone, PartialEq)]
pub struct ReliefMesh {
    pub rows: usize,
    pub cols: usize,
    pub vertices: Vec<Vec3>,
    pub faces: Vec<Face>,
    pub counts: FaceCounts,
    /// Per-vertex normals, present only when requested
    pub normals: Option<Vec<Vec3>>,
}

/// Edge adjacency summary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EdgeReport {
    /// Distinct undirected edges
    pub edges: usize,
    /// Edges used by a single face
    pub boundary: usize,
    /// Edges used by more than two faces
    pub non_manifold: usize,
    /// Edges used by two faces with the same direction
    pub inconsistent: usize,
}

impl EdgeReport {
    pub fn is_closed(&self) -> bool {
        self.boundary == 0 && self.non_manifold == 0 && self.inconsistent == 0
    }
}

/// Axis-aligned bounds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Vec3,
    pub max: Vec3,
}

impl Bounds {
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }
}

/// Summary printed by the CLI after a conversion
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshStats {
    pub rows: usize,
    pub cols: usize,
    pub vertices: usize,
    pub counts: FaceCounts,
    pub bounds: Option<Bounds>,
    pub volume: f64,
}

impl ReliefMesh {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    pub fn has_normals(&self) -> bool {
        self.normals.is_some()
    }

    /// Check face indices and normal count against the vertex list
    pub fn validate(&self) -> Result<()> {
        check_faces(&self.faces, self.vertices.len())?;
        if self.counts.total() != self.faces.len() {
            return Err(ReliefError::LayoutMismatch {
                what: "face count",
                expected: self.counts.total(),
                found: self.faces.len(),
            });
        }
        if let Some(normals) = &self.normals {
            if normals.len() != self.vertices.len() {
                return Err(ReliefError::LayoutMismatch {
                    what: "vertex normals",
                    expected: self.vertices.len(),
                    found: normals.len(),
                });
            }
        }
        Ok(())
    }

    /// Count how each undirected edge is used by the faces
    pub fn edge_report(&self) -> EdgeReport {
        let mut directed: HashMap<(u32, u32), u32> =
            HashMap::with_capacity(self.faces.len() * 3);
        for face in &self.faces {
            for k in 0..3 {
                *directed.entry((face[k], face[(k + 1) % 3])).or_insert(0) += 1;
            }
        }

        let mut report = EdgeReport::default();
        for (&(a, b), &forward) in &directed {
            let backward = directed.get(&(b, a)).copied().unwrap_or(0);
            // Count each undirected edge once: from a < b when both
            // directions exist, otherwise from the only one present
            if backward > 0 && a > b {
                continue;
            }
            report.edges += 1;
            match forward + backward {
                1 => report.boundary += 1,
                2 if forward == 1 => {}
                2 => report.inconsistent += 1,
                _ => report.non_manifold += 1,
            }
        }
        report
    }

    /// Every edge shared by exactly two faces with opposite winding
    pub fn is_watertight(&self) -> bool {
        self.edge_report().is_closed()
    }

    /// Enclosed volume; positive when faces wind outward
    pub fn signed_volume(&self) -> f64 {
        self.faces
            .iter()
            .map(|&[a, b, c]| {
                let a = self.vertices[a as usize].as_dvec3();
                let b = self.vertices[b as usize].as_dvec3();
                let c = self.vertices[c as usize].as_dvec3();
                a.dot(b.cross(c))
            })
            .sum::<f64>()
            / 6.0
    }

    pub fn bounds(&self) -> Option<Bounds> {
        let first = *self.vertices.first()?;
        let (min, max) = self
            .vertices
            .iter()
            .fold((first, first), |(min, max), &v| (min.min(v), max.max(v)));
        Some(Bounds { min, max })
    }

    /// Area-weighted vertex normals
    pub fn compute_normals(&self) -> Vec<Vec3> {
        let mut normals = vec![Vec3::ZERO; self.vertices.len()];
        for &[a, b, c] in &self.faces {
            let (ia, ib, ic) = (a as usize, b as usize, c as usize);
            let pa = self.vertices[ia];
            let n = (self.vertices[ib] - pa).cross(self.vertices[ic] - pa);
            normals[ia] += n;
            normals[ib] += n;
            normals[ic] += n;
        }
        normals.iter().map(|n| n.normalize_or_zero()).collect()
    }

    pub fn with_normals(mut self) -> Self {
        self.normals = Some(self.compute_normals());
        self
    }

    pub fn stats(&self) -> MeshStats {
        MeshStats {
            rows: self.rows,
            cols: self.cols,
            vertices: self.vertex_count(),
            counts: self.counts,
            bounds: self.bounds(),
            volume: self.signed_volume(),
        }
    }
}
