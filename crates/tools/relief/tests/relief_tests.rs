//! Integration tests for the image -> relief mesh -> OBJ pipeline
//!
//! These tests check mesh-level properties (counts, closure, winding) and
//! that the written OBJ text reads back to the same geometry.

use glam::Vec3;
use relief::{
    heightmap_to_mesh, image_to_obj, save_obj, to_obj_string, FaceCounts, Grid, ReliefConfig,
    ReliefError, ReliefMesh, WallMode,
};

/// Deterministic pseudo-random grid, no two neighbouring samples alike
fn patterned_grid(rows: usize, cols: usize) -> Grid {
    let samples = (0..rows * cols)
        .map(|i| ((i * 97 + (i / cols) * 31) % 256) as u8)
        .collect();
    Grid::new(rows, cols, samples).unwrap()
}

fn face_normal(mesh: &ReliefMesh, face: [u32; 3]) -> Vec3 {
    let [a, b, c] = face.map(|i| mesh.vertices[i as usize]);
    (b - a).cross(c - a)
}

/// Minimal reader for the two statement kinds the exporter writes
fn parse_obj(text: &str) -> (Vec<Vec3>, Vec<[u32; 3]>) {
    let mut vertices = Vec::new();
    let mut faces = Vec::new();
    for line in text.lines() {
        let mut parts = line.split_whitespace();
        match parts.next() {
            Some("v") => {
                let xyz: Vec<f32> = parts.map(|p| p.parse().unwrap()).collect();
                vertices.push(Vec3::new(xyz[0], xyz[1], xyz[2]));
            }
            Some("f") => {
                let idx: Vec<u32> = parts.map(|p| p.parse().unwrap()).collect();
                assert!(idx.iter().all(|&i| i >= 1), "OBJ indices are 1-based");
                faces.push([idx[0] - 1, idx[1] - 1, idx[2] - 1]);
            }
            _ => {}
        }
    }
    (vertices, faces)
}

#[test]
fn test_two_by_two_scenario() {
    let grid = Grid::from_rows(&[[0u8, 255], [255, 0]]).unwrap();
    let mesh = heightmap_to_mesh(&grid, &ReliefConfig::binary(20.0)).unwrap();

    let expected = [
        // TOP
        [0.0, 0.0, 20.0],
        [0.0, 1.0, 0.0],
        [1.0, 0.0, 0.0],
        [1.0, 1.0, 20.0],
        // BOTTOM
        [0.0, 0.0, 0.0],
        [0.0, 1.0, 0.0],
        [1.0, 0.0, 0.0],
        [1.0, 1.0, 0.0],
    ];
    let actual: Vec<[f32; 3]> = mesh.vertices.iter().map(|v| v.to_array()).collect();
    assert_eq!(actual, expected);
    assert_eq!(
        mesh.counts,
        FaceCounts {
            top: 2,
            bottom: 2,
            walls: 8
        }
    );
    assert!(mesh.is_watertight());
}

#[test]
fn test_vertex_and_face_counts() {
    for (rows, cols) in [(2, 2), (2, 9), (7, 3), (16, 16), (31, 17)] {
        let grid = patterned_grid(rows, cols);
        let mesh = heightmap_to_mesh(&grid, &ReliefConfig::default()).unwrap();
        assert_eq!(mesh.vertex_count(), 2 * rows * cols);
        assert_eq!(mesh.counts.top, 2 * (rows - 1) * (cols - 1));
        assert_eq!(mesh.counts.bottom, mesh.counts.top);
        assert_eq!(mesh.counts.walls, 2 * (2 * (rows - 1) + 2 * (cols - 1)));
        assert_eq!(mesh.face_count(), mesh.counts.total());
    }
}

#[test]
fn test_watertight_in_every_height_mode() {
    let configs = [
        ReliefConfig::binary(20.0),
        ReliefConfig::continuous(0.2, false),
        ReliefConfig::continuous(0.2, true),
        ReliefConfig::continuous(0.2, false).with_smoothing(3, 0.5),
        ReliefConfig::binary(5.0).with_blur(1.1),
    ];
    for config in &configs {
        for (rows, cols) in [(2, 2), (3, 5), (12, 9)] {
            let mesh = heightmap_to_mesh(&patterned_grid(rows, cols), config).unwrap();
            let report = mesh.edge_report();
            assert!(
                report.is_closed(),
                "{}x{} with {:?}: {:?}",
                rows,
                cols,
                config,
                report
            );
        }
    }
}

#[test]
fn test_faces_wind_outward() {
    // Non-zero everywhere so no wall collapses onto the bottom
    let samples = (0..6 * 5).map(|i| 40 + (i * 13 % 200) as u8).collect();
    let grid = Grid::new(6, 5, samples).unwrap();
    let mesh = heightmap_to_mesh(&grid, &ReliefConfig::continuous(0.2, false)).unwrap();

    let faces = &mesh.faces;
    let (top, rest) = faces.split_at(mesh.counts.top);
    let (bottom, walls) = rest.split_at(mesh.counts.bottom);

    assert!(top.iter().all(|&f| face_normal(&mesh, f).z > 0.0));
    assert!(bottom.iter().all(|&f| face_normal(&mesh, f).z < 0.0));

    let centre = Vec3::new(2.5, 2.0, 0.0);
    for &face in walls {
        let normal = face_normal(&mesh, face);
        let [a, b, c] = face.map(|i| mesh.vertices[i as usize]);
        let centroid = (a + b + c) / 3.0;
        let outward = (centroid - centre) * Vec3::new(1.0, 1.0, 0.0);
        assert!(normal.z.abs() < 1e-6, "wall face {:?} not vertical", face);
        assert!(normal.dot(outward) > 0.0, "wall face {:?} faces inward", face);
    }

    assert!(mesh.signed_volume() > 0.0);
}

#[test]
fn test_stamp_volume() {
    let grid = Grid::filled(5, 8, 0).unwrap();
    let mesh = heightmap_to_mesh(&grid, &ReliefConfig::binary(20.0)).unwrap();
    // Solid block spanning (R-1) x (C-1) x H
    assert!((mesh.signed_volume() - 4.0 * 7.0 * 20.0).abs() < 1e-6);
}

#[test]
fn test_binary_threshold_uniform_grids() {
    let config = ReliefConfig::binary(12.5);

    let dark = heightmap_to_mesh(&Grid::filled(4, 4, 127).unwrap(), &config).unwrap();
    assert!(dark.vertices[..16].iter().all(|v| v.z == 12.5));

    let light = heightmap_to_mesh(&Grid::filled(4, 4, 128).unwrap(), &config).unwrap();
    assert!(light.vertices[..16].iter().all(|v| v.z == 0.0));
}

#[test]
fn test_continuous_monotonic_in_intensity() {
    let samples: Vec<u8> = (0..=255).collect();
    let grid = Grid::new(16, 16, samples).unwrap();
    let mesh = heightmap_to_mesh(&grid, &ReliefConfig::continuous(0.2, false)).unwrap();

    let top = &mesh.vertices[..256];
    for pair in top.windows(2) {
        assert!(pair[0].z <= pair[1].z);
    }
}

#[test]
fn test_degenerate_inputs() {
    for (rows, cols) in [(1, 6), (6, 1)] {
        let grid = Grid::new(rows, cols, vec![0; rows * cols]).unwrap();
        let err = heightmap_to_mesh(&grid, &ReliefConfig::default()).unwrap_err();
        assert!(matches!(err, ReliefError::DegenerateGrid { .. }));
    }
}

#[test]
fn test_obj_round_trip() {
    let config = ReliefConfig::continuous(0.37, true).with_smoothing(2, 0.4);
    let mesh = heightmap_to_mesh(&patterned_grid(9, 6), &config).unwrap();
    let text = to_obj_string(&mesh).unwrap();

    let (vertices, faces) = parse_obj(&text);
    assert_eq!(vertices, mesh.vertices);
    assert_eq!(faces, mesh.faces);
}

#[test]
fn test_obj_readable_by_tobj() {
    let mesh = heightmap_to_mesh(&patterned_grid(5, 7), &ReliefConfig::binary(20.0)).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("relief.obj");
    save_obj(&mesh, &path).unwrap();

    let options = tobj::LoadOptions {
        single_index: false,
        triangulate: false,
        ..Default::default()
    };
    let (models, _materials) = tobj::load_obj(&path, &options).unwrap();
    assert_eq!(models.len(), 1);

    let loaded = &models[0].mesh;
    assert_eq!(loaded.indices.len(), mesh.face_count() * 3);

    // tobj may renumber vertices, so compare resolved corner positions
    for (face, corners) in mesh.faces.iter().zip(loaded.indices.chunks(3)) {
        for (&original, &read) in face.iter().zip(corners) {
            let p = &loaded.positions[read as usize * 3..read as usize * 3 + 3];
            assert_eq!(Vec3::from_slice(p), mesh.vertices[original as usize]);
        }
    }
}

#[test]
fn test_save_overwrites_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.obj");
    std::fs::write(&path, "x".repeat(1 << 16)).unwrap();

    let grid = Grid::filled(2, 2, 0).unwrap();
    let mesh = heightmap_to_mesh(&grid, &ReliefConfig::default()).unwrap();
    save_obj(&mesh, &path).unwrap();

    let written = std::fs::read_to_string(&path).unwrap();
    assert_eq!(written, to_obj_string(&mesh).unwrap());
}

#[test]
fn test_normals_are_additive() {
    let grid = patterned_grid(4, 4);
    let plain = heightmap_to_mesh(&grid, &ReliefConfig::default()).unwrap();
    let with_normals =
        heightmap_to_mesh(&grid, &ReliefConfig::default().with_normals(true)).unwrap();

    let text = to_obj_string(&with_normals).unwrap();
    assert_eq!(text.lines().filter(|l| l.starts_with("vn ")).count(), 32);

    let (vertices, faces) = parse_obj(&text);
    assert_eq!(vertices, plain.vertices);
    assert_eq!(faces, plain.faces);
}

#[test]
fn test_interior_transition_walls_are_flagged_geometry() {
    let grid = patterned_grid(4, 4);
    let config = ReliefConfig::binary(20.0).with_wall_mode(WallMode::InteriorTransitions);
    let mesh = heightmap_to_mesh(&grid, &config).unwrap();

    assert_eq!(mesh.counts, FaceCounts::expected(4, 4, WallMode::InteriorTransitions));
    assert!(!mesh.is_watertight());
    assert!(mesh.edge_report().non_manifold > 0);
}

#[test]
fn test_image_file_to_obj() {
    let dir = tempfile::tempdir().unwrap();
    let png = dir.path().join("stamp.png");
    let obj = dir.path().join("stamp.obj");

    let image =
        image::GrayImage::from_fn(6, 4, |x, _| image::Luma([if x < 3 { 0u8 } else { 255 }]));
    image.save(&png).unwrap();

    let decoded = image::open(&png).unwrap();
    let mesh = image_to_obj(&decoded, &ReliefConfig::default(), &obj).unwrap();

    assert_eq!((mesh.rows, mesh.cols), (4, 6));
    // Columns 0..3 are dark and raised
    assert_eq!(mesh.vertices[0].z, 20.0);
    assert_eq!(mesh.vertices[5].z, 0.0);

    let (vertices, faces) = parse_obj(&std::fs::read_to_string(&obj).unwrap());
    assert_eq!(vertices.len(), 48);
    assert_eq!(faces.len(), mesh.face_count());
}

#[test]
fn test_independent_conversions_in_parallel() {
    let grid = patterned_grid(20, 20);
    let config = ReliefConfig::continuous(0.2, false);
    let reference = heightmap_to_mesh(&grid, &config).unwrap();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| heightmap_to_mesh(&grid, &config).unwrap()))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), reference);
        }
    });
}
