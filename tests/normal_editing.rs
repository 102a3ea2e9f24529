#![allow(clippy::unwrap_used)]

use approx::assert_relative_eq;
use normal_edit::host::{InteractionMode, MemoryHost, SelectMode};
use normal_edit::math::{Point3, UnitQuaternion, Vector3};
use normal_edit::mesh::{Mesh, VertexMask};
use normal_edit::normals::{read_corner_normals, write_corner_normals};
use normal_edit::operations::{NormalOperation, Restore, SetPerFace, SetUniform, Smooth};
use normal_edit::topology::TopologyIndex;
use normal_edit::view_sync::Frame;
use normal_edit::{EditOptions, NormalEditor, PollingMonitor};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn p(x: f64, y: f64, z: f64) -> Point3 {
    Point3::new(x, y, z)
}

/// A 3x3 grid of vertices bent along its middle column, giving 4 quads
/// with two distinct face normals.
fn bent_grid() -> Mesh {
    let mut positions = Vec::new();
    for j in 0..3_u32 {
        for i in 0..3_u32 {
            let x = f64::from(i);
            let z = if i == 2 { 1.0 } else { 0.0 };
            positions.push(p(x, f64::from(j), z));
        }
    }
    let quad = |i: usize, j: usize| {
        let base = j * 3 + i;
        vec![base, base + 1, base + 4, base + 3]
    };
    Mesh::from_polygons(&positions, &[quad(0, 0), quad(1, 0), quad(0, 1), quad(1, 1)]).unwrap()
}

fn masked_and_selected(bits: u32, vertex_count: usize) -> (Vec<bool>, Vec<bool>) {
    let masked = (0..vertex_count).map(|v| (bits >> v) & 1 == 1).collect();
    let selected = (0..vertex_count)
        .map(|v| (bits >> (v + 3)) & 1 == 1 || bits % 5 == 0)
        .collect();
    (masked, selected)
}

#[test]
fn masked_vertices_are_never_mutated() {
    init_tracing();
    for bits in [0u32, 1, 5, 0b1_0110_1001, 0b11_1111_1111, 0x2a5, 0x1f0, 0x3ff_ffff] {
        let mut mesh = bent_grid();
        let custom: Vec<Vector3> = (0..mesh.corner_count())
            .map(|c| Vector3::new(1.0, f64::from(u32::try_from(c).unwrap()), 2.0).normalize())
            .collect();
        write_corner_normals(&mut mesh, &custom).unwrap();

        let (masked, selected) = masked_and_selected(bits, mesh.vertex_count());
        for (v, sel) in mesh.vertices.iter_mut().zip(&selected) {
            v.select = *sel;
        }
        for (poly, sel) in mesh.polygons.iter_mut().zip(&selected) {
            poly.select = *sel;
        }
        let mask = VertexMask::from_flags(masked.clone());

        let operations: Vec<Box<dyn NormalOperation>> = vec![
            Box::new(Smooth::new().with_mask(mask.clone())),
            Box::new(Restore::new().with_mask(mask.clone())),
            Box::new(SetUniform::new(Vector3::x()).with_mask(mask.clone())),
            Box::new(SetPerFace::new().with_mask(mask.clone())),
        ];
        for op in &operations {
            let out = op.execute(&mesh).unwrap();
            for (c, corner) in mesh.corners.iter().enumerate() {
                if masked[corner.vertex] {
                    assert_eq!(out[c], custom[c], "{} changed masked corner {c}", op.name());
                }
            }
        }
    }
}

#[test]
fn masked_vertices_survive_full_selection() {
    let mut mesh = bent_grid();
    mesh.select_all();
    mesh.select_polygons(&[0, 1, 2, 3]);
    let before = read_corner_normals(&mesh);
    let mask = VertexMask::from_flags(vec![true; 9]);

    assert_eq!(Smooth::new().with_mask(mask.clone()).execute(&mesh).unwrap(), before);
    assert_eq!(SetPerFace::new().with_mask(mask).execute(&mesh).unwrap(), before);
}

#[test]
fn restore_after_smooth_returns_geometric_normals() {
    init_tracing();
    for subset in [vec![0], vec![1, 4, 7], vec![2, 5, 8, 3], (0..9).collect()] {
        let mut mesh = bent_grid();
        mesh.select_all();
        let smoothed = Smooth::new().execute(&mesh).unwrap();
        write_corner_normals(&mut mesh, &smoothed).unwrap();

        for v in &mut mesh.vertices {
            v.select = false;
        }
        mesh.select_vertices(&subset);
        let restored = Restore::new().execute(&mesh).unwrap();
        let index = TopologyIndex::build(&mesh).unwrap();
        for &v in &subset {
            for &c in index.corners(v) {
                assert_eq!(restored[c], mesh.vertices[v].normal);
            }
        }
    }
}

#[test]
fn smoothing_converged_mesh_is_stable() {
    let mut mesh = bent_grid();
    let n = Vector3::new(0.0, -0.6, 0.8);
    let normals = vec![n; mesh.corner_count()];
    write_corner_normals(&mut mesh, &normals).unwrap();
    mesh.select_all();

    let once = Smooth::new().execute(&mesh).unwrap();
    write_corner_normals(&mut mesh, &once).unwrap();
    let twice = Smooth::new().execute(&mesh).unwrap();
    for (a, b) in once.iter().zip(&twice) {
        assert_relative_eq!(*a, n, epsilon = 1e-12);
        assert_relative_eq!(*a, *b, epsilon = 1e-12);
    }
}

#[test]
fn corner_normals_round_trip() {
    let mut mesh = bent_grid();
    let written: Vec<Vector3> = (0..mesh.corner_count())
        .map(|c| Vector3::new(f64::from(u32::try_from(c).unwrap()), -1.0, 0.5))
        .collect();
    write_corner_normals(&mut mesh, &written).unwrap();
    assert_eq!(read_corner_normals(&mesh), written);
}

#[test]
fn view_sync_round_trip_within_tolerance() {
    let frame = Frame::new(
        true,
        UnitQuaternion::from_euler_angles(1.2, -0.3, 0.8),
        UnitQuaternion::from_euler_angles(-0.2, 0.9, 2.4),
    );
    let samples = [
        Vector3::x(),
        Vector3::new(0.3, -0.4, 0.866),
        Vector3::new(-1.0, 1.0, 1.0).normalize(),
    ];
    for v in samples {
        let back = frame.to_object_space(&frame.to_view_space(&v));
        assert_relative_eq!(back, v, epsilon = 1e-5);
    }
}

#[test]
fn every_object_space_edit_writes_once() {
    init_tracing();
    let mut host = MemoryHost::editing(bent_grid());
    host.mesh.select_all();
    host.active_vertex = Some(4);
    host.object_rotation = UnitQuaternion::from_euler_angles(0.1, 0.2, 0.3);
    let mut editor = NormalEditor::default();

    let edits = [Vector3::x(), Vector3::new(0.0, 0.5, 0.5), Vector3::z(), -Vector3::y()];
    for (i, edit) in edits.into_iter().enumerate() {
        let before = host.mesh.normals_revision();
        assert!(editor.type_normal(&mut host, edit).unwrap());
        assert_eq!(host.mesh.normals_revision(), before + 1, "edit {i}");
        assert_eq!(host.mode, InteractionMode::Edit);
    }

    // Re-entering the same value is not a change.
    let before = host.mesh.normals_revision();
    assert!(!editor.type_normal(&mut host, -Vector3::y()).unwrap());
    assert_eq!(host.mesh.normals_revision(), before);
}

#[test]
fn monitor_then_edit_flow() {
    init_tracing();
    let mut host = MemoryHost::editing(bent_grid());
    host.mesh.select_vertices(&[4]);
    host.active_vertex = Some(4);
    let mut editor = NormalEditor::default();
    let monitor = PollingMonitor::for_editor(&editor);

    monitor.tick(&mut editor, &host);
    let shown = editor.view_sync().typed_normal();
    assert_relative_eq!(shown, host.mesh.vertices[4].normal);
    assert_eq!(host.mesh.normals_revision(), 0);

    host.viewport = Some(UnitQuaternion::from_axis_angle(&Vector3::y_axis(), 0.7));
    monitor.tick(&mut editor, &host);
    assert_eq!(editor.view_sync().typed_normal(), shown);
    assert_eq!(host.mesh.normals_revision(), 0);

    let picked = Vector3::new(0.0, 0.0, 1.0);
    assert!(editor.drag_view_normal(&mut host, picked).unwrap());
    assert_eq!(host.mesh.normals_revision(), 1);
    let index = TopologyIndex::build(&host.mesh).unwrap();
    let expected = host.viewport.unwrap() * picked;
    for &c in index.corners(4) {
        assert_relative_eq!(host.mesh.corners[c].normal, expected, epsilon = 1e-12);
    }
}

#[test]
fn tetrahedron_with_converged_normals() {
    let mut mesh = Mesh::from_polygons(
        &[p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(0.0, 1.0, 0.0), p(0.0, 0.0, 1.0)],
        &[vec![0, 2, 1], vec![0, 1, 3], vec![1, 2, 3], vec![0, 3, 2]],
    )
    .unwrap();
    for v in &mut mesh.vertices {
        v.normal = Vector3::z();
    }
    mesh.select_vertices(&[1]);

    let out = Smooth::new().execute(&mesh).unwrap();
    let index = TopologyIndex::build(&mesh).unwrap();
    for &c in index.corners(1) {
        assert_relative_eq!(out[c], Vector3::z(), epsilon = 1e-12);
    }
}

#[test]
fn set_per_face_on_single_quad() {
    let mut mesh = Mesh::from_polygons(
        &[
            p(0.0, 0.0, 0.0),
            p(0.0, 1.0, 0.0),
            p(0.0, 1.0, 1.0),
            p(0.0, 0.0, 1.0),
            p(1.0, 1.0, 0.0),
            p(1.0, 1.0, 1.0),
        ],
        &[vec![0, 1, 2, 3], vec![1, 4, 5, 2]],
    )
    .unwrap();
    let before = read_corner_normals(&mesh);
    mesh.select_polygons(&[0]);

    let out = SetPerFace::new().execute(&mesh).unwrap();
    assert_eq!(&out[..4], &[Vector3::x(); 4]);
    assert_eq!(&out[4..], &before[4..]);
}

#[test]
fn split_fallback_blocks_typed_write() {
    let mut host = MemoryHost::editing(bent_grid());
    host.select_mode = SelectMode::Vertex;
    // Vertex 1 lies on the grid border and belongs to two quads.
    host.active_vertex = Some(1);
    host.mesh.select_all();
    let mut editor = NormalEditor::new(EditOptions::default().with_split_index(2));

    let active = editor.resolve_active(&host).unwrap().unwrap();
    assert_eq!(active.corner, None);
    assert_eq!(active.normal, host.mesh.vertices[1].normal);

    assert!(!editor.type_normal(&mut host, Vector3::new(0.0, 1.0, 1.0)).unwrap());
    assert_eq!(host.mesh.normals_revision(), 0);
    assert!(!host.mesh.has_custom_normals());
}

#[test]
fn shape_mismatch_aborts_without_partial_write() {
    let mut mesh = bent_grid();
    let err = write_corner_normals(&mut mesh, &[Vector3::z(); 3]).unwrap_err();
    assert!(err.to_string().contains("does not match"));
    assert_eq!(mesh.normals_revision(), 0);
}
