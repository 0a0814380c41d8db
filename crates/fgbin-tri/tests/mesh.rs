use fgbin_common::BinaryWriter;
use fgbin_tri::{TriMesh, TRI_MAGIC_PREFIX};

/// Counts for a fixture mesh.
#[derive(Default)]
struct Counts {
    v: u32,
    t: u32,
    q: u32,
    x: u32,
    ext: u32,
    md: u32,
    k: u32,
}

fn header(w: &mut BinaryWriter<Vec<u8>>, c: &Counts, lv: u32, ls: u32) {
    w.write_bytes(b"FRTRI003").unwrap();
    for value in [c.v, c.t, c.q, lv, ls, c.x, c.ext, c.md, 0, c.k] {
        w.write_u32(value).unwrap();
    }
    w.write_bytes(&[0; 16]).unwrap();
}

/// A unit quad split into two triangles, plus one quad face, one label of
/// each kind and the given number of morphs.
fn body(w: &mut BinaryWriter<Vec<u8>>, c: &Counts) {
    let positions: [[f32; 3]; 4] = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0], [0.0, 1.0, 0.0]];
    for p in positions.iter().take((c.v + c.k) as usize) {
        w.write_f32_slice(p).unwrap();
    }
    for tri in [[0, 1, 2], [0, 2, 3]] {
        for i in tri {
            w.write_i32(i).unwrap();
        }
    }
    for i in [0, 1, 2, 3] {
        w.write_i32(i).unwrap();
    }

    w.write_i32(2).unwrap();
    w.write_i32(3).unwrap();
    w.write_bytes(b"tip").unwrap();

    w.write_i32(1).unwrap();
    w.write_f32_slice(&[0.25, 0.5, 0.25]).unwrap();
    w.write_i32(4).unwrap();
    w.write_bytes(b"nose").unwrap();
}

fn morphs(w: &mut BinaryWriter<Vec<u8>>, c: &Counts) {
    for m in 0..c.md {
        let label = format!("Morph{m}");
        w.write_i32(label.len() as i32).unwrap();
        w.write_bytes(label.as_bytes()).unwrap();
        for i in 0..c.v {
            w.write_f32(0.5).unwrap();
            w.write_i16(i as i16).unwrap();
            w.write_i16(-(m as i16)).unwrap();
            w.write_i16(2).unwrap();
        }
    }
}

fn counts() -> Counts {
    Counts {
        v: 3,
        t: 2,
        q: 1,
        md: 2,
        k: 1,
        ..Counts::default()
    }
}

#[test]
fn mesh_without_texture() {
    let c = counts();
    let mut w = BinaryWriter::in_memory();
    header(&mut w, &c, 1, 1);
    body(&mut w, &c);
    morphs(&mut w, &c);
    w.write_bytes(&[9, 9, 9]).unwrap();

    let mesh = TriMesh::parse(&w.into_inner()).unwrap();

    assert!(mesh.magic.starts_with(TRI_MAGIC_PREFIX));
    assert_eq!(mesh.vertices.len(), 4);
    assert_eq!(mesh.vertex_count(), 3);
    assert_eq!(mesh.triangles, vec![[0, 1, 2], [0, 2, 3]]);
    assert_eq!(mesh.quads, vec![[0, 1, 2, 3]]);
    assert_eq!(mesh.vertex_labels[0].vertex, 2);
    assert_eq!(mesh.vertex_labels[0].label, b"tip");
    assert_eq!(mesh.surface_labels[0].point, [0.25, 0.5, 0.25]);
    assert_eq!(mesh.surface_labels[0].label, b"nose");
    assert!(mesh.texture_coords.is_empty());

    assert_eq!(mesh.morphs.len(), 2);
    let morph = mesh.morph(b"Morph1").unwrap();
    assert_eq!(morph.label_str(), "Morph1");
    assert_eq!(morph.deltas.len(), 3);
    assert_eq!(morph.deltas[2].displacement(), [1.0, -0.5, 1.0]);
    assert_eq!(mesh.trailing, vec![9, 9, 9]);
}

#[test]
fn texture_coordinates_per_vertex() {
    let c = Counts {
        ext: 1,
        ..counts()
    };
    let mut w = BinaryWriter::in_memory();
    header(&mut w, &c, 1, 1);
    body(&mut w, &c);
    for i in 0..c.v {
        w.write_f32_slice(&[i as f32, 1.0]).unwrap();
    }
    morphs(&mut w, &c);

    let mesh = TriMesh::parse(&w.into_inner()).unwrap();

    assert_eq!(mesh.texture_coords, vec![[0.0, 1.0], [1.0, 1.0], [2.0, 1.0]]);
    assert!(mesh.triangle_texture_indices.is_empty());
    assert!(mesh.quad_texture_indices.is_empty());
    assert_eq!(mesh.morphs.len(), 2);
    assert!(mesh.trailing.is_empty());
}

#[test]
fn texture_coordinates_with_face_indices() {
    let c = Counts {
        ext: 1,
        x: 5,
        ..counts()
    };
    let mut w = BinaryWriter::in_memory();
    header(&mut w, &c, 1, 1);
    body(&mut w, &c);
    for i in 0..c.x {
        w.write_f32_slice(&[0.1 * i as f32, 0.0]).unwrap();
    }
    for tri in [[0, 1, 2], [2, 3, 4]] {
        for i in tri {
            w.write_i32(i).unwrap();
        }
    }
    for i in [4, 3, 2, 1] {
        w.write_i32(i).unwrap();
    }
    morphs(&mut w, &c);

    let mesh = TriMesh::parse(&w.into_inner()).unwrap();

    assert_eq!(mesh.texture_coords.len(), 5);
    assert_eq!(mesh.triangle_texture_indices, vec![[0, 1, 2], [2, 3, 4]]);
    assert_eq!(mesh.quad_texture_indices, vec![[4, 3, 2, 1]]);
    assert_eq!(mesh.morphs[0].label, b"Morph0");
    assert!(mesh.trailing.is_empty());
}

#[test]
fn truncated_morphs() {
    let c = counts();
    let mut w = BinaryWriter::in_memory();
    header(&mut w, &c, 1, 1);
    body(&mut w, &c);
    morphs(&mut w, &c);
    let mut bytes = w.into_inner();
    bytes.truncate(bytes.len() - 4);

    let err = TriMesh::parse(&bytes).unwrap_err();
    assert!(err.is_truncated());
}

#[test]
fn negative_label_length() {
    let c = Counts {
        v: 1,
        ..Counts::default()
    };
    let mut w = BinaryWriter::in_memory();
    header(&mut w, &c, 1, 0);
    w.write_f32_slice(&[0.0; 3]).unwrap();
    w.write_i32(0).unwrap();
    w.write_i32(-5).unwrap();

    let err = TriMesh::parse(&w.into_inner()).unwrap_err();
    assert!(matches!(
        err,
        fgbin_tri::Error::Common(fgbin_common::Error::InvalidLength(-5))
    ));
}

#[test]
fn open_reports_io_errors() {
    let dir = tempfile::tempdir().unwrap();
    let err = TriMesh::open(dir.path().join("missing.tri")).unwrap_err();
    assert!(matches!(err, fgbin_tri::Error::Io(_)));
}
