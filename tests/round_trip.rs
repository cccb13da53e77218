use corner_mesh::prelude::*;
use std::path::PathBuf;

fn face_set(wrl: &SceneGraph) -> &IndexedFaceSet {
    wrl.get_child(0)
        .and_then(Node::as_shape)
        .and_then(Shape::get_geometry)
        .and_then(Geometry::as_indexed_face_set)
        .expect("scene should hold one face set")
}

fn face_vertices(table: &CornerTable) -> Vec<Vec<usize>> {
    (0..table.num_faces())
        .map(|f| table.face_vertices(FaceIdx::from(f)).map(usize::from).collect())
        .collect()
}

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("corner-mesh-{}-{}", std::process::id(), name))
}

#[test]
fn single_triangle_round_trip() {
    let mut ifs = IndexedFaceSet::new();
    ifs.get_coord_mut().extend([0.0, 0.0, 0.0, 2.5, 0.0, 0.0, 0.0, 1.0e-7, -3.0]);
    ifs.get_coord_index_mut().extend([2, 0, 1, -1]);
    ifs.get_normal_mut().extend([0.0, 1.0, 0.0]);
    ifs.set_normal_per_vertex(false);
    let wrl = SceneGraph::from_face_set(ifs.clone());

    let mut buffer = Vec::new();
    stl::write(&wrl, &mut buffer, &stl::Config::default()).unwrap();
    let reread = stl::read(buffer.as_slice()).unwrap();

    let original = ifs.corner_table().unwrap();
    let reread_ifs = face_set(&reread);
    let table = reread_ifs.corner_table().unwrap();
    assert_eq!(table.num_vertices(), original.num_vertices());
    assert_eq!(table.num_faces(), original.num_faces());

    // the reader numbers vertices in the order the writer emitted them
    assert_eq!(face_vertices(&table), vec![vec![0, 1, 2]]);
    let emitted = original.face_vertices(FaceIdx::from(0))
        .flat_map(|v| ifs.vertex(usize::from(v)).unwrap())
        .collect::<Vec<_>>();
    assert_eq!(reread_ifs.get_coord(), emitted.as_slice());
    assert_eq!(reread_ifs.get_normal(), ifs.get_normal());
}

#[test]
fn file_round_trip() {
    let wrl = stl::load("tests/data/tetrahedron.stl").unwrap();
    let ifs = face_set(&wrl);
    assert_eq!(ifs.get_name(), "tetrahedron");
    assert_eq!(ifs.num_vertices(), 12);

    let path = temp_path("tetrahedron.stl");
    stl::save(&path, &wrl, &stl::Config::default()).unwrap();
    let reread = stl::load(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    let reread_ifs = face_set(&reread);
    assert_eq!(reread_ifs.get_name(), format!("corner-mesh-{}-tetrahedron", std::process::id()));
    assert_eq!(reread_ifs.get_coord(), ifs.get_coord());
    assert_eq!(reread_ifs.get_coord_index(), ifs.get_coord_index());
    assert_eq!(reread_ifs.get_normal(), ifs.get_normal());
}

#[test]
fn dispatch_by_extension() {
    let wrl = io::load("tests/data/tetrahedron.stl").unwrap();
    let path = temp_path("dispatch.stl");
    io::save(&path, &wrl).unwrap();
    let mut reread = SceneGraph::new();
    assert!(stl::load_into(&path, &mut reread));
    std::fs::remove_file(&path).unwrap();
    assert_eq!(face_set(&reread).corner_table().unwrap().num_faces(), 4);
}

#[test]
fn polygonal_obj_is_not_written_as_stl() {
    let wrl = io::load("tests/data/house.obj").unwrap();
    let path = temp_path("house.stl");
    assert!(matches!(io::save(&path, &wrl), Err(io::Err::ContractViolation(_))));
    assert!(!path.exists());
}

#[test]
fn table_walks_match_the_index_array() {
    let wrl = stl::load("tests/data/tetrahedron.stl").unwrap();
    let ifs = face_set(&wrl);
    let table = ifs.corner_table().unwrap();
    assert_eq!(table.coord_index().unwrap(), ifs.get_coord_index());
    for f in (0..table.num_faces()).map(FaceIdx::from) {
        let first = table.face_first_corner(f).unwrap();
        let corners = table.face_corners(f).collect::<Vec<_>>();
        assert_eq!(corners.len(), 3);
        assert_eq!(corners[0], first);
        assert_eq!(table.next(corners[2]), Some(first));
        assert!(corners.iter().all(|&c| table.corner_face(c) == Some(f)));
    }
}
