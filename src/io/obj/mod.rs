// use tobj to load the obj file and convert it to a scene with one polygonal face set
use std::fs::File;
use std::path::Path;

use crate::core::scene::{IndexedFaceSet, SceneGraph};
use crate::core::shared::SEPARATOR;
use crate::io::Err;

/// Loads the first model of a Wavefront OBJ file.
///
/// Faces keep their arity, so quads and larger polygons come through as
/// longer runs in `coord_index`. Normals, if any, are per vertex.
pub fn load<P: AsRef<Path>>(path: P) -> Result<SceneGraph, Err> {
    let path = path.as_ref();
    // tobj reports open failures without the underlying io::Error
    File::open(path).map_err(|e| Err::resource(path, e))?;

    let op = tobj::LoadOptions {
        triangulate: false,
        single_index: true,
        ..Default::default()
    };
    let (models, _materials) = tobj::load_obj(path, &op)
        .map_err(|e| Err::format_unlocated(format!("failed to parse obj: {}", e)))?;

    let model = models.first()
        .ok_or_else(|| Err::format_unlocated("obj file contains no models"))?;
    if models.len() > 1 {
        log::warn!("'{}' has {} models; only '{}' is loaded", path.display(), models.len(), model.name);
    }

    let mut ifs = IndexedFaceSet::new();
    ifs.set_name(&model.name);
    ifs.get_coord_mut().extend(model.mesh.positions.iter().map(|&x| x as f32));
    *ifs.get_coord_index_mut() = coord_index(&model.mesh)?;
    if !model.mesh.normals.is_empty() {
        ifs.get_normal_mut().extend(model.mesh.normals.iter().map(|&x| x as f32));
        ifs.set_normal_per_vertex(true);
    }
    log::debug!(
        "loaded '{}' from '{}': {} vertices, {} index slots",
        model.name, path.display(), ifs.num_vertices(), ifs.get_coord_index().len()
    );

    let mut wrl = SceneGraph::from_face_set(ifs);
    wrl.set_url(&path.to_string_lossy());
    Ok(wrl)
}

/// Flattens tobj's indices and face arities into separator-terminated runs.
/// tobj leaves `face_arities` empty when every face is a triangle.
fn coord_index(mesh: &tobj::Mesh) -> Result<Vec<i32>, Err> {
    let arities = if mesh.face_arities.is_empty() {
        vec![3; mesh.indices.len() / 3]
    } else {
        mesh.face_arities.iter().map(|&a| a as usize).collect()
    };

    let mut out = Vec::with_capacity(mesh.indices.len() + arities.len());
    let mut indices = mesh.indices.iter();
    for arity in arities {
        for &idx in indices.by_ref().take(arity) {
            let idx = i32::try_from(idx)
                .map_err(|_| Err::format_unlocated(format!("vertex index {} is too large", idx)))?;
            out.push(idx);
        }
        out.push(SEPARATOR);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::corner_table::FaceTopology;
    use crate::core::scene::Node;
    use crate::core::shared::FaceIdx;

    fn face_set(wrl: &SceneGraph) -> &IndexedFaceSet {
        wrl.get_child(0)
            .and_then(Node::as_shape)
            .and_then(|s| s.get_geometry())
            .and_then(|g| g.as_indexed_face_set())
            .unwrap()
    }

    #[test]
    fn quads_keep_their_arity() {
        let wrl = load("tests/data/house.obj").unwrap();
        assert_eq!(wrl.get_url(), "tests/data/house.obj");
        let ifs = face_set(&wrl);
        assert_eq!(ifs.num_vertices(), 5);
        assert!(ifs.get_normal().is_empty());

        let table = ifs.corner_table().unwrap();
        assert_eq!(table.num_faces(), 2);
        assert_eq!(table.face_size(FaceIdx::from(0)), 4);
        assert_eq!(table.face_size(FaceIdx::from(1)), 3);
        assert!(!table.is_triangular());
    }

    #[test]
    fn missing_file() {
        assert!(matches!(load("tests/data/does_not_exist.obj"), Err(Err::ResourceError { .. })));
    }
}
