use std::io::{self, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::corner_table::FaceTopology;
use crate::core::scene::{IndexedFaceSet, SceneGraph};
use crate::core::shared::{ConfigType, FaceIdx, VertexIdx};
use crate::io::Err;

/// The solid name used when neither the config nor the output path provide one.
pub const DEFAULT_SOLID_NAME: &str = "mesh";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Name written after `solid` and `endsolid`. When unset, [`save`] uses
    /// the output file name without its extension.
    pub solid_name: Option<String>,
}

impl ConfigType for Config {
    fn default() -> Self {
        Self { solid_name: None }
    }
}

/// Writes the scene as ASCII STL into `writer`.
///
/// The scene is validated completely before the first byte is written.
pub fn write<W: Write>(wrl: &SceneGraph, mut writer: W, config: &Config) -> Result<(), Err> {
    let mesh = TriangleMesh::from_scene(wrl)?;
    let name = match &config.solid_name {
        Some(name) => name.clone(),
        None if !mesh.ifs.get_name().is_empty() => mesh.ifs.get_name().to_owned(),
        None => DEFAULT_SOLID_NAME.to_owned(),
    };
    mesh.write_ascii(&mut writer, &name)?;
    Ok(())
}

/// Writes the scene to `path` as ASCII STL.
///
/// Nothing is created on disk unless the scene passes validation; the file is
/// rendered in memory and written in one go.
pub fn save<P: AsRef<Path>>(path: P, wrl: &SceneGraph, config: &Config) -> Result<(), Err> {
    let path = path.as_ref();
    let mesh = TriangleMesh::from_scene(wrl)?;
    let name = config.solid_name.clone().unwrap_or_else(|| solid_name_from_path(path));

    let mut buffer = Vec::new();
    mesh.write_ascii(&mut buffer, &name)?;
    std::fs::write(path, buffer).map_err(|e| Err::resource(path, e))?;

    log::debug!("wrote {} facets to '{}'", mesh.facets.len(), path.display());
    Ok(())
}

/// [`save`] with the default config. Returns `false` and logs the reason on
/// failure.
pub fn save_from<P: AsRef<Path>>(path: P, wrl: &SceneGraph) -> bool {
    let path = path.as_ref();
    match save(path, wrl, &Config::default()) {
        Ok(()) => true,
        Err(e) => {
            log::error!("failed to save '{}': {}", path.display(), e);
            false
        }
    }
}

/// Final path segment with its last extension removed, or
/// [`DEFAULT_SOLID_NAME`] if that leaves nothing.
pub fn solid_name_from_path(path: &Path) -> String {
    let file_name = path.file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stem = match file_name.rfind('.') {
        Some(dot) => &file_name[..dot],
        None => &file_name[..],
    };
    if stem.is_empty() {
        DEFAULT_SOLID_NAME.to_owned()
    } else {
        stem.to_owned()
    }
}


/// A face set that meets every requirement of the STL format, resolved to
/// one normal and three positions per facet.
struct TriangleMesh<'a> {
    ifs: &'a IndexedFaceSet,
    facets: Vec<Facet>,
}

struct Facet {
    normal: [f32; 3],
    vertices: [[f32; 3]; 3],
}

impl<'a> TriangleMesh<'a> {
    fn from_scene(wrl: &'a SceneGraph) -> Result<Self, Err> {
        if wrl.num_children() != 1 {
            return Err(Err::contract(format!(
                "expected exactly one top-level node, found {}", wrl.num_children()
            )));
        }
        let node = &wrl.get_children()[0];
        let shape = node.as_shape()
            .ok_or_else(|| Err::contract(format!("top-level node is a {}, not a Shape", node.type_name())))?;
        let geometry = shape.get_geometry()
            .ok_or_else(|| Err::contract("shape has no geometry"))?;
        let ifs = geometry.as_indexed_face_set()
            .ok_or_else(|| Err::contract(format!("geometry is a {}, not an IndexedFaceSet", geometry.type_name())))?;

        if ifs.get_coord().len() % 3 != 0 {
            return Err(Err::contract(format!(
                "coordinate array has {} values, which is not a multiple of 3", ifs.get_coord().len()
            )));
        }

        let table = ifs.corner_table().map_err(|e| Err::contract(e.to_string()))?;
        if table.num_vertices() > ifs.num_vertices() {
            return Err(Err::contract(format!(
                "faces reference vertex {} but only {} vertices are defined",
                table.num_vertices() - 1, ifs.num_vertices()
            )));
        }

        let mut faces: Vec<[VertexIdx; 3]> = Vec::with_capacity(table.num_faces());
        for f in (0..table.num_faces()).map(FaceIdx::from) {
            match [0, 1, 2].map(|j| table.face_vertex(f, j)) {
                [Some(v0), Some(v1), Some(v2)] if table.face_size(f) == 3 => faces.push([v0, v1, v2]),
                _ => return Err(Err::contract(format!(
                    "face {} has {} corners; only triangles can be written", f, table.face_size(f)
                ))),
            }
        }

        if ifs.get_normal_per_vertex() {
            return Err(Err::contract("normals must be given per face, not per vertex"));
        }
        let normal = ifs.get_normal();
        if normal.len() % 3 != 0 || normal.len() / 3 != faces.len() {
            return Err(Err::contract(format!(
                "expected {} face normals ({} values), found {} values",
                faces.len(), 3 * faces.len(), normal.len()
            )));
        }

        let mut facets = Vec::with_capacity(faces.len());
        for (f, face) in faces.iter().enumerate() {
            let normal = ifs.normal(f)
                .ok_or_else(|| Err::contract(format!("face {} has no normal", f)))?;
            let mut vertices = [[0.0; 3]; 3];
            for (dst, &v) in vertices.iter_mut().zip(face) {
                *dst = ifs.vertex(usize::from(v))
                    .ok_or_else(|| Err::contract(format!("vertex {} is not defined", v)))?;
            }
            facets.push(Facet { normal, vertices });
        }

        Ok(Self { ifs, facets })
    }

    fn write_ascii(&self, w: &mut impl Write, name: &str) -> Result<(), io::Error> {
        writeln!(w, "solid {}", name)?;
        for facet in &self.facets {
            write!(w, "  facet normal ")?;
            write_ascii_vector(w, facet.normal)?;
            writeln!(w)?;
            writeln!(w, "    outer loop")?;
            for &v in &facet.vertices {
                write!(w, "      vertex ")?;
                write_ascii_vector(w, v)?;
                writeln!(w)?;
            }
            writeln!(w, "    endloop")?;
            writeln!(w, "  endfacet")?;
        }
        writeln!(w, "endsolid {}", name)?;
        Ok(())
    }
}

/// Writes the three values separated by ' '. `f32`'s `Display` gives the
/// shortest string that parses back to the same value.
fn write_ascii_vector(w: &mut impl Write, [x, y, z]: [f32; 3]) -> Result<(), io::Error> {
    write!(w, "{} {} {}", x, y, z)
}
