use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use crate::core::scene::{IndexedFaceSet, SceneGraph};
use crate::core::shared::SEPARATOR;
use crate::io::tokenizer::Tokenizer;
use crate::io::Err;

/// Reads an ASCII STL file into a new scene whose URL is `path`.
pub fn load<P: AsRef<Path>>(path: P) -> Result<SceneGraph, Err> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| Err::resource(path, e))?;
    let mut wrl = read(BufReader::new(file))?;
    wrl.set_url(&path.to_string_lossy());
    Ok(wrl)
}

/// Clears `wrl` and reads `path` into it.
///
/// Returns `false` and logs the reason if the file cannot be read, in which
/// case `wrl` is left empty.
pub fn load_into<P: AsRef<Path>>(path: P, wrl: &mut SceneGraph) -> bool {
    wrl.clear();
    match load(path.as_ref()) {
        Ok(loaded) => {
            *wrl = loaded;
            true
        }
        Err(e) => {
            log::error!("failed to load '{}': {}", path.as_ref().display(), e);
            false
        }
    }
}

/// Reads an ASCII STL stream.
///
/// The result has a single [`Shape`](crate::core::scene::Shape) with a default material and an
/// [`IndexedFaceSet`] holding three fresh vertices and one normal per facet.
pub fn read<R: BufRead>(reader: R) -> Result<SceneGraph, Err> {
    let mut parser = Parser { tkn: Tokenizer::new(reader) };
    let solid_name = parser.header()?;

    let mut ifs = IndexedFaceSet::new();
    ifs.set_name(&solid_name);
    ifs.set_normal_per_vertex(false);

    while let Some(facet) = parser.facet()? {
        let base = ifs.num_vertices();
        ifs.get_normal_mut().extend(facet.normal);
        for (k, v) in facet.vertices.iter().enumerate() {
            let idx = vertex_index(base + k)
                .ok_or_else(|| Err::format(parser.tkn.line_number(), "too many vertices for an i32 index"))?;
            ifs.get_coord_mut().extend(v);
            ifs.get_coord_index_mut().push(idx);
        }
        ifs.get_coord_index_mut().push(SEPARATOR);
    }
    parser.footer(&solid_name)?;

    let num_faces = ifs.get_normal().len() / 3;
    if num_faces == 0 {
        return Err(Err::format(parser.tkn.line_number(), "no faces loaded from stl"));
    }
    log::debug!("read solid '{}' with {} facets", solid_name, num_faces);

    Ok(SceneGraph::from_face_set(ifs))
}

fn vertex_index(vertex: usize) -> Option<i32> {
    i32::try_from(vertex).ok()
}

struct Facet {
    normal: [f32; 3],
    vertices: [[f32; 3]; 3],
}

struct Parser<R> {
    tkn: Tokenizer<R>,
}

impl<R: BufRead> Parser<R> {
    /// `solid <name>`; the name is the rest of the line and may be empty.
    fn header(&mut self) -> Result<String, Err> {
        self.expect("solid")?;
        Ok(self.tkn.rest_of_line().to_owned())
    }

    /// Parses one facet block, or returns `None` after consuming `endsolid`.
    fn facet(&mut self) -> Result<Option<Facet>, Err> {
        let tok = self.next("'facet' or 'endsolid'")?;
        match tok.as_str() {
            "endsolid" => return Ok(None),
            "facet" => {},
            _ => return Err(self.unexpected("'facet' or 'endsolid'", &tok)),
        }

        self.expect("normal")?;
        let normal = self.vec3("normal component")?;

        self.expect("outer")?;
        self.expect("loop")?;
        let mut vertices = [[0.0; 3]; 3];
        for v in &mut vertices {
            self.expect("vertex")?;
            *v = self.vec3("vertex coordinate")?;
        }
        self.expect("endloop")?;
        self.expect("endfacet")?;

        Ok(Some(Facet { normal, vertices }))
    }

    /// Whatever follows `endsolid`. Only the first solid of a file is read.
    fn footer(&mut self, solid_name: &str) -> Result<(), Err> {
        let end_name = self.tkn.rest_of_line().to_owned();
        if !end_name.is_empty() && end_name != solid_name {
            log::warn!(
                "line {}: 'endsolid {}' does not match 'solid {}'",
                self.tkn.line_number(), end_name, solid_name
            );
        }
        let trailing = match self.tkn.next_token() {
            Ok(tok) => tok.is_some(),
            Err(e) => return Err(self.io_err(e)),
        };
        if trailing {
            log::warn!("line {}: ignoring content after 'endsolid'", self.tkn.line_number());
        }
        Ok(())
    }

    fn next(&mut self, expected: &str) -> Result<String, Err> {
        match self.tkn.next_token() {
            Ok(Some(tok)) => Ok(tok.to_owned()),
            Ok(None) => Err(Err::format(
                self.tkn.line_number(),
                format!("expected {}, found end of input", expected),
            )),
            Err(e) => Err(self.io_err(e)),
        }
    }

    fn expect(&mut self, keyword: &str) -> Result<(), Err> {
        let expected = format!("'{}'", keyword);
        let tok = self.next(&expected)?;
        if tok != keyword {
            return Err(self.unexpected(&expected, &tok));
        }
        Ok(())
    }

    fn number(&mut self, what: &str) -> Result<f32, Err> {
        let tok = self.next(what)?;
        tok.parse::<f32>().map_err(|_| self.unexpected(what, &tok))
    }

    fn vec3(&mut self, what: &str) -> Result<[f32; 3], Err> {
        Ok([self.number(what)?, self.number(what)?, self.number(what)?])
    }

    fn unexpected(&self, expected: &str, found: &str) -> Err {
        Err::format(self.tkn.line_number(), format!("expected {}, found '{}'", expected, found))
    }

    fn io_err(&self, e: io::Error) -> Err {
        if e.kind() == io::ErrorKind::InvalidData {
            Err::format(self.tkn.line_number() + 1, "input is not valid UTF-8 text")
        } else {
            Err::Io(e)
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::corner_table::FaceTopology;
    use crate::core::scene::{Appearance, Node, Shape};

    const TWO_FACETS: &str = "\
solid part
  facet normal 0 0 1
    outer loop
      vertex 0 0 0
      vertex 1 0 0
      vertex 0 1 0
    endloop
  endfacet
  facet normal 0 0 -1
    outer loop
      vertex 0 0 0
      vertex 0 1 0
      vertex 1.5e0 -2.25 0
    endloop
  endfacet
endsolid part
";

    fn face_set(wrl: &SceneGraph) -> &IndexedFaceSet {
        wrl.get_child(0)
            .and_then(Node::as_shape)
            .and_then(Shape::get_geometry)
            .and_then(|g| g.as_indexed_face_set())
            .unwrap()
    }

    fn format_error_line(input: &str) -> usize {
        match read(input.as_bytes()) {
            Err(Err::FormatError { line: Some(line), .. }) => line,
            other => panic!("expected a format error, got {:?}", other),
        }
    }

    #[test]
    fn two_facets() {
        let wrl = read(TWO_FACETS.as_bytes()).unwrap();
        assert_eq!(wrl.num_children(), 1);
        let shape = wrl.get_child(0).and_then(Node::as_shape).unwrap();
        assert!(shape.get_appearance().and_then(Appearance::get_material).is_some());

        let ifs = face_set(&wrl);
        assert_eq!(ifs.get_name(), "part");
        assert!(!ifs.get_normal_per_vertex());
        assert_eq!(ifs.num_vertices(), 6);
        assert_eq!(ifs.get_coord_index(), &[0, 1, 2, -1, 3, 4, 5, -1]);
        assert_eq!(ifs.get_normal(), &[0.0, 0.0, 1.0, 0.0, 0.0, -1.0]);
        assert_eq!(ifs.vertex(5), Some([1.5, -2.25, 0.0]));

        let table = ifs.corner_table().unwrap();
        assert_eq!(table.num_faces(), 2);
        assert!(table.is_triangular());
    }

    #[test]
    fn unnamed_solid() {
        let input = TWO_FACETS.replace("solid part", "solid").replace("endsolid part", "endsolid");
        let wrl = read(input.as_bytes()).unwrap();
        assert_eq!(face_set(&wrl).get_name(), "");
    }

    #[test]
    fn mismatched_end_name_is_accepted() {
        let input = TWO_FACETS.replace("endsolid part", "endsolid other");
        assert!(read(input.as_bytes()).is_ok());
    }

    #[test]
    fn wrong_keyword() {
        let input = TWO_FACETS.replacen("outer loop", "outer lop", 1);
        assert_eq!(format_error_line(&input), 3);
        let input = TWO_FACETS.replacen("facet normal", "facet norm", 1);
        assert_eq!(format_error_line(&input), 2);
        assert_eq!(format_error_line("mesh\n"), 1);
    }

    #[test]
    fn truncated_number() {
        let input = TWO_FACETS.replacen("vertex 1 0 0", "vertex 1 0 z", 1);
        assert_eq!(format_error_line(&input), 5);
    }

    #[test]
    fn wrong_vertex_count() {
        let input = TWO_FACETS.replacen("      vertex 0 1 0\n", "", 1);
        assert_eq!(format_error_line(&input), 6);
    }

    #[test]
    fn premature_end_of_input() {
        let cut = TWO_FACETS.find("endloop").unwrap();
        assert!(matches!(read(TWO_FACETS[..cut].as_bytes()), Err(Err::FormatError { .. })));
        let cut = TWO_FACETS.find("endsolid").unwrap();
        assert!(matches!(read(TWO_FACETS[..cut].as_bytes()), Err(Err::FormatError { .. })));
        assert!(matches!(read("".as_bytes()), Err(Err::FormatError { .. })));
    }

    #[test]
    fn no_faces() {
        assert_eq!(format_error_line("solid empty\nendsolid empty\n"), 2);
    }

    #[test]
    fn vertex_index_bounds() {
        assert_eq!(vertex_index(0), Some(0));
        assert_eq!(vertex_index(i32::MAX as usize), Some(i32::MAX));
        assert_eq!(vertex_index(i32::MAX as usize + 1), None);
    }

    #[test]
    fn load_into_clears_on_failure() {
        let mut wrl = SceneGraph::new();
        wrl.set_url("previous.stl");
        wrl.add_child(Shape::new());
        assert!(!load_into("tests/data/does_not_exist.stl", &mut wrl));
        assert!(wrl.is_empty());
        assert_eq!(wrl.get_url(), "");
    }

    #[test]
    fn missing_file_is_a_resource_error() {
        assert!(matches!(load("tests/data/does_not_exist.stl"), Err(Err::ResourceError { .. })));
    }
}
