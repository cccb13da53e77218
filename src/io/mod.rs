//! Conversion between mesh files and [`SceneGraph`]s.
//!
//! | Format | Extension | Load | Save |
//! |--------|-----------|------|------|
//! | ASCII STL | `.stl` | ✓ | ✓ |
//! | Wavefront OBJ | `.obj` | ✓ | ✗ |

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::core::scene::SceneGraph;
use crate::core::shared::ConfigType;

pub mod obj;
pub mod stl;
pub mod tokenizer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Obj,
    Stl,
}

impl Format {
    /// Detects the format from the file extension, ignoring case.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Self> {
        let ext = path.as_ref()
            .extension()
            .and_then(|s| s.to_str())?
            .to_ascii_lowercase();
        match ext.as_str() {
            "obj" => Some(Format::Obj),
            "stl" => Some(Format::Stl),
            _ => None,
        }
    }
}

/// Loads a scene, choosing the reader from the file extension.
pub fn load<P: AsRef<Path>>(path: P) -> Result<SceneGraph, Err> {
    let path = path.as_ref();
    match Format::from_path(path) {
        Some(Format::Stl) => stl::load(path),
        Some(Format::Obj) => obj::load(path),
        None => Err(Err::Unsupported(format!("cannot load '{}': unknown file extension", path.display()))),
    }
}

/// Saves a scene with the default writer configuration, choosing the writer
/// from the file extension.
pub fn save<P: AsRef<Path>>(path: P, wrl: &SceneGraph) -> Result<(), Err> {
    let path = path.as_ref();
    match Format::from_path(path) {
        Some(Format::Stl) => stl::save(path, wrl, &stl::Config::default()),
        Some(Format::Obj) => Err(Err::Unsupported("writing OBJ files is not supported".to_owned())),
        None => Err(Err::Unsupported(format!("cannot save '{}': unknown file extension", path.display()))),
    }
}


#[remain::sorted]
#[derive(Error, Debug)]
pub enum Err {
    /// The scene does not have the shape a writer requires.
    #[error("Contract violation: {0}")]
    ContractViolation(String),

    /// The input is not a well-formed file of the expected format.
    #[error("Format error{}: {message}", at_line(.line))]
    FormatError { line: Option<usize>, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A file could not be opened, created, or written.
    #[error("Cannot access '{}': {source}", .path.display())]
    ResourceError { path: PathBuf, source: std::io::Error },

    #[error("Unsupported: {0}")]
    Unsupported(String),
}

impl Err {
    pub(crate) fn format(line: usize, message: impl Into<String>) -> Self {
        Err::FormatError { line: Some(line), message: message.into() }
    }

    pub(crate) fn format_unlocated(message: impl Into<String>) -> Self {
        Err::FormatError { line: None, message: message.into() }
    }

    pub(crate) fn contract(message: impl Into<String>) -> Self {
        Err::ContractViolation(message.into())
    }

    pub(crate) fn resource(path: &Path, source: std::io::Error) -> Self {
        Err::ResourceError { path: path.to_path_buf(), source }
    }
}

fn at_line(line: &Option<usize>) -> String {
    line.map(|l| format!(" on line {}", l)).unwrap_or_default()
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_from_extension() {
        assert_eq!(Format::from_path("a/b/bunny.stl"), Some(Format::Stl));
        assert_eq!(Format::from_path("BUNNY.STL"), Some(Format::Stl));
        assert_eq!(Format::from_path("cube.obj"), Some(Format::Obj));
        assert_eq!(Format::from_path("cube.ply"), None);
        assert_eq!(Format::from_path("cube"), None);
    }

    #[test]
    fn unsupported_targets() {
        let wrl = SceneGraph::new();
        assert!(matches!(save("out.obj", &wrl), Err(Err::Unsupported(_))));
        assert!(matches!(load("in.ply"), Err(Err::Unsupported(_))));
    }

    #[test]
    fn format_error_display() {
        assert_eq!(Err::format(3, "expected 'loop'").to_string(), "Format error on line 3: expected 'loop'");
        assert_eq!(Err::format_unlocated("no models").to_string(), "Format error: no models");
    }
}
