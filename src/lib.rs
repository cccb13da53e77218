// lib.rs

/// Contains the corner table, the scene graph, and the index types they share.
pub mod core;

/// Contains the interface between scene graphs and mesh files such as stl and obj.
pub mod io;


/// Contains the most commonly used traits, types, and objects.
pub mod prelude {
    pub use crate::core::corner_table::{CornerTable, FaceTopology};
    pub use crate::core::scene::{Appearance, Geometry, IndexedFaceSet, Node, SceneGraph, Shape};
    pub use crate::core::material::Material;
    pub use crate::core::shared::{ConfigType, CornerIdx, FaceIdx, IndexSlot, VertexIdx};
    pub use crate::io::{self, stl};
}
