//! ASCII STL.
//!
//! ```text
//! solid <name>
//!   facet normal nx ny nz
//!     outer loop
//!       vertex x y z
//!       vertex x y z
//!       vertex x y z
//!     endloop
//!   endfacet
//! endsolid <name>
//! ```
//!
//! Every facet contributes three new vertices; coincident vertices are not
//! merged. Binary STL is not supported.

pub mod read;
pub mod write;

pub use read::{load, load_into, read};
pub use write::{save, save_from, write, Config};
