/// Face and corner tables over separator-delimited index arrays.
pub mod corner_table;

/// Scene graph nodes that carry meshes between the readers and writers.
pub mod scene;

pub mod material;

/// Index types shared by the table and the I/O layer.
pub mod shared;
