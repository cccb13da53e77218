use core::fmt;
use std::num::TryFromIntError;
use std::ops;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CornerIdx(usize);
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FaceIdx(usize);
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VertexIdx(usize);

macro_rules! idx_op_impl {
    ($($trait_:ident, $method:ident, $op:tt, $t:ty);*) => {
        $(
            impl ops::$trait_<$t> for $t {
                type Output = Self;

                fn $method(self, other: Self) -> Self::Output {
                    Self( self.0 $op other.0 )
                }
            }
        )*
    };
}

macro_rules! all_idx_ops_impl {
    ($($t:ty),*) => {
        $(
            idx_op_impl! {
                Add, add, +, $t;
                Sub, sub, -, $t
            }

            impl ops::Add<usize> for $t {
                type Output = Self;

                fn add(self, offset: usize) -> Self::Output {
                    Self( self.0 + offset )
                }
            }
        )*
    };
}

all_idx_ops_impl!{
    CornerIdx,
    FaceIdx,
    VertexIdx
}

macro_rules! idx_debug_impl {
    ($($t:ty),*) => {
        $(
            impl fmt::Debug for $t {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    self.0.fmt(f)
                }
            }

            impl fmt::Display for $t {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    self.0.fmt(f)
                }
            }
        )*
    };
}

idx_debug_impl!{
    CornerIdx,
    FaceIdx,
    VertexIdx
}

macro_rules! vec_with_new_idx {
    ($($Idx:ident),*) => {
        $(
            paste::paste! {
                /// Vector wrapper indexed by `$Idx` and named `Vec$Idx` (e.g. `VecCornerIdx`).
                #[derive(Debug, Clone, Default, PartialEq, Eq)]
                pub struct [<Vec $Idx:camel>]<T> {
                    inner: ::std::vec::Vec<T>,
                }

                impl<T: Clone> [<Vec $Idx:camel>]<T> {
                    #[allow(unused)]
                    pub fn new() -> Self {
                        Self { inner: ::std::vec::Vec::new() }
                    }

                    /// Creates a vector of `len` copies of `value`.
                    pub fn filled(len: usize, value: T) -> Self {
                        Self { inner: ::std::vec![value; len] }
                    }

                    #[allow(unused)]
                    pub fn len(&self) -> usize { self.inner.len() }
                    #[allow(unused)]
                    pub fn is_empty(&self) -> bool { self.inner.is_empty() }

                    /// Bounds-checked access; `None` if `idx` is past the end.
                    pub fn get(&self, idx: $Idx) -> Option<&T> {
                        self.inner.get(usize::from(idx))
                    }

                    #[allow(unused)]
                    pub fn iter(&self) -> impl Iterator<Item = &T> {
                        self.inner.iter()
                    }

                    #[allow(unused)]
                    pub fn as_slice(&self) -> &[T] {
                        &self.inner
                    }
                }

                impl<T> ::std::ops::Index<$Idx> for [<Vec $Idx:camel>]<T> {
                    type Output = T;
                    fn index(&self, idx: $Idx) -> &Self::Output {
                        &self.inner[usize::from(idx)]
                    }
                }

                impl<T> ::std::ops::IndexMut<$Idx> for [<Vec $Idx:camel>]<T> {
                    fn index_mut(&mut self, idx: $Idx) -> &mut Self::Output {
                        &mut self.inner[usize::from(idx)]
                    }
                }

                impl<T> ::std::convert::From<::std::vec::Vec<T>> for [<Vec $Idx:camel>]<T> {
                    fn from(inner: ::std::vec::Vec<T>) -> Self {
                        Self { inner }
                    }
                }
            }
        )*
    };
}

vec_with_new_idx!(
    CornerIdx,
    FaceIdx
);

macro_rules! idx_impl {
    ($($t:ty),*) => {
        $(
            impl From<usize> for $t {
                fn from(idx: usize) -> Self {
                    Self(idx)
                }
            }

            impl From<$t> for usize {
                fn from(idx: $t) -> Self {
                    idx.0
                }
            }
        )*
    };
}

idx_impl! {
    CornerIdx,
    FaceIdx,
    VertexIdx
}


/// The raw value that terminates a face run in an index array.
pub const SEPARATOR: i32 = -1;

/// One slot of a separator-delimited index array.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IndexSlot {
    /// A reference to a vertex of the mesh.
    Vertex(VertexIdx),
    /// The end of the current face.
    Separator,
}

impl IndexSlot {
    #[inline]
    pub fn is_separator(self) -> bool {
        matches!(self, IndexSlot::Separator)
    }

    #[inline]
    pub fn vertex(self) -> Option<VertexIdx> {
        match self {
            IndexSlot::Vertex(v) => Some(v),
            IndexSlot::Separator => None,
        }
    }
}

impl TryFrom<i32> for IndexSlot {
    type Error = InvalidSlot;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            SEPARATOR => Ok(IndexSlot::Separator),
            v if v >= 0 => Ok(IndexSlot::Vertex(VertexIdx(v as usize))),
            v => Err(InvalidSlot(v)),
        }
    }
}

/// Fails for vertex ids above `i32::MAX`, which have no raw form.
impl TryFrom<IndexSlot> for i32 {
    type Error = TryFromIntError;

    fn try_from(slot: IndexSlot) -> Result<Self, Self::Error> {
        match slot {
            IndexSlot::Vertex(v) => i32::try_from(v.0),
            IndexSlot::Separator => Ok(SEPARATOR),
        }
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("{0} is neither a vertex index nor the separator -1")]
pub struct InvalidSlot(pub i32);


pub trait ConfigType {
    fn default()-> Self;
}
