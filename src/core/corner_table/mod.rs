mod face_corners;

pub use face_corners::FaceCorners;

use thiserror::Error;

use crate::core::shared::{CornerIdx, FaceIdx, IndexSlot, VecCornerIdx, VecFaceIdx, VertexIdx};

/// Read-only adjacency over a polygon mesh whose faces are stored as runs of
/// corners.
///
/// Every query is total: indices out of range and separator corners produce
/// `None` (or `0` for [`FaceTopology::face_size`]) rather than a panic, so
/// traversal code may probe without checking validity first.
pub trait FaceTopology {
    fn num_vertices(&self) -> usize;
    fn num_faces(&self) -> usize;
    fn num_corners(&self) -> usize;
    fn face_size(&self, face: FaceIdx) -> usize;
    fn face_first_corner(&self, face: FaceIdx) -> Option<CornerIdx>;
    fn face_vertex(&self, face: FaceIdx, position: usize) -> Option<VertexIdx>;
    fn corner_face(&self, corner: CornerIdx) -> Option<FaceIdx>;
    fn corner_vertex(&self, corner: CornerIdx) -> Option<VertexIdx>;
    fn next(&self, corner: CornerIdx) -> Option<CornerIdx>;
    fn previous(&self, corner: CornerIdx) -> Option<CornerIdx>;

    /// Walks the corners of `face` starting at its first corner.
    fn face_corners(&self, face: FaceIdx) -> FaceCorners<'_, Self>
        where Self: Sized
    {
        FaceCorners::new(self, face)
    }

    fn face_vertices(&self, face: FaceIdx) -> impl Iterator<Item = VertexIdx> + '_
        where Self: Sized
    {
        self.face_corners(face).filter_map(|c| self.corner_vertex(c))
    }

    /// True if every face has exactly three corners. An empty table is triangular.
    fn is_triangular(&self) -> bool {
        (0..self.num_faces()).all(|f| self.face_size(FaceIdx::from(f)) == 3)
    }
}


/// Face and corner tables derived from a separator-delimited index array.
///
/// Corners are the slots of the normalized array, separators included, so
/// `CornerIdx` values index straight into the array the table was built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CornerTable {
    /// The normalized index array. Always empty or terminated by a separator.
    slots: VecCornerIdx<IndexSlot>,

    /// Effective number of vertices; never smaller than the indices require.
    num_vertices: usize,

    /// First corner of each face. For an empty face this is its separator.
    face_first_corner: VecFaceIdx<CornerIdx>,

    /// Number of vertex corners in each face.
    face_size: VecFaceIdx<usize>,

    /// Owning face of each corner, `None` on separators.
    corner_face: VecCornerIdx<Option<FaceIdx>>,

    /// Cyclic successor of each corner within its face, `None` on separators.
    next_corner: VecCornerIdx<Option<CornerIdx>>,
}

impl CornerTable {
    /// Builds the table from `slots`. A separator is appended if the input is
    /// non-empty and does not already end with one.
    pub fn new<I>(num_vertices: usize, slots: I) -> Self
        where I: IntoIterator<Item = IndexSlot>
    {
        let mut slots = slots.into_iter().collect::<Vec<_>>();
        if slots.last().is_some_and(|s| !s.is_separator()) {
            slots.push(IndexSlot::Separator);
        }

        // saturates at usize::MAX for the largest possible vertex id
        let num_vertices = slots.iter()
            .filter_map(|s| s.vertex())
            .max()
            .map_or(num_vertices, |v| num_vertices.max(usize::from(v).saturating_add(1)));

        let num_faces = slots.iter().filter(|s| s.is_separator()).count();
        let num_corners = slots.len();

        let mut face_first_corner = VecFaceIdx::filled(num_faces, CornerIdx::from(0));
        let mut face_size = VecFaceIdx::filled(num_faces, 0);
        let mut corner_face = VecCornerIdx::filled(num_corners, None);
        let mut next_corner = VecCornerIdx::filled(num_corners, None);

        let mut face = FaceIdx::from(0);
        let mut run_start = 0;
        for (sep, slot) in slots.iter().enumerate() {
            if !slot.is_separator() {
                continue;
            }
            face_first_corner[face] = CornerIdx::from(run_start);
            face_size[face] = sep - run_start;

            // empty runs write no successors
            for k in run_start..sep {
                let c = CornerIdx::from(k);
                corner_face[c] = Some(face);
                next_corner[c] = Some(CornerIdx::from(if k + 1 < sep { k + 1 } else { run_start }));
            }

            face = face + 1;
            run_start = sep + 1;
        }

        log::debug!(
            "built corner table: {} vertices, {} faces, {} corners",
            num_vertices, num_faces, num_corners
        );

        Self {
            slots: slots.into(),
            num_vertices,
            face_first_corner,
            face_size,
            corner_face,
            next_corner,
        }
    }

    /// Builds the table from raw integers where `-1` separates faces.
    /// Any other negative value is rejected.
    pub fn from_coord_index(num_vertices: usize, coord_index: &[i32]) -> Result<Self, Err> {
        let slots = coord_index.iter()
            .enumerate()
            .map(|(i, &value)| IndexSlot::try_from(value)
                .map_err(|_| Err::InvalidIndex { corner: CornerIdx::from(i), value })
            )
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(num_vertices, slots))
    }

    /// The normalized index array.
    pub fn slots(&self) -> &[IndexSlot] {
        self.slots.as_slice()
    }

    #[inline]
    pub fn slot(&self, corner: CornerIdx) -> Option<IndexSlot> {
        self.slots.get(corner).copied()
    }

    /// The normalized index array in its raw integer form. Fails if a vertex
    /// id does not fit in an `i32`.
    pub fn coord_index(&self) -> Result<Vec<i32>, Err> {
        self.slots.iter()
            .enumerate()
            .map(|(i, &s)| i32::try_from(s).map_err(|_| Err::VertexTooLarge {
                corner: CornerIdx::from(i),
                vertex: s.vertex().map_or(0, usize::from),
            }))
            .collect()
    }

    /// Number of faces without any vertex corner.
    pub fn num_empty_faces(&self) -> usize {
        self.face_size.iter().filter(|&&s| s == 0).count()
    }

    pub fn try_face_vertex(&self, face: FaceIdx, position: usize) -> Result<VertexIdx, Err> {
        let size = *self.face_size.get(face)
            .ok_or(Err::FaceOutOfRange { face, num_faces: self.num_faces() })?;
        if position >= size {
            return Err(Err::PositionOutOfRange { face, position, size });
        }
        self.face_vertex(face, position)
            .ok_or(Err::PositionOutOfRange { face, position, size })
    }

    pub fn try_corner_face(&self, corner: CornerIdx) -> Result<FaceIdx, Err> {
        self.check_vertex_corner(corner)?;
        self.corner_face(corner).ok_or(Err::Separator(corner))
    }

    pub fn try_next(&self, corner: CornerIdx) -> Result<CornerIdx, Err> {
        self.check_vertex_corner(corner)?;
        self.next(corner).ok_or(Err::Separator(corner))
    }

    fn check_vertex_corner(&self, corner: CornerIdx) -> Result<(), Err> {
        match self.slot(corner) {
            None => Err(Err::CornerOutOfRange { corner, num_corners: self.num_corners() }),
            Some(IndexSlot::Separator) => Err(Err::Separator(corner)),
            Some(IndexSlot::Vertex(_)) => Ok(()),
        }
    }
}

impl FaceTopology for CornerTable {
    #[inline]
    fn num_vertices(&self) -> usize {
        self.num_vertices
    }

    #[inline]
    fn num_faces(&self) -> usize {
        self.face_size.len()
    }

    #[inline]
    fn num_corners(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    fn face_size(&self, face: FaceIdx) -> usize {
        self.face_size.get(face).copied().unwrap_or(0)
    }

    #[inline]
    fn face_first_corner(&self, face: FaceIdx) -> Option<CornerIdx> {
        self.face_first_corner.get(face).copied()
    }

    #[inline]
    fn face_vertex(&self, face: FaceIdx, position: usize) -> Option<VertexIdx> {
        if position >= self.face_size(face) {
            return None;
        }
        let first = self.face_first_corner(face)?;
        self.corner_vertex(first + position)
    }

    #[inline]
    fn corner_face(&self, corner: CornerIdx) -> Option<FaceIdx> {
        self.corner_face.get(corner).copied().flatten()
    }

    #[inline]
    fn corner_vertex(&self, corner: CornerIdx) -> Option<VertexIdx> {
        self.slot(corner)?.vertex()
    }

    #[inline]
    fn next(&self, corner: CornerIdx) -> Option<CornerIdx> {
        self.next_corner.get(corner).copied().flatten()
    }

    /// Runs are contiguous, so the predecessor is the previous slot except at
    /// the first corner, which wraps to the last one.
    #[inline]
    fn previous(&self, corner: CornerIdx) -> Option<CornerIdx> {
        let face = self.corner_face(corner)?;
        let first = self.face_first_corner(face)?;
        if corner == first {
            Some(first + (self.face_size(face) - 1))
        } else {
            Some(corner - CornerIdx::from(1))
        }
    }
}


#[remain::sorted]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Err {
    #[error("Corner {corner} is out of range; the table has {num_corners} corners.")]
    CornerOutOfRange { corner: CornerIdx, num_corners: usize },

    #[error("Face {face} is out of range; the table has {num_faces} faces.")]
    FaceOutOfRange { face: FaceIdx, num_faces: usize },

    #[error("Corner {corner} holds {value}, which is neither a vertex index nor the separator -1.")]
    InvalidIndex { corner: CornerIdx, value: i32 },

    #[error("Position {position} is out of range for face {face} of size {size}.")]
    PositionOutOfRange { face: FaceIdx, position: usize, size: usize },

    #[error("Corner {0} is a separator.")]
    Separator(CornerIdx),

    #[error("Corner {corner} refers to vertex {vertex}, which does not fit in an i32 index.")]
    VertexTooLarge { corner: CornerIdx, vertex: usize },
}
