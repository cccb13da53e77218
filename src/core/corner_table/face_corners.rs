use super::FaceTopology;
use crate::core::shared::{CornerIdx, FaceIdx};

/// Iterator over the corners of one face, following `next` from the face's
/// first corner. Yields exactly `face_size` corners.
#[derive(Debug, Clone)]
pub struct FaceCorners<'a, T> {
    table: &'a T,
    curr: Option<CornerIdx>,
    remaining: usize,
}

impl<'a, T: FaceTopology> FaceCorners<'a, T> {
    pub(super) fn new(table: &'a T, face: FaceIdx) -> Self {
        let remaining = table.face_size(face);
        let curr = if remaining > 0 { table.face_first_corner(face) } else { None };
        Self { table, curr, remaining }
    }
}

impl<T: FaceTopology> Iterator for FaceCorners<'_, T> {
    type Item = CornerIdx;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let c = self.curr?;
        self.remaining -= 1;
        self.curr = self.table.next(c);
        Some(c)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len(), Some(self.len()))
    }
}

impl<T: FaceTopology> ExactSizeIterator for FaceCorners<'_, T> {
    fn len(&self) -> usize {
        if self.curr.is_some() { self.remaining } else { 0 }
    }
}
