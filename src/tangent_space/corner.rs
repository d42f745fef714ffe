/// New-type index for a particular corner on a particular triangle.
///
/// The wrapped value is the position of the corner within the index list, so
/// corners order face-major and then by corner.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub(crate) struct TriangleCorner(usize);

impl TriangleCorner {
    /// Construct a new [`TriangleCorner`] for the given `face` and `corner`.
    pub(crate) const fn new(face: usize, corner: u8) -> Self {
        debug_assert!(corner < 3);

        let value = Self(face * 3 + corner as usize);

        debug_assert!(value.face() == face);
        debug_assert!(value.corner() == corner);

        value
    }

    /// Wraps a position within the index list.
    pub(crate) const fn from_index(index: usize) -> Self {
        Self(index)
    }

    /// Get's the `face` of this [`TriangleCorner`].
    pub(crate) const fn face(self) -> usize {
        self.0 / 3
    }

    /// Get's the corner of this [`TriangleCorner`] within its face.
    pub(crate) const fn corner(self) -> u8 {
        (self.0 % 3) as u8
    }

    /// Position of this corner within the index list and the output.
    pub(crate) const fn index(self) -> usize {
        self.0
    }
}
