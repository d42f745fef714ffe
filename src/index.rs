use crate::{ComponentType, GenerateTangentSpaceError};

/// A borrowed triangle-list index buffer.
#[derive(Clone, Copy, Debug)]
pub enum IndexBuffer<'a> {
    U8(&'a [u8]),
    U16(&'a [u16]),
    U32(&'a [u32]),
}

impl<'a> IndexBuffer<'a> {
    /// Reinterprets raw bytes as an index buffer of the given component type.
    ///
    /// The bytes must be aligned for, and a whole multiple of, the component size.
    /// [`ComponentType::U8Norm`] and [`ComponentType::U16Norm`] select raw `u8`
    /// and `u16` indices here; no normalization is applied.
    pub fn from_bytes(
        bytes: &'a [u8],
        component: ComponentType,
    ) -> Result<Self, GenerateTangentSpaceError> {
        let malformed = |_| {
            GenerateTangentSpaceError::malformed(bytes.len(), component.size(), component.size())
        };

        match component {
            ComponentType::U8Norm => Ok(Self::U8(bytes)),
            ComponentType::U16Norm => bytemuck::try_cast_slice(bytes)
                .map(Self::U16)
                .map_err(malformed),
            ComponentType::U32 => bytemuck::try_cast_slice(bytes)
                .map(Self::U32)
                .map_err(malformed),
            ComponentType::F32 => Err(GenerateTangentSpaceError::UnsupportedComponentType {
                code: component.code(),
            }),
        }
    }

    /// Returns the number of indices.
    pub const fn len(&self) -> usize {
        match self {
            Self::U8(indices) => indices.len(),
            Self::U16(indices) => indices.len(),
            Self::U32(indices) => indices.len(),
        }
    }

    /// Returns `true` if there are no indices.
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the index stored at `position`, widened to `usize`.
    pub fn get(&self, position: usize) -> Option<usize> {
        match self {
            Self::U8(indices) => indices.get(position).map(|&i| i as usize),
            Self::U16(indices) => indices.get(position).map(|&i| i as usize),
            Self::U32(indices) => indices.get(position).map(|&i| i as usize),
        }
    }

    /// Iterates over all indices in order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = usize> + Clone + '_ {
        (0..self.len()).map(move |position| self.at(position))
    }

    fn at(&self, position: usize) -> usize {
        match self {
            Self::U8(indices) => indices[position] as usize,
            Self::U16(indices) => indices[position] as usize,
            Self::U32(indices) => indices[position] as usize,
        }
    }
}

impl<'a> From<&'a [u8]> for IndexBuffer<'a> {
    fn from(value: &'a [u8]) -> Self {
        Self::U8(value)
    }
}

impl<'a> From<&'a [u16]> for IndexBuffer<'a> {
    fn from(value: &'a [u16]) -> Self {
        Self::U16(value)
    }
}

impl<'a> From<&'a [u32]> for IndexBuffer<'a> {
    fn from(value: &'a [u32]) -> Self {
        Self::U32(value)
    }
}
