//! Strided, typed, read-only access to vertex attribute data.
//!
//! An [`AttributeView`] never copies the buffer it reads from.
//! Planar buffers (one attribute per buffer) and interleaved buffers (several
//! attributes sharing one buffer at different offsets) are both expressed as a
//! byte slice plus a stride.

use crate::GenerateTangentSpaceError;

/// Numeric type of each component stored in a buffer.
///
/// The numeric codes accepted by [`ComponentType::from_code`] are the ones used
/// by glTF accessors.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ComponentType {
    /// 32-bit IEEE float.
    F32,
    /// Unsigned byte, normalized to `[0, 1]` when decoded as an attribute.
    U8Norm,
    /// Unsigned short, normalized to `[0, 1]` when decoded as an attribute.
    U16Norm,
    /// Unsigned int. Only meaningful for index buffers.
    U32,
}

impl ComponentType {
    /// glTF `UNSIGNED_BYTE`.
    pub const UNSIGNED_BYTE: u32 = 5121;
    /// glTF `UNSIGNED_SHORT`.
    pub const UNSIGNED_SHORT: u32 = 5123;
    /// glTF `UNSIGNED_INT`.
    pub const UNSIGNED_INT: u32 = 5125;
    /// glTF `FLOAT`.
    pub const FLOAT: u32 = 5126;

    /// Maps an accessor component type code onto a [`ComponentType`].
    pub const fn from_code(code: u32) -> Result<Self, GenerateTangentSpaceError> {
        match code {
            Self::UNSIGNED_BYTE => Ok(Self::U8Norm),
            Self::UNSIGNED_SHORT => Ok(Self::U16Norm),
            Self::UNSIGNED_INT => Ok(Self::U32),
            Self::FLOAT => Ok(Self::F32),
            _ => Err(GenerateTangentSpaceError::UnsupportedComponentType { code }),
        }
    }

    /// Returns the accessor code for this type.
    pub const fn code(self) -> u32 {
        match self {
            Self::F32 => Self::FLOAT,
            Self::U8Norm => Self::UNSIGNED_BYTE,
            Self::U16Norm => Self::UNSIGNED_SHORT,
            Self::U32 => Self::UNSIGNED_INT,
        }
    }

    /// Size of one component in bytes.
    pub const fn size(self) -> usize {
        match self {
            Self::U8Norm => 1,
            Self::U16Norm => 2,
            Self::F32 | Self::U32 => 4,
        }
    }

    fn decode(self, bytes: &[u8]) -> Option<f32> {
        match self {
            Self::F32 => Some(bytemuck::pod_read_unaligned::<f32>(bytes)),
            Self::U8Norm => Some(bytes[0] as f32 / u8::MAX as f32),
            Self::U16Norm => {
                Some(bytemuck::pod_read_unaligned::<u16>(bytes) as f32 / u16::MAX as f32)
            }
            Self::U32 => None,
        }
    }
}

/// Returns the number of components for an accessor type string, such as
/// `"VEC3"`.
pub fn arity_of(accessor_type: &str) -> Option<usize> {
    match accessor_type {
        "SCALAR" => Some(1),
        "VEC2" => Some(2),
        "VEC3" => Some(3),
        "VEC4" | "MAT2" => Some(4),
        "MAT3" => Some(9),
        "MAT4" => Some(16),
        _ => None,
    }
}

/// Decode arities an [`AttributeView`] can be instantiated with.
const SUPPORTED_ARITIES: [usize; 6] = [1, 2, 3, 4, 9, 16];

/// A read-only view of `N`-component attribute values stored with an arbitrary
/// stride inside a byte buffer.
///
/// Values are decoded in native byte order, matching buffers produced with
/// [`bytemuck::cast_slice`].
#[derive(Clone, Copy, Debug)]
pub struct AttributeView<'a, const N: usize> {
    bytes: &'a [u8],
    offset: usize,
    stride: usize,
    count: usize,
    component: ComponentType,
}

impl<'a, const N: usize> AttributeView<'a, N> {
    /// Creates a view over a buffer holding only this attribute.
    ///
    /// The element count is `bytes.len() / stride`, and `bytes.len()` must be a
    /// multiple of `stride`.
    pub fn new(
        bytes: &'a [u8],
        stride: usize,
        component: ComponentType,
    ) -> Result<Self, GenerateTangentSpaceError> {
        let element_size = Self::check_layout(bytes.len(), stride, component)?;

        if bytes.len() % stride != 0 {
            return Err(GenerateTangentSpaceError::malformed(
                bytes.len(),
                stride,
                element_size,
            ));
        }

        Ok(Self {
            bytes,
            offset: 0,
            stride,
            count: bytes.len() / stride,
            component,
        })
    }

    /// Creates a view of `count` elements starting `offset` bytes into a shared,
    /// interleaved buffer.
    ///
    /// The final element only needs to fit its own components; it does not need
    /// to be followed by a full stride.
    pub fn interleaved(
        bytes: &'a [u8],
        offset: usize,
        stride: usize,
        count: usize,
        component: ComponentType,
    ) -> Result<Self, GenerateTangentSpaceError> {
        let element_size = Self::check_layout(bytes.len(), stride, component)?;

        let required = count
            .checked_sub(1)
            .map(|last| {
                last.checked_mul(stride)
                    .and_then(|end| end.checked_add(offset))
                    .and_then(|end| end.checked_add(element_size))
            })
            .unwrap_or(Some(0));

        match required {
            Some(required) if required <= bytes.len() => Ok(Self {
                bytes,
                offset,
                stride,
                count,
                component,
            }),
            _ => Err(GenerateTangentSpaceError::malformed(
                bytes.len(),
                stride,
                element_size,
            )),
        }
    }

    /// Creates a tightly packed view over a slice of `f32` tuples without copying.
    pub fn from_slice(values: &'a [[f32; N]]) -> Result<Self, GenerateTangentSpaceError> {
        Self::new(
            bytemuck::cast_slice(values.as_flattened()),
            N * size_of::<f32>(),
            ComponentType::F32,
        )
    }

    /// Returns the number of elements in this view.
    pub const fn count(&self) -> usize {
        self.count
    }

    /// Returns the distance in bytes between two consecutive elements.
    pub const fn stride(&self) -> usize {
        self.stride
    }

    /// Returns the component type of this view.
    pub const fn component_type(&self) -> ComponentType {
        self.component
    }

    /// Decodes the element at `index`.
    pub fn get(&self, index: usize) -> Result<[f32; N], GenerateTangentSpaceError> {
        if index >= self.count {
            return Err(GenerateTangentSpaceError::OutOfRange {
                index,
                count: self.count,
            });
        }

        Ok(self.get_unchecked(index))
    }

    /// Decodes the element at `index`, which must already be known to be in range.
    pub(crate) fn get_unchecked(&self, index: usize) -> [f32; N] {
        let size = self.component.size();
        let start = self.offset + index * self.stride;
        let element = &self.bytes[start..][..N * size];

        let mut value = [0f32; N];
        for (value, bytes) in value.iter_mut().zip(element.chunks_exact(size)) {
            // `check_layout` rejects component types which cannot be decoded.
            *value = self.component.decode(bytes).unwrap_or(f32::NAN);
        }
        value
    }

    /// Iterates over every element in order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = [f32; N]> + '_ {
        (0..self.count).map(|index| self.get_unchecked(index))
    }

    fn check_layout(
        byte_length: usize,
        stride: usize,
        component: ComponentType,
    ) -> Result<usize, GenerateTangentSpaceError> {
        let element_size = N * component.size();

        if component == ComponentType::U32 {
            return Err(GenerateTangentSpaceError::UnsupportedComponentType {
                code: component.code(),
            });
        }

        if !SUPPORTED_ARITIES.contains(&N) || stride == 0 || stride < element_size {
            return Err(GenerateTangentSpaceError::malformed(
                byte_length,
                stride,
                element_size,
            ));
        }

        Ok(element_size)
    }
}
