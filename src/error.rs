/// Error returned when failing to generate tangent spaces for a mesh.
///
/// Every variant is a validation failure of the caller's buffers.
/// Numerical problems in otherwise valid geometry (zero-area triangles,
/// collapsed texture coordinates) never produce an error; those corners receive
/// a fallback basis instead.
#[derive(Clone, PartialEq, Eq, Debug, thiserror::Error)]
// Reserving the right to introduce new error variants in the future.
#[non_exhaustive]
pub enum GenerateTangentSpaceError {
    /// The byte length, stride, or element layout of a buffer is inconsistent.
    #[error(
        "malformed buffer: {byte_length} bytes with a stride of {stride} cannot hold elements of {element_size} bytes"
    )]
    MalformedBuffer {
        byte_length: usize,
        stride: usize,
        element_size: usize,
    },
    /// An element was requested past the end of an attribute view.
    #[error("element {index} is out of range for a view of {count} elements")]
    OutOfRange { index: usize, count: usize },
    /// The index list references a vertex the attribute buffers do not contain.
    #[error(
        "index {index} at position {position} of the index list exceeds the vertex count of {vertex_count}"
    )]
    IndexOutOfRange {
        position: usize,
        index: usize,
        vertex_count: usize,
    },
    /// The index list does not describe a whole number of triangles.
    #[error("index list of length {length} is not a multiple of 3")]
    DegenerateIndexList { length: usize },
    /// An output buffer does not hold exactly one element per triangle corner.
    #[error("output buffer holds {actual} elements, but {expected} corners were expected")]
    OutputLength { expected: usize, actual: usize },
    /// A component type code outside of what [`AttributeView`](crate::AttributeView)
    /// and [`IndexBuffer`](crate::IndexBuffer) can decode.
    #[error("unsupported component type {code}")]
    UnsupportedComponentType { code: u32 },
}

impl GenerateTangentSpaceError {
    pub(crate) const fn malformed(byte_length: usize, stride: usize, element_size: usize) -> Self {
        Self::MalformedBuffer {
            byte_length,
            stride,
            element_size,
        }
    }
}
