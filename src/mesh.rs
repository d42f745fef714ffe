use crate::{AttributeView, GenerateTangentSpaceError, IndexBuffer};

/// A validated, indexed triangle list over borrowed attribute views.
///
/// All three attributes are addressed by the same vertex index.
/// Once constructed, every index is known to be in range of every attribute,
/// so geometry can be read without further checks.
#[derive(Clone, Copy, Debug)]
pub struct Mesh<'a> {
    position: AttributeView<'a, 3>,
    normal: AttributeView<'a, 3>,
    uv: AttributeView<'a, 2>,
    indices: IndexBuffer<'a>,
    vertex_count: usize,
}

/// Attribute values resolved for one corner of one triangle.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Corner {
    /// Vertex index this corner references.
    pub vertex: usize,
    /// Decoded position of [`vertex`](Corner::vertex).
    pub position: [f32; 3],
    /// Decoded normal, exactly as stored; it may be zero or unnormalized.
    pub normal: [f32; 3],
    /// Decoded texture coordinates.
    pub uv: [f32; 2],
}

impl<'a> Mesh<'a> {
    /// Validates `indices` against the attribute views.
    ///
    /// The usable vertex count is the smallest of `vertex_count` and the three
    /// attribute counts.
    pub fn new(
        vertex_count: usize,
        position: AttributeView<'a, 3>,
        normal: AttributeView<'a, 3>,
        uv: AttributeView<'a, 2>,
        indices: IndexBuffer<'a>,
    ) -> Result<Self, GenerateTangentSpaceError> {
        if indices.len() % 3 != 0 {
            log::debug!("rejecting index list of length {}", indices.len());
            return Err(GenerateTangentSpaceError::DegenerateIndexList {
                length: indices.len(),
            });
        }

        let vertex_count = vertex_count
            .min(position.count())
            .min(normal.count())
            .min(uv.count());

        if let Some((position, index)) = indices
            .iter()
            .enumerate()
            .find(|&(_, index)| index >= vertex_count)
        {
            log::debug!("rejecting index {index} at {position}; only {vertex_count} vertices");
            return Err(GenerateTangentSpaceError::IndexOutOfRange {
                position,
                index,
                vertex_count,
            });
        }

        Ok(Self {
            position,
            normal,
            uv,
            indices,
            vertex_count,
        })
    }

    /// Returns the number of triangles.
    pub const fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Returns the number of triangle corners, which equals the index count.
    pub const fn corner_count(&self) -> usize {
        self.indices.len()
    }

    /// Returns the number of vertices addressable by the index list.
    pub const fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    /// Returns the vertex index used by `corner` (in `0..3`) of `face`.
    ///
    /// # Panics
    ///
    /// Panics if `face` or `corner` is out of range.
    pub fn vertex_index(&self, face: usize, corner: usize) -> usize {
        assert!(corner < 3, "a triangle only has 3 corners");
        self.vertex_at(3 * face + corner)
    }

    /// Resolves all attributes for `corner` (in `0..3`) of `face`.
    ///
    /// # Panics
    ///
    /// Panics if `face` or `corner` is out of range.
    pub fn corner(&self, face: usize, corner: usize) -> Corner {
        let vertex = self.vertex_index(face, corner);

        Corner {
            vertex,
            position: self.position.get_unchecked(vertex),
            normal: self.normal.get_unchecked(vertex),
            uv: self.uv.get_unchecked(vertex),
        }
    }

    pub(crate) fn vertex_at(&self, corner: usize) -> usize {
        match self.indices.get(corner) {
            Some(vertex) => vertex,
            None => panic!("corner {corner} is out of range"),
        }
    }

    pub(crate) fn position_at(&self, corner: usize) -> [f32; 3] {
        self.position.get_unchecked(self.vertex_at(corner))
    }

    pub(crate) fn normal_at(&self, corner: usize) -> [f32; 3] {
        self.normal.get_unchecked(self.vertex_at(corner))
    }

    pub(crate) fn uv_at(&self, corner: usize) -> [f32; 2] {
        self.uv.get_unchecked(self.vertex_at(corner))
    }
}
