//! Generates per-corner [`TangentSpace`] values for indexed triangle meshes
//! stored in strided vertex attribute buffers, in entirely safe Rust.
//!
//! Tangents are required for normal mapping: a tangent-space normal map is
//! sampled relative to a frame built from the interpolated vertex normal,
//! tangent and bitangent.
//! This crate derives that frame from positions, normals and texture
//! coordinates, averaging it across triangles which share a vertex while
//! keeping it separate across UV seams and mirrored texture mappings.
//!
//! # Usage
//!
//! Attribute data is read in place through [`AttributeView`]s, which describe
//! a byte buffer, a byte offset, a stride and a [`ComponentType`].
//! Both planar buffers (one attribute per buffer) and interleaved buffers are
//! supported.
//!
//! ```
//! # fn main() -> Result<(), tangent_buffers::GenerateTangentSpaceError> {
//! use tangent_buffers::{AttributeView, IndexBuffer, generate_tangents};
//!
//! let positions = [[0., 0., 0.], [1., 0., 0.], [1., 1., 0.], [0., 1., 0.]];
//! let normals = [[0., 0., 1.]; 4];
//! let uvs = [[0., 0.], [1., 0.], [1., 1.], [0., 1.]];
//! let indices: &[u16] = &[0, 1, 2, 0, 2, 3];
//!
//! let tangents = generate_tangents(
//!     4,
//!     AttributeView::from_slice(&positions)?,
//!     AttributeView::from_slice(&normals)?,
//!     AttributeView::from_slice(&uvs)?,
//!     IndexBuffer::from(indices),
//! )?;
//!
//! // One `[x, y, z, w]` tangent per index.
//! assert_eq!(tangents.len(), 4 * indices.len());
//! assert_eq!(&tangents[..4], &[1., 0., 0., 1.]);
//! # Ok(())
//! # }
//! ```
//!
//! For more control, validate the buffers once into a [`Mesh`] and call
//! [`generate_tangent_spaces`] or [`write_tangents`], tuning the grouping with
//! a [`TangentConfig`].
//!
//! # Description
//!
//! Generation is deterministic: the same buffers always produce bit-identical
//! output, regardless of the order triangles are processed in (and whether the
//! `rayon` feature is enabled).
//!
//! Corners are first gathered by vertex identity, which is their position and
//! normal.
//! Within each of these buckets, corners are joined into groups when their
//! texture mapping has the same handedness, their texture coordinates match,
//! and (optionally) their faces meet at a shallow enough angle.
//! Each group receives the average of its faces' tangents, orthogonalized
//! against the vertex normal.
//!
//! Triangles without area, in either object or texture space, contribute
//! nothing.
//! Their corners inherit the tangent space of a neighboring group at the same
//! vertex, or receive a fallback basis derived from the normal alone when no
//! such group exists.
//! Degenerate geometry never produces an error.
//!
//! # Features
//!
//! ## `std` (default)
//!
//! Provides access to the standard library, allowing a default implementation
//! of [`Ops`] to be provided.
//! If you disable this feature, you will need to provide a type implementing
//! [`Ops`] and use the `_with_ops` variants, such as
//! [`generate_tangents_with_ops`].
//!
//! A common backend for implementing [`Ops`] is [`libm`]:
//!
//! ```
//! # use tangent_buffers::Ops;
//! # struct LibmOps;
//! impl Ops for LibmOps {
//!     fn sqrt(x: f32) -> f32 {
//!         libm::sqrtf(x)
//!     }
//! }
//! ```
//!
//! ## `rayon`
//!
//! Computes face tangents, resolves vertex buckets and writes the output on the
//! [`rayon`] thread pool.
//! Results are identical to a sequential build.
//!
//! # Advice
//!
//! Only the tangent and a handedness sign are written.
//! Reconstruct the bitangent in the vertex shader as
//! `sign * cross(normal, tangent)`, and use that same reconstruction anywhere
//! normal maps are baked, so both agree on the frame.
//!
//! [`libm`]: https://docs.rs/libm
//! [`rayon`]: https://docs.rs/rayon

#![forbid(unsafe_code)]
#![no_std]

extern crate alloc;

mod attribute;
mod config;
mod error;
mod index;
mod math;
mod mesh;
mod tangent_space;

#[cfg(test)]
mod tests;

use alloc::vec::Vec;

#[cfg(feature = "std")]
mod std {
    extern crate std;

    /// Implements [`Ops`](crate::Ops) using the standard library.
    /// This is the recommended default when the `std` feature is enabled.
    pub struct StdOps;

    impl crate::Ops for StdOps {
        #[inline]
        fn sqrt(x: f32) -> f32 {
            x.sqrt()
        }
    }
}

pub use attribute::{AttributeView, ComponentType, arity_of};
pub use config::TangentConfig;
pub use error::GenerateTangentSpaceError;
pub use index::IndexBuffer;
pub use math::Ops;
pub use mesh::{Corner, Mesh};

#[cfg(feature = "std")]
pub use std::StdOps;

/// Generates a tangent for every index of the provided buffers using the
/// [`Default`] [`TangentConfig`].
///
/// The result holds four floats per index: the unit tangent followed by the
/// handedness sign, which is always `1.0` or `-1.0`.
#[cfg(feature = "std")]
pub fn generate_tangents(
    vertex_count: usize,
    position: AttributeView<'_, 3>,
    normal: AttributeView<'_, 3>,
    uv: AttributeView<'_, 2>,
    indices: IndexBuffer<'_>,
) -> Result<Vec<f32>, GenerateTangentSpaceError> {
    generate_tangents_with_config(
        vertex_count,
        position,
        normal,
        uv,
        indices,
        &TangentConfig::default(),
    )
}

/// Generates a tangent for every index of the provided buffers, grouping
/// corners according to `config`.
///
/// See [`generate_tangents`] for the output layout.
#[cfg(feature = "std")]
pub fn generate_tangents_with_config(
    vertex_count: usize,
    position: AttributeView<'_, 3>,
    normal: AttributeView<'_, 3>,
    uv: AttributeView<'_, 2>,
    indices: IndexBuffer<'_>,
    config: &TangentConfig,
) -> Result<Vec<f32>, GenerateTangentSpaceError> {
    generate_tangents_with_ops::<StdOps>(vertex_count, position, normal, uv, indices, config)
}

/// Same as [`generate_tangents_with_config`], using `O` for math operations
/// [`core`] does not provide.
pub fn generate_tangents_with_ops<O: Ops>(
    vertex_count: usize,
    position: AttributeView<'_, 3>,
    normal: AttributeView<'_, 3>,
    uv: AttributeView<'_, 2>,
    indices: IndexBuffer<'_>,
    config: &TangentConfig,
) -> Result<Vec<f32>, GenerateTangentSpaceError> {
    let mesh = Mesh::new(vertex_count, position, normal, uv, indices)?;

    let mut output = alloc::vec![[0.; 4]; mesh.corner_count()];
    write_tangents_with_ops::<O>(&mesh, config, &mut output)?;

    Ok(output.into_flattened())
}

/// Generates one [`TangentSpace`] for every corner of `mesh`, in index order.
#[cfg(feature = "std")]
pub fn generate_tangent_spaces(mesh: &Mesh<'_>, config: &TangentConfig) -> Vec<TangentSpace> {
    generate_tangent_spaces_with_ops::<StdOps>(mesh, config)
}

/// Same as [`generate_tangent_spaces`], using `O` for math operations [`core`]
/// does not provide.
pub fn generate_tangent_spaces_with_ops<O: Ops>(
    mesh: &Mesh<'_>,
    config: &TangentConfig,
) -> Vec<TangentSpace> {
    tangent_space::generate_tangent_spaces::<O>(mesh, config)
}

/// Writes the encoded tangent of every corner of `mesh` into `output`, which
/// must hold exactly [`Mesh::corner_count`] elements.
///
/// This is intended for filling a tangent column of an existing vertex buffer.
/// `output` is left untouched on error.
#[cfg(feature = "std")]
pub fn write_tangents(
    mesh: &Mesh<'_>,
    config: &TangentConfig,
    output: &mut [[f32; 4]],
) -> Result<(), GenerateTangentSpaceError> {
    write_tangents_with_ops::<StdOps>(mesh, config, output)
}

/// Same as [`write_tangents`], using `O` for math operations [`core`] does not
/// provide.
pub fn write_tangents_with_ops<O: Ops>(
    mesh: &Mesh<'_>,
    config: &TangentConfig,
    output: &mut [[f32; 4]],
) -> Result<(), GenerateTangentSpaceError> {
    tangent_space::write_tangents::<O>(mesh, config, output)
}

/// Wraps the results generated when calculating the tangent space for a
/// particular corner of a particular triangle.
///
/// Typically, you will call [`tangent_encoded`](TangentSpace::tangent_encoded)
/// to retrieve a value suitable for a vertex buffer.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct TangentSpace {
    tangent: [f32; 3],
    bi_tangent: [f32; 3],
    is_orientation_preserving: bool,
    is_fallback: bool,
}

impl Default for TangentSpace {
    fn default() -> Self {
        Self {
            tangent: [1., 0., 0.],
            bi_tangent: [0., 1., 0.],
            is_orientation_preserving: true,
            is_fallback: true,
        }
    }
}

impl TangentSpace {
    /// Returns the normalized tangent as an `[x, y, z]` array.
    #[inline]
    pub const fn tangent(&self) -> [f32; 3] {
        self.tangent
    }

    /// Returns the normalized bi-tangent as an `[x, y, z]` array.
    ///
    /// This always equals `sign * cross(normal, tangent)`.
    #[inline]
    pub const fn bi_tangent(&self) -> [f32; 3] {
        self.bi_tangent
    }

    /// Indicates if this generated tangent preserves the original orientation of
    /// the face.
    #[inline]
    pub const fn is_orientation_preserving(&self) -> bool {
        self.is_orientation_preserving
    }

    /// Indicates the tangent was chosen from the normal alone, as no usable
    /// texture coordinates were available.
    #[inline]
    pub const fn is_fallback(&self) -> bool {
        self.is_fallback
    }

    /// Returns `1.0` for orientation preserving tangent spaces, otherwise `-1.0`.
    #[inline]
    pub const fn sign(&self) -> f32 {
        if self.is_orientation_preserving {
            1.0
        } else {
            -1.0
        }
    }

    /// Returns an encoded summary of the tangent and bi-tangent as an `[x, y, z, w]`
    /// array.
    #[inline]
    pub const fn tangent_encoded(&self) -> [f32; 4] {
        [self.tangent[0], self.tangent[1], self.tangent[2], self.sign()]
    }
}
