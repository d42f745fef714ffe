//! Reduction of a group's [`RawBasis`] into a final, orthonormal tangent.

use crate::{
    Ops,
    math::{Vec3, fabsf},
    tangent_space::raw_basis::RawBasis,
};

/// Smallest ratio between the length of the averaged tangent after removing
/// its normal component and its length before, below which the tangent is
/// considered parallel to the normal.
const PARALLEL_EPSILON: f32 = 1e-6;

/// A resolved tangent frame for one group.
pub(super) struct Basis<O: Ops> {
    /// Unit tangent, orthogonal to [`normal`](Basis::normal).
    pub(super) tangent: Vec3<O>,
    /// Unit normal the tangent was orthogonalized against.
    pub(super) normal: Vec3<O>,
    /// Either `1.0` or `-1.0`.
    pub(super) sign: f32,
    /// Indicates the tangent was not derived from texture coordinates.
    pub(super) is_fallback: bool,
}

impl<O: Ops> Copy for Basis<O> {}

impl<O: Ops> Clone for Basis<O> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<O: Ops> Basis<O> {
    /// Averages `raw` and orthogonalizes it against the unit normal `n` using
    /// Gram-Schmidt.
    pub(super) fn from_raw(raw: RawBasis<O>, n: Vec3<O>) -> Self {
        let Some((tangent, bi_tangent)) = raw.average() else {
            return Self::fallback(n);
        };

        let projected = tangent.reject_from_normalized(n);
        let length = projected.length();

        if !(length > tangent.length() * PARALLEL_EPSILON) || !length.is_finite() {
            return Self::fallback(n);
        }

        let tangent = projected / length;
        let sign = if n.cross(tangent).dot(bi_tangent) < 0. {
            -1.
        } else {
            1.
        };

        Self {
            tangent,
            normal: n,
            sign,
            is_fallback: false,
        }
    }

    /// Builds a basis from the normal alone.
    pub(super) fn fallback(n: Vec3<O>) -> Self {
        Self {
            tangent: fallback_tangent(n),
            normal: n,
            sign: 1.,
            is_fallback: true,
        }
    }

    /// Reconstructs the unit bitangent from the tangent, normal and sign.
    pub(super) fn bi_tangent(&self) -> Vec3<O> {
        self.sign * self.normal.cross(self.tangent)
    }
}

/// Selects a unit tangent orthogonal to `n` without any texture information.
///
/// The coordinate axis along which `n` is smallest is projected onto the plane
/// orthogonal to `n`.
/// Ties prefer X, then Y, then Z.
/// A zero or non-finite `n` produces the X axis.
pub(super) fn fallback_tangent<O: Ops>(n: Vec3<O>) -> Vec3<O> {
    let n = n.normalized_or_zero();
    if n.is_zero() {
        return Vec3::X;
    }

    let [x, y, z] = [n.x, n.y, n.z].map(fabsf);
    let axis = if x <= y && x <= z {
        Vec3::X
    } else if y <= z {
        Vec3::Y
    } else {
        Vec3::Z
    };

    let tangent = axis.reject_from_normalized(n).normalized_or_zero();
    if tangent.is_zero() { Vec3::X } else { tangent }
}
