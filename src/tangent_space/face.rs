//! First-order tangent computation for individual triangles.

use crate::{
    Mesh, Ops,
    math::{Vec3, not_zero},
    tangent_space::TriangleCorner,
};

/// Raw tangent space of a single triangle.
pub(super) struct FaceTangent<O: Ops> {
    /// Unnormalized object-space direction of increasing U.
    pub(super) tangent: Vec3<O>,
    /// Unnormalized object-space direction of increasing V.
    pub(super) bi_tangent: Vec3<O>,
    /// Unit geometric normal, or zero for a triangle without area.
    pub(super) normal: Vec3<O>,
    /// The texture mapping keeps the winding of the triangle.
    pub(super) orientation_preserving: bool,
    /// The triangle has no area, either in object space or in texture space.
    /// Degenerate triangles make no contribution to any group.
    pub(super) is_degenerate: bool,
}

impl<O: Ops> Copy for FaceTangent<O> {}

impl<O: Ops> Clone for FaceTangent<O> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<O: Ops> FaceTangent<O> {
    pub(super) fn compute(mesh: &Mesh<'_>, face: usize) -> Self {
        let corners = [0, 1, 2].map(|i| TriangleCorner::new(face, i).index());
        let p = corners.map(|c| Vec3::<O>::from(mesh.position_at(c)));
        let tx = corners.map(|c| mesh.uv_at(c));

        let e = [p[1] - p[0], p[2] - p[0]];
        let d = [1, 2].map(|t| [0, 1].map(|i| tx[t][i] - tx[0][i]));

        let cross = e[0].cross(e[1]);
        let area = 0.5 * cross.length();

        let denom = d[0][0] * d[1][1] - d[1][0] * d[0][1];

        let mut info = Self {
            tangent: Vec3::ZERO,
            bi_tangent: Vec3::ZERO,
            normal: cross.normalized_or_zero(),
            orientation_preserving: denom > 0.,
            is_degenerate: true,
        };

        if !(not_zero(area) && area.is_finite()) || !not_zero(denom) {
            return info;
        }

        let r = denom.recip();
        let tangent = r * (d[1][1] * e[0] - d[0][1] * e[1]);
        let bi_tangent = r * (d[0][0] * e[1] - d[1][0] * e[0]);

        if tangent.is_finite() && bi_tangent.is_finite() {
            info.tangent = tangent;
            info.bi_tangent = bi_tangent;
            info.is_degenerate = false;
        }

        info
    }

    /// Determines which way the texture mapping is oriented at a corner with
    /// the (unit) normal `n`.
    /// `true` indicates a right-handed tangent frame.
    pub(super) fn handedness(&self, n: Vec3<O>) -> bool {
        let h = self.tangent.cross(self.bi_tangent).dot(n);
        if not_zero(h) && h.is_finite() {
            h > 0.
        } else {
            self.orientation_preserving
        }
    }
}

/// Computes the raw tangent space of every triangle in `mesh`.
pub(super) fn compute_faces<O: Ops>(mesh: &Mesh<'_>) -> alloc::vec::Vec<FaceTangent<O>> {
    #[cfg(feature = "rayon")]
    {
        use rayon::prelude::*;

        (0..mesh.triangle_count())
            .into_par_iter()
            .map(|face| FaceTangent::compute(mesh, face))
            .collect()
    }

    #[cfg(not(feature = "rayon"))]
    {
        (0..mesh.triangle_count())
            .map(|face| FaceTangent::compute(mesh, face))
            .collect()
    }
}
