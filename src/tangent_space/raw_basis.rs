use crate::{Ops, math::Vec3};

/// Running sum of the raw tangent and bitangent contributions made to one group.
pub(super) struct RawBasis<O: Ops> {
    /// Sum of unnormalized tangents.
    pub(super) tangent: Vec3<O>,
    /// Sum of unnormalized bitangents.
    pub(super) bi_tangent: Vec3<O>,
    /// Number of contributions folded into the sums.
    pub(super) count: u32,
}

impl<O: Ops> Copy for RawBasis<O> {}

impl<O: Ops> Clone for RawBasis<O> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<O: Ops> RawBasis<O> {
    pub(super) const ZERO: Self = Self {
        tangent: Vec3::ZERO,
        bi_tangent: Vec3::ZERO,
        count: 0,
    };

    pub(super) fn accumulate(&mut self, tangent: Vec3<O>, bi_tangent: Vec3<O>) {
        self.tangent += tangent;
        self.bi_tangent += bi_tangent;
        self.count += 1;
    }

    /// Returns the mean tangent and bitangent, or [`None`] if nothing was
    /// accumulated.
    pub(super) fn average(self) -> Option<(Vec3<O>, Vec3<O>)> {
        if self.count == 0 {
            return None;
        }

        let count = self.count as f32;
        Some((self.tangent / count, self.bi_tangent / count))
    }
}
