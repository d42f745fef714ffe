//! Provides [`build_buckets`]; a method to gather [`TriangleCorner`]s which
//! share a vertex identity.
//! This implementation is based on [`BTreeMap`] and provides good performance
//! characteristics and predicable behavior.
//! Corners are identified by their position and normal only; texture
//! coordinates are compared later, when buckets are split into groups.

use alloc::{collections::BTreeMap, vec::Vec};

use crate::{Mesh, TangentConfig, math::snap, tangent_space::TriangleCorner};

/// Groups every corner of `mesh` by its (snapped) position and normal.
///
/// Buckets are returned in key order, and the corners within a bucket are in
/// ascending order.
pub(super) fn build_buckets(mesh: &Mesh<'_>, config: &TangentConfig) -> Vec<Vec<TriangleCorner>> {
    let mut map = BTreeMap::<Key<6>, Vec<TriangleCorner>>::new();

    for corner in (0..mesh.corner_count()).map(TriangleCorner::from_index) {
        let p = mesh.position_at(corner.index());
        let n = mesh.normal_at(corner.index());
        let key = Key::new([p[0], p[1], p[2], n[0], n[1], n[2]], config.weld_tolerance);

        map.entry(key).or_default().push(corner);
    }

    map.into_values().collect()
}

/// Compares attribute values using [`f32::total_cmp`] for each component, after
/// snapping them onto a grid.
#[derive(Clone, Copy, Debug)]
pub(super) struct Key<const N: usize>([f32; N]);

impl<const N: usize> Key<N> {
    pub(super) fn new(values: [f32; N], tolerance: f32) -> Self {
        Self(values.map(|v| snap(v, tolerance)))
    }
}

impl<const N: usize> Ord for Key<N> {
    fn cmp(&self, other: &Self) -> core::cmp::Ordering {
        use core::cmp::Ordering::Equal;

        self.0
            .iter()
            .zip(other.0)
            .map(|(a, b)| a.total_cmp(&b))
            .find(|o| *o != Equal)
            .unwrap_or(Equal)
    }
}

// Defer to the `Ord` implementation to ensure `total_cmp` is used for all methods.

impl<const N: usize> Eq for Key<N> {}

impl<const N: usize> PartialOrd for Key<N> {
    fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<const N: usize> PartialEq for Key<N> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == core::cmp::Ordering::Equal
    }
}
