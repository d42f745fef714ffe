//! Splits a bucket of corners sharing a vertex identity into [`Group`]s which
//! share one tangent space.
//!
//! Two non-degenerate corners of a bucket are compatible when:
//!
//! 1. their tangent frames have the same handedness, as a mirrored texture
//!    mapping requires a flipped bitangent,
//! 2. their texture coordinates match (if [`split_uv_seams`] is enabled), as
//!    each UV island is parameterized independently, and
//! 3. the normals of their triangles are within the smoothing threshold (if
//!    one is configured).
//!
//! Groups are the connected components of this relation, found with a
//! [`UnionFind`].
//!
//! [`split_uv_seams`]: crate::TangentConfig::split_uv_seams

use alloc::vec::Vec;

use crate::{
    Mesh, Ops, TangentConfig,
    math::Vec3,
    tangent_space::{
        TriangleCorner, bucket::Key, face::FaceTangent, raw_basis::RawBasis,
        union_find::UnionFind,
    },
};

/// A set of corners which will share a single tangent space.
pub(super) struct Group<O: Ops> {
    /// Contributing corners, in ascending order.
    pub(super) members: Vec<TriangleCorner>,
    /// Sum of the raw tangent spaces of every member's triangle.
    pub(super) raw: RawBasis<O>,
    /// Unit normal of each member, in the same order as `members`.
    pub(super) normals: Vec<Vec3<O>>,
    uv: Key<2>,
}

/// A corner of a degenerate triangle, which borrows a tangent space instead of
/// contributing to one.
pub(super) struct Inheritor<O: Ops> {
    pub(super) corner: TriangleCorner,
    /// Index of the [`Group`] to borrow from, if the bucket has any.
    pub(super) group: Option<usize>,
    /// Unit normal of this corner, used to build a fallback basis.
    pub(super) normal: Vec3<O>,
}

pub(super) struct Partition<O: Ops> {
    pub(super) groups: Vec<Group<O>>,
    pub(super) inheritors: Vec<Inheritor<O>>,
}

struct CornerInfo<O: Ops> {
    corner: TriangleCorner,
    normal: Vec3<O>,
    uv: Key<2>,
    handedness: bool,
    is_degenerate: bool,
}

/// Partitions the corners of one bucket, as produced by
/// [`build_buckets`](super::bucket::build_buckets).
pub(super) fn partition_bucket<O: Ops>(
    bucket: &[TriangleCorner],
    faces: &[FaceTangent<O>],
    mesh: &Mesh<'_>,
    config: &TangentConfig,
) -> Partition<O> {
    let infos = bucket
        .iter()
        .map(|&corner| {
            let face = &faces[corner.face()];

            // Prefer the supplied vertex normal, but a missing one shouldn't
            // discard a perfectly good triangle.
            let normal = Vec3::<O>::from(mesh.normal_at(corner.index())).normalized_or_zero();
            let normal = if normal.is_zero() { face.normal } else { normal };

            let uv = mesh.uv_at(corner.index());

            CornerInfo {
                corner,
                normal,
                uv: Key::new(uv, config.weld_tolerance),
                handedness: face.handedness(normal),
                is_degenerate: face.is_degenerate,
            }
        })
        .collect::<Vec<_>>();

    let mut sets = UnionFind::new(infos.len());

    // Handedness and texture coordinates are equivalence relations, so only
    // members of the same class can ever be joined.
    let mut classes = (0..infos.len())
        .filter(|&i| !infos[i].is_degenerate)
        .collect::<Vec<_>>();
    let class_key = |i: &usize| {
        let info = &infos[*i];
        let uv = config.split_uv_seams.then_some(info.uv);
        (info.handedness, uv)
    };
    classes.sort_by_key(class_key);

    for class in classes.chunk_by(|a, b| class_key(a) == class_key(b)) {
        let Some((&first, rest)) = class.split_first() else {
            continue;
        };

        match config.smoothing_threshold {
            None => {
                for &i in rest {
                    sets.union(first, i);
                }
            }
            Some(threshold) => {
                for (n, &a) in class.iter().enumerate() {
                    for &b in &class[n + 1..] {
                        let normal_a = faces[infos[a].corner.face()].normal;
                        let normal_b = faces[infos[b].corner.face()].normal;

                        if normal_a.dot(normal_b) > threshold {
                            sets.union(a, b);
                        }
                    }
                }
            }
        }
    }

    let mut groups = Vec::<Group<O>>::new();
    let mut group_of_root = alloc::vec![None; infos.len()];
    let mut inheritors = Vec::new();

    for (i, info) in infos.iter().enumerate() {
        if info.is_degenerate {
            continue;
        }

        let root = sets.find(i);
        let g = *group_of_root[root].get_or_insert_with(|| {
            groups.push(Group {
                members: Vec::new(),
                raw: RawBasis::ZERO,
                normals: Vec::new(),
                uv: info.uv,
            });
            groups.len() - 1
        });

        let face = &faces[info.corner.face()];
        let group = &mut groups[g];
        group.members.push(info.corner);
        group.normals.push(info.normal);
        group.raw.accumulate(face.tangent, face.bi_tangent);
    }

    for info in infos.iter().filter(|info| info.is_degenerate) {
        let matching_uv = config
            .split_uv_seams
            .then(|| groups.iter().position(|group| group.uv == info.uv))
            .flatten();

        inheritors.push(Inheritor {
            corner: info.corner,
            group: matching_uv.or((!groups.is_empty()).then_some(0)),
            normal: info.normal,
        });
    }

    Partition { groups, inheritors }
}
