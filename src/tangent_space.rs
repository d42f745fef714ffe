//! Tangent space generation over a validated [`Mesh`].
//!
//! The algorithm runs in three passes:
//!
//! 1. A raw tangent and bitangent are computed for every triangle.
//! 2. Corners are bucketed by vertex identity, and each bucket is split into
//!    groups whose raw tangents are summed and averaged. The average is then
//!    orthogonalized against the normal of every corner in the group.
//!    Buckets never share state, so they are processed independently.
//! 3. The basis of each group is scattered back to its corners in index order.

mod basis;
mod bucket;
mod corner;
mod face;
mod group;
mod raw_basis;
mod union_find;

use alloc::{vec, vec::Vec};

pub(crate) use self::corner::TriangleCorner;
use self::{
    basis::Basis,
    bucket::build_buckets,
    face::{FaceTangent, compute_faces},
    group::partition_bucket,
};
use crate::{GenerateTangentSpaceError, Mesh, Ops, TangentConfig, TangentSpace};

/// Writes one encoded tangent per corner of `mesh` into `output`.
pub(crate) fn write_tangents<O: Ops>(
    mesh: &Mesh<'_>,
    config: &TangentConfig,
    output: &mut [[f32; 4]],
) -> Result<(), GenerateTangentSpaceError> {
    if output.len() != mesh.corner_count() {
        log::debug!(
            "rejecting output buffer of {} elements for {} corners",
            output.len(),
            mesh.corner_count()
        );
        return Err(GenerateTangentSpaceError::OutputLength {
            expected: mesh.corner_count(),
            actual: output.len(),
        });
    }

    let tangent_spaces = generate_tangent_spaces::<O>(mesh, config);

    #[cfg(feature = "rayon")]
    {
        use rayon::prelude::*;

        output
            .par_iter_mut()
            .zip(tangent_spaces.par_iter())
            .for_each(|(output, tangent_space)| *output = tangent_space.tangent_encoded());
    }

    #[cfg(not(feature = "rayon"))]
    for (output, tangent_space) in output.iter_mut().zip(tangent_spaces.iter()) {
        *output = tangent_space.tangent_encoded();
    }

    Ok(())
}

/// Generates one [`TangentSpace`] per corner of `mesh`, in index order.
pub(crate) fn generate_tangent_spaces<O: Ops>(
    mesh: &Mesh<'_>,
    config: &TangentConfig,
) -> Vec<TangentSpace> {
    let faces = compute_faces::<O>(mesh);
    let buckets = build_buckets(mesh, config);

    #[cfg(feature = "rayon")]
    let resolved = {
        use rayon::prelude::*;

        buckets
            .par_iter()
            .map(|bucket| resolve_bucket(bucket, &faces, mesh, config))
            .collect::<Vec<_>>()
    };

    #[cfg(not(feature = "rayon"))]
    let resolved = buckets
        .iter()
        .map(|bucket| resolve_bucket(bucket, &faces, mesh, config))
        .collect::<Vec<_>>();

    let mut stats = Stats {
        degenerate_faces: faces.iter().filter(|face| face.is_degenerate).count(),
        buckets: buckets.len(),
        ..Stats::default()
    };

    // Every corner is a member of exactly one bucket.
    let mut tangent_spaces = vec![None; mesh.corner_count()];
    for (corners, bucket_stats) in resolved {
        stats.groups += bucket_stats.groups;
        stats.fallbacks += bucket_stats.fallbacks;

        for (corner, basis) in corners {
            tangent_spaces[corner.index()] = Some(TangentSpace::from(basis));
        }
    }

    log::debug!(
        "generated {} tangent spaces for {} triangles ({} degenerate) from {} buckets and {} groups, {} using a fallback basis",
        tangent_spaces.len(),
        mesh.triangle_count(),
        stats.degenerate_faces,
        stats.buckets,
        stats.groups,
        stats.fallbacks,
    );

    tangent_spaces
        .into_iter()
        .map(Option::unwrap_or_default)
        .collect()
}

#[derive(Default)]
struct Stats {
    degenerate_faces: usize,
    buckets: usize,
    groups: usize,
    fallbacks: usize,
}

/// Groups, averages and resolves every corner within a single bucket.
///
/// A group's averaged tangent is orthogonalized against the normal of each
/// corner separately, as a welded bucket may hold slightly different normals.
fn resolve_bucket<O: Ops>(
    bucket: &[TriangleCorner],
    faces: &[FaceTangent<O>],
    mesh: &Mesh<'_>,
    config: &TangentConfig,
) -> (Vec<(TriangleCorner, Basis<O>)>, Stats) {
    let partition = partition_bucket(bucket, faces, mesh, config);

    let mut stats = Stats {
        groups: partition.groups.len(),
        ..Stats::default()
    };

    let mut resolved = Vec::with_capacity(bucket.len());

    for group in &partition.groups {
        for (&corner, &normal) in group.members.iter().zip(&group.normals) {
            let basis = Basis::from_raw(group.raw, normal);

            if basis.is_fallback {
                log::trace!(
                    "corner {} of face {} has a tangent parallel to its normal",
                    corner.corner(),
                    corner.face(),
                );
                stats.fallbacks += 1;
            }

            resolved.push((corner, basis));
        }
    }

    for inheritor in partition.inheritors {
        let basis = match inheritor.group {
            Some(group) => {
                let group = &partition.groups[group];
                // A collapsed triangle without a vertex normal has no normal
                // of its own, so it borrows the group's.
                let normal = if inheritor.normal.is_zero() {
                    group.normals[0]
                } else {
                    inheritor.normal
                };

                Basis::from_raw(group.raw, normal)
            }
            None => {
                log::trace!(
                    "corner {} of face {} has no neighbor to inherit a tangent space from",
                    inheritor.corner.corner(),
                    inheritor.corner.face(),
                );
                Basis::fallback(inheritor.normal)
            }
        };

        if basis.is_fallback {
            stats.fallbacks += 1;
        }

        resolved.push((inheritor.corner, basis));
    }

    (resolved, stats)
}

impl<O: Ops> From<Basis<O>> for TangentSpace {
    fn from(basis: Basis<O>) -> Self {
        TangentSpace {
            tangent: basis.tangent.into(),
            bi_tangent: basis.bi_tangent().into(),
            is_orientation_preserving: basis.sign > 0.,
            is_fallback: basis.is_fallback,
        }
    }
}
