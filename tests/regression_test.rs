use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec3, Vec4};
use tangent_buffers::{
    AttributeView, ComponentType, GenerateTangentSpaceError, IndexBuffer, Mesh, TangentConfig,
    generate_tangent_spaces, generate_tangents, generate_tangents_with_config, write_tangents,
};

#[derive(Pod, Zeroable, Default, Debug, Clone, Copy)]
#[repr(C)]
struct Vertex {
    position: [f32; 3],
    normal: [f32; 3],
    texture_coords: [f32; 2],
    tangent: [f32; 4],
}

const STRIDE: usize = size_of::<Vertex>();

fn vertex(position: [f32; 3], normal: [f32; 3], texture_coords: [f32; 2]) -> Vertex {
    Vertex {
        position,
        normal,
        texture_coords,
        tangent: [0.; 4],
    }
}

/// Views the attributes of an interleaved vertex buffer and validates it
/// against `indices`.
fn interleaved<'a>(vertices: &'a [Vertex], indices: &'a [u32]) -> Mesh<'a> {
    let bytes: &[u8] = bytemuck::cast_slice(vertices);
    let count = vertices.len();

    Mesh::new(
        count,
        AttributeView::interleaved(bytes, 0, STRIDE, count, ComponentType::F32).unwrap(),
        AttributeView::interleaved(bytes, 12, STRIDE, count, ComponentType::F32).unwrap(),
        AttributeView::interleaved(bytes, 24, STRIDE, count, ComponentType::F32).unwrap(),
        indices.into(),
    )
    .unwrap()
}

fn generate(vertices: &[Vertex], indices: &[u32], config: &TangentConfig) -> Vec<Vec4> {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut output = vec![[0.; 4]; indices.len()];
    write_tangents(&interleaved(vertices, indices), config, &mut output).unwrap();
    output.into_iter().map(Vec4::from).collect()
}

fn assert_well_formed(tangents: &[Vec4]) {
    for (corner, tangent) in tangents.iter().enumerate() {
        assert!(
            (tangent.truncate().length() - 1.).abs() < 1e-5,
            "tangent {tangent} at corner {corner} is not unit length"
        );
        assert!(
            tangent.w == 1. || tangent.w == -1.,
            "sign {} at corner {corner}",
            tangent.w
        );
    }
}

/// A unit quad in the XY plane, mapped onto the whole texture.
fn quad() -> (Vec<Vertex>, Vec<u32>) {
    let n = [0., 0., 1.];
    let vertices = vec![
        vertex([0., 0., 0.], n, [0., 0.]),
        vertex([1., 0., 0.], n, [1., 0.]),
        vertex([1., 1., 0.], n, [1., 1.]),
        vertex([0., 1., 0.], n, [0., 1.]),
    ];

    (vertices, vec![0, 1, 2, 0, 2, 3])
}

#[test]
fn quad_tangents_follow_u() {
    let (vertices, indices) = quad();
    let tangents = generate(&vertices, &indices, &TangentConfig::default());

    assert_eq!(tangents, vec![Vec4::new(1., 0., 0., 1.); 6]);
}

#[test]
fn tangents_can_fill_a_vertex_buffer() {
    let (mut vertices, indices) = quad();
    let tangents = generate(&vertices, &indices, &TangentConfig::default());

    for (&index, tangent) in indices.iter().zip(&tangents) {
        vertices[index as usize].tangent = tangent.to_array();
    }

    assert!(vertices.iter().all(|v| v.tangent == [1., 0., 0., 1.]));
}

#[test]
fn mirrored_uvs_flip_the_sign() {
    // Two triangles sharing the edge from vertex 0 to 2, with the texture of
    // the left triangle mirrored across it.
    let n = [0., 0., 1.];
    let vertices = [
        vertex([0., 0., 0.], n, [0., 0.]),
        vertex([1., 0., 0.], n, [1., 0.]),
        vertex([0., 1., 0.], n, [0., 1.]),
        vertex([-1., 0., 0.], n, [1., 0.]),
    ];
    let indices = [0, 1, 2, 0, 2, 3];

    let tangents = generate(&vertices, &indices, &TangentConfig::default());
    assert_well_formed(&tangents);

    let right = Vec4::new(1., 0., 0., 1.);
    let left = Vec4::new(-1., 0., 0., -1.);
    assert_eq!(tangents, [right, right, right, left, left, left]);

    let spaces = generate_tangent_spaces(&interleaved(&vertices, &indices), &Default::default());
    assert!(spaces.iter().all(|space| space.bi_tangent() == [0., 1., 0.]));
    assert!(spaces[0].is_orientation_preserving());
    assert!(!spaces[3].is_orientation_preserving());
}

#[test]
fn shared_corners_receive_identical_tangents() {
    // A strip of four triangles bent along one edge, with continuous texture
    // coordinates and normals shared along the bend.
    let z = [0., 0., 1.];
    let bend = Vec3::new(0., -0.4, 1.).normalize().to_array();
    let slope = Vec3::new(0., -1., 1.).normalize().to_array();
    let vertices = [
        vertex([0., 0., 0.], z, [0., 0.]),
        vertex([1., 0., 0.], z, [1., 0.]),
        vertex([1., 1., 0.], bend, [1., 1.]),
        vertex([0., 1., 0.], bend, [0., 1.]),
        vertex([1., 2., 1.], slope, [1., 2.]),
        vertex([0., 2., 1.], slope, [0., 2.]),
    ];
    let indices = [0, 1, 2, 0, 2, 3, 3, 2, 4, 3, 4, 5];

    let tangents = generate(&vertices, &indices, &TangentConfig::default());
    assert_well_formed(&tangents);

    for (a, &va) in indices.iter().enumerate() {
        for (b, &vb) in indices.iter().enumerate() {
            if va == vb {
                assert_eq!(tangents[a], tangents[b], "corners {a} and {b}");
            }
        }
    }
}

#[test]
fn degenerate_uvs_fall_back_to_a_unit_tangent() {
    let n = [0., 0., 1.];
    let vertices = [
        vertex([0., 0., 0.], n, [0.5, 0.5]),
        vertex([1., 0., 0.], n, [0.5, 0.5]),
        vertex([0., 1., 0.], n, [0.5, 0.5]),
    ];
    let indices = [0, 1, 2];

    let tangents = generate(&vertices, &indices, &TangentConfig::default());
    assert_eq!(tangents, [Vec4::new(1., 0., 0., 1.); 3]);

    let spaces = generate_tangent_spaces(&interleaved(&vertices, &indices), &Default::default());
    assert!(spaces.iter().all(|space| space.is_fallback()));
}

#[test]
fn degenerate_triangles_inherit_from_neighbors() {
    let (mut vertices, mut indices) = quad();
    // A sliver hanging off vertex 0 with a collapsed texture mapping.
    vertices.push(vertex([0.5, -1., 0.], [0., 0., 1.], [0., 0.]));
    indices.extend([0, 4, 1]);

    let tangents = generate(&vertices, &indices, &TangentConfig::default());
    assert_well_formed(&tangents);

    // Vertices 0 and 1 borrow from the quad; vertex 4 has no neighbor at all.
    assert_eq!(&tangents[6..], &[Vec4::new(1., 0., 0., 1.); 3]);

    let spaces = generate_tangent_spaces(&interleaved(&vertices, &indices), &Default::default());
    assert!(!spaces[6].is_fallback());
    assert!(spaces[7].is_fallback());
    assert!(!spaces[8].is_fallback());
}

#[test]
fn smoothing_threshold_splits_hard_edges() {
    // Two triangles folded at a right angle along the edge from vertex 0 to 2.
    let n = Vec3::new(1., 0., 1.).normalize().to_array();
    let vertices = [
        vertex([0., 0., 0.], n, [0., 0.]),
        vertex([1., 0., 0.], n, [1., 0.]),
        vertex([0., 1., 0.], n, [0., 1.]),
        vertex([0., 0., 1.], n, [-1., 1.]),
    ];
    let indices = [0, 1, 2, 0, 2, 3];

    let smooth = generate(&vertices, &indices, &TangentConfig::default());
    assert_well_formed(&smooth);
    assert_eq!(smooth[0], smooth[3]);
    assert_eq!(smooth[2], smooth[4]);

    let config = TangentConfig::default().with_smoothing_threshold(0.5);
    let hard = generate(&vertices, &indices, &config);
    assert_well_formed(&hard);
    assert!(hard[0].abs_diff_eq(Vec4::new(0.5_f32.sqrt(), 0., -(0.5_f32.sqrt()), 1.), 1e-6));
    assert!(!hard[3].abs_diff_eq(hard[0], 1e-3));
}

#[test]
fn uv_seams_split_tangents() {
    // The second triangle lies on another UV island, rotated a quarter turn.
    // Vertices 4 and 5 duplicate the positions of vertices 0 and 2.
    let n = [0., 0., 1.];
    let vertices = [
        vertex([0., 0., 0.], n, [0., 0.]),
        vertex([1., 0., 0.], n, [1., 0.]),
        vertex([0., 1., 0.], n, [0., 1.]),
        vertex([-1., 0., 0.], n, [5., 1.]),
        vertex([0., 0., 0.], n, [5., 0.]),
        vertex([0., 1., 0.], n, [6., 0.]),
    ];
    let indices = [0, 1, 2, 4, 5, 3];

    let split = generate(&vertices, &indices, &TangentConfig::default());
    assert_well_formed(&split);
    assert_eq!(split[0], Vec4::new(1., 0., 0., 1.));
    assert_eq!(split[3], Vec4::new(0., 1., 0., 1.));

    let merged = generate(
        &vertices,
        &indices,
        &TangentConfig::default().with_split_uv_seams(false),
    );
    assert_well_formed(&merged);
    assert_eq!(merged[0], merged[3]);
}

#[test]
fn interleaved_and_planar_layouts_agree() {
    let (vertices, indices) = quad();
    let positions = vertices.iter().map(|v| v.position).collect::<Vec<_>>();
    let normals = vertices.iter().map(|v| v.normal).collect::<Vec<_>>();
    let uvs = vertices.iter().map(|v| v.texture_coords).collect::<Vec<_>>();

    let planar = generate_tangents(
        vertices.len(),
        AttributeView::from_slice(&positions).unwrap(),
        AttributeView::from_slice(&normals).unwrap(),
        AttributeView::from_slice(&uvs).unwrap(),
        IndexBuffer::from(indices.as_slice()),
    )
    .unwrap();

    let interleaved = generate(&vertices, &indices, &TangentConfig::default())
        .into_iter()
        .flat_map(|tangent| tangent.to_array())
        .collect::<Vec<_>>();

    assert_eq!(planar, interleaved);
}

#[test]
fn normalized_texture_coordinates_and_small_indices() {
    let (vertices, _) = quad();
    let positions = vertices.iter().map(|v| v.position).collect::<Vec<_>>();
    let normals = vertices.iter().map(|v| v.normal).collect::<Vec<_>>();
    let uvs: [[u16; 2]; 4] = [[0, 0], [u16::MAX, 0], [u16::MAX, u16::MAX], [0, u16::MAX]];
    let indices: [u8; 6] = [0, 1, 2, 0, 2, 3];

    let tangents = generate_tangents(
        4,
        AttributeView::from_slice(&positions).unwrap(),
        AttributeView::from_slice(&normals).unwrap(),
        AttributeView::new(bytemuck::cast_slice(&uvs), 4, ComponentType::U16Norm).unwrap(),
        IndexBuffer::from_bytes(&indices, ComponentType::U8Norm).unwrap(),
    )
    .unwrap();

    assert_eq!(tangents.len(), 24);
    for tangent in tangents.chunks_exact(4) {
        assert_eq!(tangent, [1., 0., 0., 1.]);
    }
}

#[test]
fn generation_is_idempotent() {
    let n = Vec3::new(0.3, -0.2, 0.9).normalize().to_array();
    let vertices = (0..16)
        .map(|i| {
            let (x, y) = ((i % 4) as f32, (i / 4) as f32);
            let uv = Vec2::new(x * 0.31 + y * 0.05, y * 0.27 - x * 0.02);
            vertex([x, y, (x * y).sin()], n, uv.to_array())
        })
        .collect::<Vec<_>>();
    let indices = (0..3)
        .flat_map(|y| (0..3).map(move |x| y * 4 + x))
        .flat_map(|i| [i, i + 1, i + 5, i, i + 5, i + 4])
        .collect::<Vec<u32>>();

    let config = TangentConfig::default().with_smoothing_threshold(0.2);
    let first = generate(&vertices, &indices, &config);
    let second = generate(&vertices, &indices, &config);
    assert_well_formed(&first);

    let bits = |tangents: &[Vec4]| {
        tangents
            .iter()
            .flat_map(|t| t.to_array().map(f32::to_bits))
            .collect::<Vec<_>>()
    };
    assert_eq!(bits(&first), bits(&second));
}

#[test]
fn invalid_buffers_are_rejected() {
    let (vertices, _) = quad();
    let positions = vertices.iter().map(|v| v.position).collect::<Vec<_>>();
    let normals = vertices.iter().map(|v| v.normal).collect::<Vec<_>>();
    let uvs = vertices.iter().map(|v| v.texture_coords).collect::<Vec<_>>();

    let attempt = |indices: &[u32]| {
        generate_tangents_with_config(
            4,
            AttributeView::from_slice(&positions).unwrap(),
            AttributeView::from_slice(&normals).unwrap(),
            AttributeView::from_slice(&uvs[..3]).unwrap(),
            indices.into(),
            &TangentConfig::default(),
        )
    };

    assert_eq!(
        attempt(&[0, 1, 2, 0]),
        Err(GenerateTangentSpaceError::DegenerateIndexList { length: 4 })
    );
    assert_eq!(
        attempt(&[0, 1, 3]),
        Err(GenerateTangentSpaceError::IndexOutOfRange {
            position: 2,
            index: 3,
            vertex_count: 3,
        })
    );
    assert_eq!(attempt(&[]), Ok(Vec::new()));

    let mesh = interleaved(&vertices, &[0, 1, 2]);
    let mut output = [[0.; 4]; 2];
    assert_eq!(
        write_tangents(&mesh, &TangentConfig::default(), &mut output),
        Err(GenerateTangentSpaceError::OutputLength {
            expected: 3,
            actual: 2,
        })
    );
    assert_eq!(output, [[0.; 4]; 2]);

    assert_eq!(
        ComponentType::from_code(5122),
        Err(GenerateTangentSpaceError::UnsupportedComponentType { code: 5122 })
    );
    assert!(matches!(
        IndexBuffer::from_bytes(&[0, 0, 0], ComponentType::U16Norm),
        Err(GenerateTangentSpaceError::MalformedBuffer { .. })
    ));
}

#[test]
fn welded_corners_keep_their_own_normals() {
    // Vertex 3 is welded onto vertex 0, but its normal leans towards X.
    let n = [0., 0., 1.];
    let leaning = [0.05, 0., 1.];
    let vertices = [
        vertex([0., 0., 0.], n, [0., 0.]),
        vertex([1., 0., 0.], n, [1., 0.]),
        vertex([0., 1., 0.], n, [0., 1.]),
        vertex([0., 0., 0.], leaning, [0., 0.]),
        vertex([0., -1., 0.], n, [0., -1.]),
        vertex([1., 0., 0.], n, [1., 0.]),
    ];
    let indices = [0, 1, 2, 3, 4, 5];

    let config = TangentConfig::default().with_weld_tolerance(0.5);
    let tangents = generate(&vertices, &indices, &config);
    assert_well_formed(&tangents);

    for (corner, (&index, tangent)) in indices.iter().zip(&tangents).enumerate() {
        let normal = Vec3::from(vertices[index as usize].normal).normalize();
        assert!(
            tangent.truncate().dot(normal).abs() < 1e-5,
            "tangent {tangent} at corner {corner} is not orthogonal to {normal}"
        );
        assert_eq!(tangent.w, 1.);
    }

    assert_eq!(tangents[0], Vec4::new(1., 0., 0., 1.));
    assert_ne!(tangents[3], tangents[0]);

    let spaces = generate_tangent_spaces(&interleaved(&vertices, &indices), &config);
    let leaning = Vec3::from(leaning).normalize();
    let bi_tangent = Vec3::from(spaces[3].bi_tangent());
    assert!((bi_tangent - leaning.cross(Vec3::from(spaces[3].tangent()))).length() < 1e-5);
}
