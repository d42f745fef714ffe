use arbitrary::{Arbitrary, Unstructured};
use tangent_buffers::{AttributeView, TangentConfig, generate_tangents_with_config};

#[derive(Debug, Clone, Copy, Arbitrary)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub tex_coord: [f32; 2],
}

#[derive(Debug, Clone)]
pub struct Geometry {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl Geometry {
    pub fn validate(&mut self) -> Result<(), arbitrary::Error> {
        let Self { vertices, indices } = self;

        // Known failure: no vertices
        if vertices.is_empty() {
            return Err(arbitrary::Error::IncorrectFormat);
        }

        // Known failure: partial triangles
        indices.truncate(indices.len() - indices.len() % 3);

        // Known failure: indices out of range
        for index in indices.iter_mut() {
            *index %= vertices.len() as u32;
        }

        // Known failure: non-finite values
        if vertices
            .iter()
            .flat_map(|vertex| {
                vertex
                    .position
                    .iter()
                    .copied()
                    .chain(vertex.normal)
                    .chain(vertex.tex_coord)
            })
            .any(|v| !v.is_finite())
        {
            return Err(arbitrary::Error::IncorrectFormat);
        }

        Ok(())
    }

    /// Generates tangents twice, panicking if either result breaks an output
    /// invariant or the two differ.
    pub fn check(&self, config: &TangentConfig) {
        let generate = || {
            let positions = self.vertices.iter().map(|v| v.position).collect::<Vec<_>>();
            let normals = self.vertices.iter().map(|v| v.normal).collect::<Vec<_>>();
            let uvs = self.vertices.iter().map(|v| v.tex_coord).collect::<Vec<_>>();

            generate_tangents_with_config(
                self.vertices.len(),
                AttributeView::from_slice(&positions).unwrap(),
                AttributeView::from_slice(&normals).unwrap(),
                AttributeView::from_slice(&uvs).unwrap(),
                self.indices.as_slice().into(),
                config,
            )
            .expect("validated geometry must be accepted")
        };

        let tangents = generate();
        assert_eq!(tangents.len(), 4 * self.indices.len());

        for (corner, tangent) in tangents.chunks_exact(4).enumerate() {
            let [x, y, z, w] = [tangent[0], tangent[1], tangent[2], tangent[3]];
            let length = (x * x + y * y + z * z).sqrt();

            assert!(
                (length - 1.).abs() < 1e-4,
                "corner {corner}: tangent {tangent:?} is not unit length"
            );
            assert!(w == 1. || w == -1., "corner {corner}: sign {w}");
        }

        let again = generate();
        assert_eq!(
            tangents.iter().map(|v| v.to_bits()).collect::<Vec<_>>(),
            again.iter().map(|v| v.to_bits()).collect::<Vec<_>>(),
            "generation is not deterministic"
        );
    }
}

impl Arbitrary<'_> for Geometry {
    fn arbitrary(u: &mut Unstructured<'_>) -> Result<Self, arbitrary::Error> {
        let mut value = Self {
            vertices: Vec::<Vertex>::arbitrary(u)?,
            indices: Vec::<u32>::arbitrary(u)?,
        };

        value.validate()?;

        Ok(value)
    }
}
