#![no_main]

use arbitrary::{Arbitrary, Unstructured};
use libfuzzer_sys::fuzz_target;
use tangent_buffers::TangentConfig;
use tangent_buffers_fuzz::{Geometry, Vertex};

#[derive(Debug)]
struct OneTriangle(Geometry);

impl Arbitrary<'_> for OneTriangle {
    fn arbitrary(u: &mut Unstructured<'_>) -> Result<Self, arbitrary::Error> {
        let vertices = vec![
            Vertex::arbitrary(u)?,
            Vertex::arbitrary(u)?,
            Vertex::arbitrary(u)?,
        ];
        let mut value = Geometry {
            vertices,
            indices: vec![0, 1, 2],
        };

        value.validate()?;

        Ok(Self(value))
    }

    fn size_hint(depth: usize) -> (usize, Option<usize>) {
        let (min, max) = Vertex::size_hint(depth);
        (3 * min, max.map(|max| 3 * max))
    }
}

fuzz_target!(|value: OneTriangle| {
    let OneTriangle(value) = value;
    value.check(&TangentConfig::default());
});
