#![no_main]

use libfuzzer_sys::fuzz_target;
use tangent_buffers::TangentConfig;
use tangent_buffers_fuzz::Geometry;

fuzz_target!(|value: Geometry| {
    value.check(&TangentConfig::default());
});
