#![no_main]

use libfuzzer_sys::fuzz_target;
use tangent_buffers::TangentConfig;
use tangent_buffers_fuzz::Geometry;

fuzz_target!(|input: (Geometry, f32, f32, bool)| {
    let (value, angular_threshold, weld_tolerance, split_uv_seams) = input;
    let angular_threshold = angular_threshold % 180.;

    let config = TangentConfig::default()
        .with_smoothing_threshold(angular_threshold.to_radians().cos())
        .with_weld_tolerance(weld_tolerance.abs())
        .with_split_uv_seams(split_uv_seams);

    value.check(&config);
});
