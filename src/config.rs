/// Parameters controlling how triangle corners are grouped before averaging.
///
/// The [`Default`] configuration splits tangent spaces at mirrored and
/// discontinuous texture coordinates, but never at hard edges, relying on the
/// supplied vertex normals to already describe the intended smoothing.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct TangentConfig {
    /// Linear smoothing threshold, compared against the dot product of two face
    /// normals.
    /// Corners of faces whose normals have a dot product at or below this value
    /// receive separate tangent spaces.
    /// [`None`] disables the test.
    ///
    /// An angular threshold converts trivially using cosine:
    ///
    /// ```
    /// # use tangent_buffers::TangentConfig;
    /// let angular_threshold = 60_f32;
    /// let config = TangentConfig::default()
    ///     .with_smoothing_threshold(angular_threshold.to_radians().cos());
    /// ```
    pub smoothing_threshold: Option<f32>,
    /// Grid size used to compare positions, normals and texture coordinates.
    /// Values are snapped down onto a grid of this size before comparison.
    /// `0.0`, or any value which isn't positive and finite, compares values
    /// exactly.
    pub weld_tolerance: f32,
    /// Separates corners sharing a position and normal but not a texture
    /// coordinate, so each UV island is averaged independently.
    pub split_uv_seams: bool,
}

impl Default for TangentConfig {
    fn default() -> Self {
        Self {
            smoothing_threshold: None,
            weld_tolerance: 0.0,
            split_uv_seams: true,
        }
    }
}

impl TangentConfig {
    pub const fn with_smoothing_threshold(mut self, threshold: f32) -> Self {
        self.smoothing_threshold = Some(threshold);
        self
    }

    pub const fn with_weld_tolerance(mut self, tolerance: f32) -> Self {
        self.weld_tolerance = tolerance;
        self
    }

    pub const fn with_split_uv_seams(mut self, split_uv_seams: bool) -> Self {
        self.split_uv_seams = split_uv_seams;
        self
    }
}
