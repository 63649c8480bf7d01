//! Per-run timing metrics for the diagnostic pipeline.
//!
//! [`DiagnosticMetrics`] captures how long each stage took and how many
//! output cells came out non-finite, for profiling and for spotting
//! degenerate tracer distributions.

/// Timing and degeneracy metrics collected during one estimate.
///
/// All durations are in microseconds.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DiagnosticMetrics {
    /// Wall-clock time for the whole estimate.
    pub total_us: u64,
    /// Time spent computing the mean profile and level set.
    pub levels_us: u64,
    /// Time spent on spatial gradients and their squared magnitude.
    pub gradient_us: u64,
    /// Time spent building the contour statistics table.
    pub contour_us: u64,
    /// Time spent on area-coordinate derivatives and K_eff by level.
    pub derivative_us: u64,
    /// Time spent remapping from tracer levels to latitude.
    pub remap_us: u64,
    /// Number of NaN or infinite entries in the latitude-indexed output.
    pub non_finite_cells: usize,
}

impl DiagnosticMetrics {
    /// Per-stage timings as `(stage, microseconds)` pairs, in pipeline order.
    pub fn stages(&self) -> [(&'static str, u64); 5] {
        [
            ("levels", self.levels_us),
            ("gradient", self.gradient_us),
            ("contour", self.contour_us),
            ("derivative", self.derivative_us),
            ("remap", self.remap_us),
        ]
    }
}
