//! Benchmark profiles for the effdiff workspace.
//!
//! - [`reference_profile`]: one year of weekly snapshots on the 88x223
//!   reference crop (~1M cells)
//! - [`stress_profile`]: the same year at twice the resolution in each
//!   direction (~4M cells)
//! - [`reference_estimator`]: the estimator configured as in the reference
//!   deployment
//! - [`reference_series`]: a 1137-step diffusivity series for the aggregates

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use effdiff_core::{DiffusivityField, GridSpacing, TracerField};
use effdiff_diagnostic::{ContourMethod, EffectiveDiffusivity};
use effdiff_test_utils::{meandering_jet, weekly_periodic};

/// Latitude rows of the reference crop.
pub const REFERENCE_ROWS: usize = 88;

/// Along-jet columns of the reference crop.
pub const REFERENCE_COLS: usize = 223;

/// Time steps in the reference diffusivity series.
pub const REFERENCE_SERIES_STEPS: usize = 1137;

/// One year (52 weekly steps) of a meandering jet on the reference crop.
pub fn reference_profile(seed: u64) -> TracerField {
    meandering_jet((52, REFERENCE_ROWS, REFERENCE_COLS), seed)
}

/// Same as [`reference_profile`] at twice the resolution in both directions.
pub fn stress_profile(seed: u64) -> TracerField {
    meandering_jet((52, 2 * REFERENCE_ROWS, 2 * REFERENCE_COLS), seed)
}

/// Estimator with the reference grid spacing and default `kappa`.
pub fn reference_estimator(method: ContourMethod, parallel: bool) -> EffectiveDiffusivity {
    EffectiveDiffusivity::builder()
        .spacing(GridSpacing::reference())
        .contour_method(method)
        .parallel(parallel)
        .build()
        .expect("reference configuration is valid")
}

/// A seasonal-cycle diffusivity series of the reference length and width.
pub fn reference_series() -> DiffusivityField {
    weekly_periodic(
        (REFERENCE_SERIES_STEPS, REFERENCE_ROWS),
        52,
        0.0,
        |week, lat| 2000.0 + 500.0 * (week as f64 / 52.0 * std::f64::consts::TAU).sin() + lat as f64,
    )
}
