//! Synthetic fixtures for effdiff development.
//!
//! Tracer fields with known analytic behaviour (constant, linear ramp) and
//! seeded pseudo-random ones (noise, a meandering jet) for tests and
//! benchmarks, plus diffusivity fields with a known calendar structure for
//! the temporal aggregates.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::f64::consts::PI;

use effdiff_core::{DiffusivityField, TracerField};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// The same value at every cell.
pub fn constant_field(shape: (usize, usize, usize), value: f64) -> TracerField {
    TracerField::from_fn(shape, |_| value).expect("fixture shape must be at least (1, 2, 2)")
}

/// `p(t, y, x) = y`: one tracer unit per row, independent of x and time.
///
/// Integer-valued so that means, level spacing and `<=` thresholds are all
/// exact in floating point.
pub fn linear_ramp_y(shape: (usize, usize, usize)) -> TracerField {
    TracerField::from_fn(shape, |(_, y, _)| y as f64)
        .expect("fixture shape must be at least (1, 2, 2)")
}

/// Uniform noise in `[0, 1)`, deterministic in `seed`.
pub fn noise_field(shape: (usize, usize, usize), seed: u64) -> TracerField {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    TracerField::from_fn(shape, |_| rng.random::<f64>())
        .expect("fixture shape must be at least (1, 2, 2)")
}

/// A zonal jet front whose axis meanders in x and drifts in time.
///
/// ```text
/// axis(t, x) = H/2 + A * sin(2 pi k x / W + phase_t)
/// p(t, y, x) = 0.5 * (1 + tanh((y - axis) / width)) + eps * noise
/// ```
///
/// Tracer rises from ~0 south of the front to ~1 north of it, so the mean
/// profile is monotonic and the level set strictly increasing.
pub fn meandering_jet(shape: (usize, usize, usize), seed: u64) -> TracerField {
    let (t, h, w) = shape;
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let phases: Vec<f64> = (0..t).map(|_| rng.random::<f64>() * 2.0 * PI).collect();
    let amplitude = h as f64 / 6.0;
    let width = (h as f64 / 8.0).max(0.5);
    let wavenumber = 2.0;
    TracerField::from_fn(shape, |(ti, y, x)| {
        let axis = h as f64 / 2.0
            + amplitude * (2.0 * PI * wavenumber * x as f64 / w as f64 + phases[ti]).sin();
        let front = 0.5 * (1.0 + ((y as f64 - axis) / width).tanh());
        front + 1e-3 * rng.random::<f64>()
    })
    .expect("fixture shape must be at least (1, 2, 2)")
}

/// The same diffusivity at every time step and latitude.
pub fn constant_diffusivity(shape: (usize, usize), value: f64) -> DiffusivityField {
    DiffusivityField::from_fn(shape, |_| value).expect("fixture needs at least one time step")
}

/// Diffusivity that depends only on week-of-year: step `t` has the value
/// `pattern(week, latitude)` with `week = (t - 1) mod weeks_per_year`. Step 0
/// is the partial week before the first full year and gets `lead_in`.
pub fn weekly_periodic<F>(
    shape: (usize, usize),
    weeks_per_year: usize,
    lead_in: f64,
    mut pattern: F,
) -> DiffusivityField
where
    F: FnMut(usize, usize) -> f64,
{
    DiffusivityField::from_fn(shape, |(t, lat)| {
        if t == 0 {
            lead_in
        } else {
            pattern((t - 1) % weeks_per_year, lat)
        }
    })
    .expect("fixture needs at least one time step")
}
