//! Effective diffusivity from contour statistics.
//!
//! With `A` the area below a tracer level and `X` the integral of
//! `|grad p|^2` over that area, the Nakamura equivalent length is
//!
//! ```text
//! Le^2 = (dX/dA) / (dp/dA)^2
//! K    = kappa * Le^2 / Lmin^2
//! ```
//!
//! where `Lmin` is the length of the shortest contour spanning the domain
//! (the along-jet extent by default). The `d/dA` derivatives are ratios of
//! index-space finite differences, `gradient(q) / gradient(A)`, so a flat
//! stretch of `A` divides by zero. Those cells stay infinite or NaN in the
//! output: a degenerate tracer distribution is a property of the data, and
//! masking it would hide it.
//!
//! `K` is finally remapped from tracer levels onto latitude rows by linear
//! interpolation, querying the reversed mean tracer profile against the
//! level values.

use std::time::{Duration, Instant};

use effdiff_core::numerics::{gradient, interp_into};
use effdiff_core::{
    ConfigError, DiagnosticError, DiffusivityField, GridSpacing, ShapeError, TracerField,
};
use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis, Zip};
use tracing::{debug, info, warn};

use crate::contour::{compute_contour_statistics, ContourMethod, ContourStatisticsTable};
use crate::gradient::compute_gradients;
use crate::levels::TracerLevelSet;
use crate::metrics::DiagnosticMetrics;

/// Level-indexed results: equivalent length squared and diffusivity,
/// both `(time_steps, levels)`.
#[derive(Clone, Debug, PartialEq)]
pub struct LevelDiffusivity {
    /// `Le^2` in m^2.
    pub equivalent_length_sq: Array2<f64>,
    /// `K_eff` in m^2/s.
    pub diffusivity: Array2<f64>,
}

/// Area-coordinate derivatives, equivalent length and `K_eff` for every
/// time step and level.
///
/// # Errors
///
/// Returns [`ShapeError::ShapeMismatch`] if the table was built for a
/// different number of levels.
pub fn diffusivity_by_level(
    table: &ContourStatisticsTable,
    levels: &TracerLevelSet,
    kappa: f64,
    min_length: f64,
) -> Result<LevelDiffusivity, ShapeError> {
    if table.levels() != levels.len() {
        return Err(ShapeError::ShapeMismatch {
            what: "contour statistics table",
            expected: vec![table.time_steps(), levels.len()],
            actual: vec![table.time_steps(), table.levels()],
        });
    }

    let shape = (table.time_steps(), levels.len());
    let mut equivalent_length_sq = Array2::zeros(shape);
    let mut diffusivity = Array2::zeros(shape);
    let dp = gradient(levels.values());
    let lmin_sq = min_length * min_length;

    Zip::from(table.area().axis_iter(Axis(0)))
        .and(table.grad_sq_integral().axis_iter(Axis(0)))
        .and(equivalent_length_sq.axis_iter_mut(Axis(0)))
        .and(diffusivity.axis_iter_mut(Axis(0)))
        .for_each(|area, integral, mut le2_row, mut k_row| {
            let da = gradient(area);
            let dx = gradient(integral);
            for n in 0..dp.len() {
                let dpda = dp[n] / da[n];
                let dxda = dx[n] / da[n];
                let le2 = dxda / (dpda * dpda);
                le2_row[n] = le2;
                k_row[n] = kappa * le2 / lmin_sq;
            }
        });

    Ok(LevelDiffusivity {
        equivalent_length_sq,
        diffusivity,
    })
}

/// Remap `(time, level)` values onto `(time, latitude)`.
///
/// For every time step the samples `(levels, by_level[t])` are interpolated
/// at the reversed `mean_profile`, one query per latitude row. Queries
/// outside the level range clamp to the end samples. A non-monotonic
/// profile is not rejected; the result then follows the bracketing search
/// of [`interp`](effdiff_core::numerics::interp).
///
/// # Errors
///
/// Returns [`ShapeError::ShapeMismatch`] if `by_level` does not have one
/// column per level.
pub fn remap_to_latitude(
    by_level: ArrayView2<'_, f64>,
    levels: &TracerLevelSet,
    mean_profile: ArrayView1<'_, f64>,
) -> Result<Array2<f64>, ShapeError> {
    let (t, n) = by_level.dim();
    if n != levels.len() {
        return Err(ShapeError::ShapeMismatch {
            what: "level-indexed diffusivity",
            expected: vec![t, levels.len()],
            actual: vec![t, n],
        });
    }

    let mut queries = mean_profile.view();
    queries.invert_axis(Axis(0));
    let xp = levels.values();
    let mut out = Array2::zeros((t, mean_profile.len()));
    for (fp, row) in by_level.axis_iter(Axis(0)).zip(out.axis_iter_mut(Axis(0))) {
        interp_into(queries, xp, fp, row);
    }
    Ok(out)
}

/// Everything produced while estimating, for inspection and plotting.
#[derive(Clone, Debug)]
pub struct EstimateReport {
    /// `K_eff(time, latitude)`: the primary output.
    pub field: DiffusivityField,
    /// Mean tracer per latitude row (time then x average).
    pub mean_profile: Array1<f64>,
    /// Tracer thresholds the contours were evaluated at.
    pub levels: TracerLevelSet,
    /// Area and gradient-squared integral below each level.
    pub contours: ContourStatisticsTable,
    /// `Le^2` and `K_eff` before the latitude remap.
    pub by_level: LevelDiffusivity,
    /// Stage timings.
    pub metrics: DiagnosticMetrics,
}

/// Configured effective-diffusivity estimator.
///
/// # Construction
///
/// ```
/// use effdiff_core::GridSpacing;
/// use effdiff_diagnostic::{ContourMethod, EffectiveDiffusivity};
///
/// let estimator = EffectiveDiffusivity::builder()
///     .spacing(GridSpacing::reference())
///     .kappa(100.0)
///     .contour_method(ContourMethod::Sorted)
///     .build()
///     .unwrap();
/// assert_eq!(estimator.kappa(), 100.0);
/// ```
#[derive(Clone, Debug)]
pub struct EffectiveDiffusivity {
    spacing: GridSpacing,
    kappa: f64,
    min_length: Option<f64>,
    contour_method: ContourMethod,
    parallel: bool,
}

/// Builder for [`EffectiveDiffusivity`].
///
/// Required: `spacing`. Defaults: `kappa` = 100 m^2/s, `Lmin` = along-jet
/// domain extent, sorted contour evaluation, parallel over time steps.
#[derive(Clone, Debug)]
pub struct EffectiveDiffusivityBuilder {
    spacing: Option<GridSpacing>,
    kappa: f64,
    min_length: Option<f64>,
    contour_method: ContourMethod,
    parallel: bool,
}

impl EffectiveDiffusivity {
    /// Prescribed model diffusivity of the reference deployment, m^2/s.
    pub const DEFAULT_KAPPA: f64 = 100.0;

    /// Create a new builder.
    pub fn builder() -> EffectiveDiffusivityBuilder {
        EffectiveDiffusivityBuilder {
            spacing: None,
            kappa: Self::DEFAULT_KAPPA,
            min_length: None,
            contour_method: ContourMethod::default(),
            parallel: true,
        }
    }

    /// Grid spacing.
    pub fn spacing(&self) -> GridSpacing {
        self.spacing
    }

    /// Prescribed diffusivity.
    pub fn kappa(&self) -> f64 {
        self.kappa
    }

    /// Minimum contour length for a field of the given width: the explicit
    /// override if one was set, else `cols * dx`.
    pub fn min_length(&self, cols: usize) -> f64 {
        self.min_length
            .unwrap_or_else(|| self.spacing.along_jet_extent(cols))
    }

    /// Estimate `K_eff(time, latitude)`.
    pub fn estimate(&self, tracer: &TracerField) -> Result<DiffusivityField, DiagnosticError> {
        Ok(self.estimate_detailed(tracer)?.field)
    }

    /// Estimate `K_eff(time, latitude)` and keep every intermediate product.
    pub fn estimate_detailed(&self, tracer: &TracerField) -> Result<EstimateReport, DiagnosticError> {
        let start = Instant::now();
        let (time_steps, rows, cols) = tracer.dim();
        let min_length = self.min_length(cols);
        info!(
            time_steps,
            rows,
            cols,
            kappa = self.kappa,
            min_length,
            method = ?self.contour_method,
            parallel = self.parallel,
            threads = if self.parallel { rayon::current_num_threads() } else { 1 },
            "effective diffusivity started"
        );
        let mut metrics = DiagnosticMetrics::default();

        let stage = Instant::now();
        let mean_profile = tracer.mean_profile();
        let levels = TracerLevelSet::from_profile(mean_profile.view(), rows)?;
        metrics.levels_us = elapsed_us(stage);
        if !levels.is_strictly_increasing() {
            warn!(
                low = levels.values()[0],
                high = levels.values()[levels.len() - 1],
                "tracer levels are not strictly increasing"
            );
        }

        let stage = Instant::now();
        let grad_sq = compute_gradients(tracer, self.spacing, self.parallel).squared_magnitude();
        metrics.gradient_us = elapsed_us(stage);
        debug!(elapsed_us = metrics.gradient_us, "gradients computed");

        let stage = Instant::now();
        let contours = compute_contour_statistics(
            tracer,
            grad_sq.view(),
            self.spacing,
            &levels,
            self.contour_method,
            self.parallel,
        )?;
        metrics.contour_us = elapsed_us(stage);
        debug!(
            elapsed_us = metrics.contour_us,
            levels = levels.len(),
            "contour statistics computed"
        );

        let stage = Instant::now();
        let by_level = diffusivity_by_level(&contours, &levels, self.kappa, min_length)?;
        metrics.derivative_us = elapsed_us(stage);
        debug!(elapsed_us = metrics.derivative_us, "area derivatives computed");

        let stage = Instant::now();
        let by_latitude = remap_to_latitude(by_level.diffusivity.view(), &levels, mean_profile.view())?;
        let field = DiffusivityField::new(by_latitude)?;
        metrics.remap_us = elapsed_us(stage);
        debug!(elapsed_us = metrics.remap_us, "remapped to latitude");

        metrics.non_finite_cells = field.non_finite_count();
        if metrics.non_finite_cells > 0 {
            warn!(
                non_finite = metrics.non_finite_cells,
                total = field.time_steps() * field.latitudes(),
                "effective diffusivity contains non-finite values"
            );
        }
        metrics.total_us = elapsed_us(start);
        info!(total_us = metrics.total_us, "effective diffusivity finished");

        Ok(EstimateReport {
            field,
            mean_profile,
            levels,
            contours,
            by_level,
            metrics,
        })
    }
}

fn elapsed_us(since: Instant) -> u64 {
    saturating_micros(since.elapsed())
}

fn saturating_micros(d: Duration) -> u64 {
    u64::try_from(d.as_micros()).unwrap_or(u64::MAX)
}

impl EffectiveDiffusivityBuilder {
    /// Set the grid spacing (required).
    pub fn spacing(mut self, spacing: GridSpacing) -> Self {
        self.spacing = Some(spacing);
        self
    }

    /// Set the prescribed diffusivity in m^2/s (default 100).
    pub fn kappa(mut self, kappa: f64) -> Self {
        self.kappa = kappa;
        self
    }

    /// Override the minimum contour length in metres (default: along-jet
    /// extent of the field).
    pub fn min_length(mut self, min_length: f64) -> Self {
        self.min_length = Some(min_length);
        self
    }

    /// Choose the contour evaluation strategy (default: sorted).
    pub fn contour_method(mut self, method: ContourMethod) -> Self {
        self.contour_method = method;
        self
    }

    /// Run time steps on the rayon pool (default: true).
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Build the estimator, validating all configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if:
    /// - `spacing` is not set
    /// - `kappa` is not finite and positive
    /// - an explicit `min_length` is not finite and positive
    pub fn build(self) -> Result<EffectiveDiffusivity, ConfigError> {
        let spacing = self
            .spacing
            .ok_or(ConfigError::MissingParameter { name: "spacing" })?;
        if !(self.kappa.is_finite() && self.kappa > 0.0) {
            return Err(ConfigError::InvalidKappa { value: self.kappa });
        }
        if let Some(value) = self.min_length {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::InvalidMinLength { value });
            }
        }
        Ok(EffectiveDiffusivity {
            spacing,
            kappa: self.kappa,
            min_length: self.min_length,
            contour_method: self.contour_method,
            parallel: self.parallel,
        })
    }
}

/// Effective diffusivity of `tracer` on a grid of `dx` by `dy` metres with
/// prescribed diffusivity `kappa`, using the default strategy.
///
/// # Errors
///
/// Returns [`DiagnosticError::Config`] for invalid spacing or `kappa`.
pub fn compute_effective_diffusivity(
    tracer: &TracerField,
    dx: f64,
    dy: f64,
    kappa: f64,
) -> Result<DiffusivityField, DiagnosticError> {
    let spacing = GridSpacing::new(dx, dy)?;
    EffectiveDiffusivity::builder()
        .spacing(spacing)
        .kappa(kappa)
        .build()?
        .estimate(tracer)
}
