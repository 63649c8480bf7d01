//! Tracer threshold values.

use effdiff_core::numerics::linspace;
use effdiff_core::ShapeError;
use ndarray::{Array1, ArrayView1};

/// Ascending tracer thresholds at which contours are evaluated.
#[derive(Clone, Debug, PartialEq)]
pub struct TracerLevelSet {
    values: Array1<f64>,
}

impl TracerLevelSet {
    /// `count` evenly spaced levels spanning the range of `profile`.
    ///
    /// A NaN anywhere in the profile makes every level NaN. A constant
    /// profile yields `count` identical levels; the estimator then reports
    /// non-finite diffusivity rather than failing.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError::TooFewLevels`] if `count < 2`.
    pub fn from_profile(profile: ArrayView1<'_, f64>, count: usize) -> Result<Self, ShapeError> {
        if count < 2 {
            return Err(ShapeError::TooFewLevels { count });
        }
        let (lo, hi) = if profile.is_empty() || profile.iter().any(|v| v.is_nan()) {
            (f64::NAN, f64::NAN)
        } else {
            profile
                .iter()
                .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                    (lo.min(v), hi.max(v))
                })
        };
        Ok(Self {
            values: linspace(lo, hi, count),
        })
    }

    /// Use explicit threshold values. They should be ascending; the
    /// latitude remap is only meaningful if they are.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError::TooFewLevels`] for fewer than two values.
    pub fn from_values(values: Array1<f64>) -> Result<Self, ShapeError> {
        if values.len() < 2 {
            return Err(ShapeError::TooFewLevels {
                count: values.len(),
            });
        }
        Ok(Self { values })
    }

    /// Threshold values.
    pub fn values(&self) -> ArrayView1<'_, f64> {
        self.values.view()
    }

    /// Number of levels.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false: a level set holds at least two values.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Whether every level is strictly above its predecessor.
    pub fn is_strictly_increasing(&self) -> bool {
        self.values.windows(2).into_iter().all(|w| w[0] < w[1])
    }
}
