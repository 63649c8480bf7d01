//! Mean seasonal cycle.

use effdiff_core::{ConfigError, DiffusivityField};
use ndarray::{Array2, ArrayView1, ArrayView2, Axis, Slice};
use tracing::debug;

use crate::calendar::Calendar;

/// Diffusivity averaged across years at each week of the year,
/// `(weeks_per_year, latitudes)`.
#[derive(Clone, Debug, PartialEq)]
pub struct WeeklyComposite {
    values: Array2<f64>,
}

impl WeeklyComposite {
    /// The whole composite.
    pub fn view(&self) -> ArrayView2<'_, f64> {
        self.values.view()
    }

    /// Profile for one week of the year.
    ///
    /// # Panics
    ///
    /// Panics if `week` is out of range.
    pub fn week(&self, week: usize) -> ArrayView1<'_, f64> {
        self.values.row(week)
    }

    /// Number of weeks (rows).
    pub fn weeks(&self) -> usize {
        self.values.len_of(Axis(0))
    }

    /// Consume and return the array.
    pub fn into_array(self) -> Array2<f64> {
        self.values
    }
}

impl Calendar {
    /// Running sum of every year's weekly block, divided by the year count.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::SeriesTooShort`] if the field does not cover
    /// the calendar.
    pub fn weekly_composite(&self, field: &DiffusivityField) -> Result<WeeklyComposite, ConfigError> {
        self.check(field.time_steps())?;
        let data = field.view();
        let mut values = Array2::zeros((self.weeks_per_year(), field.latitudes()));
        for year in 0..self.year_count() {
            values += &data.slice_axis(Axis(0), Slice::from(self.year_steps(year)));
        }
        let years = self.year_count() as f64;
        values.mapv_inplace(|v| v / years);

        debug!(
            years = self.year_count(),
            weeks_per_year = self.weeks_per_year(),
            "weekly composite computed"
        );
        Ok(WeeklyComposite { values })
    }
}

/// Mean seasonal cycle over `year_count` years of `weeks_per_year` steps,
/// after the one-step lead-in.
///
/// # Errors
///
/// Returns [`ConfigError`] for a malformed calendar or a series too short
/// to cover it.
pub fn compute_annual_composite(
    field: &DiffusivityField,
    weeks_per_year: usize,
    year_count: usize,
) -> Result<WeeklyComposite, ConfigError> {
    Calendar::new(weeks_per_year, year_count)?.weekly_composite(field)
}
