//! Annual means and inter-annual standard deviation.

use effdiff_core::{ConfigError, DiffusivityField, ShapeError};
use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis, Slice};
use tracing::debug;

use crate::calendar::Calendar;

/// Per-year means and their spread across years.
#[derive(Clone, Debug, PartialEq)]
pub struct AnnualStatistics {
    means: Array2<f64>,
    std_dev: Array1<f64>,
}

impl AnnualStatistics {
    /// Annual means, `(years, latitudes)`.
    pub fn means(&self) -> ArrayView2<'_, f64> {
        self.means.view()
    }

    /// Population standard deviation of the annual means (divisor = years),
    /// one value per latitude.
    pub fn std_dev(&self) -> ArrayView1<'_, f64> {
        self.std_dev.view()
    }

    /// `(centre - std_dev, centre + std_dev)` around a profile, usually the
    /// time mean of the field.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError::ShapeMismatch`] if `centre` does not have one
    /// value per latitude.
    pub fn envelope(
        &self,
        centre: ArrayView1<'_, f64>,
    ) -> Result<(Array1<f64>, Array1<f64>), ShapeError> {
        if centre.len() != self.std_dev.len() {
            return Err(ShapeError::ShapeMismatch {
                what: "envelope centre",
                expected: vec![self.std_dev.len()],
                actual: vec![centre.len()],
            });
        }
        Ok((&centre - &self.std_dev, &centre + &self.std_dev))
    }

    /// Consume and return `(means, std_dev)`.
    pub fn into_parts(self) -> (Array2<f64>, Array1<f64>) {
        (self.means, self.std_dev)
    }
}

impl Calendar {
    /// Annual means and inter-annual standard deviation of `field`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::SeriesTooShort`] if the field has fewer than
    /// [`required_steps`](Calendar::required_steps) time steps.
    pub fn annual_statistics(
        &self,
        field: &DiffusivityField,
    ) -> Result<AnnualStatistics, ConfigError> {
        self.check(field.time_steps())?;
        let lats = field.latitudes();
        let data = field.view();

        let mut means = Array2::zeros((self.year_count(), lats));
        for (year, mut row) in means.axis_iter_mut(Axis(0)).enumerate() {
            let steps = self.year_steps(year);
            let year_mean = data
                .slice_axis(Axis(0), Slice::from(steps))
                .mean_axis(Axis(0))
                .unwrap_or_else(|| Array1::from_elem(lats, f64::NAN));
            row.assign(&year_mean);
        }
        let std_dev = means.std_axis(Axis(0), 0.0);

        debug!(
            years = self.year_count(),
            weeks_per_year = self.weeks_per_year(),
            ignored_steps = field.time_steps() - self.required_steps(),
            "annual statistics computed"
        );
        Ok(AnnualStatistics { means, std_dev })
    }
}

/// Annual means over `year_count` years of `weeks_per_year` steps, after
/// the one-step lead-in, and their population standard deviation.
///
/// # Errors
///
/// Returns [`ConfigError`] for a malformed calendar or a series too short
/// to cover it.
pub fn compute_annual_means(
    field: &DiffusivityField,
    weeks_per_year: usize,
    year_count: usize,
) -> Result<AnnualStatistics, ConfigError> {
    Calendar::new(weeks_per_year, year_count)?.annual_statistics(field)
}

#[cfg(test)]
mod tests {
    use super::*;
    use effdiff_test_utils::constant_diffusivity;
    use ndarray::array;

    #[test]
    fn constant_field_has_constant_means_and_zero_spread() {
        let field = constant_diffusivity((1137, 4), 2500.0);
        let stats = compute_annual_means(&field, 52, 21).unwrap();
        assert_eq!(stats.means().dim(), (21, 4));
        assert!(stats.means().iter().all(|&m| m == 2500.0));
        assert!(stats.std_dev().iter().all(|&s| s == 0.0));
    }

    #[test]
    fn means_skip_lead_in_and_use_full_years() {
        // Step t has value t. Year 0 = steps 1..=3, year 1 = steps 4..=6.
        let field = DiffusivityField::from_fn((8, 1), |(t, _)| t as f64).unwrap();
        let stats = compute_annual_means(&field, 3, 2).unwrap();
        assert_eq!(stats.means().column(0).to_vec(), vec![2.0, 5.0]);
        // Population std of {2, 5} is 1.5.
        assert_eq!(stats.std_dev()[0], 1.5);
    }

    #[test]
    fn non_finite_values_poison_their_year() {
        let mut data = Array2::from_elem((7, 2), 1.0);
        data[[2, 1]] = f64::INFINITY;
        let field = DiffusivityField::new(data).unwrap();
        let stats = compute_annual_means(&field, 3, 2).unwrap();
        assert_eq!(stats.means()[[0, 0]], 1.0);
        assert_eq!(stats.means()[[0, 1]], f64::INFINITY);
        assert!(stats.std_dev()[1].is_nan());
        assert_eq!(stats.std_dev()[0], 0.0);
    }

    #[test]
    fn too_short_series_is_rejected() {
        let field = constant_diffusivity((100, 3), 1.0);
        let err = compute_annual_means(&field, 52, 2).unwrap_err();
        assert_eq!(
            err,
            ConfigError::SeriesTooShort {
                required: 105,
                available: 100
            }
        );
    }

    #[test]
    fn envelope_brackets_centre() {
        let field = DiffusivityField::from_fn((7, 2), |(t, lat)| (t * (lat + 1)) as f64).unwrap();
        let stats = compute_annual_means(&field, 3, 2).unwrap();
        let centre = array![10.0, 20.0];
        let (lo, hi) = stats.envelope(centre.view()).unwrap();
        // Means: lat0 {2, 5}, lat1 {4, 10} -> std 1.5, 3.0
        assert_eq!(lo, array![8.5, 17.0]);
        assert_eq!(hi, array![11.5, 23.0]);
        assert!(stats.envelope(array![1.0].view()).is_err());
    }
}
