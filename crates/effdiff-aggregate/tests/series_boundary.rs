//! Integration test: the lead-in step and the exact series length.
//!
//! With 52 weeks and 2 years the decomposition consumes 1 + 2 * 52 = 105
//! steps. Step 0 must never influence any aggregate, step 104 must, and a
//! 104-step series must be rejected rather than silently truncated.

use effdiff_aggregate::{compute_annual_composite, compute_annual_means, Calendar};
use effdiff_core::{ConfigError, DiffusivityField};
use effdiff_test_utils::constant_diffusivity;
use ndarray::Array2;

fn field_with(steps: usize, overrides: &[(usize, f64)]) -> DiffusivityField {
    let mut data = Array2::from_elem((steps, 2), 4.0);
    for &(t, v) in overrides {
        data.row_mut(t).fill(v);
    }
    DiffusivityField::new(data).unwrap()
}

#[test]
fn exactly_105_steps_are_consumed() {
    let cal = Calendar::new(52, 2).unwrap();
    assert_eq!(cal.required_steps(), 105);

    let field = constant_diffusivity((105, 2), 4.0);
    assert!(compute_annual_means(&field, 52, 2).is_ok());
    assert!(compute_annual_composite(&field, 52, 2).is_ok());

    let short = constant_diffusivity((104, 2), 4.0);
    assert_eq!(
        compute_annual_means(&short, 52, 2).unwrap_err(),
        ConfigError::SeriesTooShort {
            required: 105,
            available: 104
        }
    );
    assert!(compute_annual_composite(&short, 52, 2).is_err());
}

#[test]
fn lead_in_step_is_ignored() {
    let field = field_with(105, &[(0, 1.0e9)]);
    let stats = compute_annual_means(&field, 52, 2).unwrap();
    assert!(stats.means().iter().all(|&m| m == 4.0));
    let composite = compute_annual_composite(&field, 52, 2).unwrap();
    assert!(composite.view().iter().all(|&m| m == 4.0));
}

#[test]
fn last_step_belongs_to_final_week_of_final_year() {
    let field = field_with(105, &[(104, 108.0)]);
    let stats = compute_annual_means(&field, 52, 2).unwrap();
    assert_eq!(stats.means()[[0, 0]], 4.0);
    // (51 * 4 + 108) / 52 = 6
    assert_eq!(stats.means()[[1, 0]], 6.0);

    let composite = compute_annual_composite(&field, 52, 2).unwrap();
    assert_eq!(composite.week(51)[0], 56.0);
    assert_eq!(composite.week(50)[0], 4.0);
}

#[test]
fn trailing_steps_are_ignored() {
    let field = field_with(120, &[(105, -1.0e9), (119, f64::NAN)]);
    let stats = compute_annual_means(&field, 52, 2).unwrap();
    assert!(stats.means().iter().all(|&m| m == 4.0));
    assert!(stats.std_dev().iter().all(|&s| s == 0.0));
}
