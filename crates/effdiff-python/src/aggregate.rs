//! Temporal aggregates of a `(time, lat)` diffusivity series.

use effdiff_aggregate::Calendar;
use effdiff_core::{DiffusivityField, ShapeError};
use ndarray::ArrayView2;
use numpy::{IntoPyArray, PyArray1, PyArray2, PyReadonlyArray2};
use pyo3::prelude::*;

use crate::error::to_py_err;

fn field_and_calendar(
    field: PyReadonlyArray2<'_, f64>,
    weeks_per_year: usize,
    year_count: usize,
) -> PyResult<(DiffusivityField, Calendar)> {
    let calendar = Calendar::new(weeks_per_year, year_count).map_err(to_py_err)?;
    let field = owned_field(field.as_array()).map_err(to_py_err)?;
    Ok((field, calendar))
}

/// Copy a borrowed numpy view into an owned diffusivity series.
fn owned_field(view: ArrayView2<'_, f64>) -> Result<DiffusivityField, ShapeError> {
    DiffusivityField::new(view.to_owned())
}

/// Annual means `(years, lat)` and their population standard deviation
/// `(lat,)`. Step 0 is skipped as the lead-in.
#[pyfunction]
#[pyo3(signature = (field, weeks_per_year=Calendar::DEFAULT_WEEKS_PER_YEAR, year_count=Calendar::DEFAULT_YEAR_COUNT))]
pub(crate) fn annual_means<'py>(
    py: Python<'py>,
    field: PyReadonlyArray2<'py, f64>,
    weeks_per_year: usize,
    year_count: usize,
) -> PyResult<(Bound<'py, PyArray2<f64>>, Bound<'py, PyArray1<f64>>)> {
    let (field, calendar) = field_and_calendar(field, weeks_per_year, year_count)?;
    let stats = py
        .detach(|| calendar.annual_statistics(&field))
        .map_err(to_py_err)?;
    let (means, std_dev) = stats.into_parts();
    Ok((means.into_pyarray(py), std_dev.into_pyarray(py)))
}

/// Mean seasonal cycle `(weeks_per_year, lat)`.
#[pyfunction]
#[pyo3(signature = (field, weeks_per_year=Calendar::DEFAULT_WEEKS_PER_YEAR, year_count=Calendar::DEFAULT_YEAR_COUNT))]
pub(crate) fn annual_composite<'py>(
    py: Python<'py>,
    field: PyReadonlyArray2<'py, f64>,
    weeks_per_year: usize,
    year_count: usize,
) -> PyResult<Bound<'py, PyArray2<f64>>> {
    let (field, calendar) = field_and_calendar(field, weeks_per_year, year_count)?;
    let composite = py
        .detach(|| calendar.weekly_composite(&field))
        .map_err(to_py_err)?;
    Ok(composite.into_array().into_pyarray(py))
}
