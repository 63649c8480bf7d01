//! Estimator entry points and the metrics wrapper.

use effdiff_core::{GridSpacing, ShapeError, TracerField};
use effdiff_diagnostic::{ContourMethod, EffectiveDiffusivity};
use ndarray::ArrayView3;
use numpy::{IntoPyArray, PyArray1, PyArray2, PyReadonlyArray3};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyDict;

use crate::error::to_py_err;

/// Stage timings of one estimate, in microseconds.
#[pyclass(frozen)]
pub(crate) struct DiagnosticMetrics {
    inner: effdiff_diagnostic::DiagnosticMetrics,
}

#[pymethods]
impl DiagnosticMetrics {
    /// Wall-clock time for the whole estimate.
    #[getter]
    fn total_us(&self) -> u64 {
        self.inner.total_us
    }

    /// Number of NaN or infinite cells in the output.
    #[getter]
    fn non_finite_cells(&self) -> usize {
        self.inner.non_finite_cells
    }

    /// Per-stage timing: list of (stage, microseconds) tuples.
    #[getter]
    fn stage_us(&self) -> Vec<(&'static str, u64)> {
        self.inner.stages().to_vec()
    }

    /// Convert to a plain Python dict.
    fn to_dict<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyDict>> {
        let d = PyDict::new(py);
        d.set_item("total_us", self.inner.total_us)?;
        for (stage, us) in self.inner.stages() {
            d.set_item(format!("{stage}_us"), us)?;
        }
        d.set_item("non_finite_cells", self.inner.non_finite_cells)?;
        Ok(d)
    }

    fn __repr__(&self) -> String {
        format!(
            "DiagnosticMetrics(total={}us, contour={}us, non_finite={})",
            self.inner.total_us, self.inner.contour_us, self.inner.non_finite_cells,
        )
    }
}

fn contour_method_from_name(name: &str) -> Option<ContourMethod> {
    match name {
        "sorted" => Some(ContourMethod::Sorted),
        "masked" => Some(ContourMethod::Masked),
        _ => None,
    }
}

fn parse_method(method: &str) -> PyResult<ContourMethod> {
    contour_method_from_name(method).ok_or_else(|| {
        PyValueError::new_err(format!(
            "unknown contour method '{method}', expected 'sorted' or 'masked'"
        ))
    })
}

/// Copy a borrowed numpy view into an owned, validated tracer.
fn owned_tracer(view: ArrayView3<'_, f64>) -> Result<TracerField, ShapeError> {
    TracerField::new(view.to_owned())
}

fn build_estimator(
    dx: f64,
    dy: f64,
    kappa: f64,
    method: &str,
    min_length: Option<f64>,
    parallel: bool,
) -> PyResult<EffectiveDiffusivity> {
    let spacing = GridSpacing::new(dx, dy).map_err(to_py_err)?;
    let mut builder = EffectiveDiffusivity::builder()
        .spacing(spacing)
        .kappa(kappa)
        .contour_method(parse_method(method)?)
        .parallel(parallel);
    if let Some(lmin) = min_length {
        builder = builder.min_length(lmin);
    }
    builder.build().map_err(to_py_err)
}

/// Effective diffusivity `K(time, lat)` of a `(time, lat, lon)` tracer.
#[pyfunction]
#[pyo3(signature = (tracer, dx, dy, kappa=EffectiveDiffusivity::DEFAULT_KAPPA, method="sorted", min_length=None, parallel=true))]
pub(crate) fn effective_diffusivity<'py>(
    py: Python<'py>,
    tracer: PyReadonlyArray3<'py, f64>,
    dx: f64,
    dy: f64,
    kappa: f64,
    method: &str,
    min_length: Option<f64>,
    parallel: bool,
) -> PyResult<Bound<'py, PyArray2<f64>>> {
    let estimator = build_estimator(dx, dy, kappa, method, min_length, parallel)?;
    let tracer = owned_tracer(tracer.as_array()).map_err(to_py_err)?;
    let field = py
        .detach(|| estimator.estimate(&tracer))
        .map_err(to_py_err)?;
    Ok(field.into_array().into_pyarray(py))
}

/// Like [`effective_diffusivity`] but also returns the mean tracer profile,
/// the tracer levels and the stage metrics.
#[pyfunction]
#[pyo3(signature = (tracer, dx, dy, kappa=EffectiveDiffusivity::DEFAULT_KAPPA, method="sorted", min_length=None, parallel=true))]
#[allow(clippy::type_complexity)]
pub(crate) fn effective_diffusivity_detailed<'py>(
    py: Python<'py>,
    tracer: PyReadonlyArray3<'py, f64>,
    dx: f64,
    dy: f64,
    kappa: f64,
    method: &str,
    min_length: Option<f64>,
    parallel: bool,
) -> PyResult<(
    Bound<'py, PyArray2<f64>>,
    Bound<'py, PyArray1<f64>>,
    Bound<'py, PyArray1<f64>>,
    DiagnosticMetrics,
)> {
    let estimator = build_estimator(dx, dy, kappa, method, min_length, parallel)?;
    let tracer = owned_tracer(tracer.as_array()).map_err(to_py_err)?;
    let report = py
        .detach(|| estimator.estimate_detailed(&tracer))
        .map_err(to_py_err)?;
    let levels = report.levels.values().to_owned();
    Ok((
        report.field.into_array().into_pyarray(py),
        report.mean_profile.into_pyarray(py),
        levels.into_pyarray(py),
        DiagnosticMetrics {
            inner: report.metrics,
        },
    ))
}

/// `(dx, dy)` in metres for a regular grid at `latitude` with
/// `cells_per_degree` cells per degree.
#[pyfunction]
#[pyo3(signature = (latitude=GridSpacing::REFERENCE_LATITUDE, cells_per_degree=GridSpacing::REFERENCE_CELLS_PER_DEGREE))]
pub(crate) fn grid_spacing(latitude: f64, cells_per_degree: f64) -> PyResult<(f64, f64)> {
    let spacing =
        GridSpacing::from_reference_latitude(latitude, cells_per_degree).map_err(to_py_err)?;
    Ok((spacing.dx(), spacing.dy()))
}
