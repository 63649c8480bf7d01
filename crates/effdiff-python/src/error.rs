//! Rust error -> Python exception mapping.

use effdiff_core::{ConfigError, DiagnosticError, ShapeError};
use pyo3::exceptions::PyValueError;
use pyo3::PyErr;

/// Every effdiff error is the caller's fault (bad array or bad parameter),
/// so all of them surface as `ValueError`.
pub(crate) fn to_py_err(err: impl Into<DiagnosticError>) -> PyErr {
    PyValueError::new_err(error_message(&err.into()))
}

/// Full exception text: the error followed by a recovery hint.
fn error_message(err: &DiagnosticError) -> String {
    format!("effdiff error: {err}\n  Hint: {}", error_hint(err))
}

fn error_hint(err: &DiagnosticError) -> &'static str {
    match err {
        DiagnosticError::Shape(ShapeError::TooFewCells { .. }) => {
            "the tracer needs at least 2 latitude rows and 2 columns"
        }
        DiagnosticError::Shape(_) => "check the array shape is (time, lat, lon)",
        DiagnosticError::Config(ConfigError::SeriesTooShort { .. }) => {
            "the series must cover one lead-in step plus year_count * weeks_per_year steps"
        }
        DiagnosticError::Config(_) => "check the numeric parameters",
    }
}
