//! Python bindings for the effdiff workspace.
//!
//! The native extension is named `_effdiff`. Arrays cross the boundary as
//! `float64` numpy arrays; the heavy lifting runs with the GIL released.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

use pyo3::prelude::*;

mod aggregate;
mod diagnostic;
mod error;

/// The native `_effdiff` extension module.
#[pymodule]
fn _effdiff(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<diagnostic::DiagnosticMetrics>()?;

    m.add_function(wrap_pyfunction!(diagnostic::effective_diffusivity, m)?)?;
    m.add_function(wrap_pyfunction!(diagnostic::effective_diffusivity_detailed, m)?)?;
    m.add_function(wrap_pyfunction!(diagnostic::grid_spacing, m)?)?;
    m.add_function(wrap_pyfunction!(aggregate::annual_means, m)?)?;
    m.add_function(wrap_pyfunction!(aggregate::annual_composite, m)?)?;

    m.add("DEFAULT_KAPPA", effdiff_diagnostic::EffectiveDiffusivity::DEFAULT_KAPPA)?;
    m.add("DEFAULT_WEEKS_PER_YEAR", effdiff_aggregate::Calendar::DEFAULT_WEEKS_PER_YEAR)?;
    m.add("DEFAULT_YEAR_COUNT", effdiff_aggregate::Calendar::DEFAULT_YEAR_COUNT)?;
    Ok(())
}
