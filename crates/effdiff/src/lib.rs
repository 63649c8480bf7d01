//! effdiff: Nakamura (1996) effective diffusivity of a passive tracer.
//!
//! This is the top-level facade crate that re-exports the public API from
//! the effdiff sub-crates. For most users, adding `effdiff` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use effdiff::prelude::*;
//!
//! // Nine weekly snapshots of a tracer rising one unit per latitude row.
//! let tracer = TracerField::from_fn((9, 6, 8), |(_, y, _)| y as f64).unwrap();
//!
//! let estimator = EffectiveDiffusivity::builder()
//!     .spacing(GridSpacing::reference())
//!     .kappa(100.0)
//!     .build()
//!     .unwrap();
//! let keff = estimator.estimate(&tracer).unwrap();
//! assert_eq!(keff.dim(), (9, 6));
//!
//! // One lead-in step, then two years of four weeks.
//! let calendar = Calendar::new(4, 2).unwrap();
//! let stats = calendar.annual_statistics(&keff).unwrap();
//! let seasonal = calendar.weekly_composite(&keff).unwrap();
//! assert_eq!(stats.means().dim(), (2, 6));
//! assert_eq!(seasonal.weeks(), 4);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `effdiff-core` | Field containers, grid spacing, errors, 1-D kernels |
//! | [`diagnostic`] | `effdiff-diagnostic` | Gradients, contour statistics, the estimator |
//! | [`aggregate`] | `effdiff-aggregate` | Calendar, annual statistics, weekly composite |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types (`effdiff-core`).
///
/// [`types::TracerField`] and [`types::DiffusivityField`] are the arrays
/// that flow through the pipeline; [`types::numerics`] holds the gradient,
/// `linspace` and interpolation kernels.
pub use effdiff_core as types;

/// The effective-diffusivity estimator (`effdiff-diagnostic`).
///
/// [`diagnostic::EffectiveDiffusivity`] runs the whole chain; the individual
/// stages are exposed for inspection and testing.
pub use effdiff_diagnostic as diagnostic;

/// Temporal aggregation of diffusivity series (`effdiff-aggregate`).
pub use effdiff_aggregate as aggregate;

/// Common imports for typical effdiff usage.
///
/// ```rust
/// use effdiff::prelude::*;
/// ```
pub mod prelude {
    // Fields and grid
    pub use effdiff_core::{DiffusivityField, GridSpacing, TracerField};

    // Errors
    pub use effdiff_core::{ConfigError, DiagnosticError, ShapeError};

    // Estimator
    pub use effdiff_diagnostic::{
        compute_effective_diffusivity, ContourMethod, DiagnosticMetrics, EffectiveDiffusivity,
        EstimateReport,
    };

    // Aggregation
    pub use effdiff_aggregate::{
        compute_annual_composite, compute_annual_means, AnnualStatistics, Calendar,
        WeeklyComposite,
    };
}
