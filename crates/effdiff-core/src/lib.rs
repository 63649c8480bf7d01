//! Core types for the effdiff effective-diffusivity workspace.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! arrays that flow through the diagnostic ([`TracerField`],
//! [`DiffusivityField`]), the physical grid spacing ([`GridSpacing`]), the
//! error taxonomy, and the 1-D numerical kernels shared by every stage.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod field;
pub mod grid;
pub mod numerics;

pub use error::{ConfigError, DiagnosticError, ShapeError};
pub use field::{DiffusivityField, TracerField};
pub use grid::GridSpacing;
