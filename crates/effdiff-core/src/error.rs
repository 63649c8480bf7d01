//! Error types for the effective-diffusivity diagnostic.
//!
//! Structural problems are split by concern: [`ShapeError`] for arrays whose
//! dimensions cannot feed the pipeline, [`ConfigError`] for physical or
//! calendar parameters that are out of range. [`DiagnosticError`] wraps both
//! for the top-level entry points.
//!
//! Numerical degeneracy (division by a zero area increment) is deliberately
//! absent: it flows through the output arrays as non-finite values.

use std::error::Error;
use std::fmt;

/// Errors raised when array dimensions are inconsistent with the pipeline.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ShapeError {
    /// The tracer field has no time steps.
    TooFewTimeSteps,
    /// A spatial axis has fewer than the two cells a finite-difference
    /// stencil needs.
    TooFewCells {
        /// Axis name (`"y"` or `"x"`).
        axis: &'static str,
        /// Number of cells found along the axis.
        len: usize,
    },
    /// Two arrays that must be congruent have different shapes.
    ShapeMismatch {
        /// Which array was checked.
        what: &'static str,
        /// The shape required by the other operand.
        expected: Vec<usize>,
        /// The shape actually supplied.
        actual: Vec<usize>,
    },
    /// A tracer level set has fewer than two values.
    TooFewLevels {
        /// Number of levels supplied.
        count: usize,
    },
    /// Raw data could not be arranged into the requested shape.
    InvalidData {
        /// Description of the problem.
        reason: String,
    },
}

impl fmt::Display for ShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooFewTimeSteps => write!(f, "tracer field has no time steps"),
            Self::TooFewCells { axis, len } => {
                write!(f, "{axis} axis has {len} cells, need at least 2")
            }
            Self::ShapeMismatch {
                what,
                expected,
                actual,
            } => write!(f, "{what} has shape {actual:?}, expected {expected:?}"),
            Self::TooFewLevels { count } => {
                write!(f, "tracer level set has {count} values, need at least 2")
            }
            Self::InvalidData { reason } => write!(f, "invalid data: {reason}"),
        }
    }
}

impl Error for ShapeError {}

/// Errors raised when physical or temporal parameters are invalid.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// Grid spacing must be finite and strictly positive.
    InvalidSpacing {
        /// Spacing in x (metres).
        dx: f64,
        /// Spacing in y (metres).
        dy: f64,
    },
    /// The prescribed diffusivity must be finite and strictly positive.
    InvalidKappa {
        /// The rejected value.
        value: f64,
    },
    /// The minimum contour length must be finite and strictly positive.
    InvalidMinLength {
        /// The rejected value.
        value: f64,
    },
    /// A builder was finished without a required parameter.
    MissingParameter {
        /// Name of the missing parameter.
        name: &'static str,
    },
    /// The year/week decomposition itself is malformed.
    InvalidCalendar {
        /// Description of the problem.
        reason: String,
    },
    /// The series is shorter than the year/week decomposition needs.
    SeriesTooShort {
        /// Time steps the decomposition consumes.
        required: usize,
        /// Time steps available in the field.
        available: usize,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSpacing { dx, dy } => {
                write!(f, "grid spacing must be finite and positive, got dx={dx}, dy={dy}")
            }
            Self::InvalidKappa { value } => {
                write!(f, "kappa must be finite and positive, got {value}")
            }
            Self::InvalidMinLength { value } => {
                write!(f, "minimum contour length must be finite and positive, got {value}")
            }
            Self::MissingParameter { name } => write!(f, "{name} is required"),
            Self::InvalidCalendar { reason } => write!(f, "invalid calendar: {reason}"),
            Self::SeriesTooShort {
                required,
                available,
            } => write!(
                f,
                "calendar needs {required} time steps but the field has {available}"
            ),
        }
    }
}

impl Error for ConfigError {}

/// Any structural failure of the diagnostic entry points.
#[derive(Clone, Debug, PartialEq)]
pub enum DiagnosticError {
    /// Array dimensions are inconsistent.
    Shape(ShapeError),
    /// Parameters are out of range.
    Config(ConfigError),
}

impl fmt::Display for DiagnosticError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Shape(e) => write!(f, "shape: {e}"),
            Self::Config(e) => write!(f, "config: {e}"),
        }
    }
}

impl Error for DiagnosticError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Shape(e) => Some(e),
            Self::Config(e) => Some(e),
        }
    }
}

impl From<ShapeError> for DiagnosticError {
    fn from(e: ShapeError) -> Self {
        Self::Shape(e)
    }
}

impl From<ConfigError> for DiagnosticError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}
