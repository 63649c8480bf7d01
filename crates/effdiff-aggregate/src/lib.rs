//! Temporal aggregates of a `(time, latitude)` diffusivity field.
//!
//! The series is decomposed by a [`Calendar`]: one lead-in step (the series
//! starts mid-week), then `year_count` years of `weeks_per_year` weekly
//! steps. Steps past `1 + year_count * weeks_per_year` are ignored.
//!
//! - [`compute_annual_means`]: per-year means and their population standard
//!   deviation across years
//! - [`compute_annual_composite`]: mean seasonal cycle, one row per week of
//!   the year

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod annual;
pub mod calendar;
pub mod composite;

pub use annual::{compute_annual_means, AnnualStatistics};
pub use calendar::Calendar;
pub use composite::{compute_annual_composite, WeeklyComposite};
