//! Year/week decomposition of a weekly time series.

use std::ops::Range;

use effdiff_core::ConfigError;

/// How time steps map onto years and weeks.
///
/// ```text
/// step 0                     lead-in, never aggregated
/// step 1 + y * W + w         year y, week w   (0 <= w < W)
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Calendar {
    weeks_per_year: usize,
    year_count: usize,
}

impl Calendar {
    /// Weekly steps per year in the reference series.
    pub const DEFAULT_WEEKS_PER_YEAR: usize = 52;

    /// Years in the reference series (1993-2014).
    pub const DEFAULT_YEAR_COUNT: usize = 21;

    /// Steps before the first full year.
    pub const LEAD_IN_STEPS: usize = 1;

    /// Create a calendar of `year_count` years of `weeks_per_year` steps.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidCalendar`] if either count is zero or
    /// the total step count overflows.
    pub fn new(weeks_per_year: usize, year_count: usize) -> Result<Self, ConfigError> {
        if weeks_per_year == 0 {
            return Err(ConfigError::InvalidCalendar {
                reason: "weeks_per_year must be at least 1".to_string(),
            });
        }
        if year_count == 0 {
            return Err(ConfigError::InvalidCalendar {
                reason: "year_count must be at least 1".to_string(),
            });
        }
        weeks_per_year
            .checked_mul(year_count)
            .and_then(|n| n.checked_add(Self::LEAD_IN_STEPS))
            .ok_or_else(|| ConfigError::InvalidCalendar {
                reason: format!("{year_count} years of {weeks_per_year} weeks overflows"),
            })?;
        Ok(Self {
            weeks_per_year,
            year_count,
        })
    }

    /// Weekly steps per year.
    pub fn weeks_per_year(&self) -> usize {
        self.weeks_per_year
    }

    /// Number of years.
    pub fn year_count(&self) -> usize {
        self.year_count
    }

    /// Time steps the decomposition consumes: `1 + year_count * weeks_per_year`.
    pub fn required_steps(&self) -> usize {
        Self::LEAD_IN_STEPS + self.year_count * self.weeks_per_year
    }

    /// Check that a series of `available` steps covers the calendar.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::SeriesTooShort`] otherwise.
    pub fn check(&self, available: usize) -> Result<(), ConfigError> {
        let required = self.required_steps();
        if available < required {
            return Err(ConfigError::SeriesTooShort {
                required,
                available,
            });
        }
        Ok(())
    }

    /// Time-step index of `week` in `year`.
    pub fn step_index(&self, year: usize, week: usize) -> usize {
        Self::LEAD_IN_STEPS + year * self.weeks_per_year + week
    }

    /// Time steps belonging to `year`.
    pub fn year_steps(&self, year: usize) -> Range<usize> {
        let start = self.step_index(year, 0);
        start..start + self.weeks_per_year
    }
}

impl Default for Calendar {
    fn default() -> Self {
        Self {
            weeks_per_year: Self::DEFAULT_WEEKS_PER_YEAR,
            year_count: Self::DEFAULT_YEAR_COUNT,
        }
    }
}
