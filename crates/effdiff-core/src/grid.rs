//! Physical grid spacing.

use crate::error::ConfigError;

/// Length of one degree of longitude at the equator, in metres.
pub const METRES_PER_DEGREE_LON: f64 = 111_300.0;

/// Length of one degree of latitude, in metres.
pub const METRES_PER_DEGREE_LAT: f64 = 111_000.0;

/// Physical distance per grid cell along x and y, in metres.
///
/// Constant across the whole field: curvature is accounted for only through
/// the single reference latitude used to derive `dx`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridSpacing {
    dx: f64,
    dy: f64,
}

impl GridSpacing {
    /// Reference latitude of the Gulf Stream extension deployment (degrees north).
    pub const REFERENCE_LATITUDE: f64 = 40.0;

    /// Grid cells per degree in the reference deployment.
    pub const REFERENCE_CELLS_PER_DEGREE: f64 = 10.0;

    /// Create a spacing from explicit `dx` and `dy` in metres.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidSpacing`] if either value is not finite
    /// or not strictly positive.
    pub fn new(dx: f64, dy: f64) -> Result<Self, ConfigError> {
        if !(dx.is_finite() && dx > 0.0 && dy.is_finite() && dy > 0.0) {
            return Err(ConfigError::InvalidSpacing { dx, dy });
        }
        Ok(Self { dx, dy })
    }

    /// Derive the spacing of a regular latitude/longitude grid at
    /// `latitude_deg`, with `cells_per_degree` cells along each axis.
    ///
    /// ```text
    /// dx = 111.3 km * cos(latitude) / cells_per_degree
    /// dy = 111.0 km / cells_per_degree
    /// ```
    pub fn from_reference_latitude(
        latitude_deg: f64,
        cells_per_degree: f64,
    ) -> Result<Self, ConfigError> {
        let dx = METRES_PER_DEGREE_LON * latitude_deg.to_radians().cos() / cells_per_degree;
        let dy = METRES_PER_DEGREE_LAT / cells_per_degree;
        Self::new(dx, dy)
    }

    /// Spacing of the reference deployment: 1/10 degree cells at 40N.
    pub fn reference() -> Self {
        let dx = METRES_PER_DEGREE_LON * Self::REFERENCE_LATITUDE.to_radians().cos()
            / Self::REFERENCE_CELLS_PER_DEGREE;
        let dy = METRES_PER_DEGREE_LAT / Self::REFERENCE_CELLS_PER_DEGREE;
        Self { dx, dy }
    }

    /// Cell width along x, in metres.
    pub fn dx(&self) -> f64 {
        self.dx
    }

    /// Cell height along y, in metres.
    pub fn dy(&self) -> f64 {
        self.dy
    }

    /// Area of one cell, in square metres.
    pub fn cell_area(&self) -> f64 {
        self.dx * self.dy
    }

    /// Along-jet extent of a domain `cols` cells wide. This is the length of
    /// the shortest possible contour spanning the domain.
    pub fn along_jet_extent(&self, cols: usize) -> f64 {
        cols as f64 * self.dx
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_positive_and_non_finite() {
        assert!(GridSpacing::new(0.0, 1.0).is_err());
        assert!(GridSpacing::new(1.0, -2.0).is_err());
        assert!(GridSpacing::new(f64::NAN, 1.0).is_err());
        assert!(GridSpacing::new(1.0, f64::INFINITY).is_err());
        assert!(GridSpacing::new(1.0, 2.0).is_ok());
    }

    #[test]
    fn reference_matches_derivation() {
        let derived = GridSpacing::from_reference_latitude(40.0, 10.0).unwrap();
        let reference = GridSpacing::reference();
        assert!((derived.dx() - reference.dx()).abs() < 1e-9);
        assert!((derived.dy() - 11_100.0).abs() < 1e-9);
        // 11.13 km * cos(40deg) ~= 8.526 km
        assert!((reference.dx() - 8_526.0).abs() < 1.0, "dx = {}", reference.dx());
    }

    #[test]
    fn out_of_range_latitude_is_rejected() {
        // cos(100deg) < 0 gives a negative cell width.
        assert!(GridSpacing::from_reference_latitude(100.0, 10.0).is_err());
        assert!(GridSpacing::from_reference_latitude(40.0, 0.0).is_err());
    }

    #[test]
    fn extent_and_area() {
        let s = GridSpacing::new(2.0, 3.0).unwrap();
        assert_eq!(s.cell_area(), 6.0);
        assert_eq!(s.along_jet_extent(10), 20.0);
    }
}
