//! Input and output arrays of the diagnostic.
//!
//! [`TracerField`] is the immutable `(time, y, x)` tracer concentration the
//! pipeline consumes; [`DiffusivityField`] is the `(time, latitude)` result
//! it produces. Both validate their shape once at construction so the
//! stages downstream can index without re-checking.

use ndarray::{Array1, Array2, Array3, ArrayView1, ArrayView2, ArrayView3, Axis};

use crate::error::ShapeError;

/// Tracer concentration indexed by `(time_step, y, x)`.
#[derive(Clone, Debug, PartialEq)]
pub struct TracerField {
    data: Array3<f64>,
}

impl TracerField {
    /// Wrap a `(time, y, x)` array.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError`] if there are no time steps or if either
    /// spatial axis has fewer than two cells.
    pub fn new(data: Array3<f64>) -> Result<Self, ShapeError> {
        let (t, h, w) = data.dim();
        if t == 0 {
            return Err(ShapeError::TooFewTimeSteps);
        }
        if h < 2 {
            return Err(ShapeError::TooFewCells { axis: "y", len: h });
        }
        if w < 2 {
            return Err(ShapeError::TooFewCells { axis: "x", len: w });
        }
        Ok(Self { data })
    }

    /// Build a field from row-major `(time, y, x)` values.
    pub fn from_shape_vec(
        shape: (usize, usize, usize),
        values: Vec<f64>,
    ) -> Result<Self, ShapeError> {
        let data = Array3::from_shape_vec(shape, values).map_err(|e| ShapeError::InvalidData {
            reason: e.to_string(),
        })?;
        Self::new(data)
    }

    /// Build a field by evaluating `f(t, y, x)` at every cell.
    pub fn from_fn<F>(shape: (usize, usize, usize), f: F) -> Result<Self, ShapeError>
    where
        F: FnMut((usize, usize, usize)) -> f64,
    {
        Self::new(Array3::from_shape_fn(shape, f))
    }

    /// `(time_steps, rows, cols)`.
    pub fn dim(&self) -> (usize, usize, usize) {
        self.data.dim()
    }

    /// Number of time steps.
    pub fn time_steps(&self) -> usize {
        self.data.len_of(Axis(0))
    }

    /// Number of cells along y (latitude rows).
    pub fn rows(&self) -> usize {
        self.data.len_of(Axis(1))
    }

    /// Number of cells along x (along-jet columns).
    pub fn cols(&self) -> usize {
        self.data.len_of(Axis(2))
    }

    /// The whole array.
    pub fn view(&self) -> ArrayView3<'_, f64> {
        self.data.view()
    }

    /// The 2-D slice at `time_step`.
    ///
    /// # Panics
    ///
    /// Panics if `time_step` is out of range.
    pub fn slice(&self, time_step: usize) -> ArrayView2<'_, f64> {
        self.data.index_axis(Axis(0), time_step)
    }

    /// Mean tracer value per y row, averaged first over time and then over x.
    ///
    /// This is the tracer-to-latitude mapping the diagnostic remaps onto.
    pub fn mean_profile(&self) -> Array1<f64> {
        let rows = self.rows();
        let time_mean = self
            .data
            .mean_axis(Axis(0))
            .unwrap_or_else(|| Array2::from_elem((rows, self.cols()), f64::NAN));
        time_mean
            .mean_axis(Axis(1))
            .unwrap_or_else(|| Array1::from_elem(rows, f64::NAN))
    }

    /// Consume the field and return the array.
    pub fn into_array(self) -> Array3<f64> {
        self.data
    }
}

/// Effective diffusivity indexed by `(time_step, latitude)`, in m^2/s.
#[derive(Clone, Debug, PartialEq)]
pub struct DiffusivityField {
    data: Array2<f64>,
}

impl DiffusivityField {
    /// Wrap a `(time, latitude)` array.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError::TooFewTimeSteps`] for an empty time axis.
    pub fn new(data: Array2<f64>) -> Result<Self, ShapeError> {
        if data.len_of(Axis(0)) == 0 {
            return Err(ShapeError::TooFewTimeSteps);
        }
        Ok(Self { data })
    }

    /// Build a field by evaluating `f(t, latitude)` at every entry.
    pub fn from_fn<F>(shape: (usize, usize), f: F) -> Result<Self, ShapeError>
    where
        F: FnMut((usize, usize)) -> f64,
    {
        Self::new(Array2::from_shape_fn(shape, f))
    }

    /// `(time_steps, latitudes)`.
    pub fn dim(&self) -> (usize, usize) {
        self.data.dim()
    }

    /// Number of time steps.
    pub fn time_steps(&self) -> usize {
        self.data.len_of(Axis(0))
    }

    /// Number of latitude rows.
    pub fn latitudes(&self) -> usize {
        self.data.len_of(Axis(1))
    }

    /// The whole array.
    pub fn view(&self) -> ArrayView2<'_, f64> {
        self.data.view()
    }

    /// Diffusivity profile at `time_step`.
    ///
    /// # Panics
    ///
    /// Panics if `time_step` is out of range.
    pub fn at(&self, time_step: usize) -> ArrayView1<'_, f64> {
        self.data.row(time_step)
    }

    /// Mean over all time steps at each latitude. Non-finite entries poison
    /// their latitude.
    pub fn time_mean(&self) -> Array1<f64> {
        let lats = self.latitudes();
        self.data
            .mean_axis(Axis(0))
            .unwrap_or_else(|| Array1::from_elem(lats, f64::NAN))
    }

    /// Number of entries that are NaN or infinite.
    pub fn non_finite_count(&self) -> usize {
        self.data.iter().filter(|v| !v.is_finite()).count()
    }

    /// Consume the field and return the array.
    pub fn into_array(self) -> Array2<f64> {
        self.data
    }
}
