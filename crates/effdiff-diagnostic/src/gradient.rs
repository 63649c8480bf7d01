//! Spatial tracer gradients.
//!
//! Each time step is differentiated independently: along every row for
//! dp/dx and along every column for dp/dy, with central differences in the
//! interior and one-sided differences on the boundary (see
//! [`gradient_into`]). The index-space result is then divided by the
//! physical cell size.
//!
//! ```text
//! dpdx[t, y, x] = (p[t, y, x+1] - p[t, y, x-1]) / 2 / dx     interior
//! dpdx[t, y, 0] = (p[t, y, 1] - p[t, y, 0]) / dx             west edge
//! ```

use effdiff_core::numerics::gradient_into;
use effdiff_core::{GridSpacing, TracerField};
use ndarray::{Array3, ArrayView2, ArrayView3, ArrayViewMut2, Axis, Zip};

/// dp/dx and dp/dy at every `(time, y, x)` cell, congruent with the tracer.
#[derive(Clone, Debug, PartialEq)]
pub struct GradientPair {
    dpdx: Array3<f64>,
    dpdy: Array3<f64>,
}

impl GradientPair {
    /// Along-jet component dp/dx.
    pub fn dpdx(&self) -> ArrayView3<'_, f64> {
        self.dpdx.view()
    }

    /// Cross-jet component dp/dy.
    pub fn dpdy(&self) -> ArrayView3<'_, f64> {
        self.dpdy.view()
    }

    /// `(time_steps, rows, cols)`.
    pub fn dim(&self) -> (usize, usize, usize) {
        self.dpdx.dim()
    }

    /// `(dp/dx)^2 + (dp/dy)^2` at every cell.
    pub fn squared_magnitude(&self) -> Array3<f64> {
        Zip::from(&self.dpdx)
            .and(&self.dpdy)
            .map_collect(|&gx, &gy| gx * gx + gy * gy)
    }
}

/// Differentiate one time step into the two output slices.
fn slice_gradient(
    slice: ArrayView2<'_, f64>,
    mut dpdx: ArrayViewMut2<'_, f64>,
    mut dpdy: ArrayViewMut2<'_, f64>,
    spacing: GridSpacing,
) {
    for (row, out) in slice.rows().into_iter().zip(dpdx.rows_mut()) {
        gradient_into(row, out);
    }
    for (col, out) in slice.columns().into_iter().zip(dpdy.columns_mut()) {
        gradient_into(col, out);
    }
    let (dx, dy) = (spacing.dx(), spacing.dy());
    dpdx.mapv_inplace(|v| v / dx);
    dpdy.mapv_inplace(|v| v / dy);
}

/// Compute the spatial gradient of every time step.
///
/// With `parallel` set, time steps are distributed over the rayon pool;
/// each worker owns a disjoint time slice of both outputs, so the result is
/// identical to the sequential path.
pub fn compute_gradients(tracer: &TracerField, spacing: GridSpacing, parallel: bool) -> GradientPair {
    let dim = tracer.dim();
    let mut dpdx = Array3::zeros(dim);
    let mut dpdy = Array3::zeros(dim);

    let input = tracer.view();
    let zip = Zip::from(input.axis_iter(Axis(0)))
        .and(dpdx.axis_iter_mut(Axis(0)))
        .and(dpdy.axis_iter_mut(Axis(0)));
    if parallel {
        zip.par_for_each(|slice, gx, gy| slice_gradient(slice, gx, gy, spacing));
    } else {
        zip.for_each(|slice, gx, gy| slice_gradient(slice, gx, gy, spacing));
    }

    GradientPair { dpdx, dpdy }
}

#[cfg(test)]
mod tests {
    use super::*;
    use effdiff_test_utils::{constant_field, linear_ramp_y};
    use proptest::prelude::*;

    fn unit_spacing() -> GridSpacing {
        GridSpacing::new(1.0, 1.0).unwrap()
    }

    #[test]
    fn uniform_field_has_exactly_zero_gradient() {
        let tracer = constant_field((3, 5, 6), 42.0);
        let g = compute_gradients(&tracer, GridSpacing::reference(), false);
        assert!(g.dpdx().iter().all(|&v| v == 0.0));
        assert!(g.dpdy().iter().all(|&v| v == 0.0));
        assert!(g.squared_magnitude().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn y_ramp_gradient_scaled_by_dy() {
        let tracer = linear_ramp_y((2, 4, 3));
        let spacing = GridSpacing::new(2.0, 5.0).unwrap();
        let g = compute_gradients(&tracer, spacing, false);
        // One tracer unit per row, including the one-sided edges.
        for &v in g.dpdy().iter() {
            assert!((v - 0.2).abs() < 1e-15, "dp/dy = {v}");
        }
        assert!(g.dpdx().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn x_gradient_uses_one_sided_edges() {
        // Row values 0, 10, 40 -> [10, 20, 30]
        let tracer = TracerField::from_fn((1, 2, 3), |(_, _, x)| [0.0, 10.0, 40.0][x]).unwrap();
        let g = compute_gradients(&tracer, GridSpacing::new(10.0, 1.0).unwrap(), false);
        let row = g.dpdx().index_axis(Axis(0), 0).row(1).to_vec();
        assert_eq!(row, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn output_shape_matches_input() {
        let tracer = constant_field((4, 3, 7), 1.0);
        let g = compute_gradients(&tracer, unit_spacing(), true);
        assert_eq!(g.dim(), (4, 3, 7));
        assert_eq!(g.squared_magnitude().dim(), (4, 3, 7));
    }

    proptest! {
        #[test]
        fn parallel_matches_sequential(
            t in 1usize..4,
            h in 2usize..7,
            w in 2usize..7,
            seed in 0u64..1000,
        ) {
            let tracer = effdiff_test_utils::noise_field((t, h, w), seed);
            let spacing = GridSpacing::new(3.0, 7.0).unwrap();
            let seq = compute_gradients(&tracer, spacing, false);
            let par = compute_gradients(&tracer, spacing, true);
            prop_assert_eq!(seq, par);
        }
    }
}
