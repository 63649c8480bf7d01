//! 1-D numerical kernels shared by the diagnostic stages.
//!
//! All kernels take [`ArrayView1`]s so they apply equally to contiguous rows
//! and strided columns of larger arrays.

use ndarray::{Array1, ArrayView1, ArrayViewMut1};

/// Finite-difference derivative of `values` with unit sample spacing,
/// written into `out`.
///
/// ```text
/// out[0]   = v[1] - v[0]
/// out[i]   = (v[i+1] - v[i-1]) / 2      0 < i < n-1
/// out[n-1] = v[n-1] - v[n-2]
/// ```
///
/// A single sample has zero derivative.
///
/// # Panics
///
/// Panics if `out` and `values` differ in length.
pub fn gradient_into(values: ArrayView1<'_, f64>, mut out: ArrayViewMut1<'_, f64>) {
    let n = values.len();
    assert_eq!(n, out.len(), "gradient output length mismatch");
    match n {
        0 => {}
        1 => out[0] = 0.0,
        _ => {
            out[0] = values[1] - values[0];
            out[n - 1] = values[n - 1] - values[n - 2];
            for i in 1..n - 1 {
                out[i] = (values[i + 1] - values[i - 1]) / 2.0;
            }
        }
    }
}

/// Allocating form of [`gradient_into`].
pub fn gradient(values: ArrayView1<'_, f64>) -> Array1<f64> {
    let mut out = Array1::zeros(values.len());
    gradient_into(values, out.view_mut());
    out
}

/// `count` evenly spaced values from `start` to `stop` inclusive.
///
/// Each value is `start + i * step`; the last one is pinned to `stop` so the
/// end point is exact regardless of rounding.
pub fn linspace(start: f64, stop: f64, count: usize) -> Array1<f64> {
    if count == 0 {
        return Array1::zeros(0);
    }
    if count == 1 {
        return Array1::from_elem(1, start);
    }
    let step = (stop - start) / (count - 1) as f64;
    let mut out = Array1::from_shape_fn(count, |i| start + i as f64 * step);
    out[count - 1] = stop;
    out
}

/// Piecewise-linear interpolation of the samples `(xp, fp)` at `x`.
///
/// `xp` must be ascending. Queries below `xp[0]` or above the last sample
/// clamp to the end values. An exact hit on a sample returns that sample.
/// When a non-finite neighbour turns the interpolant into NaN, the value is
/// recomputed from the right-hand sample, and equal neighbours return their
/// common value. A NaN query, or empty samples, give NaN.
///
/// On non-ascending `xp` the result is whatever the bracketing search finds;
/// nothing panics.
pub fn interp(x: f64, xp: ArrayView1<'_, f64>, fp: ArrayView1<'_, f64>) -> f64 {
    let n = xp.len().min(fp.len());
    if n == 0 || x.is_nan() {
        return f64::NAN;
    }
    if x < xp[0] {
        return fp[0];
    }
    if x > xp[n - 1] {
        return fp[n - 1];
    }

    // Largest j with xp[j] <= x.
    let (mut lo, mut hi) = (0usize, n);
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        if xp[mid] <= x {
            lo = mid + 1;
        } else {
            hi = mid;
        }
    }
    let j = lo.saturating_sub(1);

    if j == n - 1 || xp[j] == x {
        return fp[j];
    }

    let slope = (fp[j + 1] - fp[j]) / (xp[j + 1] - xp[j]);
    let mut value = slope * (x - xp[j]) + fp[j];
    if value.is_nan() {
        value = slope * (x - xp[j + 1]) + fp[j + 1];
        if value.is_nan() && fp[j] == fp[j + 1] {
            value = fp[j];
        }
    }
    value
}

/// Interpolate every query in `queries` against `(xp, fp)` into `out`.
///
/// # Panics
///
/// Panics if `out` and `queries` differ in length.
pub fn interp_into(
    queries: ArrayView1<'_, f64>,
    xp: ArrayView1<'_, f64>,
    fp: ArrayView1<'_, f64>,
    mut out: ArrayViewMut1<'_, f64>,
) {
    assert_eq!(queries.len(), out.len(), "interp output length mismatch");
    for (o, &x) in out.iter_mut().zip(queries.iter()) {
        *o = interp(x, xp, fp);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use proptest::prelude::*;

    #[test]
    fn gradient_matches_one_sided_edges_and_central_interior() {
        let v = array![1.0, 2.0, 4.0, 7.0, 11.0];
        let g = gradient(v.view());
        assert_eq!(g, array![1.0, 1.5, 2.5, 3.5, 4.0]);
    }

    #[test]
    fn gradient_of_two_points_is_their_difference() {
        let g = gradient(array![3.0, 5.0].view());
        assert_eq!(g, array![2.0, 2.0]);
    }

    #[test]
    fn gradient_of_single_point_is_zero() {
        assert_eq!(gradient(array![9.0].view()), array![0.0]);
    }

    #[test]
    fn gradient_on_strided_column() {
        let m = array![[0.0, 10.0], [1.0, 20.0], [2.0, 40.0]];
        let g = gradient(m.column(1));
        assert_eq!(g, array![10.0, 15.0, 20.0]);
    }

    #[test]
    fn linspace_pins_end_points() {
        let l = linspace(0.1, 0.7, 7);
        assert_eq!(l.len(), 7);
        assert_eq!(l[0], 0.1);
        assert_eq!(l[6], 0.7);
        assert!((l[3] - 0.4).abs() < 1e-15);
    }

    #[test]
    fn linspace_degenerate_counts() {
        assert_eq!(linspace(1.0, 2.0, 0).len(), 0);
        assert_eq!(linspace(1.0, 2.0, 1), array![1.0]);
        assert_eq!(linspace(3.0, 3.0, 4), array![3.0, 3.0, 3.0, 3.0]);
    }

    #[test]
    fn interp_clamps_outside_range() {
        let xp = array![0.0, 1.0, 2.0];
        let fp = array![10.0, 20.0, 40.0];
        assert_eq!(interp(-5.0, xp.view(), fp.view()), 10.0);
        assert_eq!(interp(5.0, xp.view(), fp.view()), 40.0);
        assert_eq!(interp(0.5, xp.view(), fp.view()), 15.0);
        assert_eq!(interp(1.5, xp.view(), fp.view()), 30.0);
        assert_eq!(interp(2.0, xp.view(), fp.view()), 40.0);
    }

    #[test]
    fn interp_exact_hit_ignores_non_finite_neighbour() {
        let xp = array![0.0, 1.0, 2.0];
        let fp = array![1.0, 2.0, f64::INFINITY];
        assert_eq!(interp(1.0, xp.view(), fp.view()), 2.0);
        assert_eq!(interp(1.5, xp.view(), fp.view()), f64::INFINITY);
    }

    #[test]
    fn interp_propagates_nan_between_samples() {
        let xp = array![0.0, 1.0];
        let fp = array![f64::NAN, 2.0];
        assert!(interp(0.5, xp.view(), fp.view()).is_nan());
        assert!(interp(f64::NAN, xp.view(), array![1.0, 2.0].view()).is_nan());
    }

    #[test]
    fn interp_equal_infinite_neighbours_return_infinity() {
        // slope = inf - inf = NaN; both retries are NaN, neighbours equal.
        let xp = array![0.0, 1.0];
        let fp = array![f64::INFINITY, f64::INFINITY];
        assert_eq!(interp(0.25, xp.view(), fp.view()), f64::INFINITY);
    }

    #[test]
    fn interp_repeated_sample_points_take_last() {
        let xp = array![3.0, 3.0, 3.0];
        let fp = array![1.0, 2.0, 5.0];
        assert_eq!(interp(3.0, xp.view(), fp.view()), 5.0);
    }

    #[test]
    fn interp_into_reversed_queries() {
        let xp = array![0.0, 1.0, 2.0];
        let fp = array![0.0, 10.0, 20.0];
        let q = array![2.0, 1.0, 0.0];
        let mut out = Array1::zeros(3);
        interp_into(q.view(), xp.view(), fp.view(), out.view_mut());
        assert_eq!(out, array![20.0, 10.0, 0.0]);
    }

    proptest! {
        #[test]
        fn gradient_of_affine_sequence_is_constant(
            a in -100.0f64..100.0,
            b in -100.0f64..100.0,
            n in 2usize..40,
        ) {
            let v = Array1::from_shape_fn(n, |i| a * i as f64 + b);
            let g = gradient(v.view());
            for &d in g.iter() {
                prop_assert!((d - a).abs() < 1e-9 * (1.0 + a.abs() + b.abs()));
            }
        }

        #[test]
        fn interp_stays_within_sample_bounds(
            x in -2.0f64..12.0,
            fp in proptest::collection::vec(-50.0f64..50.0, 11),
        ) {
            let xp = linspace(0.0, 10.0, 11);
            let fp = Array1::from(fp);
            let y = interp(x, xp.view(), fp.view());
            let lo = fp.iter().cloned().fold(f64::INFINITY, f64::min);
            let hi = fp.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
            prop_assert!(y >= lo - 1e-9 && y <= hi + 1e-9);
        }
    }
}
