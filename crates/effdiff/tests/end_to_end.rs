//! Tracer series in, annual statistics and seasonal cycle out.

use effdiff::prelude::*;
use effdiff_test_utils::{linear_ramp_y, meandering_jet};

#[test]
fn ramp_series_aggregates_to_kappa() {
    let calendar = Calendar::new(4, 3).unwrap();
    let tracer = linear_ramp_y((calendar.required_steps(), 6, 8));
    let keff = EffectiveDiffusivity::builder()
        .spacing(GridSpacing::reference())
        .kappa(100.0)
        .build()
        .unwrap()
        .estimate(&tracer)
        .unwrap();

    let stats = calendar.annual_statistics(&keff).unwrap();
    for &m in stats.means().iter() {
        assert!((m - 100.0).abs() < 1e-7, "annual mean {m}");
    }
    for &s in stats.std_dev().iter() {
        assert!(s < 1e-7, "std {s}");
    }

    let centre = keff.time_mean();
    let (lo, hi) = stats.envelope(centre.view()).unwrap();
    assert!(lo.iter().zip(hi.iter()).all(|(l, h)| l <= h));

    let seasonal = calendar.weekly_composite(&keff).unwrap();
    assert_eq!(seasonal.weeks(), 4);
    for &v in seasonal.view().iter() {
        assert!((v - 100.0).abs() < 1e-7);
    }
}

#[test]
fn reference_calendar_runs_on_a_long_series() {
    let calendar = Calendar::default();
    let tracer = meandering_jet((calendar.required_steps() + 3, 8, 12), 2024);
    let keff = compute_effective_diffusivity(
        &tracer,
        GridSpacing::reference().dx(),
        GridSpacing::reference().dy(),
        EffectiveDiffusivity::DEFAULT_KAPPA,
    )
    .unwrap();
    assert_eq!(keff.dim(), (1096, 8));

    let stats = compute_annual_means(
        &keff,
        Calendar::DEFAULT_WEEKS_PER_YEAR,
        Calendar::DEFAULT_YEAR_COUNT,
    )
    .unwrap();
    assert_eq!(stats.means().dim(), (21, 8));
    let seasonal = compute_annual_composite(&keff, 52, 21).unwrap();
    assert_eq!(seasonal.view().dim(), (52, 8));
}

#[test]
fn short_series_surfaces_config_error() {
    let tracer = linear_ramp_y((10, 4, 4));
    let keff = compute_effective_diffusivity(&tracer, 1.0, 1.0, 100.0).unwrap();
    let err = compute_annual_means(&keff, 52, 21).unwrap_err();
    assert_eq!(
        err,
        ConfigError::SeriesTooShort {
            required: 1093,
            available: 10
        }
    );
    let wrapped: DiagnosticError = err.into();
    assert!(wrapped.to_string().starts_with("config:"));
}
