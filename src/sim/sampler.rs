//! Double-slit intensity law and rejection sampler
//!
//! The only genuine algorithm in the visualizer: acceptance-rejection
//! sampling of screen positions against `I(x) = cos^2(pi d x / (lambda L))`.

use std::f32::consts::PI;

use rand::Rng;

use super::state::SimParams;
use crate::consts::*;

/// Interference intensity at screen position `x`, in `[0, 1]`
#[inline]
pub fn intensity(x: f32, params: &SimParams) -> f32 {
    let phase = PI * params.slit_separation * x / (params.wavelength * SCREEN_DISTANCE);
    let c = phase.cos();
    c * c
}

/// Draw one screen position distributed according to the intensity law
///
/// Candidates are uniform on `[-X, X)`, accepted when a uniform
/// threshold in `[0, 1)` falls under `I(x)`. Returns None after
/// `MAX_SAMPLE_TRIES` rejections so a pathological parameter combination
/// cannot stall the UI thread; the caller skips that particle.
pub fn sample_position(params: &SimParams, rng: &mut impl Rng) -> Option<f32> {
    for _ in 0..MAX_SAMPLE_TRIES {
        let x = rng.random_range(-SCREEN_HALF_WIDTH..SCREEN_HALF_WIDTH);
        let threshold: f32 = rng.random();
        if threshold < intensity(x, params) {
            return Some(x);
        }
    }
    None
}

/// Evenly spaced `(x, I(x))` samples across `[-X, X]` for plotting
pub fn theoretical_curve(params: &SimParams) -> Vec<(f32, f32)> {
    (0..CURVE_SAMPLES)
        .map(|i| {
            let t = i as f32 / (CURVE_SAMPLES - 1) as f32;
            let x = crate::lerp(-SCREEN_HALF_WIDTH, SCREEN_HALF_WIDTH, t);
            (x, intensity(x, params))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Histogram;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn params(d: f32, lambda: f32) -> SimParams {
        SimParams {
            slit_separation: d,
            wavelength: lambda,
        }
    }

    #[test]
    fn test_intensity_maximum_at_integer_phase() {
        // d=1, lambda=0.1, L=10: d*x/(lambda*L) = x, integer at x=0, 1, 2
        let p = params(1.0, 0.1);
        assert!((intensity(0.0, &p) - 1.0).abs() < 1e-6);
        assert!((intensity(1.0, &p) - 1.0).abs() < 1e-5);
        assert!((intensity(2.0, &p) - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_intensity_zero_at_half_integer_phase() {
        let p = params(1.0, 0.1);
        assert!(intensity(0.5, &p) < 1e-5);
        assert!(intensity(1.5, &p) < 1e-5);
        assert!(intensity(-0.5, &p) < 1e-5);
    }

    #[test]
    fn test_curve_center_is_one_for_any_params() {
        for (d, lambda) in [(0.1, 0.05), (1.0, 0.5), (5.0, 2.0), (3.3, 0.07)] {
            let curve = theoretical_curve(&params(d, lambda));
            assert_eq!(curve.len(), CURVE_SAMPLES);
            // x=0 is not an exact sample point; check the analytic value
            assert!((intensity(0.0, &params(d, lambda)) - 1.0).abs() < 1e-6);
            assert!(curve.iter().all(|&(_, y)| (0.0..=1.0).contains(&y)));
            assert_eq!(curve[0].0, -SCREEN_HALF_WIDTH);
            assert_eq!(curve[CURVE_SAMPLES - 1].0, SCREEN_HALF_WIDTH);
        }
    }

    #[test]
    fn test_sampler_deterministic_for_seed() {
        let p = params(1.0, 0.5);
        let mut a = Pcg32::seed_from_u64(42);
        let mut b = Pcg32::seed_from_u64(42);
        for _ in 0..100 {
            assert_eq!(sample_position(&p, &mut a), sample_position(&p, &mut b));
        }
    }

    #[test]
    fn test_sampled_histogram_matches_curve() {
        // Chi-squared goodness of fit against the midpoint-normalized
        // intensity over the 100 standard bins. 50k draws, fixed seed;
        // expected statistic ~ dof = 99, threshold is generous.
        let p = params(1.0, 0.5);
        let mut rng = Pcg32::seed_from_u64(1234);
        let mut hist = Histogram::new(HISTOGRAM_BINS, SCREEN_HALF_WIDTH);

        let draws = 50_000;
        let mut recorded = 0u64;
        while recorded < draws {
            if let Some(x) = sample_position(&p, &mut rng) {
                hist.record(x);
                recorded += 1;
            }
        }

        let weights: Vec<f32> = hist.centers().iter().map(|&c| intensity(c, &p)).collect();
        let norm: f32 = weights.iter().sum();
        let mut chi2 = 0.0f64;
        let mut dof = 0u32;
        for (count, w) in hist.counts().iter().zip(&weights) {
            let expected = (w / norm) as f64 * draws as f64;
            if expected < 5.0 {
                continue;
            }
            let diff = *count as f64 - expected;
            chi2 += diff * diff / expected;
            dof += 1;
        }
        assert!(dof > 50, "too few usable bins: {dof}");
        assert!(chi2 < 2.5 * dof as f64, "chi2 {chi2} too large for dof {dof}");
    }

    proptest! {
        #[test]
        fn accepted_samples_stay_on_screen(
            d in SLIT_SEPARATION_MIN..SLIT_SEPARATION_MAX,
            lambda in WAVELENGTH_MIN..WAVELENGTH_MAX,
            seed in any::<u64>(),
        ) {
            let p = params(d, lambda);
            let mut rng = Pcg32::seed_from_u64(seed);
            if let Some(x) = sample_position(&p, &mut rng) {
                prop_assert!((-SCREEN_HALF_WIDTH..SCREEN_HALF_WIDTH).contains(&x));
                // an accepted sample can never sit on a zero of the law
                prop_assert!(intensity(x, &p) > 0.0);
            }
        }

        #[test]
        fn intensity_bounded(
            x in -SCREEN_HALF_WIDTH..SCREEN_HALF_WIDTH,
            d in SLIT_SEPARATION_MIN..SLIT_SEPARATION_MAX,
            lambda in WAVELENGTH_MIN..WAVELENGTH_MAX,
        ) {
            let i = intensity(x, &params(d, lambda));
            prop_assert!((0.0..=1.0).contains(&i));
        }
    }
}
