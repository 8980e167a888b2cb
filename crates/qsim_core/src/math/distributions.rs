//! Standard normal distribution functions.
//!
//! - `norm_cdf`: cumulative distribution function Φ
//! - `norm_pdf`: probability density function φ
//! - `norm_inv_cdf`: quantile function Φ⁻¹
//!
//! `norm_cdf` and `norm_pdf` are generic over `T: Float` so that they work for
//! both `f64` and `f32`. The quantile function is `f64` only.

use num_traits::Float;

/// 1 / sqrt(2 * pi)
const FRAC_1_SQRT_2PI: f64 = 0.398_942_280_401_432_7;

/// Complementary error function, Abramowitz and Stegun formula 7.1.26.
///
/// Maximum absolute error 1.5e-7.
#[inline]
fn erfc<T: Float>(x: T) -> T {
    let c = |v: f64| T::from(v).unwrap_or_else(T::zero);

    let z = x.abs();
    let t = T::one() / (T::one() + c(0.327_591_1) * z);
    let poly = c(0.254_829_592)
        + t * (c(-0.284_496_736)
            + t * (c(1.421_413_741) + t * (c(-1.453_152_027) + t * c(1.061_405_429))));
    let tail = t * poly * (-z * z).exp();

    if x < T::zero() {
        c(2.0) - tail
    } else {
        tail
    }
}

/// Standard normal cumulative distribution function.
///
/// Φ(x) = erfc(−x / √2) / 2, accurate to about 1e-7.
///
/// # Examples
/// ```
/// use qsim_core::math::distributions::norm_cdf;
///
/// assert!((norm_cdf(0.0_f64) - 0.5).abs() < 1e-7);
/// assert!(norm_cdf(-3.0_f64) < 0.01);
/// assert!(norm_cdf(3.0_f64) > 0.99);
/// ```
#[inline]
pub fn norm_cdf<T: Float>(x: T) -> T {
    let half = T::from(0.5).unwrap_or_else(T::zero);
    let sqrt_2 = T::from(std::f64::consts::SQRT_2).unwrap_or_else(T::one);
    half * erfc(-x / sqrt_2)
}

/// Standard normal probability density function.
///
/// φ(x) = exp(−x² / 2) / √(2π)
///
/// # Examples
/// ```
/// use qsim_core::math::distributions::norm_pdf;
///
/// assert!((norm_pdf(0.0_f64) - 0.398_942_280_4).abs() < 1e-9);
/// ```
#[inline]
pub fn norm_pdf<T: Float>(x: T) -> T {
    let k = T::from(FRAC_1_SQRT_2PI).unwrap_or_else(T::zero);
    let half = T::from(0.5).unwrap_or_else(T::zero);
    k * (-half * x * x).exp()
}

// Acklam's rational approximation coefficients.
const A: [f64; 6] = [
    -3.969_683_028_665_376e1,
    2.209_460_984_245_205e2,
    -2.759_285_104_469_687e2,
    1.383_577_518_672_69e2,
    -3.066_479_806_614_716e1,
    2.506_628_277_459_239,
];
const B: [f64; 5] = [
    -5.447_609_879_822_406e1,
    1.615_858_368_580_409e2,
    -1.556_989_798_598_866e2,
    6.680_131_188_771_972e1,
    -1.328_068_155_288_572e1,
];
const C: [f64; 6] = [
    -7.784_894_002_430_293e-3,
    -3.223_964_580_411_365e-1,
    -2.400_758_277_161_838,
    -2.549_732_539_343_734,
    4.374_664_141_464_968,
    2.938_163_982_698_783,
];
const D: [f64; 4] = [
    7.784_695_709_041_462e-3,
    3.224_671_290_700_398e-1,
    2.445_134_137_142_996,
    3.754_408_661_907_416,
];

/// Lower breakpoint between the tail and central regions.
const P_LOW: f64 = 0.024_25;

#[inline]
fn tail_ratio(q: f64) -> f64 {
    let num = ((((C[0] * q + C[1]) * q + C[2]) * q + C[3]) * q + C[4]) * q + C[5];
    let den = (((D[0] * q + D[1]) * q + D[2]) * q + D[3]) * q + 1.0;
    num / den
}

/// Inverse of the standard normal CDF (quantile function).
///
/// Uses Acklam's rational approximation with relative error below 1.2e-9
/// over the whole domain. Returns `-inf` at 0, `+inf` at 1 and `NaN` outside
/// [0, 1].
///
/// # Examples
/// ```
/// use qsim_core::math::distributions::norm_inv_cdf;
///
/// assert!(norm_inv_cdf(0.5).abs() < 1e-12);
/// assert!((norm_inv_cdf(0.95) - 1.644_853_626_951).abs() < 1e-8);
/// ```
pub fn norm_inv_cdf(p: f64) -> f64 {
    if p.is_nan() || !(0.0..=1.0).contains(&p) {
        return f64::NAN;
    }
    if p == 0.0 {
        return f64::NEG_INFINITY;
    }
    if p == 1.0 {
        return f64::INFINITY;
    }

    if p < P_LOW {
        tail_ratio((-2.0 * p.ln()).sqrt())
    } else if p <= 1.0 - P_LOW {
        let q = p - 0.5;
        let r = q * q;
        let num = ((((A[0] * r + A[1]) * r + A[2]) * r + A[3]) * r + A[4]) * r + A[5];
        let den = ((((B[0] * r + B[1]) * r + B[2]) * r + B[3]) * r + B[4]) * r + 1.0;
        q * num / den
    } else {
        -tail_ratio((-2.0 * (1.0 - p).ln()).sqrt())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_norm_cdf_reference_values() {
        assert_relative_eq!(norm_cdf(1.0_f64), 0.8413447460685429, epsilon = 1e-7);
        assert_relative_eq!(norm_cdf(-1.0_f64), 0.15865525393145707, epsilon = 1e-7);
        assert_relative_eq!(norm_cdf(2.0_f64), 0.9772498680518208, epsilon = 1e-7);
        assert_relative_eq!(norm_cdf(-2.0_f64), 0.022750131948179195, epsilon = 1e-7);
    }

    #[test]
    fn test_norm_cdf_symmetry() {
        for x in [-3.0, -1.5, -0.5, 0.0, 0.5, 1.5, 3.0] {
            assert_relative_eq!(norm_cdf(x) + norm_cdf(-x), 1.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_norm_cdf_bounds_and_monotonic() {
        let xs: Vec<f64> = (-100..=100).map(|i| i as f64 * 0.1).collect();
        for w in xs.windows(2) {
            let (a, b) = (norm_cdf(w[0]), norm_cdf(w[1]));
            assert!((0.0..=1.0).contains(&a));
            assert!(b >= a, "CDF not monotonic at x = {}", w[0]);
        }
    }

    #[test]
    fn test_norm_cdf_f32() {
        assert!((norm_cdf(0.0_f32) - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_norm_pdf_reference_values() {
        assert_relative_eq!(norm_pdf(0.0_f64), FRAC_1_SQRT_2PI, epsilon = 1e-12);
        assert_relative_eq!(norm_pdf(1.0_f64), 0.24197072451914337, epsilon = 1e-10);
        assert_relative_eq!(norm_pdf(-2.0_f64), 0.05399096651318806, epsilon = 1e-10);
    }

    #[test]
    fn test_norm_inv_cdf_known_quantiles() {
        assert_relative_eq!(norm_inv_cdf(0.05), -1.6448536269514729, epsilon = 1e-8);
        assert_relative_eq!(norm_inv_cdf(0.01), -2.3263478740408408, epsilon = 1e-8);
        assert_relative_eq!(norm_inv_cdf(0.975), 1.959963984540054, epsilon = 1e-8);
        assert_relative_eq!(norm_inv_cdf(0.001), -3.090232306167813, epsilon = 1e-7);
    }

    #[test]
    fn test_norm_inv_cdf_edges() {
        assert_eq!(norm_inv_cdf(0.0), f64::NEG_INFINITY);
        assert_eq!(norm_inv_cdf(1.0), f64::INFINITY);
        assert!(norm_inv_cdf(-0.1).is_nan());
        assert!(norm_inv_cdf(1.1).is_nan());
        assert!(norm_inv_cdf(f64::NAN).is_nan());
    }

    #[test]
    fn test_norm_inv_cdf_round_trip() {
        for i in 1..1000 {
            let p = i as f64 / 1000.0;
            // Bounded by the accuracy of norm_cdf, not of the inverse.
            assert!((norm_cdf(norm_inv_cdf(p)) - p).abs() < 5e-7, "p = {}", p);
        }
    }

    #[test]
    fn test_norm_inv_cdf_strictly_increasing() {
        let ps: Vec<f64> = (1..2000).map(|i| i as f64 / 2000.0).collect();
        for w in ps.windows(2) {
            assert!(norm_inv_cdf(w[1]) > norm_inv_cdf(w[0]));
        }
    }
}
