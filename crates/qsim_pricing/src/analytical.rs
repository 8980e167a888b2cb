//! Closed-form reference prices.
//!
//! Used to check Monte Carlo estimates; neither function simulates anything.

use qsim_core::math::norm_cdf;

use crate::bond::BondContract;
use crate::option::{OptionContract, OptionKind};

/// κ below which the Vasicek bond uses its κ → 0 limit.
const KAPPA_EPSILON: f64 = 1e-6;

/// Black-Scholes price of a European option.
///
/// ```text
/// C = S·N(d₁) − E·e^(−rT)·N(d₂)
/// P = E·e^(−rT)·N(−d₂) − S·N(−d₁)
/// ```
///
/// With zero volatility the price is the discounted intrinsic value of the
/// forward.
///
/// # Examples
/// ```
/// use qsim_pricing::{black_scholes_price, OptionContract, OptionKind};
///
/// let call = OptionContract::new(100.0, 100.0, 1.0, 0.05, 0.2, OptionKind::Call);
/// assert!((black_scholes_price(&call) - 10.4506).abs() < 1e-3);
/// ```
pub fn black_scholes_price(contract: &OptionContract) -> f64 {
    let OptionContract {
        spot,
        strike,
        maturity,
        rate,
        volatility,
        kind,
    } = *contract;
    let discounted_strike = strike * (-rate * maturity).exp();
    let vol_sqrt_t = volatility * maturity.sqrt();

    if vol_sqrt_t <= 0.0 {
        return kind.payoff(spot, discounted_strike);
    }

    let d1 =
        ((spot / strike).ln() + (rate + 0.5 * volatility * volatility) * maturity) / vol_sqrt_t;
    let d2 = d1 - vol_sqrt_t;

    match kind {
        OptionKind::Call => spot * norm_cdf(d1) - discounted_strike * norm_cdf(d2),
        OptionKind::Put => discounted_strike * norm_cdf(-d2) - spot * norm_cdf(-d1),
    }
}

/// Vasicek zero-coupon bond price.
///
/// ```text
/// B = (1 − e^(−κT)) / κ
/// A = exp((θ − σ²/(2κ²))(B − T) − σ²B²/(4κ))
/// P = F · A · e^(−B r0)
/// ```
///
/// For κ → 0 this becomes `F · exp(−r0 T + σ² T³ / 6)`.
pub fn vasicek_zero_coupon_price(contract: &BondContract) -> f64 {
    let BondContract {
        face,
        r0,
        kappa,
        theta,
        sigma,
        maturity: t,
    } = *contract;

    if kappa.abs() < KAPPA_EPSILON {
        return face * (-r0 * t + sigma * sigma * t.powi(3) / 6.0).exp();
    }

    let b = -(-kappa * t).exp_m1() / kappa;
    let log_a = (theta - sigma * sigma / (2.0 * kappa * kappa)) * (b - t)
        - sigma * sigma * b * b / (4.0 * kappa);
    face * (log_a - b * r0).exp()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_black_scholes_reference_values() {
        let call = OptionContract::new(100.0, 100.0, 1.0, 0.05, 0.2, OptionKind::Call);
        assert_relative_eq!(black_scholes_price(&call), 10.450_583_572, epsilon = 1e-4);
        let put = call.with_kind(OptionKind::Put);
        assert_relative_eq!(black_scholes_price(&put), 5.573_526_022, epsilon = 1e-4);
    }

    #[test]
    fn test_black_scholes_put_call_parity() {
        let call = OptionContract::new(95.0, 105.0, 0.75, 0.03, 0.35, OptionKind::Call);
        let put = call.with_kind(OptionKind::Put);
        let parity = 95.0 - 105.0 * (-0.03_f64 * 0.75).exp();
        assert_relative_eq!(
            black_scholes_price(&call) - black_scholes_price(&put),
            parity,
            epsilon = 1e-5
        );
    }

    #[test]
    fn test_black_scholes_zero_volatility() {
        let call = OptionContract::new(100.0, 90.0, 1.0, 0.05, 0.0, OptionKind::Call);
        assert_relative_eq!(
            black_scholes_price(&call),
            100.0 - 90.0 * (-0.05_f64).exp(),
            epsilon = 1e-12
        );
        assert_eq!(black_scholes_price(&call.with_kind(OptionKind::Put)), 0.0);
    }

    #[test]
    fn test_vasicek_deterministic_limit() {
        // σ = 0, r0 = θ: flat curve at r0.
        let bond = BondContract::new(1.0, 0.04, 0.7, 0.04, 0.0, 3.0);
        assert_relative_eq!(vasicek_zero_coupon_price(&bond), (-0.12_f64).exp(), epsilon = 1e-12);
    }

    #[test]
    fn test_vasicek_small_kappa_matches_limit() {
        let limit = BondContract::new(100.0, 0.03, 0.0, 0.05, 0.02, 5.0);
        let near = BondContract { kappa: 1e-4, ..limit };
        assert_relative_eq!(
            vasicek_zero_coupon_price(&near),
            vasicek_zero_coupon_price(&limit),
            max_relative = 1e-3
        );
    }

    #[test]
    fn test_vasicek_reference_value() {
        // B = (1 - e^-0.3) / 0.3
        let bond = BondContract::new(1_000.0, 0.1, 0.3, 0.3, 0.03, 1.0);
        let b = (1.0 - (-0.3_f64).exp()) / 0.3;
        let log_a = (0.3 - 0.0009 / 0.18) * (b - 1.0) - 0.0009 * b * b / 1.2;
        assert_relative_eq!(
            vasicek_zero_coupon_price(&bond),
            1_000.0 * (log_a - 0.1 * b).exp(),
            max_relative = 1e-12
        );
        assert!(vasicek_zero_coupon_price(&bond) < 1_000.0);
    }
}
