//! # qsim_pricing: Monte Carlo Pricing (Layer 3)
//!
//! ## Layer 3 Role
//!
//! qsim_pricing turns simulated paths into present values:
//! - European calls and puts from exact GBM terminal values (`option`)
//! - Zero-coupon bonds from Vasicek short-rate paths (`bond`)
//! - Closed-form references for both (`analytical`)
//!
//! Every estimator draws through a [`qsim_engine::PathSimulator`], so a fixed
//! seed gives bit-identical prices.
//!
//! ## Usage Example
//!
//! ```rust
//! use qsim_engine::PathSimulator;
//! use qsim_pricing::{black_scholes_price, OptionContract, OptionKind, OptionPricer};
//!
//! let contract = OptionContract::new(100.0, 100.0, 1.0, 0.05, 0.2, OptionKind::Call);
//! let mut pricer = OptionPricer::new(PathSimulator::with_seed(42), 100_000);
//!
//! let mc = pricer.price_with_error(&contract).unwrap();
//! let exact = black_scholes_price(&contract);
//! assert!((mc.price - exact).abs() < 4.0 * mc.std_error);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod analytical;
pub mod bond;
pub mod option;
pub mod result;

pub use analytical::{black_scholes_price, vasicek_zero_coupon_price};
pub use bond::{BondContract, BondPathPricer};
pub use option::{OptionContract, OptionKind, OptionPricer};
pub use result::PricingResult;
