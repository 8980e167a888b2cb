//! Numerical building blocks.
//!
//! - [`distributions`]: standard normal CDF, PDF and quantile function
//! - [`statistics`]: sample statistics, empirical quantiles, log-return statistics

pub mod distributions;
pub mod statistics;

pub use distributions::{norm_cdf, norm_inv_cdf, norm_pdf};
pub use statistics::{empirical_quantile, quantile_index, LogReturnStats, SampleStatistics};
