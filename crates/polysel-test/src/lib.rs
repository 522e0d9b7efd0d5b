//! polysel-test - Regression test framework for polysel
//!
//! Integration tests record every check on a [`RegParams`] and report all
//! failures at the end instead of stopping at the first one. Two modes are
//! supported:
//!
//! - **Compare**: Check results and record failures (default)
//! - **Display**: Also print intermediate results, such as rendered masks
//!
//! # Usage
//!
//! ```ignore
//! use polysel_test::RegParams;
//!
//! let mut rp = RegParams::new("polygon_sel");
//! rp.compare_values(41.0, mask.side() as f64, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "compare" or "display"
//! - `RUST_LOG`: Log filter passed to `env_logger`

mod error;
mod params;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};
