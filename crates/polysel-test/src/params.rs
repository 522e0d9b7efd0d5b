//! Regression test parameters and operations

use crate::error::{TestError, TestResult};
use polysel_core::Pix;

/// Regression test mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegTestMode {
    /// Check results and record failures (default)
    #[default]
    Compare,
    /// Check results and print intermediate output
    Display,
}

impl RegTestMode {
    /// Parse mode from the `REGTEST_MODE` environment variable
    pub fn from_env() -> Self {
        Self::parse(&std::env::var("REGTEST_MODE").unwrap_or_default())
    }

    fn parse(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "display" => Self::Display,
            _ => Self::Compare,
        }
    }
}

/// Regression test parameters
///
/// This structure tracks the state of a regression test, including
/// the test name, current index, mode, and success status.
pub struct RegParams {
    /// Name of the test (e.g., "polygon_sel")
    pub test_name: String,
    /// Current test index (incremented before each test)
    index: usize,
    /// Test mode (compare or display)
    pub mode: RegTestMode,
    /// Overall success status
    success: bool,
    /// Recorded failures
    failures: Vec<TestError>,
}

impl RegParams {
    /// Create new regression test parameters
    ///
    /// Installs a test-mode `env_logger` so that `RUST_LOG` controls the
    /// library's log output, then prints the test banner.
    pub fn new(test_name: &str) -> Self {
        let _ = env_logger::builder().is_test(true).try_init();
        let mode = RegTestMode::from_env();

        eprintln!();
        eprintln!("////////////////////////////////////////////////");
        eprintln!("////////////////   {}_reg   ///////////////", test_name);
        eprintln!("////////////////////////////////////////////////");
        eprintln!("Mode: {:?}", mode);

        Self {
            test_name: test_name.to_string(),
            index: 0,
            mode,
            success: true,
            failures: Vec::new(),
        }
    }

    /// Get the current test index
    pub fn index(&self) -> usize {
        self.index
    }

    /// Check if in display mode
    pub fn display(&self) -> bool {
        self.mode == RegTestMode::Display
    }

    fn record(&mut self, err: TestError) {
        eprintln!("Failure in {}_reg: {}", self.test_name, err);
        self.failures.push(err);
        self.success = false;
    }

    /// Compare two floating-point values
    ///
    /// # Arguments
    ///
    /// * `expected` - Expected value
    /// * `actual` - Actual computed value
    /// * `delta` - Maximum allowed difference
    ///
    /// # Returns
    ///
    /// `true` if values match within delta, `false` otherwise.
    pub fn compare_values(&mut self, expected: f64, actual: f64, delta: f64) -> bool {
        self.index += 1;
        if (expected - actual).abs() > delta {
            self.record(TestError::ValueMismatch {
                index: self.index,
                expected,
                actual,
                delta,
            });
            false
        } else {
            true
        }
    }

    /// Compare two Pix images for exact equality
    ///
    /// Images must agree in size, depth and every pixel value.
    pub fn compare_pix(&mut self, pix1: &Pix, pix2: &Pix) -> bool {
        self.index += 1;
        if pix1.equals(pix2) {
            true
        } else {
            if pix1.sizes_equal(pix2) {
                log::debug!("{}_reg: index {} pixel mismatch", self.test_name, self.index);
            } else {
                log::debug!(
                    "{}_reg: index {} dimension mismatch: {}x{}x{} vs {}x{}x{}",
                    self.test_name,
                    self.index,
                    pix1.width(),
                    pix1.height(),
                    pix1.depth().bits(),
                    pix2.width(),
                    pix2.height(),
                    pix2.depth().bits()
                );
            }
            self.record(TestError::PixMismatch { index: self.index });
            false
        }
    }

    /// Print `text` under `label` when running in display mode
    pub fn show(&self, label: &str, text: impl std::fmt::Display) {
        if self.display() {
            eprintln!("--- {} ({}_reg, index {}) ---", label, self.test_name, self.index);
            eprintln!("{}", text);
        }
    }

    /// Clean up and report results
    ///
    /// # Returns
    ///
    /// `true` if all tests passed, `false` if any failed.
    pub fn cleanup(self) -> bool {
        if self.success {
            eprintln!("SUCCESS: {}_reg", self.test_name);
        } else {
            eprintln!("FAILURE: {}_reg", self.test_name);
            for failure in &self.failures {
                eprintln!("  {}", failure);
            }
        }
        eprintln!();

        self.success
    }

    /// Like [`RegParams::cleanup`], but as a `Result`
    pub fn finish(self) -> TestResult<()> {
        let test = self.test_name.clone();
        let count = self.failures.len();
        if self.cleanup() {
            Ok(())
        } else {
            Err(TestError::Failed { test, count })
        }
    }

    /// Check if all tests have passed so far
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Get list of failures
    pub fn failures(&self) -> &[TestError] {
        &self.failures
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polysel_core::PixelDepth;

    #[test]
    fn test_mode_parse() {
        assert_eq!(RegTestMode::parse(""), RegTestMode::Compare);
        assert_eq!(RegTestMode::parse("DISPLAY"), RegTestMode::Display);
        assert_eq!(RegTestMode::parse("generate"), RegTestMode::Compare);
    }

    #[test]
    fn test_compare_values_within_delta() {
        let mut rp = RegParams::new("test");
        assert!(rp.compare_values(100.0, 100.0, 0.0));
        assert!(rp.compare_values(100.0, 100.5, 1.0));
        assert!(rp.is_success());
        assert_eq!(rp.index(), 2);
    }

    #[test]
    fn test_compare_values_failure() {
        let mut rp = RegParams::new("test");
        assert!(!rp.compare_values(100.0, 200.0, 0.0));
        assert!(!rp.is_success());
        assert!(matches!(
            rp.failures()[0],
            TestError::ValueMismatch { index: 1, .. }
        ));
        assert!(matches!(
            rp.finish(),
            Err(TestError::Failed { count: 1, .. })
        ));
    }

    #[test]
    fn test_compare_pix() {
        let mut rp = RegParams::new("test");
        let a = Pix::from_gray_values(2, 2, &[1, 2, 3, 4]).unwrap();
        let b = Pix::from_gray_values(2, 2, &[1, 2, 3, 5]).unwrap();
        let c = Pix::new(2, 2, PixelDepth::Bit32).unwrap();
        assert!(rp.compare_pix(&a, &a.clone()));
        assert!(!rp.compare_pix(&a, &b));
        assert!(!rp.compare_pix(&a, &c));
        assert_eq!(rp.failures().len(), 2);
        assert!(!rp.cleanup());
    }
}
