//! Error types for the test framework

use thiserror::Error;

/// Errors reported by a finished regression test
#[derive(Debug, Error)]
pub enum TestError {
    /// Value comparison failed
    #[error(
        "value comparison failed at index {index}: expected {expected}, got {actual}, delta {delta}"
    )]
    ValueMismatch {
        index: usize,
        expected: f64,
        actual: f64,
        delta: f64,
    },

    /// Pix comparison failed
    #[error("pix comparison failed at index {index}")]
    PixMismatch { index: usize },

    /// One or more checks in a regression test failed
    #[error("{test}_reg: {count} check(s) failed")]
    Failed { test: String, count: usize },
}

/// Result type for test operations
pub type TestResult<T> = Result<T, TestError>;
