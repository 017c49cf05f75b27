//! Error types for fixture runs

use ember_evm::EvmError;
use thiserror::Error;

/// Test error type
#[derive(Error, Debug)]
pub enum TestError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Hex decoding error
    #[error("Hex error: {0}")]
    Hex(String),

    /// Fixture parsing error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Interpreter error raised while preparing a fixture
    #[error("EVM error: {0}")]
    Evm(#[from] EvmError),

    /// Assertion failed
    #[error("Assertion failed: {0}")]
    Assertion(String),

    /// Unsupported fixture
    #[error("Unsupported: {0}")]
    Unsupported(String),
}

impl From<hex::FromHexError> for TestError {
    fn from(e: hex::FromHexError) -> Self {
        TestError::Hex(e.to_string())
    }
}

/// Test result type
pub type TestResult<T> = Result<T, TestError>;
