//! Error types for dagenc.

use std::fmt;

/// Errors that can occur while configuring the encoder.
///
/// Encoding itself has no recoverable error paths: all inputs are
/// pre-validated by the caller, and precondition violations are treated as
/// fatal (see the individual operations' `# Panics` sections).
#[derive(Debug)]
pub enum EncodeError {
    /// Invalid configuration parameter.
    InvalidConfig {
        /// Description of what was invalid.
        message: &'static str,
    },
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncodeError::InvalidConfig { message } => {
                write!(f, "invalid config: {}", message)
            }
        }
    }
}

impl std::error::Error for EncodeError {}
