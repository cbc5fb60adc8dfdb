//! Error types for module-argument parsing
//!
//! Defines the crate error type using thiserror for clear error propagation.

use thiserror::Error;

/// Result type for modargs operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for building and reading module-argument sets
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed argument string: `=` with no key before it, an
    /// unterminated quoted value, a trailing key with no `=`, or a key
    /// not present in the caller's allow-list
    #[error("Parse error: {0}")]
    Parse(String),

    /// Value present but not coercible to the requested type, an
    /// unrecognized sample format name, or an assembled sample
    /// specification that fails validation
    #[error("Invalid value: {0}")]
    InvalidValue(String),
}
