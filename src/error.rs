// Error taxonomy
// Shared error type for the numeric kernel, fractions, and RSA layers

/// Errors surfaced by the arithmetic and RSA layers.
///
/// The variants follow the mathematical failure classes rather than the
/// module that raised them: `Domain` for operations that are undefined on
/// their input, `Overflow` for division by zero, `Range` for out-of-range
/// API inputs, `BadKey` for rejected RSA key material, and `Parse` for
/// strict text parsing failures.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("domain error: {0}")]
    Domain(&'static str),
    #[error("overflow error: {0}")]
    Overflow(&'static str),
    #[error("range error: {0}")]
    Range(&'static str),
    #[error("bad key")]
    BadKey,
    #[error("parse error: {0}")]
    Parse(String),
}

pub type Result<T> = std::result::Result<T, Error>;
