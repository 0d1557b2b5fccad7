//! Result type alias for Crossmatch
//!
//! Convenience alias that uses [`CrossmatchError`] as the error type.

use super::errors::CrossmatchError;

/// Result type alias for Crossmatch operations
///
/// # Examples
///
/// ```
/// use crossmatch::domain::result::Result;
/// use crossmatch::domain::errors::CrossmatchError;
///
/// fn parse_units(raw: &str) -> Result<u32> {
///     raw.parse()
///         .map_err(|_| CrossmatchError::Validation(format!("invalid units: {raw}")))
/// }
/// ```
pub type Result<T> = std::result::Result<T, CrossmatchError>;
