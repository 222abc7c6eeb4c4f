//! Shared error type for the road-map core library.
//!
//! Sub-crates define their own error enums and wrap `CoreError` into one
//! variant via `#[from]`, the same layering `dt-core::DtError` uses across
//! the `dt-*` crates it underlies.

use thiserror::Error;

/// Errors that construction-time geometry operations can fail hard on.
///
/// Query operations never return `CoreError` — they return an absent/empty
/// result instead (see the crate-level propagation policy in each
/// downstream crate's docs).
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("numerical failure: {0}")]
    NumericalFailure(String),
}

/// Shorthand result type used throughout `map-core`.
pub type CoreResult<T> = Result<T, CoreError>;
