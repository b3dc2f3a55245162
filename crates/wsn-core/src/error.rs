//! Simulator-wide error type.
//!
//! Sub-crates define their own error enums; `wsn-mesh` wraps `WsnError` as
//! one variant via `#[from]`.

use thiserror::Error;

/// The top-level error type for `wsn-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum WsnError {
    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for all `wsn-*` crates.
pub type WsnResult<T> = Result<T, WsnError>;
