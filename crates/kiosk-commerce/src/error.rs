//! Commerce error types.

use thiserror::Error;

/// Errors that can occur in storefront domain operations.
///
/// Malformed catalog input is never an error: normalization recovers
/// by omission and falls back to defaults instead.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Checkout requested on a cart with no lines.
    #[error("cannot build an order from an empty cart")]
    EmptyCart,

    /// Arithmetic overflow in a money calculation.
    #[error("arithmetic overflow in money calculation")]
    Overflow,

    /// Currency mismatch.
    #[error("currency mismatch: expected {expected}, got {got}")]
    CurrencyMismatch { expected: String, got: String },

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
