//! Shared utilities and helpers
//!
//! Pure helper functions with no state of their own, grouped by the kind of
//! data they operate on.

pub mod list; // Lists encoded as delimited strings
pub mod seq; // Sequence and mapping helpers
pub mod text; // String casing, padding, wrapping and tokenizing
pub mod validation; // Format validators
