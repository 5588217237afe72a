//! Data Transfer Objects for API requests and responses.
//!
//! Response DTOs use Serde for JSON serialization; the JSON reaction body is
//! checked with validator.

pub mod health;
pub mod reaction;
