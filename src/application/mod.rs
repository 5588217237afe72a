//! Application layer services implementing business logic.
//!
//! Services turn raw caller input into validated domain values, call the
//! repository traits and report outcomes to HTTP handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::reaction_service::ReactionService`] - Reaction recording and counter lookup

pub mod services;
