//! HTTP layer for request/response handling.
//!
//! Translates HTTP requests into service calls and formats responses.
//!
//! # Modules
//!
//! - [`dto`] - Request payload variants and response bodies
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Request tracing
//! - [`routes`] - Reaction route configuration
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
