//! Utility functions shared across layers.
//!
//! - [`hostname`] - Reducing caller-supplied URLs and hosts to a site hostname

pub mod hostname;
