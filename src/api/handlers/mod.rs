//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod health;
pub mod home;
pub mod reactions;

pub use health::health_handler;
pub use home::home_handler;
pub use reactions::{emoji_reaction_handler, record_reaction_handler, site_reactions_handler};
