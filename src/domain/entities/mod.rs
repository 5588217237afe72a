//! Core domain entities.
//!
//! - [`Site`] - A hostname that owns reaction counters
//! - [`ReactionCounter`] - Per-site, per-emoji count
//! - [`RecordedReaction`] - Outcome of recording one reaction

pub mod reaction;
pub mod site;

pub use reaction::{ReactionCounter, RecordedReaction};
pub use site::Site;
