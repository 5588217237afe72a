//! Domain layer containing business entities and value types.
//!
//! # Architecture
//!
//! - [`emoji_key`] - Emoji validation and the pipe-separated storage encoding
//! - [`entities`] - Sites and reaction counters
//! - [`repositories`] - Data access trait definitions
//!
//! # Reaction Flow
//!
//! 1. HTTP handler extracts the raw emoji bytes from the request body
//! 2. [`emoji_key::EmojiKey::parse`] validates the first grapheme cluster
//! 3. [`crate::utils::hostname::resolve_hostname`] canonicalizes the target site
//! 4. [`repositories::ReactionRepository::record_reaction`] upserts and increments

pub mod emoji_key;
pub mod entities;
pub mod repositories;
