//! Reaction counter entity and the outcome of recording a reaction.

use chrono::{DateTime, Utc};

use crate::domain::emoji_key::EmojiKey;

/// Number of times one emoji was submitted for one site.
///
/// `(site_id, emoji)` is unique and `count` starts at 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReactionCounter {
    pub id: i64,
    pub site_id: i64,
    pub emoji: EmojiKey,
    pub count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ReactionCounter {
    /// Creates a new ReactionCounter instance.
    pub fn new(
        id: i64,
        site_id: i64,
        emoji: EmojiKey,
        count: i64,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            site_id,
            emoji,
            count,
            created_at,
            updated_at,
        }
    }
}

/// Result of an atomic upsert-and-increment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordedReaction {
    pub site_id: i64,
    /// Count after this reaction was applied.
    pub count: i64,
    /// True when this call created the counter row.
    pub created: bool,
}

impl RecordedReaction {
    pub fn new(site_id: i64, count: i64) -> Self {
        Self {
            site_id,
            count,
            created: count == 1,
        }
    }
}
