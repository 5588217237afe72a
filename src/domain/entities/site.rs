//! Site entity: the hostname under which reactions are grouped.

use chrono::{DateTime, Utc};

/// A site identified by its canonical hostname.
///
/// Sites are created lazily on the first reaction for an unseen hostname
/// and are never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Site {
    pub id: i64,
    pub url: String,
    pub created_at: DateTime<Utc>,
}

impl Site {
    /// Creates a new Site instance.
    pub fn new(id: i64, url: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            url,
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_site_creation() {
        let now = Utc::now();
        let site = Site::new(7, "example.com".to_string(), now);

        assert_eq!(site.id, 7);
        assert_eq!(site.url, "example.com");
        assert_eq!(site.created_at, now);
    }
}
