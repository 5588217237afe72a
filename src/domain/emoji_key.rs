//! Canonical emoji value and its storage encoding.
//!
//! An [`EmojiKey`] holds the code points of exactly one emoji grapheme
//! cluster. It is stored as the decimal code points joined by `|`, so
//! `👍🏽` becomes `128077|127997` and a single code point such as `😀`
//! is stored as the bare integer `128512`.

use std::fmt;
use unicode_segmentation::UnicodeSegmentation;

/// Separator between code points in the storage encoding.
pub const SEPARATOR: char = '|';

const EMOJI_PRESENTATION_SELECTOR: char = '\u{FE0F}';

/// Errors produced while parsing or decoding emoji keys.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EmojiError {
    #[error("no emoji found")]
    NoEmojiFound,

    #[error("invalid emoji encoding: {0}")]
    InvalidEncoding(String),
}

/// One emoji grapheme cluster as an ordered, non-empty list of code points.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmojiKey(Vec<char>);

impl EmojiKey {
    /// Parses the first grapheme cluster of `raw` as an emoji.
    ///
    /// The bytes are read as UTF-8; an incomplete sequence at the end (for
    /// example from a truncated body) is ignored. Everything after the first
    /// cluster is discarded.
    ///
    /// # Errors
    ///
    /// Returns [`EmojiError::NoEmojiFound`] if the input is empty or its first
    /// cluster is not a recognized emoji.
    ///
    /// # Examples
    ///
    /// ```
    /// use openheart::domain::emoji_key::EmojiKey;
    ///
    /// let key = EmojiKey::parse("👍🏽 thanks!".as_bytes()).unwrap();
    /// assert_eq!(key.encode(), "128077|127997");
    /// assert!(EmojiKey::parse(b"hello").is_err());
    /// ```
    pub fn parse(raw: &[u8]) -> Result<Self, EmojiError> {
        let text = match std::str::from_utf8(raw) {
            Ok(text) => text,
            Err(e) => std::str::from_utf8(&raw[..e.valid_up_to()]).unwrap_or_default(),
        };

        Self::parse_str(text)
    }

    /// Same as [`EmojiKey::parse`] for input that is already text.
    pub fn parse_str(text: &str) -> Result<Self, EmojiError> {
        let cluster = text
            .graphemes(true)
            .next()
            .ok_or(EmojiError::NoEmojiFound)?;

        if !is_emoji_cluster(cluster) {
            return Err(EmojiError::NoEmojiFound);
        }

        Ok(Self(cluster.chars().collect()))
    }

    /// Renders the storage encoding.
    pub fn encode(&self) -> String {
        self.0
            .iter()
            .map(|c| u32::from(*c).to_string())
            .collect::<Vec<_>>()
            .join(&SEPARATOR.to_string())
    }

    /// Rebuilds a key from its storage encoding.
    ///
    /// Decoding does not re-check emoji membership: a stored key was
    /// validated when it was written.
    ///
    /// # Errors
    ///
    /// Returns [`EmojiError::InvalidEncoding`] when the input is empty or a
    /// field is not the decimal value of a Unicode scalar.
    pub fn decode(encoded: &str) -> Result<Self, EmojiError> {
        if encoded.is_empty() {
            return Err(EmojiError::InvalidEncoding(encoded.to_string()));
        }

        encoded
            .split(SEPARATOR)
            .map(|field| {
                field
                    .parse::<u32>()
                    .ok()
                    .and_then(char::from_u32)
                    .ok_or_else(|| EmojiError::InvalidEncoding(encoded.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }

    /// Code points of the cluster, in order.
    pub fn code_points(&self) -> &[char] {
        &self.0
    }
}

impl fmt::Display for EmojiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.iter().try_for_each(|c| write!(f, "{c}"))
    }
}

/// Checks a grapheme cluster against the Unicode emoji data set.
///
/// Modifier and ZWJ sequences are not all listed individually, so the leading
/// code point alone (or with an emoji presentation selector) is enough.
fn is_emoji_cluster(cluster: &str) -> bool {
    if emojis::get(cluster).is_some() {
        return true;
    }

    let Some(leading) = cluster.chars().next() else {
        return false;
    };

    let leading = leading.to_string();
    emojis::get(&leading).is_some()
        || emojis::get(&format!("{leading}{EMOJI_PRESENTATION_SELECTOR}")).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_code_point() {
        let key = EmojiKey::parse("😀".as_bytes()).unwrap();
        assert_eq!(key.code_points(), &['\u{1F600}']);
        assert_eq!(key.encode(), "128512");
    }

    #[test]
    fn test_parse_skin_tone_sequence() {
        let key = EmojiKey::parse("👍🏽".as_bytes()).unwrap();
        assert_eq!(key.code_points().len(), 2);
        assert_eq!(key.encode(), "128077|127997");
        assert_eq!(key.to_string(), "👍🏽");
    }

    #[test]
    fn test_parse_zwj_sequence() {
        let family = "👨\u{200D}👩\u{200D}👧";
        let key = EmojiKey::parse_str(family).unwrap();
        assert_eq!(key.code_points().len(), 5);
        assert_eq!(key.to_string(), family);
    }

    #[test]
    fn test_parse_flag() {
        let key = EmojiKey::parse_str("🇳🇱").unwrap();
        assert_eq!(key.encode(), "127475|127473");
    }

    #[test]
    fn test_parse_keycap() {
        let key = EmojiKey::parse_str("1\u{FE0F}\u{20E3}").unwrap();
        assert_eq!(key.encode(), "49|65039|8419");
    }

    #[test]
    fn test_parse_text_presentation_heart() {
        let key = EmojiKey::parse_str("\u{2764}").unwrap();
        assert_eq!(key.encode(), "10084");
    }

    #[test]
    fn test_parse_discards_trailing_input() {
        let key = EmojiKey::parse_str("🥰🥰 and more").unwrap();
        assert_eq!(key.to_string(), "🥰");
    }

    #[test]
    fn test_parse_ignores_truncated_tail() {
        let mut bytes = "🎉".as_bytes().to_vec();
        bytes.extend_from_slice(&"😀".as_bytes()[..2]);
        let key = EmojiKey::parse(&bytes).unwrap();
        assert_eq!(key.to_string(), "🎉");
    }

    #[test]
    fn test_parse_rejects_plain_text() {
        assert_eq!(EmojiKey::parse(b"hello"), Err(EmojiError::NoEmojiFound));
        assert_eq!(EmojiKey::parse(b"1"), Err(EmojiError::NoEmojiFound));
        assert_eq!(EmojiKey::parse(b"#"), Err(EmojiError::NoEmojiFound));
    }

    #[test]
    fn test_parse_rejects_empty_input() {
        assert_eq!(EmojiKey::parse(b""), Err(EmojiError::NoEmojiFound));
        assert_eq!(EmojiKey::parse(&[0xF0, 0x9F]), Err(EmojiError::NoEmojiFound));
    }

    #[test]
    fn test_parse_rejects_leading_text() {
        assert!(EmojiKey::parse_str("a😀").is_err());
    }

    #[test]
    fn test_round_trip() {
        for input in ["😀", "👍🏽", "🇳🇱", "👨\u{200D}👩\u{200D}👧", "❤\u{FE0F}", "🥰"] {
            let key = EmojiKey::parse_str(input).unwrap();
            assert_eq!(EmojiKey::decode(&key.encode()).unwrap(), key);
        }
    }

    #[test]
    fn test_decode_legacy_single_rune() {
        let key = EmojiKey::decode("128512").unwrap();
        assert_eq!(key.to_string(), "😀");
        assert_eq!(key.encode(), "128512");
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(EmojiKey::decode("").is_err());
        assert!(EmojiKey::decode("abc").is_err());
        assert!(EmojiKey::decode("128512|").is_err());
        assert!(EmojiKey::decode("55296").is_err());
    }
}
