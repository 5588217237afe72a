//! DTOs for reaction endpoints.
//!
//! A reaction body arrives in one of three shapes, picked by the media type
//! of the `Content-Type` header. [`ReactionPayload`] closes over them so the
//! handler has a single place where the emoji bytes are extracted.

use axum::body::Bytes;
use percent_encoding::percent_decode;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use validator::Validate;

use crate::domain::entities::ReactionCounter;
use crate::error::AppError;

const FORM_MEDIA_TYPE: &str = "application/x-www-form-urlencoded";
const JSON_MEDIA_TYPE: &str = "application/json";
const FORM_EMOJI_FIELD: &str = "emoji";

/// JSON reaction body: `{"emoji": "😀"}`.
#[derive(Debug, Deserialize, Validate)]
pub struct ReactionRequest {
    #[validate(length(min = 1, message = "emoji must not be empty"))]
    pub emoji: String,
}

/// Acknowledgement returned to callers that accept JSON.
#[derive(Debug, Serialize)]
pub struct ReactionResponse {
    pub emoji: String,
    pub count: i64,
    pub created: bool,
}

/// Map from rendered emoji to its count, serialized as a JSON object.
pub type ReactionCounts = BTreeMap<String, i64>;

/// Builds the read response from stored counters.
pub fn counts_from(counters: &[ReactionCounter]) -> ReactionCounts {
    counters
        .iter()
        .map(|c| (c.emoji.to_string(), c.count))
        .collect()
}

/// Reaction body, tagged by how it was encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReactionPayload {
    /// `application/x-www-form-urlencoded`
    Form(Bytes),
    /// `application/json`
    Json(Bytes),
    /// Anything else, including a missing content type.
    Text(Bytes),
}

impl ReactionPayload {
    /// Tags a body by the media type of its `Content-Type` header.
    ///
    /// Parameters such as `charset` are ignored and the comparison is
    /// case-insensitive.
    pub fn from_parts(content_type: Option<&str>, body: Bytes) -> Self {
        let media_type = content_type
            .and_then(|ct| ct.split(';').next())
            .map(|essence| essence.trim().to_ascii_lowercase());

        match media_type.as_deref() {
            Some(FORM_MEDIA_TYPE) => Self::Form(body),
            Some(JSON_MEDIA_TYPE) => Self::Json(body),
            _ => Self::Text(body),
        }
    }

    /// Extracts the bytes that should contain the emoji.
    ///
    /// - form: the value of the `emoji` field, or the whole decoded body
    /// - JSON: the validated `emoji` field
    /// - text: the body as is
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for malformed JSON or an empty
    /// `emoji` field.
    pub fn emoji_bytes(&self) -> Result<Vec<u8>, AppError> {
        match self {
            Self::Form(body) => Ok(form_emoji(body)),
            Self::Json(body) => {
                let request: ReactionRequest = serde_json::from_slice(body).map_err(|e| {
                    AppError::bad_request(
                        "Invalid JSON body",
                        serde_json::json!({ "reason": e.to_string() }),
                    )
                })?;
                request.validate()?;
                Ok(request.emoji.into_bytes())
            }
            Self::Text(body) => Ok(body.to_vec()),
        }
    }
}

fn form_emoji(body: &[u8]) -> Vec<u8> {
    let field = url::form_urlencoded::parse(body)
        .find(|(key, _)| key == FORM_EMOJI_FIELD)
        .map(|(_, value)| value.into_owned());

    match field {
        Some(value) => value.into_bytes(),
        None => {
            let unplussed: Vec<u8> = body
                .iter()
                .map(|&b| if b == b'+' { b' ' } else { b })
                .collect();
            percent_decode(&unplussed).collect()
        }
    }
}
