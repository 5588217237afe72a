//! Handlers for recording and reading reactions.

use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};

use crate::api::dto::reaction::{ReactionCounts, ReactionPayload, ReactionResponse, counts_from};
use crate::error::AppError;
use crate::state::AppState;

/// Records one reaction for a site.
///
/// # Endpoint
///
/// `POST /{host}`
///
/// `host` may be a bare hostname or a (percent-encoded) page URL.
///
/// # Request Body
///
/// The first emoji of the body, sent as JSON (`{"emoji":"😀"}`), as a form
/// (`emoji=%F0%9F%98%80`) or as plain text (`😀`).
///
/// # Response Codes
///
/// - **201 Created**: first reaction with this emoji for the site
/// - **200 OK**: existing counter incremented
/// - **400 Bad Request**: no emoji in the body or no hostname in the path
/// - **413 Payload Too Large**: body exceeds `MAX_PAYLOAD_BYTES`
///
/// The body is `OK` unless the request accepts `application/json`, in
/// which case it is:
///
/// ```json
/// { "emoji": "😀", "count": 2, "created": false }
/// ```
pub async fn record_reaction_handler(
    State(state): State<AppState>,
    Path(host): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, AppError> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok());

    let emoji = ReactionPayload::from_parts(content_type, body).emoji_bytes()?;

    let outcome = state
        .reaction_service
        .record_reaction(&host, &emoji)
        .await?;

    let status = if outcome.reaction.created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };

    if accepts_json(&headers) {
        let response = ReactionResponse {
            emoji: outcome.emoji.to_string(),
            count: outcome.reaction.count,
            created: outcome.reaction.created,
        };
        return Ok((status, Json(response)).into_response());
    }

    Ok((status, "OK").into_response())
}

/// Returns every emoji count of a site.
///
/// # Endpoint
///
/// `GET /{host}`
///
/// # Response
///
/// ```json
/// { "😀": 2, "🎉": 1 }
/// ```
///
/// # Errors
///
/// - **400 Bad Request**: no hostname in the path
/// - **404 Not Found**: the site has no reactions
pub async fn site_reactions_handler(
    State(state): State<AppState>,
    Path(host): Path<String>,
) -> Result<Response, AppError> {
    let counters = state.reaction_service.counts_for_site(&host).await?;

    Ok(cached(state.read_max_age, counts_from(&counters)))
}

/// Returns the count of one emoji on a site as a single-entry map.
///
/// # Endpoint
///
/// `GET /{host}/{emoji}`
///
/// # Errors
///
/// - **400 Bad Request**: bad hostname or not an emoji
/// - **404 Not Found**: unknown site, or the emoji was never used on it
pub async fn emoji_reaction_handler(
    State(state): State<AppState>,
    Path((host, emoji)): Path<(String, String)>,
) -> Result<Response, AppError> {
    let counter = state
        .reaction_service
        .count_for_emoji(&host, &emoji)
        .await?;

    let counts = ReactionCounts::from([(counter.emoji.to_string(), counter.count)]);

    Ok(cached(state.read_max_age, counts))
}

fn cached(max_age: u64, counts: ReactionCounts) -> Response {
    let cache_control = HeaderValue::from_str(&format!("public, max-age={max_age}"))
        .unwrap_or_else(|_| HeaderValue::from_static("no-cache"));

    ([(header::CACHE_CONTROL, cache_control)], Json(counts)).into_response()
}

fn accepts_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|accept| accept.contains("application/json"))
}
