//! Response classification shared by every read call.
//!
//! Classification is a pure function over status, headers, and body so it can
//! be tested without a network. The content-type check is an explicit
//! allow-list rather than a substring match: anything outside the list is an
//! unexpected response, never silently accepted.

use reqwest::StatusCode;
use reqwest::header::{CONTENT_LENGTH, CONTENT_TYPE, HeaderMap};
use serde_json::Value;

use crate::domain::ApiError;

/// Successful classification outcome.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Classified {
    /// `Content-Length: 0` — an empty record; JSON parsing never attempted.
    Empty,
    /// A JSON body, already parsed.
    Json(Value),
}

/// Content types accepted as JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum JsonContentType {
    Plain,
    WithCharset,
}

impl JsonContentType {
    fn parse(raw: &str) -> Option<Self> {
        match raw {
            "application/json" => Some(Self::Plain),
            "application/json; charset=UTF-8" | "application/json; charset=utf-8" => {
                Some(Self::WithCharset)
            }
            _ => None,
        }
    }
}

/// Classify one response.
///
/// A 401 maps to the session-invalid sentinel regardless of endpoint or
/// body. An explicitly empty body succeeds as [`Classified::Empty`]. A body
/// declared JSON is parsed (parse failure is a decode error, the declared
/// type was honoured). Everything else fails with the full diagnostic dump.
pub(crate) fn classify(
    endpoint: &str,
    status: StatusCode,
    headers: &HeaderMap,
    body: &[u8],
) -> Result<Classified, ApiError> {
    if status == StatusCode::UNAUTHORIZED {
        return Err(ApiError::SessionInvalid);
    }

    let empty_body = headers
        .get(CONTENT_LENGTH)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value == "0");
    if empty_body {
        return Ok(Classified::Empty);
    }

    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(JsonContentType::parse);
    if content_type.is_some() {
        let value: Value = serde_json::from_slice(body).map_err(|error| {
            ApiError::decode(format!("invalid JSON payload from {endpoint}: {error}"))
        })?;
        return Ok(Classified::Json(value));
    }

    Err(ApiError::unexpected_response(
        endpoint,
        status.as_u16(),
        status.canonical_reason().unwrap_or_default(),
        headers_to_string(headers),
        String::from_utf8_lossy(body).into_owned(),
    ))
}

fn headers_to_string(headers: &HeaderMap) -> String {
    let mut rendered = String::new();
    for (name, value) in headers {
        rendered.push_str(name.as_str());
        rendered.push_str(": ");
        rendered.push_str(value.to_str().unwrap_or("<non-ascii>"));
        rendered.push('\n');
    }
    rendered
}
