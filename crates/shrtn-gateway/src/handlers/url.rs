use crate::error::{AppError, Result};
use crate::model::CreateMappingForm;
use crate::render;
use crate::state::AppState;
use axum::body::Bytes;
use axum::extract::rejection::RawFormRejection;
use axum::extract::{Path, RawForm, State};
use axum::http::header::LOCATION;
use axum::http::{HeaderValue, StatusCode, Uri};
use axum::response::{Html, IntoResponse, Response};
use shrtn_core::{ShortCode, RECENT_LIMIT};
use std::fmt::Write;
use tracing::{debug, info};

/// `GET /`: the submission form and the most recent mappings.
pub async fn index_handler(State(state): State<AppState>) -> Result<Html<String>> {
    let mappings = state.shortener().recent(RECENT_LIMIT).await?;
    Ok(Html(render::index(&mappings).into_string()))
}

/// `POST /new`: shortens the submitted `longurl` and sends the client back to the index.
pub async fn create_handler(
    State(state): State<AppState>,
    uri: Uri,
    body: std::result::Result<RawForm, RawFormRejection>,
) -> Result<Response> {
    // Only form-encoded bodies carry fields; anything else reads as empty.
    let body = match body {
        Ok(RawForm(bytes)) => bytes,
        Err(RawFormRejection::InvalidFormContentType(_)) => Bytes::new(),
        Err(rejection) => return Err(AppError::Validation(rejection.body_text())),
    };
    let form = CreateMappingForm::parse(&body, uri.query());

    let mapping = state.shortener().shorten(&form.longurl).await?;
    info!(code = %mapping.short_code, url = %mapping.long_url, "shortened url");

    found("/")
}

/// `GET /s/{code}`: redirects to the stored destination.
pub async fn redirect_handler(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Response> {
    // A malformed code can never have been stored.
    let code = ShortCode::new(code).map_err(|_| AppError::NotFound)?;

    match state.shortener().resolve(&code).await? {
        Some(mapping) => {
            debug!(code = %code, url = %mapping.long_url, "redirecting");
            found(&mapping.long_url)
        }
        None => Err(AppError::NotFound),
    }
}

/// Fallback for known routes hit with the wrong method.
pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

/// Fallback for unknown paths.
pub async fn not_found_handler() -> AppError {
    AppError::NotFound
}

/// Builds a `302 Found` response pointing at `location`.
fn found(location: &str) -> Result<Response> {
    let value = HeaderValue::try_from(encode_location(location))
        .map_err(|e| AppError::Internal(format!("invalid redirect location: {e}")))?;

    Ok((StatusCode::FOUND, [(LOCATION, value)]).into_response())
}

/// Percent-encodes every byte that is not printable ASCII so any stored URL
/// can be sent in a `Location` header.
fn encode_location(location: &str) -> String {
    let mut encoded = String::with_capacity(location.len());
    for byte in location.bytes() {
        if byte.is_ascii_graphic() {
            encoded.push(char::from(byte));
        } else {
            let _ = write!(encoded, "%{byte:02X}");
        }
    }
    encoded
}
