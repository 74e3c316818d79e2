//! Bookmark handlers

use crate::error::ApiError;
use crate::sanitize::{serialize_bookmark, BookmarkResponse};
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Extension, Json,
};
use bookmarks_types::{Bookmark, NewBookmark, Rating};
use serde::Deserialize;
use serde_json::Value;
use tracing::{info, warn};

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<BookmarkResponse>>, ApiError> {
    let bookmarks = state.db.list_bookmarks().await?;
    Ok(Json(bookmarks.iter().map(serialize_bookmark).collect()))
}

/// Raw creation body. Fields stay untyped so each check can report its own message.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreateBookmarkRequest {
    title: Option<Value>,
    url: Option<Value>,
    description: Option<Value>,
    rating: Option<Value>,
}

pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<CreateBookmarkRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = payload.map_err(|e| invalid(format!("Invalid request body: {}", e.body_text())))?;

    let new_bookmark = validate(req)?;
    let bookmark = state.db.insert_bookmark(&new_bookmark).await?;
    info!("Bookmark with id {} created", bookmark.id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, format!("/bookmarks/{}", bookmark.id))],
        Json(serialize_bookmark(&bookmark)),
    ))
}

/// Runs before every handler on `/bookmarks/:id`: loads the bookmark or answers 404.
pub async fn load_bookmark(
    State(state): State<AppState>,
    Path(id): Path<String>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let Ok(id) = id.parse::<i64>() else {
        warn!("Bookmark with id {} not found", id);
        return Err(ApiError::NotFound);
    };

    let Some(bookmark) = state.db.get_bookmark(id).await? else {
        warn!("Bookmark with id {} not found", id);
        return Err(ApiError::NotFound);
    };

    request.extensions_mut().insert(bookmark);
    Ok(next.run(request).await)
}

pub async fn get(Extension(bookmark): Extension<Bookmark>) -> Json<BookmarkResponse> {
    Json(serialize_bookmark(&bookmark))
}

pub async fn delete(
    State(state): State<AppState>,
    Extension(bookmark): Extension<Bookmark>,
) -> Result<StatusCode, ApiError> {
    state.db.delete_bookmark(bookmark.id).await?;
    info!("Bookmark with id {} deleted", bookmark.id);
    Ok(StatusCode::NO_CONTENT)
}

fn invalid(message: String) -> ApiError {
    warn!("{}", message);
    ApiError::Validation(message)
}

/// `null`, `false` and `""` count as not supplied.
fn is_missing(value: &Option<Value>) -> bool {
    match value {
        None | Some(Value::Null) | Some(Value::Bool(false)) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(_) => false,
    }
}

fn require_string(field: &str, value: Option<Value>) -> Result<String, ApiError> {
    match value {
        Some(Value::String(s)) => Ok(s),
        _ => Err(invalid(format!("'{}' must be a string", field))),
    }
}

/// Integral JSON numbers only; `4.0` is accepted, `4.5` is not.
fn parse_rating(value: &Value) -> Option<Rating> {
    let n = value.as_i64().or_else(|| {
        value
            .as_f64()
            .filter(|f| f.fract() == 0.0 && f.abs() <= i64::MAX as f64)
            .map(|f| f as i64)
    })?;
    Rating::new(n).ok()
}

fn is_web_uri(candidate: &str) -> bool {
    match url::Url::parse(candidate) {
        Ok(parsed) => {
            matches!(parsed.scheme(), "http" | "https")
                && parsed.host_str().is_some_and(|h| !h.is_empty())
        }
        Err(_) => false,
    }
}

fn validate(req: CreateBookmarkRequest) -> Result<NewBookmark, ApiError> {
    for (field, value) in [("title", &req.title), ("url", &req.url), ("rating", &req.rating)] {
        if is_missing(value) {
            return Err(invalid(format!("'{}' is required", field)));
        }
    }

    let title = require_string("title", req.title)?;
    let url = require_string("url", req.url)?;
    let description = match req.description {
        None | Some(Value::Null) => String::new(),
        other => require_string("description", other)?,
    };

    // is_missing above guarantees a value
    let raw_rating = req.rating.unwrap_or(Value::Null);
    let Some(rating) = parse_rating(&raw_rating) else {
        return Err(invalid(format!(
            "'rating' must be a number between 0 and 5 (got {})",
            raw_rating
        )));
    };

    if !is_web_uri(&url) {
        return Err(invalid(format!("'url' must be a valid URL (got {})", url)));
    }

    Ok(NewBookmark {
        title,
        url,
        description,
        rating,
    })
}
