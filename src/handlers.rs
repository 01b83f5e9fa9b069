use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse},
    Json,
};
use serde::{Deserialize, Deserializer};
use std::sync::Arc;
use tracing::info;

use crate::database::{Chirp, Database};
use crate::error::{ApiError, Result};
use crate::metrics::{render_admin_page, HitCounter};
use crate::response::ApiResponse;
use crate::validation::{ChirpValidator, Validation};

/// Shared application state handed to every handler
#[derive(Debug, Clone)]
pub struct AppState {
    pub db: Arc<Database>,
    pub hits: HitCounter,
}

impl AppState {
    pub fn new(db: Database) -> Self {
        Self {
            db: Arc::new(db),
            hits: HitCounter::new(),
        }
    }
}

/// Incoming chirp payload. A missing or `null` body reads as empty.
#[derive(Debug, Default, Deserialize)]
pub struct ChirpRequest {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub body: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Decode the first JSON value of the payload whatever content type the
/// client sent. Anything after that value is ignored; a top-level `null`
/// decodes as an empty request.
fn decode_chirp(payload: &[u8]) -> Result<ChirpRequest> {
    let mut deserializer = serde_json::Deserializer::from_slice(payload);
    let request = Option::<ChirpRequest>::deserialize(&mut deserializer)?;
    Ok(request.unwrap_or_default())
}

/// Liveness probe
pub async fn readiness() -> &'static str {
    "OK"
}

/// Check a chirp without storing it
pub async fn validate_chirp(payload: Bytes) -> Result<Json<ApiResponse>> {
    let request = decode_chirp(&payload)?;

    match ChirpValidator::validate(&request.body) {
        Validation::TooLong => Err(ApiError::TooLong),
        Validation::Cleaned(cleaned) => Ok(Json(ApiResponse::cleaned(cleaned))),
        Validation::Valid => Ok(Json(ApiResponse::valid())),
    }
}

/// Store a new chirp
pub async fn create_chirp(
    State(state): State<AppState>,
    payload: Bytes,
) -> Result<(StatusCode, Json<Chirp>)> {
    let request = decode_chirp(&payload)?;

    if let Validation::TooLong = ChirpValidator::validate(&request.body) {
        return Err(ApiError::TooLong);
    }

    let chirp = state.db.create(&request.body).await?;
    info!(target: "chirpy::handlers", id = chirp.id, "Chirp stored");

    Ok((StatusCode::CREATED, Json(chirp)))
}

/// Every chirp, oldest first
pub async fn list_chirps(State(state): State<AppState>) -> Result<Json<Vec<Chirp>>> {
    let chirps = state.db.list_all().await?;
    Ok(Json(chirps))
}

/// HTML page with the current file server hit count
pub async fn admin_metrics(State(state): State<AppState>) -> Html<String> {
    Html(render_admin_page(state.hits.get()))
}

pub async fn admin_reset(State(state): State<AppState>) -> impl IntoResponse {
    let hits = state.hits.reset();
    info!(target: "chirpy::handlers", "File server hit counter reset");
    format!("Hits reset to {}", hits)
}
