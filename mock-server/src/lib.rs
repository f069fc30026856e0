//! In-memory stand-in for the short-link backend.
//!
//! Implements the same HTTP contract the client speaks: bearer-token auth,
//! `{error}` payloads on failure, and a click counter bumped by the redirect
//! route so analytics have something to report.

use std::{collections::HashMap, sync::Arc};

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Redirect, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::trace::TraceLayer;
use url::Url;
use uuid::Uuid;

const CODE_LEN: usize = 6;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ShortUrlResponse {
    pub short_url: String,
    pub url: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Analytics {
    pub short_code: String,
    pub click_count: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Deserialize)]
pub struct UrlInput {
    pub url: String,
}

#[derive(Clone, Debug)]
pub struct Link {
    pub url: String,
    pub clicks: u64,
}

/// Server settings.
#[derive(Clone, Debug)]
pub struct Settings {
    /// Required bearer token; `None` accepts any request.
    pub api_key: Option<String>,
    /// Prefix for generated short URLs, without a trailing slash.
    pub short_base: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: None,
            short_base: "http://localhost:3000".to_string(),
        }
    }
}

pub type Db = Arc<RwLock<HashMap<String, Link>>>;

#[derive(Clone)]
pub struct AppState {
    pub db: Db,
    pub settings: Arc<Settings>,
}

type ApiFailure = Response;

fn failure(status: StatusCode, message: &str) -> ApiFailure {
    (
        status,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
        .into_response()
}

/// Decodes the body only after auth has passed. Malformed bodies get axum's
/// plain-text JSON rejection.
fn url_input(body: &Bytes) -> Result<UrlInput, ApiFailure> {
    Json::<UrlInput>::from_bytes(body)
        .map(|Json(input)| input)
        .map_err(IntoResponse::into_response)
}

fn not_found() -> ApiFailure {
    failure(StatusCode::NOT_FOUND, "Short URL not found")
}

pub fn app(settings: Settings) -> Router {
    let state = AppState {
        db: Arc::new(RwLock::new(HashMap::new())),
        settings: Arc::new(Settings {
            short_base: settings.short_base.trim_end_matches('/').to_string(),
            ..settings
        }),
    };
    Router::new()
        .route("/urls", post(create_url))
        .route("/urls/{code}", put(update_url).delete(delete_url))
        .route("/analytics/{code}", get(get_analytics))
        .route("/{code}", get(follow))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run(listener: TcpListener, settings: Settings) -> Result<(), std::io::Error> {
    axum::serve(listener, app(settings)).await
}

fn authorize(headers: &HeaderMap, settings: &Settings) -> Result<(), ApiFailure> {
    let Some(expected) = settings.api_key.as_deref() else {
        return Ok(());
    };
    let supplied = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));
    if supplied == Some(expected) {
        Ok(())
    } else {
        tracing::warn!("rejected request with missing or wrong API key");
        Err(failure(StatusCode::UNAUTHORIZED, "Unauthorized"))
    }
}

fn validate_target(raw: &str) -> Result<(), ApiFailure> {
    match Url::parse(raw) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && url.has_host() => Ok(()),
        _ => Err(failure(StatusCode::BAD_REQUEST, "Invalid URL")),
    }
}

fn generate_code(links: &HashMap<String, Link>) -> String {
    loop {
        let code: String = Uuid::new_v4().simple().to_string()[..CODE_LEN].to_string();
        if !links.contains_key(&code) {
            return code;
        }
    }
}

async fn create_url(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, Json<ShortUrlResponse>), ApiFailure> {
    authorize(&headers, &state.settings)?;
    let input = url_input(&body)?;
    validate_target(&input.url)?;

    let mut links = state.db.write().await;
    let code = generate_code(&links);
    links.insert(
        code.clone(),
        Link {
            url: input.url.clone(),
            clicks: 0,
        },
    );
    tracing::info!(%code, "created short link");

    Ok((
        StatusCode::CREATED,
        Json(ShortUrlResponse {
            short_url: format!("{}/{code}", state.settings.short_base),
            url: input.url,
        }),
    ))
}

async fn update_url(
    State(state): State<AppState>,
    Path(code): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<StatusCode, ApiFailure> {
    authorize(&headers, &state.settings)?;
    let input = url_input(&body)?;
    validate_target(&input.url)?;

    let mut links = state.db.write().await;
    let link = links.get_mut(&code).ok_or_else(not_found)?;
    link.url = input.url;
    Ok(StatusCode::NO_CONTENT)
}

async fn delete_url(
    State(state): State<AppState>,
    Path(code): Path<String>,
    headers: HeaderMap,
) -> Result<StatusCode, ApiFailure> {
    authorize(&headers, &state.settings)?;

    let mut links = state.db.write().await;
    links.remove(&code).map(|_| StatusCode::NO_CONTENT).ok_or_else(not_found)
}

async fn get_analytics(
    State(state): State<AppState>,
    Path(code): Path<String>,
    headers: HeaderMap,
) -> Result<Json<Analytics>, ApiFailure> {
    authorize(&headers, &state.settings)?;

    let links = state.db.read().await;
    let link = links.get(&code).ok_or_else(not_found)?;
    Ok(Json(Analytics {
        short_code: code,
        click_count: link.clicks,
    }))
}

async fn follow(State(state): State<AppState>, Path(code): Path<String>) -> Response {
    let mut links = state.db.write().await;
    match links.get_mut(&code) {
        Some(link) => {
            link.clicks += 1;
            Redirect::temporary(&link.url).into_response()
        }
        None => not_found(),
    }
}
