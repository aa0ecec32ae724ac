pub mod config;
pub mod res;
pub mod rooms;

use std::{ops::Deref, sync::Arc};

use axum::{extract::FromRef, response::{Html, IntoResponse}, routing::get, Router};
use tower_http::cors::CorsLayer;

pub use config::Config;
pub use rooms::{hub::Hub, resolve_room, ConnId, Relay};

#[derive(Clone, FromRef)]
pub struct AppState {
    pub hub: Arc<Hub>,
}

impl AppState {
    pub fn new() -> Self {
        Self { hub: Arc::new(Hub::default()) }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(res::landing))
        .route("/health", get(res::health))
        .merge(rooms::router())
        .with_state(state)
        .layer(CorsLayer::permissive())
}

pub type ChatResult<T> = Result<T, ChatError>;

/// Only ever reported to the connection that caused it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChatError {
    #[error("{0}")]
    Validation(String),
    #[error("malformed event: {0}")]
    Malformed(String),
}

impl ChatError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

impl From<serde_json::Error> for ChatError {
    fn from(err: serde_json::Error) -> Self {
        Self::Malformed(err.to_string())
    }
}

/// Wall clock in milliseconds since the unix epoch.
pub fn now_millis() -> i64 {
    (time::OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as i64
}

pub struct Markdown<T>(pub T);

impl<T> IntoResponse for Markdown<T>
where
    T: Deref<Target = str>
{
    fn into_response(self) -> axum::response::Response {
        Html(render_markdown(&self.0)).into_response()
    }
}

pub fn render_markdown(src: &str) -> String {
    use pulldown_cmark::{Options, Parser};

    let mut html_output = String::new();
    pulldown_cmark::html::push_html(&mut html_output, Parser::new_ext(src, Options::ENABLE_TABLES));
    html_output
}
