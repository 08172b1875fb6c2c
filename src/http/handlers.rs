//! Axum HTTP handlers for the web server
//!
//! Serves the phone directory search page and the search results.

use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use axum_extra::extract::Host;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::directory::search::search_entries;
use crate::errors::AppError;
use crate::render;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct DirectoryQuery {
    keyword: Option<String>,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// A request carrying the `keyword` query parameter (even an empty one) gets
/// the filtered listing; a request without it gets the search prompt.
pub async fn directory_xml(
    State(state): State<AppState>,
    Host(host): Host,
    Query(query): Query<DirectoryQuery>,
) -> Result<Response, AppError> {
    let body = match query.keyword {
        Some(keyword) => {
            let entries = state.source.load_entries().await?;
            let matches = search_entries(entries, &keyword);
            debug!(keyword = %keyword, matches = matches.len(), "directory search");
            render::render_directory(&matches)
        }
        None => render::render_search_prompt(server_name(&host), state.directory_port),
    };

    Ok(([(header::CONTENT_TYPE, "text/xml")], body).into_response())
}

/// The Host value may carry a port; the prompt URL needs the bare name.
fn server_name(host: &str) -> &str {
    if host.starts_with('[') {
        match host.find(']') {
            Some(end) => &host[..=end],
            None => host,
        }
    } else {
        host.split(':').next().unwrap_or(host)
    }
}
