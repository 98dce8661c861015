/* src/server/adapter/axum/src/handler/page.rs */

use std::sync::Arc;

use axum::extract::{MatchedPath, State};
use axum::http::Uri;
use axum::response::Html;
use axum::Json;
use pagewright_server::{PageError, PageSettings, RequestEvent};

use super::AppState;
use crate::error::AxumError;

pub(super) async fn handle_page(
  State(state): State<Arc<AppState>>,
  matched: MatchedPath,
  uri: Uri,
) -> Result<Html<String>, AxumError> {
  let handler = state
    .pages
    .get(matched.as_str())
    .ok_or_else(|| PageError::not_found(format!("no page registered for {}", uri.path())))?;

  let event = RequestEvent::from_query(uri.query());
  let html = handler.handle(&event).await?;
  Ok(Html(html))
}

pub(super) async fn handle_settings(State(state): State<Arc<AppState>>) -> Json<PageSettings> {
  Json(state.settings.clone())
}

pub(super) async fn handle_not_found(uri: Uri) -> AxumError {
  AxumError(PageError::not_found(format!("no page at {}", uri.path())))
}
