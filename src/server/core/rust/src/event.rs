/* src/server/core/rust/src/event.rs */

use serde::{Deserialize, Serialize};

/// Query string used when the inbound event carries none.
pub const DEFAULT_QUERY: &str = "q=URLUtils.searchParams&topic=api";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestUrl {
  /// Raw query string, usually with a leading `?`
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub search: Option<String>,
}

/// Inbound request descriptor. Only the URL is bound; the pipeline never mutates it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestEvent {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub url: Option<RequestUrl>,
}

impl RequestEvent {
  /// Build an event from a URI query component (without the `?`).
  pub fn from_query(query: Option<&str>) -> Self {
    Self { url: Some(RequestUrl { search: query.map(|q| format!("?{q}")) }) }
  }

  pub fn search(&self) -> Option<&str> {
    self.url.as_ref().and_then(|url| url.search.as_deref())
  }

  /// The query string without its leading `?`, falling back to [`DEFAULT_QUERY`]
  /// when absent or empty.
  pub fn query_string(&self) -> &str {
    match self.search().map(|s| s.strip_prefix('?').unwrap_or(s)) {
      Some(query) if !query.is_empty() => query,
      _ => DEFAULT_QUERY,
    }
  }

  /// Decoded key/value pairs of [`RequestEvent::query_string`].
  pub fn query_params(&self) -> Vec<(String, String)> {
    url::form_urlencoded::parse(self.query_string().as_bytes()).into_owned().collect()
  }
}
