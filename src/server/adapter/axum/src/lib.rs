/* src/server/adapter/axum/src/lib.rs */

mod error;
mod handler;

/// Re-export the page core for convenience
pub use pagewright_server;

use pagewright_server::PageServer;

/// Extension trait that converts a `PageServer` into an Axum router.
pub trait IntoAxumRouter {
  fn into_axum_router(self) -> axum::Router;
  fn serve(
    self,
    addr: &str,
  ) -> impl std::future::Future<Output = Result<(), Box<dyn std::error::Error>>> + Send;
}

impl IntoAxumRouter for PageServer {
  fn into_axum_router(self) -> axum::Router {
    let parts = self.into_parts();
    tracing::debug!(pages = parts.handlers.len(), mode = ?parts.mode, "building page router");
    handler::build_router(parts.handlers, parts.settings)
  }

  async fn serve(self, addr: &str) -> Result<(), Box<dyn std::error::Error>> {
    let router = self.into_axum_router();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    let local_addr = listener.local_addr()?;
    tracing::info!("Pagewright server running on http://localhost:{}", local_addr.port());
    axum::serve(listener, router).await?;
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use axum::body::{Body, to_bytes};
  use axum::http::{Request, StatusCode, header};
  use pagewright_server::{
    BoxFuture, Renderable, StaticWidgetProvider, WidgetError, WidgetProvider, people_page,
    widget_page,
  };
  use tower::ServiceExt;

  struct Broken;

  impl WidgetProvider for Broken {
    fn get_widget(&self) -> BoxFuture<'_, Result<Box<dyn Renderable>, WidgetError>> {
      Box::pin(async { Err(WidgetError::Failed("token exchange rejected".into())) })
    }
  }

  fn router() -> axum::Router {
    PageServer::new()
      .page(people_page())
      .page(widget_page())
      .widget_provider(StaticWidgetProvider::new("<w/>"))
      .into_axum_router()
  }

  async fn get(router: axum::Router, uri: &str) -> (StatusCode, Option<String>, String) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let content_type = response
      .headers()
      .get(header::CONTENT_TYPE)
      .and_then(|v| v.to_str().ok())
      .map(str::to_string);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, content_type, String::from_utf8(bytes.to_vec()).unwrap())
  }

  #[test]
  fn into_axum_router_builds_without_panic() {
    let _router = PageServer::new().into_axum_router();
  }

  #[tokio::test]
  async fn people_page_renders_html() {
    let (status, content_type, body) = get(router(), "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(content_type.unwrap().starts_with("text/html"));
    assert!(body.contains(r#"<a href="https://example.com/Jane">"#));
    assert_eq!(body.matches("<w/>").count(), 3);
  }

  #[tokio::test]
  async fn query_string_does_not_change_output() {
    let (_, _, plain) = get(router(), "/widget").await;
    let (status, _, queried) = get(router(), "/widget?topic=billing&q=x").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(plain, queried);
  }

  #[tokio::test]
  async fn unknown_route_is_json_404() {
    let (status, _, body) = get(router(), "/missing").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["ok"], false);
    assert_eq!(json["error"]["code"], "NOT_FOUND");
  }

  #[tokio::test]
  async fn provider_failure_is_json_502() {
    let router = PageServer::new().page(people_page()).widget_provider(Broken).into_axum_router();
    let (status, _, body) = get(router, "/").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(!body.contains("<ul"));
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["error"]["code"], "EXTENSION_FAILED");
  }

  #[tokio::test]
  async fn settings_route_declares_url_binding() {
    let (status, _, body) = get(router(), "/_pagewright/settings").await;
    assert_eq!(status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json, serde_json::json!({"bindings": {"url": {}}}));
  }
}
