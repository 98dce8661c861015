/* src/server/core/rust/src/widget.rs */

use std::sync::Arc;

use pagewright_engine::{BoxFuture, TagError, TagHandler};

/// Tag name the widget fragment is registered under.
pub const WIDGET_TAG: &str = "widget";

/// A fragment produced by the widget provider. Opaque apart from serialization.
pub trait Renderable: Send {
  fn render_to_string(&self) -> String;
}

#[derive(Debug, thiserror::Error)]
pub enum WidgetError {
  #[error("widget provider unavailable: {0}")]
  Unavailable(String),
  #[error("widget provider failed: {0}")]
  Failed(String),
}

impl From<WidgetError> for TagError {
  fn from(err: WidgetError) -> Self {
    TagError::new(err.to_string())
  }
}

/// External collaborator that supplies the widget fragment.
pub trait WidgetProvider: Send + Sync {
  fn get_widget(&self) -> BoxFuture<'_, Result<Box<dyn Renderable>, WidgetError>>;
}

/// The `{% widget %}` tag. Each occurrence asks the provider for a fresh
/// widget and serializes it in place.
pub struct WidgetTag {
  provider: Arc<dyn WidgetProvider>,
}

impl WidgetTag {
  pub fn new(provider: Arc<dyn WidgetProvider>) -> Self {
    Self { provider }
  }
}

impl TagHandler for WidgetTag {
  fn render(&self) -> BoxFuture<'_, Result<String, TagError>> {
    Box::pin(async move {
      let widget = self.provider.get_widget().await?;
      let html = widget.render_to_string();
      tracing::debug!(bytes = html.len(), "rendered widget");
      Ok(html)
    })
  }
}

/// Fixed HTML fragment.
#[derive(Debug, Clone)]
pub struct StaticWidget {
  html: String,
}

impl Renderable for StaticWidget {
  fn render_to_string(&self) -> String {
    self.html.clone()
  }
}

/// Provider that always returns the same fragment.
#[derive(Debug, Clone)]
pub struct StaticWidgetProvider {
  html: String,
}

impl StaticWidgetProvider {
  pub fn new(html: impl Into<String>) -> Self {
    Self { html: html.into() }
  }
}

impl Default for StaticWidgetProvider {
  fn default() -> Self {
    Self::new(r#"<div class="widget" data-widget="identity"></div>"#)
  }
}

impl WidgetProvider for StaticWidgetProvider {
  fn get_widget(&self) -> BoxFuture<'_, Result<Box<dyn Renderable>, WidgetError>> {
    let widget = StaticWidget { html: self.html.clone() };
    Box::pin(async move { Ok(Box::new(widget) as Box<dyn Renderable>) })
  }
}
