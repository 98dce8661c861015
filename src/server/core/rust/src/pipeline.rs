/* src/server/core/rust/src/pipeline.rs */

use std::sync::Arc;

use pagewright_engine::{
  DEFAULT_FILE_EXTENSION, Engine, EngineConfig, EngineOptions, FilterError, RuntimeMode, Value,
  ValueView,
};
use serde_json::Value as JsonValue;

use crate::errors::PageError;
use crate::widget::{WIDGET_TAG, WidgetProvider, WidgetTag};

/// Name of the pass-through custom filter available to every page.
pub const PASSTHROUGH_FILTER: &str = "passthrough";

/// Engine defaults for pages: strict about filters and variables, tag
/// whitespace trimmed on both sides. Caching is left to the runtime mode.
pub fn page_engine_options() -> EngineOptions {
  EngineOptions {
    file_extension: Some(DEFAULT_FILE_EXTENSION.to_string()),
    strict_filters: Some(true),
    strict_variables: Some(true),
    trim_tag_left: Some(true),
    trim_tag_right: Some(true),
    ..Default::default()
  }
}

/// Build an engine from the page defaults layered under `overrides`.
pub fn create_engine(overrides: Option<&EngineOptions>, mode: RuntimeMode) -> Engine {
  let defaults = page_engine_options();
  let options = match overrides {
    Some(overrides) => defaults.merge(overrides),
    None => defaults,
  };
  Engine::new(EngineConfig::resolve(&options, mode))
}

fn passthrough(value: &dyn ValueView, _args: &[Value]) -> Result<Value, FilterError> {
  Ok(value.to_value())
}

/// Register the widget tag and the page filters on `engine`.
pub fn register_extensions(
  engine: &mut Engine,
  provider: Arc<dyn WidgetProvider>,
) -> Result<(), PageError> {
  engine.register_tag(WIDGET_TAG, WidgetTag::new(provider))?;
  engine.register_filter(PASSTHROUGH_FILTER, passthrough)?;
  Ok(())
}

/// Parse-and-render with a freshly built and extended engine per call.
#[derive(Clone)]
pub struct RenderPipeline {
  options: Option<EngineOptions>,
  mode: RuntimeMode,
  provider: Arc<dyn WidgetProvider>,
}

impl RenderPipeline {
  pub fn new(provider: Arc<dyn WidgetProvider>, mode: RuntimeMode) -> Self {
    Self { options: None, mode, provider }
  }

  pub fn with_options(mut self, options: EngineOptions) -> Self {
    self.options = Some(options);
    self
  }

  pub fn mode(&self) -> RuntimeMode {
    self.mode
  }

  pub fn engine(&self) -> Result<Engine, PageError> {
    let mut engine = create_engine(self.options.as_ref(), self.mode);
    register_extensions(&mut engine, Arc::clone(&self.provider))?;
    Ok(engine)
  }

  pub async fn render(&self, template: &str, context: &JsonValue) -> Result<String, PageError> {
    let engine = self.engine()?;
    let parsed = engine.parse(template)?;
    let html = engine.render(&parsed, context).await?;
    tracing::debug!(bytes = html.len(), cache = engine.config().cache_enabled, "rendered page");
    Ok(html)
  }
}
