/* src/server/core/rust/src/server.rs */

use std::sync::Arc;

use pagewright_engine::{EngineOptions, RuntimeMode};

use crate::handler::PageHandler;
use crate::page::PageDef;
use crate::pipeline::RenderPipeline;
use crate::settings::{PageSettings, page_settings};
use crate::widget::{StaticWidgetProvider, WidgetProvider};

/// Framework-agnostic parts extracted from `PageServer`.
/// Adapter crates consume this to build framework-specific routers.
pub struct PageParts {
  pub handlers: Vec<PageHandler>,
  pub settings: PageSettings,
  pub mode: RuntimeMode,
}

pub struct PageServer {
  pages: Vec<PageDef>,
  provider: Option<Arc<dyn WidgetProvider>>,
  engine_options: Option<EngineOptions>,
  mode: RuntimeMode,
}

impl PageServer {
  pub fn new() -> Self {
    Self { pages: Vec::new(), provider: None, engine_options: None, mode: RuntimeMode::default() }
  }

  pub fn page(mut self, page: PageDef) -> Self {
    self.pages.push(page);
    self
  }

  pub fn widget_provider(mut self, provider: impl WidgetProvider + 'static) -> Self {
    self.provider = Some(Arc::new(provider));
    self
  }

  pub fn engine_options(mut self, options: EngineOptions) -> Self {
    self.engine_options = Some(options);
    self
  }

  pub fn mode(mut self, mode: RuntimeMode) -> Self {
    self.mode = mode;
    self
  }

  /// Consume the builder, returning one handler per page. Pages without a
  /// configured provider get a [`StaticWidgetProvider`].
  pub fn into_parts(self) -> PageParts {
    let provider = self.provider.unwrap_or_else(|| Arc::new(StaticWidgetProvider::default()));
    let mut pipeline = RenderPipeline::new(provider, self.mode);
    if let Some(options) = self.engine_options {
      pipeline = pipeline.with_options(options);
    }
    let handlers =
      self.pages.into_iter().map(|page| PageHandler::new(page, pipeline.clone())).collect();
    PageParts { handlers, settings: page_settings(), mode: self.mode }
  }
}

impl Default for PageServer {
  fn default() -> Self {
    Self::new()
  }
}
