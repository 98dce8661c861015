/* src/server/core/rust/src/handler.rs */

use crate::errors::PageError;
use crate::event::RequestEvent;
use crate::page::PageDef;
use crate::pipeline::RenderPipeline;

/// Stateless handler for one page: receive, build context, render, return.
#[derive(Clone)]
pub struct PageHandler {
  page: PageDef,
  pipeline: RenderPipeline,
}

impl PageHandler {
  pub fn new(page: PageDef, pipeline: RenderPipeline) -> Self {
    Self { page, pipeline }
  }

  pub fn route(&self) -> &str {
    &self.page.route
  }

  /// Render the page for `event`. The HTML is returned unmodified; on failure
  /// nothing is rendered.
  pub async fn handle(&self, event: &RequestEvent) -> Result<String, PageError> {
    let query = event.query_string();
    tracing::debug!(
      route = %self.page.route,
      query,
      params = ?event.query_params(),
      "handling page request"
    );

    let context = self.page.context_for(event);
    match self.pipeline.render(&self.page.template, &context).await {
      Ok(html) => Ok(html),
      Err(err) => {
        tracing::warn!(route = %self.page.route, code = err.code(), "page render failed: {err}");
        Err(err)
      }
    }
  }
}
