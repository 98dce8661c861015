/* src/server/core/rust/src/tests/mod.rs */

use std::sync::Arc;

use super::*;
use serde_json::json;


fn handler_for(page: PageDef, provider: Arc<dyn WidgetProvider>) -> PageHandler {
  PageHandler::new(page, RenderPipeline::new(provider, RuntimeMode::Development))
}

fn static_handler(page: PageDef) -> PageHandler {
  handler_for(page, Arc::new(StaticWidgetProvider::new("<w/>")))
}
