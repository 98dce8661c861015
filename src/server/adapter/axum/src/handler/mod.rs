/* src/server/adapter/axum/src/handler/mod.rs */

mod page;

use std::collections::HashMap;
use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use pagewright_server::{PageHandler, PageSettings};

/// Path the page settings declaration is served from.
pub(crate) const SETTINGS_PATH: &str = "/_pagewright/settings";

pub(crate) struct AppState {
  pub pages: HashMap<String, Arc<PageHandler>>,
  pub settings: PageSettings,
}

pub(crate) fn build_router(handlers: Vec<PageHandler>, settings: PageSettings) -> Router {
  let mut router = Router::new().route(SETTINGS_PATH, get(page::handle_settings));
  let mut pages = HashMap::new();

  for handler in handlers {
    let route = handler.route().to_string();
    router = router.route(&route, get(page::handle_page));
    pages.insert(route, Arc::new(handler));
  }

  let state = Arc::new(AppState { pages, settings });
  router.fallback(page::handle_not_found).with_state(state)
}
