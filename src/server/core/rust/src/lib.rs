/* src/server/core/rust/src/lib.rs */

pub mod config;
pub mod errors;
pub mod event;
pub mod handler;
pub mod page;
pub mod pipeline;
pub mod server;
pub mod settings;
pub mod widget;

// Re-exports for ergonomic use
pub use config::{
  MODE_ENV, ServerConfig, find_server_config, load_server_config, runtime_mode_from_env,
};
pub use errors::PageError;
pub use event::{DEFAULT_QUERY, RequestEvent, RequestUrl};
pub use handler::PageHandler;
pub use page::{ContextFn, PageDef, people_page, widget_page};
pub use pipeline::{RenderPipeline, create_engine, page_engine_options, register_extensions};
pub use server::{PageParts, PageServer};
pub use settings::{PageSettings, page_settings};
pub use widget::{
  Renderable, StaticWidgetProvider, WIDGET_TAG, WidgetError, WidgetProvider, WidgetTag,
};

/// Re-export the engine for adapters and custom providers
pub use pagewright_engine;
pub use pagewright_engine::{BoxFuture, EngineOptions, RuntimeMode};

#[cfg(test)]
mod tests;
