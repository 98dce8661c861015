/* src/server/core/rust/src/page.rs */

use std::sync::Arc;

use serde_json::{Value, json};

use crate::event::RequestEvent;

pub type ContextFn = Arc<dyn Fn(&RequestEvent) -> Value + Send + Sync>;

/// A page variant: one template plus the context it renders with.
#[derive(Clone)]
pub struct PageDef {
  /// Axum route syntax, e.g. "/widget"
  pub route: String,
  pub template: String,
  pub context: ContextFn,
}

impl PageDef {
  pub fn new(
    route: impl Into<String>,
    template: impl Into<String>,
    context: impl Fn(&RequestEvent) -> Value + Send + Sync + 'static,
  ) -> Self {
    Self { route: route.into(), template: template.into(), context: Arc::new(context) }
  }

  pub fn context_for(&self, event: &RequestEvent) -> Value {
    (self.context)(event)
  }
}

pub const PEOPLE: [&str; 3] = ["John", "Jane", "Alex"];

pub const PEOPLE_TEMPLATE: &str = include_str!("../templates/people.liquid");
pub const WIDGET_TEMPLATE: &str = include_str!("../templates/widget.liquid");

/// People list with a widget after each entry.
pub fn people_page() -> PageDef {
  PageDef::new("/", PEOPLE_TEMPLATE, |_: &RequestEvent| json!({ "people": PEOPLE }))
}

/// A single widget with no data.
pub fn widget_page() -> PageDef {
  PageDef::new("/widget", WIDGET_TEMPLATE, |_: &RequestEvent| json!({}))
}
