/* src/server/core/rust/src/settings.rs */

use serde::Serialize;

/// Marker for a bound inbound field. Serializes as `{}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Binding {}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Bindings {
  pub url: Binding,
}

/// Declares which inbound fields the host may hand to a page handler.
/// Read by the hosting runtime, never by the render pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PageSettings {
  pub bindings: Bindings,
}

pub fn page_settings() -> PageSettings {
  PageSettings::default()
}
