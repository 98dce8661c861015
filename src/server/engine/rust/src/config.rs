/* src/server/engine/rust/src/config.rs */

use serde::Deserialize;

pub const DEFAULT_FILE_EXTENSION: &str = ".liquid";

/// Process runtime mode. Only `Production` enables template caching by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeMode {
  #[default]
  Development,
  Production,
}

impl RuntimeMode {
  pub fn parse(value: &str) -> Self {
    if value.trim().eq_ignore_ascii_case("production") {
      Self::Production
    } else {
      Self::Development
    }
  }

  pub fn is_production(self) -> bool {
    self == Self::Production
  }
}

/// Partially specified engine options. Unset fields fall back to defaults in
/// [`EngineConfig::resolve`].
///
/// Liquid always rejects unknown filters and undefined variables, so
/// `strict_filters` and `strict_variables` can only be switched on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineOptions {
  pub file_extension: Option<String>,
  pub cache: Option<bool>,
  pub strict_filters: Option<bool>,
  pub strict_variables: Option<bool>,
  pub trim_tag_left: Option<bool>,
  pub trim_tag_right: Option<bool>,
  pub trim_output_left: Option<bool>,
  pub trim_output_right: Option<bool>,
}

impl EngineOptions {
  /// Layer `overrides` on top of `self`; every field set in `overrides` wins.
  pub fn merge(&self, overrides: &EngineOptions) -> EngineOptions {
    EngineOptions {
      file_extension: overrides.file_extension.clone().or_else(|| self.file_extension.clone()),
      cache: overrides.cache.or(self.cache),
      strict_filters: overrides.strict_filters.or(self.strict_filters),
      strict_variables: overrides.strict_variables.or(self.strict_variables),
      trim_tag_left: overrides.trim_tag_left.or(self.trim_tag_left),
      trim_tag_right: overrides.trim_tag_right.or(self.trim_tag_right),
      trim_output_left: overrides.trim_output_left.or(self.trim_output_left),
      trim_output_right: overrides.trim_output_right.or(self.trim_output_right),
    }
  }
}

/// Fully resolved engine configuration. Immutable once an engine is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
  pub file_extension: String,
  pub cache_enabled: bool,
  pub strict_filters: bool,
  pub strict_variables: bool,
  pub trim_tag_left: bool,
  pub trim_tag_right: bool,
  pub trim_output_left: bool,
  pub trim_output_right: bool,
}

impl EngineConfig {
  /// A `false` strictness option is logged and ignored.
  pub fn resolve(options: &EngineOptions, mode: RuntimeMode) -> Self {
    for (name, value) in
      [("strict_filters", options.strict_filters), ("strict_variables", options.strict_variables)]
    {
      if value == Some(false) {
        tracing::warn!(option = name, "lenient mode is not supported; staying strict");
      }
    }
    Self {
      file_extension: options
        .file_extension
        .clone()
        .unwrap_or_else(|| DEFAULT_FILE_EXTENSION.to_string()),
      cache_enabled: options.cache.unwrap_or(mode.is_production()),
      strict_filters: true,
      strict_variables: true,
      trim_tag_left: options.trim_tag_left.unwrap_or(false),
      trim_tag_right: options.trim_tag_right.unwrap_or(false),
      trim_output_left: options.trim_output_left.unwrap_or(false),
      trim_output_right: options.trim_output_right.unwrap_or(false),
    }
  }

  pub(crate) fn parse_options(&self) -> ParseOptions {
    ParseOptions {
      trim_tag_left: self.trim_tag_left,
      trim_tag_right: self.trim_tag_right,
      trim_output_left: self.trim_output_left,
      trim_output_right: self.trim_output_right,
    }
  }
}

impl Default for EngineConfig {
  fn default() -> Self {
    Self::resolve(&EngineOptions::default(), RuntimeMode::Development)
  }
}

/// The subset of configuration that changes the parsed shape of a template.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub(crate) struct ParseOptions {
  pub(crate) trim_tag_left: bool,
  pub(crate) trim_tag_right: bool,
  pub(crate) trim_output_left: bool,
  pub(crate) trim_output_right: bool,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn mode_parse() {
    assert_eq!(RuntimeMode::parse("production"), RuntimeMode::Production);
    assert_eq!(RuntimeMode::parse(" Production "), RuntimeMode::Production);
    assert_eq!(RuntimeMode::parse("development"), RuntimeMode::Development);
    assert_eq!(RuntimeMode::parse(""), RuntimeMode::Development);
    assert_eq!(RuntimeMode::parse("prod"), RuntimeMode::Development);
  }

  #[test]
  fn defaults_applied() {
    let config = EngineConfig::default();
    assert_eq!(config.file_extension, ".liquid");
    assert!(!config.cache_enabled);
    assert!(config.strict_filters && config.strict_variables);
    assert!(!config.trim_tag_left);
    assert!(!config.trim_output_right);
    assert_eq!(config.parse_options(), ParseOptions::default());
  }

  #[test]
  fn cache_follows_mode_unless_overridden() {
    let options = EngineOptions::default();
    assert!(EngineConfig::resolve(&options, RuntimeMode::Production).cache_enabled);
    assert!(!EngineConfig::resolve(&options, RuntimeMode::Development).cache_enabled);

    let forced_off = EngineOptions { cache: Some(false), ..Default::default() };
    assert!(!EngineConfig::resolve(&forced_off, RuntimeMode::Production).cache_enabled);
    let forced_on = EngineOptions { cache: Some(true), ..Default::default() };
    assert!(EngineConfig::resolve(&forced_on, RuntimeMode::Development).cache_enabled);
  }

  #[test]
  fn strictness_cannot_be_disabled() {
    let lenient = EngineOptions {
      strict_filters: Some(false),
      strict_variables: Some(false),
      ..Default::default()
    };
    let config = EngineConfig::resolve(&lenient, RuntimeMode::Development);
    assert!(config.strict_filters);
    assert!(config.strict_variables);
  }

  #[test]
  fn merge_prefers_overrides() {
    let base = EngineOptions {
      trim_tag_left: Some(true),
      trim_tag_right: Some(true),
      file_extension: Some(".liquid".into()),
      ..Default::default()
    };
    let overrides = EngineOptions {
      trim_tag_right: Some(false),
      file_extension: Some(".html".into()),
      ..Default::default()
    };
    let merged = base.merge(&overrides);
    assert_eq!(merged.trim_tag_left, Some(true));
    assert_eq!(merged.trim_tag_right, Some(false));
    assert_eq!(merged.file_extension.as_deref(), Some(".html"));
    assert_eq!(merged.cache, None);
  }

  #[test]
  fn options_deserialize_from_json() {
    let options: EngineOptions =
      serde_json::from_str(r#"{"cache": true, "strict_filters": true, "trim_tag_left": true}"#)
        .unwrap();
    assert_eq!(options.cache, Some(true));
    assert_eq!(options.strict_filters, Some(true));
    assert_eq!(options.trim_tag_left, Some(true));
    assert_eq!(options.trim_output_left, None);
  }

  #[test]
  fn options_reject_unknown_fields() {
    assert!(serde_json::from_str::<EngineOptions>(r#"{"trimTagLeft": true}"#).is_err());
    assert!(serde_json::from_str::<EngineOptions>(r#"{"strictFilters": true}"#).is_err());
    assert!(serde_json::from_str::<EngineOptions>(r#"{"greedy": false}"#).is_err());
  }
}
