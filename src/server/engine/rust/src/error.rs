/* src/server/engine/rust/src/error.rs */

use std::fmt;

/// Failure raised by a filter function.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct FilterError {
  message: String,
}

impl FilterError {
  pub fn new(message: impl Into<String>) -> Self {
    Self { message: message.into() }
  }

  pub fn message(&self) -> &str {
    &self.message
  }
}

/// Failure raised by a custom tag while producing its fragment.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct TagError {
  message: String,
}

impl TagError {
  pub fn new(message: impl Into<String>) -> Self {
    Self { message: message.into() }
  }

  pub fn message(&self) -> &str {
    &self.message
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ExtensionKind {
  Tag,
  Filter,
}

impl fmt::Display for ExtensionKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Tag => f.write_str("tag"),
      Self::Filter => f.write_str("filter"),
    }
  }
}

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
  #[error("syntax error: {0}")]
  Syntax(String),

  #[error("undefined variable '{0}'")]
  UndefinedVariable(String),

  #[error("undefined filter '{0}'")]
  UndefinedFilter(String),

  #[error("filter '{name}' failed: {source}")]
  Filter {
    name: String,
    #[source]
    source: FilterError,
  },

  #[error("tag '{name}' failed: {source}")]
  Tag {
    name: String,
    #[source]
    source: TagError,
  },

  #[error("render failed: {0}")]
  Render(String),

  #[error("{kind} '{name}' is already registered")]
  DuplicateExtension { kind: ExtensionKind, name: String },

  #[error("tag name '{0}' is reserved for a built-in tag")]
  ReservedTag(String),
}

/// Message liquid errors carry when a registered filter function fails.
pub(crate) const FILTER_FAILED: &str = "Custom filter failed";

/// Read `key=value` from the context lines of a liquid error report.
fn context_value(report: &str, key: &str) -> Option<String> {
  let prefix = format!("{key}=");
  report
    .lines()
    .find_map(|line| line.trim_start().strip_prefix(&prefix))
    .map(|value| value.trim().to_string())
}

/// First line of the report without the `liquid: ` prefix.
fn headline(report: &str) -> String {
  let first = report.lines().next().unwrap_or_default();
  first.strip_prefix("liquid: ").unwrap_or(first).to_string()
}

impl EngineError {
  /// Classify an error raised while building the parser or parsing a template.
  pub(crate) fn from_parse(err: &liquid_core::Error) -> Self {
    let report = err.to_string();
    if report.contains("Unknown filter") {
      let name = context_value(&report, "requested filter").unwrap_or_else(|| headline(&report));
      return Self::UndefinedFilter(name);
    }
    Self::Syntax(report.trim_end().to_string())
  }

  /// Classify an error raised while rendering a parsed template.
  pub(crate) fn from_render(err: &liquid_core::Error) -> Self {
    let report = err.to_string();
    if report.contains("Unknown variable") || report.contains("Unknown index") {
      let name = context_value(&report, "requested variable")
        .or_else(|| context_value(&report, "requested index"))
        .unwrap_or_else(|| headline(&report));
      return Self::UndefinedVariable(name);
    }
    if report.contains(FILTER_FAILED) {
      let name = context_value(&report, "filter").unwrap_or_default();
      let cause = context_value(&report, "cause").unwrap_or_else(|| headline(&report));
      return Self::Filter { name, source: FilterError::new(cause) };
    }
    Self::Render(report.trim_end().to_string())
  }

  /// True for unknown filters and undefined variables.
  pub fn is_strict_violation(&self) -> bool {
    matches!(self, Self::UndefinedVariable(_) | Self::UndefinedFilter(_))
  }
}

pub type Result<T> = std::result::Result<T, EngineError>;
