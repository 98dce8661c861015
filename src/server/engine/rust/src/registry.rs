/* src/server/engine/rust/src/registry.rs */

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use liquid_core::{Value, ValueView};

use crate::BoxFuture;
use crate::error::{EngineError, ExtensionKind, FilterError, Result, TagError};

/// Names claimed by liquid's standard tags and blocks.
pub const RESERVED_TAGS: &[&str] = &[
  "assign",
  "break",
  "capture",
  "case",
  "comment",
  "continue",
  "cycle",
  "decrement",
  "for",
  "if",
  "ifchanged",
  "include",
  "increment",
  "raw",
  "render",
  "tablerow",
  "unless",
];

/// A custom inline tag that takes no arguments. Each occurrence in the
/// rendered output is replaced by one awaited call to [`TagHandler::render`],
/// in output order.
pub trait TagHandler: Send + Sync {
  fn render(&self) -> BoxFuture<'_, std::result::Result<String, TagError>>;
}

/// Filter signature: input value plus evaluated positional arguments.
pub type FilterFn =
  Arc<dyn Fn(&dyn ValueView, &[Value]) -> std::result::Result<Value, FilterError> + Send + Sync>;

#[derive(Clone)]
pub enum Extension {
  Tag(Arc<dyn TagHandler>),
  Filter(FilterFn),
}

impl Extension {
  pub fn kind(&self) -> ExtensionKind {
    match self {
      Self::Tag(_) => ExtensionKind::Tag,
      Self::Filter(_) => ExtensionKind::Filter,
    }
  }
}

impl fmt::Debug for Extension {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "Extension::{:?}", self.kind())
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExtensionKey {
  pub kind: ExtensionKind,
  pub name: String,
}

/// Name-keyed tags and filters of one engine. Tags and filters live in
/// separate namespaces. A filter may shadow a standard filter of the same name.
#[derive(Debug, Clone, Default)]
pub struct Registry {
  entries: HashMap<ExtensionKey, Extension>,
}

impl Registry {
  pub fn new() -> Self {
    Self::default()
  }

  /// Register `extension` under `name`. Re-registering a name of the same kind
  /// is an error.
  pub fn register(&mut self, name: &str, extension: Extension) -> Result<()> {
    let kind = extension.kind();
    if kind == ExtensionKind::Tag && RESERVED_TAGS.contains(&name) {
      return Err(EngineError::ReservedTag(name.to_string()));
    }
    let key = ExtensionKey { kind, name: name.to_string() };
    if self.entries.contains_key(&key) {
      return Err(EngineError::DuplicateExtension { kind, name: name.to_string() });
    }
    self.entries.insert(key, extension);
    Ok(())
  }

  fn get(&self, kind: ExtensionKind, name: &str) -> Option<&Extension> {
    self.entries.get(&ExtensionKey { kind, name: name.to_string() })
  }

  pub fn tag(&self, name: &str) -> Option<&Arc<dyn TagHandler>> {
    match self.get(ExtensionKind::Tag, name) {
      Some(Extension::Tag(handler)) => Some(handler),
      _ => None,
    }
  }

  pub fn filter(&self, name: &str) -> Option<&FilterFn> {
    match self.get(ExtensionKind::Filter, name) {
      Some(Extension::Filter(filter)) => Some(filter),
      _ => None,
    }
  }

  pub(crate) fn tag_names(&self) -> impl Iterator<Item = &str> {
    self
      .entries
      .iter()
      .filter(|(key, _)| key.kind == ExtensionKind::Tag)
      .map(|(key, _)| key.name.as_str())
  }

  pub(crate) fn filters(&self) -> impl Iterator<Item = (&str, &FilterFn)> {
    self.entries.iter().filter_map(|(key, extension)| match extension {
      Extension::Filter(filter) => Some((key.name.as_str(), filter)),
      Extension::Tag(_) => None,
    })
  }

  /// Stable description of the registered names, e.g. `tag:widget,filter:upper`.
  pub(crate) fn signature(&self) -> String {
    let mut keys: Vec<&ExtensionKey> = self.entries.keys().collect();
    keys.sort();
    keys.iter().map(|key| format!("{}:{}", key.kind, key.name)).collect::<Vec<_>>().join(",")
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }
}
