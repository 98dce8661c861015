/* src/server/engine/rust/src/lib.rs */

mod cache;
mod config;
mod error;
mod plugins;
mod registry;
mod trim;

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde_json::Value as JsonValue;

pub use cache::{DEFAULT_CACHE_CAPACITY, TemplateCache};
pub use config::{DEFAULT_FILE_EXTENSION, EngineConfig, EngineOptions, RuntimeMode};
pub use error::{EngineError, ExtensionKind, FilterError, Result, TagError};
pub use liquid_core::{Value, ValueView};
pub use registry::{Extension, ExtensionKey, FilterFn, RESERVED_TAGS, Registry, TagHandler};

use cache::CacheKey;
use plugins::{FnFilter, PlaceholderTag, TAG_MARK};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// A parsed liquid template.
pub struct Template {
  inner: liquid::Template,
}

impl fmt::Debug for Template {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Template").finish_non_exhaustive()
  }
}

/// A configured liquid engine with its own tag and filter registry.
#[derive(Debug)]
pub struct Engine {
  config: EngineConfig,
  registry: Registry,
  cache: Option<Arc<TemplateCache>>,
}

impl Engine {
  /// Engines with `cache_enabled` share [`TemplateCache::global`].
  pub fn new(config: EngineConfig) -> Self {
    let cache = config.cache_enabled.then(TemplateCache::global);
    Self { config, registry: Registry::new(), cache }
  }

  /// Like [`Engine::new`] but caches into `cache` instead of the global one.
  pub fn with_cache(config: EngineConfig, cache: Arc<TemplateCache>) -> Self {
    let cache = config.cache_enabled.then_some(cache);
    Self { config, registry: Registry::new(), cache }
  }

  pub fn config(&self) -> &EngineConfig {
    &self.config
  }

  pub fn registry(&self) -> &Registry {
    &self.registry
  }

  pub fn register_tag(&mut self, name: &str, handler: impl TagHandler + 'static) -> Result<()> {
    self.registry.register(name, Extension::Tag(Arc::new(handler)))?;
    tracing::debug!(name, "registered tag");
    Ok(())
  }

  pub fn register_filter<F>(&mut self, name: &str, filter: F) -> Result<()>
  where
    F: Fn(&dyn ValueView, &[Value]) -> std::result::Result<Value, FilterError>
      + Send
      + Sync
      + 'static,
  {
    self.registry.register(name, Extension::Filter(Arc::new(filter)))?;
    tracing::debug!(name, "registered filter");
    Ok(())
  }

  pub fn has_tag(&self, name: &str) -> bool {
    self.registry.tag(name).is_some()
  }

  pub fn has_filter(&self, name: &str) -> bool {
    self.registry.filter(name).is_some()
  }

  /// Liquid's standard library plus every registered extension.
  fn parser(&self) -> Result<liquid::Parser> {
    let mut builder = liquid::ParserBuilder::with_stdlib();
    for name in self.registry.tag_names() {
      builder = builder.tag(PlaceholderTag::new(name));
    }
    for (name, filter) in self.registry.filters() {
      builder = builder.filter(FnFilter::new(name, Arc::clone(filter)));
    }
    builder.build().map_err(|err| EngineError::from_parse(&err))
  }

  /// Parse `source`, consulting the template cache when enabled. Parsing does
  /// no I/O; custom tags only leave a placeholder here.
  pub fn parse(&self, source: &str) -> Result<Arc<Template>> {
    let options = self.config.parse_options();
    let key = CacheKey::new(source, options, self.registry.signature());
    if let Some(template) = self.cache.as_ref().and_then(|cache| cache.get(&key)) {
      tracing::debug!(bytes = source.len(), "template cache hit");
      return Ok(template);
    }

    let trimmed = trim::apply_trims(source, &options);
    let inner = self.parser()?.parse(&trimmed).map_err(|err| EngineError::from_parse(&err))?;
    let template = Arc::new(Template { inner });
    tracing::debug!(bytes = source.len(), "parsed template");

    if let Some(cache) = &self.cache {
      cache.insert(key, Arc::clone(&template));
    }
    Ok(template)
  }

  /// Evaluate `template` against `context`, then await each custom tag in
  /// output order. A non-object context binds no variables. On failure no
  /// partial output is returned.
  pub async fn render(&self, template: &Template, context: &JsonValue) -> Result<String> {
    let rendered = {
      let globals = match context {
        JsonValue::Object(_) => liquid_core::model::to_object(context)
          .map_err(|err| EngineError::from_render(&err))?,
        _ => liquid_core::Object::new(),
      };
      template.inner.render(&globals).map_err(|err| EngineError::from_render(&err))?
    };
    self.resolve_tags(rendered).await
  }

  pub async fn parse_and_render(&self, source: &str, context: &JsonValue) -> Result<String> {
    let template = self.parse(source)?;
    self.render(&template, context).await
  }

  /// Replace tag placeholders with their fragments, one awaited call each.
  async fn resolve_tags(&self, rendered: String) -> Result<String> {
    if !rendered.contains(TAG_MARK) {
      return Ok(rendered);
    }
    let mark_len = TAG_MARK.len_utf8();
    let mut out = String::with_capacity(rendered.len());
    let mut rest = rendered.as_str();

    while let Some(start) = rest.find(TAG_MARK) {
      let after = &rest[start + mark_len..];
      let Some(end) = after.find(TAG_MARK) else {
        break;
      };
      let name = &after[..end];
      let Some(handler) = self.registry.tag(name) else {
        // a lone mark from context data, not a placeholder
        out.push_str(&rest[..start + mark_len]);
        rest = after;
        continue;
      };
      out.push_str(&rest[..start]);
      let fragment = handler
        .render()
        .await
        .map_err(|source| EngineError::Tag { name: name.to_string(), source })?;
      out.push_str(&fragment);
      rest = &after[end + mark_len..];
    }

    out.push_str(rest);
    Ok(out)
  }
}

#[cfg(test)]
mod tests;
