/* src/server/engine/rust/src/cache.rs */

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};

use dashmap::DashMap;

use crate::Template;
use crate::config::ParseOptions;

/// Entries kept by [`TemplateCache::new`] and the global cache.
pub const DEFAULT_CACHE_CAPACITY: usize = 1024;

/// Source text, the parse-shaping options, and the registered extension names.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct CacheKey {
  source: String,
  options: ParseOptions,
  extensions: String,
}

impl CacheKey {
  pub(crate) fn new(source: &str, options: ParseOptions, extensions: String) -> Self {
    Self { source: source.to_string(), options, extensions }
  }
}

#[derive(Debug)]
struct CacheEntry {
  template: Arc<Template>,
  last_used: u64,
}

/// Parsed templates with least-recently-used eviction once `capacity` is exceeded.
///
/// Lookup and insert are separate steps: two engines parsing the same source
/// concurrently both parse it, and the later insert replaces the earlier one.
#[derive(Debug)]
pub struct TemplateCache {
  entries: DashMap<CacheKey, CacheEntry>,
  clock: AtomicU64,
  capacity: usize,
}

impl TemplateCache {
  pub fn new() -> Self {
    Self::with_capacity(DEFAULT_CACHE_CAPACITY)
  }

  /// A capacity of zero is treated as one.
  pub fn with_capacity(capacity: usize) -> Self {
    Self { entries: DashMap::new(), clock: AtomicU64::new(0), capacity: capacity.max(1) }
  }

  /// The process-wide cache used by engines built with `cache_enabled`.
  pub fn global() -> Arc<TemplateCache> {
    static GLOBAL: OnceLock<Arc<TemplateCache>> = OnceLock::new();
    GLOBAL.get_or_init(|| Arc::new(TemplateCache::new())).clone()
  }

  fn tick(&self) -> u64 {
    self.clock.fetch_add(1, Ordering::Relaxed)
  }

  pub(crate) fn get(&self, key: &CacheKey) -> Option<Arc<Template>> {
    let mut entry = self.entries.get_mut(key)?;
    entry.last_used = self.tick();
    Some(Arc::clone(&entry.template))
  }

  pub(crate) fn insert(&self, key: CacheKey, template: Arc<Template>) {
    let last_used = self.tick();
    self.entries.insert(key, CacheEntry { template, last_used });
    self.evict();
  }

  fn evict(&self) {
    while self.entries.len() > self.capacity {
      let oldest = self
        .entries
        .iter()
        .min_by_key(|entry| entry.value().last_used)
        .map(|entry| entry.key().clone());
      let Some(key) = oldest else {
        break;
      };
      self.entries.remove(&key);
      tracing::debug!(capacity = self.capacity, "evicted least recently used template");
    }
  }

  pub fn capacity(&self) -> usize {
    self.capacity
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  pub fn clear(&self) {
    self.entries.clear();
  }
}

impl Default for TemplateCache {
  fn default() -> Self {
    Self::new()
  }
}
