/* src/server/core/rust/src/config.rs */

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use pagewright_engine::{EngineOptions, RuntimeMode};
use serde::Deserialize;

/// Environment variable holding the runtime mode (`production` or anything else).
pub const MODE_ENV: &str = "PAGEWRIGHT_ENV";

pub const CONFIG_FILE: &str = "pagewright.toml";

/// Read the runtime mode from the process environment. Call once at startup.
pub fn runtime_mode_from_env() -> RuntimeMode {
  runtime_mode_from(|key| std::env::var(key).ok())
}

pub fn runtime_mode_from(lookup: impl Fn(&str) -> Option<String>) -> RuntimeMode {
  lookup(MODE_ENV).map_or(RuntimeMode::Development, |value| RuntimeMode::parse(&value))
}

/// Contents of `pagewright.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
  pub mode: Option<RuntimeMode>,
  pub engine: EngineOptions,
}

impl ServerConfig {
  /// A mode set in the file wins over the environment.
  pub fn resolve_mode(&self, env_mode: RuntimeMode) -> RuntimeMode {
    self.mode.unwrap_or(env_mode)
  }
}

pub fn load_server_config(path: &Path) -> Result<ServerConfig> {
  let content =
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
  let config: ServerConfig =
    toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))?;
  Ok(config)
}

/// Walk upward from `start` to find `pagewright.toml`, like Cargo.toml discovery.
/// `Ok(None)` means no directory up to the root has one.
pub fn find_server_config(start: &Path) -> Result<Option<PathBuf>> {
  let mut dir =
    start.canonicalize().with_context(|| format!("failed to canonicalize {}", start.display()))?;
  loop {
    let candidate = dir.join(CONFIG_FILE);
    if candidate.is_file() {
      return Ok(Some(candidate));
    }
    if !dir.pop() {
      tracing::debug!(start = %start.display(), "no {CONFIG_FILE} found");
      return Ok(None);
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn mode_from_lookup() {
    let production = runtime_mode_from(|_| Some("production".into()));
    assert_eq!(production, RuntimeMode::Production);
    assert_eq!(runtime_mode_from(|_| Some("staging".into())), RuntimeMode::Development);
    assert_eq!(runtime_mode_from(|_| None), RuntimeMode::Development);
  }

  #[test]
  fn mode_lookup_reads_expected_key() {
    let mode = runtime_mode_from(|key| (key == MODE_ENV).then(|| "production".to_string()));
    assert_eq!(mode, RuntimeMode::Production);
  }

  #[test]
  fn parse_full_config() {
    let toml_str = r#"
mode = "production"

[engine]
trim_tag_right = false
trim_output_left = true
"#;
    let config: ServerConfig = toml::from_str(toml_str).unwrap();
    assert_eq!(config.mode, Some(RuntimeMode::Production));
    assert_eq!(config.engine.trim_tag_right, Some(false));
    assert_eq!(config.engine.trim_output_left, Some(true));
    assert_eq!(config.engine.trim_tag_left, None);
  }

  #[test]
  fn empty_config_is_default() {
    let config: ServerConfig = toml::from_str("").unwrap();
    assert_eq!(config, ServerConfig::default());
    assert_eq!(config.resolve_mode(RuntimeMode::Production), RuntimeMode::Production);
  }

  #[test]
  fn file_mode_wins_over_env() {
    let config = ServerConfig { mode: Some(RuntimeMode::Development), ..Default::default() };
    assert_eq!(config.resolve_mode(RuntimeMode::Production), RuntimeMode::Development);
  }

  #[test]
  fn unknown_keys_rejected() {
    assert!(toml::from_str::<ServerConfig>("[engine]\nstrictFilters = true").is_err());
    assert!(toml::from_str::<ServerConfig>("[engine]\ngreedy = false").is_err());
    assert!(toml::from_str::<ServerConfig>("port = 3000").is_err());
  }

  #[test]
  fn load_reports_path_on_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(CONFIG_FILE);
    std::fs::write(&path, "mode = 42").unwrap();
    let err = load_server_config(&path).unwrap_err();
    assert!(err.to_string().contains("failed to parse"));

    let missing = dir.path().join("missing.toml");
    let err = load_server_config(&missing).unwrap_err();
    assert!(err.to_string().contains("failed to read"));
  }

  #[test]
  fn find_walks_upward() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(CONFIG_FILE), "[engine]\ncache = true\n").unwrap();
    let nested = dir.path().join("a/b");
    std::fs::create_dir_all(&nested).unwrap();
    let found = find_server_config(&nested).unwrap().unwrap();
    assert_eq!(found.file_name().and_then(|n| n.to_str()), Some(CONFIG_FILE));
    let config = load_server_config(&found).unwrap();
    assert_eq!(config.engine.cache, Some(true));
  }

  #[test]
  fn find_without_config_is_none() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("empty");
    std::fs::create_dir_all(&nested).unwrap();
    assert!(find_server_config(&nested).unwrap().is_none());
  }

  #[test]
  fn find_reports_unreadable_start() {
    let dir = tempfile::tempdir().unwrap();
    let err = find_server_config(&dir.path().join("does-not-exist")).unwrap_err();
    assert!(err.to_string().contains("failed to canonicalize"));
  }
}
