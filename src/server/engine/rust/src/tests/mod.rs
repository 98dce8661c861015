/* src/server/engine/rust/src/tests/mod.rs */

use super::*;
use serde_json::json;

mod strict;

fn engine() -> Engine {
  Engine::new(EngineConfig::default())
}

async fn render_with(engine: &Engine, source: &str, context: &JsonValue) -> Result<String> {
  engine.parse_and_render(source, context).await
}

async fn render(source: &str, context: &JsonValue) -> String {
  render_with(&engine(), source, context).await.unwrap()
}
