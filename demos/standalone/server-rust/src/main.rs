/* demos/standalone/server-rust/src/main.rs */

use std::env;
use std::path::PathBuf;

use clap::Parser;
use pagewright_server::{
  PageServer, ServerConfig, StaticWidgetProvider, find_server_config, load_server_config,
  people_page, runtime_mode_from_env, widget_page,
};
use pagewright_server_axum::IntoAxumRouter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "demo-server-rust", about = "Serve the Pagewright demo pages")]
struct Cli {
  /// Port to listen on
  #[arg(short, long, default_value_t = 3000)]
  port: u16,
  /// Config file; defaults to the nearest pagewright.toml, if any
  #[arg(short, long)]
  config: Option<PathBuf>,
}

fn load_config(explicit: Option<PathBuf>) -> anyhow::Result<ServerConfig> {
  let path = match explicit {
    Some(path) => path,
    None => match find_server_config(&env::current_dir()?)? {
      Some(path) => path,
      None => return Ok(ServerConfig::default()),
    },
  };
  tracing::info!(path = %path.display(), "loading config");
  load_server_config(&path)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .init();

  let cli = Cli::parse();
  let config = load_config(cli.config)?;
  let mode = config.resolve_mode(runtime_mode_from_env());
  tracing::info!(?mode, "starting page server");

  PageServer::new()
    .page(people_page())
    .page(widget_page())
    .widget_provider(StaticWidgetProvider::default())
    .engine_options(config.engine)
    .mode(mode)
    .serve(&format!("0.0.0.0:{}", cli.port))
    .await
}
