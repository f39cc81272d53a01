/*
[INPUT]:  CLI arguments, environment, optional YAML configuration file
[OUTPUT]: JSON result of one Elemental Live operation on stdout
[POS]:    Binary entry point
[UPDATE]: When changing CLI flags or startup flow
*/

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use serde_json::Value;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use elemental_live_cli::{Command, FileConfig, Overrides, ResolvedConfig, execute};

#[derive(Parser, Debug)]
#[command(name = "elemental-live", version, about = "Elemental Live control API client")]
struct Cli {
    #[arg(long = "config", value_name = "PATH")]
    config_path: Option<PathBuf>,
    #[arg(long = "server-url", env = "ELEMENTAL_SERVER_URL", value_name = "URL")]
    server_url: Option<String>,
    #[arg(long = "user", env = "ELEMENTAL_USER")]
    user: Option<String>,
    #[arg(long = "api-key", env = "ELEMENTAL_API_KEY", hide_env_values = true)]
    api_key: Option<String>,
    #[arg(long = "timeout-secs", value_name = "SECS")]
    timeout_secs: Option<u64>,
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "info")]
    log_level: String,
    #[command(subcommand)]
    command: Command,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    init_tracing(&args.log_level)?;

    let file = match &args.config_path {
        Some(path) => {
            info!(config_path = %path.display(), "loading configuration");
            FileConfig::from_file(path).context("load config")?
        }
        None => FileConfig::default(),
    };
    let overrides = Overrides {
        server_url: args.server_url,
        user: args.user,
        api_key: args.api_key,
        timeout_secs: args.timeout_secs,
    };
    let resolved = ResolvedConfig::resolve(file, overrides).context("resolve configuration")?;
    debug!(
        server_url = %resolved.server_url,
        signed = resolved.credentials.is_some(),
        "configuration resolved"
    );

    if args.command == Command::CheckConfig {
        print_json(&resolved.redacted())?;
        return Ok(());
    }

    let client = resolved.build_client()?;
    let value = execute(&client, &args.command).await?;
    print_json(&value)
}

fn init_tracing(log_level: &str) -> Result<()> {
    let filter = EnvFilter::try_new(log_level).context("invalid log level")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow!(err))
        .context("initialize tracing subscriber")?;
    Ok(())
}

fn print_json(value: &Value) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("render output")?;
    println!("{rendered}");
    Ok(())
}
