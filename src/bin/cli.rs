//! CLI binary for webscout.

use clap::Parser;
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;
use webscout::{PipelineResult, ResearchConfig, ResearchPipeline};

/// webscout: find a trustworthy source for a question and summarise it.
#[derive(Parser)]
#[command(name = "webscout", version, about)]
struct Cli {
    /// Path to TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the result as JSON instead of text.
    #[arg(long)]
    json: bool,

    /// Print the effective configuration as TOML and exit.
    #[arg(long)]
    print_config: bool,

    /// A question, topic or URL.
    #[arg(required_unless_present = "print_config")]
    input: Vec<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout carries only the answer.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("webscout=info,webscout_search=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    if cli.print_config {
        print!("{}", config.to_toml()?);
        return Ok(());
    }

    let pipeline = ResearchPipeline::from_config(&config)?;
    let input = cli.input.join(" ");

    let cancel = CancellationToken::new();
    let ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            ctrl_c.cancel();
        }
    });

    let result = pipeline.run_with_cancel(&input, &cancel).await;
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{}", webscout::answer::render_text(&result));
    }

    if let PipelineResult::Failure { reason, .. } = result {
        tracing::debug!(%reason, "request failed");
        std::process::exit(1);
    }
    Ok(())
}

/// Explicit path must exist; the default path is optional.
fn load_config(path: Option<&std::path::Path>) -> anyhow::Result<ResearchConfig> {
    if let Some(path) = path {
        return Ok(ResearchConfig::from_file(path)?);
    }
    let default_path = ResearchConfig::default_config_path();
    if default_path.exists() {
        tracing::debug!(path = %default_path.display(), "loading config");
        Ok(ResearchConfig::from_file(&default_path)?)
    } else {
        Ok(ResearchConfig::default())
    }
}
