use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tourism::cli::{Cli, Commands};
use tourism::config::AppConfig;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tourism=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Serve { model, port, host } => {
            tourism::cli::serve(config, model, port, host).await?;
        }
        Commands::Predict { input, model } => {
            tourism::cli::predict(config, input, model).await?;
        }
        Commands::Pull {
            repo,
            file,
            revision,
            output,
        } => {
            tourism::cli::pull(config, repo, file, revision, output).await?;
        }
        Commands::Info { model } => {
            tourism::cli::info(config, model).await?;
        }
        Commands::Publish { space, root_dir } => {
            tourism::cli::publish(config, space, root_dir).await?;
        }
    }

    Ok(())
}
