//! CLI commands
//!
//! `tourism serve` runs the prediction service; the other commands cover
//! one-off scoring, artifact download and inspection, and publishing.

mod info;
mod predict;
mod publish;
mod pull;
mod serve;

pub use info::info;
pub use predict::predict;
pub use publish::publish;
pub use pull::pull;
pub use serve::serve;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Tourism - wellness package purchase prediction service
#[derive(Parser)]
#[command(name = "tourism")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML, or JSON by extension)
    #[arg(long, short, global = true, env = "TOURISM_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the prediction server
    Serve {
        /// Local model file or directory (skips the registry)
        #[arg(long, short)]
        model: Option<PathBuf>,

        /// Port to listen on
        #[arg(long)]
        port: Option<u16>,

        /// Host to bind to
        #[arg(long)]
        host: Option<String>,
    },

    /// Score one customer record given as JSON
    Predict {
        /// JSON file with the record (reads stdin when omitted)
        input: Option<PathBuf>,

        /// Local model file or directory (skips the registry)
        #[arg(long, short)]
        model: Option<PathBuf>,
    },

    /// Download the model artifact from the Hugging Face Hub
    Pull {
        /// Repository ID (e.g., "cktai/tourism-wellness-rf-model")
        repo: Option<String>,

        /// Artifact file inside the repository
        #[arg(long)]
        file: Option<String>,

        /// Branch, tag or commit
        #[arg(long)]
        revision: Option<String>,

        /// Output directory
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Show model information
    Info {
        /// Local model file or directory (skips the registry)
        model: Option<PathBuf>,
    },

    /// Upload the deployment files to the hosting Space
    Publish {
        /// Target Space id (e.g., "cktai/tourism-wellness-predictor")
        #[arg(long)]
        space: Option<String>,

        /// Directory the deployment file list is relative to
        #[arg(long)]
        root_dir: Option<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_serve() {
        let cli = Cli::try_parse_from([
            "tourism", "serve", "--port", "8080", "--model", "models/model.json",
        ])
        .unwrap();
        match cli.command {
            Commands::Serve { model, port, host } => {
                assert_eq!(model, Some(PathBuf::from("models/model.json")));
                assert_eq!(port, Some(8080));
                assert_eq!(host, None);
            }
            _ => panic!("expected serve"),
        }
    }

    #[test]
    fn test_global_config_flag() {
        let cli = Cli::try_parse_from(["tourism", "publish", "--config", "tourism.yaml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("tourism.yaml")));
        assert!(matches!(cli.command, Commands::Publish { space: None, .. }));
    }

    #[test]
    fn test_unknown_command() {
        assert!(Cli::try_parse_from(["tourism", "train"]).is_err());
    }
}
