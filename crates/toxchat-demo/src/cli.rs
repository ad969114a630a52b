use crate::models::BackendKind;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "toxchat-demo")]
#[command(author, version, about = "Toxicity-screened chat server and tools")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the chat server with the web UI
    Serve {
        /// Listen port
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Listen address
        #[arg(short, long, default_value = "127.0.0.1")]
        address: String,

        /// Classifier backend: lexicon or remote
        #[arg(short, long, default_value = "lexicon", value_parser = parse_backend)]
        backend: BackendKind,

        /// Inference service URL (for the remote backend)
        #[arg(long, env = "TOXCHAT_REMOTE_URL")]
        remote_url: Option<String>,

        /// Match-confidence threshold passed to the one-time model load
        #[arg(long, default_value = "0.9")]
        threshold: f32,

        /// Enable verbose logging
        #[arg(short, long)]
        verbose: bool,
    },

    /// Classify a single message and print the verdict
    Classify {
        /// The message to classify
        message: String,

        /// Classifier backend: lexicon or remote
        #[arg(short, long, default_value = "lexicon", value_parser = parse_backend)]
        backend: BackendKind,

        /// Inference service URL (for the remote backend)
        #[arg(long, env = "TOXCHAT_REMOTE_URL")]
        remote_url: Option<String>,

        /// Match-confidence threshold passed to the one-time model load
        #[arg(long, default_value = "0.9")]
        threshold: f32,

        /// Enable verbose logging
        #[arg(short, long)]
        verbose: bool,
    },
}

fn parse_backend(s: &str) -> Result<BackendKind, String> {
    s.parse()
}
