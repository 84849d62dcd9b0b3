//! Command-line interface

use clap::Parser;
use sentiscope_classifiers::Backend;

#[derive(Parser, Debug, Clone, Default)]
#[command(name = "sentiscope-server")]
#[command(about = "Sentiment, emotion and aspect analysis over HTTP", long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "SENTISCOPE_CONFIG", default_value = "sentiscope.yaml")]
    pub config: String,

    /// Listen address (overrides the config file)
    #[arg(short = 'l', long)]
    pub listen: Option<String>,

    /// Listen port (overrides the config file)
    #[arg(short = 'P', long)]
    pub port: Option<u16>,

    /// Classifier backend for every model: hub or lexicon
    #[arg(short, long)]
    pub backend: Option<Backend>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}
