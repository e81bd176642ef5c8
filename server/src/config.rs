//! Configuration for the kvshelf server.

use std::path::PathBuf;

use clap::Parser;
use serde::{Deserialize, Serialize};

use store::BackendConfig;

/// CLI arguments for the kvshelf server.
#[derive(Parser, Debug)]
#[command(about = "Namespaced key-value storage over HTTP")]
pub struct CliArgs {
    /// Path to config file (TOML).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Listen address override, e.g. 127.0.0.1:8080.
    #[arg(short, long)]
    pub listen: Option<String>,
}

impl CliArgs {
    /// Parse CLI arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Load configuration from file or use defaults, then apply CLI
    /// overrides.
    pub fn load_config(&self) -> anyhow::Result<ServerConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let contents = std::fs::read_to_string(path)?;
                toml::from_str(&contents)?
            }
            None => ServerConfig::default(),
        };
        if let Some(listen) = &self.listen {
            config.listen_address = listen.clone();
        }
        Ok(config)
    }
}

/// Configuration for the kvshelf server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address the HTTP server binds to.
    pub listen_address: String,

    /// Storage backend configuration.
    pub backend: BackendConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_address: "127.0.0.1:8080".to_string(),
            backend: BackendConfig::default(),
        }
    }
}
