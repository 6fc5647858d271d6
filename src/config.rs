//! Server configuration from the environment: HOST, PORT, DATA_DIR.

use std::path::PathBuf;

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory holding tournament.json and history.json.
    pub data_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            data_dir: default_data_dir(),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_vars(
            std::env::var("HOST").ok(),
            std::env::var("PORT").ok(),
            std::env::var("DATA_DIR").ok(),
        )
    }

    /// Build from raw values; missing or unparsable ones fall back to the defaults.
    pub fn from_vars(host: Option<String>, port: Option<String>, data_dir: Option<String>) -> Self {
        Self {
            host: host
                .filter(|h| !h.trim().is_empty())
                .unwrap_or_else(default_host),
            port: port
                .and_then(|p| p.trim().parse().ok())
                .unwrap_or_else(default_port),
            data_dir: data_dir
                .filter(|d| !d.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(default_data_dir),
        }
    }
}
