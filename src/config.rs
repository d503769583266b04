//! Runtime configuration from environment variables

use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub output_dir: PathBuf,
    pub max_upload_bytes: usize,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Reads a `.env` file when present. Everything has a default: port 5000,
    /// `outputs` directory, 16 MiB upload cap.
    pub fn from_env() -> Result<Self> {
        let _ = dotenv();

        let port = env::var("PORT")
            .unwrap_or_else(|_| "5000".to_string())
            .parse()
            .context("PORT must be a valid number")?;

        let output_dir = env::var("OUTPUT_DIR")
            .unwrap_or_else(|_| "outputs".to_string())
            .into();

        let max_upload_mb: usize = env::var("MAX_UPLOAD_MB")
            .unwrap_or_else(|_| "16".to_string())
            .parse()
            .context("MAX_UPLOAD_MB must be a valid number")?;

        Ok(Self {
            port,
            output_dir,
            max_upload_bytes: max_upload_mb * 1024 * 1024,
        })
    }
}
