use std::path::PathBuf;

use anyhow::Result;
use dotenvy::dotenv;

/// Default preview row count when the user leaves the input blank.
pub const DEFAULT_PREVIEW_ROWS: u32 = 10;

/// Extension the backend accepts for uploaded datasets.
pub const DATASET_EXTENSION: &str = ".csv";

#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the analysis backend, no trailing slash.
    pub backend_url: String,
    /// Where downloaded cleaned datasets are written.
    pub download_dir: PathBuf,
    /// The rendered dashboard page.
    pub dashboard_page: PathBuf,
}

impl Config {
    pub fn new() -> Result<Self> {
        // Load .env file first
        dotenv().ok();

        let backend_url = std::env::var("BACKEND_URL")
            .unwrap_or_else(|_| "http://127.0.0.1:5000".to_string());
        let backend_url = backend_url.trim_end_matches('/').to_string();

        let download_dir = std::env::var("DOWNLOAD_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("downloads"));

        let dashboard_page = std::env::var("DASHBOARD_PAGE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("dashboard.html"));

        Ok(Config {
            backend_url,
            download_dir,
            dashboard_page,
        })
    }
}
