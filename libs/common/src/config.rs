//! Client configuration for the catalog admin front end
//!
//! Both HTTP clients (public and authenticated) share one backend base
//! address, so everything lives in a single struct read from the environment.

use crate::error::{StorageError, StorageResult};
use std::env;
use std::path::PathBuf;

const DEFAULT_BASE_URL: &str = "http://localhost:8080";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_PAGE_SIZE: u32 = 10;

/// Client configuration struct
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend base address
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Number of products per listing page
    pub page_size: u32,
    /// File backing the durable session token
    pub token_path: PathBuf,
}

impl ClientConfig {
    /// Create a new ClientConfig from environment variables
    ///
    /// # Environment Variables
    /// - `ADMIN_API_BASE_URL`: Backend base address (default: "http://localhost:8080")
    /// - `ADMIN_API_TIMEOUT`: Request timeout in seconds (default: 30)
    /// - `ADMIN_PAGE_SIZE`: Products per page (default: 10)
    /// - `ADMIN_TOKEN_PATH`: Session token file (default: platform data dir)
    pub fn from_env() -> StorageResult<Self> {
        let base_url =
            env::var("ADMIN_API_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        let timeout_secs = env::var("ADMIN_API_TIMEOUT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        let page_size = env::var("ADMIN_PAGE_SIZE")
            .ok()
            .and_then(|s| s.parse().ok())
            .filter(|size: &u32| *size > 0)
            .unwrap_or(DEFAULT_PAGE_SIZE);

        let token_path = match env::var("ADMIN_TOKEN_PATH") {
            Ok(path) if !path.trim().is_empty() => PathBuf::from(path),
            _ => default_token_path()?,
        };

        Ok(Self {
            base_url,
            timeout_secs,
            page_size,
            token_path,
        })
    }

    /// Configuration pointing at an explicit backend, used by embedders and tests
    pub fn with_base_url(base_url: impl Into<String>, token_path: PathBuf) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            page_size: DEFAULT_PAGE_SIZE,
            token_path,
        }
    }
}

fn default_token_path() -> StorageResult<PathBuf> {
    let mut path = dirs::data_dir().ok_or_else(|| {
        StorageError::Configuration("No data directory; set ADMIN_TOKEN_PATH".to_string())
    })?;
    path.push("catalog-admin");
    path.push("session-token");
    Ok(path)
}
