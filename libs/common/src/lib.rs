//! Common library for the catalog admin application
//!
//! This crate provides the pieces any catalog admin front end needs before it
//! talks to the backend: client configuration, durable session token storage
//! and the errors those can raise.
//!
//! ```rust,no_run
//! use common::config::ClientConfig;
//! use common::token::{FileTokenStorage, TokenStorage};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig::from_env()?;
//!     let storage = FileTokenStorage::new(config.token_path);
//!     println!("Logged in: {}", storage.get()?.is_some());
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod token;
