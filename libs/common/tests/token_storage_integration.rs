//! Integration tests for the durable session token store
//!
//! These tests verify that a token written by one storage handle is visible
//! to a fresh handle on the same file, the way a token must survive a
//! restart of the admin front end.

use common::config::ClientConfig;
use common::token::{FileTokenStorage, TokenStorage};
use std::sync::Arc;

#[test]
fn test_token_survives_new_handle() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let config = ClientConfig::with_base_url("http://localhost:8080", dir.path().join("token"));

    let first = FileTokenStorage::new(config.token_path.clone());
    first.set("tok-1")?;

    // A second handle simulates the next run of the application
    let second = FileTokenStorage::new(config.token_path.clone());
    assert_eq!(second.get()?, Some("tok-1".to_string()));

    second.remove()?;
    assert_eq!(first.get()?, None, "Token should be gone for every handle");

    Ok(())
}

#[test]
fn test_storage_usable_as_trait_object() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let storage: Arc<dyn TokenStorage> = Arc::new(FileTokenStorage::new(dir.path().join("t")));

    let reader = Arc::clone(&storage);
    storage.set("shared")?;
    assert_eq!(reader.get()?, Some("shared".to_string()));

    Ok(())
}
