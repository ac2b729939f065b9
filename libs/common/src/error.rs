//! Custom error types for the common library
//!
//! This module defines the errors raised by client configuration and
//! session token storage.

use std::io::Error as IoError;
use thiserror::Error;

/// Custom error type for token storage and configuration
#[derive(Error, Debug)]
pub enum StorageError {
    /// Error occurred while reading or writing the backing file
    #[error("Token storage I/O error: {0}")]
    Io(#[from] IoError),

    /// A lock guarding in-memory state was poisoned by a panicking writer
    #[error("Token storage lock poisoned")]
    Poisoned,

    /// Configuration error
    #[error("Storage configuration error: {0}")]
    Configuration(String),
}

/// Type alias for Result with StorageError
pub type StorageResult<T> = Result<T, StorageError>;
