//! Error types for kvbench
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using BenchError
pub type Result<T> = std::result::Result<T, BenchError>;

/// Unified error type for kvbench operations
#[derive(Debug, Error)]
pub enum BenchError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Network Errors
    // -------------------------------------------------------------------------
    #[error("Failed to connect to {endpoint}: {source}")]
    Connection {
        endpoint: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Request for key {key} failed: {message}")]
    Request { key: String, message: String },

    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error("Connection desynchronized: an earlier reply was never read")]
    Desynchronized,

    // -------------------------------------------------------------------------
    // Statistics Errors
    // -------------------------------------------------------------------------
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // -------------------------------------------------------------------------
    // Serialization Errors
    // -------------------------------------------------------------------------
    #[error("Serialization error: {0}")]
    Serialization(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // -------------------------------------------------------------------------
    // Run Control
    // -------------------------------------------------------------------------
    #[error("Run aborted in {phase} phase at key {key}: {message}")]
    Aborted {
        phase: String,
        key: String,
        message: String,
    },
}
