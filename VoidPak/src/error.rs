//! Error types for `VoidPak`

use thiserror::Error;

/// The error type for `VoidPak` operations.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    // ==================== IO Errors ====================
    /// IO error from file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ==================== Record Errors ====================
    /// The buffer is too short for a fixed-layout record.
    #[error("malformed {record} record at offset {offset}: unexpected end of data (needed {needed} bytes, {available} available)")]
    MalformedRecord {
        /// Name of the record being decoded.
        record: &'static str,
        /// Byte offset the decode started at.
        offset: usize,
        /// Bytes required by the record layout.
        needed: usize,
        /// Bytes left in the buffer from `offset`.
        available: usize,
    },

    // ==================== Container Errors ====================
    /// The container header magic did not match the layout.
    #[error("invalid container magic: expected {expected:#010x}, found {found:#010x}")]
    InvalidContainerMagic {
        /// Magic configured in the container layout.
        expected: i32,
        /// Magic read from the header record.
        found: i32,
    },

    /// A table offset points past the end of the container buffer.
    #[error("{table} table offset {offset} is outside the container ({len} bytes)")]
    TableOutOfBounds {
        /// Which table was being read.
        table: &'static str,
        /// The configured offset.
        offset: usize,
        /// Length of the container buffer.
        len: usize,
    },

    // ==================== Catalog Errors ====================
    /// An asset with the same name is already in the catalog.
    #[error("duplicate asset identity: {0}")]
    DuplicateAssetIdentity(String),

    /// An asset load hook reported a failure.
    #[error("failed to load asset {name}: {message}")]
    AssetLoadFailed {
        /// Name of the asset.
        name: String,
        /// Message from the load hook.
        message: String,
    },

    // ==================== Parsing Errors ====================
    /// JSON serialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// TOML parse error.
    #[error("TOML parse error: {0}")]
    TomlDeError(#[from] toml::de::Error),

    /// TOML serialization error.
    #[error("TOML serialization error: {0}")]
    TomlSerError(#[from] toml::ser::Error),
}

/// A specialized Result type for `VoidPak` operations.
pub type Result<T> = std::result::Result<T, Error>;
