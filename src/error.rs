//! Error types for huffpack

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CompressError {
    #[error("cannot access {}: {source}", path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("empty input")]
    EmptyInput,

    #[error("header read error: {0}")]
    HeaderRead(String),

    #[error("truncated stream: expected {expected} symbols, decoded {decoded}")]
    TruncatedStream { expected: u64, decoded: u64 },

    #[error("cannot rebuild huffman tree: {0}")]
    TreeRebuild(String),

    #[error("byte {0:#04x} has no code in the code table")]
    UnknownSymbol(u8),

    #[error("input of {size} bytes exceeds the limit of {limit} bytes")]
    InputTooLarge { size: u64, limit: u64 },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl CompressError {
    pub(crate) fn file_access(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CompressError::FileAccess {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, CompressError>;
