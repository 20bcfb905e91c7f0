use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PgnError {
    #[error("cannot open PGN file {path}: {source}")]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot read PGN directory {path}: {source}")]
    DirAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error while scanning {path}: {source}")]
    Scan {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, PgnError>;
