use std::path::PathBuf;

use thiserror::Error;

/// Why a PDF could not be opened or written back.
#[derive(Debug, Error)]
pub enum OpenError {
    /// The document is encrypted and the credential (or its absence) did not unlock it.
    #[error("password required or incorrect")]
    Authentication,

    /// The bytes could not be parsed as a PDF document.
    #[error("{0}")]
    Corrupt(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// The selected path could not be turned into a list of files.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("cannot access {}: {source}", path.display())]
    Inaccessible {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is not a directory", .0.display())]
    NotADirectory(PathBuf),

    #[error("cannot list {}: {source}", path.display())]
    Listing {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

/// A start command that did not launch a run.
#[derive(Debug, Error)]
pub enum StartError {
    #[error("no file or folder selected")]
    EmptyPath,

    #[error("a run is already in progress")]
    Busy,

    #[error("could not spawn worker thread: {0}")]
    Spawn(#[source] std::io::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("poll-interval-ms must be greater than zero in {}", .0.display())]
    ZeroPollInterval(PathBuf),
}
