//! Error types for settings resolution and persistence.

use std::path::PathBuf;

use thiserror::Error;
use url::Url;

/// Errors raised by the configuration store and settings-file collaborators.
///
/// Resolver operations never wrap these; they are handed back to the caller
/// exactly as the collaborator produced them.
#[derive(Error, Debug)]
pub enum SettingsError {
    /// A workspace or folder scope was targeted while no workspace root is open.
    #[error("unable to write to workspace settings: no workspace is open")]
    NoWorkspace,

    /// The folder owning a write has no filesystem location to hold a
    /// settings file.
    #[error("workspace folder is not a file:// location: {uri}")]
    NotAFileFolder { uri: Url },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse JSON in {}: {source}", path.display())]
    InvalidJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("expected JSON object at root: {}", path.display())]
    NotAnObject { path: PathBuf },

    /// A stored value does not have the shape the setting requires.
    #[error("invalid value for setting '{key}': {source}")]
    InvalidValue {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

impl SettingsError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, SettingsError>;
