use std::path::PathBuf;

/// Errors raised by board construction and cascade resolution.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("invalid board configuration: {0}")]
    InvalidConfiguration(String),

    #[error("board did not settle after {passes} cascade passes ({cleared} tiles cleared)")]
    UnstableBoard { passes: u32, cleared: usize },
}

/// Errors that can occur when loading settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("failed to read settings file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("settings rejected: {0}")]
    Invalid(#[from] BoardError),
}
