use thiserror::Error;

#[derive(Error, Debug)]
pub enum ActionError {
    // File/IO Errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Subprocess Errors
    #[error("Subprocess failed: {0}")]
    Subprocess(String),

    // Git Errors
    #[error("Git error: {0}")]
    Git(String),

    #[error("Not a git repository")]
    NotGitRepo,

    // Network Errors
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // Manifest lookup miss
    #[error("The version \"{version}\" does not exist in the \"{manifest_url}\" file")]
    VersionNotFound {
        version: String,
        manifest_url: String,
    },

    // Dispatch failure, reported with the sub-command only
    #[error("Failed: dep {0}")]
    DispatchFailed(String),

    // Config Errors
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, ActionError>;
