use thiserror::Error;

/// Errors that can occur while configuring or building the poll controller
///
/// Poll operations themselves never fail: an unknown node or address is a
/// silent no-op, and driver failures stay inside the driver.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PollError {
    /// Configuration rejected by validation
    #[error("Invalid poll configuration: {0}")]
    InvalidConfig(String),

    /// Environment variable present but not parseable
    #[error("Invalid value {value:?} for environment variable {var}")]
    InvalidEnv { var: &'static str, value: String },

    /// Builder finished without a required collaborator
    #[error("Poll controller requires a {0}")]
    MissingCollaborator(&'static str),
}

/// Result type for poll-control operations
pub type Result<T> = std::result::Result<T, PollError>;
