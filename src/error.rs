use thiserror::Error;

/// Classifies host set errors for programmatic matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostsErrorKind {
    /// A configured pattern does not satisfy the pattern grammar
    Pattern,
    /// An address string is not `ip` or `ip:port`
    Address,
    /// One key lists addresses with different ports
    Port,
    /// A JSON value is neither a string nor a list of strings
    ValueType,
    /// The document is not JSON, or not null/object at the top level
    Json,
}

/// Host set error types
#[derive(Error, Debug)]
pub enum HostsError {
    #[error("invalid host pattern '{0}'")]
    InvalidPatternSyntax(String),

    #[error("invalid host address '{0}'")]
    InvalidAddressFormat(String),

    #[error("conflicting ports for host {0}")]
    ConflictingPorts(String),

    #[error("invalid host value type for {0}")]
    InvalidValueType(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl HostsError {
    /// Returns the error class without inspecting the message.
    pub fn kind(&self) -> HostsErrorKind {
        match self {
            HostsError::InvalidPatternSyntax(_) => HostsErrorKind::Pattern,
            HostsError::InvalidAddressFormat(_) => HostsErrorKind::Address,
            HostsError::ConflictingPorts(_) => HostsErrorKind::Port,
            HostsError::InvalidValueType(_) => HostsErrorKind::ValueType,
            HostsError::Json(_) => HostsErrorKind::Json,
        }
    }
}

pub type Result<T> = std::result::Result<T, HostsError>;
