//! Error types for loading and transforming documents

use std::fmt;

/// Result type for xth operations
pub type Result<T> = std::result::Result<T, Error>;

/// What is wrong with a caller-supplied argument
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgumentProblem {
    /// The argument was not supplied
    Missing,
    /// The argument was supplied as an empty string
    Empty,
    /// The path could not be turned into a URL
    Unresolvable(String),
}

impl fmt::Display for ArgumentProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgumentProblem::Missing => f.write_str("is required"),
            ArgumentProblem::Empty => f.write_str("must be a non-empty string"),
            ArgumentProblem::Unresolvable(reason) => write!(f, "could not be resolved: {reason}"),
        }
    }
}

/// Unified error type for all xth operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A caller-supplied argument was missing or malformed
    #[error("\"{name}\" {problem}")]
    InvalidArgument {
        name: &'static str,
        problem: ArgumentProblem,
    },

    /// No request mechanism exists for the requested resource
    #[error("No transport available: {0}")]
    TransportUnavailable(String),

    /// The transport completed without delivering the resource
    #[error("Could not load: {path} ({detail})")]
    LoadFailure { path: String, detail: String },

    /// A response body could not be parsed as XML
    #[error("XML parsing error: {0}")]
    XmlParse(String),

    /// A document could not be serialized
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// The stylesheet engine rejected its input
    #[error("XSLT transformation error: {0}")]
    TransformFailure(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a new invalid argument error
    pub fn invalid_argument(name: &'static str, problem: ArgumentProblem) -> Self {
        Error::InvalidArgument { name, problem }
    }

    /// Create a load failure for a response that completed with a non-success status
    pub fn load_status<S: Into<String>>(path: S, status: u16) -> Self {
        Error::LoadFailure {
            path: path.into(),
            detail: format!("status {status}"),
        }
    }

    /// Create a load failure for a request that never completed
    pub fn load_unreachable<S: Into<String>, R: fmt::Display>(path: S, reason: R) -> Self {
        Error::LoadFailure {
            path: path.into(),
            detail: reason.to_string(),
        }
    }

    /// Create a new XML parsing error
    pub fn xml_parse<S: Into<String>>(msg: S) -> Self {
        Error::XmlParse(msg.into())
    }

    /// Create a new XSLT transformation error
    pub fn transform<S: Into<String>>(msg: S) -> Self {
        Error::TransformFailure(msg.into())
    }
}
