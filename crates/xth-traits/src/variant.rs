//! Host API variants

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which document-transformation API shape the host exposes.
///
/// The variant is decided once per invocation and governs both how documents
/// are requested and how the stylesheet is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnvironmentVariant {
    /// Raw responses with an XML-parsing property; the source document
    /// transforms itself and yields markup text
    Legacy,
    /// Document-typed responses; a stylesheet processor produces a result
    /// document that is serialized from its document element
    #[default]
    Standard,
}

impl EnvironmentVariant {
    pub fn is_legacy(self) -> bool {
        self == EnvironmentVariant::Legacy
    }
}

impl fmt::Display for EnvironmentVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnvironmentVariant::Legacy => f.write_str("legacy"),
            EnvironmentVariant::Standard => f.write_str("standard"),
        }
    }
}
