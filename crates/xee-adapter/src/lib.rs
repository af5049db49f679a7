//! xee engine adapter for the xth document abstractions
//!
//! Documents are parsed into [xot](https://docs.rs/xot) trees; stylesheets are
//! applied with the xee XSLT compiler. Both transformation shapes are
//! provided: [`XeeProcessor`] for the standard processor flow and
//! [`XotDocument::transform_node`](xth_traits::NodeTransform::transform_node)
//! for the legacy one.

pub mod document;
pub mod xslt;

// Re-export main types
pub use document::XotDocument;
pub use xslt::XeeProcessor;

// Re-export key types for convenience
pub use xot::{Node, Xot};
