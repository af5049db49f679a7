//! Core trait abstractions for loading and transforming XML documents.
//!
//! This crate defines the seams between the coordinator and the pieces it
//! drives: the document model a stylesheet engine works on, the two
//! transformation shapes a host may expose, and the transport documents are
//! fetched with.

pub mod document;
pub mod error;
pub mod transport;
pub mod variant;

pub use document::{NodeTransform, XmlDocument, XsltProcessor};
pub use error::{ArgumentProblem, Error, Result};
pub use transport::{Request, Response, ResponseType, Transport};
pub use variant::EnvironmentVariant;
