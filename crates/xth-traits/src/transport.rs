//! Transport abstraction trait

use std::future::Future;

use url::Url;

use crate::document::XmlDocument;
use crate::error::{Error, Result};

/// How the caller wants the response body handed back
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResponseType {
    /// The response is wanted as a parsed document
    Document,
    /// The raw response is wanted; parsing happens on demand
    Text,
}

/// A GET request for a single document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub url: Url,
    pub response_type: ResponseType,
}

impl Request {
    /// Request `url` as a pre-parsed document
    pub fn document(url: Url) -> Self {
        Self {
            url,
            response_type: ResponseType::Document,
        }
    }

    /// Request `url` as raw content
    pub fn text(url: Url) -> Self {
        Self {
            url,
            response_type: ResponseType::Text,
        }
    }
}

/// A completed exchange: status, headers of interest and the full body
#[derive(Debug, Clone)]
pub struct Response {
    pub url: Url,
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl Response {
    pub fn new(url: Url, status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            url,
            status,
            content_type: None,
            body: body.into(),
        }
    }

    pub fn with_content_type<S: Into<String>>(mut self, content_type: S) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Only 200 counts as success
    pub fn is_success(&self) -> bool {
        self.status == 200
    }

    /// Whether the declared content type is one a document response accepts.
    ///
    /// An undeclared content type is accepted.
    pub fn has_document_content_type(&self) -> bool {
        let Some(content_type) = &self.content_type else {
            return true;
        };
        let essence = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        essence == "text/html" || essence.ends_with("/xml") || essence.ends_with("+xml")
    }

    /// The body decoded as UTF-8 text
    pub fn text(&self) -> Result<&str> {
        std::str::from_utf8(&self.body)
            .map_err(|e| Error::xml_parse(format!("{}: {e}", self.url)))
    }

    /// The body as a document-typed response.
    ///
    /// Fails when the declared content type is not an XML or HTML family type.
    pub fn document<D: XmlDocument>(&self) -> Result<D> {
        if !self.has_document_content_type() {
            return Err(Error::xml_parse(format!(
                "{}: content type `{}` is not a document type",
                self.url,
                self.content_type.as_deref().unwrap_or_default()
            )));
        }
        D::parse(self.text()?)
    }

    /// The body parsed as XML, whatever content type was declared
    pub fn response_xml<D: XmlDocument>(&self) -> Result<D> {
        D::parse(self.text()?)
    }
}

/// Trait for request mechanisms documents are fetched with.
pub trait Transport: Send + Sync {
    /// Whether this transport has a mechanism for the URL's scheme
    fn supports(&self, url: &Url) -> bool;

    /// Issue a GET request.
    ///
    /// The returned future resolves only once the exchange is done, that is
    /// with the body fully read. Implementations must not resolve on headers
    /// alone. Non-success statuses are returned as responses, not errors.
    fn send(&self, request: Request) -> impl Future<Output = Result<Response>> + Send;
}
