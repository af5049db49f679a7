//! Fetching and parsing documents

use std::future::Future;
use std::sync::Arc;

use log::debug;
use url::Url;
use xth_traits::{EnvironmentVariant, Error, Request, Result, Transport, XmlDocument};

/// Loads documents through a transport, shaped by the environment variant.
///
/// - `Standard` asks for a document-typed response and takes the body as a
///   document, rejecting content types outside the XML and HTML families.
/// - `Legacy` asks for raw content and parses it through the response's XML
///   property whatever its declared type.
#[derive(Debug)]
pub struct DocumentLoader<T> {
    transport: Arc<T>,
    variant: EnvironmentVariant,
}

impl<T> Clone for DocumentLoader<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            variant: self.variant,
        }
    }
}

impl<T: Transport + 'static> DocumentLoader<T> {
    pub fn new(transport: Arc<T>, variant: EnvironmentVariant) -> Self {
        Self { transport, variant }
    }

    pub fn variant(&self) -> EnvironmentVariant {
        self.variant
    }

    /// Start loading `url`.
    ///
    /// Fails right away, before any request is issued, when the transport
    /// has no mechanism for the URL. The returned future resolves once the
    /// transport reports the exchange done: with the parsed document on a
    /// 200, with a load failure naming the URL on any other status.
    pub fn load<D>(&self, url: Url) -> Result<impl Future<Output = Result<D>> + Send + 'static>
    where
        D: XmlDocument + 'static,
    {
        if !self.transport.supports(&url) {
            return Err(Error::TransportUnavailable(format!(
                "no transport for scheme `{}` ({url})",
                url.scheme()
            )));
        }

        let transport = Arc::clone(&self.transport);
        let variant = self.variant;
        Ok(async move {
            let path = url.to_string();
            let request = match variant {
                EnvironmentVariant::Standard => Request::document(url),
                EnvironmentVariant::Legacy => Request::text(url),
            };
            debug!("loading {path} ({variant})");

            let response = transport.send(request).await?;
            if !response.is_success() {
                return Err(Error::load_status(path, response.status));
            }

            let document = match variant {
                EnvironmentVariant::Standard => response.document()?,
                EnvironmentVariant::Legacy => response.response_xml()?,
            };
            debug!("loaded {path}");
            Ok(document)
        })
    }
}
