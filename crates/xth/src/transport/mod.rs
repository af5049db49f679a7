//! Transports documents are fetched with

mod file;
mod http;

use std::future::Future;

use url::Url;
use xth_traits::{Error, Request, Response, Result, Transport};

pub use file::FileTransport;
pub use http::HttpTransport;

use crate::config::Config;

/// The transports a regular host has: HTTP(S) and local files
#[derive(Debug, Clone)]
pub struct HostTransport {
    http: HttpTransport,
    file: FileTransport,
}

impl HostTransport {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            http: HttpTransport::new(config)?,
            file: FileTransport,
        })
    }
}

impl Transport for HostTransport {
    fn supports(&self, url: &Url) -> bool {
        self.http.supports(url) || self.file.supports(url)
    }

    fn send(&self, request: Request) -> impl Future<Output = Result<Response>> + Send {
        async move {
            if self.http.supports(&request.url) {
                self.http.send(request).await
            } else if self.file.supports(&request.url) {
                self.file.send(request).await
            } else {
                Err(Error::TransportUnavailable(format!(
                    "no transport for scheme `{}`",
                    request.url.scheme()
                )))
            }
        }
    }
}
