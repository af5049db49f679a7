use std::future::Future;

use log::debug;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use url::Url;
use xth_traits::{Error, Request, Response, ResponseType, Result, Transport};

use crate::config::Config;

/// Accept header sent when a response is wanted as a document
const DOCUMENT_ACCEPT: &str = "application/xml, text/xml, application/xslt+xml, text/html;q=0.9, */*;q=0.1";

/// HTTP(S) transport backed by reqwest
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(config: &Config) -> Result<Self> {
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.as_str());
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| Error::TransportUnavailable(format!("client build error: {e}")))?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn supports(&self, url: &Url) -> bool {
        matches!(url.scheme(), "http" | "https")
    }

    fn send(&self, request: Request) -> impl Future<Output = Result<Response>> + Send {
        async move {
            let requested = request.url.to_string();
            let mut builder = self.client.get(request.url);
            if request.response_type == ResponseType::Document {
                builder = builder.header(ACCEPT, DOCUMENT_ACCEPT);
            }

            let response = builder
                .send()
                .await
                .map_err(|e| Error::load_unreachable(&requested, e))?;
            let status = response.status().as_u16();
            let url = response.url().clone();
            let content_type = response
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .map(|s| s.to_string());

            // The exchange is only done once the whole body is in
            let body = response
                .bytes()
                .await
                .map_err(|e| Error::load_unreachable(&requested, e))?;
            debug!("GET {requested} -> {status} ({} bytes)", body.len());

            Ok(Response {
                url,
                status,
                content_type,
                body: body.to_vec(),
            })
        }
    }
}
