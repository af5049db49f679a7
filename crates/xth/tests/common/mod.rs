//! Shared fixtures for the xth integration tests
#![allow(dead_code)]

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};

use url::Url;
use xth::{Config, Request, Response, Result, Transport};

pub const BASE: &str = "http://test.local/";

pub const STANDARD_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64; rv:128.0) Gecko/20100101 Firefox/128.0";
pub const LEGACY_AGENT: &str = "Mozilla/5.0 (Windows NT 6.3; Trident/7.0; rv:11.0) like Gecko";

pub const SOURCE: &str = "<root><msg>hi</msg></root>";

pub const STYLESHEET: &str = r#"<xsl:stylesheet version="3.0" xmlns:xsl="http://www.w3.org/1999/XSL/Transform">
  <xsl:template match="/">
    <html><body><h1><xsl:value-of select="root/msg"/></h1></body></html>
  </xsl:template>
</xsl:stylesheet>"#;

pub fn config(user_agent: &str) -> Config {
    Config::new()
        .with_user_agent(user_agent)
        .with_base_url(Url::parse(BASE).unwrap())
}

#[derive(Default)]
struct Routes {
    documents: HashMap<String, (u16, String)>,
    requests: Mutex<Vec<Request>>,
}

/// In-memory transport for `http://test.local/` that records every request.
///
/// Unknown paths answer 404.
#[derive(Clone, Default)]
pub struct MockTransport {
    routes: Arc<Routes>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `body` with `status` at `path`
    pub fn route(mut self, path: &str, status: u16, body: &str) -> Self {
        Arc::get_mut(&mut self.routes)
            .expect("routes are set up before the transport is shared")
            .documents
            .insert(path.to_string(), (status, body.to_string()));
        self
    }

    /// The standard fixture: a source document and a stylesheet
    pub fn with_fixture() -> Self {
        Self::new()
            .route("/data.xml", 200, SOURCE)
            .route("/style.xsl", 200, STYLESHEET)
    }

    pub fn requests(&self) -> Vec<Request> {
        self.routes.requests.lock().unwrap().clone()
    }

    /// Paths requested so far, in order
    pub fn requested(&self) -> Vec<String> {
        self.requests()
            .into_iter()
            .map(|request| request.url.path().to_string())
            .collect()
    }
}

impl Transport for MockTransport {
    fn supports(&self, url: &Url) -> bool {
        url.scheme() == "http"
    }

    fn send(&self, request: Request) -> impl Future<Output = Result<Response>> + Send {
        self.routes.requests.lock().unwrap().push(request.clone());
        let routes = Arc::clone(&self.routes);
        async move {
            // Complete on a later poll, like a real exchange
            tokio::task::yield_now().await;
            let (status, body) = routes
                .documents
                .get(request.url.path())
                .cloned()
                .unwrap_or_else(|| (404, "not found".to_string()));
            Ok(Response::new(request.url, status, body).with_content_type("application/xml"))
        }
    }
}

/// Collects what callbacks receive
#[derive(Clone, Default)]
pub struct Received(Arc<Mutex<Vec<String>>>);

impl Received {
    pub fn callback(&self) -> impl FnOnce(String) + Send + 'static {
        let received = Arc::clone(&self.0);
        move |html| received.lock().unwrap().push(html)
    }

    pub fn all(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}
