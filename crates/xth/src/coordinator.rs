//! Validating inputs and sequencing load, load, transform, callback

use std::future::Future;
use std::sync::Arc;

use log::{error, info};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use url::Url;
use xee_adapter::{XeeProcessor, XotDocument};
use xth_traits::{ArgumentProblem, EnvironmentVariant, Error, Result, Transport};

use crate::config::Config;
use crate::environment;
use crate::loader::DocumentLoader;
use crate::transformer;
use crate::transport::HostTransport;

/// The document type loads produce
pub type ParsedDocument = XotDocument;

/// Receives the rendered HTML of a successful run
pub type Callback = Box<dyn FnOnce(String) + Send + 'static>;

/// Entry point: loads a source document and a stylesheet, transforms, and
/// hands back HTML.
///
/// Each run detects the environment variant from the configured user agent
/// once and keeps to it for both loads and the transformation. Runs share
/// nothing but the configuration and the transport.
#[derive(Debug)]
pub struct Xth<T = HostTransport> {
    config: Arc<Config>,
    transport: Arc<T>,
}

impl<T> Clone for Xth<T> {
    fn clone(&self) -> Self {
        Self {
            config: Arc::clone(&self.config),
            transport: Arc::clone(&self.transport),
        }
    }
}

impl Xth<HostTransport> {
    /// Create an instance with the host's HTTP and file transports
    pub fn new(config: Config) -> Result<Self> {
        let transport = HostTransport::new(&config)?;
        Ok(Self::with_transport(config, transport))
    }
}

impl<T: Transport + 'static> Xth<T> {
    /// Create an instance with a custom transport
    pub fn with_transport(config: Config, transport: T) -> Self {
        Self {
            config: Arc::new(config),
            transport: Arc::new(transport),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The variant this host gets
    pub fn variant(&self) -> EnvironmentVariant {
        environment::detect(&self.config.user_agent)
    }

    /// Start describing a run argument by argument
    pub fn invocation(&self) -> Invocation<'_, T> {
        Invocation {
            xth: self,
            xml_path: None,
            xsl_path: None,
            callback: None,
        }
    }

    /// Transform `xml_path` with `xsl_path` and pass the HTML to `callback`.
    ///
    /// Arguments are checked, paths resolved and the source load started
    /// before this returns; the rest happens on a task of the current tokio
    /// runtime. `callback` is called exactly once, and only on success.
    /// Failures after this returns never reach `callback`: they are logged
    /// and come back through the returned handle.
    pub fn run<F>(&self, xml_path: &str, xsl_path: &str, callback: F) -> Result<JoinHandle<Result<()>>>
    where
        F: FnOnce(String) + Send + 'static,
    {
        self.invocation()
            .xml_path(xml_path)
            .xsl_path(xsl_path)
            .callback(callback)
            .run()
    }

    /// Transform `xml_path` with `xsl_path` and return the HTML
    pub async fn transform(&self, xml_path: &str, xsl_path: &str) -> Result<String> {
        let xml_path = require_path("xml_path", Some(xml_path))?;
        let xsl_path = require_path("xsl_path", Some(xsl_path))?;
        let (loader, xml_url, xsl_url) = self.prepare(xml_path, xsl_path)?;
        let xml_load = loader.load::<ParsedDocument>(xml_url)?;
        pipeline(loader, xml_load, xsl_url).await
    }

    fn prepare(&self, xml_path: &str, xsl_path: &str) -> Result<(DocumentLoader<T>, Url, Url)> {
        let xml_url = self.config.resolve("xml_path", xml_path)?;
        let xsl_url = self.config.resolve("xsl_path", xsl_path)?;
        let loader = DocumentLoader::new(Arc::clone(&self.transport), self.variant());
        Ok((loader, xml_url, xsl_url))
    }

    fn spawn(&self, xml_path: &str, xsl_path: &str, callback: Callback) -> Result<JoinHandle<Result<()>>> {
        let runtime = Handle::try_current().map_err(|_| {
            Error::TransportUnavailable("no async runtime to drive the transport".to_string())
        })?;
        let (loader, xml_url, xsl_url) = self.prepare(xml_path, xsl_path)?;
        let xml_load = loader.load::<ParsedDocument>(xml_url)?;
        let label = format!("{xml_path} + {xsl_path}");

        Ok(runtime.spawn(async move {
            match pipeline(loader, xml_load, xsl_url).await {
                Ok(html) => {
                    info!("rendered {label} ({} bytes)", html.len());
                    callback(html);
                    Ok(())
                }
                Err(e) => {
                    error!("rendering {label} failed: {e}");
                    Err(e)
                }
            }
        }))
    }
}

/// A run being assembled; every argument is checked by [`Invocation::run`]
pub struct Invocation<'a, T> {
    xth: &'a Xth<T>,
    xml_path: Option<String>,
    xsl_path: Option<String>,
    callback: Option<Callback>,
}

impl<T: Transport + 'static> Invocation<'_, T> {
    pub fn xml_path<S: Into<String>>(mut self, path: S) -> Self {
        self.xml_path = Some(path.into());
        self
    }

    pub fn xsl_path<S: Into<String>>(mut self, path: S) -> Self {
        self.xsl_path = Some(path.into());
        self
    }

    pub fn callback<F>(mut self, callback: F) -> Self
    where
        F: FnOnce(String) + Send + 'static,
    {
        self.callback = Some(Box::new(callback));
        self
    }

    /// Validate the arguments, in order, then start the run.
    ///
    /// See [`Xth::run`].
    pub fn run(self) -> Result<JoinHandle<Result<()>>> {
        let xml_path = require_path("xml_path", self.xml_path.as_deref())?;
        let xsl_path = require_path("xsl_path", self.xsl_path.as_deref())?;
        let callback = self
            .callback
            .ok_or_else(|| Error::invalid_argument("callback", ArgumentProblem::Missing))?;
        self.xth.spawn(xml_path, xsl_path, callback)
    }
}

fn require_path<'p>(name: &'static str, path: Option<&'p str>) -> Result<&'p str> {
    match path {
        None => Err(Error::invalid_argument(name, ArgumentProblem::Missing)),
        Some("") => Err(Error::invalid_argument(name, ArgumentProblem::Empty)),
        Some(path) => Ok(path),
    }
}

/// The stylesheet is only requested once the source document is in
async fn pipeline<T, F>(loader: DocumentLoader<T>, xml_load: F, xsl_url: Url) -> Result<String>
where
    T: Transport + 'static,
    F: Future<Output = Result<ParsedDocument>> + Send,
{
    let xml = xml_load.await?;
    let xsl = loader.load::<ParsedDocument>(xsl_url)?.await?;
    transformer::render::<XeeProcessor>(&xml, &xsl, loader.variant())
}
