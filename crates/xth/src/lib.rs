//! xth: transform XML with XSLT into HTML.
//!
//! Loads a source document and a stylesheet through a transport, applies the
//! stylesheet and hands the result, prefixed with `<!DOCTYPE html>`, to a
//! callback. Hosts identifying as the legacy engine family get the legacy
//! loading and transformation shapes; everyone else gets the standard ones.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use xth::{Config, Xth};
//!
//! let xth = Xth::new(Config::new().with_base_url(base))?;
//! let handle = xth.run("feed.xml", "feed.xsl", |html| println!("{html}"))?;
//! handle.await??;
//! ```

pub mod config;
pub mod coordinator;
pub mod environment;
pub mod loader;
pub mod transformer;
pub mod transport;

pub use config::Config;
pub use coordinator::{Callback, Invocation, ParsedDocument, Xth};
pub use environment::{detect, EnvironmentVariant};
pub use loader::DocumentLoader;
pub use transformer::DOCTYPE;
pub use transport::{FileTransport, HostTransport, HttpTransport};

// Re-export the core abstractions
pub use xth_traits::{
    ArgumentProblem, Error, Request, Response, ResponseType, Result, Transport,
};

use tokio::task::JoinHandle;

/// Transform `xml_path` with `xsl_path` using the default configuration.
///
/// Arguments are validated before anything else happens. See [`Xth::run`].
pub fn run<F>(xml_path: &str, xsl_path: &str, callback: F) -> Result<JoinHandle<Result<()>>>
where
    F: FnOnce(String) + Send + 'static,
{
    // Argument faults take precedence over transport setup faults
    for (name, path) in [("xml_path", xml_path), ("xsl_path", xsl_path)] {
        if path.is_empty() {
            return Err(Error::invalid_argument(name, ArgumentProblem::Empty));
        }
    }
    Xth::new(Config::default())?.run(xml_path, xsl_path, callback)
}
