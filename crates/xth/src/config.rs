//! Host configuration

use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;
use xth_traits::{ArgumentProblem, Error, Result};

/// User agent sent when the host does not supply one
pub const DEFAULT_USER_AGENT: &str = concat!("xth/", env!("CARGO_PKG_VERSION"));

/// What the embedding host tells xth about itself.
///
/// Nothing here is read from files or the environment; hosts build it in code
/// or deserialize it from wherever they keep their own settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Host identification string. Decides the environment variant and is
    /// sent with HTTP requests.
    pub user_agent: String,
    /// Base URL relative paths are resolved against. The working directory
    /// is used when unset.
    pub base_url: Option<Url>,
    /// Transport timeout in milliseconds. No timeout when unset.
    pub timeout_ms: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            base_url: None,
            timeout_ms: None,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user_agent<S: Into<String>>(mut self, user_agent: S) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = Some(base_url);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_ms = Some(u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX));
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }

    /// Resolve a caller-supplied path to an absolute URL.
    ///
    /// `name` is the argument the path came from and is used in errors.
    pub fn resolve(&self, name: &'static str, path: &str) -> Result<Url> {
        let unresolvable =
            |reason: String| Error::invalid_argument(name, ArgumentProblem::Unresolvable(reason));
        let base = match &self.base_url {
            Some(base) => base.clone(),
            None => working_directory_url().map_err(unresolvable)?,
        };
        base.join(path).map_err(|e| unresolvable(e.to_string()))
    }
}

fn working_directory_url() -> std::result::Result<Url, String> {
    let cwd = std::env::current_dir().map_err(|e| e.to_string())?;
    Url::from_directory_path(&cwd).map_err(|()| format!("{} is not absolute", cwd.display()))
}
