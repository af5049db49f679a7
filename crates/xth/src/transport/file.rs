use std::future::Future;
use std::io::ErrorKind;

use log::debug;
use url::Url;
use xth_traits::{Error, Request, Response, Result, Transport};

/// `file://` transport.
///
/// Filesystem outcomes are reported the way a web server would: a missing
/// file is a 404 and an unreadable one a 403.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileTransport;

impl Transport for FileTransport {
    fn supports(&self, url: &Url) -> bool {
        url.scheme() == "file"
    }

    fn send(&self, request: Request) -> impl Future<Output = Result<Response>> + Send {
        async move {
            let path = request
                .url
                .to_file_path()
                .map_err(|()| Error::load_unreachable(request.url.as_str(), "not a local path"))?;

            let status = match tokio::fs::read(&path).await {
                Ok(body) => {
                    debug!("read {} ({} bytes)", path.display(), body.len());
                    return Ok(Response::new(request.url, 200, body));
                }
                Err(e) if e.kind() == ErrorKind::NotFound => 404,
                Err(e) if e.kind() == ErrorKind::PermissionDenied => 403,
                Err(e) => return Err(Error::Io(e)),
            };
            debug!("read {} -> {status}", path.display());
            Ok(Response::new(request.url, status, Vec::new()))
        }
    }
}
