//! Runs over the real HTTP and file transports

mod common;

use std::net::SocketAddr;
use std::thread;

use common::{Received, LEGACY_AGENT, SOURCE, STANDARD_AGENT, STYLESHEET};
use rstest::rstest;
use tiny_http::{Header, Response, Server};
use url::Url;
use xth::{Config, Error, Xth, DOCTYPE};

/// Serve the fixture documents on an ephemeral local port.
///
/// `/style.xsl` is served as `text/plain`, which only the legacy shape
/// accepts; `/style-xml.xsl` carries an XML content type. Anything else is
/// a 404.
fn serve() -> SocketAddr {
    let server = Server::http("127.0.0.1:0").unwrap();
    let addr = server.server_addr().to_ip().unwrap();
    thread::spawn(move || {
        for request in server.incoming_requests() {
            let document = match request.url() {
                "/data.xml" => Some((SOURCE, "application/xml")),
                "/style-xml.xsl" => Some((STYLESHEET, "application/xslt+xml")),
                "/style.xsl" => Some((STYLESHEET, "text/plain")),
                _ => None,
            };
            let _ = match document {
                Some((body, content_type)) => {
                    let header = Header::from_bytes("Content-Type", content_type).unwrap();
                    request.respond(Response::from_string(body).with_header(header))
                }
                None => request.respond(Response::from_string("not found").with_status_code(404)),
            };
        }
    });
    addr
}

fn http_instance(addr: SocketAddr, user_agent: &str) -> Xth {
    let base = Url::parse(&format!("http://{addr}/")).unwrap();
    Xth::new(Config::new().with_user_agent(user_agent).with_base_url(base)).unwrap()
}

#[rstest]
#[case::standard(STANDARD_AGENT)]
#[case::legacy(LEGACY_AGENT)]
#[tokio::test]
async fn http_round_trip(#[case] user_agent: &str) {
    let addr = serve();
    let received = Received::default();

    let handle = http_instance(addr, user_agent)
        .run("data.xml", "style-xml.xsl", received.callback())
        .unwrap();
    handle.await.unwrap().unwrap();

    let all = received.all();
    assert_eq!(all.len(), 1);
    assert!(all[0].starts_with(DOCTYPE));
    assert!(all[0].contains("<h1>hi</h1>"), "unexpected output: {}", all[0]);
}

#[tokio::test]
async fn http_not_found_is_a_load_failure() {
    let addr = serve();
    let received = Received::default();

    let handle = http_instance(addr, STANDARD_AGENT)
        .run("missing.xml", "style-xml.xsl", received.callback())
        .unwrap();
    let err = handle.await.unwrap().unwrap_err();

    match err {
        Error::LoadFailure { path, detail } => {
            assert_eq!(path, format!("http://{addr}/missing.xml"));
            assert_eq!(detail, "status 404");
        }
        other => panic!("expected a load failure, got {other:?}"),
    }
    assert!(received.all().is_empty());
}

#[tokio::test]
async fn only_legacy_accepts_a_plain_text_stylesheet() {
    let addr = serve();

    let err = http_instance(addr, STANDARD_AGENT)
        .transform("data.xml", "style.xsl")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::XmlParse(_)), "got {err:?}");

    let html = http_instance(addr, LEGACY_AGENT)
        .transform("data.xml", "style.xsl")
        .await
        .unwrap();
    assert!(html.contains("<h1>hi</h1>"), "unexpected output: {html}");
}

#[tokio::test]
async fn connection_refused_is_a_load_failure() {
    // Bind and drop to get a port nothing listens on
    let addr = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap();

    let err = http_instance(addr, STANDARD_AGENT)
        .transform("data.xml", "style.xsl")
        .await
        .unwrap_err();
    match err {
        Error::LoadFailure { path, .. } => assert!(path.ends_with("/data.xml")),
        other => panic!("expected a load failure, got {other:?}"),
    }
}

#[rstest]
#[case::standard(STANDARD_AGENT)]
#[case::legacy(LEGACY_AGENT)]
#[tokio::test]
async fn file_round_trip(#[case] user_agent: &str) {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("data.xml"), SOURCE).unwrap();
    std::fs::write(dir.path().join("style.xsl"), STYLESHEET).unwrap();
    let base = Url::from_directory_path(dir.path()).unwrap();
    let received = Received::default();

    let xth = Xth::new(Config::new().with_user_agent(user_agent).with_base_url(base)).unwrap();
    let handle = xth.run("data.xml", "style.xsl", received.callback()).unwrap();
    handle.await.unwrap().unwrap();

    let all = received.all();
    assert_eq!(all.len(), 1);
    assert!(all[0].starts_with(DOCTYPE));
    assert!(all[0].contains("<h1>hi</h1>"), "unexpected output: {}", all[0]);
}

#[tokio::test]
async fn missing_file_is_a_load_failure() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("data.xml"), SOURCE).unwrap();
    let base = Url::from_directory_path(dir.path()).unwrap();

    let err = Xth::new(Config::new().with_base_url(base))
        .unwrap()
        .transform("data.xml", "style.xsl")
        .await
        .unwrap_err();
    match err {
        Error::LoadFailure { path, detail } => {
            assert!(path.ends_with("/style.xsl"));
            assert_eq!(detail, "status 404");
        }
        other => panic!("expected a load failure, got {other:?}"),
    }
}
