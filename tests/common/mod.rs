//! Shared fixtures for integration tests: a tiny HTTP/1.1 server and a
//! `.tar.gz` builder.

#![allow(dead_code)]

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::Duration;

use flate2::Compression;
use flate2::write::GzEncoder;

/// What the server answers for a request path
#[derive(Debug, Clone)]
pub enum Reply {
    Ok(Vec<u8>),
    /// 302 with the given `Location`
    Redirect(String),
    /// Bare status, no `Location`, empty body
    Status(u16),
    /// Written to the socket verbatim, head included
    Raw(Vec<u8>),
}

pub struct TestServer {
    /// e.g. "http://127.0.0.1:12345" (no trailing slash)
    pub base: String,
    hits: Arc<AtomicUsize>,
}

impl TestServer {
    /// Requests served so far
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }
}

/// Start a server in a background thread answering each GET with
/// `route(path)`. Runs until the test process exits.
pub fn start<F>(route: F) -> TestServer
where
    F: Fn(&str) -> Reply + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let hits = Arc::new(AtomicUsize::new(0));
    let route = Arc::new(route);
    let server_hits = Arc::clone(&hits);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let route = Arc::clone(&route);
            let hits = Arc::clone(&server_hits);
            thread::spawn(move || handle(stream, route.as_ref(), &hits));
        }
    });
    TestServer {
        base: format!("http://127.0.0.1:{port}"),
        hits,
    }
}

fn handle(mut stream: TcpStream, route: &(dyn Fn(&str) -> Reply + Send + Sync), hits: &AtomicUsize) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(5)));
    let mut request = Vec::new();
    let mut buf = [0u8; 4096];
    while !request.windows(4).any(|w| w == b"\r\n\r\n") {
        match stream.read(&mut buf) {
            Ok(0) | Err(_) => return,
            Ok(n) => request.extend_from_slice(&buf[..n]),
        }
    }
    let request = String::from_utf8_lossy(&request);
    let path = request
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .unwrap_or("/")
        .to_string();
    hits.fetch_add(1, Ordering::SeqCst);

    let (status, extra, body) = match route(&path) {
        Reply::Ok(body) => (200, String::new(), body),
        Reply::Redirect(location) => (302, format!("Location: {location}\r\n"), Vec::new()),
        Reply::Status(code) => (code, String::new(), Vec::new()),
        Reply::Raw(bytes) => {
            let _ = stream.write_all(&bytes);
            let _ = stream.flush();
            return;
        }
    };
    let head = format!(
        "HTTP/1.1 {status} Test\r\nContent-Length: {}\r\n{extra}Connection: close\r\n\r\n",
        body.len()
    );
    let _ = stream.write_all(head.as_bytes());
    let _ = stream.write_all(&body);
    let _ = stream.flush();
}

/// Redirect `/hop/N` to `/hop/N-1`; `/hop/0` serves `body`
pub fn hop_route(body: Vec<u8>) -> impl Fn(&str) -> Reply + Send + Sync + 'static {
    move |path: &str| match path.strip_prefix("/hop/").and_then(|n| n.parse::<usize>().ok()) {
        Some(0) => Reply::Ok(body.clone()),
        Some(n) => Reply::Redirect(format!("/hop/{}", n - 1)),
        None => Reply::Status(404),
    }
}

/// Build a `.tar.gz` holding `(name, contents)` entries at its root
pub fn tar_gz(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut builder = tar::Builder::new(GzEncoder::new(Vec::new(), Compression::default()));
    for (name, contents) in entries {
        let mut header = tar::Header::new_gnu();
        header.set_size(contents.len() as u64);
        header.set_mode(0o644);
        header.set_cksum();
        builder.append_data(&mut header, name, *contents).unwrap();
    }
    builder.into_inner().unwrap().finish().unwrap()
}
