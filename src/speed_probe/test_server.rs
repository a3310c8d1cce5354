//! Minimal in-process HTTP/1.1 stub used by the probe tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

pub struct StubServer {
    pub url: String,
    hits: Arc<AtomicUsize>,
    gzip_accepted: Arc<AtomicUsize>,
}

impl StubServer {
    /// Number of requests answered so far.
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    /// Number of requests that advertised `Accept-Encoding: gzip`.
    pub fn gzip_accepted(&self) -> usize {
        self.gzip_accepted.load(Ordering::SeqCst)
    }
}

/// Serves `body` with a 200 status to every connection until the test runtime shuts down.
pub async fn serve_body(body: Vec<u8>) -> StubServer {
    serve(body, None).await
}

/// Serves an already gzip-compressed `body` with `Content-Encoding: gzip`.
pub async fn serve_gzip(compressed: Vec<u8>) -> StubServer {
    serve(compressed, Some("gzip")).await
}

async fn serve(body: Vec<u8>, content_encoding: Option<&'static str>) -> StubServer {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind stub server");
    let addr = listener.local_addr().expect("Stub server has no address");

    let hits = Arc::new(AtomicUsize::new(0));
    let gzip_accepted = Arc::new(AtomicUsize::new(0));
    let server = StubServer {
        url: format!("http://{addr}/"),
        hits: hits.clone(),
        gzip_accepted: gzip_accepted.clone(),
    };

    tokio::spawn(async move {
        loop {
            let Ok((stream, _)) = listener.accept().await else {
                break;
            };
            let body = body.clone();
            let hits = hits.clone();
            let gzip_accepted = gzip_accepted.clone();
            tokio::spawn(async move {
                let Ok(request) = read_request(stream).await else {
                    return;
                };
                let (mut stream, head) = request;
                hits.fetch_add(1, Ordering::SeqCst);
                if head.to_ascii_lowercase().contains("accept-encoding: gzip") {
                    gzip_accepted.fetch_add(1, Ordering::SeqCst);
                }
                let _ = respond(&mut stream, &body, content_encoding).await;
            });
        }
    });

    server
}

/// Accepts connections but never answers them.
pub async fn serve_silence() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind stub server");
    let addr = listener.local_addr().expect("Stub server has no address");

    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((stream, _)) = listener.accept().await {
            held.push(stream);
        }
    });

    format!("http://{addr}/")
}

async fn read_request(mut stream: TcpStream) -> std::io::Result<(TcpStream, String)> {
    let mut request = Vec::new();
    let mut buf = [0u8; 1024];
    while !request.windows(4).any(|w| w == b"\r\n\r\n") {
        let n = stream.read(&mut buf).await?;
        if n == 0 {
            return Err(std::io::ErrorKind::UnexpectedEof.into());
        }
        request.extend_from_slice(&buf[..n]);
    }
    Ok((stream, String::from_utf8_lossy(&request).into_owned()))
}

async fn respond(
    stream: &mut TcpStream,
    body: &[u8],
    content_encoding: Option<&str>,
) -> std::io::Result<()> {
    let encoding = content_encoding
        .map(|e| format!("Content-Encoding: {e}\r\n"))
        .unwrap_or_default();
    let head = format!(
        "HTTP/1.1 200 OK\r\n\
         Content-Type: text/html; charset=utf-8\r\n\
         Content-Length: {}\r\n\
         {encoding}\
         Server: stub\r\n\
         Cache-Control: public, max-age=0\r\n\
         X-Vercel-Cache: HIT\r\n\
         Connection: close\r\n\r\n",
        body.len()
    );
    stream.write_all(head.as_bytes()).await?;
    stream.write_all(body).await?;
    stream.shutdown().await
}
