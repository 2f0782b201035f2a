//! HTTP CONNECT tunnel establishment
//!
//! Sends a `CONNECT host:port` request with optional basic authentication
//! and extra headers, then reads the proxy's response head and requires a
//! 200 status before handing the stream back.

use std::io;

use base64::Engine;
use futures::future::BoxFuture;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tracing::{debug, trace};

use super::handshake::{ProxyHandshake, ProxyStream};
use crate::connect::types::Endpoint;

/// Upper bound on the proxy's response head.
const MAX_RESPONSE_HEAD: usize = 8 * 1024;

/// HTTP CONNECT handshake towards `target`
#[derive(Clone, Debug)]
pub struct HttpConnectHandshaker {
    target: Endpoint,
    auth: Option<String>, // base64 `id:password`
    headers: Vec<(String, String)>,
}

impl HttpConnectHandshaker {
    pub fn new(target: Endpoint) -> Self {
        Self {
            target,
            auth: None,
            headers: Vec::new(),
        }
    }

    /// Add basic authentication
    #[must_use]
    pub fn with_auth(mut self, id: &str, password: &str) -> Self {
        let credentials = format!("{id}:{password}");
        let encoded = base64::engine::general_purpose::STANDARD.encode(credentials.as_bytes());
        self.auth = Some(encoded);
        self
    }

    /// Add a header to the CONNECT request
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    #[must_use]
    pub fn target(&self) -> &Endpoint {
        &self.target
    }

    fn request(&self) -> String {
        let authority = self.target.authority();
        let mut request = format!("CONNECT {authority} HTTP/1.1\r\nHost: {authority}\r\n");
        if let Some(auth) = &self.auth {
            request.push_str("Proxy-Authorization: Basic ");
            request.push_str(auth);
            request.push_str("\r\n");
        }
        for (name, value) in &self.headers {
            request.push_str(name);
            request.push_str(": ");
            request.push_str(value);
            request.push_str("\r\n");
        }
        request.push_str("\r\n");
        request
    }

    async fn negotiate(&self, stream: &mut dyn ProxyStream) -> io::Result<()> {
        stream.write_all(self.request().as_bytes()).await?;
        stream.flush().await?;
        trace!(target = %self.target, "CONNECT request sent");

        let head = read_response_head(stream).await?;
        let status_line = head.lines().next().unwrap_or_default();
        check_status(status_line)?;

        debug!(target = %self.target, "proxy tunnel established");
        Ok(())
    }
}

impl ProxyHandshake for HttpConnectHandshaker {
    fn perform<'a>(&'a self, stream: &'a mut dyn ProxyStream) -> BoxFuture<'a, io::Result<()>> {
        Box::pin(self.negotiate(stream))
    }

    fn proxied_hostname(&self) -> &str {
        self.target.host()
    }
}

/// Read up to and including the blank line ending the response head.
///
/// Bytes are pulled one at a time so nothing past the head is consumed.
async fn read_response_head(stream: &mut dyn ProxyStream) -> io::Result<String> {
    let mut head = Vec::with_capacity(128);
    loop {
        let byte = match stream.read_u8().await {
            Ok(byte) => byte,
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                return Err(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    "proxy closed the connection before the response ended",
                ));
            }
            Err(e) => return Err(e),
        };
        head.push(byte);
        if head.ends_with(b"\r\n\r\n") || head.ends_with(b"\n\n") {
            break;
        }
        if head.len() >= MAX_RESPONSE_HEAD {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "proxy response head is too large",
            ));
        }
    }
    String::from_utf8(head).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

fn check_status(status_line: &str) -> io::Result<()> {
    let mut parts = status_line.split_whitespace();
    let version = parts.next().unwrap_or_default();
    let status = parts.next().unwrap_or_default();

    if !version.starts_with("HTTP/") {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("malformed proxy response: {}", status_line.trim()),
        ));
    }
    if status != "200" {
        return Err(io::Error::other(format!(
            "the status code of the proxy response is not 200: {}",
            status_line.trim()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use tokio::io::{AsyncBufReadExt, BufReader, duplex};

    use super::*;

    #[test]
    fn request_carries_auth_and_headers() {
        let handshaker = HttpConnectHandshaker::new(Endpoint::new("example.org", 443))
            .with_auth("user", "secret")
            .with_header("X-Trace", "1");
        let request = handshaker.request();

        assert!(request.starts_with("CONNECT example.org:443 HTTP/1.1\r\nHost: example.org:443\r\n"));
        assert!(request.contains("Proxy-Authorization: Basic dXNlcjpzZWNyZXQ=\r\n"));
        assert!(request.contains("X-Trace: 1\r\n"));
        assert!(request.ends_with("\r\n\r\n"));
    }

    #[test]
    fn status_must_be_200() {
        assert!(check_status("HTTP/1.1 200 Connection established").is_ok());
        assert!(check_status("HTTP/1.0 200 OK").is_ok());
        assert!(check_status("HTTP/1.1 407 Proxy Authentication Required").is_err());
        assert!(check_status("SSH-2.0-OpenSSH").is_err());
        assert!(check_status("").is_err());
    }

    #[tokio::test]
    async fn negotiates_over_a_stream() {
        let (mut client, server) = duplex(1024);
        let proxy = tokio::spawn(async move {
            let mut server = BufReader::new(server);
            let mut line = String::new();
            server.read_line(&mut line).await.unwrap();
            assert_eq!(line, "CONNECT [::1]:8443 HTTP/1.1\r\n");
            loop {
                line.clear();
                server.read_line(&mut line).await.unwrap();
                if line == "\r\n" {
                    break;
                }
            }
            server
                .get_mut()
                .write_all(b"HTTP/1.1 200 Connection established\r\n\r\ntunnel")
                .await
                .unwrap();
        });

        let handshaker = HttpConnectHandshaker::new(Endpoint::new("::1", 8443));
        handshaker.perform(&mut client).await.unwrap();
        proxy.await.unwrap();

        // Bytes after the head belong to the tunnel.
        let mut rest = [0u8; 6];
        client.read_exact(&mut rest).await.unwrap();
        assert_eq!(&rest, b"tunnel");
    }

    #[tokio::test]
    async fn early_close_is_an_error() {
        let (mut client, server) = duplex(1024);
        drop(server);
        let handshaker = HttpConnectHandshaker::new(Endpoint::new("example.org", 443));
        let err = handshaker.perform(&mut client).await.unwrap_err();
        assert!(matches!(
            err.kind(),
            io::ErrorKind::UnexpectedEof | io::ErrorKind::BrokenPipe
        ));
    }
}
