//! Proxy settings for `Dial`
//!
//! Connections are tunnelled with HTTP CONNECT. Credentials go out as a
//! `Proxy-Authorization: Basic` header.

use crate::builder::core::{Dial, ProxyRoute};

impl Dial {
    /// Tunnel through the HTTP proxy at `host:port`
    pub fn proxy(mut self, host: impl Into<String>, port: u16) -> Self {
        self.proxy = Some(ProxyRoute {
            host: host.into(),
            port,
            credentials: None,
            headers: Vec::new(),
            secure: false,
        });
        self
    }

    /// Authenticate to the proxy
    ///
    /// Ignored unless `proxy` was called first.
    pub fn proxy_credentials(mut self, id: impl Into<String>, password: impl Into<String>) -> Self {
        if let Some(proxy) = self.proxy.as_mut() {
            proxy.credentials = Some((id.into(), password.into()));
        }
        self
    }

    /// Extra header for the CONNECT request
    ///
    /// Ignored unless `proxy` was called first.
    pub fn proxy_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        if let Some(proxy) = self.proxy.as_mut() {
            proxy.headers.push((name.into(), value.into()));
        }
        self
    }

    /// Speak TLS to the proxy itself (an HTTPS proxy)
    ///
    /// Ignored unless `proxy` was called first.
    pub fn proxy_secure(mut self, secure: bool) -> Self {
        if let Some(proxy) = self.proxy.as_mut() {
            proxy.secure = secure;
        }
        self
    }
}
