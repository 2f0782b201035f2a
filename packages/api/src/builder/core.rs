//! Core `Dial` builder structure and connection settings
//!
//! `Dial` gathers everything one connection needs and turns it into a
//! configured `wsdial_client::Connector` when `connect` is called.

use std::fmt;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

pub use wsdial_client::{ConnectConfig, DualStackMode, Resolve, TlsConfig};

/// Proxy the connection is routed through
#[derive(Debug, Clone)]
pub(crate) struct ProxyRoute {
    pub(crate) host: String,
    pub(crate) port: u16,
    pub(crate) credentials: Option<(String, String)>,
    pub(crate) headers: Vec<(String, String)>,
    pub(crate) secure: bool,
}

/// Fluent connection builder
///
/// # Examples
/// ```no_run
/// use std::time::Duration;
/// use wsdial::Dial;
///
/// # async fn run() -> Result<(), wsdial::DialError> {
/// let transport = Dial::to("echo.websocket.org", 443)
///     .secure(true)
///     .fallback_delay(Duration::from_millis(200))
///     .connect()
///     .await?;
/// # drop(transport);
/// # Ok(())
/// # }
/// ```
#[must_use = "Dial does nothing until connect is awaited"]
pub struct Dial {
    pub(crate) host: String,
    pub(crate) port: u16,
    pub(crate) address: Option<SocketAddr>,
    pub(crate) secure: bool,
    pub(crate) tls: Option<TlsConfig>,
    pub(crate) config: ConnectConfig,
    pub(crate) proxy: Option<ProxyRoute>,
    pub(crate) resolver: Option<Arc<dyn Resolve>>,
}

impl Dial {
    /// Start building a connection to `host:port`
    pub fn to(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            address: None,
            secure: false,
            tls: None,
            config: ConnectConfig::default(),
            proxy: None,
            resolver: None,
        }
    }

    /// Overlay TLS on the connection (`wss://`)
    pub fn secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    /// TLS settings used for the target and for a secure proxy
    ///
    /// Only stores the settings: whether the target is `wss://` is still up
    /// to `secure`. Without it, secure connections trust the bundled webpki
    /// roots.
    pub fn tls_config(mut self, tls: TlsConfig) -> Self {
        self.tls = Some(tls);
        self
    }

    /// Skip DNS and race only this address
    pub fn address(mut self, address: SocketAddr) -> Self {
        self.address = Some(address);
        self
    }

    /// Restrict the address families that race
    pub fn dual_stack(mut self, mode: DualStackMode) -> Self {
        self.config = self.config.with_dual_stack(mode);
        self
    }

    /// Happy Eyeballs stagger between candidates
    pub fn fallback_delay(mut self, delay: Duration) -> Self {
        self.config = self.config.with_fallback_delay(delay);
        self
    }

    /// Per-attempt connect timeout
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.with_connect_timeout(timeout);
        self
    }

    /// Check certificates against the hostname (on by default)
    pub fn verify_hostname(mut self, verify: bool) -> Self {
        self.config = self.config.with_verify_hostname(verify);
        self
    }

    /// SNI names to present instead of the target hostname
    pub fn server_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config = self.config.with_server_names(names);
        self
    }

    /// Use a custom resolver instead of the system one
    pub fn resolver(mut self, resolver: impl Resolve) -> Self {
        self.resolver = Some(Arc::new(resolver));
        self
    }

    /// Replace the whole connection configuration
    pub fn config(mut self, config: ConnectConfig) -> Self {
        self.config = config;
        self
    }
}

impl fmt::Debug for Dial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dial")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("address", &self.address)
            .field("secure", &self.secure)
            .field("config", &self.config)
            .field("proxy", &self.proxy.as_ref().map(|p| (&p.host, p.port, p.secure)))
            .finish_non_exhaustive()
    }
}
