//! Connection execution for `Dial`

use tracing::debug;
use wsdial_client::{
    BoxedTransport, Connector, Endpoint, HttpConnectHandshaker, ProxySettings, SocketFactory,
    TcpSocketFactory, TlsConfig, TlsSocketFactory,
};

use crate::builder::core::{Dial, ProxyRoute};
use crate::error::DialError;

impl Dial {
    /// Establish the connection.
    ///
    /// # Errors
    ///
    /// `DialError::Config` or `DialError::Tls` for settings that cannot work,
    /// `DialError::Connect` when the connection sequence fails.
    pub async fn connect(self) -> Result<BoxedTransport, DialError> {
        let tls = match (&self.tls, self.needs_tls()) {
            (Some(tls), _) => Some(tls.clone()),
            (None, true) => Some(TlsConfig::builder().with_webpki_roots().build()?),
            (None, false) => None,
        };

        let mut target = Endpoint::new(self.host.as_str(), self.port);
        if let Some(address) = self.address {
            target = target.with_address(address);
        }

        let secure_proxy = self.proxy.as_ref().is_some_and(|p| p.secure);
        debug!(%target, secure = self.secure, secure_proxy, "dialing");

        match (secure_proxy, tls) {
            (true, Some(tls)) => {
                let proxy_host = self.proxy.as_ref().map_or("", |p| p.host.as_str()).to_owned();
                let factory = TlsSocketFactory::new(TcpSocketFactory::default(), tls.clone(), proxy_host);
                let overlay = self.secure.then_some(tls);
                self.dial_with(factory, overlay, &target).await
            }
            (_, tls) => {
                let overlay = if self.secure { tls } else { None };
                self.dial_with(TcpSocketFactory::default(), overlay, &target).await
            }
        }
    }

    fn needs_tls(&self) -> bool {
        self.secure || self.proxy.as_ref().is_some_and(|p| p.secure)
    }

    async fn dial_with<F: SocketFactory>(
        self,
        factory: F,
        overlay: Option<TlsConfig>,
        target: &Endpoint,
    ) -> Result<BoxedTransport, DialError> {
        let mut builder = Connector::builder().factory(factory).config(self.config);
        if let Some(resolver) = self.resolver {
            builder = builder.shared_resolver(resolver);
        }
        if let Some(route) = &self.proxy {
            builder = builder.proxy(proxy_settings(route, target));
        }
        if let Some(tls) = overlay {
            builder = builder.tls(tls);
        }

        let connector = builder.build()?;
        let stream = connector.connect(target).await?;
        Ok(Box::new(stream))
    }
}

fn proxy_settings(route: &ProxyRoute, target: &Endpoint) -> ProxySettings {
    let mut handshaker = HttpConnectHandshaker::new(Endpoint::new(target.host(), target.port()));
    if let Some((id, password)) = &route.credentials {
        handshaker = handshaker.with_auth(id, password);
    }
    for (name, value) in &route.headers {
        handshaker = handshaker.with_header(name.as_str(), value.as_str());
    }
    ProxySettings::new(Endpoint::new(route.host.as_str(), route.port), handshaker)
}
