//! Build logic for `ConnectorBuilder`

use std::sync::Arc;

use super::super::service::ConnectorService;
use super::super::types::Connector;
use super::types::ConnectorBuilder;
use crate::config::ConfigResult;
use crate::connect::tcp::SocketFactory;
use crate::dns::SystemResolver;
use crate::tls::DefaultHostnameVerifier;

impl<F: SocketFactory> ConnectorBuilder<F> {
    /// Build the connector with configured settings
    ///
    /// # Errors
    ///
    /// Returns the first problem `ConnectConfig::validate` reports.
    pub fn build(self) -> ConfigResult<Connector<F>> {
        self.config.validate()?;

        let service = ConnectorService::new(
            Arc::new(self.factory),
            self.resolver.unwrap_or_else(|| Arc::new(SystemResolver)),
            self.config,
            self.proxy,
            self.tls,
            self.hostname_verifier
                .unwrap_or_else(|| Arc::new(DefaultHostnameVerifier)),
        );

        Ok(Connector::from_service(service))
    }
}
