//! Dial a host and report how the connection was made.
//!
//! ```text
//! cargo run -p wsdial --example dial -- echo.websocket.org 443 --secure
//! RUST_LOG=wsdial_client=debug cargo run -p wsdial --example dial -- localhost 8080
//! ```

use std::time::Duration;

use tracing_subscriber::EnvFilter;
use wsdial::{Dial, DialError, Transport};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let host = args.next().unwrap_or_else(|| "echo.websocket.org".to_string());
    let port = args
        .next()
        .and_then(|p| p.parse().ok())
        .unwrap_or(443);
    let secure = args.any(|a| a == "--secure") || port == 443;

    let started = std::time::Instant::now();
    let result = Dial::to(host.as_str(), port)
        .secure(secure)
        .fallback_delay(Duration::from_millis(250))
        .connect_timeout(Duration::from_secs(10))
        .connect()
        .await;

    match result {
        Ok(transport) => {
            let tls = transport.tls_session().is_some();
            println!(
                "connected to {host}:{port} in {:?} (tls: {tls})",
                started.elapsed()
            );
        }
        Err(DialError::Connect(e)) => {
            eprintln!("connection failed ({:?}): {e}", e.kind());
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("bad settings: {e}");
            std::process::exit(2);
        }
    }
}
