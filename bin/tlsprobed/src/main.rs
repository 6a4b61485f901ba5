//! Entry point: parses configuration, terminates TLS on the configured
//! listen address via the peek-wrapped acceptor, and serves the client-hello
//! introspection JSON contract over plain HTTP/1.1 inside the TLS tunnel.

mod config;
mod handler;
mod tls;

use std::sync::Arc;

use clap::Parser;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use tokio::net::TcpListener;
use tokio_rustls::TlsAcceptor;

use tlsprobe_net::PeekedListener;

use crate::config::Config;
use crate::handler::ConnectionContext;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&config.log_level))
        .init();

    let server_config = tls::load_server_config(&config.cert, &config.key)?;
    let tls_acceptor = TlsAcceptor::from(server_config);

    let tcp_listener = TcpListener::bind(config.listen).await?;
    tracing::info!(listen = %config.listen, "tlsprobed listening");
    let mut peeked_listener = PeekedListener::new(tcp_listener);

    loop {
        let (peeked_conn, peer) = match peeked_listener.accept().await {
            Ok(accepted) => accepted,
            Err(err) if err.is_transient() => {
                tracing::warn!(error = %err, "transient accept error, continuing");
                continue;
            }
            Err(err) => {
                tracing::error!(error = %err, "acceptor closed, shutting down");
                return Ok(());
            }
        };

        let tls_acceptor = tls_acceptor.clone();
        tokio::spawn(async move {
            let tls_stream = match tls_acceptor.accept(peeked_conn).await {
                Ok(stream) => stream,
                Err(err) => {
                    tracing::debug!(peer = %peer, error = %err, "TLS handshake failed");
                    return;
                }
            };

            let client_hello_bytes =
                Arc::new(tls_stream.get_ref().0.client_hello_bytes().to_vec());
            let ctx = ConnectionContext {
                client_hello_bytes,
                peer,
            };

            let io = TokioIo::new(tls_stream);
            let service = service_fn(move |req| handler::handle(req, ctx.clone()));
            if let Err(err) = http1::Builder::new().serve_connection(io, service).await {
                tracing::debug!(peer = %peer, error = %err, "connection closed with error");
            }
        });
    }
}
