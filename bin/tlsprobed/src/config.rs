//! Command-line configuration, parsed with `clap`'s derive API (falls back
//! to environment variables via `#[arg(env = ...)]`, matching the teacher's
//! CLI-plus-env-fallback configuration style).

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;

/// TLS client-hello introspection daemon.
///
/// Terminates TLS on `--listen`, captures the raw client-hello bytes before
/// the TLS handshake consumes them, and serves the decoded tree as JSON.
#[derive(Debug, Parser)]
#[command(name = "tlsprobed", version, about)]
pub struct Config {
    /// Address to accept TLS connections on.
    #[arg(long, env = "TLSPROBED_LISTEN", default_value = "127.0.0.1:8443")]
    pub listen: SocketAddr,

    /// PEM-encoded certificate chain to present during the TLS handshake.
    #[arg(long, env = "TLSPROBED_CERT")]
    pub cert: PathBuf,

    /// PEM-encoded private key matching `--cert`.
    #[arg(long, env = "TLSPROBED_KEY")]
    pub key: PathBuf,

    /// Log verbosity (`error`, `warn`, `info`, `debug`, `trace`), or any
    /// `tracing-subscriber` `EnvFilter` directive string.
    #[arg(long, env = "TLSPROBED_LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listen_and_log_level_default_when_omitted() {
        let config = Config::parse_from([
            "tlsprobed",
            "--cert",
            "cert.pem",
            "--key",
            "key.pem",
        ]);
        assert_eq!(config.listen.to_string(), "127.0.0.1:8443");
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn explicit_flags_override_defaults() {
        let config = Config::parse_from([
            "tlsprobed",
            "--listen",
            "0.0.0.0:9443",
            "--cert",
            "cert.pem",
            "--key",
            "key.pem",
            "--log-level",
            "debug",
        ]);
        assert_eq!(config.listen.to_string(), "0.0.0.0:9443");
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn missing_cert_is_a_parse_error() {
        let result = Config::try_parse_from(["tlsprobed", "--key", "key.pem"]);
        assert!(result.is_err());
    }
}
