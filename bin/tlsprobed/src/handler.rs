//! The introspection HTTP surface: `GET /` returns the JSON contract for the
//! client-hello captured on the current connection (mirrors
//! `cmd/tlshellohttpd` in the original implementation); `GET /healthz` is a
//! liveness probe.

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

use bytes::Bytes;
use http_body_util::Full;
use hyper::body::Incoming;
use hyper::{Request, Response, StatusCode};

use tlsprobe_hello::json::ClientHelloJson;
use tlsprobe_hello::unmarshal_client_hello;

/// Per-connection state the HTTP handler needs: the raw bytes peeked off
/// the wire before the TLS handshake, plus the peer address for logging.
#[derive(Clone)]
pub struct ConnectionContext {
    pub client_hello_bytes: Arc<Vec<u8>>,
    pub peer: SocketAddr,
}

fn json_response(status: StatusCode, body: Vec<u8>) -> Response<Full<Bytes>> {
    Response::builder()
        .status(status)
        .header("content-type", "application/json")
        .body(Full::new(Bytes::from(body)))
        .expect("static response parts are always valid")
}

/// Synchronous path dispatch, split out from [`handle`] so it can be unit
/// tested without constructing a real `hyper::body::Incoming`.
fn route(path: &str, ctx: &ConnectionContext) -> Response<Full<Bytes>> {
    match path {
        "/healthz" => Response::builder()
            .status(StatusCode::OK)
            .body(Full::new(Bytes::from_static(b"ok")))
            .expect("static response parts are always valid"),
        "/" => {
            let Some(hello) = unmarshal_client_hello(&ctx.client_hello_bytes) else {
                tracing::warn!(peer = %ctx.peer, "captured bytes were not a valid client-hello");
                return json_response(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    br#"{"error":"not a valid client-hello"}"#.to_vec(),
                );
            };
            tracing::info!(
                peer = %ctx.peer,
                server_name = ?hello.summary.server_name,
                ja3 = %hello.summary.ja3_fingerprint,
                "served client-hello introspection"
            );
            let body = serde_json::to_vec(&ClientHelloJson::from(&hello))
                .expect("ClientHelloJson always serializes");
            json_response(StatusCode::OK, body)
        }
        _ => Response::builder()
            .status(StatusCode::NOT_FOUND)
            .body(Full::new(Bytes::new()))
            .expect("static response parts are always valid"),
    }
}

pub async fn handle(
    req: Request<Incoming>,
    ctx: ConnectionContext,
) -> Result<Response<Full<Bytes>>, Infallible> {
    Ok(route(req.uri().path(), &ctx))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx_with(bytes: Vec<u8>) -> ConnectionContext {
        ConnectionContext {
            client_hello_bytes: Arc::new(bytes),
            peer: "127.0.0.1:1234".parse().unwrap(),
        }
    }

    #[test]
    fn healthz_is_always_ok() {
        let response = route("/healthz", &ctx_with(Vec::new()));
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[test]
    fn unknown_path_is_404() {
        let response = route("/nope", &ctx_with(Vec::new()));
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn invalid_client_hello_bytes_are_a_500() {
        let response = route("/", &ctx_with(vec![0xFF, 0xFF]));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn root_serves_json_contract_for_valid_hello() {
        let mut body = Vec::new();
        body.extend_from_slice(&0x0303u16.to_be_bytes());
        body.extend_from_slice(&[0u8; 32]);
        body.push(0);
        body.extend_from_slice(&2u16.to_be_bytes());
        body.extend_from_slice(&0x1301u16.to_be_bytes());
        body.push(1);
        body.push(0);
        let len = body.len() as u32;
        let mut message = vec![1u8, (len >> 16) as u8, (len >> 8) as u8, len as u8];
        message.extend(body);

        let response = route("/", &ctx_with(message));
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get("content-type").unwrap(),
            "application/json"
        );
    }
}
