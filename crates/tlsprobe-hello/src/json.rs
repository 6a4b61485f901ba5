//! JSON serialization contract for the introspection server (spec.md §6).
//!
//! [`model::ClientHello`] stays a plain Rust value; this module owns the
//! wire shape instead of letting `#[derive(Serialize)]` leak onto the model
//! types themselves; `version` and each cipher-suite `code` serialize as a
//! 2-element `[hi, lo]` byte array (matching the original implementation's
//! fixed-size `[2]uint8` fields), while `raw`/`random`/`session_id` serialize
//! as plain byte arrays — the original's `[]byte` fields happen to base64
//! encode under Go's JSON encoder, but that is an artifact of Go's standard
//! library, not a requirement; a plain array is `serde_json`'s natural
//! default for `Vec<u8>` and needs no extra crate.

use serde::Serialize;

use crate::model::{ClientHello, ExtensionEntry, ExtensionPayload};

fn is_false(b: &bool) -> bool {
    !*b
}

#[derive(Serialize)]
struct WireCipherSuite {
    code: [u8; 2],
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'static str>,
}

impl From<&crate::model::CipherSuite> for WireCipherSuite {
    fn from(c: &crate::model::CipherSuite) -> Self {
        Self {
            code: c.code.to_be_bytes(),
            name: c.name,
        }
    }
}

#[derive(Serialize)]
struct WireExtension<'a> {
    #[serde(rename = "type")]
    type_code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'static str>,
    #[serde(skip_serializing_if = "is_false")]
    grease: bool,
    #[serde(skip_serializing_if = "is_false")]
    private: bool,
    data: WirePayload<'a>,
}

impl<'a> From<&'a ExtensionEntry> for WireExtension<'a> {
    fn from(e: &'a ExtensionEntry) -> Self {
        Self {
            type_code: e.type_code,
            name: e.name,
            grease: e.grease,
            private: e.private,
            data: WirePayload::from(&e.payload),
        }
    }
}

#[derive(Serialize)]
#[serde(untagged)]
enum WirePayload<'a> {
    ServerName {
        raw: &'a [u8],
        valid: bool,
        host_name: Option<&'a str>,
    },
    Alpn {
        raw: &'a [u8],
        valid: bool,
        protocols: &'a [String],
    },
    SupportedGroups {
        raw: &'a [u8],
        valid: bool,
        groups: &'a [u16],
    },
    EcPointFormats {
        raw: &'a [u8],
        valid: bool,
        formats: &'a [u16],
    },
    Empty {
        raw: &'a [u8],
        valid: bool,
    },
    Unknown {
        raw: &'a [u8],
    },
}

impl<'a> From<&'a ExtensionPayload> for WirePayload<'a> {
    fn from(payload: &'a ExtensionPayload) -> Self {
        match payload {
            ExtensionPayload::ServerName(d) => WirePayload::ServerName {
                raw: &d.raw,
                valid: d.valid,
                host_name: d.host_name.as_deref(),
            },
            ExtensionPayload::Alpn(d) => WirePayload::Alpn {
                raw: &d.raw,
                valid: d.valid,
                protocols: &d.protocols,
            },
            ExtensionPayload::SupportedGroups(d) => WirePayload::SupportedGroups {
                raw: &d.raw,
                valid: d.valid,
                groups: &d.groups,
            },
            ExtensionPayload::EcPointFormats(d) => WirePayload::EcPointFormats {
                raw: &d.raw,
                valid: d.valid,
                formats: &d.formats,
            },
            ExtensionPayload::Empty(d) => WirePayload::Empty {
                raw: &d.raw,
                valid: d.valid,
            },
            ExtensionPayload::Unknown(d) => WirePayload::Unknown { raw: &d.raw },
        }
    }
}

#[derive(Serialize)]
struct WireInfo<'a> {
    server_name: Option<&'a str>,
    scts: bool,
    protocols: &'a [String],
    ja3_string: &'a str,
    ja3_fingerprint: &'a str,
}

/// The JSON-contract view of a decoded client-hello, borrowed from the
/// original tree. Build with [`ClientHelloJson::from`] and hand to
/// `serde_json::to_writer`/`to_string` directly.
#[derive(Serialize)]
pub struct ClientHelloJson<'a> {
    raw: &'a [u8],
    version: [u8; 2],
    random: &'a [u8],
    session_id: &'a [u8],
    cipher_suites: Vec<WireCipherSuite>,
    compression_methods: &'a [u8],
    extensions: Vec<WireExtension<'a>>,
    info: WireInfo<'a>,
}

impl<'a> From<&'a ClientHello> for ClientHelloJson<'a> {
    fn from(hello: &'a ClientHello) -> Self {
        Self {
            raw: &hello.raw,
            version: hello.version.to_be_bytes(),
            random: &hello.random,
            session_id: &hello.session_id,
            cipher_suites: hello.cipher_suites.iter().map(WireCipherSuite::from).collect(),
            compression_methods: &hello.compression_methods,
            extensions: hello.extensions.iter().map(WireExtension::from).collect(),
            info: WireInfo {
                server_name: hello.summary.server_name.as_deref(),
                scts: hello.summary.scts,
                protocols: &hello.summary.protocols,
                ja3_string: &hello.summary.ja3_string,
                ja3_fingerprint: &hello.summary.ja3_fingerprint,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::unmarshal_client_hello;

    fn u8_prefixed(bytes: &[u8]) -> Vec<u8> {
        let mut out = vec![bytes.len() as u8];
        out.extend_from_slice(bytes);
        out
    }

    fn u16_prefixed(bytes: &[u8]) -> Vec<u8> {
        let mut out = (bytes.len() as u16).to_be_bytes().to_vec();
        out.extend_from_slice(bytes);
        out
    }

    fn u24_prefixed(bytes: &[u8]) -> Vec<u8> {
        let len = bytes.len() as u32;
        let mut out = vec![(len >> 16) as u8, (len >> 8) as u8, len as u8];
        out.extend_from_slice(bytes);
        out
    }

    fn sample_message() -> Vec<u8> {
        let mut body = Vec::new();
        body.extend_from_slice(&0x0303u16.to_be_bytes());
        body.extend_from_slice(&[0u8; 32]);
        body.extend(u8_prefixed(&[]));
        body.extend(u16_prefixed(&0x1301u16.to_be_bytes()));
        body.extend(u8_prefixed(&[0]));
        let mut message = vec![1u8];
        message.extend(u24_prefixed(&body));
        message
    }

    #[test]
    fn version_serializes_as_two_element_array() {
        let hello = unmarshal_client_hello(&sample_message()).unwrap();
        let json = serde_json::to_value(ClientHelloJson::from(&hello)).unwrap();
        assert_eq!(json["version"], serde_json::json!([3, 3]));
    }

    #[test]
    fn cipher_suite_code_is_two_element_array() {
        let hello = unmarshal_client_hello(&sample_message()).unwrap();
        let json = serde_json::to_value(ClientHelloJson::from(&hello)).unwrap();
        assert_eq!(json["cipher_suites"][0]["code"], serde_json::json!([0x13, 0x01]));
    }

    #[test]
    fn omitted_name_is_absent_not_null() {
        let hello = unmarshal_client_hello(&sample_message()).unwrap();
        let json = serde_json::to_value(ClientHelloJson::from(&hello)).unwrap();
        assert!(json["extensions"].as_array().unwrap().is_empty());
        assert!(json["info"]["server_name"].is_null());
    }
}
