//! Client-hello decoder (C6).
//!
//! Walks the full handshake message (header included) into a [`ClientHello`]
//! tree, consulting [`crate::extensions`] for each extension body. The
//! decoding order is fixed by spec: handshake header, legacy version,
//! random, session id, cipher suites, compression methods, extensions block,
//! then a trailing-bytes check after each length-prefixed region.

use tlsprobe_wire::tables;
use tlsprobe_wire::Reader;

use crate::error::DecodeError;
use crate::extensions;
use crate::fingerprint;
use crate::model::{CipherSuite, ClientHello, ExtensionEntry, ExtensionPayload, Summary};

const HANDSHAKE_TYPE_CLIENT_HELLO: u8 = 1;

/// Parses `message` (a full handshake message: 4-byte header + body) into a
/// [`ClientHello`] tree, or `None` if it is not a structurally valid
/// client-hello. This is the only failure mode the public surface exposes;
/// callers never learn which step failed.
#[must_use]
pub fn unmarshal_client_hello(message: &[u8]) -> Option<ClientHello> {
    decode(message).ok()
}

fn decode(message: &[u8]) -> Result<ClientHello, DecodeError> {
    let mut outer = Reader::new(message);

    let handshake_type = outer.read_u8().ok_or(DecodeError::Truncated)?;
    if handshake_type != HANDSHAKE_TYPE_CLIENT_HELLO {
        return Err(DecodeError::WrongHandshakeType(handshake_type));
    }
    let mut body = outer
        .read_u24_length_prefixed()
        .ok_or(DecodeError::Truncated)?;
    if !outer.is_empty() {
        return Err(DecodeError::TrailingAfterMessage);
    }

    let version = body.read_u16_be().ok_or(DecodeError::Truncated)?;
    let random_slice = body.read_bytes(32).ok_or(DecodeError::Truncated)?;
    let mut random = [0u8; 32];
    random.copy_from_slice(random_slice);

    let mut session_id_reader = body
        .read_u8_length_prefixed()
        .ok_or(DecodeError::Truncated)?;
    let session_id = session_id_reader.remaining().to_vec();

    let mut cipher_suite_reader = body
        .read_u16_length_prefixed()
        .ok_or(DecodeError::Truncated)?;
    let mut cipher_suites = Vec::new();
    while !cipher_suite_reader.is_empty() {
        let code = cipher_suite_reader
            .read_u16_be()
            .ok_or(DecodeError::Truncated)?;
        cipher_suites.push(CipherSuite::new(code));
    }

    let mut compression_reader = body
        .read_u8_length_prefixed()
        .ok_or(DecodeError::Truncated)?;
    let mut compression_methods = Vec::new();
    while !compression_reader.is_empty() {
        compression_methods.push(
            compression_reader
                .read_u8()
                .ok_or(DecodeError::Truncated)?,
        );
    }

    let mut extensions_list = Vec::new();
    if !body.is_empty() {
        let mut extensions_reader = body
            .read_u16_length_prefixed()
            .ok_or(DecodeError::Truncated)?;
        while !extensions_reader.is_empty() {
            let type_code = extensions_reader
                .read_u16_be()
                .ok_or(DecodeError::Truncated)?;
            let data_reader = extensions_reader
                .read_u16_length_prefixed()
                .ok_or(DecodeError::Truncated)?;
            let data = data_reader.remaining();
            let info = tables::extension_info(type_code);
            extensions_list.push(ExtensionEntry {
                type_code,
                name: (!info.name.is_empty()).then_some(info.name),
                grease: tables::is_grease(type_code),
                private: info.private,
                payload: extensions::decode(type_code, data),
            });
        }
        if !body.is_empty() {
            return Err(DecodeError::TrailingAfterExtensions);
        }
    }

    if !body.is_empty() {
        return Err(DecodeError::TrailingAfterBody);
    }

    let summary = build_summary(version, &cipher_suites, &extensions_list);

    Ok(ClientHello {
        raw: message.to_vec(),
        version,
        random,
        session_id,
        cipher_suites,
        compression_methods,
        extensions: extensions_list,
        summary,
    })
}

fn build_summary(
    version: u16,
    cipher_suites: &[CipherSuite],
    extensions_list: &[ExtensionEntry],
) -> Summary {
    let server_name = extensions_list.iter().find_map(|e| match &e.payload {
        ExtensionPayload::ServerName(data) => data.host_name.clone(),
        _ => None,
    });

    let scts = extensions_list.iter().any(|e| e.type_code == 18);

    let protocols = extensions_list
        .iter()
        .find_map(|e| match &e.payload {
            ExtensionPayload::Alpn(data) => Some(data.protocols.clone()),
            _ => None,
        })
        .unwrap_or_default();

    // ja3_string/ja3_fingerprint need the full tree; build a throwaway one
    // with just the fields the derivation reads (version, cipher_suites,
    // extensions) rather than threading `self` through a two-pass build.
    let scratch = ClientHello {
        raw: Vec::new(),
        version,
        random: [0u8; 32],
        session_id: Vec::new(),
        cipher_suites: cipher_suites.to_vec(),
        compression_methods: Vec::new(),
        extensions: extensions_list.to_vec(),
        summary: Summary::default(),
    };
    let ja3_string = fingerprint::ja3_string(&scratch);
    let ja3_fingerprint = fingerprint::ja3_fingerprint(&ja3_string);

    Summary {
        server_name,
        scts,
        protocols,
        ja3_string,
        ja3_fingerprint,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

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

    fn server_name_extension(host: &str) -> Vec<u8> {
        let name_entry = [&[0u8][..], &(host.len() as u16).to_be_bytes(), host.as_bytes()].concat();
        let name_list = u16_prefixed(&name_entry);
        let mut ext = 0u16.to_be_bytes().to_vec();
        ext.extend(u16_prefixed(&name_list));
        ext
    }

    fn minimal_client_hello_body(extensions_block: Option<Vec<u8>>) -> Vec<u8> {
        let mut body = Vec::new();
        body.extend_from_slice(&0x0303u16.to_be_bytes()); // version
        body.extend_from_slice(&[0u8; 32]); // random
        body.extend(u8_prefixed(&[])); // session id
        body.extend(u16_prefixed(&0x1301u16.to_be_bytes())); // one cipher suite
        body.extend(u8_prefixed(&[0])); // one compression method
        if let Some(exts) = extensions_block {
            body.extend(u16_prefixed(&exts));
        }
        body
    }

    fn wrap_message(body: Vec<u8>) -> Vec<u8> {
        let mut message = vec![HANDSHAKE_TYPE_CLIENT_HELLO];
        message.extend(u24_prefixed(&body));
        message
    }

    #[test]
    fn decodes_minimal_hello_with_no_extensions() {
        let message = wrap_message(minimal_client_hello_body(None));
        let hello = unmarshal_client_hello(&message).expect("valid hello");
        assert_eq!(hello.version, 0x0303);
        assert!(hello.extensions.is_empty());
        assert_eq!(hello.cipher_suites.len(), 1);
    }

    #[test]
    fn decodes_server_name_into_summary() {
        let ext = server_name_extension("example.com");
        let message = wrap_message(minimal_client_hello_body(Some(ext)));
        let hello = unmarshal_client_hello(&message).expect("valid hello");
        assert_eq!(hello.summary.server_name.as_deref(), Some("example.com"));
        assert!(hello.summary.ja3_string.starts_with("771,"));
    }

    #[test]
    fn truncated_inside_cipher_suites_fails_closed() {
        let mut body = Vec::new();
        body.extend_from_slice(&0x0303u16.to_be_bytes());
        body.extend_from_slice(&[0u8; 32]);
        body.extend(u8_prefixed(&[]));
        // claim 4 bytes of cipher suites but only provide 1.
        body.extend_from_slice(&4u16.to_be_bytes());
        body.push(0xAA);
        let message = wrap_message(body);
        assert!(unmarshal_client_hello(&message).is_none());
    }

    #[test]
    fn trailing_bytes_after_body_fail_closed() {
        let mut message = wrap_message(minimal_client_hello_body(None));
        message.push(0xFF);
        assert!(unmarshal_client_hello(&message).is_none());
    }

    #[test]
    fn wrong_handshake_type_is_rejected() {
        let mut message = wrap_message(minimal_client_hello_body(None));
        message[0] = 2;
        assert!(unmarshal_client_hello(&message).is_none());
    }

    #[test]
    fn raw_is_preserved_verbatim() {
        let message = wrap_message(minimal_client_hello_body(None));
        let hello = unmarshal_client_hello(&message).unwrap();
        assert_eq!(hello.raw, message);
    }

    #[test]
    fn grease_cipher_first_is_flagged_and_excluded_from_ja3() {
        let mut body = Vec::new();
        body.extend_from_slice(&0x0303u16.to_be_bytes());
        body.extend_from_slice(&[0u8; 32]);
        body.extend(u8_prefixed(&[]));
        let ciphers = [0x0A0Au16.to_be_bytes(), 0x1301u16.to_be_bytes()].concat();
        body.extend(u16_prefixed(&ciphers));
        body.extend(u8_prefixed(&[0]));
        let message = wrap_message(body);
        let hello = unmarshal_client_hello(&message).unwrap();
        assert!(hello.cipher_suites[0].grease);
        assert!(!hello.summary.ja3_string.contains("2570")); // 0x0A0A decimal
    }

    #[test]
    fn unknown_extension_type_captures_raw_bytes() {
        let mut ext = 0xAAAAu16.to_be_bytes().to_vec();
        ext.extend(u16_prefixed(&[1, 2, 3]));
        let message = wrap_message(minimal_client_hello_body(Some(ext)));
        let hello = unmarshal_client_hello(&message).unwrap();
        let entry = &hello.extensions[0];
        assert_eq!(entry.type_code, 0xAAAA);
        match &entry.payload {
            ExtensionPayload::Unknown(data) => assert_eq!(data.raw, vec![1, 2, 3]),
            other => panic!("expected Unknown, got {other:?}"),
        }
    }

    #[test]
    fn sct_extension_sets_scts_flag() {
        let mut ext = 18u16.to_be_bytes().to_vec();
        ext.extend(u16_prefixed(&[]));
        let message = wrap_message(minimal_client_hello_body(Some(ext)));
        let hello = unmarshal_client_hello(&message).unwrap();
        assert!(hello.summary.scts);
    }

    #[test]
    fn duplicate_host_name_keeps_first_and_marks_summary() {
        let entry1 = [&[0u8][..], &9u16.to_be_bytes(), b"a.example".as_slice()].concat();
        let entry2 = [&[0u8][..], &11u16.to_be_bytes(), b"b.example!!".as_slice()].concat();
        let name_list = u16_prefixed(&[entry1, entry2].concat());
        let mut ext = 0u16.to_be_bytes().to_vec();
        ext.extend(u16_prefixed(&name_list));

        let message = wrap_message(minimal_client_hello_body(Some(ext)));
        let hello = unmarshal_client_hello(&message).unwrap();
        assert_eq!(hello.summary.server_name.as_deref(), Some("a.example"));
        match &hello.extensions[0].payload {
            ExtensionPayload::ServerName(data) => assert!(!data.valid),
            other => panic!("expected ServerName, got {other:?}"),
        }
    }
}
