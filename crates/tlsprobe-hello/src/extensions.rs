//! Per-extension-type payload decoders (C5).
//!
//! Decoders are total: malformed input never propagates an error, it just
//! produces a payload with `valid = false` and whatever was parsed up to the
//! point of failure, alongside the untouched `raw` bytes. This keeps one
//! malformed extension from hiding the rest of the handshake from observers.

use tlsprobe_wire::Reader;

use crate::model::{
    AlpnData, EcPointFormatsData, EmptyData, ExtensionPayload, ServerNameData,
    SupportedGroupsData, UnknownData,
};

type Decoder = fn(&[u8]) -> ExtensionPayload;

/// The compile-time registry mapping extension type code to decoder. Eight
/// entries is small enough that a linear scan beats building a `HashMap`;
/// unregistered codes fall back to [`decode_unknown`].
const REGISTRY: &[(u16, Decoder)] = &[
    (0, decode_server_name),
    (10, decode_supported_groups),
    (11, decode_ec_point_formats),
    (16, decode_alpn),
    (18, decode_empty),
    (22, decode_empty),
    (23, decode_empty),
    (49, decode_empty),
];

/// Dispatches `data` to its registered decoder, or [`decode_unknown`] if the
/// extension type has no registered shape.
#[must_use]
pub fn decode(type_code: u16, data: &[u8]) -> ExtensionPayload {
    REGISTRY
        .iter()
        .find(|&&(code, _)| code == type_code)
        .map_or_else(|| decode_unknown(data), |&(_, decoder)| decoder(data))
}

fn decode_unknown(data: &[u8]) -> ExtensionPayload {
    ExtensionPayload::Unknown(UnknownData { raw: data.to_vec() })
}

fn decode_empty(data: &[u8]) -> ExtensionPayload {
    ExtensionPayload::Empty(EmptyData {
        raw: data.to_vec(),
        valid: data.is_empty(),
    })
}

/// RFC 6066 §3 `server_name`. Rejects a second `host_name` entry by leaving
/// `valid = false` while preserving the first one already parsed.
fn decode_server_name(data: &[u8]) -> ExtensionPayload {
    let mut out = ServerNameData {
        raw: data.to_vec(),
        valid: false,
        host_name: None,
    };

    let mut body = Reader::new(data);
    let Some(mut name_list) = body.read_u16_length_prefixed() else {
        return ExtensionPayload::ServerName(out);
    };
    if name_list.is_empty() {
        return ExtensionPayload::ServerName(out);
    }

    while !name_list.is_empty() {
        let Some(name_type) = name_list.read_u8() else {
            return ExtensionPayload::ServerName(out);
        };
        let Some(name_data) = name_list.read_u16_length_prefixed() else {
            return ExtensionPayload::ServerName(out);
        };
        if name_data.is_empty() {
            return ExtensionPayload::ServerName(out);
        }
        if name_type == 0 {
            if out.host_name.is_some() {
                // Duplicate host_name: stop here, keep the first value, fail.
                return ExtensionPayload::ServerName(out);
            }
            out.host_name = Some(String::from_utf8_lossy(name_data.remaining()).into_owned());
        }
    }

    if !body.is_empty() {
        return ExtensionPayload::ServerName(out);
    }

    out.valid = true;
    ExtensionPayload::ServerName(out)
}

/// RFC 7301 `application_layer_protocol_negotiation`.
fn decode_alpn(data: &[u8]) -> ExtensionPayload {
    let mut out = AlpnData {
        raw: data.to_vec(),
        valid: false,
        protocols: Vec::new(),
    };

    let mut body = Reader::new(data);
    let Some(mut protocol_list) = body.read_u16_length_prefixed() else {
        return ExtensionPayload::Alpn(out);
    };
    if protocol_list.is_empty() {
        return ExtensionPayload::Alpn(out);
    }

    while !protocol_list.is_empty() {
        let Some(name) = protocol_list.read_u8_length_prefixed() else {
            return ExtensionPayload::Alpn(out);
        };
        if name.is_empty() {
            return ExtensionPayload::Alpn(out);
        }
        out.protocols
            .push(String::from_utf8_lossy(name.remaining()).into_owned());
    }

    if !body.is_empty() {
        return ExtensionPayload::Alpn(out);
    }

    out.valid = true;
    ExtensionPayload::Alpn(out)
}

/// RFC 8422 §5.1.1 `supported_groups`.
fn decode_supported_groups(data: &[u8]) -> ExtensionPayload {
    let mut out = SupportedGroupsData {
        raw: data.to_vec(),
        valid: false,
        groups: Vec::new(),
    };

    let mut body = Reader::new(data);
    let Some(mut list) = body.read_u16_length_prefixed() else {
        return ExtensionPayload::SupportedGroups(out);
    };

    while !list.is_empty() {
        let Some(group) = list.read_u16_be() else {
            return ExtensionPayload::SupportedGroups(out);
        };
        out.groups.push(group);
    }

    if !body.is_empty() {
        return ExtensionPayload::SupportedGroups(out);
    }

    out.valid = true;
    ExtensionPayload::SupportedGroups(out)
}

/// RFC 8422 §5.1.2 `ec_point_formats`. Formats are 1-byte on the wire but
/// widened to `u16` for uniform emission alongside `supported_groups`.
fn decode_ec_point_formats(data: &[u8]) -> ExtensionPayload {
    let mut out = EcPointFormatsData {
        raw: data.to_vec(),
        valid: false,
        formats: Vec::new(),
    };

    let mut body = Reader::new(data);
    let Some(mut list) = body.read_u8_length_prefixed() else {
        return ExtensionPayload::EcPointFormats(out);
    };

    while !list.is_empty() {
        let Some(format) = list.read_u8() else {
            return ExtensionPayload::EcPointFormats(out);
        };
        out.formats.push(u16::from(format));
    }

    if !body.is_empty() {
        return ExtensionPayload::EcPointFormats(out);
    }

    out.valid = true;
    ExtensionPayload::EcPointFormats(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn u16_prefixed(items: &[&[u8]]) -> Vec<u8> {
        let body: Vec<u8> = items.concat();
        let mut out = (body.len() as u16).to_be_bytes().to_vec();
        out.extend(body);
        out
    }

    #[test]
    fn server_name_single_host_name_is_valid() {
        let name = b"example.com";
        let entry = [&[0u8][..], &(name.len() as u16).to_be_bytes(), name].concat();
        let data = u16_prefixed(&[&entry]);

        let ExtensionPayload::ServerName(parsed) = decode_server_name(&data) else {
            panic!("wrong variant");
        };
        assert!(parsed.valid);
        assert_eq!(parsed.host_name.as_deref(), Some("example.com"));
    }

    #[test]
    fn server_name_duplicate_host_name_is_invalid_but_keeps_first() {
        let first = b"a.example";
        let second = b"b.example";
        let entry1 = [&[0u8][..], &(first.len() as u16).to_be_bytes(), first].concat();
        let entry2 = [&[0u8][..], &(second.len() as u16).to_be_bytes(), second].concat();
        let data = u16_prefixed(&[&entry1, &entry2]);

        let ExtensionPayload::ServerName(parsed) = decode_server_name(&data) else {
            panic!("wrong variant");
        };
        assert!(!parsed.valid);
        assert_eq!(parsed.host_name.as_deref(), Some("a.example"));
    }

    #[test]
    fn alpn_lists_protocols_in_order() {
        let data = u16_prefixed(&[&[2, b'h', b'2'], &[8, b'h', b't', b't', b'p', b'/', b'1', b'.', b'1']]);
        let ExtensionPayload::Alpn(parsed) = decode_alpn(&data) else {
            panic!("wrong variant");
        };
        assert!(parsed.valid);
        assert_eq!(parsed.protocols, vec!["h2", "http/1.1"]);
    }

    #[test]
    fn empty_extension_requires_zero_length_body() {
        let ExtensionPayload::Empty(parsed) = decode_empty(&[]) else {
            panic!("wrong variant");
        };
        assert!(parsed.valid);

        let ExtensionPayload::Empty(parsed) = decode_empty(&[0x01]) else {
            panic!("wrong variant");
        };
        assert!(!parsed.valid);
    }

    #[test]
    fn unregistered_extension_falls_back_to_unknown() {
        let payload = decode(0xAAAA, &[0x01, 0x02, 0x03]);
        let ExtensionPayload::Unknown(parsed) = payload else {
            panic!("wrong variant");
        };
        assert_eq!(parsed.raw, vec![0x01, 0x02, 0x03]);
    }

    #[test]
    fn truncated_supported_groups_is_invalid_not_a_panic() {
        let ExtensionPayload::SupportedGroups(parsed) = decode_supported_groups(&[0x00, 0x03, 0x00]) else {
            panic!("wrong variant");
        };
        assert!(!parsed.valid);
    }
}
