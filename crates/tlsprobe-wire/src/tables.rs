//! Process-wide, immutable-after-init code→name lookup tables.
//!
//! The tables are built once from static arrays (the IANA TLS Cipher Suites
//! and TLS ExtensionType registries) and cached behind [`std::sync::OnceLock`].
//! There is no runtime registration API: the set of codes is closed by design,
//! matching the "no runtime mutation" guidance for process-wide static data.

use std::collections::HashMap;
use std::sync::OnceLock;

/// Extension metadata attached to every entry in the extension table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExtensionInfo {
    pub name: &'static str,
    pub private: bool,
}

/// A 16-bit code is grease iff its high and low bytes are equal and both are
/// of the form `0x?A` — i.e. `(code & 0x0F0F) == 0x0A0A` and
/// `(code >> 8) == (code & 0xFF)`. This is exactly membership in the
/// 16-element enumerated grease set below; used for the cipher-suite and
/// extension-type `grease` flags.
///
/// The fingerprint derivation's supported-groups filter uses the looser
/// nibble-only mask instead (see `fingerprint::ja3_string`) — that broader
/// rule is specific to §9's Open Question about group filtering and does not
/// apply to grease flagging in general.
#[must_use]
pub fn is_grease(code: u16) -> bool {
    (code & 0x0F0F) == 0x0A0A && (code >> 8) == (code & 0xFF)
}

/// The canonical enumerated grease set `{0x0A0A, 0x1A1A, ..., 0xFAFA}`.
#[must_use]
pub fn grease_values() -> [u16; 16] {
    let mut values = [0u16; 16];
    let mut i = 0;
    while i < 16 {
        let nibble = (i as u16) << 4;
        values[i] = (nibble | 0x0A) << 8 | (nibble | 0x0A);
        i += 1;
    }
    values
}

/// Reserved vendor-private extension range per spec.md: codes `>= 0xFB00`.
#[must_use]
pub fn is_private_extension(code: u16) -> bool {
    code >= 0xFB00
}

fn cipher_suite_table() -> &'static HashMap<u16, &'static str> {
    static TABLE: OnceLock<HashMap<u16, &'static str>> = OnceLock::new();
    TABLE.get_or_init(|| CIPHER_SUITES.iter().copied().collect())
}

fn extension_table() -> &'static HashMap<u16, ExtensionInfo> {
    static TABLE: OnceLock<HashMap<u16, ExtensionInfo>> = OnceLock::new();
    TABLE.get_or_init(|| {
        EXTENSIONS
            .iter()
            .map(|&(code, name)| (code, ExtensionInfo { name, private: is_private_extension(code) }))
            .collect()
    })
}

/// Looks up the display name for a cipher-suite code, if known.
#[must_use]
pub fn cipher_suite_name(code: u16) -> Option<&'static str> {
    cipher_suite_table().get(&code).copied()
}

/// Looks up the display name and private-range flag for an extension code.
/// Unknown codes are still assigned a `private` flag via the reserved-range
/// check; only `name` is `None` for codes outside the registered table.
#[must_use]
pub fn extension_info(code: u16) -> ExtensionInfo {
    extension_table().get(&code).copied().unwrap_or(ExtensionInfo {
        name: unknown_extension_name(code),
        private: is_private_extension(code),
    })
}

fn unknown_extension_name(code: u16) -> &'static str {
    // A stable sentinel so callers can distinguish "looked up, found nothing"
    // from a genuinely absent field without allocating; JSON serialization
    // treats this the same as a missing name (see tlsprobe-hello::json).
    if is_grease(code) { "grease" } else { "" }
}

// A representative slice of the IANA TLS Cipher Suites registry, covering
// the suites actually offered by current browsers and TLS libraries plus the
// enumerated grease values (which also need a legible name in JSON output).
const CIPHER_SUITES: &[(u16, &str)] = &[
    (0x0000, "TLS_NULL_WITH_NULL_NULL"),
    (0x000A, "TLS_RSA_WITH_3DES_EDE_CBC_SHA"),
    (0x002F, "TLS_RSA_WITH_AES_128_CBC_SHA"),
    (0x0035, "TLS_RSA_WITH_AES_256_CBC_SHA"),
    (0x003C, "TLS_RSA_WITH_AES_128_CBC_SHA256"),
    (0x009C, "TLS_RSA_WITH_AES_128_GCM_SHA256"),
    (0x009D, "TLS_RSA_WITH_AES_256_GCM_SHA384"),
    (0x1301, "TLS_AES_128_GCM_SHA256"),
    (0x1302, "TLS_AES_256_GCM_SHA384"),
    (0x1303, "TLS_CHACHA20_POLY1305_SHA256"),
    (0xC009, "TLS_ECDHE_ECDSA_WITH_AES_128_CBC_SHA"),
    (0xC00A, "TLS_ECDHE_ECDSA_WITH_AES_256_CBC_SHA"),
    (0xC013, "TLS_ECDHE_RSA_WITH_AES_128_CBC_SHA"),
    (0xC014, "TLS_ECDHE_RSA_WITH_AES_256_CBC_SHA"),
    (0xC023, "TLS_ECDHE_ECDSA_WITH_AES_128_CBC_SHA256"),
    (0xC024, "TLS_ECDHE_ECDSA_WITH_AES_256_CBC_SHA384"),
    (0xC027, "TLS_ECDHE_RSA_WITH_AES_128_CBC_SHA256"),
    (0xC028, "TLS_ECDHE_RSA_WITH_AES_256_CBC_SHA384"),
    (0xC02B, "TLS_ECDHE_ECDSA_WITH_AES_128_GCM_SHA256"),
    (0xC02C, "TLS_ECDHE_ECDSA_WITH_AES_256_GCM_SHA384"),
    (0xC02F, "TLS_ECDHE_RSA_WITH_AES_128_GCM_SHA256"),
    (0xC030, "TLS_ECDHE_RSA_WITH_AES_256_GCM_SHA384"),
    (0xCCA8, "TLS_ECDHE_RSA_WITH_CHACHA20_POLY1305_SHA256"),
    (0xCCA9, "TLS_ECDHE_ECDSA_WITH_CHACHA20_POLY1305_SHA256"),
    (0x00FF, "TLS_EMPTY_RENEGOTIATION_INFO_SCSV"),
    (0x0A0A, "GREASE"),
    (0x1A1A, "GREASE"),
    (0x2A2A, "GREASE"),
    (0x3A3A, "GREASE"),
    (0x4A4A, "GREASE"),
    (0x5A5A, "GREASE"),
    (0x6A6A, "GREASE"),
    (0x7A7A, "GREASE"),
    (0x8A8A, "GREASE"),
    (0x9A9A, "GREASE"),
    (0xAAAA, "GREASE"),
    (0xBABA, "GREASE"),
    (0xCACA, "GREASE"),
    (0xDADA, "GREASE"),
    (0xEAEA, "GREASE"),
    (0xFAFA, "GREASE"),
];

// A representative slice of the IANA TLS ExtensionType registry, covering
// every extension spec.md's decoder table names plus the common ones needed
// for realistic fingerprints.
const EXTENSIONS: &[(u16, &str)] = &[
    (0, "server_name"),
    (1, "max_fragment_length"),
    (5, "status_request"),
    (10, "supported_groups"),
    (11, "ec_point_formats"),
    (13, "signature_algorithms"),
    (16, "application_layer_protocol_negotiation"),
    (18, "signed_certificate_timestamp"),
    (21, "padding"),
    (22, "encrypt_then_mac"),
    (23, "extended_master_secret"),
    (27, "compress_certificate"),
    (35, "session_ticket"),
    (41, "pre_shared_key"),
    (42, "early_data"),
    (43, "supported_versions"),
    (44, "cookie"),
    (45, "psk_key_exchange_modes"),
    (49, "post_handshake_auth"),
    (50, "signature_algorithms_cert"),
    (51, "key_share"),
    (0x0A0A, "GREASE"),
    (0x1A1A, "GREASE"),
    (0x2A2A, "GREASE"),
    (0x3A3A, "GREASE"),
    (0x4A4A, "GREASE"),
    (0x5A5A, "GREASE"),
    (0x6A6A, "GREASE"),
    (0x7A7A, "GREASE"),
    (0x8A8A, "GREASE"),
    (0x9A9A, "GREASE"),
    (0xAAAA, "GREASE"),
    (0xBABA, "GREASE"),
    (0xCACA, "GREASE"),
    (0xDADA, "GREASE"),
    (0xEAEA, "GREASE"),
    (0xFAFA, "GREASE"),
    (0xFF01, "renegotiation_info"),
];
