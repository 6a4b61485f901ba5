//! Canonical fingerprint-string derivation and its 128-bit digest (C7).
//!
//! The digest uses MD5 purely for compatibility with the widely-deployed JA3
//! fingerprint format; it has no security role here.

use digest::Digest;

use crate::model::{ClientHello, ExtensionPayload};

/// Builds the canonical `V,CIPHERS,EXTENSIONS,GROUPS,POINTFORMATS` string.
/// Any of the four lists may be empty, leaving adjacent commas.
#[must_use]
pub fn ja3_string(hello: &ClientHello) -> String {
    let ciphers = join_non_grease(hello.cipher_suites.iter().filter(|c| !c.grease).map(|c| c.code));
    let extensions = join_non_grease(
        hello
            .extensions
            .iter()
            .filter(|e| !e.grease)
            .map(|e| e.type_code),
    );

    let groups = hello
        .extensions
        .iter()
        .find_map(|e| match &e.payload {
            ExtensionPayload::SupportedGroups(data) => Some(
                data.groups
                    .iter()
                    .copied()
                    .filter(|g| (g & 0x0F0F) != 0x0A0A),
            ),
            _ => None,
        })
        .map(|iter| join_values(iter))
        .unwrap_or_default();

    let point_formats = hello
        .extensions
        .iter()
        .find_map(|e| match &e.payload {
            ExtensionPayload::EcPointFormats(data) => Some(data.formats.iter().copied()),
            _ => None,
        })
        .map(join_values)
        .unwrap_or_default();

    format!(
        "{},{},{},{},{}",
        hello.version, ciphers, extensions, groups, point_formats
    )
}

fn join_non_grease(codes: impl Iterator<Item = u16>) -> String {
    join_values(codes)
}

fn join_values(values: impl Iterator<Item = u16>) -> String {
    values
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join("-")
}

/// Lowercase hex MD5 digest of the UTF-8 encoding of `ja3_string`.
#[must_use]
pub fn ja3_fingerprint(ja3_string: &str) -> String {
    let mut hasher = md5::Md5::new();
    hasher.update(ja3_string.as_bytes());
    let digest = hasher.finalize();
    digest.iter().map(|byte| format!("{byte:02x}")).collect()
}
