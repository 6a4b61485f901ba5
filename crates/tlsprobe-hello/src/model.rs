//! Typed tree produced by [`crate::decode::unmarshal_client_hello`].
//!
//! These types model the decoded client-hello in plain Rust terms (`u16`
//! codes, owned buffers). The wire-facing JSON shape from the introspection
//! server's contract — 2-element `[hi, lo]` byte arrays for codes, a nested
//! `info` object, etc. — is a distinct concern handled by [`crate::json`]; the
//! two are kept separate so this module stays a faithful, idiomatic
//! representation of "what the client advertised" rather than a JSON
//! document in disguise.

/// A cipher-suite code annotated with its display name and grease flag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CipherSuite {
    pub code: u16,
    pub name: Option<&'static str>,
    pub grease: bool,
}

impl CipherSuite {
    #[must_use]
    pub fn new(code: u16) -> Self {
        Self {
            code,
            name: tlsprobe_wire::tables::cipher_suite_name(code),
            grease: tlsprobe_wire::tables::is_grease(code),
        }
    }
}

/// One entry in the client-hello's extension list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExtensionEntry {
    pub type_code: u16,
    pub name: Option<&'static str>,
    pub grease: bool,
    pub private: bool,
    pub payload: ExtensionPayload,
}

/// A closed set of per-extension-type payload shapes. Unregistered extension
/// codes decode to [`ExtensionPayload::Unknown`]; decoders never fail outright
/// — malformed bodies still produce a value with `valid = false`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExtensionPayload {
    ServerName(ServerNameData),
    Alpn(AlpnData),
    SupportedGroups(SupportedGroupsData),
    EcPointFormats(EcPointFormatsData),
    Empty(EmptyData),
    Unknown(UnknownData),
}

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct ServerNameData {
    pub raw: Vec<u8>,
    pub valid: bool,
    pub host_name: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct AlpnData {
    pub raw: Vec<u8>,
    pub valid: bool,
    pub protocols: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct SupportedGroupsData {
    pub raw: Vec<u8>,
    pub valid: bool,
    pub groups: Vec<u16>,
}

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct EcPointFormatsData {
    pub raw: Vec<u8>,
    pub valid: bool,
    pub formats: Vec<u16>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmptyData {
    pub raw: Vec<u8>,
    pub valid: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownData {
    pub raw: Vec<u8>,
}

/// Convenience subset of the client-hello tree, populated during decode.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Summary {
    pub server_name: Option<String>,
    pub scts: bool,
    pub protocols: Vec<String>,
    pub ja3_string: String,
    pub ja3_fingerprint: String,
}

/// The full, strictly-validated client-hello message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientHello {
    /// The complete handshake-message bytes (header included), retained
    /// verbatim so callers can re-hash or re-emit the original message.
    pub raw: Vec<u8>,
    pub version: u16,
    pub random: [u8; 32],
    pub session_id: Vec<u8>,
    pub cipher_suites: Vec<CipherSuite>,
    pub compression_methods: Vec<u8>,
    pub extensions: Vec<ExtensionEntry>,
    pub summary: Summary,
}
