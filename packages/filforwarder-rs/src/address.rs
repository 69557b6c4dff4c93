//! Filecoin Address Codec
//!
//! Parses human-readable Filecoin addresses into the canonical byte encoding
//! the FilForwarder contract expects, and renders bytes back into strings.
//!
//! ## Address Format
//!
//! A textual address is `<network><protocol><payload>`:
//!
//! ```text
//! | Network (f/t) | Protocol (0-4) | Payload (protocol-specific) |
//! ```
//!
//! ## Protocols
//!
//! - `0`: actor ID, decimal digits, encoded as unsigned LEB128
//! - `1`: secp256k1 key hash, 20 bytes
//! - `2`: actor hash, 20 bytes
//! - `3`: BLS public key, 48 bytes
//! - `4`: delegated, `<namespace>f<subaddress>` with namespace as decimal
//!   digits and a subaddress of up to 54 bytes
//!
//! Protocols 1-4 carry a 4-byte blake2b checksum appended to the payload
//! before base32 encoding (lowercase RFC 4648 alphabet, no padding).

use std::fmt;
use std::str::FromStr;

use data_encoding::Encoding;
use data_encoding_macro::new_encoding;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

// ============================================================================
// Constants
// ============================================================================

/// Base32 encoder used for address payloads (lowercase, no padding)
const ADDRESS_ENCODER: Encoding = new_encoding! {
    symbols: "abcdefghijklmnopqrstuvwxyz234567",
    padding: None,
};

/// Length of a secp256k1 or actor payload hash
pub const PAYLOAD_HASH_LEN: usize = 20;

/// Length of a BLS public key payload
pub const BLS_PUB_LEN: usize = 48;

/// Maximum length of a delegated-address subaddress
pub const MAX_SUBADDRESS_LEN: usize = 54;

/// Length of the address checksum
pub const CHECKSUM_HASH_LEN: usize = 4;

/// Longest possible textual address (an f4 with a full-length subaddress)
const MAX_ADDRESS_STRING_LEN: usize = 116;

/// Maximum decimal digits in a u64 actor ID or delegated namespace
const MAX_U64_DIGITS: usize = 20;

const MAINNET_PREFIX: &str = "f";
const TESTNET_PREFIX: &str = "t";

// ============================================================================
// Errors
// ============================================================================

/// Reasons an address string or byte encoding fails validation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    #[error("unknown network prefix (expected 'f' or 't')")]
    UnknownNetwork,
    #[error("unknown protocol indicator (expected '0'..'4')")]
    UnknownProtocol,
    #[error("address has invalid length")]
    InvalidLength,
    #[error("payload does not satisfy the protocol requirements")]
    InvalidPayload,
    #[error("checksum validation failed")]
    InvalidChecksum,
    #[error("invalid base32 payload: {0}")]
    Base32(#[from] data_encoding::DecodeError),
    #[error("invalid numeric component: {0}")]
    Numeric(#[from] std::num::ParseIntError),
}

// ============================================================================
// Network
// ============================================================================

/// Network indicated by the first character of a textual address
///
/// The byte encoding is network-independent; the prefix only affects the
/// string form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Network {
    #[default]
    Mainnet,
    Testnet,
}

impl Network {
    /// The address prefix character for this network
    pub fn prefix(&self) -> &'static str {
        match self {
            Network::Mainnet => MAINNET_PREFIX,
            Network::Testnet => TESTNET_PREFIX,
        }
    }

    /// The network a given EVM chain ID belongs to (314 is Filecoin mainnet)
    pub fn for_chain_id(chain_id: u64) -> Self {
        if chain_id == 314 {
            Network::Mainnet
        } else {
            Network::Testnet
        }
    }
}

// ============================================================================
// Protocol
// ============================================================================

/// Address protocol, stored as the leading byte of the canonical encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Protocol {
    /// Actor ID (LEB128 varint payload)
    Id = 0,
    /// secp256k1 public key hash
    Secp256k1 = 1,
    /// Actor hash
    Actor = 2,
    /// BLS public key
    Bls = 3,
    /// Delegated (namespace + subaddress, e.g. `f410...` for Ethereum accounts)
    Delegated = 4,
}

impl Protocol {
    /// Parse the protocol from the leading byte of a byte encoding
    pub fn from_byte(b: u8) -> Option<Protocol> {
        match b {
            0 => Some(Protocol::Id),
            1 => Some(Protocol::Secp256k1),
            2 => Some(Protocol::Actor),
            3 => Some(Protocol::Bls),
            4 => Some(Protocol::Delegated),
            _ => None,
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", *self as u8)
    }
}

// ============================================================================
// FilAddress
// ============================================================================

/// A validated Filecoin address
///
/// `payload` holds everything after the protocol byte of the canonical
/// encoding: the LEB128 varint for ID addresses, the raw hash or key for
/// protocols 1-3, and `leb128(namespace) ++ subaddress` for delegated
/// addresses. Immutable once parsed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FilAddress {
    protocol: Protocol,
    payload: Vec<u8>,
}

impl FilAddress {
    /// Construct from protocol and payload, validating protocol invariants
    fn new(protocol: Protocol, payload: Vec<u8>) -> Result<Self, AddressError> {
        match protocol {
            Protocol::Id => {
                validate_leb128(&payload)?;
            }
            Protocol::Secp256k1 | Protocol::Actor => {
                if payload.len() != PAYLOAD_HASH_LEN {
                    return Err(AddressError::InvalidPayload);
                }
            }
            Protocol::Bls => {
                if payload.len() != BLS_PUB_LEN {
                    return Err(AddressError::InvalidPayload);
                }
            }
            Protocol::Delegated => {
                let (_, subaddress) = split_delegated(&payload)?;
                if subaddress.len() > MAX_SUBADDRESS_LEN {
                    return Err(AddressError::InvalidPayload);
                }
            }
        }
        Ok(Self { protocol, payload })
    }

    /// Construct an ID address from a raw actor ID
    pub fn new_id(id: u64) -> Self {
        Self {
            protocol: Protocol::Id,
            payload: leb128_encode(id),
        }
    }

    /// Construct a delegated address from namespace and subaddress
    pub fn new_delegated(namespace: u64, subaddress: &[u8]) -> Result<Self, AddressError> {
        if subaddress.len() > MAX_SUBADDRESS_LEN {
            return Err(AddressError::InvalidPayload);
        }
        let mut payload = leb128_encode(namespace);
        payload.extend_from_slice(subaddress);
        Ok(Self {
            protocol: Protocol::Delegated,
            payload,
        })
    }

    /// Parse from the canonical byte encoding (`protocol byte ++ payload`)
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, AddressError> {
        if bytes.len() < 2 {
            return Err(AddressError::InvalidLength);
        }
        let protocol = Protocol::from_byte(bytes[0]).ok_or(AddressError::UnknownProtocol)?;
        Self::new(protocol, bytes[1..].to_vec())
    }

    /// The address protocol
    pub fn protocol(&self) -> Protocol {
        self.protocol
    }

    /// The payload bytes (everything after the protocol byte)
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// The canonical byte encoding the FilForwarder contract expects
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(1 + self.payload.len());
        bytes.push(self.protocol as u8);
        bytes.extend_from_slice(&self.payload);
        bytes
    }

    /// The actor ID, for ID addresses
    pub fn id(&self) -> Option<u64> {
        if self.protocol != Protocol::Id {
            return None;
        }
        leb128::read::unsigned(&mut &self.payload[..]).ok()
    }

    /// The namespace and subaddress, for delegated addresses
    pub fn delegated(&self) -> Option<(u64, &[u8])> {
        if self.protocol != Protocol::Delegated {
            return None;
        }
        split_delegated(&self.payload).ok()
    }

    /// Render the textual form for a given network prefix
    pub fn to_display(&self, network: Network) -> String {
        let prefix = network.prefix();
        match self.protocol {
            Protocol::Id => {
                let id = self.id().unwrap_or_default();
                format!("{prefix}0{id}")
            }
            Protocol::Secp256k1 | Protocol::Actor | Protocol::Bls => {
                let mut ingest = vec![self.protocol as u8];
                ingest.extend_from_slice(&self.payload);
                let mut body = self.payload.clone();
                body.extend_from_slice(&checksum(&ingest));
                format!(
                    "{prefix}{}{}",
                    self.protocol,
                    ADDRESS_ENCODER.encode(&body)
                )
            }
            Protocol::Delegated => {
                let (namespace, subaddress) =
                    split_delegated(&self.payload).unwrap_or((0, &[]));
                let mut ingest = vec![self.protocol as u8];
                ingest.extend_from_slice(&self.payload);
                let mut body = subaddress.to_vec();
                body.extend_from_slice(&checksum(&ingest));
                format!(
                    "{prefix}4{namespace}f{}",
                    ADDRESS_ENCODER.encode(&body)
                )
            }
        }
    }
}

impl FromStr for FilAddress {
    type Err = AddressError;

    fn from_str(addr: &str) -> Result<Self, Self::Err> {
        if addr.len() < 3 || addr.len() > MAX_ADDRESS_STRING_LEN {
            return Err(AddressError::InvalidLength);
        }
        // Byte-level prefix checks keep later slicing on char boundaries
        let bytes = addr.as_bytes();
        if bytes[0] != b'f' && bytes[0] != b't' {
            return Err(AddressError::UnknownNetwork);
        }

        let protocol = match bytes[1] {
            b'0' => Protocol::Id,
            b'1' => Protocol::Secp256k1,
            b'2' => Protocol::Actor,
            b'3' => Protocol::Bls,
            b'4' => Protocol::Delegated,
            _ => return Err(AddressError::UnknownProtocol),
        };

        let raw = &addr[2..];
        match protocol {
            Protocol::Id => {
                if raw.len() > MAX_U64_DIGITS {
                    return Err(AddressError::InvalidLength);
                }
                // u64::from_str accepts a leading '+', addresses do not
                if !raw.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(AddressError::InvalidPayload);
                }
                let id = raw.parse::<u64>()?;
                Ok(FilAddress::new_id(id))
            }
            Protocol::Delegated => {
                let (ns_str, sub_str) =
                    raw.split_once('f').ok_or(AddressError::InvalidPayload)?;
                if ns_str.is_empty() || ns_str.len() > MAX_U64_DIGITS {
                    return Err(AddressError::InvalidLength);
                }
                if !ns_str.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(AddressError::InvalidPayload);
                }
                let namespace = ns_str.parse::<u64>()?;

                let decoded = ADDRESS_ENCODER.decode(sub_str.as_bytes())?;
                if decoded.len() < CHECKSUM_HASH_LEN {
                    return Err(AddressError::InvalidLength);
                }
                let (subaddress, cksm) =
                    decoded.split_at(decoded.len() - CHECKSUM_HASH_LEN);
                if subaddress.len() > MAX_SUBADDRESS_LEN {
                    return Err(AddressError::InvalidPayload);
                }

                let mut ingest = vec![protocol as u8];
                ingest.extend_from_slice(&leb128_encode(namespace));
                ingest.extend_from_slice(subaddress);
                if !validate_checksum(&ingest, cksm) {
                    return Err(AddressError::InvalidChecksum);
                }

                FilAddress::new_delegated(namespace, subaddress)
            }
            Protocol::Secp256k1 | Protocol::Actor | Protocol::Bls => {
                let decoded = ADDRESS_ENCODER.decode(raw.as_bytes())?;
                if decoded.len() < CHECKSUM_HASH_LEN {
                    return Err(AddressError::InvalidLength);
                }
                let (payload, cksm) =
                    decoded.split_at(decoded.len() - CHECKSUM_HASH_LEN);

                let expected = match protocol {
                    Protocol::Bls => BLS_PUB_LEN,
                    _ => PAYLOAD_HASH_LEN,
                };
                if payload.len() != expected {
                    return Err(AddressError::InvalidPayload);
                }

                let mut ingest = vec![protocol as u8];
                ingest.extend_from_slice(payload);
                if !validate_checksum(&ingest, cksm) {
                    return Err(AddressError::InvalidChecksum);
                }

                FilAddress::new(protocol, payload.to_vec())
            }
        }
    }
}

impl fmt::Display for FilAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_display(Network::Mainnet))
    }
}

impl Serialize for FilAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_display(Network::Mainnet))
    }
}

impl<'de> Deserialize<'de> for FilAddress {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Parse and validate an address string, the library's primary entry point
pub fn validate_address(addr: &str) -> Result<FilAddress, AddressError> {
    addr.parse()
}

/// Compute the 4-byte blake2b checksum over the ingest bytes
pub fn checksum(ingest: &[u8]) -> Vec<u8> {
    blake2b_simd::Params::new()
        .hash_length(CHECKSUM_HASH_LEN)
        .hash(ingest)
        .as_bytes()
        .to_vec()
}

/// Validate a checksum against the ingest bytes
pub fn validate_checksum(ingest: &[u8], expected: &[u8]) -> bool {
    checksum(ingest) == expected
}

/// Encode a u64 as unsigned LEB128
fn leb128_encode(value: u64) -> Vec<u8> {
    let mut buf = Vec::with_capacity(10);
    // Writing into a Vec cannot fail
    let _ = leb128::write::unsigned(&mut buf, value);
    buf
}

/// Validate that a buffer is exactly one LEB128 varint with nothing trailing
fn validate_leb128(buf: &[u8]) -> Result<u64, AddressError> {
    let mut reader = buf;
    let value =
        leb128::read::unsigned(&mut reader).map_err(|_| AddressError::InvalidPayload)?;
    if !reader.is_empty() {
        return Err(AddressError::InvalidPayload);
    }
    Ok(value)
}

/// Split a delegated payload into namespace and subaddress
fn split_delegated(payload: &[u8]) -> Result<(u64, &[u8]), AddressError> {
    let mut reader = payload;
    let namespace =
        leb128::read::unsigned(&mut reader).map_err(|_| AddressError::InvalidPayload)?;
    Ok((namespace, reader))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_address_bytes() {
        let addr = validate_address("t01024").unwrap();
        assert_eq!(addr.protocol(), Protocol::Id);
        assert_eq!(addr.to_bytes(), vec![0x00, 0x80, 0x08]);
        assert_eq!(addr.id(), Some(1024));

        // Mainnet prefix decodes to the same bytes
        let mainnet = validate_address("f01024").unwrap();
        assert_eq!(mainnet.to_bytes(), addr.to_bytes());
    }

    #[test]
    fn test_id_address_zero_and_max() {
        let zero = validate_address("f00").unwrap();
        assert_eq!(zero.to_bytes(), vec![0x00, 0x00]);

        let max = validate_address("f09223372036854775807").unwrap();
        assert_eq!(max.id(), Some(9223372036854775807));
    }

    #[test]
    fn test_secp256k1_reference_vector() {
        // go-address reference vector
        let addr = validate_address("f17uoq6tp427uzv7fztkbsnn64iwotfrristwpryy").unwrap();
        assert_eq!(addr.protocol(), Protocol::Secp256k1);
        assert_eq!(
            hex::encode(addr.to_bytes()),
            "01fd1d0f4dfcd7e99afcb99a8326b7dc459d32c628"
        );
        assert_eq!(
            addr.to_display(Network::Mainnet),
            "f17uoq6tp427uzv7fztkbsnn64iwotfrristwpryy"
        );
        assert_eq!(
            addr.to_display(Network::Testnet),
            "t17uoq6tp427uzv7fztkbsnn64iwotfrristwpryy"
        );
    }

    #[test]
    fn test_secp256k1_second_vector() {
        let addr = validate_address("f1xcbgdhkgkwht3hrrnui3jdopeejsoatkzmoltqy").unwrap();
        assert_eq!(
            hex::encode(addr.payload()),
            "b882619d46558f3d9e316d11b48dcf211327026a"
        );
    }

    #[test]
    fn test_actor_reference_vector() {
        let addr = validate_address("f24dd4ox4c2vpf5vk5wkadgyyn6qtuvgcpxxon64a").unwrap();
        assert_eq!(addr.protocol(), Protocol::Actor);
        assert_eq!(
            hex::encode(addr.to_bytes()),
            "02e0c7c75f82d55e5ed55db28033630df4274a984f"
        );
    }

    #[test]
    fn test_bls_reference_vector() {
        let addr = validate_address(
            "f3vvmn62lofvhjd2ugzca6sof2j2ubwok6cj4xxbfzz4yuxfkgobpihhd2thlanmsh3w2ptld2gqkn2jvlss4a",
        )
        .unwrap();
        assert_eq!(addr.protocol(), Protocol::Bls);
        assert_eq!(addr.payload().len(), BLS_PUB_LEN);
        assert_eq!(
            hex::encode(addr.payload()),
            "ad58df696e2d4e91ea86c881e938ba4ea81b395e12797b84b9cf314b9546705e\
             839c7a99d606b247ddb4f9ac7a3414dd"
        );
    }

    #[test]
    fn test_delegated_reference_vector() {
        // f410 namespace carries Ethereum-style accounts
        let addr = validate_address("f410f2tc7wfsirksibajjmkm5ksymmsgjgm62hjnomwa").unwrap();
        assert_eq!(addr.protocol(), Protocol::Delegated);
        assert_eq!(
            hex::encode(addr.to_bytes()),
            "040ad4c5fb16488aa48081296299d54b0c648c9333da"
        );
        let (namespace, subaddress) = addr.delegated().unwrap();
        assert_eq!(namespace, 10);
        assert_eq!(hex::encode(subaddress), "d4c5fb16488aa48081296299d54b0c648c9333da");
        assert_eq!(
            addr.to_display(Network::Mainnet),
            "f410f2tc7wfsirksibajjmkm5ksymmsgjgm62hjnomwa"
        );
    }

    #[test]
    fn test_delegated_testnet_roundtrip() {
        let addr = validate_address("t410fvlcamn5dledrh4cyrtywlzmppiwindmtjsorgfq").unwrap();
        let (namespace, subaddress) = addr.delegated().unwrap();
        assert_eq!(namespace, 10);
        assert_eq!(hex::encode(subaddress), "aac40637a3590713f0588cf165e58f7a2c868d93");
        assert_eq!(
            addr.to_display(Network::Testnet),
            "t410fvlcamn5dledrh4cyrtywlzmppiwindmtjsorgfq"
        );
    }

    #[test]
    fn test_unknown_network() {
        assert_eq!(
            validate_address("x17uoq6tp427uzv7fztkbsnn64iwotfrristwpryy").unwrap_err(),
            AddressError::UnknownNetwork
        );
    }

    #[test]
    fn test_unknown_protocol() {
        assert_eq!(
            validate_address("f77uoq6tp427uzv7fztkbsnn64iwotfrristwpryy").unwrap_err(),
            AddressError::UnknownProtocol
        );
    }

    #[test]
    fn test_bad_checksum() {
        // Last character flipped on an otherwise valid secp256k1 address
        assert_eq!(
            validate_address("f17uoq6tp427uzv7fztkbsnn64iwotfrristwprya").unwrap_err(),
            AddressError::InvalidChecksum
        );
    }

    #[test]
    fn test_too_short() {
        assert_eq!(validate_address("f0").unwrap_err(), AddressError::InvalidLength);
        assert_eq!(validate_address("").unwrap_err(), AddressError::InvalidLength);
    }

    #[test]
    fn test_id_not_a_number() {
        assert_eq!(
            validate_address("f0banana").unwrap_err(),
            AddressError::InvalidPayload
        );
        assert_eq!(
            validate_address("f0+1024").unwrap_err(),
            AddressError::InvalidPayload
        );
    }

    #[test]
    fn test_id_overflows_u64() {
        // 20 digits, larger than u64::MAX
        assert!(matches!(
            validate_address("f099999999999999999999").unwrap_err(),
            AddressError::Numeric(_)
        ));
    }

    #[test]
    fn test_id_too_many_digits() {
        // 21 digits exceeds what a u64 can hold
        assert_eq!(
            validate_address("f0111111111111111111111").unwrap_err(),
            AddressError::InvalidLength
        );
    }

    #[test]
    fn test_invalid_base32_symbol() {
        // '1' and '0' are not in the base32 alphabet
        assert!(matches!(
            validate_address("f2gfvuyh7v2sx3patm10k23wdzmhyhtmqctasbr23y").unwrap_err(),
            AddressError::Base32(_)
        ));
    }

    #[test]
    fn test_wrong_payload_length() {
        // Decodes to 5 bytes; after the checksum split only 1 payload byte
        // remains, which cannot be a 20-byte hash
        assert_eq!(
            validate_address("f2abcdefgh").unwrap_err(),
            AddressError::InvalidPayload
        );
    }

    #[test]
    fn test_bytes_roundtrip() {
        for s in [
            "f01024",
            "f17uoq6tp427uzv7fztkbsnn64iwotfrristwpryy",
            "f24dd4ox4c2vpf5vk5wkadgyyn6qtuvgcpxxon64a",
            "f3vvmn62lofvhjd2ugzca6sof2j2ubwok6cj4xxbfzz4yuxfkgobpihhd2thlanmsh3w2ptld2gqkn2jvlss4a",
            "f410f2tc7wfsirksibajjmkm5ksymmsgjgm62hjnomwa",
        ] {
            let addr = validate_address(s).unwrap();
            let decoded = FilAddress::from_bytes(&addr.to_bytes()).unwrap();
            assert_eq!(addr, decoded);
            assert_eq!(decoded.to_display(Network::Mainnet), s);
        }
    }

    #[test]
    fn test_from_bytes_rejects_bad_protocol() {
        assert_eq!(
            FilAddress::from_bytes(&[9, 1, 2, 3]).unwrap_err(),
            AddressError::UnknownProtocol
        );
    }

    #[test]
    fn test_from_bytes_rejects_wrong_payload_length() {
        // secp256k1 payload must be exactly 20 bytes
        assert_eq!(
            FilAddress::from_bytes(&[1, 0xde, 0xad]).unwrap_err(),
            AddressError::InvalidPayload
        );
    }

    #[test]
    fn test_from_bytes_rejects_trailing_id_bytes() {
        // 0x80 0x08 is leb128(1024); an extra byte after it is invalid
        assert_eq!(
            FilAddress::from_bytes(&[0, 0x80, 0x08, 0x01]).unwrap_err(),
            AddressError::InvalidPayload
        );
    }

    #[test]
    fn test_delegated_subaddress_too_long() {
        let result = FilAddress::new_delegated(10, &[0u8; MAX_SUBADDRESS_LEN + 1]);
        assert_eq!(result.unwrap_err(), AddressError::InvalidPayload);
    }

    #[test]
    fn test_serde_string_form() {
        let addr = validate_address("f01024").unwrap();
        let json = serde_json::to_string(&addr).unwrap();
        assert_eq!(json, "\"f01024\"");
        let back: FilAddress = serde_json::from_str(&json).unwrap();
        assert_eq!(back, addr);
    }
}
