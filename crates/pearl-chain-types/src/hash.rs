//! Double-SHA256 hashing and the 256-bit hash type.

use sha2::{Digest, Sha256};
use std::fmt;

/// Double SHA-256, the hash function behind txids and block hashes.
pub fn sha256d(data: &[u8]) -> [u8; 32] {
    let first = Sha256::digest(data);
    let second = Sha256::digest(first);
    let mut out = [0u8; 32];
    out.copy_from_slice(&second);
    out
}

/// A 256-bit value stored in little-endian (digest) byte order.
///
/// Used for block hashes, txids, merkle roots, the proof-of-work ceiling and
/// the minimum-chain-work floor. `Display` prints the bytes reversed, so
/// `to_string` matches block-explorer output and the big-endian hex literals
/// accepted by [`Uint256::from_hex`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Uint256(pub [u8; 32]);

impl Uint256 {
    /// The all-zero value.
    pub const ZERO: Uint256 = Uint256([0u8; 32]);

    /// Parse a big-endian hex literal.
    ///
    /// Accepts an optional `0x` prefix and up to 64 hex digits; shorter
    /// literals are left-padded with zeros, so `"0x"` parses to zero.
    pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
        let s = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);
        if s.len() > 64 {
            return Err(hex::FromHexError::InvalidStringLength);
        }
        let mut padded = String::with_capacity(64);
        for _ in 0..64 - s.len() {
            padded.push('0');
        }
        padded.push_str(s);
        let raw = hex::decode(&padded)?;
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&raw);
        bytes.reverse();
        Ok(Uint256(bytes))
    }

    /// Wrap a raw digest, already in little-endian order.
    pub fn from_le_bytes(bytes: [u8; 32]) -> Self {
        Uint256(bytes)
    }

    /// Raw little-endian bytes, as they appear on the wire.
    pub fn to_le_bytes(self) -> [u8; 32] {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|&b| b == 0)
    }
}

impl fmt::Display for Uint256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut rev = self.0;
        rev.reverse();
        write!(f, "{}", hex::encode(rev))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256d_known_vector() {
        // Double SHA-256 of the empty string.
        assert_eq!(
            hex::encode(sha256d(b"")),
            "5df6e0e2761359d30a8275058e299fcc0381534545f55cf43e41983f5d4c9456"
        );
    }

    #[test]
    fn test_from_hex_display_round_trip() {
        let s = "4056a74e055f76326bf08a841056239901d1090ba575daf01432d22abbbbe6d5";
        let value = Uint256::from_hex(s).unwrap();
        assert_eq!(value.to_string(), s);
        // Display order is the reverse of the stored digest order.
        assert_eq!(value.0[0], 0xd5);
        assert_eq!(value.0[31], 0x40);
    }

    #[test]
    fn test_from_hex_prefix_and_padding() {
        assert_eq!(Uint256::from_hex("0x").unwrap(), Uint256::ZERO);
        assert_eq!(Uint256::from_hex("00").unwrap(), Uint256::ZERO);
        let short = Uint256::from_hex("0xff").unwrap();
        assert_eq!(short.0[0], 0xff);
        assert!(short.0[1..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_from_hex_rejects_bad_input() {
        assert!(Uint256::from_hex(&"f".repeat(65)).is_err());
        assert!(Uint256::from_hex("zz").is_err());
    }

    #[test]
    fn test_is_zero() {
        assert!(Uint256::ZERO.is_zero());
        assert!(!Uint256::from_hex("01").unwrap().is_zero());
    }
}
