//! ABI method call encoding.
//!
//! Method selectors are the first four bytes of the SHA-512/256 hash of
//! the method signature (`name(args)return`). Unsigned arguments are
//! big-endian 8-byte words. A method's return value is carried in the
//! last application log entry, prefixed with `15 1f 7c 75`.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use sha2::{Digest, Sha512_256};

/// Prefix marking an ABI return value in an application log entry.
pub const RETURN_PREFIX: [u8; 4] = [0x15, 0x1f, 0x7c, 0x75];

/// Compute the 4-byte selector for a method signature.
pub fn selector(signature: &str) -> [u8; 4] {
    let mut hasher = Sha512_256::new();
    hasher.update(signature.as_bytes());
    let digest = hasher.finalize();
    let mut out = [0u8; 4];
    out.copy_from_slice(&digest[..4]);
    out
}

/// Encode a uint64 argument.
pub fn encode_uint64(value: u64) -> Vec<u8> {
    value.to_be_bytes().to_vec()
}

/// Extract a uint64 ABI return value from base64-encoded log entries.
///
/// Scans from the last entry, as the return value is logged after any
/// application-emitted logs. Entries that fail to decode are skipped.
pub fn return_uint64(logs_b64: &[String]) -> Option<u64> {
    for entry in logs_b64.iter().rev() {
        let Ok(bytes) = BASE64.decode(entry) else {
            continue;
        };
        if bytes.len() == RETURN_PREFIX.len() + 8 && bytes[..4] == RETURN_PREFIX {
            let mut word = [0u8; 8];
            word.copy_from_slice(&bytes[4..]);
            return Some(u64::from_be_bytes(word));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selector_is_stable_and_distinct() {
        let burn = selector("burn(uint64)uint64");
        assert_eq!(burn, selector("burn(uint64)uint64"));
        assert_ne!(burn, selector("fund()void"));
        assert_ne!(burn, selector("claim()uint64"));
    }

    #[test]
    fn uint64_encoding_is_big_endian() {
        assert_eq!(encode_uint64(1), vec![0, 0, 0, 0, 0, 0, 0, 1]);
        assert_eq!(encode_uint64(u64::MAX), vec![0xff; 8]);
    }

    #[test]
    fn return_value_is_read_from_last_entry() {
        let mut payload = RETURN_PREFIX.to_vec();
        payload.extend_from_slice(&42u64.to_be_bytes());
        let logs = vec![
            BASE64.encode(b"application log line"),
            BASE64.encode(&payload),
        ];
        assert_eq!(return_uint64(&logs), Some(42));
    }

    #[test]
    fn missing_return_value_is_none() {
        assert_eq!(return_uint64(&[]), None);
        let logs = vec![BASE64.encode(b"no prefix here")];
        assert_eq!(return_uint64(&logs), None);
        // Undecodable entries are skipped, not fatal.
        let logs = vec!["!!!".to_string()];
        assert_eq!(return_uint64(&logs), None);
    }
}
