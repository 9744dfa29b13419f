use std::fmt::Display;
use std::str::FromStr;

use sha1::{Digest, Sha1};

use crate::error::{Error, Result};

pub const HASH_BYTE_LEN: usize = 20;
pub const HASH_STRING_LEN: usize = HASH_BYTE_LEN * 2;
const SHORT_HASH_LEN: usize = 7;

/// SHA1 digest identifying an object by its encoded content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Hash([u8; HASH_BYTE_LEN]);

impl Hash {
    /// Returns the SHA1 hash for the data passed
    pub fn compute(data: &[u8]) -> Self {
        let mut hasher = Sha1::new();
        hasher.update(data);
        Hash(hasher.finalize().into())
    }

    /// Abbreviated hex form, used when reporting a commit to the user.
    pub fn short(&self) -> String {
        let mut s = self.to_string();
        s.truncate(SHORT_HASH_LEN);
        s
    }
}

impl From<[u8; HASH_BYTE_LEN]> for Hash {
    fn from(value: [u8; HASH_BYTE_LEN]) -> Self {
        Hash(value)
    }
}

impl AsRef<[u8]> for Hash {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Display for Hash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl FromStr for Hash {
    type Err = Error;

    /// Parses the 40 character hexadecimal representation of a hash.
    ///
    /// # Errors
    ///
    /// Fails if `s` does not have exactly 40 characters or any of them is not a hex digit.
    fn from_str(s: &str) -> Result<Self> {
        if s.len() != HASH_STRING_LEN {
            return Err(Error::InvalidHash(s.to_owned()));
        }
        let mut bytes = [0; HASH_BYTE_LEN];
        hex::decode_to_slice(s, &mut bytes).map_err(|_| Error::InvalidHash(s.to_owned()))?;
        Ok(Hash(bytes))
    }
}

// Tests

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    pub fn test_hashing() {
        let data = b"this is binary data";
        let data_hash = Hash::compute(data);
        let data2 = b"this is binary data";
        let data2_hash = Hash::compute(data2);
        assert_eq!(data_hash, data2_hash);
        let data3 = b"This is binary data";
        let data3_hash = Hash::compute(data3);
        assert_ne!(data_hash, data3_hash);
    }

    #[test]
    fn test_display_and_parse() {
        let hash = Hash::compute(b"blob 5\0hello");
        let hex = hash.to_string();
        assert_eq!(hex, "b6fc4c620b67d95f953a5c1c1230aaab5db5a1b0");
        assert_eq!(Hash::from_str(&hex).unwrap(), hash);
        assert_eq!(hash.short(), "b6fc4c6");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(matches!(
            Hash::from_str("b6fc4c62"),
            Err(Error::InvalidHash(_))
        ));
        assert!(matches!(
            Hash::from_str("z6fc4c620b67d95f953a5c1c1230aaab5db5a1b0"),
            Err(Error::InvalidHash(_))
        ));
        assert!(Hash::from_str("").is_err());
    }
}
