//! Package Digest Value Object
//!
//! SHA-256 of a stored package, written `sha256:<hex>`. The uploader keeps one
//! next to every package so a download check can tell a damaged file from an
//! intact one.

use std::fmt;
use std::io::{self, Read};

use sha2::{Digest, Sha256};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PackageDigest(String);

impl PackageDigest {
    pub const PREFIX: &'static str = "sha256:";

    /// Wrap a stored digest, with or without prefix. Surrounding whitespace is ignored.
    pub fn new(raw: &str) -> Self {
        let raw = raw.trim();
        match raw.strip_prefix(Self::PREFIX) {
            Some(hex) => Self(format!("{}{}", Self::PREFIX, hex.to_ascii_lowercase())),
            None => Self(format!("{}{}", Self::PREFIX, raw.to_ascii_lowercase())),
        }
    }

    pub fn of_bytes(bytes: &[u8]) -> Self {
        Self(format!("{}{:x}", Self::PREFIX, Sha256::digest(bytes)))
    }

    /// Digest of everything `reader` yields
    pub fn of_reader(mut reader: impl Read) -> io::Result<Self> {
        let mut hasher = Sha256::new();
        io::copy(&mut reader, &mut hasher)?;
        Ok(Self(format!("{}{:x}", Self::PREFIX, hasher.finalize())))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn hex(&self) -> &str {
        self.0.strip_prefix(Self::PREFIX).unwrap_or(&self.0)
    }
}

impl fmt::Display for PackageDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_normalizes_prefix_and_case() {
        assert_eq!(PackageDigest::new("ABC123\n").as_str(), "sha256:abc123");
        assert_eq!(PackageDigest::new("sha256:abc123").as_str(), "sha256:abc123");
    }

    #[test]
    fn reader_and_bytes_agree() {
        let data = b"model bytes";
        let from_reader = PackageDigest::of_reader(&data[..]).unwrap();
        assert_eq!(from_reader, PackageDigest::of_bytes(data));
        assert_eq!(from_reader.hex().len(), 64);
    }

    #[test]
    fn known_digest() {
        assert_eq!(
            PackageDigest::of_bytes(b"").hex(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }
}
