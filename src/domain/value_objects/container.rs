//! Container Blob Value Object
//!
//! The training/scoring configuration attached to a model. The registry never
//! looks inside it; bytes go in and come back out unchanged.

use std::fmt;

#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct ContainerBlob(Vec<u8>);

impl ContainerBlob {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The blob as text, when it happens to be UTF-8 (JSON containers usually are)
    pub fn as_utf8(&self) -> Option<&str> {
        std::str::from_utf8(&self.0).ok()
    }
}

impl fmt::Debug for ContainerBlob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContainerBlob({} bytes)", self.0.len())
    }
}

impl From<Vec<u8>> for ContainerBlob {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl From<&str> for ContainerBlob {
    fn from(text: &str) -> Self {
        Self(text.as_bytes().to_vec())
    }
}
