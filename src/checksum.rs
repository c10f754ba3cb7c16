//! SHA256 checksums for generated `.proto` files
//!
//! Sidecar files use the `sha256sum` line format so they can be checked with
//! standard tooling: `<hex>  <file name>`.

use sha2::{Digest, Sha256};
use std::fmt;
use std::path::{Path, PathBuf};

/// SHA256 checksum of rendered output
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Checksum(String);

impl Checksum {
    pub fn from_bytes(data: &[u8]) -> Self {
        let hash = Sha256::digest(data);
        Self(format!("{:x}", hash))
    }

    /// Checksum of rendered text
    pub fn from_str(content: &str) -> Self {
        Self::from_bytes(content.as_bytes())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Verify that content matches this checksum
    pub fn verify(&self, content: &str) -> bool {
        Self::from_str(content) == *self
    }

    /// Sidecar line for `file_name`
    pub fn sidecar_line(&self, file_name: &str) -> String {
        format!("{}  {}\n", self.0, file_name)
    }

    /// Parse the checksum out of a sidecar line
    pub fn parse_sidecar(line: &str) -> Option<Self> {
        let hex = line.split_whitespace().next()?;
        let well_formed = hex.len() == 64 && hex.chars().all(|c| c.is_ascii_hexdigit());
        well_formed.then(|| Self(hex.to_ascii_lowercase()))
    }

    /// `foo.proto` -> `foo.proto.sha256`
    pub fn sidecar_path(path: &Path) -> PathBuf {
        let mut name = path.as_os_str().to_os_string();
        name.push(".sha256");
        PathBuf::from(name)
    }
}

impl fmt::Display for Checksum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
