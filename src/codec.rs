//! Content addressing for values that cannot be used as filenames.
//!
//! A value is exposed verbatim when it is valid UTF-8, at most
//! [`MAX_NAME_BYTES`] long, and free of control bytes. Any other value is
//! replaced by the marker character followed by the hex SHA-256 of the full
//! value, and the (possibly truncated) original is remembered so a later lookup
//! of that name can recover it.
//!
//! The cache lives for the lifetime of the codec and is never evicted, so a
//! hashed name only resolves after it has been produced by a listing in the same
//! process.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Default first character of a hashed name.
pub const DEFAULT_MARKER: char = 'x';

/// Default number of original bytes retained per hashed value.
pub const DEFAULT_MAX_RETAINED: usize = 16384;

/// Longest value exposed verbatim.
pub const MAX_NAME_BYTES: usize = 128;

/// Codec settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodecConfig {
    pub marker: char,
    pub max_retained: usize,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            marker: DEFAULT_MARKER,
            max_retained: DEFAULT_MAX_RETAINED,
        }
    }
}

/// How a cached name was derived from its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Encoding {
    Hash,
}

/// What the cache remembers about one hashed name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    pub encoding: Encoding,
    /// The original value, cut to the retention limit.
    pub original: Vec<u8>,
    pub truncated: bool,
}

/// Value <-> filename codec with an in-memory content-address cache.
#[derive(Debug, Default)]
pub struct ContentCodec {
    config: CodecConfig,
    cache: HashMap<String, CacheEntry>,
}

impl ContentCodec {
    pub fn new(config: CodecConfig) -> Self {
        Self {
            config,
            cache: HashMap::new(),
        }
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Whether `value` must be content-addressed rather than used verbatim.
    pub fn needs_hashing(value: &[u8]) -> bool {
        value.len() > MAX_NAME_BYTES
            || value.iter().any(|b| *b < 0x20)
            || std::str::from_utf8(value).is_err()
    }

    /// Map a value to a filesystem-safe name, recording hashed values.
    pub fn encode(&mut self, value: &[u8]) -> String {
        if !Self::needs_hashing(value) {
            // needs_hashing rejected invalid UTF-8 already
            return String::from_utf8_lossy(value).into_owned();
        }

        let mut hasher = Sha256::new();
        hasher.update(value);
        let name = format!("{}{}", self.config.marker, hex::encode(hasher.finalize()));

        let retained = value.len().min(self.config.max_retained);
        self.cache.entry(name.clone()).or_insert_with(|| CacheEntry {
            encoding: Encoding::Hash,
            original: value[..retained].to_vec(),
            truncated: retained < value.len(),
        });

        name
    }

    /// Map a name back to the value it stands for.
    ///
    /// Names that were never produced by `encode` come back unchanged.
    pub fn decode<'a>(&'a self, name: &'a str) -> &'a [u8] {
        match self.entry(name) {
            Some(entry) if entry.encoding == Encoding::Hash => &entry.original,
            _ => name.as_bytes(),
        }
    }

    /// The cache entry for a hashed name, if one has been recorded.
    pub fn entry(&self, name: &str) -> Option<&CacheEntry> {
        if !name.starts_with(self.config.marker) {
            return None;
        }
        self.cache.get(name)
    }

    /// Number of hashed names recorded so far.
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}
