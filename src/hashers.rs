//! Hashers for the hash table that don't need to be cryptographically sound.
//!
//! `IdentityHasher` proxies for the integer it's given, so that a test can
//! say exactly which bucket a key lands in. `SdbmHasher` folds bytes with the
//! sdbm recurrence, so its hashes are the same across runs and processes,
//! unlike the standard library's `RandomState`.

use std::hash::{BuildHasher, Hasher};

/// Proxies integers for themselves.
#[derive(Debug, Default, Clone, Copy)]
pub struct IdentityHasher(u64);

impl Hasher for IdentityHasher {
    fn write(&mut self, bytes: &[u8]) {
        // integers arrive as little-endian bytes
        for byte in bytes.iter().rev() {
            self.0 = (self.0 << 8) | *byte as u64;
        }
    }

    fn write_u64(&mut self, n: u64) {
        self.0 = n;
    }

    fn write_usize(&mut self, n: usize) {
        self.0 = n as u64;
    }

    fn finish(&self) -> u64 {
        self.0
    }
}

/// Builds new IdentityHashers on demand.
#[derive(Debug, Default, Clone, Copy)]
pub struct BuildIdentityHasher;

impl BuildHasher for BuildIdentityHasher {
    type Hasher = IdentityHasher;

    fn build_hasher(&self) -> Self::Hasher {
        IdentityHasher(0)
    }
}

/// The sdbm hash: every byte is folded in as `hash * 65599 + byte`.
///
/// Writing a string's bytes with `write` gives the plain sdbm value. Hashing a
/// `str` or `String` through `Hash` does not: `str::hash` follows the bytes
/// with a `0xff` terminator, which is folded in like any other byte.
#[derive(Debug, Default, Clone, Copy)]
pub struct SdbmHasher(u64);

impl Hasher for SdbmHasher {
    fn write(&mut self, bytes: &[u8]) {
        for byte in bytes {
            self.0 = (*byte as u64)
                .wrapping_add(self.0 << 6)
                .wrapping_add(self.0 << 16)
                .wrapping_sub(self.0);
        }
    }

    fn finish(&self) -> u64 {
        self.0
    }
}

/// Builds new SdbmHashers on demand.
#[derive(Debug, Default, Clone, Copy)]
pub struct BuildSdbmHasher;

impl BuildHasher for BuildSdbmHasher {
    type Hasher = SdbmHasher;

    fn build_hasher(&self) -> Self::Hasher {
        SdbmHasher(0)
    }
}
