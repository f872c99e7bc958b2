#![forbid(unsafe_code)]

//! FNV-1a fingerprinting for deterministic state hashes.
//!
//! Hashes must be stable across processes and platforms so a committed hash
//! can be compared with a later one, which rules out `std`'s randomized
//! hasher.

const OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const PRIME: u64 = 0x0000_0100_0000_01b3;

/// Incremental 64-bit FNV-1a hasher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fingerprint {
    state: u64,
}

impl Default for Fingerprint {
    fn default() -> Self {
        Self::new()
    }
}

impl Fingerprint {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: OFFSET_BASIS,
        }
    }

    pub fn write(&mut self, bytes: &[u8]) {
        for byte in bytes {
            self.state ^= u64::from(*byte);
            self.state = self.state.wrapping_mul(PRIME);
        }
    }

    pub fn write_u64(&mut self, value: u64) {
        self.write(&value.to_le_bytes());
    }

    /// Length-prefixed string, so adjacent fields cannot run together.
    pub fn write_str(&mut self, value: &str) {
        self.write_u64(value.len() as u64);
        self.write(value.as_bytes());
    }

    pub fn write_tag(&mut self, tag: u8) {
        self.write(&[tag]);
    }

    #[must_use]
    pub const fn finish(&self) -> u64 {
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_is_offset_basis() {
        assert_eq!(Fingerprint::new().finish(), OFFSET_BASIS);
    }

    #[test]
    fn known_vector() {
        let mut hash = Fingerprint::new();
        hash.write(b"a");
        assert_eq!(hash.finish(), 0xaf63_dc4c_8601_ec8c);
    }

    #[test]
    fn length_prefix_separates_fields() {
        let mut ab = Fingerprint::new();
        ab.write_str("ab");
        ab.write_str("c");
        let mut a_bc = Fingerprint::new();
        a_bc.write_str("a");
        a_bc.write_str("bc");
        assert_ne!(ab.finish(), a_bc.finish());
    }
}
