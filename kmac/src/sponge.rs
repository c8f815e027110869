//! The Keccak-XOF collaborator described in spec §6: a rate/capacity sponge
//! exposing absorb/squeeze, identified here by its cSHAKE domain-separation
//! byte rather than by the OpenSSL-style `"KECCAK_KMAC128"` name string.
//!
//! KMAC is cSHAKE with the function-name field fixed to `"KMAC"`, which is
//! why the sponge is *always* initialized with the cSHAKE padding byte
//! (`0x04`), even when the caller's customization string is empty: KMAC never
//! degrades to plain SHAKE.

use tiny_keccak::Keccak;

/// Domain-separation / padding byte for cSHAKE-family constructions
/// (as opposed to `0x1f` for SHAKE or `0x06` for SHA-3).
const CSHAKE_PAD: u8 = 0x04;

#[derive(Clone)]
pub(crate) struct Sponge {
    state: Keccak,
}

impl Sponge {
    pub(crate) fn new(rate: usize) -> Self {
        Self {
            state: Keccak::new(rate, CSHAKE_PAD),
        }
    }

    #[inline]
    pub(crate) fn absorb(&mut self, data: &[u8]) {
        self.state.absorb(data);
    }

    /// Squeeze exactly `out.len()` bytes and consume the sponge. This is used
    /// for KMAC's fixed-length (non-XOF) output, which is a single
    /// `finalize()` call away from the digest size requested by the caller.
    pub(crate) fn squeeze_into(self, out: &mut [u8]) {
        self.state.finalize(out);
    }

    /// Start squeezing an effectively unbounded stream, for KMAC's XOF mode.
    pub(crate) fn reader(self) -> tiny_keccak::XofReader {
        self.state.xof()
    }
}
