//! KMAC128 and KMAC256 (NIST SP 800-185 §4): Keccak-based message
//! authentication codes, built as cSHAKE with the function-name field fixed
//! to `"KMAC"`.
//!
//! ```
//! use kmac::Kmac128;
//!
//! let mut mac = Kmac128::new_customization(b"my secret key", b"").unwrap();
//! mac.update(b"my message").unwrap();
//! let mut tag = [0u8; 32];
//! mac.finalize(&mut tag).unwrap();
//! ```
//!
//! [NIST SP 800-185]: https://nvlpubs.nist.gov/nistpubs/SpecialPublications/NIST.SP.800-185.pdf

#![no_std]
#![forbid(unsafe_code)]
#![warn(missing_docs)]

#[cfg(feature = "std")]
extern crate std;

mod encoding;
mod error;
mod kmac;
mod sponge;

pub use error::Error;
pub use tiny_keccak::XofReader;

use crate::kmac::{KmacCore, KMAC128_RATE, KMAC256_RATE};

/// Default (non-XOF) output length of KMAC128, matching SHA3-256.
pub const KMAC128_DEFAULT_OUTPUT_LEN: usize = 32;
/// Default (non-XOF) output length of KMAC256, matching SHA3-512.
pub const KMAC256_DEFAULT_OUTPUT_LEN: usize = 64;

macro_rules! impl_kmac {
    ($(#[$meta:meta])* $name:ident, $rate:expr, $default_len:expr) => {
        $(#[$meta])*
        #[derive(Clone)]
        pub struct $name(KmacCore<$rate>);

        impl $name {
            /// Key the context and absorb the customization string, in one
            /// call that leaves the context ready for [`Self::update`].
            ///
            /// `key` must be 4 to 255 bytes; `customization` (the optional
            /// `S` of SP 800-185) must be at most 127 bytes.
            pub fn new_customization(key: &[u8], customization: &[u8]) -> Result<Self, Error> {
                Ok(Self(KmacCore::new_keyed(key, customization, $default_len)?))
            }

            /// Absorb more message data. Can be called any number of times.
            pub fn update(&mut self, data: &[u8]) -> Result<(), Error> {
                self.0.update(data)
            }

            /// Override the output length used by [`Self::finalize`] and
            /// mixed into KMAC's domain separation.
            pub fn set_output_len(&mut self, out_len: usize) {
                self.0.set_output_len(out_len);
            }

            /// Finalize into a MAC of exactly `out.len()` bytes, using fixed
            /// -length framing (`right_encode(out.len() * 8)`). Consumes the
            /// context: SIV-style one-shot MACs aside, KMAC itself *can* be
            /// finalized repeatedly in the underlying math, but this API
            /// mirrors the rest of the workspace by making "done" a type-
            /// level fact rather than a runtime flag.
            pub fn finalize(self, out: &mut [u8]) -> Result<(), Error> {
                self.0.finalize_into(out)
            }

            /// Finalize using this context's currently configured output
            /// length (see [`Self::set_output_len`]) into a freshly sized
            /// buffer. Returns [`Error::ParameterOutOfRange`] if that length
            /// is above 64 bytes, rather than the caller-provided-buffer
            /// [`Self::finalize`]/[`Self::finalize_xof`], which have no such
            /// limit.
            pub fn finalize_to_vec(self) -> Result<FinalizeBuf, Error> {
                let len = self.0.output_len();
                let mut buf = FinalizeBuf::new(len)?;
                self.0.finalize_into(buf.as_mut_slice())?;
                Ok(buf)
            }

            /// Finalize as an extendable-output stream: `right_encode(0)` is
            /// absorbed instead of the requested length, so reading any
            /// prefix of the stream is independent of how much is read in
            /// total (spec §4.5, §8 property 5).
            pub fn finalize_xof(self) -> Result<XofReader, Error> {
                self.0.finalize_xof()
            }
        }
    };
}

impl_kmac!(
    /// KMAC128: cSHAKE128-based KMAC, 32-byte default output.
    Kmac128,
    KMAC128_RATE,
    KMAC128_DEFAULT_OUTPUT_LEN
);
impl_kmac!(
    /// KMAC256: cSHAKE256-based KMAC, 64-byte default output.
    Kmac256,
    KMAC256_RATE,
    KMAC256_DEFAULT_OUTPUT_LEN
);

/// A fixed-capacity buffer for [`Kmac128::finalize_to_vec`]/
/// [`Kmac256::finalize_to_vec`], sized to the largest output length either
/// variant's `set_output_len` is realistically configured with. `no_std`
/// callers who need more than this should use [`Kmac128::finalize`] /
/// [`Kmac256::finalize`] with their own buffer instead.
pub struct FinalizeBuf {
    bytes: [u8; 64],
    len: usize,
}

impl FinalizeBuf {
    fn new(len: usize) -> Result<Self, Error> {
        if len > 64 {
            return Err(Error::ParameterOutOfRange);
        }
        Ok(Self { bytes: [0u8; 64], len })
    }

    /// The finalized bytes.
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes[..self.len]
    }

    fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.bytes[..self.len]
    }
}

impl core::ops::Deref for FinalizeBuf {
    type Target = [u8];
    fn deref(&self) -> &[u8] {
        self.as_slice()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    /// NIST SP 800-185 §Appendix A (KMAC128 sample #1): K =
    /// `404142...5F` (32 bytes), X = `00010203`, L = 256 bits, S = "".
    #[test]
    fn kmac128_sample_1() {
        let key = hex!("404142434445464748494A4B4C4D4E4F505152535455565758595A5B5C5D5E5F");
        let data = hex!("00010203");
        let expected =
            hex!("E5780B0D3EA6F7D3A429C5706AA43A00FADBD7D49628839E3187243F456EE14E");

        let mut mac = Kmac128::new_customization(&key, b"").unwrap();
        mac.update(&data).unwrap();
        let mut out = [0u8; 32];
        mac.finalize(&mut out).unwrap();
        assert_eq!(out, expected);
    }

    /// KMAC256 with a non-empty customization string must still be
    /// deterministic and must differ from the same inputs under KMAC128,
    /// exercising the larger rate/capacity and the longer default output.
    #[test]
    fn kmac256_customization_roundtrip_and_cross_variant_difference() {
        let key = hex!("404142434445464748494A4B4C4D4E4F505152535455565758595A5B5C5D5E5F");
        let data = hex!("00010203");

        let mut a = Kmac256::new_customization(&key, b"My Tagged Application").unwrap();
        a.update(&data).unwrap();
        let mut out_a = [0u8; 64];
        a.finalize(&mut out_a).unwrap();

        let mut b = Kmac256::new_customization(&key, b"My Tagged Application").unwrap();
        b.update(&data).unwrap();
        let mut out_b = [0u8; 64];
        b.finalize(&mut out_b).unwrap();
        assert_eq!(out_a, out_b);

        let mut c = Kmac128::new_customization(&key, b"My Tagged Application").unwrap();
        c.update(&data).unwrap();
        let mut out_c = [0u8; 32];
        c.finalize(&mut out_c).unwrap();
        assert_ne!(&out_a[..32], out_c);
    }

    /// KMAC128-XOF over the same inputs as sample #1 must differ from the
    /// fixed-length MAC, because `right_encode(0) != right_encode(256)`.
    #[test]
    fn kmac128_xof_differs_from_fixed_length() {
        let key = hex!("404142434445464748494A4B4C4D4E4F505152535455565758595A5B5C5D5E5F");
        let data = hex!("00010203");

        let mut mac = Kmac128::new_customization(&key, b"").unwrap();
        mac.update(&data).unwrap();
        let mut fixed = [0u8; 32];
        mac.finalize(&mut fixed).unwrap();

        let mut mac = Kmac128::new_customization(&key, b"").unwrap();
        mac.update(&data).unwrap();
        let mut reader = mac.finalize_xof().unwrap();
        let mut xof = [0u8; 32];
        reader.squeeze(&mut xof);

        assert_ne!(fixed, xof);
    }

    #[test]
    fn determinism() {
        let mut a = Kmac128::new_customization(b"key material", b"ctx").unwrap();
        a.update(b"input message").unwrap();
        let mut out_a = [0u8; 32];
        a.finalize(&mut out_a).unwrap();

        let mut b = Kmac128::new_customization(b"key material", b"ctx").unwrap();
        b.update(b"input message").unwrap();
        let mut out_b = [0u8; 32];
        b.finalize(&mut out_b).unwrap();

        assert_eq!(out_a, out_b);
    }

    #[test]
    fn domain_separation_by_customization() {
        let mut a = Kmac128::new_customization(b"key material", b"one").unwrap();
        a.update(b"input message").unwrap();
        let mut out_a = [0u8; 32];
        a.finalize(&mut out_a).unwrap();

        let mut b = Kmac128::new_customization(b"key material", b"two").unwrap();
        b.update(b"input message").unwrap();
        let mut out_b = [0u8; 32];
        b.finalize(&mut out_b).unwrap();

        assert_ne!(out_a, out_b);
    }

    #[test]
    fn dup_equivalence() {
        let mut a = Kmac128::new_customization(b"key material", b"").unwrap();
        a.update(b"first half ").unwrap();

        let mut b = a.clone();
        a.update(b"second half").unwrap();
        b.update(b"second half").unwrap();

        let mut out_a = [0u8; 32];
        let mut out_b = [0u8; 32];
        a.finalize(&mut out_a).unwrap();
        b.finalize(&mut out_b).unwrap();

        assert_eq!(out_a, out_b);
    }

    #[test]
    fn rejects_short_key() {
        assert_eq!(
            Kmac128::new_customization(b"abc", b"").unwrap_err(),
            Error::ParameterOutOfRange
        );
    }

    #[test]
    fn finalize_to_vec_rejects_output_len_above_buffer_capacity() {
        let mut mac = Kmac128::new_customization(b"key material", b"").unwrap();
        mac.update(b"input message").unwrap();
        mac.set_output_len(100);
        assert_eq!(
            mac.finalize_to_vec().unwrap_err(),
            Error::ParameterOutOfRange
        );
    }

    #[test]
    fn rejects_oversized_customization() {
        let custom = [0u8; 128];
        assert_eq!(
            Kmac128::new_customization(b"a long enough key", &custom).unwrap_err(),
            Error::ParameterOutOfRange
        );
    }
}
