//! AES-SIV (RFC 5297): deterministic authenticated encryption with
//! associated data, built from CMAC-based S2V and AES-CTR.
//!
//! ```
//! use aes_siv::Siv;
//! use aes::Aes128;
//!
//! // 32 bytes: 16 for the CMAC key (K1), 16 for the CTR key (K2).
//! let key = [0x11; 32];
//! let mut ctx = Siv::<Aes128>::new(&key).unwrap();
//! ctx.aad(b"header").unwrap();
//!
//! let mut buf = *b"hello, world!!!!";
//! let tag = ctx.encrypt(&mut buf).unwrap();
//!
//! let mut ctx = Siv::<Aes128>::new(&key).unwrap();
//! ctx.aad(b"header").unwrap();
//! ctx.decrypt(&mut buf, &tag).unwrap();
//! assert_eq!(&buf, b"hello, world!!!!");
//! ```

#![no_std]
#![forbid(unsafe_code)]
#![warn(missing_docs)]

#[cfg(feature = "std")]
extern crate std;

mod error;
mod s2v;

pub use error::Error;

use cipher::{KeyIvInit, KeySizeUser, StreamCipher};
use cmac::Cmac;
use ctr::Ctr128BE;
use digest::Mac;
use generic_array::typenum::Unsigned;
use generic_array::GenericArray;
use s2v::{Block, S2VCipher};
use subtle::ConstantTimeEq;
use zeroize::Zeroize;

/// An AES-SIV context over a 128-bit-block cipher `C` (RFC 5297, §2).
///
/// Construction takes `2 * C::KeySize` bytes of key material: the first
/// half keys the S2V/CMAC step (`K1`), the second half keys the CTR
/// encryption step (`K2`) (spec §3, §4.2).
///
/// A context performs exactly one [`Self::encrypt`] or [`Self::decrypt`];
/// any [`Self::aad`] calls must happen first, in the order the same
/// components must be presented on the matching decrypt side. A second
/// `encrypt`/`decrypt` call returns [`Error::UsageError`] rather than
/// silently reusing a consumed synthetic IV.
pub struct Siv<C>
where
    C: S2VCipher + KeySizeUser,
{
    mac_init: Cmac<C>,
    d: Block,
    ctr_key: GenericArray<u8, C::KeySize>,
    used: bool,
}

impl<C> Siv<C>
where
    C: S2VCipher + KeySizeUser,
{
    /// Build a context from `2 * C::KeySize` bytes: `K1 || K2`.
    pub fn new(key: &[u8]) -> Result<Self, Error> {
        let k = <C::KeySize as Unsigned>::to_usize();
        if key.len() != 2 * k {
            return Err(Error::ParameterOutOfRange);
        }
        let (k1, k2) = key.split_at(k);

        let mac_init =
            Cmac::<C>::new_from_slice(k1).map_err(|_| Error::ParameterOutOfRange)?;
        let d = s2v::init(&mac_init);
        let ctr_key = GenericArray::clone_from_slice(k2);

        Ok(Self {
            mac_init,
            d,
            ctr_key,
            used: false,
        })
    }

    /// Fold one associated-data component into the running S2V state.
    /// Call any number of times, in order, before [`Self::encrypt`] or
    /// [`Self::decrypt`]; the matching call on the other side must present
    /// the same components in the same order (spec §4.1 invariant).
    pub fn aad(&mut self, component: &[u8]) -> Result<(), Error> {
        if self.used {
            return Err(Error::UsageError);
        }
        self.d = s2v::absorb(&self.mac_init, &self.d, component);
        Ok(())
    }

    /// Encrypt `buffer` in place and return its synthetic IV / tag.
    ///
    /// Consumes the one-shot crypto operation this context is good for:
    /// a second call returns [`Error::UsageError`] and leaves `buffer`
    /// untouched.
    pub fn encrypt(&mut self, buffer: &mut [u8]) -> Result<[u8; 16], Error> {
        if self.used {
            return Err(Error::UsageError);
        }
        self.used = true;

        let v = s2v::finalize(&self.mac_init, &self.d, buffer);
        let q = ctr_iv(&v);
        let mut ctr = Ctr128BE::<C>::new_from_slices(&self.ctr_key, &q)
            .map_err(|_| Error::ParameterOutOfRange)?;
        ctr.apply_keystream(buffer);

        let mut tag = [0u8; 16];
        tag.copy_from_slice(&v);
        Ok(tag)
    }

    /// Decrypt `buffer` in place against the given tag.
    ///
    /// On success `buffer` holds the plaintext. On authentication failure
    /// `buffer` is zeroized before returning [`Error::AuthenticationFailure`],
    /// so a caller who ignores the `Result` never observes unauthenticated
    /// plaintext. Consumes the one-shot crypto operation; a second call
    /// returns [`Error::UsageError`] and leaves `buffer` untouched.
    pub fn decrypt(&mut self, buffer: &mut [u8], tag: &[u8; 16]) -> Result<(), Error> {
        if self.used {
            return Err(Error::UsageError);
        }
        self.used = true;

        let q = ctr_iv(&GenericArray::clone_from_slice(tag));
        let mut ctr = Ctr128BE::<C>::new_from_slices(&self.ctr_key, &q)
            .map_err(|_| Error::ParameterOutOfRange)?;
        ctr.apply_keystream(buffer);

        let v = s2v::finalize(&self.mac_init, &self.d, buffer);
        if v.as_slice().ct_eq(tag).into() {
            Ok(())
        } else {
            buffer.zeroize();
            Err(Error::AuthenticationFailure)
        }
    }
}

/// Mask bits 31 and 63 of the synthetic IV (counting from the MSB of each
/// 32-bit half, i.e. byte offsets 8 and 12) to zero, so the same 16-byte
/// value can serve as both the authentication tag and the initial CTR
/// counter block without the top bit of either half ever toggling during
/// the 64-bit counter's increments (RFC 5297 §2.6).
fn ctr_iv(v: &Block) -> [u8; 16] {
    let mut q = [0u8; 16];
    q.copy_from_slice(v);
    q[8] &= 0x7f;
    q[12] &= 0x7f;
    q
}

impl<C> Drop for Siv<C>
where
    C: S2VCipher + KeySizeUser,
{
    fn drop(&mut self) {
        self.d.as_mut_slice().zeroize();
        self.ctr_key.as_mut_slice().zeroize();
    }
}
