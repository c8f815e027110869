//! S2V (RFC 5297 §2.4): a vector-input pseudorandom function built from
//! CMAC and GF(2^128) doubling, used to turn associated data plus a
//! plaintext into the synthetic IV.

use cipher::{BlockCipher, BlockEncrypt, BlockSizeUser, KeyInit};
use cmac::Cmac;
use dbl::Dbl;
use digest::Mac;
use generic_array::{typenum::U16, GenericArray};

pub(crate) type Block = GenericArray<u8, U16>;

/// The cipher bound `Cmac`/`Siv` need: a 128-bit-block cipher that can be
/// keyed from a byte slice and cheaply cloned (each S2V step clones the
/// CMAC-keyed state rather than re-deriving it).
pub(crate) trait S2VCipher:
    BlockCipher + BlockEncrypt + BlockSizeUser<BlockSize = U16> + KeyInit + Clone
{
}
impl<C> S2VCipher for C where
    C: BlockCipher + BlockEncrypt + BlockSizeUser<BlockSize = U16> + KeyInit + Clone
{
}

fn xor(a: &Block, b: &Block) -> Block {
    let mut out = Block::default();
    for i in 0..16 {
        out[i] = a[i] ^ b[i];
    }
    out
}

/// `D = CMAC(K1, <16 zero bytes>)`, the seed for an empty vector of strings
/// (RFC 5297 §2.4, first branch of S2V).
pub(crate) fn init<C: S2VCipher>(mac_init: &Cmac<C>) -> Block {
    let mut mac = mac_init.clone();
    mac.update(&[0u8; 16]);
    mac.finalize().into_bytes()
}

/// Fold one associated-data string into the running `D`:
/// `D <- dbl(D) xor CMAC(K1, S_i)`. Calling this zero or more times before
/// [`finalize`] implements S2V's "all but the last" strings.
pub(crate) fn absorb<C: S2VCipher>(mac_init: &Cmac<C>, d: &Block, component: &[u8]) -> Block {
    let doubled = d.clone().dbl();
    let mut mac = mac_init.clone();
    mac.update(component);
    xor(&doubled, &mac.finalize().into_bytes())
}

/// The final S2V step, folding in the message `sn` (RFC 5297 §2.4, both
/// branches). Leaves `d` itself untouched: the short-message branch only
/// needs a locally doubled copy to build this one tag, never a value that
/// outlives the call, since a [`crate::Siv`] context is one-shot and has no
/// further use for `D` afterwards.
pub(crate) fn finalize<C: S2VCipher>(mac_init: &Cmac<C>, d: &Block, sn: &[u8]) -> Block {
    let mut mac = mac_init.clone();
    if sn.len() >= 16 {
        let (head, tail) = sn.split_at(sn.len() - 16);
        mac.update(head);
        let tail_block = Block::clone_from_slice(tail);
        mac.update(&xor(&tail_block, d));
    } else {
        let mut padded = Block::default();
        padded[..sn.len()].copy_from_slice(sn);
        padded[sn.len()] = 0x80;
        let d2 = d.clone().dbl();
        mac.update(&xor(&padded, &d2));
    }
    mac.finalize().into_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;
    use aes::Aes128;

    #[test]
    fn absorbing_no_strings_then_empty_message_matches_init() {
        let mac_init = Cmac::<Aes128>::new_from_slice(&[0u8; 16]).unwrap();
        let d = init(&mac_init);
        let v1 = finalize(&mac_init, &d, b"");
        let v2 = finalize(&mac_init, &d, b"");
        assert_eq!(v1, v2);
    }

    #[test]
    fn order_of_associated_data_changes_the_tag() {
        let mac_init = Cmac::<Aes128>::new_from_slice(&[0u8; 16]).unwrap();
        let d0 = init(&mac_init);

        let d_ab = absorb(&mac_init, &absorb(&mac_init, &d0, b"alpha"), b"beta");
        let d_ba = absorb(&mac_init, &absorb(&mac_init, &d0, b"beta"), b"alpha");

        let v_ab = finalize(&mac_init, &d_ab, b"message");
        let v_ba = finalize(&mac_init, &d_ba, b"message");
        assert_ne!(v_ab, v_ba);
    }

    #[test]
    fn short_and_long_plaintext_branches_disagree() {
        let mac_init = Cmac::<Aes128>::new_from_slice(&[0u8; 16]).unwrap();
        let d = init(&mac_init);

        let short = finalize(&mac_init, &d, &[0x42; 8]);
        let mut long = [0u8; 16];
        long[..8].copy_from_slice(&[0x42; 8]);
        let long_tag = finalize(&mac_init, &d, &long);
        assert_ne!(short, long_tag);
    }
}
