use crate::encoding::{bytepad, encode_string, MAX_ENCODED_LEN};
use crate::error::Error;
use crate::sponge::Sponge;
use zeroize::Zeroize;

/// `encode_string("KMAC")`, precomputed per spec §4.4.
const KMAC_STRING: [u8; 6] = [0x01, 0x20, 0x4B, 0x4D, 0x41, 0x43];

/// `(1600 - 128*2) / 8`: KMAC128's rate in bytes.
pub const KMAC128_RATE: usize = 168;
/// `(1600 - 256*2) / 8`: KMAC256's rate in bytes.
pub const KMAC256_RATE: usize = 136;

const MAX_KEY: usize = 255;
const MAX_KEY_ENCODED: usize = KMAC128_RATE * 2;
const MAX_CUSTOM: usize = 127;
const MAX_CUSTOM_ENCODED: usize = MAX_CUSTOM + MAX_ENCODED_LEN;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Fresh,
    Keyed,
    Initialized,
    Finalized,
}

/// Generic KMAC core parameterized by the underlying Keccak rate (in bytes).
///
/// `RATE` is 168 for KMAC128 and 136 for KMAC256; the output size defaults
/// match the conventional KMAC128/KMAC256 digest sizes (32 and 64 bytes) but
/// are overridable with [`KmacCore::set_output_len`].
///
/// State machine (spec §4.5, §3): `Fresh -> Keyed -> Initialized ->
/// Finalized`. `set_key`/`set_custom` are only accepted in `Fresh`/`Keyed`;
/// `update` requires `Initialized`; `finalize` consumes the context.
#[derive(Clone)]
pub struct KmacCore<const RATE: usize> {
    sponge: Option<Sponge>,
    out_len: usize,
    xof_mode: bool,
    key_enc: [u8; MAX_KEY_ENCODED],
    key_enc_len: usize,
    custom_enc: [u8; MAX_CUSTOM_ENCODED],
    custom_enc_len: usize,
    state: State,
}

impl<const RATE: usize> KmacCore<RATE> {
    /// A fresh, unkeyed context with the given default output length.
    pub fn new(default_out_len: usize) -> Self {
        let mut custom_enc = [0u8; MAX_CUSTOM_ENCODED];
        let custom_enc_len = encode_string(&mut custom_enc, b"");
        Self {
            sponge: None,
            out_len: default_out_len,
            xof_mode: false,
            key_enc: [0u8; MAX_KEY_ENCODED],
            key_enc_len: 0,
            custom_enc,
            custom_enc_len,
            state: State::Fresh,
        }
    }

    /// Construct an already-keyed, already-`init`ialized context in one
    /// step, as the common path: callers rarely want to set key and
    /// customization on separate lines.
    pub fn new_keyed(key: &[u8], custom: &[u8], default_out_len: usize) -> Result<Self, Error> {
        let mut ctx = Self::new(default_out_len);
        ctx.set_custom(custom)?;
        ctx.set_key(key)?;
        ctx.init()?;
        Ok(ctx)
    }

    /// Cache `key_enc = bytepad(encode_string(K), RATE)`. Required before
    /// `init`. Rejected once `init` has run.
    pub fn set_key(&mut self, key: &[u8]) -> Result<(), Error> {
        if self.state == State::Initialized || self.state == State::Finalized {
            return Err(Error::UsageError);
        }
        if key.len() < 4 || key.len() > MAX_KEY {
            return Err(Error::ParameterOutOfRange);
        }

        let mut encoded_key = [0u8; MAX_KEY + MAX_ENCODED_LEN];
        let encoded_key_len = encode_string(&mut encoded_key, key);
        self.key_enc_len = bytepad(&mut self.key_enc, &encoded_key[..encoded_key_len], RATE);
        self.state = State::Keyed;
        Ok(())
    }

    /// Cache `custom_enc = encode_string(S)`. Defaults to `encode_string(b"")`
    /// if never called. Rejected once `init` has run.
    pub fn set_custom(&mut self, custom: &[u8]) -> Result<(), Error> {
        if self.state == State::Initialized || self.state == State::Finalized {
            return Err(Error::UsageError);
        }
        if custom.len() > MAX_CUSTOM {
            return Err(Error::ParameterOutOfRange);
        }
        self.custom_enc_len = encode_string(&mut self.custom_enc, custom);
        Ok(())
    }

    /// Requested output length in bytes. May be changed any time before
    /// `finalize`.
    pub fn set_output_len(&mut self, out_len: usize) {
        self.out_len = out_len;
    }

    /// The currently configured output length.
    pub fn output_len(&self) -> usize {
        self.out_len
    }

    /// Select XOF framing (`right_encode(0)`) instead of fixed-length
    /// framing (`right_encode(out_len * 8)`) at `finalize` time. May be
    /// changed any time before `finalize`.
    pub fn set_xof(&mut self, xof: bool) {
        self.xof_mode = xof;
    }

    /// Reset the sponge and absorb `bytepad(KMAC_STRING || custom_enc,
    /// RATE)` followed by `key_enc`. Fails if no key has been set.
    pub fn init(&mut self) -> Result<(), Error> {
        if self.key_enc_len == 0 {
            return Err(Error::UsageError);
        }

        let mut prefix = [0u8; KMAC_STRING.len() + MAX_CUSTOM_ENCODED];
        prefix[..KMAC_STRING.len()].copy_from_slice(&KMAC_STRING);
        prefix[KMAC_STRING.len()..KMAC_STRING.len() + self.custom_enc_len]
            .copy_from_slice(&self.custom_enc[..self.custom_enc_len]);
        let prefix_len = KMAC_STRING.len() + self.custom_enc_len;

        let mut padded = [0u8; KMAC_STRING.len() + MAX_CUSTOM_ENCODED + KMAC128_RATE];
        let padded_len = bytepad(&mut padded, &prefix[..prefix_len], RATE);

        let mut sponge = Sponge::new(RATE);
        sponge.absorb(&padded[..padded_len]);
        sponge.absorb(&self.key_enc[..self.key_enc_len]);

        self.sponge = Some(sponge);
        self.state = State::Initialized;
        Ok(())
    }

    /// Absorb more input data. Requires `init` to have run.
    pub fn update(&mut self, data: &[u8]) -> Result<(), Error> {
        match &mut self.sponge {
            Some(sponge) if self.state == State::Initialized => {
                sponge.absorb(data);
                Ok(())
            }
            _ => Err(Error::UsageError),
        }
    }

    /// Absorb the output-length encoding and squeeze `self.output_len()`
    /// bytes into `out`. Consumes the context.
    pub fn finalize_into(mut self, out: &mut [u8]) -> Result<(), Error> {
        let initialized = self.state == State::Initialized;
        let mut sponge = match self.sponge.take() {
            Some(sponge) if initialized => sponge,
            _ => return Err(Error::UsageError),
        };
        self.state = State::Finalized;

        let lbits = if self.xof_mode {
            0
        } else {
            (out.len() as u64) * 8
        };
        let mut len_buf = [0u8; MAX_ENCODED_LEN];
        let encoded = crate::encoding::right_encode(lbits, &mut len_buf);
        sponge.absorb(encoded);
        sponge.squeeze_into(out);
        Ok(())
    }

    /// Absorb the output-length encoding (using XOF framing, i.e.
    /// `right_encode(0)`) and return a reader that can squeeze an arbitrary
    /// number of bytes. Consumes the context.
    pub fn finalize_xof(mut self) -> Result<tiny_keccak::XofReader, Error> {
        let initialized = self.state == State::Initialized;
        let mut sponge = match self.sponge.take() {
            Some(sponge) if initialized => sponge,
            _ => return Err(Error::UsageError),
        };
        self.state = State::Finalized;

        let mut len_buf = [0u8; MAX_ENCODED_LEN];
        let encoded = crate::encoding::right_encode(0, &mut len_buf);
        sponge.absorb(encoded);
        Ok(sponge.reader())
    }
}

impl<const RATE: usize> Drop for KmacCore<RATE> {
    fn drop(&mut self) {
        self.key_enc.zeroize();
        self.custom_enc.zeroize();
    }
}
