//! NIST SP 800-185 length-prefix and alignment encodings (`left_encode`,
//! `right_encode`, `encode_string`, `bytepad`).

/// Maximum length in bytes of a `left_encode`/`right_encode` output: one
/// length byte plus up to 8 bytes of big-endian value.
pub(crate) const MAX_ENCODED_LEN: usize = 9;

/// The number of bytes required to write `num` in big-endian, excluding the
/// leading/trailing length byte itself.
#[inline(always)]
fn num_encoding_size(num: u64) -> usize {
    let bits = 64 - (num | 1).leading_zeros() as usize;
    bits.div_ceil(8)
}

/// `left_encode(x)`: the byte-length of `x`'s big-endian encoding, followed
/// by that encoding itself. `left_encode(0) == [0x01, 0x00]`.
#[inline(always)]
pub(crate) fn left_encode(num: u64, buffer: &mut [u8; MAX_ENCODED_LEN]) -> &[u8] {
    let n = num_encoding_size(num);
    buffer[0] = n as u8;
    buffer[1..=n].copy_from_slice(&num.to_be_bytes()[8 - n..]);
    &buffer[..=n]
}

/// `right_encode(x)`: `x`'s big-endian encoding, followed by its own byte
/// length. `right_encode(0) == [0x00, 0x01]`.
#[inline(always)]
pub(crate) fn right_encode(num: u64, buffer: &mut [u8; MAX_ENCODED_LEN]) -> &[u8] {
    let n = num_encoding_size(num);
    buffer[0..n].copy_from_slice(&num.to_be_bytes()[8 - n..]);
    buffer[n] = n as u8;
    &buffer[..=n]
}

/// `encode_string(s) = left_encode(8 * len(s)) || s`.
///
/// Writes into `out`, which must be at least `s.len() + MAX_ENCODED_LEN`
/// bytes, and returns the number of bytes written. Fails if `8 * s.len()`
/// would need an encoded-length field wider than a single byte can record
/// (i.e. `s.len() > u32::MAX as usize`, far above any caller's actual limit).
pub(crate) fn encode_string(out: &mut [u8], s: &[u8]) -> usize {
    let mut len_buf = [0u8; MAX_ENCODED_LEN];
    let encoded_len = left_encode((s.len() as u64) * 8, &mut len_buf);
    let total = encoded_len.len() + s.len();
    out[..encoded_len.len()].copy_from_slice(encoded_len);
    out[encoded_len.len()..total].copy_from_slice(s);
    total
}

/// `bytepad(X, w) = left_encode(w) || X || 0^k`, zero-padded up to the next
/// multiple of `w`. `x` is itself the concatenation of the pieces the caller
/// wants bytepadded (e.g. `kmac_string || encode_string(S)`, or
/// `encode_string(K)`).
///
/// Writes into `out` (which must be large enough for the padded result) and
/// returns the total padded length.
pub(crate) fn bytepad(out: &mut [u8], x: &[u8], w: usize) -> usize {
    let mut w_buf = [0u8; MAX_ENCODED_LEN];
    let encoded_w = left_encode(w as u64, &mut w_buf);

    let mut len = encoded_w.len();
    out[..len].copy_from_slice(encoded_w);
    out[len..len + x.len()].copy_from_slice(x);
    len += x.len();

    let padded_len = len.div_ceil(w) * w;
    out[len..padded_len].fill(0);
    padded_len
}
