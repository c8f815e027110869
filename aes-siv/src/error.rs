use core::fmt;

/// Errors surfaced by [`crate::Siv`] (see spec §7).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Key material was not exactly `2 * C::KeySize` bytes.
    ParameterOutOfRange,
    /// `encrypt`/`decrypt` called a second time on a context that has
    /// already performed its one crypto operation. SIV needs the whole
    /// plaintext to fold its last block with the running S2V state, so it
    /// cannot be used incrementally across two messages.
    UsageError,
    /// The computed synthetic IV did not match the supplied tag. The
    /// caller's output buffer has already been zeroized by the time this is
    /// returned.
    AuthenticationFailure,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::ParameterOutOfRange => f.write_str("aes-siv key length out of range"),
            Error::UsageError => f.write_str("aes-siv context already used for one crypto operation"),
            Error::AuthenticationFailure => f.write_str("aes-siv tag verification failed"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}
