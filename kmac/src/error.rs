use core::fmt;

/// Errors surfaced by a [`crate::KmacCore`] (see spec §7).
///
/// All variants are non-retryable: once returned, the context is either
/// still in its prior state (`UsageError`, `ParameterOutOfRange`) or in an
/// unusable state whose only valid next step is to drop it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// `update`/`final` called before `init`, or `set_key`/`set_custom`
    /// called after `init` (silently ineffective in the OpenSSL original;
    /// a hard error here, per spec §9's recommendation).
    UsageError,
    /// Key length outside `[4, 255]` bytes, customization string longer
    /// than 127 bytes, or (for [`crate::Kmac128::finalize_to_vec`]/
    /// [`crate::Kmac256::finalize_to_vec`] only) a configured output length
    /// above the fixed-capacity buffer those helpers squeeze into.
    ParameterOutOfRange,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UsageError => f.write_str("kmac context used out of order"),
            Error::ParameterOutOfRange => f.write_str("kmac key or customization string out of range"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}
