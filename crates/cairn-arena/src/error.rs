//! Arena-specific error types.

use core::error::Error;
use core::fmt;

/// Errors that can occur during arena operations.
///
/// None of these poison the arena: after any error the arena is in the
/// same state it was before the failing call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArenaError {
    /// `init` was called on an arena that is already initialized.
    AlreadyInitialized,
    /// `init` was given a region or alignment it cannot use.
    InvalidArgument {
        /// Which check failed.
        reason: &'static str,
    },
    /// The arena has not been initialized yet.
    NotReady,
    /// The arena is initialized but allocation is switched off.
    Disabled,
    /// The padded request does not fit in the remaining region.
    OutOfMemory {
        /// Number of bytes requested after padding (or the raw request
        /// if padding itself overflowed).
        requested: usize,
        /// Bytes remaining between the cursor and the end of the region.
        available: usize,
    },
}

impl fmt::Display for ArenaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyInitialized => write!(f, "arena is already initialized"),
            Self::InvalidArgument { reason } => write!(f, "invalid arena argument: {reason}"),
            Self::NotReady => write!(f, "arena is not initialized"),
            Self::Disabled => write!(f, "arena allocation is disabled"),
            Self::OutOfMemory {
                requested,
                available,
            } => {
                write!(
                    f,
                    "arena exhausted: requested {requested} bytes, available {available} bytes"
                )
            }
        }
    }
}

impl Error for ArenaError {}
