//! C-compatible status codes.
//!
//! [`CairnStatus`] mirrors [`ArenaError`] one variant per failure, plus the
//! conditions that only exist at the boundary (bad handles, poisoned locks,
//! caught panics).

use cairn_arena::ArenaError;

/// Status code returned by the `i32`-returning FFI functions and by
/// `cairn_arena_last_status`.
///
/// `Ok` = 0, all errors are negative. Values are ABI-stable.
#[repr(i32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CairnStatus {
    /// Success.
    Ok = 0,
    /// Handle is invalid or was already destroyed.
    InvalidHandle = -1,
    /// An argument is null, out of range, or otherwise invalid.
    InvalidArgument = -2,
    /// The arena already has a region; initialize is once-only.
    AlreadyInitialized = -3,
    /// The arena has no region yet.
    NotReady = -4,
    /// The arena is initialized but allocation is switched off.
    Disabled = -5,
    /// The request does not fit in the remaining region.
    OutOfMemory = -6,
    /// Internal error (e.g. poisoned lock after a prior panic).
    InternalError = -20,
    /// A Rust panic was caught at the FFI boundary.
    Panicked = -128,
}

impl From<&ArenaError> for CairnStatus {
    fn from(e: &ArenaError) -> Self {
        match e {
            ArenaError::AlreadyInitialized => CairnStatus::AlreadyInitialized,
            ArenaError::InvalidArgument { .. } => CairnStatus::InvalidArgument,
            ArenaError::NotReady => CairnStatus::NotReady,
            ArenaError::Disabled => CairnStatus::Disabled,
            ArenaError::OutOfMemory { .. } => CairnStatus::OutOfMemory,
        }
    }
}

impl<T> From<&Result<T, ArenaError>> for CairnStatus {
    fn from(r: &Result<T, ArenaError>) -> Self {
        match r {
            Ok(_) => CairnStatus::Ok,
            Err(e) => CairnStatus::from(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_code_values_are_stable() {
        assert_eq!(CairnStatus::Ok as i32, 0);
        assert_eq!(CairnStatus::InvalidHandle as i32, -1);
        assert_eq!(CairnStatus::InvalidArgument as i32, -2);
        assert_eq!(CairnStatus::AlreadyInitialized as i32, -3);
        assert_eq!(CairnStatus::NotReady as i32, -4);
        assert_eq!(CairnStatus::Disabled as i32, -5);
        assert_eq!(CairnStatus::OutOfMemory as i32, -6);
        assert_eq!(CairnStatus::InternalError as i32, -20);
        assert_eq!(CairnStatus::Panicked as i32, -128);
    }

    #[test]
    fn arena_error_to_status() {
        assert_eq!(
            CairnStatus::from(&ArenaError::AlreadyInitialized),
            CairnStatus::AlreadyInitialized
        );
        assert_eq!(
            CairnStatus::from(&ArenaError::InvalidArgument { reason: "x" }),
            CairnStatus::InvalidArgument
        );
        assert_eq!(
            CairnStatus::from(&ArenaError::NotReady),
            CairnStatus::NotReady
        );
        assert_eq!(
            CairnStatus::from(&ArenaError::Disabled),
            CairnStatus::Disabled
        );
        assert_eq!(
            CairnStatus::from(&ArenaError::OutOfMemory {
                requested: 64,
                available: 8,
            }),
            CairnStatus::OutOfMemory
        );
    }

    #[test]
    fn result_to_status() {
        let ok: Result<(), ArenaError> = Ok(());
        let err: Result<(), ArenaError> = Err(ArenaError::Disabled);
        assert_eq!(CairnStatus::from(&ok), CairnStatus::Ok);
        assert_eq!(CairnStatus::from(&err), CairnStatus::Disabled);
    }
}
