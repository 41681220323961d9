//! Umbrella error type spanning every Ward subsystem.

use std::error::Error;
use std::fmt;

use ward_arena::ArenaError;
use ward_core::{ConfigError, CopyError, HandleError, SizeError};
use ward_sync::SyncError;

/// Any contract violation or failure reported by a Ward operation.
///
/// Arena and sync errors are flattened where they wrap a core error, so
/// callers can match on `WardError::Handle(HandleError::DoubleFree { .. })`
/// regardless of which crate produced it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WardError {
    /// A copy source did not fit its destination.
    Copy(CopyError),
    /// An allocation size overflowed, was negative, or exceeded a limit.
    Size(SizeError),
    /// A handle was used after release, released twice, or read out of bounds.
    Handle(HandleError),
    /// A configuration failed validation.
    Config(ConfigError),
    /// A heap already held its maximum number of live blocks.
    LiveLimitReached {
        /// The configured limit.
        limit: u32,
    },
    /// A counter run failed to spawn or join its workers.
    Sync(SyncError),
}

impl fmt::Display for WardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Copy(e) => write!(f, "{e}"),
            Self::Size(e) => write!(f, "{e}"),
            Self::Handle(e) => write!(f, "{e}"),
            Self::Config(e) => write!(f, "{e}"),
            Self::LiveLimitReached { limit } => write!(f, "live block limit of {limit} reached"),
            Self::Sync(e) => write!(f, "{e}"),
        }
    }
}

impl Error for WardError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Copy(e) => Some(e),
            Self::Size(e) => Some(e),
            Self::Handle(e) => Some(e),
            Self::Config(e) => Some(e),
            Self::LiveLimitReached { .. } => None,
            Self::Sync(e) => Some(e),
        }
    }
}

impl From<CopyError> for WardError {
    fn from(e: CopyError) -> Self {
        Self::Copy(e)
    }
}

impl From<SizeError> for WardError {
    fn from(e: SizeError) -> Self {
        Self::Size(e)
    }
}

impl From<HandleError> for WardError {
    fn from(e: HandleError) -> Self {
        Self::Handle(e)
    }
}

impl From<ConfigError> for WardError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<ArenaError> for WardError {
    fn from(e: ArenaError) -> Self {
        match e {
            ArenaError::Size(e) => Self::Size(e),
            ArenaError::Handle(e) => Self::Handle(e),
            ArenaError::Copy(e) => Self::Copy(e),
            ArenaError::LiveLimitReached { limit } => Self::LiveLimitReached { limit },
        }
    }
}

impl From<SyncError> for WardError {
    fn from(e: SyncError) -> Self {
        match e {
            SyncError::Config(e) => Self::Config(e),
            other => Self::Sync(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ward_core::{Access, BlockId};

    #[test]
    fn arena_errors_flatten() {
        let block = BlockId::new(0, 1);
        let e: WardError = ArenaError::Handle(HandleError::DoubleFree { block }).into();
        assert_eq!(e, WardError::Handle(HandleError::DoubleFree { block }));

        let e: WardError = ArenaError::LiveLimitReached { limit: 4 }.into();
        assert_eq!(e, WardError::LiveLimitReached { limit: 4 });
        assert!(e.source().is_none());
    }

    #[test]
    fn sync_config_error_flattens() {
        let e: WardError = SyncError::Config(ConfigError::ZeroPairs).into();
        assert_eq!(e, WardError::Config(ConfigError::ZeroPairs));
    }

    #[test]
    fn display_passes_through() {
        let inner = HandleError::UseAfterFree {
            block: BlockId::new(2, 3),
            access: Access::Read,
        };
        let e = WardError::from(inner.clone());
        assert_eq!(e.to_string(), inner.to_string());
        assert!(e.source().is_some());
    }
}
