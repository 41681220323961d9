//! Arena-specific error types.

use std::error::Error;
use std::fmt;

use ward_core::{CopyError, HandleError, SizeError};

/// Errors that can occur during heap operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArenaError {
    /// The requested size could not be computed or exceeds the block limit.
    /// No allocation was attempted.
    Size(SizeError),
    /// The handle does not name a live block.
    Handle(HandleError),
    /// A copy into a live block did not fit.
    Copy(CopyError),
    /// The heap already holds `max_live_blocks` live blocks.
    LiveLimitReached {
        /// The configured limit.
        limit: u32,
    },
}

impl fmt::Display for ArenaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Size(e) => write!(f, "allocation rejected: {e}"),
            Self::Handle(e) => write!(f, "{e}"),
            Self::Copy(e) => write!(f, "copy into block rejected: {e}"),
            Self::LiveLimitReached { limit } => {
                write!(f, "live block limit of {limit} reached")
            }
        }
    }
}

impl Error for ArenaError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Size(e) => Some(e),
            Self::Handle(e) => Some(e),
            Self::Copy(e) => Some(e),
            Self::LiveLimitReached { .. } => None,
        }
    }
}

impl From<SizeError> for ArenaError {
    fn from(e: SizeError) -> Self {
        Self::Size(e)
    }
}

impl From<HandleError> for ArenaError {
    fn from(e: HandleError) -> Self {
        Self::Handle(e)
    }
}

impl From<CopyError> for ArenaError {
    fn from(e: CopyError) -> Self {
        Self::Copy(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ward_core::BlockId;

    #[test]
    fn source_chains_to_contract_error() {
        let err = ArenaError::from(HandleError::DoubleFree {
            block: BlockId::new(1, 0),
        });
        let source = err.source().unwrap();
        assert!(source.to_string().starts_with("double free"));
    }

    #[test]
    fn live_limit_has_no_source() {
        let err = ArenaError::LiveLimitReached { limit: 4 };
        assert!(err.source().is_none());
        assert_eq!(err.to_string(), "live block limit of 4 reached");
    }
}
