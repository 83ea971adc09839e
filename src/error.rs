use crate::reader::Location;
use thiserror::Error;

/// A parse that did not succeed, detached from the reader it stopped at
///
/// Produced by [`ParseResult::into_result`](crate::ParseResult::into_result)
/// for callers that want to propagate parse outcomes with `?`.
#[derive(Debug, Clone, Error)]
pub enum ParseError<L: Location> {
    /// The input did not match; alternatives were exhausted
    #[error("[{location}] failure: {message}")]
    Failure {
        message: String,
        location: L,
        offset: usize,
    },
    /// The grammar rejected the input without allowing backtracking
    #[error("[{location}] error: {message}")]
    Fatal {
        message: String,
        location: L,
        offset: usize,
    },
}

impl<L: Location> ParseError<L> {
    pub fn message(&self) -> &str {
        match self {
            ParseError::Failure { message, .. } | ParseError::Fatal { message, .. } => message,
        }
    }

    pub fn location(&self) -> &L {
        match self {
            ParseError::Failure { location, .. } | ParseError::Fatal { location, .. } => location,
        }
    }

    /// Reader offset at which parsing stopped
    pub fn offset(&self) -> usize {
        match self {
            ParseError::Failure { offset, .. } | ParseError::Fatal { offset, .. } => *offset,
        }
    }

    pub fn is_fatal(&self) -> bool {
        matches!(self, ParseError::Fatal { .. })
    }

    /// The short message followed by the location's long description
    pub fn report(&self) -> String {
        format!("{}\n\n{}", self, self.location().long_description())
    }
}
