use crate::error::ParseError;
use crate::reader::{Location, Reader};
use crate::trampoline::Trampoline;
use std::fmt;

/// Outcome of running a parser
///
/// Every variant carries the reader at the point parsing stopped. Failures
/// are recoverable: an enclosing alternation or repetition may try something
/// else. Errors are fatal and stop alternation from backtracking.
#[must_use]
#[derive(Debug, Clone)]
pub enum ParseResult<T, R> {
    Success { value: T, remaining: R },
    Failure { message: String, remaining: R },
    Error { message: String, remaining: R },
}

impl<T, R> ParseResult<T, R> {
    pub fn success(value: T, remaining: R) -> Self {
        ParseResult::Success { value, remaining }
    }

    pub fn failure(message: impl Into<String>, remaining: R) -> Self {
        ParseResult::Failure {
            message: message.into(),
            remaining,
        }
    }

    pub fn error(message: impl Into<String>, remaining: R) -> Self {
        ParseResult::Error {
            message: message.into(),
            remaining,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ParseResult::Success { .. })
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, ParseResult::Failure { .. })
    }

    pub fn is_error(&self) -> bool {
        matches!(self, ParseResult::Error { .. })
    }

    /// The reader where parsing stopped
    pub fn remaining(&self) -> &R {
        match self {
            ParseResult::Success { remaining, .. }
            | ParseResult::Failure { remaining, .. }
            | ParseResult::Error { remaining, .. } => remaining,
        }
    }

    /// The failure or error message, if parsing did not succeed
    pub fn message(&self) -> Option<&str> {
        match self {
            ParseResult::Success { .. } => None,
            ParseResult::Failure { message, .. } | ParseResult::Error { message, .. } => {
                Some(message)
            }
        }
    }

    /// The parsed value, if parsing succeeded
    pub fn value(self) -> Option<T> {
        match self {
            ParseResult::Success { value, .. } => Some(value),
            _ => None,
        }
    }

    /// Transform a success value; failures and errors pass through unchanged
    pub fn map<U, F>(self, f: F) -> ParseResult<U, R>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            ParseResult::Success { value, remaining } => ParseResult::Success {
                value: f(value),
                remaining,
            },
            ParseResult::Failure { message, remaining } => {
                ParseResult::Failure { message, remaining }
            }
            ParseResult::Error { message, remaining } => ParseResult::Error { message, remaining },
        }
    }
}

impl<T: 'static, R: 'static> ParseResult<T, R> {
    /// Continue with `next` on the remaining input if this result is a success
    ///
    /// Failures and errors short-circuit without calling `next`.
    pub fn flat_map_with_next<U, F>(self, next: F) -> Trampoline<ParseResult<U, R>>
    where
        U: 'static,
        F: FnOnce(T, R) -> Trampoline<ParseResult<U, R>>,
    {
        match self {
            ParseResult::Success { value, remaining } => next(value, remaining),
            ParseResult::Failure { message, remaining } => {
                Trampoline::done(ParseResult::Failure { message, remaining })
            }
            ParseResult::Error { message, remaining } => {
                Trampoline::done(ParseResult::Error { message, remaining })
            }
        }
    }
}

impl<T: 'static, R: Reader> ParseResult<T, R> {
    /// Fall back to `alternative` if this result is a recoverable failure
    ///
    /// Successes and errors are kept as they are and `alternative` is never
    /// evaluated. When both fail, the outcome that got strictly further into
    /// the input wins; on a tie this failure is kept.
    pub fn or_else<F>(self, alternative: F) -> Trampoline<ParseResult<T, R>>
    where
        F: FnOnce() -> Trampoline<ParseResult<T, R>> + 'static,
    {
        match self {
            ParseResult::Failure { message, remaining } => {
                Trampoline::more(alternative).map(move |other| match other {
                    ParseResult::Success { .. } => other,
                    ParseResult::Failure { .. } | ParseResult::Error { .. }
                        if other.remaining().offset() > remaining.offset() =>
                    {
                        other
                    }
                    _ => ParseResult::Failure { message, remaining },
                })
            }
            settled => Trampoline::done(settled),
        }
    }

    /// Detach the outcome from the reader, for use with `?`
    pub fn into_result(self) -> Result<(T, R), ParseError<R::Location>> {
        match self {
            ParseResult::Success { value, remaining } => Ok((value, remaining)),
            ParseResult::Failure { message, remaining } => Err(ParseError::Failure {
                message,
                location: remaining.location(),
                offset: remaining.offset(),
            }),
            ParseResult::Error { message, remaining } => Err(ParseError::Fatal {
                message,
                location: remaining.location(),
                offset: remaining.offset(),
            }),
        }
    }
}

impl<T: fmt::Debug, R: Reader> fmt::Display for ParseResult<T, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseResult::Success { value, remaining } => {
                write!(f, "[{}] parsed: {:?}", remaining.location(), value)
            }
            ParseResult::Failure { message, remaining } => {
                let location = remaining.location();
                write!(
                    f,
                    "[{}] failure: {}\n\n{}",
                    location,
                    message,
                    location.long_description()
                )
            }
            ParseResult::Error { message, remaining } => {
                let location = remaining.location();
                write!(
                    f,
                    "[{}] error: {}\n\n{}",
                    location,
                    message,
                    location.long_description()
                )
            }
        }
    }
}
