use super::parser::Parser;
use crate::result::ParseResult;
use crate::trampoline::Trampoline;
use std::borrow::Cow;
use std::sync::Arc;

/// Parser combinator that turns a recoverable failure into a fatal error
///
/// Use it once a construct has been recognized far enough that trying an
/// alternative would only hide the real problem.
pub struct Commit<P> {
    parser: P,
}

impl<P> Commit<P> {
    pub fn new(parser: P) -> Self {
        Commit { parser }
    }
}

impl<P> Parser for Commit<P>
where
    P: Parser,
{
    type Input = P::Input;
    type Output = P::Output;

    fn step(&self, input: Self::Input) -> Trampoline<ParseResult<Self::Output, Self::Input>> {
        self.parser.step(input).map(|result| match result {
            ParseResult::Failure { message, remaining } => ParseResult::error(message, remaining),
            settled => settled,
        })
    }
}

/// Which outcomes a [`WithMessage`] rewrites
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rewrite {
    Failure,
    Error,
}

/// Parser combinator that replaces the message of a failure or an error
///
/// The position and the kind of the outcome are kept.
pub struct WithMessage<P> {
    parser: P,
    message: Arc<Cow<'static, str>>,
    rewrite: Rewrite,
}

impl<P> Parser for WithMessage<P>
where
    P: Parser,
{
    type Input = P::Input;
    type Output = P::Output;

    fn step(&self, input: Self::Input) -> Trampoline<ParseResult<Self::Output, Self::Input>> {
        let message = Arc::clone(&self.message);
        let rewrite = self.rewrite;
        self.parser.step(input).map(move |result| match (result, rewrite) {
            (ParseResult::Failure { remaining, .. }, Rewrite::Failure) => {
                ParseResult::failure(message.to_string(), remaining)
            }
            (ParseResult::Error { remaining, .. }, Rewrite::Error) => {
                ParseResult::error(message.to_string(), remaining)
            }
            (other, _) => other,
        })
    }
}

/// Convenience function to create a Commit parser
pub fn commit<P>(parser: P) -> Commit<P>
where
    P: Parser,
{
    Commit::new(parser)
}

/// Extension trait to add .commit() and the message overrides to parsers
pub trait CommitExt: Parser + Sized {
    fn commit(self) -> Commit<Self> {
        Commit::new(self)
    }

    /// Report recoverable failures with `message` instead
    fn with_failure_message(self, message: impl Into<Cow<'static, str>>) -> WithMessage<Self> {
        WithMessage {
            parser: self,
            message: Arc::new(message.into()),
            rewrite: Rewrite::Failure,
        }
    }

    /// Report fatal errors with `message` instead
    fn with_error_message(self, message: impl Into<Cow<'static, str>>) -> WithMessage<Self> {
        WithMessage {
            parser: self,
            message: Arc::new(message.into()),
            rewrite: Rewrite::Error,
        }
    }
}

/// Implement CommitExt for all parsers
impl<P> CommitExt for P where P: Parser {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::or::OrExt;
    use crate::primitives::fatal;
    use crate::reader::Reader;
    use crate::readers::StrReader;
    use crate::seq::SeqExt;
    use crate::text::{character, digit, literal};

    #[test]
    fn test_commit_turns_failure_into_error() {
        let result = commit(character('a')).parse(StrReader::new("b"));

        assert!(result.is_error());
        assert_eq!(result.message(), Some("expected 'a', found 'b'"));
        assert_eq!(result.remaining().offset(), 0);
    }

    #[test]
    fn test_commit_keeps_success() {
        let result = character('a').commit().parse(StrReader::new("ab"));
        assert_eq!(result.value(), Some('a'));
    }

    #[test]
    fn test_commit_stops_alternation() {
        // Once "let" is seen the binding must be well formed
        let binding = literal("let")
            .seq_ignore_left(character(' ').seq_ignore_left(digit()).commit());
        let parser = binding.or(literal("le").seq_ignore_left(character('t')));

        let result = parser.parse(StrReader::new("let x"));
        assert!(result.is_error());
        assert_eq!(result.message(), Some("expected digit, found 'x'"));
        assert_eq!(result.remaining().offset(), 4);
    }

    #[test]
    fn test_with_failure_message() {
        let parser = digit().with_failure_message("a number was expected here");

        let result = parser.parse(StrReader::new("xy"));
        assert!(result.is_failure());
        assert_eq!(result.message(), Some("a number was expected here"));

        let result = parser.parse(StrReader::new("7"));
        assert_eq!(result.value(), Some('7'));
    }

    #[test]
    fn test_with_failure_message_leaves_errors() {
        let parser = fatal::<char, StrReader>("stop").with_failure_message("ignored");
        assert_eq!(parser.parse(StrReader::new("")).message(), Some("stop"));
    }

    #[test]
    fn test_with_error_message() {
        let parser = character('a')
            .commit()
            .with_error_message(format!("unterminated {}", "block"));

        let result = parser.parse(StrReader::new("b"));
        assert!(result.is_error());
        assert_eq!(result.message(), Some("unterminated block"));

        let failing = character('a').with_error_message("unused");
        assert_eq!(
            failing.parse(StrReader::new("b")).message(),
            Some("expected 'a', found 'b'")
        );
    }
}
