//! Lookahead combinators: inspect upcoming input without consuming it

use super::parser::Parser;
use crate::result::ParseResult;
use crate::trampoline::Trampoline;

/// Parser combinator that performs negative lookahead
///
/// Succeeds with () if the given parser fails (or errors) at the current position.
/// Fails if the given parser succeeds.
/// Never consumes any input regardless of outcome.
pub struct Not<P> {
    parser: P,
}

impl<P> Not<P> {
    pub fn new(parser: P) -> Self {
        Not { parser }
    }
}

impl<P> Parser for Not<P>
where
    P: Parser,
{
    type Input = P::Input;
    type Output = ();

    fn step(&self, input: Self::Input) -> Trampoline<ParseResult<(), Self::Input>> {
        let start = input.clone();
        self.parser.step(input).map(move |result| match result {
            ParseResult::Success { .. } => {
                ParseResult::failure("negative lookahead failed: unexpected match", start)
            }
            ParseResult::Failure { .. } | ParseResult::Error { .. } => {
                ParseResult::success((), start)
            }
        })
    }
}

/// Convenience function to create a Not parser for negative lookahead
pub fn not<P>(parser: P) -> Not<P>
where
    P: Parser,
{
    Not::new(parser)
}

/// Parser combinator that performs positive lookahead
///
/// Succeeds with () if the given parser succeeds, discarding its value.
/// Failures and errors keep their kind and message.
/// Never consumes any input regardless of outcome.
pub struct Guard<P> {
    parser: P,
}

impl<P> Guard<P> {
    pub fn new(parser: P) -> Self {
        Guard { parser }
    }
}

impl<P> Parser for Guard<P>
where
    P: Parser,
{
    type Input = P::Input;
    type Output = ();

    fn step(&self, input: Self::Input) -> Trampoline<ParseResult<(), Self::Input>> {
        let start = input.clone();
        self.parser.step(input).map(move |result| match result {
            ParseResult::Success { .. } => ParseResult::success((), start),
            ParseResult::Failure { message, .. } => ParseResult::failure(message, start),
            ParseResult::Error { message, .. } => ParseResult::error(message, start),
        })
    }
}

/// Convenience function to create a Guard parser for positive lookahead
pub fn guard<P>(parser: P) -> Guard<P>
where
    P: Parser,
{
    Guard::new(parser)
}

/// Extension trait to add .not() and .guard() method support for parsers
pub trait LookaheadExt: Parser + Sized {
    fn not(self) -> Not<Self> {
        Not::new(self)
    }

    fn guard(self) -> Guard<Self> {
        Guard::new(self)
    }
}

/// Implement LookaheadExt for all parsers
impl<P> LookaheadExt for P where P: Parser {}
