use super::parser::Parser;
use crate::result::ParseResult;
use crate::trampoline::Trampoline;

/// Parser combinator that makes a parser optional
///
/// Succeeds with `Some` when the inner parser succeeds. A recoverable failure
/// becomes `None` at the original position; a fatal error is kept.
pub struct Opt<P> {
    parser: P,
}

impl<P> Opt<P> {
    pub fn new(parser: P) -> Self {
        Opt { parser }
    }
}

impl<P> Parser for Opt<P>
where
    P: Parser,
{
    type Input = P::Input;
    type Output = Option<P::Output>;

    fn step(&self, input: Self::Input) -> Trampoline<ParseResult<Self::Output, Self::Input>> {
        let start = input.clone();
        self.parser.step(input).map(move |result| match result {
            ParseResult::Success { value, remaining } => ParseResult::success(Some(value), remaining),
            ParseResult::Failure { .. } => ParseResult::success(None, start),
            ParseResult::Error { message, remaining } => ParseResult::error(message, remaining),
        })
    }
}

/// Convenience function to create an Opt parser
pub fn opt<P>(parser: P) -> Opt<P>
where
    P: Parser,
{
    Opt::new(parser)
}

/// Extension trait to add .opt() method support for parsers
pub trait OptExt: Parser + Sized {
    fn opt(self) -> Opt<Self> {
        Opt::new(self)
    }
}

/// Implement OptExt for all parsers
impl<P> OptExt for P where P: Parser {}
