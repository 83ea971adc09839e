use super::parser::Parser;
use crate::reader::Reader;
use crate::result::ParseResult;
use crate::trampoline::Trampoline;

/// Range of reader offsets covered by a successful parse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    /// Start offset (inclusive)
    pub start: usize,
    /// End offset (exclusive)
    pub end: usize,
}

impl Span {
    /// Create a new span
    pub fn new(start: usize, end: usize) -> Self {
        Span { start, end }
    }

    /// Get the length of the span
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Check if the span is empty
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The covered text, for spans produced by a reader whose offsets index `source` by byte
    pub fn slice<'a>(&self, source: &'a str) -> Option<&'a str> {
        source.get(self.start..self.end)
    }
}

/// A parser combinator that captures the offset span of a successful parse
pub struct Spanned<P> {
    parser: P,
}

impl<P> Spanned<P> {
    pub fn new(parser: P) -> Self {
        Spanned { parser }
    }
}

impl<P> Parser for Spanned<P>
where
    P: Parser,
{
    type Input = P::Input;
    type Output = (P::Output, Span);

    fn step(&self, input: Self::Input) -> Trampoline<ParseResult<Self::Output, Self::Input>> {
        let start = input.offset();
        self.parser.step(input).map(move |result| match result {
            ParseResult::Success { value, remaining } => {
                let span = Span::new(start, remaining.offset());
                ParseResult::success((value, span), remaining)
            }
            ParseResult::Failure { message, remaining } => ParseResult::failure(message, remaining),
            ParseResult::Error { message, remaining } => ParseResult::error(message, remaining),
        })
    }
}

/// Extension trait to add span tracking to any parser
pub trait SpannedExt: Parser + Sized {
    /// Wrap this parser to capture its span
    fn spanned(self) -> Spanned<Self> {
        Spanned::new(self)
    }
}

impl<P> SpannedExt for P where P: Parser {}

/// Convenience function to create a Spanned combinator
pub fn spanned<P>(parser: P) -> Spanned<P> {
    Spanned::new(parser)
}
