use super::parser::Parser;
use crate::parser::end_of_input_message;
use crate::reader::Reader;
use crate::result::ParseResult;
use crate::trampoline::Trampoline;

/// Parser combinator that requires the given parser to consume all remaining input
///
/// A success that leaves input behind becomes a recoverable failure reported
/// at the first unconsumed element. This is useful for top-level parsers
/// where everything in the input must be accounted for.
pub struct Phrase<P> {
    parser: P,
}

impl<P> Phrase<P> {
    pub fn new(parser: P) -> Self {
        Phrase { parser }
    }
}

impl<P> Parser for Phrase<P>
where
    P: Parser,
{
    type Input = P::Input;
    type Output = P::Output;

    fn step(&self, input: Self::Input) -> Trampoline<ParseResult<Self::Output, Self::Input>> {
        self.parser.step(input).map(|result| match result {
            ParseResult::Success { remaining, .. } if !remaining.at_end() => {
                ParseResult::failure(end_of_input_message(&remaining), remaining)
            }
            other => other,
        })
    }
}

/// Convenience function to create a Phrase parser
pub fn phrase<P>(parser: P) -> Phrase<P>
where
    P: Parser,
{
    Phrase::new(parser)
}

/// Extension trait to add .phrase() method support for parsers
pub trait PhraseExt: Parser + Sized {
    fn phrase(self) -> Phrase<Self> {
        Phrase::new(self)
    }
}

/// Implement PhraseExt for all parsers
impl<P> PhraseExt for P where P: Parser {}
