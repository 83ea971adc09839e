use super::parser::Parser;
use crate::result::ParseResult;
use crate::trampoline::Trampoline;
use std::sync::Arc;

/// Parser combinator that tries the first parser, and if it fails, tries the second parser
///
/// Both parsers start from the same input. A success or a fatal error from
/// the first parser is returned as is. When both fail, the failure that got
/// further into the input is reported; on a tie the first one is kept.
pub struct Or<P1, P2> {
    parser1: P1,
    parser2: Arc<P2>,
}

impl<P1, P2> Or<P1, P2> {
    pub fn new(parser1: P1, parser2: P2) -> Self {
        Or {
            parser1,
            parser2: Arc::new(parser2),
        }
    }
}

impl<P1, P2, O> Parser for Or<P1, P2>
where
    P1: Parser<Output = O>,
    P2: Parser<Input = P1::Input, Output = O>,
    O: 'static,
{
    type Input = P1::Input;
    type Output = O;

    fn step(&self, input: Self::Input) -> Trampoline<ParseResult<O, Self::Input>> {
        let parser2 = Arc::clone(&self.parser2);
        let retry = input.clone();
        self.parser1
            .step(input)
            .flat_map(move |result| result.or_else(move || parser2.step(retry)))
    }
}

/// Extension trait to add .or() method support for parsers
pub trait OrExt: Parser + Sized {
    fn or<P>(self, other: P) -> Or<Self, P>
    where
        P: Parser<Input = Self::Input, Output = Self::Output>,
    {
        Or::new(self, other)
    }
}

/// Implement OrExt for all parsers
impl<P> OrExt for P where P: Parser {}

/// Convenience function to create an Or parser
pub fn or<P1, P2, O>(parser1: P1, parser2: P2) -> Or<P1, P2>
where
    P1: Parser<Output = O>,
    P2: Parser<Input = P1::Input, Output = O>,
{
    Or::new(parser1, parser2)
}
