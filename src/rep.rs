use super::parser::Parser;
use crate::reader::Reader;
use crate::result::ParseResult;
use crate::trampoline::Trampoline;
use std::sync::Arc;

/// Parser combinator that applies a parser repeatedly, collecting its outputs
///
/// Stops at the first recoverable failure or after `max` successes, and
/// leaves the reader after the last successful application. Fewer than `min`
/// successes is a recoverable failure carrying the element's failure. Fatal
/// errors from the element stop the repetition and are returned as is.
///
/// A success that consumes no input ends the repetition once `min` is reached,
/// so repeating a parser that can match the empty string terminates.
pub struct Rep<P> {
    parser: Arc<P>,
    min: usize,
    max: Option<usize>,
}

impl<P> Rep<P> {
    /// `max` below `min` is raised to `min`
    pub fn new(parser: P, min: usize, max: Option<usize>) -> Self {
        Rep {
            parser: Arc::new(parser),
            min,
            max: max.map(|max| max.max(min)),
        }
    }
}

impl<P> Parser for Rep<P>
where
    P: Parser,
{
    type Input = P::Input;
    type Output = Vec<P::Output>;

    fn step(&self, input: Self::Input) -> Trampoline<ParseResult<Self::Output, Self::Input>> {
        let bounds = Bounds {
            min: self.min,
            max: self.max,
        };
        repeat(Arc::clone(&self.parser), bounds, Vec::new(), input)
    }
}

#[derive(Clone, Copy)]
struct Bounds {
    min: usize,
    max: Option<usize>,
}

fn repeat<P>(
    parser: Arc<P>,
    bounds: Bounds,
    mut values: Vec<P::Output>,
    input: P::Input,
) -> Trampoline<ParseResult<Vec<P::Output>, P::Input>>
where
    P: Parser,
{
    if bounds.max == Some(values.len()) {
        return Trampoline::done(ParseResult::success(values, input));
    }

    let start = input.clone();
    parser.step(input).flat_map(move |result| match result {
        ParseResult::Success { value, remaining } => {
            values.push(value);
            let stalled = remaining.offset() == start.offset();
            if stalled && values.len() >= bounds.min {
                Trampoline::done(ParseResult::success(values, remaining))
            } else {
                Trampoline::more(move || repeat(parser, bounds, values, remaining))
            }
        }
        ParseResult::Failure { message, remaining } => {
            if values.len() >= bounds.min {
                Trampoline::done(ParseResult::success(values, start))
            } else {
                Trampoline::done(ParseResult::failure(message, remaining))
            }
        }
        ParseResult::Error { message, remaining } => {
            Trampoline::done(ParseResult::error(message, remaining))
        }
    })
}

/// Convenience function to create a Rep parser
pub fn rep<P>(parser: P, min: usize, max: Option<usize>) -> Rep<P>
where
    P: Parser,
{
    Rep::new(parser, min, max)
}

/// Extension trait to add the repetition methods to parsers
pub trait RepExt: Parser + Sized {
    /// Zero or more
    fn rep(self) -> Rep<Self> {
        Rep::new(self, 0, None)
    }

    /// One or more
    fn rep1(self) -> Rep<Self> {
        Rep::new(self, 1, None)
    }

    /// At least `min`
    fn rep_min(self, min: usize) -> Rep<Self> {
        Rep::new(self, min, None)
    }

    /// At least `min` and at most `max`, if given
    fn rep_bounded(self, min: usize, max: Option<usize>) -> Rep<Self> {
        Rep::new(self, min, max)
    }
}

/// Implement RepExt for all parsers
impl<P> RepExt for P where P: Parser {}
