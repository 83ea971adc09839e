use super::parser::Parser;
use crate::rep::Rep;
use crate::result::ParseResult;
use crate::seq::{Pair, Seq};
use crate::trampoline::Trampoline;
use std::sync::Arc;

/// Parser combinator for left-associative operator chains
///
/// Parses `parser`, then `(separator, parser)` pairs, where the separator
/// produces the function joining the value so far with the next operand:
/// `a - b - c` folds as `(a - b) - c`. The count bounds apply to the
/// operands, and as with [`Rep`] a `max` below `min` is raised to `min`.
/// With `min == 0`, finding no operand at all gives `None` instead of a
/// failure.
pub struct ChainLeft<P, S> {
    parser: Arc<P>,
    tail: Arc<Rep<Seq<S, Arc<P>, Pair>>>,
    min: usize,
    max: Option<usize>,
}

impl<P, S> ChainLeft<P, S> {
    pub fn new(parser: P, separator: S, min: usize, max: Option<usize>) -> Self {
        let max = max.map(|max| max.max(min));
        let parser = Arc::new(parser);
        let tail = Rep::new(
            Seq::new(separator, Arc::clone(&parser), Pair),
            min.saturating_sub(1),
            max.map(|max| max.saturating_sub(1)),
        );
        ChainLeft {
            parser,
            tail: Arc::new(tail),
            min,
            max,
        }
    }
}

impl<P, S, F> Parser for ChainLeft<P, S>
where
    P: Parser,
    S: Parser<Input = P::Input, Output = F>,
    F: Fn(P::Output, P::Output) -> P::Output + 'static,
{
    type Input = P::Input;
    type Output = Option<P::Output>;

    fn step(&self, input: Self::Input) -> Trampoline<ParseResult<Self::Output, Self::Input>> {
        if self.max == Some(0) {
            return Trampoline::done(ParseResult::success(None, input));
        }

        let tail = Arc::clone(&self.tail);
        let optional = self.min == 0;
        let start = input.clone();
        self.parser.step(input).flat_map(move |result| match result {
            ParseResult::Success { value, remaining } => tail.step(remaining).map(|result| {
                result.map(|operations| {
                    let folded = operations
                        .into_iter()
                        .fold(value, |acc, (combine, next)| combine(acc, next));
                    Some(folded)
                })
            }),
            ParseResult::Failure { .. } if optional => {
                Trampoline::done(ParseResult::success(None, start))
            }
            other => Trampoline::done(other.map(Some)),
        })
    }
}

/// Convenience function to create a ChainLeft parser
pub fn chain_left<P, S, F>(
    parser: P,
    separator: S,
    min: usize,
    max: Option<usize>,
) -> ChainLeft<P, S>
where
    P: Parser,
    S: Parser<Input = P::Input, Output = F>,
    F: Fn(P::Output, P::Output) -> P::Output + 'static,
{
    ChainLeft::new(parser, separator, min, max)
}

/// Extension trait to add .chain_left() method support for parsers
pub trait ChainExt: Parser + Sized {
    fn chain_left<S, F>(self, separator: S, min: usize, max: Option<usize>) -> ChainLeft<Self, S>
    where
        S: Parser<Input = Self::Input, Output = F>,
        F: Fn(Self::Output, Self::Output) -> Self::Output + 'static,
    {
        ChainLeft::new(self, separator, min, max)
    }
}

/// Implement ChainExt for all parsers
impl<P> ChainExt for P where P: Parser {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::MapExt;
    use crate::or::OrExt;
    use crate::reader::Reader;
    use crate::readers::StrReader;
    use crate::text::{character, digit};

    fn number() -> impl Parser<Input = StrReader, Output = i64> {
        digit().map(|ch: char| ch.to_digit(10).unwrap() as i64)
    }

    fn operator() -> impl Parser<Input = StrReader, Output = fn(i64, i64) -> i64> {
        let minus: fn(i64, i64) -> i64 = |a, b| a - b;
        let plus: fn(i64, i64) -> i64 = |a, b| a + b;
        character('-').map_const(minus).or(character('+').map_const(plus))
    }

    #[test]
    fn test_chain_left_is_left_associative() {
        let parser = number().chain_left(operator(), 1, None);

        let result = parser.parse(StrReader::new("9-3-2"));
        assert!(result.remaining().at_end());
        assert_eq!(result.value(), Some(Some(4)));
    }

    #[test]
    fn test_chain_left_single_operand() {
        let result = chain_left(number(), operator(), 1, None).parse(StrReader::new("7+"));

        // The dangling separator is not consumed
        assert_eq!(result.remaining().offset(), 1);
        assert_eq!(result.value(), Some(Some(7)));
    }

    #[test]
    fn test_chain_left_min_zero_gives_none() {
        let result = number()
            .chain_left(operator(), 0, None)
            .parse(StrReader::new("x"));

        assert_eq!(result.remaining().offset(), 0);
        assert_eq!(result.value(), Some(None));
    }

    #[test]
    fn test_chain_left_min_not_reached() {
        let parser = number().chain_left(operator(), 3, None);

        assert!(parser.parse(StrReader::new("")).is_failure());
        assert!(parser.parse(StrReader::new("1+2")).is_failure());
        assert_eq!(parser.parse(StrReader::new("1+2+3")).value(), Some(Some(6)));
    }

    #[test]
    fn test_chain_left_max() {
        let result = number()
            .chain_left(operator(), 0, Some(2))
            .parse(StrReader::new("9-3-2"));

        assert_eq!(result.remaining().offset(), 3);
        assert_eq!(result.value(), Some(Some(6)));

        let result = number()
            .chain_left(operator(), 0, Some(0))
            .parse(StrReader::new("9"));
        assert_eq!(result.remaining().offset(), 0);
        assert_eq!(result.value(), Some(None));
    }

    #[test]
    fn test_chain_left_max_below_min_is_raised() {
        let result = number()
            .chain_left(operator(), 2, Some(1))
            .parse(StrReader::new("9-3-2"));
        assert_eq!(result.remaining().offset(), 3);
        assert_eq!(result.value(), Some(Some(6)));

        let result = number()
            .chain_left(operator(), 1, Some(0))
            .parse(StrReader::new("9-3"));
        assert_eq!(result.remaining().offset(), 1);
        assert_eq!(result.value(), Some(Some(9)));
    }

    #[test]
    fn test_chain_left_long_chain() {
        let mut input = String::from("0");
        for _ in 0..20_000 {
            input.push_str("+1");
        }

        let result = number()
            .chain_left(operator(), 1, None)
            .parse(StrReader::new(input.as_str()));
        assert_eq!(result.value(), Some(Some(20_000)));
    }
}
