use super::parser::Parser;
use crate::result::ParseResult;
use crate::trampoline::Trampoline;
use std::sync::Arc;

/// Parser combinator that transforms the output of a parser using a mapping function
pub struct Map<P, F> {
    parser: P,
    mapper: Arc<F>,
}

impl<P, F> Map<P, F> {
    pub fn new(parser: P, mapper: F) -> Self {
        Map {
            parser,
            mapper: Arc::new(mapper),
        }
    }
}

impl<P, F, U> Parser for Map<P, F>
where
    P: Parser,
    F: Fn(P::Output) -> U + Send + Sync + 'static,
    U: 'static,
{
    type Input = P::Input;
    type Output = U;

    fn step(&self, input: Self::Input) -> Trampoline<ParseResult<U, Self::Input>> {
        let mapper = Arc::clone(&self.mapper);
        self.parser
            .step(input)
            .map(move |result| result.map(|value| mapper(value)))
    }
}

/// Convenience function to create a Map parser
pub fn map<P, F, U>(parser: P, mapper: F) -> Map<P, F>
where
    P: Parser,
    F: Fn(P::Output) -> U + Send + Sync + 'static,
{
    Map::new(parser, mapper)
}

/// Parser combinator that replaces a successful output with a fixed value
pub struct MapConst<P, T> {
    parser: P,
    value: Arc<T>,
}

impl<P, T> Parser for MapConst<P, T>
where
    P: Parser,
    T: Clone + Send + Sync + 'static,
{
    type Input = P::Input;
    type Output = T;

    fn step(&self, input: Self::Input) -> Trampoline<ParseResult<T, Self::Input>> {
        let value = Arc::clone(&self.value);
        self.parser
            .step(input)
            .map(move |result| result.map(|_| T::clone(&value)))
    }
}

/// Monadic bind: the output of one parser chooses the parser that runs next
///
/// The chosen parser runs on the input left over by the first one. If the
/// first parser does not succeed, `f` is never called.
pub struct FlatMap<P, F> {
    parser: P,
    f: Arc<F>,
}

impl<P, F, Q> Parser for FlatMap<P, F>
where
    P: Parser,
    F: Fn(P::Output) -> Q + Send + Sync + 'static,
    Q: Parser<Input = P::Input>,
{
    type Input = P::Input;
    type Output = Q::Output;

    fn step(&self, input: Self::Input) -> Trampoline<ParseResult<Q::Output, Self::Input>> {
        let f = Arc::clone(&self.f);
        self.parser.step(input).flat_map(move |result| {
            result.flat_map_with_next(|value, remaining| f(value).step(remaining))
        })
    }
}

/// Extension trait to add .map(), .map_const() and .flat_map() method support for parsers
pub trait MapExt: Parser + Sized {
    fn map<F, U>(self, mapper: F) -> Map<Self, F>
    where
        F: Fn(Self::Output) -> U + Send + Sync + 'static,
    {
        Map::new(self, mapper)
    }

    fn map_const<T>(self, value: T) -> MapConst<Self, T>
    where
        T: Clone + Send + Sync + 'static,
    {
        MapConst {
            parser: self,
            value: Arc::new(value),
        }
    }

    fn flat_map<F, Q>(self, f: F) -> FlatMap<Self, F>
    where
        F: Fn(Self::Output) -> Q + Send + Sync + 'static,
        Q: Parser<Input = Self::Input>,
    {
        FlatMap {
            parser: self,
            f: Arc::new(f),
        }
    }
}

/// Implement MapExt for all parsers
impl<P> MapExt for P where P: Parser {}
