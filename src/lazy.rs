use crate::parser::{BoxedExt, BoxedParser, Parser};
use crate::reader::Reader;
use crate::result::ParseResult;
use crate::trampoline::Trampoline;
use once_cell::sync::Lazy as OnceLazy;
use std::marker::PhantomData;
use std::sync::{Arc, Weak};

type Factory<V> = Box<dyn FnOnce() -> V + Send>;

/// A value computed on first use and cached afterwards
///
/// The first access runs the factory exactly once, even when several threads
/// race for it; every later access returns the cached value.
pub struct Lazy<V> {
    cell: OnceLazy<V, Factory<V>>,
}

impl<V: 'static> Lazy<V> {
    pub fn new<F>(factory: F) -> Self
    where
        F: FnOnce() -> V + Send + 'static,
    {
        let factory: Factory<V> = Box::new(move || {
            let value = factory();
            log::trace!("lazy value constructed");
            value
        });
        Lazy {
            cell: OnceLazy::new(factory),
        }
    }

    /// The value, running the factory if this is the first access
    pub fn force(&self) -> &V {
        OnceLazy::force(&self.cell)
    }

    pub fn is_evaluated(&self) -> bool {
        OnceLazy::get(&self.cell).is_some()
    }
}

/// A parser that defers the construction of the actual parser until parse time.
/// This is useful for breaking mutual recursion between parsers.
///
/// The parser is built on first use and reused by every later parse.
pub struct LazyParser<P> {
    parser: Lazy<P>,
}

impl<P> LazyParser<P>
where
    P: Parser,
{
    /// Create a new lazy parser with the given factory function
    pub fn new<F>(factory: F) -> Self
    where
        F: FnOnce() -> P + Send + 'static,
    {
        LazyParser {
            parser: Lazy::new(factory),
        }
    }

    /// Returns true once the parser has been built
    pub fn is_built(&self) -> bool {
        self.parser.is_evaluated()
    }
}

impl<P> Parser for LazyParser<P>
where
    P: Parser,
{
    type Input = P::Input;
    type Output = P::Output;

    fn step(&self, input: Self::Input) -> Trampoline<ParseResult<Self::Output, Self::Input>> {
        self.parser.force().step(input)
    }
}

/// Create a lazy parser from a factory function
pub fn lazy<F, P>(factory: F) -> LazyParser<P>
where
    F: FnOnce() -> P + Send + 'static,
    P: Parser,
{
    LazyParser::new(factory)
}

struct RecursiveCell<T, R> {
    parser: Lazy<BoxedParser<T, R>>,
}

impl<T, R> Recursive<T, R>
where
    T: 'static,
    R: Reader,
{
    /// Returns true once the definition has been built
    pub fn is_built(&self) -> bool {
        self.cell.parser.is_evaluated()
    }
}

/// A self-referential parser created by [`recursive`]
pub struct Recursive<T, R> {
    cell: Arc<RecursiveCell<T, R>>,
}

impl<T, R> Parser for Recursive<T, R>
where
    T: 'static,
    R: Reader,
{
    type Input = R;
    type Output = T;

    fn step(&self, input: R) -> Trampoline<ParseResult<T, R>> {
        self.cell.parser.force().step(input)
    }
}

/// Handle to a [`Recursive`] parser from inside its own definition
///
/// Holds a weak reference, so a grammar referring to itself does not keep
/// itself alive. Parsing through a handle whose parser has been dropped gives
/// a fatal error.
pub struct RecursiveRef<T, R> {
    cell: Weak<RecursiveCell<T, R>>,
    _output: PhantomData<fn() -> (T, R)>,
}

impl<T, R> Clone for RecursiveRef<T, R> {
    fn clone(&self) -> Self {
        RecursiveRef {
            cell: Weak::clone(&self.cell),
            _output: PhantomData,
        }
    }
}

impl<T, R> Parser for RecursiveRef<T, R>
where
    T: 'static,
    R: Reader,
{
    type Input = R;
    type Output = T;

    fn step(&self, input: R) -> Trampoline<ParseResult<T, R>> {
        let cell = Weak::clone(&self.cell);
        // Deferred so that arbitrarily deep self reference never nests native calls
        Trampoline::more(move || match cell.upgrade() {
            Some(cell) => cell.parser.force().step(input),
            None => {
                log::warn!(
                    "recursive parser reference used at offset {} after its parser was dropped",
                    input.offset()
                );
                Trampoline::done(ParseResult::error(
                    "recursive parser is no longer alive",
                    input,
                ))
            }
        })
    }
}

/// Define a parser that refers to itself
///
/// `builder` receives a handle to the parser being defined and returns its
/// definition. The handle may be used anywhere inside the definition; it is
/// only followed while parsing. `builder` runs once, on first use.
pub fn recursive<T, R, P, F>(builder: F) -> Recursive<T, R>
where
    T: 'static,
    R: Reader,
    P: Parser<Input = R, Output = T>,
    F: FnOnce(RecursiveRef<T, R>) -> P + Send + 'static,
{
    let cell = Arc::new_cyclic(|weak: &Weak<RecursiveCell<T, R>>| {
        let handle = RecursiveRef {
            cell: Weak::clone(weak),
            _output: PhantomData,
        };
        RecursiveCell {
            parser: Lazy::new(move || builder(handle).boxed()),
        }
    });
    Recursive { cell }
}
