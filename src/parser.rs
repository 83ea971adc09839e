use crate::reader::Reader;
use crate::result::ParseResult;
use crate::trampoline::Trampoline;
use std::sync::Arc;

/// Core parser trait for parser combinators
///
/// A parser is an immutable value: it can be run any number of times, from
/// any number of threads. Running it produces a [`Trampoline`] so that
/// combinators can chain parsers without growing the native call stack.
pub trait Parser: Send + Sync + 'static {
    type Input: Reader;
    type Output: 'static;

    /// Start parsing at `input`, returning the suspended computation
    ///
    /// Implementations must not invoke sub-parsers that run after another
    /// sub-parser directly; they chain them through the trampoline instead.
    fn step(&self, input: Self::Input) -> Trampoline<ParseResult<Self::Output, Self::Input>>;

    /// Parse from `input`, running all deferred steps to completion
    fn parse(&self, input: Self::Input) -> ParseResult<Self::Output, Self::Input> {
        self.step(input).run()
    }

    /// Parse from `input` and require that all of it is consumed
    fn parse_all(&self, input: Self::Input) -> ParseResult<Self::Output, Self::Input> {
        let result = self.parse(input);
        let result = match result {
            ParseResult::Success { ref remaining, .. } if !remaining.at_end() => {
                let remaining = remaining.clone();
                ParseResult::failure(end_of_input_message(&remaining), remaining)
            }
            other => other,
        };
        if !result.is_success() {
            log::debug!(
                "parse_all stopped at offset {}: {}",
                result.remaining().offset(),
                result.message().unwrap_or_default()
            );
        }
        result
    }
}

pub(crate) fn end_of_input_message<R: Reader>(remaining: &R) -> String {
    match remaining.first() {
        Some(element) => format!("expected end of input, found {:?}", element),
        None => "expected end of input".to_string(),
    }
}

/// Type-erased, shareable parser
pub type BoxedParser<T, R> = Arc<dyn Parser<Output = T, Input = R>>;

impl<P> Parser for Arc<P>
where
    P: Parser + ?Sized,
{
    type Input = P::Input;
    type Output = P::Output;

    fn step(&self, input: Self::Input) -> Trampoline<ParseResult<Self::Output, Self::Input>> {
        (**self).step(input)
    }
}

/// Extension trait to add .boxed() method support for parsers
pub trait BoxedExt: Parser + Sized {
    /// Erase the concrete type of this parser
    fn boxed(self) -> BoxedParser<Self::Output, Self::Input> {
        Arc::new(self)
    }
}

/// Implement BoxedExt for all parsers
impl<P> BoxedExt for P where P: Parser {}
