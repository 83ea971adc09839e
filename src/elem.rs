use crate::parser::{Parser, end_of_input_message};
use crate::reader::Reader;
use crate::result::ParseResult;
use crate::trampoline::Trampoline;
use std::borrow::Cow;
use std::fmt;
use std::marker::PhantomData;

/// Parser that consumes and returns a single element
pub struct AnyElem<R> {
    _reader: PhantomData<fn() -> R>,
}

impl<R> AnyElem<R> {
    pub fn new() -> Self {
        AnyElem {
            _reader: PhantomData,
        }
    }
}

impl<R> Default for AnyElem<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Reader> Parser for AnyElem<R> {
    type Input = R;
    type Output = R::Element;

    fn step(&self, input: R) -> Trampoline<ParseResult<R::Element, R>> {
        Trampoline::done(match input.read() {
            Some((element, rest)) => ParseResult::success(element, rest),
            None => ParseResult::failure("unexpected end of input", input),
        })
    }
}

/// Convenience function to create an AnyElem parser
pub fn any_elem<R: Reader>() -> AnyElem<R> {
    AnyElem::new()
}

/// Parser that matches a specific element
pub struct Elem<E, R> {
    expected: E,
    _reader: PhantomData<fn() -> R>,
}

impl<E, R> Elem<E, R> {
    pub fn new(expected: E) -> Self {
        Elem {
            expected,
            _reader: PhantomData,
        }
    }
}

impl<E, R> Parser for Elem<E, R>
where
    R: Reader<Element = E>,
    E: PartialEq + fmt::Debug + Send + Sync + 'static,
{
    type Input = R;
    type Output = E;

    fn step(&self, input: R) -> Trampoline<ParseResult<E, R>> {
        Trampoline::done(match input.read() {
            Some((element, rest)) if element == self.expected => {
                ParseResult::success(element, rest)
            }
            Some((element, _)) => ParseResult::failure(
                format!("expected {:?}, found {:?}", self.expected, element),
                input,
            ),
            None => ParseResult::failure(
                format!("expected {:?}, but reached end of input", self.expected),
                input,
            ),
        })
    }
}

/// Convenience function to create an Elem parser
pub fn elem<E, R>(expected: E) -> Elem<E, R>
where
    R: Reader<Element = E>,
    E: PartialEq + fmt::Debug + Send + Sync + 'static,
{
    Elem::new(expected)
}

/// Parser that accepts one element satisfying a predicate
///
/// `expected` names what the predicate accepts and is used in the failure
/// message, e.g. `"digit"`.
pub struct ElemIf<F, R> {
    predicate: F,
    expected: Cow<'static, str>,
    _reader: PhantomData<fn() -> R>,
}

impl<F, R> ElemIf<F, R> {
    pub fn new(predicate: F, expected: impl Into<Cow<'static, str>>) -> Self {
        ElemIf {
            predicate,
            expected: expected.into(),
            _reader: PhantomData,
        }
    }
}

impl<F, R> Parser for ElemIf<F, R>
where
    R: Reader,
    F: Fn(&R::Element) -> bool + Send + Sync + 'static,
{
    type Input = R;
    type Output = R::Element;

    fn step(&self, input: R) -> Trampoline<ParseResult<R::Element, R>> {
        Trampoline::done(match input.read() {
            Some((element, rest)) if (self.predicate)(&element) => {
                ParseResult::success(element, rest)
            }
            Some((element, _)) => ParseResult::failure(
                format!("expected {}, found {:?}", self.expected, element),
                input,
            ),
            None => ParseResult::failure(
                format!("expected {}, but reached end of input", self.expected),
                input,
            ),
        })
    }
}

/// Convenience function to create an ElemIf parser
pub fn elem_if<F, R>(predicate: F, expected: impl Into<Cow<'static, str>>) -> ElemIf<F, R>
where
    R: Reader,
    F: Fn(&R::Element) -> bool + Send + Sync + 'static,
{
    ElemIf::new(predicate, expected)
}

/// Parser that succeeds with `()` only when no input is left
pub struct EndOfInput<R> {
    _reader: PhantomData<fn() -> R>,
}

impl<R: Reader> Parser for EndOfInput<R> {
    type Input = R;
    type Output = ();

    fn step(&self, input: R) -> Trampoline<ParseResult<(), R>> {
        Trampoline::done(if input.at_end() {
            ParseResult::success((), input)
        } else {
            ParseResult::failure(end_of_input_message(&input), input)
        })
    }
}

/// Convenience function to create an EndOfInput parser
pub fn end_of_input<R: Reader>() -> EndOfInput<R> {
    EndOfInput {
        _reader: PhantomData,
    }
}
