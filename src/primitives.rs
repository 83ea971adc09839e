use crate::parser::Parser;
use crate::reader::Reader;
use crate::result::ParseResult;
use crate::trampoline::Trampoline;
use std::borrow::Cow;
use std::marker::PhantomData;

/// Parser that always succeeds with a copy of `value` without consuming input
pub struct Succeed<T, R> {
    value: T,
    _reader: PhantomData<fn() -> R>,
}

impl<T, R> Parser for Succeed<T, R>
where
    T: Clone + Send + Sync + 'static,
    R: Reader,
{
    type Input = R;
    type Output = T;

    fn step(&self, input: R) -> Trampoline<ParseResult<T, R>> {
        Trampoline::done(ParseResult::success(self.value.clone(), input))
    }
}

/// Convenience function to create a Succeed parser
pub fn succeed<T, R>(value: T) -> Succeed<T, R>
where
    T: Clone + Send + Sync + 'static,
    R: Reader,
{
    Succeed {
        value,
        _reader: PhantomData,
    }
}

/// Parser that always fails recoverably with `message`
pub struct Fail<T, R> {
    message: Cow<'static, str>,
    _marker: PhantomData<fn() -> (T, R)>,
}

impl<T: 'static, R: Reader> Parser for Fail<T, R> {
    type Input = R;
    type Output = T;

    fn step(&self, input: R) -> Trampoline<ParseResult<T, R>> {
        Trampoline::done(ParseResult::failure(self.message.as_ref(), input))
    }
}

/// Convenience function to create a Fail parser
pub fn fail<T: 'static, R: Reader>(message: impl Into<Cow<'static, str>>) -> Fail<T, R> {
    Fail {
        message: message.into(),
        _marker: PhantomData,
    }
}

/// Parser that always stops with a fatal error carrying `message`
pub struct Fatal<T, R> {
    message: Cow<'static, str>,
    _marker: PhantomData<fn() -> (T, R)>,
}

impl<T: 'static, R: Reader> Parser for Fatal<T, R> {
    type Input = R;
    type Output = T;

    fn step(&self, input: R) -> Trampoline<ParseResult<T, R>> {
        Trampoline::done(ParseResult::error(self.message.as_ref(), input))
    }
}

/// Convenience function to create a Fatal parser
pub fn fatal<T: 'static, R: Reader>(message: impl Into<Cow<'static, str>>) -> Fatal<T, R> {
    Fatal {
        message: message.into(),
        _marker: PhantomData,
    }
}
