//! Parsers for readers over characters

use crate::elem::{Elem, ElemIf};
use crate::parser::Parser;
use crate::reader::Reader;
use crate::result::ParseResult;
use crate::trampoline::Trampoline;
use std::borrow::Cow;
use std::marker::PhantomData;

/// Parser matching one specific character
pub fn character<R>(expected: char) -> Elem<char, R>
where
    R: Reader<Element = char>,
{
    Elem::new(expected)
}

/// Parser matching one ASCII digit
pub fn digit<R>() -> ElemIf<fn(&char) -> bool, R>
where
    R: Reader<Element = char>,
{
    ElemIf::new(char::is_ascii_digit as fn(&char) -> bool, "digit")
}

/// Parser matching one alphabetic character
pub fn letter<R>() -> ElemIf<fn(&char) -> bool, R>
where
    R: Reader<Element = char>,
{
    ElemIf::new((|ch: &char| ch.is_alphabetic()) as fn(&char) -> bool, "letter")
}

/// Parser matching one whitespace character
pub fn whitespace<R>() -> ElemIf<fn(&char) -> bool, R>
where
    R: Reader<Element = char>,
{
    ElemIf::new((|ch: &char| ch.is_whitespace()) as fn(&char) -> bool, "whitespace")
}

/// Parser that matches an exact string character by character
///
/// On a mismatch the failure is reported at the first character that did
/// not match, so alternatives sharing a prefix compare by how far they got.
pub struct Literal<R> {
    expected: Cow<'static, str>,
    _reader: PhantomData<fn() -> R>,
}

impl<R> Literal<R> {
    pub fn new(expected: impl Into<Cow<'static, str>>) -> Self {
        Literal {
            expected: expected.into(),
            _reader: PhantomData,
        }
    }
}

impl<R> Parser for Literal<R>
where
    R: Reader<Element = char>,
{
    type Input = R;
    type Output = Cow<'static, str>;

    fn step(&self, input: R) -> Trampoline<ParseResult<Cow<'static, str>, R>> {
        let mut current = input;

        for expected_char in self.expected.chars() {
            match current.read() {
                Some((found, next)) if found == expected_char => current = next,
                Some((found, _)) => {
                    return Trampoline::done(ParseResult::failure(
                        format!(
                            "expected '{}', found '{}' while matching '{}'",
                            expected_char, found, self.expected
                        ),
                        current,
                    ));
                }
                None => {
                    return Trampoline::done(ParseResult::failure(
                        format!(
                            "expected '{}', but reached end of input while matching '{}'",
                            expected_char, self.expected
                        ),
                        current,
                    ));
                }
            }
        }

        // Clone is cheap here - just copies the reference for &'static str
        Trampoline::done(ParseResult::success(self.expected.clone(), current))
    }
}

/// Convenience function to create a Literal parser
pub fn literal<R>(expected: impl Into<Cow<'static, str>>) -> Literal<R>
where
    R: Reader<Element = char>,
{
    Literal::new(expected)
}
