use super::parser::Parser;
use crate::result::ParseResult;
use crate::sequence::{AnySequenceable, Sequenceable};
use crate::trampoline::Trampoline;
use std::marker::PhantomData;
use std::sync::Arc;

/// How a sequence combines the outputs of its two parsers
pub trait Combine<A, B>: Send + Sync + 'static {
    type Output: 'static;

    fn combine(&self, first: A, second: B) -> Self::Output;
}

/// Both outputs as a pair
pub struct Pair;

/// Only the first output
pub struct KeepLeft;

/// Only the second output
pub struct KeepRight;

/// Add the second output to the end of the first, a [`Sequenceable`]
pub struct Append;

/// Add the first output to the front of the second, a [`Sequenceable`]
pub struct Prepend;

/// Join two [`Sequenceable`] outputs
pub struct Concat;

/// Start a new [`Sequenceable`] from two element outputs
pub struct Collect<S>(PhantomData<fn() -> S>);

/// Add any second output to the end of an [`AnySequenceable`]
pub struct AnyAppend;

/// Add any first output to the front of an [`AnySequenceable`]
pub struct AnyPrepend;

/// Join two [`AnySequenceable`] outputs
pub struct AnyConcat;

/// Extend a tuple output by one more element
pub struct Flatten;

/// Combine with a user-supplied function
pub struct With<F>(F);

impl<A: 'static, B: 'static> Combine<A, B> for Pair {
    type Output = (A, B);

    fn combine(&self, first: A, second: B) -> (A, B) {
        (first, second)
    }
}

impl<A: 'static, B> Combine<A, B> for KeepLeft {
    type Output = A;

    fn combine(&self, first: A, _: B) -> A {
        first
    }
}

impl<A, B: 'static> Combine<A, B> for KeepRight {
    type Output = B;

    fn combine(&self, _: A, second: B) -> B {
        second
    }
}

impl<S: Sequenceable> Combine<S, S::Element> for Append {
    type Output = S;

    fn combine(&self, first: S, second: S::Element) -> S {
        first.append(second)
    }
}

impl<S: Sequenceable> Combine<S::Element, S> for Prepend {
    type Output = S;

    fn combine(&self, first: S::Element, second: S) -> S {
        // Keep input order: the first output ends up in front
        second.prepend(first)
    }
}

impl<S: Sequenceable> Combine<S, S> for Concat {
    type Output = S;

    fn combine(&self, first: S, second: S) -> S {
        first.concat(second)
    }
}

impl<S: Sequenceable> Combine<S::Element, S::Element> for Collect<S> {
    type Output = S;

    fn combine(&self, first: S::Element, second: S::Element) -> S {
        S::empty().append(first).append(second)
    }
}

impl<S: AnySequenceable, B: 'static> Combine<S, B> for AnyAppend {
    type Output = S;

    fn combine(&self, first: S, second: B) -> S {
        first.append_any(second)
    }
}

impl<A: 'static, S: AnySequenceable> Combine<A, S> for AnyPrepend {
    type Output = S;

    fn combine(&self, first: A, second: S) -> S {
        second.prepend_any(first)
    }
}

impl<S: AnySequenceable> Combine<S, S> for AnyConcat {
    type Output = S;

    fn combine(&self, first: S, second: S) -> S {
        first.concat(second)
    }
}

impl<A, B, O, F> Combine<A, B> for With<F>
where
    F: Fn(A, B) -> O + Send + Sync + 'static,
    O: 'static,
{
    type Output = O;

    fn combine(&self, first: A, second: B) -> O {
        (self.0)(first, second)
    }
}

macro_rules! flatten_tuple {
    ($($name:ident),+) => {
        impl<$($name: 'static,)+ Z: 'static> Combine<($($name,)+), Z> for Flatten {
            type Output = ($($name,)+ Z);

            #[allow(non_snake_case)]
            fn combine(&self, ($($name,)+): ($($name,)+), last: Z) -> Self::Output {
                ($($name,)+ last)
            }
        }
    };
}

flatten_tuple!(A, B);
flatten_tuple!(A, B, C);
flatten_tuple!(A, B, C, D);
flatten_tuple!(A, B, C, D, E);
flatten_tuple!(A, B, C, D, E, F);

/// Parser combinator that runs two parsers one after the other
///
/// The second parser runs on the input left over by the first and only if
/// the first succeeded. The sequence succeeds if (and only if) both parsers
/// succeed; otherwise the first failure or error is returned unchanged.
pub struct Seq<P1, P2, C = Pair> {
    first: P1,
    second: Arc<P2>,
    combine: Arc<C>,
}

impl<P1, P2, C> Seq<P1, P2, C> {
    pub fn new(first: P1, second: P2, combine: C) -> Self {
        Seq {
            first,
            second: Arc::new(second),
            combine: Arc::new(combine),
        }
    }
}

impl<P1, P2, C> Parser for Seq<P1, P2, C>
where
    P1: Parser,
    P2: Parser<Input = P1::Input>,
    C: Combine<P1::Output, P2::Output>,
{
    type Input = P1::Input;
    type Output = C::Output;

    fn step(&self, input: Self::Input) -> Trampoline<ParseResult<C::Output, Self::Input>> {
        let second = Arc::clone(&self.second);
        let combine = Arc::clone(&self.combine);
        self.first.step(input).flat_map(move |result| {
            result.flat_map_with_next(move |first_value, remaining| {
                second
                    .step(remaining)
                    .map(move |result| result.map(|second_value| combine.combine(first_value, second_value)))
            })
        })
    }
}

/// Convenience function to create a Seq parser producing a pair
pub fn seq<P1, P2>(first: P1, second: P2) -> Seq<P1, P2, Pair>
where
    P1: Parser,
    P2: Parser<Input = P1::Input>,
{
    Seq::new(first, second, Pair)
}

/// Extension trait to add the sequencing methods to parsers
pub trait SeqExt: Parser + Sized {
    /// Both outputs as a pair
    fn seq<P>(self, next: P) -> Seq<Self, P, Pair>
    where
        P: Parser<Input = Self::Input>,
    {
        Seq::new(self, next, Pair)
    }

    /// Keep only the output of `next`
    fn seq_ignore_left<P>(self, next: P) -> Seq<Self, P, KeepRight>
    where
        P: Parser<Input = Self::Input>,
    {
        Seq::new(self, next, KeepRight)
    }

    /// Keep only the output of this parser
    fn seq_ignore_right<P>(self, next: P) -> Seq<Self, P, KeepLeft>
    where
        P: Parser<Input = Self::Input>,
    {
        Seq::new(self, next, KeepLeft)
    }

    /// Combine both outputs with `f`
    fn seq_with<P, F, O>(self, next: P, f: F) -> Seq<Self, P, With<F>>
    where
        P: Parser<Input = Self::Input>,
        F: Fn(Self::Output, P::Output) -> O + Send + Sync + 'static,
        O: 'static,
    {
        Seq::new(self, next, With(f))
    }

    /// Extend a tuple output, e.g. `(a, b)` then `c` gives `(a, b, c)`
    fn seq_flat<P>(self, next: P) -> Seq<Self, P, Flatten>
    where
        P: Parser<Input = Self::Input>,
        Flatten: Combine<Self::Output, P::Output>,
    {
        Seq::new(self, next, Flatten)
    }

    /// Append the element parsed by `next` to this parser's sequence
    fn seq_append<P>(self, next: P) -> Seq<Self, P, Append>
    where
        P: Parser<Input = Self::Input>,
        Self::Output: Sequenceable<Element = P::Output>,
    {
        Seq::new(self, next, Append)
    }

    /// Put this parser's element in front of the sequence parsed by `next`
    fn seq_prepend<P>(self, next: P) -> Seq<Self, P, Prepend>
    where
        P: Parser<Input = Self::Input>,
        P::Output: Sequenceable<Element = Self::Output>,
    {
        Seq::new(self, next, Prepend)
    }

    /// Join this parser's sequence with the one parsed by `next`
    fn seq_concat<P>(self, next: P) -> Seq<Self, P, Concat>
    where
        P: Parser<Input = Self::Input, Output = Self::Output>,
        Self::Output: Sequenceable,
    {
        Seq::new(self, next, Concat)
    }

    /// Start a sequence of type `S` from this parser's and `next`'s elements
    fn seq_collect<S, P>(self, next: P) -> Seq<Self, P, Collect<S>>
    where
        P: Parser<Input = Self::Input, Output = Self::Output>,
        S: Sequenceable<Element = Self::Output>,
    {
        Seq::new(self, next, Collect(PhantomData))
    }

    /// Append any value parsed by `next` to this parser's heterogeneous sequence
    fn seq_any<P>(self, next: P) -> Seq<Self, P, AnyAppend>
    where
        P: Parser<Input = Self::Input>,
        Self::Output: AnySequenceable,
    {
        Seq::new(self, next, AnyAppend)
    }

    /// Put this parser's value in front of the heterogeneous sequence parsed by `next`
    fn seq_any_prepend<P>(self, next: P) -> Seq<Self, P, AnyPrepend>
    where
        P: Parser<Input = Self::Input>,
        P::Output: AnySequenceable,
    {
        Seq::new(self, next, AnyPrepend)
    }

    /// Join this parser's heterogeneous sequence with the one parsed by `next`
    fn seq_any_concat<P>(self, next: P) -> Seq<Self, P, AnyConcat>
    where
        P: Parser<Input = Self::Input, Output = Self::Output>,
        Self::Output: AnySequenceable,
    {
        Seq::new(self, next, AnyConcat)
    }
}

/// Implement SeqExt for all parsers
impl<P> SeqExt for P where P: Parser {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::MapExt;
    use crate::primitives::{fatal, succeed};
    use crate::reader::Reader;
    use crate::readers::StrReader;
    use crate::rep::RepExt;
    use crate::sequence::AnySequence;
    use crate::text::character;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn chars<const N: usize>(chars: [char; N]) -> String {
        chars.iter().collect()
    }

    #[test]
    fn test_seq_both_succeed() {
        let parser = character('a').seq(character('b'));

        let result = parser.parse(StrReader::new("abc"));
        assert_eq!(result.remaining().first(), Some('c'));
        assert_eq!(result.value(), Some(('a', 'b')));
    }

    #[test]
    fn test_seq_failures() {
        let parser = character('a').seq(character('b'));

        assert!(parser.parse(StrReader::new("a")).is_failure());
        assert!(parser.parse(StrReader::new("b")).is_failure());

        let result = parser.parse(StrReader::new("ac"));
        assert_eq!(result.message(), Some("expected 'b', found 'c'"));
        assert_eq!(result.remaining().offset(), 1);
    }

    #[test]
    fn test_second_only_runs_after_first_succeeds() {
        static CALLS: AtomicUsize = AtomicUsize::new(0);
        let counted = succeed(()).map(|_| CALLS.fetch_add(1, Ordering::SeqCst));
        let parser = character('a').seq(counted);

        assert!(parser.parse(StrReader::new("x")).is_failure());
        assert_eq!(CALLS.load(Ordering::SeqCst), 0);

        assert!(parser.parse(StrReader::new("a")).is_success());
        assert_eq!(CALLS.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_seq_identity() {
        let reader = StrReader::new("xyz").rest();
        let parser = succeed(1).seq(succeed("b"));

        let result = parser.parse(reader);
        assert_eq!(result.remaining().offset(), 1);
        assert_eq!(result.value(), Some((1, "b")));
    }

    #[test]
    fn test_seq_error_propagates() {
        let parser = character('a').seq(fatal::<char, StrReader>("stop"));
        let result = parser.parse(StrReader::new("ab"));

        assert!(result.is_error());
        assert_eq!(result.remaining().offset(), 1);
    }

    #[test]
    fn test_seq_flat_tuples() {
        let parser = character('a')
            .seq(character('b'))
            .seq_flat(character('c'))
            .map(|(a, b, c)| chars([a, b, c]));

        assert_eq!(parser.parse(StrReader::new("abcd")).value(), Some("abc".to_string()));
        assert!(parser.parse(StrReader::new("ab")).is_failure());
        assert!(parser.parse(StrReader::new("cba")).is_failure());
    }

    #[test]
    fn test_seq_flat_seven_terms() {
        let parser = character('a')
            .seq(character('b'))
            .seq_flat(character('c'))
            .seq_flat(character('d'))
            .seq_flat(character('e'))
            .seq_flat(character('f'))
            .seq_flat(character('g'))
            .map(|(a, b, c, d, e, f, g)| chars([a, b, c, d, e, f, g]));

        let result = parser.parse(StrReader::new("abcdefgh"));
        assert_eq!(result.remaining().offset(), 7);
        assert_eq!(result.value(), Some("abcdefg".to_string()));

        assert!(parser.parse(StrReader::new("abcdef")).is_failure());
    }

    #[test]
    fn test_seq_ignore_left_and_right() {
        let left = character('a').seq_ignore_left(character('b'));
        let result = left.parse(StrReader::new("abc"));
        assert_eq!(result.remaining().offset(), 2);
        assert_eq!(result.value(), Some('b'));

        let right = character('a').seq_ignore_right(character('b'));
        let result = right.parse(StrReader::new("abc"));
        assert_eq!(result.remaining().offset(), 2);
        assert_eq!(result.value(), Some('a'));

        assert!(right.parse(StrReader::new("a")).is_failure());
        assert!(left.parse(StrReader::new("b")).is_failure());
    }

    #[test]
    fn test_seq_with() {
        let parser = character('1').seq_with(character('2'), |a, b| format!("{}+{}", a, b));
        assert_eq!(parser.parse(StrReader::new("12")).value(), Some("1+2".to_string()));
    }

    #[test]
    fn test_sequenceable_accumulation_stays_flat() {
        let parser = character('a')
            .seq_collect::<String, _>(character('b'))
            .seq_append(character('c'))
            .seq_append(character('d'));

        let result = parser.parse(StrReader::new("abcde"));
        assert_eq!(result.remaining().offset(), 4);
        assert_eq!(result.value(), Some("abcd".to_string()));
    }

    #[test]
    fn test_seq_prepend_keeps_order() {
        let parser = character('(').seq_prepend(character(' ').rep());

        let result = parser.parse(StrReader::new("(  )"));
        assert_eq!(result.value(), Some(vec!['(', ' ', ' ']));
    }

    #[test]
    fn test_seq_concat() {
        let parser = character('a')
            .rep()
            .seq_concat(character('b').rep())
            .map(|all: Vec<char>| all.into_iter().collect::<String>());

        assert_eq!(parser.parse(StrReader::new("aabbb")).value(), Some("aabbb".to_string()));
        assert_eq!(parser.parse(StrReader::new("b")).value(), Some("b".to_string()));
    }

    #[test]
    fn test_tuples_with_repetition() {
        let parser = character('(')
            .seq(character(' ').rep())
            .seq_flat(character(')'))
            .map(|(open, inner, close)| {
                let mut text = String::from(open);
                text.extend(inner);
                text.push(close);
                text
            });

        assert!(parser.parse(StrReader::new("")).is_failure());
        assert!(parser.parse(StrReader::new("ab")).is_failure());
        assert_eq!(parser.parse(StrReader::new("()")).value(), Some("()".to_string()));
        assert_eq!(parser.parse(StrReader::new("(  )")).value(), Some("(  )".to_string()));
    }

    #[test]
    fn test_any_sequence_accumulation() {
        let digit = character('7').map(|ch: char| ch.to_digit(10).unwrap());
        let parser = succeed(())
            .map(|_| AnySequence::default())
            .seq_any(character('x'))
            .seq_any(digit);
        let parser = character('!').seq_any_prepend(parser);

        let values = parser.parse(StrReader::new("!x7")).value().unwrap();
        assert_eq!(values.len(), 3);
        assert_eq!(values.get::<char>(0), Some(&'!'));
        assert_eq!(values.get::<char>(1), Some(&'x'));
        assert_eq!(values.get::<u32>(2), Some(&7));
    }

    #[test]
    fn test_any_sequence_concatenation() {
        fn tagged(ch: char) -> impl Parser<Input = StrReader, Output = AnySequence> {
            character(ch).map(|ch: char| AnySequence::default().append_any(ch).append_any(ch as u32))
        }
        let parser = tagged('a').seq_any_concat(tagged('b'));

        let values = parser.parse(StrReader::new("ab")).value().unwrap();
        assert_eq!(values.len(), 4);
        assert_eq!(values.get::<char>(0), Some(&'a'));
        assert_eq!(values.get::<u32>(1), Some(&97));
        assert_eq!(values.get::<char>(2), Some(&'b'));
        assert_eq!(values.get::<u32>(3), Some(&98));

        assert!(parser.parse(StrReader::new("aa")).is_failure());
    }

    #[test]
    fn test_function_syntax() {
        let result = seq(character('x'), character('y')).parse(StrReader::new("xy"));
        assert!(result.remaining().at_end());
        assert_eq!(result.value(), Some(('x', 'y')));
    }
}
