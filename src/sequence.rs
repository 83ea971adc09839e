//! Values that can be built up one element at a time
//!
//! Sequencing combinators use these traits to accumulate into a flat
//! collection instead of nesting pairs when many element parsers are chained.

use std::any::Any;
use std::collections::VecDeque;
use std::fmt;

/// A collection of `Element`s that can be extended on either end
pub trait Sequenceable: Sized + 'static {
    type Element: 'static;

    /// The identity value: a sequence with no elements
    fn empty() -> Self;

    /// Add `element` after the existing elements
    fn append(self, element: Self::Element) -> Self;

    /// Add `element` before the existing elements
    fn prepend(self, element: Self::Element) -> Self;

    /// All elements of `self` followed by all elements of `other`
    fn concat(self, other: Self) -> Self;
}

impl<T: 'static> Sequenceable for Vec<T> {
    type Element = T;

    fn empty() -> Self {
        Vec::new()
    }

    fn append(mut self, element: T) -> Self {
        self.push(element);
        self
    }

    fn prepend(mut self, element: T) -> Self {
        self.insert(0, element);
        self
    }

    fn concat(mut self, other: Self) -> Self {
        self.extend(other);
        self
    }
}

impl<T: 'static> Sequenceable for VecDeque<T> {
    type Element = T;

    fn empty() -> Self {
        VecDeque::new()
    }

    fn append(mut self, element: T) -> Self {
        self.push_back(element);
        self
    }

    fn prepend(mut self, element: T) -> Self {
        self.push_front(element);
        self
    }

    fn concat(mut self, other: Self) -> Self {
        self.extend(other);
        self
    }
}

impl Sequenceable for String {
    type Element = char;

    fn empty() -> Self {
        String::new()
    }

    fn append(mut self, element: char) -> Self {
        self.push(element);
        self
    }

    fn prepend(mut self, element: char) -> Self {
        self.insert(0, element);
        self
    }

    fn concat(mut self, other: Self) -> Self {
        self.push_str(&other);
        self
    }
}

/// A sequence accepting values of any type
pub trait AnySequenceable: Sized + 'static {
    fn empty() -> Self;

    fn append_any<V: 'static>(self, value: V) -> Self;

    fn prepend_any<V: 'static>(self, value: V) -> Self;

    fn concat(self, other: Self) -> Self;
}

/// Heterogeneous sequence of boxed values
#[derive(Default)]
pub struct AnySequence {
    values: VecDeque<Box<dyn Any>>,
}

impl AnySequence {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The value at `index`, if it exists and has type `V`
    pub fn get<V: 'static>(&self, index: usize) -> Option<&V> {
        self.values.get(index)?.downcast_ref::<V>()
    }
}

impl fmt::Debug for AnySequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnySequence")
            .field("len", &self.values.len())
            .finish()
    }
}

impl AnySequenceable for AnySequence {
    fn empty() -> Self {
        AnySequence::default()
    }

    fn append_any<V: 'static>(mut self, value: V) -> Self {
        self.values.push_back(Box::new(value));
        self
    }

    fn prepend_any<V: 'static>(mut self, value: V) -> Self {
        self.values.push_front(Box::new(value));
        self
    }

    fn concat(mut self, other: Self) -> Self {
        self.values.extend(other.values);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec_sequence() {
        let values = Vec::empty().append(2).prepend(1).append(3);
        assert_eq!(values, vec![1, 2, 3]);
        assert_eq!(Sequenceable::concat(values, vec![4]), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_string_sequence() {
        let text = String::empty().append('b').prepend('a');
        assert_eq!(Sequenceable::concat(text, "cd".to_string()), "abcd");
    }

    #[test]
    fn test_deque_sequence() {
        let values = VecDeque::empty().append('y').prepend('x');
        assert_eq!(values, VecDeque::from(vec!['x', 'y']));
    }

    #[test]
    fn test_any_sequence() {
        let values = AnySequence::empty()
            .append_any(1u8)
            .append_any("two")
            .prepend_any('0');

        assert_eq!(values.len(), 3);
        assert_eq!(values.get::<char>(0), Some(&'0'));
        assert_eq!(values.get::<u8>(1), Some(&1));
        assert_eq!(values.get::<&str>(2), Some(&"two"));
        assert_eq!(values.get::<u8>(2), None);
        assert_eq!(values.get::<u8>(3), None);
    }
}
