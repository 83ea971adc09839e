use crate::reader::{Location, Reader};
use std::fmt;
use std::sync::Arc;

/// Reader over a shared slice of elements, e.g. tokens produced by a lexer
#[derive(Debug)]
pub struct SliceReader<T> {
    data: Arc<[T]>,
    index: usize,
}

// Manual impl: cloning the reader never clones the elements
impl<T> Clone for SliceReader<T> {
    fn clone(&self) -> Self {
        SliceReader {
            data: Arc::clone(&self.data),
            index: self.index,
        }
    }
}

impl<T> SliceReader<T> {
    pub fn new(data: impl Into<Arc<[T]>>) -> Self {
        SliceReader {
            data: data.into(),
            index: 0,
        }
    }

    /// The elements not yet consumed
    pub fn remaining(&self) -> &[T] {
        &self.data[self.index..]
    }
}

impl<T> Reader for SliceReader<T>
where
    T: Clone + fmt::Debug + 'static,
{
    type Element = T;
    type Location = IndexLocation;

    fn first(&self) -> Option<T> {
        self.data.get(self.index).cloned()
    }

    fn rest(&self) -> Self {
        SliceReader {
            data: Arc::clone(&self.data),
            index: (self.index + 1).min(self.data.len()),
        }
    }

    fn offset(&self) -> usize {
        self.index
    }

    fn location(&self) -> IndexLocation {
        IndexLocation {
            index: self.index,
            len: self.data.len(),
        }
    }
}

/// Element index within a slice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexLocation {
    pub index: usize,
    pub len: usize,
}

impl fmt::Display for IndexLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index)
    }
}

impl Location for IndexLocation {
    fn long_description(&self) -> String {
        if self.index >= self.len {
            format!("at end of input ({} elements)", self.len)
        } else {
            format!("at element {} of {}", self.index, self.len)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    enum Token {
        Number(i64),
        Plus,
    }

    #[test]
    fn test_token_stream() {
        let reader = SliceReader::new(vec![Token::Number(1), Token::Plus, Token::Number(2)]);

        let (first, reader) = reader.read().unwrap();
        assert_eq!(first, Token::Number(1));
        assert_eq!(reader.first(), Some(Token::Plus));
        assert_eq!(reader.offset(), 1);
        assert_eq!(reader.remaining().len(), 2);
    }

    #[test]
    fn test_end_of_input() {
        let reader = SliceReader::new(vec![1u8]);
        let reader = reader.rest();

        assert!(reader.at_end());
        assert_eq!(reader.rest().offset(), 1);
        assert_eq!(reader.location().long_description(), "at end of input (1 elements)");
    }

    #[test]
    fn test_location() {
        let reader = SliceReader::new(vec![1u8, 2, 3]).rest();
        let location = reader.location();

        assert_eq!(location.to_string(), "1");
        assert_eq!(location.long_description(), "at element 1 of 3");
    }
}
