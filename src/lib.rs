//! # Trampar - Stack-Safe Parser Combinators
//!
//! A parser combinator library whose parsers never grow the native call stack
//! with the depth of the input. Every parser step returns a [`Trampoline`]:
//! either a finished result or a description of what to run next. A driver
//! loop evaluates it with a heap-allocated continuation stack, so grammars for
//! deeply nested input (tens of thousands of brackets) parse without overflow.
//!
//! - **Three outcomes**: success, recoverable failure, fatal error ([`ParseResult`])
//! - **Longest-progress alternation**: when all branches fail, the one that
//!   got furthest is reported
//! - **Composability**: small parsers combine into larger ones through extension traits
//! - **Shareable**: parsers are immutable and `Send + Sync`; readers are cheap to clone
//!
//! ```
//! use trampar::prelude::*;
//!
//! let number = digit().map(|ch: char| ch.to_digit(10).unwrap_or(0) as i64);
//! let subtract: fn(i64, i64) -> i64 = |a, b| a - b;
//! let expression = number.chain_left(character('-').map_const(subtract), 1, None);
//!
//! let result = expression.parse_all(StrReader::new("9-3-2"));
//! assert_eq!(result.value(), Some(Some(4)));
//! ```

pub mod chain;
pub mod commit;
pub mod elem;
pub mod error;
pub mod lazy;
pub mod lookahead;
pub mod map;
pub mod opt;
pub mod or;
pub mod parser;
pub mod phrase;
pub mod prelude;
pub mod primitives;
pub mod reader;
pub mod readers;
pub mod rep;
pub mod result;
pub mod seq;
pub mod sequence;
pub mod span;
pub mod text;
pub mod trampoline;

pub use error::ParseError;
pub use lazy::{Lazy, LazyParser, Recursive, RecursiveRef, lazy, recursive};
pub use parser::{BoxedParser, Parser};
pub use reader::{Location, Reader};
pub use readers::{IndexLocation, SliceReader, StrReader, TextLocation};
pub use result::ParseResult;
pub use sequence::{AnySequence, AnySequenceable, Sequenceable};
pub use span::{Span, Spanned, SpannedExt, spanned};
pub use trampoline::Trampoline;
