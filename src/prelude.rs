//! Everything needed to write a grammar, for glob import

pub use crate::chain::{ChainExt, chain_left};
pub use crate::commit::{CommitExt, commit};
pub use crate::elem::{any_elem, elem, elem_if, end_of_input};
pub use crate::lazy::{Recursive, RecursiveRef, lazy, recursive};
pub use crate::lookahead::{LookaheadExt, guard, not};
pub use crate::map::MapExt;
pub use crate::opt::{OptExt, opt};
pub use crate::or::{OrExt, or};
pub use crate::parser::{BoxedExt, BoxedParser, Parser};
pub use crate::phrase::{PhraseExt, phrase};
pub use crate::primitives::{fail, fatal, succeed};
pub use crate::reader::{Location, Reader};
pub use crate::readers::{SliceReader, StrReader};
pub use crate::rep::{RepExt, rep};
pub use crate::result::ParseResult;
pub use crate::seq::{SeqExt, seq};
pub use crate::sequence::{AnySequence, AnySequenceable, Sequenceable};
pub use crate::span::{Span, SpannedExt};
pub use crate::text::{character, digit, letter, literal, whitespace};
