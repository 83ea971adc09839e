pub mod slice;
pub mod string;

pub use slice::{IndexLocation, SliceReader};
pub use string::{StrReader, TextLocation};
