use std::fmt;

/// Generic input cursor consumed by parsers
///
/// A reader is an immutable position in a sequence of elements. Advancing
/// produces a new reader and leaves the old one valid, which is what lets
/// alternatives backtrack by simply reusing an earlier reader.
pub trait Reader: Clone + 'static {
    /// The type of elements this reader yields
    type Element: Clone + fmt::Debug + 'static;

    /// Human-readable description of the reader's position
    type Location: Location;

    /// Get the element at the current position, or `None` at end of input
    fn first(&self) -> Option<Self::Element>;

    /// Advance past the current element
    ///
    /// At end of input this returns a reader still positioned at the end
    fn rest(&self) -> Self;

    /// Progress measure used to compare how far alternatives got
    ///
    /// Offsets never decrease as input is consumed and are comparable between
    /// readers derived from the same original input.
    fn offset(&self) -> usize;

    /// Describe the current position for diagnostics
    fn location(&self) -> Self::Location;

    /// Read the current element together with the reader positioned after it
    fn read(&self) -> Option<(Self::Element, Self)> {
        self.first().map(|element| (element, self.rest()))
    }

    /// Check if the reader is at the end of input
    fn at_end(&self) -> bool {
        self.first().is_none()
    }
}

/// Position descriptor produced by a [`Reader`]
///
/// `Display` gives the short form used inline in messages; the long
/// description may span several lines, e.g. quoting the surrounding input.
pub trait Location: fmt::Display + fmt::Debug + Clone + 'static {
    fn long_description(&self) -> String {
        self.to_string()
    }
}
