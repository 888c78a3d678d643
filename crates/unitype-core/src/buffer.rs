//! Buffer coordinates, edit events and the text buffer abstraction the
//! abbreviator drives.

use crate::error::Result;
use std::fmt;

/// Identity of an open buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BufferId(pub u64);

impl fmt::Display for BufferId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A (line, column) location. Columns count characters, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// Move along the same line, clamping at column zero.
    pub fn translate(self, columns: isize) -> Self {
        let column = (self.column as isize + columns).max(0) as usize;
        Self {
            line: self.line,
            column,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Half-open span `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

impl Range {
    /// Build a range, swapping the ends if they are given backwards.
    pub fn new(start: Position, end: Position) -> Self {
        if end < start {
            Self {
                start: end,
                end: start,
            }
        } else {
            Self { start, end }
        }
    }

    /// Empty range at `position`.
    pub fn caret(position: Position) -> Self {
        Self {
            start: position,
            end: position,
        }
    }

    /// Range covering `columns` characters starting at `start`.
    pub fn at(start: Position, columns: usize) -> Self {
        Self::new(start, start.translate(columns as isize))
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn is_single_line(&self) -> bool {
        self.start.line == self.end.line
    }

    /// Width in columns. Only meaningful for single-line ranges.
    pub fn len(&self) -> usize {
        self.end.column.saturating_sub(self.start.column)
    }

    /// Inclusive of both ends, so a caret sitting right after the last
    /// character is still inside.
    pub fn contains_position(&self, position: Position) -> bool {
        self.start <= position && position <= self.end
    }

    pub fn contains_range(&self, other: &Range) -> bool {
        self.contains_position(other.start) && self.contains_position(other.end)
    }

    pub fn overlaps(&self, other: &Range) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Shift both ends along their line.
    pub fn translate(self, columns: isize) -> Self {
        Self {
            start: self.start.translate(columns),
            end: self.end.translate(columns),
        }
    }

    /// Same start, end moved by `columns`.
    pub fn extend(self, columns: isize) -> Self {
        Self::new(self.start, self.end.translate(columns))
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

/// A single contiguous edit: `range` (in pre-edit coordinates, spanning
/// `range_length` removed characters) was replaced by `text`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentChange {
    pub range: Range,
    pub range_length: usize,
    pub text: String,
}

impl ContentChange {
    pub fn new(range: Range, range_length: usize, text: impl Into<String>) -> Self {
        Self {
            range,
            range_length,
            text: text.into(),
        }
    }

    /// Plain insertion at `position`.
    pub fn insert(position: Position, text: impl Into<String>) -> Self {
        Self::new(Range::caret(position), 0, text)
    }

    /// Net change in character count.
    pub fn delta(&self) -> isize {
        self.text.chars().count() as isize - self.range_length as isize
    }
}

/// Document-changed event. An empty change list carries no edit (the host
/// fires those when saving).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentChange {
    pub buffer: BufferId,
    pub changes: Vec<ContentChange>,
}

impl DocumentChange {
    pub fn new(buffer: BufferId, changes: Vec<ContentChange>) -> Self {
        Self { buffer, changes }
    }

    pub fn single(buffer: BufferId, change: ContentChange) -> Self {
        Self::new(buffer, vec![change])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub anchor: Position,
    pub active: Position,
}

impl Selection {
    pub fn new(anchor: Position, active: Position) -> Self {
        Self { anchor, active }
    }

    pub fn caret(position: Position) -> Self {
        Self::new(position, position)
    }

    pub fn is_caret(&self) -> bool {
        self.anchor == self.active
    }
}

/// Selection-changed event carrying every selection of the buffer; the first
/// one is primary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionChange {
    pub buffer: BufferId,
    pub selections: Vec<Selection>,
}

impl SelectionChange {
    pub fn new(buffer: BufferId, selections: Vec<Selection>) -> Self {
        Self { buffer, selections }
    }

    pub fn caret(buffer: BufferId, position: Position) -> Self {
        Self::new(buffer, vec![Selection::caret(position)])
    }
}

/// What the abbreviator needs from an editor buffer.
pub trait TextBuffer {
    fn id(&self) -> BufferId;

    /// Language of the document, matched against the abbreviator's filter.
    fn language_id(&self) -> &str {
        "plaintext"
    }

    /// Text currently spanned by `range`; parts outside the buffer read as
    /// nothing.
    fn text_in(&self, range: Range) -> String;

    /// Replace `range` with `text` as one atomic edit.
    fn replace(&mut self, range: Range, text: &str) -> Result<()>;

    fn caret(&self) -> Position;

    fn set_caret(&mut self, position: Position);

    /// Purely cosmetic marking of the tracked range.
    fn set_decoration(&mut self, range: Option<Range>);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(line: usize, column: usize) -> Position {
        Position::new(line, column)
    }

    #[test]
    fn contains_is_inclusive_of_end() {
        let range = Range::new(pos(0, 2), pos(0, 5));
        assert!(range.contains_position(pos(0, 2)));
        assert!(range.contains_position(pos(0, 5)));
        assert!(!range.contains_position(pos(0, 6)));
        assert!(!range.contains_position(pos(1, 3)));
        assert!(range.contains_range(&Range::caret(pos(0, 5))));
    }

    #[test]
    fn new_orders_ends() {
        let range = Range::new(pos(0, 7), pos(0, 3));
        assert_eq!(range.start, pos(0, 3));
        assert_eq!(range.len(), 4);
    }

    #[test]
    fn translate_clamps_at_zero() {
        assert_eq!(pos(2, 1).translate(-4), pos(2, 0));
        assert_eq!(Range::at(pos(0, 4), 2).translate(-3), Range::at(pos(0, 1), 2));
    }

    #[test]
    fn overlap_excludes_touching_ranges() {
        let a = Range::new(pos(0, 0), pos(0, 3));
        let b = Range::new(pos(0, 3), pos(0, 4));
        assert!(!a.overlaps(&b));
        assert!(a.overlaps(&Range::new(pos(0, 2), pos(0, 4))));
    }

    #[test]
    fn change_delta_counts_characters() {
        let change = ContentChange::new(Range::at(pos(0, 0), 6), 6, "δ");
        assert_eq!(change.delta(), -5);
    }
}
