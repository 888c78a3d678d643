//! In-memory text buffer used by the terminal editor, batch conversion and
//! tests. Editing helpers return the event a host would deliver for the edit.

use crate::buffer::{
    BufferId, ContentChange, DocumentChange, Position, Range, SelectionChange, TextBuffer,
};
use crate::error::{Result, UnitypeError};

#[derive(Debug, Clone)]
pub struct MemoryBuffer {
    id: BufferId,
    name: String,
    language: String,
    lines: Vec<String>,
    caret: Position,
    decoration: Option<Range>,
}

impl MemoryBuffer {
    pub fn new(id: BufferId, text: &str) -> Self {
        let mut buffer = Self {
            id,
            name: format!("buffer-{}", id.0),
            language: "plaintext".to_string(),
            lines: split_lines(text),
            caret: Position::default(),
            decoration: None,
        };
        buffer.caret = buffer.end();
        buffer
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn line_len(&self, line: usize) -> usize {
        self.lines.get(line).map_or(0, |l| l.chars().count())
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn decoration(&self) -> Option<Range> {
        self.decoration
    }

    /// Position after the last character.
    pub fn end(&self) -> Position {
        let line = self.lines.len().saturating_sub(1);
        Position::new(line, self.line_len(line))
    }

    /// Clamp `position` onto existing text.
    pub fn clamp(&self, position: Position) -> Position {
        let line = position.line.min(self.lines.len().saturating_sub(1));
        Position::new(line, position.column.min(self.line_len(line)))
    }

    /// Insert `text` at the caret and move the caret after it.
    pub fn insert(&mut self, text: &str) -> Result<DocumentChange> {
        let at = self.caret;
        self.splice(Range::caret(at), text)?;
        self.caret = advance(at, text);
        Ok(DocumentChange::single(self.id, ContentChange::insert(at, text)))
    }

    pub fn type_char(&mut self, c: char) -> Result<DocumentChange> {
        let mut tmp = [0u8; 4];
        self.insert(c.encode_utf8(&mut tmp))
    }

    /// Insert `open` and `close` as one edit with the caret between them, as
    /// bracket auto-closing does.
    pub fn insert_pair(&mut self, open: char, close: char) -> Result<DocumentChange> {
        let at = self.caret;
        let text: String = [open, close].iter().collect();
        self.splice(Range::caret(at), &text)?;
        self.caret = at.translate(1);
        Ok(DocumentChange::single(self.id, ContentChange::insert(at, text)))
    }

    /// Delete the character before the caret, joining lines at column zero.
    pub fn delete_backward(&mut self) -> Result<Option<DocumentChange>> {
        let at = self.caret;
        let start = if at.column > 0 {
            at.translate(-1)
        } else if at.line > 0 {
            Position::new(at.line - 1, self.line_len(at.line - 1))
        } else {
            return Ok(None);
        };

        let range = Range::new(start, at);
        self.splice(range, "")?;
        self.caret = start;
        Ok(Some(DocumentChange::single(
            self.id,
            ContentChange::new(range, 1, ""),
        )))
    }

    /// Move the caret and report the selection change.
    pub fn move_caret(&mut self, position: Position) -> SelectionChange {
        self.caret = self.clamp(position);
        self.selection_change()
    }

    pub fn selection_change(&self) -> SelectionChange {
        SelectionChange::caret(self.id, self.caret)
    }

    fn offset(&self, position: Position) -> Result<usize> {
        let line = self.lines.get(position.line).ok_or_else(|| {
            UnitypeError::Buffer(format!("line {} out of range", position.line))
        })?;
        let preceding: usize = self.lines[..position.line]
            .iter()
            .map(|l| l.chars().count() + 1)
            .sum();
        if position.column > line.chars().count() {
            return Err(UnitypeError::Buffer(format!(
                "column {} out of range on line {}",
                position.column, position.line
            )));
        }
        Ok(preceding + position.column)
    }

    fn splice(&mut self, range: Range, text: &str) -> Result<()> {
        let start = self.offset(range.start)?;
        let end = self.offset(range.end)?;
        let mut chars: Vec<char> = self.text().chars().collect();
        chars.splice(start..end, text.chars());
        self.lines = split_lines(&chars.into_iter().collect::<String>());
        Ok(())
    }
}

impl TextBuffer for MemoryBuffer {
    fn id(&self) -> BufferId {
        self.id
    }

    fn language_id(&self) -> &str {
        &self.language
    }

    fn text_in(&self, range: Range) -> String {
        let mut out = String::new();
        for line in range.start.line..=range.end.line {
            let Some(text) = self.lines.get(line) else {
                break;
            };
            let from = if line == range.start.line {
                range.start.column
            } else {
                0
            };
            let to = if line == range.end.line {
                range.end.column
            } else {
                usize::MAX
            };
            if line > range.start.line {
                out.push('\n');
            }
            out.extend(
                text.chars()
                    .skip(from)
                    .take(to.saturating_sub(from)),
            );
        }
        out
    }

    fn replace(&mut self, range: Range, text: &str) -> Result<()> {
        self.splice(range, text)?;
        self.caret = self.clamp(self.caret);
        Ok(())
    }

    fn caret(&self) -> Position {
        self.caret
    }

    fn set_caret(&mut self, position: Position) {
        self.caret = self.clamp(position);
    }

    fn set_decoration(&mut self, range: Option<Range>) {
        self.decoration = range;
    }
}

fn split_lines(text: &str) -> Vec<String> {
    text.split('\n').map(str::to_string).collect()
}

/// Where the caret lands after inserting `text` at `at`.
fn advance(at: Position, text: &str) -> Position {
    let mut position = at;
    for c in text.chars() {
        if c == '\n' {
            position = Position::new(position.line + 1, 0);
        } else {
            position.column += 1;
        }
    }
    position
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(line: usize, column: usize) -> Position {
        Position::new(line, column)
    }

    #[test]
    fn caret_starts_at_end() {
        let buffer = MemoryBuffer::new(BufferId(1), "ab\ncde");
        assert_eq!(buffer.caret(), pos(1, 3));
        assert_eq!(buffer.line_count(), 2);
    }

    #[test]
    fn insert_reports_change_and_moves_caret() {
        let mut buffer = MemoryBuffer::new(BufferId(1), "");
        let change = buffer.insert("δx").unwrap();
        assert_eq!(change.changes, vec![ContentChange::insert(pos(0, 0), "δx")]);
        assert_eq!(buffer.caret(), pos(0, 2));
        buffer.insert("\nz").unwrap();
        assert_eq!(buffer.text(), "δx\nz");
        assert_eq!(buffer.caret(), pos(1, 1));
    }

    #[test]
    fn pair_places_caret_between() {
        let mut buffer = MemoryBuffer::new(BufferId(1), "a");
        buffer.insert_pair('(', ')').unwrap();
        assert_eq!(buffer.text(), "a()");
        assert_eq!(buffer.caret(), pos(0, 2));
    }

    #[test]
    fn text_in_counts_characters() {
        let buffer = MemoryBuffer::new(BufferId(1), "αβγδ\nεζ");
        assert_eq!(buffer.text_in(Range::new(pos(0, 1), pos(0, 3))), "βγ");
        assert_eq!(buffer.text_in(Range::new(pos(0, 3), pos(1, 1))), "δ\nε");
        assert_eq!(buffer.text_in(Range::new(pos(0, 3), pos(0, 9))), "δ");
        assert_eq!(buffer.text_in(Range::at(pos(5, 0), 2)), "");
    }

    #[test]
    fn replace_swaps_text() {
        let mut buffer = MemoryBuffer::new(BufferId(1), "x \\delta y");
        buffer
            .replace(Range::new(pos(0, 2), pos(0, 8)), "δ")
            .unwrap();
        assert_eq!(buffer.text(), "x δ y");
        assert!(buffer.replace(Range::at(pos(0, 40), 1), "!").is_err());
    }

    #[test]
    fn backspace_joins_lines() {
        let mut buffer = MemoryBuffer::new(BufferId(1), "ab\nc");
        buffer.set_caret(pos(1, 0));
        let change = buffer.delete_backward().unwrap().unwrap();
        assert_eq!(change.changes[0].range, Range::new(pos(0, 2), pos(1, 0)));
        assert_eq!(buffer.text(), "abc");
        assert_eq!(buffer.caret(), pos(0, 2));

        buffer.set_caret(pos(0, 0));
        assert!(buffer.delete_backward().unwrap().is_none());
    }
}
