//! Editor state and key handling, independent of the terminal.
//!
//! Each key is turned into the edit and caret events an editor host would
//! deliver, in that order. Replacements the abbreviator queues are applied by
//! [`EditorSession::tick`], which the draw loop calls once per key.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use unitype_core::{
    hover_at, Abbreviator, BufferId, DocumentChange, MemoryBuffer, Position, Result, SymbolTable,
    TextBuffer,
};

pub struct EditorSession {
    abbreviator: Abbreviator,
    buffers: Vec<MemoryBuffer>,
    focused: usize,
    split: bool,
    auto_close: bool,
    show_help: bool,
    exiting: bool,
}

fn closing_bracket(c: char) -> Option<char> {
    match c {
        '(' => Some(')'),
        '[' => Some(']'),
        '{' => Some('}'),
        _ => None,
    }
}

impl EditorSession {
    pub fn new(table: Arc<SymbolTable>) -> Self {
        let buffers = vec![
            MemoryBuffer::new(BufferId(1), "").with_name("scratch"),
            MemoryBuffer::new(BufferId(2), "").with_name("notes"),
        ];
        let mut session = Self {
            abbreviator: Abbreviator::new(table),
            buffers,
            focused: 0,
            split: true,
            auto_close: true,
            show_help: false,
            exiting: false,
        };
        session.notify_visible();
        session
            .abbreviator
            .on_active_buffer_changed(Some(session.buffers[0].id()));
        session
    }

    pub fn abbreviator(&self) -> &Abbreviator {
        &self.abbreviator
    }

    /// Buffers currently on screen, in display order.
    pub fn visible(&self) -> &[MemoryBuffer] {
        if self.split {
            &self.buffers
        } else {
            &self.buffers[..1]
        }
    }

    pub fn focused(&self) -> &MemoryBuffer {
        &self.buffers[self.focused]
    }

    pub fn focused_index(&self) -> usize {
        self.focused
    }

    pub fn auto_close(&self) -> bool {
        self.auto_close
    }

    pub fn show_help(&self) -> bool {
        self.show_help
    }

    pub fn is_exiting(&self) -> bool {
        self.exiting
    }

    /// Status line for the focused buffer: name, candidate indicator, and
    /// hover help for the character under the caret.
    pub fn status(&self) -> String {
        let buffer = self.focused();
        let indicator = if self.abbreviator.is_active() {
            "● abbreviation"
        } else {
            "○"
        };
        let hover = hover_at(self.abbreviator.table(), buffer, buffer.caret())
            .or_else(|| {
                let caret = buffer.caret();
                (caret.column > 0)
                    .then(|| hover_at(self.abbreviator.table(), buffer, caret.translate(-1)))
                    .flatten()
            })
            .map(|h| h.contents)
            .unwrap_or_default();
        format!("{} {} {}", buffer.name(), indicator, hover)
            .trim_end()
            .to_string()
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => self.exiting = true,
            KeyCode::Char('q') if ctrl => self.exiting = true,
            KeyCode::Char(' ') | KeyCode::Char('k') if ctrl => {
                let buffer = &mut self.buffers[self.focused];
                self.abbreviator.force_convert(buffer);
            }
            KeyCode::Char('w') if ctrl => self.toggle_split(),
            KeyCode::Char('b') if ctrl => self.auto_close = !self.auto_close,
            KeyCode::F(1) => self.show_help = !self.show_help,
            KeyCode::Tab => self.switch_focus(),
            KeyCode::Enter => {
                let change = self.buffers[self.focused].insert("\n")?;
                self.deliver(change);
            }
            KeyCode::Backspace => {
                if let Some(change) = self.buffers[self.focused].delete_backward()? {
                    self.deliver(change);
                }
            }
            KeyCode::Left => self.move_caret(0, -1),
            KeyCode::Right => self.move_caret(0, 1),
            KeyCode::Up => self.move_caret(-1, 0),
            KeyCode::Down => self.move_caret(1, 0),
            KeyCode::Char(c) if !ctrl => {
                let buffer = &mut self.buffers[self.focused];
                let change = match closing_bracket(c) {
                    Some(close) if self.auto_close => buffer.insert_pair(c, close)?,
                    _ => buffer.type_char(c)?,
                };
                self.deliver(change);
            }
            _ => {}
        }
        Ok(())
    }

    /// Apply queued replacements in every buffer.
    pub fn tick(&mut self) -> usize {
        let mut applied = 0;
        for buffer in &mut self.buffers {
            applied += self.abbreviator.run_pending(buffer);
        }
        applied
    }

    fn deliver(&mut self, change: DocumentChange) {
        let buffer = &mut self.buffers[self.focused];
        self.abbreviator.on_document_changed(buffer, &change);
        let selection = buffer.selection_change();
        self.abbreviator.on_selection_changed(buffer, &selection);
    }

    fn move_caret(&mut self, lines: isize, columns: isize) {
        let buffer = &mut self.buffers[self.focused];
        let caret = buffer.caret();
        let target = if lines != 0 {
            Position::new(caret.line.saturating_add_signed(lines), caret.column)
        } else if columns < 0 && caret.column == 0 && caret.line > 0 {
            Position::new(caret.line - 1, buffer.line_len(caret.line - 1))
        } else if columns > 0 && caret.column == buffer.line_len(caret.line) {
            Position::new(caret.line + 1, 0)
        } else {
            caret.translate(columns)
        };
        if target.line >= buffer.line_count() {
            return;
        }
        let selection = buffer.move_caret(target);
        self.abbreviator.on_selection_changed(buffer, &selection);
    }

    fn switch_focus(&mut self) {
        if !self.split {
            return;
        }
        self.focused = (self.focused + 1) % self.buffers.len();
        log::debug!("focus moved to {}", self.buffers[self.focused].name());
        self.abbreviator
            .on_active_buffer_changed(Some(self.buffers[self.focused].id()));
    }

    fn toggle_split(&mut self) {
        self.split = !self.split;
        if !self.split && self.focused != 0 {
            self.focused = 0;
            self.abbreviator
                .on_active_buffer_changed(Some(self.buffers[0].id()));
        }
        self.notify_visible();
    }

    fn notify_visible(&mut self) {
        let visible: Vec<BufferId> = self.visible().iter().map(TextBuffer::id).collect();
        self.abbreviator.on_visible_buffers_changed(&visible);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> EditorSession {
        EditorSession::new(Arc::new(SymbolTable::new([
            ("alpha", "α"),
            ("to", "→"),
        ])))
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn type_str(session: &mut EditorSession, text: &str) {
        for c in text.chars() {
            session.handle_key(key(KeyCode::Char(c))).unwrap();
            session.tick();
        }
    }

    #[test]
    fn typing_converts_on_space() {
        let mut s = session();
        type_str(&mut s, "a \\to b");
        assert_eq!(s.focused().text(), "a → b");
    }

    #[test]
    fn status_reports_candidate_and_hover() {
        let mut s = session();
        type_str(&mut s, "\\al");
        assert!(s.status().starts_with("scratch ● abbreviation"));
        type_str(&mut s, "pha ");
        s.handle_key(key(KeyCode::Left)).unwrap();
        s.handle_key(key(KeyCode::Left)).unwrap();
        assert_eq!(s.status(), "scratch ○ Type α using \\alpha");
    }

    #[test]
    fn ctrl_k_forces_conversion() {
        let mut s = session();
        type_str(&mut s, "\\alp");
        s.handle_key(ctrl('k')).unwrap();
        assert_eq!(s.tick(), 1);
        assert_eq!(s.focused().text(), "α");
    }

    #[test]
    fn auto_close_produces_bracket_override() {
        let mut s = session();
        type_str(&mut s, "\\[[");
        assert_eq!(s.focused().text(), "⟦⟧");
        assert_eq!(s.focused().caret().column, 1);
    }

    #[test]
    fn tab_moves_focus_and_ctrl_w_hides_second_buffer() {
        let mut s = session();
        s.handle_key(key(KeyCode::Tab)).unwrap();
        assert_eq!(s.focused().name(), "notes");
        type_str(&mut s, "\\a");
        assert!(s.abbreviator().is_active());

        s.handle_key(ctrl('w')).unwrap();
        assert_eq!(s.visible().len(), 1);
        assert_eq!(s.focused().name(), "scratch");
        assert_eq!(s.abbreviator().candidate(BufferId(2)), None);

        s.handle_key(key(KeyCode::Tab)).unwrap();
        assert_eq!(s.focused_index(), 0);
    }

    #[test]
    fn escape_and_ctrl_q_quit() {
        let mut s = session();
        s.handle_key(ctrl('q')).unwrap();
        assert!(s.is_exiting());
        let mut s = session();
        s.handle_key(key(KeyCode::Esc)).unwrap();
        assert!(s.is_exiting());
    }
}
