use std::sync::Arc;
use unitype_core::defaults::default_table;
use unitype_core::{
    hover_at, Abbreviator, BufferId, DocumentChange, MemoryBuffer, Position, Range, SymbolTable,
    TextBuffer,
};

/// A host with one focused buffer that delivers events the way an editor
/// does: the edit, then the caret move, then the next tick.
struct Session {
    buffer: MemoryBuffer,
    abbreviator: Abbreviator,
}

impl Session {
    fn new(table: SymbolTable) -> Self {
        Self::with_text(table, "")
    }

    fn with_text(table: SymbolTable, text: &str) -> Self {
        let buffer = MemoryBuffer::new(BufferId(1), text);
        let mut abbreviator = Abbreviator::new(Arc::new(table));
        abbreviator.on_active_buffer_changed(Some(buffer.id()));
        Self {
            buffer,
            abbreviator,
        }
    }

    fn deliver(&mut self, change: DocumentChange) {
        self.abbreviator.on_document_changed(&mut self.buffer, &change);
        let selection = self.buffer.selection_change();
        self.abbreviator
            .on_selection_changed(&mut self.buffer, &selection);
    }

    fn type_keys(&mut self, text: &str) {
        for c in text.chars() {
            let change = self.buffer.type_char(c).unwrap();
            self.deliver(change);
        }
    }

    fn type_ticked(&mut self, text: &str) {
        for c in text.chars() {
            self.type_keys(&c.to_string());
            self.tick();
        }
    }

    fn tick(&mut self) -> usize {
        self.abbreviator.run_pending(&mut self.buffer)
    }

    fn move_to(&mut self, column: usize) {
        let selection = self.buffer.move_caret(Position::new(0, column));
        self.abbreviator
            .on_selection_changed(&mut self.buffer, &selection);
    }

    fn text(&self) -> String {
        self.buffer.text()
    }

    fn caret(&self) -> usize {
        self.buffer.caret().column
    }
}

fn greek() -> SymbolTable {
    SymbolTable::new([("delta", "δ"), ("alpha", "α"), ("lambda", "λ"), ("lam", "λ")])
}

#[test]
fn space_commits_and_keeps_the_space() {
    let mut s = Session::new(greek());
    s.type_keys("\\delta ");
    assert_eq!(s.tick(), 1);
    assert_eq!(s.text(), "δ ");
    assert_eq!(s.caret(), 2);
    assert!(!s.abbreviator.is_active());
}

#[test]
fn replacement_in_the_middle_of_a_line() {
    let mut s = Session::with_text(greek(), "f x");
    s.buffer.set_caret(Position::new(0, 2));
    s.type_ticked("\\lam ");
    assert_eq!(s.text(), "f λ x");
    assert_eq!(s.caret(), 4);
}

#[test]
fn double_escape_yields_a_literal_escape() {
    let mut s = Session::new(greek());
    s.type_ticked("\\\\");
    assert_eq!(s.text(), "\\");
    assert!(!s.abbreviator.is_active());
    s.type_ticked("alpha ");
    assert_eq!(s.text(), "\\alpha ");
}

#[test]
fn escape_chains_into_the_next_abbreviation() {
    let mut s = Session::new(greek());
    s.type_ticked("\\alpha\\delta ");
    assert_eq!(s.text(), "αδ ");
}

#[test]
fn compound_token_keeps_its_tail() {
    let mut s = Session::new(greek());
    s.type_ticked("\\delta1 ");
    assert_eq!(s.text(), "δ1 ");
}

#[test]
fn incomplete_token_takes_shortest_extension() {
    let mut s = Session::new(greek());
    s.type_ticked("\\la)");
    assert_eq!(s.text(), "λ)");
}

#[test]
fn moving_the_caret_away_commits_as_typed() {
    let mut s = Session::with_text(greek(), "x = ");
    s.type_keys("\\alph");
    assert!(s.abbreviator.is_active());
    s.move_to(0);
    assert!(!s.abbreviator.is_active());
    s.tick();
    assert_eq!(s.text(), "x = α");
    assert_eq!(s.caret(), 0);
}

#[test]
fn moving_within_the_token_keeps_tracking() {
    let mut s = Session::new(greek());
    s.type_keys("\\delta");
    s.move_to(3);
    assert!(s.abbreviator.is_active());
    assert!(!s.abbreviator.has_pending(BufferId(1)));
}

#[test]
fn backspace_shrinks_then_drops_candidate() {
    let mut s = Session::new(greek());
    s.type_keys("\\de");
    let change = s.buffer.delete_backward().unwrap().unwrap();
    s.deliver(change);
    assert_eq!(
        s.abbreviator.candidate(BufferId(1)),
        Some(Range::new(Position::new(0, 0), Position::new(0, 2)))
    );
    for _ in 0..2 {
        let change = s.buffer.delete_backward().unwrap().unwrap();
        s.deliver(change);
    }
    assert_eq!(s.abbreviator.candidate(BufferId(1)), None);
    assert_eq!(s.text(), "");
}

#[test]
fn edit_inside_the_token_keeps_its_start() {
    let mut s = Session::new(greek());
    s.type_keys("\\dlta");
    s.move_to(2);
    s.type_keys("e");
    assert_eq!(
        s.abbreviator.candidate(BufferId(1)),
        Some(Range::new(Position::new(0, 0), Position::new(0, 6)))
    );
    s.move_to(6);
    s.type_ticked(" ");
    assert_eq!(s.text(), "δ ");
}

#[test]
fn auto_closed_brackets_form_the_override() {
    let mut s = Session::new(greek());
    s.type_keys("\\");
    for _ in 0..2 {
        let change = s.buffer.insert_pair('[', ']').unwrap();
        s.deliver(change);
    }
    assert_eq!(s.text(), "\\[[]]");
    s.tick();
    assert_eq!(s.text(), "⟦⟧");
    assert_eq!(s.caret(), 1);
    assert!(!s.abbreviator.is_active());
}

#[test]
fn typed_double_brackets_form_the_override() {
    let mut s = Session::new(greek());
    s.type_keys("\\[[]]");
    assert!(s.abbreviator.has_pending(BufferId(1)));
    assert_eq!(s.tick(), 1);
    assert_eq!(s.text(), "⟦⟧");
    assert_eq!(s.caret(), 1);
    assert!(!s.abbreviator.is_active());
}

#[test]
fn pasting_lines_into_a_candidate_drops_it() {
    let mut s = Session::new(greek());
    s.type_keys("\\al");
    let change = s.buffer.insert("x\nfoo").unwrap();
    s.deliver(change);
    assert_eq!(s.abbreviator.candidate(BufferId(1)), None);
    assert_eq!(s.buffer.decoration(), None);

    s.abbreviator.force_convert(&mut s.buffer);
    assert_eq!(s.tick(), 0);
    assert_eq!(s.text(), "\\alx\nfoo");
}

#[test]
fn save_events_do_not_disturb_tracking() {
    let mut s = Session::new(greek());
    s.type_keys("\\al");
    s.deliver(DocumentChange::new(BufferId(1), Vec::new()));
    assert!(s.abbreviator.is_active());
}

#[test]
fn switching_buffers_routes_to_the_focused_one() {
    let table = Arc::new(greek());
    let mut first = MemoryBuffer::new(BufferId(1), "");
    let mut second = MemoryBuffer::new(BufferId(2), "");
    let mut abbreviator = Abbreviator::new(table);

    abbreviator.on_active_buffer_changed(Some(first.id()));
    let change = first.type_char('\\').unwrap();
    abbreviator.on_document_changed(&mut first, &change);
    assert!(abbreviator.is_active());

    abbreviator.on_active_buffer_changed(Some(second.id()));
    assert!(!abbreviator.is_active());
    let change = second.type_char('x').unwrap();
    abbreviator.on_document_changed(&mut second, &change);
    assert_eq!(abbreviator.candidate(BufferId(2)), None);
    assert_eq!(abbreviator.candidate(BufferId(1)), Some(Range::at(Position::new(0, 0), 1)));

    abbreviator.on_visible_buffers_changed(&[BufferId(2)]);
    assert_eq!(abbreviator.tracked_buffers().collect::<Vec<_>>(), vec![BufferId(2)]);
}

#[test]
fn hover_lists_shortest_abbreviation_first() {
    let table = default_table();
    let buffer = MemoryBuffer::new(BufferId(1), "λ");
    let hover = hover_at(&table, &buffer, Position::new(0, 0)).unwrap();
    assert_eq!(hover.contents, "Type λ using \\l or \\lam or \\lambda");
}
