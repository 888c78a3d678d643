//! Coordinator owning one tracker per open buffer.

use crate::buffer::{BufferId, DocumentChange, Range, SelectionChange, TextBuffer};
use crate::subscription::{Emitter, Subscription};
use crate::symbols::SymbolTable;
use crate::tracker::BufferTracker;
use std::collections::HashMap;
use std::sync::Arc;

/// Restricts the abbreviator to buffers of the given languages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentFilter {
    languages: Vec<String>,
}

impl DocumentFilter {
    pub fn new<I, S>(languages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            languages: languages.into_iter().map(Into::into).collect(),
        }
    }

    pub fn matches(&self, language_id: &str) -> bool {
        self.languages.iter().any(|l| l == language_id)
    }
}

/// Routes edit and selection events of the focused buffer to its tracker
/// and publishes whether a candidate is currently active.
///
/// Trackers are created on the first edit a buffer receives and dropped once
/// the buffer is no longer visible. Replacements requested by a commit are
/// applied by [`Abbreviator::run_pending`], which the host calls on its next
/// tick after delivering the triggering event.
pub struct Abbreviator {
    table: Arc<SymbolTable>,
    filter: Option<DocumentFilter>,
    trackers: HashMap<BufferId, BufferTracker>,
    focused: Option<BufferId>,
    active: bool,
    active_changed: Emitter<bool>,
}

impl Abbreviator {
    pub fn new(table: Arc<SymbolTable>) -> Self {
        Self {
            table,
            filter: None,
            trackers: HashMap::new(),
            focused: None,
            active: false,
            active_changed: Emitter::new(),
        }
    }

    pub fn with_filter(mut self, filter: DocumentFilter) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn table(&self) -> &SymbolTable {
        &self.table
    }

    pub fn focused(&self) -> Option<BufferId> {
        self.focused
    }

    /// Whether the focused buffer has a non-empty candidate range.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// The candidate range tracked for `buffer`, if any.
    pub fn candidate(&self, buffer: BufferId) -> Option<Range> {
        self.trackers.get(&buffer).and_then(BufferTracker::range)
    }

    pub fn tracker(&self, buffer: BufferId) -> Option<&BufferTracker> {
        self.trackers.get(&buffer)
    }

    pub fn tracked_buffers(&self) -> impl Iterator<Item = BufferId> + '_ {
        self.trackers.keys().copied()
    }

    pub fn has_pending(&self, buffer: BufferId) -> bool {
        self.trackers
            .get(&buffer)
            .is_some_and(BufferTracker::has_pending)
    }

    /// Call `listener` with the active flag every time it is recomputed.
    pub fn subscribe_active(&self, listener: impl FnMut(&bool) + 'static) -> Subscription {
        self.active_changed.subscribe(listener)
    }

    fn accepts(&self, buffer: &dyn TextBuffer) -> bool {
        if self.focused != Some(buffer.id()) {
            return false;
        }
        self.filter
            .as_ref()
            .map_or(true, |f| f.matches(buffer.language_id()))
    }

    pub fn on_document_changed(&mut self, buffer: &mut dyn TextBuffer, event: &DocumentChange) {
        if event.buffer != buffer.id() || !self.accepts(buffer) {
            return;
        }

        let escape = self.table.escape();
        let tracker = self
            .trackers
            .entry(buffer.id())
            .or_insert_with(|| BufferTracker::new(buffer.id(), escape));
        tracker.on_document_change(buffer, &self.table, event);
        self.refresh_active();
    }

    pub fn on_selection_changed(&mut self, buffer: &mut dyn TextBuffer, event: &SelectionChange) {
        if event.buffer != buffer.id() || !self.accepts(buffer) {
            return;
        }

        if let Some(tracker) = self.trackers.get_mut(&buffer.id()) {
            tracker.on_selection_change(buffer, &self.table, &event.selections);
            self.refresh_active();
        }
    }

    pub fn on_active_buffer_changed(&mut self, buffer: Option<BufferId>) {
        self.focused = buffer;
        self.refresh_active();
    }

    pub fn on_visible_buffers_changed(&mut self, visible: &[BufferId]) {
        self.trackers.retain(|id, _| visible.contains(id));
        self.refresh_active();
    }

    /// Finish the focused buffer's candidate now, as typed.
    pub fn force_convert(&mut self, buffer: &mut dyn TextBuffer) {
        if !self.accepts(buffer) {
            return;
        }

        if let Some(tracker) = self.trackers.get_mut(&buffer.id()) {
            tracker.force_convert(buffer, &self.table);
            self.refresh_active();
        }
    }

    /// Apply the replacements queued for `buffer`. Queued work completes even
    /// if the buffer has lost focus since it was requested.
    pub fn run_pending(&mut self, buffer: &mut dyn TextBuffer) -> usize {
        let Some(tracker) = self.trackers.get_mut(&buffer.id()) else {
            return 0;
        };
        if !tracker.has_pending() {
            return 0;
        }

        let applied = tracker.run_pending(buffer);
        self.refresh_active();
        applied
    }

    fn refresh_active(&mut self) {
        self.active = self
            .focused
            .and_then(|id| self.trackers.get(&id))
            .is_some_and(BufferTracker::is_active);
        self.active_changed.emit(&self.active);
    }

    /// Release every subscription and tracker.
    pub fn dispose(self) {
        log::debug!(
            "disposing abbreviator ({} trackers, {} listeners)",
            self.trackers.len(),
            self.active_changed.listener_count()
        );
        self.active_changed.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::Position;
    use crate::memory::MemoryBuffer;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn abbreviator() -> Abbreviator {
        Abbreviator::new(Arc::new(SymbolTable::new([("alpha", "α"), ("beta", "β")])))
    }

    fn type_into(abbreviator: &mut Abbreviator, buffer: &mut MemoryBuffer, text: &str) {
        for c in text.chars() {
            let change = buffer.type_char(c).unwrap();
            abbreviator.on_document_changed(buffer, &change);
            let selection = buffer.selection_change();
            abbreviator.on_selection_changed(buffer, &selection);
        }
    }

    #[test]
    fn background_buffers_are_ignored() {
        let mut abbreviator = abbreviator();
        let mut focused = MemoryBuffer::new(BufferId(1), "");
        let mut background = MemoryBuffer::new(BufferId(2), "");
        abbreviator.on_active_buffer_changed(Some(focused.id()));

        type_into(&mut abbreviator, &mut background, "\\al");
        assert!(abbreviator.tracker(BufferId(2)).is_none());
        assert!(!abbreviator.is_active());

        type_into(&mut abbreviator, &mut focused, "\\al");
        assert!(abbreviator.is_active());
        assert_eq!(
            abbreviator.candidate(BufferId(1)),
            Some(Range::new(Position::new(0, 0), Position::new(0, 3)))
        );
    }

    #[test]
    fn active_flag_follows_focus() {
        let mut abbreviator = abbreviator();
        let mut buffer = MemoryBuffer::new(BufferId(1), "");
        abbreviator.on_active_buffer_changed(Some(buffer.id()));
        type_into(&mut abbreviator, &mut buffer, "\\b");
        assert!(abbreviator.is_active());

        abbreviator.on_active_buffer_changed(Some(BufferId(2)));
        assert!(!abbreviator.is_active());
        abbreviator.on_active_buffer_changed(Some(buffer.id()));
        assert!(abbreviator.is_active());
    }

    #[test]
    fn hidden_buffers_lose_their_tracker() {
        let mut abbreviator = abbreviator();
        let mut buffer = MemoryBuffer::new(BufferId(1), "");
        abbreviator.on_active_buffer_changed(Some(buffer.id()));
        type_into(&mut abbreviator, &mut buffer, "\\b");

        abbreviator.on_visible_buffers_changed(&[BufferId(1), BufferId(3)]);
        assert!(abbreviator.tracker(BufferId(1)).is_some());
        abbreviator.on_visible_buffers_changed(&[BufferId(3)]);
        assert!(abbreviator.tracker(BufferId(1)).is_none());
        assert!(!abbreviator.is_active());
    }

    #[test]
    fn selection_before_any_edit_creates_nothing() {
        let mut abbreviator = abbreviator();
        let mut buffer = MemoryBuffer::new(BufferId(1), "text");
        abbreviator.on_active_buffer_changed(Some(buffer.id()));
        let selection = buffer.move_caret(Position::new(0, 1));
        abbreviator.on_selection_changed(&mut buffer, &selection);
        assert_eq!(abbreviator.tracked_buffers().count(), 0);
    }

    #[test]
    fn filter_limits_languages() {
        let table = Arc::new(SymbolTable::new([("alpha", "α")]));
        let mut abbreviator = Abbreviator::new(table).with_filter(DocumentFilter::new(["lean"]));
        let mut text = MemoryBuffer::new(BufferId(1), "");
        let mut lean = MemoryBuffer::new(BufferId(2), "").with_language("lean");

        abbreviator.on_active_buffer_changed(Some(text.id()));
        type_into(&mut abbreviator, &mut text, "\\a");
        assert!(!abbreviator.is_active());

        abbreviator.on_active_buffer_changed(Some(lean.id()));
        type_into(&mut abbreviator, &mut lean, "\\a");
        assert!(abbreviator.is_active());
    }

    #[test]
    fn force_convert_commits_the_focused_candidate() {
        let mut abbreviator = abbreviator();
        let mut buffer = MemoryBuffer::new(BufferId(1), "");
        abbreviator.on_active_buffer_changed(Some(buffer.id()));
        type_into(&mut abbreviator, &mut buffer, "\\alph");

        abbreviator.force_convert(&mut buffer);
        assert!(!abbreviator.is_active());
        assert!(abbreviator.has_pending(buffer.id()));
        assert_eq!(abbreviator.run_pending(&mut buffer), 1);
        assert_eq!(buffer.text(), "α");
    }

    #[test]
    fn pending_work_survives_focus_change() {
        let mut abbreviator = abbreviator();
        let mut buffer = MemoryBuffer::new(BufferId(1), "");
        abbreviator.on_active_buffer_changed(Some(buffer.id()));
        type_into(&mut abbreviator, &mut buffer, "\\beta ");
        abbreviator.on_active_buffer_changed(Some(BufferId(9)));
        assert_eq!(abbreviator.run_pending(&mut buffer), 1);
        assert_eq!(buffer.text(), "β ");
    }

    #[test]
    fn listeners_see_every_recompute_until_dispose() {
        let mut abbreviator = abbreviator();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let subscription = abbreviator.subscribe_active(move |active| sink.borrow_mut().push(*active));

        let mut buffer = MemoryBuffer::new(BufferId(1), "");
        abbreviator.on_active_buffer_changed(Some(buffer.id()));
        type_into(&mut abbreviator, &mut buffer, "\\a ");
        // focus, then edit + selection per keystroke
        assert_eq!(
            *seen.borrow(),
            vec![false, true, true, true, true, false, false]
        );

        abbreviator.dispose();
        subscription.dispose();
    }
}
