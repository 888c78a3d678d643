//! Per-buffer candidate tracking: drives the [`CandidateState`] machine with
//! edit and selection events, resolves committed ranges, and queues the
//! resulting replacements until the next tick.

use crate::buffer::{
    BufferId, ContentChange, DocumentChange, Position, Range, Selection, TextBuffer,
};
use crate::candidate::{CandidateState, Step};
use crate::resolver::resolve;
use crate::symbols::SymbolTable;
use std::collections::VecDeque;

/// Literal sequences (after the escape character) rewritten to bracket pairs
/// whenever they make up the whole candidate.
pub const BRACKET_OVERRIDES: [(&str, &str); 2] = [("{{}}", "⦃⦄"), ("[[]]", "⟦⟧")];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplacementKind {
    /// A resolved abbreviation; the caret follows the text it was after.
    Abbreviation,
    /// A bracket override; the caret goes between the brackets and tracking
    /// stops.
    BracketPair,
}

/// A replacement requested by a commit but not yet applied to the buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingReplacement {
    pub range: Range,
    pub original: String,
    pub replacement: String,
    pub kind: ReplacementKind,
}

impl PendingReplacement {
    fn delta(&self) -> isize {
        self.replacement.chars().count() as isize - self.original.chars().count() as isize
    }
}

#[derive(Debug)]
pub struct BufferTracker {
    buffer: BufferId,
    escape: char,
    state: CandidateState,
    pending: VecDeque<PendingReplacement>,
    // Edits we applied ourselves, in case the host reports them back
    echoes: VecDeque<ContentChange>,
}

impl BufferTracker {
    pub fn new(buffer: BufferId, escape: char) -> Self {
        Self {
            buffer,
            escape,
            state: CandidateState::Idle,
            pending: VecDeque::new(),
            echoes: VecDeque::new(),
        }
    }

    pub fn buffer(&self) -> BufferId {
        self.buffer
    }

    pub fn state(&self) -> CandidateState {
        self.state
    }

    pub fn range(&self) -> Option<Range> {
        self.state.range()
    }

    /// True when a non-empty candidate range is tracked.
    pub fn is_active(&self) -> bool {
        matches!(self.state, CandidateState::Tracking(range) if !range.is_empty())
    }

    pub fn pending(&self) -> impl Iterator<Item = &PendingReplacement> {
        self.pending.iter()
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn on_document_change(
        &mut self,
        buffer: &mut dyn TextBuffer,
        table: &SymbolTable,
        event: &DocumentChange,
    ) {
        if let [change] = event.changes.as_slice() {
            if self.echoes.front() == Some(change) {
                self.echoes.pop_front();
                return;
            }
        }
        if !event.changes.is_empty() {
            self.echoes.clear();
        }

        let step = self.state.on_document_change(&event.changes, self.escape);
        self.apply(buffer, table, step);
    }

    pub fn on_selection_change(
        &mut self,
        buffer: &mut dyn TextBuffer,
        table: &SymbolTable,
        selections: &[Selection],
    ) {
        let step = self.state.on_selection_change(selections);
        self.apply(buffer, table, step);
    }

    /// Commit whatever is tracked right now, regardless of how it ends.
    pub fn force_convert(&mut self, buffer: &mut dyn TextBuffer, table: &SymbolTable) {
        let range = self.state.range();
        self.commit(buffer, table, range, None);
    }

    fn apply(&mut self, buffer: &mut dyn TextBuffer, table: &SymbolTable, step: Step) {
        match step {
            Step::Keep => {}
            Step::Track(range) => self.update_range(buffer, range),
            Step::Commit { range, follow_up } => self.commit(buffer, table, Some(range), follow_up),
        }
    }

    fn update_range(&mut self, buffer: &mut dyn TextBuffer, range: Option<Range>) {
        let range = range.filter(Range::is_single_line);
        self.state = CandidateState::from_range(range);
        buffer.set_decoration(range);

        if let Some(range) = range {
            self.check_bracket_override(buffer, range);
        }
    }

    fn check_bracket_override(&mut self, buffer: &dyn TextBuffer, range: Range) {
        let text = buffer.text_in(range);
        let Some(body) = text.strip_prefix(self.escape) else {
            return;
        };
        let Some((_, pair)) = BRACKET_OVERRIDES.iter().find(|(seq, _)| *seq == body) else {
            return;
        };
        if self.pending.iter().any(|p| p.range == range) {
            return;
        }

        log::debug!("{}: bracket override {:?} at {}", self.buffer, text, range);
        self.pending.push_back(PendingReplacement {
            range,
            original: text.clone(),
            replacement: pair.to_string(),
            kind: ReplacementKind::BracketPair,
        });
    }

    fn commit(
        &mut self,
        buffer: &mut dyn TextBuffer,
        table: &SymbolTable,
        range: Option<Range>,
        follow_up: Option<Range>,
    ) {
        let Some(range) = range.filter(|r| r.is_single_line() && r.len() >= 2) else {
            return self.update_range(buffer, follow_up);
        };

        let text = buffer.text_in(range);
        let Some(abbreviation) = text.strip_prefix(self.escape) else {
            return self.update_range(buffer, follow_up);
        };

        match resolve(table, abbreviation) {
            Some(symbol) => {
                log::debug!(
                    "{}: queue {:?} -> {:?} at {}",
                    self.buffer,
                    text,
                    symbol,
                    range
                );
                self.pending.push_back(PendingReplacement {
                    range,
                    original: text.clone(),
                    replacement: symbol,
                    kind: ReplacementKind::Abbreviation,
                });
            }
            None => log::debug!("{}: no replacement for {:?}", self.buffer, text),
        }

        self.update_range(buffer, follow_up);
    }

    /// Apply every queued replacement in request order. Returns how many
    /// were applied; stale ones (text changed underneath) are dropped.
    pub fn run_pending(&mut self, buffer: &mut dyn TextBuffer) -> usize {
        let mut applied = 0;

        while let Some(task) = self.pending.pop_front() {
            let current = buffer.text_in(task.range);
            if current != task.original {
                log::warn!(
                    "{}: dropping stale replacement at {} (expected {:?}, found {:?})",
                    self.buffer,
                    task.range,
                    task.original,
                    current
                );
                continue;
            }

            let caret = buffer.caret();
            if let Err(e) = buffer.replace(task.range, &task.replacement) {
                log::warn!("{}: replacement at {} failed: {}", self.buffer, task.range, e);
                self.update_range(buffer, None);
                continue;
            }
            applied += 1;

            let delta = task.delta();
            self.echoes.push_back(ContentChange::new(
                task.range,
                task.original.chars().count(),
                task.replacement.clone(),
            ));

            for later in self.pending.iter_mut() {
                if follows(&task.range, later.range.start) {
                    later.range = later.range.translate(delta);
                }
            }

            let next = match (task.kind, self.state) {
                (ReplacementKind::BracketPair, _) => None,
                (_, CandidateState::Tracking(range)) if follows(&task.range, range.start) => {
                    Some(range.translate(delta))
                }
                (_, CandidateState::Tracking(range)) if range.overlaps(&task.range) => None,
                (_, state) => state.range(),
            };

            let caret = match task.kind {
                ReplacementKind::BracketPair => task.range.start.translate(1),
                ReplacementKind::Abbreviation => shift_caret(caret, &task, delta),
            };
            buffer.set_caret(caret);

            log::debug!(
                "{}: replaced {:?} with {:?} at {}",
                self.buffer,
                task.original,
                task.replacement,
                task.range
            );
            self.update_range(buffer, next);
        }

        applied
    }
}

/// Whether `position` sits on the replaced line at or after its end.
fn follows(replaced: &Range, position: Position) -> bool {
    position.line == replaced.end.line && position >= replaced.end
}

fn shift_caret(caret: Position, task: &PendingReplacement, delta: isize) -> Position {
    if follows(&task.range, caret) {
        caret.translate(delta)
    } else if task.range.contains_position(caret) && caret > task.range.start {
        task.range
            .start
            .translate(task.replacement.chars().count() as isize)
    } else {
        caret
    }
}
