//! The Idle/Tracking state machine for a single buffer, independent of any
//! buffer: transitions only decide what should happen next, the tracker
//! carries the decision out.

use crate::buffer::{ContentChange, Range, Selection};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CandidateState {
    #[default]
    Idle,
    Tracking(Range),
}

/// Outcome of feeding one event to a [`CandidateState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Nothing changes.
    Keep,
    /// Track `Some(range)` from now on, or go Idle.
    Track(Option<Range>),
    /// Try to replace `range`, then continue with `follow_up`.
    Commit {
        range: Range,
        follow_up: Option<Range>,
    },
}

impl CandidateState {
    pub fn from_range(range: Option<Range>) -> Self {
        match range {
            Some(range) => CandidateState::Tracking(range),
            None => CandidateState::Idle,
        }
    }

    pub fn range(&self) -> Option<Range> {
        match self {
            CandidateState::Idle => None,
            CandidateState::Tracking(range) => Some(*range),
        }
    }

    pub fn is_tracking(&self) -> bool {
        matches!(self, CandidateState::Tracking(_))
    }

    pub fn on_document_change(&self, changes: &[ContentChange], escape: char) -> Step {
        // Saves fire change events without content
        if changes.is_empty() {
            return Step::Keep;
        }
        let [change] = changes else {
            return Step::Track(None);
        };

        let mut chars = change.text.chars();
        let single = match (chars.next(), chars.next()) {
            (Some(c), None) => Some(c),
            _ => None,
        };

        match *self {
            CandidateState::Idle => {
                if single == Some(escape) {
                    return Step::Track(Some(Range::at(change.range.start, 1)));
                }
                Step::Track(None)
            }
            CandidateState::Tracking(range) => {
                if change.range.start == range.end {
                    if single == Some(escape) && range.len() == 1 {
                        // Escape typed twice
                        return Step::Commit {
                            range: range.extend(1),
                            follow_up: None,
                        };
                    }
                    if single == Some(escape) {
                        return Step::Commit {
                            range,
                            follow_up: Some(Range::at(change.range.start, 1)),
                        };
                    }
                    if is_terminator(&change.text) {
                        return Step::Commit {
                            range,
                            follow_up: None,
                        };
                    }
                }

                // A candidate never spans lines
                if change.text.contains('\n') {
                    return Step::Track(None);
                }
                if range.contains_range(&change.range) && range.start < change.range.start {
                    return Step::Track(Some(range.extend(change.delta())));
                }

                Step::Track(None)
            }
        }
    }

    pub fn on_selection_change(&self, selections: &[Selection]) -> Step {
        let CandidateState::Tracking(range) = *self else {
            return Step::Keep;
        };

        match selections {
            [only] if only.is_caret() && range.contains_position(only.active) => Step::Keep,
            _ => Step::Commit {
                range,
                follow_up: None,
            },
        }
    }
}

/// Inserted text that ends an abbreviation typed right before it: any run of
/// whitespace, or a single `)`, `}` or `⟩`. A `]` keeps the candidate going so
/// `[[]]` can grow into its bracket override. The escape character is handled
/// separately since it starts the next candidate.
pub fn is_terminator(text: &str) -> bool {
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (None, _) => false,
        (Some(c), None) if matches!(c, ')' | '}' | '⟩') => true,
        _ => text.chars().all(char::is_whitespace),
    }
}
