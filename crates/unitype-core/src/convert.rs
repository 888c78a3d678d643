use crate::abbreviator::Abbreviator;
use crate::buffer::{BufferId, TextBuffer};
use crate::memory::MemoryBuffer;
use crate::symbols::SymbolTable;
use std::sync::Arc;

/// Convert every abbreviation in `text` as if it had been typed one key at a
/// time into an empty buffer, finishing any trailing candidate at the end.
pub fn convert_text(table: &Arc<SymbolTable>, text: &str) -> String {
    let mut buffer = MemoryBuffer::new(BufferId(0), "");
    let mut abbreviator = Abbreviator::new(Arc::clone(table));
    abbreviator.on_active_buffer_changed(Some(buffer.id()));

    for c in text.chars() {
        let change = match buffer.type_char(c) {
            Ok(change) => change,
            Err(e) => {
                log::warn!("convert: could not insert {:?}: {}", c, e);
                continue;
            }
        };
        abbreviator.on_document_changed(&mut buffer, &change);
        let selection = buffer.selection_change();
        abbreviator.on_selection_changed(&mut buffer, &selection);
        abbreviator.run_pending(&mut buffer);

        // Bracket overrides leave the caret between the brackets
        if buffer.caret() != buffer.end() {
            let selection = buffer.move_caret(buffer.end());
            abbreviator.on_selection_changed(&mut buffer, &selection);
        }
    }

    abbreviator.force_convert(&mut buffer);
    abbreviator.run_pending(&mut buffer);
    abbreviator.dispose();
    buffer.text()
}
