mod common;
mod editor;
mod session;

// Public API
pub use editor::run_editor;
pub use session::EditorSession;
