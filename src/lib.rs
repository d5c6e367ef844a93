// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. editor::EditorBuffer)
    clippy::module_name_repetitions
)]

//! # mdpad
//!
//! A terminal markdown editor with a live preview.
//!
//! mdpad edits a single markdown buffer with:
//! - A side-by-side rendered preview, updated on every keystroke
//! - Toolbar shortcuts that insert markdown snippets around the selection
//! - Undo/redo, Tab indentation and bracketed paste
//! - Import of `.md` files and timestamped export
//! - Automatic persistence of the buffer and theme between sessions
//!
//! ## Architecture
//!
//! mdpad uses The Elm Architecture (TEA) pattern:
//! - **Model**: Application state
//! - **Message**: Events and actions
//! - **Update**: Pure state transitions
//! - **View**: Render to terminal
//!
//! ## Modules
//!
//! - [`app`]: Main application loop and state
//! - [`editor`]: Buffer, editing surface and toolbar snippets
//! - [`preview`]: Markdown to styled terminal lines
//! - [`highlight`]: Syntax highlighting for fenced code
//! - [`persistence`]: Key/value storage of buffer and theme
//! - [`transfer`]: File import and export
//! - [`ui`]: Terminal UI components
//! - [`config`]: Command-line defaults and theme mode

pub mod app;
pub mod config;
pub mod editor;
pub mod error;
pub mod highlight;
pub mod persistence;
pub mod preview;
pub mod transfer;
pub mod ui;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::app::{App, Message, Model};
    pub use crate::config::ThemeMode;
    pub use crate::editor::{TextBufferController, ToolbarAction};
    pub use crate::persistence::PersistenceBridge;
}
