//! Application state and main event loop.
//!
//! This module implements The Elm Architecture (TEA):
//! - [`Model`]: The complete application state
//! - [`Message`]: All possible events and actions
//! - [`update`]: Pure function for state transitions
//! - [`App::run`]: Main event loop with rendering

mod effects;
mod event_loop;
mod input;
mod model;
mod update;

pub use input::shortcut_label;
pub use model::{Model, Prompt, PromptKind, ToastLevel};
pub use update::{Command, Message, update};

use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, Sender};

use crate::config::ThemeMode;
use crate::persistence::PersistenceBridge;

/// Owns the terminal session, the persistence bridge and the import worker
/// channel.
pub struct App {
    persistence: PersistenceBridge,
    export_dir: PathBuf,
    theme_override: Option<ThemeMode>,
    initial_import: Option<PathBuf>,
    saved_revision: u64,
    saved_theme: ThemeMode,
    import_tx: Sender<Message>,
    import_rx: Receiver<Message>,
}

impl App {
    pub fn new(persistence: PersistenceBridge) -> Self {
        let (import_tx, import_rx) = mpsc::channel();
        Self {
            persistence,
            export_dir: PathBuf::from("."),
            theme_override: None,
            initial_import: None,
            saved_revision: 0,
            saved_theme: ThemeMode::default(),
            import_tx,
            import_rx,
        }
    }

    /// Directory export files are written to.
    pub fn with_export_dir(mut self, dir: PathBuf) -> Self {
        self.export_dir = dir;
        self
    }

    /// Start in this theme instead of the persisted one.
    pub const fn with_theme(mut self, theme: Option<ThemeMode>) -> Self {
        self.theme_override = theme;
        self
    }

    /// Import this file once the terminal is up.
    pub fn with_initial_import(mut self, path: Option<PathBuf>) -> Self {
        self.initial_import = path;
        self
    }

    /// Build the starting model from persisted content and theme.
    pub fn initial_model(&mut self, terminal_size: (u16, u16)) -> Model {
        let content = self.persistence.load_content();
        let theme = self
            .theme_override
            .unwrap_or_else(|| self.persistence.load_theme());
        let model = Model::new(&content, theme, terminal_size);
        self.saved_revision = model.editor.revision();
        self.saved_theme = theme;
        tracing::debug!(chars = model.editor.len_chars(), theme = theme.as_str(), "app.start");
        model
    }
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("export_dir", &self.export_dir)
            .field("theme_override", &self.theme_override)
            .field("initial_import", &self.initial_import)
            .finish_non_exhaustive()
    }
}
