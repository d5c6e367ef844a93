use std::path::PathBuf;
use std::time::SystemTime;

use crate::app::model::IoRequest;
use crate::app::{App, Message, Model, ToastLevel};

impl App {
    /// Carry out what the last `update` asked for: file work, then
    /// persisting whatever changed.
    pub(super) fn handle_side_effects(&mut self, model: &mut Model) {
        match model.io_request.take() {
            Some(IoRequest::Import(path)) => self.spawn_import(model, path),
            Some(IoRequest::Export) => self.export(model),
            None => {}
        }
        self.persist(model);
    }

    /// Save the buffer and theme if they changed since the last save.
    pub(super) fn persist(&mut self, model: &Model) {
        let revision = model.editor.revision();
        if revision != self.saved_revision {
            self.persistence.save_content(&model.editor.content());
            self.saved_revision = revision;
        }
        if model.theme != self.saved_theme {
            self.persistence.save_theme(model.theme);
            self.saved_theme = model.theme;
        }
    }

    fn spawn_import(&self, model: &mut Model, path: PathBuf) {
        let tx = self.import_tx.clone();
        tracing::debug!(path = %path.display(), "import.spawn");
        let spawned = std::thread::Builder::new()
            .name("mdpad-import".to_string())
            .spawn(move || {
                let result = crate::transfer::import_markdown(&path).map_err(|err| err.to_string());
                // The receiver only goes away when the app is shutting down.
                let _ = tx.send(Message::ImportFinished { path, result });
            });
        if let Err(err) = spawned {
            tracing::warn!(%err, "import.spawn_failed");
            model.import_in_flight = false;
            model.show_toast(ToastLevel::Error, format!("Import failed: {err}"));
        }
    }

    fn export(&self, model: &mut Model) {
        let content = model.editor.content();
        match crate::transfer::export_to(&self.export_dir, &content, SystemTime::now()) {
            Ok(path) => model.show_toast(ToastLevel::Info, format!("Exported {}", path.display())),
            Err(err) => {
                tracing::warn!(%err, "export.failed");
                model.show_toast(ToastLevel::Error, err.to_string());
            }
        }
    }
}
