use std::io::stdout;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, DisableBracketedPaste, EnableBracketedPaste};
use crossterm::execute;
use ratatui::{DefaultTerminal, Frame};

use crate::app::{App, Message, Model, update};

impl App {
    /// Run the main event loop.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal initialization or the event loop
    /// encounters an I/O failure.
    pub fn run(&mut self) -> Result<()> {
        let mut terminal = ratatui::try_init()
            .context("Failed to initialize terminal: mdpad requires an interactive terminal")?;
        let size = terminal.size()?;
        let _ = execute!(stdout(), EnableBracketedPaste);

        let mut model = self.initial_model((size.width, size.height));
        if let Some(path) = self.initial_import.take() {
            self.dispatch(&mut model, Message::Import(path));
        }

        let result = self.event_loop(&mut terminal, &mut model);

        let _ = execute!(stdout(), DisableBracketedPaste);
        ratatui::restore();
        result
    }

    /// Apply a message: pure update, then side effects.
    pub(super) fn dispatch(&mut self, model: &mut Model, msg: Message) {
        tracing::trace!(?msg, "event.message");
        *model = update(std::mem::take(model), msg);
        self.handle_side_effects(model);
    }

    pub(super) fn view(model: &mut Model, frame: &mut Frame) {
        crate::ui::render(model, frame);
    }

    fn event_loop(&mut self, terminal: &mut DefaultTerminal, model: &mut Model) -> Result<()> {
        let mut needs_render = true;

        loop {
            while let Ok(msg) = self.import_rx.try_recv() {
                self.dispatch(model, msg);
                needs_render = true;
            }

            if model.expire_toast(Instant::now()) {
                needs_render = true;
            }

            let poll_ms = if needs_render {
                0
            } else if model.import_in_flight {
                20
            } else {
                250
            };
            if event::poll(Duration::from_millis(poll_ms))? {
                if let Some(msg) = super::input::handle_event(&event::read()?, model) {
                    self.dispatch(model, msg);
                    needs_render = true;
                }

                // Coalesce key repeat bursts into a single render, but stop as
                // soon as a cursor placement waits for the next frame.
                while !model.editor.has_pending_cursor() && event::poll(Duration::ZERO)? {
                    if let Some(msg) = super::input::handle_event(&event::read()?, model) {
                        self.dispatch(model, msg);
                        needs_render = true;
                    }
                }
            }

            if needs_render {
                terminal.draw(|frame| Self::view(model, frame))?;
                // Apply any deferred cursor placement, then draw again so
                // it shows.
                needs_render = model.editor.after_render();
                if needs_render {
                    model.ensure_cursor_visible();
                }
            }

            if model.should_quit {
                break;
            }
        }
        Ok(())
    }
}
