use std::io::stdout;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use ratatui::DefaultTerminal;
use tracing::{debug, warn};

use crate::app::{App, Message, Model, ToastLevel, update};
use crate::page::form::{clear_draft, draft_path, load_draft};
use crate::page::{Page, PageOptions};
use crate::watcher::PageWatcher;

pub(super) struct ResizeDebouncer {
    delay_ms: u64,
    pending: Option<(u16, u16, u64)>,
}

impl ResizeDebouncer {
    pub(super) const fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            pending: None,
        }
    }

    pub(super) const fn queue(&mut self, width: u16, height: u16, now_ms: u64) {
        self.pending = Some((width, height, now_ms));
    }

    pub(super) fn take_ready(&mut self, now_ms: u64) -> Option<(u16, u16)> {
        let (width, height, queued_at) = self.pending?;
        if now_ms.saturating_sub(queued_at) >= self.delay_ms {
            self.pending = None;
            Some((width, height))
        } else {
            None
        }
    }

    pub(super) const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl App {
    /// Run the main event loop.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal initialization, page loading, or the
    /// event loop encounters an I/O failure.
    pub fn run(&mut self) -> Result<()> {
        let mut terminal = ratatui::try_init()
            .context("Failed to initialize terminal - masthead requires an interactive terminal")?;
        let size = terminal.size()?;

        let options = PageOptions {
            title: self.title.clone(),
            width: size.width,
            include_form: self.include_form,
        };
        let page = Page::load(&self.file_path, &options)?;

        let mut model = Model::new(self.file_path.clone(), page, (size.width, size.height));
        model.watch_enabled = self.watch_enabled;
        model
            .config_global_path
            .clone_from(&self.config_global_path);
        model.config_local_path.clone_from(&self.config_local_path);

        Self::restore_form_session(&mut model, self.message_sent);

        // Main loop
        let result = Self::event_loop(&mut terminal, &mut model);

        // Restore terminal
        let _ = execute!(stdout(), DisableMouseCapture);
        ratatui::restore();

        result
    }

    /// Restore any draft from a previous session, then honor a submission
    /// the server has acknowledged: a sent form starts blank.
    pub(super) fn restore_form_session(model: &mut Model, message_sent: bool) {
        if model.page.contact_form().is_none() {
            return;
        }
        let draft_file = draft_path(&model.file_path);
        if let Some(draft) = load_draft(&draft_file) {
            if let Some(form) = model.page.contact_form_mut() {
                form.apply_draft(&draft);
            }
        }
        if message_sent {
            if let Some(form) = model.page.contact_form_mut() {
                form.reset();
            }
            if let Err(err) = clear_draft(&draft_file) {
                warn!("Failed to remove draft {}: {err}", draft_file.display());
            }
        }
        model.page.recompose();
        model.viewport.set_total_lines(model.page.line_count());
    }

    fn event_loop(terminal: &mut DefaultTerminal, model: &mut Model) -> Result<()> {
        let start = Instant::now();
        let mut resize_debouncer = ResizeDebouncer::new(100);
        let mut page_watcher = if model.watch_enabled {
            match Self::make_page_watcher(&model.file_path) {
                Ok(watcher) => Some(watcher),
                Err(err) => {
                    model.watch_enabled = false;
                    model.show_toast(ToastLevel::Warning, format!("Watch unavailable: {err}"));
                    warn!("Watcher failed for {}: {err}", model.file_path.display());
                    None
                }
            }
        } else {
            None
        };
        let mut needs_render = true;
        execute!(stdout(), EnableMouseCapture)?;

        loop {
            if model.expire_toast(Instant::now()) {
                needs_render = true;
            }

            let now_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

            if let Some((width, height)) = resize_debouncer.take_ready(now_ms) {
                debug!("Applying resize to {width}x{height}");
                *model = update(std::mem::take(model), Message::Resize(width, height));
                needs_render = true;
            }

            if model.watch_enabled
                && page_watcher
                    .as_mut()
                    .is_some_and(PageWatcher::take_change_ready)
            {
                *model = update(std::mem::take(model), Message::FileChanged);
                Self::handle_message_side_effects(model, &mut page_watcher, &Message::FileChanged);
                needs_render = true;
            }

            // Handle events
            let poll_ms = if needs_render {
                0
            } else if resize_debouncer.is_pending() {
                10
            } else {
                250
            };
            if event::poll(Duration::from_millis(poll_ms))? {
                // Refresh timestamp after poll wait so the debouncer uses accurate times.
                let event_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
                let msg = Self::handle_event(event::read()?, model, event_ms, &mut resize_debouncer);
                if let Some(msg) = msg {
                    let side_msg = msg.clone();
                    *model = update(std::mem::take(model), msg);
                    Self::handle_message_side_effects(model, &mut page_watcher, &side_msg);
                    needs_render = true;
                }

                // Coalesce key repeat bursts into a single render.
                while event::poll(Duration::from_millis(0))? {
                    let drain_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
                    let msg =
                        Self::handle_event(event::read()?, model, drain_ms, &mut resize_debouncer);
                    if let Some(msg) = msg {
                        let side_msg = msg.clone();
                        *model = update(std::mem::take(model), msg);
                        Self::handle_message_side_effects(model, &mut page_watcher, &side_msg);
                        needs_render = true;
                    }
                }
            }

            if needs_render {
                terminal.draw(|frame| Self::view(model, frame))?;
                needs_render = false;
            }

            if model.should_quit {
                break;
            }
        }
        let _ = execute!(stdout(), DisableMouseCapture);
        Ok(())
    }
}
