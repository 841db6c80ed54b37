use std::path::Path;
use std::time::Duration;

use tracing::{debug, warn};

use crate::app::{App, Message, Model, ToastLevel};
use crate::page::form::{clear_draft, draft_path, save_draft};
use crate::watcher::PageWatcher;

impl App {
    pub(super) fn make_page_watcher(path: &Path) -> notify::Result<PageWatcher> {
        PageWatcher::new(path, Duration::from_millis(200))
    }

    pub(super) fn handle_message_side_effects(
        model: &mut Model,
        page_watcher: &mut Option<PageWatcher>,
        msg: &Message,
    ) {
        match msg {
            Message::ToggleWatch => {
                if model.watch_enabled {
                    match Self::make_page_watcher(&model.file_path) {
                        Ok(watcher) => {
                            *page_watcher = Some(watcher);
                            model.show_toast(ToastLevel::Info, "Watching file changes");
                        }
                        Err(err) => {
                            model.watch_enabled = false;
                            *page_watcher = None;
                            model.show_toast(
                                ToastLevel::Warning,
                                format!("Watch unavailable: {err}"),
                            );
                            warn!("Watcher failed for {}: {err}", model.file_path.display());
                        }
                    }
                } else {
                    *page_watcher = None;
                    model.show_toast(ToastLevel::Info, "Watch disabled");
                }
            }
            Message::ForceReload | Message::FileChanged => {
                if let Err(err) = model.reload_from_disk() {
                    model.show_toast(ToastLevel::Error, format!("Reload failed: {err}"));
                    warn!("Reload failed for {}: {err}", model.file_path.display());
                } else if matches!(msg, Message::ForceReload) {
                    model.show_toast(ToastLevel::Info, "Reloaded");
                }
            }
            Message::LeaveForm => {
                Self::persist_form_draft(model, true);
            }
            Message::Quit => {
                Self::persist_form_draft(model, false);
            }
            _ => {}
        }
    }

    /// Write the current form values next to the page source so a later
    /// session can pick them up. An all-empty form deletes the draft instead.
    fn persist_form_draft(model: &mut Model, announce: bool) {
        let Some(form) = model.page.contact_form() else {
            return;
        };
        let draft = form.to_draft();
        let path = draft_path(&model.file_path);
        if draft.is_empty() {
            if let Err(err) = clear_draft(&path) {
                warn!("Failed to remove draft {}: {err}", path.display());
            }
            return;
        }
        match save_draft(&path, &draft) {
            Ok(()) => {
                debug!("Saved draft to {}", path.display());
                if announce {
                    model.show_toast(ToastLevel::Info, "Draft saved");
                }
            }
            Err(err) => {
                model.show_toast(ToastLevel::Warning, format!("Draft not saved: {err}"));
                warn!("Failed to save draft {}: {err}", path.display());
            }
        }
    }
}
