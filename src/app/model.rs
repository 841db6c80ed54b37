use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Result;

use crate::nav::{NavChrome, NavSurface};
use crate::page::{ContactForm, Page, PageOptions};
use crate::ui::viewport::Viewport;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
struct Toast {
    level: ToastLevel,
    message: String,
    expires_at: Instant,
}

/// Rendered state of the masthead chrome.
///
/// This is the render-side mirror of [`NavChrome`]: the chrome pushes flag
/// changes here, and the frame draws the floating bar when both flags are
/// set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MastheadState {
    pinned: bool,
    visible: bool,
}

impl MastheadState {
    /// Whether the chrome has detached from the page flow.
    pub const fn pinned(&self) -> bool {
        self.pinned
    }

    /// Whether the floating bar is currently shown.
    pub const fn visible(&self) -> bool {
        self.visible
    }
}

impl NavSurface for MastheadState {
    fn set_pinned(&mut self, pinned: bool) {
        self.pinned = pinned;
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }
}

/// The complete application state.
///
/// All state lives here - no global or scattered state.
#[derive(Debug)]
pub struct Model {
    /// The composed page
    pub page: Page,
    /// Viewport managing scroll position
    pub viewport: Viewport,
    /// Scroll-direction state machine driving the masthead flags
    pub chrome: NavChrome,
    /// Masthead flags as last pushed by the chrome
    pub masthead: MastheadState,
    /// Path to the source file
    pub file_path: PathBuf,
    /// Whether file watching is enabled
    pub watch_enabled: bool,
    /// Global config path shown in help
    pub config_global_path: Option<PathBuf>,
    /// Local override path shown in help
    pub config_local_path: Option<PathBuf>,
    /// Whether help overlay is visible
    pub help_visible: bool,
    /// Scroll offset inside the help overlay
    pub help_scroll_offset: usize,
    toast: Option<Toast>,
    /// Whether the app should quit
    pub should_quit: bool,
}

impl Model {
    /// Create a new model with default settings.
    pub fn new(file_path: PathBuf, page: Page, terminal_size: (u16, u16)) -> Self {
        let total_lines = page.line_count();
        let chrome = NavChrome::new(page.header_height());

        Self {
            page,
            viewport: Viewport::new(
                terminal_size.0,
                terminal_size.1.saturating_sub(1),
                total_lines,
            ),
            chrome,
            masthead: MastheadState::default(),
            file_path,
            watch_enabled: false,
            config_global_path: None,
            config_local_path: None,
            help_visible: false,
            help_scroll_offset: 0,
            toast: None,
            should_quit: false,
        }
    }

    /// Feed the current scroll offset to the chrome state machine.
    ///
    /// Called after every viewport move so the masthead flags track the
    /// reader's scroll direction.
    pub(super) fn observe_scroll(&mut self) {
        self.chrome.observe(self.viewport.offset(), &mut self.masthead);
    }

    /// Whether a contact form field currently has focus.
    pub fn editing_form(&self) -> bool {
        self.page
            .contact_form()
            .is_some_and(|form| form.focused().is_some())
    }

    pub(super) fn show_toast(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.toast = Some(Toast {
            level,
            message: message.into(),
            expires_at: Instant::now() + Duration::from_secs(4),
        });
    }

    pub(super) fn expire_toast(&mut self, now: Instant) -> bool {
        if self
            .toast
            .as_ref()
            .is_some_and(|toast| toast.expires_at <= now)
        {
            self.toast = None;
            return true;
        }
        false
    }

    pub fn active_toast(&self) -> Option<(&str, ToastLevel)> {
        self.toast
            .as_ref()
            .map(|toast| (toast.message.as_str(), toast.level))
    }

    /// Reload the page from disk as a fresh page session.
    ///
    /// The scroll position and chrome flags reset and the footer year is
    /// stamped again, exactly as if the page had just been opened. Form
    /// values in progress are carried over so a reload does not eat a
    /// half-written message.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read.
    pub(super) fn reload_from_disk(&mut self) -> Result<()> {
        let options = PageOptions {
            title: Some(self.page.title().to_string()),
            width: self.viewport.width(),
            include_form: self.page.contact_form().is_some(),
        };
        let draft = self.page.contact_form().map(ContactForm::to_draft);

        let mut page = Page::load(&self.file_path, &options)?;
        if let (Some(form), Some(draft)) = (page.contact_form_mut(), draft.as_ref()) {
            form.apply_draft(draft);
            page.recompose();
        }

        self.viewport.set_total_lines(page.line_count());
        self.viewport.go_to_top();
        self.chrome = NavChrome::new(page.header_height());
        self.masthead = MastheadState::default();
        self.page = page;
        Ok(())
    }
}

// Implement Default for Model to allow std::mem::take
impl Default for Model {
    fn default() -> Self {
        Self::new(
            PathBuf::new(),
            Page::from_text("", "", &PageOptions::default()),
            (80, 24),
        )
    }
}
