use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::Frame;
use ratatui::layout::Rect;
use tracing::trace;

use crate::app::{App, Message, Model};
use crate::page::{LineKind, PageLine};

use super::event_loop::ResizeDebouncer;

impl App {
    pub(super) fn handle_event(
        event: Event,
        model: &Model,
        now_ms: u64,
        resize_debouncer: &mut ResizeDebouncer,
    ) -> Option<Message> {
        match event {
            Event::Key(key) => Self::handle_key(key, model),
            Event::Mouse(mouse) => Self::handle_mouse(mouse, model),
            Event::Resize(w, h) => {
                trace!("Resize queued: {w}x{h}");
                resize_debouncer.queue(w, h, now_ms);
                None
            }
            _ => None,
        }
    }

    pub(super) fn handle_mouse(mouse: MouseEvent, model: &Model) -> Option<Message> {
        if model.help_visible {
            return None;
        }

        // Left click focuses a form field, or drops focus when it lands
        // anywhere else on the page.
        if matches!(mouse.kind, MouseEventKind::Up(MouseButton::Left)) {
            let page_area = page_mouse_area(model);
            if let Some(line) = page_line_for_row(model, page_area, mouse.row)
                && let Some(kind) = model.page.lines().get(line).map(PageLine::kind)
            {
                if let LineKind::FormField(idx) = kind {
                    return Some(Message::FocusField(idx));
                }
                if model.editing_form() {
                    return Some(Message::LeaveForm);
                }
            }
        }

        match mouse.kind {
            MouseEventKind::ScrollDown => {
                if model.viewport.can_scroll_down() {
                    Some(Message::ScrollDown(3))
                } else {
                    None
                }
            }
            MouseEventKind::ScrollUp => {
                if model.viewport.can_scroll_up() {
                    Some(Message::ScrollUp(3))
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    pub(super) fn handle_key(key: KeyEvent, model: &Model) -> Option<Message> {
        if model.help_visible {
            return match key.code {
                KeyCode::Char('j') | KeyCode::Down => Some(Message::HelpScrollDown),
                KeyCode::Char('k') | KeyCode::Up => Some(Message::HelpScrollUp),
                _ => Some(Message::HideHelp),
            };
        }

        // While a form field has focus, printable keys are input, not commands
        if model.editing_form() {
            return match key.code {
                KeyCode::Esc => Some(Message::LeaveForm),
                KeyCode::Tab | KeyCode::Enter => Some(Message::FormNextField),
                KeyCode::BackTab => Some(Message::FormPrevField),
                KeyCode::Backspace => Some(Message::FormBackspace),
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    Some(Message::Quit)
                }
                KeyCode::Char(c)
                    if !key.modifiers.contains(KeyModifiers::CONTROL)
                        && !key.modifiers.contains(KeyModifiers::ALT) =>
                {
                    Some(Message::FormInput(c))
                }
                _ => None,
            };
        }

        // Normal key handling
        match key.code {
            // Navigation
            KeyCode::Char('j') | KeyCode::Down => {
                if model.viewport.can_scroll_down() {
                    Some(Message::ScrollDown(1))
                } else {
                    None
                }
            }
            KeyCode::Char('k') | KeyCode::Up => {
                if model.viewport.can_scroll_up() {
                    Some(Message::ScrollUp(1))
                } else {
                    None
                }
            }
            KeyCode::Char(' ') | KeyCode::PageDown => {
                if model.viewport.can_scroll_down() {
                    Some(Message::PageDown)
                } else {
                    None
                }
            }
            KeyCode::Char('b') | KeyCode::PageUp => {
                if model.viewport.can_scroll_up() {
                    Some(Message::PageUp)
                } else {
                    None
                }
            }
            KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                if model.viewport.can_scroll_down() {
                    Some(Message::HalfPageDown)
                } else {
                    None
                }
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                if model.viewport.can_scroll_up() {
                    Some(Message::HalfPageUp)
                } else {
                    None
                }
            }
            KeyCode::Char('g') | KeyCode::Home => Some(Message::GoToTop),
            KeyCode::Char('G') | KeyCode::End => Some(Message::GoToBottom),

            // Contact form; ignored when the page carries none
            KeyCode::Char('f') if model.page.contact_form().is_some() => Some(Message::FocusForm),

            // File
            KeyCode::Char('w') => Some(Message::ToggleWatch),
            KeyCode::Char('r' | 'R') => Some(Message::ForceReload),
            KeyCode::Char('?') | KeyCode::F(1) => Some(Message::ToggleHelp),

            // Quit
            KeyCode::Char('q') => Some(Message::Quit),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Message::Quit)
            }

            _ => None,
        }
    }

    pub(super) fn view(model: &Model, frame: &mut Frame) {
        crate::ui::render(model, frame);
    }
}

/// Screen region occupied by page content, excluding the status and toast rows.
fn page_mouse_area(model: &Model) -> Rect {
    let toast_active = model.active_toast().is_some();
    let footer_rows = 1 + u16::from(toast_active);
    Rect::new(
        0,
        0,
        model.viewport.width(),
        model
            .viewport
            .height()
            .saturating_add(1)
            .saturating_sub(footer_rows),
    )
}

/// Map a screen row to a page line index. Rows outside the page area or
/// below the last line map to None.
fn page_line_for_row(model: &Model, page_area: Rect, row: u16) -> Option<usize> {
    if page_area.height == 0 || model.page.line_count() == 0 {
        return None;
    }
    let max_row = page_area.y + page_area.height.saturating_sub(1);
    if row < page_area.y || row > max_row {
        return None;
    }
    let rel_row = usize::from(row.saturating_sub(page_area.y));
    let line = model.viewport.offset() + rel_row;
    if line >= model.page.line_count() {
        return None;
    }
    Some(line)
}
