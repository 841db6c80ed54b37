use crate::app::Model;
use crate::page::ContactForm;

/// All possible events and actions in the application.
///
/// These represent user input, system events, and internal actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // Navigation
    /// Scroll up by n lines
    ScrollUp(usize),
    /// Scroll down by n lines
    ScrollDown(usize),
    /// Scroll up one page
    PageUp,
    /// Scroll down one page
    PageDown,
    /// Scroll up half page
    HalfPageUp,
    /// Scroll down half page
    HalfPageDown,
    /// Go to top of page
    GoToTop,
    /// Go to bottom of page
    GoToBottom,

    // Contact form
    /// Jump to the contact form and focus its first field
    FocusForm,
    /// Focus a specific form field, e.g. from a mouse click
    FocusField(usize),
    /// Stop editing the form
    LeaveForm,
    /// Append a character to the focused field
    FormInput(char),
    /// Delete the last character of the focused field
    FormBackspace,
    /// Move focus to the next form field
    FormNextField,
    /// Move focus to the previous form field
    FormPrevField,

    // File watching
    /// Source file changed externally, reload
    FileChanged,
    /// Force reload from disk
    ForceReload,
    /// Toggle file watching
    ToggleWatch,

    // Help overlay
    /// Toggle help overlay
    ToggleHelp,
    /// Hide help overlay
    HideHelp,
    /// Scroll help overlay up
    HelpScrollUp,
    /// Scroll help overlay down
    HelpScrollDown,

    // Window
    /// Terminal resized
    Resize(u16, u16),

    // Application
    /// Quit the application
    Quit,
}

/// Pure function that updates the model based on a message.
///
/// This is the core of TEA - all state transitions happen here.
/// No side effects should occur in this function.
pub fn update(mut model: Model, msg: Message) -> Model {
    match msg {
        // Navigation
        Message::ScrollUp(n) => {
            let before = model.viewport.offset();
            model.viewport.scroll_up(n);
            observe_if_scrolled(&mut model, before);
        }
        Message::ScrollDown(n) => {
            let before = model.viewport.offset();
            model.viewport.scroll_down(n);
            observe_if_scrolled(&mut model, before);
        }
        Message::PageUp => {
            let before = model.viewport.offset();
            model.viewport.page_up();
            observe_if_scrolled(&mut model, before);
        }
        Message::PageDown => {
            let before = model.viewport.offset();
            model.viewport.page_down();
            observe_if_scrolled(&mut model, before);
        }
        Message::HalfPageUp => {
            let before = model.viewport.offset();
            model.viewport.half_page_up();
            observe_if_scrolled(&mut model, before);
        }
        Message::HalfPageDown => {
            let before = model.viewport.offset();
            model.viewport.half_page_down();
            observe_if_scrolled(&mut model, before);
        }
        Message::GoToTop => {
            let before = model.viewport.offset();
            model.viewport.go_to_top();
            observe_if_scrolled(&mut model, before);
        }
        Message::GoToBottom => {
            let before = model.viewport.offset();
            model.viewport.go_to_bottom();
            observe_if_scrolled(&mut model, before);
        }

        // Contact form
        Message::FocusForm => {
            if let Some(form) = model.page.contact_form_mut() {
                form.focus_first();
                scroll_focused_field_into_view(&mut model);
            }
        }
        Message::FocusField(idx) => {
            if let Some(form) = model.page.contact_form_mut() {
                form.focus_field(idx);
                scroll_focused_field_into_view(&mut model);
            }
        }
        Message::LeaveForm => {
            if let Some(form) = model.page.contact_form_mut() {
                form.blur();
            }
            // Draft persistence handled in the event loop (side effect)
        }
        Message::FormInput(ch) => {
            if let Some(form) = model.page.contact_form_mut() {
                form.insert_char(ch);
                reflow_after_form_edit(&mut model);
            }
        }
        Message::FormBackspace => {
            if let Some(form) = model.page.contact_form_mut() {
                form.backspace();
                reflow_after_form_edit(&mut model);
            }
        }
        Message::FormNextField => {
            if let Some(form) = model.page.contact_form_mut() {
                form.focus_next();
                scroll_focused_field_into_view(&mut model);
            }
        }
        Message::FormPrevField => {
            if let Some(form) = model.page.contact_form_mut() {
                form.focus_prev();
                scroll_focused_field_into_view(&mut model);
            }
        }

        // File watching
        Message::ToggleWatch => {
            model.watch_enabled = !model.watch_enabled;
        }
        // FileChanged/ForceReload: handled in event loop (side effect)
        Message::FileChanged | Message::ForceReload => {}

        // Help overlay
        Message::ToggleHelp => {
            model.help_visible = !model.help_visible;
            model.help_scroll_offset = 0;
        }
        Message::HideHelp => {
            model.help_visible = false;
        }
        Message::HelpScrollUp => {
            model.help_scroll_offset = model.help_scroll_offset.saturating_sub(1);
        }
        Message::HelpScrollDown => {
            // Clamped against the rendered line count when the overlay draws
            model.help_scroll_offset = model.help_scroll_offset.saturating_add(1);
        }

        // Window
        Message::Resize(width, height) => {
            let before = model.viewport.offset();
            model.page.set_width(width);
            model.viewport.resize(width, height.saturating_sub(1));
            model.viewport.set_total_lines(model.page.line_count());
            observe_if_scrolled(&mut model, before);
        }

        // Application
        Message::Quit => {
            model.should_quit = true;
        }
    }
    model
}

/// Run the masthead scroll handler, but only when the viewport offset
/// actually moved. Key repeats at the boundaries are not scroll events.
fn observe_if_scrolled(model: &mut Model, before: usize) {
    if model.viewport.offset() != before {
        model.observe_scroll();
    }
}

/// Rewrap the page after a form edit and keep the focused field on screen.
fn reflow_after_form_edit(model: &mut Model) {
    model.page.recompose();
    model.viewport.set_total_lines(model.page.line_count());
    scroll_focused_field_into_view(model);
}

/// Ensure the focused form field's line is visible in the viewport.
fn scroll_focused_field_into_view(model: &mut Model) {
    let Some(field) = model.page.contact_form().and_then(ContactForm::focused) else {
        return;
    };
    let Some(line) = model.page.form_line_index(field) else {
        return;
    };
    let before = model.viewport.offset();
    model.viewport.scroll_into_view(line);
    observe_if_scrolled(model, before);
}
