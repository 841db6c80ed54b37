use ratatui::prelude::*;
use ratatui::widgets::{Clear, Paragraph};

use crate::app::Model;
use crate::page::LineKind;

use super::{overlays, status, style};

/// Render the complete UI.
pub fn render(model: &Model, frame: &mut Frame) {
    let area = frame.area();

    render_page(model, frame, area);

    if model.help_visible {
        overlays::render_help_overlay(model, frame, area);
    }
}

fn render_page(model: &Model, frame: &mut Frame, area: Rect) {
    let toast_active = model.active_toast().is_some();
    let footer_rows = 1 + u16::from(toast_active);
    // Reserve the last line for the status bar (+ one toast line when active).
    let page_area = Rect {
        height: area.height.saturating_sub(footer_rows),
        ..area
    };
    let toast_area = Rect {
        y: area.y
            + area
                .height
                .saturating_sub(1 + u16::from(toast_active)),
        height: 1,
        ..area
    };
    let status_area = Rect {
        y: area.y + area.height.saturating_sub(1),
        height: 1,
        ..area
    };

    // Render the visible slice of the composed page
    let lines = model.page.lines();
    let focused_field = model.page.contact_form().and_then(|f| f.focused());
    let mut content: Vec<Line> = Vec::new();
    for idx in model.viewport.visible_range() {
        let Some(line) = lines.get(idx) else {
            break;
        };
        let mut line_style = style::style_for_line_kind(line.kind());
        if let LineKind::FormField(field) = line.kind()
            && focused_field == Some(field)
        {
            line_style = line_style.patch(style::focused_field_style());
        }
        content.push(Line::styled(line.text().to_string(), line_style));
    }

    // Clear first so stale cells from the previous frame do not leak.
    frame.render_widget(Clear, page_area);
    frame.render_widget(Paragraph::new(content), page_area);

    if model.masthead.pinned() && model.masthead.visible() {
        render_masthead_bar(model, frame, page_area);
    }

    if toast_active {
        status::render_toast_bar(model, frame, toast_area);
    }
    status::render_status_bar(model, frame, status_area);
}

/// Draw the floating masthead over the top rows of the page area.
///
/// Only called when the chrome flags say the bar is both pinned and
/// visible, so this is the terminal equivalent of the nav bar sliding
/// back in while the reader scrolls up.
fn render_masthead_bar(model: &Model, frame: &mut Frame, page_area: Rect) {
    let header_rows = u16::try_from(model.page.header_height()).unwrap_or(u16::MAX);
    let bar_area = Rect {
        height: header_rows.min(page_area.height),
        ..page_area
    };
    if bar_area.height == 0 {
        return;
    }

    let content: Vec<Line> = model
        .page
        .masthead_lines()
        .iter()
        .map(|line| {
            let line_style =
                style::style_for_line_kind(line.kind()).patch(style::masthead_bar_bg());
            Line::styled(line.text().to_string(), line_style)
        })
        .collect();

    frame.render_widget(Clear, bar_area);
    frame.render_widget(
        Paragraph::new(content).style(style::masthead_bar_bg()),
        bar_area,
    );
}
