//! Theming and color definitions.
//!
//! This module defines the visual styling for composed page lines.
//! Uses semantic ANSI colors that adapt to the terminal's palette.

use ratatui::style::{Color, Modifier, Style};

use crate::page::LineKind;

/// Get the style for a given page line kind.
pub fn style_for_line_kind(kind: LineKind) -> Style {
    match kind {
        // Masthead - the site title stands out, links read as links
        LineKind::MastheadTitle => Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
        LineKind::MastheadLinks => Style::default()
            .fg(Color::Blue)
            .add_modifier(Modifier::UNDERLINED),

        // Rules and the footer line - dim
        LineKind::Rule => Style::default()
            .fg(Color::Indexed(240))
            .add_modifier(Modifier::DIM),
        LineKind::FooterYear => Style::default()
            .fg(Color::Indexed(245))
            .add_modifier(Modifier::DIM),

        // Contact form heading
        LineKind::FormHeading => Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD),

        // Body text, form fields, blank lines - normal style
        LineKind::Body | LineKind::FormField(_) | LineKind::Empty => Style::default(),
    }
}

/// Background fill for the floating masthead bar.
///
/// The bar is drawn over the page content, so it needs its own
/// background to stay legible.
pub fn masthead_bar_bg() -> Style {
    Style::default().bg(Color::Indexed(236))
}

/// Style for the form field currently being edited.
pub fn focused_field_style() -> Style {
    Style::default().add_modifier(Modifier::REVERSED)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_masthead_title_is_bold() {
        let style = style_for_line_kind(LineKind::MastheadTitle);
        assert!(style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn test_masthead_links_are_underlined() {
        let style = style_for_line_kind(LineKind::MastheadLinks);
        assert!(style.add_modifier.contains(Modifier::UNDERLINED));
    }

    #[test]
    fn test_rule_is_dim() {
        let style = style_for_line_kind(LineKind::Rule);
        assert!(style.add_modifier.contains(Modifier::DIM));
    }

    #[test]
    fn test_body_is_plain() {
        let style = style_for_line_kind(LineKind::Body);
        assert_eq!(style, Style::default());
    }

    #[test]
    fn test_footer_year_is_dim() {
        let style = style_for_line_kind(LineKind::FooterYear);
        assert!(style.add_modifier.contains(Modifier::DIM));
    }

    #[test]
    fn test_focused_field_is_reversed() {
        assert!(
            focused_field_style()
                .add_modifier
                .contains(Modifier::REVERSED)
        );
    }

    #[test]
    fn test_masthead_bar_has_background() {
        assert!(masthead_bar_bg().bg.is_some());
    }
}
