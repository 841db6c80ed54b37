use std::path::PathBuf;

use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::style::{Color, Modifier};

use super::*;
use crate::app::{Message, Model, update};
use crate::page::{Page, PageOptions};

fn create_test_terminal() -> Terminal<TestBackend> {
    let backend = TestBackend::new(80, 24);
    Terminal::new(backend).unwrap()
}

fn create_test_model() -> Model {
    let page = Page::from_text("Test", "Hello world", &PageOptions::default());
    Model::new(PathBuf::from("test.txt"), page, (80, 24))
}

fn create_long_test_model() -> Model {
    let mut body = String::new();
    for i in 1..=80 {
        body.push_str(&format!("Line {i} of content.\n"));
    }
    let page = Page::from_text("Test", body, &PageOptions::default());
    Model::new(PathBuf::from("test.txt"), page, (80, 24))
}

fn draw(model: &Model) -> Terminal<TestBackend> {
    let mut terminal = create_test_terminal();
    terminal.draw(|frame| render(model, frame)).unwrap();
    terminal
}

fn row_text(terminal: &Terminal<TestBackend>, row: u16) -> String {
    let buffer = terminal.backend().buffer();
    (0..buffer.area.width)
        .map(|col| buffer[(col, row)].symbol())
        .collect()
}

fn full_text(terminal: &Terminal<TestBackend>) -> String {
    let buffer = terminal.backend().buffer();
    buffer.content().iter().map(|cell| cell.symbol()).collect()
}

#[test]
fn test_masthead_renders_at_top_of_unscrolled_page() {
    let model = create_test_model();
    let terminal = draw(&model);

    assert!(row_text(&terminal, 0).contains("Test"));
    assert!(row_text(&terminal, 1).contains("Home · About · Contact"));
    assert!(row_text(&terminal, 2).starts_with("─"));

    let title_cell = &terminal.backend().buffer()[(0, 0)];
    assert_eq!(title_cell.style().fg, Some(Color::Cyan));
    assert!(title_cell.style().add_modifier.contains(Modifier::BOLD));
}

#[test]
fn test_footer_year_renders() {
    let model = create_test_model();
    let year = model.page.year();
    let terminal = draw(&model);

    assert!(full_text(&terminal).contains(&format!("Copyright © Test {year}")));
}

#[test]
fn test_status_bar_shows_file_and_position() {
    let model = create_test_model();
    let terminal = draw(&model);

    let status = row_text(&terminal, 23);
    assert!(status.contains("test.txt"));
    // Everything fits on screen, so the page counts as fully read.
    assert!(status.contains("[100%]"));
    assert!(status.contains("Line 1/14"));
    assert!(status.contains("?:help"));
}

#[test]
fn test_status_bar_indicators() {
    let model = create_long_test_model();
    assert!(row_text(&draw(&model), 23).contains("[0%]"));

    let mut model = update(model, Message::ScrollDown(10));
    model.watch_enabled = true;
    let status = row_text(&draw(&model), 23);
    assert!(status.contains("[watching]"));
    assert!(status.contains("[pinned]"));
    assert!(!status.contains("[form]"));

    let model = update(create_test_model(), Message::FocusForm);
    assert!(row_text(&draw(&model), 23).contains("[form]"));
}

#[test]
fn test_scrolled_page_starts_at_offset() {
    let model = create_long_test_model();
    let model = update(model, Message::ScrollDown(30));
    let terminal = draw(&model);

    assert!(row_text(&terminal, 0).contains("Line 27 of content."));
    assert!(!full_text(&terminal).contains("Home · About"));
}

#[test]
fn test_masthead_bar_overlays_page_when_scrolling_up() {
    let model = create_long_test_model();
    let model = update(model, Message::ScrollDown(10));
    let model = update(model, Message::ScrollUp(3));
    assert!(model.masthead.pinned() && model.masthead.visible());

    let terminal = draw(&model);
    // The bar floats over the first three rows.
    assert!(row_text(&terminal, 0).contains("Test"));
    assert!(row_text(&terminal, 1).contains("Home · About · Contact"));
    // The page content continues underneath.
    assert!(row_text(&terminal, 3).contains("Line 7 of content."));

    // The bar carries its own background so it reads as an overlay.
    let bar_cell = &terminal.backend().buffer()[(0, 0)];
    assert_eq!(bar_cell.style().bg, Some(Color::Indexed(236)));
}

#[test]
fn test_masthead_bar_absent_while_pinned_but_hidden() {
    let model = create_long_test_model();
    let model = update(model, Message::ScrollDown(10));
    assert!(model.masthead.pinned() && !model.masthead.visible());

    let terminal = draw(&model);
    assert!(row_text(&terminal, 0).contains("Line 7 of content."));
    assert!(!full_text(&terminal).contains("Home · About"));
}

#[test]
fn test_masthead_bar_hides_after_scrolling_down_again() {
    let model = create_long_test_model();
    let model = update(model, Message::ScrollDown(10));
    let model = update(model, Message::ScrollUp(3));
    let model = update(model, Message::ScrollDown(2));

    let terminal = draw(&model);
    assert!(row_text(&terminal, 0).contains("Line 6 of content."));
    assert!(!full_text(&terminal).contains("Home · About"));
}

#[test]
fn test_focused_form_field_is_reversed() {
    let model = create_test_model();
    let model = update(model, Message::FocusForm);
    let terminal = draw(&model);

    assert!(row_text(&terminal, 7).contains("Name:"));
    let name_cell = &terminal.backend().buffer()[(2, 7)];
    assert!(name_cell.style().add_modifier.contains(Modifier::REVERSED));

    // Only the focused field is highlighted.
    let email_cell = &terminal.backend().buffer()[(2, 8)];
    assert!(!email_cell.style().add_modifier.contains(Modifier::REVERSED));
}

#[test]
fn test_form_absent_when_page_composed_without_one() {
    let options = PageOptions {
        include_form: false,
        ..PageOptions::default()
    };
    let page = Page::from_text("Test", "Hello world", &options);
    let model = Model::new(PathBuf::from("test.txt"), page, (80, 24));
    let terminal = draw(&model);

    let content = full_text(&terminal);
    assert!(!content.contains("Name:"));
    assert!(content.contains("Copyright © Test"));
}

#[test]
fn test_help_overlay_renders_centered() {
    let model = create_test_model();
    let model = update(model, Message::ToggleHelp);
    let terminal = draw(&model);

    // 80x24 terminal: the popup's top border lands on row 3.
    assert!(row_text(&terminal, 3).contains("Help"));
    assert!(row_text(&terminal, 5).contains("Navigation"));

    let content = full_text(&terminal);
    assert!(content.contains("Contact form"));
    assert!(content.contains("j/k scroll"));
}

#[test]
fn test_help_overlay_scroll_is_clamped() {
    let model = create_test_model();
    let mut model = update(model, Message::ToggleHelp);
    model.help_scroll_offset = 999;

    let terminal = draw(&model);
    let content = full_text(&terminal);
    // Scrolled to the end: the config paths are visible, the top is not.
    assert!(content.contains("Local override"));
    assert!(!content.contains("Navigation"));
}

#[test]
fn test_help_overlay_shows_config_paths() {
    let model = create_test_model();
    let mut model = update(model, Message::ToggleHelp);
    model.config_global_path = Some(PathBuf::from("/home/user/.config/masthead/config"));
    model.help_scroll_offset = 999;

    let content = full_text(&draw(&model));
    assert!(content.contains("/home/user/.config/masthead/config"));
    assert!(content.contains("<none>"));
}
