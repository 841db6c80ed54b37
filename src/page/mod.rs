//! Page composition.
//!
//! This module handles:
//! - Loading page text from disk
//! - Composing the masthead chrome, body, contact form, and footer into a
//!   flat list of display lines
//! - Width-aware wrapping and reflow
//!
//! The masthead chrome is part of the page flow, so its composed height is
//! also the scroll distance after which the chrome pins ([`Page::header_height`]).

pub mod form;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{Datelike, Local};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub use form::{ContactForm, FormDraft, FormField};

/// Links shown on the masthead's second row.
const NAV_LINKS: [&str; 3] = ["Home", "About", "Contact"];

/// Role of a composed line, used for styling and lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Masthead title row.
    MastheadTitle,
    /// Masthead links row.
    MastheadLinks,
    /// Horizontal rule.
    Rule,
    /// Wrapped body text.
    Body,
    /// Blank separator.
    Empty,
    /// Contact form heading.
    FormHeading,
    /// Contact form field, by field index.
    FormField(usize),
    /// Footer line carrying the stamped year.
    FooterYear,
}

/// One display line of the composed page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLine {
    text: String,
    kind: LineKind,
}

impl PageLine {
    const fn new(text: String, kind: LineKind) -> Self {
        Self { text, kind }
    }

    /// The line's display text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The line's role.
    pub const fn kind(&self) -> LineKind {
        self.kind
    }
}

/// Options controlling how a page is composed.
#[derive(Debug, Clone)]
pub struct PageOptions {
    /// Masthead title; defaults to the page file's stem.
    pub title: Option<String>,
    /// Render width in columns.
    pub width: u16,
    /// Whether the page carries the contact form.
    pub include_form: bool,
}

impl Default for PageOptions {
    fn default() -> Self {
        Self {
            title: None,
            width: 80,
            include_form: true,
        }
    }
}

/// A composed page: masthead chrome, body, optional form, footer.
///
/// The raw body text is kept so the page can reflow on width changes and
/// recompose after form edits. The footer year is stamped from the system
/// clock when the page is created and re-stamped on reload.
#[derive(Debug, Clone)]
pub struct Page {
    title: String,
    body: String,
    form: Option<ContactForm>,
    year: i32,
    width: u16,
    lines: Vec<PageLine>,
    header_height: usize,
}

impl Page {
    /// Load and compose a page from a file.
    pub fn load(path: &Path, options: &PageOptions) -> Result<Self> {
        let body = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let title = options.title.clone().unwrap_or_else(|| {
            path.file_stem().map_or_else(
                || "Untitled".to_string(),
                |stem| stem.to_string_lossy().into_owned(),
            )
        });
        Ok(Self::from_text(title, body, options))
    }

    /// Compose a page from body text directly.
    pub fn from_text(
        title: impl Into<String>,
        body: impl Into<String>,
        options: &PageOptions,
    ) -> Self {
        let mut page = Self {
            title: title.into(),
            body: body.into(),
            form: options.include_form.then(ContactForm::new),
            year: Local::now().year(),
            width: options.width,
            lines: Vec::new(),
            header_height: 0,
        };
        page.recompose();
        page
    }

    /// The masthead title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The year stamped into the footer.
    pub const fn year(&self) -> i32 {
        self.year
    }

    /// All composed lines.
    pub fn lines(&self) -> &[PageLine] {
        &self.lines
    }

    /// Number of composed lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Rendered height of the masthead chrome, in rows.
    pub const fn header_height(&self) -> usize {
        self.header_height
    }

    /// The masthead chrome rows, for overlay drawing.
    pub fn masthead_lines(&self) -> &[PageLine] {
        &self.lines[..self.header_height]
    }

    /// The contact form, if the page carries one.
    pub const fn contact_form(&self) -> Option<&ContactForm> {
        self.form.as_ref()
    }

    /// Mutable access to the contact form, if the page carries one.
    ///
    /// Callers that change form values must [`recompose`](Self::recompose)
    /// afterwards so the composed lines pick up the edit.
    pub fn contact_form_mut(&mut self) -> Option<&mut ContactForm> {
        self.form.as_mut()
    }

    /// Line index of a form field in the composed page.
    pub fn form_line_index(&self, field_idx: usize) -> Option<usize> {
        self.lines
            .iter()
            .position(|line| line.kind() == LineKind::FormField(field_idx))
    }

    /// Change the render width and reflow.
    pub fn set_width(&mut self, width: u16) {
        if self.width != width {
            self.width = width;
            self.recompose();
        }
    }

    /// Rebuild the composed line list from the current parts.
    pub fn recompose(&mut self) {
        let width = usize::from(self.width.max(1));
        let mut lines = Vec::new();

        lines.push(PageLine::new(self.title.clone(), LineKind::MastheadTitle));
        lines.push(PageLine::new(NAV_LINKS.join(" · "), LineKind::MastheadLinks));
        lines.push(PageLine::new(rule(width), LineKind::Rule));
        self.header_height = lines.len();

        lines.push(PageLine::new(String::new(), LineKind::Empty));
        for source_line in self.body.lines() {
            let expanded = source_line.replace('\t', "    ");
            if expanded.trim().is_empty() {
                lines.push(PageLine::new(String::new(), LineKind::Empty));
                continue;
            }
            for wrapped in wrap_line(&expanded, width) {
                lines.push(PageLine::new(wrapped, LineKind::Body));
            }
        }

        if let Some(form) = &self.form {
            lines.push(PageLine::new(String::new(), LineKind::Empty));
            lines.push(PageLine::new("Contact".to_string(), LineKind::FormHeading));
            for (idx, field) in form.fields().iter().enumerate() {
                lines.push(PageLine::new(
                    format!("  {}: {}", field.label(), field.value()),
                    LineKind::FormField(idx),
                ));
            }
        }

        lines.push(PageLine::new(String::new(), LineKind::Empty));
        lines.push(PageLine::new(rule(width), LineKind::Rule));
        lines.push(PageLine::new(
            format!("Copyright © {} {}", self.title, self.year),
            LineKind::FooterYear,
        ));

        self.lines = lines;
    }
}

fn rule(width: usize) -> String {
    "─".repeat(width)
}

/// Wrap one expanded source line to the given display width.
///
/// Lines that already fit are returned verbatim. Wrapping is word-based
/// with display width, not byte length; words wider than the whole line
/// are hard-broken.
fn wrap_line(line: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    if UnicodeWidthStr::width(line) <= width {
        return vec![line.to_string()];
    }

    let mut wrapped = Vec::new();
    let mut current = String::new();
    let mut current_width = 0usize;

    for word in line.split_whitespace() {
        let mut word = word;
        let mut word_width = UnicodeWidthStr::width(word);

        // Hard-break words wider than the full line.
        while word_width > width {
            if !current.is_empty() {
                wrapped.push(std::mem::take(&mut current));
                current_width = 0;
            }
            let (head, tail) = split_at_width(word, width);
            wrapped.push(head.to_string());
            word = tail;
            word_width = UnicodeWidthStr::width(word);
        }
        if word.is_empty() {
            continue;
        }

        let needed = if current.is_empty() {
            word_width
        } else {
            word_width + 1
        };
        if !current.is_empty() && current_width + needed > width {
            wrapped.push(std::mem::take(&mut current));
            current_width = 0;
        }
        if !current.is_empty() {
            current.push(' ');
            current_width += 1;
        }
        current.push_str(word);
        current_width += word_width;
    }

    if !current.is_empty() {
        wrapped.push(current);
    }
    if wrapped.is_empty() {
        wrapped.push(String::new());
    }
    wrapped
}

/// Split a word at the last char boundary that fits the width.
///
/// Always takes at least one char so callers make progress even when the
/// first char is wider than the target.
fn split_at_width(word: &str, width: usize) -> (&str, &str) {
    let mut taken = 0usize;
    for (idx, ch) in word.char_indices() {
        let ch_width = ch.width().unwrap_or(0);
        if idx > 0 && taken + ch_width > width {
            return word.split_at(idx);
        }
        taken += ch_width;
    }
    (word, "")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(width: u16) -> PageOptions {
        PageOptions {
            width,
            ..PageOptions::default()
        }
    }

    #[test]
    fn test_masthead_chrome_is_three_rows() {
        let page = Page::from_text("Demo", "body text", &options(40));
        assert_eq!(page.header_height(), 3);
        assert_eq!(page.masthead_lines()[0].text(), "Demo");
        assert!(page.masthead_lines()[1].text().contains("Home"));
        assert_eq!(page.masthead_lines()[2].kind(), LineKind::Rule);
    }

    #[test]
    fn test_footer_carries_current_year() {
        let page = Page::from_text("Demo", "body", &options(40));
        let footer = page.lines().last().unwrap();
        assert_eq!(footer.kind(), LineKind::FooterYear);
        let year = Local::now().year().to_string();
        assert_eq!(year.len(), 4);
        assert!(footer.text().ends_with(&year), "footer: {}", footer.text());
    }

    #[test]
    fn test_body_lines_wrap_to_width() {
        let body = "one two three four five six seven eight nine ten";
        let page = Page::from_text("Demo", body, &options(12));
        for line in page.lines() {
            if line.kind() == LineKind::Body {
                assert!(
                    UnicodeWidthStr::width(line.text()) <= 12,
                    "too wide: {:?}",
                    line.text()
                );
            }
        }
    }

    #[test]
    fn test_blank_body_lines_are_preserved() {
        let page = Page::from_text("Demo", "first\n\nsecond", &options(40));
        let kinds: Vec<LineKind> = page
            .lines()
            .iter()
            .skip(page.header_height())
            .map(PageLine::kind)
            .take(4)
            .collect();
        assert_eq!(
            kinds,
            [
                LineKind::Empty,
                LineKind::Body,
                LineKind::Empty,
                LineKind::Body
            ]
        );
    }

    #[test]
    fn test_tabs_expand_to_spaces() {
        let page = Page::from_text("Demo", "a\tb", &options(40));
        let body: Vec<&str> = page
            .lines()
            .iter()
            .filter(|l| l.kind() == LineKind::Body)
            .map(PageLine::text)
            .collect();
        assert_eq!(body, ["a    b"]);
    }

    #[test]
    fn test_form_lines_present_by_default() {
        let page = Page::from_text("Demo", "body", &PageOptions::default());
        assert!(page.contact_form().is_some());
        assert!(page.form_line_index(0).is_some());
        assert!(page.form_line_index(3).is_some());
    }

    #[test]
    fn test_form_can_be_omitted() {
        let opts = PageOptions {
            include_form: false,
            ..PageOptions::default()
        };
        let page = Page::from_text("Demo", "body", &opts);
        assert!(page.contact_form().is_none());
        assert!(page.form_line_index(0).is_none());
        assert!(
            !page
                .lines()
                .iter()
                .any(|l| l.kind() == LineKind::FormHeading)
        );
    }

    #[test]
    fn test_form_edit_shows_after_recompose() {
        let mut page = Page::from_text("Demo", "body", &PageOptions::default());
        {
            let form = page.contact_form_mut().unwrap();
            form.focus_first();
            form.insert_char('A');
            form.insert_char('d');
            form.insert_char('a');
        }
        page.recompose();
        let idx = page.form_line_index(0).unwrap();
        assert_eq!(page.lines()[idx].text(), "  Name: Ada");
    }

    #[test]
    fn test_reflow_changes_wrapped_line_count() {
        let body = "one two three four five six seven eight nine ten";
        let mut page = Page::from_text("Demo", body, &options(80));
        let wide = page.line_count();
        page.set_width(12);
        assert!(page.line_count() > wide);
        page.set_width(80);
        assert_eq!(page.line_count(), wide);
    }

    #[test]
    fn test_load_uses_file_stem_as_title() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("welcome.txt");
        fs::write(&path, "hello").unwrap();
        let page = Page::load(&path, &PageOptions::default()).unwrap();
        assert_eq!(page.title(), "welcome");
    }

    #[test]
    fn test_load_missing_file_is_an_error() {
        let err = Page::load(Path::new("/no/such/page.txt"), &PageOptions::default());
        assert!(err.is_err());
    }

    #[test]
    fn test_title_option_overrides_stem() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("welcome.txt");
        fs::write(&path, "hello").unwrap();
        let opts = PageOptions {
            title: Some("Front Page".to_string()),
            ..PageOptions::default()
        };
        let page = Page::load(&path, &opts).unwrap();
        assert_eq!(page.title(), "Front Page");
        assert_eq!(page.masthead_lines()[0].text(), "Front Page");
    }

    #[test]
    fn test_wrap_line_hard_breaks_long_words() {
        let wrapped = wrap_line("abcdefghij", 4);
        assert_eq!(wrapped, ["abcd", "efgh", "ij"]);
    }

    #[test]
    fn test_wrap_line_keeps_short_lines_verbatim() {
        let wrapped = wrap_line("a  b", 10);
        assert_eq!(wrapped, ["a  b"]); // spacing preserved when no wrap needed
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn wrapped_lines_never_exceed_width(
                words in prop::collection::vec("[a-zA-Z0-9]{1,20}", 1..40),
                width in 1..60usize,
            ) {
                let line = words.join(" ");
                for wrapped in wrap_line(&line, width) {
                    prop_assert!(UnicodeWidthStr::width(wrapped.as_str()) <= width);
                }
            }

            #[test]
            fn wrapping_preserves_content(
                words in prop::collection::vec("[a-z]{1,12}", 1..30),
                width in 4..40usize,
            ) {
                let line = words.join(" ");
                // Hard breaks may split words, so compare with spacing removed.
                let rejoined = wrap_line(&line, width).join(" ").replace(' ', "");
                prop_assert_eq!(rejoined, line.replace(' ', ""));
            }
        }
    }
}
