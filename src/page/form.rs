//! Contact form state and draft persistence.
//!
//! The form is part of the page flow: four labeled fields the user can move
//! through and edit. Values typed into the form survive across sessions via
//! a JSON draft file next to the page, which is how a true `--message-sent`
//! flag has something observable to clear at startup.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Suffix appended to the page file name to derive the draft path.
const DRAFT_SUFFIX: &str = ".masthead-draft.json";

/// One editable field of the contact form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    label: &'static str,
    value: String,
}

impl FormField {
    const fn new(label: &'static str) -> Self {
        Self {
            label,
            value: String::new(),
        }
    }

    /// The field's display label.
    pub const fn label(&self) -> &'static str {
        self.label
    }

    /// The field's current value.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Whether the field still holds its default (empty) value.
    pub fn is_default(&self) -> bool {
        self.value.is_empty()
    }
}

/// The contact form rendered at the bottom of the page.
///
/// Focus is part of the form state: `focused` is `None` while the user is
/// browsing and `Some(index)` while editing. Edit operations on an
/// unfocused form are no-ops.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactForm {
    fields: [FormField; 4],
    focused: Option<usize>,
}

impl Default for ContactForm {
    fn default() -> Self {
        Self::new()
    }
}

impl ContactForm {
    /// Create an empty form with the standard contact fields.
    pub const fn new() -> Self {
        Self {
            fields: [
                FormField::new("Name"),
                FormField::new("Email"),
                FormField::new("Phone"),
                FormField::new("Message"),
            ],
            focused: None,
        }
    }

    /// All fields in display order.
    pub const fn fields(&self) -> &[FormField] {
        &self.fields
    }

    /// Index of the focused field, if the form is being edited.
    pub const fn focused(&self) -> Option<usize> {
        self.focused
    }

    /// Whether every field holds its default value.
    pub fn is_empty(&self) -> bool {
        self.fields.iter().all(FormField::is_default)
    }

    /// Reset every field to its default value.
    ///
    /// Mirrors a form reset after a successful submission: values are
    /// discarded, labels and field order are untouched.
    pub fn reset(&mut self) {
        for field in &mut self.fields {
            field.value.clear();
        }
    }

    /// Begin editing at the first field.
    pub const fn focus_first(&mut self) {
        self.focused = Some(0);
    }

    /// Begin editing at a specific field. Out-of-range indices are ignored.
    pub const fn focus_field(&mut self, idx: usize) {
        if idx < self.fields.len() {
            self.focused = Some(idx);
        }
    }

    /// Move focus to the next field, wrapping at the end.
    pub const fn focus_next(&mut self) {
        if let Some(idx) = self.focused {
            self.focused = Some((idx + 1) % self.fields.len());
        }
    }

    /// Move focus to the previous field, wrapping at the start.
    pub const fn focus_prev(&mut self) {
        if let Some(idx) = self.focused {
            self.focused = Some(if idx == 0 { self.fields.len() - 1 } else { idx - 1 });
        }
    }

    /// Stop editing.
    pub const fn blur(&mut self) {
        self.focused = None;
    }

    /// Append a character to the focused field.
    pub fn insert_char(&mut self, ch: char) {
        if let Some(idx) = self.focused {
            self.fields[idx].value.push(ch);
        }
    }

    /// Remove the last character of the focused field.
    pub fn backspace(&mut self) {
        if let Some(idx) = self.focused {
            self.fields[idx].value.pop();
        }
    }

    /// Overwrite field values from a draft.
    pub fn apply_draft(&mut self, draft: &FormDraft) {
        self.fields[0].value = draft.name.clone();
        self.fields[1].value = draft.email.clone();
        self.fields[2].value = draft.phone.clone();
        self.fields[3].value = draft.message.clone();
    }

    /// Snapshot the current values for persistence.
    pub fn to_draft(&self) -> FormDraft {
        FormDraft {
            name: self.fields[0].value.clone(),
            email: self.fields[1].value.clone(),
            phone: self.fields[2].value.clone(),
            message: self.fields[3].value.clone(),
        }
    }
}

/// Serialized form values, stored next to the page file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormDraft {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub message: String,
}

impl FormDraft {
    /// Whether the draft carries no values worth persisting.
    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
            && self.email.is_empty()
            && self.phone.is_empty()
            && self.message.is_empty()
    }
}

/// The draft file path for a page: the page path with a suffix appended.
pub fn draft_path(page_path: &Path) -> PathBuf {
    let mut name = page_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    name.push_str(DRAFT_SUFFIX);
    page_path.with_file_name(name)
}

/// Load a draft, degrading to `None` on any failure.
///
/// A missing draft is the normal case. An unreadable or malformed one is
/// logged and otherwise treated the same: the form starts empty.
pub fn load_draft(path: &Path) -> Option<FormDraft> {
    if !path.exists() {
        return None;
    }
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) => {
            warn!("Failed to read draft {}: {err}", path.display());
            return None;
        }
    };
    match serde_json::from_str(&content) {
        Ok(draft) => {
            debug!("Loaded draft from {}", path.display());
            Some(draft)
        }
        Err(err) => {
            warn!("Ignoring malformed draft {}: {err}", path.display());
            None
        }
    }
}

/// Write a draft to disk, creating parent directories as needed.
pub fn save_draft(path: &Path, draft: &FormDraft) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create draft dir {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(draft).context("Failed to serialize draft")?;
    fs::write(path, json).with_context(|| format!("Failed to write draft {}", path.display()))
}

/// Remove a draft file if one exists.
pub fn clear_draft(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path)
            .with_context(|| format!("Failed to remove draft {}", path.display()))?;
    }
    Ok(())
}
