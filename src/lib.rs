// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. page::PageLine)
    clippy::module_name_repetitions
)]

//! # Masthead
//!
//! A terminal page viewer with a scroll-aware masthead.
//!
//! Masthead renders a plain-text page in the terminal with:
//! - A masthead that pins after scrolling past it and slides back into
//!   view on upward scrolls
//! - A footer stamped with the current copyright year
//! - An in-page contact form with draft persistence
//! - File watching for live reload
//!
//! ## Architecture
//!
//! Masthead uses The Elm Architecture (TEA) pattern:
//! - **Model**: Application state
//! - **Message**: Events and actions
//! - **Update**: Pure state transitions
//! - **View**: Render to terminal
//!
//! ## Modules
//!
//! - [`app`]: Main application loop and state
//! - [`nav`]: Masthead pin/show scroll rules
//! - [`page`]: Page composition and the contact form
//! - [`ui`]: Terminal UI components
//! - [`watcher`]: File watching
//! - [`config`]: Saved flag defaults

pub mod app;
pub mod config;
pub mod nav;
pub mod page;
pub mod ui;
pub mod watcher;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::app::{App, Message, Model};
    pub use crate::nav::NavChrome;
    pub use crate::page::Page;
    pub use crate::ui::viewport::Viewport;
}
