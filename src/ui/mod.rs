//! Terminal UI components.
//!
//! This module contains all UI-related code including:
//! - [`viewport`]: Scroll position and visible range management
//! - [`style`]: Theming and colors
//! - [`render`]: Frame composition, including the floating masthead bar

pub mod style;
pub mod viewport;

mod overlays;
mod render;
mod status;

pub use render::render;

#[cfg(test)]
mod tests;
