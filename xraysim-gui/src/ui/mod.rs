//! UI rendering modules.
//!
//! - `control_panel`: Left sidebar with exposure controls
//! - `main_view`: Central panel with the synthesized frame
//! - `theme`: Colors and styling

mod control_panel;
mod main_view;
pub mod theme;
