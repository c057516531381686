//! Terminal UI module using ratatui.
//!
//! - `render`: frame layout, status bar and overlays
//! - `roster`: the client table
//! - `input`: keyboard event handling
//! - `styles`: colors and text styling

pub mod input;
pub mod render;
pub mod roster;
pub mod styles;
