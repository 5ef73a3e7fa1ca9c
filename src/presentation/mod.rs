//! Presentation layer handling terminal UI and user input.
//!
//! This module renders the controller state with ratatui and maps keyboard
//! and mouse input to controller events.

pub mod layout;
pub mod ui;
pub mod input;

pub use layout::*;
pub use ui::*;
pub use input::*;
