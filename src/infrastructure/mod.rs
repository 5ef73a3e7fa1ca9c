//! Infrastructure layer providing external service integrations.
//!
//! This module contains the pieces that touch the outside world: the file
//! system, the recognition server, the clipboard, timers and logging.

pub mod clipboard;
pub mod executor;
pub mod file_reader;
pub mod logging;
pub mod recognition;
pub mod timers;

pub use clipboard::*;
pub use executor::*;
pub use file_reader::*;
pub use logging::*;
pub use recognition::*;
pub use timers::*;
