//! Application layer holding the controller state and its message types.
//!
//! The controller is a plain state machine: events go in, effects come out.
//! Nothing here touches the terminal, the network or the clipboard.

pub mod events;
pub mod help;
pub mod state;

pub use events::*;
pub use help::*;
pub use state::*;
