//! ocrdesk - terminal front-end for an image-to-text recognition server.
//!
//! Pick an image, preview it in the terminal, send it to the server's
//! `/predict` endpoint and copy the recognized text to the clipboard.

pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod presentation;
pub mod config;
pub mod error;

pub use domain::*;
pub use application::*;
