pub mod models;
pub mod preview;
pub mod errors;

pub use models::*;
pub use preview::*;
pub use errors::*;
