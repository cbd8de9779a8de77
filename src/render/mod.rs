//! Terminal output: status lines, the data preview and error rendering.

pub mod error;
pub mod human;
pub mod reporter;

pub use error::render_error;
pub use human::{PREVIEW_ROWS, render_preview};
pub use reporter::Reporter;
