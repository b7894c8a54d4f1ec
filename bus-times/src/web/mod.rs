//! HTML rendering of the page model.

pub mod templates;

pub use templates::*;
