//! Builder module - Renders record collections back to document text.

mod document;

pub use document::*;
