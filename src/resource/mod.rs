//! Resource module - Typed records extracted from resource documents.
//!
//! A record is one named declaration (a color, a string, a style block...)
//! keyed by its kind and name.

mod extract;
mod record;

pub use extract::*;
pub use record::*;
