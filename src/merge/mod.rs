//! Merge module - Combining generated resource documents with existing ones.
//!
//! Resource documents are merged record by record; anything else falls back to
//! text-level strategies that always keep the existing content.

mod batch;
mod fallback;
mod options;
mod orchestrator;
mod policy;


pub use batch::*;
pub use fallback::*;
pub use options::*;
pub use orchestrator::*;
pub use policy::*;
