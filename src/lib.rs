//! # Resource Merge
//!
//! Merges generated resource documents into existing ones without losing
//! hand-written entries.
//!
//! A resource document is a markup file whose root container (by default
//! `<resources>`) holds named declarations such as colors, strings,
//! dimensions, drawables and style blocks. Generators that write such files
//! use [`merge_file`] instead of overwriting: new entries are added, entries
//! the developer already has are kept, and re-running the generator on
//! unchanged input leaves the file byte-for-byte identical.
//!
//! ## Modules
//!
//! - [`xml`] - Element tree parser with exact source spans
//! - [`resource`] - Typed resource records and their extraction
//! - [`merge`] - Merge policies, text fallbacks and file level entry points
//! - [`builder`] - Deterministic rendering of record collections
//! - [`backup`] - Timestamped snapshots before destructive writes
//! - [`config`] - YAML config files and batch manifests

pub mod backup;
pub mod builder;
pub mod config;
pub mod error;
pub mod logging;
pub mod merge;
pub mod resource;
pub mod xml;

pub use backup::{create_backup, try_create_backup};
pub use builder::DocumentBuilder;
pub use error::{Error, Result};
pub use merge::{
    merge_all, merge_file, merge_records, merge_text, MergeBehavior, MergeJob, MergeOptions,
    MergeOutcome, MergeStrategy,
};
pub use resource::{extract, ResourceKind, ResourceRecord};
pub use xml::Document;
