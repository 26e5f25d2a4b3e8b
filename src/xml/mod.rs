//! XML module - A small element tree over resource documents.
//!
//! The parser keeps every byte of the source addressable: elements carry the
//! span of their full markup, their open tag and their inner content, so the
//! layers above can re-emit developer-written text exactly as it was found.

mod element;
mod parser;

#[cfg(test)]
mod parser_test;

pub use element::*;
pub use parser::*;
