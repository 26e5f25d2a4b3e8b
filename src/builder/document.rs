//! Deterministic rendering of resource documents.

use crate::merge::DEFAULT_CONTAINER;
use crate::resource::{ResourceKind, ResourceRecord};

/// Declaration written when neither input document carries one.
pub const DEFAULT_PROLOG: &str = r#"<?xml version="1.0" encoding="utf-8"?>"#;

const INDENT: &str = "    ";
const BODY_INDENT: &str = "        ";

/// DocumentBuilder renders records grouped by kind inside one container element.
///
/// Rendering is a fixpoint: extracting the records of a built document and
/// building them again reproduces the same text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentBuilder {
    prolog: String,
    container: String,
    container_attributes: Option<String>,
}

impl Default for DocumentBuilder {
    fn default() -> Self {
        DocumentBuilder {
            prolog: DEFAULT_PROLOG.to_string(),
            container: DEFAULT_CONTAINER.to_string(),
            container_attributes: None,
        }
    }
}

impl DocumentBuilder {
    pub fn new() -> Self {
        DocumentBuilder::default()
    }

    /// Sets the declaration line.
    pub fn prolog(mut self, prolog: impl Into<String>) -> Self {
        self.prolog = prolog.into();
        self
    }

    /// Sets the container element name.
    pub fn container(mut self, container: impl Into<String>) -> Self {
        self.container = container.into();
        self
    }

    /// Sets the attribute markup of the container open tag.
    pub fn container_attributes(mut self, attributes: Option<String>) -> Self {
        self.container_attributes = attributes;
        self
    }

    /// Builds the document text.
    pub fn build(&self, records: &[ResourceRecord]) -> String {
        let mut out = String::new();
        out.push_str(&self.prolog);
        out.push('\n');
        out.push('<');
        out.push_str(&self.container);
        if let Some(attrs) = &self.container_attributes {
            out.push(' ');
            out.push_str(attrs);
        }
        out.push_str(">\n");

        for (kind, group) in group_by_kind(records) {
            out.push_str(&format!("\n{INDENT}<!-- {} Resources -->\n", kind.label()));
            for record in group {
                out.push_str(&render_record(record));
                out.push('\n');
            }
        }

        out.push_str(&format!("\n</{}>\n", self.container));
        out
    }
}

/// Groups records by kind: the fixed kinds first, then `Other` tags in order
/// of first appearance. Empty groups are omitted.
fn group_by_kind(records: &[ResourceRecord]) -> Vec<(ResourceKind, Vec<&ResourceRecord>)> {
    let mut kinds: Vec<ResourceKind> = ResourceKind::ORDERED.to_vec();
    for record in records {
        if matches!(record.kind, ResourceKind::Other(_)) && !kinds.contains(&record.kind) {
            kinds.push(record.kind.clone());
        }
    }

    kinds
        .into_iter()
        .filter_map(|kind| {
            let group: Vec<&ResourceRecord> = records.iter().filter(|r| r.kind == kind).collect();
            (!group.is_empty()).then_some((kind, group))
        })
        .collect()
}

fn render_record(record: &ResourceRecord) -> String {
    match &record.kind {
        ResourceKind::Style => render_style(record),
        ResourceKind::Other(_) => render_raw(&record.raw_text),
        _ => render_leaf(record),
    }
}

fn open_tag(record: &ResourceRecord) -> String {
    let mut tag = format!("<{} name={}", record.kind.tag(), quote(&record.name));
    if let Some(attrs) = &record.attributes {
        tag.push(' ');
        tag.push_str(attrs);
    }
    tag
}

fn render_leaf(record: &ResourceRecord) -> String {
    if record.value.is_empty() {
        format!("{INDENT}{}/>", open_tag(record))
    } else {
        format!(
            "{INDENT}{}>{}</{}>",
            open_tag(record),
            record.value,
            record.kind.tag()
        )
    }
}

fn render_style(record: &ResourceRecord) -> String {
    let lines: Vec<&str> = trimmed_lines(&record.value).collect();
    if lines.is_empty() {
        return format!("{INDENT}{}/>", open_tag(record));
    }

    let mut out = format!("{INDENT}{}>\n", open_tag(record));
    for line in lines {
        out.push_str(BODY_INDENT);
        out.push_str(line);
        out.push('\n');
    }
    out.push_str(&format!("{INDENT}</{}>", record.kind.tag()));
    out
}

/// Re-indents raw markup: outer lines at the base level, inner lines one deeper.
fn render_raw(raw: &str) -> String {
    let lines: Vec<&str> = trimmed_lines(raw).collect();
    let last = lines.len().saturating_sub(1);
    lines
        .iter()
        .enumerate()
        .map(|(i, line)| {
            let indent = if i == 0 || i == last { INDENT } else { BODY_INDENT };
            format!("{indent}{line}")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn trimmed_lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines().map(str::trim).filter(|line| !line.is_empty())
}

fn quote(value: &str) -> String {
    if value.contains('"') {
        format!("'{}'", value)
    } else {
        format!("\"{}\"", value)
    }
}
