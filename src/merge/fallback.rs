//! Text-level strategies for documents that are not resource documents.

use crate::builder::DEFAULT_PROLOG;
use crate::xml::Document;

/// Returns `existing` followed by a separator comment and `new_text`.
pub fn append_text(existing: &str, new_text: &str, generator: &str) -> String {
    format!(
        "{}\n\n<!-- Generated by {} -->\n{}",
        existing, generator, new_text
    )
}

/// Concatenates the bodies of two documents that share a root element.
///
/// The existing root open tag is kept as written and the existing body comes
/// first. Returns `None` when the root names differ.
pub fn root_merge(existing: &Document<'_>, new: &Document<'_>) -> Option<String> {
    let root = existing.root();
    if root.name != new.root().name {
        return None;
    }

    let prolog = existing
        .prolog()
        .or_else(|| new.prolog())
        .unwrap_or(DEFAULT_PROLOG);

    let open_tag = if root.is_self_closing() {
        match root.attributes_markup(&[]) {
            Some(attrs) => format!("<{} {}>", root.name, attrs),
            None => format!("<{}>", root.name),
        }
    } else {
        existing.open_tag_text(root).to_string()
    };

    let mut out = format!("{}\n{}\n", prolog, open_tag);
    for body in [
        trim_body(existing.inner_text(root)),
        trim_body(new.inner_text(new.root())),
    ] {
        if !body.is_empty() {
            out.push_str(body);
            out.push('\n');
        }
    }
    out.push_str(&format!("</{}>\n", root.name));
    Some(out)
}

/// Drops leading blank lines and trailing whitespace, keeping the indentation
/// of the first non-blank line.
fn trim_body(body: &str) -> &str {
    match body.find(|c: char| !c.is_whitespace()) {
        Some(first) => {
            let line_start = body[..first].rfind('\n').map_or(0, |nl| nl + 1);
            body[line_start..].trim_end()
        }
        None => "",
    }
}
