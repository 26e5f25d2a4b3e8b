//! Extraction of resource records from a parsed document.

use once_cell::sync::Lazy;
use std::collections::HashSet;
use tracing::debug;

use super::record::{ResourceKind, ResourceRecord};
use crate::xml::{Document, Element, XmlError};

/// Tags that never become `Other` records.
static RESERVED_TAGS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    ["style", "item", "color", "string", "dimen", "drawable"]
        .into_iter()
        .collect()
});

/// Returns true if `tag` is handled by a first-class kind or is never a record.
pub fn is_reserved_tag(tag: &str) -> bool {
    RESERVED_TAGS.contains(tag)
}

/// Parses `text` and extracts its records.
pub fn extract(text: &str) -> Result<Vec<ResourceRecord>, XmlError> {
    let doc = Document::parse(text)?;
    Ok(extract_records(&doc))
}

/// Extracts records from the direct children of the document's root, in
/// document order.
///
/// Repeated keys are all returned; deciding between them is left to the merge.
pub fn extract_records(doc: &Document<'_>) -> Vec<ResourceRecord> {
    doc.root()
        .child_elements()
        .filter_map(|el| extract_element(doc, el))
        .collect()
}

fn extract_element(doc: &Document<'_>, el: &Element) -> Option<ResourceRecord> {
    let Some(name) = el.attribute("name") else {
        debug!(tag = %el.name, "skipping element without a name");
        return None;
    };

    let kind = if is_reserved_tag(&el.name) {
        match ResourceKind::first_class(&el.name) {
            Some(kind) => kind,
            None => {
                debug!(tag = %el.name, name, "skipping top-level reserved element");
                return None;
            }
        }
    } else {
        ResourceKind::Other(el.name.clone())
    };

    Some(ResourceRecord {
        kind,
        name: name.to_string(),
        value: doc.inner_text(el).to_string(),
        attributes: el.attributes_markup(&["name"]),
        raw_text: doc.outer_text(el).to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const STYLES: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<resources xmlns:tools="http://schemas.android.com/tools">
    <!-- Base application theme. -->
    <style name="AppTheme" parent="Theme.AppCompat.DayNight.NoActionBar">
        <item name="android:editTextBackground">@drawable/rn_edit_text_material</item>
        <item name="colorPrimary">@color/brand_primary</item>
    </style>
    <color name="brand_primary">#ABC123</color>
    <string name="app_name" translatable="false">Demo</string>
    <dimen name="logo_size">200dp</dimen>
    <drawable name="splash">@drawable/splash_screen</drawable>
    <integer name="anim_ms">300</integer>
    <item name="loose" type="id"/>
    <bool>true</bool>
</resources>"#;

    #[test]
    fn test_extract_all_kinds() {
        let records = extract(STYLES).unwrap();
        let keys: Vec<String> = records.iter().map(|r| r.key().to_string()).collect();

        assert_eq!(
            keys,
            vec![
                "style:AppTheme",
                "color:brand_primary",
                "string:app_name",
                "dimen:logo_size",
                "drawable:splash",
                "integer:anim_ms",
            ]
        );
    }

    #[test]
    fn test_style_keeps_attributes_and_body() {
        let records = extract(STYLES).unwrap();
        let style = &records[0];

        assert_eq!(style.kind, ResourceKind::Style);
        assert_eq!(
            style.attributes.as_deref(),
            Some(r#"parent="Theme.AppCompat.DayNight.NoActionBar""#)
        );
        assert!(style.value.contains("<item name=\"colorPrimary\">@color/brand_primary</item>"));
        assert!(style.raw_text.starts_with("<style name=\"AppTheme\""));
        assert!(style.raw_text.ends_with("</style>"));
    }

    #[test]
    fn test_leaf_values_and_extra_attributes() {
        let records = extract(STYLES).unwrap();

        assert_eq!(records[1].value, "#ABC123");
        assert_eq!(records[1].attributes, None);
        assert_eq!(records[2].value, "Demo");
        assert_eq!(records[2].attributes.as_deref(), Some(r#"translatable="false""#));
    }

    #[test]
    fn test_other_keeps_raw_text() {
        let records = extract(STYLES).unwrap();
        let other = &records[5];

        assert_eq!(other.kind, ResourceKind::Other("integer".into()));
        assert_eq!(other.raw_text, r#"<integer name="anim_ms">300</integer>"#);
    }

    #[test]
    fn test_nested_items_are_not_top_level() {
        let records = extract(STYLES).unwrap();
        assert!(records.iter().all(|r| r.kind != ResourceKind::Other("item".into())));
        assert!(is_reserved_tag("item"));
        assert!(!is_reserved_tag("plurals"));
    }

    #[test]
    fn test_reserved_tags_never_become_other() {
        for tag in RESERVED_TAGS.iter() {
            let text = format!(r#"<resources><{tag} name="x">v</{tag}></resources>"#);
            let records = extract(&text).unwrap();
            assert!(
                records.iter().all(|r| !matches!(r.kind, ResourceKind::Other(_))),
                "tag {} became {:?}",
                tag,
                records
            );
            assert_eq!(records.len(), usize::from(*tag != "item"), "tag {}", tag);
        }
    }

    #[test]
    fn test_value_resembling_a_closing_tag() {
        let text = r#"<resources><string name="tricky">a &lt;/string&gt; <b>b</b></string><color name="c">#000</color></resources>"#;
        let records = extract(text).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].value, "a &lt;/string&gt; <b>b</b>");
        assert_eq!(records[1].name, "c");
    }

    #[test]
    fn test_duplicates_are_kept() {
        let text = r#"<resources><color name="a">#1</color><color name="a">#2</color></resources>"#;
        let records = extract(text).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].value, "#1");
        assert_eq!(records[1].value, "#2");
    }

    #[test]
    fn test_self_closing_leaf_has_empty_value() {
        let records = extract(r#"<resources><color name="none"/></resources>"#).unwrap();
        assert_eq!(records[0].value, "");
    }

    #[test]
    fn test_malformed_input_is_an_error() {
        assert!(extract("<resources><color name=\"a\">#1</resources>").is_err());
    }
}
