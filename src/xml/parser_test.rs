//! Tests for the element tree parser.

#[cfg(test)]
mod tests {
    use crate::xml::{Document, Node, XmlError, MAX_DEPTH};

    #[test]
    fn test_parse_prolog_and_root() {
        let src = r#"<?xml version="1.0" encoding="utf-8"?>
<resources>
    <color name="a">#111</color>
</resources>"#;
        let doc = Document::parse(src).unwrap();

        assert_eq!(doc.prolog(), Some(r#"<?xml version="1.0" encoding="utf-8"?>"#));
        assert_eq!(doc.root().name, "resources");

        let colors: Vec<_> = doc.root().child_elements().collect();
        assert_eq!(colors.len(), 1);
        assert_eq!(colors[0].attribute("name"), Some("a"));
        assert_eq!(doc.inner_text(colors[0]), "#111");
        assert_eq!(doc.outer_text(colors[0]), r#"<color name="a">#111</color>"#);
    }

    #[test]
    fn test_parse_without_prolog() {
        let doc = Document::parse("<resources/>").unwrap();
        assert_eq!(doc.prolog(), None);
        assert!(doc.root().is_self_closing());
        assert_eq!(doc.inner_text(doc.root()), "");
    }

    #[test]
    fn test_stylesheet_instruction_is_not_a_prolog() {
        let doc = Document::parse(r#"<?xml-stylesheet href="a.xsl"?><root/>"#).unwrap();
        assert_eq!(doc.prolog(), None);
    }

    #[test]
    fn test_attribute_quotes_and_angle_brackets() {
        let src = r#"<root><style name='Theme' parent="A>B" tools:ignore = "x"/></root>"#;
        let doc = Document::parse(src).unwrap();
        let style = doc.root().child_elements().next().unwrap();

        assert_eq!(style.attribute("name"), Some("Theme"));
        assert_eq!(style.attribute("parent"), Some("A>B"));
        assert_eq!(style.attributes[0].quote, '\'');
        assert_eq!(
            style.attributes_markup(&["name"]).as_deref(),
            Some(r#"parent="A>B" tools:ignore="x""#)
        );
    }

    #[test]
    fn test_markup_inside_value_is_kept_verbatim() {
        let src = r#"<resources><string name="s">Hi <b>there</b> &amp; </string></resources>"#;
        let doc = Document::parse(src).unwrap();
        let s = doc.root().child_elements().next().unwrap();

        assert_eq!(doc.inner_text(s), "Hi <b>there</b> &amp; ");
        assert_eq!(s.child_elements().count(), 1);
    }

    #[test]
    fn test_comments_cdata_and_doctype() {
        let src = r#"<?xml version="1.0"?>
<!DOCTYPE resources [ <!ENTITY app "Demo"> ]>
<!-- leading -->
<resources>
    <!-- inside <color> -->
    <string name="raw"><![CDATA[<not a tag>]]></string>
</resources>
<!-- trailing -->
"#;
        let doc = Document::parse(src).unwrap();
        let root = doc.root();

        assert!(root
            .children
            .iter()
            .any(|n| matches!(n, Node::Comment(span) if doc.slice(span).contains("inside"))));
        let s = root.child_elements().next().unwrap();
        assert!(matches!(s.children[0], Node::CData(_)));
        assert_eq!(root.child_elements().count(), 1);
    }

    #[test]
    fn test_byte_order_mark() {
        let doc = Document::parse("\u{feff}<resources></resources>").unwrap();
        assert_eq!(doc.root().name, "resources");
    }

    #[test]
    fn test_mismatched_tag() {
        let err = Document::parse("<resources><color name=\"a\">#1</string></resources>").unwrap_err();
        assert!(matches!(
            err,
            XmlError::MismatchedTag { ref expected, ref found, .. } if expected == "color" && found == "string"
        ));
    }

    #[test]
    fn test_errors() {
        let cases = [
            ("", XmlError::NoRoot),
            ("   <!-- only a comment -->  ", XmlError::NoRoot),
        ];
        for (src, expected) in cases {
            assert_eq!(Document::parse(src).unwrap_err(), expected, "input: {:?}", src);
        }

        assert!(matches!(
            Document::parse("<a></a><b></b>"),
            Err(XmlError::TrailingContent { offset: 7 })
        ));
        assert!(matches!(
            Document::parse("<a></a> tail"),
            Err(XmlError::TrailingContent { .. })
        ));
        assert!(matches!(
            Document::parse("<resources><color name=\"a\">"),
            Err(XmlError::UnexpectedEof { .. })
        ));
        assert!(matches!(
            Document::parse("<a b=c></a>"),
            Err(XmlError::InvalidSyntax { .. })
        ));
        assert!(matches!(
            Document::parse("not markup at all"),
            Err(XmlError::InvalidSyntax { .. })
        ));
        assert!(matches!(
            Document::parse("<a><!-- open </a>"),
            Err(XmlError::UnexpectedEof { .. })
        ));
    }

    #[test]
    fn test_spans_are_exact() {
        let src = "<root attr=\"1\">\n  <child/>\n</root>";
        let doc = Document::parse(src).unwrap();
        let root = doc.root();

        assert_eq!(doc.open_tag_text(root), "<root attr=\"1\">");
        assert_eq!(doc.inner_text(root), "\n  <child/>\n");
        assert_eq!(doc.outer_text(root), src);
    }

    fn nested(depth: usize) -> String {
        format!("<menu>{}{}</menu>", "<a>".repeat(depth), "</a>".repeat(depth))
    }

    #[test]
    fn test_nesting_at_the_limit() {
        // The root counts as one level.
        let src = nested(MAX_DEPTH - 1);
        let doc = Document::parse(&src).unwrap();
        assert_eq!(doc.root().name, "menu");
    }

    #[test]
    fn test_nesting_beyond_the_limit() {
        for depth in [MAX_DEPTH, 10_000] {
            let src = nested(depth);
            let err = Document::parse(&src).unwrap_err();
            let expected_offset = "<menu>".len() + "<a>".len() * (MAX_DEPTH - 1);
            assert_eq!(err, XmlError::TooDeep { offset: expected_offset }, "depth {}", depth);
        }
    }
}
