//! Element tree types.

use std::ops::Range;

use super::parser::{Parser, XmlError};

/// Byte range into the source text of a [`Document`].
pub type Span = Range<usize>;

/// Attribute is a single `name="value"` pair on a start tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    /// Raw attribute value. Entities are not decoded.
    pub value: String,
    /// The quote character the value was written with.
    pub quote: char,
}

impl Attribute {
    /// Renders the attribute back to markup, keeping its quote character.
    pub fn to_markup(&self) -> String {
        format!("{}={q}{}{q}", self.name, self.value, q = self.quote)
    }
}

/// Node is one child of an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(Span),
    Comment(Span),
    CData(Span),
    ProcessingInstruction(Span),
}

impl Node {
    /// Returns the element if this node is one.
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(el) => Some(el),
            _ => None,
        }
    }
}

/// Element is a parsed start/end tag pair (or a self-closing tag).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<Attribute>,
    pub children: Vec<Node>,
    /// Span of the whole element, from `<` of the open tag to `>` of the close tag.
    pub span: Span,
    /// Span of the open tag only.
    pub open_tag: Span,
    /// Span between the open and close tags; `None` for self-closing elements.
    pub inner: Option<Span>,
}

impl Element {
    /// Returns the value of the named attribute.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    pub fn is_self_closing(&self) -> bool {
        self.inner.is_none()
    }

    /// Returns an iterator over the direct child elements.
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(Node::as_element)
    }

    /// Renders the attributes other than those named in `skip`, space separated.
    ///
    /// Returns `None` when nothing remains.
    pub fn attributes_markup(&self, skip: &[&str]) -> Option<String> {
        let rendered: Vec<String> = self
            .attributes
            .iter()
            .filter(|a| !skip.contains(&a.name.as_str()))
            .map(Attribute::to_markup)
            .collect();
        if rendered.is_empty() {
            None
        } else {
            Some(rendered.join(" "))
        }
    }
}

/// Document is a parsed source text with its optional prolog and root element.
#[derive(Debug, Clone)]
pub struct Document<'a> {
    source: &'a str,
    prolog: Option<Span>,
    root: Element,
}

impl<'a> Document<'a> {
    /// Parses a document.
    pub fn parse(source: &'a str) -> Result<Document<'a>, XmlError> {
        let (prolog, root) = Parser::new(source).parse_document()?;
        Ok(Document {
            source,
            prolog,
            root,
        })
    }

    /// Returns the source text the document was parsed from.
    pub fn source(&self) -> &'a str {
        self.source
    }

    /// Returns the `<?xml ...?>` declaration, if present.
    pub fn prolog(&self) -> Option<&'a str> {
        self.prolog.clone().map(|span| &self.source[span])
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    /// Returns the source text covered by `span`.
    pub fn slice(&self, span: &Span) -> &'a str {
        &self.source[span.clone()]
    }

    /// Returns the full markup of an element.
    pub fn outer_text(&self, el: &Element) -> &'a str {
        self.slice(&el.span)
    }

    /// Returns the markup between an element's tags, or `""` for self-closing elements.
    pub fn inner_text(&self, el: &Element) -> &'a str {
        el.inner.as_ref().map_or("", |span| self.slice(span))
    }

    /// Returns the open tag of an element exactly as written.
    pub fn open_tag_text(&self, el: &Element) -> &'a str {
        self.slice(&el.open_tag)
    }
}
