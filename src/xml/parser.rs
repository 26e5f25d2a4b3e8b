//! Recursive descent parser producing an element tree.

use thiserror::Error;

use super::element::{Attribute, Element, Node, Span};

/// XmlError describes why a document could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum XmlError {
    #[error("unexpected end of input in {context}")]
    UnexpectedEof { context: String },

    #[error("offset {offset}: expected </{expected}>, found </{found}>")]
    MismatchedTag {
        offset: usize,
        expected: String,
        found: String,
    },

    #[error("offset {offset}: {message}")]
    InvalidSyntax { offset: usize, message: String },

    #[error("document has no root element")]
    NoRoot,

    #[error("offset {offset}: content after the root element")]
    TrailingContent { offset: usize },

    #[error("offset {offset}: elements nested deeper than {}", MAX_DEPTH)]
    TooDeep { offset: usize },
}

impl XmlError {
    fn eof(context: impl Into<String>) -> Self {
        XmlError::UnexpectedEof {
            context: context.into(),
        }
    }

    fn invalid(offset: usize, message: impl Into<String>) -> Self {
        XmlError::InvalidSyntax {
            offset,
            message: message.into(),
        }
    }
}

/// Maximum element nesting accepted by the parser.
pub const MAX_DEPTH: usize = 256;

/// Parser walks a source text once, left to right.
pub(crate) struct Parser<'a> {
    src: &'a str,
    pos: usize,
    /// Number of elements currently open.
    depth: usize,
}

impl<'a> Parser<'a> {
    pub(crate) fn new(src: &'a str) -> Self {
        Parser { src, pos: 0, depth: 0 }
    }

    /// Parses the whole input and returns the prolog span and the root element.
    pub(crate) fn parse_document(mut self) -> Result<(Option<Span>, Element), XmlError> {
        if self.src.starts_with('\u{feff}') {
            self.pos = '\u{feff}'.len_utf8();
        }

        let mut prolog = None;
        let mut root: Option<Element> = None;

        loop {
            self.skip_whitespace();
            if self.at_end() {
                break;
            }

            if self.starts_with("<?") {
                let span = self.parse_delimited("<?", "?>", "processing instruction")?;
                if prolog.is_none() && root.is_none() && is_xml_declaration(&self.src[span.clone()]) {
                    prolog = Some(span);
                }
            } else if self.starts_with("<!--") {
                self.parse_delimited("<!--", "-->", "comment")?;
            } else if self.starts_with("<!DOCTYPE") {
                if root.is_some() {
                    return Err(XmlError::TrailingContent { offset: self.pos });
                }
                self.parse_doctype()?;
            } else if self.starts_with("<") {
                if root.is_some() {
                    return Err(XmlError::TrailingContent { offset: self.pos });
                }
                root = Some(self.parse_element()?);
            } else if root.is_some() {
                return Err(XmlError::TrailingContent { offset: self.pos });
            } else {
                return Err(XmlError::invalid(self.pos, "text before the root element"));
            }
        }

        root.map(|r| (prolog, r)).ok_or(XmlError::NoRoot)
    }

    fn parse_element(&mut self) -> Result<Element, XmlError> {
        if self.depth >= MAX_DEPTH {
            return Err(XmlError::TooDeep { offset: self.pos });
        }
        self.depth += 1;
        let element = self.parse_element_body();
        self.depth -= 1;
        element
    }

    fn parse_element_body(&mut self) -> Result<Element, XmlError> {
        let start = self.pos;
        self.pos += 1;
        let name = self.parse_name()?;
        let mut attributes = Vec::new();

        loop {
            let had_space = self.skip_whitespace();
            match self.peek() {
                None => return Err(XmlError::eof(format!("start tag <{}>", name))),
                Some(b'>') => {
                    self.pos += 1;
                    break;
                }
                Some(b'/') => {
                    if !self.starts_with("/>") {
                        return Err(XmlError::invalid(self.pos, "expected '/>'"));
                    }
                    self.pos += 2;
                    return Ok(Element {
                        name,
                        attributes,
                        children: Vec::new(),
                        span: start..self.pos,
                        open_tag: start..self.pos,
                        inner: None,
                    });
                }
                Some(_) => {
                    if !had_space {
                        return Err(XmlError::invalid(
                            self.pos,
                            "expected whitespace before attribute",
                        ));
                    }
                    attributes.push(self.parse_attribute()?);
                }
            }
        }

        let open_tag = start..self.pos;
        let inner_start = self.pos;
        let mut children = Vec::new();

        loop {
            if self.at_end() {
                return Err(XmlError::eof(format!("element <{}>", name)));
            }

            if self.starts_with("</") {
                let inner_end = self.pos;
                self.pos += 2;
                let found = self.parse_name()?;
                self.skip_whitespace();
                if self.peek() != Some(b'>') {
                    return Err(XmlError::invalid(self.pos, "expected '>' after closing tag name"));
                }
                self.pos += 1;
                if found != name {
                    return Err(XmlError::MismatchedTag {
                        offset: inner_end,
                        expected: name,
                        found,
                    });
                }
                return Ok(Element {
                    name,
                    attributes,
                    children,
                    span: start..self.pos,
                    open_tag,
                    inner: Some(inner_start..inner_end),
                });
            }

            let child = if self.starts_with("<!--") {
                Node::Comment(self.parse_delimited("<!--", "-->", "comment")?)
            } else if self.starts_with("<![CDATA[") {
                Node::CData(self.parse_delimited("<![CDATA[", "]]>", "CDATA section")?)
            } else if self.starts_with("<?") {
                Node::ProcessingInstruction(self.parse_delimited(
                    "<?",
                    "?>",
                    "processing instruction",
                )?)
            } else if self.starts_with("<") {
                Node::Element(self.parse_element()?)
            } else {
                let text_start = self.pos;
                self.pos = self.src[self.pos..]
                    .find('<')
                    .map_or(self.src.len(), |i| self.pos + i);
                Node::Text(text_start..self.pos)
            };
            children.push(child);
        }
    }

    fn parse_attribute(&mut self) -> Result<Attribute, XmlError> {
        let name = self.parse_name()?;
        self.skip_whitespace();
        if self.peek() != Some(b'=') {
            return Err(XmlError::invalid(
                self.pos,
                format!("expected '=' after attribute {}", name),
            ));
        }
        self.pos += 1;
        self.skip_whitespace();

        let quote = match self.peek() {
            Some(q @ (b'"' | b'\'')) => q as char,
            Some(_) => {
                return Err(XmlError::invalid(
                    self.pos,
                    format!("unquoted value for attribute {}", name),
                ))
            }
            None => return Err(XmlError::eof(format!("attribute {}", name))),
        };
        self.pos += 1;

        let end = self.src[self.pos..]
            .find(quote)
            .map(|i| self.pos + i)
            .ok_or_else(|| XmlError::eof(format!("attribute {}", name)))?;
        let value = self.src[self.pos..end].to_string();
        self.pos = end + 1;

        Ok(Attribute { name, value, quote })
    }

    fn parse_name(&mut self) -> Result<String, XmlError> {
        let start = self.pos;
        while let Some(b) = self.peek() {
            if b.is_ascii_whitespace() || matches!(b, b'>' | b'/' | b'=' | b'<' | b'"' | b'\'') {
                break;
            }
            self.pos += 1;
        }
        if self.pos == start {
            return Err(XmlError::invalid(start, "expected a name"));
        }
        Ok(self.src[start..self.pos].to_string())
    }

    /// Consumes a construct bounded by fixed open and close markers.
    fn parse_delimited(&mut self, open: &str, close: &str, context: &str) -> Result<Span, XmlError> {
        let start = self.pos;
        let body = start + open.len();
        let end = self.src[body..]
            .find(close)
            .map(|i| body + i + close.len())
            .ok_or_else(|| XmlError::eof(context))?;
        self.pos = end;
        Ok(start..end)
    }

    /// Skips a DOCTYPE declaration, including a bracketed internal subset.
    fn parse_doctype(&mut self) -> Result<Span, XmlError> {
        let start = self.pos;
        let mut depth = 0usize;
        let mut quote: Option<u8> = None;
        while let Some(b) = self.peek() {
            self.pos += 1;
            match (quote, b) {
                (Some(q), _) if b == q => quote = None,
                (Some(_), _) => {}
                (None, b'"' | b'\'') => quote = Some(b),
                (None, b'[') => depth += 1,
                (None, b']') => depth = depth.saturating_sub(1),
                (None, b'>') if depth == 0 => return Ok(start..self.pos),
                _ => {}
            }
        }
        Err(XmlError::eof("DOCTYPE"))
    }

    fn skip_whitespace(&mut self) -> bool {
        let start = self.pos;
        while self.peek().is_some_and(|b| b.is_ascii_whitespace()) {
            self.pos += 1;
        }
        self.pos > start
    }

    fn peek(&self) -> Option<u8> {
        self.src.as_bytes().get(self.pos).copied()
    }

    fn starts_with(&self, s: &str) -> bool {
        self.src[self.pos..].starts_with(s)
    }

    fn at_end(&self) -> bool {
        self.pos >= self.src.len()
    }
}

fn is_xml_declaration(pi: &str) -> bool {
    pi.strip_prefix("<?xml")
        .and_then(|rest| rest.chars().next())
        .is_some_and(|c| c.is_whitespace() || c == '?')
}
