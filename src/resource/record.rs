//! Resource record types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// ResourceKind is the element type of a resource declaration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Color,
    String,
    Dimension,
    Drawable,
    Style,
    /// Any other named element, identified by its tag.
    Other(String),
}

impl ResourceKind {
    /// Kinds in the order their groups are rendered. `Other` groups follow.
    pub const ORDERED: [ResourceKind; 5] = [
        ResourceKind::Color,
        ResourceKind::String,
        ResourceKind::Dimension,
        ResourceKind::Drawable,
        ResourceKind::Style,
    ];

    /// Returns the first-class kind for `tag`, if it has one.
    pub fn first_class(tag: &str) -> Option<ResourceKind> {
        match tag {
            "color" => Some(ResourceKind::Color),
            "string" => Some(ResourceKind::String),
            "dimen" => Some(ResourceKind::Dimension),
            "drawable" => Some(ResourceKind::Drawable),
            "style" => Some(ResourceKind::Style),
            _ => None,
        }
    }

    /// Maps an element tag to its kind.
    pub fn from_tag(tag: &str) -> ResourceKind {
        Self::first_class(tag).unwrap_or_else(|| ResourceKind::Other(tag.to_string()))
    }

    /// Returns the element tag used for this kind.
    pub fn tag(&self) -> &str {
        match self {
            ResourceKind::Color => "color",
            ResourceKind::String => "string",
            ResourceKind::Dimension => "dimen",
            ResourceKind::Drawable => "drawable",
            ResourceKind::Style => "style",
            ResourceKind::Other(tag) => tag,
        }
    }

    /// Returns true for single-value kinds rendered on one line.
    pub fn is_leaf(&self) -> bool {
        !matches!(self, ResourceKind::Style | ResourceKind::Other(_))
    }

    /// Returns the group label used in banner comments.
    pub fn label(&self) -> String {
        match self {
            ResourceKind::Color => "Color".to_string(),
            ResourceKind::String => "String".to_string(),
            ResourceKind::Dimension => "Dimension".to_string(),
            ResourceKind::Drawable => "Drawable".to_string(),
            ResourceKind::Style => "Style".to_string(),
            ResourceKind::Other(tag) => {
                let mut chars = tag.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect(),
                    None => String::new(),
                }
            }
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// ResourceKey identifies a record within a merged collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceKey {
    pub kind: ResourceKind,
    pub name: String,
}

impl fmt::Display for ResourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.name)
    }
}

/// ResourceRecord is one declaration taken from a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceRecord {
    pub kind: ResourceKind,
    pub name: String,
    /// Literal content for leaves; inner markup for styles and other elements.
    pub value: String,
    /// Attributes besides `name`, rendered as markup.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<String>,
    /// The element exactly as found in its source document.
    #[serde(default)]
    pub raw_text: String,
}

impl ResourceRecord {
    /// Creates a record without extra attributes.
    pub fn new(kind: ResourceKind, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        let value = value.into();
        let raw_text = format!(
            "<{tag} name=\"{name}\">{value}</{tag}>",
            tag = kind.tag(),
            name = name,
            value = value
        );
        ResourceRecord {
            kind,
            name,
            value,
            attributes: None,
            raw_text,
        }
    }

    /// Sets the extra attribute markup.
    pub fn with_attributes(mut self, attributes: impl Into<String>) -> Self {
        self.attributes = Some(attributes.into());
        self
    }

    pub fn key(&self) -> ResourceKey {
        ResourceKey {
            kind: self.kind.clone(),
            name: self.name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_tags_round_trip() {
        for kind in ResourceKind::ORDERED {
            assert_eq!(ResourceKind::from_tag(kind.tag()), kind);
        }
        assert_eq!(
            ResourceKind::from_tag("integer"),
            ResourceKind::Other("integer".to_string())
        );
        assert_eq!(ResourceKind::first_class("item"), None);
        assert_eq!(ResourceKind::first_class("dimen"), Some(ResourceKind::Dimension));
    }

    #[test]
    fn test_kind_labels() {
        assert_eq!(ResourceKind::Dimension.label(), "Dimension");
        assert_eq!(ResourceKind::Other("string-array".into()).label(), "String-array");
        assert!(ResourceKind::Drawable.is_leaf());
        assert!(!ResourceKind::Style.is_leaf());
    }

    #[test]
    fn test_key_display() {
        let record = ResourceRecord::new(ResourceKind::Color, "brand", "#fff");
        assert_eq!(record.key().to_string(), "color:brand");
        assert_eq!(record.raw_text, r#"<color name="brand">#fff</color>"#);
    }
}
