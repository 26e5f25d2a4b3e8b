//! Merge options.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// MergeBehavior selects how an existing document and a generated one combine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MergeBehavior {
    /// Keep the existing text and add the new text after a separator comment.
    Append,
    /// Discard the existing text.
    Replace,
    /// Combine the documents record by record.
    #[default]
    Merge,
}

impl MergeBehavior {
    pub fn as_str(&self) -> &'static str {
        match self {
            MergeBehavior::Append => "append",
            MergeBehavior::Replace => "replace",
            MergeBehavior::Merge => "merge",
        }
    }
}

impl fmt::Display for MergeBehavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown behavior name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown merge behavior '{0}' (expected append, replace or merge)")]
pub struct UnknownBehavior(pub String);

impl FromStr for MergeBehavior {
    type Err = UnknownBehavior;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "append" => Ok(MergeBehavior::Append),
            "replace" => Ok(MergeBehavior::Replace),
            "merge" => Ok(MergeBehavior::Merge),
            _ => Err(UnknownBehavior(s.to_string())),
        }
    }
}

pub const DEFAULT_CONTAINER: &str = "resources";
pub const DEFAULT_GENERATOR: &str = "resmerge";

/// MergeOptions controls a single merge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MergeOptions {
    /// Keep existing values for keys the new document also defines.
    pub preserve_existing: bool,
    pub behavior: MergeBehavior,
    /// Root element name of a structured resource document.
    pub container: String,
    /// Label written into the append separator comment.
    pub generator: String,
    /// Snapshot an existing target before it is overwritten.
    pub backup: bool,
}

impl Default for MergeOptions {
    fn default() -> Self {
        MergeOptions {
            preserve_existing: true,
            behavior: MergeBehavior::Merge,
            container: DEFAULT_CONTAINER.to_string(),
            generator: DEFAULT_GENERATOR.to_string(),
            backup: false,
        }
    }
}

impl MergeOptions {
    pub fn new() -> Self {
        MergeOptions::default()
    }

    pub fn preserve_existing(mut self, value: bool) -> Self {
        self.preserve_existing = value;
        self
    }

    pub fn behavior(mut self, behavior: MergeBehavior) -> Self {
        self.behavior = behavior;
        self
    }

    pub fn container(mut self, container: impl Into<String>) -> Self {
        self.container = container.into();
        self
    }

    pub fn generator(mut self, generator: impl Into<String>) -> Self {
        self.generator = generator.into();
        self
    }

    pub fn backup(mut self, value: bool) -> Self {
        self.backup = value;
        self
    }
}

/// OptionsOverride holds optional replacements for individual option fields.
///
/// Used for per-job settings in manifests and for command line flags layered
/// over a config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OptionsOverride {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preserve_existing: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub behavior: Option<MergeBehavior>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generator: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backup: Option<bool>,
}

impl OptionsOverride {
    /// Returns `base` with every field set in this override replaced.
    pub fn apply(&self, base: &MergeOptions) -> MergeOptions {
        MergeOptions {
            preserve_existing: self.preserve_existing.unwrap_or(base.preserve_existing),
            behavior: self.behavior.unwrap_or(base.behavior),
            container: self.container.clone().unwrap_or_else(|| base.container.clone()),
            generator: self.generator.clone().unwrap_or_else(|| base.generator.clone()),
            backup: self.backup.unwrap_or(base.backup),
        }
    }
}
