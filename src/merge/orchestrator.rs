//! File level merge entry points.

use serde::Serialize;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use super::fallback::{append_text, root_merge};
use super::options::{MergeBehavior, MergeOptions};
use super::policy::{merge_records, MergeReport};
use crate::backup::create_backup;
use crate::builder::{DocumentBuilder, DEFAULT_PROLOG};
use crate::error::{Error, Result};
use crate::resource::extract_records;
use crate::xml::Document;

/// MergeStrategy names the path a merge took.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MergeStrategy {
    /// There was no existing document; the new text was written as is.
    Created,
    /// The new text replaced the existing document.
    Replaced,
    /// The new text was appended after a separator comment.
    Appended,
    /// Both documents were resource documents and were merged record by record.
    RecordMerge,
    /// Both documents shared a root element and their bodies were concatenated.
    RootMerge,
}

/// MergedText is the result of merging two texts in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedText {
    pub text: String,
    pub strategy: MergeStrategy,
    /// Record counts, present for record merges.
    pub report: Option<MergeReport>,
}

impl MergedText {
    fn new(text: String, strategy: MergeStrategy) -> Self {
        MergedText {
            text,
            strategy,
            report: None,
        }
    }
}

/// MergeOutcome describes one file written by [`merge_file`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MergeOutcome {
    pub path: PathBuf,
    pub strategy: MergeStrategy,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backup: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<MergeReport>,
}

/// Merges `new_text` into `existing` according to `options`.
///
/// Never fails: input that cannot be merged structurally degrades to the
/// append strategy so existing content is always kept.
pub fn merge_text(existing: Option<&str>, new_text: &str, options: &MergeOptions) -> MergedText {
    let Some(existing) = existing else {
        return MergedText::new(new_text.to_string(), MergeStrategy::Created);
    };

    match options.behavior {
        MergeBehavior::Replace => MergedText::new(new_text.to_string(), MergeStrategy::Replaced),
        MergeBehavior::Append => appended(existing, new_text, options),
        MergeBehavior::Merge => merge_documents(existing, new_text, options),
    }
}

fn appended(existing: &str, new_text: &str, options: &MergeOptions) -> MergedText {
    MergedText::new(
        append_text(existing, new_text, &options.generator),
        MergeStrategy::Appended,
    )
}

fn merge_documents(existing: &str, new_text: &str, options: &MergeOptions) -> MergedText {
    let (existing_doc, new_doc) = match (Document::parse(existing), Document::parse(new_text)) {
        (Ok(e), Ok(n)) => (e, n),
        (Err(err), _) | (_, Err(err)) => {
            warn!(error = %err, "could not locate a root element, appending");
            return appended(existing, new_text, options);
        }
    };

    let is_structured = |doc: &Document<'_>| doc.root().name == options.container;
    if is_structured(&existing_doc) && is_structured(&new_doc) {
        debug!(container = %options.container, "merging resource records");
        return merge_resources(&existing_doc, &new_doc, options);
    }

    match root_merge(&existing_doc, &new_doc) {
        Some(text) => {
            debug!(root = %existing_doc.root().name, "merging bodies of shared root");
            MergedText::new(text, MergeStrategy::RootMerge)
        }
        None => {
            debug!(
                existing = %existing_doc.root().name,
                new = %new_doc.root().name,
                "root elements differ, appending"
            );
            appended(existing, new_text, options)
        }
    }
}

fn merge_resources(existing: &Document<'_>, new: &Document<'_>, options: &MergeOptions) -> MergedText {
    let merged = merge_records(extract_records(existing), extract_records(new), options);

    let prolog = existing
        .prolog()
        .or_else(|| new.prolog())
        .unwrap_or(DEFAULT_PROLOG);
    let container_attributes = existing
        .root()
        .attributes_markup(&[])
        .or_else(|| new.root().attributes_markup(&[]));

    let text = DocumentBuilder::new()
        .prolog(prolog)
        .container(options.container.as_str())
        .container_attributes(container_attributes)
        .build(&merged.records);

    MergedText {
        text,
        strategy: MergeStrategy::RecordMerge,
        report: Some(merged.report),
    }
}

/// Reads `path` if it exists.
pub fn read_existing(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(Error::io("read", path, e)),
    }
}

/// Writes `text` to `path`, creating parent directories as needed.
///
/// An existing file is replaced atomically: the text goes to a temporary file
/// in the same directory, is synced, and is renamed over the target, so a
/// failed write leaves the old content in place. The target's permissions are
/// carried over.
pub fn write_output(path: &Path, text: &str) -> Result<()> {
    let dir = match path.parent().filter(|p| !p.as_os_str().is_empty()) {
        Some(parent) => {
            fs::create_dir_all(parent).map_err(|e| Error::io("create directory", parent, e))?;
            parent
        }
        None => Path::new("."),
    };

    let permissions = match fs::metadata(path) {
        Ok(meta) => Some(meta.permissions()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return fs::write(path, text).map_err(|e| Error::io("write", path, e));
        }
        Err(e) => return Err(Error::io("inspect", path, e)),
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| Error::io("create temporary file in", dir, e))?;
    tmp.write_all(text.as_bytes())
        .and_then(|()| tmp.as_file().sync_all())
        .map_err(|e| Error::io("write", tmp.path(), e))?;
    if let Some(permissions) = permissions {
        tmp.as_file()
            .set_permissions(permissions)
            .map_err(|e| Error::io("set permissions on", tmp.path(), e))?;
    }
    tmp.persist(path).map_err(|e| Error::io("write", path, e.error))?;
    Ok(())
}

/// Merges `new_text` into the file at `path` and writes the result.
///
/// A missing file is created with `new_text`. When `options.backup` is set an
/// existing file is snapshotted first; a failed snapshot is logged and the
/// write still happens. Only read and write failures are returned.
pub fn merge_file(path: impl AsRef<Path>, new_text: &str, options: &MergeOptions) -> Result<MergeOutcome> {
    let path = path.as_ref();
    let existing = read_existing(path)?;
    let merged = merge_text(existing.as_deref(), new_text, options);

    let backup = if existing.is_some() && options.backup {
        create_backup(path)
    } else {
        None
    };

    write_output(path, &merged.text)?;
    info!(path = %path.display(), strategy = ?merged.strategy, "wrote resource file");

    Ok(MergeOutcome {
        path: path.to_path_buf(),
        strategy: merged.strategy,
        backup,
        report: merged.report,
    })
}
