//! Config files and batch manifests.
//!
//! Both are YAML. A config file holds [`MergeOptions`]; a manifest lists merge
//! jobs with shared defaults:
//!
//! ```yaml
//! defaults:
//!   preserveExisting: true
//!   backup: true
//! jobs:
//!   - target: android/app/src/main/res/values/colors.xml
//!     source: generated/colors.xml
//!   - target: android/app/src/main/res/values/styles.xml
//!     source: generated/styles.xml
//!     options:
//!       behavior: replace
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::merge::{MergeJob, MergeOptions, OptionsOverride};

/// Loads merge options from a YAML file.
pub fn load_options(path: impl AsRef<Path>) -> Result<MergeOptions> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| Error::io("read", path, e))?;
    serde_yaml::from_str(&text).map_err(|e| Error::config(path, e.to_string()))
}

/// Manifest is a list of merge jobs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub defaults: MergeOptions,
    #[serde(default)]
    pub jobs: Vec<ManifestJob>,
}

/// ManifestJob is one entry of a [`Manifest`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestJob {
    pub target: PathBuf,
    pub source: PathBuf,
    #[serde(default)]
    pub options: OptionsOverride,
}

impl Manifest {
    /// Parses a manifest from YAML text.
    pub fn from_yaml(text: &str) -> std::result::Result<Manifest, serde_yaml::Error> {
        serde_yaml::from_str(text)
    }

    /// Loads a manifest from a file.
    pub fn load(path: impl AsRef<Path>) -> Result<Manifest> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| Error::io("read", path, e))?;
        Manifest::from_yaml(&text).map_err(|e| Error::config(path, e.to_string()))
    }

    /// Returns the jobs with options resolved and relative paths joined onto `base`.
    pub fn jobs(&self, base: &Path) -> Vec<MergeJob> {
        self.jobs
            .iter()
            .map(|job| {
                MergeJob::from_file(
                    base.join(&job.target),
                    base.join(&job.source),
                    job.options.apply(&self.defaults),
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::merge::{JobSource, MergeBehavior};

    const MANIFEST: &str = r#"
defaults:
  backup: true
  generator: splash
jobs:
  - target: values/colors.xml
    source: gen/colors.xml
  - target: /abs/values/styles.xml
    source: gen/styles.xml
    options:
      behavior: replace
      preserveExisting: false
"#;

    #[test]
    fn test_manifest_jobs() {
        let manifest = Manifest::from_yaml(MANIFEST).unwrap();
        let jobs = manifest.jobs(Path::new("/project"));

        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[0].target, PathBuf::from("/project/values/colors.xml"));
        assert_eq!(jobs[0].source, JobSource::File(PathBuf::from("/project/gen/colors.xml")));
        assert!(jobs[0].options.backup);
        assert!(jobs[0].options.preserve_existing);
        assert_eq!(jobs[0].options.generator, "splash");

        assert_eq!(jobs[1].target, PathBuf::from("/abs/values/styles.xml"));
        assert_eq!(jobs[1].options.behavior, MergeBehavior::Replace);
        assert!(!jobs[1].options.preserve_existing);
        assert!(jobs[1].options.backup);
    }

    #[test]
    fn test_manifest_rejects_unknown_behavior() {
        let err = Manifest::from_yaml("jobs:\n  - target: a\n    source: b\n    options:\n      behavior: upsert\n");
        assert!(err.is_err());
    }

    #[test]
    fn test_load_options() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resmerge.yaml");
        fs::write(&path, "behavior: append\ngenerator: nitro\n").unwrap();

        let opts = load_options(&path).unwrap();
        assert_eq!(opts.behavior, MergeBehavior::Append);
        assert_eq!(opts.generator, "nitro");
        assert!(opts.preserve_existing);

        fs::write(&path, "behavior: [1, 2]\n").unwrap();
        assert!(matches!(load_options(&path), Err(Error::Config { .. })));
        assert!(matches!(
            load_options(dir.path().join("missing.yaml")),
            Err(Error::Io { .. })
        ));
    }
}
