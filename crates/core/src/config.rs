//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into the
//! triage service. The intent is to avoid reading process-wide environment
//! variables during request handling, which can lead to inconsistent
//! behaviour in multi-threaded runtimes and test harnesses.

use std::path::{Path, PathBuf};

use crate::constants::KB_DIR_NAME;
use crate::{TriageError, TriageResult};

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    model_path: PathBuf,
    kb_dir: PathBuf,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// Validates that both paths exist so that a misconfigured process fails
    /// before it starts serving, not on the first request.
    pub fn new(model_path: PathBuf, kb_dir: PathBuf) -> TriageResult<Self> {
        if !model_path.is_file() {
            return Err(TriageError::Config(format!(
                "model artifact does not exist: {}",
                model_path.display()
            )));
        }

        if !kb_dir.is_dir() {
            return Err(TriageError::Config(format!(
                "knowledge-base directory does not exist: {}",
                kb_dir.display()
            )));
        }

        Ok(Self { model_path, kb_dir })
    }

    pub fn model_path(&self) -> &Path {
        &self.model_path
    }

    pub fn kb_dir(&self) -> &Path {
        &self.kb_dir
    }
}

/// Resolve the knowledge-base directory without reading environment variables.
///
/// If `override_dir` is provided, it must be a directory containing
/// `medications.yaml`. Otherwise this searches for `kb/` relative to the
/// current working directory and then walks up from `CARGO_MANIFEST_DIR`.
pub fn resolve_kb_dir(override_dir: Option<PathBuf>) -> TriageResult<PathBuf> {
    fn looks_like_kb_dir(path: &Path) -> bool {
        path.join(lifeguard_kb::MEDICATIONS_FILENAME).is_file()
    }

    if let Some(kb_dir) = override_dir {
        if kb_dir.is_dir() && looks_like_kb_dir(&kb_dir) {
            return Ok(kb_dir);
        }
        return Err(TriageError::Config(
            "knowledge-base directory override is not valid (must contain medications.yaml)"
                .into(),
        ));
    }

    let cwd_relative = PathBuf::from(KB_DIR_NAME);
    if cwd_relative.is_dir() && looks_like_kb_dir(&cwd_relative) {
        return Ok(cwd_relative);
    }

    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    for ancestor in manifest_dir.ancestors() {
        let candidate = ancestor.join(KB_DIR_NAME);
        if candidate.is_dir() && looks_like_kb_dir(&candidate) {
            return Ok(candidate);
        }
    }

    Err(TriageError::Config(
        "could not locate kb/ directory with medications.yaml".into(),
    ))
}
