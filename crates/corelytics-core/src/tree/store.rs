//! The immutable, process-wide decision tree.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{error, info};

use super::node::{TreeNode, root_from_json};
use super::resolver::Level;
use super::validate::validate;

/// Errors that can occur while loading the tree. All of them are fatal at
/// startup.
#[derive(Debug, Error)]
pub enum TreeLoadError {
    #[error("tree file not found at {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read tree file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("unsupported tree file extension {extension:?} (expected json or toml)")]
    UnsupportedFormat { extension: String },

    #[error("invalid JSON in tree file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid TOML in tree file: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("tree must contain at least one domain")]
    NoDomains,

    #[error("blank {level} label under {parent}")]
    BlankLabel { level: Level, parent: String },

    #[error("duplicate {level} label {label:?} under {parent}")]
    DuplicateLabel {
        level: Level,
        parent: String,
        label: String,
    },

    #[error("nodes below the scenario level are not allowed (under {path})")]
    TooDeep { path: String },
}

/// Read-only holder of the loaded tree.
///
/// Construct once at startup and share behind an `Arc`; nothing mutates it
/// afterwards.
#[derive(Debug, Clone)]
pub struct TreeStore {
    root: TreeNode,
    source: Option<PathBuf>,
}

impl TreeStore {
    /// Load and validate a tree file. The format is chosen by extension:
    /// `.json` or `.toml`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TreeLoadError> {
        let path = path.as_ref();
        let result = Self::read(path);
        match &result {
            Ok(store) => info!(
                path = %path.display(),
                domains = ?store.domains(),
                "loaded decision tree"
            ),
            Err(e) => error!(path = %path.display(), "failed to load decision tree: {e}"),
        }
        result
    }

    fn read(path: &Path) -> Result<Self, TreeLoadError> {
        if !path.exists() {
            return Err(TreeLoadError::NotFound(path.to_path_buf()));
        }

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();

        let content = std::fs::read_to_string(path).map_err(|source| TreeLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let mut store = match extension.as_str() {
            "json" => Self::from_json_str(&content)?,
            "toml" => Self::from_toml_str(&content)?,
            _ => return Err(TreeLoadError::UnsupportedFormat { extension }),
        };
        store.source = Some(path.to_path_buf());
        Ok(store)
    }

    /// Parse and validate a JSON document.
    pub fn from_json_str(content: &str) -> Result<Self, TreeLoadError> {
        Self::from_root(root_from_json(content)?)
    }

    /// Parse and validate a TOML document (root table with `[[children]]`).
    pub fn from_toml_str(content: &str) -> Result<Self, TreeLoadError> {
        let root: TreeNode = toml::from_str(content)?;
        Self::from_root(root)
    }

    /// Validate an already-built tree.
    pub fn from_root(root: TreeNode) -> Result<Self, TreeLoadError> {
        validate(&root)?;
        Ok(Self { root, source: None })
    }

    pub fn root(&self) -> &TreeNode {
        &self.root
    }

    /// Path the tree was loaded from, if it came from a file.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Labels of the root's children.
    pub fn domains(&self) -> Vec<String> {
        self.root.child_labels()
    }
}
