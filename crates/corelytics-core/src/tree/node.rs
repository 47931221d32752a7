//! Document types for the decision tree file.
//!
//! These map directly to the on-disk format and are deserialized via
//! `serde` from either JSON or TOML.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// String-to-string metadata attached to a node.
pub type Meta = BTreeMap<String, String>;

/// A single node of the decision tree.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TreeNode {
    /// Display label. Required on every node below the root.
    #[serde(default)]
    pub label: String,
    /// Ordered children. Absent in the document means no children.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TreeNode>,
    /// Behavioral metadata. `None` when the node has no `meta` key at all.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,
}

impl TreeNode {
    /// Create a childless node without metadata.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            children: Vec::new(),
            meta: None,
        }
    }

    /// Append a child (builder-style).
    pub fn child(mut self, child: TreeNode) -> Self {
        self.children.push(child);
        self
    }

    /// Set a metadata entry (builder-style), creating the map if needed.
    pub fn meta_entry(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.meta
            .get_or_insert_with(Meta::new)
            .insert(key.into(), value.into());
        self
    }

    /// Label with surrounding whitespace removed, as used for matching.
    pub fn trimmed_label(&self) -> &str {
        self.label.trim()
    }

    /// Trimmed labels of the direct children, in document order.
    pub fn child_labels(&self) -> Vec<String> {
        self.children
            .iter()
            .map(|c| c.trimmed_label().to_string())
            .collect()
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Parse a JSON tree document into its root node.
///
/// The canonical form is a root object with `children`. A bare JSON array of
/// domain nodes is accepted as shorthand. The shape is picked from the first
/// non-whitespace byte so serde errors keep their field and position.
pub(crate) fn root_from_json(content: &str) -> serde_json::Result<TreeNode> {
    if content.trim_start().starts_with('[') {
        let children: Vec<TreeNode> = serde_json::from_str(content)?;
        Ok(TreeNode {
            label: String::new(),
            children,
            meta: None,
        })
    } else {
        serde_json::from_str(content)
    }
}
