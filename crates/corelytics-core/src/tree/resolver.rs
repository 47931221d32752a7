//! Label lookup through the tree.
//!
//! Matching is exact string equality after trimming surrounding whitespace
//! on both sides. There is no case folding and no fuzzy matching; the first
//! matching child in document order wins.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use super::node::TreeNode;

/// The four levels below the implicit root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    Domain,
    Recipient,
    Category,
    Scenario,
}

impl Level {
    /// All levels, outermost first.
    pub const ALL: [Level; 4] = [
        Level::Domain,
        Level::Recipient,
        Level::Category,
        Level::Scenario,
    ];

    /// The level of the children of a node at `depth` (0 = root).
    pub fn at_depth(depth: usize) -> Option<Level> {
        Self::ALL.get(depth).copied()
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Domain => "domain",
            Self::Recipient => "recipient",
            Self::Category => "category",
            Self::Scenario => "scenario",
        };
        f.write_str(s)
    }
}

/// A label that matched no child at some level.
///
/// Carries the labels that *were* available there so operators can see what
/// the caller should have sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{level} {label:?} not found. Available: {}", .available.join(", "))]
pub struct NotFound {
    pub level: Level,
    pub label: String,
    pub available: Vec<String>,
}

/// Find the first child of `node` whose trimmed label equals the trimmed
/// `label`.
pub fn resolve_child<'a>(node: &'a TreeNode, label: &str) -> Option<&'a TreeNode> {
    let wanted = label.trim();
    node.children.iter().find(|c| c.trimmed_label() == wanted)
}

/// Walk from `root` through `labels`, one level per label.
///
/// Stops at the first label that does not resolve. At most four labels are
/// meaningful; any beyond the scenario level are reported as not found at
/// the scenario level.
pub fn walk<'a>(root: &'a TreeNode, labels: &[&str]) -> Result<&'a TreeNode, NotFound> {
    let mut node = root;
    for (depth, label) in labels.iter().enumerate() {
        let level = Level::at_depth(depth).unwrap_or(Level::Scenario);
        node = resolve_child(node, label).ok_or_else(|| NotFound {
            level,
            label: label.trim().to_string(),
            available: node.child_labels(),
        })?;
    }
    Ok(node)
}

/// Labels naming a path through the tree. The scenario is optional.
#[derive(Debug, Clone, Copy)]
pub struct PathLabels<'l> {
    pub domain: &'l str,
    pub recipient: &'l str,
    pub category: &'l str,
    pub scenario: Option<&'l str>,
}

/// Nodes matched by a [`PathLabels`] walk.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedPath<'a> {
    pub domain: &'a TreeNode,
    pub recipient: &'a TreeNode,
    pub category: &'a TreeNode,
    pub scenario: Option<&'a TreeNode>,
}

/// Resolve every supplied level in order, failing at the first miss.
pub fn resolve_path<'a>(
    root: &'a TreeNode,
    labels: &PathLabels<'_>,
) -> Result<ResolvedPath<'a>, NotFound> {
    let domain = walk(root, &[labels.domain])?;
    let recipient = walk(domain, &[labels.recipient]).map_err(|e| at(e, Level::Recipient))?;
    let category = walk(recipient, &[labels.category]).map_err(|e| at(e, Level::Category))?;
    let scenario = match labels.scenario {
        Some(label) => Some(walk(category, &[label]).map_err(|e| at(e, Level::Scenario))?),
        None => None,
    };
    Ok(ResolvedPath {
        domain,
        recipient,
        category,
        scenario,
    })
}

/// Re-tag a single-step walk error with the level it actually happened at.
fn at(mut err: NotFound, level: Level) -> NotFound {
    err.level = level;
    err
}
