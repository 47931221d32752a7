//! Structural validation applied once at load time.
//!
//! Checks:
//! - The root has at least one domain.
//! - Every node below the root has a non-blank label.
//! - Sibling labels are unique after trimming.
//! - No node sits deeper than the scenario level.

use std::collections::HashSet;

use super::node::TreeNode;
use super::resolver::Level;
use super::store::TreeLoadError;

/// Validate a freshly parsed tree.
pub(crate) fn validate(root: &TreeNode) -> Result<(), TreeLoadError> {
    if root.children.is_empty() {
        return Err(TreeLoadError::NoDomains);
    }
    check_children(root, &mut Vec::new(), 0)
}

/// Walk the children of `node`, which sits at `depth` (0 = root).
fn check_children<'a>(
    node: &'a TreeNode,
    path: &mut Vec<&'a str>,
    depth: usize,
) -> Result<(), TreeLoadError> {
    if node.children.is_empty() {
        return Ok(());
    }

    let Some(level) = Level::at_depth(depth) else {
        return Err(TreeLoadError::TooDeep {
            path: render_path(path),
        });
    };

    let mut seen = HashSet::new();
    for child in &node.children {
        let label = child.trimmed_label();
        if label.is_empty() {
            return Err(TreeLoadError::BlankLabel {
                level,
                parent: render_path(path),
            });
        }
        if !seen.insert(label) {
            return Err(TreeLoadError::DuplicateLabel {
                level,
                parent: render_path(path),
                label: label.to_string(),
            });
        }
    }

    for child in &node.children {
        path.push(child.trimmed_label());
        check_children(child, path, depth + 1)?;
        path.pop();
    }

    Ok(())
}

fn render_path(path: &[&str]) -> String {
    if path.is_empty() {
        "(root)".to_string()
    } else {
        path.join(" → ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn four_levels() -> TreeNode {
        TreeNode::new("").child(
            TreeNode::new("Work").child(
                TreeNode::new("Manager").child(
                    TreeNode::new("Leave")
                        .child(TreeNode::new("Sick day"))
                        .child(TreeNode::new("Vacation")),
                ),
            ),
        )
    }

    #[test]
    fn accepts_full_depth_tree() {
        validate(&four_levels()).expect("four levels should be valid");
    }

    #[test]
    fn rejects_empty_root() {
        let err = validate(&TreeNode::new("")).unwrap_err();
        assert!(matches!(err, TreeLoadError::NoDomains), "got: {err}");
    }

    #[test]
    fn rejects_blank_label() {
        let root = TreeNode::new("").child(TreeNode::new("Work").child(TreeNode::new("   ")));
        let err = validate(&root).unwrap_err();
        assert!(
            matches!(
                err,
                TreeLoadError::BlankLabel { level: Level::Recipient, ref parent } if parent == "Work"
            ),
            "got: {err}"
        );
    }

    #[test]
    fn rejects_duplicate_siblings_after_trim() {
        let root = TreeNode::new("")
            .child(TreeNode::new("Work"))
            .child(TreeNode::new(" Work "));
        let err = validate(&root).unwrap_err();
        assert!(
            matches!(err, TreeLoadError::DuplicateLabel { ref label, .. } if label == "Work"),
            "got: {err}"
        );
    }

    #[test]
    fn same_label_under_different_parents_is_fine() {
        let root = TreeNode::new("")
            .child(TreeNode::new("Work").child(TreeNode::new("Team")))
            .child(TreeNode::new("Personal").child(TreeNode::new("Team")));
        validate(&root).expect("cousins may share labels");
    }

    #[test]
    fn labels_are_case_sensitive() {
        let root = TreeNode::new("")
            .child(TreeNode::new("work"))
            .child(TreeNode::new("Work"));
        validate(&root).expect("case differs, so labels are distinct");
    }

    #[test]
    fn rejects_fifth_level() {
        let mut root = four_levels();
        root.children[0].children[0].children[0].children[0]
            .children
            .push(TreeNode::new("Too deep"));
        let err = validate(&root).unwrap_err();
        assert!(
            matches!(err, TreeLoadError::TooDeep { ref path } if path.ends_with("Sick day")),
            "got: {err}"
        );
    }
}
