//! The decision tree: document types, loading, validation, and lookup.

pub mod listing;
pub mod node;
pub mod resolver;
pub mod store;
mod validate;

pub use listing::ScenarioListing;
pub use node::{Meta, TreeNode};
pub use resolver::{Level, NotFound, PathLabels, ResolvedPath, resolve_child, resolve_path, walk};
pub use store::{TreeLoadError, TreeStore};
