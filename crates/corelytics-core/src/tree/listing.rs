//! Navigation listings: the labels available one level below a path.

use serde::Serialize;

use super::resolver::{NotFound, walk};
use super::store::TreeStore;

/// Scenarios under a category.
///
/// An empty list with `has_scenarios == false` means the category exists and
/// is a leaf; a missing category is a [`NotFound`] error instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScenarioListing {
    pub scenarios: Vec<String>,
    pub has_scenarios: bool,
}

impl TreeStore {
    /// Recipient labels under `domain`.
    pub fn recipients(&self, domain: &str) -> Result<Vec<String>, NotFound> {
        Ok(walk(self.root(), &[domain])?.child_labels())
    }

    /// Category labels under `domain` → `recipient`.
    pub fn categories(&self, domain: &str, recipient: &str) -> Result<Vec<String>, NotFound> {
        Ok(walk(self.root(), &[domain, recipient])?.child_labels())
    }

    /// Scenario labels under `domain` → `recipient` → `category`.
    pub fn scenarios(
        &self,
        domain: &str,
        recipient: &str,
        category: &str,
    ) -> Result<ScenarioListing, NotFound> {
        let scenarios = walk(self.root(), &[domain, recipient, category])?.child_labels();
        Ok(ScenarioListing {
            has_scenarios: !scenarios.is_empty(),
            scenarios,
        })
    }
}
