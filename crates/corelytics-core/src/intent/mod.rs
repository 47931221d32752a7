//! Intent assembly: from a validated request and the tree to an
//! [`IntentState`].

pub mod request;
pub mod state;

pub use request::{IntentRequest, ValidationError};
pub use state::{
    DEFAULT_CONTEXT_HINT, DEFAULT_PRESSURE, DEFAULT_TONE_HINT, IntentState, MetaSource,
};

use tracing::{debug, warn};

use crate::error::CoreError;
use crate::tree::{TreeStore, resolve_child, resolve_path};

/// Validate `request`, resolve its path, and select metadata.
///
/// Domain, recipient and category must resolve; a miss at any of them is a
/// not-found error. The scenario is looked up only when one was supplied,
/// and a scenario with no matching node is not an error: its label is kept
/// and metadata falls back to the category.
///
/// Metadata is taken whole from one level, never merged:
/// 1. the scenario node, if it matched and has a `meta` table;
/// 2. otherwise the category node's `meta`;
/// 3. otherwise nothing.
pub fn assemble(store: &TreeStore, request: &IntentRequest) -> Result<IntentState, CoreError> {
    request.validate()?;

    let path = resolve_path(store.root(), &request.path_labels())?;
    let explicit = request.scenario_label();
    let scenario_node = explicit.and_then(|label| resolve_child(path.category, label));

    if let (Some(label), None) = (explicit, scenario_node) {
        warn!(
            scenario = label,
            category = path.category.trimmed_label(),
            "scenario not found under category; falling back to category metadata"
        );
    }

    let scenario_meta = scenario_node.and_then(|n| n.meta.as_ref());
    let (scenario_meta, meta_source) = match (scenario_meta, &path.category.meta) {
        (Some(meta), _) => (meta.clone(), MetaSource::Scenario),
        (None, Some(meta)) => (meta.clone(), MetaSource::Category),
        (None, None) => (Default::default(), MetaSource::None),
    };

    let category = path.category.trimmed_label().to_string();
    let state = IntentState {
        domain: path.domain.trimmed_label().to_string(),
        recipient: path.recipient.trimmed_label().to_string(),
        scenario: explicit.map(str::to_string).unwrap_or_else(|| category.clone()),
        category,
        scenario_meta,
        meta_source,
    };

    debug!(path = %state.summary(), meta_source = ?state.meta_source, "assembled intent state");
    Ok(state)
}
