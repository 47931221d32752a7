//! Service facade: navigation listings, brief preparation and generation
//! over one shared tree and one generator.

use std::sync::Arc;

use serde::Serialize;
use tracing::{Instrument, info, info_span};
use uuid::Uuid;

use crate::brief::{Archetype, CompiledBrief, compile_brief};
use crate::error::CoreError;
use crate::gateway::{Generator, require_content};
use crate::intent::{IntentRequest, IntentState, ValidationError, assemble};
use crate::tree::{ScenarioListing, TreeStore};

/// Intent state plus the brief compiled from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedBrief {
    pub state: IntentState,
    pub brief: CompiledBrief,
}

/// Details returned alongside a generated email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationMetadata {
    pub domain: String,
    pub recipient: String,
    pub category: String,
    pub scenario: String,
    /// `"Domain → Recipient → Category → Scenario"`.
    pub intent_path: String,
    /// True when no scenario was supplied and the category label and
    /// metadata stood in for it.
    pub used_category_metadata: bool,
    pub archetype: Archetype,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedEmail {
    pub email: String,
    pub metadata: GenerationMetadata,
}

/// Validate, resolve, assemble and compile without calling a generator.
pub fn prepare(store: &TreeStore, request: &IntentRequest) -> Result<PreparedBrief, CoreError> {
    let state = assemble(store, request)?;
    let brief = compile_brief(&state);
    Ok(PreparedBrief { state, brief })
}

/// The read-only tree and the generator, shared by every request.
#[derive(Clone)]
pub struct Engine {
    store: Arc<TreeStore>,
    generator: Arc<dyn Generator>,
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("source", &self.store.source())
            .field("generator", &self.generator.name())
            .finish()
    }
}

impl Engine {
    pub fn new(store: Arc<TreeStore>, generator: Arc<dyn Generator>) -> Self {
        Self { store, generator }
    }

    pub fn store(&self) -> &TreeStore {
        &self.store
    }

    pub fn domains(&self) -> Vec<String> {
        self.store.domains()
    }

    pub fn recipients(&self, domain: &str) -> Result<Vec<String>, CoreError> {
        ValidationError::check(&[("domain", domain)])?;
        Ok(self.store.recipients(domain)?)
    }

    pub fn categories(&self, domain: &str, recipient: &str) -> Result<Vec<String>, CoreError> {
        ValidationError::check(&[("domain", domain), ("recipient", recipient)])?;
        Ok(self.store.categories(domain, recipient)?)
    }

    pub fn scenarios(
        &self,
        domain: &str,
        recipient: &str,
        category: &str,
    ) -> Result<ScenarioListing, CoreError> {
        ValidationError::check(&[
            ("domain", domain),
            ("recipient", recipient),
            ("category", category),
        ])?;
        Ok(self.store.scenarios(domain, recipient, category)?)
    }

    pub fn prepare(&self, request: &IntentRequest) -> Result<PreparedBrief, CoreError> {
        prepare(&self.store, request)
    }

    /// Prepare a brief and hand it to the generator once.
    ///
    /// Blank output is rejected even if the generator accepted it.
    pub async fn generate(&self, request: &IntentRequest) -> Result<GeneratedEmail, CoreError> {
        let request_id = Uuid::new_v4();
        let span = info_span!("generate", %request_id, generator = self.generator.name());
        self.generate_inner(request).instrument(span).await
    }

    async fn generate_inner(&self, request: &IntentRequest) -> Result<GeneratedEmail, CoreError> {
        let PreparedBrief { state, brief } = self.prepare(request)?;
        info!(
            path = %state.summary(),
            archetype = %brief.archetype,
            pressure = %brief.pressure,
            "compiled brief"
        );

        let text = self.generator.generate(&brief.text).await?;
        let email = require_content(Some(text))?;

        let metadata = GenerationMetadata {
            intent_path: state.summary(),
            used_category_metadata: request.scenario_label().is_none(),
            archetype: brief.archetype,
            domain: state.domain,
            recipient: state.recipient,
            category: state.category,
            scenario: state.scenario,
        };
        Ok(GeneratedEmail { email, metadata })
    }
}
