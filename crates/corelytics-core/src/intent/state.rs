use serde::Serialize;

use crate::tree::Meta;

/// Context sentence used when the metadata has no (or an empty) `context_hint`.
pub const DEFAULT_CONTEXT_HINT: &str = "The situation is practical and real, not hypothetical.";

/// Tone sentence used when the metadata has no `tone_hint`.
pub const DEFAULT_TONE_HINT: &str = "Professional and appropriate.";

/// Pressure assumed when the metadata has no `pressure`.
pub const DEFAULT_PRESSURE: &str = "normal";

/// Which tree level supplied [`IntentState::scenario_meta`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MetaSource {
    Scenario,
    Category,
    None,
}

/// A resolved path plus the metadata selected for it.
///
/// Built per request by [`super::assemble`] and consumed by the brief
/// compiler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IntentState {
    pub domain: String,
    pub recipient: String,
    pub category: String,
    /// The explicit scenario, or the category label when none was given.
    pub scenario: String,
    pub scenario_meta: Meta,
    pub meta_source: MetaSource,
}

impl IntentState {
    /// Path in the form `"Domain → Recipient → Category → Scenario"`,
    /// skipping empty segments.
    pub fn summary(&self) -> String {
        [
            self.domain.as_str(),
            self.recipient.as_str(),
            self.category.as_str(),
            self.scenario.as_str(),
        ]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" → ")
    }

    /// Whether every level has a value.
    pub fn is_complete(&self) -> bool {
        [&self.domain, &self.recipient, &self.category, &self.scenario]
            .iter()
            .all(|s| !s.is_empty())
    }

    fn meta(&self, key: &str) -> Option<&str> {
        self.scenario_meta.get(key).map(String::as_str)
    }

    /// `intent_focus`, defaulting to the scenario label.
    pub fn intent_focus(&self) -> &str {
        self.meta("intent_focus").unwrap_or(&self.scenario)
    }

    /// `context_hint`, or `None` when absent or empty.
    pub fn context_hint(&self) -> Option<&str> {
        self.meta("context_hint").filter(|s| !s.is_empty())
    }

    /// `pressure`, defaulting to [`DEFAULT_PRESSURE`].
    pub fn pressure(&self) -> &str {
        self.meta("pressure").unwrap_or(DEFAULT_PRESSURE)
    }

    /// `tone_hint`, defaulting to [`DEFAULT_TONE_HINT`].
    pub fn tone_hint(&self) -> &str {
        self.meta("tone_hint").unwrap_or(DEFAULT_TONE_HINT)
    }
}
