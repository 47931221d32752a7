use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::tree::PathLabels;

/// Caller input for brief compilation and generation.
///
/// Every field defaults to empty so that a body missing a field reaches
/// [`IntentRequest::validate`] and is reported as a validation error rather
/// than a deserialization failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntentRequest {
    pub domain: String,
    pub recipient: String,
    pub category: String,
    pub scenario: Option<String>,
}

/// One or more required labels were missing or blank.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("missing required field(s): {}", .missing.join(", "))]
pub struct ValidationError {
    pub missing: Vec<&'static str>,
}

impl ValidationError {
    /// Check that every `(name, value)` pair is non-blank after trimming.
    pub fn check(fields: &[(&'static str, &str)]) -> Result<(), Self> {
        let missing: Vec<&'static str> = fields
            .iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(name, _)| *name)
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(Self { missing })
        }
    }
}

impl IntentRequest {
    pub fn new(
        domain: impl Into<String>,
        recipient: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            domain: domain.into(),
            recipient: recipient.into(),
            category: category.into(),
            scenario: None,
        }
    }

    /// Set the scenario (builder-style).
    pub fn scenario(mut self, scenario: impl Into<String>) -> Self {
        self.scenario = Some(scenario.into());
        self
    }

    /// Domain, recipient and category must all be non-blank.
    pub fn validate(&self) -> Result<(), ValidationError> {
        ValidationError::check(&[
            ("domain", self.domain.as_str()),
            ("recipient", self.recipient.as_str()),
            ("category", self.category.as_str()),
        ])
    }

    /// The explicitly supplied scenario, trimmed. Blank counts as absent.
    pub fn scenario_label(&self) -> Option<&str> {
        self.scenario
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Labels for the domain → recipient → category prefix of the path.
    pub fn path_labels(&self) -> PathLabels<'_> {
        PathLabels {
            domain: &self.domain,
            recipient: &self.recipient,
            category: &self.category,
            scenario: None,
        }
    }
}
