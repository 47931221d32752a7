//! Shared test utilities for corelytics tests.
//!
//! Provides a small decision tree covering the interesting shapes (leaf
//! category with metadata, scenarios with and without their own metadata,
//! metadata-free branches) and a scripted [`Generator`] that records every
//! brief it is handed.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use corelytics_core::Engine;
use corelytics_core::gateway::{GatewayError, Generator};
use corelytics_core::tree::TreeStore;

/// Sample tree in the on-disk JSON format.
///
/// - `Work → Manager → Schedule Change` is a leaf category whose metadata
///   classifies as a direct request.
/// - `Work → Manager → Leave` has category metadata, one scenario with its
///   own metadata (`Sick day`) and one without (`Vacation`).
/// - `Personal → Doctor → Appointment` has no metadata anywhere.
pub const SAMPLE_TREE_JSON: &str = r#"{
  "label": "root",
  "children": [
    {
      "label": "Work",
      "children": [
        {
          "label": "Manager",
          "children": [
            {
              "label": "Schedule Change",
              "meta": {
                "intent_focus": "request a new start time",
                "context_hint": "Childcare pickup moved to 5:15pm from next Monday",
                "tone_hint": "Respectful and direct"
              }
            },
            {
              "label": "Leave",
              "meta": {
                "intent_focus": "ask for approved time off",
                "tone_hint": "Polite"
              },
              "children": [
                {
                  "label": "Sick day",
                  "meta": {
                    "intent_focus": "report an issue with my health and miss today",
                    "pressure": "high"
                  }
                },
                { "label": "Vacation" }
              ]
            }
          ]
        },
        {
          "label": "Client",
          "children": [
            {
              "label": "Project",
              "children": [
                {
                  "label": "Delay",
                  "meta": {
                    "intent_focus": "offer an apology for the slipped milestone",
                    "pressure": "low"
                  }
                }
              ]
            }
          ]
        }
      ]
    },
    {
      "label": "Personal",
      "children": [
        {
          "label": "Doctor",
          "children": [
            {
              "label": "Appointment",
              "children": [{ "label": "Reschedule" }]
            }
          ]
        }
      ]
    }
  ]
}"#;

/// A [`TreeStore`] built from [`SAMPLE_TREE_JSON`].
pub fn sample_store() -> TreeStore {
    TreeStore::from_json_str(SAMPLE_TREE_JSON).expect("sample tree must load")
}

/// An [`Engine`] over the sample tree and `generator`.
pub fn sample_engine(generator: Arc<dyn Generator>) -> Engine {
    Engine::new(Arc::new(sample_store()), generator)
}

/// Write `contents` to `dir/name` and return the full path.
pub fn write_tree(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).expect("failed to write tree file");
    path
}

/// A [`Generator`] that replies with a fixed outcome and records briefs.
pub struct ScriptedGenerator {
    reply: Result<String, GatewayError>,
    briefs: Mutex<Vec<String>>,
}

impl ScriptedGenerator {
    /// Always succeeds with `text`.
    pub fn replying(text: impl Into<String>) -> Arc<Self> {
        Self::with_reply(Ok(text.into()))
    }

    /// Always fails with `GatewayError::Failed(detail)`.
    pub fn failing(detail: impl Into<String>) -> Arc<Self> {
        Self::with_reply(Err(GatewayError::Failed(detail.into())))
    }

    /// Always reports no content.
    pub fn empty() -> Arc<Self> {
        Self::with_reply(Err(GatewayError::Empty))
    }

    fn with_reply(reply: Result<String, GatewayError>) -> Arc<Self> {
        Arc::new(Self {
            reply,
            briefs: Mutex::new(Vec::new()),
        })
    }

    /// Every brief received so far, in call order.
    pub fn briefs(&self) -> Vec<String> {
        self.briefs.lock().expect("brief log poisoned").clone()
    }

    pub fn calls(&self) -> usize {
        self.briefs.lock().expect("brief log poisoned").len()
    }
}

#[async_trait]
impl Generator for ScriptedGenerator {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn generate(&self, brief: &str) -> Result<String, GatewayError> {
        self.briefs
            .lock()
            .expect("brief log poisoned")
            .push(brief.to_string());
        self.reply.clone()
    }
}
