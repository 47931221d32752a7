//! Brief compilation: turns an [`IntentState`] into the instruction text
//! handed to the generator.
//!
//! This module is pure logic (no I/O). The same state always compiles to
//! byte-identical output.

pub mod archetype;
pub mod blocks;
pub mod urgency;

pub use archetype::{Archetype, classify};
pub use urgency::{Pressure, urgency_text};

use crate::intent::{DEFAULT_CONTEXT_HINT, IntentState};

/// A compiled brief together with the archetype and urgency chosen for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledBrief {
    pub archetype: Archetype,
    pub pressure: Pressure,
    pub text: String,
}

/// Compile the brief text for `state`.
pub fn compile(state: &IntentState) -> String {
    compile_brief(state).text
}

/// Compile the brief and report the archetype it was built around.
///
/// Sections, in order: preamble, path labels, archetype and its guidance,
/// core purpose, context, tone, urgency, then the fixed embodiment,
/// specificity, anti-generic and structure blocks.
pub fn compile_brief(state: &IntentState) -> CompiledBrief {
    let intent_focus = state.intent_focus();
    let archetype = classify(intent_focus, &state.scenario);
    let pressure = Pressure::from_meta(state.pressure());

    let mut text = String::with_capacity(2048);

    text.push_str(blocks::PREAMBLE);
    text.push_str("\n\n");

    text.push_str(&format!("Recipient Role: {}\n", state.recipient));
    text.push_str(&format!("Professional Context: {}\n", state.domain));
    text.push_str(&format!("Situation: {}\n\n", state.scenario));

    section(&mut text, "Communication Archetype", archetype.name());
    section(&mut text, "Behavioral Guidance", archetype.guidance());
    section(&mut text, "Core Purpose", intent_focus);
    section(
        &mut text,
        "Context Background",
        state.context_hint().unwrap_or(DEFAULT_CONTEXT_HINT),
    );
    section(&mut text, "Tone Guidance", state.tone_hint());
    section(&mut text, "Urgency Guidance", pressure.guidance());

    for block in [
        blocks::EMBODIMENT,
        blocks::SPECIFICITY,
        blocks::ANTI_GENERIC,
        blocks::STRUCTURE,
    ] {
        text.push_str(block);
        text.push_str("\n\n");
    }

    text.push_str(blocks::CLOSING);

    CompiledBrief {
        archetype,
        pressure,
        text,
    }
}

fn section(out: &mut String, heading: &str, body: &str) {
    out.push_str(heading);
    out.push_str(":\n");
    out.push_str(body);
    out.push_str("\n\n");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intent::{DEFAULT_TONE_HINT, MetaSource};

    fn sample_state(meta: &[(&str, &str)]) -> IntentState {
        IntentState {
            domain: "Work".to_string(),
            recipient: "Manager".to_string(),
            category: "Schedule Change".to_string(),
            scenario: "Schedule Change".to_string(),
            scenario_meta: meta
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            meta_source: MetaSource::Category,
        }
    }

    #[test]
    fn compile_is_deterministic() {
        let state = sample_state(&[("intent_focus", "request a new start time")]);
        assert_eq!(compile(&state), compile(&state.clone()));
    }

    #[test]
    fn brief_contains_labels_and_archetype() {
        let state = sample_state(&[("intent_focus", "request a new start time")]);
        let brief = compile_brief(&state);
        assert_eq!(brief.archetype, Archetype::DirectRequest);
        assert!(brief.text.contains("Recipient Role: Manager"));
        assert!(brief.text.contains("Professional Context: Work"));
        assert!(brief.text.contains("Situation: Schedule Change"));
        assert!(brief.text.contains("Communication Archetype:\nDirect Request"));
        assert!(brief.text.contains(Archetype::DirectRequest.guidance()));
        assert!(brief.text.contains("Core Purpose:\nrequest a new start time"));
    }

    #[test]
    fn defaults_fill_missing_meta() {
        let brief = compile(&sample_state(&[]));
        assert!(brief.contains("Core Purpose:\nSchedule Change"));
        assert!(brief.contains(&format!("Context Background:\n{DEFAULT_CONTEXT_HINT}")));
        assert!(brief.contains(&format!("Tone Guidance:\n{DEFAULT_TONE_HINT}")));
        assert!(brief.contains("Urgency Guidance:\nNormal professional urgency."));
        assert!(brief.contains("Communication Archetype:\nProfessional Communication"));
    }

    #[test]
    fn meta_values_are_substituted() {
        let brief = compile(&sample_state(&[
            ("intent_focus", "move my shift"),
            ("context_hint", "School run changed to 8:30"),
            ("tone_hint", "Friendly but firm"),
            ("pressure", "high"),
        ]));
        assert!(brief.contains("Context Background:\nSchool run changed to 8:30"));
        assert!(brief.contains("Tone Guidance:\nFriendly but firm"));
        assert!(brief.contains(Pressure::High.guidance()));
    }

    #[test]
    fn sections_appear_in_fixed_order() {
        let brief = compile(&sample_state(&[]));
        let markers = [
            "You are NOT an AI.",
            "Recipient Role:",
            "Professional Context:",
            "Situation:",
            "Communication Archetype:",
            "Behavioral Guidance:",
            "Core Purpose:",
            "Context Background:",
            "Tone Guidance:",
            "Urgency Guidance:",
            "Embodiment Instruction:",
            "Specificity Requirement:",
            "Forbidden Generic Phrases:",
            "Structural Expectations:",
            "Write the complete email now.",
        ];
        let positions: Vec<usize> = markers
            .iter()
            .map(|m| brief.find(m).unwrap_or_else(|| panic!("missing {m:?}")))
            .collect();
        assert!(
            positions.windows(2).all(|w| w[0] < w[1]),
            "sections out of order: {positions:?}"
        );
    }

    #[test]
    fn brief_is_trimmed_and_ends_with_closing() {
        let brief = compile(&sample_state(&[]));
        assert_eq!(brief, brief.trim());
        assert!(brief.ends_with(blocks::CLOSING));
    }
}
