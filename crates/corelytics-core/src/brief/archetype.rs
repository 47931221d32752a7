//! Communicative archetypes and the keyword classifier that picks one.
//!
//! Classification lowercases `"{intent_focus} {scenario}"` and walks
//! [`RULES`] in order; the first rule with any trigger contained in the text
//! wins. When nothing matches the result is
//! [`Archetype::ProfessionalCommunication`].

use std::fmt;

use serde::{Serialize, Serializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Archetype {
    Apology,
    ClarificationSeeking,
    DirectRequest,
    ProblemReporting,
    StatusUpdate,
    OpportunityPitch,
    PersonalScheduling,
    ProfessionalCommunication,
}

/// One row of the priority table.
#[derive(Debug, Clone, Copy)]
pub struct ArchetypeRule {
    pub triggers: &'static [&'static str],
    pub archetype: Archetype,
}

/// Trigger table in priority order.
pub static RULES: [ArchetypeRule; 7] = [
    ArchetypeRule {
        triggers: &["apology"],
        archetype: Archetype::Apology,
    },
    ArchetypeRule {
        triggers: &["clarify"],
        archetype: Archetype::ClarificationSeeking,
    },
    ArchetypeRule {
        triggers: &["request"],
        archetype: Archetype::DirectRequest,
    },
    ArchetypeRule {
        triggers: &["complaint", "issue"],
        archetype: Archetype::ProblemReporting,
    },
    ArchetypeRule {
        triggers: &["update"],
        archetype: Archetype::StatusUpdate,
    },
    ArchetypeRule {
        triggers: &["proposal", "investment"],
        archetype: Archetype::OpportunityPitch,
    },
    ArchetypeRule {
        triggers: &["appointment", "meeting"],
        archetype: Archetype::PersonalScheduling,
    },
];

/// Display name and behavioral guidance for every archetype.
pub static GUIDANCE: [(Archetype, &str, &str); 8] = [
    (
        Archetype::Apology,
        "Accountability / Apology",
        "Acknowledge responsibility clearly. Avoid defensiveness. Show corrective intent.",
    ),
    (
        Archetype::ClarificationSeeking,
        "Clarification Seeking",
        "Specify exactly what is unclear. Show that effort was already made.",
    ),
    (
        Archetype::DirectRequest,
        "Direct Request",
        "State the request early. Avoid excessive justification.",
    ),
    (
        Archetype::ProblemReporting,
        "Problem Reporting",
        "Describe the issue factually. Avoid emotional exaggeration.",
    ),
    (
        Archetype::StatusUpdate,
        "Status Update",
        "Summarize current status efficiently. Highlight next steps.",
    ),
    (
        Archetype::OpportunityPitch,
        "Opportunity Pitch",
        "Avoid hype. Be grounded. Show strategic relevance to the recipient.",
    ),
    (
        Archetype::PersonalScheduling,
        "Personal Scheduling Request",
        "Be practical. Mention availability windows realistically.",
    ),
    (
        Archetype::ProfessionalCommunication,
        "Professional Communication",
        "Be clear, purposeful, and context-aware.",
    ),
];

/// Classify the intent of a request.
pub fn classify(intent_focus: &str, scenario: &str) -> Archetype {
    let text = format!("{intent_focus} {scenario}").to_lowercase();
    RULES
        .iter()
        .find(|rule| rule.triggers.iter().any(|t| text.contains(t)))
        .map(|rule| rule.archetype)
        .unwrap_or(Archetype::ProfessionalCommunication)
}

impl Archetype {
    fn entry(self) -> &'static (Archetype, &'static str, &'static str) {
        // The fallback row is the last one.
        GUIDANCE
            .iter()
            .find(|(a, _, _)| *a == self)
            .unwrap_or(&GUIDANCE[GUIDANCE.len() - 1])
    }

    pub fn name(self) -> &'static str {
        self.entry().1
    }

    pub fn guidance(self) -> &'static str {
        self.entry().2
    }
}

impl fmt::Display for Archetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for Archetype {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_trigger_maps_to_its_archetype() {
        let cases = [
            ("offer an apology", Archetype::Apology),
            ("clarify the scope", Archetype::ClarificationSeeking),
            ("request a new start time", Archetype::DirectRequest),
            ("file a complaint", Archetype::ProblemReporting),
            ("report an issue", Archetype::ProblemReporting),
            ("send an update", Archetype::StatusUpdate),
            ("share a proposal", Archetype::OpportunityPitch),
            ("discuss an investment", Archetype::OpportunityPitch),
            ("book an appointment", Archetype::PersonalScheduling),
            ("set up a meeting", Archetype::PersonalScheduling),
            ("say thanks", Archetype::ProfessionalCommunication),
        ];
        for (focus, expected) in cases {
            assert_eq!(classify(focus, ""), expected, "focus: {focus:?}");
        }
    }

    #[test]
    fn earlier_rule_wins_on_multiple_matches() {
        assert_eq!(classify("request an apology", ""), Archetype::Apology);
        assert_eq!(
            classify("update on the meeting", ""),
            Archetype::StatusUpdate
        );
        assert_eq!(
            classify("clarify the complaint", ""),
            Archetype::ClarificationSeeking
        );
    }

    #[test]
    fn scenario_text_participates() {
        assert_eq!(
            classify("talk to the landlord", "Heating Issue"),
            Archetype::ProblemReporting
        );
    }

    #[test]
    fn matching_is_case_insensitive_substring() {
        assert_eq!(classify("REQUESTING leave", ""), Archetype::DirectRequest);
        assert_eq!(classify("Meetings next week", ""), Archetype::PersonalScheduling);
    }

    #[test]
    fn triggers_do_not_span_the_joining_space() {
        assert_eq!(classify("req", "uest"), Archetype::ProfessionalCommunication);
    }

    #[test]
    fn guidance_table_covers_every_archetype_once() {
        let all = [
            Archetype::Apology,
            Archetype::ClarificationSeeking,
            Archetype::DirectRequest,
            Archetype::ProblemReporting,
            Archetype::StatusUpdate,
            Archetype::OpportunityPitch,
            Archetype::PersonalScheduling,
            Archetype::ProfessionalCommunication,
        ];
        for archetype in all {
            let rows = GUIDANCE.iter().filter(|(a, _, _)| *a == archetype).count();
            assert_eq!(rows, 1, "{archetype:?} should have exactly one row");
        }
    }

    #[test]
    fn names_and_guidance() {
        assert_eq!(Archetype::Apology.name(), "Accountability / Apology");
        assert_eq!(
            Archetype::DirectRequest.guidance(),
            "State the request early. Avoid excessive justification."
        );
        assert_eq!(
            Archetype::ProfessionalCommunication.guidance(),
            "Be clear, purposeful, and context-aware."
        );
        assert_eq!(
            Archetype::PersonalScheduling.to_string(),
            "Personal Scheduling Request"
        );
    }

    #[test]
    fn serializes_as_display_name() {
        let json = serde_json::to_string(&Archetype::StatusUpdate).unwrap();
        assert_eq!(json, "\"Status Update\"");
    }
}
