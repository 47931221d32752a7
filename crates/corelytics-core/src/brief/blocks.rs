//! Fixed instruction text included verbatim in every brief.

/// Opening role statement.
pub const PREAMBLE: &str = "\
You are writing a real email as a real person in a real situation.

You are NOT an AI.
You are NOT generating a template.
You are NOT writing a textbook example.";

/// Asks for a lived-in, slightly imperfect voice.
pub const EMBODIMENT: &str = "\
Embodiment Instruction:
Write from the perspective of someone who has actually experienced this situation.
There should be mild natural imperfection in tone.
Do not sound like a formal announcement.";

/// Demands at least one concrete detail and bans vague filler.
pub const SPECIFICITY: &str = "\
Specificity Requirement:
- Include at least one concrete detail (timeframe, example, constraint, or prior action taken)
- Avoid vague phrases like \"recently\", \"exciting opportunity\", \"some concerns\"
- Replace general claims with grounded statements";

/// Stock phrases the email must not use.
pub const FORBIDDEN_PHRASES: [&str; 5] = [
    "I hope this message finds you well",
    "This email is regarding",
    "I would like to bring to your attention",
    "Exciting opportunity",
    "Kindly do the needful",
];

pub const ANTI_GENERIC: &str = "\
Forbidden Generic Phrases:
- \"I hope this message finds you well\"
- \"This email is regarding\"
- \"I would like to bring to your attention\"
- \"Exciting opportunity\"
- \"Kindly do the needful\"
- Overly polished marketing language

If a sentence sounds like a template, rewrite it.";

pub const STRUCTURE: &str = "\
Structural Expectations:
- Include a subject line
- Use 3–4 meaningful paragraphs
- Each paragraph must add new information
- End with a natural sign-off appropriate to the context
- Do NOT use placeholders like [Your Name]
- Do NOT overexplain
- Do NOT repeat labels like domain or category
- Do NOT sound polished to the point of artificiality";

pub const CLOSING: &str = "Write the complete email now.";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preamble_negates_ai_and_template_roles() {
        assert!(PREAMBLE.contains("You are NOT an AI."));
        assert!(PREAMBLE.contains("You are NOT generating a template."));
    }

    #[test]
    fn embodiment_asks_for_lived_experience() {
        assert!(EMBODIMENT.starts_with("Embodiment Instruction:"));
        assert!(EMBODIMENT.contains("actually experienced this situation"));
        assert!(EMBODIMENT.contains("mild natural imperfection"));
    }

    #[test]
    fn specificity_requires_a_concrete_detail() {
        assert!(SPECIFICITY.contains("at least one concrete detail"));
        for vague in ["\"recently\"", "\"exciting opportunity\"", "\"some concerns\""] {
            assert!(SPECIFICITY.contains(vague), "missing {vague}");
        }
    }

    #[test]
    fn anti_generic_lists_every_forbidden_phrase() {
        for phrase in FORBIDDEN_PHRASES {
            assert!(
                ANTI_GENERIC.contains(&format!("- \"{phrase}\"")),
                "missing {phrase:?}"
            );
        }
        assert!(ANTI_GENERIC.ends_with("If a sentence sounds like a template, rewrite it."));
    }

    #[test]
    fn structure_covers_layout_rules() {
        for rule in [
            "subject line",
            "3–4 meaningful paragraphs",
            "add new information",
            "natural sign-off",
            "placeholders",
            "repeat labels like domain or category",
            "polished to the point of artificiality",
        ] {
            assert!(STRUCTURE.contains(rule), "missing {rule:?}");
        }
    }

    #[test]
    fn blocks_have_no_surrounding_whitespace() {
        for block in [PREAMBLE, EMBODIMENT, SPECIFICITY, ANTI_GENERIC, STRUCTURE, CLOSING] {
            assert_eq!(block, block.trim());
        }
    }
}
