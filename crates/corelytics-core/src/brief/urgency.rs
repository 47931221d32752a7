//! Urgency guidance derived from the `pressure` metadata value.

use std::fmt;

/// How time-sensitive the message is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pressure {
    Low,
    #[default]
    Normal,
    High,
}

impl Pressure {
    /// Interpret a raw metadata value. Only the exact strings `"high"` and
    /// `"low"` are recognised; anything else is [`Pressure::Normal`].
    pub fn from_meta(value: &str) -> Self {
        match value {
            "high" => Self::High,
            "low" => Self::Low,
            _ => Self::Normal,
        }
    }

    pub fn guidance(self) -> &'static str {
        match self {
            Self::High => {
                "There is time sensitivity. Reflect urgency respectfully without sounding panicked."
            }
            Self::Low => "There is no urgency. Keep the tone calm and unpressured.",
            Self::Normal => "Normal professional urgency.",
        }
    }
}

impl fmt::Display for Pressure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Low => "low",
            Self::Normal => "normal",
            Self::High => "high",
        };
        f.write_str(s)
    }
}

/// Urgency sentence for a raw `pressure` value. Never fails.
pub fn urgency_text(pressure: &str) -> &'static str {
    Pressure::from_meta(pressure).guidance()
}
