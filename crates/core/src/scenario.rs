//! The three-way persona enumeration ("dominant scenario").
//!
//! Every persona-quiz option is tagged with exactly one scenario; the quiz
//! result and the durable user-profile field both hold one of these values.

use serde::{Deserialize, Serialize};

/// Behavioral archetype assigned by the persona quiz.
///
/// The declaration order is load-bearing: [`Scenario::ALL`] iterates in this
/// order and dominant-scenario selection breaks ties by taking the first
/// maximum, so `Impostor` wins a three-way tie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scenario {
    Impostor,
    EternalStudent,
    Seeker,
}

impl Scenario {
    /// All scenarios in fixed tie-break order.
    pub const ALL: [Scenario; 3] = [Scenario::Impostor, Scenario::EternalStudent, Scenario::Seeker];

    /// Stable string code used in the database and in event payloads.
    pub fn as_str(&self) -> &'static str {
        match self {
            Scenario::Impostor => "impostor",
            Scenario::EternalStudent => "eternal_student",
            Scenario::Seeker => "seeker",
        }
    }

    /// Parse a stable string code back into a scenario.
    pub fn from_code(code: &str) -> Option<Scenario> {
        match code {
            "impostor" => Some(Scenario::Impostor),
            "eternal_student" => Some(Scenario::EternalStudent),
            "seeker" => Some(Scenario::Seeker),
            _ => None,
        }
    }

    /// Human-readable name used in rendered messages.
    pub fn display_name(&self) -> &'static str {
        match self {
            Scenario::Impostor => "Impostor syndrome",
            Scenario::EternalStudent => "Eternal student",
            Scenario::Seeker => "Restless seeker",
        }
    }
}

impl std::fmt::Display for Scenario {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
