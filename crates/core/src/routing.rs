//! Persona router: which content branch a user sees next.
//!
//! Branches only on the two durable profile attributes (professional flag,
//! dominant scenario). A user who arrives at a later step without having
//! completed an earlier one gets an explicit recovery branch, never a panic.

use serde::{Deserialize, Serialize};

use crate::scenario::Scenario;

/// Tri-state professional flag from the intake goal question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Professional {
    Unknown,
    Professional,
    NonProfessional,
}

impl Professional {
    /// Collapse the two stored booleans into the tri-state.
    ///
    /// Both flags set is treated as professional (the intake flow always
    /// clears one when setting the other, so this only matters for rows
    /// edited out of band).
    pub fn from_flags(is_professional: bool, is_non_professional: bool) -> Self {
        match (is_professional, is_non_professional) {
            (true, _) => Professional::Professional,
            (false, true) => Professional::NonProfessional,
            (false, false) => Professional::Unknown,
        }
    }

    /// Stable string used in events and the intake notification.
    pub fn as_str(&self) -> &'static str {
        match self {
            Professional::Unknown => "unknown",
            Professional::Professional => "professional",
            Professional::NonProfessional => "non_professional",
        }
    }
}

/// The next content branch for a user asking for their scenario cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentBranch {
    /// Professional with a computed scenario: cost-of-inaction quiz.
    CostQuiz(Scenario),
    /// Non-professional: lost-potential quiz (scenario not required).
    LostPotentialQuiz,
    /// Professional flag never set: send back to intake.
    NeedsIntake,
    /// Professional without a finished persona quiz: send to the quiz.
    NeedsPersonaQuiz,
}

/// Select the content branch for the given profile attributes.
pub fn route(professional: Professional, scenario: Option<Scenario>) -> ContentBranch {
    match (professional, scenario) {
        (Professional::Unknown, _) => ContentBranch::NeedsIntake,
        (Professional::NonProfessional, _) => ContentBranch::LostPotentialQuiz,
        (Professional::Professional, Some(s)) => ContentBranch::CostQuiz(s),
        (Professional::Professional, None) => ContentBranch::NeedsPersonaQuiz,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_flag_routes_to_intake() {
        assert_eq!(
            route(Professional::Unknown, Some(Scenario::Impostor)),
            ContentBranch::NeedsIntake
        );
        assert_eq!(route(Professional::Unknown, None), ContentBranch::NeedsIntake);
    }

    #[test]
    fn professional_with_scenario_routes_to_cost_quiz() {
        assert_eq!(
            route(Professional::Professional, Some(Scenario::Seeker)),
            ContentBranch::CostQuiz(Scenario::Seeker)
        );
    }

    #[test]
    fn professional_without_scenario_routes_to_persona_quiz() {
        assert_eq!(
            route(Professional::Professional, None),
            ContentBranch::NeedsPersonaQuiz
        );
    }

    #[test]
    fn non_professional_routes_to_lost_potential() {
        assert_eq!(
            route(Professional::NonProfessional, None),
            ContentBranch::LostPotentialQuiz
        );
        assert_eq!(
            route(Professional::NonProfessional, Some(Scenario::EternalStudent)),
            ContentBranch::LostPotentialQuiz
        );
    }

    #[test]
    fn flags_collapse_to_tristate() {
        assert_eq!(Professional::from_flags(false, false), Professional::Unknown);
        assert_eq!(Professional::from_flags(true, false), Professional::Professional);
        assert_eq!(Professional::from_flags(false, true), Professional::NonProfessional);
        assert_eq!(Professional::from_flags(true, true), Professional::Professional);
    }
}
