//! The three concrete quiz flows.
//!
//! Option codes and their numeric values are carried over from the live
//! funnel configuration; changing a value here changes what the scoring
//! engine receives, so the tables are closed and validated by
//! [`FlowDef::new`] rather than matched ad hoc at dispatch time.

use crate::error::CoreError;
use crate::flow::{AnswerEffect, FlowDef, StepDef, StepKind, StepOption};
use crate::scenario::Scenario;

// ---------------------------------------------------------------------------
// Quiz catalog codes
// ---------------------------------------------------------------------------

/// Persona quiz (everyone takes it).
pub const PERSONA_QUIZ_CODE: &str = "main_persona_quiz";
/// Cost-of-inaction quiz (professionals only).
pub const COST_QUIZ_CODE: &str = "cost_of_inaction";
/// Lost-potential quiz (non-professionals only).
pub const LOST_POTENTIAL_QUIZ_CODE: &str = "lost_potential";

/// Multi-select terminal signal for the sabotage step.
pub const SABOTAGE_DONE_CODE: &str = "q3_done";

fn score(code: &'static str, label: &'static str, scenario: Scenario) -> StepOption {
    StepOption { code, label, effect: AnswerEffect::Score(scenario) }
}

fn value(code: &'static str, label: &'static str, v: i64) -> StepOption {
    StepOption { code, label, effect: AnswerEffect::Value(v) }
}

fn toggle(code: &'static str, label: &'static str) -> StepOption {
    StepOption { code, label, effect: AnswerEffect::Toggle }
}

// ---------------------------------------------------------------------------
// Persona quiz
// ---------------------------------------------------------------------------

/// Three questions, three options each, one scenario tag per option.
pub fn persona_quiz() -> Result<FlowDef, CoreError> {
    FlowDef::new(
        PERSONA_QUIZ_CODE,
        "Dominant scenario quiz",
        vec![
            StepDef {
                question_id: "deeper_into_field",
                prompt: "When you think about going deeper into this work...",
                kind: StepKind::SingleChoice,
                options: vec![
                    score(
                        "q1_impostor",
                        "\"What if I do something wrong and cause harm?\"",
                        Scenario::Impostor,
                    ),
                    score(
                        "q1_seeker",
                        "\"What if this isn't for me after all? What if I change my mind again?\"",
                        Scenario::Seeker,
                    ),
                    score(
                        "q1_eternal_student",
                        "\"Not sure yet -- I want to think everything through first\"",
                        Scenario::EternalStudent,
                    ),
                ],
            },
            StepDef {
                question_id: "reaction_to_criticism",
                prompt: "When someone close to you criticizes you, you...",
                kind: StepKind::SingleChoice,
                options: vec![
                    score(
                        "q2_eternal_student",
                        "\"Argue, justify myself -- and try to do even better\"",
                        Scenario::EternalStudent,
                    ),
                    score(
                        "q2_seeker",
                        "\"Go quiet, withdraw for a while and start doubting myself\"",
                        Scenario::Seeker,
                    ),
                    score(
                        "q2_impostor",
                        "\"Feel a sting, as if I really am not good enough\"",
                        Scenario::Impostor,
                    ),
                ],
            },
            StepDef {
                question_id: "biggest_blocker",
                prompt: "What holds you back the most?",
                kind: StepKind::SingleChoice,
                options: vec![
                    score(
                        "q3_seeker",
                        "\"I keep learning and searching but can't decide where to go\"",
                        Scenario::Seeker,
                    ),
                    score(
                        "q3_impostor",
                        "\"I doubt my knowledge is enough to help others or charge money\"",
                        Scenario::Impostor,
                    ),
                    score(
                        "q3_eternal_student",
                        "\"I want everything perfect before I act\"",
                        Scenario::EternalStudent,
                    ),
                ],
            },
        ],
    )
}

// ---------------------------------------------------------------------------
// Cost-of-inaction quiz (professionals)
// ---------------------------------------------------------------------------

/// Three numeric questions feeding [`crate::scoring::cost_of_inaction`].
///
/// Current-income brackets map to the upper bound of the bracket; the open
/// top bracket uses a nominal value for the calculation.
pub fn cost_quiz() -> Result<FlowDef, CoreError> {
    FlowDef::new(
        COST_QUIZ_CODE,
        "Cost of your scenario",
        vec![
            StepDef {
                question_id: "expected_income",
                prompt: "What monthly income would you like your practice to bring?",
                kind: StepKind::SingleChoice,
                options: vec![
                    value("price_q1_50k", "About 50 000", 50_000),
                    value("price_q1_100k", "About 100 000", 100_000),
                    value("price_q1_200k", "200 000 or more", 200_000),
                ],
            },
            StepDef {
                question_id: "current_income",
                prompt: "How much does your practice bring you now?",
                kind: StepKind::SingleChoice,
                options: vec![
                    value("price_q2_0", "Nothing yet", 0),
                    value("price_q2_5_30", "5 000 - 30 000", 30_000),
                    value("price_q2_30_70", "30 000 - 70 000", 70_000),
                    value("price_q2_70_plus", "More than 70 000", 100_000),
                ],
            },
            StepDef {
                question_id: "months_delay",
                prompt: "How long have you been putting off the next step?",
                kind: StepKind::SingleChoice,
                options: vec![
                    value("price_q3_3", "About 3 months", 3),
                    value("price_q3_6", "About half a year", 6),
                    value("price_q3_9", "About 9 months", 9),
                    value("price_q3_12", "A year or more", 12),
                ],
            },
        ],
    )
}

// ---------------------------------------------------------------------------
// Lost-potential quiz (non-professionals)
// ---------------------------------------------------------------------------

/// Two numeric questions plus the multi-select sabotage step, feeding
/// [`crate::scoring::lost_potential`].
pub fn lost_potential_quiz() -> Result<FlowDef, CoreError> {
    FlowDef::new(
        LOST_POTENTIAL_QUIZ_CODE,
        "Lost potential quiz",
        vec![
            StepDef {
                question_id: "months_interested",
                prompt: "How long have you been interested in psychology?",
                kind: StepKind::SingleChoice,
                options: vec![
                    value("q1_6m", "Up to 6 months", 6),
                    value("q1_1y", "About a year", 12),
                    value("q1_2y", "About two years", 24),
                    value("q1_2y_plus", "More than two years", 36),
                ],
            },
            StepDef {
                question_id: "frequency_coef",
                prompt: "How often does the thought \"I want to start, but I keep putting it off\" come up?",
                kind: StepKind::SingleChoice,
                options: vec![
                    value("q2_rare", "Once a month or less", 1),
                    value("q2_few_month", "A few times a month", 2),
                    value("q2_weekly", "About once a week", 4),
                    value("q2_daily", "Almost every day", 8),
                ],
            },
            StepDef {
                question_id: "sabotage_items",
                prompt: "Which of these sound like you? Pick as many as apply.",
                kind: StepKind::MultiSelect {
                    done_code: SABOTAGE_DONE_CODE,
                    done_label: "Done, show my results",
                },
                options: vec![
                    toggle("q3_books", "Read books, watched lectures, took mini-courses"),
                    toggle("q3_help_people", "Thought \"I could help people, but I don't dare\""),
                    toggle("q3_analysis", "Analyzed myself and others -- but it stayed in my head"),
                    toggle("q3_stuck", "Felt stuck: learning, but not moving"),
                    toggle("q3_postpone", "Postponed real steps because \"I'm not ready yet\""),
                    toggle("q3_search", "Kept searching for the right direction without choosing"),
                ],
            },
        ],
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
