//! Generic quiz flow definition.
//!
//! The three quiz variants share one shape: a linear chain of steps, each
//! offering a closed set of options, optionally ending in a multi-select
//! toggle step. One parameterized [`FlowDef`] replaces the per-flow copies
//! the conversational layer would otherwise accumulate.
//!
//! Tables are validated once at construction and never change afterwards,
//! so an unrecognized option code at dispatch time always means the action
//! belongs to a different step (or a different flow), never a typo in the
//! table itself.

use crate::error::CoreError;
use crate::scenario::Scenario;

// ---------------------------------------------------------------------------
// Options and steps
// ---------------------------------------------------------------------------

/// What answering with a given option contributes to the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerEffect {
    /// Persona quiz: increment this scenario's counter by 1.
    Score(Scenario),
    /// Numeric quizzes: record this value under the step's question ID.
    Value(i64),
    /// Multi-select steps: toggle membership of the option code.
    Toggle,
}

/// One inline-button option within a step.
#[derive(Debug, Clone)]
pub struct StepOption {
    /// Callback code, unique across the whole flow.
    pub code: &'static str,
    /// Button label shown to the user.
    pub label: &'static str,
    pub effect: AnswerEffect,
}

/// Step shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    /// Exactly one option is chosen and the flow advances.
    SingleChoice,
    /// Options toggle on/off; only `done_code` advances the flow.
    MultiSelect {
        done_code: &'static str,
        done_label: &'static str,
    },
}

/// One question in a flow.
#[derive(Debug, Clone)]
pub struct StepDef {
    /// Stable key the collected answer is stored under (e.g. `"months_delay"`).
    pub question_id: &'static str,
    pub prompt: &'static str,
    pub kind: StepKind,
    pub options: Vec<StepOption>,
}

impl StepDef {
    /// Look up an option by code within this step's namespace.
    pub fn option(&self, code: &str) -> Option<&StepOption> {
        self.options.iter().find(|o| o.code == code)
    }

    /// Whether `code` is this step's multi-select terminal signal.
    pub fn is_done_code(&self, code: &str) -> bool {
        matches!(self.kind, StepKind::MultiSelect { done_code, .. } if done_code == code)
    }

    /// Whether this step recognizes `code` at all (option or done signal).
    pub fn accepts(&self, code: &str) -> bool {
        self.is_done_code(code) || self.option(code).is_some()
    }
}

// ---------------------------------------------------------------------------
// FlowDef
// ---------------------------------------------------------------------------

/// An ordered, validated chain of steps forming one quiz variant.
#[derive(Debug, Clone)]
pub struct FlowDef {
    code: &'static str,
    title: &'static str,
    steps: Vec<StepDef>,
}

impl FlowDef {
    /// Build a flow, failing fast on a malformed table.
    ///
    /// Rejects empty flows, steps without options, option codes that appear
    /// more than once anywhere in the flow, and a multi-select done-code
    /// that collides with an option code.
    pub fn new(
        code: &'static str,
        title: &'static str,
        steps: Vec<StepDef>,
    ) -> Result<Self, CoreError> {
        if steps.is_empty() {
            return Err(CoreError::Validation(format!(
                "Flow '{code}' must have at least one step"
            )));
        }

        let mut seen: Vec<&str> = Vec::new();
        let mut claim = |candidate: &'static str| -> Result<(), CoreError> {
            if seen.contains(&candidate) {
                return Err(CoreError::Validation(format!(
                    "Flow '{code}': option code '{candidate}' is not unique"
                )));
            }
            seen.push(candidate);
            Ok(())
        };

        for (ix, step) in steps.iter().enumerate() {
            if step.options.is_empty() {
                return Err(CoreError::Validation(format!(
                    "Flow '{code}': step {ix} ('{}') has no options",
                    step.question_id
                )));
            }
            for option in &step.options {
                claim(option.code)?;
            }
            if let StepKind::MultiSelect { done_code, .. } = step.kind {
                claim(done_code)?;
            }
        }

        Ok(Self { code, title, steps })
    }

    /// Quiz catalog code (`quizzes.code`).
    pub fn code(&self) -> &'static str {
        self.code
    }

    /// Human-readable quiz title.
    pub fn title(&self) -> &'static str {
        self.title
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn step(&self, ix: usize) -> Option<&StepDef> {
        self.steps.get(ix)
    }

    /// Whether `ix` is the final step of the chain.
    pub fn is_last(&self, ix: usize) -> bool {
        ix + 1 == self.steps.len()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn option(code: &'static str, value: i64) -> StepOption {
        StepOption { code, label: code, effect: AnswerEffect::Value(value) }
    }

    fn single(question_id: &'static str, options: Vec<StepOption>) -> StepDef {
        StepDef { question_id, prompt: "?", kind: StepKind::SingleChoice, options }
    }

    #[test]
    fn valid_flow_constructs() {
        let flow = FlowDef::new(
            "demo",
            "Demo",
            vec![
                single("a", vec![option("a_1", 1), option("a_2", 2)]),
                single("b", vec![option("b_1", 1)]),
            ],
        )
        .unwrap();
        assert_eq!(flow.len(), 2);
        assert!(flow.is_last(1));
        assert!(!flow.is_last(0));
    }

    #[test]
    fn empty_flow_rejected() {
        let err = FlowDef::new("demo", "Demo", vec![]).unwrap_err();
        assert_matches!(err, CoreError::Validation(_));
    }

    #[test]
    fn step_without_options_rejected() {
        let err = FlowDef::new("demo", "Demo", vec![single("a", vec![])]).unwrap_err();
        assert_matches!(err, CoreError::Validation(_));
    }

    #[test]
    fn duplicate_code_across_steps_rejected() {
        let err = FlowDef::new(
            "demo",
            "Demo",
            vec![
                single("a", vec![option("x", 1)]),
                single("b", vec![option("x", 2)]),
            ],
        )
        .unwrap_err();
        assert_matches!(err, CoreError::Validation(_));
    }

    #[test]
    fn done_code_colliding_with_option_rejected() {
        let step = StepDef {
            question_id: "multi",
            prompt: "?",
            kind: StepKind::MultiSelect { done_code: "x", done_label: "Done" },
            options: vec![StepOption { code: "x", label: "x", effect: AnswerEffect::Toggle }],
        };
        let err = FlowDef::new("demo", "Demo", vec![step]).unwrap_err();
        assert_matches!(err, CoreError::Validation(_));
    }

    #[test]
    fn option_lookup_is_per_step() {
        let flow = FlowDef::new(
            "demo",
            "Demo",
            vec![
                single("a", vec![option("a_1", 1)]),
                single("b", vec![option("b_1", 2)]),
            ],
        )
        .unwrap();
        // A step-2 code is not accepted by step 1.
        assert!(flow.step(0).unwrap().option("b_1").is_none());
        assert!(flow.step(1).unwrap().option("b_1").is_some());
    }

    #[test]
    fn done_code_recognized_only_by_multiselect() {
        let multi = StepDef {
            question_id: "multi",
            prompt: "?",
            kind: StepKind::MultiSelect { done_code: "done", done_label: "Done" },
            options: vec![StepOption { code: "t_1", label: "t", effect: AnswerEffect::Toggle }],
        };
        let flow = FlowDef::new(
            "demo",
            "Demo",
            vec![single("a", vec![option("a_1", 1)]), multi],
        )
        .unwrap();
        assert!(!flow.step(0).unwrap().accepts("done"));
        assert!(flow.step(1).unwrap().is_done_code("done"));
        assert!(flow.step(1).unwrap().accepts("t_1"));
    }
}
