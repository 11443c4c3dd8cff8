//! Quiz execution: starting the three flows, scoring answers, multi-select
//! toggling, finalization, and result persistence.

use serde_json::json;

use funnel_core::flow::{AnswerEffect, StepKind};
use funnel_core::routing::{self, ContentBranch};
use funnel_core::scoring;
use funnel_core::types::ExternalId;
use funnel_db::models::cost_result::NewCostResult;
use funnel_db::models::lost_potential::NewLostPotentialResult;

use crate::content;
use crate::dispatch::{event_codes, Engine};
use crate::error::EngineError;
use crate::session::{FlowKind, QuizSession, SessionState};
use crate::transport::Transport;

impl Engine {
    /// "Start the quiz": create a run row and render question 1.
    pub(crate) async fn start_persona_quiz(
        &self,
        transport: &dyn Transport,
        user_id: ExternalId,
    ) -> Result<Option<String>, EngineError> {
        let Some(user) = self.store.get_user(user_id).await? else {
            transport.render(user_id, content::profile_missing()).await?;
            return Ok(None);
        };

        let flow = self.flow(FlowKind::Persona);
        let quiz_id = self.store.quiz_id(flow.code(), flow.title()).await?;
        let run = self.store.create_run(user.id, quiz_id).await?;

        self.store
            .append_event(
                user.id,
                Some(quiz_id),
                event_codes::QUIZ_STARTED,
                json!({ "run_id": run.id }),
            )
            .await?;
        tracing::info!(user = user_id, run = run.id, "Persona quiz started");

        self.sessions()
            .put(
                user_id,
                SessionState::Quiz(QuizSession::new(FlowKind::Persona, Some(run.id))),
            )
            .await;
        let first = flow.step(0).map(content::quiz_question);
        if let Some(prompt) = first {
            transport.render(user_id, prompt).await?;
        }
        Ok(None)
    }

    /// "Show me what my scenario costs": branch on the durable profile.
    pub(crate) async fn route_cost_branch(
        &self,
        transport: &dyn Transport,
        user_id: ExternalId,
    ) -> Result<Option<String>, EngineError> {
        let Some(user) = self.store.get_user(user_id).await? else {
            transport.render(user_id, content::profile_missing()).await?;
            return Ok(None);
        };

        let prompt = match routing::route(user.professional(), user.scenario()) {
            ContentBranch::CostQuiz(scenario) => content::cost_intro(scenario),
            ContentBranch::LostPotentialQuiz => content::lost_potential_intro(),
            ContentBranch::NeedsIntake => content::needs_intake(),
            ContentBranch::NeedsPersonaQuiz => content::needs_persona_quiz(),
        };
        transport.render(user_id, prompt).await?;
        Ok(None)
    }

    /// Enter the cost quiz. Gated: professionals with a scenario only;
    /// anyone else gets their recovery branch instead.
    pub(crate) async fn start_cost_quiz(
        &self,
        transport: &dyn Transport,
        user_id: ExternalId,
    ) -> Result<Option<String>, EngineError> {
        let Some(user) = self.store.get_user(user_id).await? else {
            transport.render(user_id, content::profile_missing()).await?;
            return Ok(None);
        };
        match routing::route(user.professional(), user.scenario()) {
            ContentBranch::CostQuiz(_) => {}
            other => return self.render_recovery(transport, user_id, other).await,
        }

        self.sessions()
            .put(user_id, SessionState::Quiz(QuizSession::new(FlowKind::Cost, None)))
            .await;
        let flow = self.flow(FlowKind::Cost);
        if let Some(step) = flow.step(0) {
            transport.render(user_id, content::quiz_question(step)).await?;
        }
        Ok(None)
    }

    /// Enter the lost-potential quiz. Gated: non-professionals only.
    pub(crate) async fn start_lost_quiz(
        &self,
        transport: &dyn Transport,
        user_id: ExternalId,
    ) -> Result<Option<String>, EngineError> {
        let Some(user) = self.store.get_user(user_id).await? else {
            transport.render(user_id, content::profile_missing()).await?;
            return Ok(None);
        };
        match routing::route(user.professional(), user.scenario()) {
            ContentBranch::LostPotentialQuiz => {}
            other => return self.render_recovery(transport, user_id, other).await,
        }

        self.sessions()
            .put(
                user_id,
                SessionState::Quiz(QuizSession::new(FlowKind::LostPotential, None)),
            )
            .await;
        let flow = self.flow(FlowKind::LostPotential);
        if let Some(step) = flow.step(0) {
            transport.render(user_id, content::quiz_question(step)).await?;
        }
        Ok(None)
    }

    async fn render_recovery(
        &self,
        transport: &dyn Transport,
        user_id: ExternalId,
        branch: ContentBranch,
    ) -> Result<Option<String>, EngineError> {
        let prompt = match branch {
            ContentBranch::CostQuiz(scenario) => content::cost_intro(scenario),
            ContentBranch::LostPotentialQuiz => content::lost_potential_intro(),
            ContentBranch::NeedsIntake => content::needs_intake(),
            ContentBranch::NeedsPersonaQuiz => content::needs_persona_quiz(),
        };
        transport.render(user_id, prompt).await?;
        Ok(None)
    }

    /// One quiz option tapped while a quiz session is active.
    ///
    /// Rejects anything outside the current step's namespace (including
    /// codes from other steps of the same flow) as an acknowledged no-op.
    pub(crate) async fn quiz_answer(
        &self,
        transport: &dyn Transport,
        user_id: ExternalId,
        mut session: QuizSession,
        code: &str,
    ) -> Result<Option<String>, EngineError> {
        let flow = self.flow(session.kind);
        let Some(step) = flow.step(session.step) else {
            // All questions answered; only the terminal action is valid here.
            return Ok(None);
        };
        if !step.accepts(code) {
            return Ok(None);
        }

        match step.kind {
            StepKind::SingleChoice => {
                let Some(option) = step.option(code) else {
                    return Ok(None);
                };
                match option.effect {
                    AnswerEffect::Score(scenario) => {
                        let Some(run_id) = session.run_id else {
                            transport.render(user_id, content::run_missing()).await?;
                            self.sessions().clear(user_id).await;
                            return Ok(None);
                        };
                        match self.store.record_answer(run_id, scenario).await? {
                            Some(run) => {
                                tracing::info!(
                                    run = run_id,
                                    scenario = %scenario,
                                    total = run.score_card().total(),
                                    "Answer scored"
                                );
                            }
                            None => {
                                transport.render(user_id, content::run_missing()).await?;
                                self.sessions().clear(user_id).await;
                                return Ok(None);
                            }
                        }
                    }
                    AnswerEffect::Value(value) => {
                        session.values.insert(step.question_id, value);
                    }
                    // Toggle options only occur on multi-select steps.
                    AnswerEffect::Toggle => return Ok(None),
                }
                self.advance(transport, user_id, session).await
            }
            StepKind::MultiSelect { .. } => {
                if step.is_done_code(code) {
                    // Terminal signal: only the lost-potential flow ends in
                    // a multi-select step.
                    self.finish_lost_potential(transport, user_id, &session).await?;
                    self.sessions().clear(user_id).await;
                    Ok(None)
                } else {
                    // Idempotent toggle: re-selecting removes the item.
                    if !session.toggles.remove(code) {
                        session.toggles.insert(code.to_string());
                    }
                    let count = session.toggles.len();
                    self.sessions().put(user_id, SessionState::Quiz(session)).await;
                    Ok(Some(format!("Selected: {count}")))
                }
            }
        }
    }

    /// Move to the next step, or hand over to the flow's terminal action.
    async fn advance(
        &self,
        transport: &dyn Transport,
        user_id: ExternalId,
        mut session: QuizSession,
    ) -> Result<Option<String>, EngineError> {
        session.step += 1;
        let flow = self.flow(session.kind);

        if let Some(step) = flow.step(session.step) {
            let prompt = content::quiz_question(step);
            self.sessions().put(user_id, SessionState::Quiz(session)).await;
            transport.render(user_id, prompt).await?;
            return Ok(None);
        }

        match session.kind {
            // Results wait behind an explicit button.
            FlowKind::Persona => {
                self.sessions().put(user_id, SessionState::Quiz(session)).await;
                transport.render(user_id, content::quiz_complete()).await?;
            }
            // The last numeric answer is the terminal action.
            FlowKind::Cost => {
                self.finish_cost(transport, user_id, &session).await?;
                self.sessions().clear(user_id).await;
            }
            // Unreachable: the lost-potential flow ends in a multi-select
            // step, which terminates through its done-code instead.
            FlowKind::LostPotential => {
                self.sessions().clear(user_id).await;
            }
        }
        Ok(None)
    }

    /// "See my scenario results": finalize the run exactly once and mirror
    /// the dominant scenario onto the profile.
    pub(crate) async fn show_persona_results(
        &self,
        transport: &dyn Transport,
        user_id: ExternalId,
    ) -> Result<Option<String>, EngineError> {
        let flow = self.flow(FlowKind::Persona);
        let run_id = match self.sessions().get(user_id).await {
            Some(SessionState::Quiz(QuizSession {
                kind: FlowKind::Persona,
                step,
                run_id: Some(run_id),
                ..
            })) if step == flow.len() => run_id,
            _ => {
                transport.render(user_id, content::run_missing()).await?;
                return Ok(None);
            }
        };

        let Some(run) = self.store.get_run(run_id).await? else {
            transport.render(user_id, content::run_missing()).await?;
            self.sessions().clear(user_id).await;
            return Ok(None);
        };

        let dominant = run.score_card().dominant();
        match self.store.finalize_run(run_id, dominant).await? {
            Some(finalized) => {
                self.store.set_dominant_scenario(run.user_id, dominant).await?;
                self.store
                    .append_event(
                        run.user_id,
                        Some(run.quiz_id),
                        event_codes::QUIZ_COMPLETED,
                        json!({ "run_id": run_id, "dominant_scenario": dominant.as_str() }),
                    )
                    .await?;
                tracing::info!(
                    run = run_id,
                    dominant = %dominant,
                    finished_at = ?finalized.finished_at,
                    "Persona quiz completed"
                );
                transport.render(user_id, content::scenario_reveal(dominant)).await?;
            }
            None => {
                // Duplicate tap raced past the session: re-show the stored
                // result without touching counters or the profile.
                let scenario = run.scenario().unwrap_or(dominant);
                transport.render(user_id, content::scenario_reveal(scenario)).await?;
            }
        }

        self.sessions().clear(user_id).await;
        Ok(None)
    }

    /// Flush the finished cost quiz: compute, persist, render, log.
    async fn finish_cost(
        &self,
        transport: &dyn Transport,
        user_id: ExternalId,
        session: &QuizSession,
    ) -> Result<(), EngineError> {
        let (Some(expected), Some(current), Some(months)) = (
            session.values.get("expected_income").copied(),
            session.values.get("current_income").copied(),
            session.values.get("months_delay").copied(),
        ) else {
            transport.render(user_id, content::restart_hint()).await?;
            return Ok(());
        };

        let Some(user) = self.store.get_user(user_id).await? else {
            transport.render(user_id, content::profile_missing()).await?;
            return Ok(());
        };

        let cost = scoring::cost_of_inaction(expected, current, months);
        let flow = self.flow(FlowKind::Cost);
        let quiz_id = self.store.quiz_id(flow.code(), flow.title()).await?;

        self.store
            .save_cost_result(NewCostResult {
                user_id: user.id,
                quiz_id,
                is_professional_snapshot: user.is_professional,
                scenario: user.dominant_scenario.clone(),
                expected_income: expected,
                current_income: current,
                months_delay: months,
                lost_per_month: cost.lost_per_month,
                lost_total: cost.lost_total,
                lost_three_years: cost.lost_three_years,
            })
            .await?;
        self.store
            .append_event(
                user.id,
                Some(quiz_id),
                event_codes::COST_CALCULATED,
                json!({
                    "expected_income": expected,
                    "current_income": current,
                    "months_delay": months,
                    "lost_total": cost.lost_total,
                }),
            )
            .await?;
        tracing::info!(user = user_id, lost_total = cost.lost_total, "Cost calculated");

        transport
            .render(user_id, content::cost_result(user.scenario(), months, &cost))
            .await?;
        Ok(())
    }

    /// Flush the finished lost-potential quiz.
    async fn finish_lost_potential(
        &self,
        transport: &dyn Transport,
        user_id: ExternalId,
        session: &QuizSession,
    ) -> Result<(), EngineError> {
        let (Some(months), Some(coef)) = (
            session.values.get("months_interested").copied(),
            session.values.get("frequency_coef").copied(),
        ) else {
            transport.render(user_id, content::restart_hint()).await?;
            return Ok(());
        };

        let Some(user) = self.store.get_user(user_id).await? else {
            transport.render(user_id, content::profile_missing()).await?;
            return Ok(());
        };

        let sabotage_count = session.toggles.len() as i64;
        let result = scoring::lost_potential(months, coef, sabotage_count);
        let flow = self.flow(FlowKind::LostPotential);
        let quiz_id = self.store.quiz_id(flow.code(), flow.title()).await?;

        let sabotage_codes = if session.toggles.is_empty() {
            None
        } else {
            Some(session.toggles.iter().cloned().collect::<Vec<_>>().join(","))
        };

        self.store
            .save_lost_potential(NewLostPotentialResult {
                user_id: user.id,
                quiz_id,
                months_interested: months,
                frequency_coef: coef,
                sabotage_count,
                sabotage_codes,
                days_interested: result.days,
                thoughts_count: result.thoughts,
                sabotage_forms_total: result.sabotage_forms,
            })
            .await?;
        self.store
            .append_event(
                user.id,
                Some(quiz_id),
                event_codes::LOST_POTENTIAL_CALCULATED,
                json!({
                    "months_interested": months,
                    "frequency_coef": coef,
                    "sabotage_count": sabotage_count,
                    "sabotage_forms_total": result.sabotage_forms,
                }),
            )
            .await?;
        tracing::info!(user = user_id, days = result.days, "Lost potential calculated");

        transport
            .render(user_id, content::lost_potential_result(&result))
            .await?;
        Ok(())
    }
}
