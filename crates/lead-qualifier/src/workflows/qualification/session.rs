//! Stage controller: owns the stage index and every mutation of the form record.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::catalog::{pain_points_for, skill_priorities_for, OptionCatalog, INVESTMENT_PRIORITIES};
use super::cta::LeadSummary;
use super::domain::{
    Answer, BudgetExpectation, BusinessType, CommunityImpact, FormData, QualificationResponse,
    QuestionId, QuestionKind, SessionId, TeamPhilosophy, TeamSize, Timeline, WorkingHours,
};
use super::evaluation::{field_contribution, QualificationEngine, QualificationResult};
use super::questions::{effective_ranking, stage_view, StageView, MAX_SKILL_PRIORITIES};
use super::stage::{InvalidStage, Stage, LAST_QUESTION_STAGE};
use super::store::SessionSnapshot;
use super::validation::{evaluate_gate, StageGate};

static SESSION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

pub(crate) fn next_session_id() -> SessionId {
    let sequence = SESSION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    SessionId(format!(
        "session_{}_{sequence}",
        Utc::now().timestamp_millis()
    ))
}

/// Whether an answer changed the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerEffect {
    Applied,
    /// Silently rejected: a 4th skill, a duplicate selection, or removing an absent item.
    Ignored,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnswerError {
    #[error("'{value}' is not an option for {}", question.key())]
    UnknownOption { question: QuestionId, value: String },
    #[error("ranking must list each of the {expected} investment priorities exactly once")]
    InvalidRanking { expected: usize },
    #[error("{} does not accept a {shape} answer", question.key())]
    WrongShape {
        question: QuestionId,
        shape: &'static str,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("snapshot stage is invalid: {0}")]
    UnknownStage(#[from] InvalidStage),
    #[error("results are only available once the final stage has been completed")]
    ResultNotReady,
}

/// Result of a continue request: where the client was, where they are, and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageTransition {
    pub from: Stage,
    pub to: Stage,
    pub gate: StageGate,
}

impl StageTransition {
    pub fn moved(&self) -> bool {
        self.from != self.to
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct QualificationSession {
    id: SessionId,
    stage: Stage,
    form: FormData,
    responses: Vec<QualificationResponse>,
    started_at: DateTime<Utc>,
    last_active: DateTime<Utc>,
}

impl Default for QualificationSession {
    fn default() -> Self {
        Self::new()
    }
}

impl QualificationSession {
    pub fn new() -> Self {
        Self::with_id(next_session_id())
    }

    pub fn with_id(id: SessionId) -> Self {
        let now = Utc::now();
        Self {
            id,
            stage: Stage::BusinessProfile,
            form: FormData::default(),
            responses: Vec::new(),
            started_at: now,
            last_active: now,
        }
    }

    pub fn restore(snapshot: SessionSnapshot) -> Result<Self, SessionError> {
        let stage = Stage::try_from(snapshot.current_stage)?;
        let started_at = snapshot.started_at.unwrap_or_else(Utc::now);
        Ok(Self {
            id: snapshot.session_id,
            stage,
            form: snapshot.form_data,
            responses: snapshot.responses,
            started_at,
            last_active: snapshot.last_active.unwrap_or(started_at),
        })
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            current_stage: self.stage.index(),
            form_data: self.form.clone(),
            responses: self.responses.clone(),
            session_id: self.id.clone(),
            started_at: Some(self.started_at),
            last_active: Some(self.last_active),
        }
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn form(&self) -> &FormData {
        &self.form
    }

    pub fn responses(&self) -> &[QualificationResponse] {
        &self.responses
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn last_active(&self) -> DateTime<Utc> {
        self.last_active
    }

    fn touch(&mut self) {
        self.last_active = Utc::now();
    }

    /// Step forward without validation; never passes the last question stage.
    pub fn advance(&mut self) {
        self.stage = self.stage.next();
        self.touch();
    }

    pub fn retreat(&mut self) {
        self.stage = self.stage.previous();
        self.touch();
    }

    /// Start over with an empty form and a fresh identifier.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn gate(&self) -> StageGate {
        evaluate_gate(self.stage, &self.form)
    }

    /// Validate the current stage and move on only when the gate is open. Leaving the final
    /// question stage enters `Results`.
    pub fn request_continue(&mut self) -> StageTransition {
        let from = self.stage;
        let gate = match from {
            Stage::Results => StageGate::Open,
            _ => self.gate(),
        };

        if gate.is_open() {
            self.stage = match from {
                LAST_QUESTION_STAGE => Stage::Results,
                other => other.next(),
            };
            self.touch();
        }

        StageTransition {
            from,
            to: self.stage,
            gate,
        }
    }

    pub fn view(&self) -> StageView {
        stage_view(self.stage, &self.form)
    }

    pub fn result(&self, engine: &QualificationEngine) -> Result<QualificationResult, SessionError> {
        if self.stage != Stage::Results {
            return Err(SessionError::ResultNotReady);
        }
        Ok(engine.evaluate(&self.form))
    }

    pub fn lead_summary(&self, engine: &QualificationEngine) -> LeadSummary {
        let result = engine.evaluate(&self.form);
        LeadSummary {
            id: self.id.clone(),
            business_type: self.form.business_type,
            team_size: self.form.team_size,
            qualification_score: result.score,
            category: result.category,
            stage_completed: self.stage.index() - 1,
            name: self.form.name.clone(),
            email: self.form.email.clone(),
            phone: self.form.phone.clone(),
            company: self.form.company.clone(),
            started_at: self.started_at,
            last_active: self.last_active,
        }
    }

    pub fn set_answer(
        &mut self,
        question: QuestionId,
        answer: Answer,
    ) -> Result<AnswerEffect, AnswerError> {
        let effect = match &answer {
            Answer::Choice(value) => self.apply_choice(question, value)?,
            Answer::Text(value) => self.apply_text(question, value)?,
            Answer::Select(value) => self.apply_select(question, value)?,
            Answer::Deselect(value) => self.apply_deselect(question, value)?,
            Answer::Ranking(items) => self.apply_ranking(question, items)?,
        };

        if effect == AnswerEffect::Applied {
            self.record(question, answer.recorded_value());
        }
        Ok(effect)
    }

    /// Move `dragged` into the slot currently held by `target`.
    pub fn reorder_priority(
        &mut self,
        dragged: &str,
        target: &str,
    ) -> Result<AnswerEffect, AnswerError> {
        let mut ranking = effective_ranking(&self.form);
        let position = |item: &str, ranking: &[String]| {
            ranking
                .iter()
                .position(|candidate| candidate == item)
                .ok_or_else(|| AnswerError::UnknownOption {
                    question: QuestionId::InvestmentMindset,
                    value: item.to_string(),
                })
        };
        let dragged_index = position(dragged, &ranking)?;
        let target_index = position(target, &ranking)?;
        if dragged_index == target_index {
            return Ok(AnswerEffect::Ignored);
        }

        let item = ranking.remove(dragged_index);
        ranking.insert(target_index, item);
        self.form.investment_mindset = ranking.clone();
        self.record(
            QuestionId::InvestmentMindset,
            serde_json::Value::from(ranking),
        );
        Ok(AnswerEffect::Applied)
    }

    fn record(&mut self, question: QuestionId, answer: serde_json::Value) {
        self.responses.push(QualificationResponse {
            question_id: question,
            answer,
            score_impact: field_contribution(question, &self.form),
            timestamp: Utc::now(),
        });
        self.touch();
    }

    fn apply_choice(&mut self, question: QuestionId, value: &str) -> Result<AnswerEffect, AnswerError> {
        let unknown = || AnswerError::UnknownOption {
            question,
            value: value.to_string(),
        };

        match question {
            QuestionId::BusinessType => {
                self.form.business_type = Some(BusinessType::from_value(value).ok_or_else(unknown)?)
            }
            QuestionId::TeamSize => {
                self.form.team_size = Some(TeamSize::from_value(value).ok_or_else(unknown)?)
            }
            QuestionId::Timeline => {
                self.form.timeline = Some(Timeline::from_value(value).ok_or_else(unknown)?)
            }
            QuestionId::WorkingHours => {
                self.form.working_hours = Some(WorkingHours::from_value(value).ok_or_else(unknown)?)
            }
            QuestionId::BudgetReality => {
                self.form.budget_reality =
                    Some(BudgetExpectation::from_value(value).ok_or_else(unknown)?)
            }
            QuestionId::TeamPhilosophy => {
                self.form.team_philosophy =
                    Some(TeamPhilosophy::from_value(value).ok_or_else(unknown)?)
            }
            QuestionId::CommunityImpact => {
                self.form.community_impact =
                    Some(CommunityImpact::from_value(value).ok_or_else(unknown)?)
            }
            QuestionId::PainPoint => {
                if !pain_points_for(self.form.business_type)
                    .iter()
                    .any(|point| *point == value)
                {
                    return Err(unknown());
                }
                self.form.pain_point = Some(value.to_string());
            }
            _ if question.kind() == QuestionKind::Single => {
                if OptionCatalog::standard().lookup(question, value).is_none() {
                    return Err(unknown());
                }
                if let Some(slot) = self.form.text_mut(question) {
                    *slot = Some(value.to_string());
                }
            }
            _ => {
                return Err(AnswerError::WrongShape {
                    question,
                    shape: "choice",
                })
            }
        }

        Ok(AnswerEffect::Applied)
    }

    fn apply_text(&mut self, question: QuestionId, value: &str) -> Result<AnswerEffect, AnswerError> {
        let accepts_text = matches!(question.kind(), QuestionKind::Text | QuestionKind::Email)
            || matches!(question, QuestionId::PainPoint | QuestionId::PreviousExperience);
        let slot = match self.form.text_mut(question) {
            Some(slot) if accepts_text => slot,
            _ => {
                return Err(AnswerError::WrongShape {
                    question,
                    shape: "text",
                })
            }
        };

        let trimmed = value.trim();
        *slot = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        };
        Ok(AnswerEffect::Applied)
    }

    fn apply_select(&mut self, question: QuestionId, value: &str) -> Result<AnswerEffect, AnswerError> {
        let allowed = match question {
            QuestionId::SkillPriority => skill_priorities_for(self.form.business_type)
                .iter()
                .any(|skill| *skill == value),
            _ => OptionCatalog::standard().lookup(question, value).is_some(),
        };
        let selections = self
            .form
            .selections_mut(question)
            .ok_or(AnswerError::WrongShape {
                question,
                shape: "select",
            })?;
        if !allowed {
            return Err(AnswerError::UnknownOption {
                question,
                value: value.to_string(),
            });
        }

        if selections.iter().any(|item| item == value) {
            return Ok(AnswerEffect::Ignored);
        }
        if question == QuestionId::SkillPriority && selections.len() >= MAX_SKILL_PRIORITIES {
            return Ok(AnswerEffect::Ignored);
        }

        selections.push(value.to_string());
        Ok(AnswerEffect::Applied)
    }

    fn apply_deselect(
        &mut self,
        question: QuestionId,
        value: &str,
    ) -> Result<AnswerEffect, AnswerError> {
        let selections = self
            .form
            .selections_mut(question)
            .ok_or(AnswerError::WrongShape {
                question,
                shape: "deselect",
            })?;

        let before = selections.len();
        selections.retain(|item| item != value);
        if selections.len() == before {
            Ok(AnswerEffect::Ignored)
        } else {
            Ok(AnswerEffect::Applied)
        }
    }

    fn apply_ranking(
        &mut self,
        question: QuestionId,
        items: &[String],
    ) -> Result<AnswerEffect, AnswerError> {
        if question != QuestionId::InvestmentMindset {
            return Err(AnswerError::WrongShape {
                question,
                shape: "ranking",
            });
        }

        let is_permutation = items.len() == INVESTMENT_PRIORITIES.len()
            && INVESTMENT_PRIORITIES
                .iter()
                .all(|priority| items.iter().filter(|item| item == priority).count() == 1);
        if !is_permutation {
            return Err(AnswerError::InvalidRanking {
                expected: INVESTMENT_PRIORITIES.len(),
            });
        }

        self.form.investment_mindset = items.to_vec();
        Ok(AnswerEffect::Applied)
    }
}
