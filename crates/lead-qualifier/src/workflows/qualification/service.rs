use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::QualificationSettings;

use super::cta::{dispatch, CallToActionError, CallToActionHandler, CtaDispatch, LeadSummary};
use super::domain::{Answer, FormData, QuestionId, SessionId};
use super::evaluation::{QualificationEngine, QualificationResult, ScoringThresholds};
use super::questions::StageView;
use super::session::{
    AnswerEffect, AnswerError, QualificationSession, SessionError, StageTransition,
};
use super::stage::Stage;
use super::store::{SessionStore, SessionStoreError};
use super::validation::StageGate;

/// Client-facing state of a session after an operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    pub session_id: SessionId,
    pub current_stage: Stage,
    pub form_data: FormData,
    pub view: StageView,
}

impl SessionState {
    fn of(session: &QualificationSession) -> Self {
        Self {
            session_id: session.id().clone(),
            current_stage: session.stage(),
            form_data: session.form().clone(),
            view: session.view(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerOutcome {
    pub effect: AnswerEffect,
    pub state: SessionState,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContinueOutcome {
    pub transition: StageTransition,
    pub state: SessionState,
}

/// Service composing the session store, the call-to-action collaborators, and the engine.
pub struct QualificationService<S, C> {
    store: Arc<S>,
    actions: Arc<C>,
    engine: Arc<QualificationEngine>,
    settings: QualificationSettings,
}

impl<S, C> QualificationService<S, C>
where
    S: SessionStore + 'static,
    C: CallToActionHandler + 'static,
{
    pub fn new(store: Arc<S>, actions: Arc<C>, settings: QualificationSettings) -> Self {
        Self::with_thresholds(store, actions, settings, ScoringThresholds::default())
    }

    pub fn with_thresholds(
        store: Arc<S>,
        actions: Arc<C>,
        settings: QualificationSettings,
        thresholds: ScoringThresholds,
    ) -> Self {
        Self {
            store,
            actions,
            engine: Arc::new(QualificationEngine::new(thresholds)),
            settings,
        }
    }

    pub fn engine(&self) -> &QualificationEngine {
        &self.engine
    }

    fn load(&self, id: &SessionId) -> Result<QualificationSession, QualificationServiceError> {
        let snapshot = self
            .store
            .load(id)?
            .ok_or_else(|| QualificationServiceError::NotFound(id.clone()))?;
        Ok(QualificationSession::restore(snapshot)?)
    }

    fn save(&self, session: &QualificationSession) -> Result<(), QualificationServiceError> {
        self.store.save(&session.snapshot()).map_err(|err| {
            warn!(session_id = %session.id(), error = %err, "failed to persist session");
            QualificationServiceError::from(err)
        })
    }

    /// Open a fresh session at stage one.
    pub fn start(&self) -> Result<SessionState, QualificationServiceError> {
        let session = QualificationSession::new();
        self.save(&session)?;
        info!(session_id = %session.id(), "qualification session started");
        Ok(SessionState::of(&session))
    }

    pub fn view(&self, id: &SessionId) -> Result<SessionState, QualificationServiceError> {
        let session = self.load(id)?;
        Ok(SessionState::of(&session))
    }

    pub fn answer(
        &self,
        id: &SessionId,
        question: QuestionId,
        answer: Answer,
    ) -> Result<AnswerOutcome, QualificationServiceError> {
        let mut session = self.load(id)?;
        let effect = session.set_answer(question, answer)?;
        if effect == AnswerEffect::Applied {
            self.save(&session)?;
        }
        debug!(session_id = %id, question = question.key(), ?effect, "answer recorded");
        Ok(AnswerOutcome {
            effect,
            state: SessionState::of(&session),
        })
    }

    pub fn reorder_priority(
        &self,
        id: &SessionId,
        dragged: &str,
        target: &str,
    ) -> Result<AnswerOutcome, QualificationServiceError> {
        let mut session = self.load(id)?;
        let effect = session.reorder_priority(dragged, target)?;
        if effect == AnswerEffect::Applied {
            self.save(&session)?;
        }
        Ok(AnswerOutcome {
            effect,
            state: SessionState::of(&session),
        })
    }

    /// Validate the current stage and advance when it passes.
    pub fn continue_stage(
        &self,
        id: &SessionId,
    ) -> Result<ContinueOutcome, QualificationServiceError> {
        let mut session = self.load(id)?;
        let transition = session.request_continue();

        match &transition.gate {
            StageGate::Open if !transition.moved() => {
                debug!(session_id = %id, stage = transition.from.index(), "already at results");
            }
            StageGate::Open => {
                self.save(&session)?;
                info!(
                    session_id = %id,
                    from = transition.from.index(),
                    to = transition.to.index(),
                    "stage advanced"
                );
                if transition.to == Stage::Results {
                    let result = self.engine.evaluate(session.form());
                    info!(
                        session_id = %id,
                        category = result.category.as_str(),
                        score = result.score,
                        "qualification result generated"
                    );
                }
            }
            StageGate::Blocked { issues } => {
                info!(
                    session_id = %id,
                    stage = transition.from.index(),
                    issues = issues.len(),
                    "stage advancement blocked"
                );
            }
            StageGate::Redirected { .. } => {
                info!(session_id = %id, stage = transition.from.index(), "lead redirected at gate");
            }
        }

        Ok(ContinueOutcome {
            transition,
            state: SessionState::of(&session),
        })
    }

    pub fn back(&self, id: &SessionId) -> Result<SessionState, QualificationServiceError> {
        let mut session = self.load(id)?;
        let from = session.stage();
        session.retreat();
        self.save(&session)?;
        debug!(session_id = %id, from = from.index(), to = session.stage().index(), "stage retreated");
        Ok(SessionState::of(&session))
    }

    /// Discard the session and issue a new one in its place.
    pub fn reset(&self, id: &SessionId) -> Result<SessionState, QualificationServiceError> {
        let mut session = self.load(id)?;
        session.reset();
        self.save(&session)?;
        self.store.remove(id)?;
        info!(previous = %id, session_id = %session.id(), "qualification session reset");
        Ok(SessionState::of(&session))
    }

    pub fn result(&self, id: &SessionId) -> Result<QualificationResult, QualificationServiceError> {
        let session = self.load(id)?;
        Ok(session.result(&self.engine)?)
    }

    pub fn lead_summary(&self, id: &SessionId) -> Result<LeadSummary, QualificationServiceError> {
        let session = self.load(id)?;
        Ok(session.lead_summary(&self.engine))
    }

    /// Invoke the collaborator matching the result's call-to-action.
    pub fn trigger_call_to_action(
        &self,
        id: &SessionId,
    ) -> Result<CtaDispatch, QualificationServiceError> {
        let session = self.load(id)?;
        let result = session.result(&self.engine)?;
        let lead = session.lead_summary(&self.engine);

        let dispatched = dispatch(self.actions.as_ref(), &result, &lead, &self.settings)
            .map_err(|err| {
                warn!(session_id = %id, error = %err, "call-to-action failed");
                err
            })?;
        info!(session_id = %id, action = ?dispatched, "call-to-action dispatched");
        Ok(dispatched)
    }
}

/// Error raised by the qualification service.
#[derive(Debug, thiserror::Error)]
pub enum QualificationServiceError {
    #[error("session {0} not found")]
    NotFound(SessionId),
    #[error(transparent)]
    Store(#[from] SessionStoreError),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Answer(#[from] AnswerError),
    #[error(transparent)]
    CallToAction(#[from] CallToActionError),
}
