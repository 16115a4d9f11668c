use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::config::QualificationSettings;
use crate::workflows::qualification::cta::{CallToActionError, CallToActionHandler, LeadSummary};
use crate::workflows::qualification::domain::{
    Answer, BudgetExpectation, BusinessType, CommunityImpact, FormData, QuestionId, SessionId,
    TeamPhilosophy, TeamSize, Timeline, WorkingHours,
};
use crate::workflows::qualification::session::QualificationSession;
use crate::workflows::qualification::store::{SessionSnapshot, SessionStore, SessionStoreError};
use crate::workflows::qualification::{qualification_router, QualificationService};

/// Scenario A: every answer pulls toward a hot lead.
pub(super) fn hot_healthcare_form() -> FormData {
    FormData {
        business_type: Some(BusinessType::Healthcare),
        team_size: Some(TeamSize::Growing),
        timeline: Some(Timeline::Yesterday),
        team_philosophy: Some(TeamPhilosophy::Family),
        budget_reality: Some(BudgetExpectation::Aligned),
        community_impact: Some(CommunityImpact::Matters),
        patient_volume: Some("300+ (multi-practitioner)".to_string()),
        ..FormData::default()
    }
}

/// Scenario B: negative raw total.
pub(super) fn low_score_trades_form() -> FormData {
    FormData {
        business_type: Some(BusinessType::Trades),
        team_size: Some(TeamSize::Corporate),
        timeline: Some(Timeline::Research),
        team_philosophy: Some(TeamPhilosophy::Resources),
        budget_reality: Some(BudgetExpectation::Under1000),
        community_impact: Some(CommunityImpact::Curious),
        ..FormData::default()
    }
}

pub(super) fn answer(session: &mut QualificationSession, question: QuestionId, answer: Answer) {
    session
        .set_answer(question, answer)
        .unwrap_or_else(|err| panic!("{} rejected: {err}", question.key()));
}

pub(super) fn choose(session: &mut QualificationSession, question: QuestionId, value: &str) {
    answer(session, question, Answer::Choice(value.to_string()));
}

pub(super) fn complete_stage_one(session: &mut QualificationSession, business: BusinessType) {
    choose(session, QuestionId::BusinessType, business.value());
    choose(session, QuestionId::TeamSize, TeamSize::Growing.value());
    answer(
        session,
        QuestionId::PainPoint,
        Answer::Text("Too much admin".to_string()),
    );
    choose(session, QuestionId::Timeline, Timeline::Yesterday.value());
}

pub(super) fn complete_stage_four(session: &mut QualificationSession, skill: &str) {
    choose(session, QuestionId::WorkingHours, WorkingHours::Overlap.value());
    choose(session, QuestionId::TeamSizeNeeded, "2-3 person team");
    answer(
        session,
        QuestionId::SkillPriority,
        Answer::Select(skill.to_string()),
    );
    choose(
        session,
        QuestionId::BudgetReality,
        BudgetExpectation::Aligned.value(),
    );
    answer(session, QuestionId::Name, Answer::Text("Ana Reyes".to_string()));
    answer(
        session,
        QuestionId::Email,
        Answer::Text("ana@harbourclinic.com.au".to_string()),
    );
    answer(
        session,
        QuestionId::Company,
        Answer::Text("Harbour Clinic".to_string()),
    );
}

pub(super) fn settings() -> QualificationSettings {
    QualificationSettings {
        scheduling_url: "https://booking.example/strategy".to_string(),
        guide_id: "test-guide".to_string(),
        ..QualificationSettings::default()
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryStore {
    pub(super) snapshots: Arc<Mutex<HashMap<SessionId, SessionSnapshot>>>,
    saves: Arc<AtomicUsize>,
}

impl MemoryStore {
    pub(super) fn len(&self) -> usize {
        self.snapshots.lock().expect("store mutex poisoned").len()
    }

    pub(super) fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

impl SessionStore for MemoryStore {
    fn load(&self, id: &SessionId) -> Result<Option<SessionSnapshot>, SessionStoreError> {
        let guard = self.snapshots.lock().expect("store mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn save(&self, snapshot: &SessionSnapshot) -> Result<(), SessionStoreError> {
        let mut guard = self.snapshots.lock().expect("store mutex poisoned");
        guard.insert(snapshot.session_id.clone(), snapshot.clone());
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn remove(&self, id: &SessionId) -> Result<(), SessionStoreError> {
        let mut guard = self.snapshots.lock().expect("store mutex poisoned");
        guard.remove(id);
        Ok(())
    }
}

pub(super) struct UnavailableStore;

impl SessionStore for UnavailableStore {
    fn load(&self, _id: &SessionId) -> Result<Option<SessionSnapshot>, SessionStoreError> {
        Err(SessionStoreError::Unavailable("disk offline".to_string()))
    }

    fn save(&self, _snapshot: &SessionSnapshot) -> Result<(), SessionStoreError> {
        Err(SessionStoreError::Unavailable("disk offline".to_string()))
    }

    fn remove(&self, _id: &SessionId) -> Result<(), SessionStoreError> {
        Err(SessionStoreError::Unavailable("disk offline".to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum RecordedAction {
    Scheduling(String),
    Download(String),
    Proposal(SessionId),
}

#[derive(Default, Clone)]
pub(super) struct RecordingActions {
    calls: Arc<Mutex<Vec<RecordedAction>>>,
}

impl RecordingActions {
    pub(super) fn calls(&self) -> Vec<RecordedAction> {
        self.calls.lock().expect("action mutex poisoned").clone()
    }

    fn push(&self, action: RecordedAction) {
        self.calls
            .lock()
            .expect("action mutex poisoned")
            .push(action);
    }
}

impl CallToActionHandler for RecordingActions {
    fn open_scheduling(&self, url: &str) -> Result<(), CallToActionError> {
        self.push(RecordedAction::Scheduling(url.to_string()));
        Ok(())
    }

    fn trigger_download(&self, guide_id: &str) -> Result<(), CallToActionError> {
        self.push(RecordedAction::Download(guide_id.to_string()));
        Ok(())
    }

    fn request_proposal(&self, lead: &LeadSummary) -> Result<(), CallToActionError> {
        self.push(RecordedAction::Proposal(lead.id.clone()));
        Ok(())
    }
}

pub(super) struct BrokenActions;

impl CallToActionHandler for BrokenActions {
    fn open_scheduling(&self, _url: &str) -> Result<(), CallToActionError> {
        Err(CallToActionError::Transport("browser unavailable".to_string()))
    }

    fn trigger_download(&self, _guide_id: &str) -> Result<(), CallToActionError> {
        Err(CallToActionError::Transport("cdn unavailable".to_string()))
    }

    fn request_proposal(&self, _lead: &LeadSummary) -> Result<(), CallToActionError> {
        Err(CallToActionError::Transport("crm unavailable".to_string()))
    }
}

pub(super) fn build_service() -> (
    QualificationService<MemoryStore, RecordingActions>,
    Arc<MemoryStore>,
    Arc<RecordingActions>,
) {
    let store = Arc::new(MemoryStore::default());
    let actions = Arc::new(RecordingActions::default());
    let service = QualificationService::new(store.clone(), actions.clone(), settings());
    (service, store, actions)
}

/// Seed a session that already sits on the results stage.
pub(super) fn seed_results_session(store: &MemoryStore, form: FormData) -> SessionId {
    let mut session = QualificationSession::new();
    let mut snapshot = session.snapshot();
    snapshot.form_data = form;
    snapshot.current_stage = 5;
    session = QualificationSession::restore(snapshot).expect("valid snapshot");
    store
        .save(&session.snapshot())
        .expect("memory store accepts snapshots");
    session.id().clone()
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn router_with_service(
    service: QualificationService<MemoryStore, RecordingActions>,
) -> axum::Router {
    qualification_router(Arc::new(service))
}
