//! Staged lead-qualification wizard: option catalog, stage controller, scoring engine, result
//! templates, and the persistence and call-to-action boundaries around them.

pub mod catalog;
pub mod cta;
pub mod domain;
pub mod evaluation;
pub mod questions;
pub mod router;
pub mod service;
pub mod session;
pub mod stage;
pub mod store;
pub mod validation;

#[cfg(test)]
mod tests;

pub use catalog::{CatalogEntry, OptionCatalog, INVESTMENT_PRIORITIES};
pub use cta::{CallToActionError, CallToActionHandler, CtaDispatch, LeadSummary};
pub use domain::{
    Answer, BudgetExpectation, BusinessType, CommunityImpact, FormData, QualificationResponse,
    QuestionId, QuestionKind, SessionId, TeamPhilosophy, TeamSize, Timeline, WorkingHours,
};
pub use evaluation::{
    generate_result, score, score_breakdown, CtaAction, LeadCategory, QualificationEngine,
    QualificationResult, RedirectReason, ScoreBreakdown, ScoreComponent, ScoringThresholds,
};
pub use questions::{IndustryTrack, Notice, NoticeKind, QuestionView, StageView};
pub use router::qualification_router;
pub use service::{
    AnswerOutcome, ContinueOutcome, QualificationService, QualificationServiceError, SessionState,
};
pub use session::{AnswerEffect, AnswerError, QualificationSession, SessionError, StageTransition};
pub use stage::Stage;
pub use store::{FileSessionStore, SessionSnapshot, SessionStore, SessionStoreError};
pub use validation::{StageGate, ValidationIssue};
