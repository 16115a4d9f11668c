mod config;
mod policy;
mod rules;
mod templates;

pub use config::ScoringThresholds;
pub use policy::{LeadCategory, RedirectReason};

pub(crate) use rules::field_contribution;

use super::domain::{FormData, QuestionId};
use serde::{Deserialize, Serialize};

/// Stateless evaluator that scores a form and renders the matching result template.
#[derive(Debug, Clone, Default)]
pub struct QualificationEngine {
    thresholds: ScoringThresholds,
}

impl QualificationEngine {
    pub fn new(thresholds: ScoringThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &ScoringThresholds {
        &self.thresholds
    }

    pub fn score(&self, form: &FormData) -> i32 {
        rules::score_breakdown(form).total
    }

    pub fn breakdown(&self, form: &FormData) -> ScoreBreakdown {
        rules::score_breakdown(form)
    }

    /// Threshold tier only; overrides are not consulted.
    pub fn categorize(&self, score: i32) -> LeadCategory {
        policy::categorize(score, &self.thresholds)
    }

    pub fn evaluate(&self, form: &FormData) -> QualificationResult {
        let score = self.score(form);
        let (category, redirect_reason) = policy::decide_category(form, score, &self.thresholds);
        templates::render(form, score, category, redirect_reason)
    }
}

/// Score of a form under the fixed rules, floored at zero.
pub fn score(form: &FormData) -> i32 {
    rules::score_breakdown(form).total
}

pub fn score_breakdown(form: &FormData) -> ScoreBreakdown {
    rules::score_breakdown(form)
}

/// Result for a form under the default thresholds.
pub fn generate_result(form: &FormData) -> QualificationResult {
    QualificationEngine::default().evaluate(form)
}

/// Per-field contribution to a score, for audits and the responses log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub field: QuestionId,
    pub points: i32,
    pub note: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub components: Vec<ScoreComponent>,
    /// Unclamped sum; may be negative.
    pub raw_total: i32,
    pub total: i32,
}

/// Downstream action the caller performs for a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CtaAction {
    Calendar,
    Download,
    Proposal,
    None,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualificationResult {
    pub score: i32,
    pub category: LeadCategory,
    pub headline: String,
    pub body: String,
    pub recommendations: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cta_text: Option<String>,
    pub cta_action: CtaAction,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_reason: Option<RedirectReason>,
}

impl QualificationResult {
    pub fn badge_label(&self) -> &'static str {
        self.category.badge_label()
    }
}
