use super::super::domain::{BusinessType, CommunityImpact, FormData, TeamPhilosophy};
use super::config::ScoringThresholds;
use serde::{Deserialize, Serialize};

/// Qualification tier assigned to a lead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeadCategory {
    Hot,
    Warm,
    Nurture,
    Redirect,
}

impl LeadCategory {
    pub const fn badge_label(self) -> &'static str {
        match self {
            LeadCategory::Hot => "Perfect Match",
            LeadCategory::Warm => "Great Fit",
            LeadCategory::Nurture => "Learning More",
            LeadCategory::Redirect => "Alternative Options",
        }
    }

    /// Hot and warm results show retention and admin-time success metrics.
    pub const fn shows_success_metrics(self) -> bool {
        matches!(self, LeadCategory::Hot | LeadCategory::Warm)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            LeadCategory::Hot => "hot",
            LeadCategory::Warm => "warm",
            LeadCategory::Nurture => "nurture",
            LeadCategory::Redirect => "redirect",
        }
    }
}

/// Why a lead was sent elsewhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RedirectReason {
    FinancialServices,
    BudgetMarketplace,
    LowScore,
}

impl RedirectReason {
    /// Overrides fire regardless of the numeric score.
    pub const fn is_override(self) -> bool {
        !matches!(self, RedirectReason::LowScore)
    }
}

pub(crate) fn override_reason(form: &FormData) -> Option<RedirectReason> {
    if form.business_type == Some(BusinessType::Financial) {
        return Some(RedirectReason::FinancialServices);
    }

    if form.team_philosophy == Some(TeamPhilosophy::Cheap)
        || form.community_impact == Some(CommunityImpact::NotConcerned)
    {
        return Some(RedirectReason::BudgetMarketplace);
    }

    None
}

pub(crate) fn categorize(score: i32, thresholds: &ScoringThresholds) -> LeadCategory {
    if score >= thresholds.hot {
        LeadCategory::Hot
    } else if score >= thresholds.warm {
        LeadCategory::Warm
    } else if score >= thresholds.nurture {
        LeadCategory::Nurture
    } else {
        LeadCategory::Redirect
    }
}

pub(crate) fn decide_category(
    form: &FormData,
    score: i32,
    thresholds: &ScoringThresholds,
) -> (LeadCategory, Option<RedirectReason>) {
    if let Some(reason) = override_reason(form) {
        return (LeadCategory::Redirect, Some(reason));
    }

    match categorize(score, thresholds) {
        LeadCategory::Redirect => (LeadCategory::Redirect, Some(RedirectReason::LowScore)),
        category => (category, None),
    }
}
