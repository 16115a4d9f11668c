use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use super::domain::{BusinessType, FormData, QuestionId};
use super::questions::{required_questions, FINANCIAL_ADVISORY};
use super::stage::Stage;

/// One user-visible message tied to the field that blocked advancement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    pub field: QuestionId,
    pub message: &'static str,
}

/// Outcome of asking to leave a stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StageGate {
    Open,
    Blocked { issues: Vec<ValidationIssue> },
    /// Hard stop; no combination of other answers reopens the gate.
    Redirected { advisory: &'static str },
}

impl StageGate {
    pub fn is_open(&self) -> bool {
        matches!(self, StageGate::Open)
    }
}

pub fn is_valid_email(candidate: &str) -> bool {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL
        .get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("static email pattern"))
        .is_match(candidate.trim())
}

fn has_text(value: &Option<String>) -> bool {
    value
        .as_deref()
        .map(|text| !text.trim().is_empty())
        .unwrap_or(false)
}

fn missing_message(field: QuestionId) -> &'static str {
    match field {
        QuestionId::BusinessType => "Please select your business type",
        QuestionId::TeamSize => "Please select your team size",
        QuestionId::PainPoint => "Please select your main pain point",
        QuestionId::Timeline => "Please select your timeline",
        QuestionId::Name => "Please enter your name",
        QuestionId::Email => "Please enter your email",
        QuestionId::Company => "Please enter your company name",
        QuestionId::SkillPriority => "Please select at least one skill priority",
        QuestionId::WorkingHours => "Please select your working hours preference",
        QuestionId::TeamSizeNeeded => "Please select your initial team size",
        QuestionId::BudgetReality => "Please select your budget expectation",
        _ => "Please answer this question",
    }
}

fn check_field(field: QuestionId, form: &FormData) -> Option<ValidationIssue> {
    let present = match field {
        QuestionId::BusinessType => form.business_type.is_some(),
        QuestionId::TeamSize => form.team_size.is_some(),
        QuestionId::Timeline => form.timeline.is_some(),
        QuestionId::WorkingHours => form.working_hours.is_some(),
        QuestionId::BudgetReality => form.budget_reality.is_some(),
        QuestionId::TeamPhilosophy => form.team_philosophy.is_some(),
        QuestionId::CommunityImpact => form.community_impact.is_some(),
        QuestionId::InvestmentMindset => !form.investment_mindset.is_empty(),
        QuestionId::PainPoint => has_text(&form.pain_point),
        QuestionId::PatientVolume => has_text(&form.patient_volume),
        QuestionId::Platform => has_text(&form.platform),
        QuestionId::OrderVolume => has_text(&form.order_volume),
        QuestionId::Bottleneck => has_text(&form.bottleneck),
        QuestionId::PeakSeasonPain => has_text(&form.peak_season_pain),
        QuestionId::PreviousExperience => has_text(&form.previous_experience),
        QuestionId::SwitchReason => has_text(&form.switch_reason),
        QuestionId::TeamSizeNeeded => has_text(&form.team_size_needed),
        QuestionId::Name => has_text(&form.name),
        QuestionId::Phone => has_text(&form.phone),
        QuestionId::Company => has_text(&form.company),
        QuestionId::Email => {
            if !has_text(&form.email) {
                false
            } else if form.email.as_deref().map(is_valid_email) == Some(false) {
                return Some(ValidationIssue {
                    field,
                    message: "Please enter a valid email",
                });
            } else {
                true
            }
        }
        QuestionId::PracticeSystem
        | QuestionId::ComplianceConcerns
        | QuestionId::Software
        | QuestionId::ServiceTypes
        | QuestionId::SkillPriority => form
            .selections(field)
            .map(|items| !items.is_empty())
            .unwrap_or(false),
    };

    (!present).then(|| ValidationIssue {
        field,
        message: missing_message(field),
    })
}

/// Decide whether the client may leave `stage`. Evaluated on request only.
pub fn evaluate_gate(stage: Stage, form: &FormData) -> StageGate {
    if stage == Stage::BusinessProfile && form.business_type == Some(BusinessType::Financial) {
        return StageGate::Redirected {
            advisory: FINANCIAL_ADVISORY,
        };
    }

    let issues: Vec<ValidationIssue> = required_questions(stage, form)
        .into_iter()
        .filter_map(|field| check_field(field, form))
        .collect();

    if issues.is_empty() {
        StageGate::Open
    } else {
        StageGate::Blocked { issues }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::qualification::domain::{TeamSize, Timeline};

    #[test]
    fn email_shape_check() {
        assert!(is_valid_email("ana@clinic.com.au"));
        assert!(is_valid_email(" ana@clinic.io "));
        assert!(!is_valid_email("ana@clinic"));
        assert!(!is_valid_email("ana clinic@x.io"));
        assert!(!is_valid_email("@clinic.io"));
    }

    #[test]
    fn empty_first_stage_reports_every_field() {
        match evaluate_gate(Stage::BusinessProfile, &FormData::default()) {
            StageGate::Blocked { issues } => {
                let fields: Vec<QuestionId> = issues.iter().map(|issue| issue.field).collect();
                assert_eq!(
                    fields,
                    vec![
                        QuestionId::BusinessType,
                        QuestionId::TeamSize,
                        QuestionId::PainPoint,
                        QuestionId::Timeline
                    ]
                );
            }
            other => panic!("expected blocked gate, got {other:?}"),
        }
    }

    #[test]
    fn financial_business_redirects_even_when_complete() {
        let form = FormData {
            business_type: Some(BusinessType::Financial),
            team_size: Some(TeamSize::Growing),
            pain_point: Some("Customer service and support".into()),
            timeline: Some(Timeline::Yesterday),
            ..FormData::default()
        };
        assert_eq!(
            evaluate_gate(Stage::BusinessProfile, &form),
            StageGate::Redirected {
                advisory: FINANCIAL_ADVISORY
            }
        );
    }

    #[test]
    fn whitespace_text_counts_as_missing() {
        let form = FormData {
            name: Some("   ".into()),
            email: Some("not-an-email".into()),
            ..FormData::default()
        };
        let StageGate::Blocked { issues } = evaluate_gate(Stage::FinalDetails, &form) else {
            panic!("stage four must block");
        };
        assert!(issues
            .iter()
            .any(|issue| issue.field == QuestionId::Name && issue.message == "Please enter your name"));
        assert!(issues
            .iter()
            .any(|issue| issue.message == "Please enter a valid email"));
        assert!(!issues.iter().any(|issue| issue.field == QuestionId::Phone));
    }

    #[test]
    fn optional_stages_pass_empty() {
        assert!(evaluate_gate(Stage::IndustryNeeds, &FormData::default()).is_open());
        assert!(evaluate_gate(Stage::CulturalFit, &FormData::default()).is_open());
    }
}
