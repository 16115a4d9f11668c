use super::super::catalog::OptionCatalog;
use super::super::domain::{BusinessType, FormData, QuestionId};
use super::{ScoreBreakdown, ScoreComponent};

const NEGATIVE_EXPERIENCE_MARKERS: [&str; 2] = ["disappointed", "lacked"];
const NEGATIVE_EXPERIENCE_BONUS: i32 = 10;

/// Questions that carry points, in the order components are reported.
const SCORED_FIELDS: [QuestionId; 9] = [
    QuestionId::BusinessType,
    QuestionId::TeamSize,
    QuestionId::Timeline,
    QuestionId::TeamPhilosophy,
    QuestionId::BudgetReality,
    QuestionId::CommunityImpact,
    QuestionId::PreviousExperience,
    QuestionId::PatientVolume,
    QuestionId::OrderVolume,
];

fn catalog_points(question: QuestionId, value: &str) -> ScoreComponent {
    let points = OptionCatalog::standard().score_modifier(question, value);
    ScoreComponent {
        field: question,
        points,
        note: format!("{} = {value}", question.key()),
    }
}

fn component_for(question: QuestionId, form: &FormData) -> Option<ScoreComponent> {
    match question {
        QuestionId::BusinessType => form
            .business_type
            .map(|value| catalog_points(question, value.value())),
        QuestionId::TeamSize => form
            .team_size
            .map(|value| catalog_points(question, value.value())),
        QuestionId::Timeline => form
            .timeline
            .map(|value| catalog_points(question, value.value())),
        QuestionId::TeamPhilosophy => form
            .team_philosophy
            .map(|value| catalog_points(question, value.value())),
        QuestionId::BudgetReality => form
            .budget_reality
            .map(|value| catalog_points(question, value.value())),
        QuestionId::CommunityImpact => form
            .community_impact
            .map(|value| catalog_points(question, value.value())),
        QuestionId::PreviousExperience => {
            let experience = form.previous_experience.as_deref()?;
            NEGATIVE_EXPERIENCE_MARKERS
                .iter()
                .any(|marker| experience.contains(marker))
                .then(|| ScoreComponent {
                    field: question,
                    points: NEGATIVE_EXPERIENCE_BONUS,
                    note: "previous offshore experience was negative".to_string(),
                })
        }
        QuestionId::PatientVolume if form.business_type == Some(BusinessType::Healthcare) => form
            .patient_volume
            .as_deref()
            .map(|value| catalog_points(question, value)),
        QuestionId::OrderVolume if form.business_type == Some(BusinessType::Ecommerce) => form
            .order_volume
            .as_deref()
            .map(|value| catalog_points(question, value)),
        _ => None,
    }
}

/// Points a single field currently adds to the total; absent or unscored fields are zero.
pub(crate) fn field_contribution(question: QuestionId, form: &FormData) -> i32 {
    component_for(question, form)
        .map(|component| component.points)
        .unwrap_or(0)
}

pub(crate) fn score_breakdown(form: &FormData) -> ScoreBreakdown {
    let components: Vec<ScoreComponent> = SCORED_FIELDS
        .iter()
        .filter_map(|question| component_for(*question, form))
        .collect();
    let raw_total: i32 = components.iter().map(|component| component.points).sum();

    ScoreBreakdown {
        components,
        raw_total,
        total: raw_total.max(0),
    }
}
