use super::common::*;

use crate::workflows::qualification::domain::{
    BusinessType, CommunityImpact, FormData, QuestionId, TeamPhilosophy, TeamSize,
};
use crate::workflows::qualification::evaluation::{score, score_breakdown};

#[test]
fn scenario_a_sums_every_scored_field() {
    assert_eq!(score(&hot_healthcare_form()), 115);
}

#[test]
fn scenario_b_clamps_negative_total_to_zero() {
    let breakdown = score_breakdown(&low_score_trades_form());
    assert_eq!(breakdown.raw_total, -5);
    assert_eq!(breakdown.total, 0);
    assert_eq!(score(&low_score_trades_form()), 0);
}

#[test]
fn empty_form_scores_zero() {
    let breakdown = score_breakdown(&FormData::default());
    assert!(breakdown.components.is_empty());
    assert_eq!(breakdown.total, 0);
}

#[test]
fn deeply_negative_forms_never_go_below_zero() {
    let form = FormData {
        business_type: Some(BusinessType::Financial),
        team_size: Some(TeamSize::Corporate),
        team_philosophy: Some(TeamPhilosophy::Cheap),
        community_impact: Some(CommunityImpact::NotConcerned),
        ..FormData::default()
    };
    assert_eq!(score_breakdown(&form).raw_total, -110);
    assert_eq!(score(&form), 0);
}

#[test]
fn score_ignores_the_order_fields_were_set() {
    let forward = hot_healthcare_form();

    let mut backward = FormData {
        patient_volume: Some("300+ (multi-practitioner)".to_string()),
        community_impact: Some(CommunityImpact::Matters),
        ..FormData::default()
    };
    backward.budget_reality = forward.budget_reality;
    backward.team_philosophy = forward.team_philosophy;
    backward.timeline = forward.timeline;
    backward.team_size = forward.team_size;
    backward.business_type = forward.business_type;

    assert_eq!(score(&forward), score(&backward));
}

#[test]
fn volume_bonuses_require_matching_business_type() {
    let mut form = FormData {
        business_type: Some(BusinessType::Ecommerce),
        patient_volume: Some("300+ (multi-practitioner)".to_string()),
        order_volume: Some("Established (2000+/month)".to_string()),
        ..FormData::default()
    };
    assert_eq!(score(&form), 25 + 15);

    form.business_type = Some(BusinessType::Healthcare);
    assert_eq!(score(&form), 30 + 15);

    form.business_type = Some(BusinessType::Marketing);
    assert_eq!(score(&form), 25);
}

#[test]
fn lower_volume_tiers_score_nothing() {
    let form = FormData {
        business_type: Some(BusinessType::Healthcare),
        patient_volume: Some("50-150 (growing practice)".to_string()),
        ..FormData::default()
    };
    assert_eq!(score(&form), 30);
}

#[test]
fn negative_past_experience_earns_flat_bonus() {
    let mut form = FormData {
        previous_experience: Some("Yes, but disappointed with high turnover".to_string()),
        ..FormData::default()
    };
    assert_eq!(score(&form), 10);

    form.previous_experience = Some("Our last provider lacked any personal touch".to_string());
    assert_eq!(score(&form), 10);

    form.previous_experience = Some("Our last provider LACKED any personal touch".to_string());
    assert_eq!(score(&form), 0);

    form.previous_experience = Some("Disappointed by churn".to_string());
    assert_eq!(score(&form), 0);

    form.previous_experience = Some("No, this would be our first time".to_string());
    assert_eq!(score(&form), 0);
}

#[test]
fn breakdown_lists_components_in_rule_order() {
    let breakdown = score_breakdown(&hot_healthcare_form());
    let fields: Vec<QuestionId> = breakdown
        .components
        .iter()
        .map(|component| component.field)
        .collect();
    assert_eq!(
        fields,
        vec![
            QuestionId::BusinessType,
            QuestionId::TeamSize,
            QuestionId::Timeline,
            QuestionId::TeamPhilosophy,
            QuestionId::BudgetReality,
            QuestionId::CommunityImpact,
            QuestionId::PatientVolume,
        ]
    );
    assert_eq!(breakdown.components[0].note, "businessType = healthcare");
    assert_eq!(breakdown.raw_total, breakdown.total);
}

#[test]
fn unknown_free_values_contribute_nothing() {
    let form = FormData {
        business_type: Some(BusinessType::Ecommerce),
        order_volume: Some("A lot".to_string()),
        ..FormData::default()
    };
    assert_eq!(score(&form), 25);
}
