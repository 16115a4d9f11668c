use lead_qualifier::workflows::qualification::{
    generate_result, score, Answer, BusinessType, FormData, LeadCategory, NoticeKind,
    QualificationEngine, QualificationSession, QuestionId, QuestionKind, RedirectReason, Stage,
    StageGate,
};

fn choose(session: &mut QualificationSession, question: QuestionId, value: &str) {
    session
        .set_answer(question, Answer::Choice(value.to_string()))
        .unwrap_or_else(|err| panic!("{} rejected: {err}", question.key()));
}

fn text(session: &mut QualificationSession, question: QuestionId, value: &str) {
    session
        .set_answer(question, Answer::Text(value.to_string()))
        .unwrap_or_else(|err| panic!("{} rejected: {err}", question.key()));
}

#[test]
fn ecommerce_client_walks_every_stage_to_a_result() {
    let mut session = QualificationSession::new();
    assert_eq!(session.view().title, "Let's get to know your business");

    choose(&mut session, QuestionId::BusinessType, "ecommerce");
    choose(&mut session, QuestionId::TeamSize, "small");
    choose(
        &mut session,
        QuestionId::PainPoint,
        "Customer service across multiple channels",
    );
    choose(&mut session, QuestionId::Timeline, "month");
    assert!(session.request_continue().moved());

    let stage_two = session.view();
    assert_eq!(stage_two.stage, Stage::IndustryNeeds);
    let ids: Vec<QuestionId> = stage_two.questions.iter().map(|q| q.id).collect();
    assert_eq!(
        ids,
        vec![
            QuestionId::Platform,
            QuestionId::OrderVolume,
            QuestionId::Bottleneck
        ]
    );
    choose(&mut session, QuestionId::Platform, "Shopify only");
    choose(&mut session, QuestionId::OrderVolume, "Scaling (500-2000/month)");
    assert!(session.request_continue().moved());

    choose(&mut session, QuestionId::TeamPhilosophy, "partners");
    choose(&mut session, QuestionId::CommunityImpact, "curious");
    choose(
        &mut session,
        QuestionId::PreviousExperience,
        "Yes, but lacked personal connection",
    );
    assert!(session.request_continue().moved());

    let stage_four = session.view();
    let skills = stage_four
        .questions
        .iter()
        .find(|q| q.id == QuestionId::SkillPriority)
        .expect("skill question");
    assert_eq!(skills.kind, QuestionKind::Multiple);
    assert_eq!(skills.options[0].value, "E-commerce platform expertise");

    choose(&mut session, QuestionId::WorkingHours, "24/7");
    choose(&mut session, QuestionId::TeamSizeNeeded, "Build as we go");
    session
        .set_answer(
            QuestionId::SkillPriority,
            Answer::Select("Order processing".to_string()),
        )
        .expect("skill");
    choose(&mut session, QuestionId::BudgetReality, "under-1000");
    assert!(session
        .view()
        .notices
        .iter()
        .any(|notice| notice.kind == NoticeKind::Warning));
    text(&mut session, QuestionId::Name, "Lee Tan");
    text(&mut session, QuestionId::Email, "lee@shopfront.co");
    text(&mut session, QuestionId::Company, "Shopfront Co");

    let transition = session.request_continue();
    assert_eq!(transition.gate, StageGate::Open);
    assert_eq!(session.stage(), Stage::Results);

    // 25 + 10 + 5 + 10 + 15 + 5 + 10 - 5
    let result = session
        .result(&QualificationEngine::default())
        .expect("results ready");
    assert_eq!(result.score, 75);
    assert_eq!(result.category, LeadCategory::Hot);
    assert!(result.body.contains("transform your e-commerce business"));
}

#[test]
fn financial_override_holds_for_otherwise_perfect_form() {
    let mut form: FormData = serde_json::from_value(serde_json::json!({
        "businessType": "healthcare",
        "teamSize": "growing",
        "timeline": "yesterday",
        "teamPhilosophy": "family",
        "budgetReality": "aligned",
        "communityImpact": "matters",
        "patientVolume": "300+ (multi-practitioner)"
    }))
    .expect("form json");
    assert_eq!(score(&form), 115);

    form.business_type = Some(BusinessType::Financial);
    let result = generate_result(&form);
    assert_eq!(result.category, LeadCategory::Redirect);
    assert_eq!(result.redirect_reason, Some(RedirectReason::FinancialServices));
}

#[test]
fn form_data_serializes_only_answered_fields() {
    let mut session = QualificationSession::new();
    choose(&mut session, QuestionId::WorkingHours, "24/7");
    session
        .set_answer(QuestionId::Software, Answer::Select("MYOB".to_string()))
        .expect("software");

    let value = serde_json::to_value(session.form()).expect("serializes");
    assert_eq!(
        value,
        serde_json::json!({ "software": ["MYOB"], "workingHours": "24/7" })
    );
}
