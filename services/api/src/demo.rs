use crate::infra::{InMemorySessionStore, LoggingCallToActionHandler};
use clap::Args;
use lead_qualifier::config::QualificationSettings;
use lead_qualifier::error::AppError;
use lead_qualifier::workflows::qualification::{
    Answer, BusinessType, CallToActionError, FormData, QualificationEngine, QualificationResult,
    QualificationService, QualificationServiceError, QuestionId, QuestionKind, QuestionView,
    ScoreBreakdown, SessionId, Stage, StageGate, StageView,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;

type DemoService = QualificationService<InMemorySessionStore, LoggingCallToActionHandler>;

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// JSON file holding the collected form data (camelCase keys)
    #[arg(long)]
    pub(crate) form: PathBuf,
    /// Print the full result as JSON instead of a summary
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Business type the scripted client answers with
    #[arg(long, value_parser = parse_business_type, default_value = "healthcare")]
    pub(crate) business_type: BusinessType,
}

pub(crate) fn parse_business_type(raw: &str) -> Result<BusinessType, String> {
    BusinessType::from_value(raw.trim()).ok_or_else(|| {
        let known: Vec<&str> = BusinessType::ALL.iter().map(|kind| kind.value()).collect();
        format!("unknown business type '{raw}' (expected one of {})", known.join(", "))
    })
}

pub(crate) fn load_form(path: &Path) -> Result<FormData, AppError> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let form = load_form(&args.form)?;
    let engine = QualificationEngine::default();
    let result = engine.evaluate(&form);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        render_result(&result, &engine.breakdown(&form));
    }
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let actions = Arc::new(LoggingCallToActionHandler::default());
    let service = QualificationService::new(
        Arc::new(InMemorySessionStore::default()),
        actions.clone(),
        QualificationSettings::default(),
    );

    println!(
        "Lead qualification demo ({} client)",
        args.business_type.industry_name()
    );
    let Some(id) = walk_stages(&service, args.business_type)? else {
        return Ok(());
    };

    let state = service.view(&id)?;
    let result = service.result(&id)?;
    render_result(&result, &service.engine().breakdown(&state.form_data));

    match service.trigger_call_to_action(&id) {
        Ok(dispatch) => println!(
            "\nCall-to-action dispatched: {}",
            serde_json::to_string(&dispatch)?
        ),
        Err(QualificationServiceError::CallToAction(CallToActionError::NoAction { .. })) => {
            println!("\nNo call-to-action offered for this lead");
        }
        Err(err) => return Err(err.into()),
    }
    for entry in actions.dispatched() {
        println!("  - {}", entry);
    }

    Ok(())
}

/// Drives a scripted client through the question stages. Returns the session id once the
/// results stage is reached, or `None` when a gate stops the walkthrough.
pub(crate) fn walk_stages(
    service: &DemoService,
    business_type: BusinessType,
) -> Result<Option<SessionId>, AppError> {
    let id = service.start()?.session_id;
    service.answer(
        &id,
        QuestionId::BusinessType,
        Answer::Choice(business_type.value().to_string()),
    )?;

    loop {
        let state = service.view(&id)?;
        render_stage(&state.view);

        for question in &state.view.questions {
            if let Some(answer) = scripted_answer(question) {
                service.answer(&id, question.id, answer)?;
            }
        }

        let outcome = service.continue_stage(&id)?;
        match outcome.transition.gate {
            StageGate::Open if outcome.transition.to == Stage::Results => return Ok(Some(id)),
            StageGate::Open => {}
            StageGate::Blocked { issues } => {
                println!("  Stage blocked:");
                for issue in issues {
                    println!("  - {}: {}", issue.field.key(), issue.message);
                }
                return Ok(None);
            }
            StageGate::Redirected { advisory } => {
                println!("  Redirected: {}", advisory);
                return Ok(None);
            }
        }
    }
}

fn scripted_answer(question: &QuestionView) -> Option<Answer> {
    let preferred = match question.id {
        QuestionId::BusinessType
        | QuestionId::InvestmentMindset
        | QuestionId::SwitchReason
        | QuestionId::Phone => return None,
        QuestionId::Name => return Some(Answer::Text("Jordan Avery".to_string())),
        QuestionId::Email => return Some(Answer::Text("jordan@avery.example".to_string())),
        QuestionId::Company => return Some(Answer::Text("Avery & Co".to_string())),
        QuestionId::TeamSize => Some("growing"),
        QuestionId::Timeline => Some("yesterday"),
        QuestionId::TeamPhilosophy => Some("family"),
        QuestionId::CommunityImpact => Some("matters"),
        QuestionId::BudgetReality => Some("aligned"),
        QuestionId::PatientVolume => Some("300+ (multi-practitioner)"),
        QuestionId::OrderVolume => Some("Scaling (500-2000/month)"),
        _ => None,
    };
    let first = question.options.first().map(|option| option.value.clone());

    match question.kind {
        QuestionKind::Single => preferred.map(str::to_string).or(first).map(Answer::Choice),
        QuestionKind::Multiple => first.map(Answer::Select),
        _ => None,
    }
}

fn render_stage(view: &StageView) {
    println!(
        "\n[{}% {}] {}",
        view.progress_percent, view.progress_label, view.title
    );
    println!("{}", view.subtitle);
    for notice in &view.notices {
        println!("  ({:?}) {}", notice.kind, notice.message);
    }
    for question in &view.questions {
        let marker = if question.required { "*" } else { " " };
        println!(
            "  {} {} [{} option(s)]",
            marker,
            question.prompt,
            question.options.len()
        );
    }
}

fn render_result(result: &QualificationResult, breakdown: &ScoreBreakdown) {
    println!("\n{}", result.headline);
    println!(
        "Category: {} ({}) | Score: {}",
        result.category.as_str(),
        result.badge_label(),
        result.score
    );
    println!("{}", result.body);

    println!("\nScore components");
    for component in &breakdown.components {
        println!("  {:>4}  {}", component.points, component.note);
    }
    if breakdown.raw_total != breakdown.total {
        println!("  raw total {} clamped to {}", breakdown.raw_total, breakdown.total);
    }

    if !result.recommendations.is_empty() {
        println!("\nRecommended next steps");
        for recommendation in &result.recommendations {
            println!("- {}", recommendation);
        }
    }
    if let Some(cta) = &result.cta_text {
        println!("\nNext: {}", cta);
    }
}
