//! Declarative question plan: which questions each stage presents for a given form, plus the
//! inline notices rendered alongside them.

use serde::Serialize;

use super::catalog::{
    pain_points_for, skill_priorities_for, OptionCatalog, INVESTMENT_PRIORITIES,
    LOWEST_PRICE_PRIORITY, SWITCH_TRIGGER_EXPERIENCE,
};
use super::domain::{BudgetExpectation, BusinessType, FormData, QuestionId, QuestionKind};
use super::stage::Stage;

/// Maximum number of skill priorities a client may hold at once.
pub const MAX_SKILL_PRIORITIES: usize = 3;

pub const FINANCIAL_ADVISORY: &str = "We specialise in healthcare, digital, and creative businesses. For financial services support, we recommend exploring specialised providers.";

const LOWEST_PRICE_WARNING: &str = "While price is important, choosing based on cost alone often leads to higher expenses through turnover, training, and quality issues.";

const LOW_BUDGET_WARNING: &str = "Important: Unincorporated operators at this price point leave you exposed to legal liability, have no backup coverage, and typically result in high turnover costs. Consider the total cost of ownership, not just monthly fees.";

const BUDGET_CONTEXT: &str = "Quality offshore talent typically costs $1,700 - $2,500 per month for specialized roles. This includes incorporated business protection, dedicated support, and long-term team members who know your business.";

const GENERAL_TRACK_PLACEHOLDER: &str = "Tell us more about your specific needs. Based on your business type, we'll customize our solution for you.";

/// Stage 2 follow-up set selected by business type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IndustryTrack {
    Healthcare,
    Ecommerce,
    Accounting,
    General,
}

impl IndustryTrack {
    pub fn for_business(business_type: Option<BusinessType>) -> Self {
        match business_type {
            Some(BusinessType::Healthcare) => Self::Healthcare,
            Some(BusinessType::Ecommerce) => Self::Ecommerce,
            Some(BusinessType::Accounting) => Self::Accounting,
            _ => Self::General,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ShowWhen {
    Always,
    PreviousExperienceIs(&'static str),
}

#[derive(Debug)]
struct QuestionDef {
    id: QuestionId,
    prompt: &'static str,
    required: bool,
    show_when: ShowWhen,
}

const fn ask(id: QuestionId, prompt: &'static str) -> QuestionDef {
    QuestionDef {
        id,
        prompt,
        required: false,
        show_when: ShowWhen::Always,
    }
}

const fn require(id: QuestionId, prompt: &'static str) -> QuestionDef {
    QuestionDef {
        id,
        prompt,
        required: true,
        show_when: ShowWhen::Always,
    }
}

const BUSINESS_PROFILE: &[QuestionDef] = &[
    require(
        QuestionId::BusinessType,
        "What type of business are you running?",
    ),
    require(
        QuestionId::TeamSize,
        "Where are you at in your business journey?",
    ),
    require(
        QuestionId::PainPoint,
        "What's eating up most of your time right now?",
    ),
    require(
        QuestionId::Timeline,
        "When are you looking to bring on support?",
    ),
];

const HEALTHCARE_TRACK: &[QuestionDef] = &[
    ask(
        QuestionId::PracticeSystem,
        "Which systems are central to your practice?",
    ),
    ask(
        QuestionId::ComplianceConcerns,
        "What keeps you up at night about compliance?",
    ),
    ask(
        QuestionId::PatientVolume,
        "How many patient interactions per week?",
    ),
];

const ECOMMERCE_TRACK: &[QuestionDef] = &[
    ask(
        QuestionId::Platform,
        "Where does your business live online?",
    ),
    ask(
        QuestionId::OrderVolume,
        "What's your current order volume?",
    ),
    ask(QuestionId::Bottleneck, "Where do customers get stuck?"),
];

const ACCOUNTING_TRACK: &[QuestionDef] = &[
    ask(
        QuestionId::Software,
        "Which platforms do you use daily?",
    ),
    ask(QuestionId::ServiceTypes, "What services do you provide?"),
    ask(
        QuestionId::PeakSeasonPain,
        "How do you handle July to October madness?",
    ),
];

const INDUSTRY_TRACKS: &[(IndustryTrack, &[QuestionDef])] = &[
    (IndustryTrack::Healthcare, HEALTHCARE_TRACK),
    (IndustryTrack::Ecommerce, ECOMMERCE_TRACK),
    (IndustryTrack::Accounting, ACCOUNTING_TRACK),
    (IndustryTrack::General, &[]),
];

const CULTURAL_FIT: &[QuestionDef] = &[
    ask(
        QuestionId::TeamPhilosophy,
        "How do you think about offshore teams?",
    ),
    ask(
        QuestionId::InvestmentMindset,
        "What matters most in an outsourcing partner? Rank from most important to least important.",
    ),
    ask(
        QuestionId::CommunityImpact,
        "Did you know your choice of BPO affects real families?",
    ),
    ask(
        QuestionId::PreviousExperience,
        "Have you worked with offshore teams before?",
    ),
    QuestionDef {
        id: QuestionId::SwitchReason,
        prompt: "What would make you consider switching?",
        required: false,
        show_when: ShowWhen::PreviousExperienceIs(SWITCH_TRIGGER_EXPERIENCE),
    },
];

const FINAL_DETAILS: &[QuestionDef] = &[
    require(QuestionId::WorkingHours, "When do you need support?"),
    require(
        QuestionId::TeamSizeNeeded,
        "How many people do you need initially?",
    ),
    require(
        QuestionId::SkillPriority,
        "What skills are absolutely essential? (Choose up to 3)",
    ),
    require(
        QuestionId::BudgetReality,
        "Investment in quality offshore talent",
    ),
    require(QuestionId::Name, "Your name"),
    require(QuestionId::Email, "Email address"),
    require(QuestionId::Company, "Company name"),
    ask(QuestionId::Phone, "Phone number (optional)"),
];

fn defs_for(stage: Stage, form: &FormData) -> &'static [QuestionDef] {
    match stage {
        Stage::BusinessProfile => BUSINESS_PROFILE,
        Stage::IndustryNeeds => {
            let track = IndustryTrack::for_business(form.business_type);
            INDUSTRY_TRACKS
                .iter()
                .find(|(candidate, _)| *candidate == track)
                .map(|(_, defs)| *defs)
                .unwrap_or(&[])
        }
        Stage::CulturalFit => CULTURAL_FIT,
        Stage::FinalDetails => FINAL_DETAILS,
        Stage::Results => &[],
    }
}

fn is_shown(def: &QuestionDef, form: &FormData) -> bool {
    match def.show_when {
        ShowWhen::Always => true,
        ShowWhen::PreviousExperienceIs(expected) => {
            form.previous_experience.as_deref() == Some(expected)
        }
    }
}

/// Questions a stage declares as mandatory before the client may leave it.
pub fn required_questions(stage: Stage, form: &FormData) -> Vec<QuestionId> {
    defs_for(stage, form)
        .iter()
        .filter(|def| def.required && is_shown(def, form))
        .map(|def| def.id)
        .collect()
}

/// The ranking currently in effect: the stored order, or the default list before any reorder.
pub fn effective_ranking(form: &FormData) -> Vec<String> {
    if form.investment_mindset.is_empty() {
        INVESTMENT_PRIORITIES
            .iter()
            .map(|item| item.to_string())
            .collect()
    } else {
        form.investment_mindset.clone()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionView {
    pub value: String,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl OptionView {
    fn plain(value: &str) -> Self {
        Self {
            value: value.to_string(),
            label: value.to_string(),
            icon: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionView {
    pub id: QuestionId,
    pub prompt: &'static str,
    pub kind: QuestionKind,
    pub required: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<OptionView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_selections: Option<usize>,
}

fn options_for(id: QuestionId, form: &FormData) -> Vec<OptionView> {
    match id {
        QuestionId::PainPoint => pain_points_for(form.business_type)
            .iter()
            .map(|point| OptionView::plain(point))
            .collect(),
        QuestionId::SkillPriority => skill_priorities_for(form.business_type)
            .iter()
            .map(|skill| OptionView::plain(skill))
            .collect(),
        QuestionId::InvestmentMindset => effective_ranking(form)
            .iter()
            .map(|item| OptionView::plain(item))
            .collect(),
        _ => OptionCatalog::standard()
            .options(id)
            .into_iter()
            .map(|entry| OptionView {
                value: entry.value.to_string(),
                label: entry.label.to_string(),
                icon: entry.icon.map(str::to_string),
            })
            .collect(),
    }
}

/// Questions currently applicable to `stage`, with their option sets resolved against `form`.
pub fn questions_for(stage: Stage, form: &FormData) -> Vec<QuestionView> {
    defs_for(stage, form)
        .iter()
        .filter(|def| is_shown(def, form))
        .map(|def| QuestionView {
            id: def.id,
            prompt: def.prompt,
            kind: def.id.kind(),
            required: def.required,
            options: options_for(def.id, form),
            max_selections: (def.id == QuestionId::SkillPriority).then_some(MAX_SKILL_PRIORITIES),
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    /// Advancement is disabled while this notice is shown.
    Redirect,
    Warning,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: &'static str,
}

pub fn notices_for(stage: Stage, form: &FormData) -> Vec<Notice> {
    let mut notices = Vec::new();
    match stage {
        Stage::BusinessProfile => {
            if form.business_type == Some(BusinessType::Financial) {
                notices.push(Notice {
                    kind: NoticeKind::Redirect,
                    message: FINANCIAL_ADVISORY,
                });
            }
        }
        Stage::IndustryNeeds => {
            if IndustryTrack::for_business(form.business_type) == IndustryTrack::General {
                notices.push(Notice {
                    kind: NoticeKind::Info,
                    message: GENERAL_TRACK_PLACEHOLDER,
                });
            }
        }
        Stage::CulturalFit => {
            if effective_ranking(form).first().map(String::as_str) == Some(LOWEST_PRICE_PRIORITY) {
                notices.push(Notice {
                    kind: NoticeKind::Warning,
                    message: LOWEST_PRICE_WARNING,
                });
            }
        }
        Stage::FinalDetails => {
            notices.push(Notice {
                kind: NoticeKind::Info,
                message: BUDGET_CONTEXT,
            });
            if form.budget_reality == Some(BudgetExpectation::Under1000) {
                notices.push(Notice {
                    kind: NoticeKind::Warning,
                    message: LOW_BUDGET_WARNING,
                });
            }
        }
        Stage::Results => {}
    }
    notices
}

/// Everything the presentation layer needs to render one stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StageView {
    pub stage: Stage,
    pub title: &'static str,
    pub subtitle: &'static str,
    pub progress_label: &'static str,
    pub progress_percent: u8,
    pub questions: Vec<QuestionView>,
    pub notices: Vec<Notice>,
    pub can_go_back: bool,
    pub can_continue: bool,
}

pub fn stage_view(stage: Stage, form: &FormData) -> StageView {
    let notices = notices_for(stage, form);
    let redirected = notices
        .iter()
        .any(|notice| notice.kind == NoticeKind::Redirect);

    StageView {
        stage,
        title: stage.title(),
        subtitle: stage.subtitle(),
        progress_label: stage.progress_label(),
        progress_percent: stage.progress_percent(),
        questions: questions_for(stage, form),
        notices,
        can_go_back: stage != Stage::BusinessProfile,
        can_continue: stage != Stage::Results && !redirected,
    }
}
