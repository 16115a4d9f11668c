use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for a wizard session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub String);

impl SessionId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BusinessType {
    Healthcare,
    Ecommerce,
    Accounting,
    Marketing,
    Trades,
    Financial,
    Other,
}

impl BusinessType {
    pub const ALL: [Self; 7] = [
        Self::Healthcare,
        Self::Ecommerce,
        Self::Accounting,
        Self::Marketing,
        Self::Trades,
        Self::Financial,
        Self::Other,
    ];

    pub const fn value(self) -> &'static str {
        match self {
            Self::Healthcare => "healthcare",
            Self::Ecommerce => "ecommerce",
            Self::Accounting => "accounting",
            Self::Marketing => "marketing",
            Self::Trades => "trades",
            Self::Financial => "financial",
            Self::Other => "other",
        }
    }

    pub fn from_value(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|candidate| candidate.value() == raw)
    }

    /// Human readable industry used in the hot-lead narrative.
    pub const fn industry_name(self) -> &'static str {
        match self {
            Self::Healthcare => "Healthcare",
            Self::Ecommerce => "E-commerce",
            Self::Accounting => "Accounting",
            _ => "Business",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TeamSize {
    Solo,
    Small,
    Growing,
    Established,
    Corporate,
}

impl TeamSize {
    pub const ALL: [Self; 5] = [
        Self::Solo,
        Self::Small,
        Self::Growing,
        Self::Established,
        Self::Corporate,
    ];

    pub const fn value(self) -> &'static str {
        match self {
            Self::Solo => "solo",
            Self::Small => "small",
            Self::Growing => "growing",
            Self::Established => "established",
            Self::Corporate => "corporate",
        }
    }

    pub fn from_value(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|candidate| candidate.value() == raw)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Timeline {
    Yesterday,
    Month,
    Quarter,
    Research,
}

impl Timeline {
    pub const ALL: [Self; 4] = [Self::Yesterday, Self::Month, Self::Quarter, Self::Research];

    pub const fn value(self) -> &'static str {
        match self {
            Self::Yesterday => "yesterday",
            Self::Month => "month",
            Self::Quarter => "quarter",
            Self::Research => "research",
        }
    }

    pub fn from_value(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|candidate| candidate.value() == raw)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WorkingHours {
    #[serde(rename = "australian")]
    Australian,
    #[serde(rename = "overlap")]
    Overlap,
    #[serde(rename = "24/7")]
    AroundTheClock,
    #[serde(rename = "flexible")]
    Flexible,
}

impl WorkingHours {
    pub const ALL: [Self; 4] = [
        Self::Australian,
        Self::Overlap,
        Self::AroundTheClock,
        Self::Flexible,
    ];

    pub const fn value(self) -> &'static str {
        match self {
            Self::Australian => "australian",
            Self::Overlap => "overlap",
            Self::AroundTheClock => "24/7",
            Self::Flexible => "flexible",
        }
    }

    pub fn from_value(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|candidate| candidate.value() == raw)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BudgetExpectation {
    #[serde(rename = "aligned")]
    Aligned,
    #[serde(rename = "higher-but-worth")]
    HigherButWorth,
    #[serde(rename = "under-1000")]
    Under1000,
    #[serde(rename = "need-education")]
    NeedEducation,
}

impl BudgetExpectation {
    pub const ALL: [Self; 4] = [
        Self::Aligned,
        Self::HigherButWorth,
        Self::Under1000,
        Self::NeedEducation,
    ];

    pub const fn value(self) -> &'static str {
        match self {
            Self::Aligned => "aligned",
            Self::HigherButWorth => "higher-but-worth",
            Self::Under1000 => "under-1000",
            Self::NeedEducation => "need-education",
        }
    }

    pub fn from_value(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|candidate| candidate.value() == raw)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TeamPhilosophy {
    Family,
    Partners,
    Resources,
    Cheap,
}

impl TeamPhilosophy {
    pub const ALL: [Self; 4] = [Self::Family, Self::Partners, Self::Resources, Self::Cheap];

    pub const fn value(self) -> &'static str {
        match self {
            Self::Family => "family",
            Self::Partners => "partners",
            Self::Resources => "resources",
            Self::Cheap => "cheap",
        }
    }

    pub fn from_value(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|candidate| candidate.value() == raw)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CommunityImpact {
    Matters,
    Curious,
    NotConcerned,
}

impl CommunityImpact {
    pub const ALL: [Self; 3] = [Self::Matters, Self::Curious, Self::NotConcerned];

    pub const fn value(self) -> &'static str {
        match self {
            Self::Matters => "matters",
            Self::Curious => "curious",
            Self::NotConcerned => "not-concerned",
        }
    }

    pub fn from_value(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|candidate| candidate.value() == raw)
    }
}

/// Every answerable field of the wizard. The serialized form matches the `FormData` key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum QuestionId {
    BusinessType,
    TeamSize,
    PainPoint,
    Timeline,
    PracticeSystem,
    ComplianceConcerns,
    PatientVolume,
    Platform,
    OrderVolume,
    Bottleneck,
    Software,
    ServiceTypes,
    PeakSeasonPain,
    TeamPhilosophy,
    InvestmentMindset,
    CommunityImpact,
    PreviousExperience,
    SwitchReason,
    WorkingHours,
    TeamSizeNeeded,
    SkillPriority,
    BudgetReality,
    Name,
    Email,
    Phone,
    Company,
}

impl QuestionId {
    pub const fn key(self) -> &'static str {
        match self {
            Self::BusinessType => "businessType",
            Self::TeamSize => "teamSize",
            Self::PainPoint => "painPoint",
            Self::Timeline => "timeline",
            Self::PracticeSystem => "practiceSystem",
            Self::ComplianceConcerns => "complianceConcerns",
            Self::PatientVolume => "patientVolume",
            Self::Platform => "platform",
            Self::OrderVolume => "orderVolume",
            Self::Bottleneck => "bottleneck",
            Self::Software => "software",
            Self::ServiceTypes => "serviceTypes",
            Self::PeakSeasonPain => "peakSeasonPain",
            Self::TeamPhilosophy => "teamPhilosophy",
            Self::InvestmentMindset => "investmentMindset",
            Self::CommunityImpact => "communityImpact",
            Self::PreviousExperience => "previousExperience",
            Self::SwitchReason => "switchReason",
            Self::WorkingHours => "workingHours",
            Self::TeamSizeNeeded => "teamSizeNeeded",
            Self::SkillPriority => "skillPriority",
            Self::BudgetReality => "budgetReality",
            Self::Name => "name",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Company => "company",
        }
    }

    pub const fn kind(self) -> QuestionKind {
        match self {
            Self::PracticeSystem | Self::ComplianceConcerns | Self::Software | Self::ServiceTypes => {
                QuestionKind::Multiple
            }
            Self::SkillPriority => QuestionKind::Multiple,
            Self::InvestmentMindset => QuestionKind::Ranking,
            Self::SwitchReason | Self::Name | Self::Phone | Self::Company => QuestionKind::Text,
            Self::Email => QuestionKind::Email,
            _ => QuestionKind::Single,
        }
    }
}

/// Shape of the input a question accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    Single,
    Multiple,
    Ranking,
    Text,
    Email,
}

/// The single session record accumulated across stages. Every field is optional until the
/// stage that requires it is left.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_type: Option<BusinessType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_size: Option<TeamSize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pain_point: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeline: Option<Timeline>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub practice_system: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub compliance_concerns: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patient_volume: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_volume: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bottleneck: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub software: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub service_types: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub peak_season_pain: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_philosophy: Option<TeamPhilosophy>,
    /// Ranked most-important first; order is meaningful.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub investment_mindset: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub community_impact: Option<CommunityImpact>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_experience: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub switch_reason: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub working_hours: Option<WorkingHours>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_size_needed: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skill_priority: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget_reality: Option<BudgetExpectation>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
}

impl FormData {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub(crate) fn selections(&self, question: QuestionId) -> Option<&Vec<String>> {
        match question {
            QuestionId::PracticeSystem => Some(&self.practice_system),
            QuestionId::ComplianceConcerns => Some(&self.compliance_concerns),
            QuestionId::Software => Some(&self.software),
            QuestionId::ServiceTypes => Some(&self.service_types),
            QuestionId::SkillPriority => Some(&self.skill_priority),
            _ => None,
        }
    }

    pub(crate) fn selections_mut(&mut self, question: QuestionId) -> Option<&mut Vec<String>> {
        match question {
            QuestionId::PracticeSystem => Some(&mut self.practice_system),
            QuestionId::ComplianceConcerns => Some(&mut self.compliance_concerns),
            QuestionId::Software => Some(&mut self.software),
            QuestionId::ServiceTypes => Some(&mut self.service_types),
            QuestionId::SkillPriority => Some(&mut self.skill_priority),
            _ => None,
        }
    }

    pub(crate) fn text_mut(&mut self, question: QuestionId) -> Option<&mut Option<String>> {
        match question {
            QuestionId::PainPoint => Some(&mut self.pain_point),
            QuestionId::PatientVolume => Some(&mut self.patient_volume),
            QuestionId::Platform => Some(&mut self.platform),
            QuestionId::OrderVolume => Some(&mut self.order_volume),
            QuestionId::Bottleneck => Some(&mut self.bottleneck),
            QuestionId::PeakSeasonPain => Some(&mut self.peak_season_pain),
            QuestionId::PreviousExperience => Some(&mut self.previous_experience),
            QuestionId::SwitchReason => Some(&mut self.switch_reason),
            QuestionId::TeamSizeNeeded => Some(&mut self.team_size_needed),
            QuestionId::Name => Some(&mut self.name),
            QuestionId::Email => Some(&mut self.email),
            QuestionId::Phone => Some(&mut self.phone),
            QuestionId::Company => Some(&mut self.company),
            _ => None,
        }
    }
}

/// Answer payload submitted for a single question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Answer {
    /// Pick one value of a single-choice question.
    Choice(String),
    /// Free text or contact detail.
    Text(String),
    /// Add an item to a multi-select question.
    Select(String),
    /// Remove an item from a multi-select question.
    Deselect(String),
    /// Replace the investment-priority ranking verbatim.
    Ranking(Vec<String>),
}

impl Answer {
    pub(crate) fn recorded_value(&self) -> serde_json::Value {
        match self {
            Answer::Choice(value)
            | Answer::Text(value)
            | Answer::Select(value)
            | Answer::Deselect(value) => serde_json::Value::String(value.clone()),
            Answer::Ranking(items) => serde_json::Value::from(items.clone()),
        }
    }
}

/// Entry of the per-session response log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualificationResponse {
    pub question_id: QuestionId,
    pub answer: serde_json::Value,
    pub score_impact: i32,
    pub timestamp: DateTime<Utc>,
}
