//! Authoritative option table shared by the stage controller (rendering, answer checks) and the
//! scoring engine (modifiers). Entries are keyed by question and stored value.

use std::sync::OnceLock;

use serde::Serialize;

use super::domain::{
    BudgetExpectation, BusinessType, CommunityImpact, QuestionId, TeamPhilosophy, TeamSize,
    Timeline, WorkingHours,
};

/// Ranked item whose top placement triggers the price warning in stage 3.
pub const LOWEST_PRICE_PRIORITY: &str = "Lowest possible price";

/// Previous-experience answer that reveals the switch-reason follow-up.
pub const SWITCH_TRIGGER_EXPERIENCE: &str = "Currently with another BPO";

/// Default ranking shown before the client reorders anything.
pub const INVESTMENT_PRIORITIES: [&str; 5] = [
    "Long-term staff who know our business",
    LOWEST_PRICE_PRIORITY,
    "Cultural fit with our team",
    "Investment in staff development",
    "Quick scaling up/down",
];

/// A selectable answer: the stored value, what the client sees, and how it scores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    pub question: QuestionId,
    pub value: &'static str,
    pub label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<&'static str>,
    /// Internal routing annotation; never rendered to the client.
    #[serde(skip)]
    pub routing_note: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score_modifier: Option<i32>,
}

#[derive(Debug)]
pub struct OptionCatalog {
    entries: Vec<CatalogEntry>,
}

impl OptionCatalog {
    /// Process-wide catalog, built on first use and never mutated.
    pub fn standard() -> &'static Self {
        static CATALOG: OnceLock<OptionCatalog> = OnceLock::new();
        CATALOG.get_or_init(|| Self {
            entries: standard_entries(),
        })
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn options(&self, question: QuestionId) -> Vec<&CatalogEntry> {
        self.entries
            .iter()
            .filter(|entry| entry.question == question)
            .collect()
    }

    pub fn lookup(&self, question: QuestionId, value: &str) -> Option<&CatalogEntry> {
        self.entries
            .iter()
            .find(|entry| entry.question == question && entry.value == value)
    }

    /// Points attached to an answer; unknown values and unscored entries are neutral.
    pub fn score_modifier(&self, question: QuestionId, value: &str) -> i32 {
        self.lookup(question, value)
            .and_then(|entry| entry.score_modifier)
            .unwrap_or(0)
    }
}

pub fn pain_points_for(business_type: Option<BusinessType>) -> &'static [&'static str] {
    match business_type {
        Some(BusinessType::Healthcare) => &[
            "Patient admin is stealing time from patient care",
            "Drowning in appointment scheduling and follow-ups",
            "Medicare/insurance claims are a nightmare",
            "Practice management software needs constant attention",
        ],
        Some(BusinessType::Ecommerce) => &[
            "Customer service across multiple channels",
            "Social media engagement and content creation",
            "Order processing and inventory management",
            "Campaign reporting and analytics",
        ],
        Some(BusinessType::Accounting) => &[
            "Data entry and reconciliations in Xero/MYOB",
            "BAS and compliance documentation",
            "Client communication and follow-ups",
            "Tax season is breaking our team",
        ],
        Some(BusinessType::Marketing) => &[
            "Content creation and scheduling",
            "Campaign management across platforms",
            "Client reporting and analytics",
            "Creative asset management",
        ],
        Some(BusinessType::Trades) => &[
            "Quote and invoice management",
            "Scheduling and dispatch",
            "Supplier coordination",
            "Compliance documentation",
        ],
        _ => &[
            "Administrative tasks taking too much time",
            "Customer service and support",
            "Data entry and management",
            "Process optimization needed",
        ],
    }
}

pub fn skill_priorities_for(business_type: Option<BusinessType>) -> &'static [&'static str] {
    match business_type {
        Some(BusinessType::Healthcare) => &[
            "Medical terminology knowledge",
            "Appointment scheduling",
            "Patient communication",
            "Insurance/Medicare processing",
            "Practice software expertise",
            "Clinical documentation",
            "Telehealth support",
            "Prescription management",
        ],
        Some(BusinessType::Ecommerce) => &[
            "E-commerce platform expertise",
            "Customer service excellence",
            "Social media management",
            "Order processing",
            "Content creation",
            "Inventory management",
            "Email marketing",
            "Product listing optimization",
        ],
        Some(BusinessType::Accounting) => &[
            "Xero/MYOB proficiency",
            "Data entry accuracy",
            "Tax knowledge",
            "Client communication",
            "Compliance documentation",
            "Financial reporting",
            "Payroll processing",
            "BAS preparation",
        ],
        Some(BusinessType::Marketing) => &[
            "Social media management",
            "Content creation",
            "Graphic design basics",
            "Campaign management",
            "Analytics and reporting",
            "Email marketing",
            "SEO/SEM knowledge",
            "Client communication",
        ],
        _ => &[
            "Customer service excellence",
            "Data entry accuracy",
            "Email management",
            "Phone communication",
            "Administrative support",
            "Document management",
            "Calendar management",
            "Basic reporting",
        ],
    }
}

fn scored(
    question: QuestionId,
    value: &'static str,
    label: &'static str,
    icon: Option<&'static str>,
    routing_note: Option<&'static str>,
    score_modifier: i32,
) -> CatalogEntry {
    CatalogEntry {
        question,
        value,
        label,
        icon,
        routing_note,
        score_modifier: Some(score_modifier),
    }
}

/// Options whose stored value is the label itself.
fn labelled(question: QuestionId, labels: &[&'static str]) -> Vec<CatalogEntry> {
    labels
        .iter()
        .map(|&label| CatalogEntry {
            question,
            value: label,
            label,
            icon: None,
            routing_note: None,
            score_modifier: None,
        })
        .collect()
}

fn standard_entries() -> Vec<CatalogEntry> {
    use QuestionId as Q;

    let mut entries = vec![
        scored(
            Q::BusinessType,
            BusinessType::Healthcare.value(),
            "Healthcare & Allied Health Practice",
            Some("🏥"),
            Some("HIGH PRIORITY - Route to specialized track"),
            30,
        ),
        scored(
            Q::BusinessType,
            BusinessType::Ecommerce.value(),
            "E-commerce or Digital Agency",
            Some("📱"),
            Some("HIGH PRIORITY - Route to digital track"),
            25,
        ),
        scored(
            Q::BusinessType,
            BusinessType::Accounting.value(),
            "Accounting or Bookkeeping Firm",
            Some("📊"),
            Some("MEDIUM PRIORITY - Check for Xero/MYOB"),
            20,
        ),
        scored(
            Q::BusinessType,
            BusinessType::Marketing.value(),
            "Marketing or Creative Agency",
            Some("🎯"),
            Some("HIGH PRIORITY - Route to creative track"),
            25,
        ),
        scored(
            Q::BusinessType,
            BusinessType::Trades.value(),
            "Trades & Construction",
            Some("🏗️"),
            Some("MEDIUM PRIORITY - Basic admin support"),
            10,
        ),
        scored(
            Q::BusinessType,
            BusinessType::Financial.value(),
            "Financial Advisory or Legal Services",
            Some("💼"),
            Some("REDIRECT to alternative solution"),
            -50,
        ),
        scored(
            Q::BusinessType,
            BusinessType::Other.value(),
            "Other Professional Services",
            Some("🏢"),
            Some("QUALIFY FURTHER"),
            10,
        ),
        scored(
            Q::TeamSize,
            TeamSize::Solo.value(),
            "Solo founder wearing too many hats",
            Some("👤"),
            Some("High touch, needs hand-holding"),
            5,
        ),
        scored(
            Q::TeamSize,
            TeamSize::Small.value(),
            "Small team drowning in admin (2-5 people)",
            Some("👥"),
            Some("Sweet spot - urgent need"),
            10,
        ),
        scored(
            Q::TeamSize,
            TeamSize::Growing.value(),
            "Growing fast, need to scale smart (6-15 people)",
            Some("🚀"),
            Some("Best lifetime value"),
            15,
        ),
        scored(
            Q::TeamSize,
            TeamSize::Established.value(),
            "Established, looking to optimise (16-50 people)",
            Some("🏢"),
            Some("Needs ROI focus"),
            10,
        ),
        scored(
            Q::TeamSize,
            TeamSize::Corporate.value(),
            "Corporate team (50+ people)",
            Some("🏛️"),
            Some("Check for owner involvement"),
            -15,
        ),
        scored(
            Q::Timeline,
            Timeline::Yesterday.value(),
            "Yesterday! We're overwhelmed",
            Some("🔥"),
            Some("HIGH URGENCY - Fast track"),
            10,
        ),
        scored(
            Q::Timeline,
            Timeline::Month.value(),
            "Within the next month",
            Some("📅"),
            Some("NORMAL PROCESS"),
            5,
        ),
        scored(
            Q::Timeline,
            Timeline::Quarter.value(),
            "Exploring options for next quarter",
            Some("🔍"),
            Some("NURTURE TRACK"),
            0,
        ),
        scored(
            Q::Timeline,
            Timeline::Research.value(),
            "Just researching",
            Some("💭"),
            Some("EDUCATION TRACK"),
            -5,
        ),
        scored(
            Q::TeamPhilosophy,
            TeamPhilosophy::Family.value(),
            "Extension of our family - their success is our success",
            None,
            None,
            20,
        ),
        scored(
            Q::TeamPhilosophy,
            TeamPhilosophy::Partners.value(),
            "Professional partners who happen to be remote",
            None,
            None,
            15,
        ),
        scored(
            Q::TeamPhilosophy,
            TeamPhilosophy::Resources.value(),
            "Cost-effective resources to get work done",
            None,
            None,
            5,
        ),
        scored(
            Q::TeamPhilosophy,
            TeamPhilosophy::Cheap.value(),
            "Cheap labour to save money",
            None,
            Some("REDIRECT to budget marketplaces"),
            -20,
        ),
        scored(
            Q::CommunityImpact,
            CommunityImpact::Matters.value(),
            "Yes, and it matters to me where and how they work",
            None,
            None,
            10,
        ),
        scored(
            Q::CommunityImpact,
            CommunityImpact::Curious.value(),
            "I hadn't thought about it, tell me more",
            None,
            None,
            5,
        ),
        scored(
            Q::CommunityImpact,
            CommunityImpact::NotConcerned.value(),
            "Not really my concern if the work gets done",
            None,
            Some("REDIRECT to budget marketplaces"),
            -25,
        ),
        scored(
            Q::BudgetReality,
            BudgetExpectation::Aligned.value(),
            "That's what we budgeted",
            None,
            None,
            15,
        ),
        scored(
            Q::BudgetReality,
            BudgetExpectation::HigherButWorth.value(),
            "Higher than expected but worth it for quality",
            None,
            None,
            10,
        ),
        scored(
            Q::BudgetReality,
            BudgetExpectation::Under1000.value(),
            "We were hoping for under $1,000/month",
            None,
            None,
            -5,
        ),
        scored(
            Q::BudgetReality,
            BudgetExpectation::NeedEducation.value(),
            "Need to understand the value better",
            None,
            None,
            0,
        ),
    ];

    entries.extend(
        [
            (WorkingHours::Australian, "Australian business hours only"),
            (WorkingHours::Overlap, "Some overlap with ANZ hours"),
            (WorkingHours::AroundTheClock, "24/7 coverage needed"),
            (WorkingHours::Flexible, "Flexible/project-based"),
        ]
        .into_iter()
        .map(|(hours, label)| CatalogEntry {
            question: Q::WorkingHours,
            value: hours.value(),
            label,
            icon: None,
            routing_note: None,
            score_modifier: None,
        }),
    );

    entries.extend(labelled(
        Q::PatientVolume,
        &["Under 50 (small practice)", "50-150 (growing practice)"],
    ));
    entries.push(scored(
        Q::PatientVolume,
        "150-300 (established)",
        "150-300 (established)",
        None,
        None,
        10,
    ));
    entries.push(scored(
        Q::PatientVolume,
        "300+ (multi-practitioner)",
        "300+ (multi-practitioner)",
        None,
        None,
        15,
    ));
    entries.extend(labelled(
        Q::OrderVolume,
        &["Startup (under 100/month)", "Growing (100-500/month)"],
    ));
    entries.push(scored(
        Q::OrderVolume,
        "Scaling (500-2000/month)",
        "Scaling (500-2000/month)",
        None,
        None,
        10,
    ));
    entries.push(scored(
        Q::OrderVolume,
        "Established (2000+/month)",
        "Established (2000+/month)",
        None,
        None,
        15,
    ));

    entries.extend(labelled(
        Q::PracticeSystem,
        &[
            "Best Practice",
            "Medical Director",
            "Cliniko",
            "Halaxy",
            "SimplePractice",
            "Power Diary",
            "Other/Custom system",
            "We use paper... help!",
        ],
    ));
    entries.extend(labelled(
        Q::ComplianceConcerns,
        &[
            "AHPRA requirements",
            "Patient privacy (Privacy Act)",
            "Medicare compliance",
            "Clinical documentation standards",
            "All of the above!",
        ],
    ));
    entries.extend(labelled(
        Q::Platform,
        &[
            "Shopify only",
            "WooCommerce",
            "Amazon + own store",
            "Multiple marketplaces (3+)",
            "Custom platform",
            "It's complicated...",
        ],
    ));
    entries.extend(labelled(
        Q::Bottleneck,
        &[
            "Response time to inquiries",
            "Order status updates",
            "Returns/refunds process",
            "Product questions",
            "Technical support",
        ],
    ));
    entries.extend(labelled(
        Q::Software,
        &[
            "Xero",
            "MYOB",
            "QuickBooks",
            "ATO Portal",
            "Excel/Google Sheets",
            "Other",
        ],
    ));
    entries.extend(labelled(
        Q::ServiceTypes,
        &[
            "Bookkeeping",
            "BAS Agent services",
            "Tax returns",
            "Payroll",
            "Advisory/CFO services",
        ],
    ));
    entries.extend(labelled(
        Q::PeakSeasonPain,
        &[
            "Work 80-hour weeks",
            "Turn away clients",
            "Hire expensive temps",
            "Miss deadlines",
            "We don't handle it well",
        ],
    ));
    entries.extend(labelled(
        Q::PreviousExperience,
        &[
            "Yes, but disappointed with high turnover",
            "Yes, but lacked personal connection",
            "No, this would be our first time",
            "Currently using freelancers (Upwork/Fiverr)",
            SWITCH_TRIGGER_EXPERIENCE,
        ],
    ));
    entries.extend(labelled(
        Q::TeamSizeNeeded,
        &[
            "Just 1 dedicated person to start",
            "2-3 person team",
            "4-6 person team",
            "Build as we go",
            "Not sure yet",
        ],
    ));

    entries
}
