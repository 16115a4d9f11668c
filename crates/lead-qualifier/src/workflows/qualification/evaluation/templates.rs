use super::super::domain::FormData;
use super::policy::{LeadCategory, RedirectReason};
use super::{CtaAction, QualificationResult};

const REDIRECT_HEADLINE: &str = "We might not be the right fit, and that's okay";

const FINANCIAL_REDIRECT_BODY: &str = "We specialise in healthcare, digital, and creative businesses. For financial services support, we recommend exploring specialised providers.";

const MARKETPLACE_REDIRECT_BODY: &str = "Based on your priorities, you might find better matches with platforms like Upwork or Onlinejobs.ph for lowest-price options.";

const GENERIC_REDIRECT_BODY: &str = "Based on your priorities, these providers might better match your needs:

• For lowest price: Try Upwork or Onlinejobs.ph
• For financial services: Consider specialised providers
• For corporate scale: Look at Cloudstaff or Acquire BPO

We believe in finding the right match for everyone. Good luck with your search!";

const WARM_BODY: &str = "You're exactly the type of business we love working with. Based on your needs, we can create a customised solution that:

• Addresses your immediate pain points
• Scales with your growth plans
• Integrates seamlessly with your existing team
• Delivers measurable ROI within 60 days

Our approach is different because we invest in our team's success, which translates directly to your success.";

const NURTURE_BODY: &str = "Outsourcing is a big decision, and we want to make sure you have all the information you need.

Here's what sets professional BPOs apart from freelancer marketplaces:

The Hidden Costs of Cheap:
• Unincorporated operators = your legal liability
• No backup when someone's sick
• Constant retraining from turnover
• No data security guarantees

The Yoonet Difference:
• Incorporated and insured for your protection
• University partnership for continuous talent pipeline
• 90% staff retention vs 30% industry average
• Direct investment in the Balanga community";

fn hot_body(industry: &str) -> String {
    let lowered = industry.to_lowercase();
    format!(
        "Based on your answers, here's why we're confident we can transform your {lowered} business:

✅ Your {industry} Expertise Need: Our Balanga team has deep experience with the specific tools and processes you use.
✅ Your Team Philosophy: Like you, we believe offshore staff are partners, not just resources. Our 90% retention rate proves this works.
✅ Your Growth Stage: At your size, you need a partner who can scale with you. Our University partnership ensures quality talent as you grow.

Your dedicated Client Success Manager can show you:
• How similar {lowered} businesses reduced admin time by 60%
• Our unique Balanga advantage (better lifestyle = better performance)
• Exactly how we'll handle your specific pain points"
    )
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| item.to_string()).collect()
}

pub(crate) fn render(
    form: &FormData,
    score: i32,
    category: LeadCategory,
    redirect_reason: Option<RedirectReason>,
) -> QualificationResult {
    let mut result = QualificationResult {
        score,
        category,
        headline: REDIRECT_HEADLINE.to_string(),
        body: String::new(),
        recommendations: Vec::new(),
        cta_text: None,
        cta_action: CtaAction::None,
        redirect_reason,
    };

    match (category, redirect_reason) {
        (LeadCategory::Redirect, Some(RedirectReason::FinancialServices)) => {
            result.body = FINANCIAL_REDIRECT_BODY.to_string();
            result.recommendations = strings(&[
                "Consider specialised financial services BPOs",
                "Look for providers with specific compliance expertise",
            ]);
        }
        (LeadCategory::Redirect, Some(RedirectReason::BudgetMarketplace)) => {
            result.body = MARKETPLACE_REDIRECT_BODY.to_string();
            result.recommendations = strings(&[
                "Try Upwork or Onlinejobs.ph for budget options",
                "Consider freelancer marketplaces",
            ]);
        }
        (LeadCategory::Redirect, _) => {
            result.body = GENERIC_REDIRECT_BODY.to_string();
            result.recommendations = strings(&[
                "Define your non-negotiable requirements",
                "Research provider track records",
                "Always check incorporation and insurance status",
            ]);
        }
        (LeadCategory::Hot, _) => {
            let industry = form
                .business_type
                .map(|business| business.industry_name())
                .unwrap_or("Business");
            result.headline = "Perfect! You're exactly who we built Yoonet for".to_string();
            result.body = hot_body(industry);
            result.recommendations = strings(&[
                "Prepare a list of your most time-consuming tasks",
                "Think about your ideal team structure",
                "Consider which processes you want to delegate first",
            ]);
            result.cta_text = Some("Book Your Strategy Call".to_string());
            result.cta_action = CtaAction::Calendar;
        }
        (LeadCategory::Warm, _) => {
            result.headline = "Great match! Let's explore how we can help".to_string();
            result.body = WARM_BODY.to_string();
            result.recommendations = strings(&[
                "Review our case studies for similar businesses",
                "Calculate your potential time savings",
                "Consider starting with a pilot program",
            ]);
            result.cta_text = Some("Get Your Custom Proposal".to_string());
            result.cta_action = CtaAction::Proposal;
        }
        (LeadCategory::Nurture, _) => {
            result.headline = "Let's make sure you choose the right partner".to_string();
            result.body = NURTURE_BODY.to_string();
            result.recommendations = strings(&[
                "Download: \"Why Paying $500/month More Saves You $50,000/year\"",
                "Read our Balanga community impact report",
                "Schedule a no-pressure consultation when ready",
            ]);
            result.cta_text = Some("Download Our Free Guide".to_string());
            result.cta_action = CtaAction::Download;
        }
    }

    result
}
