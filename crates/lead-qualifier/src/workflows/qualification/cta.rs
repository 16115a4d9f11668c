use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::QualificationSettings;

use super::domain::{BusinessType, SessionId, TeamSize};
use super::evaluation::{CtaAction, LeadCategory, QualificationResult};

/// Lead record handed to the proposal collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadSummary {
    pub id: SessionId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_type: Option<BusinessType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_size: Option<TeamSize>,
    pub qualification_score: i32,
    pub category: LeadCategory,
    /// Number of question stages the client has left behind.
    pub stage_completed: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    pub started_at: DateTime<Utc>,
    pub last_active: DateTime<Utc>,
}

/// External collaborators behind each call-to-action. Calls are fire-and-forget.
pub trait CallToActionHandler: Send + Sync {
    fn open_scheduling(&self, url: &str) -> Result<(), CallToActionError>;
    fn trigger_download(&self, guide_id: &str) -> Result<(), CallToActionError>;
    fn request_proposal(&self, lead: &LeadSummary) -> Result<(), CallToActionError>;
}

#[derive(Debug, thiserror::Error)]
pub enum CallToActionError {
    #[error("call-to-action transport unavailable: {0}")]
    Transport(String),
    #[error("no call-to-action is offered for {} leads", category.as_str())]
    NoAction { category: LeadCategory },
}

/// Record of which collaborator was invoked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum CtaDispatch {
    Scheduling { url: String },
    Download { guide_id: String },
    Proposal { lead_id: SessionId },
}

pub fn dispatch<C>(
    handler: &C,
    result: &QualificationResult,
    lead: &LeadSummary,
    settings: &QualificationSettings,
) -> Result<CtaDispatch, CallToActionError>
where
    C: CallToActionHandler + ?Sized,
{
    match result.cta_action {
        CtaAction::Calendar => {
            handler.open_scheduling(&settings.scheduling_url)?;
            Ok(CtaDispatch::Scheduling {
                url: settings.scheduling_url.clone(),
            })
        }
        CtaAction::Download => {
            handler.trigger_download(&settings.guide_id)?;
            Ok(CtaDispatch::Download {
                guide_id: settings.guide_id.clone(),
            })
        }
        CtaAction::Proposal => {
            handler.request_proposal(lead)?;
            Ok(CtaDispatch::Proposal {
                lead_id: lead.id.clone(),
            })
        }
        CtaAction::None => Err(CallToActionError::NoAction {
            category: result.category,
        }),
    }
}
