use serde::{Deserialize, Serialize};

/// Wizard position. Stages 1-4 collect answers; `Results` is the terminal view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Stage {
    BusinessProfile,
    IndustryNeeds,
    CulturalFit,
    FinalDetails,
    Results,
}

/// Highest stage reachable through plain advancement.
pub const LAST_QUESTION_STAGE: Stage = Stage::FinalDetails;

impl Stage {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::BusinessProfile,
            Self::IndustryNeeds,
            Self::CulturalFit,
            Self::FinalDetails,
            Self::Results,
        ]
    }

    pub const fn index(self) -> u8 {
        match self {
            Self::BusinessProfile => 1,
            Self::IndustryNeeds => 2,
            Self::CulturalFit => 3,
            Self::FinalDetails => 4,
            Self::Results => 5,
        }
    }

    pub fn from_index(index: u8) -> Option<Self> {
        Self::ordered()
            .into_iter()
            .find(|stage| stage.index() == index)
    }

    pub(crate) fn next(self) -> Self {
        if self >= LAST_QUESTION_STAGE {
            return self;
        }
        Self::from_index(self.index() + 1).unwrap_or(LAST_QUESTION_STAGE)
    }

    pub(crate) fn previous(self) -> Self {
        Self::from_index(self.index().saturating_sub(1)).unwrap_or(Self::BusinessProfile)
    }

    pub const fn progress_label(self) -> &'static str {
        match self {
            Self::BusinessProfile => "Quick Start",
            Self::IndustryNeeds => "Your Needs",
            Self::CulturalFit => "Cultural Fit",
            Self::FinalDetails => "Final Details",
            Self::Results => "Results",
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            Self::BusinessProfile => "Let's get to know your business",
            Self::IndustryNeeds => "Understanding your specific needs",
            Self::CulturalFit => "Finding the right cultural fit",
            Self::FinalDetails => "Final details to perfect your solution",
            Self::Results => "Your personalized recommendation",
        }
    }

    pub const fn subtitle(self) -> &'static str {
        match self {
            Self::BusinessProfile => {
                "This will only take 3 minutes and helps us design the perfect solution for you"
            }
            Self::IndustryNeeds => {
                "Your industry expertise matters - we match you with specialists who understand your world"
            }
            Self::CulturalFit => {
                "We believe in partnerships, not transactions - let's make sure we're aligned"
            }
            Self::FinalDetails => {
                "Almost there! Just a few practical details to finalize your custom solution"
            }
            Self::Results => {
                "Based on your responses, here's how we can transform your business"
            }
        }
    }

    /// Share of the wizard behind the client, rounded to whole percent.
    pub fn progress_percent(self) -> u8 {
        let total = Self::ordered().len() as f32 - 1.0;
        let done = self.index() as f32 - 1.0;
        ((done / total) * 100.0).round() as u8
    }
}

impl From<Stage> for u8 {
    fn from(stage: Stage) -> Self {
        stage.index()
    }
}

impl TryFrom<u8> for Stage {
    type Error = InvalidStage;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Stage::from_index(value).ok_or(InvalidStage(value))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("stage index {0} is outside 1..=5")]
pub struct InvalidStage(pub u8);
