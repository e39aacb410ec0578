//! Scale / hold / kill verdict for a running campaign.

use ltv_common::validation::{Checks, Validate, ValidationResult};
use serde::{Deserialize, Serialize};

use crate::numeric::ratio_or;

/// Observed campaign figures and the merchant's ROAS thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignInputs {
    pub spend: f64,
    pub revenue: f64,
    pub target_roas: f64,
    pub breakeven_roas: f64,
}

impl CampaignInputs {
    /// Revenue per ad dollar; 0 with no spend.
    pub fn current_roas(&self) -> f64 {
        ratio_or(self.revenue, self.spend, 0.0)
    }
}

impl Validate for CampaignInputs {
    fn validate(&self) -> ValidationResult<()> {
        Checks::new()
            .positive("spend", self.spend)
            .positive("revenue", self.revenue)
            .positive("target_roas", self.target_roas)
            .positive("breakeven_roas", self.breakeven_roas)
            .finish()
    }
}

/// What to do with the campaign budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CampaignLevel {
    Scale,
    Cautious,
    Kill,
}

impl std::fmt::Display for CampaignLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Scale => write!(f, "scale"),
            Self::Cautious => write!(f, "cautious"),
            Self::Kill => write!(f, "kill"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignVerdict {
    pub current_roas: f64,
    pub level: CampaignLevel,
    pub title: String,
    pub description: String,
    /// Scalability score, 0-100
    pub score: u8,
}

/// Classify a campaign against its break-even and target ROAS.
///
/// Below break-even always wins over above-target, so a misconfigured target
/// lower than break-even still kills losing campaigns.
pub fn evaluate_campaign(inputs: &CampaignInputs) -> CampaignVerdict {
    let current_roas = inputs.current_roas();

    let (level, title, description, score) = if current_roas < inputs.breakeven_roas {
        (
            CampaignLevel::Kill,
            "Kill or fix immediately",
            "This campaign is below break-even. Pause it or fix the offer/creative before \
             spending more.",
            10,
        )
    } else if current_roas >= inputs.target_roas {
        (
            CampaignLevel::Scale,
            "SCALE AGGRESSIVELY",
            "Your ROAS is strong and above target. Increase budget in 20–30% steps while \
             watching performance.",
            95,
        )
    } else {
        (
            CampaignLevel::Cautious,
            "Hold & monitor",
            "Your ROAS is okay but not amazing. Make smaller budget moves and monitor \
             performance closely.",
            50,
        )
    };

    tracing::debug!(current_roas, %level, "Evaluated campaign");

    CampaignVerdict {
        current_roas,
        level,
        title: title.to_string(),
        description: description.to_string(),
        score,
    }
}

/// Projected outcome of a budget increase at the current ROAS.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalingScenario {
    pub factor: f64,
    pub new_spend: f64,
    pub projected_revenue: f64,
}

pub fn scaling_scenarios(spend: f64, current_roas: f64, factors: &[f64]) -> Vec<ScalingScenario> {
    factors
        .iter()
        .map(|&factor| {
            let new_spend = spend * factor;
            ScalingScenario {
                factor,
                new_spend,
                projected_revenue: current_roas * new_spend,
            }
        })
        .collect()
}
