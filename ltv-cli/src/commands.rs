//! Command handlers for `ltvboost`.
//!
//! Each handler validates its inputs, runs one calculator and renders the
//! result. Handlers return the rendered text instead of printing so they can
//! be exercised directly from tests.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use serde::de::DeserializeOwned;

use ltv_common::{Config, Validate};
use ltv_metrics::{
    evaluate_campaign, generate_recommendations, kill_list, scaling_scenarios, sort_by_priority,
    top_performers, AdsCalculatorInputs, AdsScalabilityCalculator, BundlePlan, CampaignInputs,
    CreativeData, CreativeEvaluator, DashboardSummary, PnlCostInputs, StoreMetrics,
};

use crate::output::{self, OutputFormat};

/// Store figures shared by several commands.
#[derive(Args, Debug, Clone)]
pub struct StoreArgs {
    /// Average order value in dollars
    #[arg(long)]
    pub aov: f64,

    /// Monthly revenue in dollars
    #[arg(long)]
    pub revenue: f64,

    /// Repeat customer rate (0-100)
    #[arg(long)]
    pub repeat_rate: f64,

    /// Store niche, e.g. "Beauty & skincare"
    #[arg(long, default_value = "General")]
    pub niche: String,
}

impl From<&StoreArgs> for StoreMetrics {
    fn from(args: &StoreArgs) -> Self {
        StoreMetrics {
            aov: args.aov,
            monthly_revenue: args.revenue,
            repeat_rate: args.repeat_rate,
            niche: args.niche.clone(),
        }
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Generate growth recommendations for a store
    Recommend {
        #[command(flatten)]
        store: StoreArgs,

        /// List the most urgent recommendations first
        #[arg(long)]
        by_priority: bool,
    },

    /// Monthly profit and loss
    Pnl {
        /// Monthly revenue in dollars
        #[arg(long)]
        revenue: f64,

        /// Gross margin (0-100)
        #[arg(long)]
        gross_margin: f64,

        /// Monthly ad spend in dollars
        #[arg(long, default_value = "0")]
        ad_spend: f64,

        /// Monthly operating expenses in dollars
        #[arg(long, default_value = "0")]
        opex: f64,
    },

    /// How far ad spend can scale given LTV
    Ads {
        #[command(flatten)]
        store: StoreArgs,

        /// Gross margin (0-100)
        #[arg(long)]
        gross_margin: f64,

        /// Desired LTV:CAC ratio
        #[arg(long, default_value = "3")]
        target_ratio: f64,

        /// Current monthly ad spend in dollars
        #[arg(long, default_value = "0")]
        ad_spend: f64,

        /// Measured customer acquisition cost, if tracked
        #[arg(long)]
        current_cac: Option<f64>,
    },

    /// Scale, hold or kill a running campaign
    Campaign {
        /// Ad spend in dollars
        #[arg(long)]
        spend: f64,

        /// Attributed revenue in dollars
        #[arg(long)]
        revenue: f64,

        /// ROAS the campaign should reach to scale
        #[arg(long)]
        target_roas: f64,

        /// ROAS at which the campaign stops losing money
        #[arg(long)]
        breakeven_roas: f64,
    },

    /// Price bundle tiers from a JSON plan
    Bundle {
        /// JSON file with base_price, cogs_per_unit and tiers
        #[arg(long)]
        file: PathBuf,
    },

    /// Rank ad creatives from a JSON list
    Creatives {
        /// JSON file with an array of creatives
        #[arg(long)]
        file: PathBuf,

        /// Number of top performers to show (default from config)
        #[arg(long)]
        top: Option<usize>,
    },

    /// Dashboard metric cards for a store
    Summary {
        #[command(flatten)]
        store: StoreArgs,
    },
}

/// Run a command and return its rendered output.
pub fn run(command: &Commands, config: &Config, format: OutputFormat) -> Result<String> {
    match command {
        Commands::Recommend { store, by_priority } => {
            let metrics = validated(StoreMetrics::from(store), "store metrics")?;
            let mut recs = generate_recommendations(&metrics);
            if *by_priority {
                sort_by_priority(&mut recs);
            }
            tracing::info!(count = recs.len(), niche = %metrics.niche, "Generated recommendations");
            render(format, &recs, || output::recommendations(&recs))
        }

        Commands::Pnl {
            revenue,
            gross_margin,
            ad_spend,
            opex,
        } => {
            let costs = validated(
                PnlCostInputs {
                    gross_margin_percentage: *gross_margin,
                    monthly_ad_spend: *ad_spend,
                    monthly_operating_expenses: *opex,
                },
                "P&L inputs",
            )?;
            anyhow::ensure!(*revenue >= 0.0, "revenue must not be negative");
            let result = ltv_metrics::calculate_pnl(&costs.with_revenue(*revenue));
            render(format, &result, || output::pnl(&result))
        }

        Commands::Ads {
            store,
            gross_margin,
            target_ratio,
            ad_spend,
            current_cac,
        } => {
            let inputs = validated(
                AdsCalculatorInputs {
                    store: StoreMetrics::from(store),
                    gross_margin_percentage: *gross_margin,
                    target_ltv_cac_ratio: *target_ratio,
                    current_ad_spend: *ad_spend,
                    current_cac: *current_cac,
                },
                "ads inputs",
            )?;
            let calculator =
                AdsScalabilityCalculator::with_max_ad_spend_share(config.metrics.max_ad_spend_share);
            let result = calculator.calculate(&inputs);
            render(format, &result, || output::ads(&result))
        }

        Commands::Campaign {
            spend,
            revenue,
            target_roas,
            breakeven_roas,
        } => {
            let inputs = validated(
                CampaignInputs {
                    spend: *spend,
                    revenue: *revenue,
                    target_roas: *target_roas,
                    breakeven_roas: *breakeven_roas,
                },
                "campaign inputs",
            )?;
            let verdict = evaluate_campaign(&inputs);
            let scenarios =
                scaling_scenarios(inputs.spend, verdict.current_roas, &config.ads.scaling_factors);
            match format {
                OutputFormat::Json => output::to_json(&serde_json::json!({
                    "verdict": verdict,
                    "scenarios": scenarios,
                })),
                OutputFormat::Text => Ok(output::campaign(&verdict, &scenarios)),
            }
        }

        Commands::Bundle { file } => {
            let plan: BundlePlan = validated(read_json(file)?, "bundle plan")?;
            let results = plan.evaluate();
            render(format, &results, || output::bundle(&results))
        }

        Commands::Creatives { file, top } => {
            let creatives: Vec<CreativeData> = read_json(file)?;
            for creative in &creatives {
                creative
                    .validate()
                    .with_context(|| format!("Invalid creative '{}'", creative.name))?;
            }
            let evaluator = CreativeEvaluator::with_assumed_aov(config.metrics.creative_assumed_aov);
            let results = evaluator.evaluate_all(&creatives);
            let top = top_performers(&results, top.unwrap_or(config.metrics.top_creatives));
            let kill = kill_list(&results);
            match format {
                OutputFormat::Json => output::to_json(&serde_json::json!({
                    "results": results,
                    "top_performers": top,
                    "kill_list": kill,
                })),
                OutputFormat::Text => Ok(output::creatives(&results, top, &kill)),
            }
        }

        Commands::Summary { store } => {
            let metrics = validated(StoreMetrics::from(store), "store metrics")?;
            let summary = DashboardSummary::from_metrics(&metrics);
            render(format, &summary, || output::summary(&summary))
        }
    }
}

fn validated<T: Validate>(value: T, what: &str) -> Result<T> {
    value
        .validate()
        .with_context(|| format!("Invalid {what}"))?;
    Ok(value)
}

fn render<T: serde::Serialize + ?Sized>(
    format: OutputFormat,
    value: &T,
    text: impl FnOnce() -> String,
) -> Result<String> {
    match format {
        OutputFormat::Json => output::to_json(value),
        OutputFormat::Text => Ok(text()),
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
}
