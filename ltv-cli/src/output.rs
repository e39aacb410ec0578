//! Rendering of calculator results for the terminal.
//!
//! Every command can print either pretty JSON (the serde shape of the result
//! types) or a short human-readable report built from the display helpers in
//! [`ltv_metrics::format`].

use std::fmt::Write as _;

use clap::ValueEnum;
use serde::Serialize;

use ltv_metrics::format::{format_currency, format_multiplier, format_percentage};
use ltv_metrics::{
    AdsCalculatorResults, BundleTierResult, CampaignVerdict, CreativeResult, DashboardSummary,
    PnlResult, Recommendation, ScalingScenario,
};

/// Output format selected with `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Pretty JSON for any serializable result.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

pub fn recommendations(recs: &[Recommendation]) -> String {
    let mut out = String::new();
    for (i, rec) in recs.iter().enumerate() {
        let _ = writeln!(out, "{}. [{}] {} ({})", i + 1, rec.priority, rec.title, rec.kind);
        let _ = writeln!(out, "   {}", rec.description);
        let _ = writeln!(out, "   Impact: {}", rec.estimated_impact);
    }
    out
}

pub fn pnl(result: &PnlResult) -> String {
    let rows = [
        ("Revenue", format_currency(result.monthly_revenue)),
        ("COGS", format_currency(result.cogs)),
        ("Gross profit", format_currency(result.gross_profit)),
        ("Ad spend", format_currency(result.ad_spend)),
        ("Operating expenses", format_currency(result.operating_expenses)),
        ("Net profit", format_currency(result.net_profit)),
        ("Net margin", format_percentage(result.net_profit_margin)),
    ];
    let mut out = table(&rows);
    let status = if result.is_profitable() {
        "Profitable"
    } else {
        "Not profitable"
    };
    let _ = writeln!(out, "{status}");
    out
}

pub fn ads(result: &AdsCalculatorResults) -> String {
    let rows = [
        ("LTV", format_currency(result.ltv)),
        ("Gross profit per customer", format_currency(result.gross_profit_per_customer)),
        ("Max profitable CAC", format_currency(result.max_profitable_cac)),
        ("Target CAC", format_currency(result.target_cac)),
        ("Max scalable ad spend", format_currency(result.max_scalable_ad_spend)),
        ("LTV:CAC", format_multiplier(result.current_ltv_cac_ratio)),
        ("Scalable", if result.is_scalable { "yes" } else { "no" }.to_string()),
    ];
    let mut out = table(&rows);
    let _ = writeln!(out, "\n{}", result.scaling_recommendation);
    out
}

pub fn campaign(verdict: &CampaignVerdict, scenarios: &[ScalingScenario]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} (score {}/100, ROAS {})",
        verdict.title,
        verdict.score,
        format_multiplier(verdict.current_roas)
    );
    let _ = writeln!(out, "{}", verdict.description);
    if !scenarios.is_empty() {
        let _ = writeln!(out, "\nScaling scenarios:");
        for s in scenarios {
            let _ = writeln!(
                out,
                "  {:>4}  spend {:>12}  revenue {:>12}",
                format_multiplier(s.factor),
                format_currency(s.new_spend),
                format_currency(s.projected_revenue)
            );
        }
    }
    out
}

pub fn bundle(results: &[BundleTierResult]) -> String {
    let mut out = String::new();
    for r in results {
        let _ = writeln!(
            out,
            "{}: {} units at {}% off -> {} (profit {}, margin {}%)",
            r.name,
            r.quantity,
            r.discount_percent,
            format_currency(r.final_price),
            format_currency(r.profit),
            r.margin
        );
    }
    out
}

pub fn creatives(results: &[CreativeResult], top: &[CreativeResult], kill: &[&CreativeResult]) -> String {
    let mut out = String::new();
    for r in results {
        let marker = if r.is_profitable { "+" } else { "-" };
        let _ = writeln!(
            out,
            "{marker} {}: ROAS {} (break-even {}), profit {}, CTR {}, CPC {}",
            r.data.name,
            format_multiplier(r.roas),
            format_multiplier(r.breakeven_roas),
            format_currency(r.profit),
            format_percentage(r.ctr),
            format_currency(r.cpc)
        );
    }
    let _ = writeln!(out, "\nTop performers: {}", join_names(top.iter()));
    if !kill.is_empty() {
        let _ = writeln!(out, "Kill list: {}", join_names(kill.iter().copied()));
    }
    out
}

fn join_names<'a>(items: impl Iterator<Item = &'a CreativeResult>) -> String {
    items.map(|r| r.data.name.as_str()).collect::<Vec<_>>().join(", ")
}

pub fn summary(summary: &DashboardSummary) -> String {
    let rows = [
        ("AOV", format_currency(summary.aov)),
        ("Monthly revenue", format_currency(summary.monthly_revenue)),
        ("Repeat rate", format_percentage(summary.repeat_rate)),
        ("LTV", format_currency(summary.ltv)),
        ("Target MER", format_multiplier(summary.target_mer)),
    ];
    table(&rows)
}

fn table(rows: &[(&str, String)]) -> String {
    let width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
    rows.iter().fold(String::new(), |mut out, (label, value)| {
        let _ = writeln!(out, "{label:<width$}  {value}");
        out
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ltv_metrics::{calculate_pnl, PnlInputs};

    #[test]
    fn test_pnl_text() {
        let result = calculate_pnl(&PnlInputs {
            gross_margin_percentage: 60.0,
            monthly_ad_spend: 5_000.0,
            monthly_operating_expenses: 3_000.0,
            monthly_revenue: 20_000.0,
        });
        let text = pnl(&result);
        assert!(text.contains("Net profit          $4,000.00"));
        assert!(text.contains("Net margin          20.0%"));
        assert!(text.ends_with("Profitable\n"));
    }

    #[test]
    fn test_table_aligns_labels() {
        let text = table(&[("A", "1".into()), ("Longer", "2".into())]);
        assert_eq!(text, "A       1\nLonger  2\n");
    }
}
