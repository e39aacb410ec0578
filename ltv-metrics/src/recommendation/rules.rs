//! The recommendation rule table.
//!
//! Rules are independent: each has a predicate over [`StoreMetrics`] and a
//! producer for the recommendations it contributes. They are evaluated in
//! table order and never look at each other's output.
//!
//! | Rule                | Condition                         | Adds                                   |
//! |---------------------|-----------------------------------|----------------------------------------|
//! | LowAovLowRepeat     | AOV < 40 and repeat < 20          | SUBSCRIPTION (HIGH), BUNDLE (HIGH)     |
//! | MidAovLowRepeat     | 40 <= AOV < 70 and repeat < 25    | LOYALTY (HIGH), RETENTION (MEDIUM)     |
//! | HighAov             | AOV >= 70                         | UPSELL (CRITICAL), CROSS_SELL (HIGH)   |
//! | StrongRepeat        | repeat >= 25                      | LOYALTY (MEDIUM), UPSELL (MEDIUM)      |
//! | LowRevenue          | monthly revenue < 10,000          | BUNDLE (CRITICAL)                      |
//! | BeautyNiche         | niche has "beauty" / "cosmetic"   | SUBSCRIPTION (HIGH)                    |
//! | ConsumableNiche     | niche has "food" / "supplement"   | SUBSCRIPTION (CRITICAL)                |
//! | FashionNiche        | niche has "fashion" / "apparel"   | CROSS_SELL (HIGH)                      |

use serde::{Deserialize, Serialize};

use super::types::{Priority, Recommendation, RecommendationType};
use crate::numeric::to_fixed;
use crate::store::StoreMetrics;

/// Identifies a rule in [`RULES`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RuleId {
    LowAovLowRepeat,
    MidAovLowRepeat,
    HighAov,
    StrongRepeat,
    LowRevenue,
    BeautyNiche,
    ConsumableNiche,
    FashionNiche,
}

/// A predicate paired with the recommendations it produces.
pub struct Rule {
    pub id: RuleId,
    pub applies: fn(&StoreMetrics) -> bool,
    pub produce: fn(&StoreMetrics) -> Vec<Recommendation>,
}

impl Rule {
    /// Recommendations this rule contributes for `metrics`, if any.
    pub fn evaluate(&self, metrics: &StoreMetrics) -> Vec<Recommendation> {
        if (self.applies)(metrics) {
            (self.produce)(metrics)
        } else {
            Vec::new()
        }
    }
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule").field("id", &self.id).finish()
    }
}

/// All rules, in evaluation order. Entries follow `RuleId` declaration order.
pub static RULES: [Rule; 8] = [
    Rule {
        id: RuleId::LowAovLowRepeat,
        applies: is_low_aov_low_repeat,
        produce: low_aov_low_repeat,
    },
    Rule {
        id: RuleId::MidAovLowRepeat,
        applies: is_mid_aov_low_repeat,
        produce: mid_aov_low_repeat,
    },
    Rule {
        id: RuleId::HighAov,
        applies: is_high_aov,
        produce: high_aov,
    },
    Rule {
        id: RuleId::StrongRepeat,
        applies: is_strong_repeat,
        produce: strong_repeat,
    },
    Rule {
        id: RuleId::LowRevenue,
        applies: is_low_revenue,
        produce: low_revenue,
    },
    Rule {
        id: RuleId::BeautyNiche,
        applies: is_beauty_niche,
        produce: beauty_niche,
    },
    Rule {
        id: RuleId::ConsumableNiche,
        applies: is_consumable_niche,
        produce: consumable_niche,
    },
    Rule {
        id: RuleId::FashionNiche,
        applies: is_fashion_niche,
        produce: fashion_niche,
    },
];

/// Look up a rule by id.
pub fn rule(id: RuleId) -> &'static Rule {
    &RULES[id as usize]
}

fn is_low_aov_low_repeat(m: &StoreMetrics) -> bool {
    m.aov < 40.0 && m.repeat_rate < 20.0
}

fn is_mid_aov_low_repeat(m: &StoreMetrics) -> bool {
    m.aov >= 40.0 && m.aov < 70.0 && m.repeat_rate < 25.0
}

fn is_high_aov(m: &StoreMetrics) -> bool {
    m.aov >= 70.0
}

fn is_strong_repeat(m: &StoreMetrics) -> bool {
    m.repeat_rate >= 25.0
}

fn is_low_revenue(m: &StoreMetrics) -> bool {
    m.monthly_revenue < 10_000.0
}

fn is_beauty_niche(m: &StoreMetrics) -> bool {
    niche_mentions(&m.niche, &["beauty", "cosmetic"])
}

fn is_consumable_niche(m: &StoreMetrics) -> bool {
    niche_mentions(&m.niche, &["food", "supplement"])
}

fn is_fashion_niche(m: &StoreMetrics) -> bool {
    niche_mentions(&m.niche, &["fashion", "apparel"])
}

/// Case-insensitive substring match against any keyword.
fn niche_mentions(niche: &str, keywords: &[&str]) -> bool {
    let niche = niche.to_lowercase();
    keywords.iter().any(|k| niche.contains(k))
}

fn low_aov_low_repeat(m: &StoreMetrics) -> Vec<Recommendation> {
    vec![
        Recommendation::new(
            RecommendationType::Subscription,
            Priority::High,
            "Launch a Subscribe & Save Program",
            format!(
                "With an AOV of ${} and only {}% repeat customers, implementing a \
                 subscription model with 15-20% discount can dramatically increase LTV. Start \
                 with your top 3 products and offer monthly delivery options.",
                to_fixed(m.aov, 2),
                to_fixed(m.repeat_rate, 1)
            ),
            "+25-40% LTV",
        ),
        Recommendation::new(
            RecommendationType::Bundle,
            Priority::High,
            "Create Product Bundles to Increase AOV",
            "Bundle complementary products together at a 10-15% discount. This increases your \
             average order value while providing perceived value to customers. Target bundles \
             that push AOV above $50.",
            "+$15-25 AOV",
        ),
    ]
}

fn mid_aov_low_repeat(_: &StoreMetrics) -> Vec<Recommendation> {
    vec![
        Recommendation::new(
            RecommendationType::Loyalty,
            Priority::High,
            "Implement a Points-Based Loyalty Program",
            "Your customers are spending decent amounts but not returning. Launch a loyalty \
             program offering 1 point per $1 spent, with rewards at 100, 250, and 500 points. \
             This incentivizes repeat purchases.",
            "+15-20% repeat rate",
        ),
        Recommendation::new(
            RecommendationType::Retention,
            Priority::Medium,
            "Set Up Win-Back Email Campaigns",
            "Create automated email sequences for customers who haven't purchased in 30, 60, \
             and 90 days. Offer exclusive discounts (10-15%) to bring them back.",
            "+10-15% LTV",
        ),
    ]
}

fn high_aov(m: &StoreMetrics) -> Vec<Recommendation> {
    vec![
        Recommendation::new(
            RecommendationType::Upsell,
            Priority::Critical,
            "Add Post-Purchase One-Click Upsells",
            format!(
                "With a high AOV of ${}, your customers are willing to spend. Implement \
                 post-purchase upsells offering complementary products at 20-30% off immediately \
                 after checkout. This can add $15-30 per order.",
                to_fixed(m.aov, 2)
            ),
            "+$20-35 AOV",
        ),
        Recommendation::new(
            RecommendationType::CrossSell,
            Priority::High,
            "Optimize Product Page Cross-Sells",
            "Add \"Frequently Bought Together\" sections on your product pages. Use AI to \
             recommend complementary products that increase cart value by 20-40%.",
            "+$25-40 AOV",
        ),
    ]
}

fn strong_repeat(m: &StoreMetrics) -> Vec<Recommendation> {
    vec![
        Recommendation::new(
            RecommendationType::Loyalty,
            Priority::Medium,
            "Launch VIP Tier for Top Customers",
            format!(
                "With {}% repeat customers, create a VIP program for customers who've made 3+ \
                 purchases. Offer exclusive perks, early access, and special discounts to \
                 increase retention.",
                to_fixed(m.repeat_rate, 1)
            ),
            "+10-15% LTV",
        ),
        Recommendation::new(
            RecommendationType::Upsell,
            Priority::Medium,
            "Create Exclusive Bundles for Repeat Customers",
            "Your repeat customers trust you. Offer them exclusive premium bundles or limited \
             edition products at a slight premium to maximize revenue from your best customers.",
            "+$10-20 AOV",
        ),
    ]
}

fn low_revenue(_: &StoreMetrics) -> Vec<Recommendation> {
    vec![Recommendation::new(
        RecommendationType::Bundle,
        Priority::Critical,
        "Quick Win: BOGO on Best-Selling Product",
        "Test a Buy One Get One 50% Off promotion on your top seller for 7 days. This low-risk \
         strategy can quickly increase AOV and introduce customers to multiple products.",
        "+30-50% revenue",
    )]
}

fn beauty_niche(_: &StoreMetrics) -> Vec<Recommendation> {
    vec![Recommendation::new(
        RecommendationType::Subscription,
        Priority::High,
        "Beauty Box Subscription Model",
        "Beauty products are perfect for subscriptions. Create a monthly beauty box with 3-5 \
         sample or full-size products. Price it at $25-35/month for predictable recurring \
         revenue.",
        "+50-80% LTV",
    )]
}

fn consumable_niche(_: &StoreMetrics) -> Vec<Recommendation> {
    vec![Recommendation::new(
        RecommendationType::Subscription,
        Priority::Critical,
        "Auto-Replenishment Program",
        "Consumable products are ideal for auto-replenishment. Offer customers the option to \
         receive products every 30, 60, or 90 days at a 15% discount.",
        "+60-100% LTV",
    )]
}

fn fashion_niche(_: &StoreMetrics) -> Vec<Recommendation> {
    vec![Recommendation::new(
        RecommendationType::CrossSell,
        Priority::High,
        "Complete-the-Look Recommendations",
        "Add \"Complete the Look\" sections showing full outfit combinations. This increases \
         units per transaction and AOV significantly in fashion.",
        "+$30-50 AOV",
    )]
}

/// Added when the rules produce fewer than [`MIN_RECOMMENDATIONS`](super::MIN_RECOMMENDATIONS).
pub fn post_purchase_sequence() -> Recommendation {
    Recommendation::new(
        RecommendationType::Retention,
        Priority::Medium,
        "Launch Post-Purchase Email Sequence",
        "Create a 5-email sequence over 30 days: Thank you → Product tips → Review request → \
         Related products → Exclusive offer. This nurtures customers and drives repeat \
         purchases.",
        "+8-12% repeat rate",
    )
}
