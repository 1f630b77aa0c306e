use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Prize rank reached by a recommended set, 1st through 5th.
///
/// Serialized as `"1st"`..`"5th"`, the key format used by the draw documents
/// and the generator API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PrizeTier {
    #[serde(rename = "1st")]
    First,
    #[serde(rename = "2nd")]
    Second,
    #[serde(rename = "3rd")]
    Third,
    #[serde(rename = "4th")]
    Fourth,
    #[serde(rename = "5th")]
    Fifth,
}

impl PrizeTier {
    pub const ALL: [PrizeTier; 5] = [
        PrizeTier::First,
        PrizeTier::Second,
        PrizeTier::Third,
        PrizeTier::Fourth,
        PrizeTier::Fifth,
    ];
}

/// Won amount per tier; `None` when no amount was published for the tier.
pub type PrizeTable = BTreeMap<PrizeTier, Option<u64>>;

/// Count of historical draws in which a set reached each tier.
pub type HitTally = BTreeMap<PrizeTier, u32>;

/// Which generator model produced a recommended set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelType {
    Statistical,
    Ml,
}

impl ModelType {
    /// Value of the generator API's `model_type` query parameter.
    pub fn as_query_param(&self) -> &'static str {
        match self {
            ModelType::Statistical => "statistical",
            ModelType::Ml => "ml",
        }
    }
}

/// An official draw result.
///
/// Recorded once through the administrative input path and never mutated.
/// The winning numbers and the bonus number are always disjoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrawResult {
    #[serde(rename = "drawNumber")]
    pub draw_number: u32,
    pub winning_numbers: Vec<u8>,
    pub bonus_number: u8,
    #[serde(default)]
    pub prizes: PrizeTable,
    #[serde(rename = "drawDate", default)]
    pub draw_date: Option<chrono::DateTime<chrono::Utc>>,
}

/// A set of six numbers recommended to a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendedSet {
    #[serde(rename = "$id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(rename = "drawNumber")]
    pub draw_number: u32,
    pub numbers: Vec<u8>,
    #[serde(rename = "modelType")]
    pub model_type: ModelType,
    #[serde(rename = "historicalHitRates", default)]
    pub historical_hit_rates: HitTally,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// Outcome of comparing a recommended set against one draw.
///
/// Derived on demand and recomputed as needed; never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchOutcome {
    /// `None` when the set reached no prize tier.
    pub tier: Option<PrizeTier>,
    #[serde(rename = "matchedCount")]
    pub matched_count: u8,
    #[serde(rename = "bonusMatched")]
    pub bonus_matched: bool,
}
