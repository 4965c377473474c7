use serde::{Deserialize, Serialize};

/// A single vendor offer on an item, either a place to sell it
/// (`Item::sell_channels`) or a place to buy it (`Item::buy_channels`).
/// Absent optional fields mean "no restriction", never zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Offer {
    pub vendor: String,
    pub price: i64,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub min_level: Option<u32>,
    #[serde(default)]
    pub task_unlock: Option<String>,
}

fn default_currency() -> String {
    "RUB".to_string()
}

fn default_slots() -> u32 {
    1
}

/// A tradable catalog entry, as normalized from the upstream item API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: String,
    pub name: String,

    /// Intrinsic/handbook value, the fee formula's reference point.
    pub base_price: i64,
    /// Flea reference price; 0 means not currently listed.
    #[serde(default)]
    pub last_low_price: i64,

    /// Inventory footprint, for per-slot price normalization.
    #[serde(default = "default_slots")]
    pub slots: u32,
    /// Upstream category tags. "noFlea" bans the item from the flea market.
    #[serde(default)]
    pub types: Vec<String>,

    #[serde(default)]
    pub sell_channels: Vec<Offer>,
    #[serde(default)]
    pub buy_channels: Vec<Offer>,
}

impl Item {
    pub fn flea_banned(&self) -> bool {
        self.types.iter().any(|t| t == "noFlea")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecipeKind {
    Craft,
    Barter,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeInput {
    pub item_id: String,
    pub count: u32,
    /// Consumed-fuel inputs can be priced at zero via the free-fuel override.
    #[serde(default)]
    pub fuel: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewardItem {
    pub item_id: String,
    pub count: u32,
}

/// A barter or craft definition. `duration_seconds` is present only for
/// crafts, which run at a hideout station over time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: String,
    pub kind: RecipeKind,
    #[serde(default)]
    pub station: String,
    pub inputs: Vec<RecipeInput>,
    pub reward: RewardItem,
    #[serde(default)]
    pub duration_seconds: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Channel {
    Flea,
    Trader(String),
}

/// The winning sale channel for an item. `price` is the gross quote at that
/// channel; `net_price` is after the flea listing fee (equal for traders).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BestChannel {
    pub sell_to: String,
    pub channel: Channel,
    pub price: i64,
    pub net_price: i64,
    pub price_per_slot: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CostLine {
    pub item_id: String,
    pub count: u32,
    pub price: i64,
    pub line_cost: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RewardValue {
    pub item_id: String,
    pub count: u32,
    /// Gross per-unit value at the chosen channel. For barter-only rewards
    /// this is the acquisition cost, not a sale value.
    pub value: i64,
    pub sell_to: Option<String>,
    /// The reward cannot be sold anywhere; the recipe is only a way to
    /// acquire it and is excluded from profit ranking.
    pub barter_only: bool,
}

/// One computed craft/barter row. Derived and transient: recomputed whenever
/// prices or settings change, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EconomicsResult {
    pub recipe_id: String,
    pub kind: RecipeKind,
    pub station: String,

    pub cost_lines: Vec<CostLine>,
    pub total_cost: i64,

    pub reward: RewardValue,
    pub profit: i64,
    pub profit_per_hour: Option<i64>,
}
