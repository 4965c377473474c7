//! Recipe cost aggregation: total input cost, net profit, and profit-per-hour
//! for barters and crafts, plus the ranked bulk pass backing the tables.

use std::collections::HashMap;

use log::debug;
use rayon::prelude::*;

use crate::catalog::Catalog;
use crate::channels::{resolve_best_channel, ResolveOptions};
use crate::fees::{flea_market_fee, FeeRates};
use crate::model::{Channel, CostLine, EconomicsResult, Item, Recipe, RewardValue};

#[derive(Debug, Clone)]
pub struct AggregateOptions<'a> {
    pub include_flea: bool,
    /// Price consumed-fuel inputs at zero.
    pub free_fuel: bool,
    pub trader_levels: Option<&'a HashMap<String, u32>>,
    /// Per-item flea sell-price overrides from user settings.
    pub custom_prices: Option<&'a HashMap<String, i64>>,
    pub fee_rates: FeeRates,
}

impl Default for AggregateOptions<'_> {
    fn default() -> Self {
        AggregateOptions {
            include_flea: true,
            free_fuel: false,
            trader_levels: None,
            custom_prices: None,
            fee_rates: FeeRates::default(),
        }
    }
}

/// Bulk aggregation outcome. `skipped` counts recipes excluded because an
/// input price or the reward item could not be resolved.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
pub struct Aggregation {
    pub rows: Vec<EconomicsResult>,
    pub skipped: usize,
}

/// Computes one recipe row. `price_of` supplies the acquisition price per
/// input item id; `reward_item` is the catalog entry for the reward.
///
/// Returns `None` when any non-free input has no resolvable price or the
/// reward item is unknown; such recipes are excluded rather than erroring so
/// a partial table can still be rendered. Inputs are never mutated.
pub fn aggregate_recipe<F>(
    recipe: &Recipe,
    price_of: F,
    reward_item: Option<&Item>,
    opts: &AggregateOptions,
) -> Option<EconomicsResult>
where
    F: Fn(&str) -> Option<i64>,
{
    let mut cost_lines = Vec::with_capacity(recipe.inputs.len());
    let mut total_cost: i64 = 0;
    for input in &recipe.inputs {
        let price = if input.fuel && opts.free_fuel {
            0
        } else {
            match price_of(&input.item_id) {
                Some(price) => price,
                None => {
                    debug!(
                        "recipe {}: no resolvable price for input {}, excluding",
                        recipe.id, input.item_id
                    );
                    return None;
                }
            }
        };
        let line_cost = price * i64::from(input.count);
        total_cost += line_cost;
        cost_lines.push(CostLine {
            item_id: input.item_id.clone(),
            count: input.count,
            price,
            line_cost,
        });
    }

    let reward_item = match reward_item {
        Some(item) => item,
        None => {
            debug!(
                "recipe {}: reward item {} not in catalog, excluding",
                recipe.id, recipe.reward.item_id
            );
            return None;
        }
    };

    let resolve_opts = ResolveOptions {
        include_flea: opts.include_flea,
        custom_price: opts
            .custom_prices
            .and_then(|m| m.get(&recipe.reward.item_id).copied()),
        trader_levels: opts.trader_levels,
        fee_rates: opts.fee_rates,
    };
    let reward_count = i64::from(recipe.reward.count);

    let (reward, profit) = match resolve_best_channel(reward_item, &resolve_opts) {
        None => {
            // Not sellable anywhere: the recipe is only a way to acquire the
            // item. Valued at cost, kept out of profit ranking.
            let reward = RewardValue {
                item_id: recipe.reward.item_id.clone(),
                count: recipe.reward.count,
                value: total_cost,
                sell_to: None,
                barter_only: true,
            };
            (reward, 0)
        }
        Some(best) => {
            let mut profit = best.price * reward_count - total_cost;
            if best.channel == Channel::Flea {
                // Selling the reward itself incurs the listing fee; the
                // resolver only yields a flea channel for positive base and
                // reference prices, so the fee call cannot fail here.
                let fee = flea_market_fee(
                    reward_item.base_price,
                    best.price,
                    recipe.reward.count,
                    opts.fee_rates,
                )
                .unwrap_or(0);
                profit -= fee;
            }
            let reward = RewardValue {
                item_id: recipe.reward.item_id.clone(),
                count: recipe.reward.count,
                value: best.price,
                sell_to: Some(best.sell_to),
                barter_only: false,
            };
            (reward, profit)
        }
    };

    let profit_per_hour = match recipe.duration_seconds {
        Some(secs) if secs > 0 => Some((profit as f64 / (secs as f64 / 3600.0)).floor() as i64),
        // Zero-duration crafts would divide to infinity; normalized to 0.
        Some(_) => Some(0),
        None => None,
    };

    Some(EconomicsResult {
        recipe_id: recipe.id.clone(),
        kind: recipe.kind,
        station: recipe.station.clone(),
        cost_lines,
        total_cost,
        reward,
        profit,
        profit_per_hour,
    })
}

/// Aggregates every recipe against the catalog's cheapest-acquisition
/// resolver and ranks the results: descending profit, ascending recipe id on
/// ties. Excluded recipes are counted in `skipped`.
pub fn aggregate_all(recipes: &[Recipe], catalog: &Catalog, opts: &AggregateOptions) -> Aggregation {
    let results: Vec<Option<EconomicsResult>> = recipes
        .par_iter()
        .map(|recipe| {
            aggregate_recipe(
                recipe,
                |id| catalog.cheapest_acquisition(id, opts.include_flea),
                catalog.item(&recipe.reward.item_id),
                opts,
            )
        })
        .collect();

    let skipped = results.iter().filter(|r| r.is_none()).count();
    let mut rows: Vec<EconomicsResult> = results.into_iter().flatten().collect();
    rows.sort_by(|a, b| {
        b.profit
            .cmp(&a.profit)
            .then_with(|| a.recipe_id.cmp(&b.recipe_id))
    });

    Aggregation { rows, skipped }
}
