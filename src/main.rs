use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use log::{info, warn};

use tarkov_econ::model::{EconomicsResult, RecipeKind};
use tarkov_econ::recipes::{aggregate_all, AggregateOptions};
use tarkov_econ::{loader, Catalog};

#[derive(Debug, Parser)]
#[command(name = "tarkov_econ", about = "Rank Tarkov barters and crafts by profitability")]
struct Args {
    /// Catalog JSON (items plus flea-market fee rates)
    #[arg(long, default_value = "data/catalog.json")]
    catalog: PathBuf,

    /// Recipes JSON (crafts and barters)
    #[arg(long, default_value = "data/recipes.json")]
    recipes: PathBuf,

    /// Exclude the flea market as a sale/acquisition channel
    #[arg(long)]
    no_flea: bool,

    /// Price consumed-fuel inputs at zero
    #[arg(long)]
    free_fuel: bool,

    /// Trader loyalty level, e.g. --trader-level Therapist=4 (repeatable)
    #[arg(long = "trader-level", value_parser = parse_trader_level)]
    trader_levels: Vec<(String, u32)>,

    /// Rows to print per table
    #[arg(long, default_value_t = 25)]
    limit: usize,

    /// Emit the full result set as JSON instead of tables
    #[arg(long)]
    json: bool,
}

fn parse_trader_level(s: &str) -> Result<(String, u32), String> {
    let (name, level) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=LEVEL, got '{s}'"))?;
    let level = level
        .parse()
        .map_err(|_| format!("invalid loyalty level in '{s}'"))?;
    Ok((name.to_string(), level))
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let catalog = loader::load_catalog(&args.catalog)?;
    let recipes = loader::load_recipes(&args.recipes)?;
    info!("loaded {} items, {} recipes", catalog.len(), recipes.len());

    let trader_levels: HashMap<String, u32> = args.trader_levels.iter().cloned().collect();
    let opts = AggregateOptions {
        include_flea: !args.no_flea,
        free_fuel: args.free_fuel,
        trader_levels: (!trader_levels.is_empty()).then_some(&trader_levels),
        custom_prices: None,
        fee_rates: catalog.fee_rates(),
    };

    let result = aggregate_all(&recipes, &catalog, &opts);
    if result.skipped > 0 {
        warn!(
            "{} recipes skipped (unresolvable input or missing reward item)",
            result.skipped
        );
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    let crafts: Vec<&EconomicsResult> = result
        .rows
        .iter()
        .filter(|r| r.kind == RecipeKind::Craft)
        .collect();
    let barters: Vec<&EconomicsResult> = result
        .rows
        .iter()
        .filter(|r| r.kind == RecipeKind::Barter)
        .collect();

    print_table("CRAFTS", &crafts, &catalog, args.limit);
    print_table("BARTERS", &barters, &catalog, args.limit);
    Ok(())
}

fn print_table(title: &str, rows: &[&EconomicsResult], catalog: &Catalog, limit: usize) {
    println!("\n=== {title} ({} shown of {}) ===", rows.len().min(limit), rows.len());
    println!(
        "{:<38} {:<16} {:>12} {:<16} {:>12} {:>12}",
        "Reward", "Station", "Cost", "Sell to", "Profit", "Profit/hr"
    );
    for row in rows.iter().take(limit) {
        let name = catalog
            .item(&row.reward.item_id)
            .map(|i| i.name.as_str())
            .unwrap_or(row.reward.item_id.as_str());
        let sell_to = if row.reward.barter_only {
            "(barter only)"
        } else {
            row.reward.sell_to.as_deref().unwrap_or("-")
        };
        let profit_per_hour = row
            .profit_per_hour
            .map(|p| p.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<38} {:<16} {:>12} {:<16} {:>12} {:>12}",
            truncate(name, 38),
            truncate(&row.station, 16),
            row.total_cost,
            sell_to,
            row.profit,
            profit_per_hour
        );
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}
