//! Catalog and recipe loading from the JSON documents the upstream API
//! serves (camelCase field names throughout).

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::catalog::Catalog;
use crate::fees::FeeRates;
use crate::model::{Item, Recipe};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CatalogFile {
    items: Vec<Item>,
    /// Game-meta economy constants; defaults apply when absent.
    #[serde(default)]
    flea_market: Option<FeeRates>,
}

pub fn parse_catalog(json: &str) -> Result<Catalog> {
    let file: CatalogFile = serde_json::from_str(json).context("parsing catalog JSON")?;
    let rates = file.flea_market.unwrap_or_default();
    Ok(Catalog::with_fee_rates(file.items, rates)?)
}

pub fn parse_recipes(json: &str) -> Result<Vec<Recipe>> {
    serde_json::from_str(json).context("parsing recipes JSON")
}

pub fn load_catalog(path: &Path) -> Result<Catalog> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading catalog file {}", path.display()))?;
    parse_catalog(&raw).with_context(|| format!("in catalog file {}", path.display()))
}

pub fn load_recipes(path: &Path) -> Result<Vec<Recipe>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading recipes file {}", path.display()))?;
    parse_recipes(&raw).with_context(|| format!("in recipes file {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_minimal_catalog_with_defaults() {
        let catalog = parse_catalog(
            r#"{
                "items": [
                    {"id": "a", "name": "Alpha", "basePrice": 1000}
                ]
            }"#,
        )
        .unwrap();
        let item = catalog.item("a").unwrap();
        assert_eq!(item.last_low_price, 0);
        assert_eq!(item.slots, 1);
        assert!(item.sell_channels.is_empty());
        assert_eq!(catalog.fee_rates().sell_offer, 0.05);
    }

    #[test]
    fn reads_fee_rates_from_game_meta() {
        let catalog = parse_catalog(
            r#"{
                "items": [],
                "fleaMarket": {"sellOfferFeeRate": 0.03, "sellRequirementFeeRate": 0.1}
            }"#,
        )
        .unwrap();
        assert_eq!(catalog.fee_rates().sell_offer, 0.03);
        assert_eq!(catalog.fee_rates().sell_requirement, 0.1);
    }

    #[test]
    fn duplicate_item_ids_fail_to_load() {
        let err = parse_catalog(
            r#"{
                "items": [
                    {"id": "a", "name": "Alpha", "basePrice": 1000},
                    {"id": "a", "name": "Alpha again", "basePrice": 2000}
                ]
            }"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("duplicate item id"));
    }

    #[test]
    fn parses_recipes_with_optional_fields() {
        let recipes = parse_recipes(
            r#"[
                {
                    "id": "craft-1",
                    "kind": "craft",
                    "station": "Lavatory",
                    "inputs": [{"itemId": "a", "count": 2, "fuel": true}],
                    "reward": {"itemId": "b", "count": 1},
                    "durationSeconds": 3600
                },
                {
                    "id": "barter-1",
                    "kind": "barter",
                    "inputs": [{"itemId": "a", "count": 1}],
                    "reward": {"itemId": "b", "count": 2}
                }
            ]"#,
        )
        .unwrap();
        assert_eq!(recipes.len(), 2);
        assert!(recipes[0].inputs[0].fuel);
        assert_eq!(recipes[0].duration_seconds, Some(3_600));
        assert_eq!(recipes[1].station, "");
        assert_eq!(recipes[1].duration_seconds, None);
    }
}
