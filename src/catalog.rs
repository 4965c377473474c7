//! Id-indexed item catalog: acquisition-price lookups for recipe inputs and
//! the whole-catalog best-channel annotation pass.

use std::collections::HashMap;

use rayon::prelude::*;

use crate::channels::{resolve_best_channel, ResolveOptions};
use crate::error::EconError;
use crate::fees::FeeRates;
use crate::model::{BestChannel, Item};

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: HashMap<String, Item>,
    // Insertion order, so bulk passes come back in catalog order.
    order: Vec<String>,
    fee_rates: FeeRates,
}

impl Catalog {
    pub fn new(items: Vec<Item>) -> Result<Self, EconError> {
        Self::with_fee_rates(items, FeeRates::default())
    }

    pub fn with_fee_rates(items: Vec<Item>, fee_rates: FeeRates) -> Result<Self, EconError> {
        let mut map = HashMap::with_capacity(items.len());
        let mut order = Vec::with_capacity(items.len());
        for item in items {
            if map.contains_key(&item.id) {
                return Err(EconError::DuplicateItem(item.id));
            }
            order.push(item.id.clone());
            map.insert(item.id.clone(), item);
        }
        Ok(Catalog {
            items: map,
            order,
            fee_rates,
        })
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn item(&self, id: &str) -> Option<&Item> {
        self.items.get(id)
    }

    pub fn fee_rates(&self) -> FeeRates {
        self.fee_rates
    }

    /// Cheapest way to obtain one unit of `id`: the lowest vendor buy offer,
    /// or the flea reference price when allowed and listed. `None` when the
    /// item is unknown or cannot be acquired at all.
    pub fn cheapest_acquisition(&self, id: &str, include_flea: bool) -> Option<i64> {
        let item = self.items.get(id)?;
        let mut best = item.buy_channels.iter().map(|o| o.price).min();
        if include_flea && item.last_low_price > 0 && !item.flea_banned() {
            best = Some(match best {
                Some(b) => b.min(item.last_low_price),
                None => item.last_low_price,
            });
        }
        best
    }

    /// Resolves the best sale channel for every item in the catalog, in
    /// catalog order. Items with no channel are omitted. This is the
    /// annotation pass the site runs after every catalog fetch.
    pub fn annotate(
        &self,
        opts: &ResolveOptions,
        custom_prices: Option<&HashMap<String, i64>>,
    ) -> Vec<(String, BestChannel)> {
        self.order
            .par_iter()
            .filter_map(|id| {
                let item = &self.items[id];
                let per_item = ResolveOptions {
                    custom_price: custom_prices.and_then(|m| m.get(id).copied()),
                    fee_rates: self.fee_rates,
                    ..opts.clone()
                };
                resolve_best_channel(item, &per_item).map(|best| (id.clone(), best))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Channel, Offer};
    use pretty_assertions::assert_eq;

    fn item(id: &str, base_price: i64, last_low_price: i64) -> Item {
        Item {
            id: id.to_string(),
            name: id.to_uppercase(),
            base_price,
            last_low_price,
            slots: 1,
            types: Vec::new(),
            sell_channels: Vec::new(),
            buy_channels: Vec::new(),
        }
    }

    fn offer(vendor: &str, price: i64) -> Offer {
        Offer {
            vendor: vendor.to_string(),
            price,
            currency: "RUB".to_string(),
            min_level: None,
            task_unlock: None,
        }
    }

    #[test]
    fn rejects_duplicate_ids() {
        let items = vec![item("a", 100, 0), item("a", 200, 0)];
        assert_eq!(
            Catalog::new(items).unwrap_err(),
            EconError::DuplicateItem("a".to_string())
        );
    }

    #[test]
    fn cheapest_acquisition_prefers_lowest_source() {
        let mut a = item("a", 1_000, 800);
        a.buy_channels.push(offer("Therapist", 900));
        a.buy_channels.push(offer("Peacekeeper", 950));
        let catalog = Catalog::new(vec![a]).unwrap();

        assert_eq!(catalog.cheapest_acquisition("a", true), Some(800));
        assert_eq!(catalog.cheapest_acquisition("a", false), Some(900));
    }

    #[test]
    fn cheapest_acquisition_none_when_unobtainable() {
        let catalog = Catalog::new(vec![item("a", 1_000, 0)]).unwrap();
        assert_eq!(catalog.cheapest_acquisition("a", true), None);
        assert_eq!(catalog.cheapest_acquisition("missing", true), None);
    }

    #[test]
    fn flea_ban_excludes_flea_acquisition() {
        let mut a = item("a", 1_000, 800);
        a.types.push("noFlea".to_string());
        let catalog = Catalog::new(vec![a]).unwrap();
        assert_eq!(catalog.cheapest_acquisition("a", true), None);
    }

    #[test]
    fn annotate_keeps_catalog_order_and_skips_valueless_items() {
        let mut a = item("a", 1_000, 0);
        a.sell_channels.push(offer("Prapor", 500));
        let b = item("b", 1_000, 0); // no channel at all
        let mut c = item("c", 1_000, 2_000);
        c.sell_channels.push(offer("Skier", 100));

        let catalog = Catalog::new(vec![a, b, c]).unwrap();
        let annotated = catalog.annotate(&ResolveOptions::default(), None);

        let ids: Vec<&str> = annotated.iter().map(|(id, _)| id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
        assert_eq!(annotated[1].1.channel, Channel::Flea);
    }

    #[test]
    fn annotate_applies_per_item_custom_prices() {
        let a = item("a", 1_000, 2_000);
        let catalog = Catalog::new(vec![a]).unwrap();
        let custom: HashMap<String, i64> = [("a".to_string(), 3_000)].into_iter().collect();
        let annotated = catalog.annotate(&ResolveOptions::default(), Some(&custom));
        assert_eq!(annotated[0].1.price, 3_000);
    }
}
