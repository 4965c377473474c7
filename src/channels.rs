//! Best-sale-channel resolution: flea market net of listing fee versus
//! trader offers, honoring the user's settings.

use std::collections::HashMap;

use crate::fees::{flea_market_fee, FeeRates};
use crate::model::{BestChannel, Channel, Item};

pub const FLEA_MARKET: &str = "Flea Market";

#[derive(Debug, Clone)]
pub struct ResolveOptions<'a> {
    /// Consider the flea market as a sale channel at all.
    pub include_flea: bool,
    /// User override for the flea reference price of this item.
    pub custom_price: Option<i64>,
    /// Loyalty level per vendor. Offers gated above the configured level are
    /// excluded; `None` disables gating entirely.
    pub trader_levels: Option<&'a HashMap<String, u32>>,
    pub fee_rates: FeeRates,
}

impl Default for ResolveOptions<'_> {
    fn default() -> Self {
        ResolveOptions {
            include_flea: true,
            custom_price: None,
            trader_levels: None,
            fee_rates: FeeRates::default(),
        }
    }
}

struct Candidate {
    channel: Channel,
    sell_to: String,
    gross: i64,
    net: i64,
}

/// Picks the most profitable place to sell `item`, or `None` when it cannot
/// be sold anywhere under the given options. Ties go to a trader over the
/// flea market; among traders, the earlier offer wins. Never mutates the
/// item.
pub fn resolve_best_channel(item: &Item, opts: &ResolveOptions) -> Option<BestChannel> {
    let mut best: Option<Candidate> = None;

    for offer in &item.sell_channels {
        if let (Some(levels), Some(min_level)) = (opts.trader_levels, offer.min_level) {
            let have = levels.get(&offer.vendor).copied().unwrap_or(1);
            if have < min_level {
                continue;
            }
        }
        // Traders charge no listing fee: gross == net.
        if best.as_ref().map_or(true, |b| offer.price > b.net) {
            best = Some(Candidate {
                channel: Channel::Trader(offer.vendor.clone()),
                sell_to: offer.vendor.clone(),
                gross: offer.price,
                net: offer.price,
            });
        }
    }

    let reference = opts.custom_price.unwrap_or(item.last_low_price);
    if opts.include_flea && reference > 0 && item.base_price > 0 && !item.flea_banned() {
        if let Ok(fee) = flea_market_fee(item.base_price, reference, 1, opts.fee_rates) {
            let net = reference - fee;
            // Strictly greater: a trader keeps the tie.
            if best.as_ref().map_or(true, |b| net > b.net) {
                best = Some(Candidate {
                    channel: Channel::Flea,
                    sell_to: FLEA_MARKET.to_string(),
                    gross: reference,
                    net,
                });
            }
        }
    }

    best.map(|b| {
        let slots = i64::from(item.slots.max(1));
        BestChannel {
            sell_to: b.sell_to,
            channel: b.channel,
            price: b.gross,
            net_price: b.net,
            price_per_slot: b.net.div_euclid(slots),
        }
    })
}
