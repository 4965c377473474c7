//! Flea market listing fee.
//!
//! Mirrors the in-game progressive fee: listing far above an item's base
//! price is taxed super-linearly, listing at base price costs the flat
//! `sell_offer + sell_requirement` fraction.

use serde::{Deserialize, Serialize};

use crate::error::EconError;

/// Economy tuning constants, sourced from the game-meta record of the
/// catalog. Defaults apply when the record is absent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeeRates {
    #[serde(rename = "sellOfferFeeRate", default = "default_rate")]
    pub sell_offer: f64,
    #[serde(rename = "sellRequirementFeeRate", default = "default_rate")]
    pub sell_requirement: f64,
}

fn default_rate() -> f64 {
    0.05
}

impl Default for FeeRates {
    fn default() -> Self {
        FeeRates {
            sell_offer: default_rate(),
            sell_requirement: default_rate(),
        }
    }
}

/// Fee for listing `count` units at `sell_price` given the item's
/// `base_price`:
///
/// ```text
/// P0 = log10(V0 / VR)    raised to 1.08 when VR <  V0
/// PR = log10(VR / V0)    raised to 1.08 when VR >= V0
/// fee = ceil(V0*Ti*4^P0*count + VR*Tr*4^PR*count)
/// ```
///
/// A `sell_price` of 0 (item not currently listed) is valued at the base
/// price. `base_price <= 0` and negative sell prices are rejected rather
/// than clamped, so no NaN ever leaves this function.
pub fn flea_market_fee(
    base_price: i64,
    sell_price: i64,
    count: u32,
    rates: FeeRates,
) -> Result<i64, EconError> {
    if base_price <= 0 {
        return Err(EconError::InvalidBasePrice(base_price));
    }
    if sell_price < 0 {
        return Err(EconError::InvalidSellPrice(sell_price));
    }

    let v0 = base_price as f64;
    let vr = if sell_price == 0 { v0 } else { sell_price as f64 };
    let count = f64::from(count);

    let mut p0 = (v0 / vr).log10();
    let mut pr = (vr / v0).log10();
    // Only the non-negative log is raised, so powf never sees a negative base.
    if vr < v0 {
        p0 = p0.powf(1.08);
    } else {
        pr = pr.powf(1.08);
    }

    let fee = v0 * rates.sell_offer * 4f64.powf(p0) * count
        + vr * rates.sell_requirement * 4f64.powf(pr) * count;

    Ok(fee.ceil() as i64)
}

/// Single unit at the default 5%/5% rates.
pub fn flea_market_fee_default(base_price: i64, sell_price: i64) -> Result<i64, EconError> {
    flea_market_fee(base_price, sell_price, 1, FeeRates::default())
}
