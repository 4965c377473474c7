//! Flea-market trading economics for an Escape from Tarkov companion tool.
//!
//! Three cooperating pieces, all pure and synchronous:
//! - [`fees`] computes the progressive flea-market listing fee,
//! - [`channels`] picks the most profitable sale channel for an item,
//! - [`recipes`] aggregates barter/craft input costs into ranked profit rows.
//!
//! [`catalog`] indexes items and supplies acquisition prices; [`loader`]
//! reads the JSON documents the upstream API serves. Callers own all data:
//! the engine never retains references across calls and never mutates its
//! arguments, so identical inputs always produce identical results.

pub mod catalog;
pub mod channels;
pub mod error;
pub mod fees;
pub mod loader;
pub mod model;
pub mod recipes;

pub use catalog::Catalog;
pub use channels::{resolve_best_channel, ResolveOptions, FLEA_MARKET};
pub use error::EconError;
pub use fees::{flea_market_fee, flea_market_fee_default, FeeRates};
pub use recipes::{aggregate_all, aggregate_recipe, AggregateOptions, Aggregation};
