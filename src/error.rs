use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EconError {
    /// The fee formula divides and takes logs by the base price.
    #[error("base price must be positive, got {0}")]
    InvalidBasePrice(i64),

    #[error("sell price must be non-negative, got {0}")]
    InvalidSellPrice(i64),

    /// Catalog construction found two items with the same id.
    #[error("duplicate item id in catalog: {0}")]
    DuplicateItem(String),
}
