//! Stock market par points.
//!
//! Only the par row of the market matters to the core: city corporations
//! are parred from it during setup and `par_prices` filters it per
//! corporation type. The full price ladder lives elsewhere.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::config::{GameConfig, ParKind};
use crate::corporations::Corporation;

/// A share price cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharePrice {
    /// Price per 10% share.
    pub price: i64,
    /// Par group, `None` for ordinary market cells.
    pub kind: Option<ParKind>,
}

impl SharePrice {
    /// A par point of the given kind.
    #[must_use]
    pub const fn par(price: i64, kind: ParKind) -> Self {
        Self {
            price,
            kind: Some(kind),
        }
    }
}

/// Stock market collaborator.
pub trait StockMarket {
    /// Price points eligible for an initial par.
    fn par_prices(&self) -> &[SharePrice];

    /// Registered color name for a price cell.
    fn color_for(&self, price: &SharePrice) -> Option<&str>;

    /// Set a corporation's par; the share price starts at par.
    fn set_par(&self, corporation: &mut Corporation, price: SharePrice) {
        corporation.par_price = Some(price);
        corporation.share_price = Some(price);
    }
}

/// Market consisting of the configured par points.
#[derive(Clone, Debug)]
pub struct ParMarket {
    par_prices: Vec<SharePrice>,
    colors: BTreeMap<ParKind, String>,
}

impl ParMarket {
    /// Build from the configured par points and market colors.
    #[must_use]
    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            par_prices: config
                .par_points
                .iter()
                .map(|p| SharePrice::par(p.price, p.kind))
                .collect(),
            colors: config.market_colors.clone(),
        }
    }

    /// The par point with exactly this price.
    #[must_use]
    pub fn find_par(&self, price: i64) -> Option<SharePrice> {
        self.par_prices.iter().copied().find(|p| p.price == price)
    }
}

impl StockMarket for ParMarket {
    fn par_prices(&self) -> &[SharePrice] {
        &self.par_prices
    }

    fn color_for(&self, price: &SharePrice) -> Option<&str> {
        price
            .kind
            .and_then(|kind| self.colors.get(&kind))
            .map(String::as_str)
    }
}
