//! Narrow interfaces to the game's external collaborators.
//!
//! The orchestration core never looks inside the stock market, the map, the
//! train depot, the bank or the currency formatter. It talks to them through
//! the traits in this module. Each trait comes with a small in-crate
//! implementation that is good enough to set up and run the round sequence.

pub mod bank;
pub mod currency;
pub mod depot;
pub mod map;
pub mod market;

pub use bank::{Bank, CashHolder};
pub use currency::{CurrencyFormat, FormatStr};
pub use depot::{Depot, Train, TrainDepot};
pub use map::{GameMap, TokenError, TokenMap};
pub use market::{ParMarket, SharePrice, StockMarket};
