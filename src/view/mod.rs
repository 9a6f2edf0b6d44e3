//! Read-only views of a game.

pub mod spreadsheet;

pub use spreadsheet::{CorporationRow, PlayerSummary, Spreadsheet};
