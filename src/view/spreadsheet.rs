//! Spreadsheet projection of a game.
//!
//! One row per corporation in canonical order, followed by per-player
//! summary rows (privates, cash, worth, certificates). Amounts are rendered
//! with the game's currency format. `Display` prints a plain-text table.

use std::fmt;

use crate::core::{PlayerId, Shuffler};
use crate::corporations::{Corporation, ShareHolder};
use crate::game::Game;
use crate::interfaces::{CurrencyFormat, StockMarket};

/// One corporation row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CorporationRow {
    /// Corporation name.
    pub name: String,
    /// Hex color of the corporation.
    pub color: String,
    /// Floated flag; unfloated rows are shown greyed out.
    pub floated: bool,
    /// Shares per player, `*` marking the president.
    pub player_shares: Vec<String>,
    /// Shares still in the IPO.
    pub ipo_shares: u32,
    /// Shares in the pool.
    pub pool_shares: u32,
    /// Formatted par price, empty when unparred.
    pub par_price: String,
    /// Formatted market price, empty when unparred.
    pub market_price: String,
    /// Market color name of the current price cell.
    pub market_color: Option<String>,
    /// Formatted treasury.
    pub cash: String,
    /// Train names joined by `,`.
    pub trains: String,
    /// Free tokens over total tokens.
    pub tokens: String,
    /// Company short names joined by `,`.
    pub companies: String,
}

/// Per-player summary.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayerSummary {
    /// Player name.
    pub name: String,
    /// Company short names joined by `,`.
    pub companies: String,
    /// Formatted cash.
    pub cash: String,
    /// Formatted cash plus share value at current prices.
    pub worth: String,
    /// Certificates held.
    pub certs: usize,
}

/// Spreadsheet of a game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Spreadsheet {
    /// Corporation rows in canonical order.
    pub corporations: Vec<CorporationRow>,
    /// Player summaries in seat order.
    pub players: Vec<PlayerSummary>,
}

impl Spreadsheet {
    /// Project the game.
    #[must_use]
    pub fn from_game<S: Shuffler>(game: &Game<S>) -> Self {
        let registry = game.registry();
        let in_play: Vec<&Corporation> = registry
            .corporations()
            .into_iter()
            .filter_map(|id| registry.get(id))
            .collect();
        let seats: Vec<PlayerId> = game.players().player_ids().collect();
        let currency = game.currency();

        let corporations = in_play
            .iter()
            .map(|corp| {
                let player_shares = seats
                    .iter()
                    .map(|&player| {
                        let shares = corp.num_shares_of(ShareHolder::Player(player));
                        let mark = if corp.is_president(player) { "*" } else { "" };
                        format!("{shares}{mark}")
                    })
                    .collect();
                CorporationRow {
                    name: corp.name.clone(),
                    color: game.config().color_hex(&corp.color).to_string(),
                    floated: corp.floated,
                    player_shares,
                    ipo_shares: corp.num_shares_of(ShareHolder::Ipo),
                    pool_shares: corp.num_shares_of(ShareHolder::Pool),
                    par_price: corp
                        .par_price
                        .map(|p| currency.format(p.price))
                        .unwrap_or_default(),
                    market_price: corp
                        .share_price
                        .map(|p| currency.format(p.price))
                        .unwrap_or_default(),
                    market_color: corp
                        .share_price
                        .as_ref()
                        .and_then(|p| game.market().color_for(p))
                        .map(str::to_string),
                    cash: currency.format(corp.cash),
                    trains: join(corp.trains.iter().map(|t| t.name.as_str())),
                    tokens: format!("{}/{}", corp.free_tokens(), corp.tokens.len()),
                    companies: join(corp.companies.iter().map(String::as_str)),
                }
            })
            .collect();

        let players = game
            .players()
            .iter()
            .map(|(seat, player)| {
                let holder = ShareHolder::Player(seat);
                let share_value: i64 = in_play
                    .iter()
                    .map(|corp| i64::from(corp.num_shares_of(holder)) * corp.price())
                    .sum();
                let certs = in_play.iter().map(|corp| corp.certs_of(holder)).sum();
                PlayerSummary {
                    name: player.name.clone(),
                    companies: join(player.companies.iter().map(String::as_str)),
                    cash: currency.format(player.cash),
                    worth: currency.format(player.cash + share_value),
                    certs,
                }
            })
            .collect();

        Self {
            corporations,
            players,
        }
    }

    fn rows(&self) -> Vec<Vec<String>> {
        let mut header = vec!["Corporation".to_string()];
        header.extend(self.players.iter().map(|p| p.name.clone()));
        header.extend(
            ["IPO", "Pool", "Par", "Market", "Cash", "Trains", "Tokens", "Privates"]
                .map(str::to_string),
        );

        let mut rows = vec![header];
        for corp in &self.corporations {
            let name = if corp.floated {
                corp.name.clone()
            } else {
                format!("({})", corp.name)
            };
            let mut row = vec![name];
            row.extend(corp.player_shares.iter().cloned());
            row.extend([
                corp.ipo_shares.to_string(),
                corp.pool_shares.to_string(),
                corp.par_price.clone(),
                corp.market_price.clone(),
                corp.cash.clone(),
                corp.trains.clone(),
                corp.tokens.clone(),
                corp.companies.clone(),
            ]);
            rows.push(row);
        }

        rows.push(self.summary_row("Privates", |p| p.companies.clone()));
        rows.push(self.summary_row("Cash", |p| p.cash.clone()));
        rows.push(self.summary_row("Worth", |p| p.worth.clone()));
        rows.push(self.summary_row("Certs", |p| p.certs.to_string()));
        rows
    }

    fn summary_row(&self, label: &str, cell: impl Fn(&PlayerSummary) -> String) -> Vec<String> {
        let mut row = vec![label.to_string()];
        row.extend(self.players.iter().map(cell));
        row
    }
}

impl fmt::Display for Spreadsheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows = self.rows();
        let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
        let widths: Vec<usize> = (0..columns)
            .map(|col| {
                rows.iter()
                    .filter_map(|row| row.get(col))
                    .map(|cell| cell.chars().count())
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        for row in &rows {
            let line: Vec<String> = row
                .iter()
                .zip(&widths)
                .map(|(cell, &width)| format!("{cell:<width$}"))
                .collect();
            writeln!(f, "{}", line.join(" | ").trim_end())?;
        }
        Ok(())
    }
}

fn join<'a>(names: impl Iterator<Item = &'a str>) -> String {
    names.collect::<Vec<_>>().join(",")
}
