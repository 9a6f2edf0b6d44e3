//! Progress schedule.
//!
//! The published progress table lists every round of the game in order
//! (`PRE`, `SR 1`, `CR 1`, `LR 1a`, ...). The orchestrator only needs two
//! facts from it: how many line rounds each turn runs, and which turn is the
//! last one with line rounds. Both are read off the line-round labels, whose
//! leading digits name the turn.
//!
//! The table lists `CR n` before `SR n` from turn 2 on, while the company
//! cycle runs right after its stock round. Such a cycle is shown on the
//! stock round's entry so the displayed position never moves backwards.

use std::collections::BTreeMap;

use crate::core::config::{ProgressEntry, ProgressKind};
use crate::core::ConfigError;

/// Line-round counts per turn, derived from the progress table.
///
/// ## Example
///
/// ```
/// use rust_1840::core::GameConfig;
/// use rust_1840::orchestrator::ProgressSchedule;
///
/// let schedule = ProgressSchedule::from_entries(&GameConfig::default().progress).unwrap();
/// assert_eq!(schedule.line_rounds(1), 2);
/// assert_eq!(schedule.line_rounds(5), 3);
/// assert_eq!(schedule.final_turn(), 5);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProgressSchedule {
    entries: Vec<ProgressEntry>,
    line_rounds: BTreeMap<u32, u32>,
}

impl ProgressSchedule {
    /// Parse the progress table.
    pub fn from_entries(entries: &[ProgressEntry]) -> Result<Self, ConfigError> {
        let mut line_rounds = BTreeMap::new();
        for entry in entries.iter().filter(|e| e.kind == ProgressKind::Line) {
            let turn = entry.name.as_deref().and_then(leading_turn).ok_or_else(|| {
                ConfigError::InvalidProgress(format!(
                    "line round label {:?} does not start with a turn number",
                    entry.name
                ))
            })?;
            *line_rounds.entry(turn).or_insert(0) += 1;
        }

        if line_rounds.is_empty() {
            return Err(ConfigError::InvalidProgress(
                "no line rounds listed".to_string(),
            ));
        }

        Ok(Self {
            entries: entries.to_vec(),
            line_rounds,
        })
    }

    /// Number of line rounds in `turn`. Turns the table does not list run
    /// a single line round.
    #[must_use]
    pub fn line_rounds(&self, turn: u32) -> u32 {
        self.line_rounds.get(&turn).copied().unwrap_or(1)
    }

    /// Last turn with line rounds.
    #[must_use]
    pub fn final_turn(&self) -> u32 {
        self.line_rounds.keys().next_back().copied().unwrap_or(1)
    }

    /// The table as published.
    #[must_use]
    pub fn entries(&self) -> &[ProgressEntry] {
        &self.entries
    }

    /// Index of the entry for `kind` labelled `name`.
    #[must_use]
    pub fn position(&self, kind: ProgressKind, name: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|e| e.kind == kind && e.name.as_deref() == Some(name))
    }

    /// Index shown for the company cycle of `turn`.
    ///
    /// This is the turn's `CR` entry when it follows the turn's `SR` entry
    /// (or the turn has no stock round), and the `SR` entry otherwise.
    #[must_use]
    pub fn company_position(&self, turn: u32) -> Option<usize> {
        let label = turn.to_string();
        let company = self.position(ProgressKind::Company, &label);
        match self.position(ProgressKind::Stock, &label) {
            Some(stock) if company.map_or(true, |c| c < stock) => Some(stock),
            _ => company,
        }
    }
}

fn leading_turn(label: &str) -> Option<u32> {
    let digits: String = label.chars().take_while(char::is_ascii_digit).collect();
    digits.parse().ok()
}
