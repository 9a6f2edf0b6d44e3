//! Next-round decision.
//!
//! `next_transition` is a pure function from the finished round and the
//! phase counters to the round that starts next. It never touches game
//! state: the result says which round to build, what the counters become,
//! and which bookkeeping hooks the game runs before building it. The game
//! applies each transition exactly once.
//!
//! ## Round sequence
//!
//! ```text
//! Auction -> Stock -> CR(route) -> CR(buy) -> CR(buy) -> Acquisition
//!         -> CR(switch) -> LR 1 -> LR 2 [-> LR 3] -> Stock -> ...
//! ```
//!
//! After the last line round of the final turn one more company cycle runs
//! under the next turn number, and the game ends when that cycle completes.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::progress::ProgressSchedule;
use crate::rounds::{CompanyVariant, RoundKind};

/// Counters that drive round selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PhaseCounters {
    /// Rounds started so far, including the auction.
    pub round_counter: u32,
    /// Company rounds finished in the current cycle.
    pub cr_counter: u32,
    /// Stock-round number. One past the final turn during the closing
    /// company cycle.
    pub turn: u32,
}

impl Default for PhaseCounters {
    fn default() -> Self {
        Self {
            round_counter: 0,
            cr_counter: 0,
            turn: 1,
        }
    }
}

/// The round to build next.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NextRound {
    /// A stock round.
    Stock,
    /// A company round of the given variant.
    Company {
        /// Sub-variant.
        variant: CompanyVariant,
        /// Round number carried through the cycle.
        round_num: u32,
    },
    /// The tram acquisition round.
    Acquisition,
    /// A line round.
    Operating {
        /// Line round number within the turn.
        round_num: u32,
    },
    /// No further rounds.
    End,
}

/// Bookkeeping the game runs while applying a transition, in order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Hook {
    /// The initial auction is over.
    InitRoundFinished,
    /// A line round is over.
    OperatingRoundFinished,
    /// The last line round of the turn is over.
    OperatingSetFinished,
    /// Refill the active tram pool.
    RestockTrams,
    /// A company-round cycle starts; the game logs its header.
    CompanyCycleStarted,
}

/// Outcome of a finished round.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transition {
    /// Counters after the transition.
    pub counters: PhaseCounters,
    /// Round to build.
    pub next: NextRound,
    /// Hooks to run before building it.
    pub hooks: SmallVec<[Hook; 3]>,
}

impl Transition {
    fn new(counters: PhaseCounters, next: NextRound) -> Self {
        Self {
            counters,
            next,
            hooks: SmallVec::new(),
        }
    }

    fn with_hook(mut self, hook: Hook) -> Self {
        self.hooks.push(hook);
        self
    }

    /// Whether the game ends with this transition.
    #[must_use]
    pub fn is_end(&self) -> bool {
        self.next == NextRound::End
    }
}

/// Decide what follows a finished round.
///
/// `round_num` is the finished round's number. Every transition that starts
/// a round advances `round_counter` by one; ending the game does not.
///
/// ## Example
///
/// ```
/// use rust_1840::core::GameConfig;
/// use rust_1840::orchestrator::{next_transition, NextRound, PhaseCounters, ProgressSchedule};
/// use rust_1840::rounds::{CompanyVariant, RoundKind};
///
/// let schedule = ProgressSchedule::from_entries(&GameConfig::default().progress).unwrap();
/// let counters = PhaseCounters { round_counter: 2, cr_counter: 4, turn: 1 };
///
/// let t = next_transition(RoundKind::Stock, 0, counters, &schedule);
/// assert_eq!(t.counters.cr_counter, 0);
/// assert_eq!(t.counters.round_counter, 3);
/// assert_eq!(t.next, NextRound::Company { variant: CompanyVariant::Route, round_num: 0 });
/// ```
#[must_use]
pub fn next_transition(
    finished: RoundKind,
    round_num: u32,
    counters: PhaseCounters,
    schedule: &ProgressSchedule,
) -> Transition {
    let mut next_counters = counters;

    match finished {
        RoundKind::Auction => {
            next_counters.round_counter += 1;
            Transition::new(next_counters, NextRound::Stock).with_hook(Hook::InitRoundFinished)
        }
        RoundKind::Stock => {
            next_counters.round_counter += 1;
            next_counters.cr_counter = 0;
            Transition::new(
                next_counters,
                NextRound::Company {
                    variant: CompanyVariant::Route,
                    round_num,
                },
            )
            .with_hook(Hook::CompanyCycleStarted)
        }
        RoundKind::Company(_) => {
            next_counters.round_counter += 1;
            next_counters.cr_counter += 1;
            if next_counters.cr_counter >= 4 && counters.turn > schedule.final_turn() {
                return Transition::new(counters_after_cycle(counters), NextRound::End);
            }
            let next = if next_counters.cr_counter < 3 {
                NextRound::Company {
                    variant: CompanyVariant::BuyTrain,
                    round_num,
                }
            } else if next_counters.cr_counter < 4 {
                NextRound::Acquisition
            } else {
                NextRound::Operating {
                    round_num: round_num + 1,
                }
            };
            Transition::new(next_counters, next)
        }
        RoundKind::Acquisition => {
            next_counters.round_counter += 1;
            Transition::new(
                next_counters,
                NextRound::Company {
                    variant: CompanyVariant::SwitchTrains,
                    round_num,
                },
            )
            .with_hook(Hook::RestockTrams)
        }
        RoundKind::Operating => {
            if round_num < schedule.line_rounds(counters.turn) {
                next_counters.round_counter += 1;
                return Transition::new(
                    next_counters,
                    NextRound::Operating {
                        round_num: round_num + 1,
                    },
                )
                .with_hook(Hook::OperatingRoundFinished);
            }

            let finished_set = |counters, next| {
                Transition::new(counters, next)
                    .with_hook(Hook::OperatingRoundFinished)
                    .with_hook(Hook::OperatingSetFinished)
            };
            next_counters.round_counter += 1;
            next_counters.turn += 1;
            if counters.turn >= schedule.final_turn() {
                next_counters.cr_counter = 0;
                let closing = NextRound::Company {
                    variant: CompanyVariant::Route,
                    round_num: 0,
                };
                finished_set(next_counters, closing).with_hook(Hook::CompanyCycleStarted)
            } else {
                finished_set(next_counters, NextRound::Stock)
            }
        }
    }
}

/// Counters once the closing company cycle has finished. No round starts.
fn counters_after_cycle(counters: PhaseCounters) -> PhaseCounters {
    PhaseCounters {
        cr_counter: counters.cr_counter + 1,
        ..counters
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameConfig;

    fn schedule() -> ProgressSchedule {
        ProgressSchedule::from_entries(&GameConfig::default().progress).unwrap()
    }

    fn counters(cr_counter: u32, turn: u32) -> PhaseCounters {
        PhaseCounters {
            round_counter: 10,
            cr_counter,
            turn,
        }
    }

    #[test]
    fn test_auction_leads_to_stock() {
        let t = next_transition(RoundKind::Auction, 0, PhaseCounters::default(), &schedule());

        assert_eq!(t.next, NextRound::Stock);
        assert_eq!(t.counters.round_counter, 1);
        assert_eq!(t.hooks.as_slice(), &[Hook::InitRoundFinished]);
    }

    #[test]
    fn test_stock_resets_company_cycle() {
        let t = next_transition(RoundKind::Stock, 0, counters(4, 2), &schedule());

        assert_eq!(t.counters.cr_counter, 0);
        assert_eq!(t.counters.round_counter, 11);
        assert_eq!(t.counters.turn, 2);
        assert_eq!(
            t.next,
            NextRound::Company {
                variant: CompanyVariant::Route,
                round_num: 0
            }
        );
    }

    #[test]
    fn test_company_thresholds() {
        let schedule = schedule();
        let company = RoundKind::Company(CompanyVariant::BuyTrain);

        let t = next_transition(company, 0, counters(1, 1), &schedule);
        assert_eq!(t.counters.cr_counter, 2);
        assert!(matches!(
            t.next,
            NextRound::Company {
                variant: CompanyVariant::BuyTrain,
                ..
            }
        ));

        let t = next_transition(company, 0, counters(2, 1), &schedule);
        assert_eq!(t.next, NextRound::Acquisition);

        let t = next_transition(company, 0, counters(3, 1), &schedule);
        assert_eq!(t.next, NextRound::Operating { round_num: 1 });
    }

    #[test]
    fn test_acquisition_restocks_and_switches() {
        let t = next_transition(RoundKind::Acquisition, 0, counters(3, 1), &schedule());

        assert_eq!(t.counters.cr_counter, 3);
        assert_eq!(
            t.next,
            NextRound::Company {
                variant: CompanyVariant::SwitchTrains,
                round_num: 0
            }
        );
        assert_eq!(t.hooks.as_slice(), &[Hook::RestockTrams]);
    }

    #[test]
    fn test_operating_rounds_within_turn() {
        let t = next_transition(RoundKind::Operating, 1, counters(4, 1), &schedule());

        assert_eq!(t.next, NextRound::Operating { round_num: 2 });
        assert_eq!(t.counters.turn, 1);
        assert_eq!(t.hooks.as_slice(), &[Hook::OperatingRoundFinished]);
    }

    #[test]
    fn test_operating_set_ends_turn() {
        let t = next_transition(RoundKind::Operating, 2, counters(4, 1), &schedule());

        assert_eq!(t.next, NextRound::Stock);
        assert_eq!(t.counters.turn, 2);
        assert_eq!(t.counters.round_counter, 11);
        assert_eq!(
            t.hooks.as_slice(),
            &[Hook::OperatingRoundFinished, Hook::OperatingSetFinished]
        );
    }

    #[test]
    fn test_final_turn_runs_three_line_rounds_then_closing_cycle() {
        let schedule = schedule();

        let t = next_transition(RoundKind::Operating, 2, counters(4, 5), &schedule);
        assert_eq!(t.next, NextRound::Operating { round_num: 3 });

        let t = next_transition(RoundKind::Operating, 3, counters(4, 5), &schedule);
        assert_eq!(
            t.next,
            NextRound::Company {
                variant: CompanyVariant::Route,
                round_num: 0
            }
        );
        assert_eq!(t.counters.round_counter, 11);
        assert_eq!(t.counters.cr_counter, 0);
        assert_eq!(t.counters.turn, 6);
        assert_eq!(
            t.hooks.as_slice(),
            &[
                Hook::OperatingRoundFinished,
                Hook::OperatingSetFinished,
                Hook::CompanyCycleStarted
            ]
        );
    }

    #[test]
    fn test_closing_cycle_ends_game() {
        let schedule = schedule();
        let switch = RoundKind::Company(CompanyVariant::SwitchTrains);

        let t = next_transition(switch, 0, counters(3, 6), &schedule);
        assert!(t.is_end());
        assert_eq!(t.counters.round_counter, 10);
        assert_eq!(t.counters.cr_counter, 4);
        assert_eq!(t.counters.turn, 6);
        assert!(t.hooks.is_empty());

        let t = next_transition(RoundKind::Acquisition, 0, counters(3, 6), &schedule);
        assert_eq!(t.hooks.as_slice(), &[Hook::RestockTrams]);

        let t = next_transition(switch, 0, counters(3, 5), &schedule);
        assert_eq!(t.next, NextRound::Operating { round_num: 1 });
    }

    #[test]
    fn test_cycle_is_independent_of_prior_line_rounds() {
        let schedule = schedule();

        for prior_turn in 1..=4 {
            let mut c = counters(4, prior_turn);
            let mut kind = RoundKind::Stock;
            let mut round_num = 0;
            let mut seen = Vec::new();

            for _ in 0..6 {
                let t = next_transition(kind, round_num, c, &schedule);
                c = t.counters;
                seen.push(t.next);
                match t.next {
                    NextRound::Company { variant, round_num: n } => {
                        kind = RoundKind::Company(variant);
                        round_num = n;
                    }
                    NextRound::Acquisition => kind = RoundKind::Acquisition,
                    _ => break,
                }
            }

            assert_eq!(
                seen,
                vec![
                    NextRound::Company {
                        variant: CompanyVariant::Route,
                        round_num: 0
                    },
                    NextRound::Company {
                        variant: CompanyVariant::BuyTrain,
                        round_num: 0
                    },
                    NextRound::Company {
                        variant: CompanyVariant::BuyTrain,
                        round_num: 0
                    },
                    NextRound::Acquisition,
                    NextRound::Company {
                        variant: CompanyVariant::SwitchTrains,
                        round_num: 0
                    },
                    NextRound::Operating { round_num: 1 },
                ]
            );
        }
    }
}
