//! # rust-1840
//!
//! Round orchestration and corporation lifecycle engine for 1840, the
//! Vienna tramway game.
//!
//! ## Design Principles
//!
//! 1. **Pure Decisions**: Which round runs next is a pure function of the
//!    finished round and the phase counters. The game applies the result
//!    exactly once.
//!
//! 2. **Injected Randomness**: Every shuffle goes through a `Shuffler`, so
//!    games replay from a seed and tests pin the deal.
//!
//! 3. **Configuration Over Convention**: The corporation catalog, cash
//!    tables, par ranges, city setup and progress table live in
//!    `GameConfig`. The 1840 values are the default.
//!
//! ## Architecture
//!
//! - **Computed Ordering**: The canonical corporation ordering is a
//!   projection over the typed pools, never a separately maintained list.
//!
//! - **Narrow Collaborators**: The market, map, depot, bank and currency
//!   formatter sit behind small traits with simple in-crate implementations.
//!
//! ## Modules
//!
//! - `core`: Identifiers, players, RNG, configuration, errors
//! - `corporations`: Corporation records and the registry of pools
//! - `interfaces`: Bank, market, map, depot and currency collaborators
//! - `rounds`: Round descriptors and the round factory
//! - `orchestrator`: Phase counters and the next-round decision
//! - `game`: Setup, acquisition, rules, and round sequencing
//! - `view`: Spreadsheet projection

pub mod core;
pub mod corporations;
pub mod game;
pub mod interfaces;
pub mod orchestrator;
pub mod rounds;
pub mod view;

// Re-export commonly used types
pub use crate::core::{
    ConfigError, CorporationId, EngineError, EngineResult, Entity, GameConfig, GameRng,
    GameRngState, IdentityShuffler, InvariantError, Player, PlayerId, PlayerMap, Shuffler,
};

pub use crate::corporations::{
    Company, Corporation, CorporationRegistry, CorporationType, Owner, ShareHolder,
};

pub use crate::interfaces::{
    Bank, CurrencyFormat, Depot, FormatStr, GameMap, ParMarket, SharePrice, StockMarket,
    TokenMap, TrainDepot,
};

pub use crate::rounds::{CompanyVariant, Round, RoundFactory, RoundKind, StepKind, StepSpec};

pub use crate::orchestrator::{
    next_transition, NextRound, PhaseCounters, ProgressSchedule, Transition,
};

pub use crate::game::{Game, SetupSummary};

pub use crate::view::Spreadsheet;
