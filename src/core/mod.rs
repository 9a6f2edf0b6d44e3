//! Core engine types: identifiers, players, RNG, configuration, errors.
//!
//! Everything here is independent of round flow. Games configure the engine
//! through `GameConfig` rather than by modifying the core.

pub mod config;
pub mod entity;
pub mod error;
pub mod player;
pub mod rng;

pub use config::{
    CompanySpec, CorporationSpec, GameConfig, HexSpec, ParKind, ParPoint, ParRange,
    ProgressEntry, ProgressKind, TokenPlacement, TrainSpec,
};
pub use entity::{CorporationId, Entity};
pub use error::{ConfigError, EngineError, EngineResult, InvariantError};
pub use player::{Player, PlayerId, PlayerMap};
pub use rng::{GameRng, GameRngState, IdentityShuffler, Shuffler};
