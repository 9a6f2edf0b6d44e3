//! Engine error types.
//!
//! Two families, both fatal:
//! - `ConfigError`: the game cannot be set up from this configuration.
//! - `InvariantError`: a lifecycle or orchestration call broke an engine
//!   invariant. These point at a bug in the caller, not at user input.

use thiserror::Error;

use super::entity::CorporationId;

/// Errors that abort game setup.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Player count has no starting cash / certificate limit entry.
    #[error("unsupported player count {0}")]
    UnsupportedPlayerCount(usize),
    /// Not enough corporations of a type for this player count.
    #[error("need {needed} {kind} corporations, only {available} available")]
    NotEnoughCorporations {
        /// Corporation type name.
        kind: &'static str,
        /// Required count.
        needed: usize,
        /// Registered count.
        available: usize,
    },
    /// Two corporations share a symbol.
    #[error("duplicate corporation symbol {0}")]
    DuplicateCorporation(String),
    /// The depot has no train of the named type left.
    #[error("no '{train}' train left in the depot for {corporation}")]
    MissingStarterTrain {
        /// Corporation waiting for the train.
        corporation: String,
        /// Train type name.
        train: String,
    },
    /// A configured par value is not a par point of the market.
    #[error("par price {price} for {corporation} is not a market par point")]
    UnknownParPrice {
        /// Corporation being parred.
        corporation: String,
        /// Configured price.
        price: i64,
    },
    /// A city corporation has no par or token table entry.
    #[error("city corporation {0} has no initial par/token entry")]
    MissingCityEntry(String),
    /// A configured initial par lies outside the city par range.
    #[error("initial par {price} for {corporation} is outside the city par range")]
    ParOutOfRange {
        /// City corporation.
        corporation: String,
        /// Configured price.
        price: i64,
    },
    /// A token placement names an unknown hex or city slot.
    #[error("no city {city_index} on hex {coordinate}")]
    UnknownCity {
        /// Hex coordinate.
        coordinate: String,
        /// City index on the hex tile.
        city_index: usize,
    },
    /// A corporation ran out of tokens during initial placement.
    #[error("{0} has no free token left")]
    NoFreeToken(String),
    /// The progress table is unusable.
    #[error("invalid progress table: {0}")]
    InvalidProgress(String),
    /// The configuration document could not be parsed.
    #[error("malformed configuration: {0}")]
    Malformed(String),
}

/// Errors raised when an operation would break an engine invariant.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvariantError {
    /// No corporation with this id or symbol.
    #[error("unknown corporation {0}")]
    UnknownCorporation(String),
    /// No player in this seat.
    #[error("unknown player {0}")]
    UnknownPlayer(String),
    /// No private company with this symbol.
    #[error("unknown company {0}")]
    UnknownCompany(String),
    /// Trams can only be bought once.
    #[error("tram corporation {0:?} is already floated")]
    TramAlreadyFloated(CorporationId),
    /// The tram is not in the active pool.
    #[error("tram corporation {0:?} is not available")]
    TramNotAvailable(CorporationId),
    /// The corporation is not a tram.
    #[error("{0:?} is not a tram corporation")]
    NotATram(CorporationId),
    /// Only active major corporations keep a fleet.
    #[error("{0:?} is not an active major corporation")]
    NotAnActiveMajor(CorporationId),
    /// The unavailable pool cannot cover the restock shortfall.
    #[error("restock needs {needed} tram corporations, only {available} unavailable")]
    RestockShortfall {
        /// Trams required to reach the target pool size.
        needed: usize,
        /// Trams left in the unavailable pool.
        available: usize,
    },
    /// A corporation in play is missing from the canonical ordering.
    #[error("corporation ordering omits {0:?}")]
    OrderingOmits(CorporationId),
    /// A corporation is listed more than once in the canonical ordering.
    #[error("corporation ordering repeats {0:?}")]
    OrderingRepeats(CorporationId),
    /// A token placement was refused by the map.
    #[error("token for {corporation:?} rejected on {coordinate}: {reason}")]
    TokenRejected {
        /// Corporation placing the token.
        corporation: CorporationId,
        /// Hex coordinate.
        coordinate: String,
        /// Why the map refused.
        reason: String,
    },
    /// The game already reached its final progress entry.
    #[error("game is over")]
    GameOver,
}

/// Any engine failure.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Setup cannot proceed.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    /// An invariant would be broken.
    #[error("invariant violation: {0}")]
    Invariant(#[from] InvariantError),
}

impl EngineError {
    /// Whether this error came from configuration.
    #[must_use]
    pub fn is_config(&self) -> bool {
        matches!(self, EngineError::Config(_))
    }
}

/// Result alias used throughout the engine.
pub type EngineResult<T> = Result<T, EngineError>;
