//! Round descriptors.
//!
//! A `Round` names its kind, the participants in the order they act, and the
//! steps those participants may take. Step behavior is implemented outside
//! the core; the descriptor only says which steps are allowed.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::Entity;

/// The three company-round sub-variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompanyVariant {
    /// Run routes and pay dividends; city corporations take part.
    Route,
    /// Buy trains; city corporations sit out.
    BuyTrain,
    /// Reassign trains between fleet members; city corporations sit out.
    SwitchTrains,
}

impl CompanyVariant {
    /// Whether city corporations are filtered out.
    #[must_use]
    pub const fn no_city(self) -> bool {
        !matches!(self, CompanyVariant::Route)
    }
}

/// Round identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoundKind {
    /// Initial auction.
    Auction,
    /// Stock round.
    Stock,
    /// Company round of the given variant.
    Company(CompanyVariant),
    /// Tram acquisition round.
    Acquisition,
    /// Main operating ("Line") round.
    Operating,
}

impl RoundKind {
    /// Short name used in the progress display.
    #[must_use]
    pub const fn short_name(self) -> &'static str {
        match self {
            RoundKind::Auction => "PRE",
            RoundKind::Stock => "SR",
            RoundKind::Company(_) => "CR",
            RoundKind::Acquisition => "AR",
            RoundKind::Operating => "LR",
        }
    }

    /// Display name. `operating_name` is the game's name for the main
    /// operating round.
    #[must_use]
    pub fn name(self, operating_name: &str) -> String {
        match self {
            RoundKind::Auction => "Auction Round".to_string(),
            RoundKind::Stock => "Stock Round".to_string(),
            RoundKind::Company(_) => "Company Round".to_string(),
            RoundKind::Acquisition => "Acquisition Round".to_string(),
            RoundKind::Operating => format!("{operating_name} Round"),
        }
    }
}

/// Steps a round may list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StepKind {
    /// Initial company selection auction.
    SelectionAuction,
    /// Sell, buy, or par shares.
    BuySellParShares,
    /// Run routes.
    Route,
    /// Distribute revenue.
    Dividend,
    /// Buy trains.
    BuyTrain,
    /// Train purchase that may interrupt the auction.
    InterruptingBuyTrain,
    /// Auction trams to majors.
    AcquisitionAuction,
    /// Move trains between a major and its fleet.
    ReassignTrains,
    /// Bankruptcy handling.
    Bankrupt,
    /// Company-for-share exchanges.
    Exchange,
    /// Track laid by company abilities.
    SpecialTrack,
    /// Tokens placed by company abilities.
    SpecialToken,
    /// Buy a private company.
    BuyCompany,
    /// Place a home token.
    HomeToken,
    /// Lay track.
    Track,
    /// Place a station token.
    Token,
    /// Discard trains over the limit.
    DiscardTrain,
}

/// A step entry in a round's step list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepSpec {
    /// Step kind.
    pub kind: StepKind,
    /// Whether this step holds the round until it is resolved.
    pub blocks: bool,
}

impl StepSpec {
    /// Non-blocking step.
    #[must_use]
    pub const fn new(kind: StepKind) -> Self {
        Self {
            kind,
            blocks: false,
        }
    }

    /// Blocking step.
    #[must_use]
    pub const fn blocking(kind: StepKind) -> Self {
        Self { kind, blocks: true }
    }
}

/// Step list; most rounds have a handful of steps.
pub type StepList = SmallVec<[StepSpec; 4]>;

/// A constructed round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    /// Round identity.
    pub kind: RoundKind,
    /// Round number within its set (line rounds count 1, 2, ...).
    pub round_num: u32,
    /// Participants in acting order.
    pub entities: Vec<Entity>,
    /// Allowed steps, in resolution order.
    pub steps: StepList,
}

impl Round {
    /// Create a round.
    #[must_use]
    pub fn new(kind: RoundKind, round_num: u32, entities: Vec<Entity>, steps: StepList) -> Self {
        Self {
            kind,
            round_num,
            entities,
            steps,
        }
    }

    /// Whether the round lists `step`.
    #[must_use]
    pub fn allows(&self, step: StepKind) -> bool {
        self.steps.iter().any(|s| s.kind == step)
    }

    /// Step kinds in order.
    pub fn step_kinds(&self) -> impl Iterator<Item = StepKind> + '_ {
        self.steps.iter().map(|s| s.kind)
    }

    /// City corporations are filtered out of this round.
    #[must_use]
    pub fn no_city(&self) -> bool {
        matches!(self.kind, RoundKind::Company(variant) if variant.no_city())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smallvec::smallvec;

    #[test]
    fn test_short_names() {
        assert_eq!(RoundKind::Stock.short_name(), "SR");
        assert_eq!(RoundKind::Company(CompanyVariant::BuyTrain).short_name(), "CR");
        assert_eq!(RoundKind::Operating.short_name(), "LR");
    }

    #[test]
    fn test_names() {
        assert_eq!(RoundKind::Operating.name("Line"), "Line Round");
        assert_eq!(
            RoundKind::Company(CompanyVariant::Route).name("Line"),
            "Company Round"
        );
    }

    #[test]
    fn test_no_city_only_outside_route_variant() {
        assert!(!CompanyVariant::Route.no_city());
        assert!(CompanyVariant::BuyTrain.no_city());
        assert!(CompanyVariant::SwitchTrains.no_city());

        let round = Round::new(RoundKind::Stock, 1, Vec::new(), StepList::new());
        assert!(!round.no_city());
    }

    #[test]
    fn test_allows() {
        let round = Round::new(
            RoundKind::Company(CompanyVariant::Route),
            0,
            Vec::new(),
            smallvec![StepSpec::new(StepKind::Route), StepSpec::new(StepKind::Dividend)],
        );

        assert!(round.allows(StepKind::Dividend));
        assert!(!round.allows(StepKind::BuyTrain));
    }
}
