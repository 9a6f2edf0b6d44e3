//! Round construction.
//!
//! `RoundFactory` turns a round request into a `Round` descriptor: it picks
//! the participants from the players or the registry's operating order and
//! attaches the step list for that round kind. It reads, never mutates.

use smallvec::smallvec;

use super::round::{CompanyVariant, Round, RoundKind, StepKind, StepList, StepSpec};
use crate::core::{Entity, PlayerId};
use crate::corporations::{CorporationRegistry, CorporationType};

/// Builds round descriptors against a registry snapshot.
///
/// ## Example
///
/// ```
/// use rust_1840::core::GameConfig;
/// use rust_1840::corporations::CorporationRegistry;
/// use rust_1840::rounds::{RoundFactory, RoundKind, StepKind};
///
/// let config = GameConfig::default();
/// let registry = CorporationRegistry::new(&config.corporations).unwrap();
/// let factory = RoundFactory::new(&registry, 4);
///
/// let round = factory.stock();
/// assert_eq!(round.kind, RoundKind::Stock);
/// assert_eq!(round.entities.len(), 4);
/// assert!(round.allows(StepKind::BuySellParShares));
/// ```
#[derive(Clone, Copy, Debug)]
pub struct RoundFactory<'a> {
    registry: &'a CorporationRegistry,
    player_count: usize,
}

impl<'a> RoundFactory<'a> {
    /// Create a factory for `player_count` players.
    #[must_use]
    pub fn new(registry: &'a CorporationRegistry, player_count: usize) -> Self {
        Self {
            registry,
            player_count,
        }
    }

    /// Build the round for a company-round variant.
    #[must_use]
    pub fn company(&self, variant: CompanyVariant, round_num: u32) -> Round {
        let steps: StepList = match variant {
            CompanyVariant::Route => smallvec![
                StepSpec::new(StepKind::Route),
                StepSpec::new(StepKind::Dividend),
            ],
            CompanyVariant::BuyTrain => smallvec![StepSpec::new(StepKind::BuyTrain)],
            CompanyVariant::SwitchTrains => smallvec![StepSpec::new(StepKind::ReassignTrains)],
        };
        let entities = self.company_participants(variant.no_city());
        Round::new(RoundKind::Company(variant), round_num, entities, steps)
    }

    /// Initial auction among the players.
    #[must_use]
    pub fn auction(&self) -> Round {
        Round::new(
            RoundKind::Auction,
            0,
            self.players(),
            smallvec![StepSpec::new(StepKind::SelectionAuction)],
        )
    }

    /// Stock round among the players.
    #[must_use]
    pub fn stock(&self) -> Round {
        Round::new(
            RoundKind::Stock,
            0,
            self.players(),
            smallvec![StepSpec::new(StepKind::BuySellParShares)],
        )
    }

    /// Tram acquisition round over the whole operating order.
    #[must_use]
    pub fn acquisition(&self) -> Round {
        Round::new(
            RoundKind::Acquisition,
            0,
            self.operating_entities(),
            smallvec![
                StepSpec::new(StepKind::InterruptingBuyTrain),
                StepSpec::new(StepKind::AcquisitionAuction),
            ],
        )
    }

    /// Line round `round_num` over the whole operating order.
    #[must_use]
    pub fn operating(&self, round_num: u32) -> Round {
        use StepKind::*;

        let steps: StepList = [
            Bankrupt,
            Exchange,
            SpecialTrack,
            SpecialToken,
            BuyCompany,
            HomeToken,
            Track,
            Token,
            Route,
            Dividend,
            DiscardTrain,
            BuyTrain,
        ]
        .into_iter()
        .map(StepSpec::new)
        .chain(std::iter::once(StepSpec::blocking(BuyCompany)))
        .collect();

        Round::new(RoundKind::Operating, round_num, self.operating_entities(), steps)
    }

    // === Participants ===

    fn players(&self) -> Vec<Entity> {
        PlayerId::all(self.player_count).map(Entity::Player).collect()
    }

    fn operating_entities(&self) -> Vec<Entity> {
        self.registry
            .operating_order()
            .into_iter()
            .map(Entity::Corporation)
            .collect()
    }

    fn company_participants(&self, no_city: bool) -> Vec<Entity> {
        self.registry
            .operating_order()
            .into_iter()
            .filter(|&id| {
                self.registry.get(id).is_some_and(|corp| match corp.kind() {
                    CorporationType::Tram => false,
                    CorporationType::City => !no_city,
                    CorporationType::Major => true,
                })
            })
            .map(Entity::Corporation)
            .collect()
    }
}
