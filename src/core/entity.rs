//! Entity identification system.
//!
//! Every corporation registered with the game gets a `CorporationId`,
//! allocated densely in registration order. Players keep their own
//! `PlayerId` (see `player.rs`). Round participants are either one or the
//! other, expressed by `Entity`.
//!
//! ## Usage
//!
//! ```
//! use rust_1840::core::{CorporationId, Entity, PlayerId};
//!
//! let corp = CorporationId::new(3);
//! assert_eq!(corp.index(), 3);
//!
//! let participant = Entity::Corporation(corp);
//! assert_eq!(participant.as_corporation(), Some(corp));
//! assert_eq!(Entity::Player(PlayerId::new(1)).as_corporation(), None);
//! ```

use serde::{Deserialize, Serialize};

use super::player::PlayerId;

/// Dense identifier for a registered corporation.
///
/// Ids are indices into the registry's corporation table, so they are only
/// meaningful for the game that allocated them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CorporationId(pub u16);

impl CorporationId {
    /// Create a corporation ID.
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    /// Index into the registry table.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for CorporationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Corporation({})", self.0)
    }
}

/// Anything that can take part in a round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Entity {
    /// A seated player (auction and stock rounds).
    Player(PlayerId),
    /// A corporation (company, acquisition and line rounds).
    Corporation(CorporationId),
}

impl Entity {
    /// The corporation behind this entity, if any.
    #[must_use]
    pub const fn as_corporation(self) -> Option<CorporationId> {
        match self {
            Entity::Corporation(id) => Some(id),
            Entity::Player(_) => None,
        }
    }

    /// The player behind this entity, if any.
    #[must_use]
    pub const fn as_player(self) -> Option<PlayerId> {
        match self {
            Entity::Player(id) => Some(id),
            Entity::Corporation(_) => None,
        }
    }
}

impl From<CorporationId> for Entity {
    fn from(id: CorporationId) -> Self {
        Entity::Corporation(id)
    }
}

impl From<PlayerId> for Entity {
    fn from(id: PlayerId) -> Self {
        Entity::Player(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corporation_id_index() {
        assert_eq!(CorporationId::new(0).index(), 0);
        assert_eq!(CorporationId::new(17).index(), 17);
    }

    #[test]
    fn test_corporation_id_ordering() {
        let mut ids = vec![CorporationId(4), CorporationId(1), CorporationId(3)];
        ids.sort();
        assert_eq!(ids, vec![CorporationId(1), CorporationId(3), CorporationId(4)]);
    }

    #[test]
    fn test_entity_conversions() {
        let corp: Entity = CorporationId(2).into();
        let player: Entity = PlayerId::new(1).into();

        assert_eq!(corp.as_corporation(), Some(CorporationId(2)));
        assert_eq!(corp.as_player(), None);
        assert_eq!(player.as_player(), Some(PlayerId::new(1)));
        assert_eq!(player.as_corporation(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", CorporationId(42)), "Corporation(42)");
    }

    #[test]
    fn test_serialization() {
        let entity = Entity::Corporation(CorporationId(9));
        let json = serde_json::to_string(&entity).unwrap();
        let deserialized: Entity = serde_json::from_str(&json).unwrap();
        assert_eq!(entity, deserialized);
    }
}
