//! Corporation instances.
//!
//! A `Corporation` is created from its catalog entry and carries all the
//! runtime state the core and the spreadsheet view read: float state, par
//! and share price, treasury, certificates, trains, tokens, and companies.

use serde::{Deserialize, Serialize};

use crate::core::config::CorporationSpec;
use crate::core::{CorporationId, PlayerId};
use crate::interfaces::{SharePrice, Train};

/// Corporation type. Fixed at creation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CorporationType {
    /// Player-founded railway corporation.
    Major,
    /// Pre-floated corporation tied to a city.
    City,
    /// Small corporation acquired into a major's fleet.
    #[serde(alias = "minor")]
    Tram,
}

impl CorporationType {
    /// All types in canonical ordering sequence.
    pub const ALL: [CorporationType; 3] = [
        CorporationType::Major,
        CorporationType::City,
        CorporationType::Tram,
    ];

    /// Lowercase name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            CorporationType::Major => "major",
            CorporationType::City => "city",
            CorporationType::Tram => "tram",
        }
    }
}

/// Who holds a share certificate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShareHolder {
    /// Unissued, still in the corporation's IPO.
    Ipo,
    /// The shared market pool.
    Pool,
    /// A player.
    Player(PlayerId),
    /// Another corporation.
    Corporation(CorporationId),
}

/// A share certificate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Share {
    /// Percentage of the corporation.
    pub percent: u8,
    /// President's certificate.
    pub president: bool,
    /// Current holder.
    pub holder: ShareHolder,
}

/// Who controls a corporation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Owner {
    /// Nobody yet.
    #[default]
    Unowned,
    /// A player (the president).
    Player(PlayerId),
    /// The shared pool; city corporations are run this way.
    SharePool,
}

/// A station token.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Hex the token sits on, `None` while unplaced.
    pub coordinate: Option<String>,
    /// City index on that hex.
    pub city_index: usize,
}

impl Token {
    /// Whether the token has been placed.
    #[must_use]
    pub fn used(&self) -> bool {
        self.coordinate.is_some()
    }
}

/// A corporation with its runtime state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Corporation {
    /// Registry id.
    pub id: CorporationId,
    /// Short symbol.
    pub sym: String,
    /// Display name.
    pub name: String,
    /// Type, immutable.
    kind: CorporationType,
    /// Color name.
    pub color: String,
    /// Text color name.
    pub text_color: String,
    /// Floated (ipoed) flag.
    pub floated: bool,
    /// Par price, once parred.
    pub par_price: Option<SharePrice>,
    /// Current share price.
    pub share_price: Option<SharePrice>,
    /// Treasury.
    pub cash: i64,
    /// Certificates, president's first.
    pub shares: Vec<Share>,
    /// Owned trains.
    pub trains: Vec<Train>,
    /// Station tokens.
    pub tokens: Vec<Token>,
    /// Short names of attached companies.
    pub companies: Vec<String>,
    /// Reservation marker color.
    pub reservation_color: Option<String>,
    /// Controller.
    pub owner: Owner,
}

impl Corporation {
    /// Instantiate a catalog entry.
    #[must_use]
    pub fn from_spec(id: CorporationId, spec: &CorporationSpec) -> Self {
        let shares = spec
            .shares
            .iter()
            .enumerate()
            .map(|(i, &percent)| Share {
                percent,
                president: i == 0,
                holder: ShareHolder::Ipo,
            })
            .collect();

        Self {
            id,
            sym: spec.sym.clone(),
            name: spec.name.clone(),
            kind: spec.kind,
            color: spec.color.clone(),
            text_color: spec.text_color.clone(),
            floated: false,
            par_price: None,
            share_price: None,
            cash: 0,
            shares,
            trains: Vec::new(),
            tokens: vec![Token::default(); spec.tokens],
            companies: Vec::new(),
            reservation_color: None,
            owner: Owner::Unowned,
        }
    }

    /// Corporation type.
    #[must_use]
    pub fn kind(&self) -> CorporationType {
        self.kind
    }

    /// Percentage held by `holder`.
    #[must_use]
    pub fn percent_of(&self, holder: ShareHolder) -> u32 {
        self.shares
            .iter()
            .filter(|s| s.holder == holder)
            .map(|s| u32::from(s.percent))
            .sum()
    }

    /// Number of 10% shares held by `holder`.
    #[must_use]
    pub fn num_shares_of(&self, holder: ShareHolder) -> u32 {
        self.percent_of(holder) / 10
    }

    /// Certificates held by `holder`.
    #[must_use]
    pub fn certs_of(&self, holder: ShareHolder) -> usize {
        self.shares.iter().filter(|s| s.holder == holder).count()
    }

    /// The player holding the president's certificate.
    #[must_use]
    pub fn president(&self) -> Option<PlayerId> {
        self.shares
            .iter()
            .find(|s| s.president)
            .and_then(|s| match s.holder {
                ShareHolder::Player(player) => Some(player),
                _ => None,
            })
    }

    /// Whether `player` is president.
    #[must_use]
    pub fn is_president(&self, player: PlayerId) -> bool {
        self.president() == Some(player)
    }

    /// Move every IPO certificate to `receiver`. The president's certificate
    /// keeps its flag; nobody gains presidency through it unless `receiver`
    /// is a player. Returns the number of certificates moved.
    pub fn transfer_ipo_shares(&mut self, receiver: ShareHolder) -> usize {
        let mut moved = 0;
        for share in self.shares.iter_mut().filter(|s| s.holder == ShareHolder::Ipo) {
            share.holder = receiver;
            moved += 1;
        }
        moved
    }

    /// First unplaced token.
    pub fn next_free_token(&mut self) -> Option<&mut Token> {
        self.tokens.iter_mut().find(|t| !t.used())
    }

    /// Number of unplaced tokens.
    #[must_use]
    pub fn free_tokens(&self) -> usize {
        self.tokens.iter().filter(|t| !t.used()).count()
    }

    /// Current share price value, zero when unparred.
    #[must_use]
    pub fn price(&self) -> i64 {
        self.share_price.map_or(0, |p| p.price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn major() -> Corporation {
        let spec = CorporationSpec::new("R", "Rote Linie", CorporationType::Major, "red", 4);
        Corporation::from_spec(CorporationId(0), &spec)
    }

    #[test]
    fn test_from_spec() {
        let corp = major();

        assert_eq!(corp.kind(), CorporationType::Major);
        assert!(!corp.floated);
        assert_eq!(corp.tokens.len(), 4);
        assert_eq!(corp.free_tokens(), 4);
        assert_eq!(corp.num_shares_of(ShareHolder::Ipo), 10);
        assert_eq!(corp.certs_of(ShareHolder::Ipo), 9);
        assert_eq!(corp.owner, Owner::Unowned);
    }

    #[test]
    fn test_president() {
        let mut corp = major();
        assert_eq!(corp.president(), None);

        corp.shares[0].holder = ShareHolder::Player(PlayerId::new(2));
        corp.shares[1].holder = ShareHolder::Player(PlayerId::new(1));

        assert!(corp.is_president(PlayerId::new(2)));
        assert!(!corp.is_president(PlayerId::new(1)));
        assert_eq!(corp.num_shares_of(ShareHolder::Player(PlayerId::new(2))), 2);
    }

    #[test]
    fn test_transfer_ipo_shares() {
        let mut corp = major();
        corp.shares[3].holder = ShareHolder::Pool;

        let moved = corp.transfer_ipo_shares(ShareHolder::Corporation(CorporationId(7)));

        assert_eq!(moved, 8);
        assert_eq!(corp.num_shares_of(ShareHolder::Ipo), 0);
        assert_eq!(corp.num_shares_of(ShareHolder::Pool), 1);
        assert_eq!(corp.president(), None);
    }

    #[test]
    fn test_next_free_token() {
        let mut corp = major();

        if let Some(token) = corp.next_free_token() {
            token.coordinate = Some("I1".to_string());
        }

        assert_eq!(corp.free_tokens(), 3);
        assert!(corp.tokens[0].used());
    }

    #[test]
    fn test_tram_type_accepts_minor_alias() {
        let kind: CorporationType = serde_json::from_str("\"minor\"").unwrap();
        assert_eq!(kind, CorporationType::Tram);
        assert_eq!(serde_json::to_string(&kind).unwrap(), "\"tram\"");
    }
}
