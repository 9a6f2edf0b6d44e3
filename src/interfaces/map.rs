//! Token placement on the map.
//!
//! The core only ever places station tokens; route legality and tile
//! geometry stay with the map collaborator.

use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::core::config::HexSpec;
use crate::core::CorporationId;

/// Why the map refused a token.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// No such hex, or no such city on it.
    #[error("no city {city_index} on hex {coordinate}")]
    UnknownCity {
        /// Hex coordinate.
        coordinate: String,
        /// City index.
        city_index: usize,
    },
    /// Every slot of the city is taken.
    #[error("city is full")]
    CityFull,
    /// The corporation already has a token on this hex.
    #[error("corporation already tokened this hex")]
    AlreadyInHex,
}

/// Map collaborator.
pub trait GameMap {
    /// Place a token. With `check_tokenable` off, slot and duplicate checks
    /// are skipped; the city itself must still exist.
    fn place_token(
        &mut self,
        coordinate: &str,
        city_index: usize,
        corporation: CorporationId,
        check_tokenable: bool,
    ) -> Result<(), TokenError>;

    /// Tokens in a city, in placement order.
    fn tokens_at(&self, coordinate: &str, city_index: usize) -> &[CorporationId];
}

#[derive(Clone, Debug, Default)]
struct City {
    slots: usize,
    tokens: Vec<CorporationId>,
}

/// Map of tokenable hexes.
#[derive(Clone, Debug, Default)]
pub struct TokenMap {
    hexes: FxHashMap<String, Vec<City>>,
}

impl TokenMap {
    /// Build from the configured hexes.
    #[must_use]
    pub fn from_specs(specs: &[HexSpec]) -> Self {
        let hexes = specs
            .iter()
            .map(|hex| {
                let cities = hex
                    .cities
                    .iter()
                    .map(|&slots| City {
                        slots,
                        tokens: Vec::new(),
                    })
                    .collect();
                (hex.coordinate.clone(), cities)
            })
            .collect();
        Self { hexes }
    }

    /// Whether a hex exists.
    #[must_use]
    pub fn has_hex(&self, coordinate: &str) -> bool {
        self.hexes.contains_key(coordinate)
    }
}

impl GameMap for TokenMap {
    fn place_token(
        &mut self,
        coordinate: &str,
        city_index: usize,
        corporation: CorporationId,
        check_tokenable: bool,
    ) -> Result<(), TokenError> {
        let unknown = || TokenError::UnknownCity {
            coordinate: coordinate.to_string(),
            city_index,
        };
        let cities = self.hexes.get_mut(coordinate).ok_or_else(unknown)?;

        if check_tokenable && cities.iter().any(|c| c.tokens.contains(&corporation)) {
            return Err(TokenError::AlreadyInHex);
        }

        let city = cities.get_mut(city_index).ok_or_else(unknown)?;
        if check_tokenable && city.tokens.len() >= city.slots {
            return Err(TokenError::CityFull);
        }

        city.tokens.push(corporation);
        Ok(())
    }

    fn tokens_at(&self, coordinate: &str, city_index: usize) -> &[CorporationId] {
        self.hexes
            .get(coordinate)
            .and_then(|cities| cities.get(city_index))
            .map(|city| city.tokens.as_slice())
            .unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map() -> TokenMap {
        TokenMap::from_specs(&[
            HexSpec {
                coordinate: "A17".to_string(),
                cities: vec![1, 1, 1],
            },
            HexSpec {
                coordinate: "I1".to_string(),
                cities: vec![1],
            },
        ])
    }

    #[test]
    fn test_place_token() {
        let mut map = map();

        map.place_token("A17", 2, CorporationId(5), true).unwrap();

        assert_eq!(map.tokens_at("A17", 2), &[CorporationId(5)]);
        assert!(map.tokens_at("A17", 0).is_empty());
    }

    #[test]
    fn test_checks_reject_full_city_and_duplicates() {
        let mut map = map();
        map.place_token("I1", 0, CorporationId(1), true).unwrap();

        assert_eq!(
            map.place_token("I1", 0, CorporationId(2), true),
            Err(TokenError::CityFull)
        );

        map.place_token("A17", 0, CorporationId(3), true).unwrap();
        assert_eq!(
            map.place_token("A17", 1, CorporationId(3), true),
            Err(TokenError::AlreadyInHex)
        );
    }

    #[test]
    fn test_unchecked_placement_ignores_limits() {
        let mut map = map();
        map.place_token("I1", 0, CorporationId(1), false).unwrap();
        map.place_token("I1", 0, CorporationId(2), false).unwrap();

        assert_eq!(map.tokens_at("I1", 0).len(), 2);
    }

    #[test]
    fn test_unknown_city_always_fails() {
        let mut map = map();

        assert!(matches!(
            map.place_token("Z9", 0, CorporationId(1), false),
            Err(TokenError::UnknownCity { .. })
        ));
        assert!(matches!(
            map.place_token("I1", 3, CorporationId(1), false),
            Err(TokenError::UnknownCity { city_index: 3, .. })
        ));
    }
}
