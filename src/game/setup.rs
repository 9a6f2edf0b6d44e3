//! One-time corporation setup.
//!
//! Runs before the first round:
//! 1. Deal `player_count + 1` trams into the active pool, never the reserved
//!    one, and mark them with the available color.
//! 2. Deal `player_count` majors; the rest stay in the box.
//! 3. Par, float and token every city corporation and hand it a starter
//!    train.
//! 4. Rebuild the canonical ordering and the empty fleets.
//!
//! Works against the collaborator traits, so any market, map or depot can
//! be plugged in.

use tracing::debug;

use crate::core::{
    ConfigError, CorporationId, EngineError, EngineResult, GameConfig, InvariantError, Shuffler,
};
use crate::corporations::{CorporationRegistry, CorporationType, Owner};
use crate::interfaces::{GameMap, StockMarket, TokenError, TrainDepot};

/// What setup dealt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SetupSummary {
    /// Active majors, in dealt order.
    pub majors: Vec<CorporationId>,
    /// City corporations, in catalog order.
    pub cities: Vec<CorporationId>,
    /// Active trams, in dealt order.
    pub trams: Vec<CorporationId>,
    /// Trams held back, including the reserved one.
    pub unavailable_trams: Vec<CorporationId>,
}

/// Deal and initialize the corporations for `player_count` players.
pub fn setup_corporations<S, M, G, D>(
    config: &GameConfig,
    registry: &mut CorporationRegistry,
    player_count: usize,
    shuffler: &mut S,
    market: &M,
    map: &mut G,
    depot: &mut D,
) -> EngineResult<SetupSummary>
where
    S: Shuffler,
    M: StockMarket,
    G: GameMap,
    D: TrainDepot,
{
    let all_trams = registry.corporations_of_type(CorporationType::Tram);
    let cities = registry.corporations_of_type(CorporationType::City);
    let all_majors = registry.corporations_of_type(CorporationType::Major);

    let dealable: Vec<_> = all_trams
        .iter()
        .copied()
        .filter(|&id| registry.get(id).is_some_and(|c| c.sym != config.reserved_tram))
        .collect();
    let tram_count = player_count + 1;
    require(CorporationType::Tram, tram_count, dealable.len())?;
    require(CorporationType::Major, player_count, all_majors.len())?;

    // === Trams ===
    let trams = shuffler.sample(&dealable, tram_count);
    for &id in &trams {
        registry.corporation_mut(id)?.reservation_color = Some(config.available_corp_color.clone());
    }
    let unavailable_trams: Vec<_> = all_trams
        .iter()
        .copied()
        .filter(|id| !trams.contains(id))
        .collect();

    // === Majors ===
    let majors = shuffler.sample(&all_majors, player_count);

    // === Cities ===
    for &id in &cities {
        float_city(config, registry, id, market, map, depot)?;
    }

    registry.set_tram_pools(trams.clone(), unavailable_trams.clone());
    registry.replace_corporation_order(&majors, &cities, &trams);
    registry.init_fleets();
    registry.verify_ordering()?;

    Ok(SetupSummary {
        majors,
        cities,
        trams,
        unavailable_trams,
    })
}

fn require(kind: CorporationType, needed: usize, available: usize) -> Result<(), ConfigError> {
    if available < needed {
        return Err(ConfigError::NotEnoughCorporations {
            kind: kind.name(),
            needed,
            available,
        });
    }
    Ok(())
}

fn float_city<M, G, D>(
    config: &GameConfig,
    registry: &mut CorporationRegistry,
    id: CorporationId,
    market: &M,
    map: &mut G,
    depot: &mut D,
) -> EngineResult<()>
where
    M: StockMarket,
    G: GameMap,
    D: TrainDepot,
{
    let corp = registry.corporation_mut(id)?;
    let sym = corp.sym.clone();

    let par_value = *config
        .initial_city_par
        .get(&sym)
        .ok_or_else(|| ConfigError::MissingCityEntry(sym.clone()))?;
    let par = market
        .par_prices()
        .iter()
        .copied()
        .find(|p| p.price == par_value)
        .ok_or_else(|| ConfigError::UnknownParPrice {
            corporation: sym.clone(),
            price: par_value,
        })?;
    market.set_par(corp, par);
    corp.floated = true;

    let placements = config
        .initial_city_tokens
        .get(&sym)
        .ok_or_else(|| ConfigError::MissingCityEntry(sym.clone()))?;
    for placement in placements {
        let token = corp
            .next_free_token()
            .ok_or_else(|| ConfigError::NoFreeToken(sym.clone()))?;
        map.place_token(&placement.coordinate, placement.city_index, id, false)
            .map_err(|err| match err {
                TokenError::UnknownCity {
                    coordinate,
                    city_index,
                } => EngineError::from(ConfigError::UnknownCity {
                    coordinate,
                    city_index,
                }),
                other => InvariantError::TokenRejected {
                    corporation: id,
                    coordinate: placement.coordinate.clone(),
                    reason: other.to_string(),
                }
                .into(),
            })?;
        token.coordinate = Some(placement.coordinate.clone());
        token.city_index = placement.city_index;
    }

    corp.owner = Owner::SharePool;

    let train = depot
        .remove_train(&config.starter_train)
        .ok_or_else(|| ConfigError::MissingStarterTrain {
            corporation: sym.clone(),
            train: config.starter_train.clone(),
        })?;
    corp.trains.push(train);

    debug!(
        corporation = %sym,
        par = par_value,
        tokens = placements.len(),
        "city corporation floated"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::TrainSpec;
    use crate::core::IdentityShuffler;
    use crate::interfaces::{Depot, ParMarket, TokenMap};

    fn run(
        config: &GameConfig,
        player_count: usize,
    ) -> (EngineResult<SetupSummary>, CorporationRegistry, TokenMap, Depot) {
        let mut registry = CorporationRegistry::new(&config.corporations).unwrap();
        let market = ParMarket::from_config(config);
        let mut map = TokenMap::from_specs(&config.hexes);
        let mut depot = Depot::from_specs(&config.trains);
        let result = setup_corporations(
            config,
            &mut registry,
            player_count,
            &mut IdentityShuffler::new(),
            &market,
            &mut map,
            &mut depot,
        );
        (result, registry, map, depot)
    }

    #[test]
    fn test_identity_deal() {
        let config = GameConfig::default();
        let (result, registry, _, _) = run(&config, 4);
        let summary = result.unwrap();

        let syms = |ids: &[CorporationId]| -> Vec<String> {
            ids.iter().map(|&id| registry.get(id).unwrap().sym.clone()).collect()
        };
        assert_eq!(syms(&summary.majors), vec!["R", "O", "S", "B"]);
        assert_eq!(syms(&summary.trams), vec!["1", "3", "4", "5", "6"]);
        assert!(syms(&summary.unavailable_trams).contains(&"2".to_string()));
        assert_eq!(summary.unavailable_trams.len(), 7);
    }

    #[test]
    fn test_cities_floated_with_tokens_and_train() {
        let config = GameConfig::default();
        let (result, registry, map, depot) = run(&config, 3);
        result.unwrap();

        let wien = registry.get(registry.by_sym("W").unwrap()).unwrap();
        assert!(wien.floated);
        assert_eq!(wien.price(), 95);
        assert_eq!(wien.owner, Owner::SharePool);
        assert_eq!(wien.free_tokens(), 0);
        assert_eq!(wien.trains.len(), 1);
        assert_eq!(map.tokens_at("I1", 0), &[wien.id]);

        let donau = registry.by_sym("D").unwrap();
        assert_eq!(map.tokens_at("A17", 2), &[donau]);
        assert_eq!(depot.remaining("City"), 0);
    }

    #[test]
    fn test_missing_starter_train() {
        let config = GameConfig::default().with_trains(vec![TrainSpec {
            name: "City".to_string(),
            count: 3,
            price: 0,
        }]);
        let (result, _, _, _) = run(&config, 3);

        assert!(matches!(
            result,
            Err(EngineError::Config(ConfigError::MissingStarterTrain { .. }))
        ));
    }

    #[test]
    fn test_unknown_par_price() {
        let mut config = GameConfig::default();
        config.par_points.retain(|p| p.price != 65);
        let (result, _, _, _) = run(&config, 3);

        assert_eq!(
            result,
            Err(ConfigError::UnknownParPrice {
                corporation: "D".to_string(),
                price: 65,
            }
            .into())
        );
    }

    #[test]
    fn test_unknown_city() {
        let mut config = GameConfig::default();
        config.hexes.retain(|h| h.coordinate != "I9");
        let (result, _, _, _) = run(&config, 3);

        assert_eq!(
            result,
            Err(ConfigError::UnknownCity {
                coordinate: "I9".to_string(),
                city_index: 0,
            }
            .into())
        );
    }

    #[test]
    fn test_not_enough_trams() {
        let config = GameConfig::default();
        let (result, _, _, _) = run(&config, 11);

        assert_eq!(
            result,
            Err(ConfigError::NotEnoughCorporations {
                kind: "tram",
                needed: 12,
                available: 11,
            }
            .into())
        );
    }
}
