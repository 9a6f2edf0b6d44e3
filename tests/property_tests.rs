//! Property tests over seeds and player counts.
//!
//! Whatever the shuffle, setup must deal correctly sized pools that
//! partition the trams, and acquisition plus restock must keep the pools
//! and the canonical ordering consistent.

use proptest::prelude::*;

use rust_1840::core::{GameConfig, Shuffler};
use rust_1840::game::Game;
use rust_1840::rounds::RoundKind;
use rust_1840::GameRng;

const NAMES: [&str; 6] = ["Ann", "Bo", "Cy", "Di", "Ed", "Flo"];

fn seeded(players: usize, seed: u64) -> Game<GameRng> {
    Game::with_seed(GameConfig::default(), &NAMES[..players], seed).unwrap()
}

proptest! {
    #[test]
    fn test_setup_pools(players in 3usize..=6, seed in any::<u64>()) {
        let game = seeded(players, seed);
        let registry = game.registry();

        prop_assert_eq!(registry.major_corporations().len(), players);
        prop_assert_eq!(registry.tram_corporations().len(), players + 1);
        prop_assert!(registry.trams_partitioned());
        prop_assert!(registry.verify_ordering().is_ok());

        let reserved = registry.by_sym("2").unwrap();
        prop_assert!(!registry.is_tram_available(reserved));

        for &id in registry.city_corporations() {
            let corp = registry.get(id).unwrap();
            prop_assert!(corp.floated);
            prop_assert!(game.config().par_range.city.contains(&corp.price()));
        }
    }

    #[test]
    fn test_acquire_and_restock(
        players in 3usize..=6,
        seed in any::<u64>(),
        purchases in 1usize..=3,
    ) {
        let mut game = seeded(players, seed);

        for i in 0..purchases {
            let majors = game.registry().major_corporations().to_vec();
            let buyer = majors[i % majors.len()];
            let tram = game.registry().tram_corporations()[0];
            game.buy_tram_corporation(buyer, tram).unwrap();

            prop_assert!(game.registry().get(tram).unwrap().floated);
            prop_assert!(game.registry().fleet(buyer).contains(&tram));
            prop_assert!(game.registry().trams_partitioned());
        }
        prop_assert_eq!(game.registry().tram_corporations().len(), players + 1 - purchases);

        let draws = game.shuffler().draws();
        let revealed = game.restock_tram_corporations().unwrap();
        prop_assert_eq!(revealed.len(), purchases);
        prop_assert_eq!(game.shuffler().draws(), draws + 1);
        prop_assert_eq!(game.registry().tram_corporations().len(), players + 1);
        prop_assert!(game.registry().trams_partitioned());
        prop_assert!(game.registry().verify_ordering().is_ok());

        let draws = game.shuffler().draws();
        prop_assert!(game.restock_tram_corporations().unwrap().is_empty());
        prop_assert_eq!(game.shuffler().draws(), draws);
    }

    #[test]
    fn test_round_sequence_independent_of_seed(players in 3usize..=6, seed in any::<u64>()) {
        let mut game = seeded(players, seed);
        let mut kinds = Vec::new();

        while !game.is_finished() {
            kinds.push(game.round().kind);
            game.next_round().unwrap();
        }

        prop_assert_eq!(kinds.len(), 47);
        prop_assert_eq!(kinds.iter().filter(|&&k| k == RoundKind::Stock).count(), 5);
        prop_assert_eq!(kinds.iter().filter(|&&k| k == RoundKind::Acquisition).count(), 6);
        prop_assert_eq!(kinds.iter().filter(|&&k| k == RoundKind::Operating).count(), 11);
    }
}
