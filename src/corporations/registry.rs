//! Corporation registry.
//!
//! The registry owns every corporation in the box and the typed pools that
//! say which of them are in play:
//! - `major_corporations`: the majors dealt for this game
//! - `city_corporations`: every city corporation
//! - `tram_corporations`: trams currently available for acquisition
//! - `unavailable_tram_corporations`: trams waiting to be restocked
//!
//! plus the fleets, mapping each active major to the trams it acquired.
//!
//! The canonical ordering (`corporations()`) is not stored as one list. It
//! is computed from the major segment, the city segment and the tram
//! segment, where the tram segment lists every tram that has entered play in
//! the order it did so (acquired trams keep their place).

use rustc_hash::FxHashMap;

use super::corporation::{Corporation, CorporationType};
use crate::core::config::CorporationSpec;
use crate::core::error::{ConfigError, InvariantError};
use crate::core::CorporationId;

/// Registry of corporations and their pools.
///
/// ## Example
///
/// ```
/// use rust_1840::core::GameConfig;
/// use rust_1840::corporations::{CorporationRegistry, CorporationType};
///
/// let config = GameConfig::default();
/// let registry = CorporationRegistry::new(&config.corporations).unwrap();
///
/// assert_eq!(registry.corporations_of_type(CorporationType::City).len(), 4);
/// assert!(registry.corporations().is_empty()); // nothing in play before setup
/// ```
#[derive(Clone, Debug, Default)]
pub struct CorporationRegistry {
    corporations: Vec<Corporation>,
    by_sym: FxHashMap<String, CorporationId>,
    major_corporations: Vec<CorporationId>,
    city_corporations: Vec<CorporationId>,
    tram_order: Vec<CorporationId>,
    tram_corporations: Vec<CorporationId>,
    unavailable_tram_corporations: Vec<CorporationId>,
    fleets: FxHashMap<CorporationId, Vec<CorporationId>>,
}

impl CorporationRegistry {
    /// Register the catalog. Ids follow catalog order.
    pub fn new(specs: &[CorporationSpec]) -> Result<Self, ConfigError> {
        let mut registry = Self::default();
        for (index, spec) in specs.iter().enumerate() {
            let id = CorporationId(index as u16);
            if registry.by_sym.insert(spec.sym.clone(), id).is_some() {
                return Err(ConfigError::DuplicateCorporation(spec.sym.clone()));
            }
            registry.corporations.push(Corporation::from_spec(id, spec));
        }
        Ok(registry)
    }

    // === Lookup ===

    /// Number of registered corporations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.corporations.len()
    }

    /// Whether nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.corporations.is_empty()
    }

    /// Get a corporation.
    #[must_use]
    pub fn get(&self, id: CorporationId) -> Option<&Corporation> {
        self.corporations.get(id.index())
    }

    /// Get a corporation mutably.
    pub fn get_mut(&mut self, id: CorporationId) -> Option<&mut Corporation> {
        self.corporations.get_mut(id.index())
    }

    /// Get a corporation or fail with `UnknownCorporation`.
    pub fn corporation(&self, id: CorporationId) -> Result<&Corporation, InvariantError> {
        self.get(id)
            .ok_or_else(|| InvariantError::UnknownCorporation(id.to_string()))
    }

    /// Mutable variant of `corporation`.
    pub fn corporation_mut(
        &mut self,
        id: CorporationId,
    ) -> Result<&mut Corporation, InvariantError> {
        self.corporations
            .get_mut(id.index())
            .ok_or_else(|| InvariantError::UnknownCorporation(id.to_string()))
    }

    /// Id for a symbol.
    #[must_use]
    pub fn by_sym(&self, sym: &str) -> Option<CorporationId> {
        self.by_sym.get(sym).copied()
    }

    /// Every registered corporation, including dormant ones.
    pub fn iter(&self) -> impl Iterator<Item = &Corporation> {
        self.corporations.iter()
    }

    /// All corporations of a type, in registration order.
    #[must_use]
    pub fn corporations_of_type(&self, kind: CorporationType) -> Vec<CorporationId> {
        self.corporations
            .iter()
            .filter(|c| c.kind() == kind)
            .map(|c| c.id)
            .collect()
    }

    // === Pools ===

    /// Majors dealt for this game.
    #[must_use]
    pub fn major_corporations(&self) -> &[CorporationId] {
        &self.major_corporations
    }

    /// City corporations.
    #[must_use]
    pub fn city_corporations(&self) -> &[CorporationId] {
        &self.city_corporations
    }

    /// Trams available for acquisition.
    #[must_use]
    pub fn tram_corporations(&self) -> &[CorporationId] {
        &self.tram_corporations
    }

    /// Trams waiting to be restocked.
    #[must_use]
    pub fn unavailable_tram_corporations(&self) -> &[CorporationId] {
        &self.unavailable_tram_corporations
    }

    /// Whether `id` is one of the dealt majors.
    #[must_use]
    pub fn is_active_major(&self, id: CorporationId) -> bool {
        self.major_corporations.contains(&id)
    }

    /// Whether `id` is in the active tram pool.
    #[must_use]
    pub fn is_tram_available(&self, id: CorporationId) -> bool {
        self.tram_corporations.contains(&id)
    }

    /// Set the tram pools. The tram ordering segment restarts from `active`.
    pub fn set_tram_pools(&mut self, active: Vec<CorporationId>, unavailable: Vec<CorporationId>) {
        self.tram_order = active.clone();
        self.tram_corporations = active;
        self.unavailable_tram_corporations = unavailable;
    }

    /// Move trams from the unavailable pool into play, appending them to the
    /// active pool and the ordering.
    pub fn reveal_trams(&mut self, trams: &[CorporationId]) {
        self.unavailable_tram_corporations.retain(|id| !trams.contains(id));
        self.tram_corporations.extend_from_slice(trams);
        self.tram_order.extend_from_slice(trams);
    }

    /// Take a tram out of the active pool.
    pub fn take_available_tram(&mut self, tram: CorporationId) -> Result<(), InvariantError> {
        let index = self
            .tram_corporations
            .iter()
            .position(|&id| id == tram)
            .ok_or(InvariantError::TramNotAvailable(tram))?;
        self.tram_corporations.remove(index);
        Ok(())
    }

    // === Fleets ===

    /// Start an empty fleet for every dealt major.
    pub fn init_fleets(&mut self) {
        self.fleets = self
            .major_corporations
            .iter()
            .map(|&id| (id, Vec::new()))
            .collect();
    }

    /// Trams acquired by a major, in acquisition order.
    #[must_use]
    pub fn fleet(&self, major: CorporationId) -> &[CorporationId] {
        self.fleets.get(&major).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The major whose fleet holds `tram`.
    #[must_use]
    pub fn fleet_owner(&self, tram: CorporationId) -> Option<CorporationId> {
        self.fleets
            .iter()
            .find(|(_, fleet)| fleet.contains(&tram))
            .map(|(&major, _)| major)
    }

    /// Append a tram to a major's fleet.
    pub fn add_to_fleet(
        &mut self,
        major: CorporationId,
        tram: CorporationId,
    ) -> Result<(), InvariantError> {
        self.fleets
            .get_mut(&major)
            .ok_or(InvariantError::NotAnActiveMajor(major))?
            .push(tram);
        Ok(())
    }

    // === Ordering ===

    /// Rebuild the canonical ordering segments. Callers pass disjoint lists.
    pub fn replace_corporation_order(
        &mut self,
        majors: &[CorporationId],
        cities: &[CorporationId],
        trams: &[CorporationId],
    ) {
        self.major_corporations = majors.to_vec();
        self.city_corporations = cities.to_vec();
        self.tram_order = trams.to_vec();
    }

    /// Canonical ordering: majors, then cities, then trams.
    #[must_use]
    pub fn corporations(&self) -> Vec<CorporationId> {
        self.major_corporations
            .iter()
            .chain(&self.city_corporations)
            .chain(&self.tram_order)
            .copied()
            .collect()
    }

    /// Floated corporations in operating order: highest share price first,
    /// ties kept in canonical order.
    #[must_use]
    pub fn operating_order(&self) -> Vec<CorporationId> {
        let mut order: Vec<_> = self
            .corporations()
            .into_iter()
            .filter(|&id| self.get(id).is_some_and(|c| c.floated))
            .collect();
        order.sort_by_key(|&id| std::cmp::Reverse(self.get(id).map_or(0, Corporation::price)));
        order
    }

    /// Check that every corporation in play appears exactly once in the
    /// canonical ordering.
    pub fn verify_ordering(&self) -> Result<(), InvariantError> {
        let order = self.corporations();
        let mut seen = rustc_hash::FxHashSet::default();
        for &id in &order {
            if !seen.insert(id) {
                return Err(InvariantError::OrderingRepeats(id));
            }
        }

        let in_play = self
            .major_corporations
            .iter()
            .chain(&self.city_corporations)
            .chain(&self.tram_corporations)
            .chain(self.fleets.values().flatten());
        for id in in_play {
            if !seen.contains(id) {
                return Err(InvariantError::OrderingOmits(*id));
            }
        }
        Ok(())
    }

    /// Whether the active pool, the unavailable pool and the fleets split
    /// the tram corporations without overlap or omission.
    #[must_use]
    pub fn trams_partitioned(&self) -> bool {
        let mut all = self.corporations_of_type(CorporationType::Tram);
        let mut held: Vec<_> = self
            .tram_corporations
            .iter()
            .chain(&self.unavailable_tram_corporations)
            .chain(self.fleets.values().flatten())
            .copied()
            .collect();
        all.sort();
        held.sort();
        all == held
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameConfig;

    fn registry() -> CorporationRegistry {
        CorporationRegistry::new(&GameConfig::default().corporations).unwrap()
    }

    fn sym(registry: &CorporationRegistry, sym: &str) -> CorporationId {
        registry.by_sym(sym).unwrap()
    }

    #[test]
    fn test_corporations_of_type_in_registration_order() {
        let registry = registry();

        let cities: Vec<_> = registry
            .corporations_of_type(CorporationType::City)
            .into_iter()
            .map(|id| registry.get(id).unwrap().sym.clone())
            .collect();

        assert_eq!(cities, vec!["W", "V", "G", "D"]);
        assert_eq!(registry.corporations_of_type(CorporationType::Tram).len(), 12);
    }

    #[test]
    fn test_duplicate_symbol_rejected() {
        let mut specs = GameConfig::default().corporations;
        specs.push(specs[4].clone());

        assert!(matches!(
            CorporationRegistry::new(&specs),
            Err(ConfigError::DuplicateCorporation(_))
        ));
    }

    #[test]
    fn test_replace_order_concatenates_segments() {
        let mut registry = registry();
        let r = sym(&registry, "R");
        let w = sym(&registry, "W");
        let t1 = sym(&registry, "1");

        registry.replace_corporation_order(&[r], &[w], &[t1]);

        assert_eq!(registry.corporations(), vec![r, w, t1]);
    }

    #[test]
    fn test_reveal_and_take_trams() {
        let mut registry = registry();
        let t1 = sym(&registry, "1");
        let t3 = sym(&registry, "3");
        let t4 = sym(&registry, "4");

        registry.set_tram_pools(vec![t1], vec![t3, t4]);
        registry.reveal_trams(&[t4]);

        assert_eq!(registry.tram_corporations(), &[t1, t4]);
        assert_eq!(registry.unavailable_tram_corporations(), &[t3]);

        registry.take_available_tram(t1).unwrap();
        assert_eq!(registry.tram_corporations(), &[t4]);
        assert_eq!(
            registry.take_available_tram(t1),
            Err(InvariantError::TramNotAvailable(t1))
        );
    }

    #[test]
    fn test_fleets() {
        let mut registry = registry();
        let r = sym(&registry, "R");
        let o = sym(&registry, "O");
        let t1 = sym(&registry, "1");

        registry.replace_corporation_order(&[r], &[], &[]);
        registry.init_fleets();
        registry.add_to_fleet(r, t1).unwrap();

        assert_eq!(registry.fleet(r), &[t1]);
        assert!(registry.fleet(o).is_empty());
        assert_eq!(registry.fleet_owner(t1), Some(r));
        assert_eq!(
            registry.add_to_fleet(o, t1),
            Err(InvariantError::NotAnActiveMajor(o))
        );
    }

    #[test]
    fn test_verify_ordering_detects_omission_and_repeats() {
        let mut registry = registry();
        let r = sym(&registry, "R");
        let w = sym(&registry, "W");
        let t1 = sym(&registry, "1");

        registry.replace_corporation_order(&[r], &[w], &[]);
        registry.tram_corporations = vec![t1];
        assert_eq!(registry.verify_ordering(), Err(InvariantError::OrderingOmits(t1)));

        registry.replace_corporation_order(&[r], &[w], &[t1, t1]);
        assert_eq!(registry.verify_ordering(), Err(InvariantError::OrderingRepeats(t1)));

        registry.replace_corporation_order(&[r], &[w], &[t1]);
        assert!(registry.verify_ordering().is_ok());
    }

    #[test]
    fn test_operating_order_sorts_by_price() {
        use crate::core::config::ParKind;
        use crate::interfaces::SharePrice;

        let mut registry = registry();
        let r = sym(&registry, "R");
        let w = sym(&registry, "W");
        let g = sym(&registry, "G");
        let o = sym(&registry, "O");
        registry.replace_corporation_order(&[r, o], &[w, g], &[]);

        for (id, price) in [(r, 80), (w, 95), (g, 80)] {
            let corp = registry.get_mut(id).unwrap();
            corp.floated = true;
            corp.share_price = Some(SharePrice::par(price, ParKind::City));
        }

        assert_eq!(registry.operating_order(), vec![w, r, g]);
    }

    #[test]
    fn test_partition_check() {
        let mut registry = registry();
        let trams = registry.corporations_of_type(CorporationType::Tram);
        let (active, rest) = trams.split_at(4);

        registry.set_tram_pools(active.to_vec(), rest.to_vec());
        assert!(registry.trams_partitioned());

        registry.unavailable_tram_corporations.pop();
        assert!(!registry.trams_partitioned());
    }
}
