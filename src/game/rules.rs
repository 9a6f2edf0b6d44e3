//! Game rules the step implementations consult.

use tracing::debug;

use super::Game;
use crate::core::{CorporationId, Entity, InvariantError, Shuffler};
use crate::corporations::CorporationType;
use crate::interfaces::{CurrencyFormat, SharePrice, StockMarket};

impl<S: Shuffler> Game<S> {
    /// Market par points a corporation may par at: the ones whose price lies
    /// in its type's par range. Trams have none.
    pub fn par_prices(
        &self,
        corporation: CorporationId,
    ) -> Result<Vec<SharePrice>, InvariantError> {
        let kind = self.registry.corporation(corporation)?.kind();
        let range = self.config.par_range.for_type(kind);
        Ok(self
            .market
            .par_prices()
            .iter()
            .copied()
            .filter(|p| range.contains(&p.price))
            .collect())
    }

    /// Only dealt majors that have not floated can be parred by players.
    #[must_use]
    pub fn can_par(&self, corporation: CorporationId) -> bool {
        self.registry.is_active_major(corporation)
            && self
                .registry
                .get(corporation)
                .is_some_and(|c| c.kind() == CorporationType::Major && !c.floated)
    }

    /// Whether every dealt major has floated.
    #[must_use]
    pub fn all_major_corporations_ipoed(&self) -> bool {
        self.registry
            .major_corporations()
            .iter()
            .all(|&id| self.registry.get(id).is_some_and(|c| c.floated))
    }

    /// Trams on a major's corporate card. Empty for everything else.
    #[must_use]
    pub fn corporate_card_minors(&self, corporation: CorporationId) -> &[CorporationId] {
        self.registry.fleet(corporation)
    }

    /// Certificate limit for this player count.
    #[must_use]
    pub fn cert_limit(&self) -> usize {
        self.cert_limit
    }

    /// Hand a private company to a player or corporation.
    pub fn grant_company(&mut self, sym: &str, owner: Entity) -> Result<(), InvariantError> {
        let index = self
            .companies
            .iter()
            .position(|c| c.sym == sym)
            .ok_or_else(|| InvariantError::UnknownCompany(sym.to_string()))?;

        let holder = match owner {
            Entity::Player(player) => {
                if player.index() >= self.players.player_count() {
                    return Err(InvariantError::UnknownPlayer(player.to_string()));
                }
                &mut self.players[player].companies
            }
            Entity::Corporation(id) => &mut self.registry.corporation_mut(id)?.companies,
        };
        holder.push(sym.to_string());
        self.companies[index].owner = Some(owner);
        Ok(())
    }

    /// Pay each owned company's revenue to its holder.
    ///
    /// Skipped while `cr_counter` is zero, i.e. in the opening round of a
    /// company-round cycle. Returns whether anything was processed.
    pub fn payout_companies(&mut self) -> Result<bool, InvariantError> {
        self.pay_company_revenue(self.counters.cr_counter)
    }

    /// Company payout against the given `cr_counter`. Every owner is checked
    /// before any cash moves.
    pub(super) fn pay_company_revenue(&mut self, cr_counter: u32) -> Result<bool, InvariantError> {
        if cr_counter == 0 {
            debug!("company payout suppressed");
            return Ok(false);
        }

        for owner in self.companies.iter().filter_map(|c| c.owner) {
            match owner {
                Entity::Player(player) if player.index() >= self.players.player_count() => {
                    return Err(InvariantError::UnknownPlayer(player.to_string()));
                }
                Entity::Player(_) => {}
                Entity::Corporation(id) => {
                    self.registry.corporation(id)?;
                }
            }
        }

        for company in &self.companies {
            let Some(owner) = company.owner else {
                continue;
            };
            let name = match owner {
                Entity::Player(player) => {
                    self.bank.spend(company.revenue, &mut self.players[player]);
                    self.players[player].name.clone()
                }
                Entity::Corporation(id) => {
                    let corp = self.registry.corporation_mut(id)?;
                    self.bank.spend(company.revenue, &mut *corp);
                    corp.name.clone()
                }
            };
            self.log.push_back(format!(
                "{name} collects {} from {}",
                self.currency.format(company.revenue),
                company.name
            ));
        }
        Ok(true)
    }
}
