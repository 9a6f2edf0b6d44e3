//! The 1840 game: setup, round sequencing, and corporation lifecycle.
//!
//! `Game` owns every piece of mutable state the core manages: players, the
//! bank, the corporation registry, the collaborators, the phase counters and
//! the current round. It is created once per game and then advanced one round
//! at a time with `next_round`.
//!
//! ## Submodules
//!
//! - `setup`: the one-time corporation deal
//! - `acquisition`: tram purchases and pool restocking
//! - `rules`: par, certificate limit, fleet and payout rules

pub mod acquisition;
pub mod rules;
pub mod setup;

use im::Vector;
use tracing::{debug, info};

use crate::core::config::ProgressKind;
use crate::core::{
    ConfigError, CorporationId, EngineResult, GameConfig, GameRng, InvariantError, Player,
    PlayerMap, ProgressEntry, Shuffler,
};
use crate::corporations::{Company, CorporationRegistry};
use crate::interfaces::{Bank, CurrencyFormat, Depot, FormatStr, ParMarket, TokenMap};
use crate::orchestrator::{next_transition, Hook, NextRound, PhaseCounters, ProgressSchedule};
use crate::rounds::{CompanyVariant, Round, RoundFactory, RoundKind};

pub use acquisition::{buy_tram_corporation, restock_tram_corporations};
pub use setup::{setup_corporations, SetupSummary};

/// A running game.
///
/// ## Example
///
/// ```
/// use rust_1840::core::GameConfig;
/// use rust_1840::game::Game;
/// use rust_1840::rounds::RoundKind;
///
/// let mut game = Game::with_seed(GameConfig::default(), &["Ann", "Bo", "Cy", "Di"], 42).unwrap();
/// assert_eq!(game.round().kind, RoundKind::Auction);
///
/// game.next_round().unwrap();
/// assert_eq!(game.round().kind, RoundKind::Stock);
/// assert_eq!(game.players().values().map(|p| p.cash).max(), Some(610));
/// ```
#[derive(Clone, Debug)]
pub struct Game<S: Shuffler = GameRng> {
    config: GameConfig,
    schedule: ProgressSchedule,
    players: PlayerMap<Player>,
    bank: Bank,
    registry: CorporationRegistry,
    companies: Vec<Company>,
    market: ParMarket,
    map: TokenMap,
    depot: Depot,
    currency: FormatStr,
    shuffler: S,
    counters: PhaseCounters,
    first_stock_round: bool,
    cert_limit: usize,
    log: Vector<String>,
    round: Round,
    finished: bool,
}

impl Game<GameRng> {
    /// Create a game shuffled by a seeded `GameRng`.
    pub fn with_seed(config: GameConfig, player_names: &[&str], seed: u64) -> EngineResult<Self> {
        Self::new(config, player_names, GameRng::new(seed))
    }
}

impl<S: Shuffler> Game<S> {
    /// Set up a game and open the initial auction.
    ///
    /// Fails without side effects when the configuration cannot support
    /// this player count.
    pub fn new(config: GameConfig, player_names: &[&str], shuffler: S) -> EngineResult<Self> {
        if player_names.is_empty() {
            return Err(ConfigError::UnsupportedPlayerCount(0).into());
        }
        config.validate()?;
        let player_count = player_names.len();
        let starting_cash = config.starting_cash_for(player_count)?;
        let cert_limit = config.cert_limit_for(player_count)?;

        let schedule = ProgressSchedule::from_entries(&config.progress)?;
        let mut registry = CorporationRegistry::new(&config.corporations)?;
        let market = ParMarket::from_config(&config);
        let mut map = TokenMap::from_specs(&config.hexes);
        let mut depot = Depot::from_specs(&config.trains);
        let mut shuffler = shuffler;

        let summary = setup_corporations(
            &config,
            &mut registry,
            player_count,
            &mut shuffler,
            &market,
            &mut map,
            &mut depot,
        )?;

        let mut bank = Bank::new(config.bank_cash);
        let mut players =
            PlayerMap::from_vec(player_names.iter().map(|&name| Player::new(name)).collect());
        for (_, player) in players.iter_mut() {
            bank.spend(starting_cash, player);
        }

        let companies = config.companies.iter().map(Company::from_spec).collect();
        let round = RoundFactory::new(&registry, player_count).auction();
        let currency = FormatStr::new(config.currency_format.clone());

        info!(
            players = player_count,
            majors = summary.majors.len(),
            trams = summary.trams.len(),
            starting_cash,
            "game set up"
        );

        let mut game = Self {
            config,
            schedule,
            players,
            bank,
            registry,
            companies,
            market,
            map,
            depot,
            currency,
            shuffler,
            counters: PhaseCounters {
                round_counter: 1,
                ..PhaseCounters::default()
            },
            first_stock_round: true,
            cert_limit,
            log: Vector::new(),
            round,
            finished: false,
        };
        game.log_round_header();
        Ok(game)
    }

    // === Accessors ===

    /// The configuration the game was created with.
    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Players by seat.
    #[must_use]
    pub fn players(&self) -> &PlayerMap<Player> {
        &self.players
    }

    /// Number of players.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.player_count()
    }

    /// The bank.
    #[must_use]
    pub fn bank(&self) -> &Bank {
        &self.bank
    }

    /// The corporation registry.
    #[must_use]
    pub fn registry(&self) -> &CorporationRegistry {
        &self.registry
    }

    /// Mutable registry, for step implementations that float, price or pay
    /// corporations.
    pub fn registry_mut(&mut self) -> &mut CorporationRegistry {
        &mut self.registry
    }

    /// Private companies.
    #[must_use]
    pub fn companies(&self) -> &[Company] {
        &self.companies
    }

    /// The stock market.
    #[must_use]
    pub fn market(&self) -> &ParMarket {
        &self.market
    }

    /// The token map.
    #[must_use]
    pub fn map(&self) -> &TokenMap {
        &self.map
    }

    /// The train depot.
    #[must_use]
    pub fn depot(&self) -> &Depot {
        &self.depot
    }

    /// Currency formatter.
    #[must_use]
    pub fn currency(&self) -> &FormatStr {
        &self.currency
    }

    /// The injected shuffler.
    #[must_use]
    pub fn shuffler(&self) -> &S {
        &self.shuffler
    }

    /// Shuffles drawn so far, setup included.
    #[must_use]
    pub fn shuffler_draws(&self) -> u64 {
        self.shuffler.draws()
    }

    /// Phase counters.
    #[must_use]
    pub fn counters(&self) -> PhaseCounters {
        self.counters
    }

    /// Whether the one-time stock subsidy is still pending.
    #[must_use]
    pub fn first_stock_round(&self) -> bool {
        self.first_stock_round
    }

    /// Player-facing log.
    #[must_use]
    pub fn log(&self) -> &Vector<String> {
        &self.log
    }

    /// The current round. After the game ends this is the last round played.
    #[must_use]
    pub fn round(&self) -> &Round {
        &self.round
    }

    /// Display name of the current round.
    #[must_use]
    pub fn round_name(&self) -> String {
        self.round.kind.name(&self.config.operating_round_name)
    }

    /// Whether the game has ended.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// The published progress table.
    #[must_use]
    pub fn progress_information(&self) -> &[ProgressEntry] {
        self.schedule.entries()
    }

    /// Index of the current round in the progress table. The acquisition
    /// round belongs to its company cycle's entry.
    #[must_use]
    pub fn progress_position(&self) -> Option<usize> {
        if self.finished {
            return self
                .schedule
                .entries()
                .iter()
                .position(|e| e.kind == ProgressKind::End);
        }
        let turn = self.counters.turn;
        match self.round.kind {
            RoundKind::Auction => self
                .schedule
                .entries()
                .iter()
                .position(|e| e.kind == ProgressKind::Pre),
            RoundKind::Stock => self.schedule.position(ProgressKind::Stock, &turn.to_string()),
            RoundKind::Company(_) | RoundKind::Acquisition => {
                self.schedule.company_position(turn)
            }
            RoundKind::Operating => {
                let offset = (self.round.round_num.saturating_sub(1) % 26) as u8;
                let letter = char::from(b'a' + offset);
                self.schedule.position(ProgressKind::Line, &format!("{turn}{letter}"))
            }
        }
    }

    // === Lifecycle ===

    /// Buy `tram` into `buyer`'s fleet.
    pub fn buy_tram_corporation(
        &mut self,
        buyer: CorporationId,
        tram: CorporationId,
    ) -> Result<(), InvariantError> {
        buy_tram_corporation(&mut self.registry, buyer, tram)?;
        let buyer_name = self.registry.corporation(buyer)?.name.clone();
        let tram_name = self.registry.corporation(tram)?.name.clone();
        self.log.push_back(format!("{buyer_name} acquires {tram_name}"));
        Ok(())
    }

    /// Top the active tram pool back up to `player_count + 1`.
    pub fn restock_tram_corporations(&mut self) -> Result<Vec<CorporationId>, InvariantError> {
        let target = self.player_count() + 1;
        let revealed = restock_tram_corporations(
            &mut self.registry,
            &mut self.shuffler,
            target,
            &self.config.available_corp_color,
        )?;
        for &id in &revealed {
            let name = self.registry.corporation(id)?.name.clone();
            self.log.push_back(format!("{name} becomes available"));
        }
        Ok(revealed)
    }

    // === Round sequencing ===

    /// Finish the current round and start the next one.
    ///
    /// Returns the new round. Once the game has ended every call fails with
    /// `InvariantError::GameOver`.
    pub fn next_round(&mut self) -> EngineResult<&Round> {
        if self.finished {
            return Err(InvariantError::GameOver.into());
        }

        let transition = next_transition(
            self.round.kind,
            self.round.round_num,
            self.counters,
            &self.schedule,
        );

        for &hook in &transition.hooks {
            self.run_hook(hook, transition.counters)?;
        }
        if let NextRound::Operating { .. } = transition.next {
            self.pay_company_revenue(transition.counters.cr_counter)?;
        }
        self.counters = transition.counters;

        match transition.next {
            NextRound::Stock => self.grant_stock_subsidy(),
            NextRound::End => {
                self.finished = true;
                self.log.push_back("-- Game over --".to_string());
                info!(rounds = self.counters.round_counter, "game over");
                return Ok(&self.round);
            }
            NextRound::Company { .. }
            | NextRound::Acquisition
            | NextRound::Operating { .. } => {}
        }

        let factory = RoundFactory::new(&self.registry, self.player_count());
        let round = match transition.next {
            NextRound::Stock => factory.stock(),
            NextRound::Company { variant, round_num } => factory.company(variant, round_num),
            NextRound::Acquisition => factory.acquisition(),
            NextRound::Operating { round_num } => factory.operating(round_num),
            NextRound::End => return Err(InvariantError::GameOver.into()),
        };

        self.round = round;
        self.log_round_header();
        info!(
            round = %self.round_name(),
            round_num = self.round.round_num,
            round_counter = self.counters.round_counter,
            turn = self.counters.turn,
            "round started"
        );
        Ok(&self.round)
    }

    fn run_hook(&mut self, hook: Hook, counters: PhaseCounters) -> Result<(), InvariantError> {
        match hook {
            Hook::InitRoundFinished => debug!("initial auction finished"),
            Hook::OperatingRoundFinished => {
                debug!(round_num = self.round.round_num, "line round finished");
            }
            Hook::OperatingSetFinished => {
                info!(turn = self.counters.turn, "line round set finished");
            }
            Hook::CompanyCycleStarted => {
                debug!(turn = counters.turn, "company round cycle started");
            }
            Hook::RestockTrams => {
                self.restock_tram_corporations()?;
            }
        }
        Ok(())
    }

    fn grant_stock_subsidy(&mut self) {
        if !self.first_stock_round {
            return;
        }
        self.first_stock_round = false;

        let amount = self.config.additional_cash;
        for (_, player) in self.players.iter_mut() {
            self.bank.spend(amount, player);
        }
        self.log.push_back(format!(
            "Every Player receives {} to par a corporation",
            self.currency.format(amount)
        ));
    }

    fn log_round_header(&mut self) {
        let turn = self.counters.turn;
        let header = match self.round.kind {
            RoundKind::Auction => "-- Auction Round --".to_string(),
            RoundKind::Stock => format!("-- Stock Round {turn} --"),
            RoundKind::Company(CompanyVariant::Route) => format!("-- Company Round {turn} --"),
            RoundKind::Company(_) | RoundKind::Acquisition => return,
            RoundKind::Operating => format!(
                "-- {} Round {turn}.{} --",
                self.config.operating_round_name, self.round.round_num
            ),
        };
        self.log.push_back(header);
    }
}
