//! Game configuration.
//!
//! `GameConfig` carries every table the engine reads: the corporation
//! catalog, cash tables, par ranges, the fixed city corporation setup, the
//! train roster, the hexes tokens can be placed on, and the published
//! progress table. `GameConfig::default()` is the 1840 configuration; games
//! can override pieces with the `with_*` builders or load a whole document
//! with `GameConfig::from_json`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::error::ConfigError;
use crate::corporations::CorporationType;

/// Catalog entry for one corporation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorporationSpec {
    /// Short symbol, unique across the catalog.
    pub sym: String,
    /// Display name.
    pub name: String,
    /// Corporation type.
    #[serde(rename = "type")]
    pub kind: CorporationType,
    /// Registered color name (see `GameConfig::colors`).
    pub color: String,
    /// Text color name.
    #[serde(default = "default_text_color")]
    pub text_color: String,
    /// Number of station tokens.
    pub tokens: usize,
    /// Certificate percentages; the first one is the president's.
    pub shares: Vec<u8>,
}

fn default_text_color() -> String {
    "white".to_string()
}

impl CorporationSpec {
    /// Create a catalog entry with the standard 20% + 8×10% certificates.
    pub fn new(
        sym: impl Into<String>,
        name: impl Into<String>,
        kind: CorporationType,
        color: impl Into<String>,
        tokens: usize,
    ) -> Self {
        let shares = match kind {
            CorporationType::Tram => vec![100],
            CorporationType::Major | CorporationType::City => {
                std::iter::once(20).chain(std::iter::repeat(10).take(8)).collect()
            }
        };
        Self {
            sym: sym.into(),
            name: name.into(),
            kind,
            color: color.into(),
            text_color: default_text_color(),
            tokens,
            shares,
        }
    }
}

/// Private company that pays revenue to its owner.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanySpec {
    /// Short name shown in the spreadsheet.
    pub sym: String,
    /// Display name.
    pub name: String,
    /// Face value.
    pub value: i64,
    /// Revenue paid on each payout.
    pub revenue: i64,
}

/// A fixed token placement for a city corporation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPlacement {
    /// Hex coordinate, e.g. `A17`.
    pub coordinate: String,
    /// City slot on the hex tile.
    #[serde(default)]
    pub city_index: usize,
}

impl TokenPlacement {
    /// Placement in the first city of a hex.
    pub fn at(coordinate: impl Into<String>) -> Self {
        Self {
            coordinate: coordinate.into(),
            city_index: 0,
        }
    }

    /// Placement in a specific city of a hex.
    pub fn at_city(coordinate: impl Into<String>, city_index: usize) -> Self {
        Self {
            coordinate: coordinate.into(),
            city_index,
        }
    }
}

/// Train roster entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainSpec {
    /// Train type name.
    pub name: String,
    /// Copies in the depot.
    pub count: usize,
    /// Purchase price.
    pub price: i64,
}

/// A hex that can hold tokens.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HexSpec {
    /// Hex coordinate.
    pub coordinate: String,
    /// Token slots per city on this hex.
    pub cities: Vec<usize>,
}

/// Which market text a par point belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ParKind {
    /// City corporation par.
    #[serde(rename = "par")]
    City,
    /// Major corporation par.
    #[serde(rename = "par_2")]
    Major,
}

/// A par point on the stock market.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParPoint {
    /// Share price.
    pub price: i64,
    /// Market text / color group.
    pub kind: ParKind,
}

/// Entry kinds of the published progress table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProgressKind {
    /// Initial auction.
    #[serde(rename = "PRE")]
    Pre,
    /// Stock round.
    #[serde(rename = "SR")]
    Stock,
    /// Company round cycle.
    #[serde(rename = "CR")]
    Company,
    /// Line (operating) round.
    #[serde(rename = "LR")]
    Line,
    /// Game end.
    End,
}

/// One entry of the progress table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressEntry {
    /// Entry kind.
    #[serde(rename = "type")]
    pub kind: ProgressKind,
    /// Round label, e.g. `3b`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Multiplier text, e.g. `2x`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl ProgressEntry {
    fn new(kind: ProgressKind, name: Option<&str>, value: Option<&str>) -> Self {
        Self {
            kind,
            name: name.map(str::to_string),
            value: value.map(str::to_string),
        }
    }
}

/// Par ranges per corporation type.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParRange {
    /// Allowed city corporation pars.
    pub city: Vec<i64>,
    /// Allowed major corporation pars.
    pub major: Vec<i64>,
}

impl ParRange {
    /// Allowed pars for a corporation type. Trams never par.
    #[must_use]
    pub fn for_type(&self, kind: CorporationType) -> &[i64] {
        match kind {
            CorporationType::City => self.city.as_slice(),
            CorporationType::Major => self.major.as_slice(),
            CorporationType::Tram => &[],
        }
    }
}

/// Complete game configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Game title.
    pub title: String,
    /// Bank cash.
    pub bank_cash: i64,
    /// Starting cash by player count.
    pub starting_cash: BTreeMap<usize, i64>,
    /// Certificate limit by player count.
    pub cert_limit: BTreeMap<usize, usize>,
    /// One-time cash every player receives in the first stock round.
    pub additional_cash: i64,
    /// `%d`-style currency format.
    pub currency_format: String,
    /// Display name of the main operating round.
    pub operating_round_name: String,
    /// Reservation color marking available tram corporations.
    pub available_corp_color: String,
    /// Tram symbol never dealt into the opening pool.
    pub reserved_tram: String,
    /// Train type handed to every city corporation.
    pub starter_train: String,
    /// Registered color names to hex values.
    pub colors: BTreeMap<String, String>,
    /// Market text per par kind.
    pub market_text: BTreeMap<ParKind, String>,
    /// Market color name per par kind.
    pub market_colors: BTreeMap<ParKind, String>,
    /// Allowed pars per corporation type.
    pub par_range: ParRange,
    /// Fixed par per city corporation symbol.
    pub initial_city_par: BTreeMap<String, i64>,
    /// Fixed token placements per city corporation symbol.
    pub initial_city_tokens: BTreeMap<String, Vec<TokenPlacement>>,
    /// Market par points.
    pub par_points: Vec<ParPoint>,
    /// Corporation catalog.
    pub corporations: Vec<CorporationSpec>,
    /// Private companies.
    #[serde(default)]
    pub companies: Vec<CompanySpec>,
    /// Train roster, in depot order.
    pub trains: Vec<TrainSpec>,
    /// Hexes that can hold tokens.
    pub hexes: Vec<HexSpec>,
    /// Published progress table.
    pub progress: Vec<ProgressEntry>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            title: "1840".to_string(),
            bank_cash: 99_999,
            starting_cash: [(3, 300), (4, 260), (5, 230), (6, 200)].into_iter().collect(),
            cert_limit: [(3, 16), (4, 14), (5, 13), (6, 12)].into_iter().collect(),
            additional_cash: 350,
            currency_format: "%d".to_string(),
            operating_round_name: "Line".to_string(),
            available_corp_color: "#c6e9af".to_string(),
            reserved_tram: "2".to_string(),
            starter_train: "City".to_string(),
            colors: default_colors(),
            market_text: [
                (ParKind::City, "City Corporation Par".to_string()),
                (ParKind::Major, "Major Corporation Par".to_string()),
            ]
            .into_iter()
            .collect(),
            market_colors: [
                (ParKind::City, "red".to_string()),
                (ParKind::Major, "green".to_string()),
            ]
            .into_iter()
            .collect(),
            par_range: ParRange {
                city: vec![65, 75, 85, 95],
                major: vec![70, 80, 90, 100],
            },
            initial_city_par: [("W", 95), ("V", 85), ("G", 75), ("D", 65)]
                .into_iter()
                .map(|(sym, par)| (sym.to_string(), par))
                .collect(),
            initial_city_tokens: default_city_tokens(),
            par_points: default_par_points(),
            corporations: default_corporations(),
            companies: Vec::new(),
            trains: default_trains(),
            hexes: default_hexes(),
            progress: default_progress(),
        }
    }
}

impl GameConfig {
    /// Parse a JSON configuration document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|err| ConfigError::Malformed(err.to_string()))
    }

    /// Serialize to a JSON document.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(|err| ConfigError::Malformed(err.to_string()))
    }

    /// Replace the corporation catalog.
    #[must_use]
    pub fn with_corporations(mut self, corporations: Vec<CorporationSpec>) -> Self {
        self.corporations = corporations;
        self
    }

    /// Replace the private companies.
    #[must_use]
    pub fn with_companies(mut self, companies: Vec<CompanySpec>) -> Self {
        self.companies = companies;
        self
    }

    /// Replace the train roster.
    #[must_use]
    pub fn with_trains(mut self, trains: Vec<TrainSpec>) -> Self {
        self.trains = trains;
        self
    }

    /// Replace the tokenable hexes.
    #[must_use]
    pub fn with_hexes(mut self, hexes: Vec<HexSpec>) -> Self {
        self.hexes = hexes;
        self
    }

    /// Replace the progress table.
    #[must_use]
    pub fn with_progress(mut self, progress: Vec<ProgressEntry>) -> Self {
        self.progress = progress;
        self
    }

    /// Starting cash for a player count.
    pub fn starting_cash_for(&self, player_count: usize) -> Result<i64, ConfigError> {
        self.starting_cash
            .get(&player_count)
            .copied()
            .ok_or(ConfigError::UnsupportedPlayerCount(player_count))
    }

    /// Certificate limit for a player count.
    pub fn cert_limit_for(&self, player_count: usize) -> Result<usize, ConfigError> {
        self.cert_limit
            .get(&player_count)
            .copied()
            .ok_or(ConfigError::UnsupportedPlayerCount(player_count))
    }

    /// Resolve a registered color name to its hex value.
    ///
    /// Unregistered names are returned as given.
    #[must_use]
    pub fn color_hex<'a>(&'a self, name: &'a str) -> &'a str {
        self.colors.get(name).map_or(name, String::as_str)
    }

    /// Check the tables that do not depend on the player count.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = std::collections::BTreeSet::new();
        for corp in &self.corporations {
            if !seen.insert(corp.sym.as_str()) {
                return Err(ConfigError::DuplicateCorporation(corp.sym.clone()));
            }
        }

        for corp in self.corporations.iter().filter(|c| c.kind == CorporationType::City) {
            let par = self
                .initial_city_par
                .get(&corp.sym)
                .ok_or_else(|| ConfigError::MissingCityEntry(corp.sym.clone()))?;
            if !self.par_range.city.contains(par) {
                return Err(ConfigError::ParOutOfRange {
                    corporation: corp.sym.clone(),
                    price: *par,
                });
            }
            if !self.initial_city_tokens.contains_key(&corp.sym) {
                return Err(ConfigError::MissingCityEntry(corp.sym.clone()));
            }
        }

        match self.progress.last() {
            Some(entry) if entry.kind == ProgressKind::End => {}
            _ => {
                return Err(ConfigError::InvalidProgress(
                    "last entry must be End".to_string(),
                ))
            }
        }
        if !self.progress.iter().any(|e| e.kind == ProgressKind::Line) {
            return Err(ConfigError::InvalidProgress(
                "no line rounds listed".to_string(),
            ));
        }

        Ok(())
    }
}

fn default_colors() -> BTreeMap<String, String> {
    [
        ("red", "#d1232a"),
        ("orange", "#f58121"),
        ("black", "#110a0c"),
        ("blue", "#025aaa"),
        ("purple", "#A79ECD"),
        ("lightBlue", "#8dd7f6"),
        ("yellow", "#ffe600"),
        ("green", "#32763f"),
        ("brightGreen", "#6ec037"),
        ("white", "#ffffff"),
    ]
    .into_iter()
    .map(|(name, hex)| (name.to_string(), hex.to_string()))
    .collect()
}

fn default_city_tokens() -> BTreeMap<String, Vec<TokenPlacement>> {
    let w = vec![
        TokenPlacement::at("I1"),
        TokenPlacement::at("I9"),
        TokenPlacement::at("I15"),
        TokenPlacement::at("F24"),
    ];
    let v = vec![
        TokenPlacement::at_city("A17", 1),
        TokenPlacement::at("A13"),
        TokenPlacement::at("B10"),
        TokenPlacement::at("C7"),
        TokenPlacement::at("F6"),
        TokenPlacement::at("G3"),
    ];
    let g = vec![
        TokenPlacement::at("A17"),
        TokenPlacement::at("D12"),
        TokenPlacement::at("I11"),
    ];
    let d = vec![
        TokenPlacement::at_city("A17", 2),
        TokenPlacement::at("D22"),
        TokenPlacement::at("E23"),
        TokenPlacement::at_city("F24", 1),
    ];
    [("W", w), ("V", v), ("G", g), ("D", d)]
        .into_iter()
        .map(|(sym, tokens)| (sym.to_string(), tokens))
        .collect()
}

fn default_par_points() -> Vec<ParPoint> {
    let city = [65, 75, 85, 95].map(|price| ParPoint {
        price,
        kind: ParKind::City,
    });
    let major = [70, 80, 90, 100].map(|price| ParPoint {
        price,
        kind: ParKind::Major,
    });
    let mut points: Vec<_> = city.into_iter().chain(major).collect();
    points.sort_by_key(|p| p.price);
    points
}

fn default_corporations() -> Vec<CorporationSpec> {
    let majors = [
        ("R", "Rote Linie", "red"),
        ("O", "Orange Linie", "orange"),
        ("S", "Schwarze Linie", "black"),
        ("B", "Blaue Linie", "blue"),
        ("P", "Violette Linie", "purple"),
        ("H", "Hellblaue Linie", "lightBlue"),
        ("Y", "Gelbe Linie", "yellow"),
        ("N", "Grüne Linie", "green"),
    ]
    .into_iter()
    .map(|(sym, name, color)| CorporationSpec::new(sym, name, CorporationType::Major, color, 4));

    let cities = [
        ("W", "Wien", "red", 4),
        ("V", "Vorstadt", "blue", 6),
        ("G", "Gürtel", "green", 3),
        ("D", "Donau", "purple", 4),
    ]
    .into_iter()
    .map(|(sym, name, color, tokens)| {
        CorporationSpec::new(sym, name, CorporationType::City, color, tokens)
    });

    let trams = (1..=12).map(|n| {
        CorporationSpec::new(
            n.to_string(),
            format!("Tramway {n}"),
            CorporationType::Tram,
            "brightGreen",
            1,
        )
    });

    majors.chain(cities).chain(trams).collect()
}

fn default_trains() -> Vec<TrainSpec> {
    [
        ("City", 4, 0),
        ("2", 8, 100),
        ("3", 6, 200),
        ("4", 4, 300),
        ("5", 3, 500),
        ("6", 2, 600),
    ]
    .into_iter()
    .map(|(name, count, price)| TrainSpec {
        name: name.to_string(),
        count,
        price,
    })
    .collect()
}

fn default_hexes() -> Vec<HexSpec> {
    let single = [
        "I1", "I9", "I15", "A13", "B10", "C7", "F6", "G3", "D12", "I11", "D22", "E23",
    ];
    let mut hexes: Vec<_> = single
        .into_iter()
        .map(|coordinate| HexSpec {
            coordinate: coordinate.to_string(),
            cities: vec![1],
        })
        .collect();
    hexes.push(HexSpec {
        coordinate: "F24".to_string(),
        cities: vec![1, 1],
    });
    hexes.push(HexSpec {
        coordinate: "A17".to_string(),
        cities: vec![1, 1, 1],
    });
    hexes
}

fn default_progress() -> Vec<ProgressEntry> {
    use ProgressKind::{Company, End, Line, Pre, Stock};

    [
        (Pre, None, None),
        (Stock, Some("1"), None),
        (Company, Some("1"), Some("1x")),
        (Line, Some("1a"), None),
        (Line, Some("1b"), None),
        (Company, Some("2"), Some("1x")),
        (Stock, Some("2"), None),
        (Line, Some("2a"), None),
        (Line, Some("2b"), None),
        (Company, Some("3"), Some("1x")),
        (Stock, Some("3"), Some("1x")),
        (Line, Some("3a"), None),
        (Line, Some("3b"), None),
        (Company, Some("4"), Some("2x")),
        (Stock, Some("4"), Some("1x")),
        (Line, Some("4a"), None),
        (Line, Some("4b"), None),
        (Company, Some("5"), Some("3x")),
        (Stock, Some("5"), Some("1x")),
        (Line, Some("5a"), None),
        (Line, Some("5b"), None),
        (Line, Some("5c"), None),
        (Company, Some("6"), Some("10x")),
        (End, None, None),
    ]
    .into_iter()
    .map(|(kind, name, value)| ProgressEntry::new(kind, name, value))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_validates() {
        GameConfig::default().validate().unwrap();
    }

    #[test]
    fn test_cash_tables() {
        let config = GameConfig::default();

        assert_eq!(config.starting_cash_for(4), Ok(260));
        assert_eq!(config.starting_cash_for(6), Ok(200));
        assert_eq!(config.cert_limit_for(3), Ok(16));
        assert_eq!(
            config.starting_cash_for(2),
            Err(ConfigError::UnsupportedPlayerCount(2))
        );
    }

    #[test]
    fn test_catalog_has_every_type() {
        let config = GameConfig::default();
        let count = |kind| config.corporations.iter().filter(|c| c.kind == kind).count();

        assert_eq!(count(CorporationType::Major), 8);
        assert_eq!(count(CorporationType::City), 4);
        assert_eq!(count(CorporationType::Tram), 12);
    }

    #[test]
    fn test_city_tokens_match_token_counts() {
        let config = GameConfig::default();

        for corp in config.corporations.iter().filter(|c| c.kind == CorporationType::City) {
            assert_eq!(config.initial_city_tokens[&corp.sym].len(), corp.tokens);
        }
    }

    #[test]
    fn test_color_hex() {
        let config = GameConfig::default();
        assert_eq!(config.color_hex("red"), "#d1232a");
        assert_eq!(config.color_hex("#123456"), "#123456");
    }

    #[test]
    fn test_par_range_for_type() {
        let config = GameConfig::default();
        assert_eq!(config.par_range.for_type(CorporationType::City), &[65, 75, 85, 95]);
        assert!(config.par_range.for_type(CorporationType::Tram).is_empty());
    }

    #[test]
    fn test_validate_rejects_duplicate_symbols() {
        let mut config = GameConfig::default();
        let dup = config.corporations[0].clone();
        config.corporations.push(dup);

        assert_eq!(
            config.validate(),
            Err(ConfigError::DuplicateCorporation("R".to_string()))
        );
    }

    #[test]
    fn test_validate_rejects_city_par_outside_range() {
        let mut config = GameConfig::default();
        config.initial_city_par.insert("W".to_string(), 100);

        assert!(matches!(
            config.validate(),
            Err(ConfigError::ParOutOfRange { price: 100, .. })
        ));
    }

    #[test]
    fn test_validate_requires_end() {
        let mut config = GameConfig::default();
        config.progress.pop();

        assert!(matches!(config.validate(), Err(ConfigError::InvalidProgress(_))));
    }

    #[test]
    fn test_json_round_trip() {
        let config = GameConfig::default();
        let json = config.to_json().unwrap();
        let parsed = GameConfig::from_json(&json).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            GameConfig::from_json("{ not json"),
            Err(ConfigError::Malformed(_))
        ));
    }
}
