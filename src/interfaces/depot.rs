//! Train supply.

use serde::{Deserialize, Serialize};

use crate::core::config::TrainSpec;

/// A physical train.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Train {
    /// Train type name.
    pub name: String,
    /// Purchase price.
    pub price: i64,
}

/// Train supply collaborator.
pub trait TrainDepot {
    /// Trains not yet sold, in sale order.
    fn upcoming(&self) -> &[Train];

    /// Take the first upcoming train of the named type out of the supply.
    fn remove_train(&mut self, name: &str) -> Option<Train>;
}

/// Depot holding the configured roster.
#[derive(Clone, Debug, Default)]
pub struct Depot {
    upcoming: Vec<Train>,
}

impl Depot {
    /// Expand the roster into individual trains.
    #[must_use]
    pub fn from_specs(specs: &[TrainSpec]) -> Self {
        let upcoming = specs
            .iter()
            .flat_map(|spec| {
                std::iter::repeat_with(move || Train {
                    name: spec.name.clone(),
                    price: spec.price,
                })
                .take(spec.count)
            })
            .collect();
        Self { upcoming }
    }

    /// Remaining trains of one type.
    #[must_use]
    pub fn remaining(&self, name: &str) -> usize {
        self.upcoming.iter().filter(|t| t.name == name).count()
    }
}

impl TrainDepot for Depot {
    fn upcoming(&self) -> &[Train] {
        &self.upcoming
    }

    fn remove_train(&mut self, name: &str) -> Option<Train> {
        let index = self.upcoming.iter().position(|t| t.name == name)?;
        Some(self.upcoming.remove(index))
    }
}
