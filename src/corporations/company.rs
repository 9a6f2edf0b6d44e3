//! Private companies.

use serde::{Deserialize, Serialize};

use crate::core::config::CompanySpec;
use crate::core::Entity;

/// A private company and whoever holds it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    /// Short name.
    pub sym: String,
    /// Display name.
    pub name: String,
    /// Face value.
    pub value: i64,
    /// Revenue per payout.
    pub revenue: i64,
    /// Holder, `None` while unsold.
    pub owner: Option<Entity>,
}

impl Company {
    /// Instantiate a catalog entry, unowned.
    #[must_use]
    pub fn from_spec(spec: &CompanySpec) -> Self {
        Self {
            sym: spec.sym.clone(),
            name: spec.name.clone(),
            value: spec.value,
            revenue: spec.revenue,
            owner: None,
        }
    }
}
