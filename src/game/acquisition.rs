//! Tram acquisition and restock.
//!
//! Majors grow by buying trams out of the active pool into their fleet.
//! After each acquisition round the pool is topped back up to
//! `player_count + 1` from the unavailable trams.

use tracing::info;

use crate::core::{CorporationId, InvariantError, Shuffler};
use crate::corporations::{CorporationRegistry, CorporationType, ShareHolder};

/// Move `tram` into `buyer`'s fleet.
///
/// The tram floats, every IPO certificate passes to the buyer for nothing
/// (the tram gains no president), and the tram is run by whoever runs the
/// buyer. Nothing changes if any precondition fails.
pub fn buy_tram_corporation(
    registry: &mut CorporationRegistry,
    buyer: CorporationId,
    tram: CorporationId,
) -> Result<(), InvariantError> {
    if !registry.is_active_major(buyer) {
        return Err(InvariantError::NotAnActiveMajor(buyer));
    }
    let owner = registry.corporation(buyer)?.owner;

    let target = registry.corporation(tram)?;
    if target.kind() != CorporationType::Tram {
        return Err(InvariantError::NotATram(tram));
    }
    if target.floated {
        return Err(InvariantError::TramAlreadyFloated(tram));
    }
    if !registry.is_tram_available(tram) {
        return Err(InvariantError::TramNotAvailable(tram));
    }

    registry.add_to_fleet(buyer, tram)?;
    registry.take_available_tram(tram)?;

    let target = registry.corporation_mut(tram)?;
    target.floated = true;
    target.transfer_ipo_shares(ShareHolder::Corporation(buyer));
    target.owner = owner;
    target.reservation_color = None;

    info!(buyer = %buyer, tram = %tram, "tram corporation acquired");
    Ok(())
}

/// Refill the active tram pool to `target_size` from the unavailable pool.
///
/// A full pool is left alone without drawing from the shuffler. Returns the
/// trams that entered play.
pub fn restock_tram_corporations<S: Shuffler>(
    registry: &mut CorporationRegistry,
    shuffler: &mut S,
    target_size: usize,
    available_color: &str,
) -> Result<Vec<CorporationId>, InvariantError> {
    let needed = target_size.saturating_sub(registry.tram_corporations().len());
    if needed == 0 {
        return Ok(Vec::new());
    }

    let available = registry.unavailable_tram_corporations().len();
    if available < needed {
        return Err(InvariantError::RestockShortfall { needed, available });
    }

    let pool = registry.unavailable_tram_corporations().to_vec();
    let revealed = shuffler.sample(&pool, needed);
    for &id in &revealed {
        registry.corporation_mut(id)?.reservation_color = Some(available_color.to_string());
    }
    registry.reveal_trams(&revealed);

    info!(count = revealed.len(), "tram corporations restocked");
    Ok(revealed)
}
