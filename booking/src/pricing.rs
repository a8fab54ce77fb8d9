//! Price derivation for a booking draft.
//!
//! Prices are integer cents throughout. A duration with a fixed
//! `base_price_cents` wins; otherwise the venue's hourly rate is
//! pro-rated by minutes.

use crate::types::DurationOption;

/// Total price in cents for the given duration at the given hourly rate.
///
/// Returns 0 when no duration is selected, so the review screen can
/// always render a price without special-casing.
pub fn total_price_cents(duration: Option<&DurationOption>, price_per_hour_cents: u64) -> u64 {
    duration.map_or(0, |d| {
        d.base_price_cents
            .unwrap_or_else(|| price_per_hour_cents * u64::from(d.minutes) / 60)
    })
}
