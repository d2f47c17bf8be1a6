//! Fixed reference lists the synthesizers draw from.
//!
//! All picks go through the caller's RNG, so the same seed always
//! yields the same accounts, descriptions and locations.

use crate::rng::SynthRng;

/// Uniform picks from the curated reference lists.
pub struct ReferenceData;

impl ReferenceData {
    pub fn pick_account(rng: &mut SynthRng) -> &'static str {
        *rng.pick(Self::accounts())
    }

    pub fn pick_description(rng: &mut SynthRng) -> &'static str {
        *rng.pick(Self::descriptions())
    }

    pub fn pick_location(rng: &mut SynthRng) -> &'static str {
        *rng.pick(Self::locations())
    }

    /// Financial Services or Retail, even odds.
    pub fn pick_merchant_category(rng: &mut SynthRng) -> &'static str {
        if rng.chance(0.5) {
            "Financial Services"
        } else {
            "Retail"
        }
    }

    /// Ten internal account numbers.
    pub fn accounts() -> &'static [&'static str] {
        &[
            "AC001234567", "AC002345678", "AC003456789", "AC004567890", "AC005678901",
            "AC006789012", "AC007890123", "AC008901234", "AC009012345", "AC010123456",
        ]
    }

    pub fn descriptions() -> &'static [&'static str] {
        &[
            "Wire Transfer", "ACH Payment", "International Wire", "Cash Deposit",
            "Card Payment", "ATM Withdrawal", "Check Payment", "Online Transfer",
            "Merchant Payment", "Cryptocurrency Exchange", "Investment Transfer",
        ]
    }

    pub fn locations() -> &'static [&'static str] {
        &[
            "New York, NY", "London, UK", "Hong Kong", "Singapore", "Dubai, UAE",
            "Zurich, Switzerland", "Cayman Islands", "Panama City", "Luxembourg",
        ]
    }

    pub fn alert_assignee() -> &'static str {
        "analyst@bank.com"
    }
}
