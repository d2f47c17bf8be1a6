//! Synthesizer trait.
//!
//! RULE: Every synthesizer implements Synthesizer.
//! A synthesizer reads nothing but the instant it is handed and its
//! own RNG stream. It never sees the live dashboard collections.

use crate::rng::SynthRng;
use chrono::{DateTime, Utc};

/// The contract every synthesizer must fulfill.
pub trait Synthesizer {
    /// What one call produces.
    type Output;

    /// Unique stable name, used in logs and the event log.
    fn name(&self) -> &'static str;

    /// Produce one output.
    ///
    /// - `now`: the instant synthesized timestamps are relative to
    /// - `rng`: this synthesizer's deterministic stream
    fn synthesize(&self, now: DateTime<Utc>, rng: &mut SynthRng) -> Self::Output;
}
