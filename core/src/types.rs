//! Shared primitive types used across the desk.

/// A simulated arrival interval. One tick = one refresh period of the desk.
pub type Tick = u64;

/// A stable, unique identifier for a transaction or alert.
pub type EntityId = String;

/// The canonical run identifier.
pub type RunId = String;
