/// Counts of the chart elements that bound a score's judgments.
pub mod census;

/// Hit quality buckets and their counts.
pub mod judgment;

/// Game modes and their numeric ids.
pub mod mode;

/// Mod acronym normalization.
pub mod mods;

/// Caller provided statistics and the choice between them and
/// reconstruction.
pub mod statistics;
