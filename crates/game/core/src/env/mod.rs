//! Read-only lookups feeding the power pipeline.
//!
//! The leaf modifier sources (alliance structures, edicts, armory loadouts and
//! timed effects) are keyed reads by owner. [`ModifierSources`] abstracts them
//! so the calculator works the same against a storage transaction or against
//! a pre-fetched [`SnapshotSources`] bundle.
mod snapshot;
mod sources;

pub use snapshot::SnapshotSources;
pub use sources::ModifierSources;
