//! The recommendation scoring core.
//!
//! Everything in this module is pure, synchronous computation over an
//! immutable [`Snapshot`] of the six relations. I/O (loading the snapshot,
//! persisting the ranked set) lives in `db`; orchestration in `services`.

pub mod category;
pub mod demographics;
pub mod joins;
pub mod scoring;
pub mod similarity;
pub mod snapshot;

pub use scoring::{score_candidates, ScoredPlace, ScoringWeights, TOP_K};
pub use snapshot::Snapshot;
