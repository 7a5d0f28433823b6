//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on I/O boundary traits (InputSource, Narrator)
//! but are themselves concrete structs, not traits.

mod exploration;

pub use exploration::{ExitCause, ExplorationService, ExploreEvent, ExploreOutcome, ExploreSummary};
