//! Infrastructure layer: console I/O implementations
//!
//! This layer implements the I/O boundary traits used by the application services.

pub mod traits;

pub use traits::{ConsoleNarrator, InputSource, LineInput, Narrator, ReadOutcome};
