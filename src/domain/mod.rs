//! Domain layer: rooms, the mansion and the traversal state machine
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod builder;
pub mod error;
pub mod explorer;
pub mod map;
pub mod room;

pub use arena::Mansion;
pub use builder::{reference_mansion, MansionBuilder};
pub use error::{DomainError, DomainResult};
pub use explorer::{Arrival, Command, ExploreState, Explorer, Moves, Step};
pub use map::MapRender;
pub use room::{Direction, Room, RoomId, RoomName, MAX_NAME_LEN};
