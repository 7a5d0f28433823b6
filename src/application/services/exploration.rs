//! Exploration service
//!
//! Drives an [`Explorer`] with lines pulled from an [`InputSource`] and tells
//! the visitor what happens through a [`Narrator`].
//!
//! ## Loop
//!
//! ```text
//! ┌─> announce room ──> dead end? ──yes──> DeadEnd (stop)
//! │        │ no
//! │   offer moves, read line
//! │        ├─ exhausted ───────────────> UserExit (stop)
//! │        ├─ unreadable / invalid / no door ──┐
//! │        ├─ exit ────────────────────> UserExit (stop)
//! │        └─ moved ──┐                        │
//! └───────────────────┴────────────────────────┘
//! ```

use std::sync::Arc;

use tracing::{debug, instrument, warn};

use crate::application::{ApplicationResult, IoResultExt};
use crate::config::Settings;
use crate::domain::{
    Arrival, Command, Direction, ExploreState, Explorer, Mansion, Moves, RoomId, RoomName, Step,
};
use crate::infrastructure::traits::{InputSource, Narrator, ReadOutcome};

/// Why the visitor stopped without reaching a dead end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCause {
    Chosen,
    InputExhausted,
}

/// Everything the visitor is told during an exploration, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExploreEvent {
    Entered(RoomName),
    DeadEnd,
    Choices(Moves),
    NoPath(Direction),
    InvalidChoice(char),
    Unreadable,
    Left(ExitCause),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExploreOutcome {
    DeadEnd,
    UserExit(ExitCause),
}

/// Result of one exploration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExploreSummary {
    pub outcome: ExploreOutcome,
    /// Room the visitor stood in when the exploration ended
    pub last_room: RoomId,
    /// Rooms entered, starting room first
    pub path: Vec<RoomId>,
    /// Number of times the visitor was asked for a choice
    pub prompts: usize,
}

/// Service running interactive explorations.
pub struct ExplorationService {
    settings: Arc<Settings>,
}

impl ExplorationService {
    pub fn new(settings: Arc<Settings>) -> Self {
        Self { settings }
    }

    /// Explore `mansion` from `start` until a dead end, an exit choice or the
    /// end of input.
    ///
    /// Bad input never ends the exploration: it is reported and the visitor
    /// is asked again. Only a failure to talk to the visitor is an error.
    #[instrument(level = "debug", skip_all, fields(start = %start))]
    pub fn explore(
        &self,
        mansion: &Mansion,
        start: RoomId,
        input: &mut dyn InputSource,
        narrator: &mut dyn Narrator,
    ) -> ApplicationResult<ExploreSummary> {
        let mut explorer = Explorer::new(mansion, start)?;
        let mut path = vec![start];
        let mut prompts = 0;
        let mut read_failures = 0u32;

        let outcome = loop {
            tell(
                narrator,
                ExploreEvent::Entered(explorer.current_room().name.clone()),
            )?;

            let moves = match explorer.arrive() {
                Arrival::DeadEnd => {
                    tell(narrator, ExploreEvent::DeadEnd)?;
                    break ExploreOutcome::DeadEnd;
                }
                Arrival::Choices(moves) => moves,
                Arrival::Finished => break settled(&explorer),
            };
            tell(narrator, ExploreEvent::Choices(moves))?;
            prompts += 1;

            let line = match input.next_line() {
                ReadOutcome::Line(line) => {
                    read_failures = 0;
                    line
                }
                ReadOutcome::Unreadable => {
                    read_failures = 0;
                    tell(narrator, ExploreEvent::Unreadable)?;
                    continue;
                }
                ReadOutcome::Failed(e) => {
                    read_failures += 1;
                    warn!(error = %e, read_failures, "failed to read choice");
                    if read_failures >= self.settings.max_read_failures {
                        break give_up(&mut explorer, narrator)?;
                    }
                    tell(narrator, ExploreEvent::Unreadable)?;
                    continue;
                }
                ReadOutcome::Exhausted => {
                    debug!("input exhausted");
                    break give_up(&mut explorer, narrator)?;
                }
            };

            let Some(command) = Command::from_line(&line) else {
                tell(narrator, ExploreEvent::Unreadable)?;
                continue;
            };

            match explorer.apply(command) {
                Step::Moved(room) => path.push(room),
                Step::NoPath(direction) => tell(narrator, ExploreEvent::NoPath(direction))?,
                Step::Invalid(token) => tell(narrator, ExploreEvent::InvalidChoice(token))?,
                Step::Exited => {
                    tell(narrator, ExploreEvent::Left(ExitCause::Chosen))?;
                    break ExploreOutcome::UserExit(ExitCause::Chosen);
                }
                Step::Finished => break settled(&explorer),
            }
        };

        debug!(?outcome, rooms = path.len(), prompts, "exploration finished");
        Ok(ExploreSummary {
            outcome,
            last_room: explorer.current(),
            path,
            prompts,
        })
    }
}

fn give_up(
    explorer: &mut Explorer<'_>,
    narrator: &mut dyn Narrator,
) -> ApplicationResult<ExploreOutcome> {
    explorer.abandon();
    tell(narrator, ExploreEvent::Left(ExitCause::InputExhausted))?;
    Ok(ExploreOutcome::UserExit(ExitCause::InputExhausted))
}

/// Outcome of an explorer that reached a terminal state on an earlier turn.
/// The loop breaks on every terminal transition, so getting here is a bug.
fn settled(explorer: &Explorer<'_>) -> ExploreOutcome {
    debug_assert!(false, "explorer driven after finishing: {:?}", explorer.state());
    match explorer.state() {
        ExploreState::DeadEnd(_) => ExploreOutcome::DeadEnd,
        _ => ExploreOutcome::UserExit(ExitCause::Chosen),
    }
}

fn tell(narrator: &mut dyn Narrator, event: ExploreEvent) -> ApplicationResult<()> {
    narrator.narrate(&event).with_context("write to console")
}
