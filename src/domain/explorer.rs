//! Traversal state machine.
//!
//! The explorer only tracks where the visitor stands. Reading input and
//! talking to the visitor is left to the application layer, which feeds
//! [`Command`]s in and reacts to the returned [`Step`]s.

use tracing::{debug, instrument};

use crate::domain::arena::Mansion;
use crate::domain::error::DomainResult;
use crate::domain::room::{Direction, Room, RoomId};

/// A parsed visitor choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Go(Direction),
    Exit,
    /// Any token that is not a known key.
    Invalid(char),
}

impl Command {
    /// Interpret a single token, ignoring case: `e` left, `d` right, `s` exit.
    pub fn from_token(token: char) -> Self {
        match token.to_ascii_lowercase() {
            'e' => Command::Go(Direction::Left),
            'd' => Command::Go(Direction::Right),
            's' => Command::Exit,
            _ => Command::Invalid(token),
        }
    }

    /// Take the first non-whitespace character of `line` as the token.
    ///
    /// Returns `None` for a line without any token; the rest of the line is
    /// ignored.
    pub fn from_line(line: &str) -> Option<Self> {
        line.trim_start().chars().next().map(Self::from_token)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExploreState {
    Positioned(RoomId),
    /// Terminal: the room has no doors.
    DeadEnd(RoomId),
    /// Terminal: the visitor left, by choice or because input ran out.
    UserExit(RoomId),
}

impl ExploreState {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, ExploreState::Positioned(_))
    }
}

/// Doors offered to the visitor. Leaving is always possible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Moves {
    pub left: bool,
    pub right: bool,
}

impl Moves {
    pub fn offers(&self, direction: Direction) -> bool {
        match direction {
            Direction::Left => self.left,
            Direction::Right => self.right,
        }
    }
}

/// What the visitor finds on entering the current room.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arrival {
    DeadEnd,
    Choices(Moves),
    /// The visitor already left; nothing to offer.
    Finished,
}

/// Outcome of applying one command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Moved(RoomId),
    /// The chosen door does not exist; position unchanged.
    NoPath(Direction),
    /// Unknown token; position unchanged.
    Invalid(char),
    Exited,
    /// The exploration already reached a terminal state.
    Finished,
}

#[derive(Debug)]
pub struct Explorer<'a> {
    mansion: &'a Mansion,
    room: &'a Room,
    state: ExploreState,
}

impl<'a> Explorer<'a> {
    /// Position a visitor in `start`.
    pub fn new(mansion: &'a Mansion, start: RoomId) -> DomainResult<Self> {
        let room = mansion.expect_room(start)?;
        Ok(Self {
            mansion,
            room,
            state: ExploreState::Positioned(start),
        })
    }

    pub fn state(&self) -> ExploreState {
        self.state
    }

    pub fn current(&self) -> RoomId {
        match self.state {
            ExploreState::Positioned(id) | ExploreState::DeadEnd(id) | ExploreState::UserExit(id) => {
                id
            }
        }
    }

    pub fn current_room(&self) -> &'a Room {
        self.room
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_terminal()
    }

    /// Look around the current room; a room without doors ends the
    /// exploration.
    #[instrument(level = "trace", skip(self), fields(room = %self.room.name))]
    pub fn arrive(&mut self) -> Arrival {
        match self.state {
            ExploreState::DeadEnd(_) => Arrival::DeadEnd,
            ExploreState::UserExit(_) => Arrival::Finished,
            ExploreState::Positioned(id) if self.room.is_dead_end() => {
                debug!("dead end reached");
                self.state = ExploreState::DeadEnd(id);
                Arrival::DeadEnd
            }
            ExploreState::Positioned(_) => Arrival::Choices(Moves {
                left: self.room.left.is_some(),
                right: self.room.right.is_some(),
            }),
        }
    }

    #[instrument(level = "trace", skip(self), fields(room = %self.room.name))]
    pub fn apply(&mut self, command: Command) -> Step {
        let ExploreState::Positioned(id) = self.state else {
            return Step::Finished;
        };
        let mansion = self.mansion;
        match command {
            Command::Go(direction) => match self
                .room
                .child(direction)
                .and_then(|c| mansion.room(c).map(|room| (c, room)))
            {
                Some((child, room)) => {
                    debug!(%direction, to = %room.name, "moved");
                    self.room = room;
                    self.state = ExploreState::Positioned(child);
                    Step::Moved(child)
                }
                None => Step::NoPath(direction),
            },
            Command::Exit => {
                self.state = ExploreState::UserExit(id);
                Step::Exited
            }
            Command::Invalid(token) => Step::Invalid(token),
        }
    }

    /// Stop exploring because no more input will arrive.
    pub fn abandon(&mut self) {
        if let ExploreState::Positioned(id) = self.state {
            self.state = ExploreState::UserExit(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::builder::reference_mansion;

    #[test]
    fn given_blank_line_when_parsing_then_no_command() {
        assert_eq!(Command::from_line("   \n"), None);
        assert_eq!(Command::from_line(""), None);
    }

    #[test]
    fn given_line_with_trailing_text_when_parsing_then_uses_first_token() {
        assert_eq!(
            Command::from_line("  dxyz\n"),
            Some(Command::Go(Direction::Right))
        );
    }

    #[test]
    fn given_terminal_state_when_applying_then_finished() {
        let mansion = reference_mansion().unwrap();
        let mut explorer = Explorer::new(&mansion, mansion.entrance().unwrap()).unwrap();
        assert_eq!(explorer.apply(Command::Exit), Step::Exited);

        assert_eq!(
            explorer.apply(Command::Go(Direction::Left)),
            Step::Finished
        );
        assert!(explorer.is_finished());
    }

    #[test]
    fn given_terminal_state_when_arriving_again_then_no_choices() {
        let mansion = reference_mansion().unwrap();
        let mut explorer = Explorer::new(&mansion, mansion.entrance().unwrap()).unwrap();
        explorer.apply(Command::Exit);
        assert_eq!(explorer.arrive(), Arrival::Finished);

        let adega = mansion.find_by_name("Adega").unwrap();
        let mut explorer = Explorer::new(&mansion, adega).unwrap();
        assert_eq!(explorer.arrive(), Arrival::DeadEnd);
        assert_eq!(explorer.arrive(), Arrival::DeadEnd);
        assert_eq!(explorer.state(), ExploreState::DeadEnd(adega));
    }
}
