//! I/O boundary traits for testability
//!
//! These traits abstract the console session, allowing the exploration
//! service to be driven by scripted input and observed by recording output.

use std::io::{self, BufRead, Read, Write};

use colored::Colorize;
use tracing::trace;

use crate::application::services::{ExitCause, ExploreEvent};
use crate::domain::Direction;

/// Result of pulling one line of input.
#[derive(Debug)]
pub enum ReadOutcome {
    /// A complete line, terminator included if there was one
    Line(String),
    /// A line was consumed but could not be decoded
    Unreadable,
    /// The read itself failed; nothing is known about the input position
    Failed(io::Error),
    /// No more input will ever arrive
    Exhausted,
}

/// Pull-based source of visitor input, one line per call.
///
/// Each call consumes input up to and including the next line terminator,
/// so whatever follows the token on that line is discarded.
pub trait InputSource {
    fn next_line(&mut self) -> ReadOutcome;
}

/// Sink for everything the visitor is told.
pub trait Narrator {
    fn narrate(&mut self, event: &ExploreEvent) -> io::Result<()>;
}

// ============================================================
// REAL IMPLEMENTATIONS
// ============================================================

/// Bytes of a line kept for parsing; the rest of a longer line is skipped.
pub const MAX_LINE_BYTES: u64 = 1024;

/// Line reader over any buffered reader (stdin, files, in-memory cursors).
#[derive(Debug)]
pub struct LineInput<R> {
    reader: R,
    buf: Vec<u8>,
}

impl<R: BufRead> LineInput<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::new(),
        }
    }
}

impl LineInput<io::StdinLock<'static>> {
    pub fn stdin() -> Self {
        Self::new(io::stdin().lock())
    }
}

impl<R: BufRead> InputSource for LineInput<R> {
    fn next_line(&mut self) -> ReadOutcome {
        self.buf.clear();
        let n = match (&mut self.reader)
            .take(MAX_LINE_BYTES)
            .read_until(b'\n', &mut self.buf)
        {
            Ok(0) => return ReadOutcome::Exhausted,
            Ok(n) => n,
            Err(e) => return ReadOutcome::Failed(e),
        };

        let truncated = self.buf.last() != Some(&b'\n') && n as u64 == MAX_LINE_BYTES;
        if truncated {
            match self.reader.skip_until(b'\n') {
                Ok(skipped) => trace!(bytes = n, skipped, "long line cut"),
                Err(e) => return ReadOutcome::Failed(e),
            }
        } else {
            trace!(bytes = n, "read line");
        }

        match std::str::from_utf8(&self.buf) {
            Ok(line) => ReadOutcome::Line(line.to_string()),
            // a cut can split the last code point; keep the valid prefix
            Err(e) if truncated && e.error_len().is_none() => {
                let valid = &self.buf[..e.valid_up_to()];
                ReadOutcome::Line(String::from_utf8_lossy(valid).into_owned())
            }
            Err(_) => ReadOutcome::Unreadable,
        }
    }
}

/// Console rendering of exploration events.
///
/// Respects NO_COLOR, CLICOLOR, CLICOLOR_FORCE automatically.
pub struct ConsoleNarrator<W> {
    out: W,
}

impl<W: Write> ConsoleNarrator<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl ConsoleNarrator<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> Narrator for ConsoleNarrator<W> {
    fn narrate(&mut self, event: &ExploreEvent) -> io::Result<()> {
        let out = &mut self.out;
        match event {
            ExploreEvent::Entered(name) => {
                writeln!(out)?;
                writeln!(out, "You are in: {}", name.as_str().bold())?;
            }
            ExploreEvent::DeadEnd => {
                writeln!(out)?;
                writeln!(
                    out,
                    "{}",
                    "--- End of the path: this room is a dead end. ---".yellow()
                )?;
                writeln!(out, "Heading back to the entrance...")?;
            }
            ExploreEvent::Choices(moves) => {
                writeln!(out, "Choose the next path:")?;
                if moves.left {
                    writeln!(out, "  [{}] Go left", Direction::Left.key())?;
                }
                if moves.right {
                    writeln!(out, "  [{}] Go right", Direction::Right.key())?;
                }
                writeln!(out, "  [s] Leave the exploration")?;
                write!(out, "{} ", "Your choice:".cyan())?;
                out.flush()?;
            }
            ExploreEvent::NoPath(direction) => {
                writeln!(
                    out,
                    "{}",
                    format!("There is no path to the {} from this room.", direction).red()
                )?;
            }
            ExploreEvent::InvalidChoice(token) => {
                writeln!(
                    out,
                    "{}",
                    format!("Invalid option '{}'. Try again.", token).red()
                )?;
            }
            ExploreEvent::Unreadable => {
                writeln!(out, "{}", "Could not read a choice. Try again.".red())?;
            }
            ExploreEvent::Left(ExitCause::Chosen) => {
                writeln!(out)?;
                writeln!(out, "You left the exploration. Come back soon!")?;
            }
            ExploreEvent::Left(ExitCause::InputExhausted) => {
                writeln!(out)?;
                writeln!(out, "No more input, leaving the exploration.")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Moves, RoomName};
    use std::io::Cursor;

    #[test]
    fn given_lines_when_reading_then_consumes_one_line_per_call() {
        let mut input = LineInput::new(Cursor::new("e junk\n\nd"));

        assert!(matches!(input.next_line(), ReadOutcome::Line(l) if l == "e junk\n"));
        assert!(matches!(input.next_line(), ReadOutcome::Line(l) if l == "\n"));
        assert!(matches!(input.next_line(), ReadOutcome::Line(l) if l == "d"));
        assert!(matches!(input.next_line(), ReadOutcome::Exhausted));
    }

    #[test]
    fn given_invalid_utf8_when_reading_then_unreadable_and_line_consumed() {
        let mut input = LineInput::new(Cursor::new(b"\xff\xfe\ns\n".to_vec()));

        assert!(matches!(input.next_line(), ReadOutcome::Unreadable));
        assert!(matches!(input.next_line(), ReadOutcome::Line(l) if l == "s\n"));
    }

    #[test]
    fn given_line_longer_than_cap_when_reading_then_rest_of_line_skipped() {
        let mut long = "d".repeat(MAX_LINE_BYTES as usize * 10);
        long.push_str("\ns\n");
        let mut input = LineInput::new(Cursor::new(long));

        match input.next_line() {
            ReadOutcome::Line(l) => {
                assert_eq!(l.len(), MAX_LINE_BYTES as usize);
                assert!(l.starts_with('d'));
            }
            other => panic!("expected a line, got {:?}", other),
        }
        assert!(input.buf.capacity() <= MAX_LINE_BYTES as usize * 2);
        assert!(matches!(input.next_line(), ReadOutcome::Line(l) if l == "s\n"));
        assert!(matches!(input.next_line(), ReadOutcome::Exhausted));
    }

    #[test]
    fn given_cap_splitting_a_code_point_when_reading_then_keeps_valid_prefix() {
        // "ú" is two bytes; place it across the cap
        let mut long = "e".repeat(MAX_LINE_BYTES as usize - 1);
        long.push_str("ú tail\n");
        let mut input = LineInput::new(Cursor::new(long));

        match input.next_line() {
            ReadOutcome::Line(l) => assert_eq!(l.len(), MAX_LINE_BYTES as usize - 1),
            other => panic!("expected a line, got {:?}", other),
        }
        assert!(matches!(input.next_line(), ReadOutcome::Exhausted));
    }

    #[test]
    fn given_choices_with_single_door_when_narrating_then_offers_only_that_door() {
        colored::control::set_override(false);
        let mut narrator = ConsoleNarrator::new(Vec::new());

        narrator
            .narrate(&ExploreEvent::Entered(RoomName::new("Sala de Música")))
            .unwrap();
        narrator
            .narrate(&ExploreEvent::Choices(Moves {
                left: true,
                right: false,
            }))
            .unwrap();

        let text = String::from_utf8(narrator.into_inner()).unwrap();
        assert!(text.contains("You are in: Sala de Música"));
        assert!(text.contains("[e] Go left"));
        assert!(!text.contains("[d]"));
        assert!(text.contains("[s] Leave the exploration"));
    }
}
