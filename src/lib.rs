//! mansion: explore a fixed binary tree of rooms from the entrance hall
//! toward its dead ends.
//!
//! Layers, innermost first:
//! - [`domain`]: rooms, the room arena and the traversal state machine
//! - [`application`]: the exploration loop over I/O boundary traits
//! - [`infrastructure`]: console implementations of those traits
//! - [`cli`]: argument parsing and command dispatch

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
