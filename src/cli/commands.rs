//! Command dispatch: wires settings, the reference mansion and the console
//! together for each subcommand.

use std::io::{self, Write};
use std::sync::Arc;

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::application::services::ExplorationService;
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, Settings};
use crate::domain::{reference_mansion, DomainError, MapRender, Mansion, RoomId};
use crate::infrastructure::{ConsoleNarrator, LineInput};

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let settings = Arc::new(Settings::load(cli.config_file.as_deref())?);
    match &cli.command {
        Some(Commands::Explore { start }) => _explore(settings, start.as_deref()),
        None => _explore(settings, None),
        Some(Commands::Map) => _map(),
        Some(Commands::DeadEnds) => _dead_ends(),
        Some(Commands::Config { command }) => _config(&settings, command),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            let mut out = io::stdout();
            generate(*shell, &mut cmd, name, &mut out);
            out.flush()
                .map_err(|e| CliError::io("write completion script", e))
        }
    }
}

/// Resolve the starting room: CLI flag, then settings, then the entrance.
fn start_room(mansion: &Mansion, requested: Option<&str>) -> CliResult<RoomId> {
    let id = match requested {
        Some(name) if name.trim().is_empty() => {
            return Err(CliError::InvalidArgs("start room name is empty".to_string()))
        }
        Some(name) => mansion.find_by_name(name)?,
        None => mansion.entrance().ok_or(DomainError::NoEntrance)?,
    };
    Ok(id)
}

#[instrument(skip(settings))]
fn _explore(settings: Arc<Settings>, start: Option<&str>) -> CliResult<()> {
    let mansion = reference_mansion()?;
    let start = start_room(&mansion, start.or(settings.start_room.as_deref()))?;

    output::header("==========================================");
    output::header("     MANSION EXPLORATION (binary tree)");
    output::header("==========================================");

    let service = ExplorationService::new(Arc::clone(&settings));
    let summary = service.explore(
        &mansion,
        start,
        &mut LineInput::stdin(),
        &mut ConsoleNarrator::stdout(),
    )?;
    debug!(
        outcome = ?summary.outcome,
        rooms_visited = summary.path.len(),
        prompts = summary.prompts,
        "exploration ended"
    );

    let released = mansion.release();
    debug!(rooms = released.len(), "mansion released");
    if settings.farewell {
        output::info("");
        output::success(&format!("Mansion released ({} rooms).", released.len()));
    }
    Ok(())
}

#[instrument]
fn _map() -> CliResult<()> {
    let mansion = reference_mansion()?;
    output::info(&mansion.to_map());
    Ok(())
}

#[instrument]
fn _dead_ends() -> CliResult<()> {
    let mansion = reference_mansion()?;
    for name in mansion.dead_ends() {
        output::info(name);
    }
    Ok(())
}

#[instrument(skip(settings))]
fn _config(settings: &Settings, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            output::header("Effective settings");
            output::info(&settings.to_toml()?);
        }
        ConfigCommands::Path => match global_config_path() {
            Some(path) => {
                output::info(&path.display());
                if !path.exists() {
                    output::detail("(not present)");
                }
            }
            None => output::detail("no config directory available on this platform"),
        },
    }
    Ok(())
}
