//! typist - a terminal typewriter that greets the world in many languages.

use std::io;
use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::eyre;
use tracing::{info, warn};
use typist_config::{Config, load_script};
use typist_core::Script;
use typist_engine::{
    CancelToken, OutputSurface, RunOutcome, Sequencer, SequencerBuilder, SystemClock,
};

mod app;
mod greeting;
mod logging;
mod player;
mod surface;

use app::App;
use logging::LogTarget;
use player::Player;
use surface::{SharedSurface, StdoutSurface};

#[derive(Debug, Parser)]
#[command(name = "typist")]
#[command(about = "Types a greeting in many languages, one character at a time")]
#[command(version)]
struct Cli {
    /// Script file to play (TOML or JSON) instead of the built-in greeting
    #[arg(short, long)]
    script: Option<PathBuf>,

    /// Path to config.toml (defaults to the platform config directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Type straight to stdout instead of opening the full-screen view
    #[arg(long)]
    plain: bool,

    /// Validate the script and exit
    #[arg(long)]
    check: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    let target = if cli.plain || cli.check {
        LogTarget::Stderr
    } else {
        LogTarget::File
    };
    if let Some(path) = logging::init(target, cli.verbose)? {
        info!(path = %path.display(), "logging to file");
    }

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let script = resolve_script(&cli, &config)?;

    if cli.check {
        return check(&script);
    }
    if cli.plain {
        return run_plain(script, &config);
    }
    run_tui(script, &config)
}

/// Pick the script: CLI flag, then config, then the built-in greeting.
fn resolve_script(cli: &Cli, config: &Config) -> color_eyre::Result<Script> {
    let Some(path) = cli.script.as_ref().or(config.behavior.script.as_ref()) else {
        return Ok(greeting::greeting_script()?);
    };

    let script = load_script(path)?;
    if let Err(err) = script.validate() {
        warn!(path = %path.display(), %err, "script failed validation");
    }
    Ok(script)
}

fn check(script: &Script) -> color_eyre::Result<()> {
    let visible = script.final_len()?;
    println!(
        "ok: {} operations, {} characters left visible",
        script.len(),
        visible
    );
    Ok(())
}

fn build_sequencer<S: OutputSurface>(
    script: Script,
    config: &Config,
    surface: S,
) -> color_eyre::Result<Sequencer<S>> {
    let sequencer = SequencerBuilder::new(script)
        .surface(surface)
        .type_delay(config.type_delay())
        .delete_delay(config.delete_delay())
        .underflow_policy(config.underflow_policy())
        .pacing(config.typing.pacing)
        .build()?;
    Ok(sequencer)
}

fn run_plain(script: Script, config: &Config) -> color_eyre::Result<()> {
    let mut sequencer = build_sequencer(script, config, StdoutSurface::new(io::stdout()))?;
    let mut clock = SystemClock::new();
    let outcome = sequencer.run(&mut clock, &CancelToken::new())?;
    info!(?outcome, "playback finished");

    let mut surface = sequencer.into_surface();
    if let Some(err) = surface.take_error() {
        return Err(eyre!("failed to write to stdout: {err}"));
    }
    Ok(())
}

fn run_tui(script: Script, config: &Config) -> color_eyre::Result<()> {
    let surface = SharedSurface::new();
    let sequencer = build_sequencer(script, config, surface.clone())?;
    let player = Player::spawn(sequencer);

    let terminal = ratatui::init();
    let result = App::new(config, surface, player).run(terminal);
    ratatui::restore();

    match result? {
        RunOutcome::Completed => info!("greeting completed"),
        RunOutcome::Cancelled => info!("greeting cancelled"),
        RunOutcome::Failed => warn!("greeting stopped on underflow"),
    }
    Ok(())
}
