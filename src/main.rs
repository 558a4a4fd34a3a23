use anyhow::{Context, Result};
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use flappy::app::FlappyApp;
use flappy::config::GameConfig;
use flappy::core::FrameLoop;
use flappy::input::TerminalScheduler;
use flappy::render::SpriteSheet;
use flappy::ui::draw_ui;
use flappy::utils::persistence::{write_best_score, JsonFileStore, ScoreStore};
use flappy::utils::{build_info, logging};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

type Term = Terminal<CrosstermBackend<Stdout>>;

/// Command-line overrides on top of `~/.flappy/config.json`.
#[derive(Debug, Default, PartialEq)]
struct RunOptions {
    seed: Option<u64>,
    sprites: Option<PathBuf>,
    fps: Option<u32>,
    reset_best: bool,
}

impl RunOptions {
    fn apply(&self, config: &mut GameConfig) {
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(path) = &self.sprites {
            config.sprite_sheet = Some(path.clone());
        }
        if let Some(fps) = self.fps {
            config.fps = fps;
        }
    }
}

#[derive(Debug, PartialEq)]
enum Command {
    Run(RunOptions),
    Version,
    Help,
}

fn parse_value<T: FromStr>(flag: &str, value: Option<&String>) -> Result<T, String> {
    let value = value.ok_or_else(|| format!("Missing value for {}", flag))?;
    value
        .parse()
        .map_err(|_| format!("Invalid value for {}: {}", flag, value))
}

fn parse_args(args: &[String]) -> Result<Command, String> {
    let mut options = RunOptions::default();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--version" | "-v" => return Ok(Command::Version),
            "--help" | "-h" => return Ok(Command::Help),
            "--reset-best" => options.reset_best = true,
            "--seed" => options.seed = Some(parse_value(arg, iter.next())?),
            "--fps" => options.fps = Some(parse_value(arg, iter.next())?),
            "--sprites" => options.sprites = Some(parse_value(arg, iter.next())?),
            other => return Err(format!("Unknown argument: {}", other)),
        }
    }

    Ok(Command::Run(options))
}

fn print_help() {
    println!("Flappy - terminal side-scroller\n");
    println!("Usage: flappy [options]\n");
    println!("Options:");
    println!("  --seed <n>        Seed the pipe generator");
    println!("  --sprites <path>  Load the sprite sheet from a PNG");
    println!("  --fps <n>         Target frame rate (default 60)");
    println!("  --reset-best      Reset the stored best score and exit");
    println!("  --version         Show version information");
    println!("  --help            Show this help message");
    println!("\nSet FLAPPY_LOG (e.g. FLAPPY_LOG=debug) to change log verbosity.");
}

fn load_sprite_sheet(path: Option<&Path>) -> SpriteSheet {
    let Some(path) = path else {
        return SpriteSheet::procedural();
    };
    match SpriteSheet::load(path) {
        Ok(sheet) => sheet,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "using built-in sprites");
            eprintln!(
                "Warning: could not load {} ({}), using built-in sprites",
                path.display(),
                e
            );
            SpriteSheet::procedural()
        }
    }
}

fn setup_terminal() -> Result<Term> {
    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    stdout
        .execute(EnterAlternateScreen)
        .context("failed to enter alternate screen")?;
    stdout
        .execute(EnableMouseCapture)
        .context("failed to enable mouse capture")?;
    Terminal::new(CrosstermBackend::new(stdout)).context("failed to create terminal")
}

/// Undo everything `setup_terminal` may have done. Safe to call after a
/// partial setup.
fn restore_terminal() {
    let mut stdout = io::stdout();
    let steps = [
        disable_raw_mode(),
        stdout.execute(DisableMouseCapture).map(|_| ()),
        stdout.execute(LeaveAlternateScreen).map(|_| ()),
    ];
    for err in steps.into_iter().filter_map(|step| step.err()) {
        tracing::warn!(error = %err, "terminal restore step failed");
    }
}

fn run<R: Rng, S: ScoreStore>(
    terminal: &mut Term,
    app: &mut FlappyApp<R, S>,
    interval: Duration,
) -> io::Result<u64> {
    let mut frame_loop = FrameLoop::new();
    let mut scheduler = TerminalScheduler::new(interval);

    frame_loop.run(&mut scheduler, |events| {
        app.frame(events);
        terminal.draw(|frame| draw_ui(frame, app.game(), app.canvas()))?;
        Ok(())
    })
}

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = match parse_args(&args) {
        Ok(Command::Run(options)) => options,
        Ok(Command::Version) => {
            println!("{}", build_info::version_line());
            return Ok(());
        }
        Ok(Command::Help) => {
            print_help();
            return Ok(());
        }
        Err(message) => {
            eprintln!("{}", message);
            eprintln!("Run 'flappy --help' for usage.");
            std::process::exit(1);
        }
    };

    if let Err(e) = logging::init_logging() {
        eprintln!("Warning: logging disabled: {}", e);
    }
    tracing::info!(version = %build_info::version_line(), "starting");

    let mut config = GameConfig::load();
    options.apply(&mut config);

    let mut store = JsonFileStore::open_default().context("failed to open best-score store")?;
    if options.reset_best {
        write_best_score(&mut store, 0).with_context(|| {
            format!("failed to reset best score in {}", store.path().display())
        })?;
        tracing::info!("best score reset");
        println!("Best score reset.");
        return Ok(());
    }

    let sheet = load_sprite_sheet(config.sprite_sheet.as_deref());
    let rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let interval = config.frame_interval();
    let mut app = FlappyApp::new(config, sheet, store, rng);

    let mut terminal = match setup_terminal() {
        Ok(terminal) => terminal,
        Err(e) => {
            restore_terminal();
            return Err(e);
        }
    };

    let result = run(&mut terminal, &mut app, interval);
    restore_terminal();
    terminal.show_cursor().ok();

    let frames = result.context("game loop failed")?;
    tracing::info!(frames, best = app.game().best_score, "exiting");
    println!("Best score: {}", app.game().best_score);

    Ok(())
}
