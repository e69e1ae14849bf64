use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::Context;
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        DisableMouseCapture, EnableMouseCapture, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use galactic_invasion::boundary::{FixedRateClock, FrameClock, InputEvent, InputSource};
use galactic_invasion::compute::{self, GameState, SessionEnd};
use galactic_invasion::config::{Field, GameConfig};
use galactic_invasion::display::{self, TerminalRenderer};
use galactic_invasion::input::{hold_frames_for, spawn_event_reader, TerminalInput};
use galactic_invasion::sprite::Assets;
use galactic_invasion::tuning::{DEFAULT_FIELD_HEIGHT, DEFAULT_FIELD_WIDTH, DEFAULT_TICK_RATE};

#[derive(Parser, Debug)]
#[command(name = "galactic_invasion")]
#[command(about = "Defend against descending waves of invaders")]
struct Args {
    /// Frames per second
    #[arg(long, default_value_t = DEFAULT_TICK_RATE)]
    fps: u32,

    /// Field width in field units
    #[arg(long, default_value_t = DEFAULT_FIELD_WIDTH)]
    width: i32,

    /// Field height in field units
    #[arg(long, default_value_t = DEFAULT_FIELD_HEIGHT)]
    height: i32,

    /// Seed for a reproducible game
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs here (filtered by RUST_LOG, default info)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Args {
    fn game_config(&self) -> GameConfig {
        GameConfig {
            tick_rate: self.fps,
            field: Field::new(self.width, self.height),
        }
    }
}

// The terminal belongs to the game, so logs only go to a file.
fn init_tracing(path: Option<&Path>) -> anyhow::Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.log_file.as_deref())?;

    let config = args.game_config();
    config.validate().context("invalid game configuration")?;
    let assets = Assets::builtin().context("failed to build sprites")?;
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    info!(seed = ?args.seed, fps = config.tick_rate, "starting");

    let mut out = BufWriter::new(stdout());

    terminal::enable_raw_mode().context("failed to enable raw mode")?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)?;

    // Request key-release events; terminals without support fall back to
    // the hold window in `TerminalInput`.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    let mut input = TerminalInput::new(spawn_event_reader(), hold_frames_for(config.tick_rate));
    let result = run(&mut out, &mut input, &config, &assets, &mut rng);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}

/// Intro screen loop. A click (or Enter) starts a session; after game over
/// we come back here. Quitting anywhere ends the program.
fn run<W: Write>(
    out: &mut W,
    input: &mut TerminalInput,
    config: &GameConfig,
    assets: &Assets,
    rng: &mut StdRng,
) -> anyhow::Result<()> {
    let mut clock = FixedRateClock::new();

    loop {
        clock.tick(config.tick_rate);
        let (cols, rows) = terminal::size()?;
        display::render_intro(out, cols, rows)?;

        for event in input.poll_events() {
            match event {
                InputEvent::Quit => return Ok(()),
                InputEvent::MouseDown | InputEvent::Confirm => {
                    let (cols, rows) = terminal::size()?;
                    let mut renderer = TerminalRenderer::new(&mut *out, cols, rows);
                    let mut state = GameState::new(config.clone(), assets.clone(), rng)?;
                    let end = compute::run(&mut state, &mut renderer, input, &mut clock, rng)
                        .context("render failed")?;
                    info!(score = state.score(), level = state.level(), ?end, "session ended");
                    if end == SessionEnd::Quit {
                        return Ok(());
                    }
                    break;
                }
                InputEvent::Other => {}
            }
        }
    }
}
