//! TETRS bot - headless runner
//!
//! Plays one seeded session with the configured bot, then prints the final
//! board and a JSON summary.

use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tetrs_bot::{Bot, ClearEvent, Game, Result, Score, Settings, TetrominoType};
use tracing_subscriber::EnvFilter;

/// Get or create the temp directory for log files
fn tetrs_temp_dir() -> PathBuf {
    let dir = std::env::temp_dir().join("tetrs-bot");
    let _ = std::fs::create_dir_all(&dir);
    dir
}

#[derive(Serialize)]
struct Summary<'a> {
    seed: u64,
    policy: &'static str,
    placements: u32,
    pieces_placed: u32,
    game_over: bool,
    elapsed: String,
    score: &'a Score,
    last_clear: Option<&'a ClearEvent>,
    next: Vec<TetrominoType>,
}

fn main() -> Result<()> {
    // Generate session ID for this instance
    let session_id: u32 = rand::random();

    // An optional first argument points at a settings file. The default
    // location is best effort; its error is logged once tracing is up.
    let (settings, load_error) = match std::env::args().nth(1) {
        Some(path) => (Settings::load_from(Path::new(&path))?, None),
        None => match Settings::load() {
            Ok(settings) => (settings, None),
            Err(err) => (Settings::default(), Some(err)),
        },
    };

    // Setup tracing to log file
    let log_dir = tetrs_temp_dir();
    let log_file = format!("{:08x}.log", session_id);
    let file_appender = tracing_appender::rolling::never(&log_dir, &log_file);
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&settings.logging.filter)),
        )
        .with_ansi(false)
        .init();

    if let Some(err) = load_error {
        tracing::warn!(
            path = ?Settings::settings_path(),
            error = %err,
            "ignoring unreadable settings, using defaults"
        );
    }

    let seed = settings.bot.seed.unwrap_or_else(rand::random);
    tracing::info!(
        session = %format!("{:08x}", session_id),
        log = %log_dir.join(&log_file).display(),
        seed,
        policy = ?settings.bot.policy,
        "tetrs-bot starting up"
    );

    let mut game = Game::with_seed(settings.board.rows, settings.board.cols, seed)
        .with_preview(settings.board.preview);
    let mut bot = Bot::from_settings(&settings.bot, seed);

    while bot.is_active(&game) {
        let frame = Instant::now();
        if bot.make_move(&mut game).is_none() {
            break;
        }
        game.tick(frame.elapsed());
    }

    tracing::info!(
        placements = bot.move_count(),
        score = game.score().points,
        lines = game.lines_cleared(),
        game_over = game.is_game_over(),
        "session finished"
    );

    print!("{}", game.grid());
    let summary = Summary {
        seed,
        policy: bot.policy_name(),
        placements: bot.move_count(),
        pieces_placed: game.pieces_placed(),
        game_over: game.is_game_over(),
        elapsed: game.clock().format_time(),
        score: game.score(),
        last_clear: game.last_clear(),
        next: game.preview(),
    };
    println!("{}", serde_json::to_string_pretty(&summary)?);

    Ok(())
}
