mod display;

use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

use flappy_cannon::config::GameConfig;
use flappy_cannon::frame::Game;
use flappy_cannon::notify::Notifier;
use flappy_cannon::store::FileStore;

const FRAME: Duration = Duration::from_millis(16); // ≈60 FPS

/// How long a notification stays on the footer row.
const TOAST_DURATION: Duration = Duration::from_secs(3);

// ── Run options ───────────────────────────────────────────────────────────────

struct RunOptions {
    score_file: PathBuf,
    /// Fixed RNG seed for reproducible runs.
    seed: Option<u64>,
    /// Destination for tracing output; logging is off when unset.
    log_file: Option<PathBuf>,
}

impl RunOptions {
    fn from_env() -> Self {
        RunOptions {
            score_file: std::env::var_os("FLAPPY_SCORE_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(FileStore::default_path),
            seed: std::env::var("FLAPPY_SEED").ok().and_then(|s| s.trim().parse().ok()),
            log_file: std::env::var_os("FLAPPY_LOG").map(PathBuf::from),
        }
    }
}

/// The terminal owns stdout, so logs only ever go to a file.
fn init_logging(options: &RunOptions) -> anyhow::Result<()> {
    let Some(path) = &options.log_file else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

// ── Notifications ─────────────────────────────────────────────────────────────

/// Forwards notifier messages to the render loop.
struct ToastSender(mpsc::Sender<String>);

impl Notifier for ToastSender {
    fn notify(&mut self, message: &str) {
        let _ = self.0.send(message.to_string());
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

fn game_loop<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    options: &RunOptions,
) -> anyhow::Result<()> {
    let rng = match options.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let (toast_tx, toast_rx) = mpsc::channel::<String>();
    let mut game = Game::new(
        GameConfig::default(),
        FileStore::new(options.score_file.clone()),
        ToastSender(toast_tx),
        rng,
    )
    .context("invalid game configuration")?;

    let clock = Instant::now();
    let mut toast: Option<(String, Instant)> = None;

    loop {
        let frame_start = Instant::now();

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            let Event::Key(KeyEvent {
                code,
                kind: KeyEventKind::Press,
                modifiers,
                ..
            }) = ev
            else {
                continue;
            };
            match code {
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Ok(()),
                KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => return Ok(()),
                KeyCode::Char(' ') | KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => {
                    game.jump();
                }
                KeyCode::Enter => {
                    game.start();
                }
                KeyCode::Char('r') | KeyCode::Char('R') => {
                    game.reset();
                }
                _ => {}
            }
        }

        let now = clock.elapsed().as_secs_f64() * 1000.0;
        let world = game.advance(now);

        while let Ok(message) = toast_rx.try_recv() {
            toast = Some((message, Instant::now()));
        }
        if toast.as_ref().is_some_and(|(_, shown)| shown.elapsed() > TOAST_DURATION) {
            toast = None;
        }

        let size = terminal::size().context("failed to read terminal size")?;
        display::render(
            out,
            &world,
            game.config(),
            size,
            toast.as_ref().map(|(message, _)| message.as_str()),
        )
        .context("failed to draw frame")?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let options = RunOptions::from_env();
    init_logging(&options)?;

    let mut out = BufWriter::new(stdout());

    terminal::enable_raw_mode().context("failed to enable raw mode")?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped → program exiting
            }
        }
    });

    let result = game_loop(&mut out, &rx, &options);

    // Always restore the terminal
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}
