mod audio;
mod config;
mod display;

use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::Path;
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::filter::EnvFilter;

use dino_runner::compute::{init_state, tick};
use dino_runner::entities::{GameEvent, Session};
use dino_runner::input::{apply_trigger, Trigger};
use dino_runner::storage::{load_high_score, record_events, JsonFileStore};

use audio::{Cue, Sounds};
use config::Args;
use display::TerminalSurface;

/// Keys that fire a trigger. Shooting in the classic variant is filtered out
/// by the input layer, not here.
fn key_trigger(code: KeyCode) -> Option<Trigger> {
    match code {
        KeyCode::Char(' ') | KeyCode::Up => Some(Trigger::Jump),
        KeyCode::Char('z') | KeyCode::Char('Z') => Some(Trigger::Shoot),
        _ => None,
    }
}

fn is_quit(code: KeyCode, modifiers: KeyModifiers) -> bool {
    match code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => true,
        KeyCode::Char('c') => modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

// ── Side effects of game events ───────────────────────────────────────────────

struct Effects {
    store: JsonFileStore,
    sounds: Sounds,
}

impl Effects {
    fn dispatch(&mut self, events: &[GameEvent]) {
        for cue in events.iter().filter_map(Cue::for_event) {
            self.sounds.play(cue);
        }
        // Best effort: a failed write only costs the record.
        if let Err(e) = record_events(&mut self.store, events) {
            tracing::warn!(error = %format!("{e:#}"), "could not save high score");
        }
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the player quits. Input is drained between frames, so a
/// trigger is never applied while a tick is in progress.
fn game_loop<W: Write>(
    out: &mut W,
    state: &mut Session,
    rx: &mpsc::Receiver<Event>,
    rng: &mut StdRng,
    args: &Args,
    effects: &mut Effects,
) -> Result<()> {
    let (cols, rows) = terminal::size()?;
    let mut surface = TerminalSurface::new(cols, rows);
    let frame_duration = args.frame_duration();

    loop {
        let frame_start = Instant::now();

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            let trigger = match ev {
                Event::Key(KeyEvent { code, kind: KeyEventKind::Press, modifiers, .. }) => {
                    if is_quit(code, modifiers) {
                        return Ok(());
                    }
                    key_trigger(code)
                }
                Event::Mouse(MouseEvent {
                    kind: MouseEventKind::Down(MouseButton::Left),
                    column,
                    row,
                    ..
                }) => surface.trigger_at(column, row, state.variant),
                Event::Resize(c, r) => {
                    surface.resize(c, r);
                    None
                }
                _ => None,
            };

            if let Some(trigger) = trigger {
                let (next, events) = apply_trigger(state, trigger);
                *state = next;
                effects.dispatch(&events);
            }
        }

        // ── One tick ──────────────────────────────────────────────────────────
        let (next, events) = tick(state, rng);
        *state = next;
        effects.dispatch(&events);

        display::render(out, &mut surface, state)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_duration {
            thread::sleep(frame_duration - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn init_logging(path: Option<&Path>) -> Result<()> {
    // stdout belongs to the game screen; without a file, stay silent.
    let Some(path) = path else {
        return Ok(());
    };
    let file = File::options()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_file.as_deref())?;

    let store = JsonFileStore::new(args.store_path());
    let high_score = load_high_score(&store);
    tracing::info!(store = %store.path().display(), high_score, "loaded high score");

    let mut effects = Effects {
        store,
        sounds: Sounds::new(),
    };
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut state = init_state(args.variant(), high_score, &mut rng);

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)?;

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

    let result = game_loop(&mut out, &mut state, &rx, &mut rng, &args, &mut effects);

    // Always restore the terminal
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    tracing::info!(high_score = state.high_score, "exiting");
    result
}
