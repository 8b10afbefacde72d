//! Runs the simulation without a window, driven by a small autopilot.

#[macro_use]
extern crate tracing;

use anyhow::{Context, Result};
use blocks::grid::{COLS, FLOOR_Y, MAX_X, MIN_X, SPAWN_Y};
use blocks::Pos;
use clap::Parser;
use crabfall::{Config, Game, GameEvent, Intent, Intents};
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Headless falling-block runner.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// JSON config file.
    #[arg(long)]
    config: Option<PathBuf>,
    /// RNG seed, overrides the config.
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long, default_value_t = 1800)]
    frames: u32,
    #[arg(long, default_value_t = 60)]
    fps: u32,
    /// Print snapshots as JSON lines instead of drawing the board.
    #[arg(long)]
    json: bool,
    /// Output every N frames.
    #[arg(long, default_value_t = 30)]
    every: u32,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("crabfall=info")),
        )
        .with_ansi(true)
        .with_timer(tracing_subscriber::fmt::time::uptime())
        .compact()
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => Config::default(),
    };
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    debug!("config: {config}");

    let dt = 1.0 / args.fps.max(1) as f32;
    let every = args.every.max(1);
    let mut game = Game::new(&config);
    let mut pilot = Autopilot::new();
    let mut out = BufWriter::new(std::io::stdout().lock());
    let mut total = 0.0f32;

    for frame in 1..=args.frames {
        total += dt;
        let intents = pilot.intents(&game);
        game.update(dt, total, intents);

        for event in game.take_events() {
            match event {
                GameEvent::LinesCleared { rows, .. } => info!(?rows, "cleared"),
                GameEvent::ActorHit { hidden } => info!(hidden, "actor hit, board wiped"),
                other => trace!("{other:?}"),
            }
        }

        if frame % every == 0 {
            if args.json {
                writeln!(out, "{}", game.snapshot()).context("write error")?;
            } else {
                print_game_state(&mut out, frame, &game).context("write error")?;
            }
        }
    }
    out.flush().context("write error")?;

    let stats = game.stats();
    info!(
        steps = stats.steps,
        pieces = stats.pieces_placed,
        lines = stats.lines_cleared,
        hits = stats.actor_hits,
        "done after {:.1}s",
        total
    );
    Ok(())
}

/// Walks away from whatever is falling above the actor and jumps when blocked.
struct Autopilot {
    heading: Intent,
    last_x: f32,
}

impl Autopilot {
    fn new() -> Self {
        Self {
            heading: Intent::MoveRight,
            last_x: f32::NAN,
        }
    }

    fn intents(&mut self, game: &Game) -> Intents {
        let actor = game.actor();
        let at = actor.pos();
        let threatened = game
            .piece_cells()
            .any(|p| (p.x - at.x).abs() < 1.5 && p.y > at.y);

        let mut held = Intents::NONE;
        if threatened {
            if at.x >= MAX_X {
                self.heading = Intent::MoveLeft;
            } else if at.x <= MIN_X {
                self.heading = Intent::MoveRight;
            }
            held.insert(self.heading);
            if at.x == self.last_x && actor.is_grounded() {
                held.insert(Intent::Jump);
            }
        }
        self.last_x = at.x;
        held
    }
}

fn print_game_state(out: &mut impl Write, frame: u32, game: &Game) -> std::io::Result<()> {
    let stats = game.stats();
    let mode = if game.is_scripted() { "scripted" } else { "random" };
    writeln!(
        out,
        "frame: {frame}, pcs: {}, lines: {}, hits: {}, {mode}",
        stats.pieces_placed, stats.lines_cleared, stats.actor_hits
    )?;

    let height = (SPAWN_Y - FLOOR_Y) as usize + 1;
    let mut rows = vec![[' '; COLS as usize]; height];
    let mut mark = |pos: Pos, c: char| {
        let row = (pos.y - FLOOR_Y).round();
        if let Some(col) = pos.column() {
            if (0.0..height as f32).contains(&row) {
                rows[row as usize][col as usize] = c;
            }
        }
    };

    for b in game.board().solid() {
        mark(b.pos, '#');
    }
    for p in game.piece_cells() {
        mark(p, 'o');
    }
    // the actor moves freely, draw it in the nearest column
    let at = game.actor().pos();
    mark(Pos::new((at.x - MIN_X).round() + MIN_X, at.y), '@');

    for row in rows.iter().rev() {
        let row_concat = row.iter().collect::<String>();
        writeln!(out, "|{row_concat}|")?;
    }
    writeln!(out, "+----------+")?;
    writeln!(out)
}
