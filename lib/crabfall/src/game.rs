//! One simulation timeline: the board, the actor and the active piece, advanced a frame
//! at a time.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use blocks::{Board, Pos, ShapeType};

use crate::actor::Actor;
use crate::config::Config;
use crate::dropper::{Dropper, Tick};
use crate::input::Intents;
use crate::script::Sequence;
use crate::snapshot::Snapshot;

pub type GameRng = SmallRng;

/// Things that happened during [`Game::update`], in order.
#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    PieceSpawned {
        shape: ShapeType,
        at: Pos,
        scripted: bool,
    },
    PieceLocked {
        shape: ShapeType,
    },
    LinesCleared {
        rows: Vec<i32>,
        hidden: usize,
    },
    ActorHit {
        hidden: usize,
    },
    ScriptExhausted,
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    /// Cadence steps that fired.
    pub steps: u64,
    pub pieces_placed: u64,
    pub lines_cleared: u64,
    /// Penalties from a piece coming down on the actor.
    pub actor_hits: u64,
}

pub struct Game<R = GameRng> {
    board: Board,
    actor: Actor,
    dropper: Dropper<R>,
    time_scale: f32,
    stats: Stats,
    events: Vec<GameEvent>,
}

impl Game<GameRng> {
    /// Seeded from `config.seed`, or from entropy if there is none.
    pub fn new(config: &Config) -> Self {
        let rng = match config.seed {
            Some(seed) => GameRng::seed_from_u64(seed),
            None => GameRng::from_entropy(),
        };
        Self::with_rng(config, rng)
    }
}

impl<R: Rng> Game<R> {
    pub fn with_rng(config: &Config, rng: R) -> Self {
        let mut board = Board::new();
        let actor = Actor::new(config.actor_spawn(), config.motion());
        let sequence = Sequence::new(&config.script, rng);
        let dropper = Dropper::new(&mut board, sequence, config.cadence(), config.actor_spawn());

        let spawn = dropper.spawn();
        debug!(
            "start with {} at {:?}, scripted: {}",
            spawn.shape, spawn.at, spawn.scripted
        );
        let events = vec![GameEvent::PieceSpawned {
            shape: spawn.shape,
            at: spawn.at,
            scripted: spawn.scripted,
        }];

        Self {
            board,
            actor,
            dropper,
            time_scale: config.time_scale,
            stats: Stats::default(),
            events,
        }
    }

    /// Advance one frame: move the actor, run the piece clock at `total` seconds, and
    /// resolve lines once if a piece locked.
    pub fn update(&mut self, dt: f32, total: f32, intents: Intents) -> Tick {
        self.actor.update(dt, intents, &self.board);

        let now = total * self.time_scale;
        let tick = self.dropper.tick(now, &mut self.board, &mut self.actor);
        if tick != Tick::Wait {
            self.stats.steps += 1;
        }

        match tick {
            Tick::Wait | Tick::Fell => {}
            Tick::Locked {
                shape,
                next,
                exhausted,
            } => {
                self.stats.pieces_placed += 1;
                self.events.push(GameEvent::PieceLocked { shape });
                if exhausted {
                    info!(pieces = self.stats.pieces_placed, "opening exhausted");
                    self.events.push(GameEvent::ScriptExhausted);
                }
                self.events.push(GameEvent::PieceSpawned {
                    shape: next.shape,
                    at: next.at,
                    scripted: next.scripted,
                });

                let clear = self.board.clear_completed_lines();
                if !clear.is_empty() {
                    self.stats.lines_cleared += clear.count() as u64;
                    debug!(rows = ?clear.rows, hidden = clear.hidden, "lines cleared");
                    self.events.push(GameEvent::LinesCleared {
                        rows: clear.rows,
                        hidden: clear.hidden,
                    });
                }
            }
            Tick::HitActor { hidden } => {
                self.stats.actor_hits += 1;
                self.events.push(GameEvent::ActorHit { hidden });
            }
        }

        tick
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn actor(&self) -> &Actor {
        &self.actor
    }

    pub fn dropper(&self) -> &Dropper<R> {
        &self.dropper
    }

    /// Cells of the falling piece.
    pub fn piece_cells(&self) -> impl Iterator<Item = Pos> + '_ {
        self.dropper.piece().cells(self.board.blocks())
    }

    pub fn is_scripted(&self) -> bool {
        self.dropper.sequence().is_scripted()
    }

    pub fn stats(&self) -> Stats {
        self.stats
    }

    /// Drain events recorded since the last call.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.board, &self.actor, self.is_scripted(), self.stats)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::input::Intent;
    use crate::script::ScriptEntry;
    use blocks::grid::{column_x, FLOOR_Y};

    const DT: f32 = 1.0 / 60.0;

    fn config(script: &[ScriptEntry], actor_spawn: [f32; 2]) -> Config {
        Config {
            seed: Some(11),
            actor_spawn,
            script: script.to_vec(),
            ..Config::default()
        }
    }

    /// Run frames with no input until `done` holds.
    fn run_until(game: &mut Game, total: &mut f32, done: impl Fn(&Game) -> bool) {
        for _ in 0..2000 {
            *total += DT;
            game.update(DT, *total, Intents::NONE);
            if done(game) {
                return;
            }
        }
        panic!("condition never reached: {:?}", game.stats());
    }

    #[test]
    fn test_lock_clears_line_once() {
        let script = [ScriptEntry::new(2, 0), ScriptEntry::new(0, 4)];
        let mut game = Game::new(&config(&script, [4.5, -8.0]));
        for c in 1..10 {
            game.board_mut().place(Pos::new(column_x(c), FLOOR_Y));
        }
        let first = game.take_events();
        assert!(matches!(
            first.as_slice(),
            [GameEvent::PieceSpawned { scripted: true, .. }]
        ));

        let mut total = 0.0;
        run_until(&mut game, &mut total, |g| g.stats().pieces_placed == 1);

        assert_eq!(game.stats().lines_cleared, 1);
        let events = game.take_events();
        assert!(
            events.contains(&GameEvent::LinesCleared {
                rows: vec![-9],
                hidden: 10
            }),
            "{events:?}"
        );
        assert!(events.contains(&GameEvent::PieceLocked {
            shape: ShapeType::wrapping(2)
        }));
        assert!(game.take_events().is_empty());

        // the rest of the I came down one row
        let board = game.board();
        assert_eq!(board.solid().count(), 3);
        for y in -9..=-7 {
            assert!(board.supports(Pos::new(-4.5, y as f32)), "row {y}");
        }
        assert!(game.is_scripted());
        assert!(game.piece_cells().all(|p| p.y >= 10.0));
    }

    #[test]
    fn test_script_exhausted_event() {
        let mut game = Game::new(&config(&[ScriptEntry::new(2, 0)], [4.5, -9.0]));
        let mut total = 0.0;
        run_until(&mut game, &mut total, |g| g.stats().pieces_placed == 1);
        let events = game.take_events();
        assert!(events.contains(&GameEvent::ScriptExhausted), "{events:?}");
        assert!(matches!(
            events.last(),
            Some(GameEvent::PieceSpawned {
                scripted: false,
                ..
            })
        ));
        assert!(!game.is_scripted());
        assert!(!game.snapshot().scripted);
    }

    #[test]
    fn test_actor_hit() {
        let mut game = Game::new(&config(&[ScriptEntry::new(0, 4)], [0.0, -9.0]));
        let far = game.board_mut().place(Pos::new(4.5, FLOOR_Y));
        let mut total = 0.0;
        run_until(&mut game, &mut total, |g| g.stats().actor_hits == 1);

        assert!(game.take_events().contains(&GameEvent::ActorHit { hidden: 1 }));
        assert!(!game.board().blocks()[far].visible);
        assert_eq!(game.actor().pos(), Pos::new(0.0, -9.0));
        assert_eq!(game.stats().pieces_placed, 0);
        assert!(game.is_scripted());
    }

    #[test]
    fn test_actor_climbs_out_of_compacted_block() {
        let mut game = Game::new(&config(&[ScriptEntry::new(2, 9)], [0.5, -8.0]));
        for c in 0..10 {
            game.board_mut().place(Pos::new(column_x(c), FLOOR_Y));
        }
        let overhang = game.board_mut().place(Pos::new(0.5, -7.0));

        // the overhang drops onto the actor's row
        assert_eq!(game.board_mut().clear_completed_lines().rows, [-9]);
        assert_eq!(game.board().blocks()[overhang].pos, Pos::new(0.5, -8.0));
        assert_eq!(game.actor().pos(), Pos::new(0.5, -8.0));

        let mut total = 0.0;
        for _ in 0..120 {
            total += DT;
            game.update(DT, total, Intents::NONE);
        }
        assert_eq!(game.actor().pos(), Pos::new(0.5, -7.0));
        assert!(game.actor().is_grounded());
        assert_eq!(game.stats().actor_hits, 0);
    }

    #[test]
    fn test_actor_walks_during_frames() {
        let mut game = Game::new(&config(&[], [0.0, -9.0]));
        game.update(0.25, 0.0, Intent::MoveRight.into());
        assert_eq!(game.actor().pos(), Pos::new(1.0, -9.0));
        game.update(DT, DT, Intent::Jump.into());
        assert!(!game.actor().is_grounded());
    }

    #[test]
    fn test_seeded_runs_match() {
        let cfg = config(&[], [0.0, -9.0]);
        let mut a = Game::new(&cfg);
        let mut b = Game::new(&cfg);
        let mut total = 0.0;
        for frame in 0..900 {
            total += DT;
            let intents = if frame % 90 < 30 {
                Intent::MoveLeft | Intent::Jump
            } else {
                Intent::MoveRight.into()
            };
            assert_eq!(a.update(DT, total, intents), b.update(DT, total, intents));
        }
        assert_eq!(a.take_events(), b.take_events());
        assert_eq!(a.snapshot(), b.snapshot());
        assert!(a.stats().steps > 0);
    }
}
