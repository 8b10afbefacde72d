//! The piece state machine. One piece is always active; on each cadence step it either
//! locks, punishes the actor, or falls one row.

use blocks::{Board, Piece, Pos, ShapeType};
use rand::Rng;

use crate::actor::Actor;
use crate::script::{Sequence, Spawn};

/// Fall timing, in logical time units.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Cadence {
    pub first_step_at: f32,
    pub interval: f32,
}

impl Default for Cadence {
    fn default() -> Self {
        Self {
            first_step_at: 0.5,
            interval: 0.6,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Phase {
    /// Placed at its spawn position, not yet stepped.
    Spawned,
    /// Has fallen at least one row.
    Falling,
}

/// Outcome of [`Dropper::tick`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Tick {
    /// No step was due.
    Wait,
    /// The piece moved down one row.
    Fell,
    /// The piece joined the board and `next` was spawned in its place.
    Locked {
        shape: ShapeType,
        next: Spawn,
        /// This lock consumed the last scripted entry.
        exhausted: bool,
    },
    /// The piece came down on the actor. Every settled block was hidden, the actor was
    /// sent back to its spawn and the script restarted.
    HitActor { hidden: usize },
}

#[derive(Clone, Debug)]
pub struct Dropper<R> {
    piece: Piece,
    spawn: Spawn,
    phase: Phase,
    sequence: Sequence<R>,
    cadence: Cadence,
    next_step: f32,
    actor_spawn: Pos,
}

impl<R: Rng> Dropper<R> {
    /// Spawn the first piece.
    pub fn new(
        board: &mut Board,
        mut sequence: Sequence<R>,
        cadence: Cadence,
        actor_spawn: Pos,
    ) -> Self {
        let (piece, spawn) = spawn_next(board, &mut sequence);
        Self {
            piece,
            spawn,
            phase: Phase::Spawned,
            sequence,
            cadence,
            next_step: cadence.first_step_at,
            actor_spawn,
        }
    }

    pub fn piece(&self) -> &Piece {
        &self.piece
    }

    /// Where the active piece came from.
    pub fn spawn(&self) -> Spawn {
        self.spawn
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn sequence(&self) -> &Sequence<R> {
        &self.sequence
    }

    /// Logical time the next step fires after.
    pub fn next_step(&self) -> f32 {
        self.next_step
    }

    /// Run at most one step, if `now` has passed the scheduled time.
    pub fn tick(&mut self, now: f32, board: &mut Board, actor: &mut Actor) -> Tick {
        if now <= self.next_step {
            return Tick::Wait;
        }
        self.next_step += self.cadence.interval;

        if self.piece.landed(board) {
            let shape = self.piece.shape();
            self.piece.settle(board);
            let exhausted = self.sequence.advance();

            let (piece, next) = spawn_next(board, &mut self.sequence);
            self.piece = piece;
            self.spawn = next;
            self.phase = Phase::Spawned;
            debug!(
                "locked {} at {:?}, next {} at {:?}",
                shape,
                self.piece.pivot(board.blocks()),
                next.shape,
                next.at
            );
            Tick::Locked {
                shape,
                next,
                exhausted,
            }
        } else if self.piece.hits(actor.pos(), board.blocks()) {
            let hidden = board.hide_all();
            actor.reset(self.actor_spawn);
            self.sequence.restart();
            debug!(hidden, actor = ?actor.pos(), "piece hit actor");
            Tick::HitActor { hidden }
        } else {
            self.piece.slide_down(board.blocks_mut());
            self.phase = Phase::Falling;
            trace!(pivot = ?self.piece.pivot(board.blocks()), "fell");
            Tick::Fell
        }
    }
}

fn spawn_next<R: Rng>(board: &mut Board, sequence: &mut Sequence<R>) -> (Piece, Spawn) {
    let next = sequence.select();
    let piece = Piece::build(next.shape, board);
    piece.position_at(next.at, board.blocks_mut());
    (piece, next)
}
