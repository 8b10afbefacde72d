//! The player actor. It walks, jumps and falls on the same grid as the pieces, and is
//! pushed out of solid cells along its direction of travel.

use blocks::grid::{self, Pos, FLOOR_Y, MAX_X, MIN_X};
use blocks::Solid;

use crate::input::{Intent, Intents};

/// Movement tuning.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Motion {
    /// Horizontal units per second while a move intent is held.
    pub speed: f32,
    /// Downward acceleration while airborne.
    pub gravity: f32,
    /// Upward velocity set by a jump.
    pub jump_impulse: f32,
}

impl Default for Motion {
    fn default() -> Self {
        Self {
            speed: 4.0,
            gravity: 9.8,
            jump_impulse: 9.0,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Actor {
    pos: Pos,
    velocity: f32,
    grounded: bool,
    motion: Motion,
}

impl Actor {
    pub fn new(pos: Pos, motion: Motion) -> Self {
        Self {
            pos,
            velocity: 0.0,
            grounded: true,
            motion,
        }
    }

    pub fn pos(&self) -> Pos {
        self.pos
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    pub fn motion(&self) -> Motion {
        self.motion
    }

    /// Put the actor back at `pos`, at rest.
    pub fn reset(&mut self, pos: Pos) {
        self.pos = pos;
        self.velocity = 0.0;
        self.grounded = pos.y == FLOOR_Y;
    }

    /// Advance one frame of `dt` seconds.
    pub fn update<S: Solid + ?Sized>(&mut self, dt: f32, intents: Intents, solid: &S) {
        let step = dt * self.motion.speed;
        if intents.contains(Intent::MoveLeft) {
            self.move_by(-step, 0.0, solid);
        }
        if intents.contains(Intent::MoveRight) {
            self.move_by(step, 0.0, solid);
        }

        if self.pos.y == FLOOR_Y {
            self.grounded = true;
        }
        if intents.contains(Intent::Jump) {
            self.jump();
        }

        self.move_by(0.0, dt * self.velocity, solid);

        if self.grounded {
            self.velocity = 0.0;
        } else {
            self.velocity -= self.motion.gravity * dt;
        }
    }

    /// Leave the ground. Returns false, doing nothing, while airborne.
    pub fn jump(&mut self) -> bool {
        if !self.grounded {
            return false;
        }
        self.velocity = self.motion.jump_impulse;
        self.grounded = false;
        true
    }

    /// Move by `(dx, dy)`, horizontal first. On each axis the actor is pushed back out of
    /// any solid cell it overlaps or passes through, against the direction of travel.
    pub fn move_by<S: Solid + ?Sized>(&mut self, dx: f32, dy: f32, solid: &S) {
        self.grounded = false;
        self.move_x(dx, solid);
        self.move_y(dy, solid);

        if self.pos.y == FLOOR_Y || (dy <= 0.0 && self.standing_on(solid)) {
            self.grounded = true;
        }
    }

    fn move_x<S: Solid + ?Sized>(&mut self, dx: f32, solid: &S) {
        let from = self.pos.x;
        self.pos.x = (from + dx).clamp(MIN_X, MAX_X);
        if dx == 0.0 {
            return;
        }

        let to = self.pos.x;
        for cell in solid.solid_cells() {
            if !grid::near(self.pos.y, cell.y) || !swept(from, to, cell.x) {
                continue;
            }
            if dx > 0.0 {
                self.pos.x = self.pos.x.min(cell.x - 1.0);
            } else {
                self.pos.x = self.pos.x.max(cell.x + 1.0);
            }
        }
    }

    fn move_y<S: Solid + ?Sized>(&mut self, dy: f32, solid: &S) {
        let from = self.pos.y;
        self.pos.y = (from + dy).max(FLOOR_Y);
        if dy == 0.0 {
            return;
        }

        let to = self.pos.y;
        for cell in solid.solid_cells() {
            if !grid::near(self.pos.x, cell.x) || !swept(from, to, cell.y) {
                continue;
            }
            self.velocity = 0.0;
            if dy > 0.0 {
                self.pos.y = self.pos.y.min(cell.y - 1.0);
            } else {
                self.pos.y = self.pos.y.max(cell.y + 1.0);
                self.grounded = true;
            }
        }
    }

    /// A solid cell sits exactly one row below, overlapping horizontally.
    fn standing_on<S: Solid + ?Sized>(&self, solid: &S) -> bool {
        solid
            .solid_cells()
            .any(|cell| cell.y == self.pos.y - 1.0 && grid::near(self.pos.x, cell.x))
    }
}

/// `c` is within one unit of the segment from `from` to `to`, ends included.
fn swept(from: f32, to: f32, c: f32) -> bool {
    let (lo, hi) = if from <= to { (from, to) } else { (to, from) };
    c > lo - 1.0 && c < hi + 1.0
}
