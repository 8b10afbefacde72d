//! Piece selection: a fixed opening replayed in order, then uniform random picks.

use blocks::grid::{self, Pos, COLS, SPAWN_Y};
use blocks::shape::SHAPE_COUNT;
use blocks::ShapeType;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// One scripted spawn: template index and spawn column.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct ScriptEntry {
    pub shape: u8,
    pub column: u8,
}

impl ScriptEntry {
    pub const fn new(shape: u8, column: u8) -> Self {
        Self { shape, column }
    }

    /// `None` if the template index or the column is out of range.
    pub fn resolve(self) -> Option<Spawn> {
        let shape = ShapeType::new(self.shape)?;
        if self.column > COLS {
            return None;
        }
        Some(Spawn {
            shape,
            at: Pos::new(grid::column_x(self.column), SPAWN_Y),
            scripted: true,
        })
    }
}

/// The built-in opening.
pub static OPENING: [ScriptEntry; 16] = [
    ScriptEntry::new(11, 9),
    ScriptEntry::new(8, 7),
    ScriptEntry::new(4, 8),
    ScriptEntry::new(14, 1),
    ScriptEntry::new(4, 4),
    ScriptEntry::new(5, 5),
    ScriptEntry::new(2, 9),
    ScriptEntry::new(12, 6),
    ScriptEntry::new(2, 8),
    ScriptEntry::new(6, 3),
    ScriptEntry::new(0, 6),
    ScriptEntry::new(4, 2),
    ScriptEntry::new(0, 8),
    ScriptEntry::new(2, 5),
    ScriptEntry::new(7, 6),
    ScriptEntry::new(2, 0),
];

/// What to spawn next and where its pivot goes.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Spawn {
    pub shape: ShapeType,
    pub at: Pos,
    pub scripted: bool,
}

/// Replays a script while in scripted mode, drawing from `rng` once it runs out.
#[derive(Clone, Debug)]
pub struct Sequence<R> {
    script: Vec<Spawn>,
    cursor: usize,
    scripted: bool,
    rng: R,
}

impl<R: Rng> Sequence<R> {
    /// Entries that do not resolve are dropped. An empty script starts in random mode.
    pub fn new(script: &[ScriptEntry], rng: R) -> Self {
        let script = script
            .iter()
            .filter_map(|&entry| {
                let spawn = entry.resolve();
                if spawn.is_none() {
                    warn!("dropping script entry {:?}", entry);
                }
                spawn
            })
            .collect::<Vec<_>>();
        let scripted = !script.is_empty();
        Self {
            script,
            cursor: 0,
            scripted,
            rng,
        }
    }

    pub fn is_scripted(&self) -> bool {
        self.scripted
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.script.len()
    }

    pub fn is_empty(&self) -> bool {
        self.script.is_empty()
    }

    /// The spawn for the current position. Random picks consume the rng.
    pub fn select(&mut self) -> Spawn {
        if self.scripted {
            if let Some(&spawn) = self.script.get(self.cursor) {
                return spawn;
            }
        }
        let shape = ShapeType::wrapping(self.rng.gen_range(0..SHAPE_COUNT));
        let column = self.rng.gen_range(0..=COLS);
        Spawn {
            shape,
            at: Pos::new(grid::column_x(column), SPAWN_Y),
            scripted: false,
        }
    }

    /// Step past the entry that just locked. Returns true when this step leaves scripted
    /// mode.
    pub fn advance(&mut self) -> bool {
        if !self.scripted {
            return false;
        }
        self.cursor += 1;
        if self.cursor >= self.script.len() {
            self.scripted = false;
            return true;
        }
        false
    }

    /// Back to the first scripted entry.
    pub fn restart(&mut self) {
        self.cursor = 0;
        self.scripted = !self.script.is_empty();
    }
}
