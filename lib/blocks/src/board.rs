//! The board: the arena every block lives in, the registry of settled blocks, and the
//! line-clear resolver.

use core::hash::BuildHasherDefault;

use crate::block::{Arena, Block, BlockId};
use crate::grid::{Pos, CLEAR_ROWS, ROW_FULL};

type HashMap<K, V> = hashbrown::HashMap<K, V, BuildHasherDefault<ahash::AHasher>>;

/// Cells that something moving on the grid cannot pass through.
pub trait Solid {
    fn solid_cells(&self) -> impl Iterator<Item = Pos> + '_;
}

impl Solid for [Pos] {
    fn solid_cells(&self) -> impl Iterator<Item = Pos> + '_ {
        self.iter().copied()
    }
}

/// Block storage plus the set of blocks locked into the board.
///
/// Falling blocks live in the same arena; they join the board when [`Board::settle`]
/// flips their flag and registers their handle.
#[derive(Clone, Debug, Default)]
pub struct Board {
    blocks: Arena,
    settled: Vec<BlockId>,
}

/// Result of one [`Board::clear_completed_lines`] pass.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct LineClear {
    /// Row of each clear, in resolution order. A row repeats when compaction refilled it.
    pub rows: Vec<i32>,
    /// Number of blocks hidden.
    pub hidden: usize,
}

impl LineClear {
    pub fn count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl Board {
    pub fn new() -> Self {
        Self {
            blocks: Arena::new(),
            settled: Vec::with_capacity(256),
        }
    }

    pub fn blocks(&self) -> &Arena {
        &self.blocks
    }

    pub fn blocks_mut(&mut self) -> &mut Arena {
        &mut self.blocks
    }

    /// Allocate a falling block.
    pub fn spawn_block(&mut self, pos: Pos) -> BlockId {
        self.blocks.alloc(pos)
    }

    /// Lock a block into the board. Settling an already settled block does nothing.
    pub fn settle(&mut self, id: BlockId) {
        let block = &mut self.blocks[id];
        if !block.settled {
            block.settled = true;
            self.settled.push(id);
        }
    }

    /// Allocate a block directly into the board.
    pub fn place(&mut self, pos: Pos) -> BlockId {
        let id = self.spawn_block(pos);
        self.settle(id);
        id
    }

    /// Number of settled blocks, hidden ones included.
    pub fn len(&self) -> usize {
        self.settled.len()
    }

    pub fn is_empty(&self) -> bool {
        self.settled.is_empty()
    }

    pub fn settled(&self) -> impl Iterator<Item = (BlockId, &Block)> + '_ {
        self.settled.iter().map(|&id| (id, &self.blocks[id]))
    }

    /// Settled blocks that are still visible.
    pub fn solid(&self) -> impl Iterator<Item = &Block> + '_ {
        self.settled().map(|(_, b)| b).filter(|b| b.is_solid())
    }

    /// Solid blocks on row `y`.
    pub fn row(&self, y: i32) -> impl Iterator<Item = BlockId> + '_ {
        let y = y as f32;
        self.settled()
            .filter(move |(_, b)| b.is_solid() && b.pos.y == y)
            .map(|(id, _)| id)
    }

    pub fn row_len(&self, y: i32) -> usize {
        self.row(y).count()
    }

    pub fn is_row_complete(&self, y: i32) -> bool {
        self.row_len(y) >= ROW_FULL
    }

    /// True if a solid block sits exactly at `pos`.
    pub fn supports(&self, pos: Pos) -> bool {
        self.solid().any(|b| b.pos == pos)
    }

    /// Hide every settled block. Returns how many were visible.
    pub fn hide_all(&mut self) -> usize {
        let mut hidden = 0;
        for &id in &self.settled {
            let block = &mut self.blocks[id];
            if block.visible {
                block.visible = false;
                hidden += 1;
            }
        }
        hidden
    }

    fn row_counts(&self) -> HashMap<i32, usize> {
        let mut counts = HashMap::default();
        for b in self.solid() {
            *counts.entry(b.pos.y as i32).or_insert(0) += 1;
        }
        counts
    }

    /// Hide every complete row and drop everything above it by one, bottom row first.
    ///
    /// After a clear the same row is tested again, since the rows that came down may
    /// complete it. Hidden blocks stay settled and keep moving with compaction.
    pub fn clear_completed_lines(&mut self) -> LineClear {
        let mut result = LineClear::default();
        let mut counts = self.row_counts();

        let mut y = CLEAR_ROWS.start;
        while y < CLEAR_ROWS.end {
            if counts.get(&y).map_or(true, |&n| n < ROW_FULL) {
                y += 1;
                continue;
            }

            let line = self.row(y).collect::<Vec<_>>();
            for &id in &line {
                self.blocks[id].visible = false;
            }

            let cleared = y as f32;
            for &id in &self.settled {
                let block = &mut self.blocks[id];
                if block.pos.y > cleared {
                    block.pos.y -= 1.0;
                }
            }
            counts = shift_down(counts, y);

            result.rows.push(y);
            result.hidden += line.len();
        }

        result
    }
}

/// Row counts after row `y` is emptied and everything above it comes down by one.
fn shift_down(counts: HashMap<i32, usize>, y: i32) -> HashMap<i32, usize> {
    counts
        .into_iter()
        .filter(|&(row, _)| row != y)
        .map(|(row, n)| if row > y { (row - 1, n) } else { (row, n) })
        .collect()
}

impl Solid for Board {
    fn solid_cells(&self) -> impl Iterator<Item = Pos> + '_ {
        self.solid().map(|b| b.pos)
    }
}
