//! Block records addressed by stable handles.

use core::ops;

use crate::grid::Pos;

/// A unit cell. It falls as part of a piece until `settled`, and is hidden rather than
/// destroyed when its row is cleared.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Block {
    pub pos: Pos,
    pub visible: bool,
    pub settled: bool,
}

impl Block {
    pub fn new(pos: Pos) -> Self {
        Self {
            pos,
            visible: true,
            settled: false,
        }
    }

    /// Settled and still shown. Only solid blocks support pieces or stop the actor.
    #[inline]
    pub fn is_solid(&self) -> bool {
        self.visible && self.settled
    }
}

/// Handle to a [`Block`] in an [`Arena`]. Handles stay valid for the arena's lifetime.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct BlockId(u32);

impl BlockId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Append-only storage for every block created during a run.
#[derive(Clone, Debug, Default)]
pub struct Arena(Vec<Block>);

impl Arena {
    pub fn new() -> Self {
        Self(Vec::with_capacity(256))
    }

    pub fn alloc(&mut self, pos: Pos) -> BlockId {
        let id = BlockId(self.0.len() as u32);
        self.0.push(Block::new(pos));
        id
    }

    pub fn get(&self, id: BlockId) -> Option<&Block> {
        self.0.get(id.index())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (BlockId, &Block)> + '_ {
        self.0
            .iter()
            .enumerate()
            .map(|(i, b)| (BlockId(i as u32), b))
    }
}

impl ops::Index<BlockId> for Arena {
    type Output = Block;
    fn index(&self, id: BlockId) -> &Block {
        &self.0[id.index()]
    }
}

impl ops::IndexMut<BlockId> for Arena {
    fn index_mut(&mut self, id: BlockId) -> &mut Block {
        &mut self.0[id.index()]
    }
}
