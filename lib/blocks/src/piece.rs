//! Rigid four-block pieces. A piece holds handles into the board's arena rather than the
//! blocks themselves, so locking it only flips flags.

use crate::block::{Arena, BlockId};
use crate::board::Board;
use crate::grid::{self, Pos, FLOOR_Y};
use crate::shape::ShapeType;

/// Four blocks laid out by a template. `content[0]` is the pivot.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Piece {
    shape: ShapeType,
    content: [BlockId; 4],
}

impl Piece {
    /// Allocate four falling blocks at the template offsets, pivot at the origin.
    pub fn build(shape: ShapeType, board: &mut Board) -> Self {
        let content = shape
            .offsets()
            .map(|(dx, dy)| board.spawn_block(Pos::new(dx.into(), dy.into())));
        Self { shape, content }
    }

    pub fn shape(&self) -> ShapeType {
        self.shape
    }

    pub fn content(&self) -> &[BlockId; 4] {
        &self.content
    }

    pub fn pivot(&self, blocks: &Arena) -> Pos {
        blocks[self.content[0]].pos
    }

    pub fn cells<'a>(&'a self, blocks: &'a Arena) -> impl Iterator<Item = Pos> + 'a {
        self.content.iter().map(move |&id| blocks[id].pos)
    }

    /// Offsets of each block from the pivot, in content order.
    pub fn offsets(&self, blocks: &Arena) -> [(i8, i8); 4] {
        let pivot = self.pivot(blocks);
        self.content.map(|id| {
            let d = blocks[id].pos - pivot;
            (d.x as i8, d.y as i8)
        })
    }

    /// Move the piece so its pivot lands on `target`. If that leaves a block outside the
    /// walls, the target is shifted by the largest correction and the move repeated.
    pub fn position_at(&self, target: Pos, blocks: &mut Arena) {
        let d = target - self.pivot(blocks);
        let mut shift = 0.0f32;

        for &id in &self.content {
            let pos = &mut blocks[id].pos;
            *pos = *pos + d;
            let fix = grid::correction(pos.x);
            if fix.abs() > shift.abs() {
                shift = fix;
            }
        }

        if shift != 0.0 {
            self.position_at(target.offset(shift, 0.0), blocks);
        }
    }

    pub fn slide_down(&self, blocks: &mut Arena) {
        for &id in &self.content {
            blocks[id].pos.y -= 1.0;
        }
    }

    /// A block is on the floor, or exactly one row above a solid block in its column.
    pub fn landed(&self, board: &Board) -> bool {
        self.cells(board.blocks())
            .any(|pos| pos.y == FLOOR_Y || board.supports(pos.offset(0.0, -1.0)))
    }

    /// The point `at` is within one unit of the cell just below any block.
    pub fn hits(&self, at: Pos, blocks: &Arena) -> bool {
        self.cells(blocks)
            .any(|pos| grid::near(at.y, pos.y - 1.0) && grid::near(at.x, pos.x))
    }

    /// Hand every block over to the board.
    pub fn settle(&self, board: &mut Board) {
        for &id in &self.content {
            board.settle(id);
        }
    }
}
