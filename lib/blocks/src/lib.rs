//! Grid data for the falling-block simulation: cell coordinates, the piece templates,
//! the block arena, the board of settled blocks and rigid piece geometry.

pub mod grid;
pub use grid::Pos;

pub mod shape;
pub use shape::ShapeType;

pub mod block;
pub use block::{Arena, Block, BlockId};

pub mod board;
pub use board::{Board, LineClear, Solid};

pub mod piece;
pub use piece::Piece;

#[cfg(test)]
mod test {
    use std::fmt::Debug;

    pub fn assert_same_set<T: Ord + Debug>(
        actual: impl IntoIterator<Item = T>,
        expected: impl IntoIterator<Item = T>,
        ctx: &dyn Debug,
    ) {
        let mut actual = actual.into_iter().collect::<Vec<_>>();
        let mut expected = expected.into_iter().collect::<Vec<_>>();
        actual.sort();
        expected.sort();
        assert_eq!(actual, expected, "{ctx:?}");
    }
}
