//! What a renderer sees each frame.

use serde::{Deserialize, Serialize};
use std::fmt;

use blocks::{Block, Board};

use crate::actor::Actor;
use crate::game::Stats;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BlockView {
    pub position: [f32; 3],
    pub visible: bool,
    pub settled: bool,
}

impl From<&Block> for BlockView {
    fn from(b: &Block) -> Self {
        Self {
            position: b.pos.xyz(),
            visible: b.visible,
            settled: b.settled,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActorView {
    pub position: [f32; 3],
    pub grounded: bool,
}

impl From<&Actor> for ActorView {
    fn from(a: &Actor) -> Self {
        Self {
            position: a.pos().xyz(),
            grounded: a.is_grounded(),
        }
    }
}

/// Every block ever created, hidden ones included, plus the actor.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub blocks: Vec<BlockView>,
    pub actor: ActorView,
    pub scripted: bool,
    pub stats: Stats,
}

impl Snapshot {
    pub fn capture(board: &Board, actor: &Actor, scripted: bool, stats: Stats) -> Self {
        Self {
            blocks: board.blocks().iter().map(|(_, b)| BlockView::from(b)).collect(),
            actor: actor.into(),
            scripted,
            stats,
        }
    }

    /// Blocks a renderer should draw.
    pub fn visible(&self) -> impl Iterator<Item = &BlockView> + '_ {
        self.blocks.iter().filter(|b| b.visible)
    }
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&s)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::actor::Motion;
    use blocks::Pos;

    #[test]
    fn test_capture() {
        let mut board = Board::new();
        let gone = board.place(Pos::new(-4.5, -9.0));
        board.place(Pos::new(-3.5, -9.0));
        board.spawn_block(Pos::new(0.5, 10.0));
        board.blocks_mut()[gone].visible = false;
        let actor = Actor::new(Pos::new(0.0, -9.0), Motion::default());

        let snap = Snapshot::capture(&board, &actor, true, Stats::default());
        assert_eq!(snap.blocks.len(), 3);
        assert_eq!(snap.visible().count(), 2);
        assert_eq!(snap.blocks[1].position, [-3.5, -9.0, 0.0]);
        assert!(!snap.blocks[2].settled);
        assert_eq!(snap.actor.position, [0.0, -9.0, 0.0]);
        assert!(snap.actor.grounded);
    }

    #[test]
    fn test_json() {
        let board = Board::new();
        let actor = Actor::new(Pos::new(1.0, -9.0), Motion::default());
        let snap = Snapshot::capture(&board, &actor, false, Stats::default());
        let json = snap.to_string();
        assert!(json.contains(r#""actor":{"position":[1.0,-9.0,0.0],"grounded":true}"#), "{json}");
        let back: Snapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snap);
    }
}
