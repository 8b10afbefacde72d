//! Grid coordinates. Columns sit on half-integers and rows on integers. Every coordinate
//! is produced by integer arithmetic, so exact float equality is meaningful.

use core::fmt;
use core::ops;

/// Centre of the leftmost column.
pub const MIN_X: f32 = -4.5;
/// Centre of the rightmost column.
pub const MAX_X: f32 = 4.5;
/// Number of columns between `MIN_X` and `MAX_X` inclusive.
pub const COLS: u8 = 10;
/// Lowest row.
pub const FLOOR_Y: f32 = -9.0;
/// Row a new piece's pivot spawns at.
pub const SPAWN_Y: f32 = 10.0;
/// Visible settled blocks a row must hold to be cleared.
pub const ROW_FULL: usize = 10;
/// Rows scanned by the line-clear resolver, bottom first.
pub const CLEAR_ROWS: ops::Range<i32> = -9..9;

/// Position of a block or of the actor.
#[derive(Copy, Clone, PartialEq, PartialOrd, Default)]
pub struct Pos {
    pub x: f32,
    pub y: f32,
}

impl Pos {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Scene position, the playfield lies in the `z = 0` plane.
    pub fn xyz(self) -> [f32; 3] {
        [self.x, self.y, 0.0]
    }

    /// Column index of an in-bounds, column-aligned x.
    pub fn column(self) -> Option<u8> {
        let c = self.x - MIN_X;
        if c.fract() == 0.0 && (0.0..COLS as f32).contains(&c) {
            Some(c as u8)
        } else {
            None
        }
    }
}

impl ops::Add for Pos {
    type Output = Pos;
    fn add(self, rhs: Pos) -> Pos {
        self.offset(rhs.x, rhs.y)
    }
}

impl ops::Sub for Pos {
    type Output = Pos;
    fn sub(self, rhs: Pos) -> Pos {
        self.offset(-rhs.x, -rhs.y)
    }
}

impl fmt::Debug for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        (self.x, self.y).fmt(f)
    }
}

/// Open proximity: `a` and `b` are strictly less than one unit apart.
#[inline]
pub fn near(a: f32, b: f32) -> bool {
    (a - b).abs() < 1.0
}

/// Horizontal shift that brings `x` back onto the playfield. Zero if already inside.
pub fn correction(x: f32) -> f32 {
    if x < MIN_X {
        MIN_X - x
    } else if x > MAX_X {
        MAX_X - x
    } else {
        0.0
    }
}

/// x of a spawn column. Columns past the right wall are allowed and get corrected when
/// the piece is positioned.
pub fn column_x(column: u8) -> f32 {
    column as f32 + MIN_X
}
