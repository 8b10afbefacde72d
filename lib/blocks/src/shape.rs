//! The fixed piece templates. There is no rotation: every orientation and reflection is
//! its own template, and a piece keeps its template for its whole life.

use core::fmt;

/// Number of templates.
pub const SHAPE_COUNT: u8 = 19;

/// Tetromino family a template belongs to.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Family {
    O,
    I,
    S,
    Z,
    L,
    J,
    T,
}

/// Index of one of the [`SHAPE_COUNT`] templates.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
pub struct ShapeType(u8);

// Offsets are (dx, dy) from the pivot, y up. The pivot is always listed first.
static OFFSETS: [[(i8, i8); 4]; SHAPE_COUNT as usize] = [
    // OO
    // @O
    [(0, 0), (1, 0), (0, 1), (1, 1)],
    // I@II
    [(0, 0), (1, 0), (2, 0), (-1, 0)],
    // I
    // I
    // @
    // I
    [(0, 0), (0, 1), (0, 2), (0, -1)],
    // .@S
    // SS.
    [(0, 0), (1, 0), (0, -1), (-1, -1)],
    // S.
    // S@
    // .S
    [(0, 0), (0, -1), (-1, 0), (-1, 1)],
    // Z@.
    // .ZZ
    [(0, 0), (-1, 0), (0, -1), (1, -1)],
    // .Z
    // @Z
    // Z.
    [(0, 0), (0, -1), (1, 0), (1, 1)],
    // L.
    // L.
    // @L
    [(0, 0), (1, 0), (0, 1), (0, 2)],
    // ..L
    // LL@
    [(0, 0), (0, 1), (-1, 0), (-2, 0)],
    // L@
    // .L
    // .L
    [(0, 0), (-1, 0), (0, -1), (0, -2)],
    // @LL
    // L..
    [(0, 0), (0, -1), (1, 0), (2, 0)],
    // .J
    // .J
    // J@
    [(0, 0), (-1, 0), (0, 1), (0, 2)],
    // JJ@
    // ..J
    [(0, 0), (0, -1), (-1, 0), (-2, 0)],
    // @J
    // J.
    // J.
    [(0, 0), (1, 0), (0, -1), (0, -2)],
    // J..
    // @JJ
    [(0, 0), (0, 1), (1, 0), (2, 0)],
    // .T
    // T@
    // .T
    [(0, 0), (-1, 0), (0, 1), (0, -1)],
    // T@T
    // .T.
    [(0, 0), (1, 0), (-1, 0), (0, -1)],
    // T@T
    // .T.
    [(0, 0), (0, -1), (1, 0), (-1, 0)],
    // .T
    // T@
    // .T
    [(0, 0), (0, 1), (0, -1), (-1, 0)],
];

impl ShapeType {
    pub const fn new(index: u8) -> Option<Self> {
        if index < SHAPE_COUNT {
            Some(Self(index))
        } else {
            None
        }
    }

    /// Template `index` modulo [`SHAPE_COUNT`].
    pub const fn wrapping(index: u8) -> Self {
        Self(index % SHAPE_COUNT)
    }

    pub fn all() -> impl Iterator<Item = ShapeType> {
        (0..SHAPE_COUNT).map(Self)
    }

    pub fn index(self) -> u8 {
        self.0
    }

    pub fn offsets(self) -> [(i8, i8); 4] {
        OFFSETS[self.0 as usize]
    }

    pub fn family(self) -> Family {
        match self.0 {
            0 => Family::O,
            1 | 2 => Family::I,
            3 | 4 => Family::S,
            5 | 6 => Family::Z,
            7..=10 => Family::L,
            11..=14 => Family::J,
            _ => Family::T,
        }
    }
}

impl From<ShapeType> for u8 {
    fn from(s: ShapeType) -> Self {
        s.0
    }
}

impl fmt::Debug for ShapeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ShapeType")
            .field(&self.0)
            .field(&self.family())
            .finish()
    }
}

impl fmt::Display for ShapeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}{}", self.family(), self.0)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test::assert_same_set;

    #[test]
    fn test_pivot_first() {
        for s in ShapeType::all() {
            assert_eq!(s.offsets()[0], (0, 0), "{s:?}");
        }
    }

    #[test]
    fn test_cells_distinct_and_connected() {
        for s in ShapeType::all() {
            let cells = s.offsets();
            let mut sorted = cells.to_vec();
            sorted.sort();
            sorted.dedup();
            assert_eq!(sorted.len(), 4, "{s:?}");

            let mut reached = vec![cells[0]];
            let mut i = 0;
            while i < reached.len() {
                let (x, y) = reached[i];
                for c in cells {
                    let adjacent = (c.0 - x).abs() + (c.1 - y).abs() == 1;
                    if adjacent && !reached.contains(&c) {
                        reached.push(c);
                    }
                }
                i += 1;
            }
            assert_eq!(reached.len(), 4, "{s:?} is not connected");
        }
    }

    #[test]
    fn test_families() {
        use Family::*;
        let families = ShapeType::all().map(ShapeType::family);
        let expected = [O, I, I, S, S, Z, Z, L, L, L, L, J, J, J, J, T, T, T, T];
        assert_same_set(families, expected, &"families");
    }

    #[test]
    fn test_new() {
        assert_eq!(ShapeType::new(18).map(u8::from), Some(18));
        assert_eq!(ShapeType::new(19), None);
        assert_eq!(ShapeType::wrapping(19).index(), 0);
        assert_eq!(ShapeType::wrapping(7).to_string(), "L7");
    }
}
