use core::fmt;
use core::ops;

use serde::{Deserialize, Serialize};

/// Logical intent produced by whatever maps the input devices.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Intent {
    MoveLeft = 0,
    MoveRight = 1,
    Jump = 2,
}

impl Intent {
    pub const ALL: [Intent; 3] = [Intent::MoveLeft, Intent::MoveRight, Intent::Jump];

    #[inline]
    fn bit(self) -> u8 {
        1 << self as u8
    }
}

/// The intents held during one frame.
#[derive(Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct Intents(u8);

impl Intents {
    pub const NONE: Intents = Intents(0);

    pub fn contains(self, i: Intent) -> bool {
        self.0 & i.bit() != 0
    }

    pub fn insert(&mut self, i: Intent) {
        self.0 |= i.bit();
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = Intent> {
        Intent::ALL.into_iter().filter(move |&i| self.contains(i))
    }
}

impl From<Intent> for Intents {
    fn from(i: Intent) -> Self {
        Intents(i.bit())
    }
}

impl FromIterator<Intent> for Intents {
    fn from_iter<T: IntoIterator<Item = Intent>>(iter: T) -> Self {
        let mut intents = Intents::NONE;
        for i in iter {
            intents.insert(i);
        }
        intents
    }
}

impl ops::BitOr<Intent> for Intents {
    type Output = Intents;
    fn bitor(mut self, rhs: Intent) -> Intents {
        self.insert(rhs);
        self
    }
}

impl ops::BitOr for Intent {
    type Output = Intents;
    fn bitor(self, rhs: Intent) -> Intents {
        Intents::from(self) | rhs
    }
}

impl fmt::Debug for Intents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_intents() {
        let held = Intent::MoveLeft | Intent::Jump;
        assert!(held.contains(Intent::MoveLeft));
        assert!(held.contains(Intent::Jump));
        assert!(!held.contains(Intent::MoveRight));
        assert_eq!(held.iter().collect::<Vec<_>>(), [Intent::MoveLeft, Intent::Jump]);
        assert_eq!(held, [Intent::Jump, Intent::MoveLeft].into_iter().collect());
        assert!(Intents::NONE.is_empty());
        assert_eq!(format!("{held:?}"), "{MoveLeft, Jump}");
    }

    #[test]
    fn test_intent_serde() {
        let json = serde_json::to_string(&Intent::MoveRight).unwrap();
        assert_eq!(json, "\"move_right\"");
        let i: Intent = serde_json::from_str("\"jump\"").unwrap();
        assert_eq!(i, Intent::Jump);
    }
}
