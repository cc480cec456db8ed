//! Input snapshot polled once per tick

use glam::IVec2;

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    W,
    A,
    S,
    D,
    Pause,
    Escape,
}

impl Key {
    #[inline]
    fn bit(self) -> u16 {
        1 << (self as u16)
    }
}

/// Set of keys held down this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeySet(u16);

impl KeySet {
    pub fn new() -> Self {
        Self(0)
    }

    pub fn with(mut self, key: Key) -> Self {
        self.insert(key);
        self
    }

    pub fn insert(&mut self, key: Key) {
        self.0 |= key.bit();
    }

    pub fn remove(&mut self, key: Key) {
        self.0 &= !key.bit();
    }

    #[inline]
    pub fn contains(&self, key: Key) -> bool {
        self.0 & key.bit() != 0
    }

    /// Movement direction from arrows/WASD, one unit per axis
    pub fn direction(&self) -> IVec2 {
        let mut dir = IVec2::ZERO;
        if self.contains(Key::Right) || self.contains(Key::D) {
            dir.x += 1;
        }
        if self.contains(Key::Left) || self.contains(Key::A) {
            dir.x -= 1;
        }
        if self.contains(Key::Up) || self.contains(Key::W) {
            dir.y -= 1;
        }
        if self.contains(Key::Down) || self.contains(Key::S) {
            dir.y += 1;
        }
        dir
    }
}

impl FromIterator<Key> for KeySet {
    fn from_iter<T: IntoIterator<Item = Key>>(iter: T) -> Self {
        let mut set = KeySet::new();
        for key in iter {
            set.insert(key);
        }
        set
    }
}

/// Mouse button state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonState {
    #[default]
    Released,
    Pressed,
}

impl ButtonState {
    #[inline]
    pub fn is_pressed(self) -> bool {
        self == ButtonState::Pressed
    }

    #[inline]
    pub fn is_released(self) -> bool {
        self == ButtonState::Released
    }
}

/// Everything the game reads from devices in one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    pub keys: KeySet,
    pub mouse_left: ButtonState,
    pub mouse_right: ButtonState,
    /// Menu play button clicked
    pub play: bool,
    /// Menu quit button clicked
    pub quit: bool,
}

/// Rising-edge detector for a held key
///
/// Reports a press only when the key was up on the previous observation,
/// so holding a key down toggles once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyEdge {
    was_down: bool,
}

impl KeyEdge {
    pub fn pressed(&mut self, down: bool) -> bool {
        let edge = down && !self.was_down;
        self.was_down = down;
        edge
    }
}
