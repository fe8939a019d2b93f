use std::fmt;
use std::ops::BitOr;

bitflags::bitflags! {
    /// Modifier state carried in the low byte of an event's `mods` word.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u32 {
        const ALT = 0x01;
        const CONTROL = 0x02;
        const REPEAT = 0x04;
        const SHIFT = 0x08;
    }
}

/// Phase of a keyboard event. The tag sits in bits 8..=10 of `mods`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyEventKind {
    KeyDown,
    KeyUp,
    /// A character was produced; the key is the character code.
    KeyPress,
}

impl KeyEventKind {
    pub fn tag(self) -> u32 {
        match self {
            KeyEventKind::KeyDown => 0x01,
            KeyEventKind::KeyUp => 0x02,
            KeyEventKind::KeyPress => 0x04,
        }
    }

    /// The tag shifted into place within a `mods` word.
    pub fn mods_bits(self) -> u32 {
        self.tag() << 8
    }
}

/// Build the `mods` word delivered to handlers: modifier flags OR'd with the
/// shifted event tag.
pub fn encode_mods(modifiers: Modifiers, kind: KeyEventKind) -> u32 {
    modifiers.bits() | kind.mods_bits()
}

/// A 64-bit key mask: key code in the high 32 bits, `mods` in the low 32.
///
/// As a subscription, every set bit is required and every clear bit is a
/// wildcard. `KeyMask::ANY` therefore matches every event.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct KeyMask(u64);

impl KeyMask {
    pub const ANY: KeyMask = KeyMask(0);

    pub const fn from_bits(bits: u64) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u64 {
        self.0
    }

    /// Mask of an incoming event.
    pub const fn for_event(key: u32, mods: u32) -> Self {
        Self(((key as u64) << 32) | mods as u64)
    }

    /// Require a specific key code.
    pub const fn key(key: u32) -> Self {
        Self((key as u64) << 32)
    }

    /// Require an event phase.
    pub fn kind(kind: KeyEventKind) -> Self {
        Self(kind.mods_bits() as u64)
    }

    /// Require modifiers to be held.
    pub fn modifiers(modifiers: Modifiers) -> Self {
        Self(modifiers.bits() as u64)
    }

    pub fn with_kind(self, kind: KeyEventKind) -> Self {
        self | Self::kind(kind)
    }

    pub fn with_modifiers(self, modifiers: Modifiers) -> Self {
        self | Self::modifiers(modifiers)
    }

    /// Containment test: every bit of `self` is present in `event`.
    pub const fn matches(self, event: KeyMask) -> bool {
        self.0 & event.0 == self.0
    }
}

impl BitOr for KeyMask {
    type Output = KeyMask;

    fn bitor(self, rhs: KeyMask) -> KeyMask {
        KeyMask(self.0 | rhs.0)
    }
}

impl From<u64> for KeyMask {
    fn from(bits: u64) -> Self {
        Self(bits)
    }
}

impl fmt::Debug for KeyMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KeyMask({:#018x})", self.0)
    }
}
