// Shared enums: scan direction, host events, key codes

/// Scan direction of the value transducer.
///
/// `Forward` scans left to right. `Reverse` scans right to left and is used
/// for currency-style masks where padding happens on the left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    #[default]
    Forward,
    Reverse,
}

impl Direction {
    /// Direction selected by a `reverse` flag.
    pub fn from_reverse(reverse: bool) -> Self {
        if reverse {
            Direction::Reverse
        } else {
            Direction::Forward
        }
    }

    /// Signed cursor step: `+1` forward, `-1` reverse.
    #[inline]
    pub fn step(self) -> isize {
        match self {
            Direction::Forward => 1,
            Direction::Reverse => -1,
        }
    }

    pub fn is_reverse(self) -> bool {
        self == Direction::Reverse
    }
}

/// Events a host input element forwards to a masked field.
///
/// Key events carry the host key code (DOM `keyCode` numbering).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldEvent {
    KeyDown(u32),
    KeyUp(u32),
    Input,
    Paste,
    Drop,
    Change,
    Focus,
    FocusOut,
}

impl FieldEvent {
    /// Parse an event name as used by DOM hosts (`"keyup"`, `"focusout"`, ...).
    ///
    /// Key events take their code from `key_code`. Returns `None` for names
    /// that a masked field does not react to.
    pub fn from_name(name: &str, key_code: u32) -> Option<Self> {
        match name {
            "keydown" => Some(FieldEvent::KeyDown(key_code)),
            "keyup" => Some(FieldEvent::KeyUp(key_code)),
            "input" => Some(FieldEvent::Input),
            "paste" => Some(FieldEvent::Paste),
            "drop" => Some(FieldEvent::Drop),
            "change" => Some(FieldEvent::Change),
            "focus" | "focusin" => Some(FieldEvent::Focus),
            "focusout" | "blur" => Some(FieldEvent::FocusOut),
            _ => None,
        }
    }

    /// Whether this event rewrites the field value through the mask.
    pub fn is_masking(self) -> bool {
        matches!(
            self,
            FieldEvent::KeyUp(_)
                | FieldEvent::Input
                | FieldEvent::Paste
                | FieldEvent::Drop
                | FieldEvent::Change
        )
    }
}

// -- Key codes --------------------------------------------------------------

/// Backspace key code.
pub const KEY_BACKSPACE: u32 = 8;

/// Key codes that never trigger masking: tab, shift, ctrl, alt, home,
/// the four arrows and the meta key.
pub const DEFAULT_BY_PASS_KEYS: &[u32] = &[9, 16, 17, 18, 36, 37, 38, 39, 40, 91];
