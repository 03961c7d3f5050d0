//! Key and pointer input types understood by the grid.
//!
//! Hosts translate their native events into these types before handing
//! them to [`Grid::on_key`](crate::Grid::on_key) or the click handlers.

/// Modifier state accompanying a key press or click.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Modifiers {
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        ctrl: false,
        shift: false,
        alt: false,
    };

    /// Ctrl: toggle-select on click, select-all with `a`.
    pub const CTRL: Self = Self {
        ctrl: true,
        shift: false,
        alt: false,
    };

    /// Shift: range-select on click, backwards Tab.
    pub const SHIFT: Self = Self {
        ctrl: false,
        shift: true,
        alt: false,
    };
}

/// Keys the grid reacts to. Anything else stays with the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Printable input, typed into the draft while editing.
    Char(char),
    Space,
    Enter,
    Escape,
    Backspace,
    Delete,
    Tab,
    /// Shift+Tab, for terminals that report it as its own key.
    BackTab,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
}

/// A key with the modifiers held while it was pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyCombo {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyCombo {
    pub const fn new(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    /// A bare key.
    pub const fn key(key: Key) -> Self {
        Self::new(key, Modifiers::NONE)
    }

    pub const fn ctrl(mut self) -> Self {
        self.modifiers.ctrl = true;
        self
    }

    pub const fn shift(mut self) -> Self {
        self.modifiers.shift = true;
        self
    }
}

/// Modifiers that change how a row click or Space press affects selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectModifiers {
    /// Flip membership of the target row (Ctrl+click).
    pub toggle: bool,
    /// Extend from the anchor to the target row (Shift+click).
    pub range: bool,
}

impl SelectModifiers {
    /// Exclusive select.
    pub const NONE: Self = Self {
        toggle: false,
        range: false,
    };

    /// Toggle membership.
    pub const TOGGLE: Self = Self {
        toggle: true,
        range: false,
    };

    /// Range from anchor.
    pub const RANGE: Self = Self {
        toggle: false,
        range: true,
    };
}

impl From<Modifiers> for SelectModifiers {
    fn from(m: Modifiers) -> Self {
        Self {
            toggle: m.ctrl,
            range: m.shift,
        }
    }
}

/// Click event kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ClickKind {
    /// Single click
    #[default]
    Single,
    /// Double click (activates the row)
    Double,
}
