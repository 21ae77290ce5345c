//! Selection menu state machine.
//!
//! The live terminal adapter feeds key presses into [`MenuState::step`] and
//! redraws with [`render`] after every transition; nothing here touches a
//! terminal, so the selection logic is testable on its own.

use crossterm::style::Stylize;

/// A key press, already mapped to its meaning inside the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuKey {
    /// Down or Right arrow.
    Next,
    /// Up or Left arrow.
    Prev,
    /// Enter.
    Confirm,
    /// Any other key; cancels the menu.
    Other,
}

/// How an open menu was closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOutcome {
    /// The entry at this index was confirmed.
    Chosen(usize),
    /// The user pressed a key that is not part of the menu.
    Cancelled,
}

/// Menu lifecycle: no menu, or a menu with one highlighted entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuState {
    /// No menu is shown; queries can be issued.
    Idle,
    /// A menu of `len` entries is shown with `active` highlighted.
    Open {
        /// Highlighted entry.
        active: usize,
        /// Number of entries.
        len: usize,
    },
}

impl MenuState {
    /// Opens a menu over `len` entries with the first one highlighted.
    ///
    /// An empty menu cannot be shown, so `len == 0` stays idle.
    #[must_use]
    pub fn open(len: usize) -> Self {
        if len == 0 {
            Self::Idle
        } else {
            Self::Open { active: 0, len }
        }
    }

    /// The highlighted entry, if a menu is open.
    #[must_use]
    pub fn active(&self) -> Option<usize> {
        match self {
            Self::Idle => None,
            Self::Open { active, .. } => Some(*active),
        }
    }

    /// Applies one key press.
    ///
    /// Navigation keeps the menu open; Enter and any other key close it and
    /// produce an outcome. Keys pressed while idle are ignored.
    #[must_use]
    pub fn step(self, key: MenuKey) -> (Self, Option<MenuOutcome>) {
        let Self::Open { active, len } = self else {
            return (self, None);
        };
        match key {
            MenuKey::Next => (Self::Open { active: next_active(active, len, 1), len }, None),
            MenuKey::Prev => (Self::Open { active: next_active(active, len, -1), len }, None),
            MenuKey::Confirm => (Self::Idle, Some(MenuOutcome::Chosen(active))),
            MenuKey::Other => (Self::Idle, Some(MenuOutcome::Cancelled)),
        }
    }
}

/// Moves the highlight by `delta`, wrapping around both ends.
#[must_use]
pub fn next_active(active: usize, len: usize, delta: isize) -> usize {
    if len == 0 {
        return 0;
    }
    let len = isize::try_from(len).unwrap_or(isize::MAX);
    let active = isize::try_from(active).unwrap_or(0);
    usize::try_from((active + delta).rem_euclid(len)).unwrap_or(0)
}

/// Renders one line per label, the active one in reverse video.
#[must_use]
pub fn render(labels: &[String], active: usize) -> Vec<String> {
    labels
        .iter()
        .enumerate()
        .map(|(i, label)| {
            if i == active {
                label.as_str().reverse().to_string()
            } else {
                label.clone()
            }
        })
        .collect()
}
