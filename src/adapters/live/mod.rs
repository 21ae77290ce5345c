//! Live adapters backed by the real disk, shell, clock and terminal.

pub mod clock;
pub mod filesystem;
pub mod search;
pub mod selector;
pub mod shell;
