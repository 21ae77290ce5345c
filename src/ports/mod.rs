//! Port traits defining external boundaries.
//!
//! Each trait is a boundary between the inspection engine and something it
//! does not own: the generated tree on disk, the directory search primitive,
//! the shell, the clock and the interactive selection menu.
//! Implementations live in `src/adapters/`.

pub mod clock;
pub mod filesystem;
pub mod search;
pub mod selector;
pub mod shell;

pub use clock::Clock;
pub use filesystem::FileSystem;
pub use search::{DirectorySearch, NamePattern};
pub use selector::Selector;
pub use shell::{ShellExecutor, ShellOutput};
