//! varscope
//!
//! Variable inspector for captured debugger snapshots. Large collections are
//! split into fixed-size bands (`[0-99]`, `[100-199]`, ...) at every level of
//! the tree, and shown in a TUI, as indented text or as JSON.
//!
//! The pure core (`model`, `segment`, `inspect`, `snapshot`, `state`) has no
//! I/O; `source`, `view`, `config` and `logging` form the impure shell.

pub mod config;
pub mod inspect;
pub mod logging;
pub mod model;
pub mod segment;
pub mod snapshot;
pub mod source;
pub mod state;
pub mod view;
