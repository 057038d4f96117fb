//! Domain model types (pure).
//!
//! All types in this module are pure data with smart constructors.

pub mod error;
pub mod identifiers;
pub mod key_action;
pub mod value;

// Re-export for convenience
pub use error::{AppError, InputError, SegmentError, SnapshotError};
pub use identifiers::BandSize;
pub use key_action::KeyAction;
pub use value::{Value, ValueKind};
