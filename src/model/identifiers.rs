//! Validated newtypes with smart constructors.
//!
//! Raw constructors are never exported - use smart constructors only.

use crate::model::error::SegmentError;
use std::fmt;
use std::num::NonZeroUsize;

/// Number of items grouped into one band when a collection is segmented.
///
/// Always positive. Collections with at most this many items are displayed flat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BandSize(NonZeroUsize);

impl BandSize {
    /// Band size used by the inspector unless configured otherwise.
    pub const DEFAULT: BandSize = match NonZeroUsize::new(100) {
        Some(n) => BandSize(n),
        None => unreachable!(),
    };

    /// Smart constructor: rejects zero.
    pub fn new(raw: usize) -> Result<Self, SegmentError> {
        NonZeroUsize::new(raw)
            .map(Self)
            .ok_or(SegmentError::InvalidBandSize { value: 0 })
    }

    /// The band size as a plain count.
    pub fn get(self) -> usize {
        self.0.get()
    }
}

impl Default for BandSize {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<i64> for BandSize {
    type Error = SegmentError;

    /// Accepts only strictly positive values; config files and env vars go through here.
    fn try_from(raw: i64) -> Result<Self, Self::Error> {
        if raw <= 0 {
            return Err(SegmentError::InvalidBandSize { value: raw });
        }
        let as_usize =
            usize::try_from(raw).map_err(|_| SegmentError::InvalidBandSize { value: raw })?;
        Self::new(as_usize)
    }
}

impl fmt::Display for BandSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ===== Tests =====
