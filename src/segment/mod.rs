//! Segmentation of large collections into fixed-width index bands.
//!
//! A collection with at most `band_size` items is shown as one flat unit. Larger
//! collections are split into contiguous bands such as `[0-99]`, `[100-199]`,
//! each of which the inspector renders as an independently expandable node.
//!
//! Bands borrow the source slice; they never copy items. Indices inside a band
//! are the original 0-based positions in the source collection.
//!
//! # Examples
//!
//! ```
//! use varscope::segment::segment;
//!
//! let items: Vec<u32> = (0..250).collect();
//! let bands = segment(&items, 100).unwrap();
//! let labels: Vec<String> = bands.iter().filter_map(|b| b.label()).collect();
//! assert_eq!(labels, ["[0-99]", "[100-199]", "[200-249]"]);
//! assert_eq!(bands[2].items()[0], 200);
//! ```

use crate::model::{BandSize, SegmentError};
use std::fmt;
use std::ops::Range;
use tracing::trace;

/// A contiguous window `[start, end)` over an ordered collection.
#[derive(Debug, PartialEq, Eq)]
pub struct Band<'a, T> {
    start: usize,
    items: &'a [T],
    segmented: bool,
}

// Manual impls: a band is a borrowed view, copyable regardless of `T`.
impl<T> Clone for Band<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Band<'_, T> {}

impl<'a, T> Band<'a, T> {
    /// Index of the first item, in source-collection coordinates.
    pub fn start(&self) -> usize {
        self.start
    }

    /// One past the index of the last item, in source-collection coordinates.
    pub fn end(&self) -> usize {
        self.start + self.items.len()
    }

    /// Number of items covered.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True for the single band produced from an empty collection.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Covered index range in source-collection coordinates.
    pub fn range(&self) -> Range<usize> {
        self.start..self.end()
    }

    /// The items this band covers.
    pub fn items(&self) -> &'a [T] {
        self.items
    }

    /// Items paired with their original index.
    pub fn indexed(&self) -> impl Iterator<Item = (usize, &'a T)> + 'a {
        let start = self.start;
        self.items
            .iter()
            .enumerate()
            .map(move |(offset, item)| (start + offset, item))
    }

    /// Whether this band is one of several produced by splitting a large collection.
    ///
    /// A flat (unsegmented) collection yields exactly one band with `false` here.
    pub fn is_segmented(&self) -> bool {
        self.segmented
    }

    /// Display label `"[start-end_inclusive]"` for segmented bands, `None` for flat display.
    pub fn label(&self) -> Option<String> {
        self.segmented.then(|| band_label(&self.range()))
    }
}

impl<T> fmt::Display for Band<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segmented {
            f.write_str(&band_label(&self.range()))
        } else {
            Ok(())
        }
    }
}

/// Label `"[start-end_inclusive]"` for a band covering `range`.
pub fn band_label(range: &Range<usize>) -> String {
    format!("[{}-{}]", range.start, range.end.saturating_sub(1))
}

/// Whether a collection of `len` items must be split into bands.
pub fn needs_segmentation(len: usize, band_size: BandSize) -> bool {
    len > band_size.get()
}

/// Index ranges of the bands for a collection of `len` items.
///
/// Always returns at least one range; an empty collection yields `[0..0]`.
pub fn band_ranges(len: usize, band_size: BandSize) -> Vec<Range<usize>> {
    if !needs_segmentation(len, band_size) {
        return vec![0..len];
    }
    let size = band_size.get();
    (0..len.div_ceil(size))
        .map(|band| {
            let start = band * size;
            start..(start + size).min(len)
        })
        .collect()
}

/// Split `items` into bands of `band_size`.
///
/// # Errors
///
/// Returns [`SegmentError::InvalidBandSize`] when `band_size` is zero.
pub fn segment<T>(items: &[T], band_size: usize) -> Result<Vec<Band<'_, T>>, SegmentError> {
    let band_size = BandSize::new(band_size)?;
    Ok(segment_by(items, band_size))
}

/// Split `items` into bands of an already validated [`BandSize`].
pub fn segment_by<T>(items: &[T], band_size: BandSize) -> Vec<Band<'_, T>> {
    let segmented = needs_segmentation(items.len(), band_size);
    let bands: Vec<Band<'_, T>> = band_ranges(items.len(), band_size)
        .into_iter()
        .map(|range| Band {
            start: range.start,
            items: &items[range],
            segmented,
        })
        .collect();
    trace!(
        len = items.len(),
        band_size = band_size.get(),
        bands = bands.len(),
        "segmented collection"
    );
    bands
}

// ===== Tests =====

#[cfg(test)]
#[path = "segment_tests.rs"]
mod tests;
