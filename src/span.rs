//! Styled ranges over a UTF-8 text buffer.
//!
//! Ranges use byte offsets and are exclusive at both ends: text inserted
//! exactly at a range boundary never becomes part of the range. Overlap
//! queries follow the rule most rich-text toolkits use for selections, so a
//! collapsed cursor sitting at the edge of a bold word still reports bold.

use std::ops::Range;

use tracing::debug;

use crate::error::Error;
use crate::style::Style;

/// A `(start, end)` byte range tagged with one [`Style`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StyledRange {
    pub start: usize,
    pub end: usize,
    pub style: Style,
}

impl StyledRange {
    pub fn new(start: usize, end: usize, style: Style) -> Self {
        Self { start, end, style }
    }

    pub fn as_range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Toolkit overlap rule: ranges that merely abut a non-empty query are
    /// excluded, but a collapsed query sees ranges touching it.
    pub fn touches(&self, start: usize, end: usize) -> bool {
        if self.start > end || self.end < start {
            return false;
        }
        if self.start != self.end
            && start != end
            && (self.start == end || self.end == start)
        {
            return false;
        }
        true
    }

    /// True when the range shares at least one byte with `start..end`.
    pub fn intersects(&self, start: usize, end: usize) -> bool {
        self.start < end && self.end > start
    }
}

/// Check `range` against `text` the way every public entry point must
/// before offsets reach the span set.
pub fn validate_range(text: &str, range: &Range<usize>) -> Result<(), Error> {
    let len = text.len();
    if range.start > range.end {
        return Err(Error::invalid_range(range.start, range.end, len));
    }
    if range.end > len {
        return Err(Error::invalid_bounds(range.start, range.end, len));
    }
    for index in [range.start, range.end] {
        if !text.is_char_boundary(index) {
            return Err(Error::not_on_char_boundary(
                range.start,
                range.end,
                len,
                index,
            ));
        }
    }
    Ok(())
}

/// Ordered collection of styled ranges, in the order they were applied.
#[derive(Debug, Clone, Default)]
pub struct SpanSet {
    ranges: Vec<StyledRange>,
}

impl SpanSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = &StyledRange> {
        self.ranges.iter()
    }

    /// Add a range. Empty ranges carry nothing and are skipped.
    pub fn add(&mut self, start: usize, end: usize, style: Style) {
        if start >= end {
            return;
        }
        debug!(start, end, %style, "add span");
        self.ranges.push(StyledRange::new(start, end, style));
    }

    /// Every range touching `start..end`, in application order.
    pub fn overlapping(
        &self,
        start: usize,
        end: usize,
    ) -> impl Iterator<Item = &StyledRange> {
        self.ranges.iter().filter(move |r| r.touches(start, end))
    }

    /// Styles covering the byte at `index`.
    pub fn styles_at(&self, index: usize) -> impl Iterator<Item = &Style> {
        self.ranges
            .iter()
            .filter(move |r| r.start <= index && index < r.end)
            .map(|r| &r.style)
    }

    /// Strip matching styles from `start..end`.
    ///
    /// Parts of a matching range outside the window survive as new ranges;
    /// ranges of other styles are untouched. Returns how many ranges were
    /// cut.
    pub fn remove_within(
        &mut self,
        start: usize,
        end: usize,
        mut matches: impl FnMut(&Style) -> bool,
    ) -> usize {
        let mut cut = 0;
        let mut kept = Vec::with_capacity(self.ranges.len());
        for range in self.ranges.drain(..) {
            if !range.intersects(start, end) || !matches(&range.style) {
                kept.push(range);
                continue;
            }
            cut += 1;
            debug!(
                span_start = range.start,
                span_end = range.end,
                style = %range.style,
                start,
                end,
                "remove span"
            );
            if range.start < start {
                kept.push(StyledRange::new(range.start, start, range.style));
            }
            if range.end > end {
                kept.push(StyledRange::new(end, range.end, range.style));
            }
        }
        self.ranges = kept;
        cut
    }

    /// Remap every range after `removed` bytes at `start` were replaced by
    /// `inserted` bytes. Ranges whose text vanished are dropped.
    pub fn adjust_for_edit(
        &mut self,
        start: usize,
        removed: usize,
        inserted: usize,
    ) {
        let deleted_end = start + removed;
        let shift = |p: usize| p - removed + inserted;
        let map_start = |p: usize| {
            if p < start {
                p
            } else if p >= deleted_end {
                shift(p)
            } else {
                start + inserted
            }
        };
        let map_end = |p: usize| {
            if p <= start {
                p
            } else if p >= deleted_end {
                shift(p)
            } else {
                start
            }
        };
        self.ranges.retain_mut(|range| {
            range.start = map_start(range.start);
            range.end = map_end(range.end);
            range.start < range.end
        });
    }

    pub fn clear(&mut self) {
        self.ranges.clear();
    }
}
