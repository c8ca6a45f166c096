//! Collapse per-sample flags into contiguous detected regions.

use serde::Serialize;
use std::iter::FusedIterator;

/// A maximal run of flagged samples, half-open `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Region {
    pub start: usize,
    pub end: usize,
}

impl Region {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Number of samples covered.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn contains(&self, index: usize) -> bool {
        self.start <= index && index < self.end
    }
}

#[derive(Debug, Clone, Copy)]
enum State {
    Outside,
    Inside { start: usize },
}

/// Lazy iterator over the regions of a flag sequence.
///
/// Created by [`collapse`]. Clone it to restart from the same position.
#[derive(Debug, Clone)]
pub struct Regions<'a> {
    flags: &'a [bool],
    pos: usize,
}

impl Iterator for Regions<'_> {
    type Item = Region;

    fn next(&mut self) -> Option<Region> {
        let mut state = State::Outside;
        while let Some(&flag) = self.flags.get(self.pos) {
            let i = self.pos;
            self.pos += 1;
            match (state, flag) {
                (State::Outside, true) => state = State::Inside { start: i },
                (State::Inside { start }, false) => return Some(Region::new(start, i)),
                _ => {}
            }
        }
        match state {
            State::Inside { start } => Some(Region::new(start, self.flags.len())),
            State::Outside => None,
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.flags.len() - self.pos;
        (0, Some(remaining.div_ceil(2)))
    }
}

impl FusedIterator for Regions<'_> {}

/// Collapse a flag sequence into its maximal runs of `true`.
///
/// Regions come out in increasing order; no two overlap or touch.
///
/// # Example
/// ```
/// use rss_anomaly::detection::{collapse, Region};
///
/// let flags = [false, true, true, false, true, false];
/// let regions: Vec<Region> = collapse(&flags).collect();
/// assert_eq!(regions, vec![Region::new(1, 3), Region::new(4, 5)]);
/// ```
pub fn collapse(flags: &[bool]) -> Regions<'_> {
    Regions { flags, pos: 0 }
}

/// Expand regions back into a flag sequence of length `len`.
///
/// Region bounds past `len` are clipped.
pub fn expand<I>(regions: I, len: usize) -> Vec<bool>
where
    I: IntoIterator<Item = Region>,
{
    let mut flags = vec![false; len];
    for region in regions {
        let end = region.end.min(len);
        if region.start < end {
            flags[region.start..end].fill(true);
        }
    }
    flags
}
