use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::DataFormatError;

// ---------------------------------------------------------------------------
// LumiRange – one inclusive luminosity-block interval
// ---------------------------------------------------------------------------

/// An inclusive `[start, end]` luminosity-block interval within a run.
///
/// Serialized as a two-element JSON array, matching the certification file
/// layout (`"run": [[start, end], ...]`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LumiRange(pub u32, pub u32);

impl LumiRange {
    /// First luminosity block of the interval.
    pub fn start(&self) -> u32 {
        self.0
    }

    /// Last luminosity block of the interval (inclusive).
    pub fn end(&self) -> u32 {
        self.1
    }

    /// Whether `lumi` falls inside the interval.
    pub fn contains(&self, lumi: u32) -> bool {
        self.0 <= lumi && lumi <= self.1
    }
}

impl fmt::Display for LumiRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.0, self.1)
    }
}

// ---------------------------------------------------------------------------
// LumiMask – the complete certified range set
// ---------------------------------------------------------------------------

/// The full certified range set: run number → sorted disjoint lumi ranges.
///
/// Built once from a certification source, immutable afterwards; there are
/// no mutation operations, so a mask can be shared by reference across
/// threads for concurrent queries.
#[derive(Debug, Clone)]
pub struct LumiMask {
    /// Per run, intervals sorted by start, non-overlapping, non-adjacent.
    ranges: BTreeMap<u32, Vec<LumiRange>>,
    /// Total interval count over all runs.
    num_ranges: usize,
}

impl LumiMask {
    /// Build a mask from raw per-run intervals, in arbitrary order.
    ///
    /// Intervals are sorted per run and overlapping or adjacent intervals
    /// are merged, so membership treats `[1,5], [6,9]` the same as `[1,9]`.
    /// An interval with `start > end` is rejected. Runs that certify no
    /// intervals at all are dropped.
    pub fn from_ranges(
        raw: BTreeMap<u32, Vec<LumiRange>>,
    ) -> Result<Self, DataFormatError> {
        let mut ranges: BTreeMap<u32, Vec<LumiRange>> = BTreeMap::new();
        let mut num_ranges = 0;

        for (run, mut intervals) in raw {
            for r in &intervals {
                if r.start() > r.end() {
                    return Err(DataFormatError::Interval {
                        run,
                        start: r.start(),
                        end: r.end(),
                    });
                }
            }

            intervals.sort();

            let mut merged: Vec<LumiRange> = Vec::with_capacity(intervals.len());
            for r in intervals {
                match merged.last_mut() {
                    // Touching blocks certify a contiguous stretch
                    Some(last) if r.start() <= last.end().saturating_add(1) => {
                        last.1 = last.1.max(r.end());
                    }
                    _ => merged.push(r),
                }
            }

            if merged.is_empty() {
                continue;
            }
            num_ranges += merged.len();
            ranges.insert(run, merged);
        }

        Ok(LumiMask { ranges, num_ranges })
    }

    /// Whether the `(run, lumi)` pair falls within a certified range.
    ///
    /// An unknown run is not an error, it is the expected "not certified"
    /// outcome. O(log k) in the run's interval count.
    pub fn is_certified(&self, run: u32, lumi: u32) -> bool {
        match self.ranges.get(&run) {
            Some(ranges) => in_sorted_ranges(ranges, lumi),
            None => false,
        }
    }

    /// Elementwise [`is_certified`](Self::is_certified) over two equal-length
    /// slices, used to filter bulk event tables.
    ///
    /// Event tables are typically sorted or clustered by run, so the per-run
    /// map lookup is cached across consecutive rows instead of repeated per
    /// event.
    ///
    /// # Panics
    ///
    /// Panics if `runs` and `lumis` have different lengths.
    pub fn is_certified_many(&self, runs: &[u32], lumis: &[u32]) -> Vec<bool> {
        assert_eq!(
            runs.len(),
            lumis.len(),
            "runs and lumis must have equal length"
        );

        let mut out = Vec::with_capacity(runs.len());
        let mut cached: Option<(u32, Option<&[LumiRange]>)> = None;

        for (&run, &lumi) in runs.iter().zip(lumis) {
            let ranges = match cached {
                Some((cached_run, ranges)) if cached_run == run => ranges,
                _ => {
                    let ranges = self.ranges.get(&run).map(Vec::as_slice);
                    cached = Some((run, ranges));
                    ranges
                }
            };
            out.push(matches!(ranges, Some(rs) if in_sorted_ranges(rs, lumi)));
        }
        out
    }

    /// Return indices of `(run, lumi)` rows that pass the mask.
    pub fn certified_indices(&self, runs: &[u32], lumis: &[u32]) -> Vec<usize> {
        self.is_certified_many(runs, lumis)
            .into_iter()
            .enumerate()
            .filter(|(_, ok)| *ok)
            .map(|(i, _)| i)
            .collect()
    }

    /// Certified run numbers, ascending.
    pub fn runs(&self) -> impl Iterator<Item = u32> + '_ {
        self.ranges.keys().copied()
    }

    /// The sorted disjoint ranges certified for `run`, if any.
    pub fn ranges(&self, run: u32) -> Option<&[LumiRange]> {
        self.ranges.get(&run).map(Vec::as_slice)
    }

    /// Number of certified runs.
    pub fn num_runs(&self) -> usize {
        self.ranges.len()
    }

    /// Total number of stored intervals over all runs.
    pub fn num_ranges(&self) -> usize {
        self.num_ranges
    }

    /// Whether the mask certifies nothing at all.
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }
}

/// Membership by binary search over the sorted interval starts: the only
/// candidate is the last interval starting at or before `lumi`.
fn in_sorted_ranges(ranges: &[LumiRange], lumi: u32) -> bool {
    let idx = ranges.partition_point(|r| r.start() <= lumi);
    idx > 0 && ranges[idx - 1].contains(lumi)
}
