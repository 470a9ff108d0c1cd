use std::cmp;

use error::SliderError;
use interval::{ExternalInterval, Handle, TimeInterval};
use util::{LAST_MINUTE, MINUTES_PER_DAY};

/// The working list of intervals of one editing session.
///
/// The list is kept in editing order and may contain overlaps until `merge`
/// is called; after `merge` it is sorted by `from` and pairwise disjoint.
#[derive(Debug, Clone, PartialEq)]
pub struct IntervalSet {
    initial: Vec<TimeInterval>,
    intervals: Vec<TimeInterval>,
}

impl IntervalSet {
    /// Starts a session from `initial`, sorted once by `from`. An empty list
    /// means the whole day.
    pub fn new(mut initial: Vec<TimeInterval>) -> Self {
        if initial.is_empty() {
            debug!("No initial intervals, starting from the full day");
            initial.push(TimeInterval::full_day());
        }
        initial.sort_by_key(|interval| interval.from());

        IntervalSet {
            intervals: initial.clone(),
            initial,
        }
    }

    pub fn from_external(records: &[ExternalInterval]) -> Result<Self, SliderError> {
        let initial = records
            .iter()
            .map(ExternalInterval::to_interval)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(IntervalSet::new(initial))
    }

    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&TimeInterval> {
        self.intervals.get(index)
    }

    pub fn intervals(&self) -> &[TimeInterval] {
        &self.intervals
    }

    pub fn initial(&self) -> &[TimeInterval] {
        &self.initial
    }

    /// Appends without merging; overlaps are legal until the next `merge`.
    pub fn add(&mut self, interval: TimeInterval) {
        trace!("Adding interval {}", interval);
        self.intervals.push(interval);
    }

    /// Removes the interval at `index`. Removing the last one brings back the
    /// session's initial intervals, the set is never left empty.
    pub fn remove_at(&mut self, index: usize) -> Result<TimeInterval, SliderError> {
        let removed = *self.checked(index)?;

        let next = if self.intervals.len() == 1 {
            info!("Removed the only interval, restoring the initial ones");
            self.initial.clone()
        } else {
            self.intervals
                .iter()
                .enumerate()
                .filter(|&(i, _)| i != index)
                .map(|(_, interval)| *interval)
                .collect()
        };
        self.intervals = next;

        Ok(removed)
    }

    pub fn replace(&mut self, index: usize, interval: TimeInterval) -> Result<(), SliderError> {
        self.checked(index)?;
        self.intervals[index] = interval;
        Ok(())
    }

    /// Whether `candidate` is an acceptable new position for `handle` of the
    /// interval at `index`. UNTIL may reach the right edge of the day
    /// (`MINUTES_PER_DAY`); `set_bound` commits that as the last minute.
    pub fn accepts(&self, index: usize, handle: Handle, candidate: u16) -> Result<bool, SliderError> {
        let current = self.checked(index)?;

        Ok(match handle {
            Handle::From => candidate < current.until(),
            Handle::Until => current.from() < candidate && candidate <= MINUTES_PER_DAY,
        })
    }

    /// Moves one bound of the interval at `index`, leaving every other
    /// interval alone.
    pub fn set_bound(
        &mut self,
        index: usize,
        handle: Handle,
        minutes: u16,
    ) -> Result<TimeInterval, SliderError> {
        let current = *self.checked(index)?;

        let updated = match handle {
            Handle::From => current.with_from(minutes)?,
            Handle::Until => current.with_until(cmp::min(minutes, LAST_MINUTE))?,
        };
        self.intervals[index] = updated;

        Ok(updated)
    }

    /// Sorts by `from` and folds overlapping or touching intervals together,
    /// replacing the working list with the result.
    pub fn merge(&mut self) -> Result<&[TimeInterval], SliderError> {
        if self.intervals.is_empty() {
            return Err(SliderError::PreconditionViolation {
                reason: "cannot merge an empty interval set".to_string(),
            });
        }

        let mut sorted = self.intervals.clone();
        sorted.sort_by_key(|interval| interval.from());

        let mut merged = Vec::with_capacity(sorted.len());
        let (mut start, mut end) = (sorted[0].from(), sorted[0].until());

        for interval in &sorted[1..] {
            if interval.from() <= end {
                // overlapping or adjacent
                end = cmp::max(end, interval.until());
            } else {
                merged.push(TimeInterval::new(start, end)?);
                start = interval.from();
                end = interval.until();
            }
        }
        merged.push(TimeInterval::new(start, end)?);

        debug!(
            "Merged {} intervals into {} covering {} minutes",
            self.intervals.len(),
            merged.len(),
            merged
                .iter()
                .map(|interval| u32::from(interval.duration()))
                .sum::<u32>()
        );
        self.intervals = merged;

        Ok(&self.intervals)
    }

    pub fn to_external_list(&self) -> Vec<ExternalInterval> {
        self.intervals.iter().map(TimeInterval::to_external).collect()
    }

    fn checked(&self, index: usize) -> Result<&TimeInterval, SliderError> {
        self.intervals.get(index).ok_or(SliderError::IndexOutOfRange {
            index,
            len: self.intervals.len(),
        })
    }
}
