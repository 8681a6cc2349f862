//! Fixed-capacity sliding window of the most recent readings

use crate::error::{Error, Result};
use crate::numeric::Numeric;
use std::collections::VecDeque;

/// Bounded FIFO of the last `capacity` observations, oldest first.
///
/// The window also tracks how many values have ever been pushed so callers can
/// gate analysis on a completed warm-up. Once `capacity` values have been seen
/// the window stays full: every further push evicts exactly the oldest value.
#[derive(Debug, Clone)]
pub struct SampleWindow<T: Numeric> {
    samples: VecDeque<T>,
    capacity: usize,
    total_observed: usize,
}

impl<T: Numeric> SampleWindow<T> {
    /// Create an empty window holding at most `capacity` readings
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::InvalidParameter(
                "window capacity must be positive".to_string(),
            ));
        }

        Ok(Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
            total_observed: 0,
        })
    }

    /// Append a reading, evicting the oldest one if the window is full
    pub fn push(&mut self, value: T) {
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(value);
        self.total_observed = self.total_observed.saturating_add(1);
    }

    /// True once `capacity` readings have been pushed
    pub fn is_full(&self) -> bool {
        self.total_observed >= self.capacity
    }

    /// Readings in push order, oldest first
    pub fn values(&self) -> impl ExactSizeIterator<Item = T> + DoubleEndedIterator + '_ {
        self.samples.iter().copied()
    }

    /// Copy the readings out, oldest first
    pub fn to_vec(&self) -> Vec<T> {
        self.values().collect()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of readings ever pushed (saturating)
    pub fn total_observed(&self) -> usize {
        self.total_observed
    }

    /// Most recently pushed reading
    pub fn latest(&self) -> Option<T> {
        self.samples.back().copied()
    }

    /// Oldest reading still in the window
    pub fn oldest(&self) -> Option<T> {
        self.samples.front().copied()
    }
}
