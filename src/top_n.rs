use crate::error::{RankerError, Result};
use crate::models::Candidate;
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Fixed-capacity min-heap keeping the `capacity` largest candidates seen.
#[derive(Debug)]
pub struct TopN {
    heap: BinaryHeap<Reverse<Candidate>>,
    capacity: usize,
}

impl TopN {
    pub fn new(capacity: usize) -> Self {
        Self {
            heap: BinaryHeap::with_capacity(capacity),
            capacity,
        }
    }

    /// Validating constructor for caller-supplied counts.
    pub fn with_requested(n: i64) -> Result<Self> {
        let capacity = usize::try_from(n).map_err(|_| {
            RankerError::InvalidArgument(format!(
                "Enter a valid number of repositories, got {}",
                n
            ))
        })?;
        Ok(Self::new(capacity))
    }

    /// Offer one candidate. Until full it is always kept; afterwards it
    /// replaces the current minimum only when its metric is strictly larger.
    pub fn offer(&mut self, candidate: Candidate) {
        if self.capacity == 0 {
            return;
        }
        if self.heap.len() < self.capacity {
            self.heap.push(Reverse(candidate));
            return;
        }
        if let Some(mut smallest) = self.heap.peek_mut() {
            if candidate.metric > smallest.0.metric {
                // Assigning through PeekMut sifts the new root down on drop.
                *smallest = Reverse(candidate);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Drain into descending order.
    pub fn into_sorted_vec(self) -> Vec<Candidate> {
        // Ascending over Reverse<_> is descending over the candidates.
        self.heap
            .into_sorted_vec()
            .into_iter()
            .map(|Reverse(c)| c)
            .collect()
    }
}

/// Top `n` candidates by metric, descending.
pub fn select<I>(candidates: I, n: i64) -> Result<Vec<Candidate>>
where
    I: IntoIterator<Item = Candidate>,
{
    let mut top = TopN::with_requested(n)?;
    for candidate in candidates {
        top.offer(candidate);
    }
    Ok(top.into_sorted_vec())
}
