// Copyright 2025 S3Vac Team
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::types::DeleteTarget;

/// Maximum number of targets one DeleteObjects request may carry.
pub const MAX_DELETE_BATCH: usize = 1000;

/// A bounded ordered sequence of delete targets, handed off to the storage
/// client as one delete call and not reused afterward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch {
    targets: Vec<DeleteTarget>,
}

impl Batch {
    fn new(targets: Vec<DeleteTarget>) -> Self {
        Self { targets }
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn targets(&self) -> &[DeleteTarget] {
        &self.targets
    }

    pub fn into_targets(self) -> Vec<DeleteTarget> {
        self.targets
    }
}

/// Pure accumulation of delete targets into capacity-bounded batches.
///
/// No I/O and no thread-safety: one builder is owned by one drain.
#[derive(Debug)]
pub struct BatchBuilder {
    capacity: usize,
    pending: Vec<DeleteTarget>,
}

impl BatchBuilder {
    /// Capacity must be non-zero.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "batch capacity must be non-zero");
        Self {
            capacity,
            pending: Vec::with_capacity(capacity),
        }
    }

    /// Adds a target, returning the previously accumulated batch when the
    /// target would overflow it. The target itself always lands in the
    /// current (possibly fresh) batch, so nothing is ever dropped.
    pub fn push(&mut self, target: DeleteTarget) -> Option<Batch> {
        let full = if self.pending.len() == self.capacity {
            let taken = std::mem::replace(&mut self.pending, Vec::with_capacity(self.capacity));
            Some(Batch::new(taken))
        } else {
            None
        };
        self.pending.push(target);
        full
    }

    /// Emits whatever is pending, or `None` when nothing was added since the
    /// last flush. An empty batch would be a wasted delete call.
    pub fn flush(&mut self) -> Option<Batch> {
        if self.pending.is_empty() {
            return None;
        }
        let taken = std::mem::replace(&mut self.pending, Vec::with_capacity(self.capacity));
        Some(Batch::new(taken))
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target(n: usize) -> DeleteTarget {
        DeleteTarget::object(format!("key-{n}"))
    }

    #[test]
    fn test_push_below_capacity_emits_nothing() {
        let mut builder = BatchBuilder::new(3);
        assert!(builder.push(target(0)).is_none());
        assert!(builder.push(target(1)).is_none());
        assert!(builder.push(target(2)).is_none());
        assert_eq!(builder.pending(), 3);
    }

    #[test]
    fn test_overflow_hands_off_full_batch() {
        let mut builder = BatchBuilder::new(2);
        assert!(builder.push(target(0)).is_none());
        assert!(builder.push(target(1)).is_none());

        // The third target overflows: the full pair is emitted and the
        // overflowing target starts the next batch.
        let full = builder.push(target(2)).expect("full batch on overflow");
        assert_eq!(full.len(), 2);
        assert_eq!(full.targets()[0].key, "key-0");
        assert_eq!(full.targets()[1].key, "key-1");
        assert_eq!(builder.pending(), 1);

        let rest = builder.flush().expect("overflow target still pending");
        assert_eq!(rest.targets()[0].key, "key-2");
    }

    #[test]
    fn test_flush_empty_is_none() {
        let mut builder = BatchBuilder::new(10);
        assert!(builder.flush().is_none());

        builder.push(target(0));
        assert!(builder.flush().is_some());
        // Nothing added since the last flush.
        assert!(builder.flush().is_none());
    }

    #[test]
    fn test_push_after_flush_starts_fresh() {
        let mut builder = BatchBuilder::new(2);
        builder.push(target(0));
        let first = builder.flush().unwrap();
        assert_eq!(first.len(), 1);

        builder.push(target(1));
        builder.push(target(2));
        let second = builder.flush().unwrap();
        assert_eq!(second.len(), 2);
        assert_eq!(second.targets()[0].key, "key-1");
    }

    #[test]
    #[should_panic(expected = "non-zero")]
    fn test_zero_capacity_panics() {
        BatchBuilder::new(0);
    }
}
