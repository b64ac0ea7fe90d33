// Copyright 2025 the Layerdeck Authors
// SPDX-License-Identifier: Apache-2.0

//! Snapshot-based undo/redo history.
//!
//! The history is a list of snapshots plus a cursor pointing at the active
//! one. It always holds at least one entry, so `0 <= cursor < len` is an
//! invariant rather than a check. Committing after an undo drops the redo
//! branch before appending.
//!
//! A batch collapses every commit made between `begin_batch` and
//! `end_batch` into a single entry, which is how a whole drag becomes one
//! undo step.

/// Undo/redo stack of snapshots
#[derive(Debug, Clone)]
pub struct History<T> {
    entries: Vec<T>,
    cursor: usize,
    batch: Option<Batch<T>>,
}

#[derive(Debug, Clone)]
struct Batch<T> {
    pending: Option<T>,
}

impl<T: Clone> History<T> {
    /// Start a history whose only entry is `initial`
    pub fn new(initial: T) -> Self {
        Self {
            entries: vec![initial],
            cursor: 0,
            batch: None,
        }
    }

    /// The active snapshot
    pub fn current(&self) -> &T {
        &self.entries[self.cursor]
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false; present for symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    pub fn is_batching(&self) -> bool {
        self.batch.is_some()
    }

    /// Record a new snapshot after the cursor.
    ///
    /// Inside a batch the snapshot replaces the batch's pending entry instead.
    pub fn commit(&mut self, snapshot: T) {
        if let Some(batch) = &mut self.batch {
            batch.pending = Some(snapshot);
            return;
        }
        self.entries.truncate(self.cursor + 1);
        self.entries.push(snapshot);
        self.cursor = self.entries.len() - 1;
    }

    /// Step back. Returns the newly active snapshot, or `None` at the start.
    ///
    /// An open batch is cancelled first.
    pub fn undo(&mut self) -> Option<&T> {
        self.cancel_batch();
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        Some(&self.entries[self.cursor])
    }

    /// Step forward. Returns the newly active snapshot, or `None` at the end.
    pub fn redo(&mut self) -> Option<&T> {
        self.cancel_batch();
        if !self.can_redo() {
            return None;
        }
        self.cursor += 1;
        Some(&self.entries[self.cursor])
    }

    /// Open a batch. Opening while one is already open keeps the existing one.
    pub fn begin_batch(&mut self) {
        if self.batch.is_none() {
            self.batch = Some(Batch { pending: None });
        }
    }

    /// Close the batch, committing its last snapshot as one entry.
    ///
    /// Returns whether an entry was added.
    pub fn end_batch(&mut self) -> bool {
        match self.batch.take().and_then(|batch| batch.pending) {
            Some(snapshot) => {
                self.commit(snapshot);
                true
            }
            None => false,
        }
    }

    /// Drop the batch and anything it collected
    pub fn cancel_batch(&mut self) {
        self.batch = None;
    }
}
