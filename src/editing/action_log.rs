// Copyright 2025 the Layerdeck Authors
// SPDX-License-Identifier: Apache-2.0

//! Bounded log of recent action labels, for diagnostics and UI display.

use std::collections::VecDeque;

/// FIFO of human-readable labels; the oldest is evicted past capacity
#[derive(Debug, Clone)]
pub struct ActionLog {
    entries: VecDeque<String>,
    capacity: usize,
}

impl ActionLog {
    /// A log holding at most `capacity` labels (minimum one)
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, label: impl Into<String>) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(label.into());
    }

    /// Labels, oldest first
    pub fn entries(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    pub fn latest(&self) -> Option<&str> {
        self.entries.back().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for ActionLog {
    fn default() -> Self {
        Self::new(crate::settings::action_log::CAPACITY)
    }
}
