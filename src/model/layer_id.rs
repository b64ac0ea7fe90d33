// Copyright 2025 the Layerdeck Authors
// SPDX-License-Identifier: Apache-2.0

//! Stable identifiers for layers.
//!
//! A `LayerId` is handed out once, when a layer is created, from a global
//! atomic counter. It survives reorders, undo and redo, so hosts can key
//! list rows and thumbnails on it while the layer's array index changes.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// A unique identifier for a layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LayerId(u64);

static LAYER_COUNTER: AtomicU64 = AtomicU64::new(1);

impl LayerId {
    /// Create a new unique layer ID
    pub fn next() -> Self {
        Self(LAYER_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// The raw counter value
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "layer-{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique_and_increasing() {
        let a = LayerId::next();
        let b = LayerId::next();
        assert_ne!(a, b);
        assert!(b > a);
    }

    #[test]
    fn display_uses_raw_value() {
        let id = LayerId::next();
        assert_eq!(id.to_string(), format!("layer-{}", id.get()));
    }
}
