// Copyright 2025 the Layerdeck Authors
// SPDX-License-Identifier: Apache-2.0

//! Kinds of logical edits

use std::fmt;

/// One logical user action, i.e. one undo step and one action-log label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKind {
    /// A layer was dropped or uploaded onto the canvas
    AddLayer,

    /// A whole drag gesture, from pointer-down to pointer-up
    Move,

    /// One wheel tick
    Scale,

    /// Drag-to-reorder in the layer list
    Reorder,

    /// All layers removed
    Clear,

    Undo,
    Redo,
}

impl EditKind {
    /// Label recorded in the action log
    pub fn label(self) -> &'static str {
        match self {
            Self::AddLayer => "Add layer",
            Self::Move => "Move layer",
            Self::Scale => "Scale layer",
            Self::Reorder => "Reorder layers",
            Self::Clear => "Clear canvas",
            Self::Undo => "Undo",
            Self::Redo => "Redo",
        }
    }
}

impl fmt::Display for EditKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
