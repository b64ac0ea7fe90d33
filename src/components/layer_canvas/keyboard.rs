// Copyright 2025 the Layerdeck Authors
// SPDX-License-Identifier: Apache-2.0

//! Keyboard shortcuts for LayerCanvas

use super::LayerCanvas;

impl LayerCanvas {
    /// Handle a keyboard shortcut.
    ///
    /// `key` is the logical key as the host reports it (`"z"`, `"Escape"`).
    /// `cmd` is the platform command modifier (Cmd on macOS, Ctrl
    /// elsewhere). Returns true if the key was consumed.
    pub fn handle_shortcut(&mut self, key: &str, cmd: bool, shift: bool) -> bool {
        if self.handle_undo_redo(key, cmd, shift) {
            return true;
        }

        if self.handle_escape(key) {
            return true;
        }

        false
    }

    fn handle_undo_redo(&mut self, key: &str, cmd: bool, shift: bool) -> bool {
        if !cmd || !key.eq_ignore_ascii_case("z") {
            return false;
        }

        if shift {
            self.redo();
        } else {
            self.undo();
        }
        true
    }

    fn handle_escape(&mut self, key: &str) -> bool {
        if key != "Escape" {
            return false;
        }
        self.end_drag();
        self.selection.clear();
        true
    }
}
