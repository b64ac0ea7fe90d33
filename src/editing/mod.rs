// Copyright 2025 the Layerdeck Authors
// SPDX-License-Identifier: Apache-2.0

//! Editing model: layer store, history, hit testing, selection

pub mod action_log;
pub mod edit_types;
pub mod hit_testing;
pub mod selection;
pub mod store;
pub mod undo;

pub use action_log::ActionLog;
pub use edit_types::EditKind;
pub use hit_testing::topmost_hit;
pub use selection::Selection;
pub use store::LayerStore;
pub use undo::History;
