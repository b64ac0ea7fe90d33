// Copyright 2025 the Layerdeck Authors
// SPDX-License-Identifier: Apache-2.0

//! Interactive components driven by host input events

pub mod layer_canvas;

pub use layer_canvas::{LayerCanvas, LayerRow, PointerState};
