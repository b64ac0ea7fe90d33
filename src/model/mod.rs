// Copyright 2025 the Layerdeck Authors
// SPDX-License-Identifier: Apache-2.0

//! Composition data model

pub mod bitmap;
pub mod layer;
pub mod layer_id;

pub use bitmap::{Bitmap, IngestError};
pub use layer::{ImageLayer, Layer, LayerKind, PathLayer, PathStyle};
pub use layer_id::LayerId;
