// Copyright 2025 the Layerdeck Authors
// SPDX-License-Identifier: Apache-2.0

//! Shared, read-only bitmap resources for image layers.
//!
//! A `Bitmap` is decoded once and then shared by every layer (and every
//! history snapshot) that shows it. Cloning is an `Arc` bump; the pixels are
//! never mutated after decoding.

use anyhow::Context;
use base64::Engine as _;
use image::RgbaImage;
use kurbo::Size;
use peniko::{Blob, ImageData, ImageFormat};
use std::fmt;
use std::path::Path;
use std::sync::Arc;

/// Errors produced while turning user input into a [`Bitmap`].
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("not a data URL")]
    NotADataUrl,

    #[error("data URL is not base64-encoded")]
    NotBase64,

    #[error("invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("image has no pixels ({width}x{height})")]
    Empty { width: u32, height: u32 },
}

/// Decoded RGBA8 pixels shared between layers
#[derive(Clone)]
pub struct Bitmap {
    pixels: Arc<RgbaImage>,
}

impl Bitmap {
    /// Wrap already-decoded pixels.
    pub fn from_rgba(pixels: RgbaImage) -> Result<Self, IngestError> {
        let (width, height) = pixels.dimensions();
        if width == 0 || height == 0 {
            return Err(IngestError::Empty { width, height });
        }
        Ok(Self {
            pixels: Arc::new(pixels),
        })
    }

    /// Decode an encoded image (PNG, JPEG) from memory.
    pub fn decode(bytes: &[u8]) -> Result<Self, IngestError> {
        let img = image::load_from_memory(bytes)?;
        Self::from_rgba(img.to_rgba8())
    }

    /// Decode a `data:<mime>;base64,<payload>` URL, the form a browser
    /// file reader hands back for a picked file.
    pub fn from_data_url(url: &str) -> Result<Self, IngestError> {
        let rest = url
            .trim()
            .strip_prefix("data:")
            .ok_or(IngestError::NotADataUrl)?;
        let (header, payload) = rest.split_once(',').ok_or(IngestError::NotADataUrl)?;
        if !header.ends_with(";base64") {
            return Err(IngestError::NotBase64);
        }
        let bytes = base64::engine::general_purpose::STANDARD.decode(payload.trim())?;
        tracing::debug!(
            "[Bitmap::from_data_url] header={}, {} bytes",
            header,
            bytes.len()
        );
        Self::decode(&bytes)
    }

    /// Load and decode an image file.
    pub fn open(path: &Path) -> anyhow::Result<Self> {
        tracing::info!("Loading image from: {}", path.display());
        let img = image::open(path)
            .with_context(|| format!("Failed to load image: {}", path.display()))?;
        let bitmap = Self::from_rgba(img.to_rgba8())
            .with_context(|| format!("Unusable image: {}", path.display()))?;
        Ok(bitmap)
    }

    /// Pixel width
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    /// Pixel height
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Natural size in buffer pixels
    pub fn size(&self) -> Size {
        Size::new(self.width() as f64, self.height() as f64)
    }

    /// Borrow the decoded pixels
    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Whether two handles share the same decoded pixels
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.pixels, &other.pixels)
    }

    /// Wrap the pixels in a `peniko::ImageData` for Vello-based hosts.
    pub fn to_image_data(&self) -> ImageData {
        ImageData {
            data: Blob::from(self.pixels.as_raw().clone()),
            format: ImageFormat::Rgba8,
            alpha_type: peniko::ImageAlphaType::Alpha,
            width: self.width(),
            height: self.height(),
        }
    }
}

impl PartialEq for Bitmap {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
            || (self.pixels.dimensions() == other.pixels.dimensions()
                && self.pixels.as_raw() == other.pixels.as_raw())
    }
}

impl fmt::Debug for Bitmap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bitmap")
            .field("width", &self.width())
            .field("height", &self.height())
            .finish_non_exhaustive()
    }
}
