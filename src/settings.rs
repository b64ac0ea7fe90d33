// Copyright 2025 the Layerdeck Authors
// SPDX-License-Identifier: Apache-2.0

//! Engine settings and configuration constants.
//!
//! The constants below are the built-in defaults. Hosts that want to tune
//! scaling or the action log load a [`Settings`] from TOML instead.

use anyhow::Context;
use serde::Deserialize;
use std::path::Path;

// ============================================================================
// SCALE SETTINGS
// ============================================================================
/// Scale change per wheel tick
const SCALE_STEP: f64 = 0.1;

/// Smallest allowed layer scale
const MIN_SCALE: f64 = 0.1;

/// Largest allowed layer scale
const MAX_SCALE: f64 = 2.0;

/// Tolerance for "did the scale change" comparisons
const SCALE_EPSILON: f64 = 1e-9;

/// Stepped scales keep 9 decimal places so repeated ticks don't drift
const SCALE_PRECISION: f64 = 1e9;

// ============================================================================
// ACTION LOG SETTINGS
// ============================================================================
/// Number of labels the action log keeps before evicting the oldest
const ACTION_LOG_CAPACITY: usize = 5;

// ============================================================================
// PUBLIC API - Don't edit below this line unless you know what you're doing
// ============================================================================

/// Wheel-scale settings
pub mod scale {
    /// Scale change per wheel tick
    pub const STEP: f64 = super::SCALE_STEP;

    /// Smallest allowed layer scale
    pub const MIN: f64 = super::MIN_SCALE;

    /// Largest allowed layer scale
    pub const MAX: f64 = super::MAX_SCALE;

    /// Tolerance for scale equality checks
    pub const EPSILON: f64 = super::SCALE_EPSILON;

    /// Stepped scales are rounded to multiples of `1 / PRECISION`
    pub const PRECISION: f64 = super::SCALE_PRECISION;
}

/// Action log settings
pub mod action_log {
    /// Default number of retained labels
    pub const CAPACITY: usize = super::ACTION_LOG_CAPACITY;
}

// ============================================================================
// RUNTIME SETTINGS
// ============================================================================

/// Errors produced while loading or validating [`Settings`].
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("failed to parse settings: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("min_scale ({min}) must not exceed max_scale ({max})")]
    InvertedScaleRange { min: f64, max: f64 },

    #[error("min_scale must be positive, got {0}")]
    NonPositiveMinScale(f64),

    #[error("scale_step must be positive, got {0}")]
    NonPositiveStep(f64),

    #[error("action_log_capacity must be at least 1")]
    ZeroLogCapacity,
}

/// Runtime-tunable engine settings.
///
/// Every field falls back to the matching constant, so a TOML file only
/// needs to name the values it overrides:
///
/// ```toml
/// max_scale = 4.0
/// action_log_capacity = 10
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub scale_step: f64,
    pub min_scale: f64,
    pub max_scale: f64,
    pub action_log_capacity: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            scale_step: scale::STEP,
            min_scale: scale::MIN,
            max_scale: scale::MAX,
            action_log_capacity: action_log::CAPACITY,
        }
    }
}

impl Settings {
    /// Parse and validate settings from a TOML document
    pub fn from_toml_str(source: &str) -> Result<Self, SettingsError> {
        let settings: Self = toml::from_str(source)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a TOML file on disk
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        tracing::info!("Loading settings from: {}", path.display());
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings: {}", path.display()))?;
        let settings = Self::from_toml_str(&source)
            .with_context(|| format!("Invalid settings in {}", path.display()))?;
        Ok(settings)
    }

    /// Check that the ranges make sense
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.min_scale <= 0.0 {
            return Err(SettingsError::NonPositiveMinScale(self.min_scale));
        }
        if self.min_scale > self.max_scale {
            return Err(SettingsError::InvertedScaleRange {
                min: self.min_scale,
                max: self.max_scale,
            });
        }
        if self.scale_step <= 0.0 {
            return Err(SettingsError::NonPositiveStep(self.scale_step));
        }
        if self.action_log_capacity == 0 {
            return Err(SettingsError::ZeroLogCapacity);
        }
        Ok(())
    }
}
