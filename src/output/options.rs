//! Route options as declared by a defining module.
//!
//! # Responsibilities
//! - Deserialize the partial `[options]` table (unknown keys rejected)
//! - Merge declared values over the OutputConfig defaults
//! - Reject values the renderer cannot honour
//!
//! # Design Decisions
//! - Merging is a pure function: RouteOptions → Result<OutputConfig, OptionsError>
//! - `methods` defaults to `{GET}` independently of the other fields

use std::collections::BTreeSet;

use serde::Deserialize;
use thiserror::Error;

use super::{Format, Margin, Orientation, OutputConfig, DEFAULT_TIMEOUT_MS};
use crate::routing::HttpMethod;

/// Margins where every side is optional.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MarginOptions {
    pub top: Option<f64>,
    pub right: Option<f64>,
    pub bottom: Option<f64>,
    pub left: Option<f64>,
}

/// Partial output configuration read from a defining module.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RouteOptions {
    pub methods: Option<Vec<HttpMethod>>,
    pub format: Option<Format>,
    pub orientation: Option<Orientation>,
    pub margin: Option<MarginOptions>,
    /// Render timeout in milliseconds.
    pub timeout: Option<u64>,
}

/// A declared option value that cannot be used.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OptionsError {
    #[error("methods must list at least one HTTP method")]
    NoMethods,

    #[error("timeout must be a positive number of milliseconds")]
    ZeroTimeout,

    #[error("margin.{side} must be a non-negative number of millimetres, got {value}")]
    InvalidMargin { side: &'static str, value: f64 },

    #[error("custom format dimensions must be positive, got {width}x{height} mm")]
    InvalidDimensions { width: f64, height: f64 },
}

impl RouteOptions {
    /// Fill every absent field from the defaults and check the result.
    pub fn resolve(self) -> Result<OutputConfig, OptionsError> {
        let methods: BTreeSet<HttpMethod> = match self.methods {
            Some(methods) if methods.is_empty() => return Err(OptionsError::NoMethods),
            Some(methods) => methods.into_iter().collect(),
            None => BTreeSet::from([HttpMethod::Get]),
        };

        let format = self.format.unwrap_or_default();
        if let Format::Custom { width, height } = format {
            if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
                return Err(OptionsError::InvalidDimensions { width, height });
            }
        }

        let timeout_ms = self.timeout.unwrap_or(DEFAULT_TIMEOUT_MS);
        if timeout_ms == 0 {
            return Err(OptionsError::ZeroTimeout);
        }

        let margin = self.margin.unwrap_or_default();
        let margin = Margin {
            top: margin_side("top", margin.top)?,
            right: margin_side("right", margin.right)?,
            bottom: margin_side("bottom", margin.bottom)?,
            left: margin_side("left", margin.left)?,
        };

        Ok(OutputConfig {
            format,
            orientation: self.orientation.unwrap_or_default(),
            margin,
            timeout_ms,
            methods,
        })
    }
}

fn margin_side(side: &'static str, value: Option<f64>) -> Result<f64, OptionsError> {
    let value = value.unwrap_or(0.0);
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(OptionsError::InvalidMargin { side, value })
    }
}
