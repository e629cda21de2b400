//! Per-route output configuration.
//!
//! # Data Flow
//! ```text
//! defining module [options] table
//!     → options.rs (RouteOptions, every field optional)
//!     → RouteOptions::resolve (merge over defaults, value checks)
//!     → OutputConfig (fully populated, stored on the route)
//! ```
//!
//! # Design Decisions
//! - OutputConfig never has unset fields; defaults are applied before storage
//! - Lengths are millimetres; conversion happens at the rendering edge

pub mod options;

use std::collections::BTreeSet;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::paper::PaperFormat;
use crate::routing::HttpMethod;

pub use options::{MarginOptions, OptionsError, RouteOptions};

/// Default render timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// A standard paper format or explicit dimensions in millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Format {
    Paper(PaperFormat),
    Custom { width: f64, height: f64 },
}

impl Format {
    /// Width and height in millimetres, as declared (no orientation applied).
    pub fn dimensions_mm(&self) -> (f64, f64) {
        match *self {
            Format::Paper(format) => {
                let d = format.dimensions();
                (f64::from(d.width), f64::from(d.height))
            }
            Format::Custom { width, height } => (width, height),
        }
    }
}

impl Default for Format {
    fn default() -> Self {
        Format::Paper(PaperFormat::A4)
    }
}

/// Page orientation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

/// Page margins in millimetres.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Margin {
    /// The same margin on all four sides.
    pub fn uniform(mm: f64) -> Self {
        Self {
            top: mm,
            right: mm,
            bottom: mm,
            left: mm,
        }
    }
}

/// Resolved rendering configuration of a route.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutputConfig {
    pub format: Format,
    pub orientation: Orientation,
    pub margin: Margin,
    pub timeout_ms: u64,
    pub methods: BTreeSet<HttpMethod>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: Format::default(),
            orientation: Orientation::default(),
            margin: Margin::default(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            methods: BTreeSet::from([HttpMethod::Get]),
        }
    }
}

impl OutputConfig {
    /// Effective page size in millimetres with orientation applied.
    pub fn page_size_mm(&self) -> (f64, f64) {
        let (width, height) = self.format.dimensions_mm();
        let (short, long) = if width <= height {
            (width, height)
        } else {
            (height, width)
        };
        match self.orientation {
            Orientation::Portrait => (short, long),
            Orientation::Landscape => (long, short),
        }
    }

    /// Render deadline for this route.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Whether requests with `method` may reach this route.
    pub fn allows(&self, method: HttpMethod) -> bool {
        self.methods.contains(&method)
    }
}
