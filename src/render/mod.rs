//! Rendering seam.
//!
//! # Data Flow
//! ```text
//! matched RouteDefinition + validated props
//!     → RenderJob
//!     → Renderer::render (on the blocking pool, under the route timeout)
//!     → RenderedDocument (content type + bytes)
//! ```
//!
//! # Design Decisions
//! - Renderers are synchronous; the HTTP layer owns scheduling and deadlines
//! - PDF engines plug in here; the crate ships a print-ready HTML renderer

pub mod html;

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::output::{Margin, OutputConfig};
use crate::paper::mm_to_inch;
use crate::routing::RouteDefinition;

pub use html::HtmlRenderer;

/// A route and the props it should be rendered with.
#[derive(Debug, Clone)]
pub struct RenderJob {
    pub route: Arc<RouteDefinition>,
    pub props: Value,
}

/// Output of a renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocument {
    pub content_type: &'static str,
    pub body: Vec<u8>,
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("render failed: {0}")]
    Failed(String),
}

/// Turns a render job into a document.
pub trait Renderer: Send + Sync {
    fn render(&self, job: &RenderJob) -> Result<RenderedDocument, RenderError>;
}

/// Page geometry in inches with orientation applied.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PageLayout {
    pub width_in: f64,
    pub height_in: f64,
    pub margin_in: Margin,
}

impl PageLayout {
    pub fn from_output(output: &OutputConfig) -> Self {
        let (width, height) = output.page_size_mm();
        let margin = output.margin;
        Self {
            width_in: mm_to_inch(width),
            height_in: mm_to_inch(height),
            margin_in: Margin {
                top: mm_to_inch(margin.top),
                right: mm_to_inch(margin.right),
                bottom: mm_to_inch(margin.bottom),
                left: mm_to_inch(margin.left),
            },
        }
    }
}
