//! Paper geometry.
//!
//! # Responsibilities
//! - Enumerate the ISO 216 A, B and C series
//! - Look up format dimensions in millimetres
//! - Convert millimetres to inches for engines that want imperial units
//!
//! # Design Decisions
//! - The format set is a closed enum, so lookups cannot fail at runtime
//! - Dimensions are the published integer millimetre values, portrait first

pub mod format;

pub use format::{PaperDimensions, PaperFormat, UnknownPaperFormat};

/// Number of millimetres in one inch.
pub const MM_PER_INCH: f64 = 25.4;

/// Convert millimetres to inches.
///
/// Accepts any value, including zero and negatives.
pub fn mm_to_inch(mm: f64) -> f64 {
    mm / MM_PER_INCH
}
