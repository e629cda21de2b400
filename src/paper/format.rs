//! ISO 216 format table.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Width and height of a sheet in millimetres (portrait, width < height).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct PaperDimensions {
    pub width: u32,
    pub height: u32,
}

impl PaperDimensions {
    /// Area in square millimetres.
    pub fn area(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }
}

/// Returned when a string does not name a known paper format.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown paper format: {0}")]
pub struct UnknownPaperFormat(pub String);

macro_rules! paper_formats {
    ($($variant:ident => ($width:expr, $height:expr)),+ $(,)?) => {
        /// Standard ISO 216 paper formats.
        ///
        /// A is the common office series, B sits between A sizes (posters,
        /// books, passports), C is used for envelopes.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum PaperFormat {
            $($variant),+
        }

        impl PaperFormat {
            /// Every format, series by series, largest first.
            pub const ALL: &'static [PaperFormat] = &[$(PaperFormat::$variant),+];

            /// Dimensions of the format in millimetres.
            pub const fn dimensions(self) -> PaperDimensions {
                match self {
                    $(PaperFormat::$variant => PaperDimensions { width: $width, height: $height }),+
                }
            }

            /// Identifier as written in route options, e.g. `"A4"`.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(PaperFormat::$variant => stringify!($variant)),+
                }
            }
        }
    };
}

paper_formats! {
    A0 => (841, 1189),
    A1 => (594, 841),
    A2 => (420, 594),
    A3 => (297, 420),
    A4 => (210, 297),
    A5 => (148, 210),
    A6 => (105, 148),
    A7 => (74, 105),
    A8 => (52, 74),
    A9 => (37, 52),
    A10 => (26, 37),
    B0 => (1000, 1414),
    B1 => (707, 1000),
    B2 => (500, 707),
    B3 => (353, 500),
    B4 => (250, 353),
    B5 => (176, 250),
    B6 => (125, 176),
    B7 => (88, 125),
    B8 => (62, 88),
    B9 => (44, 62),
    B10 => (31, 44),
    C0 => (917, 1297),
    C1 => (648, 917),
    C2 => (458, 648),
    C3 => (324, 458),
    C4 => (229, 324),
    C5 => (162, 229),
    C6 => (114, 162),
    C7 => (81, 114),
    C8 => (57, 81),
    C9 => (40, 57),
    C10 => (28, 40),
}

impl Default for PaperFormat {
    fn default() -> Self {
        PaperFormat::A4
    }
}

impl fmt::Display for PaperFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaperFormat {
    type Err = UnknownPaperFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PaperFormat::ALL
            .iter()
            .copied()
            .find(|format| format.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownPaperFormat(s.to_string()))
    }
}
