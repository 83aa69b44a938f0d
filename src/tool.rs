use egui::Color32;
use image::Rgba;
use serde::{Deserialize, Serialize};

/// Nib width in buffer pixels, always within `MIN..=MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "u32", into = "u32")]
pub struct StrokeWidth(u32);

impl StrokeWidth {
    pub const MIN: u32 = 1;
    pub const MAX: u32 = 20;

    /// Clamps `width` into the supported range.
    pub fn new(width: u32) -> Self {
        Self(width.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> u32 {
        self.0
    }

    pub fn radius(self) -> f32 {
        self.0 as f32 / 2.0
    }
}

impl Default for StrokeWidth {
    fn default() -> Self {
        Self(3)
    }
}

impl From<u32> for StrokeWidth {
    fn from(width: u32) -> Self {
        Self::new(width)
    }
}

impl From<StrokeWidth> for u32 {
    fn from(width: StrokeWidth) -> Self {
        width.0
    }
}

/// The closed ink palette offered by the practice desk.
///
/// `Paper` is the background color of the sheet, so painting with it
/// erases by overpaint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum InkColor {
    #[default]
    Black,
    DarkBlue,
    DarkRed,
    Paper,
}

impl InkColor {
    pub const ALL: [InkColor; 4] = [
        InkColor::Black,
        InkColor::DarkBlue,
        InkColor::DarkRed,
        InkColor::Paper,
    ];

    pub fn rgb(self) -> [u8; 3] {
        match self {
            Self::Black => [0x1a, 0x1a, 0x1a],
            Self::DarkBlue => [0x1e, 0x3a, 0x8a],
            Self::DarkRed => [0x7f, 0x1d, 0x1d],
            Self::Paper => [0xfd, 0xfb, 0xf7],
        }
    }

    pub fn to_rgba(self) -> Rgba<u8> {
        let [r, g, b] = self.rgb();
        Rgba([r, g, b, 255])
    }

    pub fn to_color32(self) -> Color32 {
        let [r, g, b] = self.rgb();
        Color32::from_rgb(r, g, b)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Black => "Black",
            Self::DarkBlue => "Dark blue",
            Self::DarkRed => "Dark red",
            Self::Paper => "Eraser",
        }
    }

    pub fn is_eraser(self) -> bool {
        self == Self::Paper
    }
}

/// Background color of a fresh or cleared sheet.
pub const PAPER: Rgba<u8> = Rgba([0xfd, 0xfb, 0xf7, 255]);
