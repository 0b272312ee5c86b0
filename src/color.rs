use eframe::egui::Color32;
use palette::{Hsluv, IntoColor, Srgb};
use plotters::style::RGBColor;

// ---------------------------------------------------------------------------
// Series colour
// ---------------------------------------------------------------------------

/// An 8-bit sRGB colour shared by the window and image renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeriesColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl SeriesColor {
    pub fn to_color32(self) -> Color32 {
        Color32::from_rgb(self.r, self.g, self.b)
    }

    pub fn to_rgb(self) -> RGBColor {
        RGBColor(self.r, self.g, self.b)
    }
}

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

const SATURATION: f32 = 0.9;
const LIGHTNESS: f32 = 0.65;
const HUE_OFFSET: f32 = 0.01;

/// Generates `n` colours evenly spaced in HSLuv hue with equal perceived
/// lightness (the "husl" palette).
pub fn generate_palette(n: usize) -> Vec<SeriesColor> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = ((i as f32 / n as f32 + HUE_OFFSET) % 1.0) * 359.0;
            let husl: Hsluv = Hsluv::new(hue, SATURATION * 99.0, LIGHTNESS * 99.0);
            let rgb: Srgb = husl.into_color();
            let rgb: Srgb<u8> = rgb.into_format();
            SeriesColor {
                r: rgb.red,
                g: rgb.green,
                b: rgb.blue,
            }
        })
        .collect()
}
