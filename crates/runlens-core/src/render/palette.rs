//! Fixed color sets so repeated runs produce identical images.

use plotters::style::RGBColor;

/// Qualitative palette; indexes wrap around.
#[derive(Debug, Clone, Copy)]
pub struct Palette(&'static [RGBColor]);

impl Palette {
    pub fn color(&self, index: usize) -> RGBColor {
        self.0[index % self.0.len()]
    }
}

pub const DEEP: Palette = Palette(&[
    RGBColor(0x4c, 0x72, 0xb0),
    RGBColor(0xdd, 0x84, 0x52),
    RGBColor(0x55, 0xa8, 0x68),
    RGBColor(0xc4, 0x4e, 0x52),
    RGBColor(0x81, 0x72, 0xb3),
    RGBColor(0x93, 0x78, 0x60),
    RGBColor(0xda, 0x8b, 0xc3),
    RGBColor(0x8c, 0x8c, 0x8c),
    RGBColor(0xcc, 0xb9, 0x74),
    RGBColor(0x64, 0xb5, 0xcd),
]);

pub const MUTED: Palette = Palette(&[
    RGBColor(0x48, 0x78, 0xd0),
    RGBColor(0xee, 0x85, 0x4a),
    RGBColor(0x6a, 0xcc, 0x64),
    RGBColor(0xd6, 0x5f, 0x5f),
    RGBColor(0x95, 0x6c, 0xb4),
    RGBColor(0x8c, 0x61, 0x3c),
    RGBColor(0xdc, 0x7e, 0xc0),
    RGBColor(0x79, 0x79, 0x79),
    RGBColor(0xd5, 0xbb, 0x67),
    RGBColor(0x82, 0xc6, 0xe2),
]);

pub const PASTEL: Palette = Palette(&[
    RGBColor(0xa1, 0xc9, 0xf4),
    RGBColor(0xff, 0xb4, 0x82),
    RGBColor(0x8d, 0xe5, 0xa1),
    RGBColor(0xff, 0x9f, 0x9b),
    RGBColor(0xd0, 0xbb, 0xff),
    RGBColor(0xde, 0xbb, 0x9b),
    RGBColor(0xfa, 0xb0, 0xe4),
    RGBColor(0xcf, 0xcf, 0xcf),
    RGBColor(0xff, 0xfe, 0xa3),
    RGBColor(0xb9, 0xf2, 0xf0),
]);

pub const SET2: Palette = Palette(&[
    RGBColor(0x66, 0xc2, 0xa5),
    RGBColor(0xfc, 0x8d, 0x62),
    RGBColor(0x8d, 0xa0, 0xcb),
    RGBColor(0xe7, 0x8a, 0xc3),
    RGBColor(0xa6, 0xd8, 0x54),
    RGBColor(0xff, 0xd9, 0x2f),
    RGBColor(0xe5, 0xc4, 0x94),
    RGBColor(0xb3, 0xb3, 0xb3),
]);

/// Sequential colormap, linearly interpolated between evenly spaced stops.
#[derive(Debug, Clone, Copy)]
pub struct ColorMap(&'static [RGBColor]);

impl ColorMap {
    /// `t` is clamped to `[0, 1]`; NaN maps to the low end.
    pub fn sample(&self, t: f64) -> RGBColor {
        let stops = self.0;
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let pos = t * (stops.len() - 1) as f64;
        let i = (pos.floor() as usize).min(stops.len() - 2);
        let frac = pos - i as f64;
        let (a, b) = (stops[i], stops[i + 1]);
        let mix = |x: u8, y: u8| (x as f64 + (y as f64 - x as f64) * frac).round() as u8;
        RGBColor(mix(a.0, b.0), mix(a.1, b.1), mix(a.2, b.2))
    }

    /// Rough perceived brightness at `t`, for picking a readable text color.
    pub fn is_dark_at(&self, t: f64) -> bool {
        let c = self.sample(t);
        let luma = 0.299 * c.0 as f64 + 0.587 * c.1 as f64 + 0.114 * c.2 as f64;
        luma < 128.0
    }
}

pub const BLUES: ColorMap = ColorMap(&[
    RGBColor(0xf7, 0xfb, 0xff),
    RGBColor(0xde, 0xeb, 0xf7),
    RGBColor(0xc6, 0xdb, 0xef),
    RGBColor(0x9e, 0xca, 0xe1),
    RGBColor(0x6b, 0xae, 0xd6),
    RGBColor(0x42, 0x92, 0xc6),
    RGBColor(0x21, 0x71, 0xb5),
    RGBColor(0x08, 0x51, 0x9c),
    RGBColor(0x08, 0x30, 0x6b),
]);

pub const YL_GN_BU: ColorMap = ColorMap(&[
    RGBColor(0xff, 0xff, 0xd9),
    RGBColor(0xed, 0xf8, 0xb1),
    RGBColor(0xc7, 0xe9, 0xb4),
    RGBColor(0x7f, 0xcd, 0xbb),
    RGBColor(0x41, 0xb6, 0xc4),
    RGBColor(0x1d, 0x91, 0xc0),
    RGBColor(0x22, 0x5e, 0xa8),
    RGBColor(0x25, 0x34, 0x94),
    RGBColor(0x08, 0x1d, 0x58),
]);
