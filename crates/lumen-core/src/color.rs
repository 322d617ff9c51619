//! Conversions between the hub's hue/sat/bri model and `#rrggbb` colors.
//!
//! The hub expresses hue as 0–65535 around the wheel and saturation and
//! brightness as 0–254.

use crate::types::{LightState, LightStateDelta};

const HUE_MAX: f64 = 65535.0;
const LEVEL_MAX: f64 = 254.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create from HSV (hue 0-360, saturation 0-1, value 0-1).
    pub fn from_hsv(h: f64, s: f64, v: f64) -> Self {
        let h = h.rem_euclid(360.0);
        let c = v * s;
        let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
        let m = v - c;

        let (r1, g1, b1) = match h as u16 {
            0..=59 => (c, x, 0.0),
            60..=119 => (x, c, 0.0),
            120..=179 => (0.0, c, x),
            180..=239 => (0.0, x, c),
            240..=299 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };

        Self::new(
            ((r1 + m) * 255.0).round() as u8,
            ((g1 + m) * 255.0).round() as u8,
            ((b1 + m) * 255.0).round() as u8,
        )
    }

    /// Returns (hue 0-360, saturation 0-1, value 0-1).
    pub fn to_hsv(self) -> (f64, f64, f64) {
        let r = self.r as f64 / 255.0;
        let g = self.g as f64 / 255.0;
        let b = self.b as f64 / 255.0;
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let delta = max - min;

        let h = if delta == 0.0 {
            0.0
        } else if max == r {
            60.0 * ((g - b) / delta).rem_euclid(6.0)
        } else if max == g {
            60.0 * ((b - r) / delta + 2.0)
        } else {
            60.0 * ((r - g) / delta + 4.0)
        };
        let s = if max == 0.0 { 0.0 } else { delta / max };
        (h, s, max)
    }

    /// Parse `#rrggbb` or `rrggbb`.
    pub fn parse_hex(text: &str) -> Option<Self> {
        let hex = text.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    pub fn hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Approximate display color of a light's current state.
pub fn light_rgb(state: &LightState) -> Rgb {
    let h = state.hue as f64 / HUE_MAX * 360.0;
    let s = (state.sat as f64 / LEVEL_MAX).min(1.0);
    let v = (state.bri as f64 / LEVEL_MAX).min(1.0);
    Rgb::from_hsv(h, s, v)
}

/// State change that shows `hex` on a light, or `None` if `hex` is not a color.
pub fn delta_for_hex(hex: &str) -> Option<LightStateDelta> {
    let (h, s, v) = Rgb::parse_hex(hex)?.to_hsv();
    Some(LightStateDelta {
        on: None,
        hue: Some((h / 360.0 * HUE_MAX).round() as u16),
        sat: Some((s * LEVEL_MAX).round() as u8),
        bri: Some((v * LEVEL_MAX).round() as u8),
    })
}
