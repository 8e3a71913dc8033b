//! RGB blending used by the tab strip while a drag is in flight.

use std::str::FromStr;

/// An RGB colour with `0.0..=255.0` channels.
///
/// Channels are kept as floats so a partially-interpolated colour does not
/// lose precision between frames; rounding happens only at paint time.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    pub fn from_u8(r: u8, g: u8, b: u8) -> Self {
        Self::new(f64::from(r), f64::from(g), f64::from(b))
    }

    /// Round each channel to the nearest displayable byte.
    pub fn to_u8(self) -> (u8, u8, u8) {
        let q = |c: f64| c.round().clamp(0.0, 255.0) as u8;
        (q(self.r), q(self.g), q(self.b))
    }

    /// `#rrggbb` form, as written to the config file.
    pub fn to_hex(self) -> String {
        let (r, g, b) = self.to_u8();
        format!("#{r:02x}{g:02x}{b:02x}")
    }
}

impl FromStr for Rgb {
    type Err = String;

    /// Parse `#rrggbb` (the leading `#` is optional).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(format!("expected #rrggbb, got {s:?}"));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|e| format!("{s:?}: {e}"))
        };
        Ok(Self::from_u8(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

/// Signed per-channel difference `a - b`.
pub fn delta(a: Rgb, b: Rgb) -> (f64, f64, f64) {
    (a.r - b.r, a.g - b.g, a.b - b.b)
}

/// Linear blend between two scalars.  Exact at both ends.
pub fn lerp(from: f64, to: f64, progress: f64) -> f64 {
    let t = progress.clamp(0.0, 1.0);
    from * (1.0 - t) + to * t
}

/// Per-channel linear blend from `from` (progress 0) to `to` (progress 1).
pub fn interpolate(from: Rgb, to: Rgb, progress: f64) -> Rgb {
    Rgb::new(
        lerp(from.r, to.r, progress),
        lerp(from.g, to.g, progress),
        lerp(from.b, to.b, progress),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgb = Rgb::new(255.0, 0.0, 0.0);
    const BLACK: Rgb = Rgb::new(0.0, 0.0, 0.0);

    #[test]
    fn endpoints_are_exact() {
        assert_eq!(interpolate(BLACK, RED, 0.0), BLACK);
        assert_eq!(interpolate(BLACK, RED, 1.0), RED);
        assert_eq!(lerp(1.3, 1.0, 1.0), 1.0);
        assert_eq!(lerp(1.3, 1.0, 0.0), 1.3);
    }

    #[test]
    fn midpoint_blends_each_channel() {
        let mid = interpolate(Rgb::from_u8(0, 100, 200), Rgb::from_u8(100, 100, 0), 0.5);
        assert_eq!(mid.to_u8(), (50, 100, 100));
    }

    #[test]
    fn progress_outside_unit_range_is_clamped() {
        assert_eq!(interpolate(BLACK, RED, 1.7), RED);
        assert_eq!(interpolate(BLACK, RED, -0.2), BLACK);
    }

    #[test]
    fn delta_is_signed() {
        assert_eq!(delta(RED, BLACK), (255.0, 0.0, 0.0));
        assert_eq!(delta(BLACK, RED), (-255.0, 0.0, 0.0));
    }

    #[test]
    fn hex_parsing() {
        assert_eq!("#ff0000".parse::<Rgb>(), Ok(RED));
        assert_eq!("800080".parse::<Rgb>().map(Rgb::to_u8), Ok((128, 0, 128)));
        assert!("#ff00".parse::<Rgb>().is_err());
        assert!("#gg0000".parse::<Rgb>().is_err());
        assert_eq!(RED.to_hex(), "#ff0000");
    }
}
