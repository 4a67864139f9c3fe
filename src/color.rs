use eframe::egui::Color32;
use palette::{LinSrgb, Mix, Srgb};

// ---------------------------------------------------------------------------
// Fixed colours
// ---------------------------------------------------------------------------

/// Fill used by every bar chart and the age histogram.
pub const BAR_COLOR: Color32 = Color32::from_rgb(0xFF, 0x69, 0x69);

/// Background of the metric cards and the country explanation box.
pub const PANEL_FILL: Color32 = Color32::from_rgb(0xFF, 0xCB, 0xCB);

// ---------------------------------------------------------------------------
// Sequential colour scale: value in [0, 1] → Color32
// ---------------------------------------------------------------------------

/// Piecewise-linear colour scale, interpolated in linear RGB.
#[derive(Debug, Clone)]
pub struct ColorScale {
    stops: Vec<(f32, LinSrgb)>,
}

impl ColorScale {
    /// Build from `(position, rgb)` stops sorted by position.
    pub fn new(stops: &[(f32, [u8; 3])]) -> Self {
        let stops: Vec<(f32, LinSrgb)> = stops
            .iter()
            .map(|&(pos, [r, g, b])| (pos, Srgb::new(r, g, b).into_format::<f32>().into_linear()))
            .collect();
        ColorScale { stops }
    }

    /// Lightest to darkest pink, used for the country map.
    pub fn pink() -> Self {
        ColorScale::new(&[
            (0.0, [0xFF, 0xE5, 0xE5]),
            (0.2, [0xFF, 0xC2, 0xC2]),
            (0.4, [0xFF, 0xA0, 0xA0]),
            (0.6, [0xFF, 0x7D, 0x7D]),
            (0.8, [0xFF, 0x5A, 0x5A]),
            (1.0, [0xFF, 0x37, 0x37]),
        ])
    }

    /// Colour at position `t`, clamped to the scale's ends.
    pub fn color_at(&self, t: f32) -> Color32 {
        let (Some(first), Some(last)) = (self.stops.first(), self.stops.last()) else {
            return Color32::GRAY;
        };
        let t = if t.is_nan() { 0.0 } else { t };

        let lin = if t <= first.0 {
            first.1
        } else if t >= last.0 {
            last.1
        } else {
            self.stops
                .windows(2)
                .find(|w| t >= w[0].0 && t <= w[1].0)
                .map(|w| {
                    let span = w[1].0 - w[0].0;
                    let local = if span > 0.0 { (t - w[0].0) / span } else { 0.0 };
                    w[0].1.mix(w[1].1, local)
                })
                .unwrap_or(last.1)
        };

        let rgb: Srgb<u8> = Srgb::<f32>::from_linear(lin).into_format();
        Color32::from_rgb(rgb.red, rgb.green, rgb.blue)
    }

    /// Colour for `value` normalised over `[min, max]`.
    pub fn color_for(&self, value: f64, min: f64, max: f64) -> Color32 {
        let range = max - min;
        let t = if range.abs() < f64::EPSILON {
            1.0
        } else {
            (value - min) / range
        };
        self.color_at(t as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ends_of_pink_scale() {
        let scale = ColorScale::pink();
        assert_eq!(scale.color_at(0.0), Color32::from_rgb(0xFF, 0xE5, 0xE5));
        assert_eq!(scale.color_at(1.0), Color32::from_rgb(0xFF, 0x37, 0x37));
        assert_eq!(scale.color_at(-3.0), scale.color_at(0.0));
        assert_eq!(scale.color_at(7.0), scale.color_at(1.0));
    }

    #[test]
    fn intermediate_values_darken_monotonically() {
        let scale = ColorScale::pink();
        let greens: Vec<u8> = (0..=10).map(|i| scale.color_at(i as f32 / 10.0).g()).collect();
        assert!(greens.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn single_value_range_uses_darkest() {
        let scale = ColorScale::pink();
        assert_eq!(scale.color_for(5.0, 5.0, 5.0), scale.color_at(1.0));
    }
}
