use eframe::egui::Color32;
use palette::{Hsl, IntoColor, LinSrgb, Mix, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.65, 0.55);
            let rgb: Srgb = hsl.into_color();
            to_color32(rgb)
        })
        .collect()
}

fn to_color32(rgb: Srgb) -> Color32 {
    let rgb: Srgb<u8> = rgb.into_format();
    Color32::from_rgb(rgb.red, rgb.green, rgb.blue)
}

fn linear(r: u8, g: u8, b: u8) -> LinSrgb {
    Srgb::new(r, g, b).into_format::<f32>().into_linear()
}

// ---------------------------------------------------------------------------
// Diverging scale: value → Color32 (red → yellow → green)
// ---------------------------------------------------------------------------

/// Continuous red-yellow-green scale over `[min, max]`, low values red.
#[derive(Debug, Clone, Copy)]
pub struct DivergingScale {
    pub min: f64,
    pub max: f64,
    low: LinSrgb,
    mid: LinSrgb,
    high: LinSrgb,
}

impl DivergingScale {
    pub fn red_yellow_green(min: f64, max: f64) -> Self {
        DivergingScale {
            min,
            max,
            low: linear(165, 0, 38),
            mid: linear(255, 255, 191),
            high: linear(0, 104, 55),
        }
    }

    /// Build a scale spanning the given values. `None` for no values.
    pub fn spanning(values: impl IntoIterator<Item = f64>) -> Option<Self> {
        let mut bounds: Option<(f64, f64)> = None;
        for v in values {
            bounds = Some(match bounds {
                Some((lo, hi)) => (lo.min(v), hi.max(v)),
                None => (v, v),
            });
        }
        bounds.map(|(lo, hi)| Self::red_yellow_green(lo, hi))
    }

    /// Position of `value` in `[0, 1]`. A degenerate range sits at the midpoint.
    pub fn position(&self, value: f64) -> f32 {
        let range = self.max - self.min;
        if range.abs() < f64::EPSILON {
            return 0.5;
        }
        ((value - self.min) / range).clamp(0.0, 1.0) as f32
    }

    pub fn color_for(&self, value: f64) -> Color32 {
        let t = self.position(value);
        let lin = if t < 0.5 {
            self.low.mix(self.mid, t * 2.0)
        } else {
            self.mid.mix(self.high, (t - 0.5) * 2.0)
        };
        to_color32(Srgb::from_linear(lin))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_size_and_distinct() {
        assert!(generate_palette(0).is_empty());
        let p = generate_palette(4);
        assert_eq!(p.len(), 4);
        for i in 0..p.len() {
            for j in (i + 1)..p.len() {
                assert_ne!(p[i], p[j]);
            }
        }
    }

    #[test]
    fn test_scale_endpoints() {
        let scale = DivergingScale::red_yellow_green(10.0, 20.0);
        assert_eq!(scale.color_for(10.0), Color32::from_rgb(165, 0, 38));
        assert_eq!(scale.color_for(20.0), Color32::from_rgb(0, 104, 55));
        assert_eq!(scale.color_for(15.0), Color32::from_rgb(255, 255, 191));
        // Out of range values clamp.
        assert_eq!(scale.color_for(-5.0), scale.color_for(10.0));
    }

    #[test]
    fn test_scale_degenerate_range() {
        let scale = DivergingScale::spanning([42.0, 42.0]).unwrap();
        assert_eq!(scale.position(42.0), 0.5);
        assert!(DivergingScale::spanning(std::iter::empty::<f64>()).is_none());
    }
}
