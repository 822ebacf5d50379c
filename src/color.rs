use std::collections::{BTreeMap, BTreeSet};

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

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
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Color mapping: product line → Color32
// ---------------------------------------------------------------------------

/// Maps each product line to a distinct colour so its bar keeps the same
/// colour as filters change.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl ColorMap {
    /// Build a colour map from the distinct product lines in the dataset.
    pub fn new(product_lines: &BTreeSet<String>) -> Self {
        let palette = generate_palette(product_lines.len());
        let mapping: BTreeMap<String, Color32> = product_lines
            .iter()
            .cloned()
            .zip(palette.into_iter())
            .collect();

        ColorMap {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a product line.
    pub fn color_for(&self, product_line: &str) -> Color32 {
        self.mapping
            .get(product_line)
            .copied()
            .unwrap_or(self.default_color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_size_matches_request() {
        assert!(generate_palette(0).is_empty());
        assert_eq!(generate_palette(6).len(), 6);
    }

    #[test]
    fn distinct_lines_get_distinct_colors() {
        let lines: BTreeSet<String> = ["Food", "Apparel", "Electronics"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let cm = ColorMap::new(&lines);
        let colors: BTreeSet<_> = lines
            .iter()
            .map(|l| {
                let c = cm.color_for(l);
                (c.r(), c.g(), c.b())
            })
            .collect();
        assert_eq!(colors.len(), 3);
    }

    #[test]
    fn unknown_line_falls_back_to_default() {
        let cm = ColorMap::new(&BTreeSet::new());
        assert_eq!(cm.color_for("anything"), Color32::GRAY);
    }
}
