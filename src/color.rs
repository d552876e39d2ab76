use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::ClassificationLabel;

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
// Color mapping: classification label → Color32
// ---------------------------------------------------------------------------

/// Assigns each classification label a distinct colour; rejected rows get
/// the fallback colour.
#[derive(Debug, Clone)]
pub struct LabelColors {
    mapping: BTreeMap<ClassificationLabel, Color32>,
    rejected: Color32,
}

impl Default for LabelColors {
    fn default() -> Self {
        let palette = generate_palette(ClassificationLabel::ALL.len());
        let mapping = ClassificationLabel::ALL
            .into_iter()
            .zip(palette)
            .collect();
        LabelColors {
            mapping,
            rejected: Color32::GRAY,
        }
    }
}

impl LabelColors {
    /// Colour for a label, or the fallback for rejected rows.
    pub fn color_for(&self, label: Option<ClassificationLabel>) -> Color32 {
        label
            .and_then(|l| self.mapping.get(&l).copied())
            .unwrap_or(self.rejected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_is_distinct() {
        let palette = generate_palette(3);
        assert_eq!(palette.len(), 3);
        assert_ne!(palette[0], palette[1]);
        assert_ne!(palette[1], palette[2]);
        assert!(generate_palette(0).is_empty());
    }

    #[test]
    fn test_label_colors() {
        let colors = LabelColors::default();
        assert_eq!(colors.color_for(None), Color32::GRAY);
        assert_ne!(
            colors.color_for(Some(ClassificationLabel::Galaxy)),
            colors.color_for(Some(ClassificationLabel::Star))
        );
        assert_eq!(
            colors.color_for(Some(ClassificationLabel::Quasar)),
            generate_palette(3)[1]
        );
    }
}
