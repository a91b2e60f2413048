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
    (0..n).map(|i| hue_color(i as f32 / n as f32 * 360.0, 0.55)).collect()
}

/// Colour for the `rank`-th word of a cloud: hues cycle with the golden
/// angle so neighbours differ, and rarer words get lighter.
pub fn word_color(rank: usize, total: usize) -> Color32 {
    let hue = (rank as f32 * 137.5) % 360.0;
    let fade = if total > 1 {
        rank as f32 / (total - 1) as f32
    } else {
        0.0
    };
    hue_color(hue, 0.35 + 0.25 * fade)
}

fn hue_color(hue: f32, lightness: f32) -> Color32 {
    let hsl = Hsl::new(hue, 0.75, lightness);
    let rgb: Srgb = hsl.into_color();
    Color32::from_rgb(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_colours_are_distinct() {
        let palette = generate_palette(10);
        assert_eq!(palette.len(), 10);
        for (i, a) in palette.iter().enumerate() {
            assert!(palette[i + 1..].iter().all(|b| a != b));
        }
        assert!(generate_palette(0).is_empty());
    }

    #[test]
    fn word_colours_fade_with_rank() {
        let first = word_color(0, 10);
        let last = word_color(9, 10);
        let luma = |c: Color32| c.r() as u32 + c.g() as u32 + c.b() as u32;
        assert!(luma(last) > luma(first));
        assert_eq!(word_color(0, 1), hue_color(0.0, 0.35));
    }
}
