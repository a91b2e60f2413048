//! Word-cloud placement.
//!
//! Words are placed largest first along an Archimedean spiral that starts at
//! the canvas centre; a word lands at the first spiral position where its
//! bounding box stays inside the canvas and clear of every word placed so
//! far. Words that find no spot are dropped. Text measurement is supplied by
//! the caller so the layout does not depend on a live font system.

/// Font size range used for the rarest and the most frequent word.
pub const MIN_FONT_SIZE: f32 = 12.0;
pub const MAX_FONT_SIZE: f32 = 72.0;

const SPIRAL_STEP: f32 = 0.35;
const SPIRAL_GROWTH: f32 = 1.6;
const MAX_SPIRAL_STEPS: usize = 4000;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    fn intersects(&self, other: &Rect) -> bool {
        self.x < other.x + other.width
            && other.x < self.x + self.width
            && self.y < other.y + other.height
            && other.y < self.y + self.height
    }

    fn inside(&self, width: f32, height: f32) -> bool {
        self.x >= 0.0
            && self.y >= 0.0
            && self.x + self.width <= width
            && self.y + self.height <= height
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlacedWord {
    pub text: String,
    pub count: usize,
    pub font_size: f32,
    /// Bounding box, top-left origin, in canvas coordinates.
    pub rect: Rect,
}

/// Linear size between [`MIN_FONT_SIZE`] and [`MAX_FONT_SIZE`] by relative
/// frequency.
pub fn font_size(count: usize, min_count: usize, max_count: usize) -> f32 {
    if max_count <= min_count {
        return MAX_FONT_SIZE;
    }
    let t = (count - min_count) as f32 / (max_count - min_count) as f32;
    MIN_FONT_SIZE + t * (MAX_FONT_SIZE - MIN_FONT_SIZE)
}

/// Lay out `words` (most frequent first) on a `width × height` canvas.
///
/// `measure(text, font_size)` returns the rendered `[width, height]`.
pub fn layout<F>(
    words: &[(String, usize)],
    width: f32,
    height: f32,
    mut measure: F,
) -> Vec<PlacedWord>
where
    F: FnMut(&str, f32) -> [f32; 2],
{
    let Some(max_count) = words.iter().map(|(_, c)| *c).max() else {
        return Vec::new();
    };
    let min_count = words.iter().map(|(_, c)| *c).min().unwrap_or(max_count);

    let centre = (width / 2.0, height / 2.0);
    let mut placed: Vec<PlacedWord> = Vec::with_capacity(words.len());

    for (text, count) in words {
        let size = font_size(*count, min_count, max_count);
        let [w, h] = measure(text, size);
        if w > width || h > height {
            continue;
        }

        let spot = (0..MAX_SPIRAL_STEPS).find_map(|step| {
            let theta = step as f32 * SPIRAL_STEP;
            let r = SPIRAL_GROWTH * theta;
            let rect = Rect {
                x: centre.0 + r * theta.cos() - w / 2.0,
                y: centre.1 + r * theta.sin() - h / 2.0,
                width: w,
                height: h,
            };
            let free = rect.inside(width, height)
                && placed.iter().all(|p| !p.rect.intersects(&rect));
            free.then_some(rect)
        });

        match spot {
            Some(rect) => placed.push(PlacedWord {
                text: text.clone(),
                count: *count,
                font_size: size,
                rect,
            }),
            None => log::trace!("No room for {text:?} in word cloud"),
        }
    }
    placed
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Monospace metrics: each char is `size` wide, one line is `size` tall.
    fn mono(text: &str, size: f32) -> [f32; 2] {
        [text.chars().count() as f32 * size, size]
    }

    fn words(entries: &[(&str, usize)]) -> Vec<(String, usize)> {
        entries.iter().map(|(t, c)| (t.to_string(), *c)).collect()
    }

    #[test]
    fn sizes_scale_with_frequency() {
        assert_eq!(font_size(10, 1, 10), MAX_FONT_SIZE);
        assert_eq!(font_size(1, 1, 10), MIN_FONT_SIZE);
        assert_eq!(font_size(3, 3, 3), MAX_FONT_SIZE);
        let mid = font_size(5, 0, 10);
        assert!(mid > MIN_FONT_SIZE && mid < MAX_FONT_SIZE);
    }

    #[test]
    fn first_word_is_centred() {
        let placed = layout(&words(&[("程式設計", 5)]), 800.0, 600.0, mono);
        assert_eq!(placed.len(), 1);
        let r = placed[0].rect;
        assert!((r.x + r.width / 2.0 - 400.0).abs() < 1e-3);
        assert!((r.y + r.height / 2.0 - 300.0).abs() < 1e-3);
    }

    #[test]
    fn placed_words_do_not_overlap_and_stay_inside() {
        let entries: Vec<(String, usize)> = (0..40).map(|i| (format!("詞{i}"), 40 - i)).collect();
        let placed = layout(&entries, 800.0, 600.0, mono);

        assert!(!placed.is_empty());
        for (i, a) in placed.iter().enumerate() {
            assert!(a.rect.inside(800.0, 600.0));
            for b in &placed[i + 1..] {
                assert!(!a.rect.intersects(&b.rect), "{} overlaps {}", a.text, b.text);
            }
        }
    }

    #[test]
    fn oversized_words_are_dropped() {
        let placed = layout(&words(&[("非常非常非常長的詞語", 1)]), 100.0, 100.0, mono);
        assert!(placed.is_empty());
        assert!(layout(&[], 100.0, 100.0, mono).is_empty());
    }
}
