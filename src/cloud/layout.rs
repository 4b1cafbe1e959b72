//! Word placement.
//!
//! Words are placed largest first. Each word gets a font size derived from
//! its frequency relative to the previous word, a random orientation, and a
//! position drawn uniformly from every spot where its box (plus margin)
//! touches no ink already on the canvas. Only drawn pixels are occupied, so
//! smaller words can sit in the gaps of larger ones. When nothing fits the other
//! orientation is tried, then the font shrinks, and once it falls below the
//! minimum size layout stops.

use image::imageops;
use image::GrayImage;
use rand::Rng;
use std::collections::HashMap;
use tracing::debug;

use crate::cloud::font::GlyphSource;
use crate::config::CloudConfig;

#[derive(Debug, Clone, PartialEq)]
pub struct PlacedWord {
    pub word: String,
    /// Frequency normalised so the most frequent word is 1.0.
    pub frequency: f64,
    pub font_size: u32,
    pub vertical: bool,
    /// Top-left corner of the glyph sprite on the canvas.
    pub x: u32,
    pub y: u32,
    /// Sprite size as drawn (already swapped for vertical words).
    pub width: u32,
    pub height: u32,
}

/// Count the tokens the renderer will draw and normalise by the most
/// frequent one.
///
/// Single-character and purely numeric tokens are skipped, and a plural
/// ending in `s` is folded into its singular when both occur. The result
/// is sorted by descending frequency (ties in first-seen order) and cut to
/// `max_words`.
pub fn word_frequencies<S: AsRef<str>>(tokens: &[S], max_words: usize) -> Vec<(String, f64)> {
    let mut order: Vec<String> = Vec::new();
    let mut counts: HashMap<String, usize> = HashMap::new();

    for token in tokens {
        let token = token.as_ref();
        if token.chars().count() < 2 || token.chars().all(|c| c.is_numeric()) {
            continue;
        }
        let count = counts.entry(token.to_string()).or_insert(0);
        if *count == 0 {
            order.push(token.to_string());
        }
        *count += 1;
    }

    for word in order.clone() {
        if word.ends_with('s') && !word.ends_with("ss") {
            let singular = &word[..word.len() - 1];
            if counts.contains_key(singular) {
                let plural_count = counts.remove(&word).unwrap_or(0);
                if let Some(count) = counts.get_mut(singular) {
                    *count += plural_count;
                }
            }
        }
    }

    let mut words: Vec<(String, usize)> = order.into_iter()
        .filter_map(|word| counts.get(&word).map(|&count| (word, count)))
        .collect();
    words.sort_by(|a, b| b.1.cmp(&a.1));
    words.truncate(max_words);

    let max = words.first().map(|(_, count)| *count).unwrap_or(1) as f64;
    words.into_iter()
        .map(|(word, count)| (word, count as f64 / max))
        .collect()
}

/// Coverage mask of `word` as it is drawn on the canvas.
pub fn sprite(glyphs: &dyn GlyphSource, word: &str, size: u32, vertical: bool) -> GrayImage {
    let sprite = glyphs.render(word, size);
    if vertical { imageops::rotate270(&sprite) } else { sprite }
}

/// Inked canvas pixels with a summed-area table for constant-time box queries.
#[derive(Debug, Clone)]
pub struct OccupancyMap {
    width: u32,
    height: u32,
    occupied: Vec<bool>,
    integral: Vec<u32>,
}

impl OccupancyMap {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            occupied: vec![false; (width * height) as usize],
            integral: vec![0; ((width + 1) * (height + 1)) as usize],
        }
    }

    fn integral_at(&self, x: u32, y: u32) -> u32 {
        self.integral[(y * (self.width + 1) + x) as usize]
    }

    fn box_sum(&self, x: u32, y: u32, w: u32, h: u32) -> u32 {
        self.integral_at(x + w, y + h) + self.integral_at(x, y)
            - self.integral_at(x + w, y)
            - self.integral_at(x, y + h)
    }

    pub fn is_free(&self, x: u32, y: u32, w: u32, h: u32) -> bool {
        x + w <= self.width && y + h <= self.height && self.box_sum(x, y, w, h) == 0
    }

    /// Pick a uniformly random top-left corner where a `w`×`h` box fits.
    pub fn sample_position<R: Rng>(&self, w: u32, h: u32, rng: &mut R) -> Option<(u32, u32)> {
        if w == 0 || h == 0 || w > self.width || h > self.height {
            return None;
        }

        let free = self.free_positions(w, h).count();
        if free == 0 {
            return None;
        }

        let pick = rng.gen_range(0..free);
        self.free_positions(w, h).nth(pick)
    }

    fn free_positions(&self, w: u32, h: u32) -> impl Iterator<Item = (u32, u32)> + '_ {
        (0..=self.height - h)
            .flat_map(move |y| (0..=self.width - w).map(move |x| (x, y)))
            .filter(move |&(x, y)| self.box_sum(x, y, w, h) == 0)
    }

    /// Mark every pixel of `mask` with non-zero coverage, placed with its
    /// top-left corner at (`x`, `y`).
    pub fn occupy_ink(&mut self, x: u32, y: u32, mask: &GrayImage) {
        for (mx, my, coverage) in mask.enumerate_pixels() {
            let (col, row) = (x + mx, y + my);
            if coverage[0] == 0 || col >= self.width || row >= self.height {
                continue;
            }
            self.occupied[(row * self.width + col) as usize] = true;
        }
        self.rebuild_integral();
    }

    fn rebuild_integral(&mut self) {
        let stride = (self.width + 1) as usize;
        for row in 0..self.height as usize {
            let mut row_sum = 0u32;
            for col in 0..self.width as usize {
                row_sum += self.occupied[row * self.width as usize + col] as u32;
                self.integral[(row + 1) * stride + col + 1] = self.integral[row * stride + col + 1] + row_sum;
            }
        }
    }
}

/// Lay out `words` (as produced by [`word_frequencies`]) on the canvas.
pub fn layout<R: Rng>(
    words: &[(String, f64)],
    config: &CloudConfig,
    glyphs: &dyn GlyphSource,
    rng: &mut R,
) -> Vec<PlacedWord> {
    if words.is_empty() || config.width == 0 || config.height == 0 {
        return Vec::new();
    }

    let start_size = match config.max_font_size {
        Some(size) => size,
        None => initial_font_size(words, config, glyphs, rng),
    };

    place_words(words, config, glyphs, rng, start_size)
}

/// Estimate the largest font size by laying out only the two most frequent
/// words at full canvas height and taking the harmonic mean of their sizes.
fn initial_font_size<R: Rng>(
    words: &[(String, f64)],
    config: &CloudConfig,
    glyphs: &dyn GlyphSource,
    rng: &mut R,
) -> u32 {
    if words.len() == 1 {
        return config.height;
    }

    let trial = place_words(&words[..2], config, glyphs, rng, config.height);
    match trial.as_slice() {
        [first, second, ..] => {
            let (a, b) = (first.font_size as u64, second.font_size as u64);
            (2 * a * b / (a + b)) as u32
        }
        [only] => only.font_size,
        [] => config.min_font_size,
    }
}

fn place_words<R: Rng>(
    words: &[(String, f64)],
    config: &CloudConfig,
    glyphs: &dyn GlyphSource,
    rng: &mut R,
    start_size: u32,
) -> Vec<PlacedWord> {
    let mut occupancy = OccupancyMap::new(config.width, config.height);
    let mut placed = Vec::new();
    let mut font_size = start_size as f64;
    let mut last_frequency = 1.0f64;
    let margin = config.margin;
    let step = config.font_step.max(1) as f64;
    let min_size = config.min_font_size.max(1) as f64;

    for (word, frequency) in words {
        if *frequency <= 0.0 {
            continue;
        }

        let scaling = config.relative_scaling;
        if scaling != 0.0 {
            font_size = ((scaling * (frequency / last_frequency) + (1.0 - scaling)) * font_size).round();
        }

        let mut vertical = rng.gen::<f64>() >= config.prefer_horizontal;
        let mut tried_other_orientation = false;
        let mut position = None;

        while font_size >= min_size {
            let (w, h) = oriented_size(glyphs, word, font_size as u32, vertical);
            position = occupancy.sample_position(w + 2 * margin, h + 2 * margin, rng);
            if position.is_some() {
                break;
            }
            if !tried_other_orientation && config.prefer_horizontal < 1.0 {
                vertical = !vertical;
                tried_other_orientation = true;
            } else {
                font_size -= step;
                vertical = false;
            }
        }

        let Some((x, y)) = position else {
            debug!("No room left for '{}', stopping after {} words", word, placed.len());
            break;
        };

        let size = font_size as u32;
        let ink = sprite(glyphs, word, size, vertical);
        let (width, height) = ink.dimensions();
        occupancy.occupy_ink(x + margin, y + margin, &ink);

        placed.push(PlacedWord {
            word: word.clone(),
            frequency: *frequency,
            font_size: size,
            vertical,
            x: x + margin,
            y: y + margin,
            width,
            height,
        });
        last_frequency = *frequency;
    }

    placed
}

fn oriented_size(glyphs: &dyn GlyphSource, word: &str, size: u32, vertical: bool) -> (u32, u32) {
    let (w, h) = glyphs.measure(word, size);
    if vertical { (h, w) } else { (w, h) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cloud::font::BoxGlyphs;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn small_config() -> CloudConfig {
        CloudConfig {
            width: 120,
            height: 60,
            max_words: 50,
            seed: Some(3),
            ..CloudConfig::default()
        }
    }

    fn overlaps(a: &PlacedWord, b: &PlacedWord) -> bool {
        a.x < b.x + b.width && b.x < a.x + a.width && a.y < b.y + b.height && b.y < a.y + a.height
    }

    #[test]
    fn test_word_frequencies_normalised_and_filtered() {
        let tokens = ["cat", "dog", "cat", "a", "2024", "cats", "bird", "dog", "cat"];
        let words = word_frequencies(&tokens, 10);
        let names: Vec<&str> = words.iter().map(|(w, _)| w.as_str()).collect();
        assert_eq!(names, vec!["cat", "dog", "bird"]);
        assert_eq!(words[0].1, 1.0);
        assert_eq!(words[1].1, 0.5);
        assert_eq!(words[2].1, 0.25);
    }

    #[test]
    fn test_word_frequencies_keeps_double_s_words() {
        let tokens = ["glass", "glas", "class"];
        let words = word_frequencies(&tokens, 10);
        assert_eq!(words.len(), 3);
    }

    #[test]
    fn test_word_frequencies_truncates() {
        let tokens = ["aa", "bb", "cc", "dd"];
        assert_eq!(word_frequencies(&tokens, 2).len(), 2);
        assert!(word_frequencies::<&str>(&[], 2).is_empty());
    }

    #[test]
    fn test_occupancy_sampling() {
        let mut map = OccupancyMap::new(10, 4);
        let mut rng = StdRng::seed_from_u64(1);
        assert!(map.sample_position(11, 1, &mut rng).is_none());
        assert!(map.is_free(0, 0, 10, 4));

        map.occupy_ink(0, 0, &GrayImage::from_pixel(10, 3, image::Luma([255])));
        assert!(!map.is_free(0, 0, 1, 1));
        assert!(map.is_free(0, 3, 10, 1));
        assert_eq!(map.sample_position(10, 1, &mut rng), Some((0, 3)));
        assert!(map.sample_position(1, 2, &mut rng).is_none());
    }

    #[test]
    fn test_only_ink_is_occupied() {
        let mut map = OccupancyMap::new(8, 4);
        let mut mask = GrayImage::new(8, 4);
        for y in 0..4 {
            for x in 0..4 {
                mask.put_pixel(x, y, image::Luma([200]));
            }
        }
        map.occupy_ink(0, 0, &mask);

        assert!(!map.is_free(3, 0, 1, 4));
        assert!(map.is_free(4, 0, 4, 4));
        assert_eq!(map.sample_position(4, 4, &mut StdRng::seed_from_u64(2)), Some((4, 0)));
    }

    /// Measures like [`BoxGlyphs`] but draws nothing.
    struct InvisibleGlyphs;

    impl GlyphSource for InvisibleGlyphs {
        fn measure(&self, word: &str, size: u32) -> (u32, u32) {
            BoxGlyphs.measure(word, size)
        }

        fn render(&self, word: &str, size: u32) -> GrayImage {
            let (width, height) = self.measure(word, size);
            GrayImage::new(width, height)
        }
    }

    #[test]
    fn test_empty_sprite_area_stays_free() {
        let config = CloudConfig { max_font_size: Some(40), margin: 0, ..small_config() };
        let words = word_frequencies(&["aaaa", "bbbb", "cccc"], 10);

        // One solid 80x40 word fills most of a 120x60 canvas, so the next
        // words only fit after shrinking.
        let boxed = layout(&words, &config, &BoxGlyphs, &mut StdRng::seed_from_u64(4));
        assert_eq!(boxed[0].font_size, 40);
        assert!(boxed[1..].iter().all(|word| word.font_size < 40));

        let placed = layout(&words, &config, &InvisibleGlyphs, &mut StdRng::seed_from_u64(4));
        assert_eq!(placed.len(), 3);
        assert!(placed.iter().all(|word| word.font_size == 40));
    }

    #[test]
    fn test_layout_places_without_overlap() {
        let config = small_config();
        let tokens: Vec<String> = "alpha alpha alpha beta beta gamma delta epsilon"
            .split_whitespace()
            .map(String::from)
            .collect();
        let words = word_frequencies(&tokens, config.max_words);
        let mut rng = StdRng::seed_from_u64(3);
        let placed = layout(&words, &config, &BoxGlyphs, &mut rng);

        assert!(!placed.is_empty());
        assert_eq!(placed[0].word, "alpha");
        for (i, a) in placed.iter().enumerate() {
            assert!(a.x + a.width <= config.width);
            assert!(a.y + a.height <= config.height);
            assert!(a.font_size >= config.min_font_size);
            for b in &placed[i + 1..] {
                assert!(!overlaps(a, b), "{} overlaps {}", a.word, b.word);
            }
        }
        assert!(placed.windows(2).all(|pair| pair[0].font_size >= pair[1].font_size));
    }

    #[test]
    fn test_layout_is_deterministic_for_a_seed() {
        let config = small_config();
        let words = word_frequencies(&["one", "two", "two", "three"], 10);
        let first = layout(&words, &config, &BoxGlyphs, &mut StdRng::seed_from_u64(9));
        let second = layout(&words, &config, &BoxGlyphs, &mut StdRng::seed_from_u64(9));
        assert_eq!(first, second);
    }

    #[test]
    fn test_layout_respects_max_font_size() {
        let config = CloudConfig { max_font_size: Some(12), ..small_config() };
        let words = word_frequencies(&["solo"], 10);
        let placed = layout(&words, &config, &BoxGlyphs, &mut StdRng::seed_from_u64(0));
        assert_eq!(placed.len(), 1);
        assert_eq!(placed[0].font_size, 12);
    }

    #[test]
    fn test_layout_empty() {
        let config = small_config();
        let placed = layout(&[], &config, &BoxGlyphs, &mut StdRng::seed_from_u64(0));
        assert!(placed.is_empty());
    }
}
