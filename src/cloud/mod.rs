//! Word-cloud rendering.
//!
//! Takes the stopword-filtered token stream, lays the words out with
//! [`layout::layout`] and paints them onto a fixed-size RGB canvas.

use image::{GrayImage, Rgb, RgbImage};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Instant;
use tracing::{debug, info};

use crate::config::CloudConfig;
use crate::error::Result;

pub mod color;
pub mod font;
pub mod layout;

pub use font::{FontGlyphs, GlyphSource};
pub use layout::PlacedWord;

#[derive(Debug, Clone)]
pub struct CloudRender {
    pub image: RgbImage,
    pub layout: Vec<PlacedWord>,
}

/// Render `tokens` with the configured font. The font is only loaded when
/// there is something to draw.
pub fn render(config: &CloudConfig, tokens: &[String]) -> Result<CloudRender> {
    let words = layout::word_frequencies(tokens, config.max_words);
    if words.is_empty() {
        debug!("Nothing to draw, returning a blank canvas");
        return Ok(CloudRender {
            image: blank_canvas(config),
            layout: Vec::new(),
        });
    }

    let glyphs = FontGlyphs::load(config.font_path.as_deref())?;
    Ok(render_with(config, tokens, &glyphs))
}

pub fn render_with(config: &CloudConfig, tokens: &[String], glyphs: &dyn GlyphSource) -> CloudRender {
    let started = Instant::now();
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let words = layout::word_frequencies(tokens, config.max_words);
    let placed = layout::layout(&words, config, glyphs, &mut rng);

    let mut image = blank_canvas(config);
    for word in &placed {
        let sprite = layout::sprite(glyphs, &word.word, word.font_size, word.vertical);
        let color = color::random_color(&mut rng);
        paint(&mut image, &sprite, word.x, word.y, color);
    }

    info!(
        "Rendered {} of {} words on {}x{} in {:?}",
        placed.len(),
        words.len(),
        config.width,
        config.height,
        started.elapsed()
    );

    CloudRender { image, layout: placed }
}

fn blank_canvas(config: &CloudConfig) -> RgbImage {
    RgbImage::from_pixel(config.width, config.height, Rgb(config.background))
}

/// Blend `color` into `image` using the sprite's coverage as alpha.
fn paint(image: &mut RgbImage, sprite: &GrayImage, x: u32, y: u32, color: Rgb<u8>) {
    for (sx, sy, coverage) in sprite.enumerate_pixels() {
        let alpha = coverage[0] as u32;
        if alpha == 0 {
            continue;
        }
        let (px, py) = (x + sx, y + sy);
        if px >= image.width() || py >= image.height() {
            continue;
        }
        let pixel = image.get_pixel_mut(px, py);
        for channel in 0..3 {
            let under = pixel[channel] as u32;
            let over = color[channel] as u32;
            pixel[channel] = ((over * alpha + under * (255 - alpha)) / 255) as u8;
        }
    }
}
