//! Text measuring and rasterising for the cloud.

use fontdue::{Font, FontSettings};
use image::{GrayImage, Luma};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::error::{Result, StudioError};

/// Font files tried first, in order, when no font is configured.
const PREFERRED_FONTS: &[&str] = &[
    "DejaVuSans.ttf",
    "LiberationSans-Regular.ttf",
    "NotoSans-Regular.ttf",
    "FreeSans.ttf",
    "Arial.ttf",
    "arial.ttf",
    "Verdana.ttf",
    "Roboto-Regular.ttf",
];

/// Source of word sprites. `render` must produce an image of exactly the
/// size `measure` reports.
pub trait GlyphSource {
    fn measure(&self, word: &str, size: u32) -> (u32, u32);
    /// Coverage mask of `word` at `size` pixels (0 = empty, 255 = ink).
    fn render(&self, word: &str, size: u32) -> GrayImage;
}

pub struct FontGlyphs {
    font: Font,
}

impl std::fmt::Debug for FontGlyphs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontGlyphs").field("font", &"<fontdue::Font>").finish()
    }
}

impl FontGlyphs {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let font = Font::from_bytes(bytes, FontSettings::default())
            .map_err(|e| StudioError::FontError(e.to_string()))?;
        Ok(Self { font })
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let bytes = fs::read(path)?;
        info!("Using font {}", path.display());
        Self::from_bytes(&bytes)
    }

    /// Configured font if given, otherwise the first system font found.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_path(path),
            None => {
                let path = discover_system_font().ok_or_else(|| {
                    StudioError::FontError("no usable system font found, set cloud.font_path".to_string())
                })?;
                Self::from_path(&path)
            }
        }
    }

    fn ascent_descent(&self, size: u32) -> (f32, f32) {
        match self.font.horizontal_line_metrics(size as f32) {
            Some(metrics) => (metrics.ascent, metrics.descent),
            None => (size as f32 * 0.8, -(size as f32) * 0.2),
        }
    }
}

impl GlyphSource for FontGlyphs {
    fn measure(&self, word: &str, size: u32) -> (u32, u32) {
        let px = size as f32;
        let width: f32 = word.chars().map(|ch| self.font.metrics(ch, px).advance_width).sum();
        let (ascent, descent) = self.ascent_descent(size);
        (width.ceil().max(1.0) as u32, (ascent - descent).ceil().max(1.0) as u32)
    }

    fn render(&self, word: &str, size: u32) -> GrayImage {
        let px = size as f32;
        let (width, height) = self.measure(word, size);
        let (ascent, _) = self.ascent_descent(size);
        let baseline = ascent.ceil() as i32;

        let mut sprite = GrayImage::new(width, height);
        let mut pen_x = 0.0f32;

        for ch in word.chars() {
            let (metrics, coverage) = self.font.rasterize(ch, px);
            let left = pen_x.round() as i32 + metrics.xmin;
            let top = baseline - (metrics.height as i32 + metrics.ymin);

            for row in 0..metrics.height {
                for col in 0..metrics.width {
                    let x = left + col as i32;
                    let y = top + row as i32;
                    if x < 0 || y < 0 || x >= width as i32 || y >= height as i32 {
                        continue;
                    }
                    let value = coverage[row * metrics.width + col];
                    let pixel = sprite.get_pixel_mut(x as u32, y as u32);
                    if value > pixel[0] {
                        *pixel = Luma([value]);
                    }
                }
            }
            pen_x += metrics.advance_width;
        }

        sprite
    }
}

fn font_dirs() -> Vec<PathBuf> {
    let mut roots = vec![
        PathBuf::from("/usr/share/fonts"),
        PathBuf::from("/usr/local/share/fonts"),
        PathBuf::from("/Library/Fonts"),
        PathBuf::from("/System/Library/Fonts"),
        PathBuf::from("C:\\Windows\\Fonts"),
    ];
    if let Some(home) = dirs::home_dir() {
        roots.push(home.join(".fonts"));
        roots.push(home.join(".local/share/fonts"));
        roots.push(home.join("Library/Fonts"));
    }
    roots
}

/// Look for a sans-serif TrueType/OpenType font in the usual system
/// locations. Preferred faces win; otherwise any `.ttf`/`.otf` will do.
pub fn discover_system_font() -> Option<PathBuf> {
    let mut candidates: Vec<PathBuf> = Vec::new();

    for dir in font_dirs().into_iter().filter(|dir| dir.is_dir()) {
        for entry in WalkDir::new(&dir).follow_links(true).into_iter().flatten() {
            let path = entry.path();
            let is_font = path.extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| ext.eq_ignore_ascii_case("ttf") || ext.eq_ignore_ascii_case("otf"))
                .unwrap_or(false);
            if is_font {
                candidates.push(path.to_path_buf());
            }
        }
    }

    for preferred in PREFERRED_FONTS {
        if let Some(path) = candidates.iter().find(|path| path.file_name().map(|name| name == *preferred).unwrap_or(false)) {
            debug!("Discovered preferred font {}", path.display());
            return Some(path.clone());
        }
    }

    candidates.sort();
    candidates.into_iter().next()
}

/// Fixed-advance boxes, for layout tests that must not depend on the fonts
/// installed on the machine.
#[cfg(test)]
pub(crate) struct BoxGlyphs;

#[cfg(test)]
impl GlyphSource for BoxGlyphs {
    fn measure(&self, word: &str, size: u32) -> (u32, u32) {
        let advance = (size / 2).max(1);
        (advance * word.chars().count().max(1) as u32, size.max(1))
    }

    fn render(&self, word: &str, size: u32) -> GrayImage {
        let (width, height) = self.measure(word, size);
        GrayImage::from_pixel(width, height, Luma([255]))
    }
}
