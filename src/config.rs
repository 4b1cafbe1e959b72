//! Configuration file (`wordcloud.yml`) and per-document user settings.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::Result;
use crate::export::OutputFormat;

pub const DEFAULT_CONFIG_PATH: &str = "./wordcloud.yml";

pub const RESOLUTION_MIN: u8 = 1;
pub const RESOLUTION_MAX: u8 = 100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StudioConfig {
    /// Where generated images and CSV files are saved.
    pub output_dir: PathBuf,
    pub log_dir: PathBuf,
    pub cloud: CloudConfig,
    /// Initial values of the user controls.
    pub defaults: Settings,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            log_dir: PathBuf::from("./logs"),
            cloud: CloudConfig::default(),
            defaults: Settings::default(),
        }
    }
}

impl StudioConfig {
    /// Load the config file. An explicitly named file must exist; the
    /// default path is optional and falls back to built-in defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (path, required) = match path {
            Some(path) => (path.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_PATH), false),
        };

        if !required && !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)?;
        let config = Self::from_yaml(&content)?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        let mut config: Self = serde_yaml::from_str(content)?;
        config.defaults.set_resolution(config.defaults.resolution);
        Ok(config)
    }
}

/// Layout parameters of the rendered cloud.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CloudConfig {
    pub width: u32,
    pub height: u32,
    pub background: [u8; 3],
    pub max_words: usize,
    pub min_font_size: u32,
    /// Largest font size tried for the most frequent word. Derived from the
    /// canvas height when absent.
    pub max_font_size: Option<u32>,
    pub font_step: u32,
    /// Probability that a word is laid out horizontally.
    pub prefer_horizontal: f64,
    /// How strongly font size follows frequency (0 = rank only, 1 = linear).
    pub relative_scaling: f64,
    /// Padding in pixels kept around every word.
    pub margin: u32,
    /// Fixed RNG seed for reproducible layouts.
    pub seed: Option<u64>,
    /// TrueType/OpenType font to draw with. A system sans-serif font is
    /// used when absent.
    pub font_path: Option<PathBuf>,
}

impl Default for CloudConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 400,
            background: [255, 255, 255],
            max_words: 200,
            min_font_size: 4,
            max_font_size: None,
            font_step: 1,
            prefer_horizontal: 0.9,
            relative_scaling: 0.5,
            margin: 2,
            seed: None,
            font_path: None,
        }
    }
}

/// User controls for one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub use_standard_stopwords: bool,
    /// Collected and displayed but not consumed by the renderer.
    pub resolution: u8,
    pub additional_stopwords: Vec<String>,
    pub format: OutputFormat,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            use_standard_stopwords: true,
            resolution: 50,
            additional_stopwords: Vec::new(),
            format: OutputFormat::Png,
        }
    }
}

impl Settings {
    pub fn set_resolution(&mut self, resolution: u8) {
        self.resolution = resolution.clamp(RESOLUTION_MIN, RESOLUTION_MAX);
    }

    pub fn increase_resolution(&mut self) {
        self.set_resolution(self.resolution.saturating_add(1));
    }

    pub fn decrease_resolution(&mut self) {
        self.set_resolution(self.resolution.saturating_sub(1));
    }

    /// Add `word` to the additional stopwords, or remove it if present.
    /// Returns whether the word is now excluded.
    pub fn toggle_stopword(&mut self, word: &str) -> bool {
        if let Some(pos) = self.additional_stopwords.iter().position(|w| w == word) {
            self.additional_stopwords.remove(pos);
            false
        } else {
            self.additional_stopwords.push(word.to_string());
            true
        }
    }

    pub fn is_excluded(&self, word: &str) -> bool {
        self.additional_stopwords.iter().any(|w| w == word)
    }
}
