//! Downloadable artifacts: the encoded cloud image and the frequency CSV.

use image::{DynamicImage, ImageFormat, RgbImage};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::info;

use crate::analysis::FrequencyTable;
use crate::error::{Result, StudioError};

pub const CSV_FILE_NAME: &str = "word_count.csv";
pub const CSV_CONTENT_TYPE: &str = "text/csv";
pub const IMAGE_FILE_STEM: &str = "wordcloud";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Png,
    Jpeg,
    Webp,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 3] = [OutputFormat::Png, OutputFormat::Jpeg, OutputFormat::Webp];

    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Jpeg => "jpeg",
            OutputFormat::Webp => "webp",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            OutputFormat::Png => "image/png",
            OutputFormat::Jpeg => "image/jpeg",
            OutputFormat::Webp => "image/webp",
        }
    }

    pub fn image_format(&self) -> ImageFormat {
        match self {
            OutputFormat::Png => ImageFormat::Png,
            OutputFormat::Jpeg => ImageFormat::Jpeg,
            OutputFormat::Webp => ImageFormat::WebP,
        }
    }

    /// The next format in selector order, wrapping around.
    pub fn next(&self) -> Self {
        match self {
            OutputFormat::Png => OutputFormat::Jpeg,
            OutputFormat::Jpeg => OutputFormat::Webp,
            OutputFormat::Webp => OutputFormat::Png,
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for OutputFormat {
    type Err = StudioError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "png" => Ok(OutputFormat::Png),
            "jpeg" | "jpg" => Ok(OutputFormat::Jpeg),
            "webp" => Ok(OutputFormat::Webp),
            _ => Err(StudioError::UnknownFormat(s.to_string())),
        }
    }
}

/// A file offered to the user: name, content type and bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl Download {
    /// Write the download into `dir`, creating it if needed.
    pub fn save(&self, dir: &Path) -> Result<PathBuf> {
        fs::create_dir_all(dir)?;
        let path = dir.join(&self.file_name);
        fs::write(&path, &self.bytes)?;
        info!("Saved {} ({}, {} bytes)", path.display(), self.content_type, self.bytes.len());
        Ok(path)
    }
}

pub fn encode_image(image: &RgbImage, format: OutputFormat) -> Result<Download> {
    let mut cursor = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(image.clone()).write_to(&mut cursor, format.image_format())?;

    Ok(Download {
        file_name: format!("{}.{}", IMAGE_FILE_STEM, format.extension()),
        content_type: format.content_type().to_string(),
        bytes: cursor.into_inner(),
    })
}

/// `Word,Count` CSV of the table, one row per word in table order.
pub fn frequency_csv(table: &FrequencyTable) -> Result<Download> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer.write_record(["Word", "Count"])?;
    for entry in table.iter() {
        writer.serialize(entry)?;
    }
    let bytes = writer.into_inner().map_err(|e| StudioError::IoError(e.into_error()))?;

    Ok(Download {
        file_name: CSV_FILE_NAME.to_string(),
        content_type: CSV_CONTENT_TYPE.to_string(),
        bytes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn test_csv_example() {
        let tokens = ["cat", "dog", "cat", "bird", "dog", "cat"];
        let table = FrequencyTable::from_tokens(&tokens);
        let download = frequency_csv(&table).unwrap();

        assert_eq!(download.file_name, "word_count.csv");
        assert_eq!(download.content_type, "text/csv");
        assert_eq!(
            String::from_utf8(download.bytes).unwrap(),
            "Word,Count\ncat,3\ndog,2\nbird,1\n"
        );
    }

    #[test]
    fn test_csv_empty_table_has_header_only() {
        let download = frequency_csv(&FrequencyTable::default()).unwrap();
        assert_eq!(String::from_utf8(download.bytes).unwrap(), "Word,Count\n");
    }

    #[test]
    fn test_csv_quotes_when_needed() {
        let table = FrequencyTable::from_tokens(&["a,b"]);
        let download = frequency_csv(&table).unwrap();
        assert_eq!(String::from_utf8(download.bytes).unwrap(), "Word,Count\n\"a,b\",1\n");
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!("PNG".parse::<OutputFormat>().unwrap(), OutputFormat::Png);
        assert_eq!("jpg".parse::<OutputFormat>().unwrap(), OutputFormat::Jpeg);
        assert_eq!("webp".parse::<OutputFormat>().unwrap(), OutputFormat::Webp);
        assert!("gif".parse::<OutputFormat>().is_err());
        assert_eq!(OutputFormat::Webp.next(), OutputFormat::Png);
    }

    #[test]
    fn test_encode_each_format() {
        let image = RgbImage::from_pixel(16, 8, Rgb([255, 255, 255]));
        for format in OutputFormat::ALL {
            let download = encode_image(&image, format).unwrap();
            assert_eq!(download.file_name, format!("wordcloud.{}", format.extension()));
            assert_eq!(download.content_type, format!("image/{}", format.extension()));

            let decoded = image::load_from_memory_with_format(&download.bytes, format.image_format()).unwrap();
            assert_eq!((decoded.width(), decoded.height()), (16, 8));
        }
    }

    #[test]
    fn test_save_creates_dir() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("out");
        let download = Download {
            file_name: "x.csv".to_string(),
            content_type: "text/csv".to_string(),
            bytes: b"Word,Count\n".to_vec(),
        };
        let path = download.save(&nested).unwrap();
        assert_eq!(fs::read(path).unwrap(), b"Word,Count\n");
    }
}
