//! Request-scoped context: one uploaded document and the user's settings.
//!
//! Every action recomputes from the held document. Nothing derived from a
//! previous action is reused.

use image::RgbImage;
use tracing::info;

use crate::analysis::{analyze, Analysis};
use crate::cloud::{self, PlacedWord};
use crate::config::{CloudConfig, Settings};
use crate::document::{self, Document, FileDetails};
use crate::error::Result;
use crate::export::{self, Download};
use crate::stopwords::StopwordSet;

#[derive(Debug, Clone)]
pub struct Session {
    pub document: Document,
    pub settings: Settings,
}

/// Result of the "generate cloud" action.
#[derive(Debug, Clone)]
pub struct CloudOutput {
    pub image: RgbImage,
    pub layout: Vec<PlacedWord>,
    pub download: Download,
}

impl Session {
    pub fn new(document: Document, settings: Settings) -> Self {
        Self { document, settings }
    }

    pub fn details(&self) -> FileDetails {
        self.document.details()
    }

    pub fn text(&self) -> Result<String> {
        document::extract(&self.document)
    }

    pub fn preview(&self) -> Result<String> {
        Ok(document::preview(&self.text()?))
    }

    pub fn stopwords(&self) -> StopwordSet {
        StopwordSet::combined(
            self.settings.use_standard_stopwords,
            &self.settings.additional_stopwords,
        )
    }

    pub fn analysis(&self) -> Result<Analysis> {
        Ok(self.analyze_text(&self.text()?))
    }

    /// Analyze already extracted document text against the current stopwords.
    pub fn analyze_text(&self, text: &str) -> Analysis {
        analyze(text, &self.stopwords())
    }

    pub fn generate_cloud(&self, config: &CloudConfig) -> Result<CloudOutput> {
        let analysis = self.analysis()?;
        let render = cloud::render(config, &analysis.filtered_tokens)?;
        let download = export::encode_image(&render.image, self.settings.format)?;

        info!(
            "Generated {} for {} ({} words drawn)",
            download.file_name,
            self.document.name,
            render.layout.len()
        );

        Ok(CloudOutput {
            image: render.image,
            layout: render.layout,
            download,
        })
    }

    pub fn frequency_csv(&self) -> Result<Download> {
        export::frequency_csv(&self.analysis()?.frequencies)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::MIME_PLAIN_TEXT;
    use crate::export::OutputFormat;

    fn session(text: &str) -> Session {
        let document = Document::new("pets.txt", MIME_PLAIN_TEXT, text.as_bytes().to_vec());
        Session::new(document, Settings::default())
    }

    #[test]
    fn test_stopwords_follow_settings() {
        let mut session = session("the cat");
        assert!(session.stopwords().contains("the"));

        session.settings.use_standard_stopwords = false;
        session.settings.toggle_stopword("cat");
        let stopwords = session.stopwords();
        assert!(!stopwords.contains("the"));
        assert!(stopwords.contains("cat"));
    }

    #[test]
    fn test_excluding_a_word_leaves_table_alone() {
        let mut session = session("cat dog cat bird dog cat");
        let before = session.analysis().unwrap();

        session.settings.toggle_stopword("dog");
        let after = session.analysis().unwrap();

        assert_eq!(before.frequencies, after.frequencies);
        assert_eq!(after.filtered_tokens, vec!["cat", "cat", "bird", "cat"]);
    }

    #[test]
    fn test_csv_download() {
        let session = session("cat dog cat bird dog cat");
        let csv = session.frequency_csv().unwrap();
        assert_eq!(String::from_utf8(csv.bytes).unwrap(), "Word,Count\ncat,3\ndog,2\nbird,1\n");
    }

    #[test]
    fn test_generate_cloud_for_empty_document() {
        let mut session = session("");
        session.settings.format = OutputFormat::Jpeg;
        let config = CloudConfig { width: 40, height: 20, ..CloudConfig::default() };

        let output = session.generate_cloud(&config).unwrap();
        assert_eq!(output.image.dimensions(), (40, 20));
        assert!(output.layout.is_empty());
        assert_eq!(output.download.file_name, "wordcloud.jpeg");
        assert_eq!(output.download.content_type, "image/jpeg");
    }

    #[test]
    fn test_unsupported_document_is_empty() {
        let document = Document::new("cat.png", "image/png", vec![1, 2, 3]);
        let session = Session::new(document, Settings::default());
        assert_eq!(session.text().unwrap(), "");
        assert!(session.analysis().unwrap().suggestions.is_empty());
        assert_eq!(session.preview().unwrap(), "");
    }
}
