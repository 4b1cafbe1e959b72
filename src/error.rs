use thiserror::Error;
use zip::result::ZipError;

#[derive(Error, Debug)]
pub enum StudioError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("PDF error: {0}")]
    PdfError(String),

    #[error("Zip error: {0}")]
    ZipError(#[from] ZipError),

    #[error("XML error: {0}")]
    XmlError(#[from] quick_xml::Error),

    #[error("Document is not valid UTF-8: {0}")]
    Utf8Error(#[from] std::string::FromUtf8Error),

    #[error("Image error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    ConfigError(#[from] serde_yaml::Error),

    #[error("Font error: {0}")]
    FontError(String),

    #[error("Unknown output format: {0}")]
    UnknownFormat(String),
}

impl From<pdf_extract::OutputError> for StudioError {
    fn from(error: pdf_extract::OutputError) -> Self {
        StudioError::PdfError(error.to_string())
    }
}

pub type Result<T> = std::result::Result<T, StudioError>;
