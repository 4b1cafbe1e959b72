use std::any::Any;
use std::panic;
use tracing::{debug, warn};

use crate::error::{Result, StudioError};

/// Crates on the PDF text path that may panic on malformed input.
const PARSER_CRATES: &[&str] = &[
    "pdf-extract",
    "lopdf",
    "adobe-cmap-parser",
    "type1-encoding-parser",
    "cff-parser",
];

/// Concatenate the text of every page in order. Pages without extractable
/// text contribute nothing.
///
/// pdf-extract panics on some parseable but malformed files; those panics
/// are caught here and returned as [`StudioError::PdfError`].
pub fn extract_text(bytes: &[u8]) -> Result<String> {
    let pages = panic::catch_unwind(|| pdf_extract::extract_text_from_mem_by_pages(bytes))
        .map_err(|payload| StudioError::PdfError(panic_message(payload.as_ref())))??;
    debug!("PDF has {} pages", pages.len());

    Ok(join_pages(pages))
}

fn join_pages(pages: Vec<String>) -> String {
    let mut text = String::with_capacity(pages.iter().map(String::len).sum());
    for page in pages {
        text.push_str(&page);
    }
    text
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    let detail = payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown cause".to_string());
    format!("PDF parser failed: {}", detail)
}

fn is_parser_location(file: &str) -> bool {
    PARSER_CRATES.iter().any(|name| file.contains(name))
}

/// Keep panics raised inside the PDF parser out of the installed hook. They
/// are logged and then caught by [`extract_text`]; every other panic goes
/// to the previous hook unchanged. Install after the terminal hook so the
/// screen is not restored for a recoverable parser failure.
pub fn install_parser_panic_filter() {
    let previous = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        let from_parser = info
            .location()
            .map(|location| is_parser_location(location.file()))
            .unwrap_or(false);
        if from_parser {
            warn!("PDF parser panicked: {}", info);
            return;
        }
        previous(info);
    }));
}
