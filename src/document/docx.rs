//! WordprocessingML (.docx) paragraph text.
//!
//! Only paragraphs that are direct children of `w:body` are read, in
//! document order, and joined with newlines. Runs contribute `w:t` text,
//! `w:tab` as a tab and `w:br`/`w:cr` as a line break. Tables, text boxes
//! and headers are not part of the body paragraph list.

use quick_xml::events::Event;
use quick_xml::Reader;
use std::io::{Cursor, Read};
use tracing::debug;
use zip::ZipArchive;

use crate::error::Result;

const PACKAGE_RELS: &str = "_rels/.rels";
const DEFAULT_MAIN_PART: &str = "word/document.xml";
const OFFICE_DOCUMENT_REL: &str = "/officeDocument";

pub fn extract_text(bytes: &[u8]) -> Result<String> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;

    let main_part = main_part_name(&mut archive)?;
    debug!("Reading main document part {}", main_part);

    let mut xml = Vec::new();
    archive.by_name(&main_part)?.read_to_end(&mut xml)?;

    Ok(body_paragraphs(&xml)?.join("\n"))
}

/// Resolve the main document part from the package relationships, falling
/// back to `word/document.xml`.
fn main_part_name(archive: &mut ZipArchive<Cursor<&[u8]>>) -> Result<String> {
    let mut rels = Vec::new();
    match archive.by_name(PACKAGE_RELS) {
        Ok(mut file) => {
            file.read_to_end(&mut rels)?;
        }
        Err(_) => return Ok(DEFAULT_MAIN_PART.to_string()),
    }

    let mut reader = Reader::from_reader(&rels[..]);
    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) | Event::Empty(e) if e.local_name().as_ref() == b"Relationship" => {
                let mut rel_type = None;
                let mut target = None;
                for attr in e.attributes().flatten() {
                    let value = attr.unescape_value()?.to_string();
                    match attr.key.local_name().as_ref() {
                        b"Type" => rel_type = Some(value),
                        b"Target" => target = Some(value),
                        _ => {}
                    }
                }
                if let (Some(rel_type), Some(target)) = (rel_type, target) {
                    if rel_type.ends_with(OFFICE_DOCUMENT_REL) {
                        return Ok(target.trim_start_matches('/').to_string());
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(DEFAULT_MAIN_PART.to_string())
}

fn body_paragraphs(xml: &[u8]) -> Result<Vec<String>> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(false);

    let mut buf = Vec::with_capacity(1024);
    let mut path: Vec<Vec<u8>> = Vec::new();
    let mut paragraphs = Vec::new();
    let mut current: Option<String> = None;
    let mut in_text = false;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => {
                let name = e.local_name().as_ref().to_vec();
                if name == b"p" && parent_is(&path, b"body") {
                    current = Some(String::new());
                }
                if name == b"t" && current.is_some() && in_run(&path) {
                    in_text = true;
                }
                path.push(name);
            }
            Event::Empty(e) => {
                let name = e.local_name();
                if name.as_ref() == b"p" && parent_is(&path, b"body") {
                    paragraphs.push(String::new());
                } else if let Some(text) = current.as_mut() {
                    if in_run(&path) {
                        match name.as_ref() {
                            b"tab" => text.push('\t'),
                            b"br" | b"cr" => text.push('\n'),
                            _ => {}
                        }
                    }
                }
            }
            Event::Text(e) if in_text => {
                if let Some(text) = current.as_mut() {
                    text.push_str(&e.unescape()?);
                }
            }
            Event::End(e) => {
                path.pop();
                match e.local_name().as_ref() {
                    b"t" => in_text = false,
                    b"p" if parent_is(&path, b"body") => {
                        if let Some(text) = current.take() {
                            paragraphs.push(text);
                        }
                    }
                    _ => {}
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(paragraphs)
}

fn parent_is(path: &[Vec<u8>], name: &[u8]) -> bool {
    path.last().map(|last| last.as_slice() == name).unwrap_or(false)
}

fn in_run(path: &[Vec<u8>]) -> bool {
    parent_is(path, b"r") && !path.iter().any(|name| name.as_slice() == b"txbxContent")
}
