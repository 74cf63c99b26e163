// CSV load/save

use std::path::Path;

use log::{info, warn};

use tabula_engine::document::Document;

use crate::codec::{format_record, parse_record, split_records};
use crate::encoding::{decode_bytes, SourceEncoding};
use crate::error::IoError;

/// A successfully loaded file: the document plus what the status line
/// reports about how it was read.
#[derive(Debug)]
pub struct LoadedFile {
    pub document: Document,
    pub encoding: SourceEncoding,
    /// True when `limit` cut body rows off, i.e. this is a preview.
    pub truncated: bool,
}

/// Reads and parses a CSV file into a fresh document.
///
/// The first record becomes the header row; every body record is fitted
/// to its width. `limit` caps how many body rows are kept. A file that
/// is empty or all blank lines loads as an empty document, not an
/// error; decoding problems and unreadable paths are errors and leave
/// no partial result behind.
pub fn load_path(path: &Path, limit: Option<usize>) -> Result<LoadedFile, IoError> {
    let bytes = std::fs::read(path).map_err(|e| IoError::Read(e.to_string()))?;
    let (text, encoding) = decode_bytes(&bytes)?;
    if encoding == SourceEncoding::Windows1252 {
        warn!("{}: not valid UTF-8, decoded as Windows-1252", path.display());
    }

    let mut records = split_records(&text);
    let mut document = Document::new();
    if records.is_empty() {
        info!("loaded {}: empty file ({})", path.display(), encoding);
        return Ok(LoadedFile {
            document,
            encoding,
            truncated: false,
        });
    }

    let headers = parse_record(&records[0]);
    let mut body_records = records.split_off(1);
    let mut truncated = false;
    if let Some(limit) = limit {
        if body_records.len() > limit {
            body_records.truncate(limit);
            truncated = true;
        }
    }
    let body = body_records
        .iter()
        .map(|record| parse_record(record))
        .collect();
    document.load(headers, body);

    info!(
        "loaded {}: {} columns, {} rows ({}{})",
        path.display(),
        document.column_count(),
        document.row_count(),
        encoding,
        if truncated { ", preview" } else { "" }
    );
    Ok(LoadedFile {
        document,
        encoding,
        truncated,
    })
}

/// The document as CSV text: header record first, one record per line,
/// trailing newline included.
pub fn document_text(document: &Document) -> String {
    let mut output = String::new();
    output.push_str(&format_record(document.headers()));
    output.push('\n');
    for row in document.rows() {
        output.push_str(&format_record(row));
        output.push('\n');
    }
    output
}

/// Serializes the document and writes it as UTF-8.
///
/// The write goes to a sibling temp file which is renamed over `path`,
/// so a failed save leaves whatever was at `path` untouched.
pub fn save_path(document: &Document, path: &Path) -> Result<(), IoError> {
    let temp = path.with_extension("csv.tmp");
    std::fs::write(&temp, document_text(document)).map_err(|e| IoError::Write(e.to_string()))?;
    if let Err(e) = std::fs::rename(&temp, path) {
        let _ = std::fs::remove_file(&temp);
        return Err(IoError::Write(e.to_string()));
    }
    info!(
        "saved {}: {} columns, {} rows",
        path.display(),
        document.column_count(),
        document.row_count()
    );
    Ok(())
}
