//! CSV batch input
//!
//! Converts a CSV file with `type,url,caption` columns into an ordered list
//! of validated upload jobs. Pure transform: no network, no side effects.
//!
//! Header matching is case-insensitive and tolerates a UTF-8 BOM on the
//! first column name. Rows with an unknown type or an empty URL are dropped
//! silently; a file whose every row is dropped is an error distinct from a
//! file with missing columns.

use crate::error::{IgpError, Result};
use crate::types::{MediaType, UploadJob};
use std::io::Read;
use std::path::Path;

/// Required column names, matched case-insensitively.
const REQUIRED_COLUMNS: [&str; 3] = ["type", "url", "caption"];

/// Parse upload jobs from a CSV file on disk.
pub fn parse_jobs(path: impl AsRef<Path>) -> Result<Vec<UploadJob>> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(IgpError::CsvNotFound(path.display().to_string()));
    }
    let file = std::fs::File::open(path)?;
    parse_jobs_from_reader(file)
}

/// Parse upload jobs from any CSV byte stream.
pub fn parse_jobs_from_reader(reader: impl Read) -> Result<Vec<UploadJob>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let columns = resolve_columns(&headers)?;

    let mut jobs = Vec::new();
    for (row, record) in csv_reader.records().enumerate() {
        let record = record?;
        let Some(job) = row_to_job(&record, &columns, row + 1)? else {
            continue;
        };
        jobs.push(job);
    }

    if jobs.is_empty() {
        return Err(IgpError::EmptyBatch);
    }
    Ok(jobs)
}

/// Positions of the required columns in header order.
struct ColumnIndex {
    media_type: usize,
    url: usize,
    caption: usize,
}

fn resolve_columns(headers: &csv::StringRecord) -> Result<ColumnIndex> {
    let find = |name: &str| {
        headers
            .iter()
            .position(|h| normalize_header(h) == name)
    };

    let mut missing = Vec::new();
    let mut index = [0usize; 3];
    for (slot, name) in REQUIRED_COLUMNS.iter().enumerate() {
        match find(name) {
            Some(pos) => index[slot] = pos,
            None => missing.push(*name),
        }
    }

    if !missing.is_empty() {
        return Err(IgpError::CsvSchema(missing.join(", ")));
    }

    Ok(ColumnIndex {
        media_type: index[0],
        url: index[1],
        caption: index[2],
    })
}

/// Lowercase and strip a leading BOM; the first header of a UTF-8-with-BOM
/// file otherwise never matches.
fn normalize_header(header: &str) -> String {
    header.trim_start_matches('\u{feff}').trim().to_ascii_lowercase()
}

/// Map a row to a job, or `None` when the row should be dropped.
///
/// Only two conditions drop a row silently: an unrecognized media type and
/// an empty URL. A non-empty but malformed URL is a validation error that
/// fails the parse, so a typo never vanishes from the batch accounting.
fn row_to_job(
    record: &csv::StringRecord,
    columns: &ColumnIndex,
    row: usize,
) -> Result<Option<UploadJob>> {
    let raw_type = record.get(columns.media_type).unwrap_or("");
    let url = record.get(columns.url).unwrap_or("").trim();
    let caption = record.get(columns.caption).unwrap_or("").trim();

    let Some(media_type) = MediaType::parse(raw_type) else {
        return Ok(None);
    };
    if url.is_empty() {
        return Ok(None);
    }

    UploadJob::new(media_type, url, caption)
        .map(Some)
        .map_err(|e| IgpError::validation(format!("row {row}: {e}")))
}
