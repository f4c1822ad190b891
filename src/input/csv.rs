use anyhow::{Context, Result};
use serde_json::Value;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

use crate::core::{MalformedDataError, RawRecord, SampleStore};

const LIGHT_COLUMNS: &[&str] = &["greenlight", "green_light", "light", "active"];
const QUEUE_COLUMNS: &[&str] = &["queues", "queue", "queue_lengths"];

/// Load recorded intersection states from a CSV file
///
/// Expected columns (case-insensitive, aliases accepted):
/// - GreenLight: active approach, 1..=4
/// - Queues: list literal with four queue lengths, e.g. "[3, 2, 0, 1]"
///
/// The load is all-or-nothing: the first bad row fails it.
pub fn load_csv(path: &Path) -> Result<SampleStore> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;
    let store = load_csv_from_reader(file)
        .with_context(|| format!("Failed to load samples from {}", path.display()))?;

    info!("Loaded {} samples from {}", store.len(), path.display());
    Ok(store)
}

/// Load samples from any CSV source
pub fn load_csv_from_reader<R: Read>(reader: R) -> Result<SampleStore> {
    let mut rdr = csv::Reader::from_reader(reader);

    let headers = rdr.headers()?;
    let (light_idx, queue_idx) = detect_columns(headers)?;
    debug!("Using columns light={} queues={}", light_idx, queue_idx);

    let mut records = Vec::new();
    for result in rdr.records() {
        let index = records.len();
        let row = result.with_context(|| format!("Failed to read CSV row {}", index))?;

        let light_cell = row.get(light_idx).unwrap_or("").trim();
        let green_light = light_cell.parse::<i64>().map_err(|_| MalformedDataError::Record {
            index,
            reason: format!("green light {:?} is not an integer", light_cell),
        })?;

        let queue_cell = row.get(queue_idx).unwrap_or("");
        let queues = parse_queue_list(queue_cell)
            .map_err(|reason| MalformedDataError::Record { index, reason })?;

        records.push(RawRecord::new(green_light, queues));
    }

    Ok(SampleStore::load(records)?)
}

/// Parse a textual list of integers such as "[3, 2, 0, 1]" or "(3, 2, 0, 1)"
pub fn parse_queue_list(text: &str) -> std::result::Result<Vec<i64>, String> {
    let text = text.trim();
    let normalized = match text.strip_prefix('(').and_then(|t| t.strip_suffix(')')) {
        Some(inner) => format!("[{}]", inner.trim().trim_end_matches(',')),
        None => text.to_string(),
    };

    let values: Vec<Value> = serde_json::from_str(&normalized)
        .map_err(|e| format!("queue list {:?} is not a list: {}", text, e))?;

    values
        .iter()
        .map(|v| {
            v.as_i64()
                .ok_or_else(|| format!("queue entry {} is not an integer", v))
        })
        .collect()
}

/// Detect column indices from CSV headers
fn detect_columns(headers: &csv::StringRecord) -> Result<(usize, usize)> {
    let light_idx = find_column(headers, LIGHT_COLUMNS)?;
    let queue_idx = find_column(headers, QUEUE_COLUMNS)?;

    Ok((light_idx, queue_idx))
}

/// Find a column by checking possible names
fn find_column(headers: &csv::StringRecord, names: &[&str]) -> Result<usize> {
    for (idx, header) in headers.iter().enumerate() {
        let header_lower = header.trim().to_lowercase();
        if names.iter().any(|&name| header_lower == name) {
            return Ok(idx);
        }
    }

    anyhow::bail!("Could not find column with names: {:?}", names)
}
