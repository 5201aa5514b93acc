//! Rendering of histogram snapshots
//!
//! A [`HistogramReport`] freezes the nonzero entries of a histogram in a
//! chosen order and renders them either as `<char> - <count>` text lines or
//! as pretty-printed JSON. A [`RunReport`] bundles every section printed by
//! one command-line run into a single JSON document.

use serde::Serialize;
use std::path::Path;

use crate::error::{HistogramError, Result};
use crate::histogram::ByteHistogram;

/// Order of the entries in a report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ListOrder {
    /// Ascending byte value
    #[default]
    Natural,
    /// Ascending count, ties by byte value
    Ascending,
    /// Descending count, ties by byte value
    Descending,
}

/// Nonzero entries of a histogram as parallel lists
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistogramReport {
    pub order: ListOrder,
    pub bytes: Vec<u8>,
    pub counts: Vec<u64>,
    /// Raw bytes processed, whitespace included
    pub data_size: u64,
}

impl HistogramReport {
    pub fn new(histogram: &ByteHistogram, order: ListOrder) -> Self {
        let (bytes, counts) = match order {
            ListOrder::Natural => histogram.byte_list(),
            ListOrder::Ascending => histogram.sorted_byte_list(true),
            ListOrder::Descending => histogram.sorted_byte_list(false),
        };

        Self {
            order,
            bytes,
            counts,
            data_size: histogram.data_size(),
        }
    }

    pub fn natural(histogram: &ByteHistogram) -> Self {
        Self::new(histogram, ListOrder::Natural)
    }

    pub fn sorted(histogram: &ByteHistogram, ascending: bool) -> Self {
        let order = if ascending {
            ListOrder::Ascending
        } else {
            ListOrder::Descending
        };
        Self::new(histogram, order)
    }

    /// One `<char> - <count>` line per entry
    pub fn to_text(&self) -> String {
        self.bytes
            .iter()
            .zip(&self.counts)
            .map(|(&byte, count)| format!("{} - {}\n", char::from(byte), count))
            .collect()
    }

    pub fn to_json(&self) -> Result<String> {
        to_pretty_json(self)
    }
}

/// Detected content type of one input file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentTypeEntry {
    pub path: String,
    pub content_type: &'static str,
}

impl ContentTypeEntry {
    pub fn new(path: &Path, content_type: &'static str) -> Self {
        Self {
            path: path.display().to_string(),
            content_type,
        }
    }
}

/// Everything one run prints, as a single JSON object
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub train: Option<HistogramReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub files: Option<HistogramReport>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub content_types: Vec<ContentTypeEntry>,
}

impl RunReport {
    pub fn to_json(&self) -> Result<String> {
        to_pretty_json(self)
    }
}

fn to_pretty_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value)
        .map_err(|err| HistogramError::Serialize(err.to_string()))
}
