//! Byte frequency histogram
//!
//! Counts how often every byte value occurs across the processed buffers:
//! - 256 fixed slots, one per byte value
//! - Formatting whitespace (space, tab, CR, LF) is never counted
//! - Sorted extraction by count with byte value as tie-break
//! - Training over a directory of sample files followed by normalization

use std::cmp::Ordering;
use std::fmt;
use std::fs;
use std::path::Path;

use log::{debug, info, warn};

use crate::error::{HistogramError, Result};

/// Number of distinct symbols tracked (single-byte alphabet)
pub const ALPHABET_SIZE: usize = 256;

/// Count used as the divisor when normalizing a histogram
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NormalizeReference {
    /// Count of byte value 0. Training normalizes this way.
    #[default]
    FirstSlot,
    /// Largest count in the histogram, so the most frequent byte ends at 1
    Maximum,
}

impl fmt::Display for NormalizeReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NormalizeReference::FirstSlot => write!(f, "byte 0x00"),
            NormalizeReference::Maximum => write!(f, "maximum"),
        }
    }
}

/// Returns true for the formatting bytes excluded from counting
#[inline]
pub fn is_format_byte(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\r' | b'\n')
}

#[derive(Debug, Clone, Copy)]
struct ByteCountPair {
    byte: u8,
    count: u64,
}

impl ByteCountPair {
    /// Orders by count in the requested direction, then by byte value ascending.
    fn compare(&self, other: &Self, ascending: bool) -> Ordering {
        let by_count = if ascending {
            self.count.cmp(&other.count)
        } else {
            other.count.cmp(&self.count)
        };
        by_count.then(self.byte.cmp(&other.byte))
    }
}

/// Occurrence count for every byte value, plus the raw number of bytes seen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ByteHistogram {
    counts: [u64; ALPHABET_SIZE],
    data_size: u64,
}

impl Default for ByteHistogram {
    fn default() -> Self {
        Self {
            counts: [0; ALPHABET_SIZE],
            data_size: 0,
        }
    }
}

impl ByteHistogram {
    /// Create an empty histogram with every count at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a histogram from a single buffer
    pub fn from_bytes(data: &[u8]) -> Self {
        let mut histogram = Self::new();
        histogram.update(data);
        histogram
    }

    /// Count every non-whitespace byte of `buffer`.
    ///
    /// `data_size` grows by the full buffer length, whitespace included.
    pub fn update(&mut self, buffer: &[u8]) {
        for &byte in buffer {
            if !is_format_byte(byte) {
                self.counts[byte as usize] += 1;
            }
        }
        self.data_size += buffer.len() as u64;
    }

    /// Fold the counts of another histogram into this one.
    ///
    /// Lets callers keep one histogram per worker and combine them afterwards.
    pub fn merge(&mut self, other: &ByteHistogram) {
        for (mine, theirs) in self.counts.iter_mut().zip(other.counts.iter()) {
            *mine = mine.saturating_add(*theirs);
        }
        self.data_size = self.data_size.saturating_add(other.data_size);
    }

    #[inline]
    pub fn count(&self, byte: u8) -> u64 {
        self.counts[byte as usize]
    }

    pub fn counts(&self) -> &[u64; ALPHABET_SIZE] {
        &self.counts
    }

    /// Total bytes passed to `update`, including skipped whitespace
    pub fn data_size(&self) -> u64 {
        self.data_size
    }

    /// Sum of all counts
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// True while no byte has been counted
    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&count| count == 0)
    }

    /// Largest count over all byte values, 0 for an empty histogram
    pub fn max_count(&self) -> u64 {
        self.counts.iter().copied().max().unwrap_or(0)
    }

    /// Bytes seen at least once, in ascending byte order, with their counts
    pub fn byte_list(&self) -> (Vec<u8>, Vec<u64>) {
        self.pairs().map(|pair| (pair.byte, pair.count)).unzip()
    }

    /// Same entries as [`byte_list`](Self::byte_list), ordered by count.
    ///
    /// Equal counts are ordered by ascending byte value in both directions.
    pub fn sorted_byte_list(&self, ascending: bool) -> (Vec<u8>, Vec<u64>) {
        let mut pairs: Vec<ByteCountPair> = self.pairs().collect();
        pairs.sort_unstable_by(|a, b| a.compare(b, ascending));
        pairs.into_iter().map(|pair| (pair.byte, pair.count)).unzip()
    }

    fn pairs(&self) -> impl Iterator<Item = ByteCountPair> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|&(_, &count)| count > 0)
            .map(|(byte, &count)| ByteCountPair {
                byte: byte as u8,
                count,
            })
    }

    /// Divide every nonzero count by the count of byte value 0.
    ///
    /// Byte 0 rarely occurs in text samples, so this fails with
    /// [`HistogramError::ZeroReference`] unless the corpus contains NUL bytes.
    /// Use [`normalize_by`](Self::normalize_by) with
    /// [`NormalizeReference::Maximum`] to scale by the top frequency instead.
    pub fn normalize(&mut self) -> Result<()> {
        self.normalize_by(NormalizeReference::FirstSlot)
    }

    /// Divide every nonzero count by the chosen reference count (truncating).
    ///
    /// The histogram is left untouched when the reference count is zero.
    pub fn normalize_by(&mut self, reference: NormalizeReference) -> Result<()> {
        let top = match reference {
            NormalizeReference::FirstSlot => self.counts[0],
            NormalizeReference::Maximum => self.max_count(),
        };

        if top == 0 {
            warn!("Normalization skipped: {} count is zero", reference);
            return Err(HistogramError::ZeroReference { reference });
        }

        for count in self.counts.iter_mut().filter(|count| **count != 0) {
            *count /= top;
        }
        Ok(())
    }

    /// Accumulate every file in `dir` and normalize by byte value 0
    pub fn train<P: AsRef<Path>>(&mut self, dir: P) -> Result<()> {
        self.train_with(dir, NormalizeReference::FirstSlot)
    }

    /// Accumulate every regular entry of `dir` (non-recursive), then normalize.
    ///
    /// Entries are visited in file name order and subdirectories are skipped.
    /// The first listing or read failure aborts training; counts gathered
    /// before the failure stay in the histogram.
    pub fn train_with<P: AsRef<Path>>(
        &mut self,
        dir: P,
        reference: NormalizeReference,
    ) -> Result<()> {
        let dir = dir.as_ref();
        let list_error = |source: std::io::Error| HistogramError::ReadDir {
            path: dir.to_path_buf(),
            source,
        };

        let mut entries = fs::read_dir(dir)
            .map_err(list_error)?
            .collect::<std::io::Result<Vec<_>>>()
            .map_err(list_error)?;
        entries.sort_by_key(|entry| entry.file_name());

        let mut files = 0usize;
        for entry in entries {
            let path = entry.path();
            if entry.file_type().map_err(list_error)?.is_dir() {
                debug!("Skipping directory {}", path.display());
                continue;
            }

            let content = fs::read(&path).map_err(|source| HistogramError::ReadFile {
                path: path.clone(),
                source,
            })?;
            debug!("Sample {} ({} bytes)", path.display(), content.len());
            self.update(&content);
            files += 1;
        }

        info!(
            "Trained on {} files from {} ({} bytes)",
            files,
            dir.display(),
            self.data_size
        );
        self.normalize_by(reference)
    }
}

impl fmt::Display for ByteHistogram {
    /// Leading newline, then `<char> - <count>` per line, most frequent first.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        let (bytes, counts) = self.sorted_byte_list(false);
        for (&byte, count) in bytes.iter().zip(&counts) {
            writeln!(f, "{} - {}", char::from(byte), count)?;
        }
        Ok(())
    }
}
