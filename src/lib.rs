//! Byte frequency histograms for content-type detection
//!
//! This library provides the building blocks of a byte-frequency file type detector:
//! - 256-slot byte histogram that ignores formatting whitespace
//! - Count-sorted extraction with byte value tie-break
//! - Training over a directory of sample files with normalization
//! - Magic-number content-type sniffing on the first 512 bytes
//! - Text and JSON reports

pub mod cli;
pub mod error;
pub mod histogram;
pub mod input;
pub mod report;
pub mod sniff;

// Re-export commonly used types
pub use error::{HistogramError, Result};
pub use histogram::{is_format_byte, ByteHistogram, NormalizeReference, ALPHABET_SIZE};
pub use input::read_input;
pub use report::{ContentTypeEntry, HistogramReport, ListOrder, RunReport};
pub use sniff::{detect_content_type, SNIFF_LEN};
