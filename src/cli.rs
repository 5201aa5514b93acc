use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::error::{HistogramError, Result};
use crate::histogram::NormalizeReference;
use crate::report::ListOrder;

/// Byte Histogram - byte frequency profiles for content-type detection
#[derive(Parser, Debug, Clone)]
#[command(name = "byte-histogram")]
#[command(version = "0.1.0")]
#[command(about = "Byte frequency histogram for content-type detection", long_about = None)]
pub struct Args {
    /// Files to accumulate into a single histogram
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Train a separate histogram over every file of this directory
    #[arg(long = "train", value_name = "DIR")]
    pub train: Option<PathBuf>,

    /// Order of the printed entries
    #[arg(long = "order", value_enum, default_value_t = OrderArg::Natural)]
    pub order: OrderArg,

    /// Normalize counts after accumulation (training always normalizes)
    #[arg(long = "normalize", value_enum)]
    pub normalize: Option<NormalizeArg>,

    /// Print JSON reports instead of text lines
    #[arg(long = "json")]
    pub json: bool,

    /// Print the detected content type of every input file
    #[arg(long = "sniff")]
    pub sniff: bool,

    /// Enable debug logging
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderArg {
    Natural,
    Asc,
    Desc,
}

impl From<OrderArg> for ListOrder {
    fn from(order: OrderArg) -> Self {
        match order {
            OrderArg::Natural => ListOrder::Natural,
            OrderArg::Asc => ListOrder::Ascending,
            OrderArg::Desc => ListOrder::Descending,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum NormalizeArg {
    /// Divide by the count of byte 0x00
    FirstSlot,
    /// Divide by the largest count
    Max,
}

impl From<NormalizeArg> for NormalizeReference {
    fn from(arg: NormalizeArg) -> Self {
        match arg {
            NormalizeArg::FirstSlot => NormalizeReference::FirstSlot,
            NormalizeArg::Max => NormalizeReference::Maximum,
        }
    }
}

impl Args {
    /// Validate the arguments
    pub fn validate(&self) -> Result<()> {
        if self.files.is_empty() && self.train.is_none() {
            return Err(HistogramError::InvalidArgument(
                "nothing to do, give at least one FILE or --train DIR".to_string(),
            ));
        }

        if self.sniff && self.files.is_empty() {
            return Err(HistogramError::InvalidArgument(
                "--sniff requires at least one FILE".to_string(),
            ));
        }

        if self.files.iter().any(|f| f.as_os_str().is_empty()) {
            return Err(HistogramError::InvalidArgument(
                "empty file path in arguments".to_string(),
            ));
        }

        Ok(())
    }

    /// Normalization used when training
    pub fn train_reference(&self) -> NormalizeReference {
        self.normalize.map(Into::into).unwrap_or_default()
    }

    /// Default log filter for env_logger when RUST_LOG is unset
    pub fn log_filter(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else {
            "warn"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_args() -> Args {
        Args {
            files: vec![PathBuf::from("sample.json")],
            train: None,
            order: OrderArg::Natural,
            normalize: None,
            json: false,
            sniff: false,
            verbose: false,
        }
    }

    #[test]
    fn test_args_validation() {
        assert!(base_args().validate().is_ok());

        let args = Args {
            files: vec![],
            train: Some(PathBuf::from("testdata")),
            ..base_args()
        };
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_nothing_to_do() {
        let args = Args {
            files: vec![],
            ..base_args()
        };
        assert!(matches!(
            args.validate(),
            Err(HistogramError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_empty_file_path() {
        let args = Args {
            files: vec![PathBuf::from("a.txt"), PathBuf::new()],
            ..base_args()
        };
        let err = args.validate().unwrap_err();
        assert!(err.to_string().starts_with("Invalid argument:"));
    }

    #[test]
    fn test_sniff_requires_files() {
        let args = Args {
            files: vec![],
            train: Some(PathBuf::from("testdata")),
            sniff: true,
            ..base_args()
        };
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_parse_flags() {
        let args = Args::try_parse_from([
            "byte-histogram",
            "--order",
            "desc",
            "--normalize",
            "max",
            "--train",
            "samples",
            "a.txt",
            "b.txt",
        ])
        .unwrap();

        assert_eq!(args.files.len(), 2);
        assert_eq!(ListOrder::from(args.order), ListOrder::Descending);
        assert_eq!(args.train_reference(), NormalizeReference::Maximum);
        assert_eq!(args.log_filter(), "warn");
    }

    #[test]
    fn test_train_reference_defaults_to_first_slot() {
        assert_eq!(
            base_args().train_reference(),
            NormalizeReference::FirstSlot
        );
    }
}
