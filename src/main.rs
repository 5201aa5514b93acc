use anyhow::Context;
use byte_histogram::cli::Args;
use byte_histogram::{detect_content_type, read_input, ByteHistogram, ContentTypeEntry};
use byte_histogram::{HistogramReport, ListOrder, RunReport};
use clap::Parser;
use log::debug;
use std::io::Write;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    let env = env_logger::Env::default().default_filter_or(args.log_filter());
    env_logger::Builder::from_env(env).init();

    let stdout = std::io::stdout();
    if let Err(e) = run(&args, &mut stdout.lock()) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args, out: &mut impl Write) -> anyhow::Result<()> {
    args.validate()?;

    let order = ListOrder::from(args.order);
    let mut report = RunReport::default();

    if let Some(dir) = &args.train {
        let mut trained = ByteHistogram::new();
        trained
            .train_with(dir, args.train_reference())
            .with_context(|| format!("Training on {} failed", dir.display()))?;
        report.train = Some(HistogramReport::new(&trained, order));
    }

    if !args.files.is_empty() {
        let mut histogram = ByteHistogram::new();
        for path in &args.files {
            let content = read_input(path)?;
            debug!("Input {} ({} bytes)", path.display(), content.len());
            histogram.update(&content);

            if args.sniff {
                let content_type = detect_content_type(&content);
                report.content_types.push(ContentTypeEntry::new(path, content_type));
            }
        }

        if let Some(reference) = args.normalize {
            histogram.normalize_by(reference.into())?;
        }
        report.files = Some(HistogramReport::new(&histogram, order));
    }

    if args.json {
        writeln!(out, "{}", report.to_json()?)?;
    } else {
        write_text(&report, args, out)?;
    }
    Ok(())
}

fn write_text(report: &RunReport, args: &Args, out: &mut impl Write) -> anyhow::Result<()> {
    let labelled = report.train.is_some() && report.files.is_some();

    if let (Some(train), Some(dir)) = (&report.train, &args.train) {
        if labelled {
            writeln!(out, "[train {}]", dir.display())?;
        }
        out.write_all(train.to_text().as_bytes())?;
    }

    if let Some(files) = &report.files {
        if labelled {
            writeln!(out, "[files]")?;
        }
        out.write_all(files.to_text().as_bytes())?;
    }

    for entry in &report.content_types {
        writeln!(out, "{}: {}", entry.path, entry.content_type)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use byte_histogram::{HistogramError, NormalizeReference};
    use std::fs;
    use std::path::{Path, PathBuf};

    fn parse(argv: &[&str]) -> Args {
        let mut full = vec!["byte-histogram"];
        full.extend_from_slice(argv);
        Args::try_parse_from(full).unwrap()
    }

    fn run_to_string(args: &Args) -> anyhow::Result<String> {
        let mut out = Vec::new();
        run(args, &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    fn write_file(dir: &Path, name: &str, content: &[u8]) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    fn path_str(path: &Path) -> &str {
        path.to_str().unwrap()
    }

    #[test]
    fn test_single_file_natural_order() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_file(dir.path(), "input.txt", b"zz y\n");

        let output = run_to_string(&parse(&[path_str(&input)])).unwrap();
        assert_eq!(output, "y - 1\nz - 2\n");
    }

    #[test]
    fn test_train_and_files_are_labelled() {
        let samples = tempfile::tempdir().unwrap();
        write_file(samples.path(), "sample.bin", b"\x00\x00aab");
        let inputs = tempfile::tempdir().unwrap();
        let input = write_file(inputs.path(), "input.txt", b"zz y");

        let args = parse(&["--train", path_str(samples.path()), path_str(&input)]);
        let output = run_to_string(&args).unwrap();

        let expected = format!(
            "[train {}]\n\u{0} - 1\na - 1\n[files]\ny - 1\nz - 2\n",
            samples.path().display()
        );
        assert_eq!(output, expected);
    }

    #[test]
    fn test_sniff_lines_follow_histogram() {
        let dir = tempfile::tempdir().unwrap();
        let page = write_file(dir.path(), "page.html", b"<html>ok</html>");
        let blob = write_file(dir.path(), "blob.bin", b"%PDF-1.4");

        let args = parse(&[
            "--sniff",
            "--order",
            "desc",
            path_str(&page),
            path_str(&blob),
        ]);
        let output = run_to_string(&args).unwrap();

        let lines: Vec<&str> = output.lines().collect();
        let tail = &lines[lines.len() - 2..];
        assert_eq!(
            tail[0],
            format!("{}: text/html; charset=utf-8", page.display())
        );
        assert_eq!(tail[1], format!("{}: application/pdf", blob.display()));
        assert_eq!(lines[0], "< - 2");
    }

    #[test]
    fn test_normalize_first_slot_fails_on_text() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_file(dir.path(), "input.txt", b"xxxxy");

        let args = parse(&["--normalize", "first-slot", path_str(&input)]);
        let err = run_to_string(&args).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<HistogramError>(),
            Some(HistogramError::ZeroReference {
                reference: NormalizeReference::FirstSlot
            })
        ));
    }

    #[test]
    fn test_normalize_max_on_files() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_file(dir.path(), "input.txt", b"xxxxy");

        let args = parse(&["--normalize", "max", path_str(&input)]);
        assert_eq!(run_to_string(&args).unwrap(), "x - 1\n");
    }

    #[test]
    fn test_json_output_is_one_document() {
        let samples = tempfile::tempdir().unwrap();
        write_file(samples.path(), "sample.bin", b"\x00ab");
        let inputs = tempfile::tempdir().unwrap();
        let input = write_file(inputs.path(), "input.txt", b"aab");

        let args = parse(&[
            "--json",
            "--sniff",
            "--train",
            path_str(samples.path()),
            path_str(&input),
        ]);
        let output = run_to_string(&args).unwrap();

        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["train"]["bytes"], serde_json::json!([0, 97, 98]));
        assert_eq!(value["files"]["counts"], serde_json::json!([2, 1]));
        assert_eq!(
            value["content_types"][0]["content_type"],
            "text/plain; charset=utf-8"
        );
    }

    #[test]
    fn test_missing_input_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.txt");

        let err = run_to_string(&parse(&[path_str(&missing)])).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<HistogramError>(),
            Some(HistogramError::FileNotFound(_))
        ));
    }

    #[test]
    fn test_invalid_arguments_are_rejected() {
        let err = run_to_string(&parse(&[])).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<HistogramError>(),
            Some(HistogramError::InvalidArgument(_))
        ));
    }
}
