use anyhow::{Context, Result};
use binst::{Binner, Bins, Closed, ValueFile, parse_breaks, write_parquet};
use clap::{Arg, Command};
use itertools::Itertools;
use log::info;
use std::io::Write;
use std::path::Path;
use std::str::FromStr;
use strum::IntoEnumIterator;

fn run(
    input_path: &str,
    breaks: &str,
    closed: Closed,
    output_path: Option<&str>,
    chunk_size: usize,
    out: &mut impl Write,
) -> Result<Bins> {
    if !Path::new(input_path).exists() {
        anyhow::bail!("Input file does not exist: {}", input_path);
    }

    let breaks = parse_breaks(breaks).context("Invalid --breaks")?;
    let binner = Binner::new(&breaks)?.with_closed(closed);

    let values = ValueFile::new(input_path)
        .and_then(|f| f.read_values())
        .with_context(|| format!("Failed to read values from: {}", input_path))?;
    info!("read {} values from {}", values.len(), input_path);

    let bins = binner.assign(&values);
    for ((label, interval), count) in bins.categories().iter().enumerate().zip(bins.counts()) {
        writeln!(out, "{}\t{}\t{}", label, interval, count)?;
    }
    if bins.missing() > 0 {
        writeln!(out, "missing\t{}", bins.missing())?;
    }

    if let Some(output_path) = output_path {
        write_parquet(output_path, &values, &bins, chunk_size)
            .with_context(|| format!("Failed to write Parquet file: {}", output_path))?;
        info!("wrote {}", output_path);
    }
    Ok(bins)
}

fn cli() -> Command {
    let closed_names = Closed::iter().join(", ");
    Command::new("binst")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Bins numeric values into intervals cut by a list of breakpoints")
        .arg(
            Arg::new("input")
                .short('i')
                .long("input")
                .value_name("INPUT_FILE")
                .help("Text file of numbers, optionally .gz, .zst or .zip")
                .required(true),
        )
        .arg(
            Arg::new("breaks")
                .short('b')
                .long("breaks")
                .value_name("LIST")
                .help("Breakpoints as a list, e.g. \"[3, 5, 6, 10]\"")
                .allow_hyphen_values(true)
                .required(true),
        )
        .arg(
            Arg::new("closed")
                .long("closed")
                .value_name("SIDE")
                .help(format!("Inclusive edge of each bin ({})", closed_names))
                .value_parser(|s: &str| Closed::from_str(s))
                .default_value("left"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("OUTPUT_FILE")
                .help("Write values and labels to this Parquet file"),
        )
        .arg(
            Arg::new("chunk_size")
                .long("chunk-size")
                .value_name("SIZE")
                .help("Rows per Parquet record batch (default: 1000)")
                .value_parser(clap::value_parser!(usize))
                .default_value("1000"),
        )
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let matches = cli().get_matches();

    let input_path = matches
        .get_one::<String>("input")
        .context("missing --input")?;
    let breaks = matches
        .get_one::<String>("breaks")
        .context("missing --breaks")?;
    let closed = matches.get_one::<Closed>("closed").copied().unwrap_or_default();
    let output_path = matches.get_one::<String>("output").map(String::as_str);
    let chunk_size = matches.get_one::<usize>("chunk_size").copied().unwrap_or(1000);

    run(
        input_path,
        breaks,
        closed,
        output_path,
        chunk_size,
        &mut std::io::stdout().lock(),
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn values_file() -> NamedTempFile {
        let mut temp_file = NamedTempFile::with_suffix(".txt").unwrap();
        writeln!(temp_file, "0 1 2 3").unwrap();
        writeln!(temp_file, "4 5 6 7").unwrap();
        temp_file.flush().unwrap();
        temp_file
    }

    #[test]
    fn test_run() {
        let input = values_file();
        let output = NamedTempFile::with_suffix(".parquet").unwrap();

        let bins = run(
            input.path().to_str().unwrap(),
            "[3, 5, 6, 10]",
            Closed::Left,
            Some(output.path().to_str().unwrap()),
            4,
            &mut Vec::<u8>::new(),
        )
        .unwrap();

        assert_eq!(bins.counts(), vec![3, 2, 1, 2, 0]);
        assert!(std::fs::metadata(output.path()).unwrap().len() > 0);
    }

    #[test]
    fn test_run_rejects_scalar_breaks() {
        let input = values_file();
        let mut out = Vec::<u8>::new();
        let err = run(input.path().to_str().unwrap(), "3", Closed::Left, None, 1000, &mut out)
            .unwrap_err();
        assert!(format!("{:#}", err).contains("not a list"));
    }

    #[test]
    fn test_run_missing_input() {
        let mut out = Vec::<u8>::new();
        assert!(run("/nonexistent/values.txt", "[]", Closed::Left, None, 1000, &mut out).is_err());
    }

    #[test]
    fn test_run_reports_missing() {
        let mut input = NamedTempFile::with_suffix(".txt").unwrap();
        writeln!(input, "-inf 1 3 NaN").unwrap();
        input.flush().unwrap();

        let mut out = Vec::new();
        let bins = run(input.path().to_str().unwrap(), "[3]", Closed::Right, None, 1000, &mut out)
            .unwrap();
        assert_eq!(bins.missing(), 2);

        let out = String::from_utf8(out).unwrap();
        assert_eq!(out, "0\t(-inf, 3]\t2\n1\t(3, inf]\t0\nmissing\t2\n");
    }

    #[test]
    fn test_cli_closed_flag() {
        let matches = cli()
            .try_get_matches_from(["binst", "-i", "v.txt", "-b", "[1]", "--closed", "right"])
            .unwrap();
        assert_eq!(matches.get_one::<Closed>("closed"), Some(&Closed::Right));

        let matches = cli()
            .try_get_matches_from(["binst", "-i", "v.txt", "-b", "[-1, 2]"])
            .unwrap();
        assert_eq!(matches.get_one::<Closed>("closed"), Some(&Closed::Left));
        assert_eq!(matches.get_one::<String>("breaks").unwrap(), "[-1, 2]");

        let err = cli()
            .try_get_matches_from(["binst", "-i", "v.txt", "-b", "[1]", "--closed", "middle"])
            .unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }
}
