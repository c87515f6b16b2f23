//! `json-fmt`: parse a JSON document and print it in canonical form.
//!
//! Usage:
//!   json-fmt [FILE] [--compact] [--path SEGMENT]...
//!
//! Reads FILE, or standard input when FILE is omitted or `-`.

use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use json_doc_cli::logging;
use tracing::debug;

#[derive(Debug, Parser)]
#[command(name = "json-fmt", version, about, long_about = None)]
struct Args {
    /// JSON file to read.
    input: Option<PathBuf>,

    /// Emit compact output instead of one element per line.
    #[arg(long, env = "JSON_FMT_COMPACT")]
    compact: bool,

    /// Select a node before printing. Repeat to go deeper; numeric segments
    /// index arrays.
    #[arg(long = "path", value_name = "SEGMENT")]
    path: Vec<String>,
}

fn read_input(input: Option<&PathBuf>) -> anyhow::Result<Vec<u8>> {
    match input {
        Some(path) if path.as_os_str() != "-" => std::fs::read(path)
            .with_context(|| format!("failed to read file `{}`", path.display())),
        _ => {
            let mut buf = Vec::new();
            io::stdin()
                .read_to_end(&mut buf)
                .context("failed to read standard input")?;
            Ok(buf)
        }
    }
}

fn main() -> anyhow::Result<()> {
    logging::setup_logging();

    let args = Args::parse();
    debug!(input = ?args.input, compact = args.compact, path = ?args.path);

    let bytes = read_input(args.input.as_ref())?;
    let out = json_doc_cli::format(&bytes, &args.path, !args.compact).with_context(|| {
        match &args.input {
            Some(path) => format!("`{}` is not valid JSON", path.display()),
            None => "standard input is not valid JSON".to_owned(),
        }
    })?;

    let mut stdout = io::stdout().lock();
    stdout.write_all(&out).context("failed to write output")?;
    stdout.flush().context("failed to write output")?;
    Ok(())
}
