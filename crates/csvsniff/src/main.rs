mod args;
mod output;

use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use args::Arguments;
use clap::Parser;
use csvsniff_core::infer_schema_with_options;
use csvsniff_error::{Result, ResultExt};
use tracing::{debug, info};

const STDIN_PATH: &str = "-";

/// Guess column types for csv files.
fn main() {
    let args = Arguments::parse();
    logutil::configure_global_logger(args.log_level, args.log_format, io::stderr);

    // Nested result. Outer result for the panic, inner is whether every input
    // succeeded.
    let result = std::panic::catch_unwind(|| inner(&args));

    match result {
        Ok(Err(err)) => {
            eprintln!("ERROR: {err}");
            std::process::exit(1);
        }
        Ok(Ok(false)) => std::process::exit(1),
        Ok(Ok(true)) => (),
        Err(err) => {
            eprintln!("PANIC: {err:?}");
            std::process::exit(2);
        }
    }
}

fn inner(args: &Arguments) -> Result<bool> {
    let options = args.sniff_options();
    options.validate()?;

    let stdin_only = [PathBuf::from(STDIN_PATH)];
    let paths = if args.files.is_empty() {
        &stdin_only[..]
    } else {
        &args.files[..]
    };

    let mut stdout = BufWriter::new(io::stdout());
    let mut all_ok = true;

    for path in paths {
        let name = display_name(path);

        let result = read_input(path).and_then(|input| {
            debug!(path = %name, bytes = input.len(), "read input");
            infer_schema_with_options(&input, options)
        });

        let guess = match result {
            Ok(guess) => guess,
            Err(err) => {
                // Failure for one input doesn't stop the others.
                eprintln!("ERROR: {name}: {err}");
                all_ok = false;
                continue;
            }
        };

        info!(
            path = %name,
            columns = guess.columns.len(),
            records_sampled = guess.records_sampled,
            "inferred schema",
        );

        if paths.len() > 1 && args.mode == args::OutputMode::Table {
            writeln!(stdout, "{name}")?;
        }
        output::write_guess(&mut stdout, args.mode, args.details, &guess)?;
        stdout.flush()?;
    }

    Ok(all_ok)
}

fn display_name(path: &Path) -> String {
    if path.as_os_str() == STDIN_PATH {
        "<stdin>".to_string()
    } else {
        path.display().to_string()
    }
}

fn read_input(path: &Path) -> Result<Vec<u8>> {
    if path.as_os_str() == STDIN_PATH {
        let mut buf = Vec::new();
        io::stdin()
            .lock()
            .read_to_end(&mut buf)
            .context("Failed to read stdin")?;
        return Ok(buf);
    }

    std::fs::read(path).context_fn(|| format!("Failed to read '{}'", path.display()))
}
