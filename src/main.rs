use std::{
    fs,
    path::{Path, PathBuf},
    process::ExitCode,
};

use clap::Parser;
use texcalc::{Config, document::DEFAULT_ENVIRONMENT, process_document};
use tracing::warn;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// texcalc evaluates the computations embedded in a LaTeX document and
/// writes their results back into it.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// The document to process.
    input: PathBuf,

    /// Where to write the result. Defaults to rewriting the input in place.
    output: Option<PathBuf>,

    /// The LaTeX environment that delimits code regions.
    #[arg(short, long, default_value = DEFAULT_ENVIRONMENT)]
    environment: String,

    /// Run every phase but write nothing.
    #[arg(long)]
    check: bool,
}

fn main() -> ExitCode {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "texcalc=info".into());
    tracing_subscriber::registry().with(filter)
                                  .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                                  .init();

    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{message}");
            ExitCode::FAILURE
        },
    }
}

fn run(args: &Args) -> Result<(), String> {
    let name = args.input.display().to_string();
    let text = fs::read_to_string(&args.input).map_err(|e| format!("{name}: failed to read the input file: {e}"))?;

    let output = process_document(&name, &text, &Config::new(&args.environment)).map_err(|e| e.to_string())?;
    if args.check {
        return Ok(());
    }

    match &args.output {
        Some(path) if path != &args.input => {
            fs::write(path, output).map_err(|e| format!("{}: failed to write: {e}", path.display()))
        },
        _ => write_in_place(&args.input, &output),
    }
}

/// Replaces `path` through a sibling `_<name>` file that is renamed over it.
fn write_in_place(path: &Path, contents: &str) -> Result<(), String> {
    let file_name = path.file_name()
                        .map(|n| format!("_{}", n.to_string_lossy()))
                        .ok_or_else(|| format!("{}: not a file", path.display()))?;
    let temporary = path.with_file_name(file_name);

    let result = fs::write(&temporary, contents).and_then(|()| fs::rename(&temporary, path));
    if let Err(e) = result {
        if let Err(cleanup) = fs::remove_file(&temporary) {
            warn!(file = %temporary.display(), error = %cleanup, "failed to remove temporary file");
        }
        return Err(format!("{}: failed to write: {e}", path.display()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_write_reports_the_target() {
        let path = std::env::temp_dir().join("texcalc-missing-dir").join("doc.tex");
        let error = write_in_place(&path, "x").unwrap_err();
        assert!(error.starts_with(&format!("{}: failed to write", path.display())), "{error}");
        assert!(!path.with_file_name("_doc.tex").exists());
    }
}
