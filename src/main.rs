use clap::Parser;
use filesorter::output::OutputFormatter;
use filesorter::run_cli;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Sort a folder into category subfolders by file extension.
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Folder to sort. Asked for interactively when omitted.
    path: Option<PathBuf>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    OutputFormatter::banner();

    match run_cli(args.path) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            OutputFormatter::error(&e.to_string());
            ExitCode::from(e.exit_code())
        }
    }
}
