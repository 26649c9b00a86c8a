use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use ceres::diagnostics::{render_error, CompileError};
use ceres::pretty::pretty_print;

#[derive(Parser)]
#[command(name = "ceresc", version, about = "The Ceres front end")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse and type-check a source file
    Check {
        /// Source file path
        file: PathBuf,
    },
    /// Lower a source file to explicit-coercion form and print it
    Lower {
        /// Source file path
        file: PathBuf,
        /// Output path; prints to stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match cli.command {
        Commands::Check { file } => run_check(&file),
        Commands::Lower { file, output } => run_lower(&file, output.as_deref()),
    }
}

fn read_source(file: &Path) -> Result<String, ExitCode> {
    std::fs::read_to_string(file).map_err(|e| {
        eprintln!("error: failed to read {}: {e}", file.display());
        ExitCode::FAILURE
    })
}

fn run_check(file: &Path) -> ExitCode {
    let source = match read_source(file) {
        Ok(s) => s,
        Err(code) => return code,
    };
    match ceres::check_source(&source) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            render_error(&source, &err);
            ExitCode::FAILURE
        }
    }
}

fn run_lower(file: &Path, output: Option<&Path>) -> ExitCode {
    let source = match read_source(file) {
        Ok(s) => s,
        Err(code) => return code,
    };
    let lowered = match ceres::lower_source(&source) {
        Ok(p) => p,
        Err(err) => {
            render_error(&source, &err);
            return ExitCode::FAILURE;
        }
    };
    let text = pretty_print(&lowered);
    match output {
        Some(path) => {
            if let Err(e) = std::fs::write(path, &text) {
                let err = CompileError::io(format!("failed to write {}: {e}", path.display()));
                render_error(&source, &err);
                return ExitCode::FAILURE;
            }
            ExitCode::SUCCESS
        }
        None => {
            print!("{text}");
            ExitCode::SUCCESS
        }
    }
}
