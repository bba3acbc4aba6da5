//! Resource Query CLI
//!
//! Command-line interface for inspecting how request parameters are
//! normalized into resource query options.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use resource_query::{
    load_defaults, load_params, load_params_reader, DefaultsOverride, LoadError,
    ResourceOptionsParser,
};
use serde_json::Value;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "resource-query")]
#[command(about = "Normalize resource query parameters")]
#[command(version)]
struct Cli {
    /// Log parsing details to stderr (RUST_LOG overrides the level)
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a parameters document and print the normalized options
    Parse {
        /// Parameters file (JSON object), or - for stdin
        params: PathBuf,

        /// Defaults file (JSON object, same shapes plus "mode")
        #[arg(long)]
        defaults: Option<PathBuf>,

        /// Output file (stdout if not specified)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Check whether a parameters document would be accepted
    Check {
        /// Parameters file (JSON object), or - for stdin
        params: PathBuf,

        /// Defaults file (JSON object, same shapes plus "mode")
        #[arg(long)]
        defaults: Option<PathBuf>,

        /// Output results as JSON (for automation)
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.verbose {
        init_logging();
    }

    let result = match cli.command {
        Commands::Parse {
            params,
            defaults,
            output,
            pretty,
        } => run_parse(&params, defaults.as_deref(), output, pretty),

        Commands::Check {
            params,
            defaults,
            json,
        } => run_check(&params, defaults.as_deref(), json),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(code) => ExitCode::from(code),
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn read_params(path: &Path) -> Result<Value, LoadError> {
    if path == Path::new("-") {
        load_params_reader(std::io::stdin().lock())
    } else {
        load_params(path)
    }
}

fn build_parser(defaults: Option<&Path>) -> Result<ResourceOptionsParser, LoadError> {
    let overrides = match defaults {
        Some(path) => load_defaults(path)?,
        None => DefaultsOverride::new(),
    };
    Ok(ResourceOptionsParser::with_overrides(&overrides))
}

fn run_parse(
    params_path: &Path,
    defaults: Option<&Path>,
    output: Option<PathBuf>,
    pretty: bool,
) -> Result<(), u8> {
    let parser = build_parser(defaults).map_err(|e| {
        eprintln!("Error loading defaults: {}", e);
        e.exit_code() as u8
    })?;

    let params = read_params(params_path).map_err(|e| {
        eprintln!("Error: {}", e);
        e.exit_code() as u8
    })?;

    let options = parser.parse(&params).map_err(|e| {
        eprintln!("Error: {}", e);
        e.exit_code() as u8
    })?;

    let json_output = if pretty {
        serde_json::to_string_pretty(&options)
    } else {
        serde_json::to_string(&options)
    }
    .map_err(|e| {
        eprintln!("Error serializing output: {}", e);
        2u8
    })?;

    match output {
        Some(path) => {
            std::fs::write(&path, &json_output).map_err(|e| {
                eprintln!("Error writing to {}: {}", path.display(), e);
                3u8
            })?;
        }
        None => {
            println!("{}", json_output);
        }
    }

    Ok(())
}

fn run_check(params_path: &Path, defaults: Option<&Path>, json_output: bool) -> Result<(), u8> {
    let parser = build_parser(defaults).map_err(|e| {
        report_error(json_output, &format!("loading defaults: {}", e));
        e.exit_code() as u8
    })?;

    let params = read_params(params_path).map_err(|e| {
        report_error(json_output, &format!("loading params: {}", e));
        e.exit_code() as u8
    })?;

    match parser.parse(&params) {
        Ok(_) => {
            if json_output {
                println!(r#"{{"valid":true}}"#);
            } else {
                println!("Valid");
            }
            Ok(())
        }
        Err(e) => {
            if json_output {
                let output = serde_json::json!({
                    "valid": false,
                    "status": e.status_code().as_u16(),
                    "error": e.to_string()
                });
                println!("{}", output);
            } else {
                eprintln!("Rejected ({}): {}", e.status_code(), e);
            }
            Err(e.exit_code() as u8)
        }
    }
}

/// Output an error message in plain text or JSON format.
fn report_error(json_output: bool, msg: &str) {
    if json_output {
        println!("{}", serde_json::json!({ "valid": false, "error": msg }));
    } else {
        eprintln!("Error: {}", msg);
    }
}
