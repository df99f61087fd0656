//! Client Specification Extractor - command-line entry point.
//!
//! Analyzes a Rust project for `#[controller]`-decorated declarations and
//! emits a language-neutral API specification for downstream client-code
//! generation.
//!
//! # Usage
//!
//! ```bash
//! clientspec-from-source [OPTIONS] <PROJECT_PATH>
//! ```
//!
//! # Examples
//!
//! Generate a JSON specification:
//! ```bash
//! clientspec-from-source ./my-api -o api-spec.json
//! ```
//!
//! Generate YAML instead:
//! ```bash
//! clientspec-from-source ./my-api -f yaml -o api-spec.yaml
//! ```

mod cli;
mod collector;
mod declaration;
mod error;
mod metadata;
mod model;
mod parser;
mod path_binder;
mod scanner;
mod serializer;
mod type_resolver;
mod visitor;

use anyhow::Result;
use clap::Parser;
use log::info;

fn main() -> Result<()> {
    let args = cli::CliArgs::parse();

    let log_level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .init();

    let args = cli::validate_args(args)?;
    cli::run(args)?;

    info!("client specification generated successfully");
    Ok(())
}
