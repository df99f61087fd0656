use anyhow::Result;
use clap::{Parser, ValueEnum};
use log::{debug, info};
use std::path::PathBuf;

/// Client Specification Extractor - generate a language-neutral API
/// specification from annotated controller declarations in Rust source
#[derive(Parser, Debug)]
#[command(name = "clientspec-from-source")]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// Path to the project directory to analyze
    #[arg(value_name = "PROJECT_PATH")]
    pub project_path: PathBuf,

    /// Output format (json or yaml)
    #[arg(short = 'f', long = "format", value_enum, default_value = "json")]
    pub output_format: OutputFormat,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output_path: Option<PathBuf>,

    /// Name of the generated specification document
    #[arg(short = 'n', long = "name", default_value = "service")]
    pub spec_name: String,

    /// Enable verbose output
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

/// Output format options
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// JSON format
    Json,
    /// YAML format
    Yaml,
}

/// Validate and log already-parsed arguments
pub fn validate_args(args: CliArgs) -> Result<CliArgs> {
    debug!("parsed arguments: {:?}", args);

    if !args.project_path.exists() {
        anyhow::bail!(
            "project path does not exist: {}",
            args.project_path.display()
        );
    }
    if !args.project_path.is_dir() {
        anyhow::bail!(
            "project path is not a directory: {}",
            args.project_path.display()
        );
    }

    info!("project path: {}", args.project_path.display());
    info!("output format: {:?}", args.output_format);
    match &args.output_path {
        Some(output) => info!("output file: {}", output.display()),
        None => info!("output: stdout"),
    }

    Ok(args)
}

/// Run the main extraction workflow
pub fn run(args: CliArgs) -> Result<()> {
    use crate::collector::ControllerCollector;
    use crate::model::ApiSpec;
    use crate::parser::{self, ParsedFile};
    use crate::scanner::SourceScanner;
    use crate::serializer::{serialize_json, serialize_yaml, write_to_file};
    use crate::visitor;

    info!("starting client specification extraction...");

    // Step 1: find candidate source files
    let scanner = SourceScanner::new(args.project_path.clone());
    let report = scanner.scan()?;
    info!("found {} source file(s)", report.files.len());

    if report.files.is_empty() {
        anyhow::bail!("no Rust source files found in the project directory");
    }

    // Step 2: parse into syntax trees; files with syntax errors are skipped
    // before extraction starts
    let parse_results = parser::parse_files(&report.files);
    let parsed_files: Vec<ParsedFile> = parse_results
        .into_iter()
        .filter_map(|result| match result {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                debug!("skipping file: {}", e);
                None
            }
        })
        .collect();
    info!("parsed {} file(s)", parsed_files.len());

    if parsed_files.is_empty() {
        anyhow::bail!("no files could be parsed successfully");
    }

    // Step 3: lower controller declarations
    let controllers = ControllerCollector::collect(&parsed_files)?;
    info!("found {} controller(s)", controllers.len());

    if controllers.is_empty() {
        log::warn!("no controller declarations found in the project");
    }

    // Step 4: extract one service per controller; any failure aborts the run
    let mut spec = ApiSpec::new(args.spec_name.clone());
    for controller in &controllers {
        let service = visitor::visit_controller(controller)?;
        debug!(
            "extracted service {} with {} endpoint(s)",
            service.name,
            service.endpoints.len()
        );
        spec.add_service(service);
    }

    // Step 5: serialize to the requested format
    let content = match args.output_format {
        OutputFormat::Json => serialize_json(&spec)?,
        OutputFormat::Yaml => serialize_yaml(&spec)?,
    };

    // Step 6: emit to file or stdout
    if let Some(output_path) = &args.output_path {
        write_to_file(&content, output_path)?;
        info!("wrote specification to {}", output_path.display());
    } else {
        println!("{}", content);
    }

    info!("extraction complete");
    info!("summary:");
    info!("  - files scanned: {}", report.files.len());
    info!("  - controllers found: {}", controllers.len());
    info!(
        "  - endpoints extracted: {}",
        spec.services.iter().map(|s| s.endpoints.len()).sum::<usize>()
    );

    Ok(())
}
