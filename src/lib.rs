//! Client Specification Extractor - language-neutral API specs from Rust source.
//!
//! This library statically analyzes a codebase for controller declarations —
//! `impl` blocks decorated with `#[controller]` whose methods carry routing
//! decorations — and reduces them to a structured specification document
//! describing every endpoint: HTTP verb, normalized path template, path and
//! query variables, and request/response payload shapes. The document is
//! designed to drive client-code generation without access to the original
//! source.
//!
//! # Architecture
//!
//! The modules form a one-way pipeline:
//!
//! 1. [`scanner`] - recursively scans a project directory for source files
//! 2. [`parser`] - parses source files into syntax trees
//! 3. [`collector`] - lowers decorated declarations into a plain record tree
//! 4. [`visitor`] - orchestrates extraction over each controller declaration
//! 5. [`metadata`] - reduces routing decorations to verb + path fragments
//! 6. [`path_binder`] - normalizes path templates and binds parameters
//! 7. [`type_resolver`] - classifies declared types into payload shapes
//! 8. [`serializer`] - emits the finished document as JSON or YAML
//!
//! Everything past the collector operates on plain declaration records; the
//! extraction core never touches a syntax tree.
//!
//! # Example Usage
//!
//! ```no_run
//! use clientspec_from_source::{
//!     collector::ControllerCollector,
//!     model::ApiSpec,
//!     parser,
//!     scanner::SourceScanner,
//!     serializer::serialize_json,
//!     visitor,
//! };
//! use std::path::PathBuf;
//!
//! // Scan and parse the project
//! let scanner = SourceScanner::new(PathBuf::from("./my-api"));
//! let report = scanner.scan().unwrap();
//! let parsed: Vec<_> = parser::parse_files(&report.files)
//!     .into_iter()
//!     .filter_map(Result::ok)
//!     .collect();
//!
//! // Lower declarations and extract services
//! let controllers = ControllerCollector::collect(&parsed).unwrap();
//! let mut spec = ApiSpec::new("service");
//! for controller in &controllers {
//!     spec.add_service(visitor::visit_controller(controller).unwrap());
//! }
//!
//! // Emit the document
//! println!("{}", serialize_json(&spec).unwrap());
//! ```
//!
//! # Failure model
//!
//! Extraction is all-or-nothing: an unrepresentable type, an unroutable
//! handler, or a non-class controller aborts the run with a single
//! descriptive error. A specification that silently omits endpoints would be
//! worse than no specification at all.

pub mod cli;
pub mod collector;
pub mod declaration;
pub mod error;
pub mod metadata;
pub mod model;
pub mod parser;
pub mod path_binder;
pub mod scanner;
pub mod serializer;
pub mod type_resolver;
pub mod visitor;
