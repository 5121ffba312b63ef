//! CLI logic for the Flowdoc process-flow diagram tool.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;
pub use error_adapter::{ErrorAdapter, Reportable, render_report, to_reportable};

use std::{
    fs,
    io::{self, Write},
};

use log::info;

use flowdoc::{DiagramBuilder, FlowError, definition::FlowDefinition, flows};

/// Run the Flowdoc CLI application, printing to standard output.
///
/// # Errors
///
/// Returns `FlowError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Definition parse and validation errors
/// - Layout, palette and render errors
pub fn run(args: &Args) -> Result<(), FlowError> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run_with_output(args, &mut out)
}

/// Run the application, writing the summary and preview to `out`.
///
/// The SVG always goes to `args.output`.
pub fn run_with_output(args: &Args, out: &mut impl Write) -> Result<(), FlowError> {
    info!(
        input_path:? = args.input,
        output_path = args.output;
        "Processing flow"
    );

    let app_config = config::load_config(args.config.as_ref())?;
    let definition = load_definition(args.input.as_deref())?;
    let builder = DiagramBuilder::new(app_config);

    if !args.no_summary {
        let summary = builder.summary(&definition)?;
        write!(out, "{summary}")?;
    }

    let svg = builder.render_svg(&definition)?;
    fs::write(&args.output, svg)?;
    info!(output_file = args.output; "SVG exported successfully");

    if args.interactive {
        let preview = builder.render_text_art(&definition)?;
        writeln!(out)?;
        write!(out, "{preview}")?;
    }

    out.flush()?;
    Ok(())
}

fn load_definition(path: Option<&str>) -> Result<FlowDefinition, FlowError> {
    match path {
        Some(path) => {
            info!(path = path; "Reading flow definition");
            let source = fs::read_to_string(path)?;
            FlowDefinition::from_toml_str(&source)
        }
        None => {
            info!("No definition given, using the built-in flow");
            flows::documented()
        }
    }
}
