//! quasar-figma - render Quasar templates as design-tool node trees.

use clap::Parser;
use miette::{IntoDiagnostic, LabeledSpan, NamedSource, Result, WrapErr};
use quasar_convert::{convert_source, ConvertError};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod cli;
mod config;
mod output;

use cli::Args;
use output::OutputFormatter;

fn main() -> ExitCode {
    let args = Args::parse();

    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .build(),
        )
    }))
    .ok();

    let default_level = if args.verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match run(args) {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("{:?}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<ExitCode> {
    let settings = config::load(&args)?;
    let source = std::fs::read_to_string(&args.file)
        .into_diagnostic()
        .wrap_err_with(|| format!("failed to read {}", args.file.display()))?;

    let tree = match convert_source(&source, &settings) {
        Ok(tree) => tree,
        Err(ConvertError::Parse(error)) => {
            let name = args.file.display().to_string();
            let report = miette::miette!(
                code = error.code.as_str(),
                labels = vec![LabeledSpan::at(error.span.to_range(), "here")],
                "{}",
                error.message
            )
            .with_source_code(NamedSource::new(name, source));
            return Err(report);
        }
        Err(error) => return Err(error).into_diagnostic(),
    };

    let rendered = OutputFormatter::new(args.output).render(&tree)?;
    print!("{rendered}");
    if args.verbose {
        eprintln!("{} nodes", tree.descendants().len());
    }
    Ok(ExitCode::SUCCESS)
}
