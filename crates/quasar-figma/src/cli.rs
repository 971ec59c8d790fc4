//! Command-line argument parsing.

use clap::Parser;
use quasar_convert::Density;
use quasar_style::ColorTheme;
use std::path::PathBuf;

/// Render a Quasar single-file component as a design-tool node tree
#[derive(Parser, Debug, Clone)]
#[command(name = "quasar-figma")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Single-file component (or bare template) to convert
    pub file: PathBuf,

    /// Settings file (JSON, camelCase keys)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, default_value = "human")]
    pub output: OutputFormat,

    /// Ignore palette colours
    #[arg(long)]
    pub no_colors: bool,

    /// Add hover, active and disabled copies of interactive components
    #[arg(long)]
    pub variants: bool,

    /// Use absolute frames instead of auto layout
    #[arg(long)]
    pub no_auto_layout: bool,

    /// Padding density: default, comfortable or compact
    #[arg(long)]
    pub density: Option<Density>,

    /// Colour theme: quasar-default, material or custom
    #[arg(long)]
    pub theme: Option<ColorTheme>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Output format for the converted tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Indented outline
    #[default]
    Human,
    /// The full node tree as JSON
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_flags() {
        let args = Args::try_parse_from([
            "quasar-figma",
            "Page.vue",
            "--output",
            "json",
            "--no-colors",
            "--density",
            "compact",
            "--theme",
            "material",
        ])
        .unwrap();
        assert_eq!(args.file, PathBuf::from("Page.vue"));
        assert_eq!(args.output, OutputFormat::Json);
        assert!(args.no_colors);
        assert!(!args.variants);
        assert_eq!(args.density, Some(Density::Compact));
        assert_eq!(args.theme, Some(ColorTheme::Material));
    }

    #[test]
    fn test_rejects_unknown_density() {
        assert!(Args::try_parse_from(["quasar-figma", "a.vue", "--density", "airy"]).is_err());
    }
}
