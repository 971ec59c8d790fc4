//! Settings loading.

use crate::cli::Args;
use miette::{IntoDiagnostic, Result, WrapErr};
use quasar_convert::Settings;
use std::path::Path;

/// Settings from the optional settings file, overridden by command-line flags.
pub fn load(args: &Args) -> Result<Settings> {
    let mut settings = match &args.config {
        Some(path) => read(path)?,
        None => Settings::default(),
    };

    if args.no_colors {
        settings.preserve_quasar_colors = false;
    }
    if args.variants {
        settings.create_component_variants = true;
    }
    if args.no_auto_layout {
        settings.use_auto_layout = false;
    }
    if let Some(density) = args.density {
        settings.component_density = density;
    }
    if let Some(theme) = args.theme {
        settings.color_theme = theme;
    }
    tracing::debug!(?settings, "settings loaded");
    Ok(settings)
}

fn read(path: &Path) -> Result<Settings> {
    let json = std::fs::read_to_string(path)
        .into_diagnostic()
        .wrap_err_with(|| format!("failed to read settings from {}", path.display()))?;
    Settings::from_json(&json)
        .into_diagnostic()
        .wrap_err_with(|| format!("invalid settings in {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use quasar_convert::Density;

    #[test]
    fn test_flags_override_defaults() {
        let args = Args::parse_from(["quasar-figma", "a.vue", "--variants", "--density", "compact"]);
        let settings = load(&args).unwrap();
        assert!(settings.create_component_variants);
        assert!(settings.preserve_quasar_colors);
        assert_eq!(settings.component_density, Density::Compact);
    }

    #[test]
    fn test_missing_settings_file() {
        let args = Args::parse_from(["quasar-figma", "a.vue", "--config", "/nonexistent/settings.json"]);
        let err = load(&args).unwrap_err();
        assert!(err.to_string().contains("failed to read settings"));
    }
}
