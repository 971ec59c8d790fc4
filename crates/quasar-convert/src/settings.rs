//! Conversion settings.

use indexmap::IndexMap;
use quasar_style::css::parse_color;
use quasar_style::{Category, ColorTheme, Palette};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

/// Global padding density.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Density {
    #[default]
    Default,
    Comfortable,
    Compact,
}

impl Density {
    /// Padding multiplier.
    pub fn factor(&self) -> f32 {
        match self {
            Density::Default => 1.0,
            Density::Comfortable => 0.875,
            Density::Compact => 0.75,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Density::Default => "default",
            Density::Comfortable => "comfortable",
            Density::Compact => "compact",
        }
    }
}

impl fmt::Display for Density {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Density {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "default" => Ok(Density::Default),
            "comfortable" => Ok(Density::Comfortable),
            "compact" => Ok(Density::Compact),
            other => Err(format!("unknown density `{other}`")),
        }
    }
}

/// Per-category switches. A disabled category is rendered by the generic
/// processor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComponentGroups {
    pub basic: bool,
    pub layout: bool,
    pub form: bool,
    pub navigation: bool,
    pub display: bool,
    pub popup: bool,
    pub scrolling: bool,
    pub other: bool,
}

impl Default for ComponentGroups {
    fn default() -> Self {
        Self {
            basic: true,
            layout: true,
            form: true,
            navigation: true,
            display: true,
            popup: true,
            scrolling: true,
            other: true,
        }
    }
}

impl ComponentGroups {
    pub fn enabled(&self, category: Category) -> bool {
        match category {
            Category::Basic => self.basic,
            Category::Layout => self.layout,
            Category::Form => self.form,
            Category::Navigation => self.navigation,
            Category::Display => self.display,
            Category::Popup => self.popup,
            Category::Scrolling => self.scrolling,
            Category::Other => self.other,
            Category::Framework | Category::Html => true,
        }
    }

    pub fn set(&mut self, category: Category, enabled: bool) {
        let slot = match category {
            Category::Basic => &mut self.basic,
            Category::Layout => &mut self.layout,
            Category::Form => &mut self.form,
            Category::Navigation => &mut self.navigation,
            Category::Display => &mut self.display,
            Category::Popup => &mut self.popup,
            Category::Scrolling => &mut self.scrolling,
            Category::Other => &mut self.other,
            Category::Framework | Category::Html => return,
        };
        *slot = enabled;
    }
}

/// Options recognised by the converter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Apply palette colours at all. When off, components use neutral defaults.
    pub preserve_quasar_colors: bool,
    /// Add hover, active and disabled copies of interactive components.
    pub create_component_variants: bool,
    /// Use auto layout frames. When off, frames are absolute and fixed-size.
    pub use_auto_layout: bool,
    pub component_density: Density,
    pub color_theme: ColorTheme,
    pub component_groups: ComponentGroups,
    /// Extra colour names, as CSS colours. Looked up before the theme.
    pub custom_colors: IndexMap<String, String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            preserve_quasar_colors: true,
            create_component_variants: false,
            use_auto_layout: true,
            component_density: Density::Default,
            color_theme: ColorTheme::QuasarDefault,
            component_groups: ComponentGroups::default(),
            custom_colors: IndexMap::new(),
        }
    }
}

impl Settings {
    /// Palette backing colour names under these settings.
    pub fn palette(&self) -> Cow<'static, Palette> {
        let base = Palette::for_theme(self.color_theme);
        if self.custom_colors.is_empty() {
            return Cow::Borrowed(base);
        }
        let overrides = self.custom_colors.iter().filter_map(|(name, value)| {
            match parse_color(value) {
                Some(rgba) => Some((name.as_str(), rgba.rgb())),
                None => {
                    tracing::warn!(name = %name, value = %value, "ignoring unparseable custom colour");
                    None
                }
            }
        });
        Cow::Owned(base.with_overrides(overrides))
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use visual_node::Rgb;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert!(settings.preserve_quasar_colors);
        assert!(!settings.create_component_variants);
        assert!(settings.use_auto_layout);
        assert_eq!(settings.component_density, Density::Default);
        assert_eq!(settings.color_theme, ColorTheme::QuasarDefault);
        assert!(settings.component_groups.enabled(Category::Popup));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(
            r#"{
                "createComponentVariants": true,
                "componentDensity": "compact",
                "colorTheme": "material",
                "componentGroups": { "form": false }
            }"#,
        )
        .unwrap();
        assert!(settings.create_component_variants);
        assert!(settings.preserve_quasar_colors);
        assert_eq!(settings.component_density, Density::Compact);
        assert_eq!(settings.color_theme, ColorTheme::Material);
        assert!(!settings.component_groups.enabled(Category::Form));
        assert!(settings.component_groups.enabled(Category::Basic));
    }

    #[test]
    fn test_custom_colors_override_theme() {
        let mut settings = Settings::default();
        assert!(matches!(settings.palette(), Cow::Borrowed(_)));

        settings
            .custom_colors
            .insert("brand".into(), "#ff0000".into());
        settings
            .custom_colors
            .insert("primary".into(), "#000000".into());
        settings.custom_colors.insert("broken".into(), "nope".into());
        let palette = settings.palette();
        assert_eq!(palette.resolve("brand"), Some(Rgb::new(1.0, 0.0, 0.0)));
        assert_eq!(palette.resolve("primary"), Some(Rgb::BLACK));
        assert_eq!(palette.resolve("broken"), None);
    }

    #[test]
    fn test_density() {
        assert_eq!("Compact".parse::<Density>(), Ok(Density::Compact));
        assert!("tiny".parse::<Density>().is_err());
        assert_eq!(Density::Comfortable.factor(), 0.875);
    }
}
