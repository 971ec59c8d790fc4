//! Style knowledge for Quasar templates.
//!
//! Everything here is pure lookup: the colour palette, the utility class
//! table, inline CSS parsing, attribute extraction, component classification,
//! colour/variant analysis and the icon glyph table.

pub mod analysis;
pub mod classes;
pub mod classify;
pub mod css;
pub mod extract;
pub mod icons;
pub mod palette;

pub use analysis::{analyze, analyze_props, ColorAnalysis, ColorPaints, ColorVariant, ShapeVariant};
pub use classes::{class_effects, color_class, spacing_size, ColorClass, ColorClassKind};
pub use classify::{classify, Category, ComponentTypeInfo};
pub use css::{inline_style_effects, parse_color, parse_pixels};
pub use extract::{extract, extract_with, ExtractedProps, Props, Styles};
pub use icons::{icon_glyph, icon_size, normalize_icon_name, IconLibrary, ICON_FONT_FAMILY};
pub use palette::{contrast_color, lighten, resolve_color, ColorTheme, Palette};

#[cfg(test)]
mod tests {
    use super::*;
    use quasar_template::parse;

    #[test]
    fn test_parsed_button_analysis() {
        let root = parse(
            r#"<template><q-btn color="negative" label="Delete" flat class="q-px-lg" /></template>"#,
        )
        .unwrap();
        let info = classify(&root.tag);
        assert_eq!(info.category, Category::Basic);
        assert_eq!(info.kind, "btn");

        let extracted = extract(&root);
        assert_eq!(extracted.props.get("label"), Some("Delete"));
        assert_eq!(extracted.styles.len(), 2);

        let analysis = analyze_props(&extracted.props);
        assert_eq!(analysis.color_variant, ColorVariant::Flat);
        let paints = analysis.paints(Palette::quasar());
        assert_eq!(paints.text_color, resolve_color("negative"));
    }

    #[test]
    fn test_tone_six_round_trip() {
        for base in Palette::quasar().bases() {
            assert_eq!(
                resolve_color(&format!("{base}-6")),
                resolve_color(base),
                "{base}"
            );
        }
    }

    #[test]
    fn test_contrast_endpoints() {
        use visual_node::Rgb;
        assert_eq!(contrast_color(Rgb::WHITE), Rgb::BLACK);
        assert_eq!(contrast_color(Rgb::BLACK), Rgb::WHITE);
        insta::assert_snapshot!(contrast_color(Rgb::grey(0.6)).to_hex(), @"#000000");
    }
}
