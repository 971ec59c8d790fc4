//! Quasar utility classes and the effects they stand for.

use crate::palette::Palette;
use once_cell::sync::Lazy;
use regex::Regex;
use visual_node::{
    Axis, AxisAlign, CounterAlign, FontWeight, LayoutMode, Paint, Shadow, Side, SizingMode,
    StyleEffect, TextAlign, TextCase,
};

static SPACING: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"^q-(p|m)([atrblxy])-(none|xs|sm|md|lg|xl)$").ok());

static GUTTER: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"^q-(?:col-)?gutter-(?:x-|y-)?(none|xs|sm|md|lg|xl)$").ok());

static COLOR: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"^(bg|text)-([a-z]+(?:-[a-z]+)*)(?:-(\d+))?$").ok());

static SHADOW: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"^shadow-(\d+)$").ok());

fn captures<'t>(pattern: &Lazy<Option<Regex>>, text: &'t str) -> Option<regex::Captures<'t>> {
    pattern.as_ref()?.captures(text)
}

/// `text-*` names that are not colours.
const TEXT_UTILITIES: &[&str] = &[
    "left", "right", "center", "justify", "bold", "italic", "uppercase", "lowercase",
    "capitalize", "no-wrap", "truncate", "strike", "weight-thin", "weight-light",
    "weight-regular", "weight-medium", "weight-bold", "weight-bolder",
];

/// Spacing scale shared by padding, margin and gutter classes.
pub fn spacing_size(name: &str) -> Option<f32> {
    match name {
        "none" => Some(0.0),
        "xs" => Some(4.0),
        "sm" => Some(8.0),
        "md" => Some(16.0),
        "lg" => Some(24.0),
        "xl" => Some(32.0),
        _ => None,
    }
}

/// Which style property a colour class targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorClassKind {
    Text,
    Background,
}

/// A `bg-<name>[-<tone>]` or `text-<name>[-<tone>]` class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorClass {
    pub kind: ColorClassKind,
    /// Colour name including the tone suffix, e.g. `red-5`.
    pub name: String,
}

/// Recognise a colour utility class.
pub fn color_class(class: &str) -> Option<ColorClass> {
    if typography(class).is_some() {
        return None;
    }
    let caps = captures(&COLOR, class)?;
    let kind = match &caps[1] {
        "bg" => ColorClassKind::Background,
        _ => ColorClassKind::Text,
    };
    let base = &caps[2];
    if kind == ColorClassKind::Text && TEXT_UTILITIES.contains(&base) {
        return None;
    }
    let name = match caps.get(3) {
        Some(tone) => format!("{base}-{}", tone.as_str()),
        None => base.to_string(),
    };
    Some(ColorClass { kind, name })
}

/// Font size, weight, letter spacing and case for the typography scale.
fn typography(class: &str) -> Option<(f32, FontWeight, f32, TextCase)> {
    use FontWeight::{Bold, Medium, Regular};
    let entry = match class {
        "text-h1" => (48.0, Bold, -0.5, TextCase::Original),
        "text-h2" => (40.0, Bold, -0.4, TextCase::Original),
        "text-h3" => (34.0, Bold, -0.3, TextCase::Original),
        "text-h4" => (28.0, Bold, -0.2, TextCase::Original),
        "text-h5" => (24.0, Bold, -0.1, TextCase::Original),
        "text-h6" => (20.0, Bold, 0.0, TextCase::Original),
        "text-subtitle1" => (16.0, Medium, 0.15, TextCase::Original),
        "text-subtitle2" => (14.0, Medium, 0.1, TextCase::Original),
        "text-body1" => (16.0, Regular, 0.5, TextCase::Original),
        "text-body2" => (14.0, Regular, 0.25, TextCase::Original),
        "text-caption" => (12.0, Regular, 0.4, TextCase::Original),
        "text-overline" => (10.0, Medium, 1.5, TextCase::Upper),
        _ => return None,
    };
    Some(entry)
}

/// Effects for one class token, or `None` when the class is not recognised.
///
/// Colour classes whose name the palette cannot resolve count as recognised
/// but contribute nothing.
pub fn class_effects(class: &str, palette: &Palette) -> Option<Vec<StyleEffect>> {
    if let Some((size, weight, spacing, case)) = typography(class) {
        let mut effects = vec![
            StyleEffect::FontSize { size },
            StyleEffect::FontWeight { weight },
            StyleEffect::LetterSpacing { spacing },
        ];
        if case != TextCase::Original {
            effects.push(StyleEffect::TextCase { case });
        }
        return Some(effects);
    }
    if let Some(effects) = fixed_class(class) {
        return Some(effects);
    }
    if let Some(caps) = captures(&SPACING, class) {
        let value = spacing_size(&caps[3])?;
        if &caps[1] == "m" {
            // Margins have no counterpart on auto-layout frames.
            return Some(Vec::new());
        }
        let sides: &[Side] = match &caps[2] {
            "a" => &Side::ALL,
            "t" => &[Side::Top],
            "r" => &[Side::Right],
            "b" => &[Side::Bottom],
            "l" => &[Side::Left],
            "x" => &[Side::Left, Side::Right],
            _ => &[Side::Top, Side::Bottom],
        };
        return Some(
            sides
                .iter()
                .map(|&side| StyleEffect::padding(side, value))
                .collect(),
        );
    }
    if let Some(caps) = captures(&GUTTER, class) {
        let spacing = spacing_size(&caps[1])?;
        return Some(vec![StyleEffect::ItemSpacing { spacing }]);
    }
    if let Some(caps) = captures(&SHADOW, class) {
        let depth: f32 = caps[1].parse().ok()?;
        let depth = depth.clamp(1.0, 24.0);
        return Some(vec![StyleEffect::DropShadow {
            shadow: Shadow::black(0.2, 0.0, (depth / 2.0).max(1.0), depth),
        }]);
    }
    if let Some(color) = color_class(class) {
        let effects = match palette.resolve(&color.name) {
            Some(rgb) => match color.kind {
                ColorClassKind::Background => vec![StyleEffect::Fill {
                    paint: Paint::solid(rgb),
                }],
                ColorClassKind::Text => vec![StyleEffect::text_color(rgb)],
            },
            None => Vec::new(),
        };
        return Some(effects);
    }
    None
}

fn fixed_class(class: &str) -> Option<Vec<StyleEffect>> {
    let one = |effect: StyleEffect| Some(vec![effect]);
    let weight = |weight: FontWeight| Some(vec![StyleEffect::FontWeight { weight }]);
    let align = |align: TextAlign| Some(vec![StyleEffect::TextAlign { align }]);
    let primary = |align: AxisAlign| Some(vec![StyleEffect::PrimaryAlign { align }]);
    let counter = |align: CounterAlign| Some(vec![StyleEffect::CounterAlign { align }]);
    let fill = |axis: Axis| StyleEffect::Sizing {
        axis,
        mode: SizingMode::Fill,
    };
    match class {
        "text-left" => align(TextAlign::Left),
        "text-center" => align(TextAlign::Center),
        "text-right" => align(TextAlign::Right),
        "text-justify" => align(TextAlign::Justified),
        "text-bold" | "text-weight-bold" | "text-weight-bolder" => weight(FontWeight::Bold),
        "text-weight-medium" => weight(FontWeight::Medium),
        "text-weight-regular" => weight(FontWeight::Regular),
        "text-weight-light" | "text-weight-thin" => weight(FontWeight::Light),
        "text-italic" => one(StyleEffect::Raw {
            name: "fontStyle".into(),
            value: "italic".into(),
        }),
        "text-uppercase" => one(StyleEffect::TextCase {
            case: TextCase::Upper,
        }),
        "text-lowercase" => one(StyleEffect::TextCase {
            case: TextCase::Lower,
        }),
        "text-capitalize" => one(StyleEffect::TextCase {
            case: TextCase::Title,
        }),
        "row" => one(StyleEffect::LayoutMode {
            layout: LayoutMode::Horizontal,
        }),
        "column" => one(StyleEffect::LayoutMode {
            layout: LayoutMode::Vertical,
        }),
        "items-start" => counter(CounterAlign::Min),
        "items-center" => counter(CounterAlign::Center),
        "items-end" => counter(CounterAlign::Max),
        "justify-start" => primary(AxisAlign::Min),
        "justify-center" => primary(AxisAlign::Center),
        "justify-end" => primary(AxisAlign::Max),
        "justify-between" | "justify-around" | "justify-evenly" => {
            primary(AxisAlign::SpaceBetween)
        }
        "flex-center" => Some(vec![
            StyleEffect::PrimaryAlign {
                align: AxisAlign::Center,
            },
            StyleEffect::CounterAlign {
                align: CounterAlign::Center,
            },
        ]),
        "rounded-borders" => one(StyleEffect::CornerRadius { radius: 4.0 }),
        "no-border-radius" => one(StyleEffect::CornerRadius { radius: 0.0 }),
        "no-shadow" | "no-box-shadow" => one(StyleEffect::NoShadow),
        "full-width" => Some(vec![fill(Axis::Horizontal)]),
        "full-height" => Some(vec![fill(Axis::Vertical)]),
        "fit" => Some(vec![fill(Axis::Horizontal), fill(Axis::Vertical)]),
        "hidden" | "invisible" => one(StyleEffect::Visible { visible: false }),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use visual_node::Rgb;

    fn effects(class: &str) -> Option<Vec<StyleEffect>> {
        class_effects(class, Palette::quasar())
    }

    #[test]
    fn test_color_class_detection() {
        assert_eq!(
            color_class("bg-deep-purple-3"),
            Some(ColorClass {
                kind: ColorClassKind::Background,
                name: "deep-purple-3".into()
            })
        );
        assert_eq!(
            color_class("text-white").map(|c| c.kind),
            Some(ColorClassKind::Text)
        );
        assert_eq!(color_class("text-h6"), None);
        assert_eq!(color_class("text-center"), None);
        assert_eq!(color_class("text-weight-bold"), None);
        assert_eq!(color_class("q-pa-md"), None);
    }

    #[test]
    fn test_spacing_classes() {
        assert_eq!(effects("q-pa-md").map(|e| e.len()), Some(4));
        assert_eq!(
            effects("q-px-sm"),
            Some(vec![
                StyleEffect::padding(Side::Left, 8.0),
                StyleEffect::padding(Side::Right, 8.0)
            ])
        );
        assert_eq!(effects("q-ma-lg"), Some(Vec::new()));
        assert_eq!(
            effects("q-gutter-sm"),
            Some(vec![StyleEffect::ItemSpacing { spacing: 8.0 }])
        );
        assert_eq!(effects("q-pa-huge"), None);
    }

    #[test]
    fn test_typography_classes() {
        let overline = effects("text-overline").unwrap();
        assert_eq!(overline[0], StyleEffect::FontSize { size: 10.0 });
        assert_eq!(
            overline.last(),
            Some(&StyleEffect::TextCase {
                case: TextCase::Upper
            })
        );
        assert_eq!(effects("text-h6").map(|e| e.len()), Some(3));
    }

    #[test]
    fn test_color_classes_resolve_against_palette() {
        assert_eq!(
            effects("bg-grey-3"),
            Some(vec![StyleEffect::fill(Rgb::grey(0.9))])
        );
        assert_eq!(effects("text-nonexistent"), Some(Vec::new()));
    }

    #[test]
    fn test_unknown_classes() {
        assert_eq!(effects("my-widget"), None);
        assert_eq!(effects("col-6"), None);
    }
}
