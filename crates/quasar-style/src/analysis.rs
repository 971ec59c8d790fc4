//! Visual intent derived from a component's props and classes.

use crate::classes::{color_class, ColorClassKind};
use crate::extract::{extract, Props};
use crate::palette::{contrast_color, Palette};
use quasar_template::Element;
use smol_str::SmolStr;
use visual_node::{Paint, Rgb};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ColorVariant {
    #[default]
    Standard,
    Flat,
    Outline,
    Push,
    Glossy,
    Unelevated,
}

impl ColorVariant {
    /// Flags in precedence order. The first one set wins.
    const FLAGS: [(&'static str, ColorVariant); 5] = [
        ("flat", ColorVariant::Flat),
        ("outline", ColorVariant::Outline),
        ("push", ColorVariant::Push),
        ("glossy", ColorVariant::Glossy),
        ("unelevated", ColorVariant::Unelevated),
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ColorVariant::Standard => "standard",
            ColorVariant::Flat => "flat",
            ColorVariant::Outline => "outline",
            ColorVariant::Push => "push",
            ColorVariant::Glossy => "glossy",
            ColorVariant::Unelevated => "unelevated",
        }
    }

    /// Whether the variant draws no background of its own.
    pub fn is_transparent(&self) -> bool {
        matches!(self, ColorVariant::Flat | ColorVariant::Outline)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ShapeVariant {
    #[default]
    Default,
    Rounded,
    Round,
    Square,
}

impl ShapeVariant {
    const FLAGS: [(&'static str, ShapeVariant); 3] = [
        ("rounded", ShapeVariant::Rounded),
        ("round", ShapeVariant::Round),
        ("square", ShapeVariant::Square),
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeVariant::Default => "default",
            ShapeVariant::Rounded => "rounded",
            ShapeVariant::Round => "round",
            ShapeVariant::Square => "square",
        }
    }
}

/// Colour and variant choices of one element. Built fresh per element.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColorAnalysis {
    pub main_color: Option<SmolStr>,
    pub text_color: Option<SmolStr>,
    pub bg_color: Option<SmolStr>,
    pub border_color: Option<SmolStr>,
    pub color_variant: ColorVariant,
    pub shape_variant: ShapeVariant,
    pub size_variant: Option<SmolStr>,
    pub is_dense: bool,
    pub is_disabled: bool,
    pub is_loading: bool,
}

/// Paints implied by an analysis.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColorPaints {
    pub fills: Option<Vec<Paint>>,
    pub strokes: Option<Vec<Paint>>,
    pub text_color: Option<Rgb>,
}

pub fn analyze(element: &Element) -> ColorAnalysis {
    analyze_props(&extract(element).props)
}

pub fn analyze_props(props: &Props) -> ColorAnalysis {
    let mut class_text = None;
    let mut class_bg = None;
    for class in props.classes() {
        let Some(color) = color_class(class) else {
            continue;
        };
        let slot = match color.kind {
            ColorClassKind::Text => &mut class_text,
            ColorClassKind::Background => &mut class_bg,
        };
        if slot.is_none() {
            *slot = Some(SmolStr::new(color.name));
        }
    }

    let main_color = props.value("color").map(SmolStr::new);
    let color_variant = ColorVariant::FLAGS
        .iter()
        .find(|(flag, _)| props.flag(flag))
        .map(|(_, variant)| *variant)
        .unwrap_or_default();
    let shape_variant = ShapeVariant::FLAGS
        .iter()
        .find(|(flag, _)| props.flag(flag))
        .map(|(_, variant)| *variant)
        .unwrap_or_default();
    let border_color = if color_variant == ColorVariant::Outline {
        main_color.clone()
    } else {
        None
    };

    ColorAnalysis {
        text_color: props.value("text-color").map(SmolStr::new).or(class_text),
        bg_color: class_bg,
        border_color,
        main_color,
        color_variant,
        shape_variant,
        size_variant: props.value("size").map(SmolStr::new),
        is_dense: props.flag("dense"),
        is_disabled: props.any_flag(&["disable", "disabled"]),
        is_loading: props.flag("loading"),
    }
}

impl ColorAnalysis {
    /// Whether any colour was asked for.
    pub fn has_color(&self) -> bool {
        self.main_color.is_some() || self.text_color.is_some() || self.bg_color.is_some()
    }

    pub fn main_rgb(&self, palette: &Palette) -> Option<Rgb> {
        self.main_color.as_deref().and_then(|c| palette.resolve(c))
    }

    pub fn text_rgb(&self, palette: &Palette) -> Option<Rgb> {
        self.text_color.as_deref().and_then(|c| palette.resolve(c))
    }

    pub fn bg_rgb(&self, palette: &Palette) -> Option<Rgb> {
        self.bg_color.as_deref().and_then(|c| palette.resolve(c))
    }

    /// Generic fill, stroke and text colour for the analysis.
    ///
    /// A background class wins over the main colour. The main colour only
    /// fills standard components; flat and outline ones get a transparent
    /// fill, and outline adds a stroke in the main colour.
    pub fn paints(&self, palette: &Palette) -> ColorPaints {
        let mut out = ColorPaints::default();
        let background = match (&self.bg_color, &self.main_color) {
            (Some(bg), _) => palette.resolve(bg),
            (None, Some(main)) if self.color_variant == ColorVariant::Standard => {
                palette.resolve(main)
            }
            _ => None,
        };
        if let Some(rgb) = background {
            out.fills = Some(vec![Paint::solid(rgb)]);
        } else if self.bg_color.is_none() && self.color_variant.is_transparent() {
            out.fills = Some(vec![Paint::transparent()]);
        }

        if self.color_variant == ColorVariant::Outline {
            if let Some(rgb) = self.main_rgb(palette) {
                out.strokes = Some(vec![Paint::solid(rgb)]);
            }
        }

        out.text_color = self.text_rgb(palette).or_else(|| {
            if self.color_variant.is_transparent() {
                self.main_rgb(palette)
            } else {
                background.map(contrast_color)
            }
        });
        out
    }
}
