//! CSS value parsing and inline `style` translation.

use visual_node::{
    Axis, FontWeight, LayoutMode, Paint, Rgb, Rgba, Side, SizingMode, StyleEffect, TextAlign,
};

/// Root font size used for `rem`/`em` units.
pub const ROOT_FONT_SIZE: f32 = 16.0;

/// Font size used when a value cannot be parsed.
pub const DEFAULT_FONT_SIZE: f32 = 14.0;

/// Parse a CSS colour: hex, `rgb()`/`rgba()` or a handful of keywords.
pub fn parse_color(value: &str) -> Option<Rgba> {
    let value = value.trim().to_ascii_lowercase();
    if let Some(hex) = value.strip_prefix('#') {
        return parse_hex(hex);
    }
    if let Some(args) = value
        .strip_prefix("rgba(")
        .or_else(|| value.strip_prefix("rgb("))
        .and_then(|rest| rest.strip_suffix(')'))
    {
        return parse_rgb_args(args);
    }
    let named = match value.as_str() {
        "white" => Rgb::WHITE,
        "black" => Rgb::BLACK,
        "red" => Rgb::new(1.0, 0.0, 0.0),
        "green" => Rgb::new(0.0, 0.8, 0.0),
        "blue" => Rgb::new(0.0, 0.0, 1.0),
        "yellow" => Rgb::new(1.0, 1.0, 0.0),
        "gray" | "grey" => Rgb::grey(0.5),
        "transparent" => return Some(Rgb::WHITE.with_alpha(0.0)),
        _ => return None,
    };
    Some(named.with_alpha(1.0))
}

fn parse_hex(hex: &str) -> Option<Rgba> {
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let nibble = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok();
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    let unit = |v: u8| f32::from(v) / 255.0;
    match hex.len() {
        3 => Some(Rgba {
            r: unit(nibble(0)? * 17),
            g: unit(nibble(1)? * 17),
            b: unit(nibble(2)? * 17),
            a: 1.0,
        }),
        6 | 8 => Some(Rgba {
            r: unit(byte(0)?),
            g: unit(byte(2)?),
            b: unit(byte(4)?),
            a: if hex.len() == 8 { unit(byte(6)?) } else { 1.0 },
        }),
        _ => None,
    }
}

fn parse_rgb_args(args: &str) -> Option<Rgba> {
    let parts: Vec<&str> = args.split(',').map(str::trim).collect();
    if parts.len() != 3 && parts.len() != 4 {
        return None;
    }
    let channel = |s: &str| -> Option<f32> {
        let v: f32 = s.parse().ok()?;
        Some((v / 255.0).clamp(0.0, 1.0))
    };
    let alpha = match parts.get(3) {
        Some(a) => a.parse::<f32>().ok()?.clamp(0.0, 1.0),
        None => 1.0,
    };
    Some(Rgba {
        r: channel(parts[0])?,
        g: channel(parts[1])?,
        b: channel(parts[2])?,
        a: alpha,
    })
}

/// Parse a length in `px`, `rem`, `em` or a bare number.
pub fn parse_pixels(value: &str) -> Option<f32> {
    let value = value.trim();
    let (number, scale) = if let Some(n) = value.strip_suffix("px") {
        (n, 1.0)
    } else if let Some(n) = value.strip_suffix("rem") {
        (n, ROOT_FONT_SIZE)
    } else if let Some(n) = value.strip_suffix("em") {
        (n, ROOT_FONT_SIZE)
    } else {
        (value, 1.0)
    };
    let parsed: f32 = number.trim().parse().ok()?;
    parsed.is_finite().then_some(parsed * scale)
}

/// Parse a `font-size` value. Unknown values give [`DEFAULT_FONT_SIZE`].
pub fn parse_font_size(value: &str) -> f32 {
    match value.trim() {
        "small" => 12.0,
        "medium" => 14.0,
        "large" => 16.0,
        "x-large" => 20.0,
        "xx-large" => 24.0,
        other => parse_pixels(other).unwrap_or(DEFAULT_FONT_SIZE),
    }
}

pub fn parse_text_align(value: &str) -> Option<TextAlign> {
    match value.trim() {
        "left" | "start" => Some(TextAlign::Left),
        "center" => Some(TextAlign::Center),
        "right" | "end" => Some(TextAlign::Right),
        "justify" => Some(TextAlign::Justified),
        _ => None,
    }
}

/// `background-color` to `backgroundColor`.
pub fn camelize(property: &str) -> String {
    let mut out = String::with_capacity(property.len());
    let mut upper = false;
    for c in property.chars() {
        if c == '-' {
            upper = !out.is_empty();
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// Split `a: b; c: d` into trimmed pairs. Property names are lower-cased.
pub fn parse_declarations(style: &str) -> Vec<(String, String)> {
    style
        .split(';')
        .filter_map(|decl| {
            let (property, value) = decl.split_once(':')?;
            let property = property.trim().to_ascii_lowercase();
            let value = value.trim();
            (!property.is_empty() && !value.is_empty()).then(|| (property, value.to_string()))
        })
        .collect()
}

/// Translate a `style` attribute into effects, in declaration order.
pub fn inline_style_effects(style: &str) -> Vec<StyleEffect> {
    let mut effects = Vec::new();
    for (property, value) in parse_declarations(style) {
        declaration_effects(&property, &value, &mut effects);
    }
    effects
}

fn raw(property: &str, value: &str) -> StyleEffect {
    StyleEffect::Raw {
        name: camelize(property).into(),
        value: value.to_string(),
    }
}

fn declaration_effects(property: &str, value: &str, out: &mut Vec<StyleEffect>) {
    let effect = match property {
        "color" => match parse_color(value) {
            Some(c) => StyleEffect::text_color(c.rgb()),
            None => raw(property, value),
        },
        "background-color" | "background" => match parse_color(value) {
            Some(c) => StyleEffect::Fill {
                paint: Paint::solid_with_opacity(c.rgb(), c.a),
            },
            None => raw(property, value),
        },
        "padding" => {
            match padding_shorthand(value) {
                Some(sides) => out.extend(
                    Side::ALL
                        .iter()
                        .zip(sides)
                        .map(|(&side, v)| StyleEffect::padding(side, v)),
                ),
                None => out.push(raw(property, value)),
            }
            return;
        }
        "padding-top" | "padding-right" | "padding-bottom" | "padding-left" => {
            let side = match &property["padding-".len()..] {
                "top" => Side::Top,
                "right" => Side::Right,
                "bottom" => Side::Bottom,
                _ => Side::Left,
            };
            match parse_pixels(value) {
                Some(v) => StyleEffect::padding(side, v),
                None => raw(property, value),
            }
        }
        "font-size" => StyleEffect::FontSize {
            size: parse_font_size(value),
        },
        "font-weight" => match FontWeight::from_css(value) {
            Some(weight) => StyleEffect::FontWeight { weight },
            None => raw(property, value),
        },
        "text-align" => match parse_text_align(value) {
            Some(align) => StyleEffect::TextAlign { align },
            None => raw(property, value),
        },
        "border-radius" => match parse_pixels(value) {
            Some(radius) => StyleEffect::CornerRadius { radius },
            None => raw(property, value),
        },
        "width" | "height" => {
            let axis = if property == "width" {
                Axis::Horizontal
            } else {
                Axis::Vertical
            };
            if value.trim() == "100%" {
                StyleEffect::Sizing {
                    axis,
                    mode: SizingMode::Fill,
                }
            } else {
                match (parse_pixels(value), axis) {
                    (Some(width), Axis::Horizontal) => StyleEffect::Width { width },
                    (Some(height), Axis::Vertical) => StyleEffect::Height { height },
                    (None, _) => raw(property, value),
                }
            }
        }
        "gap" => match parse_pixels(value) {
            Some(spacing) => StyleEffect::ItemSpacing { spacing },
            None => raw(property, value),
        },
        "opacity" => match value.trim().parse::<f32>() {
            Ok(opacity) => StyleEffect::Opacity {
                opacity: opacity.clamp(0.0, 1.0),
            },
            Err(_) => raw(property, value),
        },
        "display" if value.trim() == "none" => StyleEffect::Visible { visible: false },
        "flex-direction" => match value.trim() {
            "row" | "row-reverse" => StyleEffect::LayoutMode {
                layout: LayoutMode::Horizontal,
            },
            "column" | "column-reverse" => StyleEffect::LayoutMode {
                layout: LayoutMode::Vertical,
            },
            _ => raw(property, value),
        },
        "border" => match border_shorthand(value) {
            Some((weight, color)) => StyleEffect::Stroke {
                paint: Paint::solid(color),
                weight,
            },
            None => raw(property, value),
        },
        _ => raw(property, value),
    };
    out.push(effect);
}

/// Expand a 1 to 4 value `padding` shorthand into top, right, bottom, left.
pub fn padding_shorthand(value: &str) -> Option<[f32; 4]> {
    let values = value
        .split_whitespace()
        .map(parse_pixels)
        .collect::<Option<Vec<f32>>>()?;
    match values.as_slice() {
        [all] => Some([*all; 4]),
        [v, h] => Some([*v, *h, *v, *h]),
        [t, h, b] => Some([*t, *h, *b, *h]),
        [t, r, b, l] => Some([*t, *r, *b, *l]),
        _ => None,
    }
}

/// `1px solid #ccc` to a weight and colour. Order of the parts is free.
fn border_shorthand(value: &str) -> Option<(f32, Rgb)> {
    let mut weight = None;
    let mut color = None;
    for part in value.split_whitespace() {
        if let Some(px) = parse_pixels(part) {
            weight = Some(px);
        } else if let Some(c) = parse_color(part) {
            color = Some(c.rgb());
        }
    }
    Some((weight.unwrap_or(1.0), color?))
}
