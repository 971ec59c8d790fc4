//! Buttons, icons, avatars, badges, chips and separators.

use crate::colors::button_colors;
use crate::context::{collapse_whitespace, Component, Converter, TextStyle};
use crate::error::{ProcessResult, ProcessorError};
use crate::variants::DISABLED_OPACITY;
use quasar_style::{contrast_color, icon_size, parse_pixels, ShapeVariant};
use quasar_template::{is_framework_tag, Element};
use visual_node::{LayoutMode, NodeId, Padding, Rgb, ShapeKind};

/// Horizontal padding, vertical padding and font size per button size.
fn button_metrics(size: Option<&str>) -> (f32, f32, f32) {
    match size {
        Some("xs") => (8.0, 4.0, 12.0),
        Some("sm") => (10.0, 6.0, 13.0),
        Some("lg") => (20.0, 12.0, 16.0),
        Some("xl") => (24.0, 16.0, 18.0),
        _ => (16.0, 8.0, 14.0),
    }
}

/// Side of a round icon-only button.
fn round_side(size: Option<&str>) -> f32 {
    match size {
        Some("xs") => 24.0,
        Some("sm") => 32.0,
        Some("lg") => 48.0,
        Some("xl") => 64.0,
        _ => 40.0,
    }
}

struct ButtonParts {
    frame: NodeId,
    wrapper: NodeId,
    content: NodeId,
}

fn button_frames(cx: &mut Converter<'_>) -> ProcessResult<ButtonParts> {
    let frame = cx.frame("q-btn", LayoutMode::Horizontal)?;
    cx.center(frame)?;
    let wrapper = cx.clear_frame("q-btn__wrapper", LayoutMode::Horizontal)?;
    cx.center(wrapper)?;
    let content = cx.clear_frame("q-btn__content", LayoutMode::Horizontal)?;
    cx.center(content)?;
    cx.spacing(content, 8.0)?;
    cx.append(wrapper, content)?;
    cx.append(frame, wrapper)?;
    Ok(ButtonParts {
        frame,
        wrapper,
        content,
    })
}

/// Button text: `label`, else the text written inside the element, skipping
/// framework children such as tooltips and menus. Round icon buttons and
/// other icon-only buttons have none; a button with neither gets "Button".
fn button_label(c: &Component<'_>, has_icon: bool) -> String {
    if let Some(label) = c.prop("label") {
        return collapse_whitespace(label);
    }
    if has_icon && c.analysis.shape_variant == ShapeVariant::Round {
        return String::new();
    }
    let text = collapse_whitespace(&inline_text(c.element));
    if text.is_empty() && !has_icon {
        "Button".to_string()
    } else {
        text
    }
}

fn inline_text(element: &Element) -> String {
    let mut parts = Vec::new();
    for child in &element.children {
        if child.is_text() {
            parts.extend(child.text.clone());
        } else if !is_framework_tag(&child.tag) {
            parts.push(child.deep_text());
        }
    }
    parts.join(" ")
}

pub fn button(cx: &mut Converter<'_>, c: &Component<'_>) -> ProcessResult<NodeId> {
    let a = &c.analysis;
    let size = a.size_variant.as_deref();
    let (h, v, font_size) = button_metrics(size);
    let icon = c.prop("icon");
    let icon_right = c.prop("icon-right");
    let label = button_label(c, icon.is_some() || icon_right.is_some());

    let parts = button_frames(cx)?;
    let mut padding = cx.density_padding(h, v, a.is_dense);
    let icon_px = (font_size * 1.7).round();

    if let Some(name) = icon {
        let node = cx.icon(name, icon_px, None)?;
        cx.append(parts.content, node)?;
    }
    if !label.is_empty() {
        let text = cx.text(&label, TextStyle::new(font_size).medium())?;
        cx.append(parts.content, text)?;
    }
    if let Some(name) = icon_right {
        let node = cx.icon(name, icon_px, None)?;
        cx.append(parts.content, node)?;
    }

    match a.shape_variant {
        ShapeVariant::Rounded => cx.radius(parts.frame, 28.0)?,
        ShapeVariant::Square => cx.radius(parts.frame, 0.0)?,
        ShapeVariant::Round if label.is_empty() => {
            let side = round_side(size);
            cx.size(parts.frame, side, side)?;
            cx.radius(parts.frame, side / 2.0)?;
            padding = Padding::ZERO;
        }
        ShapeVariant::Round => {
            cx.radius(parts.frame, 9999.0)?;
            padding = Padding::uniform(padding.max());
        }
        ShapeVariant::Default => cx.radius(parts.frame, 4.0)?,
    }
    cx.padding(parts.wrapper, padding)?;
    cx.builder_mut().set_metadata(parts.frame, "label", &label)?;

    let text_color = button_colors(cx, parts.frame, a)?;

    if a.is_loading {
        let spinner = cx.frame("q-btn__loading", LayoutMode::None)?;
        cx.size(spinner, 16.0, 16.0)?;
        cx.radius(spinner, 8.0)?;
        cx.fill(spinner, text_color)?;
        cx.builder_mut().insert_child(parts.content, 0, spinner)?;
    }
    if a.is_disabled {
        cx.opacity(parts.frame, DISABLED_OPACITY)?;
    }
    cx.mark_colors_applied(parts.frame)?;
    Ok(parts.frame)
}

pub fn icon(cx: &mut Converter<'_>, c: &Component<'_>) -> ProcessResult<NodeId> {
    let text = c.text();
    let name = c.prop("name").unwrap_or(text.as_str());
    let color = c
        .prop("color")
        .and_then(|name| cx.color(name))
        .or_else(|| cx.text_color(&c.analysis));
    let node = cx.icon(name, icon_size(c.prop("size")), color)?;
    cx.mark_colors_applied(node)?;
    Ok(node)
}

fn avatar_size(c: &Component<'_>) -> ProcessResult<f32> {
    Ok(match c.prop("size") {
        Some("xs") => 24.0,
        Some("sm") => 32.0,
        Some("md") => 48.0,
        Some("lg") => 56.0,
        Some("xl") => 64.0,
        _ => c.number("size")?.unwrap_or(48.0),
    })
}

pub fn avatar(cx: &mut Converter<'_>, c: &Component<'_>) -> ProcessResult<NodeId> {
    let size = avatar_size(c)?;
    let frame = cx.frame("q-avatar", LayoutMode::Horizontal)?;
    cx.center(frame)?;
    cx.size(frame, size, size)?;
    let radius = match c.analysis.shape_variant {
        ShapeVariant::Square => 0.0,
        ShapeVariant::Rounded => 4.0,
        _ => size / 2.0,
    };
    cx.radius(frame, radius)?;

    let fill = cx
        .main_color(&c.analysis)
        .or_else(|| cx.bg_color(&c.analysis))
        .unwrap_or(Rgb::grey(0.8));
    cx.fill(frame, fill)?;
    let ink = cx
        .text_color(&c.analysis)
        .unwrap_or_else(|| contrast_color(fill));

    let image = c
        .element
        .element_children()
        .any(|child| matches!(child.tag.as_str(), "img" | "q-img"));
    let content = if let Some(name) = c.prop("icon") {
        Some(cx.icon(name, (size * 0.6).round(), Some(ink))?)
    } else if image {
        let placeholder = cx.rect("q-avatar__image", size, size, Rgb::grey(0.7))?;
        cx.radius(placeholder, radius)?;
        Some(placeholder)
    } else {
        let text = collapse_whitespace(&c.element.deep_text());
        match text.chars().next() {
            Some(first) => {
                let letter: String = first.to_uppercase().collect();
                let style = TextStyle::new((size * 0.4).round()).medium().color(ink);
                Some(cx.text(&letter, style)?)
            }
            None => None,
        }
    };
    if let Some(content) = content {
        cx.append(frame, content)?;
    }
    cx.mark_colors_applied(frame)?;
    Ok(frame)
}

pub fn badge(cx: &mut Converter<'_>, c: &Component<'_>) -> ProcessResult<NodeId> {
    let name = if c.flag("floating") {
        "q-badge (floating)"
    } else {
        "q-badge"
    };
    let frame = cx.frame(name, LayoutMode::Horizontal)?;
    cx.center(frame)?;
    cx.radius(frame, 10.0)?;
    cx.pad(frame, 6.0, 2.0)?;

    let main = cx
        .main_color(&c.analysis)
        .or_else(|| cx.bg_color(&c.analysis))
        .or_else(|| cx.color("negative"))
        .unwrap_or(Rgb::new(0.76, 0.0, 0.08));
    let ink = if c.flag("outline") {
        cx.clear_fill(frame)?;
        cx.stroke(frame, main, 1.0)?;
        cx.text_color(&c.analysis).unwrap_or(main)
    } else {
        cx.fill(frame, main)?;
        cx.text_color(&c.analysis)
            .unwrap_or_else(|| contrast_color(main))
    };

    if let Some(label) = c.label() {
        let text = cx.text(&label, TextStyle::new(12.0).color(ink))?;
        cx.append(frame, text)?;
    }
    cx.mark_colors_applied(frame)?;
    Ok(frame)
}

pub fn chip(cx: &mut Converter<'_>, c: &Component<'_>) -> ProcessResult<NodeId> {
    let a = &c.analysis;
    let frame = cx.frame("q-chip", LayoutMode::Horizontal)?;
    cx.center(frame)?;
    cx.spacing(frame, 4.0)?;
    let padding = cx.density_padding(12.0, 4.0, a.is_dense);
    cx.padding(frame, padding)?;
    let pill = a.shape_variant != ShapeVariant::Square && !a.is_dense;
    cx.radius(frame, if pill { 16.0 } else { 4.0 })?;

    let main = cx.main_color(a).or_else(|| cx.bg_color(a));
    let ink = if c.flag("outline") {
        let stroke = main.unwrap_or(Rgb::grey(0.7));
        cx.fill(frame, Rgb::WHITE)?;
        cx.stroke(frame, stroke, 1.0)?;
        cx.text_color(a).unwrap_or(stroke)
    } else {
        let fill = main.unwrap_or(Rgb::grey(0.9));
        cx.fill(frame, fill)?;
        cx.text_color(a).unwrap_or_else(|| contrast_color(fill))
    };

    if let Some(name) = c.prop("icon") {
        let node = cx.icon(name, 16.0, Some(ink))?;
        cx.append(frame, node)?;
    }
    if let Some(label) = c.label() {
        let text = cx.text(&label, TextStyle::new(12.0).color(ink))?;
        cx.append(frame, text)?;
    }
    if c.flag("removable") {
        let close = cx.text("×", TextStyle::new(12.0).color(ink))?;
        cx.set_name(close, "q-chip__remove")?;
        cx.append(frame, close)?;
    }
    if a.is_disabled {
        cx.opacity(frame, DISABLED_OPACITY)?;
    }
    cx.mark_colors_applied(frame)?;
    Ok(frame)
}

pub fn separator(cx: &mut Converter<'_>, c: &Component<'_>) -> ProcessResult<NodeId> {
    let thickness = match c.prop("size") {
        Some(raw) => match parse_pixels(raw) {
            Some(px) => px,
            None if c.is_bound("size") => 1.0,
            None => return Err(ProcessorError::invalid_value("size", raw)),
        },
        None => 1.0,
    };
    let vertical = c.flag("vertical");
    let mut length = if vertical { 100.0 } else { 300.0 };
    if c.flag("spaced") {
        length -= 2.0 * 16.0;
    }
    let (width, height) = if vertical {
        (thickness, length)
    } else {
        (length, thickness)
    };
    let color = cx.main_color(&c.analysis).unwrap_or(Rgb::grey(0.9));
    let node = cx.shape(ShapeKind::Rectangle, width, height, color)?;
    cx.set_name(node, "q-separator")?;
    if c.flag("inset") {
        cx.radius(node, thickness / 2.0)?;
    }
    cx.mark_colors_applied(node)?;
    Ok(node)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processors::testing::{build, build_with, texts};
    use crate::settings::{Density, Settings};
    use pretty_assertions::assert_eq;
    use quasar_style::resolve_color;
    use visual_node::VisualNode;

    fn wrapper(button: &VisualNode) -> &visual_node::Container {
        button.find("q-btn__wrapper").unwrap().as_container().unwrap()
    }

    #[test]
    fn test_icon_only_round_button() {
        let node = build(r#"<q-btn round icon="star" />"#);
        let frame = node.as_container().unwrap();
        assert_eq!(frame.width, Some(40.0));
        assert_eq!(frame.width, frame.height);
        assert_eq!(frame.corner_radius, 20.0);
        assert_eq!(frame.metadata.get("label").map(String::as_str), Some(""));
        assert_eq!(wrapper(&node).padding, Padding::ZERO);
    }

    #[test]
    fn test_round_icon_button_with_tooltip() {
        let node = build(r#"<q-btn round icon="add"><q-tooltip>Add item</q-tooltip></q-btn>"#);
        let frame = node.as_container().unwrap();
        assert_eq!((frame.width, frame.height), (Some(40.0), Some(40.0)));
        assert_eq!(frame.corner_radius, 20.0);
        assert_eq!(frame.metadata.get("label").map(String::as_str), Some(""));
        assert!(!texts(&node).contains(&"Add item".to_string()));
    }

    #[test]
    fn test_button_label_skips_framework_children() {
        let node = build("<q-btn>Share<q-menu><q-item>Copy link</q-item></q-menu></q-btn>");
        assert_eq!(texts(&node), vec!["Share"]);
    }

    #[test]
    fn test_button_fallback_label() {
        let node = build("<q-btn />");
        assert_eq!(texts(&node), vec!["Button"]);
    }

    #[test]
    fn test_button_label_from_nested_text() {
        let node = build("<q-btn><span>Save</span> now</q-btn>");
        assert_eq!(texts(&node), vec!["Save now"]);
    }

    #[test]
    fn test_button_sizes_and_density() {
        let node = build(r#"<q-btn size="lg" label="Go" />"#);
        assert_eq!(wrapper(&node).padding, Padding::symmetric(20.0, 12.0));
        assert_eq!(node.texts()[0].font_size, 16.0);

        let node = build(r#"<q-btn dense label="Go" />"#);
        assert_eq!(wrapper(&node).padding, Padding::symmetric(12.0, 6.0));

        let settings = Settings {
            component_density: Density::Compact,
            ..Settings::default()
        };
        let node = build_with(r#"<q-btn label="Go" />"#, &settings);
        assert_eq!(wrapper(&node).padding, Padding::symmetric(12.0, 6.0));
    }

    #[test]
    fn test_round_button_with_text_is_pill() {
        let node = build(r#"<q-btn round label="Go" />"#);
        assert_eq!(node.as_container().unwrap().corner_radius, 9999.0);
        assert_eq!(wrapper(&node).padding, Padding::uniform(16.0));
    }

    #[test]
    fn test_disabled_keeps_color() {
        let node = build(r#"<q-btn disable color="primary" label="No" />"#);
        let frame = node.as_container().unwrap();
        assert_eq!(frame.fill_color(), resolve_color("primary"));
        assert!(frame.opacity < 1.0);
    }

    #[test]
    fn test_loading_indicator_first() {
        let node = build(r#"<q-btn loading label="Wait" />"#);
        let content = node.find("q-btn__content").unwrap();
        let spinner = content.children()[0].as_container().unwrap();
        assert_eq!(spinner.name, "q-btn__loading");
        assert_eq!(spinner.width, Some(16.0));
        assert_eq!(spinner.fill_color(), Some(Rgb::WHITE));
    }

    #[test]
    fn test_colors_disabled_use_fallback_primary() {
        let settings = Settings {
            preserve_quasar_colors: false,
            ..Settings::default()
        };
        let node = build_with(r#"<q-btn color="negative" label="x" />"#, &settings);
        assert_eq!(
            node.as_container().unwrap().fill_color(),
            Some(quasar_style::palette::FALLBACK_PRIMARY)
        );
    }

    #[test]
    fn test_avatar_letter_and_invalid_size() {
        let node = build(r#"<q-avatar color="primary">jd</q-avatar>"#);
        assert_eq!(node.as_container().unwrap().width, Some(48.0));
        assert_eq!(texts(&node), vec!["J"]);

        // unparseable size falls back to the generic card
        let node = build(r#"<q-avatar size="huge">x</q-avatar>"#);
        assert_eq!(texts(&node)[0], "Component q-avatar");
    }

    #[test]
    fn test_chip_and_badge() {
        let chip = build(r#"<q-chip removable icon="star">Tag</q-chip>"#);
        assert_eq!(chip.as_container().unwrap().corner_radius, 16.0);
        assert_eq!(chip.children().last().unwrap().name(), "q-chip__remove");

        let badge = build(r#"<q-badge floating label="3" />"#);
        assert_eq!(badge.name(), "q-badge (floating)");
        assert_eq!(badge.fills()[0].solid_color(), resolve_color("negative"));
    }

    #[test]
    fn test_separator_dimensions() {
        let node = build(r#"<q-separator spaced size="2px" />"#);
        let shape = node.as_shape().unwrap();
        assert_eq!((shape.width, shape.height), (268.0, 2.0));
        let node = build("<q-separator vertical />");
        let shape = node.as_shape().unwrap();
        assert_eq!((shape.width, shape.height), (1.0, 100.0));
    }
}
