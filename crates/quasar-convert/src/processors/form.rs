//! Form controls.

use super::build_synthetic;
use crate::context::{collapse_whitespace, Component, Converter, TextStyle};
use crate::error::ProcessResult;
use crate::variants::DISABLED_OPACITY;
use quasar_style::contrast_color;
use quasar_template::Element;
use serde_json::Value;
use visual_node::{CounterAlign, LayoutMode, NodeId, Paint, Rgb, ShapeKind};

const ERROR_RED: Rgb = Rgb::new(0.9, 0.2, 0.2);
const CONTROL_WIDTH: f32 = 250.0;

/// Look of the control box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldStyle {
    Filled,
    Outlined,
    Underlined,
}

impl FieldStyle {
    fn of(c: &Component<'_>) -> Self {
        if c.flag("filled") {
            FieldStyle::Filled
        } else if c.flag("outlined") || c.flag("standout") {
            FieldStyle::Outlined
        } else {
            FieldStyle::Underlined
        }
    }
}

struct FieldParts {
    frame: NodeId,
    control: NodeId,
}

/// Label, control box and the error or hint line shared by input-like fields.
/// The caller fills the control.
fn field_frame(cx: &mut Converter<'_>, c: &Component<'_>, kind: &str) -> ProcessResult<FieldParts> {
    let frame = cx.clear_frame(&format!("q-{kind}"), LayoutMode::Vertical)?;
    cx.spacing(frame, 4.0)?;
    if let Some(label) = c.prop("label") {
        let node = cx.text(label, TextStyle::new(14.0).medium().grey(0.4))?;
        cx.append(frame, node)?;
    }

    let control = cx.clear_frame(&format!("q-{kind}__control"), LayoutMode::Horizontal)?;
    cx.width(control, CONTROL_WIDTH)?;
    let base = c.size_factor();
    let padding = cx.density_padding(12.0 * base, 8.0 * base, c.analysis.is_dense);
    cx.padding(control, padding)?;
    cx.spacing(control, 8.0)?;
    cx.align_items(control, CounterAlign::Center)?;

    let main = cx.main_color(&c.analysis);
    match FieldStyle::of(c) {
        FieldStyle::Filled => {
            match main {
                Some(color) => cx.fill_paint(control, Paint::solid_with_opacity(color, 0.1))?,
                None => cx.fill(control, Rgb::grey(0.95))?,
            }
            cx.radius(control, 4.0)?;
        }
        FieldStyle::Outlined => {
            cx.fill(control, Rgb::WHITE)?;
            cx.stroke(control, main.unwrap_or(Rgb::grey(0.8)), 1.0)?;
            cx.radius(control, 4.0)?;
        }
        FieldStyle::Underlined => {
            cx.bottom_stroke(control, main.unwrap_or(Rgb::grey(0.8)), 1.0)?;
        }
    }
    cx.append(frame, control)?;
    Ok(FieldParts { frame, control })
}

/// Error message when `error` is set, else the hint.
fn field_footer(cx: &mut Converter<'_>, c: &Component<'_>, frame: NodeId) -> ProcessResult<()> {
    let footer = match (c.flag("error"), c.prop("error-message"), c.prop("hint")) {
        (true, Some(message), _) => Some((message, TextStyle::new(12.0).color(ERROR_RED))),
        (_, _, Some(hint)) => Some((hint, TextStyle::new(12.0).grey(0.6))),
        _ => None,
    };
    if let Some((message, style)) = footer {
        let node = cx.text(message, style)?;
        cx.append(frame, node)?;
    }
    if c.analysis.is_disabled {
        cx.opacity(frame, DISABLED_OPACITY)?;
    }
    cx.mark_colors_applied(frame)?;
    Ok(())
}

fn value_text(
    cx: &mut Converter<'_>,
    control: NodeId,
    value: Option<&str>,
    fallback: &str,
) -> ProcessResult<()> {
    let (text, grey) = match value {
        Some(value) => (value, 0.2),
        None => (fallback, 0.5),
    };
    let node = cx.text(text, TextStyle::new(14.0).grey(grey))?;
    cx.append(control, node)?;
    Ok(())
}

pub fn input(cx: &mut Converter<'_>, c: &Component<'_>) -> ProcessResult<NodeId> {
    let parts = field_frame(cx, c, "input")?;
    let value = c
        .prop("placeholder")
        .or_else(|| c.prop("label"))
        .or_else(|| c.prop("hint"));
    value_text(cx, parts.control, value, "Value")?;
    field_footer(cx, c, parts.frame)?;
    Ok(parts.frame)
}

pub fn select(cx: &mut Converter<'_>, c: &Component<'_>) -> ProcessResult<NodeId> {
    let parts = field_frame(cx, c, "select")?;
    let value = c
        .prop("display-value")
        .or_else(|| c.prop("placeholder"))
        .or_else(|| c.prop("label"));
    value_text(cx, parts.control, value, "Select an option")?;

    let dropdown = cx.clear_frame("q-select__dropdown-icon", LayoutMode::Horizontal)?;
    cx.size(dropdown, 24.0, 24.0)?;
    cx.center(dropdown)?;
    let arrow = cx.text("▼", TextStyle::new(12.0).grey(0.4))?;
    cx.append(dropdown, arrow)?;
    cx.append(parts.control, dropdown)?;

    field_footer(cx, c, parts.frame)?;
    Ok(parts.frame)
}

/// `q-field`: the input chrome around arbitrary content.
pub fn field(cx: &mut Converter<'_>, c: &Component<'_>) -> ProcessResult<NodeId> {
    let parts = field_frame(cx, c, "field")?;
    if c.element.element_children().next().is_some() {
        cx.append_children(parts.control, c.element)?;
    } else {
        let text = c.text();
        value_text(cx, parts.control, Some(text.as_str()).filter(|t| !t.is_empty()), "Field")?;
    }
    field_footer(cx, c, parts.frame)?;
    Ok(parts.frame)
}

/// Whether a checkbox or toggle is on.
fn is_checked(c: &Component<'_>) -> bool {
    ["value", "checked", "model-value"]
        .iter()
        .any(|name| c.truthy(name))
}

fn selection_label(cx: &mut Converter<'_>, c: &Component<'_>, kind: &str, row: NodeId) -> ProcessResult<()> {
    if let Some(label) = c.label() {
        let ink = cx.text_color(&c.analysis).unwrap_or(Rgb::BLACK);
        let node = cx.text(&label, TextStyle::new(14.0).color(ink))?;
        cx.set_name(node, &format!("q-{kind}__label"))?;
        cx.append(row, node)?;
    }
    Ok(())
}

fn selection_row(cx: &mut Converter<'_>, kind: &str) -> ProcessResult<NodeId> {
    let row = cx.clear_frame(&format!("q-{kind}"), LayoutMode::Horizontal)?;
    cx.spacing(row, 8.0)?;
    cx.align_items(row, CounterAlign::Center)?;
    Ok(row)
}

fn finish_selection(cx: &mut Converter<'_>, c: &Component<'_>, row: NodeId) -> ProcessResult<NodeId> {
    if c.analysis.is_disabled {
        cx.opacity(row, DISABLED_OPACITY)?;
    }
    cx.mark_colors_applied(row)?;
    Ok(row)
}

pub fn checkbox(cx: &mut Converter<'_>, c: &Component<'_>) -> ProcessResult<NodeId> {
    let row = selection_row(cx, "checkbox")?;
    let inner = cx.frame("q-checkbox__inner", LayoutMode::Horizontal)?;
    cx.size(inner, 20.0, 20.0)?;
    cx.radius(inner, 4.0)?;
    cx.center(inner)?;
    if is_checked(c) {
        let main = cx.main_or_primary(&c.analysis);
        cx.fill(inner, main)?;
        let check = cx.text("✓", TextStyle::new(14.0).bold().color(contrast_color(main)))?;
        cx.set_name(check, "q-checkbox__check")?;
        cx.append(inner, check)?;
    } else {
        cx.fill(inner, Rgb::WHITE)?;
        cx.stroke(inner, Rgb::grey(0.7), 2.0)?;
    }
    cx.append(row, inner)?;
    selection_label(cx, c, "checkbox", row)?;
    finish_selection(cx, c, row)
}

pub fn radio(cx: &mut Converter<'_>, c: &Component<'_>) -> ProcessResult<NodeId> {
    let row = selection_row(cx, "radio")?;
    let checked = match (c.prop("val"), c.prop("model-value")) {
        (Some(val), Some(model)) if !c.is_bound("model-value") => val == model,
        _ => c.flag("checked"),
    };

    let container = cx.clear_frame("q-radio__container", LayoutMode::Horizontal)?;
    let inner = cx.filled_frame("q-radio__inner", LayoutMode::Horizontal, Rgb::WHITE)?;
    cx.size(inner, 20.0, 20.0)?;
    cx.radius(inner, 10.0)?;
    cx.center(inner)?;
    if checked {
        let main = cx.main_or_primary(&c.analysis);
        cx.stroke(inner, main, 2.0)?;
        let dot = cx.ellipse("q-radio__dot", 10.0, main)?;
        cx.append(inner, dot)?;
    } else {
        cx.stroke(inner, Rgb::grey(0.7), 2.0)?;
    }
    cx.append(container, inner)?;
    cx.append(row, container)?;
    selection_label(cx, c, "radio", row)?;
    finish_selection(cx, c, row)
}

pub fn toggle(cx: &mut Converter<'_>, c: &Component<'_>) -> ProcessResult<NodeId> {
    let row = selection_row(cx, "toggle")?;
    let on = is_checked(c);
    let main = cx.main_or_primary(&c.analysis);

    let inner = cx.clear_frame("q-toggle__inner", LayoutMode::None)?;
    cx.size(inner, 36.0, 20.0)?;
    let track = cx.rect("q-toggle__track", 36.0, 14.0, Rgb::grey(0.7))?;
    cx.radius(track, 7.0)?;
    cx.builder_mut().set_position(track, 0.0, 3.0)?;
    let thumb = cx.builder_mut().create_shape(ShapeKind::Ellipse, 20.0, 20.0);
    cx.set_name(thumb, "q-toggle__thumb")?;
    if on {
        cx.fill_paint(track, Paint::solid_with_opacity(main, 0.5))?;
        cx.fill(thumb, main)?;
        cx.builder_mut().set_position(thumb, 16.0, 0.0)?;
    } else {
        cx.fill(thumb, Rgb::WHITE)?;
        cx.stroke(thumb, Rgb::grey(0.8), 1.0)?;
        cx.builder_mut().set_position(thumb, 0.0, 0.0)?;
    }
    cx.append(inner, track)?;
    cx.append(inner, thumb)?;
    cx.append(row, inner)?;
    selection_label(cx, c, "toggle", row)?;
    finish_selection(cx, c, row)
}

/// A static `options` array as `(label, value)` pairs. Anything that is not
/// a JSON array of objects is ignored.
fn static_options(raw: &str) -> Option<Vec<(String, String)>> {
    let Value::Array(items) = serde_json::from_str::<Value>(raw).ok()? else {
        return None;
    };
    let options = items
        .iter()
        .filter_map(|item| {
            let label = item.get("label")?;
            let value = item.get("value").unwrap_or(label);
            Some((scalar(label), scalar(value)))
        })
        .collect();
    Some(options)
}

/// JSON scalar as display text.
pub(crate) fn scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

pub fn option_group(cx: &mut Converter<'_>, c: &Component<'_>) -> ProcessResult<NodeId> {
    let layout = if c.flag("inline") {
        LayoutMode::Horizontal
    } else {
        LayoutMode::Vertical
    };
    let frame = cx.clear_frame("q-option-group", layout)?;
    cx.spacing(frame, 8.0)?;

    let Some(options) = c.prop("options").and_then(static_options) else {
        cx.append_children(frame, c.element)?;
        return Ok(frame);
    };

    let kind = match c.prop("type") {
        Some(kind @ ("checkbox" | "toggle")) => kind,
        _ => "radio",
    };
    let selected = c.prop("model-value").filter(|_| !c.is_bound("model-value"));
    for (label, value) in options {
        let mut element = Element::new(format!("q-{kind}")).with_attr("label", label);
        if let Some(color) = c.prop("color") {
            element = element.with_attr("color", color);
        }
        if selected == Some(value.as_str()) {
            element = element.with_attr("checked", "");
        }
        let processor: fn(&mut Converter<'_>, &Component<'_>) -> ProcessResult<NodeId> = match kind {
            "checkbox" => checkbox,
            "toggle" => toggle,
            _ => radio,
        };
        let node = build_synthetic(cx, &element, processor)?;
        cx.append(frame, node)?;
    }
    Ok(frame)
}

/// Plain vertical stack for `q-form` and `q-option`.
pub fn stack(cx: &mut Converter<'_>, c: &Component<'_>) -> ProcessResult<NodeId> {
    let frame = cx.clear_frame(c.tag(), LayoutMode::Vertical)?;
    cx.spacing(frame, 16.0)?;
    if let Some(label) = c.prop("label") {
        let node = cx.text(&collapse_whitespace(label), TextStyle::new(14.0))?;
        cx.append(frame, node)?;
    }
    cx.append_children(frame, c.element)?;
    Ok(frame)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processors::testing::{build, child_names, texts};
    use pretty_assertions::assert_eq;
    use quasar_style::resolve_color;
    use visual_node::StrokeWeights;

    #[test]
    fn test_input_styles() {
        let node = build(r#"<q-input outlined label="Name" hint="Your full name" />"#);
        assert_eq!(child_names(&node), vec!["Name", "q-input__control", "Your full name"]);
        let control = node.children()[1].as_container().unwrap();
        assert_eq!(control.width, Some(250.0));
        assert_eq!(control.corner_radius, 4.0);
        assert_eq!(control.strokes[0].solid_color(), Some(Rgb::grey(0.8)));

        let node = build(r#"<q-input color="positive" />"#);
        let control = node.find("q-input__control").unwrap().as_container().unwrap();
        assert_eq!(control.stroke_weights, StrokeWeights::bottom(1.0));
        assert_eq!(control.strokes[0].solid_color(), resolve_color("positive"));
        assert_eq!(texts(&node), vec!["Value"]);
    }

    #[test]
    fn test_input_error_wins_over_hint() {
        let node = build(r#"<q-input filled error error-message="Required" hint="h" />"#);
        let last = node.children().last().unwrap().as_text().unwrap();
        assert_eq!(last.characters, "Required");
        assert_eq!(last.color(), Some(ERROR_RED));
    }

    #[test]
    fn test_select_dropdown() {
        let node = build(r#"<q-select label="Fruit" :options="options" />"#);
        let control = node.find("q-select__control").unwrap();
        assert_eq!(child_names(control), vec!["Fruit", "q-select__dropdown-icon"]);
        let node = build("<q-select />");
        assert!(texts(&node).contains(&"Select an option".to_string()));
    }

    #[test]
    fn test_checkbox_states() {
        let node = build(r#"<q-checkbox :model-value="true" label="Agree" color="secondary" />"#);
        let inner = node.find("q-checkbox__inner").unwrap();
        assert_eq!(inner.fills()[0].solid_color(), resolve_color("secondary"));
        assert!(node.find("q-checkbox__check").is_some());
        assert!(node.find("q-checkbox__label").is_some());

        let node = build(r#"<q-checkbox v-model="agree" label="Agree" disable />"#);
        assert!(node.find("q-checkbox__check").is_none());
        assert_eq!(node.opacity(), DISABLED_OPACITY);
    }

    #[test]
    fn test_radio_and_toggle() {
        let node = build(r#"<q-radio val="a" model-value="a" label="A" />"#);
        assert!(node.find("q-radio__dot").is_some());
        let node = build(r#"<q-radio val="b" model-value="a" label="B" />"#);
        assert!(node.find("q-radio__dot").is_none());

        let node = build(r#"<q-toggle checked label="On" />"#);
        let thumb = node.find("q-toggle__thumb").unwrap().as_shape().unwrap();
        assert_eq!(thumb.position, Some((16.0, 0.0)));
    }

    #[test]
    fn test_option_group_from_static_options() {
        let node = build(
            r#"<q-option-group type="checkbox" model-value="b" :options='[{"label":"A","value":"a"},{"label":"B","value":"b"}]' />"#,
        );
        assert_eq!(child_names(&node), vec!["q-checkbox", "q-checkbox"]);
        assert!(node.children()[0].find("q-checkbox__check").is_none());
        assert!(node.children()[1].find("q-checkbox__check").is_some());
    }
}
