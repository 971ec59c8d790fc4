//! Lists, tables, carousels and banners.

use super::form::scalar;
use super::{build_synthetic, is_empty, selected_child, text_element};
use crate::context::{collapse_whitespace, Component, Converter, TextStyle};
use crate::error::{ProcessResult, ProcessorError};
use quasar_style::contrast_color;
use quasar_template::Element;
use serde_json::{json, Value};
use visual_node::{AxisAlign, CounterAlign, LayoutMode, NodeId, Rgb, Shadow};

const LIST_WIDTH: f32 = 300.0;
const TABLE_WIDTH: f32 = 600.0;
const CAROUSEL_WIDTH: f32 = 400.0;
const SAMPLE_ITEMS: usize = 3;

pub fn list(cx: &mut Converter<'_>, c: &Component<'_>) -> ProcessResult<NodeId> {
    let frame = cx.filled_frame("q-list", LayoutMode::Vertical, Rgb::WHITE)?;
    if c.flag("bordered") {
        cx.stroke(frame, Rgb::grey(0.9), 1.0)?;
        cx.radius(frame, 4.0)?;
    }
    let separated = c.flag("separator");
    let has_items = c.children_tagged("q-item").next().is_some();

    let mut count = 0;
    for child in &c.element.children {
        let is_item = child.tag == "q-item";
        let Some(node) = cx.convert_element(child)? else {
            continue;
        };
        if is_item {
            count += 1;
            push_item(cx, frame, node, count, separated)?;
        } else {
            cx.append(frame, node)?;
        }
    }
    if !has_items {
        for n in 1..=SAMPLE_ITEMS {
            let sample = text_element("q-item", &format!("Item {n}"));
            let node = build_synthetic(cx, &sample, item)?;
            count += 1;
            push_item(cx, frame, node, count, separated)?;
        }
    }
    Ok(frame)
}

/// Append the `count`th item, with a separator line before all but the first.
fn push_item(
    cx: &mut Converter<'_>,
    list: NodeId,
    node: NodeId,
    count: usize,
    separated: bool,
) -> ProcessResult<()> {
    if separated && count > 1 {
        let line = cx.rect("q-separator", LIST_WIDTH, 1.0, Rgb::grey(0.9))?;
        cx.append(list, line)?;
    }
    cx.set_name(node, &format!("q-item-{count}"))?;
    cx.append(list, node)?;
    Ok(())
}

pub fn item(cx: &mut Converter<'_>, c: &Component<'_>) -> ProcessResult<NodeId> {
    let frame = cx.filled_frame("q-item", LayoutMode::Horizontal, Rgb::WHITE)?;
    let padding = cx.density_padding(16.0, 12.0, c.analysis.is_dense);
    cx.padding(frame, padding)?;
    cx.spacing(frame, 16.0)?;
    cx.align_items(frame, CounterAlign::Center)?;
    if c.flag("clickable") {
        cx.shadow(frame, Shadow::black(0.05, 0.0, 1.0, 2.0))?;
    }
    if is_empty(c.element) {
        let text = cx.text("Item", TextStyle::default())?;
        cx.append(frame, text)?;
    } else {
        cx.append_children(frame, c.element)?;
    }
    Ok(frame)
}

/// Typography of a `q-item-label` by its modifier attribute.
fn label_style(label: &Element) -> TextStyle {
    if label.has_attr("header") {
        TextStyle::new(14.0).medium().grey(0.4)
    } else if label.has_attr("caption") {
        TextStyle::new(12.0).grey(0.5)
    } else if label.has_attr("overline") {
        TextStyle::new(11.0).medium().grey(0.5)
    } else {
        TextStyle::default()
    }
}

/// Section children: loose text in `style`, item labels by modifier, and
/// everything else dispatched.
fn section_children(
    cx: &mut Converter<'_>,
    frame: NodeId,
    element: &Element,
    style: TextStyle,
) -> ProcessResult<()> {
    for child in &element.children {
        let node = if child.is_text() {
            let text = collapse_whitespace(child.text.as_deref().unwrap_or_default());
            if text.is_empty() {
                continue;
            }
            Some(cx.text(&text, style)?)
        } else if child.tag == "q-item-label" {
            let text = collapse_whitespace(&child.deep_text());
            if text.is_empty() {
                continue;
            }
            Some(cx.text(&text, label_style(child))?)
        } else {
            cx.convert_element(child)?
        };
        if let Some(node) = node {
            cx.append(frame, node)?;
        }
    }
    Ok(())
}

pub fn item_section(cx: &mut Converter<'_>, c: &Component<'_>) -> ProcessResult<NodeId> {
    let empty = is_empty(c.element);
    if c.flag("avatar") {
        let frame = cx.clear_frame("q-item-section--avatar", LayoutMode::Horizontal)?;
        cx.width(frame, 40.0)?;
        if empty {
            let circle = cx.ellipse("q-item-section__avatar", 40.0, Rgb::grey(0.8))?;
            cx.append(frame, circle)?;
        } else {
            section_children(cx, frame, c.element, TextStyle::default())?;
        }
        return Ok(frame);
    }
    if c.flag("thumbnail") {
        let frame = cx.clear_frame("q-item-section--thumbnail", LayoutMode::Horizontal)?;
        if empty {
            let thumb = cx.rect("q-item-section__thumbnail", 40.0, 40.0, Rgb::grey(0.8))?;
            cx.append(frame, thumb)?;
        } else {
            section_children(cx, frame, c.element, TextStyle::default())?;
        }
        return Ok(frame);
    }
    if c.flag("side") {
        let frame = cx.clear_frame("q-item-section--side", LayoutMode::Vertical)?;
        cx.align_items(frame, CounterAlign::Max)?;
        section_children(cx, frame, c.element, TextStyle::new(12.0).grey(0.5))?;
        return Ok(frame);
    }
    let frame = cx.clear_frame("q-item-section", LayoutMode::Vertical)?;
    cx.spacing(frame, 4.0)?;
    section_children(cx, frame, c.element, TextStyle::default())?;
    Ok(frame)
}

struct Column {
    label: String,
    field: String,
}

/// Static JSON column definitions. `label` falls back to `name`, `field` to
/// `name` and then to the label.
fn static_columns(raw: &str) -> Option<Vec<Column>> {
    let value: Value = serde_json::from_str(raw).ok()?;
    let columns: Vec<Column> = value
        .as_array()?
        .iter()
        .filter_map(|col| {
            let name = col.get("name").map(scalar);
            let label = col.get("label").map(scalar).or_else(|| name.clone())?;
            let field = col
                .get("field")
                .and_then(Value::as_str)
                .map(str::to_string)
                .or(name)
                .unwrap_or_else(|| label.clone());
            Some(Column { label, field })
        })
        .collect();
    (!columns.is_empty()).then_some(columns)
}

fn static_rows(raw: &str) -> Option<Vec<Value>> {
    let value: Value = serde_json::from_str(raw).ok()?;
    let rows: Vec<Value> = value
        .as_array()?
        .iter()
        .filter(|row| row.is_object())
        .cloned()
        .collect();
    Some(rows)
}

fn sample_columns() -> Vec<Column> {
    [("ID", "id"), ("Name", "name"), ("Email", "email")]
        .into_iter()
        .map(|(label, field)| Column {
            label: label.to_string(),
            field: field.to_string(),
        })
        .collect()
}

fn sample_rows() -> Vec<Value> {
    vec![
        json!({ "id": 1, "name": "John Doe", "email": "john@example.com" }),
        json!({ "id": 2, "name": "Jane Smith", "email": "jane@example.com" }),
    ]
}

fn table_row(
    cx: &mut Converter<'_>,
    name: &str,
    cells: &[String],
    style: TextStyle,
    cell_width: f32,
) -> ProcessResult<NodeId> {
    let row = cx.frame(name, LayoutMode::Horizontal)?;
    cx.pad(row, 12.0, 8.0)?;
    cx.spacing(row, 16.0)?;
    cx.width(row, TABLE_WIDTH)?;
    for cell in cells {
        let frame = cx.clear_frame("q-td", LayoutMode::Horizontal)?;
        cx.width(frame, cell_width)?;
        let text = cx.text(cell, style)?;
        cx.append(frame, text)?;
        cx.append(row, frame)?;
    }
    Ok(row)
}

pub fn table(cx: &mut Converter<'_>, c: &Component<'_>) -> ProcessResult<NodeId> {
    let frame = cx.filled_frame("q-table", LayoutMode::Vertical, Rgb::WHITE)?;
    cx.width(frame, TABLE_WIDTH)?;
    cx.stroke(frame, Rgb::grey(0.9), 1.0)?;
    cx.radius(frame, 4.0)?;

    if let Some(title) = c.prop("title") {
        let bar = cx.clear_frame("q-table__title", LayoutMode::Horizontal)?;
        cx.pad(bar, 12.0, 12.0)?;
        let text = cx.text(title, TextStyle::new(16.0).medium())?;
        cx.append(bar, text)?;
        cx.append(frame, bar)?;
    }

    let columns = c
        .prop("columns")
        .and_then(static_columns)
        .unwrap_or_else(sample_columns);
    let rows = c.prop("rows").and_then(static_rows).unwrap_or_else(sample_rows);
    tracing::trace!(columns = columns.len(), rows = rows.len(), "table");

    let count = columns.len() as f32;
    let cell_width = ((TABLE_WIDTH - 24.0 - 16.0 * (count - 1.0)) / count).floor();

    let labels: Vec<String> = columns.iter().map(|col| col.label.clone()).collect();
    let header = table_row(
        cx,
        "q-table__header",
        &labels,
        TextStyle::new(14.0).bold().grey(0.2),
        cell_width,
    )?;
    cx.fill(header, Rgb::grey(0.95))?;
    cx.append(frame, header)?;

    for (index, row) in rows.iter().enumerate() {
        let cells: Vec<String> = columns
            .iter()
            .map(|col| row.get(&col.field).map(scalar).unwrap_or_default())
            .collect();
        let node = table_row(
            cx,
            &format!("q-table__row-{}", index + 1),
            &cells,
            TextStyle::default(),
            cell_width,
        )?;
        let stripe = if index % 2 == 0 {
            Rgb::WHITE
        } else {
            Rgb::grey(0.98)
        };
        cx.fill(node, stripe)?;
        cx.bottom_stroke(node, Rgb::grey(0.93), 1.0)?;
        cx.append(frame, node)?;
    }
    Ok(frame)
}

/// A round arrow button at the side of a carousel.
fn carousel_arrow(cx: &mut Converter<'_>, glyph: &str) -> ProcessResult<NodeId> {
    let arrow = cx.filled_frame("q-carousel__arrow", LayoutMode::Horizontal, Rgb::WHITE)?;
    cx.size(arrow, 40.0, 40.0)?;
    cx.radius(arrow, 20.0)?;
    cx.center(arrow)?;
    cx.stroke(arrow, Rgb::grey(0.85), 1.0)?;
    let text = cx.text(glyph, TextStyle::new(18.0).medium())?;
    cx.append(arrow, text)?;
    Ok(arrow)
}

pub fn carousel(cx: &mut Converter<'_>, c: &Component<'_>) -> ProcessResult<NodeId> {
    let frame = cx.filled_frame("q-carousel", LayoutMode::Vertical, Rgb::WHITE)?;
    cx.width(frame, CAROUSEL_WIDTH)?;
    cx.radius(frame, 4.0)?;

    let slides: Vec<&Element> = c.children_tagged("q-carousel-slide").collect();
    let active = selected_child(c, &slides);

    let area = cx.filled_frame("q-carousel__slide", LayoutMode::Vertical, Rgb::grey(0.9))?;
    cx.size(area, CAROUSEL_WIDTH, 250.0)?;
    cx.center(area)?;
    cx.spacing(area, 8.0)?;
    match slides.get(active) {
        Some(slide) if slide.element_children().next().is_some() => {
            cx.append_children(area, slide)?;
        }
        slide => {
            let title = slide
                .map(|s| collapse_whitespace(&s.deep_text()))
                .filter(|t| !t.is_empty())
                .or_else(|| slide.and_then(|s| s.attr("name")).map(str::to_string))
                .unwrap_or_else(|| format!("Slide {}", active + 1));
            let text = cx.text(&title, TextStyle::new(24.0).bold())?;
            cx.append(area, text)?;
        }
    }
    cx.append(frame, area)?;

    let arrows = c.flag("arrows");
    let navigation = c.flag("navigation");
    if arrows || navigation {
        let controls = cx.clear_frame("q-carousel__controls", LayoutMode::Horizontal)?;
        cx.width(controls, CAROUSEL_WIDTH)?;
        cx.pad(controls, 8.0, 8.0)?;
        cx.align_items(controls, CounterAlign::Center)?;
        let justify = if arrows {
            AxisAlign::SpaceBetween
        } else {
            AxisAlign::Center
        };
        cx.justify(controls, justify)?;

        if arrows {
            let prev = carousel_arrow(cx, "<")?;
            cx.append(controls, prev)?;
        }
        if navigation {
            let dots = cx.clear_frame("q-carousel__navigation", LayoutMode::Horizontal)?;
            cx.spacing(dots, 8.0)?;
            let accent = cx.main_or_primary(&c.analysis);
            let count = if slides.is_empty() { 3 } else { slides.len() };
            for index in 0..count {
                let color = if index == active {
                    accent
                } else {
                    Rgb::grey(0.7)
                };
                let dot = cx.ellipse("q-carousel__dot", 8.0, color)?;
                cx.append(dots, dot)?;
            }
            cx.append(controls, dots)?;
        }
        if arrows {
            let next = carousel_arrow(cx, ">")?;
            cx.append(controls, next)?;
        }
        cx.append(frame, controls)?;
    }
    cx.mark_colors_applied(frame)?;
    Ok(frame)
}

/// Slides are laid out by their carousel.
pub fn carousel_slide(_cx: &mut Converter<'_>, _c: &Component<'_>) -> ProcessResult<NodeId> {
    Err(ProcessorError::missing_structure(
        "q-carousel-slide is only drawn inside q-carousel",
    ))
}

pub fn banner(cx: &mut Converter<'_>, c: &Component<'_>) -> ProcessResult<NodeId> {
    let fill = cx.main_color(&c.analysis).unwrap_or(Rgb::WHITE);
    let frame = cx.filled_frame("q-banner", LayoutMode::Horizontal, fill)?;
    cx.pad(frame, 16.0, 16.0)?;
    cx.spacing(frame, 16.0)?;
    cx.align_items(frame, CounterAlign::Center)?;
    if c.flag("rounded") {
        cx.radius(frame, 4.0)?;
    }
    let ink = cx
        .text_color(&c.analysis)
        .unwrap_or_else(|| contrast_color(fill));

    if let Some(icon) = c.prop("icon") {
        let node = cx.icon(icon, 24.0, Some(ink))?;
        cx.append(frame, node)?;
    }

    let content = cx.clear_frame("q-banner__content", LayoutMode::Vertical)?;
    cx.spacing(content, 4.0)?;
    let message = c.text();
    if !message.is_empty() {
        let node = cx.text(&message, TextStyle::default())?;
        cx.append(content, node)?;
    }
    // Elements holding buttons belong to the actions row.
    let body = c
        .element
        .element_children()
        .filter(|e| e.tag != "q-btn" && e.find_descendants("q-btn").is_empty());
    cx.append_elements(content, body)?;
    cx.recolor_texts(content, ink)?;
    cx.append(frame, content)?;

    let buttons: Vec<&Element> = c.element.find_descendants("q-btn");
    if !buttons.is_empty() {
        let actions = cx.clear_frame("q-banner__actions", LayoutMode::Horizontal)?;
        cx.spacing(actions, 8.0)?;
        cx.append_elements(actions, buttons)?;
        cx.append(frame, actions)?;
    }
    cx.mark_colors_applied(frame)?;
    Ok(frame)
}
