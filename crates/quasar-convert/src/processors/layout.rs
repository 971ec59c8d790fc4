//! Cards and the application shell: layout, header, footer, drawer, toolbar
//! and pages.

use super::{build_synthetic, is_empty, text_element};
use crate::colors::default_shadow;
use crate::context::{collapse_whitespace, Component, Converter, TextStyle};
use crate::error::ProcessResult;
use quasar_style::{contrast_color, ShapeVariant};
use quasar_template::Element;
use visual_node::{AxisAlign, CounterAlign, LayoutMode, NodeId, Padding, Rgb, Shadow};

const SHELL_WIDTH: f32 = 1024.0;
const SHELL_HEIGHT: f32 = 768.0;

pub fn card(cx: &mut Converter<'_>, c: &Component<'_>) -> ProcessResult<NodeId> {
    let frame = cx.filled_frame("q-card", LayoutMode::Vertical, Rgb::WHITE)?;
    let radius = if c.analysis.shape_variant == ShapeVariant::Square {
        0.0
    } else {
        4.0
    };
    cx.radius(frame, radius)?;
    if !c.flag("flat") {
        cx.shadow(frame, default_shadow())?;
    }
    if c.flag("bordered") {
        cx.stroke(frame, Rgb::grey(0.9), 1.0)?;
    }
    cx.append_children(frame, c.element)?;
    Ok(frame)
}

/// Typography of card headings, by class.
fn heading_style(class: &str) -> Option<TextStyle> {
    let classes: Vec<&str> = class.split_whitespace().collect();
    if classes.contains(&"text-h6") {
        Some(TextStyle::new(16.0).bold())
    } else if classes.contains(&"text-subtitle2") {
        Some(TextStyle::new(14.0).grey(0.4))
    } else {
        None
    }
}

pub fn card_section(cx: &mut Converter<'_>, c: &Component<'_>) -> ProcessResult<NodeId> {
    let frame = cx.clear_frame("q-card-section", LayoutMode::Vertical)?;
    let base = 16.0 * c.size_factor();
    let padding = cx.density_padding(base, base, c.analysis.is_dense);
    cx.padding(frame, padding)?;
    cx.spacing(frame, 8.0)?;
    if c.flag("horizontal") {
        cx.builder_mut().set_layout_mode(frame, LayoutMode::Horizontal)?;
    }

    for child in &c.element.children {
        let heading = child
            .attr("class")
            .and_then(heading_style)
            .filter(|_| !child.is_text());
        let node = match heading {
            Some(style) => {
                let text = collapse_whitespace(&child.deep_text());
                if text.is_empty() {
                    continue;
                }
                Some(cx.text(&text, style)?)
            }
            None => cx.convert_element(child)?,
        };
        if let Some(node) = node {
            cx.append(frame, node)?;
        }
    }
    Ok(frame)
}

pub fn card_actions(cx: &mut Converter<'_>, c: &Component<'_>) -> ProcessResult<NodeId> {
    let layout = if c.flag("vertical") {
        LayoutMode::Vertical
    } else {
        LayoutMode::Horizontal
    };
    let frame = cx.clear_frame("q-card-actions", layout)?;
    cx.padding(frame, Padding::uniform(8.0))?;
    cx.spacing(frame, 8.0)?;
    cx.align_items(frame, CounterAlign::Center)?;
    let align = match c.prop("align") {
        Some("right") => AxisAlign::Max,
        Some("center") => AxisAlign::Center,
        Some("between" | "around" | "evenly") => AxisAlign::SpaceBetween,
        _ => AxisAlign::Min,
    };
    cx.justify(frame, align)?;
    cx.append_children(frame, c.element)?;
    Ok(frame)
}

/// Whole-app shell. Missing header or page are filled in.
pub fn layout(cx: &mut Converter<'_>, c: &Component<'_>) -> ProcessResult<NodeId> {
    let frame = cx.filled_frame("q-layout", LayoutMode::Vertical, Rgb::grey(0.95))?;
    cx.size(frame, SHELL_WIDTH, SHELL_HEIGHT)?;

    let element = c.element;
    let header = element.find_child("q-header");
    let footer = element.find_child("q-footer");
    let drawers: Vec<&Element> = element
        .element_children()
        .filter(|e| e.tag == "q-drawer")
        .collect();
    let page = element
        .find_child("q-page-container")
        .or_else(|| element.find_child("q-page"));

    let header_node = match header {
        Some(header) => cx.convert_element(header)?,
        None => Some(build_synthetic(cx, &Element::new("q-header"), self::header)?),
    };
    if let Some(node) = header_node {
        cx.append(frame, node)?;
    }

    let row = cx.clear_frame("q-layout__content", LayoutMode::Horizontal)?;
    for drawer in &drawers {
        if let Some(node) = cx.convert_element(drawer)? {
            cx.append(row, node)?;
        }
    }
    let page_node = match page {
        Some(page) => cx.convert_element(page)?,
        None => Some(build_synthetic(
            cx,
            &Element::new("q-page-container"),
            page_container,
        )?),
    };
    if let Some(node) = page_node {
        if !drawers.is_empty() {
            cx.width(node, SHELL_WIDTH - 256.0)?;
        }
        cx.append(row, node)?;
    }
    cx.append(frame, row)?;

    // Anything else a layout holds goes below the content row.
    let rest = element.element_children().filter(|e| {
        !matches!(
            e.tag.as_str(),
            "q-header" | "q-footer" | "q-drawer" | "q-page-container" | "q-page"
        )
    });
    cx.append_elements(frame, rest)?;

    if let Some(footer) = footer {
        if let Some(node) = cx.convert_element(footer)? {
            cx.append(frame, node)?;
        }
    }
    Ok(frame)
}

pub fn header(cx: &mut Converter<'_>, c: &Component<'_>) -> ProcessResult<NodeId> {
    let fill = cx.main_or_primary(&c.analysis);
    let frame = cx.filled_frame("q-header", LayoutMode::Horizontal, fill)?;
    cx.width(frame, SHELL_WIDTH)?;
    cx.pad(frame, 16.0, 8.0)?;
    cx.align_items(frame, CounterAlign::Center)?;
    if c.flag("elevated") {
        cx.shadow(frame, default_shadow())?;
    }

    if is_empty(c.element) {
        let ink = contrast_color(fill);
        let title = cx.text("App Header", TextStyle::new(18.0).medium().color(ink))?;
        cx.append(frame, title)?;
    } else {
        cx.append_children(frame, c.element)?;
    }
    cx.mark_colors_applied(frame)?;
    Ok(frame)
}

pub fn footer(cx: &mut Converter<'_>, c: &Component<'_>) -> ProcessResult<NodeId> {
    let fill = cx
        .main_color(&c.analysis)
        .or_else(|| cx.color("dark"))
        .unwrap_or(Rgb::grey(0.19));
    let frame = cx.filled_frame("q-footer", LayoutMode::Horizontal, fill)?;
    cx.width(frame, SHELL_WIDTH)?;
    cx.pad(frame, 16.0, 8.0)?;
    cx.align_items(frame, CounterAlign::Center)?;

    if is_empty(c.element) {
        let text = cx.text("© Footer", TextStyle::new(14.0).color(Rgb::WHITE))?;
        cx.append(frame, text)?;
    } else {
        cx.append_children(frame, c.element)?;
    }
    cx.mark_colors_applied(frame)?;
    Ok(frame)
}

pub fn drawer(cx: &mut Converter<'_>, c: &Component<'_>) -> ProcessResult<NodeId> {
    let fill = cx.main_color(&c.analysis).unwrap_or(Rgb::WHITE);
    let frame = cx.filled_frame("q-drawer", LayoutMode::Vertical, fill)?;
    cx.size(frame, 256.0, SHELL_HEIGHT)?;
    cx.shadow(frame, Shadow::black(0.1, 2.0, 0.0, 4.0))?;

    if is_empty(c.element) {
        let mut list = Element::new("q-list");
        for label in ["Home", "Profile", "Settings", "About"] {
            list.children.push(
                Element::new("q-item")
                    .with_attr("clickable", "")
                    .with_child(text_element("q-item-section", label)),
            );
        }
        if let Some(node) = cx.convert_element(&list)? {
            cx.append(frame, node)?;
        }
    } else {
        cx.append_children(frame, c.element)?;
    }
    cx.mark_colors_applied(frame)?;
    Ok(frame)
}

pub fn toolbar(cx: &mut Converter<'_>, c: &Component<'_>) -> ProcessResult<NodeId> {
    let frame = cx.clear_frame("q-toolbar", LayoutMode::Horizontal)?;
    cx.spacing(frame, 8.0)?;
    cx.align_items(frame, CounterAlign::Center)?;

    if is_empty(c.element) {
        let menu = cx.clear_frame("q-toolbar__menu", LayoutMode::Horizontal)?;
        cx.center(menu)?;
        cx.size(menu, 40.0, 40.0)?;
        let glyph = cx.text("≡", TextStyle::new(24.0).color(Rgb::WHITE))?;
        cx.append(menu, glyph)?;
        cx.append(frame, menu)?;
        let title = cx.text("App Title", TextStyle::new(18.0).medium().color(Rgb::WHITE))?;
        cx.append(frame, title)?;
    } else {
        cx.append_children(frame, c.element)?;
    }
    Ok(frame)
}

pub fn toolbar_title(cx: &mut Converter<'_>, c: &Component<'_>) -> ProcessResult<NodeId> {
    let frame = cx.clear_frame("q-toolbar-title", LayoutMode::Horizontal)?;
    cx.align_items(frame, CounterAlign::Center)?;
    let ink = cx.text_color(&c.analysis).unwrap_or(Rgb::WHITE);
    let text = collapse_whitespace(&c.element.deep_text());
    let title = if text.is_empty() { "App Title" } else { &text };
    let node = cx.text(title, TextStyle::new(18.0).medium().color(ink))?;
    cx.append(frame, node)?;
    cx.mark_colors_applied(frame)?;
    Ok(frame)
}

pub fn page_container(cx: &mut Converter<'_>, c: &Component<'_>) -> ProcessResult<NodeId> {
    let frame = cx.filled_frame("q-page-container", LayoutMode::Vertical, Rgb::WHITE)?;
    cx.width(frame, SHELL_WIDTH)?;
    if is_empty(c.element) {
        let page = build_synthetic(cx, &Element::new("q-page"), self::page)?;
        cx.append(frame, page)?;
    } else {
        cx.append_children(frame, c.element)?;
    }
    Ok(frame)
}

pub fn page(cx: &mut Converter<'_>, c: &Component<'_>) -> ProcessResult<NodeId> {
    let frame = cx.filled_frame("q-page", LayoutMode::Vertical, Rgb::WHITE)?;
    cx.width(frame, SHELL_WIDTH)?;
    cx.spacing(frame, 16.0)?;
    // `padding` as a bare flag keeps the default.
    let padding = if c.flag("padding") {
        24.0
    } else {
        c.number("padding")?.unwrap_or(24.0)
    };
    cx.padding(frame, Padding::uniform(padding))?;

    if is_empty(c.element) {
        let title = cx.text("Page Title", TextStyle::new(24.0).bold())?;
        cx.append(frame, title)?;
        let body = cx.text("Page content goes here.", TextStyle::new(14.0).grey(0.4))?;
        cx.append(frame, body)?;
    } else {
        cx.append_children(frame, c.element)?;
    }
    Ok(frame)
}

#[cfg(test)]
mod tests {
    use crate::processors::testing::{build, child_names, texts};
    use pretty_assertions::assert_eq;
    use quasar_style::resolve_color;
    use visual_node::{AxisAlign, Rgb};

    #[test]
    fn test_card_sections() {
        let node = build(
            r#"<q-card bordered>
                <q-card-section>
                  <div class="text-h6">Title</div>
                  <div class="text-subtitle2">by someone</div>
                </q-card-section>
                <q-separator />
                <q-card-actions align="right"><q-btn flat label="Ok" /></q-card-actions>
              </q-card>"#,
        );
        assert_eq!(
            child_names(&node),
            vec!["q-card-section", "q-separator", "q-card-actions"]
        );
        let section = &node.children()[0];
        let title = section.children()[0].as_text().unwrap();
        assert_eq!(title.characters, "Title");
        assert_eq!(title.font_size, 16.0);
        let actions = node.children()[2].as_container().unwrap();
        assert_eq!(actions.primary_align, AxisAlign::Max);
        let card = node.as_container().unwrap();
        assert_eq!(card.strokes[0].solid_color(), Some(Rgb::grey(0.9)));
        assert_eq!(card.effects.len(), 1);
    }

    #[test]
    fn test_colored_card_contrast() {
        let node = build(r#"<q-card color="dark"><q-card-section>Hi</q-card-section></q-card>"#);
        assert_eq!(node.fills()[0].solid_color(), resolve_color("dark"));
        assert_eq!(node.texts()[0].color(), Some(Rgb::WHITE));
    }

    #[test]
    fn test_empty_layout_is_filled_in() {
        let node = build("<q-layout />");
        assert_eq!(child_names(&node), vec!["q-header", "q-layout__content"]);
        assert_eq!(
            texts(&node),
            vec!["App Header", "Page Title", "Page content goes here."]
        );
    }

    #[test]
    fn test_layout_with_drawer() {
        let node = build(
            r#"<q-layout>
                 <q-header><q-toolbar><q-toolbar-title>Shop</q-toolbar-title></q-toolbar></q-header>
                 <q-drawer />
                 <q-page-container><q-page padding>Body</q-page></q-page-container>
                 <q-footer />
               </q-layout>"#,
        );
        assert_eq!(
            child_names(&node),
            vec!["q-header", "q-layout__content", "q-footer"]
        );
        let row = &node.children()[1];
        assert_eq!(child_names(row), vec!["q-drawer", "q-page-container"]);
        assert_eq!(row.children()[1].as_container().unwrap().width, Some(768.0));
        let all = texts(&node);
        assert!(all.contains(&"Shop".to_string()));
        assert!(all.contains(&"Profile".to_string()));
        assert!(all.contains(&"© Footer".to_string()));
    }

    #[test]
    fn test_page_padding_override() {
        let node = build(r#"<q-page padding="12">x</q-page>"#);
        assert_eq!(node.as_container().unwrap().padding.top, 12.0);
    }
}
