//! Dialogs, tooltips and menus, drawn open.

use super::{basic, build_synthetic, is_empty, text_element};
use crate::colors::default_shadow;
use crate::context::{Component, Converter, TextStyle};
use crate::error::ProcessResult;
use quasar_style::contrast_color;
use quasar_template::Element;
use visual_node::{AxisAlign, LayoutMode, NodeId, Paint, Rgb, Shadow};

pub fn dialog(cx: &mut Converter<'_>, c: &Component<'_>) -> ProcessResult<NodeId> {
    let backdrop = cx.frame("q-dialog", LayoutMode::Vertical)?;
    cx.size(backdrop, 400.0, 300.0)?;
    cx.fill_paint(backdrop, Paint::solid_with_opacity(Rgb::BLACK, 0.4))?;
    cx.center(backdrop)?;

    let card = cx.filled_frame("q-dialog__card", LayoutMode::Vertical, Rgb::WHITE)?;
    cx.radius(card, 4.0)?;
    cx.shadow(card, Shadow::black(0.2, 0.0, 4.0, 8.0))?;
    cx.pad(card, 16.0, 16.0)?;
    cx.spacing(card, 16.0)?;

    if c.element.find_descendants("q-card").is_empty() {
        let title = c.prop("title").unwrap_or("Dialog Title");
        let node = cx.text(title, TextStyle::new(18.0).bold())?;
        cx.append(card, node)?;

        let message = c.text();
        let message = if message.is_empty() {
            "Dialog content goes here."
        } else {
            message.as_str()
        };
        let node = cx.text(message, TextStyle::default().grey(0.3))?;
        cx.append(card, node)?;

        let actions = cx.clear_frame("q-dialog__actions", LayoutMode::Horizontal)?;
        cx.spacing(actions, 8.0)?;
        cx.justify(actions, AxisAlign::Max)?;
        let color = c.prop("color").unwrap_or("primary");
        let buttons = [
            Element::new("q-btn")
                .with_attr("flat", "")
                .with_attr("color", color)
                .with_attr("label", "Cancel"),
            Element::new("q-btn")
                .with_attr("color", color)
                .with_attr("label", "OK"),
        ];
        for button in &buttons {
            let node = build_synthetic(cx, button, basic::button)?;
            cx.append(actions, node)?;
        }
        cx.append(card, actions)?;
    } else {
        cx.append_children(card, c.element)?;
    }
    cx.append(backdrop, card)?;
    cx.mark_colors_applied(backdrop)?;
    Ok(backdrop)
}

pub fn tooltip(cx: &mut Converter<'_>, c: &Component<'_>) -> ProcessResult<NodeId> {
    let fill = cx
        .main_color(&c.analysis)
        .or_else(|| cx.bg_color(&c.analysis))
        .unwrap_or(Rgb::grey(0.2));
    let frame = cx.filled_frame("q-tooltip", LayoutMode::Horizontal, fill)?;
    cx.pad(frame, 8.0, 4.0)?;
    cx.radius(frame, 4.0)?;
    cx.shadow(frame, default_shadow())?;

    let text = c.text();
    let content = c
        .prop("content")
        .or(Some(text.as_str()).filter(|t| !t.is_empty()))
        .unwrap_or("Tooltip text");
    let ink = cx
        .text_color(&c.analysis)
        .unwrap_or_else(|| contrast_color(fill));
    let node = cx.text(content, TextStyle::new(12.0).color(ink))?;
    cx.append(frame, node)?;
    cx.mark_colors_applied(frame)?;
    Ok(frame)
}

pub fn menu(cx: &mut Converter<'_>, c: &Component<'_>) -> ProcessResult<NodeId> {
    let frame = cx.filled_frame("q-menu", LayoutMode::Vertical, Rgb::WHITE)?;
    cx.radius(frame, 4.0)?;
    cx.shadow(frame, default_shadow())?;
    if is_empty(c.element) {
        for label in ["Item 1", "Item 2", "Item 3"] {
            let item = Element::new("q-item")
                .with_attr("clickable", "")
                .with_child(text_element("q-item-section", label));
            if let Some(node) = cx.convert_element(&item)? {
                cx.append(frame, node)?;
            }
        }
    } else {
        cx.append_children(frame, c.element)?;
    }
    Ok(frame)
}

#[cfg(test)]
mod tests {
    use crate::processors::testing::{build, child_names, texts};
    use pretty_assertions::assert_eq;
    use visual_node::Rgb;

    #[test]
    fn test_default_dialog() {
        let node = build("<q-dialog />");
        assert_eq!(child_names(&node), vec!["q-dialog__card"]);
        assert_eq!(node.fills()[0].opacity(), 0.4);
        let card = &node.children()[0];
        assert_eq!(
            texts(card),
            vec!["Dialog Title", "Dialog content goes here.", "Cancel", "OK"]
        );
        let actions = card.find("q-dialog__actions").unwrap();
        assert_eq!(child_names(actions), vec!["q-btn", "q-btn"]);
        assert!(actions.children()[0].fills()[0].is_transparent());
    }

    #[test]
    fn test_dialog_with_card() {
        let node = build(
            r#"<q-dialog><q-card><q-card-section>Sure?</q-card-section></q-card></q-dialog>"#,
        );
        let card = &node.children()[0];
        assert_eq!(child_names(card), vec!["q-card"]);
        assert_eq!(texts(&node), vec!["Sure?"]);
    }

    #[test]
    fn test_tooltip() {
        let node = build("<q-tooltip>Copy link</q-tooltip>");
        assert_eq!(node.fills()[0].solid_color(), Some(Rgb::grey(0.2)));
        let text = node.texts()[0];
        assert_eq!(text.characters, "Copy link");
        assert_eq!(text.color(), Some(Rgb::WHITE));
        assert_eq!(texts(&build("<q-tooltip />")), vec!["Tooltip text"]);
    }

    #[test]
    fn test_empty_menu() {
        let node = build("<q-menu />");
        assert_eq!(child_names(&node), vec!["q-item", "q-item", "q-item"]);
        assert_eq!(texts(&node), vec!["Item 1", "Item 2", "Item 3"]);
    }
}
