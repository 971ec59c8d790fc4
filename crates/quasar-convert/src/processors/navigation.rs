//! Tabs, tab panels and breadcrumbs.

use super::{build_synthetic, is_empty, selected_child};
use crate::context::{collapse_whitespace, Component, Converter, TextStyle};
use crate::error::{ProcessResult, ProcessorError};
use quasar_style::contrast_color;
use quasar_template::Element;
use visual_node::{CounterAlign, LayoutMode, NodeId, Rgb};

const STRIP_WIDTH: f32 = 400.0;

/// Label and icon of a tab or crumb.
struct TabSpec {
    label: String,
    icon: Option<String>,
}

impl TabSpec {
    fn of(element: &Element, fallback: impl FnOnce() -> String) -> Self {
        let text = collapse_whitespace(&element.deep_text());
        let label = element
            .attr("label")
            .filter(|l| !l.is_empty())
            .map(collapse_whitespace)
            .or_else(|| Some(text).filter(|t| !t.is_empty()))
            .or_else(|| element.attr("name").map(str::to_string))
            .unwrap_or_else(fallback);
        Self {
            label,
            icon: element.attr("icon").filter(|i| !i.is_empty()).map(str::to_string),
        }
    }
}

/// Colours of a tab label and its active indicator.
#[derive(Clone, Copy)]
struct TabInk {
    text: Rgb,
    indicator: Option<Rgb>,
}

fn tab_node(cx: &mut Converter<'_>, spec: &TabSpec, ink: TabInk, dense: bool) -> ProcessResult<NodeId> {
    let frame = cx.clear_frame("q-tab", LayoutMode::Vertical)?;
    cx.center(frame)?;
    let padding = cx.density_padding(16.0, 12.0, dense);
    cx.padding(frame, padding)?;
    cx.spacing(frame, 4.0)?;
    if let Some(icon) = &spec.icon {
        let node = cx.icon(icon, 18.0, Some(ink.text))?;
        cx.append(frame, node)?;
    }
    let label = cx.text(&spec.label, TextStyle::new(14.0).medium().color(ink.text))?;
    cx.append(frame, label)?;
    if let Some(indicator) = ink.indicator {
        cx.bottom_stroke(frame, indicator, 2.0)?;
    }
    Ok(frame)
}

pub fn tabs(cx: &mut Converter<'_>, c: &Component<'_>) -> ProcessResult<NodeId> {
    let frame = cx.filled_frame("q-tabs", LayoutMode::Horizontal, Rgb::WHITE)?;
    cx.width(frame, STRIP_WIDTH)?;

    let background = cx.main_color(&c.analysis);
    if let Some(bg) = background {
        cx.fill(frame, bg)?;
    }
    let (active_text, idle_text) = match background {
        Some(bg) => (contrast_color(bg), contrast_color(bg)),
        None => (Rgb::BLACK, Rgb::grey(0.5)),
    };
    let indicator = c
        .prop("active-color")
        .and_then(|name| cx.color(name))
        .or_else(|| background.map(contrast_color))
        .unwrap_or_else(|| cx.primary());

    let children: Vec<&Element> = c
        .element
        .element_children()
        .filter(|e| matches!(e.tag.as_str(), "q-tab" | "q-route-tab"))
        .collect();
    let specs: Vec<TabSpec> = if children.is_empty() {
        (1..=3)
            .map(|n| TabSpec {
                label: format!("Tab {n}"),
                icon: None,
            })
            .collect()
    } else {
        children
            .iter()
            .enumerate()
            .map(|(i, e)| TabSpec::of(e, || format!("Tab {}", i + 1)))
            .collect()
    };
    let active = selected_child(c, &children);

    for (index, spec) in specs.iter().enumerate() {
        let ink = if index == active {
            TabInk {
                text: active_text,
                indicator: Some(indicator),
            }
        } else {
            TabInk {
                text: idle_text,
                indicator: None,
            }
        };
        let node = tab_node(cx, spec, ink, c.analysis.is_dense)?;
        if index != active && background.is_some() {
            cx.opacity(node, 0.7)?;
        }
        cx.append(frame, node)?;
    }
    cx.mark_colors_applied(frame)?;
    Ok(frame)
}

/// A tab outside a strip.
pub fn tab(cx: &mut Converter<'_>, c: &Component<'_>) -> ProcessResult<NodeId> {
    let spec = TabSpec::of(c.element, || "Tab".to_string());
    let active = c.flag("active");
    let ink = if active {
        TabInk {
            text: Rgb::BLACK,
            indicator: Some(cx.main_or_primary(&c.analysis)),
        }
    } else {
        TabInk {
            text: Rgb::grey(0.5),
            indicator: None,
        }
    };
    let node = tab_node(cx, &spec, ink, c.analysis.is_dense)?;
    if active {
        cx.fill(node, Rgb::grey(0.97))?;
    }
    cx.mark_colors_applied(node)?;
    Ok(node)
}

/// Only the selected panel is drawn.
pub fn tab_panels(cx: &mut Converter<'_>, c: &Component<'_>) -> ProcessResult<NodeId> {
    let frame = cx.filled_frame("q-tab-panels", LayoutMode::Vertical, Rgb::WHITE)?;
    cx.width(frame, STRIP_WIDTH)?;

    let panels: Vec<&Element> = c.children_tagged("q-tab-panel").collect();
    let panel = match panels.get(selected_child(c, &panels)) {
        Some(panel) => cx.convert_element(panel)?,
        None => Some(build_synthetic(cx, &Element::new("q-tab-panel"), tab_panel)?),
    };
    if let Some(node) = panel {
        cx.append(frame, node)?;
    }
    Ok(frame)
}

pub fn tab_panel(cx: &mut Converter<'_>, c: &Component<'_>) -> ProcessResult<NodeId> {
    let frame = cx.clear_frame("q-tab-panel", LayoutMode::Vertical)?;
    cx.pad(frame, 16.0, 16.0)?;
    cx.spacing(frame, 8.0)?;
    if is_empty(c.element) {
        let text = cx.text("Panel content", TextStyle::default())?;
        cx.append(frame, text)?;
    } else {
        cx.append_children(frame, c.element)?;
    }
    Ok(frame)
}

pub fn breadcrumbs(cx: &mut Converter<'_>, c: &Component<'_>) -> ProcessResult<NodeId> {
    let frame = cx.clear_frame("q-breadcrumbs", LayoutMode::Horizontal)?;
    cx.spacing(frame, 8.0)?;
    cx.align_items(frame, CounterAlign::Center)?;

    let crumbs: Vec<(String, Option<String>)> = {
        let elements: Vec<&Element> = c.children_tagged("q-breadcrumbs-el").collect();
        if elements.is_empty() {
            ["Home", "Category", "Product"]
                .iter()
                .map(|l| (l.to_string(), None))
                .collect()
        } else {
            elements
                .iter()
                .enumerate()
                .map(|(i, e)| {
                    let spec = TabSpec::of(e, || format!("Item {}", i + 1));
                    (spec.label, spec.icon)
                })
                .collect()
        }
    };

    let link = cx.main_or_primary(&c.analysis);
    let separator = c.prop("separator").unwrap_or("/");
    let last = crumbs.len().saturating_sub(1);
    for (index, (label, icon)) in crumbs.iter().enumerate() {
        if index > 0 {
            let sep = cx.text(separator, TextStyle::default())?;
            cx.opacity(sep, 0.5)?;
            cx.append(frame, sep)?;
        }
        let color = if index == last { Rgb::BLACK } else { link };
        let crumb = cx.clear_frame("q-breadcrumbs-el", LayoutMode::Horizontal)?;
        cx.spacing(crumb, 4.0)?;
        cx.align_items(crumb, CounterAlign::Center)?;
        if let Some(icon) = icon {
            let node = cx.icon(icon, 16.0, Some(color))?;
            cx.append(crumb, node)?;
        }
        let text = cx.text(label, TextStyle::default().color(color))?;
        cx.append(crumb, text)?;
        cx.append(frame, crumb)?;
    }
    cx.mark_colors_applied(frame)?;
    Ok(frame)
}

/// Crumbs are laid out by their parent.
pub fn breadcrumbs_el(_cx: &mut Converter<'_>, _c: &Component<'_>) -> ProcessResult<NodeId> {
    Err(ProcessorError::missing_structure(
        "q-breadcrumbs-el is only drawn inside q-breadcrumbs",
    ))
}

#[cfg(test)]
mod tests {
    use crate::processors::testing::{build, child_names, texts};
    use pretty_assertions::assert_eq;
    use quasar_style::resolve_color;
    use visual_node::{Rgb, StrokeWeights};

    #[test]
    fn test_tabs_pick_model_value() {
        let node = build(
            r#"<q-tabs model-value="mails">
                 <q-tab name="alarms" label="Alarms" />
                 <q-tab name="mails" label="Mails" />
               </q-tabs>"#,
        );
        assert_eq!(child_names(&node), vec!["q-tab", "q-tab"]);
        let idle = node.children()[0].as_container().unwrap();
        let active = node.children()[1].as_container().unwrap();
        assert!(idle.strokes.is_empty());
        assert_eq!(active.stroke_weights, StrokeWeights::bottom(2.0));
        assert_eq!(active.strokes[0].solid_color(), resolve_color("primary"));
        assert_eq!(node.texts()[0].color(), Some(Rgb::grey(0.5)));
    }

    #[test]
    fn test_empty_tabs() {
        let node = build("<q-tabs />");
        assert_eq!(texts(&node), vec!["Tab 1", "Tab 2", "Tab 3"]);
    }

    #[test]
    fn test_colored_tabs_use_contrast() {
        let node = build(r#"<q-tabs color="primary"><q-tab label="A" /><q-tab label="B" /></q-tabs>"#);
        assert_eq!(node.fills()[0].solid_color(), resolve_color("primary"));
        assert_eq!(node.texts()[0].color(), Some(Rgb::WHITE));
        assert_eq!(node.children()[1].opacity(), 0.7);
    }

    #[test]
    fn test_tab_panels_show_selected() {
        let node = build(
            r#"<q-tab-panels model-value="two">
                 <q-tab-panel name="one">First</q-tab-panel>
                 <q-tab-panel name="two">Second</q-tab-panel>
               </q-tab-panels>"#,
        );
        assert_eq!(texts(&node), vec!["Second"]);
        assert_eq!(texts(&build("<q-tab-panels />")), vec!["Panel content"]);
    }

    #[test]
    fn test_breadcrumbs() {
        let node = build(
            r#"<q-breadcrumbs separator=">">
                 <q-breadcrumbs-el label="Home" icon="home" />
                 <q-breadcrumbs-el>Docs</q-breadcrumbs-el>
               </q-breadcrumbs>"#,
        );
        assert_eq!(
            child_names(&node),
            vec!["q-breadcrumbs-el", ">", "q-breadcrumbs-el"]
        );
        assert_eq!(node.children()[1].opacity(), 0.5);
        let all = node.texts();
        let docs = all.iter().find(|t| t.characters == "Docs").unwrap();
        assert_eq!(docs.color(), Some(Rgb::BLACK));
        let home = all.iter().find(|t| t.characters == "Home").unwrap();
        assert_eq!(home.color(), resolve_color("primary"));
    }

    #[test]
    fn test_empty_breadcrumbs() {
        let node = build("<q-breadcrumbs />");
        assert_eq!(texts(&node), vec!["Home", "/", "Category", "/", "Product"]);
    }

    #[test]
    fn test_lone_crumb_falls_back_to_generic() {
        let node = build(r#"<q-breadcrumbs-el label="Orphan" />"#);
        assert_eq!(texts(&node)[0], "Component q-breadcrumbs-el");
    }
}
