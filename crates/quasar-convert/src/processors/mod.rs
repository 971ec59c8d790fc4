//! Built-in component processors, one module per category.

pub mod basic;
pub mod display;
pub mod form;
pub mod generic;
pub mod layout;
pub mod navigation;
pub mod other;
pub mod popup;
pub mod scrolling;

use crate::context::{Component, Converter};
use crate::error::ProcessResult;
use crate::registry::ProcessorRegistry;
use quasar_style::Category;
use quasar_template::Element;
use visual_node::NodeId;

const CATEGORIES: [Category; 8] = [
    Category::Basic,
    Category::Layout,
    Category::Form,
    Category::Navigation,
    Category::Display,
    Category::Popup,
    Category::Scrolling,
    Category::Other,
];

pub fn register_defaults(registry: &mut ProcessorRegistry) {
    registry
        .register(Category::Basic, "btn", basic::button)
        .register(Category::Basic, "icon", basic::icon)
        .register(Category::Basic, "avatar", basic::avatar)
        .register(Category::Basic, "badge", basic::badge)
        .register(Category::Basic, "chip", basic::chip)
        .register(Category::Basic, "separator", basic::separator);

    registry
        .register(Category::Layout, "card", layout::card)
        .register(Category::Layout, "card-section", layout::card_section)
        .register(Category::Layout, "card-actions", layout::card_actions)
        .register(Category::Layout, "layout", layout::layout)
        .register(Category::Layout, "header", layout::header)
        .register(Category::Layout, "footer", layout::footer)
        .register(Category::Layout, "drawer", layout::drawer)
        .register(Category::Layout, "toolbar", layout::toolbar)
        .register(Category::Layout, "toolbar-title", layout::toolbar_title)
        .register(Category::Layout, "page", layout::page)
        .register(Category::Layout, "page-container", layout::page_container);

    registry
        .register(Category::Form, "input", form::input)
        .register(Category::Form, "select", form::select)
        .register(Category::Form, "field", form::field)
        .register(Category::Form, "checkbox", form::checkbox)
        .register(Category::Form, "radio", form::radio)
        .register(Category::Form, "toggle", form::toggle)
        .register(Category::Form, "option-group", form::option_group)
        .register(Category::Form, "option", form::stack)
        .register(Category::Form, "form", form::stack);

    registry
        .register(Category::Navigation, "tabs", navigation::tabs)
        .register(Category::Navigation, "tab", navigation::tab)
        .register(Category::Navigation, "route-tab", navigation::tab)
        .register(Category::Navigation, "tab-panels", navigation::tab_panels)
        .register(Category::Navigation, "tab-panel", navigation::tab_panel)
        .register(Category::Navigation, "breadcrumbs", navigation::breadcrumbs)
        .register(Category::Navigation, "breadcrumbs-el", navigation::breadcrumbs_el);

    registry
        .register(Category::Display, "list", display::list)
        .register(Category::Display, "item", display::item)
        .register(Category::Display, "item-section", display::item_section)
        .register(Category::Display, "table", display::table)
        .register(Category::Display, "carousel", display::carousel)
        .register(Category::Display, "carousel-slide", display::carousel_slide)
        .register(Category::Display, "banner", display::banner);

    registry
        .register(Category::Popup, "dialog", popup::dialog)
        .register(Category::Popup, "tooltip", popup::tooltip)
        .register(Category::Popup, "menu", popup::menu);

    registry
        .register(Category::Scrolling, "scroll-area", scrolling::scroll_area)
        .register(Category::Scrolling, "infinite-scroll", scrolling::infinite_scroll);

    registry
        .register(Category::Other, "rating", other::rating)
        .register(Category::Other, "skeleton", other::skeleton);

    for category in CATEGORIES {
        registry.register_category(category, generic::build);
    }
}

/// Build a synthetic element with a processor, as if it had been written in
/// the template. Used for sample content and composed widgets.
pub(crate) fn build_synthetic(
    cx: &mut Converter<'_>,
    element: &Element,
    processor: fn(&mut Converter<'_>, &Component<'_>) -> ProcessResult<NodeId>,
) -> ProcessResult<NodeId> {
    let component = Component::new(element, cx.palette());
    processor(cx, &component)
}

/// `<tag>` with a single text child.
pub(crate) fn text_element(tag: &str, text: &str) -> Element {
    Element::new(tag).with_child(Element::text(text))
}

/// Whether the element has neither child elements nor text.
pub(crate) fn is_empty(element: &Element) -> bool {
    element.children.iter().all(|c| {
        c.is_text() && c.text.as_deref().map_or(true, |t| t.trim().is_empty())
    })
}

/// Index of the selected child: an `active` attribute, else the child whose
/// `name` matches the static `model-value`, else the first.
pub(crate) fn selected_child(c: &Component<'_>, children: &[&Element]) -> usize {
    if let Some(index) = children.iter().position(|e| e.has_attr("active")) {
        return index;
    }
    c.prop("model-value")
        .filter(|_| !c.is_bound("model-value"))
        .and_then(|model| children.iter().position(|e| e.attr("name") == Some(model)))
        .unwrap_or(0)
}

#[cfg(test)]
pub(crate) mod testing {
    use crate::orchestrator::convert_source;
    use crate::settings::Settings;
    use visual_node::VisualNode;

    /// Convert a template and return the first node under the root frame.
    pub fn build(template: &str) -> VisualNode {
        build_with(template, &Settings::default())
    }

    pub fn build_with(template: &str, settings: &Settings) -> VisualNode {
        let tree = convert_source(&format!("<template>{template}</template>"), settings).unwrap();
        tree.children()[0].clone()
    }

    pub fn texts(node: &VisualNode) -> Vec<String> {
        node.texts().into_iter().map(|t| t.characters.clone()).collect()
    }

    pub fn child_names(node: &VisualNode) -> Vec<String> {
        node.children().iter().map(|c| c.name().to_string()).collect()
    }
}
