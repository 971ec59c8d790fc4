//! Component categorisation by tag name.

use quasar_template::FRAMEWORK_PREFIX;
use smol_str::SmolStr;
use std::fmt;

/// Broad family a component belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Category {
    Basic,
    Layout,
    Form,
    Navigation,
    Display,
    Popup,
    Scrolling,
    Other,
    /// A framework tag with no known mapping.
    Framework,
    /// Plain HTML or an application component.
    Html,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Basic => "basic",
            Category::Layout => "layout",
            Category::Form => "form",
            Category::Navigation => "navigation",
            Category::Display => "display",
            Category::Popup => "popup",
            Category::Scrolling => "scrolling",
            Category::Other => "other",
            Category::Framework => "framework",
            Category::Html => "html",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ComponentTypeInfo {
    pub category: Category,
    /// Tag without the framework prefix, lowercased. For HTML this is the
    /// lowercased tag itself.
    pub kind: SmolStr,
}

impl ComponentTypeInfo {
    pub fn is_framework(&self) -> bool {
        self.category != Category::Html
    }
}

const CATEGORIES: &[(Category, &[&str])] = &[
    (
        Category::Basic,
        &["btn", "icon", "avatar", "badge", "chip", "separator"],
    ),
    (
        Category::Layout,
        &[
            "card",
            "card-section",
            "card-actions",
            "layout",
            "page",
            "page-container",
            "header",
            "footer",
            "drawer",
            "toolbar",
            "toolbar-title",
        ],
    ),
    (
        Category::Form,
        &[
            "input",
            "select",
            "checkbox",
            "radio",
            "toggle",
            "option-group",
            "option",
            "form",
            "field",
        ],
    ),
    (
        Category::Navigation,
        &[
            "tabs",
            "tab",
            "route-tab",
            "tab-panels",
            "tab-panel",
            "breadcrumbs",
            "breadcrumbs-el",
        ],
    ),
    (
        Category::Display,
        &[
            "table",
            "list",
            "item",
            "item-section",
            "item-label",
            "carousel",
            "carousel-slide",
            "banner",
        ],
    ),
    (Category::Popup, &["dialog", "tooltip", "menu"]),
    (Category::Scrolling, &["scroll-area", "infinite-scroll"]),
    (Category::Other, &["rating", "skeleton"]),
];

/// Classify a tag. Matching ignores case.
pub fn classify(tag: &str) -> ComponentTypeInfo {
    let lower = tag.to_ascii_lowercase();
    let Some(kind) = lower.strip_prefix(FRAMEWORK_PREFIX) else {
        return ComponentTypeInfo {
            category: Category::Html,
            kind: SmolStr::new(&lower),
        };
    };
    let category = CATEGORIES
        .iter()
        .find(|(_, kinds)| kinds.contains(&kind))
        .map(|(category, _)| *category)
        .unwrap_or(Category::Framework);
    ComponentTypeInfo {
        category,
        kind: SmolStr::new(kind),
    }
}
