//! Generic element tree produced by the parser.

use crate::span::Span;
use indexmap::IndexMap;
use smol_str::SmolStr;

/// Tag name used for text runs.
pub const TEXT_TAG: &str = "#text";

/// A parsed markup element, or a text run when `tag` is [`TEXT_TAG`].
///
/// Text elements never have children; their content lives in `text`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Element {
    /// Lower-cased tag name.
    pub tag: SmolStr,
    /// Attribute values exactly as written, keyed by literal attribute name.
    pub attributes: IndexMap<SmolStr, String>,
    pub children: Vec<Element>,
    pub text: Option<String>,
    pub span: Span,
}

impl Element {
    /// Create an element with no attributes or children.
    pub fn new(tag: impl AsRef<str>) -> Self {
        Self {
            tag: SmolStr::new(tag.as_ref().to_ascii_lowercase()),
            ..Self::default()
        }
    }

    /// Create a text run.
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            tag: SmolStr::new_static(TEXT_TAG),
            text: Some(content.into()),
            ..Self::default()
        }
    }

    /// Builder-style attribute insertion.
    pub fn with_attr(mut self, name: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.attributes
            .insert(SmolStr::new(name.as_ref()), value.into());
        self
    }

    /// Builder-style child insertion.
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    pub fn is_text(&self) -> bool {
        self.tag == TEXT_TAG
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    /// Iterate over child elements, skipping text runs.
    pub fn element_children(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter(|c| !c.is_text())
    }

    /// Text of the direct text children, joined with single spaces.
    pub fn text_content(&self) -> String {
        let parts: Vec<&str> = self
            .children
            .iter()
            .filter(|c| c.is_text())
            .filter_map(|c| c.text.as_deref())
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .collect();
        parts.join(" ")
    }

    /// Text of every descendant text run in document order.
    pub fn deep_text(&self) -> String {
        let mut parts = Vec::new();
        collect_text(self, &mut parts);
        parts.join(" ")
    }

    /// First direct child with the given tag.
    pub fn find_child(&self, tag: &str) -> Option<&Element> {
        self.children
            .iter()
            .find(|c| c.tag.eq_ignore_ascii_case(tag))
    }

    /// All descendants with the given tag, in document order.
    ///
    /// Matches are not searched further, so a `q-tab` nested inside another
    /// `q-tab` is not reported twice.
    pub fn find_descendants(&self, tag: &str) -> Vec<&Element> {
        let mut found = Vec::new();
        for child in &self.children {
            collect_tagged(child, tag, &mut found);
        }
        found
    }
}

fn collect_text<'a>(element: &'a Element, out: &mut Vec<&'a str>) {
    if let Some(text) = element.text.as_deref() {
        let text = text.trim();
        if !text.is_empty() {
            out.push(text);
        }
    }
    for child in &element.children {
        collect_text(child, out);
    }
}

fn collect_tagged<'a>(element: &'a Element, tag: &str, out: &mut Vec<&'a Element>) {
    if element.tag.eq_ignore_ascii_case(tag) {
        out.push(element);
        return;
    }
    for child in &element.children {
        collect_tagged(child, tag, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Element {
        Element::new("q-list")
            .with_child(Element::text("  Heading "))
            .with_child(
                Element::new("q-item")
                    .with_child(Element::new("q-item-section").with_child(Element::text("One"))),
            )
            .with_child(Element::new("div").with_child(Element::new("q-item")))
    }

    #[test]
    fn test_text_content_is_direct_only() {
        assert_eq!(sample().text_content(), "Heading");
        assert_eq!(sample().deep_text(), "Heading One");
    }

    #[test]
    fn test_find_descendants() {
        let list = sample();
        assert_eq!(list.find_descendants("q-item").len(), 2);
        assert!(list.find_child("div").is_some());
        assert!(list.find_child("q-item-section").is_none());
    }

    #[test]
    fn test_new_lowercases_tag() {
        let el = Element::new("Q-BTN").with_attr("flat", "");
        assert_eq!(el.tag, "q-btn");
        assert!(el.has_attr("flat"));
        assert!(!el.is_text());
        assert!(Element::text("x").is_text());
    }
}
