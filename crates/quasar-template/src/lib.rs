//! Quasar template parser.
//!
//! Pulls the `<template>` block out of a single-file component and parses it
//! into a generic [`Element`] tree. Directives are kept as literal attributes;
//! nothing is evaluated here.

pub mod element;
pub mod error;
pub mod parser;
pub mod span;

pub use element::{Element, TEXT_TAG};
pub use error::{ErrorCode, ParseError, ParseResult};
pub use parser::{
    extract_template, parse_document, parse_template, parse_template_with_warnings,
    ParsedTemplate, TemplateBlock,
};
pub use span::Span;

/// Parse a component file and return the root element of its template.
pub fn parse(source: &str) -> ParseResult<Element> {
    parse_document(source).map(|parsed| parsed.root)
}

/// Tag prefix that marks framework components.
pub const FRAMEWORK_PREFIX: &str = "q-";

/// Whether a tag names a framework component.
pub fn is_framework_tag(tag: &str) -> bool {
    tag.len() > FRAMEWORK_PREFIX.len()
        && tag
            .get(..FRAMEWORK_PREFIX.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(FRAMEWORK_PREFIX))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_component_file() {
        let source = r#"<template>
  <div class="q-pa-md">
    <q-btn color="negative" label="Delete" flat />
  </div>
</template>

<script setup lang="ts">
const open = ref(false)
</script>
"#;
        let root = parse(source).unwrap();
        assert_eq!(root.tag, "div");
        assert_eq!(root.attr("class"), Some("q-pa-md"));
        let btn = root.find_child("q-btn").unwrap();
        assert_eq!(btn.attr("label"), Some("Delete"));
    }

    #[test]
    fn test_is_framework_tag() {
        assert!(is_framework_tag("q-btn"));
        assert!(is_framework_tag("Q-CARD"));
        assert!(!is_framework_tag("q-"));
        assert!(!is_framework_tag("div"));
    }
}
