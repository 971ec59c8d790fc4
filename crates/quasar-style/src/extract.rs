//! Splits an element's attributes into props and styles.

use crate::classes::class_effects;
use crate::css::inline_style_effects;
use crate::palette::Palette;
use indexmap::IndexMap;
use quasar_template::Element;
use smol_str::SmolStr;
use visual_node::StyleEffect;

/// Normalised attribute values.
///
/// Boolean attributes (`flat`, `flat=""`, `flat="flat"`, `flat="true"`) are
/// stored as `"true"`. Bound attributes are stored under their bare name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Props(IndexMap<SmolStr, String>);

impl Props {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Non-empty value.
    pub fn value(&self, name: &str) -> Option<&str> {
        self.get(name).map(str::trim).filter(|v| !v.is_empty())
    }

    pub fn has(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Whether a boolean attribute is set.
    pub fn flag(&self, name: &str) -> bool {
        self.get(name) == Some("true")
    }

    /// Whether any of the aliases is set.
    pub fn any_flag(&self, names: &[&str]) -> bool {
        names.iter().any(|n| self.flag(n))
    }

    /// Parse a numeric attribute.
    pub fn number(&self, name: &str) -> Option<f32> {
        let value = self.value(name)?;
        let value = value.strip_suffix("px").unwrap_or(value);
        value.trim().parse().ok().filter(|v: &f32| v.is_finite())
    }

    pub fn insert(&mut self, name: impl AsRef<str>, value: impl Into<String>) {
        self.0.insert(SmolStr::new(name.as_ref()), value.into());
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whitespace separated tokens of the `class` prop.
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.get("class").unwrap_or_default().split_whitespace()
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for Props {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut props = Props::default();
        for (k, v) in iter {
            props.insert(k, v);
        }
        props
    }
}

/// Style effects keyed by the property they set. A later effect with the same
/// key replaces the earlier one in place.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Styles(IndexMap<SmolStr, StyleEffect>);

impl Styles {
    pub fn insert(&mut self, effect: StyleEffect) {
        self.0.insert(effect.key(), effect);
    }

    pub fn get(&self, key: &str) -> Option<&StyleEffect> {
        self.0.get(key)
    }

    pub fn effects(&self) -> impl Iterator<Item = &StyleEffect> {
        self.0.values()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Extend<StyleEffect> for Styles {
    fn extend<I: IntoIterator<Item = StyleEffect>>(&mut self, iter: I) {
        for effect in iter {
            self.insert(effect);
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExtractedProps {
    pub props: Props,
    pub styles: Styles,
}

/// Extract against the stock palette.
pub fn extract(element: &Element) -> ExtractedProps {
    extract_with(element, Palette::quasar())
}

/// Split `element`'s attributes into props and styles.
///
/// Attributes are visited in source order, so a `style` written after
/// `class` wins on conflicting properties and vice versa.
pub fn extract_with(element: &Element, palette: &Palette) -> ExtractedProps {
    let mut out = ExtractedProps::default();
    for (name, raw) in &element.attributes {
        let (name, value, literal) = match binding_target(name) {
            Some(bare) => match unquote(raw) {
                Some(inner) => (bare, inner, true),
                None => (bare, raw.as_str(), false),
            },
            None => (name.as_str(), raw.as_str(), true),
        };
        if name.is_empty() {
            continue;
        }
        match name {
            "style" if literal => out.styles.extend(inline_style_effects(value)),
            "class" if literal => {
                for class in value.split_whitespace() {
                    if let Some(effects) = class_effects(class, palette) {
                        out.styles.extend(effects);
                    }
                }
                out.props.insert(name, value);
            }
            _ if is_flag_value(name, value) => out.props.insert(name, "true"),
            _ => out.props.insert(name, value),
        }
    }
    out
}

/// `:label` and `v-bind:label` to `label`.
pub fn binding_target(name: &str) -> Option<&str> {
    name.strip_prefix("v-bind:")
        .or_else(|| name.strip_prefix(':'))
}

/// Strip one level of matching single or double quotes.
fn unquote(value: &str) -> Option<&str> {
    let value = value.trim();
    if value.len() < 2 {
        return None;
    }
    ['\'', '"', '`'].iter().find_map(|&q| {
        value
            .strip_prefix(q)
            .and_then(|rest| rest.strip_suffix(q))
    })
}

fn is_flag_value(name: &str, value: &str) -> bool {
    value.is_empty() || value == name || value == "true"
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use visual_node::{Rgb, Side};

    fn element(attrs: &[(&str, &str)]) -> Element {
        attrs
            .iter()
            .fold(Element::new("q-btn"), |el, (k, v)| el.with_attr(k, *v))
    }

    #[test]
    fn test_boolean_attributes_normalised() {
        let ex = extract(&element(&[
            ("flat", ""),
            ("outline", "outline"),
            ("dense", "true"),
            ("push", "false"),
        ]));
        assert!(ex.props.flag("flat"));
        assert!(ex.props.flag("outline"));
        assert!(ex.props.flag("dense"));
        assert!(!ex.props.flag("push"));
        assert_eq!(ex.props.get("push"), Some("false"));
    }

    #[test]
    fn test_bindings_use_bare_names() {
        let ex = extract(&element(&[
            (":label", "'Save'"),
            ("v-bind:color", "\"negative\""),
            (":disable", "isBusy"),
            (":flat", "true"),
        ]));
        assert_eq!(ex.props.get("label"), Some("Save"));
        assert_eq!(ex.props.get("color"), Some("negative"));
        assert_eq!(ex.props.get("disable"), Some("isBusy"));
        assert!(!ex.props.flag("disable"));
        assert!(ex.props.flag("flat"));
        assert!(!ex.props.has(":label"));
    }

    #[test]
    fn test_class_and_style_merge_in_order() {
        let ex = extract(&element(&[
            ("class", "q-pa-md bg-grey-3 custom-thing"),
            ("style", "padding-top: 2px; cursor: pointer"),
        ]));
        assert_eq!(ex.props.get("class"), Some("q-pa-md bg-grey-3 custom-thing"));
        assert_eq!(
            ex.styles.get("paddingTop"),
            Some(&StyleEffect::padding(Side::Top, 2.0))
        );
        assert_eq!(
            ex.styles.get("paddingLeft"),
            Some(&StyleEffect::padding(Side::Left, 16.0))
        );
        assert_eq!(ex.styles.get("fill"), Some(&StyleEffect::fill(Rgb::grey(0.9))));
        assert!(ex.styles.get("cursor").is_some());
        assert_eq!(ex.props.classes().count(), 3);
    }

    #[test]
    fn test_later_classes_override() {
        let ex = extract(&element(&[("class", "bg-white bg-black")]));
        assert_eq!(ex.styles.len(), 1);
        assert_eq!(ex.styles.get("fill"), Some(&StyleEffect::fill(Rgb::BLACK)));
    }

    #[test]
    fn test_dynamic_class_expression_is_not_parsed() {
        let ex = extract(&element(&[(":class", "{ 'bg-red': active }")]));
        assert!(ex.styles.is_empty());
        assert_eq!(ex.props.get("class"), Some("{ 'bg-red': active }"));
    }

    #[test]
    fn test_numeric_props() {
        let ex = extract(&element(&[("size", "18px"), ("max", "7"), ("value", "x")]));
        assert_eq!(ex.props.number("size"), Some(18.0));
        assert_eq!(ex.props.number("max"), Some(7.0));
        assert_eq!(ex.props.number("value"), None);
        assert_eq!(ex.props.number("missing"), None);
    }

    #[test]
    fn test_extraction_is_repeatable() {
        let el = element(&[("class", "row items-center"), ("label", "Go")]);
        assert_eq!(extract(&el), extract(&el));
    }
}
