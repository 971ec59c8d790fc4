//! Depth-first conversion of an element tree.

use crate::colors::apply_quasar_colors;
use crate::context::{collapse_whitespace, Component, Converter, TextStyle};
use crate::error::{ConvertResult, ProcessResult};
use crate::registry::{ProcessorRegistry, Resolution};
use crate::settings::Settings;
use crate::variants;
use quasar_template::{parse_document, Element};
use visual_node::{
    apply, apply_all, LayoutMode, NodeId, NodeKind, Padding, Rgb, StyleEffect, TreeBuilder,
    VisualNode, VisualNodeBuilder,
};

/// Name of the frame every conversion is wrapped in.
pub const ROOT_NAME: &str = "Quasar Component";

/// Convert `root` into a new frame and return that frame.
pub fn convert(
    root: &Element,
    settings: &Settings,
    registry: &ProcessorRegistry,
    builder: &mut dyn VisualNodeBuilder,
) -> ConvertResult<NodeId> {
    let mut cx = Converter::new(builder, settings, registry);
    let frame = cx.filled_frame(ROOT_NAME, LayoutMode::Vertical, Rgb::WHITE)?;
    cx.padding(frame, Padding::uniform(20.0))?;
    cx.spacing(frame, 16.0)?;

    if let Some(node) = cx.convert_element(root)? {
        cx.append(frame, node)?;
    }

    if settings.create_component_variants {
        let added = variants::generate(&mut cx, frame)?;
        tracing::debug!(added, "generated component variants");
    }
    tracing::debug!(components = cx.sources().len(), "conversion finished");
    Ok(frame)
}

/// Parse a single-file component and convert it with the built-in processors.
pub fn convert_source(source: &str, settings: &Settings) -> ConvertResult<VisualNode> {
    let parsed = parse_document(source)?;
    for warning in &parsed.warnings {
        tracing::warn!(code = warning.code.as_str(), span = ?warning.span, "{}", warning.message);
    }
    let registry = ProcessorRegistry::new();
    let mut builder = TreeBuilder::new();
    let root = convert(&parsed.root, settings, &registry, &mut builder)?;
    Ok(builder.finish(root)?)
}

fn is_text_effect(effect: &StyleEffect) -> bool {
    matches!(
        effect,
        StyleEffect::TextColor { .. }
            | StyleEffect::FontSize { .. }
            | StyleEffect::FontWeight { .. }
            | StyleEffect::LetterSpacing { .. }
            | StyleEffect::TextCase { .. }
            | StyleEffect::TextAlign { .. }
    )
}

impl Converter<'_> {
    /// Build the node for one element. Blank text yields nothing.
    pub fn convert_element(&mut self, element: &Element) -> ProcessResult<Option<NodeId>> {
        if element.is_text() {
            let text = collapse_whitespace(element.text.as_deref().unwrap_or_default());
            if text.is_empty() {
                return Ok(None);
            }
            return Ok(Some(self.text(&text, TextStyle::default())?));
        }
        let component = Component::new(element, self.palette());
        if component.info.is_framework() {
            self.convert_component(&component).map(Some)
        } else {
            self.convert_markup(&component).map(Some)
        }
    }

    /// Convert every child of `element` and append the results to `parent`.
    pub fn append_children(&mut self, parent: NodeId, element: &Element) -> ProcessResult<()> {
        self.append_elements(parent, element.children.iter())
    }

    pub fn append_elements<'e>(
        &mut self,
        parent: NodeId,
        elements: impl IntoIterator<Item = &'e Element>,
    ) -> ProcessResult<()> {
        for child in elements {
            if let Some(node) = self.convert_element(child)? {
                self.append(parent, node)?;
            }
        }
        Ok(())
    }

    /// Dispatch a framework element to its processor. A failing processor is
    /// replaced by the generic one.
    fn convert_component(&mut self, component: &Component<'_>) -> ProcessResult<NodeId> {
        let registry = self.registry;
        let info = &component.info;
        let (processor, resolution) = if self.settings().component_groups.enabled(info.category) {
            registry.lookup(info)
        } else {
            tracing::debug!(tag = component.tag(), category = %info.category, "component group disabled");
            (registry.generic(), Resolution::Generic)
        };

        let (node, color_kind) = match processor.build(self, component) {
            Ok(node) => (node, component.kind()),
            Err(error) if resolution != Resolution::Generic => {
                tracing::warn!(tag = component.tag(), %error, "processor failed, using generic");
                (registry.generic().build(self, component)?, "generic")
            }
            Err(error) => return Err(error),
        };

        if resolution == Resolution::Category {
            let name = format!("{}-{}", info.category, info.kind);
            self.set_name(node, &name)?;
        }

        let styles = component.styles.effects();
        apply_all(self.builder_mut(), node, styles)?;

        if self.colors_enabled() && !self.colors_applied(node)? {
            apply_quasar_colors(self, node, &component.analysis, color_kind)?;
        }
        self.sources.record(node, component);
        Ok(node)
    }

    /// Plain markup: a frame named after the tag, children converted in place.
    fn convert_markup(&mut self, component: &Component<'_>) -> ProcessResult<NodeId> {
        let element = component.element;
        let name = match component.prop("class") {
            Some(class) => format!("{} ({class})", element.tag),
            None => element.tag.to_string(),
        };
        let layout = if element.tag == "span" {
            LayoutMode::Horizontal
        } else {
            LayoutMode::Vertical
        };
        let frame = self.clear_frame(&name, layout)?;

        let mut text_color = None;
        if self.colors_enabled() {
            let paints = component.analysis.paints(self.palette());
            if let Some(fills) = paints.fills {
                self.builder_mut().set_fills(frame, fills)?;
            }
            if let Some(strokes) = paints.strokes {
                self.builder_mut()
                    .set_strokes(frame, strokes, visual_node::StrokeWeights::uniform(1.0))?;
            }
            text_color = paints.text_color;
        }

        let (text_effects, frame_effects): (Vec<_>, Vec<_>) =
            component.styles.effects().partition(|e| is_text_effect(e));
        apply_all(self.builder_mut(), frame, frame_effects)?;

        self.append_children(frame, element)?;

        let direct_texts: Vec<NodeId> = self
            .builder()
            .children(frame)?
            .into_iter()
            .filter(|child| matches!(self.builder().kind(*child), Ok(NodeKind::Text)))
            .collect();
        for text in direct_texts {
            if let Some(color) = text_color {
                self.fill(text, color)?;
            }
            for effect in &text_effects {
                apply(self.builder_mut(), text, effect)?;
            }
        }
        Ok(frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProcessorError;
    use pretty_assertions::assert_eq;
    use quasar_style::{resolve_color, Category};
    use quasar_template::parse;
    use visual_node::{
        AxisAlign, BuildError, BuildResult, CounterAlign, Effect, FontName, FontWeight, Paint,
        ShapeKind, SizingMode, StrokeWeights, TextAlign, TextCase,
    };

    fn run(source: &str, settings: &Settings) -> VisualNode {
        convert_source(source, settings).unwrap()
    }

    fn first(tree: &VisualNode) -> &VisualNode {
        &tree.children()[0]
    }

    #[test]
    fn test_root_frame() {
        let tree = run("<template><div /></template>", &Settings::default());
        assert_eq!(tree.name(), ROOT_NAME);
        let root = tree.as_container().unwrap();
        assert_eq!(root.layout, LayoutMode::Vertical);
        assert_eq!(root.padding, Padding::uniform(20.0));
        assert_eq!(root.item_spacing, 16.0);
        assert_eq!(root.fill_color(), Some(Rgb::WHITE));
    }

    #[test]
    fn test_delete_flat_button() {
        let tree = run(
            r#"<template><q-btn color="negative" label="Delete" flat /></template>"#,
            &Settings::default(),
        );
        let button = first(&tree);
        assert_eq!(button.name(), "q-btn");
        assert!(button.fills()[0].is_transparent());
        let text = button
            .texts()
            .into_iter()
            .find(|t| t.characters == "Delete")
            .unwrap();
        assert_eq!(text.color(), resolve_color("negative"));
    }

    #[test]
    fn test_unknown_widget_is_labelled() {
        let tree = run(
            r#"<template><q-totally-unknown-widget foo="bar" :baz="qux" /></template>"#,
            &Settings::default(),
        );
        let widget = first(&tree);
        assert_eq!(widget.name(), "q-totally-unknown-widget");
        let lines: Vec<_> = widget.texts().iter().map(|t| t.characters.clone()).collect();
        assert_eq!(lines[0], "Component q-totally-unknown-widget");
        assert!(lines[1].contains(r#"foo="bar""#));
    }

    #[test]
    fn test_markup_layout_and_text() {
        let tree = run(
            r#"<template><div class="text-negative"><span>  Hello
                world </span><p>x</p></div></template>"#,
            &Settings::default(),
        );
        let div = first(&tree);
        assert_eq!(div.name(), "div (text-negative)");
        let span = &div.children()[0];
        assert_eq!(span.as_container().unwrap().layout, LayoutMode::Horizontal);
        assert_eq!(span.children()[0].as_text().unwrap().characters, "Hello world");
        assert_eq!(div.children()[1].as_container().unwrap().layout, LayoutMode::Vertical);
    }

    #[test]
    fn test_disabled_group_routes_to_generic() {
        let mut settings = Settings::default();
        settings.component_groups.set(Category::Display, false);
        let tree = run("<template><q-list /></template>", &settings);
        let list = first(&tree);
        assert_eq!(list.name(), "q-list");
        assert_eq!(list.texts()[0].characters, "Component q-list");
    }

    #[test]
    fn test_category_fallback_name() {
        let tree = run("<template><q-item-label>Hi</q-item-label></template>", &Settings::default());
        assert_eq!(first(&tree).name(), "display-item-label");
    }

    #[test]
    fn test_failing_processor_falls_back() {
        fn broken(_: &mut Converter<'_>, _: &Component<'_>) -> ProcessResult<NodeId> {
            Err(ProcessorError::missing_structure("no wrapper"))
        }
        let mut registry = ProcessorRegistry::new();
        registry.register(Category::Basic, "btn", broken);
        let root = parse(r#"<template><q-btn label="Save" /></template>"#).unwrap();
        let mut builder = TreeBuilder::new();
        let frame = convert(&root, &Settings::default(), &registry, &mut builder).unwrap();
        let tree = builder.finish(frame).unwrap();
        let button = first(&tree);
        assert_eq!(button.name(), "q-btn");
        assert_eq!(button.texts()[0].characters, "Component q-btn");
    }

    #[test]
    fn test_text_uses_default_font_when_inter_is_missing() {
        let root = parse(r#"<template><div><q-btn label="Go" /><q-list /></div></template>"#)
            .unwrap();
        let roboto = FontName::new("Roboto", "Regular");
        let mut builder = TreeBuilder::with_fonts([], roboto.clone());
        let registry = ProcessorRegistry::new();
        let frame = convert(&root, &Settings::default(), &registry, &mut builder).unwrap();
        let tree = builder.finish(frame).unwrap();
        let texts = tree.texts();
        let characters: Vec<&str> = texts.iter().map(|t| t.characters.as_str()).collect();
        assert_eq!(characters, vec!["Go", "Item 1", "Item 2", "Item 3"]);
        assert!(texts.iter().all(|t| t.font == roboto));
    }

    /// Lists every face of a [`TreeBuilder`] but cannot load `broken`, which
    /// is also its default font.
    struct BrokenFace {
        inner: TreeBuilder,
        broken: FontName,
    }

    impl VisualNodeBuilder for BrokenFace {
        fn create_container(&mut self, layout: LayoutMode, sizing: SizingMode) -> NodeId {
            self.inner.create_container(layout, sizing)
        }
        fn create_text(&mut self, characters: &str, font: &FontName) -> BuildResult<NodeId> {
            if *font == self.broken {
                return Err(BuildError::font_unavailable(&font.family, &font.style));
            }
            self.inner.create_text(characters, font)
        }
        fn create_shape(&mut self, kind: ShapeKind, width: f32, height: f32) -> NodeId {
            self.inner.create_shape(kind, width, height)
        }
        fn default_font(&self) -> FontName {
            self.broken.clone()
        }
        fn is_font_available(&self, font: &FontName) -> bool {
            self.inner.is_font_available(font)
        }
        fn kind(&self, node: NodeId) -> BuildResult<NodeKind> {
            self.inner.kind(node)
        }
        fn name(&self, node: NodeId) -> BuildResult<String> {
            self.inner.name(node)
        }
        fn set_name(&mut self, node: NodeId, name: &str) -> BuildResult<()> {
            self.inner.set_name(node, name)
        }
        fn fills(&self, node: NodeId) -> BuildResult<Vec<Paint>> {
            self.inner.fills(node)
        }
        fn set_fills(&mut self, node: NodeId, fills: Vec<Paint>) -> BuildResult<()> {
            self.inner.set_fills(node, fills)
        }
        fn strokes(&self, node: NodeId) -> BuildResult<Vec<Paint>> {
            self.inner.strokes(node)
        }
        fn set_strokes(
            &mut self,
            node: NodeId,
            strokes: Vec<Paint>,
            weights: StrokeWeights,
        ) -> BuildResult<()> {
            self.inner.set_strokes(node, strokes, weights)
        }
        fn effects(&self, node: NodeId) -> BuildResult<Vec<Effect>> {
            self.inner.effects(node)
        }
        fn set_effects(&mut self, node: NodeId, effects: Vec<Effect>) -> BuildResult<()> {
            self.inner.set_effects(node, effects)
        }
        fn set_corner_radius(&mut self, node: NodeId, radius: f32) -> BuildResult<()> {
            self.inner.set_corner_radius(node, radius)
        }
        fn padding(&self, node: NodeId) -> BuildResult<Padding> {
            self.inner.padding(node)
        }
        fn set_padding(&mut self, node: NodeId, padding: Padding) -> BuildResult<()> {
            self.inner.set_padding(node, padding)
        }
        fn set_item_spacing(&mut self, node: NodeId, spacing: f32) -> BuildResult<()> {
            self.inner.set_item_spacing(node, spacing)
        }
        fn set_layout_mode(&mut self, node: NodeId, layout: LayoutMode) -> BuildResult<()> {
            self.inner.set_layout_mode(node, layout)
        }
        fn set_primary_align(&mut self, node: NodeId, align: AxisAlign) -> BuildResult<()> {
            self.inner.set_primary_align(node, align)
        }
        fn set_counter_align(&mut self, node: NodeId, align: CounterAlign) -> BuildResult<()> {
            self.inner.set_counter_align(node, align)
        }
        fn sizing(&self, node: NodeId) -> BuildResult<(SizingMode, SizingMode)> {
            self.inner.sizing(node)
        }
        fn set_sizing(
            &mut self,
            node: NodeId,
            horizontal: SizingMode,
            vertical: SizingMode,
        ) -> BuildResult<()> {
            self.inner.set_sizing(node, horizontal, vertical)
        }
        fn size(&self, node: NodeId) -> BuildResult<(Option<f32>, Option<f32>)> {
            self.inner.size(node)
        }
        fn set_width(&mut self, node: NodeId, width: f32) -> BuildResult<()> {
            self.inner.set_width(node, width)
        }
        fn set_height(&mut self, node: NodeId, height: f32) -> BuildResult<()> {
            self.inner.set_height(node, height)
        }
        fn set_position(&mut self, node: NodeId, x: f32, y: f32) -> BuildResult<()> {
            self.inner.set_position(node, x, y)
        }
        fn opacity(&self, node: NodeId) -> BuildResult<f32> {
            self.inner.opacity(node)
        }
        fn set_opacity(&mut self, node: NodeId, opacity: f32) -> BuildResult<()> {
            self.inner.set_opacity(node, opacity)
        }
        fn set_visible(&mut self, node: NodeId, visible: bool) -> BuildResult<()> {
            self.inner.set_visible(node, visible)
        }
        fn characters(&self, node: NodeId) -> BuildResult<String> {
            self.inner.characters(node)
        }
        fn font(&self, node: NodeId) -> BuildResult<FontName> {
            self.inner.font(node)
        }
        fn set_font(&mut self, node: NodeId, font: &FontName) -> BuildResult<()> {
            self.inner.set_font(node, font)
        }
        fn set_font_size(&mut self, node: NodeId, size: f32) -> BuildResult<()> {
            self.inner.set_font_size(node, size)
        }
        fn set_text_align(&mut self, node: NodeId, align: TextAlign) -> BuildResult<()> {
            self.inner.set_text_align(node, align)
        }
        fn set_letter_spacing(&mut self, node: NodeId, spacing: f32) -> BuildResult<()> {
            self.inner.set_letter_spacing(node, spacing)
        }
        fn set_text_case(&mut self, node: NodeId, case: TextCase) -> BuildResult<()> {
            self.inner.set_text_case(node, case)
        }
        fn append_child(&mut self, parent: NodeId, child: NodeId) -> BuildResult<()> {
            self.inner.append_child(parent, child)
        }
        fn insert_child(&mut self, parent: NodeId, index: usize, child: NodeId) -> BuildResult<()> {
            self.inner.insert_child(parent, index, child)
        }
        fn children(&self, node: NodeId) -> BuildResult<Vec<NodeId>> {
            self.inner.children(node)
        }
        fn parent(&self, node: NodeId) -> BuildResult<Option<NodeId>> {
            self.inner.parent(node)
        }
        fn metadata(&self, node: NodeId, key: &str) -> BuildResult<Option<String>> {
            self.inner.metadata(node, key)
        }
        fn set_metadata(&mut self, node: NodeId, key: &str, value: &str) -> BuildResult<()> {
            self.inner.set_metadata(node, key, value)
        }
        fn clone_subtree(&mut self, node: NodeId) -> BuildResult<NodeId> {
            self.inner.clone_subtree(node)
        }
    }

    #[test]
    fn test_unloadable_font_falls_back_to_generic() {
        // buttons set their label in Inter Medium; the generic card uses Regular
        let medium = FontName::inter(FontWeight::Medium);
        let mut builder = BrokenFace {
            inner: TreeBuilder::new(),
            broken: medium.clone(),
        };
        let root = parse(r#"<template><q-btn label="Go" /></template>"#).unwrap();
        let registry = ProcessorRegistry::new();
        let frame = convert(&root, &Settings::default(), &registry, &mut builder).unwrap();
        let tree = builder.inner.finish(frame).unwrap();
        let button = first(&tree);
        assert_eq!(button.name(), "q-btn");
        let characters: Vec<&str> = button.texts().iter().map(|t| t.characters.as_str()).collect();
        assert_eq!(characters, vec!["Component q-btn", r#"label="Go""#]);
        assert!(button.texts().iter().all(|t| t.font != medium));
    }

    #[test]
    fn test_component_styles_apply_to_frame() {
        let tree = run(
            r#"<template><q-card style="border-radius: 12px" class="q-pa-md"><q-card-section>A</q-card-section></q-card></template>"#,
            &Settings::default(),
        );
        let card = first(&tree).as_container().unwrap();
        assert_eq!(card.corner_radius, 12.0);
        assert_eq!(card.padding, Padding::uniform(16.0));
    }

    #[test]
    fn test_parse_failure_is_fatal() {
        let err = convert_source("<div>no template</div>", &Settings::default()).unwrap_err();
        assert!(matches!(err, crate::ConvertError::Parse(_)));
    }
}
