//! Conversion state shared by the orchestrator and the processors.

use crate::error::{ProcessResult, ProcessorError};
use crate::registry::ProcessorRegistry;
use crate::settings::Settings;
use indexmap::IndexMap;
use quasar_style::analysis::{analyze_props, ColorAnalysis};
use quasar_style::icons::{icon_glyph, normalize_icon_name, ICON_FONT_FAMILY, ICON_FONT_STYLE};
use quasar_style::palette::FALLBACK_PRIMARY;
use quasar_style::{classify, extract_with, ComponentTypeInfo, Palette, Props, Styles};
use quasar_template::Element;
use std::borrow::Cow;
use visual_node::{
    AxisAlign, BuildError, BuildResult, CounterAlign, Effect, FontName, FontWeight, LayoutMode,
    NodeId, NodeKind, Padding, Paint, Rgb, Shadow, ShapeKind, SizingMode, StrokeWeights,
    VisualNodeBuilder,
};

/// Metadata key marking a node whose colours are final.
pub const COLORS_APPLIED: &str = "colorsApplied";

/// A framework element prepared for a processor.
#[derive(Debug, Clone)]
pub struct Component<'e> {
    pub element: &'e Element,
    pub info: ComponentTypeInfo,
    pub props: Props,
    pub styles: Styles,
    pub analysis: ColorAnalysis,
}

impl<'e> Component<'e> {
    pub fn new(element: &'e Element, palette: &Palette) -> Self {
        let extracted = extract_with(element, palette);
        let analysis = analyze_props(&extracted.props);
        Self {
            element,
            info: classify(&element.tag),
            props: extracted.props,
            styles: extracted.styles,
            analysis,
        }
    }

    pub fn tag(&self) -> &str {
        &self.element.tag
    }

    pub fn kind(&self) -> &str {
        &self.info.kind
    }

    /// Non-empty prop value.
    pub fn prop(&self, name: &str) -> Option<&str> {
        self.props.value(name)
    }

    pub fn flag(&self, name: &str) -> bool {
        self.props.flag(name)
    }

    /// Direct text children, whitespace collapsed.
    pub fn text(&self) -> String {
        collapse_whitespace(&self.element.text_content())
    }

    /// The `label` prop, or the direct text when there is any.
    pub fn label(&self) -> Option<String> {
        self.prop("label")
            .map(collapse_whitespace)
            .or_else(|| Some(self.text()).filter(|t| !t.is_empty()))
    }

    /// Child elements with the given tag.
    pub fn children_tagged<'t>(&self, tag: &'t str) -> impl Iterator<Item = &'e Element> + 't
    where
        'e: 't,
    {
        self.element
            .children
            .iter()
            .filter(move |c| c.tag.eq_ignore_ascii_case(tag))
    }

    /// Whether the attribute was written as a binding.
    pub fn is_bound(&self, name: &str) -> bool {
        self.element.has_attr(&format!(":{name}"))
            || self.element.has_attr(&format!("v-bind:{name}"))
    }

    /// Numeric prop. Bound expressions read as absent; a literal that is not
    /// a number is an error.
    pub fn number(&self, name: &str) -> ProcessResult<Option<f32>> {
        let Some(raw) = self.prop(name) else {
            return Ok(None);
        };
        match self.props.number(name) {
            Some(value) => Ok(Some(value)),
            None if self.is_bound(name) => Ok(None),
            None => Err(ProcessorError::invalid_value(name, raw)),
        }
    }

    /// Truthy static value of a model-like prop.
    pub fn truthy(&self, name: &str) -> bool {
        matches!(self.prop(name), Some(v) if !matches!(v, "false" | "0" | "null" | "undefined"))
            && !self.is_bound(name)
            || self.flag(name)
    }

    /// Padding scale for the `size` prop of non-button widgets.
    pub fn size_factor(&self) -> f32 {
        match self.analysis.size_variant.as_deref() {
            Some("xs") => 0.6,
            Some("sm") => 0.8,
            Some("lg") => 1.2,
            Some("xl") => 1.5,
            _ => 1.0,
        }
    }
}

pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Text appearance for [`Converter::text`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub size: f32,
    pub weight: FontWeight,
    pub color: Rgb,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self::new(14.0)
    }
}

impl TextStyle {
    pub const fn new(size: f32) -> Self {
        Self {
            size,
            weight: FontWeight::Regular,
            color: Rgb::BLACK,
        }
    }

    pub const fn weight(mut self, weight: FontWeight) -> Self {
        self.weight = weight;
        self
    }

    pub const fn bold(self) -> Self {
        self.weight(FontWeight::Bold)
    }

    pub const fn medium(self) -> Self {
        self.weight(FontWeight::Medium)
    }

    pub const fn color(mut self, color: Rgb) -> Self {
        self.color = color;
        self
    }

    pub const fn grey(self, level: f32) -> Self {
        self.color(Rgb::grey(level))
    }
}

/// Source of a built framework node, kept for the length of one conversion.
#[derive(Debug, Clone)]
pub struct SourceEntry {
    /// The element without its children.
    pub element: Element,
    pub info: ComponentTypeInfo,
    pub analysis: ColorAnalysis,
}

/// Built node to source element, in build order.
#[derive(Debug, Clone, Default)]
pub struct SourceIndex {
    entries: IndexMap<NodeId, SourceEntry>,
}

impl SourceIndex {
    pub fn record(&mut self, node: NodeId, component: &Component<'_>) {
        let element = Element {
            tag: component.element.tag.clone(),
            attributes: component.element.attributes.clone(),
            children: Vec::new(),
            text: component.element.text.clone(),
            span: component.element.span,
        };
        self.entries.insert(
            node,
            SourceEntry {
                element,
                info: component.info.clone(),
                analysis: component.analysis.clone(),
            },
        );
    }

    pub fn get(&self, node: NodeId) -> Option<&SourceEntry> {
        self.entries.get(&node)
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &SourceEntry)> {
        self.entries.iter().map(|(id, entry)| (*id, entry))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// State of one conversion pass.
pub struct Converter<'a> {
    builder: &'a mut dyn VisualNodeBuilder,
    settings: &'a Settings,
    pub(crate) registry: &'a ProcessorRegistry,
    palette: Cow<'static, Palette>,
    pub(crate) sources: SourceIndex,
}

impl<'a> Converter<'a> {
    pub fn new(
        builder: &'a mut dyn VisualNodeBuilder,
        settings: &'a Settings,
        registry: &'a ProcessorRegistry,
    ) -> Self {
        Self {
            builder,
            settings,
            registry,
            palette: settings.palette(),
            sources: SourceIndex::default(),
        }
    }

    pub fn builder(&self) -> &(dyn VisualNodeBuilder + 'a) {
        &*self.builder
    }

    pub fn builder_mut(&mut self) -> &mut (dyn VisualNodeBuilder + 'a) {
        &mut *self.builder
    }

    pub fn settings(&self) -> &'a Settings {
        self.settings
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn sources(&self) -> &SourceIndex {
        &self.sources
    }

    pub fn colors_enabled(&self) -> bool {
        self.settings.preserve_quasar_colors
    }

    /// Resolve a colour name, honouring the colour switch.
    pub fn color(&self, name: &str) -> Option<Rgb> {
        if self.colors_enabled() {
            self.palette.resolve(name)
        } else {
            None
        }
    }

    pub fn primary(&self) -> Rgb {
        self.color("primary").unwrap_or(FALLBACK_PRIMARY)
    }

    pub fn main_color(&self, analysis: &ColorAnalysis) -> Option<Rgb> {
        analysis.main_color.as_deref().and_then(|c| self.color(c))
    }

    pub fn main_or_primary(&self, analysis: &ColorAnalysis) -> Rgb {
        self.main_color(analysis).unwrap_or_else(|| self.primary())
    }

    pub fn text_color(&self, analysis: &ColorAnalysis) -> Option<Rgb> {
        analysis.text_color.as_deref().and_then(|c| self.color(c))
    }

    pub fn bg_color(&self, analysis: &ColorAnalysis) -> Option<Rgb> {
        analysis.bg_color.as_deref().and_then(|c| self.color(c))
    }

    /// Padding after global density and the element's `dense` flag.
    pub fn density_padding(&self, horizontal: f32, vertical: f32, dense: bool) -> Padding {
        let mut factor = self.settings.component_density.factor();
        if dense {
            factor *= 0.75;
        }
        if factor >= 1.0 {
            return Padding::symmetric(horizontal, vertical);
        }
        Padding::symmetric(
            (horizontal * factor).floor().max(4.0),
            (vertical * factor).floor().max(2.0),
        )
    }

    // Node creation

    /// A hugging frame with no fill.
    pub fn frame(&mut self, name: &str, layout: LayoutMode) -> BuildResult<NodeId> {
        let (layout, sizing) = if self.settings.use_auto_layout {
            (layout, SizingMode::Auto)
        } else {
            (LayoutMode::None, SizingMode::Fixed)
        };
        let node = self.builder.create_container(layout, sizing);
        self.builder.set_name(node, name)?;
        Ok(node)
    }

    /// A frame with a transparent fill.
    pub fn clear_frame(&mut self, name: &str, layout: LayoutMode) -> BuildResult<NodeId> {
        let node = self.frame(name, layout)?;
        self.clear_fill(node)?;
        Ok(node)
    }

    /// A frame filled with `color`.
    pub fn filled_frame(&mut self, name: &str, layout: LayoutMode, color: Rgb) -> BuildResult<NodeId> {
        let node = self.frame(name, layout)?;
        self.fill(node, color)?;
        Ok(node)
    }

    /// A text node in the Inter face for `style.weight`. When that face is
    /// missing or fails to load, the builder's default font is used instead;
    /// a failure of the default font is returned.
    pub fn text(&mut self, characters: &str, style: TextStyle) -> BuildResult<NodeId> {
        let font = FontName::inter(style.weight);
        let created = if self.builder.is_font_available(&font) {
            self.builder.create_text(characters, &font)
        } else {
            Err(BuildError::font_unavailable(&font.family, &font.style))
        };
        let node = match created {
            Ok(node) => node,
            Err(BuildError::FontUnavailable { family, style }) => {
                tracing::debug!(%family, %style, "font missing, using default");
                let fallback = self.builder.default_font();
                self.builder.create_text(characters, &fallback)?
            }
            Err(error) => return Err(error),
        };
        self.builder.set_font_size(node, style.size)?;
        self.builder.set_fills(node, vec![Paint::solid(style.color)])?;
        Ok(node)
    }

    pub fn shape(&mut self, kind: ShapeKind, width: f32, height: f32, color: Rgb) -> BuildResult<NodeId> {
        let node = self.builder.create_shape(kind, width, height);
        self.fill(node, color)?;
        Ok(node)
    }

    pub fn rect(&mut self, name: &str, width: f32, height: f32, color: Rgb) -> BuildResult<NodeId> {
        let node = self.shape(ShapeKind::Rectangle, width, height, color)?;
        self.builder.set_name(node, name)?;
        Ok(node)
    }

    pub fn ellipse(&mut self, name: &str, size: f32, color: Rgb) -> BuildResult<NodeId> {
        let node = self.shape(ShapeKind::Ellipse, size, size, color)?;
        self.builder.set_name(node, name)?;
        Ok(node)
    }

    /// An icon glyph in the icon font, or a rounded placeholder frame when
    /// the icon font is not loaded.
    pub fn icon(&mut self, name: &str, size: f32, color: Option<Rgb>) -> BuildResult<NodeId> {
        let font = FontName::new(ICON_FONT_FAMILY, ICON_FONT_STYLE);
        if !self.builder.is_font_available(&font) {
            let node = self.frame(&format!("icon-placeholder-{}", normalize_icon_name(name)), LayoutMode::None)?;
            self.size(node, size, size)?;
            self.radius(node, size / 4.0)?;
            self.fill(node, color.unwrap_or(Rgb::grey(0.5)))?;
            return Ok(node);
        }
        let node = self
            .builder
            .create_text(&icon_glyph(name).to_string(), &font)?;
        self.builder.set_name(node, "q-icon")?;
        self.builder.set_font_size(node, size)?;
        self.builder
            .set_fills(node, vec![Paint::solid(color.unwrap_or(Rgb::BLACK))])?;
        Ok(node)
    }

    // Node properties

    pub fn set_name(&mut self, node: NodeId, name: &str) -> BuildResult<()> {
        self.builder.set_name(node, name)
    }

    pub fn fill(&mut self, node: NodeId, color: Rgb) -> BuildResult<()> {
        self.builder.set_fills(node, vec![Paint::solid(color)])
    }

    pub fn fill_paint(&mut self, node: NodeId, paint: Paint) -> BuildResult<()> {
        self.builder.set_fills(node, vec![paint])
    }

    pub fn clear_fill(&mut self, node: NodeId) -> BuildResult<()> {
        self.builder.set_fills(node, vec![Paint::transparent()])
    }

    pub fn stroke(&mut self, node: NodeId, color: Rgb, weight: f32) -> BuildResult<()> {
        self.builder
            .set_strokes(node, vec![Paint::solid(color)], StrokeWeights::uniform(weight))
    }

    pub fn bottom_stroke(&mut self, node: NodeId, color: Rgb, weight: f32) -> BuildResult<()> {
        self.builder
            .set_strokes(node, vec![Paint::solid(color)], StrokeWeights::bottom(weight))
    }

    pub fn radius(&mut self, node: NodeId, radius: f32) -> BuildResult<()> {
        self.builder.set_corner_radius(node, radius)
    }

    pub fn padding(&mut self, node: NodeId, padding: Padding) -> BuildResult<()> {
        self.builder.set_padding(node, padding)
    }

    /// Horizontal and vertical padding.
    pub fn pad(&mut self, node: NodeId, horizontal: f32, vertical: f32) -> BuildResult<()> {
        self.builder
            .set_padding(node, Padding::symmetric(horizontal, vertical))
    }

    pub fn spacing(&mut self, node: NodeId, spacing: f32) -> BuildResult<()> {
        self.builder.set_item_spacing(node, spacing)
    }

    pub fn center(&mut self, node: NodeId) -> BuildResult<()> {
        self.builder.set_primary_align(node, AxisAlign::Center)?;
        self.builder.set_counter_align(node, CounterAlign::Center)
    }

    pub fn align_items(&mut self, node: NodeId, align: CounterAlign) -> BuildResult<()> {
        self.builder.set_counter_align(node, align)
    }

    pub fn justify(&mut self, node: NodeId, align: AxisAlign) -> BuildResult<()> {
        self.builder.set_primary_align(node, align)
    }

    pub fn size(&mut self, node: NodeId, width: f32, height: f32) -> BuildResult<()> {
        self.builder.set_size(node, width, height)
    }

    pub fn width(&mut self, node: NodeId, width: f32) -> BuildResult<()> {
        self.builder.set_width(node, width)
    }

    pub fn shadow(&mut self, node: NodeId, shadow: Shadow) -> BuildResult<()> {
        self.builder.set_effects(node, vec![Effect::DropShadow(shadow)])
    }

    pub fn opacity(&mut self, node: NodeId, opacity: f32) -> BuildResult<()> {
        self.builder.set_opacity(node, opacity)
    }

    pub fn append(&mut self, parent: NodeId, child: NodeId) -> BuildResult<()> {
        self.builder.append_child(parent, child)
    }

    /// Recolour `node` if it is text, otherwise every text below it.
    pub fn recolor_texts(&mut self, node: NodeId, color: Rgb) -> BuildResult<()> {
        for text in self.text_nodes(node)? {
            self.builder.set_fills(text, vec![Paint::solid(color)])?;
        }
        Ok(())
    }

    /// `node` itself if it is text, otherwise its text descendants in order.
    pub fn text_nodes(&self, node: NodeId) -> BuildResult<Vec<NodeId>> {
        let mut found = Vec::new();
        let mut stack = vec![node];
        while let Some(current) = stack.pop() {
            match self.builder.kind(current)? {
                NodeKind::Text => found.push(current),
                NodeKind::Container => {
                    let children = self.builder.children(current)?;
                    stack.extend(children.into_iter().rev());
                }
                NodeKind::Shape => {}
            }
        }
        Ok(found)
    }

    pub fn mark_colors_applied(&mut self, node: NodeId) -> BuildResult<()> {
        self.builder.set_metadata(node, COLORS_APPLIED, "true")
    }

    pub fn colors_applied(&self, node: NodeId) -> BuildResult<bool> {
        Ok(self.builder.metadata(node, COLORS_APPLIED)?.as_deref() == Some("true"))
    }

    /// Whether `node` sits in the tree below `root`.
    pub fn is_within(&self, node: NodeId, root: NodeId) -> BuildResult<bool> {
        let mut current = node;
        loop {
            if current == root {
                return Ok(true);
            }
            match self.builder.parent(current)? {
                Some(parent) => current = parent,
                None => return Ok(false),
            }
        }
    }
}
