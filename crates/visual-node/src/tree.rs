//! In-memory [`VisualNodeBuilder`] backed by an arena.

use crate::builder::{NodeId, VisualNodeBuilder};
use crate::error::{BuildError, BuildResult};
use crate::node::{
    AxisAlign, Container, CounterAlign, FontName, FontWeight, LayoutMode, Metadata, NodeKind,
    Padding, Shape, ShapeKind, SizingMode, Text, TextAlign, TextCase, VisualNode,
};
use crate::paint::{Effect, Paint, StrokeWeights};
use rustc_hash::FxHashSet;
use smol_str::SmolStr;

#[derive(Debug, Clone)]
struct Slot {
    /// Node payload. Container children live in `children`, not here.
    node: VisualNode,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Builds a [`VisualNode`] tree in memory.
///
/// Used by the CLI and by tests; a design-tool host would implement
/// [`VisualNodeBuilder`] over its own node API instead.
#[derive(Debug, Clone)]
pub struct TreeBuilder {
    slots: Vec<Slot>,
    fonts: FxHashSet<FontName>,
    default_font: FontName,
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeBuilder {
    /// A builder with Inter, Roboto and Material Icons loaded.
    pub fn new() -> Self {
        let mut fonts = Vec::new();
        for family in ["Inter", "Roboto"] {
            for weight in [
                FontWeight::Light,
                FontWeight::Regular,
                FontWeight::Medium,
                FontWeight::Bold,
            ] {
                fonts.push(FontName::new(family, weight.style_name()));
            }
        }
        fonts.push(FontName::new("Material Icons", "Regular"));
        Self::with_fonts(fonts, FontName::inter(FontWeight::Regular))
    }

    /// A builder that only knows the given fonts. `default_font` is always
    /// added to the set.
    pub fn with_fonts(fonts: impl IntoIterator<Item = FontName>, default_font: FontName) -> Self {
        let mut fonts: FxHashSet<FontName> = fonts.into_iter().collect();
        fonts.insert(default_font.clone());
        Self {
            slots: Vec::new(),
            fonts,
            default_font,
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Assemble the tree rooted at `root`.
    pub fn finish(&self, root: NodeId) -> BuildResult<VisualNode> {
        let slot = self.slot(root)?;
        let mut node = slot.node.clone();
        if let VisualNode::Container(container) = &mut node {
            container.children = slot
                .children
                .iter()
                .map(|&child| self.finish(child))
                .collect::<BuildResult<_>>()?;
        }
        Ok(node)
    }

    fn push(&mut self, node: VisualNode) -> NodeId {
        let id = NodeId(self.slots.len() as u32);
        self.slots.push(Slot {
            node,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    fn slot(&self, id: NodeId) -> BuildResult<&Slot> {
        self.slots
            .get(id.0 as usize)
            .ok_or(BuildError::UnknownNode(id))
    }

    fn slot_mut(&mut self, id: NodeId) -> BuildResult<&mut Slot> {
        self.slots
            .get_mut(id.0 as usize)
            .ok_or(BuildError::UnknownNode(id))
    }

    fn node(&self, id: NodeId) -> BuildResult<&VisualNode> {
        Ok(&self.slot(id)?.node)
    }

    fn node_mut(&mut self, id: NodeId) -> BuildResult<&mut VisualNode> {
        Ok(&mut self.slot_mut(id)?.node)
    }

    fn container(&self, id: NodeId) -> BuildResult<&Container> {
        match self.node(id)? {
            VisualNode::Container(c) => Ok(c),
            _ => Err(BuildError::NotAContainer(id)),
        }
    }

    fn container_mut(&mut self, id: NodeId) -> BuildResult<&mut Container> {
        match self.node_mut(id)? {
            VisualNode::Container(c) => Ok(c),
            _ => Err(BuildError::NotAContainer(id)),
        }
    }

    fn text(&self, id: NodeId, property: &'static str) -> BuildResult<&Text> {
        match self.node(id)? {
            VisualNode::Text(t) => Ok(t),
            other => Err(unsupported(id, other, property)),
        }
    }

    fn text_mut(&mut self, id: NodeId, property: &'static str) -> BuildResult<&mut Text> {
        match self.node_mut(id)? {
            VisualNode::Text(t) => Ok(t),
            other => Err(unsupported(id, other, property)),
        }
    }

    fn metadata_mut(&mut self, id: NodeId) -> BuildResult<&mut Metadata> {
        Ok(match self.node_mut(id)? {
            VisualNode::Container(c) => &mut c.metadata,
            VisualNode::Text(t) => &mut t.metadata,
            VisualNode::Shape(s) => &mut s.metadata,
        })
    }

    fn is_ancestor(&self, ancestor: NodeId, mut node: NodeId) -> BuildResult<bool> {
        loop {
            if node == ancestor {
                return Ok(true);
            }
            match self.slot(node)?.parent {
                Some(parent) => node = parent,
                None => return Ok(false),
            }
        }
    }

    fn detach(&mut self, child: NodeId) -> BuildResult<()> {
        if let Some(old) = self.slot_mut(child)?.parent.take() {
            self.slot_mut(old)?.children.retain(|&c| c != child);
        }
        Ok(())
    }

    fn attach(&mut self, parent: NodeId, index: Option<usize>, child: NodeId) -> BuildResult<()> {
        self.container(parent)?;
        self.slot(child)?;
        if self.is_ancestor(child, parent)? {
            return Err(BuildError::InvalidHierarchy { parent, child });
        }
        self.detach(child)?;
        let children = &mut self.slot_mut(parent)?.children;
        match index {
            Some(i) if i < children.len() => children.insert(i, child),
            _ => children.push(child),
        }
        self.slot_mut(child)?.parent = Some(parent);
        Ok(())
    }
}

fn unsupported(node: NodeId, actual: &VisualNode, property: &'static str) -> BuildError {
    BuildError::Unsupported {
        node,
        kind: actual.kind().as_str(),
        property,
    }
}

impl VisualNodeBuilder for TreeBuilder {
    fn create_container(&mut self, layout: LayoutMode, sizing: SizingMode) -> NodeId {
        self.push(VisualNode::Container(Container::new(layout, sizing)))
    }

    fn create_text(&mut self, characters: &str, font: &FontName) -> BuildResult<NodeId> {
        if !self.fonts.contains(font) {
            return Err(BuildError::font_unavailable(&font.family, &font.style));
        }
        Ok(self.push(VisualNode::Text(Text::new(characters, font.clone()))))
    }

    fn create_shape(&mut self, kind: ShapeKind, width: f32, height: f32) -> NodeId {
        self.push(VisualNode::Shape(Shape::new(kind, width, height)))
    }

    fn default_font(&self) -> FontName {
        self.default_font.clone()
    }

    fn is_font_available(&self, font: &FontName) -> bool {
        self.fonts.contains(font)
    }

    fn kind(&self, node: NodeId) -> BuildResult<NodeKind> {
        Ok(self.node(node)?.kind())
    }

    fn name(&self, node: NodeId) -> BuildResult<String> {
        Ok(self.node(node)?.name().to_string())
    }

    fn set_name(&mut self, node: NodeId, name: &str) -> BuildResult<()> {
        let target = match self.node_mut(node)? {
            VisualNode::Container(c) => &mut c.name,
            VisualNode::Text(t) => &mut t.name,
            VisualNode::Shape(s) => &mut s.name,
        };
        *target = name.to_string();
        Ok(())
    }

    fn fills(&self, node: NodeId) -> BuildResult<Vec<Paint>> {
        Ok(self.node(node)?.fills().to_vec())
    }

    fn set_fills(&mut self, node: NodeId, fills: Vec<Paint>) -> BuildResult<()> {
        match self.node_mut(node)? {
            VisualNode::Container(c) => c.fills = fills,
            VisualNode::Text(t) => t.fills = fills,
            VisualNode::Shape(s) => s.fills = fills,
        }
        Ok(())
    }

    fn strokes(&self, node: NodeId) -> BuildResult<Vec<Paint>> {
        match self.node(node)? {
            VisualNode::Container(c) => Ok(c.strokes.clone()),
            VisualNode::Shape(s) => Ok(s.strokes.clone()),
            VisualNode::Text(_) => Ok(Vec::new()),
        }
    }

    fn set_strokes(
        &mut self,
        node: NodeId,
        strokes: Vec<Paint>,
        weights: StrokeWeights,
    ) -> BuildResult<()> {
        match self.node_mut(node)? {
            VisualNode::Container(c) => {
                c.strokes = strokes;
                c.stroke_weights = weights;
            }
            VisualNode::Shape(s) => {
                s.strokes = strokes;
                s.stroke_weights = weights;
            }
            other => return Err(unsupported(node, other, "strokes")),
        }
        Ok(())
    }

    fn effects(&self, node: NodeId) -> BuildResult<Vec<Effect>> {
        match self.node(node)? {
            VisualNode::Container(c) => Ok(c.effects.clone()),
            _ => Ok(Vec::new()),
        }
    }

    fn set_effects(&mut self, node: NodeId, effects: Vec<Effect>) -> BuildResult<()> {
        match self.node_mut(node)? {
            VisualNode::Container(c) => c.effects = effects,
            other => return Err(unsupported(node, other, "effects")),
        }
        Ok(())
    }

    fn set_corner_radius(&mut self, node: NodeId, radius: f32) -> BuildResult<()> {
        match self.node_mut(node)? {
            VisualNode::Container(c) => c.corner_radius = radius,
            VisualNode::Shape(s) => s.corner_radius = radius,
            other => return Err(unsupported(node, other, "corner radius")),
        }
        Ok(())
    }

    fn padding(&self, node: NodeId) -> BuildResult<Padding> {
        Ok(self.container(node)?.padding)
    }

    fn set_padding(&mut self, node: NodeId, padding: Padding) -> BuildResult<()> {
        self.container_mut(node)?.padding = padding;
        Ok(())
    }

    fn set_item_spacing(&mut self, node: NodeId, spacing: f32) -> BuildResult<()> {
        self.container_mut(node)?.item_spacing = spacing;
        Ok(())
    }

    fn set_layout_mode(&mut self, node: NodeId, layout: LayoutMode) -> BuildResult<()> {
        self.container_mut(node)?.layout = layout;
        Ok(())
    }

    fn set_primary_align(&mut self, node: NodeId, align: AxisAlign) -> BuildResult<()> {
        self.container_mut(node)?.primary_align = align;
        Ok(())
    }

    fn set_counter_align(&mut self, node: NodeId, align: CounterAlign) -> BuildResult<()> {
        self.container_mut(node)?.counter_align = align;
        Ok(())
    }

    fn sizing(&self, node: NodeId) -> BuildResult<(SizingMode, SizingMode)> {
        let container = self.container(node)?;
        Ok((container.horizontal_sizing, container.vertical_sizing))
    }

    fn set_sizing(
        &mut self,
        node: NodeId,
        horizontal: SizingMode,
        vertical: SizingMode,
    ) -> BuildResult<()> {
        let container = self.container_mut(node)?;
        container.horizontal_sizing = horizontal;
        container.vertical_sizing = vertical;
        Ok(())
    }

    fn size(&self, node: NodeId) -> BuildResult<(Option<f32>, Option<f32>)> {
        Ok(match self.node(node)? {
            VisualNode::Container(c) => (c.width, c.height),
            VisualNode::Shape(s) => (Some(s.width), Some(s.height)),
            VisualNode::Text(_) => (None, None),
        })
    }

    fn set_width(&mut self, node: NodeId, width: f32) -> BuildResult<()> {
        match self.node_mut(node)? {
            VisualNode::Container(c) => {
                c.width = Some(width);
                c.horizontal_sizing = SizingMode::Fixed;
            }
            VisualNode::Shape(s) => s.width = width,
            other => return Err(unsupported(node, other, "width")),
        }
        Ok(())
    }

    fn set_height(&mut self, node: NodeId, height: f32) -> BuildResult<()> {
        match self.node_mut(node)? {
            VisualNode::Container(c) => {
                c.height = Some(height);
                c.vertical_sizing = SizingMode::Fixed;
            }
            VisualNode::Shape(s) => s.height = height,
            other => return Err(unsupported(node, other, "height")),
        }
        Ok(())
    }

    fn set_position(&mut self, node: NodeId, x: f32, y: f32) -> BuildResult<()> {
        match self.node_mut(node)? {
            VisualNode::Shape(s) => s.position = Some((x, y)),
            other => return Err(unsupported(node, other, "position")),
        }
        Ok(())
    }

    fn opacity(&self, node: NodeId) -> BuildResult<f32> {
        Ok(self.node(node)?.opacity())
    }

    fn set_opacity(&mut self, node: NodeId, opacity: f32) -> BuildResult<()> {
        let opacity = opacity.clamp(0.0, 1.0);
        match self.node_mut(node)? {
            VisualNode::Container(c) => c.opacity = opacity,
            VisualNode::Text(t) => t.opacity = opacity,
            VisualNode::Shape(s) => s.opacity = opacity,
        }
        Ok(())
    }

    fn set_visible(&mut self, node: NodeId, visible: bool) -> BuildResult<()> {
        match self.node_mut(node)? {
            VisualNode::Container(c) => c.visible = visible,
            VisualNode::Text(t) => t.visible = visible,
            VisualNode::Shape(s) => s.visible = visible,
        }
        Ok(())
    }

    fn characters(&self, node: NodeId) -> BuildResult<String> {
        Ok(self.text(node, "characters")?.characters.clone())
    }

    fn font(&self, node: NodeId) -> BuildResult<FontName> {
        Ok(self.text(node, "font")?.font.clone())
    }

    fn set_font(&mut self, node: NodeId, font: &FontName) -> BuildResult<()> {
        if !self.fonts.contains(font) {
            return Err(BuildError::font_unavailable(&font.family, &font.style));
        }
        self.text_mut(node, "font")?.font = font.clone();
        Ok(())
    }

    fn set_font_size(&mut self, node: NodeId, size: f32) -> BuildResult<()> {
        self.text_mut(node, "font size")?.font_size = size;
        Ok(())
    }

    fn set_text_align(&mut self, node: NodeId, align: TextAlign) -> BuildResult<()> {
        self.text_mut(node, "text align")?.text_align = align;
        Ok(())
    }

    fn set_letter_spacing(&mut self, node: NodeId, spacing: f32) -> BuildResult<()> {
        self.text_mut(node, "letter spacing")?.letter_spacing = spacing;
        Ok(())
    }

    fn set_text_case(&mut self, node: NodeId, case: TextCase) -> BuildResult<()> {
        self.text_mut(node, "text case")?.text_case = case;
        Ok(())
    }

    fn append_child(&mut self, parent: NodeId, child: NodeId) -> BuildResult<()> {
        self.attach(parent, None, child)
    }

    fn insert_child(&mut self, parent: NodeId, index: usize, child: NodeId) -> BuildResult<()> {
        self.attach(parent, Some(index), child)
    }

    fn children(&self, node: NodeId) -> BuildResult<Vec<NodeId>> {
        Ok(self.slot(node)?.children.clone())
    }

    fn parent(&self, node: NodeId) -> BuildResult<Option<NodeId>> {
        Ok(self.slot(node)?.parent)
    }

    fn metadata(&self, node: NodeId, key: &str) -> BuildResult<Option<String>> {
        Ok(self.node(node)?.metadata().get(key).cloned())
    }

    fn set_metadata(&mut self, node: NodeId, key: &str, value: &str) -> BuildResult<()> {
        self.metadata_mut(node)?
            .insert(SmolStr::new(key), value.to_string());
        Ok(())
    }

    fn clone_subtree(&mut self, node: NodeId) -> BuildResult<NodeId> {
        let source = self.slot(node)?.clone();
        let copy = self.push(source.node);
        for child in source.children {
            let child_copy = self.clone_subtree(child)?;
            self.slot_mut(copy)?.children.push(child_copy);
            self.slot_mut(child_copy)?.parent = Some(copy);
        }
        Ok(copy)
    }
}
