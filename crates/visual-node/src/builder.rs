//! The node-building capability the converter drives.
//!
//! A renderer implements [`VisualNodeBuilder`] on top of its own canvas API.
//! Nodes are addressed by [`NodeId`] handles and are mutated one call at a
//! time; the converter never holds references into the renderer's storage.

use crate::error::BuildResult;
use crate::node::{
    AxisAlign, CounterAlign, FontName, LayoutMode, NodeKind, Padding, ShapeKind, SizingMode,
    TextAlign, TextCase,
};
use crate::paint::{Effect, Paint, StrokeWeights};
use std::fmt;

/// Handle to a node owned by a builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Creation and mutation of visual nodes.
///
/// Setters fail with [`crate::BuildError::Unsupported`] when the property does
/// not exist on the node's kind, and with [`crate::BuildError::UnknownNode`]
/// for stale handles.
pub trait VisualNodeBuilder {
    fn create_container(&mut self, layout: LayoutMode, sizing: SizingMode) -> NodeId;

    /// Create a text node. The font must be available.
    fn create_text(&mut self, characters: &str, font: &FontName) -> BuildResult<NodeId>;

    fn create_shape(&mut self, kind: ShapeKind, width: f32, height: f32) -> NodeId;

    /// Font that is always available for text.
    fn default_font(&self) -> FontName;

    fn is_font_available(&self, font: &FontName) -> bool;

    fn kind(&self, node: NodeId) -> BuildResult<NodeKind>;

    fn name(&self, node: NodeId) -> BuildResult<String>;
    fn set_name(&mut self, node: NodeId, name: &str) -> BuildResult<()>;

    fn fills(&self, node: NodeId) -> BuildResult<Vec<Paint>>;
    fn set_fills(&mut self, node: NodeId, fills: Vec<Paint>) -> BuildResult<()>;

    fn strokes(&self, node: NodeId) -> BuildResult<Vec<Paint>>;
    fn set_strokes(
        &mut self,
        node: NodeId,
        strokes: Vec<Paint>,
        weights: StrokeWeights,
    ) -> BuildResult<()>;

    fn effects(&self, node: NodeId) -> BuildResult<Vec<Effect>>;
    fn set_effects(&mut self, node: NodeId, effects: Vec<Effect>) -> BuildResult<()>;

    fn set_corner_radius(&mut self, node: NodeId, radius: f32) -> BuildResult<()>;

    fn padding(&self, node: NodeId) -> BuildResult<Padding>;
    fn set_padding(&mut self, node: NodeId, padding: Padding) -> BuildResult<()>;

    fn set_item_spacing(&mut self, node: NodeId, spacing: f32) -> BuildResult<()>;
    fn set_layout_mode(&mut self, node: NodeId, layout: LayoutMode) -> BuildResult<()>;
    fn set_primary_align(&mut self, node: NodeId, align: AxisAlign) -> BuildResult<()>;
    fn set_counter_align(&mut self, node: NodeId, align: CounterAlign) -> BuildResult<()>;
    fn sizing(&self, node: NodeId) -> BuildResult<(SizingMode, SizingMode)>;
    fn set_sizing(
        &mut self,
        node: NodeId,
        horizontal: SizingMode,
        vertical: SizingMode,
    ) -> BuildResult<()>;

    /// Current width and height. Hugging containers report `None`.
    fn size(&self, node: NodeId) -> BuildResult<(Option<f32>, Option<f32>)>;
    fn set_width(&mut self, node: NodeId, width: f32) -> BuildResult<()>;
    fn set_height(&mut self, node: NodeId, height: f32) -> BuildResult<()>;

    fn set_size(&mut self, node: NodeId, width: f32, height: f32) -> BuildResult<()> {
        self.set_width(node, width)?;
        self.set_height(node, height)
    }

    fn set_position(&mut self, node: NodeId, x: f32, y: f32) -> BuildResult<()>;

    fn opacity(&self, node: NodeId) -> BuildResult<f32>;
    fn set_opacity(&mut self, node: NodeId, opacity: f32) -> BuildResult<()>;
    fn set_visible(&mut self, node: NodeId, visible: bool) -> BuildResult<()>;

    fn characters(&self, node: NodeId) -> BuildResult<String>;
    fn font(&self, node: NodeId) -> BuildResult<FontName>;
    /// Switch the font of a text node. The font must be available.
    fn set_font(&mut self, node: NodeId, font: &FontName) -> BuildResult<()>;
    fn set_font_size(&mut self, node: NodeId, size: f32) -> BuildResult<()>;
    fn set_text_align(&mut self, node: NodeId, align: TextAlign) -> BuildResult<()>;
    fn set_letter_spacing(&mut self, node: NodeId, spacing: f32) -> BuildResult<()>;
    fn set_text_case(&mut self, node: NodeId, case: TextCase) -> BuildResult<()>;

    /// Move `child` to the end of `parent`, detaching it from any old parent.
    fn append_child(&mut self, parent: NodeId, child: NodeId) -> BuildResult<()>;
    /// Move `child` to `index` within `parent`. Out of range indices append.
    fn insert_child(&mut self, parent: NodeId, index: usize, child: NodeId) -> BuildResult<()>;
    fn children(&self, node: NodeId) -> BuildResult<Vec<NodeId>>;
    fn parent(&self, node: NodeId) -> BuildResult<Option<NodeId>>;

    fn metadata(&self, node: NodeId, key: &str) -> BuildResult<Option<String>>;
    fn set_metadata(&mut self, node: NodeId, key: &str, value: &str) -> BuildResult<()>;

    /// Deep-copy a node and its descendants. The copy has no parent.
    fn clone_subtree(&mut self, node: NodeId) -> BuildResult<NodeId>;
}
