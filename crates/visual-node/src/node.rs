//! The assembled visual-node tree handed to the renderer.

use crate::paint::{Effect, Paint, Rgb, StrokeWeights};
use indexmap::IndexMap;
use smol_str::SmolStr;

/// Auto-layout direction of a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum LayoutMode {
    Horizontal,
    #[default]
    Vertical,
    /// Absolute positioning; children keep their order but are not flowed.
    None,
}

impl LayoutMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            LayoutMode::Horizontal => "horizontal",
            LayoutMode::Vertical => "vertical",
            LayoutMode::None => "none",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum SizingMode {
    /// Hug contents.
    #[default]
    Auto,
    Fixed,
    /// Stretch to the parent.
    Fill,
}

/// Alignment along the layout axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum AxisAlign {
    #[default]
    Min,
    Center,
    Max,
    SpaceBetween,
}

/// Alignment across the layout axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum CounterAlign {
    #[default]
    Min,
    Center,
    Max,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
    Justified,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum TextCase {
    #[default]
    Original,
    Upper,
    Lower,
    Title,
}

/// Font weights the converter asks for. Each maps to a font style name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum FontWeight {
    Light,
    #[default]
    Regular,
    Medium,
    Bold,
}

impl FontWeight {
    pub fn style_name(&self) -> &'static str {
        match self {
            FontWeight::Light => "Light",
            FontWeight::Regular => "Regular",
            FontWeight::Medium => "Medium",
            FontWeight::Bold => "Bold",
        }
    }

    /// Parse a CSS `font-weight` value (`bold`, `500`, ...).
    pub fn from_css(value: &str) -> Option<Self> {
        match value.trim() {
            "lighter" | "100" | "200" | "300" => Some(FontWeight::Light),
            "normal" | "400" => Some(FontWeight::Regular),
            "500" | "600" => Some(FontWeight::Medium),
            "bold" | "bolder" | "700" | "800" | "900" => Some(FontWeight::Bold),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FontName {
    pub family: SmolStr,
    pub style: SmolStr,
}

impl FontName {
    pub fn new(family: impl AsRef<str>, style: impl AsRef<str>) -> Self {
        Self {
            family: SmolStr::new(family.as_ref()),
            style: SmolStr::new(style.as_ref()),
        }
    }

    /// Inter in the given weight, the face used for all UI text.
    pub fn inter(weight: FontWeight) -> Self {
        Self::new("Inter", weight.style_name())
    }

    pub fn with_weight(&self, weight: FontWeight) -> Self {
        Self::new(&self.family, weight.style_name())
    }
}

impl Default for FontName {
    fn default() -> Self {
        Self::inter(FontWeight::Regular)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Padding {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Padding {
    pub const ZERO: Padding = Padding::uniform(0.0);

    pub const fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    pub const fn uniform(value: f32) -> Self {
        Self::new(value, value, value, value)
    }

    /// Horizontal and vertical padding.
    pub const fn symmetric(horizontal: f32, vertical: f32) -> Self {
        Self::new(vertical, horizontal, vertical, horizontal)
    }

    pub fn max(&self) -> f32 {
        self.top.max(self.right).max(self.bottom).max(self.left)
    }

    pub fn scale(&self, factor: f32) -> Self {
        Self::new(
            self.top * factor,
            self.right * factor,
            self.bottom * factor,
            self.left * factor,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "camelCase"))]
pub enum ShapeKind {
    Rectangle,
    Ellipse,
    Polygon { sides: u32 },
}

impl ShapeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::Rectangle => "rectangle",
            ShapeKind::Ellipse => "ellipse",
            ShapeKind::Polygon { .. } => "polygon",
        }
    }
}

/// Metadata attached to a node, keyed by plain strings.
pub type Metadata = IndexMap<SmolStr, String>;

/// A frame with optional auto-layout.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Container {
    pub name: String,
    pub layout: LayoutMode,
    pub horizontal_sizing: SizingMode,
    pub vertical_sizing: SizingMode,
    pub primary_align: AxisAlign,
    pub counter_align: CounterAlign,
    pub padding: Padding,
    pub item_spacing: f32,
    pub fills: Vec<Paint>,
    pub strokes: Vec<Paint>,
    pub stroke_weights: StrokeWeights,
    pub effects: Vec<Effect>,
    pub corner_radius: f32,
    pub opacity: f32,
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub visible: bool,
    pub children: Vec<VisualNode>,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "IndexMap::is_empty")
    )]
    pub metadata: Metadata,
}

impl Container {
    pub fn new(layout: LayoutMode, sizing: SizingMode) -> Self {
        Self {
            name: String::from("Frame"),
            layout,
            horizontal_sizing: sizing,
            vertical_sizing: sizing,
            primary_align: AxisAlign::Min,
            counter_align: CounterAlign::Min,
            padding: Padding::ZERO,
            item_spacing: 0.0,
            fills: Vec::new(),
            strokes: Vec::new(),
            stroke_weights: StrokeWeights::default(),
            effects: Vec::new(),
            corner_radius: 0.0,
            opacity: 1.0,
            width: None,
            height: None,
            visible: true,
            children: Vec::new(),
            metadata: Metadata::default(),
        }
    }

    /// No fill paints anything visible.
    pub fn is_transparent(&self) -> bool {
        self.fills.iter().all(Paint::is_transparent)
    }

    /// Colour of the first solid fill.
    pub fn fill_color(&self) -> Option<Rgb> {
        self.fills.iter().find_map(Paint::solid_color)
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Text {
    pub name: String,
    pub characters: String,
    pub font: FontName,
    pub font_size: f32,
    pub fills: Vec<Paint>,
    pub text_align: TextAlign,
    pub letter_spacing: f32,
    pub text_case: TextCase,
    pub opacity: f32,
    pub visible: bool,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "IndexMap::is_empty")
    )]
    pub metadata: Metadata,
}

impl Text {
    pub fn new(characters: impl Into<String>, font: FontName) -> Self {
        let characters = characters.into();
        Self {
            name: characters.clone(),
            characters,
            font,
            font_size: 14.0,
            fills: vec![Paint::solid(Rgb::BLACK)],
            text_align: TextAlign::Left,
            letter_spacing: 0.0,
            text_case: TextCase::Original,
            opacity: 1.0,
            visible: true,
            metadata: Metadata::default(),
        }
    }

    pub fn color(&self) -> Option<Rgb> {
        self.fills.iter().find_map(Paint::solid_color)
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Shape {
    pub name: String,
    pub kind: ShapeKind,
    pub width: f32,
    pub height: f32,
    pub fills: Vec<Paint>,
    pub strokes: Vec<Paint>,
    pub stroke_weights: StrokeWeights,
    pub corner_radius: f32,
    pub opacity: f32,
    /// Explicit position inside an absolutely laid out parent.
    pub position: Option<(f32, f32)>,
    pub visible: bool,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "IndexMap::is_empty")
    )]
    pub metadata: Metadata,
}

impl Shape {
    pub fn new(kind: ShapeKind, width: f32, height: f32) -> Self {
        Self {
            name: String::from(match kind {
                ShapeKind::Rectangle => "Rectangle",
                ShapeKind::Ellipse => "Ellipse",
                ShapeKind::Polygon { .. } => "Polygon",
            }),
            kind,
            width,
            height,
            fills: vec![Paint::solid(Rgb::grey(0.85))],
            strokes: Vec::new(),
            stroke_weights: StrokeWeights::default(),
            corner_radius: 0.0,
            opacity: 1.0,
            position: None,
            visible: true,
            metadata: Metadata::default(),
        }
    }
}

/// Kinds of node a builder can create.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Container,
    Text,
    Shape,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Container => "container",
            NodeKind::Text => "text",
            NodeKind::Shape => "shape",
        }
    }
}

/// A node of the finished tree.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "camelCase"))]
pub enum VisualNode {
    Container(Container),
    Text(Text),
    Shape(Shape),
}

impl VisualNode {
    pub fn kind(&self) -> NodeKind {
        match self {
            VisualNode::Container(_) => NodeKind::Container,
            VisualNode::Text(_) => NodeKind::Text,
            VisualNode::Shape(_) => NodeKind::Shape,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            VisualNode::Container(c) => &c.name,
            VisualNode::Text(t) => &t.name,
            VisualNode::Shape(s) => &s.name,
        }
    }

    pub fn children(&self) -> &[VisualNode] {
        match self {
            VisualNode::Container(c) => &c.children,
            _ => &[],
        }
    }

    pub fn opacity(&self) -> f32 {
        match self {
            VisualNode::Container(c) => c.opacity,
            VisualNode::Text(t) => t.opacity,
            VisualNode::Shape(s) => s.opacity,
        }
    }

    pub fn fills(&self) -> &[Paint] {
        match self {
            VisualNode::Container(c) => &c.fills,
            VisualNode::Text(t) => &t.fills,
            VisualNode::Shape(s) => &s.fills,
        }
    }

    pub fn metadata(&self) -> &Metadata {
        match self {
            VisualNode::Container(c) => &c.metadata,
            VisualNode::Text(t) => &t.metadata,
            VisualNode::Shape(s) => &s.metadata,
        }
    }

    pub fn as_container(&self) -> Option<&Container> {
        match self {
            VisualNode::Container(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&Text> {
        match self {
            VisualNode::Text(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_shape(&self) -> Option<&Shape> {
        match self {
            VisualNode::Shape(s) => Some(s),
            _ => None,
        }
    }

    /// First node named `name` in pre-order, including `self`.
    pub fn find(&self, name: &str) -> Option<&VisualNode> {
        if self.name() == name {
            return Some(self);
        }
        self.children().iter().find_map(|c| c.find(name))
    }

    /// Every node in pre-order, including `self`.
    pub fn descendants(&self) -> Vec<&VisualNode> {
        let mut out = Vec::new();
        self.walk(&mut |node| out.push(node));
        out
    }

    /// Every text node in pre-order.
    pub fn texts(&self) -> Vec<&Text> {
        self.descendants()
            .into_iter()
            .filter_map(VisualNode::as_text)
            .collect()
    }

    fn walk<'a>(&'a self, f: &mut impl FnMut(&'a VisualNode)) {
        f(self);
        for child in self.children() {
            child.walk(f);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> VisualNode {
        let mut root = Container::new(LayoutMode::Vertical, SizingMode::Auto);
        root.name = "root".into();
        let mut row = Container::new(LayoutMode::Horizontal, SizingMode::Auto);
        row.name = "row".into();
        row.children
            .push(VisualNode::Text(Text::new("Hello", FontName::default())));
        root.children.push(VisualNode::Container(row));
        root.children.push(VisualNode::Shape(Shape::new(
            ShapeKind::Ellipse,
            8.0,
            8.0,
        )));
        VisualNode::Container(root)
    }

    #[test]
    fn test_find_and_walk() {
        let tree = sample();
        assert_eq!(tree.find("row").map(VisualNode::kind), Some(NodeKind::Container));
        assert_eq!(tree.find("Hello").map(VisualNode::kind), Some(NodeKind::Text));
        assert!(tree.find("missing").is_none());
        let names: Vec<&str> = tree.descendants().iter().map(|n| n.name()).collect();
        assert_eq!(names, vec!["root", "row", "Hello", "Ellipse"]);
        assert_eq!(tree.texts().len(), 1);
    }

    #[test]
    fn test_padding_helpers() {
        let p = Padding::symmetric(16.0, 8.0);
        assert_eq!(p, Padding::new(8.0, 16.0, 8.0, 16.0));
        assert_eq!(p.max(), 16.0);
        assert_eq!(p.scale(0.5), Padding::symmetric(8.0, 4.0));
    }

    #[test]
    fn test_font_weight_from_css() {
        assert_eq!(FontWeight::from_css("bold"), Some(FontWeight::Bold));
        assert_eq!(FontWeight::from_css(" 500 "), Some(FontWeight::Medium));
        assert_eq!(FontWeight::from_css("heavy"), None);
        assert_eq!(FontName::inter(FontWeight::Bold).style, "Bold");
    }

    #[test]
    fn test_empty_container_is_transparent() {
        let c = Container::new(LayoutMode::None, SizingMode::Fixed);
        assert!(c.is_transparent());
        assert_eq!(c.fill_color(), None);
    }
}
