//! Visual nodes for design-tool canvases.
//!
//! This crate defines the output side of the converter: the node model
//! ([`VisualNode`]), the [`VisualNodeBuilder`] capability a renderer provides,
//! an in-memory [`TreeBuilder`], and [`StyleEffect`]s with their dispatcher.

pub mod builder;
pub mod effect;
pub mod error;
pub mod node;
pub mod paint;
pub mod tree;

pub use builder::{NodeId, VisualNodeBuilder};
pub use effect::{apply, apply_all, Axis, Side, StyleEffect};
pub use error::{BuildError, BuildResult};
pub use node::{
    AxisAlign, Container, CounterAlign, FontName, FontWeight, LayoutMode, Metadata, NodeKind,
    Padding, Shape, ShapeKind, SizingMode, Text, TextAlign, TextCase, VisualNode,
};
pub use paint::{Effect, GradientStop, Paint, Rgb, Rgba, Shadow, StrokeWeights};
pub use tree::TreeBuilder;

#[cfg(all(test, feature = "serde"))]
mod tests {
    use super::*;

    #[test]
    fn test_tree_serializes_with_type_tags() {
        let mut b = TreeBuilder::new();
        let root = b.create_container(LayoutMode::Horizontal, SizingMode::Auto);
        b.set_name(root, "row").unwrap();
        let text = b.create_text("Hi", &FontName::default()).unwrap();
        b.append_child(root, text).unwrap();
        let json = serde_json::to_value(b.finish(root).unwrap()).unwrap();
        assert_eq!(json["type"], "container");
        assert_eq!(json["layout"], "horizontal");
        assert_eq!(json["children"][0]["type"], "text");
        assert_eq!(json["children"][0]["characters"], "Hi");
    }
}
