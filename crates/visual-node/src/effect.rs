//! Declarative style effects and the dispatcher that applies them.
//!
//! Inline styles and utility classes are translated into [`StyleEffect`]s up
//! front; [`apply`] then maps each one onto the builder call that realises it
//! for the target node's kind. Text styling applied to a container is
//! inherited by every text node below it.

use crate::builder::{NodeId, VisualNodeBuilder};
use crate::error::{BuildError, BuildResult};
use crate::node::{
    AxisAlign, CounterAlign, FontWeight, LayoutMode, NodeKind, SizingMode, TextAlign, TextCase,
};
use crate::paint::{Effect, Paint, Rgb, Shadow, StrokeWeights};
use smol_str::SmolStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum Side {
    Top,
    Right,
    Bottom,
    Left,
}

impl Side {
    pub const ALL: [Side; 4] = [Side::Top, Side::Right, Side::Bottom, Side::Left];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// One visual property change.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "effect", rename_all = "camelCase"))]
pub enum StyleEffect {
    Fill { paint: Paint },
    TextColor { color: Rgb },
    Stroke { paint: Paint, weight: f32 },
    Padding { side: Side, value: f32 },
    CornerRadius { radius: f32 },
    FontSize { size: f32 },
    FontWeight { weight: FontWeight },
    LetterSpacing { spacing: f32 },
    TextCase { case: TextCase },
    TextAlign { align: TextAlign },
    LayoutMode { layout: LayoutMode },
    PrimaryAlign { align: AxisAlign },
    CounterAlign { align: CounterAlign },
    ItemSpacing { spacing: f32 },
    Width { width: f32 },
    Height { height: f32 },
    Sizing { axis: Axis, mode: SizingMode },
    DropShadow { shadow: Shadow },
    NoShadow,
    Opacity { opacity: f32 },
    Visible { visible: bool },
    /// A property with no visual counterpart, kept under its camel-cased name.
    Raw { name: SmolStr, value: String },
}

impl StyleEffect {
    /// Key under which the effect is stored. Effects with equal keys replace
    /// each other.
    pub fn key(&self) -> SmolStr {
        let key = match self {
            StyleEffect::Fill { .. } => "fill",
            StyleEffect::TextColor { .. } => "textColor",
            StyleEffect::Stroke { .. } => "stroke",
            StyleEffect::Padding { side, .. } => match side {
                Side::Top => "paddingTop",
                Side::Right => "paddingRight",
                Side::Bottom => "paddingBottom",
                Side::Left => "paddingLeft",
            },
            StyleEffect::CornerRadius { .. } => "cornerRadius",
            StyleEffect::FontSize { .. } => "fontSize",
            StyleEffect::FontWeight { .. } => "fontWeight",
            StyleEffect::LetterSpacing { .. } => "letterSpacing",
            StyleEffect::TextCase { .. } => "textCase",
            StyleEffect::TextAlign { .. } => "textAlign",
            StyleEffect::LayoutMode { .. } => "layoutMode",
            StyleEffect::PrimaryAlign { .. } => "primaryAxisAlign",
            StyleEffect::CounterAlign { .. } => "counterAxisAlign",
            StyleEffect::ItemSpacing { .. } => "itemSpacing",
            StyleEffect::Width { .. } => "width",
            StyleEffect::Height { .. } => "height",
            StyleEffect::Sizing { axis, .. } => match axis {
                Axis::Horizontal => "horizontalSizing",
                Axis::Vertical => "verticalSizing",
            },
            StyleEffect::DropShadow { .. } | StyleEffect::NoShadow => "shadow",
            StyleEffect::Opacity { .. } => "opacity",
            StyleEffect::Visible { .. } => "visible",
            StyleEffect::Raw { name, .. } => return name.clone(),
        };
        SmolStr::new_static(key)
    }

    pub fn fill(color: Rgb) -> Self {
        StyleEffect::Fill {
            paint: Paint::solid(color),
        }
    }

    pub fn text_color(color: Rgb) -> Self {
        StyleEffect::TextColor { color }
    }

    pub fn padding(side: Side, value: f32) -> Self {
        StyleEffect::Padding { side, value }
    }
}

/// Apply one effect to `node`.
///
/// Returns `Ok(false)` when the effect has no meaning for the node's kind, or
/// when a font weight is requested that the builder cannot load.
pub fn apply(
    builder: &mut dyn VisualNodeBuilder,
    node: NodeId,
    effect: &StyleEffect,
) -> BuildResult<bool> {
    let kind = builder.kind(node)?;
    let is_container = kind == NodeKind::Container;
    let has_geometry = kind != NodeKind::Text;

    match effect {
        StyleEffect::Fill { paint } if has_geometry => {
            builder.set_fills(node, vec![paint.clone()])?;
        }
        StyleEffect::Stroke { paint, weight } if has_geometry => {
            builder.set_strokes(node, vec![paint.clone()], StrokeWeights::uniform(*weight))?;
        }
        StyleEffect::CornerRadius { radius } if has_geometry => {
            builder.set_corner_radius(node, *radius)?;
        }
        StyleEffect::Width { width } if has_geometry => builder.set_width(node, *width)?,
        StyleEffect::Height { height } if has_geometry => builder.set_height(node, *height)?,

        StyleEffect::Padding { side, value } if is_container => {
            let mut padding = builder.padding(node)?;
            match side {
                Side::Top => padding.top = *value,
                Side::Right => padding.right = *value,
                Side::Bottom => padding.bottom = *value,
                Side::Left => padding.left = *value,
            }
            builder.set_padding(node, padding)?;
        }
        StyleEffect::LayoutMode { layout } if is_container => {
            builder.set_layout_mode(node, *layout)?;
        }
        StyleEffect::PrimaryAlign { align } if is_container => {
            builder.set_primary_align(node, *align)?;
        }
        StyleEffect::CounterAlign { align } if is_container => {
            builder.set_counter_align(node, *align)?;
        }
        StyleEffect::ItemSpacing { spacing } if is_container => {
            builder.set_item_spacing(node, *spacing)?;
        }
        StyleEffect::Sizing { axis, mode } if is_container => {
            let current = builder.sizing(node)?;
            let (h, v) = match axis {
                Axis::Horizontal => (*mode, current.1),
                Axis::Vertical => (current.0, *mode),
            };
            builder.set_sizing(node, h, v)?;
        }
        StyleEffect::DropShadow { shadow } if is_container => {
            let mut effects = without_drop_shadows(builder.effects(node)?);
            effects.push(Effect::DropShadow(*shadow));
            builder.set_effects(node, effects)?;
        }
        StyleEffect::NoShadow if is_container => {
            let effects = without_drop_shadows(builder.effects(node)?);
            builder.set_effects(node, effects)?;
        }

        StyleEffect::Opacity { opacity } => builder.set_opacity(node, *opacity)?,
        StyleEffect::Visible { visible } => builder.set_visible(node, *visible)?,

        StyleEffect::TextColor { color } => {
            return for_each_text(builder, node, |b, text| {
                b.set_fills(text, vec![Paint::solid(*color)])
            });
        }
        StyleEffect::FontSize { size } => {
            return for_each_text(builder, node, |b, text| b.set_font_size(text, *size));
        }
        StyleEffect::LetterSpacing { spacing } => {
            return for_each_text(builder, node, |b, text| b.set_letter_spacing(text, *spacing));
        }
        StyleEffect::TextCase { case } => {
            return for_each_text(builder, node, |b, text| b.set_text_case(text, *case));
        }
        StyleEffect::TextAlign { align } => {
            return for_each_text(builder, node, |b, text| b.set_text_align(text, *align));
        }
        StyleEffect::FontWeight { weight } => {
            return for_each_text(builder, node, |b, text| {
                let font = b.font(text)?.with_weight(*weight);
                match b.set_font(text, &font) {
                    Err(BuildError::FontUnavailable { .. }) => Ok(()),
                    other => other,
                }
            });
        }

        _ => return Ok(false),
    }
    Ok(true)
}

/// Apply a sequence of effects in order, returning how many took effect.
pub fn apply_all<'a>(
    builder: &mut dyn VisualNodeBuilder,
    node: NodeId,
    effects: impl IntoIterator<Item = &'a StyleEffect>,
) -> BuildResult<usize> {
    let mut applied = 0;
    for effect in effects {
        if apply(builder, node, effect)? {
            applied += 1;
        }
    }
    Ok(applied)
}

fn without_drop_shadows(effects: Vec<Effect>) -> Vec<Effect> {
    effects
        .into_iter()
        .filter(|e| !matches!(e, Effect::DropShadow(_)))
        .collect()
}

/// Run `f` on `node` if it is text, or on every text node below it.
fn for_each_text(
    builder: &mut dyn VisualNodeBuilder,
    node: NodeId,
    mut f: impl FnMut(&mut dyn VisualNodeBuilder, NodeId) -> BuildResult<()>,
) -> BuildResult<bool> {
    let mut stack = vec![node];
    let mut touched = false;
    while let Some(current) = stack.pop() {
        match builder.kind(current)? {
            NodeKind::Text => {
                f(builder, current)?;
                touched = true;
            }
            NodeKind::Container => {
                let children = builder.children(current)?;
                stack.extend(children.into_iter().rev());
            }
            NodeKind::Shape => {}
        }
    }
    Ok(touched)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{FontName, Padding, ShapeKind, VisualNode};
    use crate::tree::TreeBuilder;
    use pretty_assertions::assert_eq;

    fn frame_with_text(b: &mut TreeBuilder) -> (NodeId, NodeId) {
        let frame = b.create_container(LayoutMode::Vertical, SizingMode::Auto);
        let text = b.create_text("Hello", &FontName::default()).unwrap();
        b.append_child(frame, text).unwrap();
        (frame, text)
    }

    #[test]
    fn test_padding_sides_accumulate() {
        let mut b = TreeBuilder::new();
        let (frame, _) = frame_with_text(&mut b);
        apply(&mut b, frame, &StyleEffect::padding(Side::Top, 8.0)).unwrap();
        apply(&mut b, frame, &StyleEffect::padding(Side::Left, 4.0)).unwrap();
        assert_eq!(b.padding(frame).unwrap(), Padding::new(8.0, 0.0, 0.0, 4.0));
    }

    #[test]
    fn test_text_styles_are_inherited() {
        let mut b = TreeBuilder::new();
        let (frame, text) = frame_with_text(&mut b);
        let effects = [
            StyleEffect::text_color(Rgb::WHITE),
            StyleEffect::FontSize { size: 20.0 },
            StyleEffect::FontWeight {
                weight: FontWeight::Bold,
            },
        ];
        assert_eq!(apply_all(&mut b, frame, &effects).unwrap(), 3);
        let tree = b.finish(frame).unwrap();
        let t = tree.texts()[0];
        assert_eq!(t.color(), Some(Rgb::WHITE));
        assert_eq!(t.font_size, 20.0);
        assert_eq!(t.font.style, "Bold");
        assert_eq!(b.font(text).unwrap(), FontName::inter(FontWeight::Bold));
    }

    #[test]
    fn test_inapplicable_effects_are_skipped() {
        let mut b = TreeBuilder::new();
        let (_, text) = frame_with_text(&mut b);
        let dot = b.create_shape(ShapeKind::Ellipse, 4.0, 4.0);
        assert!(!apply(&mut b, text, &StyleEffect::padding(Side::Top, 1.0)).unwrap());
        assert!(!apply(&mut b, text, &StyleEffect::fill(Rgb::WHITE)).unwrap());
        assert!(!apply(&mut b, dot, &StyleEffect::ItemSpacing { spacing: 4.0 }).unwrap());
        let raw = StyleEffect::Raw {
            name: "cursor".into(),
            value: "pointer".into(),
        };
        assert!(!apply(&mut b, dot, &raw).unwrap());
        assert_eq!(raw.key(), "cursor");
    }

    #[test]
    fn test_missing_weight_keeps_font() {
        let mut b = TreeBuilder::with_fonts([], FontName::default());
        let (frame, text) = frame_with_text(&mut b);
        let bold = StyleEffect::FontWeight {
            weight: FontWeight::Bold,
        };
        assert!(apply(&mut b, frame, &bold).unwrap());
        assert_eq!(b.font(text).unwrap(), FontName::default());
    }

    #[test]
    fn test_shadow_replaces_previous() {
        let mut b = TreeBuilder::new();
        let (frame, _) = frame_with_text(&mut b);
        let shadow = |alpha| StyleEffect::DropShadow {
            shadow: Shadow::black(alpha, 0.0, 2.0, 4.0),
        };
        apply(&mut b, frame, &shadow(0.2)).unwrap();
        apply(&mut b, frame, &shadow(0.3)).unwrap();
        assert_eq!(b.effects(frame).unwrap().len(), 1);
        apply(&mut b, frame, &StyleEffect::NoShadow).unwrap();
        assert!(b.effects(frame).unwrap().is_empty());
    }

    #[test]
    fn test_sizing_keeps_other_axis() {
        let mut b = TreeBuilder::new();
        let (frame, _) = frame_with_text(&mut b);
        b.set_height(frame, 40.0).unwrap();
        let fill_width = StyleEffect::Sizing {
            axis: Axis::Horizontal,
            mode: SizingMode::Fill,
        };
        apply(&mut b, frame, &fill_width).unwrap();
        match b.finish(frame).unwrap() {
            VisualNode::Container(c) => {
                assert_eq!(c.horizontal_sizing, SizingMode::Fill);
                assert_eq!(c.vertical_sizing, SizingMode::Fixed);
            }
            other => panic!("expected container, got {other:?}"),
        }
    }

    #[test]
    fn test_keys_collide_per_property() {
        assert_eq!(StyleEffect::fill(Rgb::WHITE).key(), "fill");
        let shadow = StyleEffect::DropShadow {
            shadow: Shadow::black(0.1, 0.0, 1.0, 2.0),
        };
        assert_eq!(StyleEffect::NoShadow.key(), shadow.key());
        assert_ne!(
            StyleEffect::padding(Side::Top, 1.0).key(),
            StyleEffect::padding(Side::Left, 1.0).key()
        );
    }
}
