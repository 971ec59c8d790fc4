//! Rating and skeleton placeholders.

use crate::context::{Component, Converter, TextStyle};
use crate::error::{ProcessResult, ProcessorError};
use quasar_style::css::parse_pixels;
use visual_node::{CounterAlign, LayoutMode, NodeId, Rgb, ShapeKind};

const DEFAULT_MAX: f32 = 5.0;
const MAX_STARS: f32 = 20.0;

pub fn rating(cx: &mut Converter<'_>, c: &Component<'_>) -> ProcessResult<NodeId> {
    let max = c
        .number("max")?
        .unwrap_or(DEFAULT_MAX)
        .round()
        .clamp(1.0, MAX_STARS) as usize;
    let value = match c.number("model-value")? {
        Some(value) => value,
        None => c.number("value")?.unwrap_or(0.0),
    };

    let frame = cx.clear_frame("q-rating", LayoutMode::Horizontal)?;
    cx.spacing(frame, 8.0)?;
    cx.align_items(frame, CounterAlign::Center)?;
    let on = cx.main_or_primary(&c.analysis);
    let off = Rgb::grey(0.8);
    for index in 1..=max {
        let star = cx.clear_frame(&format!("q-rating__icon-{index}"), LayoutMode::Horizontal)?;
        cx.size(star, 24.0, 24.0)?;
        cx.center(star)?;
        let color = if index as f32 <= value { on } else { off };
        let glyph = cx.text("★", TextStyle::new(20.0).color(color))?;
        cx.append(star, glyph)?;
        cx.append(frame, star)?;
    }
    cx.mark_colors_applied(frame)?;
    Ok(frame)
}

/// Pixel size prop. Bound expressions read as absent.
fn pixels(c: &Component<'_>, name: &str) -> ProcessResult<Option<f32>> {
    let Some(raw) = c.prop(name) else {
        return Ok(None);
    };
    match parse_pixels(raw) {
        Some(value) => Ok(Some(value)),
        None if c.is_bound(name) => Ok(None),
        None => Err(ProcessorError::invalid_value(name, raw)),
    }
}

pub fn skeleton(cx: &mut Converter<'_>, c: &Component<'_>) -> ProcessResult<NodeId> {
    let width = pixels(c, "width")?.unwrap_or(300.0);
    let height = pixels(c, "height")?.unwrap_or(40.0);
    let color = Rgb::grey(0.9);

    let node = match c.prop("type").unwrap_or("rect") {
        "text" => {
            let node = cx.shape(ShapeKind::Rectangle, width, 20.0, color)?;
            cx.radius(node, 4.0)?;
            node
        }
        "circle" => cx.shape(ShapeKind::Ellipse, height, height, color)?,
        "QAvatar" => cx.shape(ShapeKind::Ellipse, 48.0, 48.0, color)?,
        "QBtn" => {
            let node = cx.shape(ShapeKind::Rectangle, 90.0, 36.0, color)?;
            cx.radius(node, 4.0)?;
            node
        }
        _ => cx.shape(ShapeKind::Rectangle, width, height, color)?,
    };
    cx.set_name(node, "q-skeleton")?;
    cx.mark_colors_applied(node)?;
    Ok(node)
}

#[cfg(test)]
mod tests {
    use crate::processors::testing::{build, child_names};
    use pretty_assertions::assert_eq;
    use quasar_style::resolve_color;
    use visual_node::{Rgb, ShapeKind};

    #[test]
    fn test_rating_fills_up_to_value() {
        let node = build(r#"<q-rating model-value="3" max="4" color="amber" />"#);
        assert_eq!(
            child_names(&node),
            vec![
                "q-rating__icon-1",
                "q-rating__icon-2",
                "q-rating__icon-3",
                "q-rating__icon-4"
            ]
        );
        let colors: Vec<_> = node.texts().iter().map(|t| t.color()).collect();
        let amber = resolve_color("amber");
        assert_eq!(colors, vec![amber, amber, amber, Some(Rgb::grey(0.8))]);
    }

    #[test]
    fn test_rating_bad_max_falls_back() {
        let node = build(r#"<q-rating max="lots" />"#);
        assert_eq!(node.texts()[0].characters, "Component q-rating");
    }

    #[test]
    fn test_skeleton_types() {
        let text = build(r#"<q-skeleton type="text" width="120px" />"#);
        let shape = text.as_shape().unwrap();
        assert_eq!((shape.width, shape.height), (120.0, 20.0));
        assert_eq!(shape.corner_radius, 4.0);

        let circle = build(r#"<q-skeleton type="circle" height="64" />"#);
        let shape = circle.as_shape().unwrap();
        assert_eq!(shape.kind, ShapeKind::Ellipse);
        assert_eq!((shape.width, shape.height), (64.0, 64.0));

        let button = build(r#"<q-skeleton type="QBtn" />"#);
        assert_eq!(button.name(), "q-skeleton");
        let shape = button.as_shape().unwrap();
        assert_eq!((shape.width, shape.height), (90.0, 36.0));
    }
}
