//! Scroll containers, drawn at their initial scroll position.

use super::is_empty;
use crate::context::{Component, Converter, TextStyle};
use crate::error::ProcessResult;
use visual_node::{CounterAlign, LayoutMode, NodeId, Padding, Rgb};

const PLACEHOLDER_BLOCKS: usize = 10;
const DEFAULT_ITEM_COUNT: usize = 5;
const MAX_ITEM_COUNT: f32 = 100.0;

pub fn scroll_area(cx: &mut Converter<'_>, c: &Component<'_>) -> ProcessResult<NodeId> {
    let frame = cx.filled_frame("q-scroll-area", LayoutMode::Horizontal, Rgb::grey(0.98))?;
    cx.size(frame, 300.0, 400.0)?;
    cx.stroke(frame, Rgb::grey(0.9), 1.0)?;

    let content = cx.clear_frame("q-scroll-area__content", LayoutMode::Vertical)?;
    cx.width(content, 280.0)?;
    cx.padding(content, Padding::uniform(10.0))?;
    cx.spacing(content, 16.0)?;
    if is_empty(c.element) {
        for n in 1..=PLACEHOLDER_BLOCKS {
            let block = cx.rect(&format!("placeholder-{n}"), 260.0, 100.0, Rgb::grey(0.9))?;
            cx.radius(block, 4.0)?;
            cx.append(content, block)?;
        }
    } else {
        cx.append_children(content, c.element)?;
    }
    cx.append(frame, content)?;

    let thumb = cx.rect("q-scroll-area__thumb", 8.0, 100.0, Rgb::grey(0.6))?;
    cx.radius(thumb, 4.0)?;
    cx.append(frame, thumb)?;
    Ok(frame)
}

pub fn infinite_scroll(cx: &mut Converter<'_>, c: &Component<'_>) -> ProcessResult<NodeId> {
    let frame = cx.clear_frame("q-infinite-scroll", LayoutMode::Vertical)?;
    cx.width(frame, 400.0)?;
    cx.spacing(frame, 8.0)?;

    if is_empty(c.element) {
        let count = c
            .number("item-count")?
            .map_or(DEFAULT_ITEM_COUNT, |n| n.clamp(0.0, MAX_ITEM_COUNT) as usize);
        for n in 1..=count {
            let row = cx.clear_frame(&format!("q-infinite-scroll__item-{n}"), LayoutMode::Horizontal)?;
            cx.spacing(row, 8.0)?;
            cx.align_items(row, CounterAlign::Center)?;
            let marker = cx.rect("q-infinite-scroll__marker", 20.0, 20.0, Rgb::grey(0.8))?;
            cx.radius(marker, 4.0)?;
            cx.append(row, marker)?;
            let label = cx.text(&format!("Item {n}"), TextStyle::default())?;
            cx.append(row, label)?;
            cx.append(frame, row)?;
        }
    } else {
        cx.append_children(frame, c.element)?;
    }

    let loading = cx.text("Loading more...", TextStyle::new(12.0).grey(0.6))?;
    cx.append(frame, loading)?;
    Ok(frame)
}

#[cfg(test)]
mod tests {
    use crate::processors::testing::{build, child_names, texts};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_scroll_area() {
        let node = build("<q-scroll-area />");
        assert_eq!(
            child_names(&node),
            vec!["q-scroll-area__content", "q-scroll-area__thumb"]
        );
        let content = &node.children()[0];
        assert_eq!(content.children().len(), 10);
        assert_eq!(content.children()[9].name(), "placeholder-10");
    }

    #[test]
    fn test_scroll_area_children() {
        let node = build("<q-scroll-area><p>One</p><p>Two</p></q-scroll-area>");
        assert_eq!(texts(&node), vec!["One", "Two"]);
    }

    #[test]
    fn test_infinite_scroll_item_count() {
        let node = build(r#"<q-infinite-scroll item-count="2" />"#);
        assert_eq!(
            child_names(&node),
            vec![
                "q-infinite-scroll__item-1",
                "q-infinite-scroll__item-2",
                "Loading more..."
            ]
        );
        assert_eq!(texts(&build("<q-infinite-scroll />")).len(), 6);
    }
}
