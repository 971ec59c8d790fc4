//! Fallback rendering for anything without a dedicated processor.

use crate::context::{Component, Converter, TextStyle};
use crate::error::ProcessResult;
use quasar_style::extract::binding_target;
use visual_node::{LayoutMode, NodeId, Padding, Rgb};

/// Attributes that never show up in the attribute listing.
fn is_presentational(name: &str) -> bool {
    let bare = binding_target(name).unwrap_or(name);
    matches!(bare, "style" | "class") || name.starts_with("v-")
}

/// Attribute listing, one `key="value"` per line.
pub fn attribute_lines(component: &Component<'_>) -> Vec<String> {
    component
        .element
        .attributes
        .iter()
        .filter(|(name, _)| !is_presentational(name))
        .map(|(name, value)| format!("{name}=\"{value}\""))
        .collect()
}

/// A labelled card for framework tags, a plain frame otherwise. Children are
/// converted inside it.
pub fn build(cx: &mut Converter<'_>, c: &Component<'_>) -> ProcessResult<NodeId> {
    let name = match c.prop("class") {
        Some(class) => format!("{} ({class})", c.tag()),
        None => c.tag().to_string(),
    };
    let frame = cx.clear_frame(&name, LayoutMode::Vertical)?;

    if c.info.is_framework() {
        cx.radius(frame, 4.0)?;
        cx.stroke(frame, Rgb::grey(0.85), 1.0)?;
        cx.padding(frame, Padding::uniform(12.0))?;
        cx.spacing(frame, 8.0)?;

        let header = cx.text(&format!("Component {}", c.tag()), TextStyle::new(16.0).grey(0.4))?;
        cx.append(frame, header)?;

        let lines = attribute_lines(c);
        let listing = if lines.is_empty() {
            "No attributes".to_string()
        } else {
            lines.join("\n")
        };
        let attrs = cx.text(&listing, TextStyle::new(12.0).grey(0.6))?;
        cx.append(frame, attrs)?;
    }

    cx.append_children(frame, c.element)?;
    Ok(frame)
}
