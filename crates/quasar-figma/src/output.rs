//! Output formatting for converted trees.

use crate::cli::OutputFormat;
use miette::{IntoDiagnostic, Result};
use std::fmt::Write;
use visual_node::{Paint, VisualNode};

/// Formatter for a converted tree.
pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Render the whole tree in the configured format.
    pub fn render(&self, tree: &VisualNode) -> Result<String> {
        match self.format {
            OutputFormat::Human => Ok(outline(tree)),
            OutputFormat::Json => serde_json::to_string_pretty(tree).into_diagnostic(),
        }
    }
}

/// Indented outline, one node per line.
pub fn outline(tree: &VisualNode) -> String {
    let mut out = String::new();
    write_node(&mut out, tree, 0);
    out
}

fn write_node(out: &mut String, node: &VisualNode, depth: usize) {
    let indent = "  ".repeat(depth);
    // Writing to a String cannot fail.
    let _ = match node {
        VisualNode::Container(c) => {
            let fill = fill_label(&c.fills);
            writeln!(out, "{indent}Container {} [{}]{fill}", c.name, c.layout.as_str())
        }
        VisualNode::Text(t) => writeln!(out, "{indent}Text {:?}", t.characters),
        VisualNode::Shape(s) => writeln!(
            out,
            "{indent}Shape {} {}×{}",
            s.kind.as_str(),
            s.width,
            s.height
        ),
    };
    for child in node.children() {
        write_node(out, child, depth + 1);
    }
}

/// ` fill=#rrggbb` for a visible solid fill.
fn fill_label(fills: &[Paint]) -> String {
    match fills.first() {
        Some(paint) if !paint.is_transparent() => match paint.solid_color() {
            Some(color) => format!(" fill={}", color.to_hex()),
            None => " fill=gradient".to_string(),
        },
        _ => String::new(),
    }
}
