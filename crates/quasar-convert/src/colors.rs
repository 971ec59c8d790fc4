//! Colour pass for built components.
//!
//! Processors that colour their own output mark the node with
//! [`COLORS_APPLIED`](crate::context::COLORS_APPLIED); everything else gets
//! coloured here after dispatch.

use crate::context::Converter;
use quasar_style::{contrast_color, lighten, ColorAnalysis, ColorVariant};
use visual_node::{BuildResult, NodeId, Paint, Rgb, Shadow};

/// Shadow under standard buttons and cards.
pub fn default_shadow() -> Shadow {
    Shadow::black(0.2, 0.0, 2.0, 4.0)
}

/// Shadow under `push` buttons.
pub fn push_shadow() -> Shadow {
    Shadow::black(0.3, 0.0, 3.0, 5.0).with_spread(1.0)
}

/// Colour `node` from `analysis` according to the component kind, then mark it.
pub fn apply_quasar_colors(
    cx: &mut Converter<'_>,
    node: NodeId,
    analysis: &ColorAnalysis,
    kind: &str,
) -> BuildResult<()> {
    tracing::trace!(%node, kind, variant = analysis.color_variant.as_str(), "applying colours");
    match kind {
        "btn" => {
            button_colors(cx, node, analysis)?;
        }
        "card" => card_colors(cx, node, analysis)?,
        _ => generic_colors(cx, node, analysis)?,
    }
    cx.mark_colors_applied(node)
}

/// Fill, stroke and shadow of a button frame by colour variant. Recolours
/// every text below the frame and returns the text colour used.
pub fn button_colors(
    cx: &mut Converter<'_>,
    node: NodeId,
    analysis: &ColorAnalysis,
) -> BuildResult<Rgb> {
    let main = cx.main_or_primary(analysis);
    let explicit_text = cx.text_color(analysis);
    let text = match analysis.color_variant {
        ColorVariant::Flat => {
            cx.clear_fill(node)?;
            cx.builder_mut().set_effects(node, Vec::new())?;
            explicit_text.unwrap_or(main)
        }
        ColorVariant::Outline => {
            cx.clear_fill(node)?;
            cx.stroke(node, main, 1.0)?;
            cx.builder_mut().set_effects(node, Vec::new())?;
            explicit_text.unwrap_or(main)
        }
        ColorVariant::Push => {
            cx.fill(node, main)?;
            cx.shadow(node, push_shadow())?;
            explicit_text.unwrap_or_else(|| contrast_color(main))
        }
        ColorVariant::Glossy => {
            cx.fill_paint(node, Paint::linear(lighten(main, 0.2), main))?;
            explicit_text.unwrap_or_else(|| contrast_color(main))
        }
        ColorVariant::Unelevated => {
            cx.fill(node, main)?;
            cx.builder_mut().set_effects(node, Vec::new())?;
            explicit_text.unwrap_or_else(|| contrast_color(main))
        }
        ColorVariant::Standard => {
            cx.fill(node, main)?;
            cx.shadow(node, default_shadow())?;
            explicit_text.unwrap_or_else(|| contrast_color(main))
        }
    };
    cx.recolor_texts(node, text)?;
    Ok(text)
}

/// Cards take the main colour as background with contrasting text.
fn card_colors(cx: &mut Converter<'_>, node: NodeId, analysis: &ColorAnalysis) -> BuildResult<()> {
    let Some(main) = cx.main_color(analysis).or_else(|| cx.bg_color(analysis)) else {
        if let Some(text) = cx.text_color(analysis) {
            cx.recolor_texts(node, text)?;
        }
        return Ok(());
    };
    cx.fill(node, main)?;
    let text = cx
        .text_color(analysis)
        .unwrap_or_else(|| contrast_color(main));
    cx.recolor_texts(node, text)
}

/// Background class, else the main colour for filled variants. Outline adds a
/// stroke. An explicit text colour recolours the texts.
fn generic_colors(cx: &mut Converter<'_>, node: NodeId, analysis: &ColorAnalysis) -> BuildResult<()> {
    let main = cx.main_color(analysis);
    let background = cx.bg_color(analysis).or_else(|| {
        main.filter(|_| !analysis.color_variant.is_transparent())
    });
    if let Some(bg) = background {
        cx.fill(node, bg)?;
    }
    if analysis.color_variant == ColorVariant::Outline {
        if let Some(main) = main {
            cx.stroke(node, main, 1.0)?;
        }
    }
    if let Some(text) = cx.text_color(analysis) {
        cx.recolor_texts(node, text)?;
    }
    Ok(())
}
