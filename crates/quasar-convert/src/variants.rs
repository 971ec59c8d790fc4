//! Hover, active and disabled copies of interactive components.

use crate::context::Converter;
use quasar_style::ColorAnalysis;
use smol_str::SmolStr;
use visual_node::{BuildResult, Effect, NodeId, Paint, Rgb, VisualNodeBuilder};

/// Component kinds that get variant copies.
pub const VARIANT_KINDS: [&str; 6] = ["btn", "checkbox", "radio", "toggle", "input", "select"];

/// Kinds with pointer states. The rest only get a disabled copy.
const STATEFUL_KINDS: [&str; 4] = ["btn", "checkbox", "radio", "toggle"];

/// Name fragments of selection indicators.
const INDICATOR_PARTS: [&str; 4] = ["__inner", "__check", "__dot", "__thumb"];

/// Parts darkened on hover for non-button controls.
const HOVER_PARTS: [&str; 2] = ["__inner", "__track"];

pub const DISABLED_OPACITY: f32 = 0.6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Hover,
    Active,
    Disabled,
}

impl State {
    pub fn as_str(&self) -> &'static str {
        match self {
            State::Hover => "hover",
            State::Active => "active",
            State::Disabled => "disabled",
        }
    }

    /// States generated for a component kind.
    pub fn for_kind(kind: &str) -> &'static [State] {
        if STATEFUL_KINDS.contains(&kind) {
            &[State::Hover, State::Active, State::Disabled]
        } else if VARIANT_KINDS.contains(&kind) {
            &[State::Disabled]
        } else {
            &[]
        }
    }
}

/// Insert state copies after every interactive component below `root`.
/// Returns the number of copies added.
pub fn generate(cx: &mut Converter<'_>, root: NodeId) -> BuildResult<usize> {
    let mut targets: Vec<(NodeId, SmolStr, ColorAnalysis)> = Vec::new();
    for (node, entry) in cx.sources().iter() {
        if node != root
            && entry.info.is_framework()
            && !State::for_kind(&entry.info.kind).is_empty()
        {
            targets.push((node, entry.info.kind.clone(), entry.analysis.clone()));
        }
    }

    let mut added = 0;
    for (node, kind, analysis) in targets {
        if !cx.is_within(node, root)? {
            continue;
        }
        let Some(parent) = cx.builder().parent(node)? else {
            continue;
        };
        let name = cx.builder().name(node)?;
        let Some(index) = cx.builder().children(parent)?.iter().position(|c| *c == node) else {
            continue;
        };
        for (offset, state) in State::for_kind(&kind).iter().enumerate() {
            let copy = cx.builder_mut().clone_subtree(node)?;
            cx.set_name(copy, &format!("{name} / {}", state.as_str()))?;
            adjust(cx, copy, *state, &kind, &analysis)?;
            cx.builder_mut().insert_child(parent, index + 1 + offset, copy)?;
            added += 1;
        }
        tracing::trace!(%node, kind = %kind, "added state variants");
    }
    Ok(added)
}

fn adjust(
    cx: &mut Converter<'_>,
    node: NodeId,
    state: State,
    kind: &str,
    analysis: &ColorAnalysis,
) -> BuildResult<()> {
    match (state, kind) {
        (State::Disabled, _) => {
            cx.opacity(node, DISABLED_OPACITY)?;
            if matches!(kind, "checkbox" | "radio" | "toggle") {
                for part in named_descendants(cx.builder(), node, &INDICATOR_PARTS)? {
                    cx.fill(part, Rgb::grey(0.9))?;
                }
            }
        }
        (State::Hover, "btn") => tint_or_darken(cx, node, analysis, 0.1)?,
        (State::Active, "btn") => {
            tint_or_darken(cx, node, analysis, 0.2)?;
            let effects = cx
                .builder()
                .effects(node)?
                .into_iter()
                .map(|effect| match effect {
                    Effect::DropShadow(mut shadow) => {
                        shadow.offset_x = 0.0;
                        shadow.offset_y = 1.0;
                        shadow.radius = (shadow.radius / 2.0).max(1.0);
                        Effect::DropShadow(shadow)
                    }
                    other => other,
                })
                .collect();
            cx.builder_mut().set_effects(node, effects)?;
        }
        (State::Hover | State::Active, _) => {
            let amount = if state == State::Hover { 0.1 } else { 0.2 };
            for part in named_descendants(cx.builder(), node, &HOVER_PARTS)? {
                darken_fills(cx.builder_mut(), part, amount)?;
            }
        }
    }
    Ok(())
}

/// Flat and outline buttons get a faint wash of their colour; filled ones
/// get darker.
fn tint_or_darken(
    cx: &mut Converter<'_>,
    node: NodeId,
    analysis: &ColorAnalysis,
    amount: f32,
) -> BuildResult<()> {
    if analysis.color_variant.is_transparent() {
        let main = cx.main_or_primary(analysis);
        cx.fill_paint(node, Paint::solid_with_opacity(main, amount))
    } else {
        darken_fills(cx.builder_mut(), node, amount)
    }
}

fn darken_fills(builder: &mut dyn VisualNodeBuilder, node: NodeId, amount: f32) -> BuildResult<()> {
    let fills = builder
        .fills(node)?
        .iter()
        .map(|paint| paint.darkened(amount))
        .collect();
    builder.set_fills(node, fills)
}

/// Descendants of `node` whose name contains one of `parts`.
fn named_descendants(
    builder: &dyn VisualNodeBuilder,
    node: NodeId,
    parts: &[&str],
) -> BuildResult<Vec<NodeId>> {
    let mut found = Vec::new();
    let mut stack = builder.children(node)?;
    while let Some(current) = stack.pop() {
        let name = builder.name(current)?;
        if parts.iter().any(|part| name.contains(part)) {
            found.push(current);
        }
        stack.extend(builder.children(current)?);
    }
    Ok(found)
}
