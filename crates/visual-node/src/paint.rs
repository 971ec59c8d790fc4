//! Colours, paints, strokes and effects.

use std::fmt;

/// An RGB colour with channels in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0.0, 0.0, 0.0);
    pub const WHITE: Rgb = Rgb::new(1.0, 1.0, 1.0);

    #[inline]
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// A neutral grey with every channel set to `level`.
    #[inline]
    pub const fn grey(level: f32) -> Self {
        Self::new(level, level, level)
    }

    /// Perceived brightness, `0.299 R + 0.587 G + 0.114 B`.
    pub fn luminance(&self) -> f32 {
        0.299 * self.r + 0.587 * self.g + 0.114 * self.b
    }

    /// Subtract `amount` from every channel, clamping at 0.
    pub fn darken(self, amount: f32) -> Rgb {
        Rgb::new(
            (self.r - amount).max(0.0),
            (self.g - amount).max(0.0),
            (self.b - amount).max(0.0),
        )
    }

    pub fn clamped(self) -> Rgb {
        Rgb::new(
            self.r.clamp(0.0, 1.0),
            self.g.clamp(0.0, 1.0),
            self.b.clamp(0.0, 1.0),
        )
    }

    pub fn with_alpha(self, a: f32) -> Rgba {
        Rgba {
            r: self.r,
            g: self.g,
            b: self.b,
            a,
        }
    }

    /// Approximate equality, for colours that went through arithmetic.
    pub fn approx_eq(&self, other: &Rgb) -> bool {
        const EPS: f32 = 1e-4;
        (self.r - other.r).abs() < EPS
            && (self.g - other.g).abs() < EPS
            && (self.b - other.b).abs() < EPS
    }

    /// `#rrggbb` form.
    pub fn to_hex(&self) -> String {
        let byte = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("#{:02x}{:02x}{:02x}", byte(self.r), byte(self.g), byte(self.b))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// An RGB colour with alpha, used by shadows and gradient stops.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub fn rgb(&self) -> Rgb {
        Rgb::new(self.r, self.g, self.b)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GradientStop {
    pub position: f32,
    pub color: Rgba,
}

/// A fill or stroke paint.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "camelCase"))]
pub enum Paint {
    Solid { color: Rgb, opacity: f32 },
    LinearGradient { stops: Vec<GradientStop> },
}

impl Paint {
    pub fn solid(color: Rgb) -> Self {
        Paint::Solid {
            color,
            opacity: 1.0,
        }
    }

    pub fn solid_with_opacity(color: Rgb, opacity: f32) -> Self {
        Paint::Solid { color, opacity }
    }

    /// A fully transparent fill, the default for structural frames.
    pub fn transparent() -> Self {
        Paint::Solid {
            color: Rgb::WHITE,
            opacity: 0.0,
        }
    }

    /// Two-stop vertical gradient from `from` to `to`.
    pub fn linear(from: Rgb, to: Rgb) -> Self {
        Paint::LinearGradient {
            stops: vec![
                GradientStop {
                    position: 0.0,
                    color: from.with_alpha(1.0),
                },
                GradientStop {
                    position: 1.0,
                    color: to.with_alpha(1.0),
                },
            ],
        }
    }

    pub fn solid_color(&self) -> Option<Rgb> {
        match self {
            Paint::Solid { color, .. } => Some(*color),
            Paint::LinearGradient { .. } => None,
        }
    }

    pub fn opacity(&self) -> f32 {
        match self {
            Paint::Solid { opacity, .. } => *opacity,
            Paint::LinearGradient { .. } => 1.0,
        }
    }

    pub fn is_transparent(&self) -> bool {
        matches!(self, Paint::Solid { opacity, .. } if *opacity <= 0.0)
    }

    /// The same paint with every colour darkened by `amount`.
    pub fn darkened(&self, amount: f32) -> Paint {
        match self {
            Paint::Solid { color, opacity } => Paint::Solid {
                color: color.darken(amount),
                opacity: *opacity,
            },
            Paint::LinearGradient { stops } => Paint::LinearGradient {
                stops: stops
                    .iter()
                    .map(|stop| GradientStop {
                        position: stop.position,
                        color: stop.color.rgb().darken(amount).with_alpha(stop.color.a),
                    })
                    .collect(),
            },
        }
    }
}

/// Per-side stroke weights. A plain border has all four sides equal.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StrokeWeights {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl StrokeWeights {
    pub const fn uniform(weight: f32) -> Self {
        Self {
            top: weight,
            right: weight,
            bottom: weight,
            left: weight,
        }
    }

    /// Only the bottom edge, as used by underlined fields and active tabs.
    pub const fn bottom(weight: f32) -> Self {
        Self {
            top: 0.0,
            right: 0.0,
            bottom: weight,
            left: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Shadow {
    pub color: Rgba,
    pub offset_x: f32,
    pub offset_y: f32,
    pub radius: f32,
    pub spread: f32,
}

impl Shadow {
    /// Black shadow with the given alpha.
    pub fn black(alpha: f32, offset_x: f32, offset_y: f32, radius: f32) -> Self {
        Self {
            color: Rgb::BLACK.with_alpha(alpha),
            offset_x,
            offset_y,
            radius,
            spread: 0.0,
        }
    }

    pub fn with_spread(mut self, spread: f32) -> Self {
        self.spread = spread;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "camelCase"))]
pub enum Effect {
    DropShadow(Shadow),
    InnerShadow(Shadow),
}

impl Effect {
    pub fn drop_shadow(alpha: f32, offset_x: f32, offset_y: f32, radius: f32) -> Self {
        Effect::DropShadow(Shadow::black(alpha, offset_x, offset_y, radius))
    }

    pub fn shadow(&self) -> &Shadow {
        match self {
            Effect::DropShadow(s) | Effect::InnerShadow(s) => s,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_darken_clamps() {
        let c = Rgb::new(0.05, 0.5, 1.0).darken(0.1);
        assert!(c.approx_eq(&Rgb::new(0.0, 0.4, 0.9)));
    }

    #[test]
    fn test_hex() {
        assert_eq!(Rgb::WHITE.to_hex(), "#ffffff");
        assert_eq!(Rgb::new(0.1, 0.5, 0.9).to_string(), "#1a80e6");
    }

    #[test]
    fn test_transparent_paint() {
        assert!(Paint::transparent().is_transparent());
        assert!(!Paint::solid(Rgb::BLACK).is_transparent());
        assert_eq!(Paint::linear(Rgb::WHITE, Rgb::BLACK).solid_color(), None);
    }
}
