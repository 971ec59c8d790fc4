//! Named colours and their tonal ramps.
//!
//! Every base colour gets a 14-step ramp: tones 1 to 5 are lighter, tone 6 is
//! the base itself, tones 7 to 14 are progressively darker. `grey` uses a
//! hand-tuned neutral ramp instead.

use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;
use smol_str::SmolStr;
use std::fmt;
use std::str::FromStr;
use visual_node::Rgb;

/// Number of tones in every ramp.
pub const TONES: u8 = 14;

/// Tone that equals the base colour.
pub const BASE_TONE: u8 = 6;

/// Colour used when a name resolves to nothing.
pub const FALLBACK_PRIMARY: Rgb = Rgb::new(0.1, 0.5, 0.9);

const QUASAR_BRAND: &[(&str, Rgb)] = &[
    ("primary", Rgb::new(0.1, 0.5, 0.9)),
    ("secondary", Rgb::new(0.15, 0.65, 0.6)),
    ("accent", Rgb::new(0.61, 0.15, 0.69)),
    ("positive", Rgb::new(0.13, 0.73, 0.27)),
    ("negative", Rgb::new(0.76, 0.0, 0.08)),
    ("info", Rgb::new(0.19, 0.8, 0.93)),
    ("warning", Rgb::new(0.95, 0.75, 0.22)),
    ("dark", Rgb::new(0.19, 0.19, 0.19)),
    ("light", Rgb::new(0.95, 0.95, 0.95)),
];

const MATERIAL_BRAND: &[(&str, Rgb)] = &[
    ("primary", Rgb::new(0.247, 0.318, 0.71)),
    ("secondary", Rgb::new(0.0, 0.588, 0.533)),
    ("accent", Rgb::new(0.914, 0.118, 0.388)),
    ("positive", Rgb::new(0.298, 0.686, 0.314)),
    ("negative", Rgb::new(0.957, 0.263, 0.212)),
    ("info", Rgb::new(0.012, 0.663, 0.957)),
    ("warning", Rgb::new(1.0, 0.757, 0.027)),
    ("dark", Rgb::new(0.13, 0.13, 0.13)),
    ("light", Rgb::new(0.96, 0.96, 0.96)),
];

const MATERIAL_HUES: &[(&str, Rgb)] = &[
    ("red", Rgb::new(0.957, 0.263, 0.212)),
    ("pink", Rgb::new(0.914, 0.118, 0.388)),
    ("purple", Rgb::new(0.612, 0.153, 0.69)),
    ("deep-purple", Rgb::new(0.404, 0.227, 0.718)),
    ("indigo", Rgb::new(0.247, 0.318, 0.71)),
    ("blue", Rgb::new(0.129, 0.588, 0.953)),
    ("light-blue", Rgb::new(0.012, 0.663, 0.957)),
    ("cyan", Rgb::new(0.0, 0.737, 0.831)),
    ("teal", Rgb::new(0.0, 0.588, 0.533)),
    ("green", Rgb::new(0.298, 0.686, 0.314)),
    ("light-green", Rgb::new(0.545, 0.765, 0.29)),
    ("lime", Rgb::new(0.804, 0.863, 0.224)),
    ("yellow", Rgb::new(1.0, 0.922, 0.231)),
    ("amber", Rgb::new(1.0, 0.757, 0.027)),
    ("orange", Rgb::new(1.0, 0.596, 0.0)),
    ("deep-orange", Rgb::new(1.0, 0.341, 0.133)),
    ("brown", Rgb::new(0.475, 0.333, 0.282)),
    ("blue-grey", Rgb::new(0.376, 0.49, 0.545)),
    ("black", Rgb::BLACK),
    ("white", Rgb::WHITE),
];

const GREY_RAMP: [f32; TONES as usize] = [
    0.98, 0.95, 0.9, 0.82, 0.74, 0.62, 0.54, 0.46, 0.38, 0.26, 0.22, 0.18, 0.14, 0.1,
];

static QUASAR: Lazy<Palette> = Lazy::new(|| Palette::from_bases(QUASAR_BRAND));
static MATERIAL: Lazy<Palette> = Lazy::new(|| Palette::from_bases(MATERIAL_BRAND));

/// Which palette backs colour-name lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum ColorTheme {
    #[default]
    QuasarDefault,
    Material,
    /// The default table, overlaid with user supplied colours.
    Custom,
}

impl ColorTheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColorTheme::QuasarDefault => "quasar-default",
            ColorTheme::Material => "material",
            ColorTheme::Custom => "custom",
        }
    }
}

impl fmt::Display for ColorTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColorTheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "quasar-default" | "quasar" | "default" => Ok(ColorTheme::QuasarDefault),
            "material" => Ok(ColorTheme::Material),
            "custom" => Ok(ColorTheme::Custom),
            other => Err(format!("unknown color theme: {other}")),
        }
    }
}

/// A lookup table from colour names to RGB.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    colors: FxHashMap<SmolStr, Rgb>,
    bases: Vec<SmolStr>,
}

impl Palette {
    /// The stock Quasar palette.
    pub fn quasar() -> &'static Palette {
        &QUASAR
    }

    /// Material Design brand colours over the same hue table.
    pub fn material() -> &'static Palette {
        &MATERIAL
    }

    pub fn for_theme(theme: ColorTheme) -> &'static Palette {
        match theme {
            ColorTheme::QuasarDefault | ColorTheme::Custom => Self::quasar(),
            ColorTheme::Material => Self::material(),
        }
    }

    fn from_bases(brand: &[(&str, Rgb)]) -> Self {
        let mut palette = Palette {
            colors: FxHashMap::default(),
            bases: Vec::new(),
        };
        for &(name, color) in brand.iter().chain(MATERIAL_HUES) {
            palette.insert_base(name, color);
        }
        palette.insert_grey();
        palette
    }

    fn insert_base(&mut self, name: &str, color: Rgb) {
        let name = SmolStr::new(name.to_ascii_lowercase());
        if !self.colors.contains_key(&name) {
            self.bases.push(name.clone());
        }
        for t in 1..=TONES {
            self.colors
                .insert(SmolStr::new(format!("{name}-{t}")), tone(color, t));
        }
        self.colors.insert(name, color);
    }

    fn insert_grey(&mut self) {
        let base = GREY_RAMP[(BASE_TONE - 1) as usize];
        self.bases.push(SmolStr::new_static("grey"));
        self.colors.insert(SmolStr::new_static("grey"), Rgb::grey(base));
        for (i, level) in GREY_RAMP.iter().enumerate() {
            self.colors
                .insert(SmolStr::new(format!("grey-{}", i + 1)), Rgb::grey(*level));
        }
    }

    /// A copy with extra or replacement base colours. Each gets a full ramp.
    pub fn with_overrides<'a>(&self, overrides: impl IntoIterator<Item = (&'a str, Rgb)>) -> Palette {
        let mut palette = self.clone();
        for (name, color) in overrides {
            palette.insert_base(name, color);
        }
        palette
    }

    /// Exact lookup.
    pub fn get(&self, name: &str) -> Option<Rgb> {
        self.colors.get(name).copied()
    }

    /// Exact lookup, then `<base>-<tone>` retried as `<base>`.
    pub fn resolve(&self, name: &str) -> Option<Rgb> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        let lowered;
        let name = if name.bytes().any(|b| b.is_ascii_uppercase()) {
            lowered = name.to_ascii_lowercase();
            lowered.as_str()
        } else {
            name
        };
        self.get(name)
            .or_else(|| split_tone(name).and_then(|(base, _)| self.get(base)))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.resolve(name).is_some()
    }

    /// Base colour names in definition order.
    pub fn bases(&self) -> impl Iterator<Item = &str> {
        self.bases.iter().map(SmolStr::as_str)
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

/// Split `red-5` into `("red", 5)`. Names without a numeric suffix give `None`.
pub fn split_tone(name: &str) -> Option<(&str, u8)> {
    let (base, tone) = name.rsplit_once('-')?;
    if base.is_empty() || tone.is_empty() || !tone.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some((base, tone.parse().ok()?))
}

/// Tone `t` of the ramp generated from `base`.
pub fn tone(base: Rgb, t: u8) -> Rgb {
    let t = f32::from(t.clamp(1, TONES));
    let channel = |c: f32| -> f32 {
        if t <= 5.0 {
            c * (1.0 - 0.1 * (5.0 - t)) + (0.9 - 0.1 * t)
        } else if t == 6.0 {
            c
        } else if t == 7.0 {
            c * 0.9
        } else {
            c * (0.8 - 0.1 * (t - 8.0))
        }
    };
    Rgb::new(channel(base.r), channel(base.g), channel(base.b)).clamped()
}

/// Resolve against the stock Quasar palette.
pub fn resolve_color(name: &str) -> Option<Rgb> {
    Palette::quasar().resolve(name)
}

/// Black or white, whichever reads better on `background`.
pub fn contrast_color(background: Rgb) -> Rgb {
    if background.luminance() > 0.5 {
        Rgb::BLACK
    } else {
        Rgb::WHITE
    }
}

/// Move every channel `amount` of the way towards white.
pub fn lighten(color: Rgb, amount: f32) -> Rgb {
    Rgb::new(
        color.r + (1.0 - color.r) * amount,
        color.g + (1.0 - color.g) * amount,
        color.b + (1.0 - color.b) * amount,
    )
    .clamped()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_tone_six_is_base_for_every_base() {
        for palette in [Palette::quasar(), Palette::material()] {
            for base in palette.bases() {
                assert_eq!(
                    palette.resolve(&format!("{base}-6")),
                    palette.resolve(base),
                    "{base}"
                );
            }
        }
        assert_eq!(resolve_color("negative-6"), resolve_color("negative"));
    }

    #[test]
    fn test_ramp_gets_darker() {
        let base = resolve_color("primary").unwrap();
        let lum = |t: u8| tone(base, t).luminance();
        for t in 1..TONES {
            assert!(lum(t) >= lum(t + 1), "tone {t} is darker than {}", t + 1);
        }
        for t in 1..=TONES {
            let c = tone(base, t);
            assert!((0.0..=1.0).contains(&c.r) && (0.0..=1.0).contains(&c.b));
        }
    }

    #[test]
    fn test_resolve_falls_back_to_base() {
        let palette = Palette::quasar();
        assert_eq!(palette.resolve("primary-99"), palette.resolve("primary"));
        assert_eq!(palette.resolve("deep-purple-3"), Some(tone(Rgb::new(0.404, 0.227, 0.718), 3)));
        assert_eq!(palette.resolve("Primary"), palette.resolve("primary"));
        assert_eq!(palette.resolve("chartreuse"), None);
        assert_eq!(palette.resolve("chartreuse-4"), None);
        assert_eq!(palette.resolve(""), None);
    }

    #[test]
    fn test_grey_uses_neutral_ramp() {
        assert_eq!(resolve_color("grey-3"), Some(Rgb::grey(0.9)));
        assert_eq!(resolve_color("grey"), resolve_color("grey-6"));
    }

    #[test]
    fn test_contrast_endpoints() {
        assert_eq!(contrast_color(Rgb::WHITE), Rgb::BLACK);
        assert_eq!(contrast_color(Rgb::BLACK), Rgb::WHITE);
        for name in ["primary", "warning", "light", "dark", "yellow", "grey-2"] {
            let c = contrast_color(resolve_color(name).unwrap());
            assert!(c == Rgb::BLACK || c == Rgb::WHITE, "{name}");
        }
    }

    #[test]
    fn test_themes_differ_on_brand_only() {
        let q = Palette::for_theme(ColorTheme::QuasarDefault);
        let m = Palette::for_theme(ColorTheme::Material);
        assert_ne!(q.resolve("primary"), m.resolve("primary"));
        assert_eq!(q.resolve("teal-4"), m.resolve("teal-4"));
        assert_eq!(Palette::for_theme(ColorTheme::Custom), q);
    }

    #[test]
    fn test_overrides_get_ramps() {
        let brand = Rgb::new(0.2, 0.4, 0.6);
        let palette = Palette::quasar().with_overrides([("brand", brand), ("primary", Rgb::BLACK)]);
        assert_eq!(palette.resolve("brand"), Some(brand));
        assert_eq!(palette.resolve("brand-6"), Some(brand));
        assert_eq!(palette.resolve("primary"), Some(Rgb::BLACK));
        assert!(palette.bases().any(|b| b == "brand"));
    }

    #[test]
    fn test_split_tone() {
        assert_eq!(split_tone("light-blue-10"), Some(("light-blue", 10)));
        assert_eq!(split_tone("light-blue"), None);
        assert_eq!(split_tone("-3"), None);
    }

    #[test]
    fn test_theme_from_str() {
        assert_eq!("material".parse::<ColorTheme>(), Ok(ColorTheme::Material));
        assert!("neon".parse::<ColorTheme>().is_err());
    }
}
