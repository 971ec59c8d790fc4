//! Icon names to Material Icons glyphs.

use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;
use std::fmt;

pub const ICON_FONT_FAMILY: &str = "Material Icons";
pub const ICON_FONT_STYLE: &str = "Regular";

/// Glyph used for names the table does not know.
pub const FALLBACK_GLYPH: char = '\u{e5cc}';

pub const DEFAULT_ICON_SIZE: f32 = 24.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconLibrary {
    Material,
    FontAwesome,
    Ionicons,
    Eva,
    Themify,
    LineAwesome,
    Mdi,
}

impl IconLibrary {
    const PREFIXES: [(&'static str, IconLibrary); 9] = [
        ("fa-", IconLibrary::FontAwesome),
        ("fas ", IconLibrary::FontAwesome),
        ("far ", IconLibrary::FontAwesome),
        ("fab ", IconLibrary::FontAwesome),
        ("ion-", IconLibrary::Ionicons),
        ("eva-", IconLibrary::Eva),
        ("ti-", IconLibrary::Themify),
        ("la-", IconLibrary::LineAwesome),
        ("mdi-", IconLibrary::Mdi),
    ];

    /// Detect the library from the name's prefix. Unprefixed names are Material.
    pub fn detect(name: &str) -> Self {
        Self::PREFIXES
            .iter()
            .find(|(prefix, _)| name.starts_with(prefix))
            .map(|(_, library)| *library)
            .unwrap_or(IconLibrary::Material)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            IconLibrary::Material => "material",
            IconLibrary::FontAwesome => "fontawesome",
            IconLibrary::Ionicons => "ionicons",
            IconLibrary::Eva => "eva",
            IconLibrary::Themify => "themify",
            IconLibrary::LineAwesome => "lineawesome",
            IconLibrary::Mdi => "mdi",
        }
    }
}

impl fmt::Display for IconLibrary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Strip the library prefix and use Material's underscore spelling.
pub fn normalize_icon_name(name: &str) -> String {
    let name = name.trim();
    let bare = IconLibrary::PREFIXES
        .iter()
        .find_map(|(prefix, _)| name.strip_prefix(prefix))
        .unwrap_or(name);
    bare.trim().replace('-', "_")
}

static MATERIAL: Lazy<FxHashMap<&'static str, char>> = Lazy::new(|| {
    [
        ("send", '\u{e163}'),
        ("phone", '\u{e0cd}'),
        ("menu", '\u{e5d2}'),
        ("close", '\u{e5cd}'),
        ("add", '\u{e145}'),
        ("remove", '\u{e15b}'),
        ("search", '\u{e8b6}'),
        ("settings", '\u{e8b8}'),
        ("delete", '\u{e872}'),
        ("edit", '\u{e3c9}'),
        ("help", '\u{e887}'),
        ("info", '\u{e88e}'),
        ("info_outline", '\u{e88f}'),
        ("warning", '\u{e002}'),
        ("error", '\u{e000}'),
        ("error_outline", '\u{e001}'),
        ("arrow_back", '\u{e5c4}'),
        ("arrow_forward", '\u{e5c8}'),
        ("arrow_upward", '\u{e5d8}'),
        ("arrow_downward", '\u{e5db}'),
        ("check", '\u{e5ca}'),
        ("home", '\u{e88a}'),
        ("chevron_left", '\u{e5cb}'),
        ("chevron_right", '\u{e5cc}'),
        ("expand_less", '\u{e5ce}'),
        ("expand_more", '\u{e5cf}'),
        ("first_page", '\u{e5dc}'),
        ("last_page", '\u{e5dd}'),
        ("unfold_less", '\u{e5d6}'),
        ("unfold_more", '\u{e5d7}'),
        ("clear", '\u{e14c}'),
        ("done", '\u{e876}'),
        ("favorite", '\u{e87d}'),
        ("favorite_border", '\u{e87e}'),
        ("star", '\u{e838}'),
        ("star_border", '\u{e83a}'),
        ("star_half", '\u{e839}'),
        ("visibility", '\u{e8f4}'),
        ("visibility_off", '\u{e8f5}'),
        ("add_circle", '\u{e147}'),
        ("add_circle_outline", '\u{e148}'),
        ("block", '\u{e14b}'),
        ("content_copy", '\u{e14d}'),
        ("content_cut", '\u{e14e}'),
        ("content_paste", '\u{e14f}'),
        ("create", '\u{e150}'),
        ("drafts", '\u{e151}'),
        ("file_download", '\u{e2c4}'),
        ("file_upload", '\u{e2c6}'),
        ("filter_list", '\u{e152}'),
        ("flag", '\u{e153}'),
        ("forward", '\u{e154}'),
        ("inbox", '\u{e156}'),
        ("link", '\u{e157}'),
        ("redo", '\u{e15a}'),
        ("remove_circle", '\u{e15c}'),
        ("remove_circle_outline", '\u{e15d}'),
        ("reply", '\u{e15e}'),
        ("reply_all", '\u{e15f}'),
        ("report", '\u{e160}'),
        ("save", '\u{e161}'),
        ("select_all", '\u{e162}'),
        ("sort", '\u{e164}'),
        ("undo", '\u{e166}'),
        ("call", '\u{e0b0}'),
        ("chat", '\u{e0b7}'),
        ("chat_bubble", '\u{e0ca}'),
        ("mail", '\u{e158}'),
        ("email", '\u{e0be}'),
        ("forum", '\u{e0bf}'),
        ("location_on", '\u{e0c8}'),
        ("message", '\u{e0c9}'),
        ("group", '\u{e7ef}'),
        ("group_add", '\u{e7f0}'),
        ("notifications", '\u{e7f4}'),
        ("notifications_none", '\u{e7f5}'),
        ("person", '\u{e7fd}'),
        ("person_add", '\u{e7fe}'),
        ("person_outline", '\u{e7ff}'),
        ("public", '\u{e80b}'),
        ("share", '\u{e80d}'),
        ("attachment", '\u{e2bc}'),
        ("cloud", '\u{e2bd}'),
        ("cloud_download", '\u{e2c0}'),
        ("cloud_upload", '\u{e2c3}'),
        ("folder", '\u{e2c7}'),
        ("folder_open", '\u{e2c8}'),
        ("create_new_folder", '\u{e2cc}'),
        ("keyboard_arrow_down", '\u{e313}'),
        ("keyboard_arrow_left", '\u{e314}'),
        ("keyboard_arrow_right", '\u{e315}'),
        ("keyboard_arrow_up", '\u{e316}'),
        ("business", '\u{e0af}'),
        ("location_city", '\u{e7f1}'),
        ("restaurant", '\u{e56c}'),
        ("school", '\u{e80c}'),
        ("mic", '\u{e029}'),
        ("mic_off", '\u{e02b}'),
        ("pause", '\u{e034}'),
        ("play_arrow", '\u{e037}'),
        ("repeat", '\u{e040}'),
        ("replay", '\u{e042}'),
        ("shuffle", '\u{e043}'),
        ("skip_next", '\u{e044}'),
        ("skip_previous", '\u{e045}'),
        ("stop", '\u{e047}'),
        ("volume_off", '\u{e04f}'),
        ("volume_up", '\u{e050}'),
        ("camera", '\u{e3af}'),
        ("camera_alt", '\u{e3b0}'),
        ("collections", '\u{e3b6}'),
        ("color_lens", '\u{e3b7}'),
        ("crop", '\u{e3be}'),
        ("image", '\u{e3f4}'),
        ("photo", '\u{e410}'),
        ("photo_camera", '\u{e412}'),
        ("photo_library", '\u{e413}'),
        ("style", '\u{e41d}'),
        ("add_shopping_cart", '\u{e854}'),
        ("shopping_basket", '\u{e8cb}'),
        ("shopping_cart", '\u{e8cc}'),
        ("more_vert", '\u{e5d4}'),
        ("more_horiz", '\u{e5d3}'),
        ("refresh", '\u{e5d5}'),
        ("check_box", '\u{e834}'),
        ("check_box_outline_blank", '\u{e835}'),
        ("radio_button_checked", '\u{e837}'),
        ("radio_button_unchecked", '\u{e836}'),
        ("arrow_drop_down", '\u{e5c5}'),
        ("cancel", '\u{e5c9}'),
    ]
    .into_iter()
    .collect()
});

/// Glyph for an icon name in any supported spelling.
///
/// Only Material names are mapped; everything else gets [`FALLBACK_GLYPH`].
pub fn icon_glyph(name: &str) -> char {
    if IconLibrary::detect(name.trim()) != IconLibrary::Material {
        return FALLBACK_GLYPH;
    }
    MATERIAL
        .get(normalize_icon_name(name).as_str())
        .copied()
        .unwrap_or(FALLBACK_GLYPH)
}

/// Whether the Material table has a glyph for `name`.
pub fn has_glyph(name: &str) -> bool {
    IconLibrary::detect(name.trim()) == IconLibrary::Material
        && MATERIAL.contains_key(normalize_icon_name(name).as_str())
}

/// Icon font size for a `size` attribute.
pub fn icon_size(size: Option<&str>) -> f32 {
    let Some(size) = size.map(str::trim) else {
        return DEFAULT_ICON_SIZE;
    };
    match size {
        "xs" => 16.0,
        "sm" => 20.0,
        "md" => 24.0,
        "lg" => 32.0,
        "xl" => 40.0,
        other => other
            .trim_end_matches("px")
            .parse::<f32>()
            .ok()
            .filter(|v| v.is_finite() && *v > 0.0)
            .unwrap_or(DEFAULT_ICON_SIZE),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_detect_library() {
        assert_eq!(IconLibrary::detect("home"), IconLibrary::Material);
        assert_eq!(IconLibrary::detect("fas fa-home"), IconLibrary::FontAwesome);
        assert_eq!(IconLibrary::detect("fa-home"), IconLibrary::FontAwesome);
        assert_eq!(IconLibrary::detect("mdi-account"), IconLibrary::Mdi);
        assert_eq!(IconLibrary::detect("eva-star"), IconLibrary::Eva);
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize_icon_name("mdi-arrow-left"), "arrow_left");
        assert_eq!(normalize_icon_name("keyboard_arrow_down"), "keyboard_arrow_down");
        assert_eq!(normalize_icon_name(" expand-more "), "expand_more");
    }

    #[test]
    fn test_glyphs() {
        assert_eq!(icon_glyph("star"), '\u{e838}');
        assert_eq!(icon_glyph("expand-more"), '\u{e5cf}');
        assert_eq!(icon_glyph("no_such_icon"), FALLBACK_GLYPH);
        assert_eq!(icon_glyph("fas fa-star"), FALLBACK_GLYPH);
        assert!(has_glyph("delete"));
        assert!(!has_glyph("mdi-delete"));
    }

    #[test]
    fn test_sizes() {
        assert_eq!(icon_size(None), 24.0);
        assert_eq!(icon_size(Some("xs")), 16.0);
        assert_eq!(icon_size(Some("xl")), 40.0);
        assert_eq!(icon_size(Some("18px")), 18.0);
        assert_eq!(icon_size(Some("huge")), 24.0);
    }
}
