//! Board background classification.
//!
//! # Responsibility
//! - Decide whether a background string is a color, an image path, or
//!   neither.
//!
//! # Invariants
//! - Classification is pure: no file-system access, same input same output.
//! - `BACKGROUND_DEFAULT` always classifies as `BackgroundType::Color`.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Background stored when a caller supplies an invalid one.
pub const BACKGROUND_DEFAULT: &str = "rgba(255,255,255,255)";

/// File extensions accepted as image backgrounds (lowercase).
pub const IMAGE_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "bmp", "svg", "webp", "tif", "tiff", "ico",
];

// Either `rgba(r, g, b, a)` or bare `r,g,b,a`.
static RGBA_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?:rgba\(\s*(\d{1,3})\s*,\s*(\d{1,3})\s*,\s*(\d{1,3})\s*,\s*(\d{1,3})\s*\)|(\d{1,3})\s*,\s*(\d{1,3})\s*,\s*(\d{1,3})\s*,\s*(\d{1,3}))$",
    )
    .expect("valid rgba regex")
});

/// Kind of value held by a board background.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackgroundType {
    /// Four-channel RGBA color.
    Color,
    /// Path to an image file.
    Image,
    /// Neither; never stored on a board.
    Invalid,
}

impl BackgroundType {
    /// Stable lowercase name, matching the serde form.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Color => "color",
            Self::Image => "image",
            Self::Invalid => "invalid",
        }
    }
}

/// Classifies a background value.
pub fn classify_background(value: &str) -> BackgroundType {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return BackgroundType::Invalid;
    }
    if is_rgba_color(trimmed) {
        return BackgroundType::Color;
    }
    if is_image_path(trimmed) {
        return BackgroundType::Image;
    }
    BackgroundType::Invalid
}

fn is_rgba_color(value: &str) -> bool {
    let Some(captures) = RGBA_RE.captures(value) else {
        return false;
    };
    let channels: Vec<&str> = captures
        .iter()
        .skip(1)
        .flatten()
        .map(|capture| capture.as_str())
        .collect();
    channels.len() == 4
        && channels
            .iter()
            .all(|channel| channel.parse::<u16>().is_ok_and(|number| number <= 255))
}

fn is_image_path(value: &str) -> bool {
    let path = Path::new(value);
    let has_stem = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .is_some_and(|stem| !stem.trim().is_empty());
    let extension = path
        .extension()
        .and_then(|extension| extension.to_str())
        .map(str::to_ascii_lowercase);
    has_stem
        && extension.is_some_and(|extension| IMAGE_EXTENSIONS.contains(&extension.as_str()))
}

#[cfg(test)]
mod tests {
    use super::{classify_background, BackgroundType, BACKGROUND_DEFAULT};

    #[test]
    fn default_background_is_a_color() {
        assert_eq!(classify_background(BACKGROUND_DEFAULT), BackgroundType::Color);
    }

    #[test]
    fn accepts_wrapped_and_bare_rgba() {
        assert_eq!(classify_background("rgba(0, 128, 255, 255)"), BackgroundType::Color);
        assert_eq!(classify_background("12,34,56,78"), BackgroundType::Color);
        assert_eq!(classify_background(" rgba(1,2,3,4) "), BackgroundType::Color);
    }

    #[test]
    fn rejects_out_of_range_or_short_colors() {
        assert_eq!(classify_background("rgba(256,0,0,0)"), BackgroundType::Invalid);
        assert_eq!(classify_background("rgba(1,2,3)"), BackgroundType::Invalid);
        assert_eq!(classify_background("1,2,3,4,5"), BackgroundType::Invalid);
        assert_eq!(classify_background("rgba(-1,2,3,4)"), BackgroundType::Invalid);
    }

    #[test]
    fn image_extensions_are_case_insensitive() {
        assert_eq!(classify_background("/home/me/sky.PNG"), BackgroundType::Image);
        assert_eq!(classify_background("walls/brick.jpeg"), BackgroundType::Image);
        assert_eq!(classify_background("C:/pics/a b.webp"), BackgroundType::Image);
    }

    #[test]
    fn rejects_non_image_paths_and_garbage() {
        assert_eq!(classify_background(""), BackgroundType::Invalid);
        assert_eq!(classify_background("   "), BackgroundType::Invalid);
        assert_eq!(classify_background("garbage"), BackgroundType::Invalid);
        assert_eq!(classify_background("notes.txt"), BackgroundType::Invalid);
        assert_eq!(classify_background(".png"), BackgroundType::Invalid);
    }

    #[test]
    fn classification_is_repeatable() {
        for value in ["rgba(1,1,1,1)", "a.png", "nope"] {
            assert_eq!(classify_background(value), classify_background(value));
        }
    }
}
