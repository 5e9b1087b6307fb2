//! Inline color palette.

/// Palette colors. Each also exists as a `_background` token.
const PALETTE: [&str; 10] = [
    "default", "gray", "brown", "orange", "yellow", "green", "blue", "purple", "pink", "red",
];

/// CSS class for a palette color token.
///
/// `"red"` maps to `color-red` and `"red_background"` to
/// `color-red-background`. Tokens outside the palette yield `None`.
#[must_use]
pub fn color_class(token: &str) -> Option<String> {
    let (base, background) = match token.strip_suffix("_background") {
        Some(base) => (base, true),
        None => (token, false),
    };

    if !PALETTE.contains(&base) {
        return None;
    }

    Some(if background {
        format!("color-{base}-background")
    } else {
        format!("color-{base}")
    })
}
