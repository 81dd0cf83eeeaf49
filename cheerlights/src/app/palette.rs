//! Colour names understood by the feed.

use crate::hal::pixel::Rgb;

pub const DEFAULT_NAME: &str = "red";
pub const DEFAULT: Rgb = Rgb::new(255, 0, 0);

pub const GREEN: Rgb = Rgb::new(0, 255, 0);
pub const RED: Rgb = DEFAULT;

// Tuned for WS2812 strips, so not the CSS values.
const COLORS: [(&str, Rgb); 13] = [
    ("red", Rgb::new(255, 0, 0)),
    ("orange", Rgb::new(255, 30, 0)),
    ("yellow", Rgb::new(255, 110, 1)),
    ("green", Rgb::new(0, 255, 0)),
    ("cyan", Rgb::new(0, 255, 255)),
    ("blue", Rgb::new(0, 0, 255)),
    ("purple", Rgb::new(128, 0, 128)),
    ("magenta", Rgb::new(255, 0, 50)),
    ("pink", Rgb::new(255, 40, 50)),
    ("white", Rgb::new(255, 255, 170)),
    ("oldlace", Rgb::new(255, 150, 50)),
    ("warmwhite", Rgb::new(255, 150, 50)),
    ("off", Rgb::OFF),
];

/// Exact, case-sensitive lookup.
pub fn get(name: &str) -> Option<Rgb> {
    COLORS
        .iter()
        .find(|(known, _)| *known == name)
        .map(|&(_, color)| color)
}

/// Like [`get`], but unknown names map to [`DEFAULT`] so a strip always has
/// somewhere to go.
pub fn lookup(name: &str) -> Rgb {
    get(name).unwrap_or(DEFAULT)
}

pub fn names() -> impl Iterator<Item = &'static str> {
    COLORS.iter().map(|&(name, _)| name)
}
