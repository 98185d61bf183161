use std::fmt;

use skia_safe::Color;

/// Named colors accepted by [`parse_color`].
const NAMED_COLORS: &[(&str, (u8, u8, u8))] = &[
    ("black", (0, 0, 0)),
    ("white", (255, 255, 255)),
    ("red", (255, 0, 0)),
    ("green", (0, 128, 0)),
    ("lime", (0, 255, 0)),
    ("blue", (0, 0, 255)),
    ("yellow", (255, 255, 0)),
    ("cyan", (0, 255, 255)),
    ("magenta", (255, 0, 255)),
    ("orange", (255, 165, 0)),
    ("purple", (128, 0, 128)),
    ("pink", (255, 192, 203)),
    ("brown", (165, 42, 42)),
    ("gray", (128, 128, 128)),
    ("grey", (128, 128, 128)),
    ("darkred", (139, 0, 0)),
    ("crimson", (220, 20, 60)),
    ("hotpink", (255, 105, 180)),
];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseColorError(String);

impl fmt::Display for ParseColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "bad color string: {:?}", self.0)
    }
}

impl std::error::Error for ParseColorError {}

/// Parses a color name (`"red"`) or hex string (`"#ff0000"`, `"#f00"`).
pub fn parse_color(spec: &str) -> Result<Color, ParseColorError> {
    let trimmed = spec.trim();
    if let Some(hex) = trimmed.strip_prefix('#') {
        return parse_hex(hex).ok_or_else(|| ParseColorError(spec.to_string()));
    }

    let lower = trimmed.to_ascii_lowercase();
    NAMED_COLORS
        .iter()
        .find(|(name, _)| *name == lower)
        .map(|(_, (r, g, b))| Color::from_rgb(*r, *g, *b))
        .ok_or_else(|| ParseColorError(spec.to_string()))
}

fn parse_hex(hex: &str) -> Option<Color> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    match hex.len() {
        3 => {
            let mut channels = hex
                .chars()
                .map(|c| c.to_digit(16).map(|d| (d * 17) as u8));
            let r = channels.next()??;
            let g = channels.next()??;
            let b = channels.next()??;
            Some(Color::from_rgb(r, g, b))
        }
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some(Color::from_rgb(r, g, b))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_names_case_insensitively() {
        assert_eq!(parse_color("red"), Ok(Color::from_rgb(255, 0, 0)));
        assert_eq!(parse_color(" White "), Ok(Color::WHITE));
    }

    #[test]
    fn parses_long_and_short_hex() {
        assert_eq!(parse_color("#00ff80"), Ok(Color::from_rgb(0, 255, 128)));
        assert_eq!(parse_color("#f0a"), Ok(Color::from_rgb(255, 0, 170)));
    }

    #[test]
    fn rejects_unknown_strings() {
        assert!(parse_color("reddish").is_err());
        assert!(parse_color("#12345").is_err());
        assert!(parse_color("#gg0000").is_err());
        assert!(parse_color("").is_err());
    }
}
