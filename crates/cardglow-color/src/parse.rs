//! CSS color-token parsing and serialization.
//!
//! The highlighter meets color strings at two boundaries: configuration
//! (palette entries like `"#ff0000"`) and extracted stylesheet values
//! (whatever sits after `background-color:` in the card CSS). This module
//! understands the token forms that actually occur there:
//!
//! | Form            | Example               |
//! |-----------------|-----------------------|
//! | hex             | `#112233`, `#123`     |
//! | hex with alpha  | `#11223344`, `#1234`  |
//! | functional      | `rgb(17, 34, 51)`     |
//! | functional+α    | `rgba(17, 34, 51, 1)` |
//! | basic keyword   | `white`, `navy`       |
//!
//! Alpha in the *input* is accepted and discarded — opacity of the
//! rendered border is governed solely by the configured alpha, applied
//! at serialization time by [`rgba_string`]. Anything unrecognized is
//! `None`; callers decide whether that means "fall back to a default"
//! (stylesheet scanning) or "reject the config" (validation).

use crate::Rgb;

/// The 16 basic CSS color keywords (CSS Level 1/2).
const KEYWORDS: [(&str, Rgb); 16] = [
    ("aqua", Rgb::new(0, 255, 255)),
    ("black", Rgb::new(0, 0, 0)),
    ("blue", Rgb::new(0, 0, 255)),
    ("fuchsia", Rgb::new(255, 0, 255)),
    ("gray", Rgb::new(128, 128, 128)),
    ("green", Rgb::new(0, 128, 0)),
    ("lime", Rgb::new(0, 255, 0)),
    ("maroon", Rgb::new(128, 0, 0)),
    ("navy", Rgb::new(0, 0, 128)),
    ("olive", Rgb::new(128, 128, 0)),
    ("purple", Rgb::new(128, 0, 128)),
    ("red", Rgb::new(255, 0, 0)),
    ("silver", Rgb::new(192, 192, 192)),
    ("teal", Rgb::new(0, 128, 128)),
    ("white", Rgb::new(255, 255, 255)),
    ("yellow", Rgb::new(255, 255, 0)),
];

/// Parse a CSS color token into an [`Rgb`] triple.
///
/// Leading/trailing whitespace is tolerated and matching is
/// case-insensitive. Returns `None` for anything unrecognized.
#[must_use]
pub fn color(token: &str) -> Option<Rgb> {
    let token = token.trim();

    if token.starts_with('#') || token.chars().all(|c| c.is_ascii_hexdigit()) {
        if let Some(rgb) = parse_hex(token) {
            return Some(rgb);
        }
    }

    let lower = token.to_ascii_lowercase();
    if let Some(rest) = lower.strip_prefix("rgba") {
        return parse_functional(rest, true);
    }
    if let Some(rest) = lower.strip_prefix("rgb") {
        return parse_functional(rest, false);
    }

    KEYWORDS
        .iter()
        .find(|(name, _)| *name == lower)
        .map(|&(_, rgb)| rgb)
}

/// Serialize a color plus an alpha value to a `#rrggbbaa` string.
///
/// Alpha is clamped to [0.0, 1.0] and scaled to a byte with correct
/// rounding. This is the form injected into the generated
/// `border-color:` declaration.
#[must_use]
pub fn rgba_string(color: Rgb, alpha: f32) -> String {
    let a = alpha_to_u8(alpha);
    format!("#{:02x}{:02x}{:02x}{a:02x}", color.r, color.g, color.b)
}

/// Convert a float (0.0–1.0) to a u8 (0–255) with correct rounding.
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn alpha_to_u8(v: f32) -> u8 {
    // Safe: clamp guarantees 0.0 <= value <= 255.0 before truncation.
    v.mul_add(255.0, 0.5).clamp(0.0, 255.0) as u8
}

// ─── Hex Forms ───────────────────────────────────────────────────────────────

/// Parse `#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA` (with or without `#`).
/// Alpha digits are validated and then ignored.
fn parse_hex(s: &str) -> Option<Rgb> {
    let s = s.strip_prefix('#').unwrap_or(s);

    match s.len() {
        // #RGB
        3 => {
            let r = parse_hex_digit(s.as_bytes()[0])?;
            let g = parse_hex_digit(s.as_bytes()[1])?;
            let b = parse_hex_digit(s.as_bytes()[2])?;
            Some(Rgb::new(r << 4 | r, g << 4 | g, b << 4 | b))
        }
        // #RGBA
        4 => {
            parse_hex_digit(s.as_bytes()[3])?;
            parse_hex(&s[..3])
        }
        // #RRGGBB
        6 => {
            let r = parse_hex_byte(&s.as_bytes()[0..2])?;
            let g = parse_hex_byte(&s.as_bytes()[2..4])?;
            let b = parse_hex_byte(&s.as_bytes()[4..6])?;
            Some(Rgb::new(r, g, b))
        }
        // #RRGGBBAA
        8 => {
            parse_hex_byte(&s.as_bytes()[6..8])?;
            parse_hex(&s[..6])
        }
        _ => None,
    }
}

#[inline]
const fn parse_hex_digit(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

#[inline]
fn parse_hex_byte(bytes: &[u8]) -> Option<u8> {
    let hi = parse_hex_digit(bytes[0])?;
    let lo = parse_hex_digit(bytes[1])?;
    Some(hi << 4 | lo)
}

// ─── Functional Forms ────────────────────────────────────────────────────────

/// Parse the argument list of `rgb(...)` / `rgba(...)`.
///
/// `rest` is everything after the function name. Channels are integers
/// 0–255; the rgba alpha argument must at least look like a number but
/// its value is discarded.
fn parse_functional(rest: &str, with_alpha: bool) -> Option<Rgb> {
    let inner = rest
        .trim()
        .strip_prefix('(')?
        .strip_suffix(')')?;

    let parts: Vec<&str> = inner.split(',').map(str::trim).collect();
    if parts.len() != if with_alpha { 4 } else { 3 } {
        return None;
    }

    let r = parts[0].parse::<u8>().ok()?;
    let g = parts[1].parse::<u8>().ok()?;
    let b = parts[2].parse::<u8>().ok()?;

    if with_alpha {
        parts[3].parse::<f32>().ok()?;
    }

    Some(Rgb::new(r, g, b))
}

// ─── Tests ───────────────────────────────────────────────────────────────────
