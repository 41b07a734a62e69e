//! Background-color extraction from the card stylesheet.
//!
//! This is deliberately *not* a CSS parser. Card stylesheets are written
//! by the host's template editor and follow a narrow, predictable shape:
//! a `.card { ... }` rule (plus a `.card.night_mode` override in dark
//! themes) with one declaration per line. Line scanning against that
//! shape is the documented contract; stylesheets outside it simply fall
//! through to the host's default canvas color.
//!
//! Matching rules:
//!
//! - Night mode looks for a rule whose selector is `.card.night_mode`
//!   or `.night_mode.card`; day mode for a rule whose selector is
//!   exactly `.card`.
//! - Within the matched block, the **first** line carrying a
//!   `background-color:` declaration wins.
//! - A declaration whose value the color parser rejects counts as
//!   absent, not as an error.

use std::sync::OnceLock;

use cardglow_color::{Rgb, parse};
use regex::Regex;

/// `.card.night_mode { ... }` (either class order), non-greedy to the
/// first closing brace.
fn night_rule() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?s)(?:\.card\.night_mode|\.night_mode\.card) ?\{(.+?)\}")
            .expect("night rule pattern compiles")
    })
}

/// `.card { ... }` — the class must sit directly before the brace, so
/// `.card.night_mode { ... }` does not match in day mode.
fn day_rule() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?s)\.card ?\{(.+?)\}")
            .expect("day rule pattern compiles")
    })
}

/// A `background-color: <value>` declaration within a single line.
/// The value runs to the terminating `;` (or a stray `}`), excluding it.
fn declaration() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\s*background-color\s*:\s*([^;}]+)[;}]")
            .expect("declaration pattern compiles")
    })
}

/// Extract the card background color from `css` for the given theme mode.
///
/// Returns `None` when no mode-appropriate rule block exists, the block
/// carries no `background-color` declaration, or the declared value is
/// not a recognizable color token.
pub(crate) fn background_color(css: &str, night_mode: bool) -> Option<Rgb> {
    let rule = if night_mode { night_rule() } else { day_rule() };
    let block = rule.captures(css)?.get(1)?.as_str();

    let value = block
        .lines()
        .find_map(|line| declaration().captures(line))
        .map(|caps| caps[1].trim().to_owned())?;

    parse::color(&value)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn day_mode_extracts_card_rule() {
        let css = ".card { background-color: #112233; }";
        assert_eq!(background_color(css, false), Some(Rgb::new(17, 34, 51)));
    }

    #[test]
    fn day_mode_multiline_block() {
        let css = "\
.card {
 font-family: arial;
 background-color: white;
 color: black;
}";
        assert_eq!(background_color(css, false), Some(Rgb::WHITE));
    }

    #[test]
    fn first_declaration_wins() {
        let css = "\
.card {
 background-color: #000000;
 background-color: #ffffff;
}";
        assert_eq!(background_color(css, false), Some(Rgb::BLACK));
    }

    #[test]
    fn night_mode_matches_both_selector_orders() {
        let a = ".card.night_mode { background-color: #202020; }";
        let b = ".night_mode.card { background-color: #202020; }";
        assert_eq!(background_color(a, true), Some(Rgb::new(32, 32, 32)));
        assert_eq!(background_color(b, true), Some(Rgb::new(32, 32, 32)));
    }

    #[test]
    fn night_mode_ignores_plain_card_rule() {
        let css = ".card { background-color: #ffffff; }";
        assert_eq!(background_color(css, true), None);
    }

    #[test]
    fn day_mode_ignores_night_rule() {
        let css = ".card.night_mode { background-color: #202020; }";
        assert_eq!(background_color(css, false), None);
    }

    #[test]
    fn day_mode_picks_day_rule_among_both() {
        let css = "\
.card {
 background-color: #ffffff;
}
.card.night_mode {
 background-color: #202020;
}";
        assert_eq!(background_color(css, false), Some(Rgb::WHITE));
        assert_eq!(background_color(css, true), Some(Rgb::new(32, 32, 32)));
    }

    #[test]
    fn absent_rule_is_none() {
        assert_eq!(background_color("body { margin: 0; }", false), None);
        assert_eq!(background_color("", false), None);
    }

    #[test]
    fn absent_declaration_is_none() {
        let css = ".card { color: black; }";
        assert_eq!(background_color(css, false), None);
    }

    #[test]
    fn unparseable_value_is_none() {
        let css = ".card { background-color: var(--bg); }";
        assert_eq!(background_color(css, false), None);
    }

    #[test]
    fn missing_semicolon_is_none() {
        // The declaration contract requires a terminator on the line.
        let css = ".card { background-color: #112233 }";
        assert_eq!(background_color(css, false), None);
    }
}
