//! HTML/CSS/script synthesis — splitting the review document and
//! reassembling it with the highlight overlay injected.
//!
//! The host renders every review face as `<style>{CSS}</style>{REST}`.
//! That shape is a precondition, not a heuristic: if it does not hold,
//! rendering fails loudly ([`RenderError::MalformedCard`]) rather than
//! guessing. Synthesis is purely structural — the output is always
//!
//! ```text
//! <style>{overlay-rule}{original-css}</style>
//! <div id="border-highlight" class="border-highlight"></div>
//! {original-rest}\n{fade-script-or-empty}
//! ```
//!
//! (shown wrapped here; the real output inserts no extra newlines).
//! The fade script is an opaque payload executed in the rendered card's
//! own context — data from the engine's point of view, not behavior.

use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

/// Failure to render one card.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RenderError {
    /// The review document did not match `<style>…</style>…`.
    ///
    /// This indicates a violated host precondition; the render call
    /// propagates it and no recovery is attempted.
    #[error("card markup does not match `<style>…</style>…`")]
    MalformedCard,
}

/// The injected overlay element. Stable identity — the fade script and
/// user styling both address it by this id/class.
pub(crate) const OVERLAY_DIV: &str =
    r#"<div id="border-highlight" class="border-highlight"></div>"#;

/// Client-side fade-out: opacity follows the logistic curve
/// `1 / (1 + e^(5t - 5))` for `t` in seconds, driven per frame for a
/// 2-second window. Appended only when `fade_out` is configured.
const FADE_SCRIPT: &str = r"<script>
    borderHighlight = document.getElementById('border-highlight');

    startTime = performance.now();

    function animate(currentTime) {
        const elapsedTime = currentTime - startTime;
        const t = elapsedTime / 1000;
        borderHighlight.style.opacity = Math.max(0, 1/(1+Math.exp(5*t-5)));

        if (t < 2) {
            requestAnimationFrame(animate);
        }
    }

    requestAnimationFrame(animate);
</script>
";

/// `<style>{CSS}</style>{REST}` — one minimal style block, then
/// arbitrary non-empty trailing markup.
fn document_shape() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?s)\A<style>(.+?)</style>(.+)\z")
            .expect("document shape pattern compiles")
    })
}

/// Split a review document into its stylesheet and trailing markup.
///
/// # Errors
///
/// [`RenderError::MalformedCard`] when the document does not have the
/// required shape.
pub(crate) fn split_document(text: &str) -> Result<(&str, &str), RenderError> {
    let caps = document_shape()
        .captures(text)
        .ok_or(RenderError::MalformedCard)?;
    let css = caps.get(1).map_or("", |m| m.as_str());
    let rest = caps.get(2).map_or("", |m| m.as_str());
    Ok((css, rest))
}

/// Build the overlay rule block for the given border width and
/// serialized border color (`#rrggbbaa`).
///
/// Fixed-position, inset 0 — the border frames the whole viewport.
/// z-index lifts it above card content; zero margin/padding keep the
/// frame flush with the viewport edges.
pub(crate) fn highlight_rule(border_width: &str, border_color: &str) -> String {
    format!(
        ".border-highlight{{\n\
         border: solid {border_width};\n\
         border-color: {border_color};\n\
         margin: 0;\n\
         padding: 0;\n\
         position: fixed;\n\
         inset: 0;\n\
         z-index: 100;\n\
         }}\n"
    )
}

/// Reassemble the final document from its pieces.
pub(crate) fn assemble(rule: &str, css: &str, rest: &str, fade_out: bool) -> String {
    let script = if fade_out { FADE_SCRIPT } else { "" };
    format!("<style>{rule}{css}</style>{OVERLAY_DIV}{rest}\n{script}")
}
