//! The highlighter engine — render cache, color selection, and the hook
//! entry points the host calls.
//!
//! One [`Highlighter`] instance lives for the process lifetime, owned by
//! whatever registers the host hooks. Per render it:
//!
//! 1. Checks the event: only the question side of a review, and only
//!    for a card in the `New` state. Everything else passes through
//!    untouched, byte for byte.
//! 2. Computes the cache key `(night mode, note id, template ordinal)`
//!    and returns the cached document on a hit.
//! 3. On a miss: extracts the card background from the stylesheet
//!    (falling back to the host canvas color), picks the palette entry
//!    perceptually furthest from it, and rewrites the document with the
//!    overlay rule, overlay element, and optional fade script.
//!
//! The cache has no eviction — entries are valid as long as the inputs
//! that produced them are, so invalidation is a full clear triggered by
//! config updates and template edits. Rendering is deterministic, which
//! makes cached and fresh output byte-identical.
//!
//! Theme mode is read from the [`ThemeService`] once per entry call and
//! threaded through every helper as a parameter. Keeping it out of the
//! engine state removes any chance of a stale read if the theme flips
//! mid-render.

use std::collections::HashMap;

use cardglow_color::{Rgb, parse};
use tracing::{debug, warn};

use crate::config::{ConfigError, HighlighterConfig};
use crate::host::{Card, CardState, NoteId, ShowKind, ThemeService};
use crate::{css, markup};

pub use crate::markup::RenderError;

/// One rendered variant: (night mode, note id, template ordinal).
type CacheKey = (bool, NoteId, u16);

/// The new-card highlighter engine.
///
/// Owns its configuration and render cache exclusively — the host
/// mutates neither directly, only through the hook methods below.
pub struct Highlighter {
    config: HighlighterConfig,
    theme: Box<dyn ThemeService>,
    cache: HashMap<CacheKey, String>,
    /// Number of full renders performed (cache misses).
    renders: u64,
}

impl Highlighter {
    /// Create an engine with the given configuration and theme service.
    #[must_use]
    pub fn new(config: HighlighterConfig, theme: Box<dyn ThemeService>) -> Self {
        Self {
            config,
            theme,
            cache: HashMap::new(),
            renders: 0,
        }
    }

    /// Current configuration.
    #[must_use]
    pub fn config(&self) -> &HighlighterConfig {
        &self.config
    }

    // ─── Host hook: card render ──────────────────────────────────────────

    /// Entry point for the host's card-will-show hook.
    ///
    /// Returns `text` unchanged unless this is the question side of a
    /// review and the card is new. Otherwise serves from the cache,
    /// rendering on first sight of the key.
    ///
    /// # Errors
    ///
    /// [`RenderError::MalformedCard`] when a render is required and
    /// `text` does not match `<style>…</style>…`.
    pub fn card_will_show(
        &mut self,
        text: &str,
        card: &Card,
        kind: ShowKind,
    ) -> Result<String, RenderError> {
        if kind != ShowKind::ReviewQuestion || card.state != CardState::New {
            return Ok(text.to_owned());
        }

        let night_mode = self.theme.night_mode();
        let key = (night_mode, card.note_id, card.ordinal);

        if let Some(cached) = self.cache.get(&key) {
            debug!(?key, "highlight cache hit");
            return Ok(cached.clone());
        }

        let rendered = self.render(text, night_mode)?;
        debug!(?key, renders = self.renders, "highlight cache miss");
        self.cache.insert(key, rendered.clone());
        Ok(rendered)
    }

    // ─── Host hooks: invalidation ────────────────────────────────────────

    /// Template-edit notification. Identity transform on the markup; the
    /// side effect is a full cache clear, since template content feeds
    /// every cached render.
    pub fn templates_edited(&mut self, html: &str) -> String {
        self.clear_cache();
        html.to_owned()
    }

    /// Pre-persistence config update: parse and validate `json`, and
    /// only on success swap the live configuration and clear the cache.
    ///
    /// # Errors
    ///
    /// [`ConfigError`] when the new config is rejected — the previous
    /// configuration stays live, the cache is left as it was, and the
    /// host surfaces the error to the user.
    pub fn config_will_update(&mut self, json: &str) -> Result<(), ConfigError> {
        match HighlighterConfig::from_json(json) {
            Ok(config) => {
                self.config = config;
                self.clear_cache();
                Ok(())
            }
            Err(err) => {
                warn!(%err, "rejected config update, keeping previous config");
                Err(err)
            }
        }
    }

    /// Post-persistence config notification: the stored config changed
    /// through a path that already validated it, so only invalidate.
    pub fn config_updated(&mut self) {
        self.clear_cache();
    }

    /// Drop every cached render unconditionally.
    pub fn clear_cache(&mut self) {
        if !self.cache.is_empty() {
            debug!(entries = self.cache.len(), "clearing highlight cache");
        }
        self.cache.clear();
    }

    // ─── Rendering ───────────────────────────────────────────────────────

    /// Render the highlighted variant of one review document.
    ///
    /// Deterministic: identical input, config, and theme mode produce
    /// byte-identical output.
    ///
    /// # Errors
    ///
    /// [`RenderError::MalformedCard`] when `text` does not match
    /// `<style>…</style>…`.
    pub fn render(&mut self, text: &str, night_mode: bool) -> Result<String, RenderError> {
        self.renders += 1;

        let (card_css, rest) = markup::split_document(text)?;

        let background = self.resolve_background(card_css, night_mode);
        let palette = if night_mode {
            &self.config.border_colors_night
        } else {
            &self.config.border_colors
        };
        // Non-empty palette is a config contract; the fallback keeps an
        // empty one from panicking (the border just disappears into the
        // background).
        let border = furthest_from(background, palette).unwrap_or(background);

        let border_color = parse::rgba_string(border, self.config.alpha);
        let rule = markup::highlight_rule(&self.config.border_width, &border_color);

        Ok(markup::assemble(&rule, card_css, rest, self.config.fade_out))
    }

    /// The card background: extracted from the stylesheet when declared,
    /// otherwise the host's canvas color for the current theme.
    fn resolve_background(&self, card_css: &str, night_mode: bool) -> Rgb {
        css::background_color(card_css, night_mode)
            .unwrap_or_else(|| self.theme.canvas_color())
    }
}

/// The palette entry with maximal perceptual distance from `background`.
///
/// Distances are squared Oklab Delta E. Comparison is strictly greater,
/// so on a tie the first-encountered maximum wins — palette order is
/// part of the configuration contract.
fn furthest_from(background: Rgb, palette: &[Rgb]) -> Option<Rgb> {
    let bg = background.to_oklab();

    let mut best: Option<(Rgb, f32)> = None;
    for &candidate in palette {
        let distance = candidate.to_oklab().distance_sq(bg);
        if best.is_none_or(|(_, best_distance)| distance > best_distance) {
            best = Some((candidate, distance));
        }
    }
    best.map(|(color, _)| color)
}

// ─── Tests ───────────────────────────────────────────────────────────────────
