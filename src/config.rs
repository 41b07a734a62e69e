//! Highlighter configuration — the persisted JSON schema and its
//! validated in-memory form.
//!
//! The host stores addon configuration as JSON and hands the raw text to
//! the engine before persisting an edit. Parsing is two-stage:
//!
//! 1. [`ConfigSchema`] — a serde mirror of the stored document, colors
//!    still strings.
//! 2. [`HighlighterConfig`] — colors parsed to [`Rgb`], alpha
//!    range-checked. This is what the engine actually reads on every
//!    render.
//!
//! A failure anywhere leaves the engine's previous configuration in
//! place; the error is returned so the host can surface it through its
//! own error reporting.
//!
//! Palette contract: both palettes are expected to be non-empty. An
//! empty palette is a configuration error the engine does not defend
//! against — selection over it degrades to the background color itself.

use cardglow_color::{Rgb, parse};
use serde::Deserialize;
use thiserror::Error;

/// Why a configuration update was rejected.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config text was not valid JSON or missed required fields.
    #[error("config is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A palette entry was not a recognizable CSS color token.
    #[error("unrecognized color `{token}` in `{field}`")]
    Color { field: &'static str, token: String },

    /// Alpha outside the renderable range.
    #[error("alpha {0} is outside 0.0..=1.0")]
    Alpha(f32),
}

/// The stored configuration document, field for field.
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigSchema {
    pub border_colors: Vec<String>,
    pub border_colors_night: Vec<String>,
    pub alpha: f32,
    pub border_width: String,
    pub fade_out: bool,
}

/// Validated configuration, as read by every render.
///
/// Palette order is preserved from the stored document — selection
/// tie-breaks are first-entry-wins, so order is meaningful.
#[derive(Debug, Clone, PartialEq)]
pub struct HighlighterConfig {
    /// Border color candidates for the light theme.
    pub border_colors: Vec<Rgb>,
    /// Border color candidates for the dark theme.
    pub border_colors_night: Vec<Rgb>,
    /// Border opacity, 0.0–1.0.
    pub alpha: f32,
    /// CSS border width, e.g. `"4px"`.
    pub border_width: String,
    /// Whether the border fades out after the card appears.
    pub fade_out: bool,
}

impl HighlighterConfig {
    /// Parse and validate a serialized configuration document.
    ///
    /// # Errors
    ///
    /// [`ConfigError`] when the text is not valid JSON, a palette entry
    /// does not parse as a color, or alpha is out of range.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        serde_json::from_str::<ConfigSchema>(text)?.try_into()
    }
}

impl TryFrom<ConfigSchema> for HighlighterConfig {
    type Error = ConfigError;

    fn try_from(schema: ConfigSchema) -> Result<Self, ConfigError> {
        if !schema.alpha.is_finite() || !(0.0..=1.0).contains(&schema.alpha) {
            return Err(ConfigError::Alpha(schema.alpha));
        }

        Ok(Self {
            border_colors: parse_palette(&schema.border_colors, "border_colors")?,
            border_colors_night: parse_palette(&schema.border_colors_night, "border_colors_night")?,
            alpha: schema.alpha,
            border_width: schema.border_width,
            fade_out: schema.fade_out,
        })
    }
}

impl Default for HighlighterConfig {
    /// Out-of-the-box configuration: saturated primaries in day mode,
    /// slightly dimmed variants at night, a 4px border at 75% opacity
    /// that fades out.
    fn default() -> Self {
        Self {
            border_colors: vec![
                Rgb::new(255, 0, 0),
                Rgb::new(0, 128, 0),
                Rgb::new(0, 0, 255),
                Rgb::new(255, 255, 0),
            ],
            border_colors_night: vec![
                Rgb::new(204, 51, 51),
                Rgb::new(51, 204, 51),
                Rgb::new(51, 102, 255),
                Rgb::new(204, 204, 51),
            ],
            alpha: 0.75,
            border_width: String::from("4px"),
            fade_out: true,
        }
    }
}

/// Parse every entry of one palette, preserving order.
fn parse_palette(tokens: &[String], field: &'static str) -> Result<Vec<Rgb>, ConfigError> {
    tokens
        .iter()
        .map(|token| {
            parse::color(token).ok_or_else(|| ConfigError::Color {
                field,
                token: token.clone(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const VALID: &str = r##"{
        "border_colors": ["#ff0000", "lime", "rgb(0, 0, 255)"],
        "border_colors_night": ["#cc3333"],
        "alpha": 0.5,
        "border_width": "2px",
        "fade_out": false
    }"##;

    #[test]
    fn parses_valid_document() {
        let config = HighlighterConfig::from_json(VALID).unwrap();
        assert_eq!(
            config.border_colors,
            vec![Rgb::new(255, 0, 0), Rgb::new(0, 255, 0), Rgb::new(0, 0, 255)]
        );
        assert_eq!(config.border_colors_night, vec![Rgb::new(204, 51, 51)]);
        assert_eq!(config.alpha, 0.5);
        assert_eq!(config.border_width, "2px");
        assert!(!config.fade_out);
    }

    #[test]
    fn palette_order_is_preserved() {
        let config = HighlighterConfig::from_json(VALID).unwrap();
        assert_eq!(config.border_colors[0], Rgb::new(255, 0, 0));
        assert_eq!(config.border_colors[2], Rgb::new(0, 0, 255));
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(matches!(
            HighlighterConfig::from_json("{not json"),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn rejects_missing_field() {
        assert!(matches!(
            HighlighterConfig::from_json(r#"{"alpha": 0.5}"#),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn rejects_bad_color_token() {
        let text = VALID.replace("\"lime\"", "\"blurple\"");
        match HighlighterConfig::from_json(&text) {
            Err(ConfigError::Color { field, token }) => {
                assert_eq!(field, "border_colors");
                assert_eq!(token, "blurple");
            }
            other => panic!("expected color error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_out_of_range_alpha() {
        let text = VALID.replace("0.5", "1.5");
        assert!(matches!(
            HighlighterConfig::from_json(&text),
            Err(ConfigError::Alpha(_))
        ));
    }

    #[test]
    fn default_is_usable() {
        let config = HighlighterConfig::default();
        assert!(!config.border_colors.is_empty());
        assert!(!config.border_colors_night.is_empty());
        assert!((0.0..=1.0).contains(&config.alpha));
    }
}
