//! # cardglow — contrast-aware new-card highlighting
//!
//! Injects a highlight border into flashcard review HTML so a card being
//! seen for the first time is unmistakable. The border color is not
//! fixed: the engine reads the card's own stylesheet, finds its
//! background color, and picks the configured palette entry that is
//! *perceptually* furthest from it — distance measured in Oklab, where
//! Euclidean distance tracks what human eyes actually perceive.
//!
//! # Architecture
//!
//! ```text
//! host card-will-show hook
//!     │
//!     ▼
//! engine.rs:  event filter → cache lookup (night, note id, ordinal)
//!     │ miss
//!     ▼
//! css.rs:     extract .card background-color (regex line scan)
//!     │
//!     ▼
//! cardglow-color: sRGB → Oklab, furthest-palette-entry selection
//!     │
//!     ▼
//! markup.rs:  overlay rule + overlay <div> + optional fade script
//!     │
//!     ▼
//! engine.rs:  cache store → rendered document back to the host
//! ```
//!
//! Rendering is deterministic, so each (theme mode, card, template)
//! variant is rendered once and served from the cache until a config
//! update or template edit clears it.
//!
//! # Host integration
//!
//! The host owns the hook dispatch; this crate only exposes the methods
//! to wire in. A minimal integration:
//!
//! ```
//! use cardglow::{Card, CardState, Highlighter, HighlighterConfig, NoteId, ShowKind};
//! use cardglow::{Rgb, ThemeService};
//!
//! struct HostTheme;
//!
//! impl ThemeService for HostTheme {
//!     fn night_mode(&self) -> bool {
//!         false
//!     }
//!     fn canvas_color(&self) -> Rgb {
//!         Rgb::new(245, 245, 245)
//!     }
//! }
//!
//! let mut engine = Highlighter::new(HighlighterConfig::default(), Box::new(HostTheme));
//!
//! let card = Card { note_id: NoteId(1), ordinal: 0, state: CardState::New };
//! let shown = engine
//!     .card_will_show(
//!         "<style>.card { background-color: #ffffff; }</style><div>front</div>",
//!         &card,
//!         ShowKind::ReviewQuestion,
//!     )
//!     .unwrap();
//! assert!(shown.contains("border-highlight"));
//! ```
//!
//! Single-threaded by design: the host calls every hook from its UI
//! thread, one card at a time, so the engine takes `&mut self` and
//! needs no locking. The fade animation runs in the rendered card's own
//! script context, never in the engine.

pub mod config;
mod css;
pub mod engine;
pub mod host;
mod markup;

pub use cardglow_color::{Oklab, Rgb};
pub use config::{ConfigError, ConfigSchema, HighlighterConfig};
pub use engine::{Highlighter, RenderError};
pub use host::{Card, CardState, NoteId, ShowKind, ThemeService};
