//! Host-facing types — the vocabulary shared with the review application.
//!
//! The engine never talks to the host directly. The host hands it a
//! [`Card`] and a [`ShowKind`] on every render, and answers theme
//! questions through the [`ThemeService`] trait. Everything here is the
//! *shape* of that conversation; none of it carries behavior.

use cardglow_color::Rgb;

/// Opaque, stable identity of the note a card was generated from.
///
/// The host assigns these; the engine only ever compares and hashes them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NoteId(pub i64);

/// Scheduling state of a card, as reported by the host.
///
/// Only [`CardState::New`] triggers highlighting; the other states exist
/// so hosts can pass their card through without pre-filtering.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CardState {
    /// Never reviewed. The only state that gets a highlight border.
    New,
    /// In the learning queue.
    Learning,
    /// Graduated into regular review.
    Review,
    /// Lapsed and relearning.
    Relearning,
}

/// Which face of which screen is being rendered.
///
/// Mirrors the host's card-will-show event kinds. Only
/// [`ShowKind::ReviewQuestion`] triggers highlighting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShowKind {
    ReviewQuestion,
    ReviewAnswer,
    PreviewQuestion,
    PreviewAnswer,
}

impl ShowKind {
    /// Map a host hook-kind string to a `ShowKind`.
    ///
    /// Returns `None` for kinds the engine has no interest in
    /// (template-layout previews and the like).
    #[must_use]
    pub fn from_hook_kind(kind: &str) -> Option<Self> {
        match kind {
            "reviewQuestion" => Some(Self::ReviewQuestion),
            "reviewAnswer" => Some(Self::ReviewAnswer),
            "previewQuestion" => Some(Self::PreviewQuestion),
            "previewAnswer" => Some(Self::PreviewAnswer),
            _ => None,
        }
    }
}

/// A reference to one renderable card.
///
/// `ordinal` is the card-template index within the note: a note with
/// three templates produces three cards sharing a [`NoteId`], told apart
/// by ordinal. Together with the theme mode they form the cache key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Card {
    pub note_id: NoteId,
    pub ordinal: u16,
    pub state: CardState,
}

/// Theme questions the engine asks the host.
///
/// The host implements this once; the engine reads it fresh on every
/// render entry so a theme toggle takes effect on the next card.
pub trait ThemeService {
    /// Whether the host is currently in its dark theme.
    fn night_mode(&self) -> bool;

    /// The host's default canvas color for the current theme — the
    /// fallback background when the card stylesheet declares none.
    fn canvas_color(&self) -> Rgb;
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn hook_kind_mapping() {
        assert_eq!(
            ShowKind::from_hook_kind("reviewQuestion"),
            Some(ShowKind::ReviewQuestion)
        );
        assert_eq!(
            ShowKind::from_hook_kind("reviewAnswer"),
            Some(ShowKind::ReviewAnswer)
        );
        assert_eq!(ShowKind::from_hook_kind("clayoutQuestion"), None);
        assert_eq!(ShowKind::from_hook_kind(""), None);
    }
}
