// SPDX-License-Identifier: MIT
//
// cardglow-color — sRGB color model with Oklab perceptual distance.
//
// Single-character variable names (r, g, b, l, a, s, m) are the standard
// mathematical convention in color science. Renaming them would make the
// code harder to compare against reference implementations.
#![allow(clippy::many_single_char_names)]
//
// Picking a border color that stands out against an arbitrary card
// background is a perceptual question, not a numerical one: Euclidean
// distance in raw RGB ranks candidates badly (it overweights blue
// differences and underweights lightness). This crate converts colors
// into Oklab, where Euclidean distance approximates perceived color
// difference, so "furthest color from the background" means what a
// human would mean by it.
//
// Conversion pipeline:
//
//   sRGB (8-bit) → Linear sRGB (inverse gamma) → LMS → Oklab
//
// One-way only — the engine never needs to go back from Oklab to RGB,
// because selection always returns one of the original palette entries.

use std::fmt;

pub mod parse;

// ─── Rgb ─────────────────────────────────────────────────────────────────────

/// An 8-bit device-sRGB color triple.
///
/// This is the working currency of the highlighter: palette entries,
/// extracted card backgrounds, and the host's canvas color are all `Rgb`.
/// Immutable once constructed. Alpha is not stored here — it is a
/// configuration value applied only at serialization time
/// (see [`parse::rgba_string`]).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Create a color from 8-bit channel values.
    #[inline]
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Pure black.
    pub const BLACK: Self = Self::new(0, 0, 0);

    /// Pure white.
    pub const WHITE: Self = Self::new(255, 255, 255);

    /// Convert to a perceptually uniform Oklab coordinate.
    ///
    /// Applies the sRGB inverse gamma curve, then Björn Ottosson's
    /// linear-sRGB → LMS → Oklab transform. Pure and deterministic:
    /// the same input always produces bit-identical output.
    #[must_use]
    pub fn to_oklab(self) -> Oklab {
        let r = srgb_to_linear(f32::from(self.r) / 255.0);
        let g = srgb_to_linear(f32::from(self.g) / 255.0);
        let b = srgb_to_linear(f32::from(self.b) / 255.0);
        linear_srgb_to_oklab(r, g, b)
    }
}

impl fmt::Debug for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

// ─── Oklab ───────────────────────────────────────────────────────────────────

/// A coordinate in the Oklab perceptual color space.
///
/// Ephemeral — computed from an [`Rgb`] for distance comparison and
/// discarded. Never persisted, never rendered.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Oklab {
    /// Lightness: 0.0 (black) to 1.0 (white).
    pub l: f32,

    /// Green–red chroma axis.
    pub a: f32,

    /// Blue–yellow chroma axis.
    pub b: f32,
}

impl Oklab {
    /// Squared Euclidean distance to another coordinate.
    ///
    /// Distance in Oklab is a simple but effective perceptual metric
    /// (Delta E). Squared form — ordering is all the furthest-color
    /// selection needs, so the square root is never taken.
    #[must_use]
    pub fn distance_sq(self, other: Self) -> f32 {
        let dl = self.l - other.l;
        let da = self.a - other.a;
        let db = self.b - other.b;
        db.mul_add(db, dl.mul_add(dl, da * da))
    }
}

// ─── Color Space Conversion Functions ────────────────────────────────────────
//
// These implement the Oklab color space math created by Björn Ottosson.
// Reference: https://bottosson.github.io/posts/oklab/

/// Convert a single sRGB component to linear sRGB (remove gamma).
#[inline]
#[must_use]
pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.040_45 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Convert linear sRGB to Oklab.
///
/// The conversion goes through an intermediate LMS (Long, Medium, Short
/// cone response) space with a cube-root nonlinearity. The matrices are
/// from Ottosson's original specification.
#[inline]
#[must_use]
pub fn linear_srgb_to_oklab(r: f32, g: f32, b: f32) -> Oklab {
    // Linear sRGB → LMS
    let l = 0.051_445_995f32.mul_add(b, 0.412_221_47f32.mul_add(r, 0.536_332_55 * g));
    let m = 0.107_396_96f32.mul_add(b, 0.211_903_5f32.mul_add(r, 0.680_699_5 * g));
    let s = 0.629_978_7f32.mul_add(b, 0.088_302_46f32.mul_add(r, 0.281_718_84 * g));

    // Cube root (LMS → Oklab intermediate)
    let l_ = l.cbrt();
    let m_ = m.cbrt();
    let s_ = s.cbrt();

    // Oklab intermediate → Oklab
    let l_ok = 0.004_072_047f32.mul_add(-s_, 0.210_454_26f32.mul_add(l_, 0.793_617_8 * m_));
    let a = 0.450_593_7f32.mul_add(s_, 1.977_998_5f32.mul_add(l_, -(2.428_592_2 * m_)));
    let b_ok = 0.808_675_77f32.mul_add(-s_, 0.025_904_037f32.mul_add(l_, 0.782_771_77 * m_));

    Oklab { l: l_ok, a, b: b_ok }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    use super::*;

    fn approx_eq(a: f32, b: f32, epsilon: f32) -> bool {
        (a - b).abs() < epsilon
    }

    // ── Known Values ─────────────────────────────────────────────────────

    #[test]
    fn black_is_zero_lightness() {
        let lab = Rgb::BLACK.to_oklab();
        assert!(approx_eq(lab.l, 0.0, 0.001), "black L was {}", lab.l);
        assert!(approx_eq(lab.a, 0.0, 0.001));
        assert!(approx_eq(lab.b, 0.0, 0.001));
    }

    #[test]
    fn white_is_full_lightness() {
        let lab = Rgb::WHITE.to_oklab();
        assert!(approx_eq(lab.l, 1.0, 0.001), "white L was {}", lab.l);
        assert!(approx_eq(lab.a, 0.0, 0.001));
        assert!(approx_eq(lab.b, 0.0, 0.001));
    }

    #[test]
    fn gray_is_achromatic() {
        let lab = Rgb::new(128, 128, 128).to_oklab();
        assert!(approx_eq(lab.a, 0.0, 0.001), "gray a was {}", lab.a);
        assert!(approx_eq(lab.b, 0.0, 0.001), "gray b was {}", lab.b);
        assert!(lab.l > 0.4 && lab.l < 0.7, "gray L was {}", lab.l);
    }

    #[test]
    fn red_sits_on_positive_a_axis() {
        // Pure sRGB red: positive a (toward red), positive b (toward yellow).
        let lab = Rgb::new(255, 0, 0).to_oklab();
        assert!(lab.a > 0.15, "red a was {}", lab.a);
        assert!(lab.b > 0.05, "red b was {}", lab.b);
        assert!(approx_eq(lab.l, 0.628, 0.01), "red L was {}", lab.l);
    }

    #[test]
    fn conversion_is_deterministic() {
        let c = Rgb::new(17, 34, 51);
        let first = c.to_oklab();
        let second = c.to_oklab();
        assert_eq!(first, second);
        assert!(first.l.to_bits() == second.l.to_bits());
        assert!(first.a.to_bits() == second.a.to_bits());
        assert!(first.b.to_bits() == second.b.to_bits());
    }

    // ── Distance ─────────────────────────────────────────────────────────

    #[test]
    fn distance_to_self_is_zero() {
        let lab = Rgb::new(200, 100, 50).to_oklab();
        assert!(approx_eq(lab.distance_sq(lab), 0.0, 1e-9));
    }

    #[test]
    fn black_white_distance_is_maximal_on_gray_axis() {
        let black = Rgb::BLACK.to_oklab();
        let white = Rgb::WHITE.to_oklab();
        let gray = Rgb::new(128, 128, 128).to_oklab();
        assert!(black.distance_sq(white) > black.distance_sq(gray));
        assert!(black.distance_sq(white) > gray.distance_sq(white));
    }

    #[test]
    fn display_is_lowercase_hex() {
        assert_eq!(Rgb::new(17, 34, 51).to_string(), "#112233");
        assert_eq!(Rgb::new(255, 0, 128).to_string(), "#ff0080");
    }

    // ── Properties ───────────────────────────────────────────────────────

    proptest! {
        #[test]
        fn oklab_is_finite_and_bounded(r: u8, g: u8, b: u8) {
            let lab = Rgb::new(r, g, b).to_oklab();
            prop_assert!(lab.l.is_finite() && lab.a.is_finite() && lab.b.is_finite());
            prop_assert!(lab.l >= -0.001 && lab.l <= 1.001, "L out of range: {}", lab.l);
        }

        #[test]
        fn distance_is_symmetric(r1: u8, g1: u8, b1: u8, r2: u8, g2: u8, b2: u8) {
            let x = Rgb::new(r1, g1, b1).to_oklab();
            let y = Rgb::new(r2, g2, b2).to_oklab();
            prop_assert!((x.distance_sq(y) - y.distance_sq(x)).abs() < 1e-9);
        }
    }
}
