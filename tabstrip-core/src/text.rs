//! Text measurement and shaping seam.
//!
//! The engine never rasterizes text. The host supplies a [`TextShaper`] that
//! measures strings and produces trimmed layouts; the engine records the
//! resulting [`TextLayout`]s into draw commands. [`FixedMetricsShaper`] is a
//! deterministic implementation for tests and headless use.

use unicode_segmentation::UnicodeSegmentation;

use crate::{Dp, Px};

/// The ellipsis appended by tail truncation.
pub const ELLIPSIS: &str = "…";

/// Style selector handed to the shaper alongside every string.
///
/// The shaper maps this onto a concrete font; the engine only threads it
/// through.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    /// Font size in density-independent pixels.
    pub size: Dp,
    /// Whether the host should synthesize a bold face when the real one is
    /// unavailable for this string.
    pub fake_bold: bool,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            size: Dp(14.0),
            fake_bold: false,
        }
    }
}

/// Truncation policy for constrained shaping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TruncateAt {
    /// Drop trailing content and append [`ELLIPSIS`].
    End,
}

/// A shaped, possibly trimmed, single-line text layout.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLayout {
    /// The text after any truncation, including the ellipsis.
    pub text: String,
    /// Rendered width.
    pub width: Px,
    /// Rendered height.
    pub height: Px,
}

/// Host-provided text measurement and shaping.
pub trait TextShaper: Send + Sync {
    /// Returns the rendered width of `text` in device units.
    fn measure(&self, text: &str, style: &TextStyle) -> Px;

    /// Shapes `text` into at most `max_width`, applying `truncate` when it
    /// does not fit. A string whose measured width equals `max_width` exactly
    /// must come back untrimmed.
    fn shape(&self, text: &str, style: &TextStyle, max_width: Px, truncate: TruncateAt)
    -> TextLayout;
}

/// A shaper with a constant advance per grapheme cluster.
///
/// Deterministic and font-free; used by the test suites and useful for
/// headless measurement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedMetricsShaper {
    /// Advance width of every grapheme cluster.
    pub advance: Px,
    /// Line height of every layout.
    pub line_height: Px,
}

impl FixedMetricsShaper {
    /// Creates a shaper with the given per-grapheme advance and line height.
    pub const fn new(advance: Px, line_height: Px) -> Self {
        Self {
            advance,
            line_height,
        }
    }
}

impl Default for FixedMetricsShaper {
    fn default() -> Self {
        Self::new(Px(10), Px(20))
    }
}

impl TextShaper for FixedMetricsShaper {
    fn measure(&self, text: &str, _style: &TextStyle) -> Px {
        self.advance * text.graphemes(true).count() as i32
    }

    fn shape(
        &self,
        text: &str,
        style: &TextStyle,
        max_width: Px,
        truncate: TruncateAt,
    ) -> TextLayout {
        let full_width = self.measure(text, style);
        if full_width <= max_width {
            return TextLayout {
                text: text.to_owned(),
                width: full_width,
                height: self.line_height,
            };
        }

        let TruncateAt::End = truncate;
        let budget = max_width - self.advance; // reserve room for the ellipsis
        let mut trimmed = String::new();
        let mut width = Px::ZERO;
        for grapheme in text.graphemes(true) {
            if width + self.advance > budget {
                break;
            }
            trimmed.push_str(grapheme);
            width += self.advance;
        }
        trimmed.push_str(ELLIPSIS);
        TextLayout {
            text: trimmed,
            width: width + self.advance,
            height: self.line_height,
        }
    }
}
