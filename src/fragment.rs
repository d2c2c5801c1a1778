//! Positioned-text data model for decoded documents.
//!
//! A decoded PDF is a sequence of [`Page`]s, each holding the loose
//! [`TextFragment`]s the content stream produced. Fragments carry no
//! structure beyond position; the `layout` module reconstructs rows and
//! columns from them.

use serde::Serialize;

/// One positioned piece of decoded text from the source document.
///
/// A fragment is a single text-showing operation: one `(x, y)` anchor and
/// one or more decoded glyph runs shown at that position. A `TJ` array
/// with several string elements yields one fragment with several runs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextFragment {
    /// 1-indexed page number the fragment was found on.
    pub page: u32,
    /// Horizontal position of the fragment's anchor, in page units.
    pub x: f64,
    /// Vertical position, in page units, measured from the top of the
    /// page so that ascending `y` is reading order.
    pub y: f64,
    /// Decoded glyph runs, in the order the content stream showed them.
    pub runs: Vec<String>,
}

impl TextFragment {
    /// Creates a fragment with a single run.
    pub fn new(page: u32, x: f64, y: f64, text: impl Into<String>) -> Self {
        Self {
            page,
            x,
            y,
            runs: vec![text.into()],
        }
    }

    /// Creates a fragment from pre-decoded runs.
    pub fn with_runs(page: u32, x: f64, y: f64, runs: Vec<String>) -> Self {
        Self { page, x, y, runs }
    }
}

/// All text fragments found on one page, in content-stream order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Page {
    /// Fragments in the order the decoder encountered them. The layout
    /// stage depends on this order for tie-breaking, so it is preserved
    /// exactly as decoded.
    pub fragments: Vec<TextFragment>,
}

impl Page {
    /// Creates a page from its fragments.
    pub fn new(fragments: Vec<TextFragment>) -> Self {
        Self { fragments }
    }

    /// True when the page produced no text at all.
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }
}
