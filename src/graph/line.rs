//! Glyphs, color tokens and the line buffer the renderers write into

use console::Style;

/// Fixed glyph vocabulary of the river graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    Padding,
    Commit,
    Root,
    Tip,
    RightMove,
    LeftMove,
    Bridge,
    MultiBranchExtension,
    MultiBranchStart,
}

impl Glyph {
    pub const fn as_char(self) -> char {
        match self {
            Glyph::Padding => '|',
            Glyph::Commit => '*',
            Glyph::Root => 'R',
            Glyph::Tip => 'T',
            Glyph::RightMove => '\\',
            Glyph::LeftMove => '/',
            Glyph::Bridge => '_',
            Glyph::MultiBranchExtension => '-',
            Glyph::MultiBranchStart => '.',
        }
    }
}

/// Glyphs drawn at a merge, indexed by a rolling offset seeded with the
/// merge layout.
pub(crate) const MERGE_GLYPHS: [Glyph; 3] = [Glyph::LeftMove, Glyph::Padding, Glyph::RightMove];

/// An opaque palette entry that knows how to wrap a single glyph.
///
/// The wrapped text may contain escape sequences; the engine counts screen
/// cells separately, so a token must render exactly one visible cell.
pub trait ColorToken {
    fn paint(&self, glyph: char) -> String;
}

impl ColorToken for Style {
    fn paint(&self, glyph: char) -> String {
        self.apply_to(glyph).to_string()
    }
}

/// Palette entry that leaves glyphs untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoColor;

impl ColorToken for NoColor {
    fn paint(&self, glyph: char) -> String {
        glyph.to_string()
    }
}

/// One finished line of graph output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedLine {
    /// Painted text, right-padded with spaces to `width` cells.
    pub text: String,
    /// Screen cells covered by `text`.
    pub width: usize,
    /// True for the single line per commit that carries the commit marker.
    pub is_commit: bool,
}

/// Line under construction, tracking screen width apart from byte length.
#[derive(Debug, Default)]
pub(crate) struct GraphLine {
    buf: String,
    width: usize,
}

impl GraphLine {
    pub(crate) fn push_char(&mut self, c: char) {
        self.buf.push(c);
        self.width += 1;
    }

    pub(crate) fn push_str(&mut self, s: &str) {
        self.buf.push_str(s);
        self.width += s.chars().count();
    }

    pub(crate) fn push_spaces(&mut self, count: usize) {
        for _ in 0..count {
            self.push_char(' ');
        }
    }

    pub(crate) fn push_painted<C: ColorToken>(&mut self, token: &C, glyph: Glyph) {
        self.buf.push_str(&token.paint(glyph.as_char()));
        self.width += 1;
    }

    pub(crate) fn pad_to(&mut self, width: usize) {
        if self.width < width {
            self.push_spaces(width - self.width);
        }
    }

    pub(crate) fn finish(self, is_commit: bool) -> RenderedLine {
        RenderedLine {
            text: self.buf,
            width: self.width,
            is_commit,
        }
    }
}
