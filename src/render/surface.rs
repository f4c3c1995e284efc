//! Drawing surface abstraction

use super::RenderError;

/// Millimetres per PDF point
pub const MM_PER_PT: f64 = 25.4 / 72.0;

/// Typefaces available to the report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Font {
    /// Helvetica
    Regular,
    /// Helvetica-Bold
    Bold,
}

/// A page-based drawing target.
///
/// Coordinates are millimetres from the top-left corner of the current page;
/// font sizes are in points. The first page exists before the first call.
pub trait DrawSurface {
    /// Result of [`DrawSurface::finish`]
    type Output;

    /// Select the font for following text
    fn set_font(&mut self, font: Font, size: f64) -> Result<(), RenderError>;

    /// Stroke color as a gray level, 0 = black, 1 = white
    fn set_gray(&mut self, level: f64) -> Result<(), RenderError>;

    /// Draw text with its baseline starting at `(x, y)`
    fn text(&mut self, x: f64, y: f64, text: &str) -> Result<(), RenderError>;

    /// Straight line
    fn line(&mut self, from: (f64, f64), to: (f64, f64), width: f64) -> Result<(), RenderError>;

    /// Rectangle outline with its top-left corner at `(x, y)`
    fn rect(&mut self, x: f64, y: f64, w: f64, h: f64, width: f64) -> Result<(), RenderError>;

    /// Open polyline through `points`
    fn polyline(&mut self, points: &[(f64, f64)], width: f64) -> Result<(), RenderError>;

    /// Start a new page
    fn new_page(&mut self) -> Result<(), RenderError>;

    /// Close the document
    fn finish(self) -> Result<Self::Output, RenderError>;
}

/// Approximate advance of one Helvetica glyph in em
fn glyph_em(c: char) -> f64 {
    match c {
        ' ' | '.' | ',' | ':' | ';' | '!' | 'i' | 'j' | 'l' | 'I' | '|' => 0.278,
        'f' | 't' | 'r' | '-' | '(' | ')' | '[' | ']' | '/' => 0.333,
        '0'..='9' | '$' | '_' => 0.556,
        'm' | 'M' | 'W' => 0.833,
        'w' | '%' => 0.778,
        'A'..='Z' => 0.667,
        'a'..='z' => 0.5,
        _ => 0.556,
    }
}

/// Approximate width of `text` in millimetres
pub fn text_width(text: &str, font: Font, size: f64) -> f64 {
    let em: f64 = text.chars().map(glyph_em).sum();
    let bold = match font {
        Font::Regular => 1.0,
        Font::Bold => 1.06,
    };
    em * bold * size * MM_PER_PT
}
