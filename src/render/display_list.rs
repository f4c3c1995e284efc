//! Recording surface for inspecting what a report draws

use super::surface::{DrawSurface, Font};
use super::RenderError;

/// One recorded drawing command
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Font change
    Font(Font, f64),
    /// Stroke gray level
    Gray(f64),
    /// Text at a baseline position
    Text {
        /// Left edge in mm
        x: f64,
        /// Baseline in mm
        y: f64,
        /// Content
        text: String,
    },
    /// Polyline (lines are two-point polylines)
    Path {
        /// Points in mm
        points: Vec<(f64, f64)>,
        /// Stroke width in mm
        width: f64,
    },
    /// Rectangle outline
    Rect {
        /// Left edge
        x: f64,
        /// Top edge
        y: f64,
        /// Width
        w: f64,
        /// Height
        h: f64,
    },
}

/// Commands of every page, in order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DisplayList {
    pages: Vec<Vec<DrawCommand>>,
}

impl DisplayList {
    /// List with one empty page
    pub fn new() -> Self {
        Self {
            pages: vec![Vec::new()],
        }
    }

    /// Recorded pages
    pub fn pages(&self) -> &[Vec<DrawCommand>] {
        &self.pages
    }

    /// Every text drawn on `page`
    pub fn texts(&self, page: usize) -> Vec<&str> {
        self.pages
            .get(page)
            .map(|cmds| {
                cmds.iter()
                    .filter_map(|c| match c {
                        DrawCommand::Text { text, .. } => Some(text.as_str()),
                        _ => None,
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Whether any page shows exactly `text`
    pub fn contains_text(&self, text: &str) -> bool {
        (0..self.pages.len()).any(|p| self.texts(p).contains(&text))
    }

    fn push(&mut self, command: DrawCommand) {
        if self.pages.is_empty() {
            self.pages.push(Vec::new());
        }
        if let Some(page) = self.pages.last_mut() {
            page.push(command);
        }
    }
}

impl DrawSurface for DisplayList {
    type Output = DisplayList;

    fn set_font(&mut self, font: Font, size: f64) -> Result<(), RenderError> {
        self.push(DrawCommand::Font(font, size));
        Ok(())
    }

    fn set_gray(&mut self, level: f64) -> Result<(), RenderError> {
        self.push(DrawCommand::Gray(level));
        Ok(())
    }

    fn text(&mut self, x: f64, y: f64, text: &str) -> Result<(), RenderError> {
        if !text.is_empty() {
            self.push(DrawCommand::Text {
                x,
                y,
                text: text.to_string(),
            });
        }
        Ok(())
    }

    fn line(&mut self, from: (f64, f64), to: (f64, f64), width: f64) -> Result<(), RenderError> {
        self.polyline(&[from, to], width)
    }

    fn rect(&mut self, x: f64, y: f64, w: f64, h: f64, _width: f64) -> Result<(), RenderError> {
        self.push(DrawCommand::Rect { x, y, w, h });
        Ok(())
    }

    fn polyline(&mut self, points: &[(f64, f64)], width: f64) -> Result<(), RenderError> {
        if !points.is_empty() {
            self.push(DrawCommand::Path {
                points: points.to_vec(),
                width,
            });
        }
        Ok(())
    }

    fn new_page(&mut self) -> Result<(), RenderError> {
        self.pages.push(Vec::new());
        Ok(())
    }

    fn finish(self) -> Result<DisplayList, RenderError> {
        Ok(self)
    }
}
