//! PDF output through the lopdf object model

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream, StringFormat};

use super::surface::{DrawSurface, Font, MM_PER_PT};
use super::RenderError;

/// A4 portrait in points
pub const PAGE_SIZE_PT: (f64, f64) = (595.28, 841.89);

fn real(value: f64) -> Object {
    Object::Real(value as f32)
}

/// Latin-1 bytes for the standard fonts; other characters become `?`
fn win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| u8::try_from(u32::from(c)).unwrap_or(b'?'))
        .collect()
}

/// [`DrawSurface`] producing a PDF document
#[derive(Debug)]
pub struct PdfSurface {
    finished_pages: Vec<Vec<Operation>>,
    current: Vec<Operation>,
    font: (Font, f64),
    producer: String,
}

impl Default for PdfSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfSurface {
    /// Empty document with one blank page
    pub fn new() -> Self {
        Self {
            finished_pages: Vec::new(),
            current: Vec::new(),
            font: (Font::Regular, 10.0),
            producer: format!("lcpeak {}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Set the producer recorded in the document information
    pub fn with_producer(mut self, producer: impl Into<String>) -> Self {
        self.producer = producer.into();
        self
    }

    fn x(x: f64) -> f64 {
        x / MM_PER_PT
    }

    fn y(y: f64) -> f64 {
        PAGE_SIZE_PT.1 - y / MM_PER_PT
    }

    fn point(&self, (x, y): (f64, f64)) -> Vec<Object> {
        vec![real(Self::x(x)), real(Self::y(y))]
    }

    fn check(values: &[f64]) -> Result<(), RenderError> {
        if values.iter().all(|v| v.is_finite()) {
            Ok(())
        } else {
            Err(RenderError::Surface(format!("non-finite coordinate in {:?}", values)))
        }
    }
}

impl DrawSurface for PdfSurface {
    type Output = Vec<u8>;

    fn set_font(&mut self, font: Font, size: f64) -> Result<(), RenderError> {
        Self::check(&[size])?;
        self.font = (font, size);
        Ok(())
    }

    fn set_gray(&mut self, level: f64) -> Result<(), RenderError> {
        Self::check(&[level])?;
        self.current
            .push(Operation::new("G", vec![real(level.clamp(0.0, 1.0))]));
        Ok(())
    }

    fn text(&mut self, x: f64, y: f64, text: &str) -> Result<(), RenderError> {
        Self::check(&[x, y])?;
        if text.is_empty() {
            return Ok(());
        }
        let (font, size) = self.font;
        let name = match font {
            Font::Regular => "F1",
            Font::Bold => "F2",
        };
        self.current.push(Operation::new("BT", vec![]));
        self.current
            .push(Operation::new("Tf", vec![name.into(), real(size)]));
        self.current.push(Operation::new("Td", self.point((x, y))));
        self.current.push(Operation::new(
            "Tj",
            vec![Object::String(win_ansi(text), StringFormat::Literal)],
        ));
        self.current.push(Operation::new("ET", vec![]));
        Ok(())
    }

    fn line(&mut self, from: (f64, f64), to: (f64, f64), width: f64) -> Result<(), RenderError> {
        self.polyline(&[from, to], width)
    }

    fn rect(&mut self, x: f64, y: f64, w: f64, h: f64, width: f64) -> Result<(), RenderError> {
        Self::check(&[x, y, w, h, width])?;
        self.current
            .push(Operation::new("w", vec![real(width / MM_PER_PT)]));
        self.current.push(Operation::new(
            "re",
            vec![
                real(Self::x(x)),
                real(Self::y(y + h)),
                real(w / MM_PER_PT),
                real(h / MM_PER_PT),
            ],
        ));
        self.current.push(Operation::new("S", vec![]));
        Ok(())
    }

    fn polyline(&mut self, points: &[(f64, f64)], width: f64) -> Result<(), RenderError> {
        let Some((&first, rest)) = points.split_first() else {
            return Ok(());
        };
        Self::check(&[width])?;
        for &(x, y) in points {
            Self::check(&[x, y])?;
        }
        self.current
            .push(Operation::new("w", vec![real(width / MM_PER_PT)]));
        self.current.push(Operation::new("m", self.point(first)));
        for &p in rest {
            self.current.push(Operation::new("l", self.point(p)));
        }
        self.current.push(Operation::new("S", vec![]));
        Ok(())
    }

    fn new_page(&mut self) -> Result<(), RenderError> {
        let page = std::mem::take(&mut self.current);
        self.finished_pages.push(page);
        Ok(())
    }

    fn finish(mut self) -> Result<Vec<u8>, RenderError> {
        let page = std::mem::take(&mut self.current);
        self.finished_pages.push(page);

        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let regular_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
            "Encoding" => "WinAnsiEncoding",
        });
        let bold_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica-Bold",
            "Encoding" => "WinAnsiEncoding",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! {
                "F1" => regular_id,
                "F2" => bold_id,
            },
        });

        let mut kids: Vec<Object> = Vec::with_capacity(self.finished_pages.len());
        for operations in self.finished_pages {
            let content = Content { operations };
            let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            });
            kids.push(page_id.into());
        }

        let count = kids.len() as i64;
        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
            "MediaBox" => vec![real(0.0), real(0.0), real(PAGE_SIZE_PT.0), real(PAGE_SIZE_PT.1)],
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages));

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        let info_id = doc.add_object(dictionary! {
            "Producer" => Object::string_literal(self.producer.as_str()),
        });
        doc.trailer.set("Root", catalog_id);
        doc.trailer.set("Info", info_id);

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes)
            .map_err(|e| RenderError::Surface(format!("failed to serialize PDF: {}", e)))?;
        Ok(bytes)
    }
}
