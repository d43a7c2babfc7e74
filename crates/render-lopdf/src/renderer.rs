use crate::helpers::{self, pdf_text_string};
use crate::writer::StreamingPdfWriter;
use letterpress_layout::{Page, PaginatedOutput};
use letterpress_render_core::{DocumentRenderer, RenderError, render_paginated};
use letterpress_types::{FontFace, Size};
use lopdf::{Dictionary, Object, ObjectId, dictionary};
use std::collections::HashMap;
use std::io::{Cursor, Seek, Write};

const PRODUCER: &str = "letterpress";

/// A PDF renderer using the `lopdf` object model and the standard Type1
/// fonts. Output contains no timestamps, so equal input gives equal bytes.
pub struct LopdfRenderer<W: Write + Seek + Send> {
    writer: Option<StreamingPdfWriter<W>>,
    faces: Vec<FontFace>,
    font_map: HashMap<String, String>,
    title: Option<String>,
}

impl<W: Write + Seek + Send> LopdfRenderer<W> {
    /// Registers `faces` as `F1`, `F2`, ... in the given order. Helvetica is
    /// registered when no face is given.
    pub fn new(faces: &[FontFace]) -> Self {
        let faces = if faces.is_empty() { vec![FontFace::default()] } else { faces.to_vec() };
        let font_map = faces
            .iter()
            .enumerate()
            .map(|(i, face)| (face.postscript_name().to_string(), format!("F{}", i + 1)))
            .collect();
        Self { writer: None, faces, font_map, title: None }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn font_map(&self) -> &HashMap<String, String> {
        &self.font_map
    }

    fn writer_mut(&mut self) -> Result<&mut StreamingPdfWriter<W>, RenderError> {
        self.writer.as_mut().ok_or(RenderError::NotStarted)
    }
}

impl LopdfRenderer<Cursor<Vec<u8>>> {
    /// Renders `output` to PDF bytes in memory.
    pub fn render_to_vec(output: &PaginatedOutput, title: &str) -> Result<Vec<u8>, RenderError> {
        let renderer = Self::new(&output.faces()).with_title(title);
        let cursor = render_paginated(Box::new(renderer), Cursor::new(Vec::new()), output)?;
        Ok(cursor.into_inner())
    }
}

impl<W: Write + Seek + Send> DocumentRenderer<W> for LopdfRenderer<W> {
    fn begin_document(&mut self, writer: W) -> Result<(), RenderError> {
        let mut font_dict = Dictionary::new();
        for face in &self.faces {
            let postscript_name = face.postscript_name();
            if let Some(internal_name) = self.font_map.get(postscript_name) {
                let single_font_dict = dictionary! {
                    "Type" => "Font",
                    "Subtype" => "Type1",
                    "BaseFont" => postscript_name,
                    "Encoding" => "WinAnsiEncoding",
                };
                font_dict.set(internal_name.as_bytes(), Object::Dictionary(single_font_dict));
            }
        }

        let mut writer = StreamingPdfWriter::new(writer, "1.7", font_dict)?;
        let mut info = dictionary! { "Producer" => pdf_text_string(PRODUCER) };
        if let Some(title) = &self.title {
            info.set("Title", pdf_text_string(title));
        }
        writer.set_info(info);
        self.writer = Some(writer);
        Ok(())
    }

    fn render_page_content(&mut self, page: &Page, page_size: Size) -> Result<ObjectId, RenderError> {
        let content = helpers::render_page_to_content(page, page_size.height, &self.font_map)?;
        let content_id = self.writer_mut()?.write_content_stream(content)?;
        Ok(content_id)
    }

    fn write_page_object(
        &mut self,
        content_stream_ids: Vec<ObjectId>,
        page_size: Size,
    ) -> Result<ObjectId, RenderError> {
        let writer = self.writer_mut()?;
        let page_dict = dictionary! {
            "Type" => "Page",
            "Parent" => writer.pages_id(),
            "MediaBox" => vec![0.0.into(), 0.0.into(), page_size.width.into(), page_size.height.into()],
            "Contents" => Object::Array(content_stream_ids.into_iter().map(Object::Reference).collect()),
            "Resources" => writer.resources_id(),
        };
        let page_id = writer.write_object(page_dict.into())?;
        Ok(page_id)
    }

    fn finish(self: Box<Self>, page_ids: Vec<ObjectId>) -> Result<W, RenderError> {
        let mut renderer = *self;
        let Some(mut writer) = renderer.writer.take() else {
            return Err(RenderError::NotStarted);
        };
        log::debug!("Finishing PDF with {} page(s) and {} font(s)", page_ids.len(), renderer.faces.len());
        writer.set_page_ids(page_ids);
        Ok(writer.finish()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use letterpress_layout::{PositionedLine, Segment};
    use letterpress_types::{Emphasis, FontFamily};
    use lopdf::Document;

    const BOLD: Emphasis = Emphasis { bold: true, italic: false, underline: false };

    fn output(pages: usize) -> PaginatedOutput {
        let line = |text: &str, face: FontFace| PositionedLine {
            x: 56.0,
            y: 56.0,
            baseline: 64.8,
            height: 14.0,
            segments: vec![Segment {
                text: text.to_string(),
                face,
                font_size: 11.0,
                x: 56.0,
                width: 30.0,
                underline: false,
            }],
        };
        PaginatedOutput {
            page_size: Size::new(595.28, 841.89),
            pages: (0..pages)
                .map(|i| Page {
                    lines: vec![
                        line(&format!("Page {}", i + 1), FontFace::default()),
                        line("Bold", FontFace::new(FontFamily::Times, BOLD)),
                    ],
                })
                .collect(),
        }
    }

    #[test]
    fn produces_a_loadable_pdf_with_every_page() {
        let bytes = LopdfRenderer::render_to_vec(&output(3), "Address Change").unwrap();
        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 3);
    }

    #[test]
    fn registers_only_the_faces_in_use() {
        let out = output(1);
        let renderer: LopdfRenderer<Cursor<Vec<u8>>> = LopdfRenderer::new(&out.faces());
        assert_eq!(renderer.font_map().len(), 2);
        assert_eq!(renderer.font_map().get("Helvetica").map(String::as_str), Some("F1"));
        assert_eq!(renderer.font_map().get("Times-Bold").map(String::as_str), Some("F2"));
    }

    #[test]
    fn output_is_byte_for_byte_reproducible() {
        let a = LopdfRenderer::render_to_vec(&output(2), "Letter").unwrap();
        let b = LopdfRenderer::render_to_vec(&output(2), "Letter").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn finishing_without_beginning_is_an_error() {
        let renderer: Box<LopdfRenderer<Cursor<Vec<u8>>>> = Box::new(LopdfRenderer::new(&[]));
        assert!(matches!(renderer.finish(vec![]), Err(RenderError::NotStarted)));
    }
}
