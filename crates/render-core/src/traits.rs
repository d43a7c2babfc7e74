use crate::error::RenderError;
use letterpress_layout::{Page, PaginatedOutput};
use letterpress_types::Size;
use log::debug;
use lopdf::ObjectId;
use std::io::{Seek, Write};

/// A trait for document renderers, abstracting the PDF-writing primitives.
pub trait DocumentRenderer<W: Write + Seek + Send> {
    fn begin_document(&mut self, writer: W) -> Result<(), RenderError>;

    /// Writes the content stream for one page and returns its id.
    fn render_page_content(&mut self, page: &Page, page_size: Size) -> Result<ObjectId, RenderError>;

    fn write_page_object(
        &mut self,
        content_stream_ids: Vec<ObjectId>,
        page_size: Size,
    ) -> Result<ObjectId, RenderError>;

    fn finish(self: Box<Self>, page_ids: Vec<ObjectId>) -> Result<W, RenderError>;
}

/// Drives `renderer` over every page of `output`, in order.
pub fn render_paginated<W: Write + Seek + Send>(
    mut renderer: Box<dyn DocumentRenderer<W>>,
    writer: W,
    output: &PaginatedOutput,
) -> Result<W, RenderError> {
    renderer.begin_document(writer)?;
    let mut page_ids = Vec::with_capacity(output.pages.len());
    for page in &output.pages {
        let content_id = renderer.render_page_content(page, output.page_size)?;
        page_ids.push(renderer.write_page_object(vec![content_id], output.page_size)?);
    }
    debug!("Rendered {} pages", page_ids.len());
    renderer.finish(page_ids)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct Recorder {
        calls: Arc<Mutex<Vec<String>>>,
        next_id: u32,
    }

    impl Recorder {
        fn log(&self, call: String) {
            if let Ok(mut calls) = self.calls.lock() {
                calls.push(call);
            }
        }
    }

    impl DocumentRenderer<Cursor<Vec<u8>>> for Recorder {
        fn begin_document(&mut self, _writer: Cursor<Vec<u8>>) -> Result<(), RenderError> {
            self.log("begin".into());
            Ok(())
        }

        fn render_page_content(&mut self, page: &Page, _page_size: Size) -> Result<ObjectId, RenderError> {
            self.next_id += 1;
            self.log(format!("content {} lines", page.lines.len()));
            Ok((self.next_id, 0))
        }

        fn write_page_object(&mut self, ids: Vec<ObjectId>, _page_size: Size) -> Result<ObjectId, RenderError> {
            self.next_id += 1;
            self.log(format!("page {:?}", ids));
            Ok((self.next_id, 0))
        }

        fn finish(self: Box<Self>, page_ids: Vec<ObjectId>) -> Result<Cursor<Vec<u8>>, RenderError> {
            self.log(format!("finish {:?}", page_ids));
            Ok(Cursor::new(Vec::new()))
        }
    }

    #[test]
    fn pages_are_rendered_in_order() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let renderer = Recorder { calls: Arc::clone(&calls), next_id: 0 };
        let output = PaginatedOutput {
            page_size: Size::new(100.0, 100.0),
            pages: vec![Page::default(), Page::default()],
        };

        render_paginated(Box::new(renderer), Cursor::new(Vec::new()), &output).unwrap();

        let calls = calls.lock().unwrap();
        assert_eq!(
            *calls,
            vec![
                "begin",
                "content 0 lines",
                "page [(1, 0)]",
                "content 0 lines",
                "page [(3, 0)]",
                "finish [(2, 0), (4, 0)]",
            ]
        );
    }
}
