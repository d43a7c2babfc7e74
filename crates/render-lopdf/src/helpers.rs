use letterpress_layout::config::UNDERLINE_OFFSET_RATIO;
use letterpress_layout::{Page, Segment};
use letterpress_render_core::RenderError;
use letterpress_render_core::utils::{flip_y, to_win_ansi};
use lopdf::content::{Content, Operation};
use lopdf::{Object, StringFormat};
use std::collections::HashMap;

/// Builds the content stream for one page. `font_map` maps PostScript font
/// names to resource names such as `F1`.
pub fn render_page_to_content(
    page: &Page,
    page_height: f32,
    font_map: &HashMap<String, String>,
) -> Result<Content, RenderError> {
    let mut ctx = PageContext::new(page_height, font_map);
    for line in &page.lines {
        for segment in &line.segments {
            ctx.draw_segment(segment, line.baseline)?;
        }
    }
    Ok(ctx.finish())
}

/// A PDF text string: literal when ASCII, UTF-16BE with a byte order mark
/// otherwise.
pub fn pdf_text_string(text: &str) -> Object {
    if text.is_ascii() {
        return Object::String(text.as_bytes().to_vec(), StringFormat::Literal);
    }
    let mut bytes = vec![0xFE, 0xFF];
    for unit in text.encode_utf16() {
        bytes.extend_from_slice(&unit.to_be_bytes());
    }
    Object::String(bytes, StringFormat::Hexadecimal)
}

struct PageContext<'a> {
    page_height: f32,
    content: Content,
    state: PageRenderState,
    font_map: &'a HashMap<String, String>,
}

#[derive(Default, Clone, PartialEq)]
struct PageRenderState {
    font_name: String,
    font_size: f32,
    line_width: f32,
}

impl<'a> PageContext<'a> {
    fn new(page_height: f32, font_map: &'a HashMap<String, String>) -> Self {
        Self {
            page_height,
            content: Content { operations: vec![] },
            state: Default::default(),
            font_map,
        }
    }

    fn finish(self) -> Content {
        self.content
    }

    fn push(&mut self, operator: &str, operands: Vec<Object>) {
        self.content.operations.push(Operation::new(operator, operands));
    }

    fn draw_segment(&mut self, segment: &Segment, baseline: f32) -> Result<(), RenderError> {
        if segment.text.trim().is_empty() {
            return Ok(());
        }
        self.push("BT", vec![]);
        self.set_font(segment)?;
        let pdf_y = flip_y(baseline, self.page_height);
        self.push("Td", vec![segment.x.into(), pdf_y.into()]);
        self.push("Tj", vec![Object::String(to_win_ansi(&segment.text), StringFormat::Literal)]);
        self.push("ET", vec![]);

        if segment.underline {
            self.draw_underline(segment, baseline);
        }
        Ok(())
    }

    fn set_font(&mut self, segment: &Segment) -> Result<(), RenderError> {
        let postscript_name = segment.face.postscript_name();
        let internal_name = self
            .font_map
            .get(postscript_name)
            .ok_or_else(|| RenderError::UnregisteredFont(postscript_name.to_string()))?;

        if self.state.font_name != *internal_name || self.state.font_size != segment.font_size {
            self.push(
                "Tf",
                vec![Object::Name(internal_name.as_bytes().to_vec()), segment.font_size.into()],
            );
            self.state.font_name = internal_name.clone();
            self.state.font_size = segment.font_size;
        }
        Ok(())
    }

    fn draw_underline(&mut self, segment: &Segment, baseline: f32) {
        let thickness = (segment.font_size * 0.05).max(0.5);
        if self.state.line_width != thickness {
            self.push("w", vec![thickness.into()]);
            self.state.line_width = thickness;
        }
        let y = flip_y(baseline + segment.font_size * UNDERLINE_OFFSET_RATIO, self.page_height);
        self.push("m", vec![segment.x.into(), y.into()]);
        self.push("l", vec![(segment.x + segment.width).into(), y.into()]);
        self.push("S", vec![]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use letterpress_layout::PositionedLine;
    use letterpress_types::{Emphasis, FontFace, FontFamily};

    fn segment(text: &str, underline: bool) -> Segment {
        Segment {
            text: text.to_string(),
            face: FontFace::new(FontFamily::Helvetica, Emphasis { underline, ..Emphasis::NONE }),
            font_size: 10.0,
            x: 50.0,
            width: 40.0,
            underline,
        }
    }

    fn page(segments: Vec<Segment>) -> Page {
        Page {
            lines: vec![PositionedLine { x: 50.0, y: 90.0, baseline: 100.0, height: 13.0, segments }],
        }
    }

    fn font_map() -> HashMap<String, String> {
        HashMap::from([("Helvetica".to_string(), "F1".to_string())])
    }

    fn operators(content: &Content) -> Vec<&str> {
        content.operations.iter().map(|op| op.operator.as_str()).collect()
    }

    #[test]
    fn text_is_positioned_at_the_flipped_baseline() {
        let content = render_page_to_content(&page(vec![segment("Hello", false)]), 800.0, &font_map()).unwrap();
        assert_eq!(operators(&content), vec!["BT", "Tf", "Td", "Tj", "ET"]);
        let td = &content.operations[2];
        assert_eq!(td.operands[0].as_f32().unwrap(), 50.0);
        assert_eq!(td.operands[1].as_f32().unwrap(), 700.0);
    }

    #[test]
    fn underline_is_a_stroked_rule_below_the_baseline() {
        let content = render_page_to_content(&page(vec![segment("Hi", true)]), 800.0, &font_map()).unwrap();
        assert_eq!(operators(&content), vec!["BT", "Tf", "Td", "Tj", "ET", "w", "m", "l", "S"]);
        let moveto = &content.operations[6];
        assert_eq!(moveto.operands[0].as_f32().unwrap(), 50.0);
        assert!((moveto.operands[1].as_f32().unwrap() - 698.5).abs() < 1e-3);
        let lineto = &content.operations[7];
        assert_eq!(lineto.operands[0].as_f32().unwrap(), 90.0);
    }

    #[test]
    fn blank_segments_draw_nothing() {
        let content = render_page_to_content(&page(vec![segment("   ", true)]), 800.0, &font_map()).unwrap();
        assert!(content.operations.is_empty());
    }

    #[test]
    fn font_is_selected_once_per_change() {
        let content =
            render_page_to_content(&page(vec![segment("a", false), segment("b", false)]), 800.0, &font_map())
                .unwrap();
        assert_eq!(operators(&content).iter().filter(|op| **op == "Tf").count(), 1);
    }

    #[test]
    fn unregistered_fonts_are_errors() {
        let result = render_page_to_content(&page(vec![segment("a", false)]), 800.0, &HashMap::new());
        assert!(matches!(result, Err(RenderError::UnregisteredFont(name)) if name == "Helvetica"));
    }

    #[test]
    fn text_strings_switch_to_utf16_for_non_ascii() {
        assert!(matches!(
            pdf_text_string("Letter"),
            Object::String(ref bytes, StringFormat::Literal) if bytes == b"Letter"
        ));
        assert!(matches!(
            pdf_text_string("é"),
            Object::String(ref bytes, StringFormat::Hexadecimal) if *bytes == [0xFE, 0xFF, 0x00, 0xE9]
        ));
    }
}
