use lopdf::content::Content;
use lopdf::{Dictionary, Object, ObjectId, Stream, dictionary};
use std::collections::BTreeMap;
use std::io::{self, Seek, Write};

const RESOURCES_ID: ObjectId = (1, 0);
const PAGES_ID: ObjectId = (2, 0);
const CATALOG_ID: ObjectId = (3, 0);

/// Writes a PDF incrementally. Content streams and page objects go straight
/// to the underlying writer as they are produced; the shared resources, page
/// tree, catalog and document info are held back until [`finish`](Self::finish).
pub struct StreamingPdfWriter<W: Write + Seek> {
    writer: W,
    /// Byte offset of every object written so far, by object number.
    offsets: BTreeMap<u32, u64>,
    last_id: u32,
    info: Option<Dictionary>,
    page_ids: Vec<ObjectId>,
    resources: Dictionary,
}

impl<W: Write + Seek> StreamingPdfWriter<W> {
    /// Writes the header. `font_dict` becomes the `/Font` entry of the
    /// resources shared by every page.
    pub fn new(mut writer: W, version: &str, font_dict: Dictionary) -> io::Result<Self> {
        writer.write_all(format!("%PDF-{}\n", version).as_bytes())?;
        writer.write_all(b"%\xE2\xE3\xCF\xD3\n")?;
        Ok(Self {
            writer,
            offsets: BTreeMap::new(),
            last_id: CATALOG_ID.0,
            info: None,
            page_ids: Vec::new(),
            resources: dictionary! { "Font" => font_dict },
        })
    }

    pub fn pages_id(&self) -> ObjectId {
        PAGES_ID
    }

    pub fn resources_id(&self) -> ObjectId {
        RESOURCES_ID
    }

    /// Writes `object` immediately under a fresh id.
    pub fn write_object(&mut self, object: Object) -> io::Result<ObjectId> {
        self.last_id += 1;
        let id = (self.last_id, 0);
        self.write_at(id, &object)?;
        Ok(id)
    }

    pub fn write_content_stream(&mut self, content: Content) -> io::Result<ObjectId> {
        let encoded = content.encode().map_err(|e| io::Error::other(e.to_string()))?;
        self.write_object(Object::Stream(Stream::new(Dictionary::new(), encoded)))
    }

    /// The document information dictionary, referenced from the trailer.
    pub fn set_info(&mut self, info: Dictionary) {
        self.info = Some(info);
    }

    pub fn set_page_ids(&mut self, page_ids: Vec<ObjectId>) {
        self.page_ids = page_ids;
    }

    /// Writes the held-back objects, the cross-reference table and the
    /// trailer, and hands back the underlying writer.
    pub fn finish(mut self) -> io::Result<W> {
        let resources = std::mem::take(&mut self.resources);
        self.write_at(RESOURCES_ID, &Object::Dictionary(resources))?;

        let kids: Vec<Object> = self.page_ids.iter().copied().map(Object::Reference).collect();
        let page_count = kids.len() as i64;
        self.write_at(PAGES_ID, &dictionary! { "Type" => "Pages", "Kids" => kids, "Count" => page_count }.into())?;
        self.write_at(CATALOG_ID, &dictionary! { "Type" => "Catalog", "Pages" => PAGES_ID }.into())?;

        let mut trailer = dictionary! { "Root" => CATALOG_ID };
        if let Some(info) = self.info.take() {
            let info_id = self.write_object(info.into())?;
            trailer.set("Info", info_id);
        }
        trailer.set("Size", i64::from(self.last_id) + 1);

        let xref_start = self.writer.stream_position()?;
        let mut tail = Vec::new();
        encode::xref_table(&mut tail, &self.offsets);
        tail.extend_from_slice(b"trailer\n");
        encode::dictionary(&mut tail, &trailer);
        tail.extend_from_slice(format!("\nstartxref\n{}\n%%EOF", xref_start).as_bytes());
        self.writer.write_all(&tail)?;

        self.writer.flush()?;
        Ok(self.writer)
    }

    fn write_at(&mut self, id: ObjectId, object: &Object) -> io::Result<()> {
        let offset = self.writer.stream_position()?;
        let mut buf = format!("{} {} obj\n", id.0, id.1).into_bytes();
        encode::object(&mut buf, object);
        buf.extend_from_slice(b"\nendobj\n");
        self.writer.write_all(&buf)?;
        self.offsets.insert(id.0, offset);
        Ok(())
    }
}

/// Object serialization into a byte buffer. Dictionary keys are written in
/// sorted order so that equal documents give equal bytes.
mod encode {
    use lopdf::{Dictionary, Object, StringFormat};
    use std::collections::BTreeMap;

    pub fn object(out: &mut Vec<u8>, object: &Object) {
        match object {
            Object::Null => out.extend_from_slice(b"null"),
            Object::Boolean(value) => out.extend_from_slice(if *value { b"true" } else { b"false" }),
            Object::Integer(value) => out.extend_from_slice(value.to_string().as_bytes()),
            Object::Real(value) => real(out, *value),
            Object::Name(name) => {
                out.push(b'/');
                out.extend_from_slice(name);
            }
            Object::String(bytes, StringFormat::Literal) => literal(out, bytes),
            Object::String(bytes, StringFormat::Hexadecimal) => {
                out.push(b'<');
                for byte in bytes {
                    out.extend_from_slice(format!("{:02X}", byte).as_bytes());
                }
                out.push(b'>');
            }
            Object::Array(items) => {
                out.push(b'[');
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        out.push(b' ');
                    }
                    self::object(out, item);
                }
                out.push(b']');
            }
            Object::Dictionary(dict) => dictionary(out, dict),
            Object::Stream(stream) => {
                let mut dict = stream.dict.clone();
                dict.set("Length", stream.content.len() as i64);
                dictionary(out, &dict);
                out.extend_from_slice(b"\nstream\n");
                out.extend_from_slice(&stream.content);
                out.extend_from_slice(b"\nendstream");
            }
            Object::Reference((number, generation)) => {
                out.extend_from_slice(format!("{} {} R", number, generation).as_bytes());
            }
        }
    }

    pub fn dictionary(out: &mut Vec<u8>, dict: &Dictionary) {
        let sorted: BTreeMap<&[u8], &Object> = dict.iter().map(|(k, v)| (k.as_slice(), v)).collect();
        out.extend_from_slice(b"<<");
        for (key, value) in sorted {
            out.push(b'/');
            out.extend_from_slice(key);
            out.push(b' ');
            object(out, value);
            out.push(b' ');
        }
        out.extend_from_slice(b">>");
    }

    /// Three decimals at most, trailing zeros dropped: `0.8`, `612.0`.
    fn real(out: &mut Vec<u8>, value: f32) {
        let fixed = format!("{:.3}", value);
        let trimmed = fixed.trim_end_matches('0');
        out.extend_from_slice(trimmed.as_bytes());
        if trimmed.ends_with('.') {
            out.push(b'0');
        }
    }

    fn literal(out: &mut Vec<u8>, bytes: &[u8]) {
        out.push(b'(');
        for &byte in bytes {
            match byte {
                b'(' | b')' | b'\\' => out.extend_from_slice(&[b'\\', byte]),
                b'\r' => out.extend_from_slice(b"\\r"),
                _ => out.push(byte),
            }
        }
        out.push(b')');
    }

    /// One subsection per run of consecutive object numbers, after the
    /// mandatory free entry for object 0.
    pub fn xref_table(out: &mut Vec<u8>, offsets: &BTreeMap<u32, u64>) {
        out.extend_from_slice(b"xref\n0 1\n0000000000 65535 f \n");
        let mut entries = offsets.iter().peekable();
        while let Some((&first, &offset)) = entries.next() {
            let mut run = vec![offset];
            loop {
                let expected = first + run.len() as u32;
                match entries.next_if(|(id, _)| **id == expected) {
                    Some((_, &offset)) => run.push(offset),
                    None => break,
                }
            }
            out.extend_from_slice(format!("{} {}\n", first, run.len()).as_bytes());
            for offset in run {
                out.extend_from_slice(format!("{:010} 00000 n \n", offset).as_bytes());
            }
        }
    }
}
