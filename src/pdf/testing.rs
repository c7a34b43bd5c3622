//! In-memory PDFs for tests. Page `i` (0-based) gets a MediaBox width of
//! `600 + i`, which survives assembly and identifies the page afterwards.

use lopdf::{content::Content, content::Operation, dictionary, Document, Object, Stream};
use std::path::{Path, PathBuf};

pub fn sample_pdf(num_pages: u32, with_info: bool) -> Document {
    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut kids = Vec::new();
    for i in 0..num_pages {
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 12.into()]),
                Operation::new("Td", vec![100.into(), 700.into()]),
                Operation::new(
                    "Tj",
                    vec![Object::string_literal(format!("Page {}", i + 1))],
                ),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(
            lopdf::Dictionary::new(),
            content.encode().unwrap(),
        ));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), Object::Integer(600 + i as i64), 792.into()],
            "Contents" => content_id,
            "Resources" => resources_id,
        });
        kids.push(Object::Reference(page_id));
    }

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => num_pages as i64,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    if with_info {
        let mut author = vec![0xFE, 0xFF];
        author.extend("Ünïcode Author".encode_utf16().flat_map(u16::to_be_bytes));
        let info_id = doc.add_object(dictionary! {
            "Title" => Object::string_literal("Sample"),
            "Author" => Object::String(author, lopdf::StringFormat::Hexadecimal),
        });
        doc.trailer.set("Info", info_id);
    }

    doc
}

pub fn write_sample(dir: &Path, name: &str, num_pages: u32) -> PathBuf {
    let path = dir.join(name);
    sample_pdf(num_pages, true).save(&path).unwrap();
    path
}

/// The 0-based source index of every page in `doc`, in page order.
pub fn page_marks(doc: &Document) -> Vec<u32> {
    doc.get_pages()
        .into_values()
        .map(|id| {
            let page = doc.get_dictionary(id).unwrap();
            let media_box = page.get(b"MediaBox").unwrap().as_array().unwrap();
            (media_box[2].as_i64().unwrap() - 600) as u32
        })
        .collect()
}

pub fn page_marks_at(path: &Path) -> Vec<u32> {
    page_marks(&Document::load(path).unwrap())
}
