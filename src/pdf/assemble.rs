use lopdf::{Document, Object};
use std::io::{BufWriter, Write};
use std::path::Path;

use super::PdfDocument;
use crate::error::WriteError;
use crate::page_range::PageSet;

// Catalog entries that point into the page tree and may reference dropped pages
const PAGE_BOUND_CATALOG_KEYS: [&[u8]; 3] = [b"Outlines", b"Dests", b"AcroForm"];

/// Build a new document holding exactly `pages` of `source`, in page order.
///
/// The source's trailer, and with it the Info dictionary, is carried over
/// unchanged. Bookmarks, named destinations and form fields are not.
/// Indices must already be validated against `source`.
pub fn assemble(source: &PdfDocument, pages: &PageSet) -> Document {
    let mut new_doc = source.document().clone();

    if let Ok(root) = new_doc.trailer.get(b"Root").and_then(Object::as_reference) {
        if let Ok(catalog) = new_doc.get_dictionary_mut(root) {
            for key in PAGE_BOUND_CATALOG_KEYS {
                catalog.remove(key);
            }
        }
    }

    // delete_pages takes 1-based page numbers
    let pages_to_delete: Vec<u32> = (0..source.page_count())
        .filter(|&index| !pages.contains(index))
        .map(|index| index + 1)
        .collect();

    if !pages_to_delete.is_empty() {
        new_doc.delete_pages(&pages_to_delete);
    }
    new_doc.prune_objects();
    new_doc.compress();
    new_doc
}

/// Write `doc` to `path` so that readers only ever see a complete file.
///
/// The document goes to a temporary file beside `path` first and is then
/// renamed over it. On failure the temporary file is removed and `path` is
/// left as it was.
pub fn save_atomic(doc: &mut Document, path: &Path) -> Result<(), WriteError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = tempfile::Builder::new()
        .prefix(".pdfslice-")
        .suffix(".pdf.part")
        .tempfile_in(dir)?;
    {
        let mut writer = BufWriter::new(tmp.as_file_mut());
        doc.save_to(&mut writer)?;
        writer.flush()?;
    }
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
