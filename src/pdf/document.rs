use lopdf::{Document, Object, ObjectId};
use log::debug;
use std::path::{Path, PathBuf};

use crate::error::DocumentError;

/// Read-only view over an opened source PDF.
pub struct PdfDocument {
    doc: Document,
    path: PathBuf,
    pages: Vec<ObjectId>,
}

impl PdfDocument {
    /// Open a PDF for page assembly. Encrypted documents are rejected.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, DocumentError> {
        let path = path.as_ref();
        let doc = Document::load(path).map_err(|source| DocumentError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_document(doc, path)
    }

    pub fn from_document<P: AsRef<Path>>(doc: Document, path: P) -> Result<Self, DocumentError> {
        let path = path.as_ref().to_path_buf();
        // load() quietly decrypts files that open with an empty user password,
        // which drops Encrypt from the trailer but leaves encryption_state set
        if doc.is_encrypted() || doc.trailer.has(b"Encrypt") || doc.encryption_state.is_some() {
            return Err(DocumentError::Encrypted { path });
        }

        // get_pages is keyed by 1-based page number, so values come out in page order
        let pages: Vec<ObjectId> = doc.get_pages().into_values().collect();
        debug!("opened {} ({} pages)", path.display(), pages.len());

        Ok(PdfDocument { doc, path, pages })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    /// Object id of the page at 0-based `index`.
    pub fn page_at(&self, index: u32) -> Option<ObjectId> {
        self.pages.get(index as usize).copied()
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    /// The document information dictionary, if the trailer carries one.
    pub fn metadata(&self) -> Option<&lopdf::Dictionary> {
        match self.doc.trailer.get(b"Info") {
            Ok(Object::Reference(id)) => self.doc.get_dictionary(*id).ok(),
            Ok(Object::Dictionary(dict)) => Some(dict),
            _ => None,
        }
    }

    /// Get metadata from the document info dictionary
    pub fn get_info(&self) -> PdfInfo {
        let mut info = PdfInfo::default();

        if let Some(dict) = self.metadata() {
            info.title = get_string_from_dict(dict, b"Title");
            info.author = get_string_from_dict(dict, b"Author");
            info.creator = get_string_from_dict(dict, b"Creator");
            info.producer = get_string_from_dict(dict, b"Producer");
            info.creation_date = get_string_from_dict(dict, b"CreationDate");
            info.mod_date = get_string_from_dict(dict, b"ModDate");
            info.subject = get_string_from_dict(dict, b"Subject");
            info.keywords = get_string_from_dict(dict, b"Keywords");
        }

        info.page_count = self.page_count();
        info
    }
}

#[derive(Debug, Default, Clone)]
pub struct PdfInfo {
    pub title: Option<String>,
    pub author: Option<String>,
    pub creator: Option<String>,
    pub producer: Option<String>,
    pub creation_date: Option<String>,
    pub mod_date: Option<String>,
    pub subject: Option<String>,
    pub keywords: Option<String>,
    pub page_count: u32,
}

fn get_string_from_dict(dict: &lopdf::Dictionary, key: &[u8]) -> Option<String> {
    dict.get(key).ok().and_then(|obj| match obj {
        Object::String(bytes, _) => decode_pdf_string(bytes),
        _ => None,
    })
}

fn decode_pdf_string(bytes: &[u8]) -> Option<String> {
    if let Some(utf16) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        let units: Vec<u16> = utf16
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        String::from_utf16(&units).ok()
    } else {
        // Latin-1 is close enough to PDFDocEncoding for display
        Some(bytes.iter().map(|&b| b as char).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::testing::{sample_pdf, write_sample};

    #[test]
    fn test_page_order_and_count() {
        let doc = PdfDocument::from_document(sample_pdf(4, true), "four.pdf").unwrap();
        assert_eq!(doc.page_count(), 4);
        assert!(doc.page_at(3).is_some());
        assert!(doc.page_at(4).is_none());
    }

    #[test]
    fn test_info_strings() {
        let doc = PdfDocument::from_document(sample_pdf(2, true), "two.pdf").unwrap();
        let info = doc.get_info();
        assert_eq!(info.page_count, 2);
        assert_eq!(info.title.as_deref(), Some("Sample"));
        assert_eq!(info.author.as_deref(), Some("Ünïcode Author"));
        assert_eq!(info.producer, None);
    }

    #[test]
    fn test_missing_metadata() {
        let doc = PdfDocument::from_document(sample_pdf(1, false), "bare.pdf").unwrap();
        assert!(doc.metadata().is_none());
        assert_eq!(doc.get_info().title, None);
    }

    #[test]
    fn test_encrypted_rejected() {
        let mut raw = sample_pdf(1, false);
        raw.trailer.set("Encrypt", lopdf::Dictionary::new());
        assert!(matches!(
            PdfDocument::from_document(raw, "locked.pdf"),
            Err(DocumentError::Encrypted { .. })
        ));
    }

    #[test]
    fn test_encrypted_file_rejected_on_open() {
        let mut raw = sample_pdf(2, true);
        let id = Object::string_literal(b"0123456789abcdef".to_vec());
        raw.trailer.set("ID", vec![id.clone(), id]);
        let state = lopdf::EncryptionState::try_from(lopdf::EncryptionVersion::V2 {
            document: &raw,
            owner_password: "owner",
            user_password: "",
            key_length: 128,
            permissions: lopdf::Permissions::all(),
        })
        .unwrap();
        raw.encrypt(&state).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("locked.pdf");
        raw.save(&path).unwrap();

        match PdfDocument::open(&path) {
            Err(DocumentError::Encrypted { path: rejected }) => assert_eq!(rejected, path),
            Err(e) => panic!("expected encryption error, got {}", e),
            Ok(_) => panic!("encrypted document was accepted"),
        }
    }

    #[test]
    fn test_open_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_sample(dir.path(), "doc.pdf", 3);
        let doc = PdfDocument::open(&path).unwrap();
        assert_eq!(doc.page_count(), 3);
        assert_eq!(doc.path(), path.as_path());
    }

    #[test]
    fn test_open_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("junk.pdf");
        std::fs::write(&path, b"definitely not a pdf").unwrap();
        assert!(matches!(
            PdfDocument::open(&path),
            Err(DocumentError::Unreadable { .. })
        ));
    }

    #[test]
    fn test_decode_utf16() {
        assert_eq!(
            decode_pdf_string(&[0xFE, 0xFF, 0x00, 0x41, 0x00, 0x42]).as_deref(),
            Some("AB")
        );
    }
}
